//! Further documents inserted by the harness besides [new_course](crate::catalog::new_course).
//!
//! * [new_dataset] - an astronomy catalog record with namespaced attributes
//!   and a four-level `reference` branch
//! * [new_entry] - a protein database entry with a wide first level
//!   (26 children, more than 3-bit segments can address)
//!
//! Both are fixed, so labels computed for them are reproducible.

use crate::model::Element;

/// Name of the dataset element.
pub const DATASET_ELEMENT: &str = "dataset";

/// Number of nodes in [new_dataset] (dataset element included).
pub const NODES_PER_DATASET: usize = 28;

/// Name of the protein entry element.
pub const ENTRY_ELEMENT: &str = "Entry";

/// Number of nodes in [new_entry] (entry element included).
pub const NODES_PER_ENTRY: usize = 44;

const XLINK_NAMESPACE: &str = "http://www.w3.org/XML/XLink/0.9";

fn text(name: &str, value: &str) -> Element {
    Element::new(name).with_text(value)
}

fn author(initial: &str, last_name: &str) -> Element {
    Element::new("author").with_children([text("initial", initial), text("lastName", last_name)])
}

// =#========================================================================#=
// DATASET
// =#========================================================================$=
/// Returns the astronomy dataset record inserted into dataset collections.
///
/// ```
/// use relab::samples::{new_dataset, NODES_PER_DATASET};
/// use relab::model::Tree;
///
/// let dataset = new_dataset();
/// assert_eq!(dataset.data().attribute("subject"), Some("astronomy"));
/// assert_eq!(Tree::from_source(dataset).num_nodes(), NODES_PER_DATASET);
/// ```
pub fn new_dataset() -> Element {
    let altname = |kind: &str, value: &str| text("altname", value).with_attribute("type", kind);
    let keyword = |href: &str, value: &str| text("keyword", value).with_attribute("xlink:href", href);

    let other = Element::new("other").with_children([
        text("title", "Proper Motions of Stars in the Zone Catalogue"),
        author("J", "Spencer"),
        author("J", "Jackson"),
        text("name", "His Majesty's Stationery Office, London"),
        text("publisher", "???"),
        text("city", "???"),
        Element::new("date").with_child(text("year", "1936")),
    ]);

    Element::new(DATASET_ELEMENT)
        .with_attribute("subject", "astronomy")
        .with_attribute("xmlns:xlink", XLINK_NAMESPACE)
        .with_children([
            text(
                "title",
                "Proper Motions of Stars in the Zone Catalogue -40 to -52 degrees of 20843 Stars for 1900",
            ),
            altname("ADC", "1005"),
            altname("CDS", "I/5"),
            altname("brief", "Proper Motions in Cape Zone Catalogue -40/-52"),
            Element::new("reference").with_child(Element::new("source").with_child(other)),
            Element::new("keywords")
                .with_attribute(
                    "parentListURL",
                    "http://messier.gsfc.nasa.gov/xml/keywordlists/adc_keywords.html",
                )
                .with_child(keyword("Positional_data.html", "Positional data"))
                .with_child(keyword("Proper_motions.html", "Proper motions")),
            Element::new("descriptions")
                .with_child(Element::new("description").with_child(text(
                    "para",
                    "This catalog, listing the proper motions of 20,843 stars from the Cape Astrographic Zones...",
                )))
                .with_child(Element::new("details")),
            text("identifier", "I_5.xml"),
        ])
}

// =#========================================================================#=
// PROTEIN ENTRY
// =#========================================================================$=
/// Returns the protein entry inserted into protein databases.
///
/// ```
/// use relab::samples::{new_entry, NODES_PER_ENTRY};
/// use relab::model::Tree;
///
/// let entry = new_entry();
/// assert_eq!(entry.data().attribute("id"), Some("200K_HUMAN"));
/// assert_eq!(entry.children().len(), 26);
/// assert_eq!(Tree::from_source(entry).num_nodes(), NODES_PER_ENTRY);
/// ```
pub fn new_entry() -> Element {
    let modification = |date: &str, release: &str, kind: &str| {
        Element::new("Mod")
            .with_attribute("date", date)
            .with_attribute("Rel", release)
            .with_attribute("type", kind)
    };
    let cross_reference = |db: &str, primary: &str, secondary: &str| {
        Element::new(db)
            .with_attribute("prim_id", primary)
            .with_attribute("sec_id", secondary)
    };
    let feature = |kind: &str, from: &str, to: &str, descr: &str| {
        Element::new(kind)
            .with_attribute("from", from)
            .with_attribute("to", to)
            .with_child(text("Descr", descr))
    };
    let organisms = [
        "Eukaryota",
        "Metazoa",
        "Chordata",
        "Craniata",
        "Vertebrata",
        "Mammalia",
        "Primates",
        "Hominidae",
        "Homo",
    ];

    Element::new(ENTRY_ELEMENT)
        .with_attribute("id", "200K_HUMAN")
        .with_attribute("class", "STANDARD")
        .with_attribute("mtype", "PRT")
        .with_attribute("seqlen", "1200")
        .with_child(text("AC", "P99999"))
        .with_children([
            modification("10-JAN-2024", "55", "Created"),
            modification("10-JAN-2024", "55", "Last sequence update"),
            modification("20-FEB-2024", "56", "Last annotation update"),
        ])
        .with_child(text("Descr", "200 KDA SIGNALING RECEPTOR PROTEIN"))
        .with_child(text("Species", "Homo sapiens (Human)"))
        .with_children(organisms.map(|org| text("Org", org)))
        .with_child(
            Element::new("Ref")
                .with_attribute("num", "1")
                .with_attribute("pos", "SEQUENCE FROM N.A")
                .with_children([
                    text("Comment", "STRAIN=REFERENCE"),
                    text("DB", "PUBMED"),
                    text("MedlineID", "98765432"),
                    text("Author", "Smith J."),
                    text("Author", "Doe A."),
                    text("Author", "Brown T."),
                    text("Cite", "J. Biol. Chem. 299:1234-1245(2024)"),
                ]),
        )
        .with_child(
            Element::new("Ref")
                .with_attribute("num", "2")
                .with_attribute("pos", "ERRATUM")
                .with_child(text("Author", "Smith J."))
                .with_child(text("Cite", "J. Biol. Chem. 300:2345-2346(2024)")),
        )
        .with_children([
            cross_reference("EMBL", "X12345", "CAA12345"),
            cross_reference("INTERPRO", "IPR001234", "-"),
            cross_reference("INTERPRO", "IPR005678", "-"),
            cross_reference("PFAM", "PF00123", "SIGNAL").with_attribute("status", "1"),
            cross_reference("PFAM", "PF00456", "DOMAIN").with_attribute("status", "1"),
        ])
        .with_children(["Signaling", "Receptor", "Transmembrane"].map(|k| text("Keyword", k)))
        .with_child(Element::new("Features").with_children([
            feature("DOMAIN", "60", "120", "TRANSMEMBRANE DOMAIN"),
            feature("DOMAIN", "300", "450", "SIGNAL TRANSDUCTION DOMAIN"),
            feature("DOMAIN", "700", "900", "ATP BINDING DOMAIN"),
            feature("BINDING", "850", "860", "GTP BINDING SITE"),
        ]))
}
