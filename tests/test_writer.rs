use relab::catalog::course_catalog;
use relab::label::{Labeler, PathLabeler, RegionLabeler};
use relab::model::{Element, MarkupTree, Tree};
use relab::samples::{new_dataset, new_entry};
use relab::writer::{MarkupWriter, to_markup, write_markup_file};

fn small_course() -> MarkupTree {
    Tree::from_source(
        Element::new("course")
            .with_attribute("id", "c1")
            .with_child(Element::new("title").with_text("A&B"))
            .with_child(Element::new("lab")),
    )
}

#[test]
fn test_write_region_labels_indented() {
    let mut tree = small_course();
    RegionLabeler::new().label_tree(&mut tree).unwrap();

    let expected = concat!(
        "<course label=\"0,1,3\" id=\"c1\">\n",
        "  <title label=\"1,2,2\">A&amp;B</title>\n",
        "  <lab label=\"1,3,3\"/>\n",
        "</course>\n",
    );
    assert_eq!(to_markup(&tree), expected);
}

#[test]
fn test_write_path_labels_compact() {
    let mut tree = small_course();
    PathLabeler::new().label_tree(&mut tree).unwrap();

    let markup = MarkupWriter::new().with_indent(0).to_markup(&tree);
    assert_eq!(
        markup,
        r#"<course label="1,001,1" id="c1"><title label="2,001001,2">A&amp;B</title><lab label="2,001010,1"/></course>"#
    );
}

#[test]
fn test_unlabeled_nodes_have_no_label_attribute() {
    let tree = small_course();
    let markup = MarkupWriter::new().with_indent(0).to_markup(&tree);
    assert_eq!(
        markup,
        r#"<course id="c1"><title>A&amp;B</title><lab/></course>"#
    );
}

#[test]
fn test_custom_label_attribute_replaces_original() {
    let mut tree = Tree::from_source(
        Element::new("entry")
            .with_attribute("rid", "stale")
            .with_attribute("kind", "x\"y"),
    );
    RegionLabeler::new().label_tree(&mut tree).unwrap();

    let markup = MarkupWriter::new()
        .with_indent(0)
        .with_label_attribute("rid")
        .to_markup(&tree);
    assert_eq!(markup, r#"<entry rid="0,1,1" kind="x&quot;y"/>"#);
}

#[test]
fn test_document_element_wraps_forest() {
    let mut tree = Tree::from_sources([Element::new("a"), Element::new("b")]);
    RegionLabeler::new().label_tree(&mut tree).unwrap();

    let markup = MarkupWriter::new()
        .with_document_element("root")
        .with_declaration()
        .to_markup(&tree);
    let expected = concat!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
        "<root>\n",
        "  <a label=\"0,1,1\"/>\n",
        "  <b label=\"0,2,2\"/>\n",
        "</root>\n",
    );
    assert_eq!(markup, expected);
}

#[test]
fn test_text_is_written_before_children() {
    let tree = Tree::from_source(
        Element::new("p")
            .with_text("1 < 2")
            .with_child(Element::new("c")),
    );
    let markup = MarkupWriter::new().to_markup(&tree);
    assert_eq!(markup, "<p>\n  1 &lt; 2\n  <c/>\n</p>\n");
}

#[test]
fn test_write_markup_file() {
    let mut tree = Tree::from_source(course_catalog(2));
    RegionLabeler::new().label_tree(&mut tree).unwrap();
    let writer = MarkupWriter::new();

    let path = std::env::temp_dir().join(format!("relab-test-{}.xml", std::process::id()));
    write_markup_file(&path, &tree, &writer).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(written, writer.to_markup(&tree));
    assert!(written.starts_with("<root label=\"0,1,39\">\n"));
    assert!(written.contains("<lab label="));
}

#[test]
fn test_write_to_buffer() {
    let mut tree = small_course();
    RegionLabeler::new().label_tree(&mut tree).unwrap();

    let mut buffer = Vec::new();
    MarkupWriter::new().write(&tree, &mut buffer).unwrap();
    assert_eq!(String::from_utf8(buffer).unwrap(), to_markup(&tree));
}

#[test]
fn test_deep_chain_does_not_exhaust_stack() {
    const DEPTH: usize = 200_000;
    let mut tree: Tree<()> = Tree::new();
    let mut last = tree.add_root("n", ());
    for _ in 1..DEPTH {
        last = tree.add_new_child(last, "n", ()).unwrap();
    }
    RegionLabeler::new().label_tree(&mut tree).unwrap();

    let markup = MarkupWriter::new().with_indent(0).to_markup(&tree);
    assert!(markup.starts_with(&format!("<n label=\"0,1,{DEPTH}\"><n label=\"1,2,{DEPTH}\">")));
    assert!(markup.contains(&format!("<n label=\"{},{DEPTH},{DEPTH}\"/>", DEPTH - 1)));
    assert!(markup.ends_with("</n></n>"));
    assert_eq!(markup.matches("</n>").count(), DEPTH - 1);
}

#[test]
fn test_dataset_attributes_are_written_back() {
    let mut tree = Tree::from_source(new_dataset());
    RegionLabeler::new().label_tree(&mut tree).unwrap();
    let markup = to_markup(&tree);

    assert!(markup.starts_with(
        "<dataset label=\"0,1,28\" subject=\"astronomy\" xmlns:xlink=\"http://www.w3.org/XML/XLink/0.9\">\n"
    ));
    assert!(markup.contains(
        "<keyword label=\"2,22,22\" xlink:href=\"Positional_data.html\">Positional data</keyword>"
    ));
    assert!(markup.contains("<name label=\"4,16,16\">His Majesty's Stationery Office, London</name>"));
    assert!(markup.contains("<details label=\"2,27,27\"/>"));
}

#[test]
fn test_entry_attributes_keep_order() {
    let markup = MarkupWriter::new().with_indent(0).to_markup(&Tree::from_source(new_entry()));
    assert!(markup.starts_with(r#"<Entry id="200K_HUMAN" class="STANDARD" mtype="PRT" seqlen="1200"><AC>P99999</AC>"#));
    assert!(markup.contains(r#"<PFAM prim_id="PF00123" sec_id="SIGNAL" status="1"/>"#));
    assert!(markup.contains(r#"<BINDING from="850" to="860"><Descr>GTP BINDING SITE</Descr></BINDING>"#));
}
