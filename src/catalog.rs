//! Sample course catalog documents.
//!
//! A catalog is a `root` element with one `course` child per offered course.
//! Each course has the same fixed sequence of fields, two of them nested:
//!
//! ```text
//! course
//! ├─ footnote, sln, prefix, crs, lab, sect, title, credit, days
//! ├─ times: start, end
//! ├─ place: bldg, room
//! └─ instructor, limit, enrolled
//! ```
//!
//! [course_catalog] generates catalogs of arbitrary size deterministically,
//! [new_course] is the fixed course inserted into an existing catalog.

use crate::model::Element;

/// Name of the catalog's document element.
pub const CATALOG_ELEMENT: &str = "root";

/// Name of a course element.
pub const COURSE_ELEMENT: &str = "course";

/// Number of nodes in one course subtree (course element included).
pub const NODES_PER_COURSE: usize = 19;

const PREFIXES: [&str; 6] = ["CS", "MATH", "PHYS", "CHEM", "BIOL", "ENGL"];
const DAYS: [&str; 4] = ["M,W", "T,TH", "M,W,F", "F"];
const BUILDINGS: [&str; 5] = ["ENGR", "SCI", "LIB", "ARTS", "GYM"];
const INSTRUCTORS: [&str; 5] = ["DR. SMITH", "DR. JONES", "DR. LEE", "DR. GARCIA", "STAFF"];
const TITLES: [&str; 6] = [
    "INTRO PROGRAMMING",
    "CALCULUS",
    "MECHANICS",
    "ORGANIC CHEM",
    "GENETICS",
    "COMPOSITION",
];

/// Field values of one course.
struct Course<'a> {
    footnote: &'a str,
    sln: String,
    prefix: &'a str,
    crs: String,
    sect: String,
    title: &'a str,
    credit: &'a str,
    days: &'a str,
    start: String,
    end: String,
    bldg: &'a str,
    room: String,
    instructor: &'a str,
    limit: String,
    enrolled: String,
}

impl Course<'_> {
    /// Builds the element `name` holding all fields in catalog order.
    fn into_element(self, name: &str) -> Element {
        let field = |name: &str, value: String| Element::new(name).with_text(value);
        let mut footnote = Element::new("footnote");
        if !self.footnote.is_empty() {
            footnote = footnote.with_text(self.footnote);
        }

        Element::new(name).with_children([
            footnote,
            field("sln", self.sln),
            Element::new("prefix").with_text(self.prefix),
            field("crs", self.crs),
            Element::new("lab"),
            field("sect", self.sect),
            Element::new("title").with_text(self.title),
            Element::new("credit").with_text(self.credit),
            Element::new("days").with_text(self.days),
            Element::new("times")
                .with_child(field("start", self.start))
                .with_child(field("end", self.end)),
            Element::new("place")
                .with_child(Element::new("bldg").with_text(self.bldg))
                .with_child(field("room", self.room)),
            Element::new("instructor").with_text(self.instructor),
            field("limit", self.limit),
            field("enrolled", self.enrolled),
        ])
    }
}

/// Returns the fixed "new course" inserted into catalogs.
///
/// ```
/// use relab::catalog::{new_course, NODES_PER_COURSE};
/// use relab::model::Tree;
///
/// let course = new_course();
/// assert_eq!(course.name(), "newCourse");
/// assert_eq!(course.children()[6].data().text(), Some("ADV ALGORITHMS"));
/// assert_eq!(Tree::from_source(course).num_nodes(), NODES_PER_COURSE);
/// ```
pub fn new_course() -> Element {
    Course {
        footnote: "NEW",
        sln: "99999".to_string(),
        prefix: "CS",
        crs: "505".to_string(),
        sect: "01".to_string(),
        title: "ADV ALGORITHMS",
        credit: "4.0",
        days: "M,W",
        start: "14:00".to_string(),
        end: "15:30".to_string(),
        bldg: "ENGR",
        room: "101".to_string(),
        instructor: "DR. SMITH",
        limit: "60".to_string(),
        enrolled: "0".to_string(),
    }
    .into_element("newCourse")
}

/// Returns the `i`-th generated course; the same `i` always yields the same course.
pub fn course(i: usize) -> Element {
    let hour = 8 + i % 10;
    Course {
        footnote: "",
        sln: format!("{}", 10000 + i),
        prefix: PREFIXES[i % PREFIXES.len()],
        crs: format!("{}", 100 + (i * 7) % 400),
        sect: format!("{:02}", 1 + i % 4),
        title: TITLES[i % TITLES.len()],
        credit: if i % 3 == 0 { "4.0" } else { "3.0" },
        days: DAYS[i % DAYS.len()],
        start: format!("{hour:02}:00"),
        end: format!("{hour:02}:50"),
        bldg: BUILDINGS[i % BUILDINGS.len()],
        room: format!("{}", 100 + (i * 13) % 300),
        instructor: INSTRUCTORS[i % INSTRUCTORS.len()],
        limit: format!("{}", 20 + (i % 5) * 10),
        enrolled: format!("{}", (i * 11) % 20),
    }
    .into_element(COURSE_ELEMENT)
}

/// Returns a `root` element with `num_courses` generated course children.
///
/// ```
/// use relab::catalog::{course_catalog, NODES_PER_COURSE};
/// use relab::model::Tree;
///
/// let tree = Tree::from_source(course_catalog(3));
/// assert_eq!(tree.num_nodes(), 1 + 3 * NODES_PER_COURSE);
/// ```
pub fn course_catalog(num_courses: usize) -> Element {
    Element::new(CATALOG_ELEMENT).with_children((0..num_courses).map(course))
}
