pub mod xml;

pub use xml::{parse_document, write_document, XmlElement};
