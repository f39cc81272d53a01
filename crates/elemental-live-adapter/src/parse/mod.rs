/*
[INPUT]:  Raw response bodies (XML documents, literal text)
[OUTPUT]: Element trees and generic value trees
[POS]:    Parse layer - body decoding shared by all endpoints
[UPDATE]: When adding a new response format
*/

pub mod literal;
pub mod xml;

pub use literal::{LiteralError, parse_literal};
pub use xml::XmlNode;
