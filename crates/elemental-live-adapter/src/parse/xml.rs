/*
[INPUT]:  XML response bodies from the appliance
[OUTPUT]: Owned element tree with child/descendant lookups
[POS]:    Parse layer - XML decoding for all XML endpoints
[UPDATE]: When a response needs a new kind of lookup
*/

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::http::{ElementalError, Result};

/// One XML element with its attributes, direct text and child elements.
///
/// Namespace prefixes are dropped; the appliance does not use them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    /// Parse a document and return its root element
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event().map_err(xml_error)? {
                Event::Start(e) => stack.push(XmlNode::from_start(&e)?),
                Event::Empty(e) => {
                    let node = XmlNode::from_start(&e)?;
                    attach(&mut stack, &mut root, node)?;
                }
                Event::End(_) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| ElementalError::Xml("unbalanced end tag".to_string()))?;
                    attach(&mut stack, &mut root, node)?;
                }
                Event::Text(e) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&e.unescape().map_err(xml_error)?);
                    }
                }
                Event::CData(e) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(ElementalError::Xml(
                "document ended inside an element".to_string(),
            ));
        }
        root.ok_or_else(|| ElementalError::Xml("document has no root element".to_string()))
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(xml_error)?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value().map_err(xml_error)?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            ..Self::default()
        })
    }

    /// First direct child named `name`
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children named `name`, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// This element and every element below it named `name`, in document order
    pub fn descendants(&self, name: &str) -> Vec<&XmlNode> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlNode>) {
        if self.name == name {
            found.push(self);
        }
        for child in &self.children {
            child.collect_descendants(name, found);
        }
    }

    /// Element text, `None` when the element is empty
    pub fn text(&self) -> Option<&str> {
        if self.text.is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }

    /// Text of the first direct child named `name`
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(XmlNode::text)
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => {
            return Err(ElementalError::Xml(
                "document has more than one root element".to_string(),
            ));
        }
    }
    Ok(())
}

fn xml_error(err: impl std::fmt::Display) -> ElementalError {
    ElementalError::Xml(err.to_string())
}
