//! A small element tree over `quick-xml`.
//!
//! Only what the roster file needs: element names, text content and child
//! elements. Attributes, comments and processing instructions are dropped on
//! read and never produced on write.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::utils::error::{Result, RosterError};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub tag: String,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// First direct child with the given tag.
    pub fn find(&self, tag: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// All direct children with the given tag, in document order.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }
}

/// Parse a document and return its root element.
pub fn parse_document(input: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                stack.push(XmlElement::new(tag_name(&e)?));
            }
            Event::Empty(e) => {
                let element = XmlElement::new(tag_name(&e)?);
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                if let Some(mut element) = stack.pop() {
                    if !element.children.is_empty() {
                        // indentation between child elements is not content
                        if !element.text.trim().is_empty() {
                            return Err(RosterError::data_format(format!(
                                "unexpected mixed content in <{}>",
                                element.tag
                            )));
                        }
                        element.text.clear();
                    }
                    attach(&mut stack, &mut root, element)?;
                }
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                match stack.last_mut() {
                    Some(current) => current.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(RosterError::data_format("text outside the root element")),
                }
            }
            Event::CData(c) => {
                let current = stack
                    .last_mut()
                    .ok_or_else(|| RosterError::data_format("text outside the root element"))?;
                let raw = c.into_inner();
                let text = std::str::from_utf8(&raw)
                    .map_err(|e| RosterError::data_format(format!("invalid UTF-8 in CDATA: {}", e)))?;
                current.text.push_str(text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(RosterError::data_format(format!(
            "unexpected end of document inside <{}>",
            open.tag
        )));
    }
    root.ok_or_else(|| RosterError::data_format("document has no root element"))
}

/// Serialize `root` as a UTF-8 document with an XML declaration.
pub fn write_document(root: &XmlElement) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    write_element(&mut writer, root)?;
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<()> {
    if element.text.is_empty() && element.children.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(element.tag.as_str())))?;
        return Ok(());
    }

    writer.write_event(Event::Start(BytesStart::new(element.tag.as_str())))?;
    if !element.text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&element.text)))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.tag.as_str())))?;
    Ok(())
}

fn tag_name(start: &BytesStart<'_>) -> Result<String> {
    String::from_utf8(start.name().as_ref().to_vec())
        .map_err(|e| RosterError::data_format(format!("invalid UTF-8 in tag name: {}", e)))
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.push(element),
        None if root.is_some() => {
            return Err(RosterError::data_format(format!(
                "junk after document element: <{}>",
                element.tag
            )));
        }
        None => *root = Some(element),
    }
    Ok(())
}
