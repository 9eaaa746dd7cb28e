//! Owned XML documents parsed from webservice responses.
//!
//! PrestaShop wraps every XML answer in a `<prestashop>` root element.
//! [`XmlElement::parse`] turns a body into an owned tree that can be walked
//! with [`XmlElement::child`] and friends.
//!
//! # Example
//!
//! ```rust
//! use prestashop_webservice::xml::XmlElement;
//!
//! let doc = XmlElement::parse(
//!     r#"<prestashop><customer><id><![CDATA[5]]></id></customer></prestashop>"#,
//! )
//! .unwrap();
//!
//! let id = doc.child("customer").and_then(|c| c.child("id")).unwrap();
//! assert_eq!(id.text(), "5");
//! ```

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::clients::WebserviceError;

/// An XML element with its attributes, text, and child elements.
///
/// CDATA sections are folded into the text, and text around child elements
/// is concatenated with surrounding whitespace trimmed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Parses a complete XML document and returns its root element.
    ///
    /// # Errors
    ///
    /// Returns [`WebserviceError::UnparsableXml`] if the document is not
    /// well-formed: syntax errors, mismatched or unclosed elements, no root
    /// element, several root elements, or text outside the root.
    pub fn parse(input: &str) -> Result<Self, WebserviceError> {
        let mut reader = Reader::from_str(input);
        reader.trim_text(true);

        let mut stack: Vec<Self> = Vec::new();
        let mut root: Option<Self> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => stack.push(Self::open(e)?),
                Ok(Event::Empty(ref e)) => {
                    let element = Self::open(e)?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| unparsable("closing tag without opening tag"))?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e.unescape().map_err(unparsable)?;
                    Self::push_text(&mut stack, &text)?;
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    Self::push_text(&mut stack, &text)?;
                }
                Ok(Event::Eof) => break,
                // Declarations, comments, processing instructions, doctypes
                Ok(_) => {}
                Err(e) => {
                    return Err(unparsable(format!(
                        "{e} at position {}",
                        reader.buffer_position()
                    )))
                }
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(unparsable(format!("unclosed element <{}>", open.name)));
        }
        root.ok_or_else(|| unparsable("document has no root element"))
    }

    fn open(start: &BytesStart<'_>) -> Result<Self, WebserviceError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(unparsable)?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value().map_err(unparsable)?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            ..Self::default()
        })
    }

    fn attach(
        stack: &mut [Self],
        root: &mut Option<Self>,
        element: Self,
    ) -> Result<(), WebserviceError> {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(element);
        } else if root.is_some() {
            return Err(unparsable("document has more than one root element"));
        } else {
            *root = Some(element);
        }
        Ok(())
    }

    fn push_text(stack: &mut [Self], text: &str) -> Result<(), WebserviceError> {
        match stack.last_mut() {
            Some(parent) => parent.text.push_str(text),
            None if text.trim().is_empty() => {}
            None => return Err(unparsable("text outside of the root element")),
        }
        Ok(())
    }

    /// Returns the element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the element text, with CDATA sections folded in.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns all attributes in document order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Returns the value of the attribute `name`, if present.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the child elements in document order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns the first child element called `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Returns every child element called `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }
}

fn unparsable(details: impl ToString) -> WebserviceError {
    WebserviceError::UnparsableXml {
        details: details.to_string(),
    }
}
