//! Owned XML element tree.
//!
//! Slide-like parts are edited in place (placeholders replaced, text set,
//! slides appended), so they are kept as a mutable tree rather than as raw
//! bytes. Element and attribute names are kept as written, prefix included
//! (`p:sp`, `r:embed`); PresentationML producers use the conventional `a`,
//! `p` and `r` prefixes throughout.
use crate::common::xml::{escape_xml, resolve_entity, unescape_xml};
use crate::ooxml::opc::error::{OpcError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fmt::Write as _;

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with its attributes and children, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`set_attr`](Self::set_attr).
    #[inline]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder form of [`push`](Self::push).
    #[inline]
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.push(child);
        self
    }

    /// Qualified name, e.g. `p:sp`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        self.name
            .split_once(':')
            .map(|(_, local)| local)
            .unwrap_or(&self.name)
    }

    #[inline]
    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, keeping its position if it already exists.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|(k, _)| k == key)?;
        Some(self.attrs.remove(pos).1)
    }

    #[inline]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    #[inline]
    pub fn children_mut(&mut self) -> &mut Vec<XmlNode> {
        &mut self.children
    }

    /// Child elements, skipping text nodes.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element named `name`.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut XmlElement> {
        self.elements_mut().find(|e| e.name == name)
    }

    /// Follow a path of child names, e.g. `["p:cSld", "p:spTree"]`.
    pub fn find(&self, path: &[&str]) -> Option<&XmlElement> {
        path.iter().try_fold(self, |e, name| e.child(name))
    }

    pub fn find_mut(&mut self, path: &[&str]) -> Option<&mut XmlElement> {
        path.iter().try_fold(self, |e, name| e.child_mut(name))
    }

    /// Append a child element.
    #[inline]
    pub fn push(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// Append a text node.
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(&text);
        } else {
            self.children.push(XmlNode::Text(text));
        }
    }

    /// Index in `children()` of the first child element named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|node| matches!(node, XmlNode::Element(e) if e.name == name))
    }

    /// Insert `child` before the first existing child named in `successors`,
    /// or append it when none of them is present.
    pub fn insert_before(&mut self, child: XmlElement, successors: &[&str]) -> &mut XmlElement {
        let pos = self
            .children
            .iter()
            .position(|node| {
                matches!(node, XmlNode::Element(e) if successors.contains(&e.name.as_str()))
            })
            .unwrap_or(self.children.len());
        self.children.insert(pos, XmlNode::Element(child));
        match &mut self.children[pos] {
            XmlNode::Element(e) => e,
            XmlNode::Text(_) => unreachable!("element just inserted"),
        }
    }

    /// First child named `name`, inserted before `successors` when absent.
    pub fn get_or_insert(&mut self, name: &str, successors: &[&str]) -> &mut XmlElement {
        match self.position(name) {
            Some(pos) => match &mut self.children[pos] {
                XmlNode::Element(e) => e,
                XmlNode::Text(_) => unreachable!("position() only matches elements"),
            },
            None => self.insert_before(XmlElement::new(name), successors),
        }
    }

    /// Remove every child element named `name`, returning how many went.
    pub fn remove_children(&mut self, name: &str) -> usize {
        let before = self.children.len();
        self.children
            .retain(|node| !matches!(node, XmlNode::Element(e) if e.name == name));
        before - self.children.len()
    }

    /// Concatenated text of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(t) => Some(t.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.children.push(XmlNode::Text(text.into()));
    }

    /// Every descendant element named `name`, depth-first in document order.
    pub fn descendants<'a>(&'a self, name: &'a str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        for child in self.elements() {
            if child.name == name {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }

    /// Serialize this element and its subtree.
    pub fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attrs {
            let _ = write!(out, " {key}=\"{}\"", escape_attr(value));
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                XmlNode::Element(e) => e.write_to(out),
                XmlNode::Text(t) => out.push_str(&escape_text(t)),
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::with_capacity(256);
        self.write_to(&mut out);
        out
    }
}

/// Characters XML 1.0 forbids outright, even as character references.
fn is_xml_illegal(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}')
}

/// Push `c` in the `_xHHHH_` form OOXML uses for characters XML cannot hold.
fn push_xstring_escape(out: &mut String, c: char) {
    let _ = write!(out, "_x{:04X}_", c as u32);
}

/// Text content only needs `&`, `<` and `>` escaped; quotes stay readable.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c if is_xml_illegal(c) => push_xstring_escape(&mut out, c),
            c => out.push(c),
        }
    }
    out
}

/// Attribute values also keep tabs and line breaks as character references,
/// which attribute-value normalization would otherwise fold to spaces.
fn escape_attr(value: &str) -> String {
    let escaped = escape_xml(value);
    if !escaped.chars().any(|c| c.is_ascii_control()) {
        return escaped;
    }
    let mut out = String::with_capacity(escaped.len() + 8);
    for c in escaped.chars() {
        match c {
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            c if is_xml_illegal(c) => push_xstring_escape(&mut out, c),
            c => out.push(c),
        }
    }
    out
}

/// A parsed XML part: the root element plus the standalone declaration
/// written back on serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }

    /// Parse a complete document.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => stack.push(element_from_start(&e)?),
                Event::Empty(e) => {
                    let element = element_from_start(&e)?;
                    attach(&mut stack, &mut root, element)?;
                },
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| OpcError::XmlError("unbalanced end tag".to_string()))?;
                    attach(&mut stack, &mut root, element)?;
                },
                Event::Text(e) => {
                    if let Some(parent) = stack.last_mut() {
                        let raw = std::str::from_utf8(&e)?;
                        parent.push_text(unescape_xml(raw));
                    }
                },
                Event::CData(e) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.push_text(std::str::from_utf8(&e)?);
                    }
                },
                Event::GeneralRef(e) => {
                    if let Some(parent) = stack.last_mut() {
                        let name = std::str::from_utf8(&e)?;
                        match resolve_entity(name) {
                            Some(c) => parent.push_text(c.to_string()),
                            None => parent.push_text(format!("&{name};")),
                        }
                    }
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(OpcError::XmlError(format!(
                "unclosed element <{}>",
                stack[stack.len() - 1].name
            )));
        }
        root.map(Self::new)
            .ok_or_else(|| OpcError::XmlError("document has no root element".to_string()))
    }

    #[inline]
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    #[inline]
    pub fn root_mut(&mut self) -> &mut XmlElement {
        &mut self.root
    }

    /// Serialize with an XML declaration.
    pub fn to_xml(&self) -> String {
        let mut out = String::with_capacity(4096);
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        self.root.write_to(&mut out);
        out
    }
}

fn element_from_start(e: &BytesStart<'_>) -> Result<XmlElement> {
    let name = std::str::from_utf8(e.name().as_ref())?.to_string();
    let mut element = XmlElement::new(name);
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = unescape_xml(std::str::from_utf8(&attr.value)?).into_owned();
        element.attrs.push((key.to_string(), value));
    }
    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push(element);
            Ok(())
        },
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        },
        None => Err(OpcError::XmlError(format!(
            "second root element <{}>",
            element.name
        ))),
    }
}
