//! Mutable XML element tree for the parts that are edited in place.

mod element;

pub use element::{XmlDocument, XmlElement, XmlNode};
