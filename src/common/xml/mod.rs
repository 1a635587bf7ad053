//! XML text helpers.

mod escape;

pub use escape::{escape_xml, unescape_xml};
pub(crate) use escape::resolve_entity;
