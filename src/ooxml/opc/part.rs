//! Package parts.
//!
//! A part has a partname, a content type, a body and its own relationships.
//! Parts the presentation layer edits are held as parsed [`XmlPart`]s; every
//! other part is an opaque [`BlobPart`] carried through unchanged.
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::rel::Relationships;
use crate::ooxml::oxml::XmlDocument;
use std::borrow::Cow;
use std::fmt::Debug;

/// A part in an OPC package.
pub trait Part: Debug {
    fn partname(&self) -> &PackURI;

    fn content_type(&self) -> &str;

    /// Serialized body of the part.
    fn blob(&self) -> Cow<'_, [u8]>;

    fn rels(&self) -> &Relationships;

    fn rels_mut(&mut self) -> &mut Relationships;

    /// Parsed element tree, for parts loaded as XML.
    fn as_xml(&self) -> Option<&XmlDocument> {
        None
    }

    fn as_xml_mut(&mut self) -> Option<&mut XmlDocument> {
        None
    }

    /// rId of the relationship of `reltype` from this part to `target`,
    /// creating one when no relationship matches both. The target is
    /// recorded relative to this part's directory.
    fn relate_to(&mut self, target: &PackURI, reltype: &str) -> String {
        let target_ref = target.relative_ref(self.partname().base_uri());
        self.rels_mut().get_or_add(reltype, &target_ref)
    }

    /// Partname of the target of relationship `r_id`.
    fn related_partname(&self, r_id: &str) -> Result<PackURI> {
        self.rels()
            .get(r_id)
            .ok_or_else(|| {
                OpcError::RelationshipNotFound(format!("{} in {}", r_id, self.partname()))
            })?
            .target_partname()
    }
}

/// A part whose body is kept as raw bytes.
#[derive(Debug, Clone)]
pub struct BlobPart {
    partname: PackURI,
    content_type: String,
    blob: Vec<u8>,
    rels: Relationships,
}

impl BlobPart {
    pub fn new(partname: PackURI, content_type: impl Into<String>, blob: Vec<u8>) -> Self {
        let rels = Relationships::new(partname.base_uri());
        Self {
            partname,
            content_type: content_type.into(),
            blob,
            rels,
        }
    }
}

impl Part for BlobPart {
    fn partname(&self) -> &PackURI {
        &self.partname
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn blob(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(&self.blob)
    }

    fn rels(&self) -> &Relationships {
        &self.rels
    }

    fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }
}

/// A part held as a parsed element tree and serialized on demand.
#[derive(Debug, Clone)]
pub struct XmlPart {
    partname: PackURI,
    content_type: String,
    document: XmlDocument,
    rels: Relationships,
}

impl XmlPart {
    pub fn new(partname: PackURI, content_type: impl Into<String>, document: XmlDocument) -> Self {
        let rels = Relationships::new(partname.base_uri());
        Self {
            partname,
            content_type: content_type.into(),
            document,
            rels,
        }
    }

    /// Parse `xml` as the body of a new part.
    pub fn load(partname: PackURI, content_type: impl Into<String>, xml: &[u8]) -> Result<Self> {
        let document = XmlDocument::parse(xml)
            .map_err(|e| OpcError::XmlError(format!("{partname}: {e}")))?;
        Ok(Self::new(partname, content_type, document))
    }

    #[inline]
    pub fn document(&self) -> &XmlDocument {
        &self.document
    }
}

impl Part for XmlPart {
    fn partname(&self) -> &PackURI {
        &self.partname
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn blob(&self) -> Cow<'_, [u8]> {
        Cow::Owned(self.document.to_xml().into_bytes())
    }

    fn rels(&self) -> &Relationships {
        &self.rels
    }

    fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }

    fn as_xml(&self) -> Option<&XmlDocument> {
        Some(&self.document)
    }

    fn as_xml_mut(&mut self) -> Option<&mut XmlDocument> {
        Some(&mut self.document)
    }
}

/// Chooses the part implementation for a content type.
pub struct PartFactory;

impl PartFactory {
    /// Build a part from its stored body.
    pub fn load(partname: PackURI, content_type: &str, blob: Vec<u8>) -> Result<Box<dyn Part>> {
        if Self::is_editable(content_type) {
            Ok(Box::new(XmlPart::load(partname, content_type, &blob)?))
        } else {
            Ok(Box::new(BlobPart::new(partname, content_type, blob)))
        }
    }

    /// Whether parts of this content type are parsed into an element tree.
    #[inline]
    pub fn is_editable(content_type: &str) -> bool {
        matches!(
            content_type,
            ct::PML_PRESENTATION_MAIN
                | ct::PML_TEMPLATE_MAIN
                | ct::PML_SLIDESHOW_MAIN
                | ct::PML_SLIDE
                | ct::PML_SLIDE_LAYOUT
                | ct::PML_SLIDE_MASTER
        )
    }
}
