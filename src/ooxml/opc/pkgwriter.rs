//! Serializes an [`OpcPackage`] into ZIP bytes: `[Content_Types].xml`, the
//! package relationships, then every part with its `.rels` sibling.
use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::{content_type as ct, default_content_type};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::package::OpcPackage;
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgWriter;
use std::collections::BTreeMap;
use zip::CompressionMethod;

pub struct PackageWriter;

impl PackageWriter {
    /// Serialize `package` with the given member compression.
    pub fn to_bytes(package: &OpcPackage, compression: CompressionMethod) -> Result<Vec<u8>> {
        let mut phys = PhysPkgWriter::new(compression);

        let content_types_uri =
            PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        let content_types = ContentTypesItem::from_package(package).to_xml();
        phys.write(&content_types_uri, content_types.as_bytes())?;

        phys.write(&PackURI::package().rels_uri(), package.rels().to_xml().as_bytes())?;

        for part in package.iter_parts() {
            phys.write(part.partname(), &part.blob())?;
            if !part.rels().is_empty() {
                phys.write(&part.partname().rels_uri(), part.rels().to_xml().as_bytes())?;
            }
        }

        tracing::debug!(parts = package.part_count(), ?compression, "serialized package");
        phys.finish()
    }
}

/// Builder for `[Content_Types].xml`.
///
/// Parts whose content type is the well-known default for their extension
/// share a `Default` entry; every other part gets an `Override`.
#[derive(Debug)]
struct ContentTypesItem {
    defaults: BTreeMap<String, String>,
    overrides: BTreeMap<String, String>,
}

impl ContentTypesItem {
    fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), ct::XML.to_string());
        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    fn from_package(package: &OpcPackage) -> Self {
        let mut item = Self::new();
        for part in package.iter_parts() {
            item.add(part.partname(), part.content_type());
        }
        item
    }

    fn add(&mut self, partname: &PackURI, content_type: &str) {
        let ext = partname.ext().to_ascii_lowercase();
        if default_content_type(&ext) == Some(content_type) {
            self.defaults.insert(ext, content_type.to_string());
        } else {
            self.overrides
                .insert(partname.to_string(), content_type.to_string());
        }
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.overrides.len() * 160);
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        xml.push_str(
            "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
        );
        for (ext, content_type) in &self.defaults {
            xml.push_str(&format!(
                "<Default Extension=\"{}\" ContentType=\"{}\"/>",
                escape_xml(ext),
                escape_xml(content_type)
            ));
        }
        for (partname, content_type) in &self.overrides {
            xml.push_str(&format!(
                "<Override PartName=\"{}\" ContentType=\"{}\"/>",
                escape_xml(partname),
                escape_xml(content_type)
            ));
        }
        xml.push_str("</Types>");
        xml
    }
}
