//! In-memory OPC package.
use crate::ooxml::opc::constants::relationship_type as rt;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::{Part, PartFactory};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::pkgreader::PackageReader;
use crate::ooxml::opc::pkgwriter::PackageWriter;
use crate::ooxml::opc::rel::Relationships;
use crate::ooxml::oxml::XmlDocument;
use std::collections::BTreeMap;
use std::path::Path;
use zip::CompressionMethod;

/// A package held in memory: package relationships plus parts keyed by
/// partname.
#[derive(Debug)]
pub struct OpcPackage {
    rels: Relationships,
    parts: BTreeMap<PackURI, Box<dyn Part>>,
}

impl OpcPackage {
    /// An empty package.
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI),
            parts: BTreeMap::new(),
        }
    }

    /// Open a package file.
    ///
    /// ```no_run
    /// use lectern::ooxml::opc::OpcPackage;
    ///
    /// let pkg = OpcPackage::open("deck.pptx")?;
    /// println!("{} parts", pkg.part_count());
    /// # Ok::<(), lectern::ooxml::opc::error::OpcError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening package");
        Self::unmarshal(PackageReader::from_phys_reader(PhysPkgReader::open(path)?)?)
    }

    /// Load a package from the bytes of a ZIP file.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::unmarshal(PackageReader::from_phys_reader(PhysPkgReader::from_bytes(data)?)?)
    }

    fn unmarshal(reader: PackageReader) -> Result<Self> {
        let (rels, sparts) = reader.into_parts();
        let mut package = Self { rels, parts: BTreeMap::new() };
        for spart in sparts {
            let mut part = PartFactory::load(spart.partname, &spart.content_type, spart.blob)?;
            *part.rels_mut() = spart.rels;
            package.add_part(part);
        }
        Ok(package)
    }

    /// Serialize to ZIP bytes.
    pub fn to_bytes(&self, compression: CompressionMethod) -> Result<Vec<u8>> {
        PackageWriter::to_bytes(self, compression)
    }

    /// Write the package to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P, compression: CompressionMethod) -> Result<()> {
        let bytes = self.to_bytes(compression)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Partname of the main document part (the presentation part for a
    /// `.pptx`).
    pub fn main_document_partname(&self) -> Result<PackURI> {
        self.rels
            .part_with_reltype(rt::OFFICE_DOCUMENT)?
            .target_partname()
    }

    pub fn part(&self, partname: &PackURI) -> Result<&dyn Part> {
        self.parts
            .get(partname)
            .map(|part| part.as_ref())
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    pub fn part_mut(&mut self, partname: &PackURI) -> Result<&mut dyn Part> {
        let part: &mut dyn Part = self
            .parts
            .get_mut(partname)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))?
            .as_mut();
        Ok(part)
    }

    /// Element tree of an XML-backed part.
    pub fn xml(&self, partname: &PackURI) -> Result<&XmlDocument> {
        self.part(partname)?
            .as_xml()
            .ok_or_else(|| OpcError::XmlError(format!("{partname} is not held as XML")))
    }

    pub fn xml_mut(&mut self, partname: &PackURI) -> Result<&mut XmlDocument> {
        self.part_mut(partname)?
            .as_xml_mut()
            .ok_or_else(|| OpcError::XmlError(format!("{partname} is not held as XML")))
    }

    /// Add or replace a part.
    pub fn add_part(&mut self, part: Box<dyn Part>) {
        self.parts.insert(part.partname().clone(), part);
    }

    #[inline]
    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.parts.contains_key(partname)
    }

    /// Parts in partname order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &dyn Part> {
        self.parts.values().map(|part| part.as_ref())
    }

    #[inline]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    #[inline]
    pub fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }

    /// rId of the package relationship to `target`, created when missing.
    pub fn relate_to(&mut self, target: &PackURI, reltype: &str) -> String {
        let target_ref = target.relative_ref(PACKAGE_URI);
        self.rels.get_or_add(reltype, &target_ref)
    }

    /// First unused partname produced by replacing `%d` in `template` with
    /// 1, 2, 3, ...
    ///
    /// ```
    /// use lectern::ooxml::opc::OpcPackage;
    ///
    /// let pkg = OpcPackage::new();
    /// let uri = pkg.next_partname("/ppt/media/image%d.png").unwrap();
    /// assert_eq!(uri.as_str(), "/ppt/media/image1.png");
    /// ```
    pub fn next_partname(&self, template: &str) -> Result<PackURI> {
        if !template.contains("%d") {
            return Err(OpcError::InvalidPackUri(format!(
                "partname template '{template}' has no %d"
            )));
        }
        (1..=self.parts.len() + 1)
            .map(|n| template.replace("%d", &n.to_string()))
            .find(|candidate| !self.parts.keys().any(|uri| uri.as_str() == candidate))
            .ok_or_else(|| OpcError::InvalidPackUri(template.to_string()))
            .and_then(|candidate| PackURI::new(candidate).map_err(OpcError::InvalidPackUri))
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type as ct;
    use crate::ooxml::opc::part::BlobPart;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn minimal_pptx() -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(br#"<?xml version="1.0"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
</Types>"#).unwrap();

        writer.start_file("_rels/.rels", options).unwrap();
        writer.write_all(br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
</Relationships>"#).unwrap();

        writer.start_file("ppt/presentation.xml", options).unwrap();
        writer.write_all(br#"<?xml version="1.0"?>
<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:sldIdLst/></p:presentation>"#).unwrap();

        writer.start_file("ppt/orphan.bin", options).unwrap();
        writer.write_all(b"unreferenced").unwrap();

        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_open_walks_relationships() {
        let pkg = OpcPackage::from_bytes(minimal_pptx()).unwrap();
        assert_eq!(pkg.part_count(), 1);

        let main = pkg.main_document_partname().unwrap();
        assert_eq!(main.as_str(), "/ppt/presentation.xml");
        assert_eq!(pkg.part(&main).unwrap().content_type(), ct::PML_PRESENTATION_MAIN);
        assert_eq!(pkg.xml(&main).unwrap().root().name(), "p:presentation");
    }

    #[test]
    fn test_round_trip_bytes() {
        let pkg = OpcPackage::from_bytes(minimal_pptx()).unwrap();
        let bytes = pkg.to_bytes(CompressionMethod::Deflated).unwrap();
        let again = OpcPackage::from_bytes(bytes).unwrap();

        let main = again.main_document_partname().unwrap();
        assert!(again.xml(&main).unwrap().root().child("p:sldIdLst").is_some());
    }

    #[test]
    fn test_next_partname() {
        let mut pkg = OpcPackage::new();
        for n in [1, 2, 4] {
            let uri = PackURI::new(format!("/ppt/media/image{n}.png")).unwrap();
            pkg.add_part(Box::new(BlobPart::new(uri, ct::PNG, Vec::new())));
        }
        let next = pkg.next_partname("/ppt/media/image%d.png").unwrap();
        assert_eq!(next.as_str(), "/ppt/media/image3.png");
        assert!(pkg.next_partname("/ppt/media/image.png").is_err());
    }

    #[test]
    fn test_relate_to_from_package() {
        let mut pkg = OpcPackage::new();
        let target = PackURI::new("/ppt/presentation.xml").unwrap();
        let r_id = pkg.relate_to(&target, rt::OFFICE_DOCUMENT);
        assert_eq!(pkg.rels().get(&r_id).unwrap().target_ref(), "ppt/presentation.xml");
        assert_eq!(pkg.main_document_partname().unwrap(), target);
    }

    #[test]
    fn test_blob_part_is_not_xml() {
        let mut pkg = OpcPackage::new();
        let uri = PackURI::new("/ppt/media/image1.png").unwrap();
        pkg.add_part(Box::new(BlobPart::new(uri.clone(), ct::PNG, vec![1, 2, 3])));
        assert!(matches!(pkg.xml(&uri), Err(OpcError::XmlError(_))));
        assert!(matches!(
            pkg.part(&PackURI::new("/missing.xml").unwrap()),
            Err(OpcError::PartNotFound(_))
        ));
    }
}
