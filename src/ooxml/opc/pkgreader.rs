//! Reads the logical structure of a package out of its ZIP container.
//!
//! Starting from the package relationships, every internally-related part is
//! visited once, paired with its content type and its own relationships.
use crate::common::xml::unescape_xml;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::rel::Relationships;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::{HashMap, HashSet, VecDeque};

/// A part as stored, before the part factory builds it.
#[derive(Debug)]
pub struct SerializedPart {
    pub partname: PackURI,
    pub content_type: String,
    pub blob: Vec<u8>,
    pub rels: Relationships,
}

/// `[Content_Types].xml`: overrides by partname, defaults by extension.
/// Both lookups ignore ASCII case.
#[derive(Debug, Default)]
struct ContentTypeMap {
    defaults: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut map = Self::default();
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) => {
                    let is_default = match e.local_name().as_ref() {
                        b"Default" => Some(true),
                        b"Override" => Some(false),
                        _ => None,
                    };
                    if let Some(is_default) = is_default {
                        let mut key = None;
                        let mut content_type = None;
                        for attr in e.attributes() {
                            let attr = attr?;
                            let value =
                                unescape_xml(std::str::from_utf8(&attr.value)?).into_owned();
                            match attr.key.as_ref() {
                                b"Extension" | b"PartName" => {
                                    key = Some(value.to_ascii_lowercase())
                                },
                                b"ContentType" => content_type = Some(value),
                                _ => {},
                            }
                        }
                        if let (Some(key), Some(content_type)) = (key, content_type) {
                            if is_default {
                                map.defaults.insert(key, content_type);
                            } else {
                                map.overrides.insert(key, content_type);
                            }
                        }
                    }
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        Ok(map)
    }

    fn get(&self, partname: &PackURI) -> Result<&str> {
        self.overrides
            .get(&partname.as_str().to_ascii_lowercase())
            .or_else(|| self.defaults.get(&partname.ext().to_ascii_lowercase()))
            .map(String::as_str)
            .ok_or_else(|| OpcError::ContentTypeNotFound(partname.to_string()))
    }
}

/// The parts and package relationships found in a physical package.
#[derive(Debug)]
pub struct PackageReader {
    pkg_rels: Relationships,
    sparts: Vec<SerializedPart>,
}

impl PackageReader {
    pub fn from_phys_reader(mut phys: PhysPkgReader) -> Result<Self> {
        let content_types_uri =
            PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        let content_types = phys
            .blob_for(&content_types_uri)
            .ok_or_else(|| OpcError::PartNotFound(CONTENT_TYPES_URI.to_string()))
            .and_then(ContentTypeMap::from_xml)?;

        let package_uri = PackURI::package();
        let pkg_rels = Self::rels_for(&phys, &package_uri)?;

        let mut sparts = Vec::new();
        let mut visited = HashSet::new();
        let mut queue: VecDeque<PackURI> = Self::internal_targets(&pkg_rels).collect();

        while let Some(partname) = queue.pop_front() {
            if !visited.insert(partname.clone()) {
                continue;
            }
            let Some(blob) = phys.take_blob(&partname) else {
                tracing::warn!(%partname, "relationship target missing from package");
                continue;
            };
            let rels = Self::rels_for(&phys, &partname)?;
            queue.extend(Self::internal_targets(&rels).filter(|uri| !visited.contains(uri)));
            let content_type = content_types.get(&partname)?.to_string();
            sparts.push(SerializedPart {
                partname,
                content_type,
                blob,
                rels,
            });
        }

        tracing::debug!(parts = sparts.len(), "walked package relationships");
        Ok(Self { pkg_rels, sparts })
    }

    fn rels_for(phys: &PhysPkgReader, source: &PackURI) -> Result<Relationships> {
        match phys.blob_for(&source.rels_uri()) {
            Some(xml) => Relationships::from_xml(source.base_uri(), xml),
            None => Ok(Relationships::new(source.base_uri())),
        }
    }

    fn internal_targets(rels: &Relationships) -> impl Iterator<Item = PackURI> + '_ {
        rels.iter()
            .filter(|rel| !rel.is_external())
            .filter_map(|rel| match rel.target_partname() {
                Ok(uri) => Some(uri),
                Err(e) => {
                    tracing::warn!(r_id = rel.r_id(), error = %e, "skipping unresolvable relationship");
                    None
                },
            })
    }

    /// Split into package relationships and parts.
    pub fn into_parts(self) -> (Relationships, Vec<SerializedPart>) {
        (self.pkg_rels, self.sparts)
    }
}
