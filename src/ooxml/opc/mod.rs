//! Open Packaging Conventions (OPC).
//!
//! The container layer of an Office Open XML document: a ZIP archive of
//! parts, each with a content type, connected by relationships.
//!
//! - [`PackURI`]: absolute partnames
//! - [`Relationships`]: per-source relationship collections
//! - [`Part`]: opaque blob parts and parsed XML parts
//! - [`OpcPackage`]: the loaded package, read and written through
//!   `pkgreader` / `pkgwriter` over the `phys_pkg` ZIP layer

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgreader;
pub mod pkgwriter;
pub mod rel;

pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::{BlobPart, Part, PartFactory, XmlPart};
pub use rel::{Relationship, Relationships};
