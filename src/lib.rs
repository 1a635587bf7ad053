//! Lectern - a Rust library for PresentationML (.pptx) placeholders
//!
//! This library opens Office Open XML presentations and exposes the slide,
//! slide layout and slide master placeholders they contain, with the
//! inheritance rules PowerPoint applies to them.
//!
//! # Features
//!
//! - **OPC layer**: Read and write the ZIP-based package (parts, relationships,
//!   content types)
//! - **Placeholder geometry**: Resolve position and size through the
//!   slide → layout → master chain, field by field
//! - **Placeholder classification**: Map `<p:ph>` declarations to a placeholder
//!   type and a typed proxy
//! - **Picture placeholders**: Insert images with crop-to-fit, deduplicating
//!   image parts by SHA-1
//! - **Text**: Read paragraphs and runs, set text and paragraph indent levels
//!
//! # Example - Resolving placeholder geometry
//!
//! ```no_run
//! use lectern::ooxml::pptx::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pkg = Package::open("presentation.pptx")?;
//! let pres = pkg.presentation()?;
//!
//! for placeholder in pres.slide(0)?.placeholders()? {
//!     let geometry = placeholder.geometry()?;
//!     println!(
//!         "idx {} at ({}, {}) size {}x{}",
//!         placeholder.idx(),
//!         geometry.left,
//!         geometry.top,
//!         geometry.width,
//!         geometry.height
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Filling a picture placeholder
//!
//! ```no_run
//! use lectern::ooxml::pptx::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pkg = Package::open("template.pptx")?;
//! let locator = pkg.presentation()?.slide(0)?.shape(0)?.locator();
//!
//! let picture = pkg.insert_picture_file(&locator, "photo.png")?;
//! println!("image sha1: {}", picture.image()?.sha1());
//! println!("left/right crop: {}", picture.crop_left()?);
//!
//! pkg.save("filled.pptx")?;
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod ooxml;

pub use ooxml::error::{OoxmlError, Result};
pub use ooxml::pptx::{Package, Presentation};
