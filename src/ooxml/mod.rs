//! Office Open XML presentation support.
//!
//! # Architecture
//!
//! 1. **OPC Layer** (`opc`): package handling (ZIP, parts, relationships)
//! 2. **Element tree** (`oxml`): owned XML tree for parts edited in place
//! 3. **PresentationML** (`pptx`): presentation, slides, layouts, masters,
//!    placeholders and their inheritance
//!
//! # Example
//!
//! ```rust,no_run
//! use lectern::ooxml::pptx::Package;
//!
//! let pkg = Package::open("deck.pptx")?;
//! let pres = pkg.presentation()?;
//! println!("{} slides, {} layouts", pres.slide_count()?, pres.slide_layouts()?.len());
//! # Ok::<(), lectern::OoxmlError>(())
//! ```
pub mod error;
pub mod opc;
pub mod oxml;
pub mod pptx;

pub use error::{OoxmlError, Result};
pub use opc::{OpcPackage, PackURI};
