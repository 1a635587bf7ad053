//! PowerPoint (.pptx) presentation support.
//!
//! Presentations are read through borrowed views handed out by [`Package`]:
//!
//! - [`Presentation`]: slides, slide layouts and slide masters
//! - [`Slide`], [`SlideLayout`], [`SlideMaster`]: shape trees with their
//!   placeholders
//! - [`Placeholder`]: a placeholder shape whose position and size are
//!   resolved through the slide → layout → master chain
//! - [`PlaceholderPicture`]: a picture placeholder that holds an image
//!
//! Edits are made on the [`Package`] itself, addressed by a [`ShapeLocator`]
//! taken from a view.
//!
//! # Example
//!
//! ```rust,no_run
//! use lectern::ooxml::pptx::{Package, PlaceholderType};
//!
//! let mut pkg = Package::open("template.pptx")?;
//! let target = {
//!     let pres = pkg.presentation()?;
//!     let slide = pres.slide(0)?;
//!     slide
//!         .placeholders()?
//!         .into_iter()
//!         .find(|ph| ph.ph_type() == PlaceholderType::Picture)
//!         .map(|ph| ph.locator())
//! };
//! if let Some(target) = target {
//!     let picture = pkg.insert_picture_file(&target, "team.jpg")?;
//!     println!("cropped {:.3} from the left", picture.crop_left()?);
//! }
//! pkg.save("filled.pptx")?;
//! # Ok::<(), lectern::OoxmlError>(())
//! ```
pub mod config;
pub mod inherit;
pub mod package;
pub mod parts;
pub mod presentation;
pub mod shapes;
pub mod slide;
mod template;

pub use config::{Compression, PictureOptions, SaveOptions};
pub use inherit::{Geometry, GeometryField};
pub use package::Package;
pub use parts::{Image, SlideKind};
pub use presentation::Presentation;
pub use shapes::{
    Crop, Paragraph, Placeholder, PlaceholderFormat, PlaceholderPicture, PlaceholderType,
    ProxyKind, Run, Shape, ShapeLocator, ShapeType, TextFrame, crop_to_fit,
};
pub use slide::{BaseSlide, Slide, SlideLayout, SlideMaster};
