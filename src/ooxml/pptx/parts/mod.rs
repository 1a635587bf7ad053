/// Parts of a PresentationML package.
///
/// Thin wrappers over OPC parts: the presentation part, the three
/// slide-like parts, and image parts.
pub mod image;
pub mod presentation;
pub mod slide;

pub use self::image::Image;
pub use presentation::PresentationPart;
pub use slide::{SlideKind, SlidePart};
