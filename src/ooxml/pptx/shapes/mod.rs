/// Shapes of a slide, slide layout or slide master shape tree.
pub mod base;
pub mod picture;
pub mod placeholder;
pub mod textframe;

pub use base::{Shape, ShapeLocator, ShapeType};
pub use picture::{Crop, PlaceholderPicture, crop_to_fit};
pub use placeholder::{Placeholder, PlaceholderFormat, PlaceholderType, ProxyKind};
pub use textframe::{Paragraph, Run, TextFrame};
