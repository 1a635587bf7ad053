/// Options controlling how a presentation is saved and how pictures are
/// inserted into picture placeholders.
use zip::CompressionMethod;

/// How package members are compressed when a presentation is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// DEFLATE, as PowerPoint writes it
    #[default]
    Deflated,
    /// No compression
    Stored,
}

impl From<Compression> for CompressionMethod {
    fn from(value: Compression) -> Self {
        match value {
            Compression::Deflated => CompressionMethod::Deflated,
            Compression::Stored => CompressionMethod::Stored,
        }
    }
}

/// Options for saving a presentation.
///
/// # Examples
///
/// ```rust
/// use lectern::ooxml::pptx::{Compression, SaveOptions};
///
/// let options = SaveOptions::new().with_compression(Compression::Stored);
/// assert_eq!(options.compression, Compression::Stored);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Compression applied to every package member
    pub compression: Compression,
}

impl SaveOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }
}

/// Options for filling a picture placeholder.
///
/// # Examples
///
/// ```rust
/// use lectern::ooxml::pptx::PictureOptions;
///
/// // Crop the image to the placeholder frame (the default)
/// let options = PictureOptions::default();
/// assert!(options.crop_to_fit);
///
/// // Stretch the whole image into the frame and label it
/// let options = PictureOptions::new()
///     .with_crop_to_fit(false)
///     .with_description("Quarterly results chart");
/// ```
#[derive(Debug, Clone)]
pub struct PictureOptions {
    /// Crop the image so it fills the frame without distortion
    pub crop_to_fit: bool,
    /// Alternative text stored on the picture; defaults to the file name
    pub description: Option<String>,
}

impl Default for PictureOptions {
    fn default() -> Self {
        Self {
            crop_to_fit: true,
            description: None,
        }
    }
}

impl PictureOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the image is cropped to the placeholder's aspect ratio.
    ///
    /// When disabled, the whole image is stretched into the frame.
    #[inline]
    pub fn with_crop_to_fit(mut self, crop: bool) -> Self {
        self.crop_to_fit = crop;
        self
    }

    /// Set the picture's alternative text.
    #[inline]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
