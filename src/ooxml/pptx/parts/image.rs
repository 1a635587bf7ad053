/// Image parts.
///
/// Images are stored once per package under `/ppt/media/` and identified by
/// the SHA-1 of their bytes, so inserting the same picture twice reuses the
/// existing part.
use crate::ooxml::error::Result;
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::part::BlobPart;
use image::{ImageFormat, ImageReader};
use sha1::{Digest, Sha1};
use std::io::Cursor;

/// Partname template for new image parts.
const IMAGE_PARTNAME_TEMPLATE: &str = "/ppt/media/image%d";

/// Image bytes with their format, pixel size and SHA-1.
///
/// Images read back from a package keep the part's content type even when
/// their format is one the decoder does not know (EMF, WMF); format and
/// pixel size are then absent.
///
/// # Examples
///
/// ```rust,no_run
/// use lectern::ooxml::pptx::Image;
///
/// let image = Image::from_file("logo.png")?;
/// println!("{} {:?} {}", image.content_type(), image.size(), image.sha1());
/// # Ok::<(), lectern::OoxmlError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Image {
    blob: Vec<u8>,
    filename: Option<String>,
    format: Option<ImageFormat>,
    content_type: String,
    ext: String,
    size: Option<(u32, u32)>,
    sha1: String,
}

impl Image {
    /// Identify and measure `blob`.
    pub fn from_bytes(blob: Vec<u8>, filename: Option<&str>) -> Result<Self> {
        let format = image::guess_format(&blob)?;
        let size = ImageReader::with_format(Cursor::new(blob.as_slice()), format).into_dimensions()?;
        let sha1 = sha1_hex(&blob);
        Ok(Self {
            blob,
            filename: filename.map(str::to_string),
            format: Some(format),
            content_type: format.to_mime_type().to_string(),
            ext: format.extensions_str().first().copied().unwrap_or("bin").to_string(),
            size: Some(size),
            sha1,
        })
    }

    /// Wrap the bytes of a stored image part. Never fails: bytes the decoder
    /// cannot identify keep the part's content type and extension.
    pub(crate) fn from_part(blob: Vec<u8>, partname: &PackURI, content_type: &str) -> Self {
        let format = image::guess_format(&blob).ok();
        let size = format.and_then(|format| {
            ImageReader::with_format(Cursor::new(blob.as_slice()), format)
                .into_dimensions()
                .ok()
        });
        if format.is_none() {
            tracing::debug!(%partname, content_type, "image format not recognized");
        }
        let sha1 = sha1_hex(&blob);
        Self {
            blob,
            filename: Some(partname.filename().to_string()),
            format,
            content_type: content_type.to_string(),
            ext: partname.ext().to_string(),
            size,
            sha1,
        }
    }

    /// Read and identify the image file at `path`.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let blob = std::fs::read(path)?;
        let filename = path.file_name().and_then(|name| name.to_str());
        Self::from_bytes(blob, filename)
    }

    #[inline]
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    /// Lowercase hex SHA-1 of the image bytes.
    #[inline]
    pub fn sha1(&self) -> &str {
        &self.sha1
    }

    #[inline]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Decoded format; `None` for stored images the decoder does not know.
    #[inline]
    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    /// File extension for the image part, without the dot.
    #[inline]
    pub fn ext(&self) -> &str {
        &self.ext
    }

    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// `(width, height)` in pixels, when the format could be decoded.
    #[inline]
    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    #[inline]
    pub fn width_px(&self) -> Option<u32> {
        self.size.map(|(width, _)| width)
    }

    #[inline]
    pub fn height_px(&self) -> Option<u32> {
        self.size.map(|(_, height)| height)
    }

    /// Name recorded as the picture description: the file name, or
    /// `image.<ext>` for images inserted from bytes.
    pub fn default_description(&self) -> String {
        match &self.filename {
            Some(name) => name.clone(),
            None => format!("image.{}", self.ext()),
        }
    }
}

/// Lowercase hex SHA-1 of `bytes`.
pub fn sha1_hex(bytes: &[u8]) -> String {
    Sha1::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Partname of the image part holding `image`, adding a part when no image
/// with the same SHA-1 exists yet.
pub(crate) fn get_or_add_image_part(package: &mut OpcPackage, image: &Image) -> Result<PackURI> {
    let existing = package
        .iter_parts()
        .filter(|part| part.content_type().starts_with("image/"))
        .find(|part| sha1_hex(&part.blob()) == image.sha1())
        .map(|part| part.partname().clone());
    if let Some(partname) = existing {
        tracing::debug!(%partname, sha1 = image.sha1(), "reusing image part");
        return Ok(partname);
    }

    let template = format!("{IMAGE_PARTNAME_TEMPLATE}.{}", image.ext());
    let partname = package.next_partname(&template)?;
    tracing::debug!(%partname, sha1 = image.sha1(), "adding image part");
    package.add_part(Box::new(BlobPart::new(
        partname.clone(),
        image.content_type(),
        image.blob().to_vec(),
    )));
    Ok(partname)
}
