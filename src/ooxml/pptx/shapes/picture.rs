/// Picture placeholders: crop-to-fit, `a:srcRect` and the populated view.
use crate::common::Emu;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::XmlElement;
use crate::ooxml::pptx::parts::image::Image;
use crate::ooxml::pptx::shapes::placeholder::Placeholder;
use std::ops::Deref;

/// `a:srcRect` stores crops in thousandths of a percent.
const CROP_SCALE: f64 = 100_000.0;

/// Fractions of the image trimmed from each edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Crop {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Crop {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left == 0.0 && self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0
    }

    /// Read `a:srcRect`. Values are thousandths of a percent; a `%` suffix
    /// marks a plain percentage.
    pub fn from_src_rect(src_rect: &XmlElement) -> Result<Self> {
        let read = |key: &str| -> Result<f64> {
            src_rect.attr(key).map_or(Ok(0.0), parse_crop_value)
        };
        Ok(Self {
            left: read("l")?,
            top: read("t")?,
            right: read("r")?,
            bottom: read("b")?,
        })
    }

    /// `a:srcRect` for this crop; zero edges are left out.
    pub fn to_src_rect(&self) -> XmlElement {
        let mut src_rect = XmlElement::new("a:srcRect");
        for (key, value) in [
            ("l", self.left),
            ("t", self.top),
            ("r", self.right),
            ("b", self.bottom),
        ] {
            let scaled = (value * CROP_SCALE).round() as i64;
            if scaled != 0 {
                src_rect.set_attr(key, scaled.to_string());
            }
        }
        src_rect
    }
}

fn parse_crop_value(value: &str) -> Result<f64> {
    let invalid = || OoxmlError::InvalidValue(format!("crop value '{value}'"));
    match value.strip_suffix('%') {
        Some(percent) => percent
            .trim()
            .parse::<f64>()
            .map(|p| p / 100.0)
            .map_err(|_| invalid()),
        None => value
            .trim()
            .parse::<f64>()
            .map(|v| v / CROP_SCALE)
            .map_err(|_| invalid()),
    }
}

/// Crop that fills a `view` frame (EMU) with an image of `image` pixels
/// without distorting it.
///
/// Excess width is trimmed equally from left and right, excess height
/// equally from top and bottom.
///
/// ```
/// use lectern::ooxml::pptx::crop_to_fit;
///
/// let crop = crop_to_fit((800, 300), (3_657_600, 2_743_200));
/// assert!((crop.left - 0.25).abs() < 1e-9);
/// assert_eq!(crop.top, 0.0);
/// ```
pub fn crop_to_fit(image: (u32, u32), view: (Emu, Emu)) -> Crop {
    let (image_w, image_h) = image;
    let (view_w, view_h) = view;
    if image_w == 0 || image_h == 0 || view_w <= 0 || view_h <= 0 {
        return Crop::default();
    }
    let aspect_view = view_w as f64 / view_h as f64;
    let aspect_image = image_w as f64 / image_h as f64;

    if aspect_view < aspect_image {
        let crop = (1.0 - aspect_view / aspect_image) / 2.0;
        Crop {
            left: crop,
            right: crop,
            ..Crop::default()
        }
    } else if aspect_view > aspect_image {
        let crop = (1.0 - aspect_image / aspect_view) / 2.0;
        Crop {
            top: crop,
            bottom: crop,
            ..Crop::default()
        }
    } else {
        Crop::default()
    }
}

/// Everything needed to build the `p:pic` that replaces a picture
/// placeholder.
pub(crate) struct NewPicture<'s> {
    pub id: u32,
    pub name: &'s str,
    pub description: &'s str,
    pub ph: XmlElement,
    pub xfrm: Option<XmlElement>,
    pub r_id: &'s str,
    pub crop: Crop,
}

/// A populated picture placeholder element.
///
/// The `p:ph` is kept so the picture still inherits from the layout; the
/// shape's own `a:xfrm` is carried over when it had one.
pub(crate) fn new_placeholder_pic(pic: NewPicture<'_>) -> XmlElement {
    let nv_pic_pr = XmlElement::new("p:nvPicPr")
        .with_child(
            XmlElement::new("p:cNvPr")
                .with_attr("id", pic.id.to_string())
                .with_attr("name", pic.name)
                .with_attr("descr", pic.description),
        )
        .with_child(
            XmlElement::new("p:cNvPicPr").with_child(
                XmlElement::new("a:picLocks")
                    .with_attr("noGrp", "1")
                    .with_attr("noChangeAspect", "1"),
            ),
        )
        .with_child(XmlElement::new("p:nvPr").with_child(pic.ph));

    let blip_fill = XmlElement::new("p:blipFill")
        .with_child(XmlElement::new("a:blip").with_attr("r:embed", pic.r_id))
        .with_child(pic.crop.to_src_rect())
        .with_child(XmlElement::new("a:stretch").with_child(XmlElement::new("a:fillRect")));

    let mut sp_pr = XmlElement::new("p:spPr");
    if let Some(xfrm) = pic.xfrm {
        sp_pr.push(xfrm);
    }

    XmlElement::new("p:pic")
        .with_child(nv_pic_pr)
        .with_child(blip_fill)
        .with_child(sp_pr)
}

/// A placeholder populated with a picture.
///
/// # Examples
///
/// ```rust,no_run
/// use lectern::ooxml::pptx::Package;
///
/// let pkg = Package::open("filled.pptx")?;
/// let slide = pkg.presentation()?.slide(0)?;
/// for ph in slide.placeholders()? {
///     if let Some(picture) = ph.as_picture() {
///         let crop = picture.crop()?;
///         println!("{} cropped {:.3}/{:.3}", picture.image()?.sha1(), crop.left, crop.top);
///     }
/// }
/// # Ok::<(), lectern::OoxmlError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderPicture<'a> {
    placeholder: Placeholder<'a>,
}

impl<'a> PlaceholderPicture<'a> {
    #[inline]
    pub(crate) fn new(placeholder: Placeholder<'a>) -> Self {
        Self { placeholder }
    }

    #[inline]
    pub fn placeholder(&self) -> Placeholder<'a> {
        self.placeholder
    }

    fn blip_fill(&self) -> Option<&'a XmlElement> {
        self.placeholder.element().child("p:blipFill")
    }

    /// Crop fractions from `a:srcRect`; all zero when absent.
    pub fn crop(&self) -> Result<Crop> {
        match self.blip_fill().and_then(|fill| fill.child("a:srcRect")) {
            Some(src_rect) => Crop::from_src_rect(src_rect),
            None => Ok(Crop::default()),
        }
    }

    pub fn crop_left(&self) -> Result<f64> {
        Ok(self.crop()?.left)
    }

    pub fn crop_top(&self) -> Result<f64> {
        Ok(self.crop()?.top)
    }

    pub fn crop_right(&self) -> Result<f64> {
        Ok(self.crop()?.right)
    }

    pub fn crop_bottom(&self) -> Result<f64> {
        Ok(self.crop()?.bottom)
    }

    /// rId of the image relationship, `a:blip@r:embed`.
    pub fn image_r_id(&self) -> Option<&'a str> {
        self.blip_fill()?.child("a:blip")?.attr("r:embed")
    }

    /// The picture's image, loaded from its image part.
    pub fn image(&self) -> Result<Image> {
        let slide = self.placeholder.shape().slide();
        let r_id = self.image_r_id().ok_or_else(|| {
            OoxmlError::Xml(format!(
                "picture {} on {} has no a:blip@r:embed",
                self.placeholder.shape_id(),
                slide.partname()
            ))
        })?;
        let slide_part = slide.package().part(slide.partname())?;
        let image_partname = slide_part.related_partname(r_id)?;
        let image_part = slide.package().part(&image_partname)?;
        Ok(Image::from_part(
            image_part.blob().into_owned(),
            &image_partname,
            image_part.content_type(),
        ))
    }

    /// `p:cNvPr@descr`.
    #[inline]
    pub fn description(&self) -> Option<&'a str> {
        self.placeholder.shape().description()
    }
}

impl<'a> Deref for PlaceholderPicture<'a> {
    type Target = Placeholder<'a>;

    fn deref(&self) -> &Self::Target {
        &self.placeholder
    }
}
