/// Package implementation for PowerPoint presentations.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::part::{Part, XmlPart};
use crate::ooxml::oxml::{XmlDocument, XmlElement};
use crate::ooxml::pptx::config::{PictureOptions, SaveOptions};
use crate::ooxml::pptx::parts::image::{Image, get_or_add_image_part};
use crate::ooxml::pptx::parts::presentation::{
    PresentationPart, add_slide_id, is_presentation_content_type,
};
use crate::ooxml::pptx::parts::slide::{
    find_shape_mut, max_shape_id, new_placeholder_sp, new_slide_root, sp_tree, sp_tree_mut,
};
use crate::ooxml::pptx::presentation::Presentation;
use crate::ooxml::pptx::shapes::picture::{NewPicture, crop_to_fit, new_placeholder_pic};
use crate::ooxml::pptx::shapes::textframe;
use crate::ooxml::pptx::shapes::{PlaceholderPicture, PlaceholderType, Shape, ShapeLocator};
use crate::ooxml::pptx::slide::{BaseSlide, Slide};
use crate::ooxml::pptx::template;
use std::path::Path;

/// Partname template for new slides.
const SLIDE_PARTNAME_TEMPLATE: &str = "/ppt/slides/slide%d.xml";

/// A PowerPoint (.pptx) package.
///
/// This is the main entry point: it owns the package and hands out
/// read views through [`presentation`](Self::presentation). Edits go
/// through `&mut self` methods addressed by a [`ShapeLocator`].
///
/// # Examples
///
/// ```rust,no_run
/// use lectern::ooxml::pptx::Package;
///
/// let mut pkg = Package::new()?;
/// let title = pkg.add_slide(0)?.title()?.map(|ph| ph.locator());
/// if let Some(title) = title {
///     pkg.set_text(&title, "Quarterly review")?;
/// }
/// pkg.save("review.pptx")?;
/// # Ok::<(), lectern::OoxmlError>(())
/// ```
#[derive(Debug)]
pub struct Package {
    /// The underlying OPC package
    opc: OpcPackage,
}

impl Package {
    /// A new presentation built from the default template: 4:3, no slides,
    /// one master and the layouts "Title Slide" and "Title and Content".
    pub fn new() -> Result<Self> {
        Ok(Self {
            opc: template::default_package()?,
        })
    }

    /// Open a .pptx, .potx or .ppsx package from a file path.
    ///
    /// ```rust,no_run
    /// use lectern::ooxml::pptx::Package;
    ///
    /// let pkg = Package::open("presentation.pptx")?;
    /// # Ok::<(), lectern::OoxmlError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_opc(OpcPackage::open(path)?)
    }

    /// Load a package from the bytes of a .pptx file.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_opc(OpcPackage::from_bytes(data)?)
    }

    fn from_opc(opc: OpcPackage) -> Result<Self> {
        let main = opc
            .main_document_partname()
            .map_err(|e| OoxmlError::PartNotFound(format!("main presentation part: {e}")))?;
        let content_type = opc.part(&main)?.content_type();
        if !is_presentation_content_type(content_type) {
            return Err(OoxmlError::InvalidContentType {
                expected: ct::PML_PRESENTATION_MAIN.to_string(),
                got: content_type.to_string(),
            });
        }
        tracing::debug!(parts = opc.part_count(), %main, "opened presentation");
        Ok(Self { opc })
    }

    /// Get the main presentation.
    pub fn presentation(&self) -> Result<Presentation<'_>> {
        let main = self.opc.main_document_partname()?;
        let part = PresentationPart::from_part(self.opc.part(&main)?)?;
        Ok(Presentation::new(part, &self.opc))
    }

    /// Get the underlying OPC package.
    #[inline]
    pub fn opc_package(&self) -> &OpcPackage {
        &self.opc
    }

    /// Save with default options.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_with(path, &SaveOptions::default())
    }

    pub fn save_with<P: AsRef<Path>>(&self, path: P, options: &SaveOptions) -> Result<()> {
        let path = path.as_ref();
        self.opc.save(path, options.compression.into())?;
        tracing::debug!(path = %path.display(), "saved presentation");
        Ok(())
    }

    /// Serialize with default options.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_bytes_with(&SaveOptions::default())
    }

    pub fn to_bytes_with(&self, options: &SaveOptions) -> Result<Vec<u8>> {
        Ok(self.opc.to_bytes(options.compression.into())?)
    }

    /// Append a slide based on layout `layout_index` of the first master.
    ///
    /// The layout's placeholders are cloned onto the slide, except date,
    /// footer and slide number. The clones carry no position or size of
    /// their own, so they keep following the layout.
    pub fn add_slide(&mut self, layout_index: usize) -> Result<Slide<'_>> {
        let mut root = new_slide_root();
        let mut next_id = sp_tree(&root).map_or(0, max_shape_id) + 1;
        let (layout_partname, pres_partname, placeholders) = {
            let pres = self.presentation()?;
            let layout = pres.slide_layout(layout_index)?;
            let mut placeholders = Vec::new();
            for shape in layout.shapes()? {
                let Some(ph) = shape.placeholder() else {
                    continue;
                };
                let ph_type = ph.ph_type();
                if matches!(
                    ph_type,
                    PlaceholderType::Date | PlaceholderType::Footer | PlaceholderType::SlideNumber
                ) {
                    continue;
                }
                placeholders.push(new_placeholder_sp(
                    next_id,
                    ph_type,
                    ph.placeholder_format().element(),
                ));
                next_id += 1;
            }
            (layout.partname().clone(), pres.partname().clone(), placeholders)
        };

        let partname = self.opc.next_partname(SLIDE_PARTNAME_TEMPLATE)?;
        if let Some(tree) = sp_tree_mut(&mut root) {
            for sp in placeholders {
                tree.push(sp);
            }
        }
        let mut part = XmlPart::new(partname.clone(), ct::PML_SLIDE, XmlDocument::new(root));
        part.relate_to(&layout_partname, rt::SLIDE_LAYOUT);
        self.opc.add_part(Box::new(part));

        let r_id = self.opc.part_mut(&pres_partname)?.relate_to(&partname, rt::SLIDE);
        let slide_id = add_slide_id(self.opc.xml_mut(&pres_partname)?.root_mut(), &r_id);
        tracing::debug!(%partname, slide_id, layout = %layout_partname, "added slide");

        Slide::load(&self.opc, &partname)
    }

    /// The shape addressed by `locator`, searching inside groups.
    pub fn shape(&self, locator: &ShapeLocator) -> Result<Shape<'_>> {
        BaseSlide::load(&self.opc, locator.partname())?.find_shape(locator.shape_id())
    }

    fn shape_element_mut(&mut self, locator: &ShapeLocator) -> Result<&mut XmlElement> {
        let root = self.opc.xml_mut(locator.partname())?.root_mut();
        let tree = sp_tree_mut(root).ok_or_else(|| {
            OoxmlError::Xml(format!("{} has no p:spTree", locator.partname()))
        })?;
        find_shape_mut(tree, locator.shape_id()).ok_or_else(|| {
            OoxmlError::ShapeNotFound(format!(
                "id {} on {}",
                locator.shape_id(),
                locator.partname()
            ))
        })
    }

    /// Replace the text of a shape, one paragraph per line.
    pub fn set_text(&mut self, locator: &ShapeLocator, text: &str) -> Result<()> {
        textframe::set_shape_text(self.shape_element_mut(locator)?, text)
    }

    /// Set the indent level (0..=8) of paragraph `paragraph` of a shape.
    pub fn set_paragraph_level(
        &mut self,
        locator: &ShapeLocator,
        paragraph: usize,
        level: u8,
    ) -> Result<()> {
        textframe::set_paragraph_level(self.shape_element_mut(locator)?, paragraph, level)
    }

    /// Fill an unpopulated picture placeholder with an image, cropped to fit.
    pub fn insert_picture(
        &mut self,
        locator: &ShapeLocator,
        image: Vec<u8>,
    ) -> Result<PlaceholderPicture<'_>> {
        self.insert_picture_with(locator, image, &PictureOptions::default())
    }

    pub fn insert_picture_with(
        &mut self,
        locator: &ShapeLocator,
        image: Vec<u8>,
        options: &PictureOptions,
    ) -> Result<PlaceholderPicture<'_>> {
        let image = Image::from_bytes(image, None)?;
        self.insert_image(locator, &image, options)
    }

    /// Fill an unpopulated picture placeholder with the image file at `path`.
    ///
    /// The file name becomes the picture description.
    pub fn insert_picture_file<P: AsRef<Path>>(
        &mut self,
        locator: &ShapeLocator,
        path: P,
    ) -> Result<PlaceholderPicture<'_>> {
        let image = Image::from_file(path)?;
        self.insert_image(locator, &image, &PictureOptions::default())
    }

    /// Fails with [`OoxmlError::StateMismatch`] when the target is not an
    /// unpopulated picture or clip-art placeholder on a slide.
    fn insert_image(
        &mut self,
        locator: &ShapeLocator,
        image: &Image,
        options: &PictureOptions,
    ) -> Result<PlaceholderPicture<'_>> {
        let (ph, xfrm, name, crop) = {
            let shape = self.shape(locator)?;
            let placeholder = shape.placeholder().ok_or_else(|| {
                OoxmlError::StateMismatch(format!(
                    "shape {} on {} is not a placeholder",
                    locator.shape_id(),
                    locator.partname()
                ))
            })?;
            placeholder.ensure_accepts_picture()?;

            let crop = if options.crop_to_fit {
                let size = image.size().ok_or_else(|| {
                    OoxmlError::InvalidValue(format!(
                        "{} has no pixel size",
                        image.default_description()
                    ))
                })?;
                crop_to_fit(size, (placeholder.width()?, placeholder.height()?))
            } else {
                Default::default()
            };
            (
                placeholder.placeholder_format().element().clone(),
                shape.xfrm().cloned(),
                shape.name().to_string(),
                crop,
            )
        };

        let image_partname = get_or_add_image_part(&mut self.opc, image)?;
        let r_id = self
            .opc
            .part_mut(locator.partname())?
            .relate_to(&image_partname, rt::IMAGE);
        let description = options
            .description
            .clone()
            .unwrap_or_else(|| image.default_description());

        let pic = new_placeholder_pic(NewPicture {
            id: locator.shape_id(),
            name: &name,
            description: &description,
            ph,
            xfrm,
            r_id: &r_id,
            crop,
        });
        *self.shape_element_mut(locator)? = pic;
        tracing::debug!(
            partname = %locator.partname(),
            shape_id = locator.shape_id(),
            image = %image_partname,
            "inserted picture"
        );

        self.placeholder_picture(locator)
    }

    fn placeholder_picture(&self, locator: &ShapeLocator) -> Result<PlaceholderPicture<'_>> {
        self.shape(locator)?
            .placeholder()
            .and_then(|ph| ph.as_picture())
            .ok_or_else(|| {
                OoxmlError::Xml(format!(
                    "shape {} on {} is not a picture placeholder",
                    locator.shape_id(),
                    locator.partname()
                ))
            })
    }

    /// Partnames of the slides, in presentation order.
    pub fn slide_partnames(&self) -> Result<Vec<PackURI>> {
        Ok(self
            .presentation()?
            .slides()?
            .iter()
            .map(|slide| slide.partname().clone())
            .collect())
    }
}
