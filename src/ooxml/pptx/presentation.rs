/// Main presentation object - the read API over a presentation's slides,
/// layouts and masters.
use crate::common::Emu;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::pptx::parts::PresentationPart;
use crate::ooxml::pptx::slide::{Slide, SlideLayout, SlideMaster};

/// A PowerPoint presentation.
///
/// Not intended to be constructed directly. Use `Package::presentation()` to
/// access a presentation.
///
/// # Examples
///
/// ```rust,no_run
/// use lectern::ooxml::pptx::Package;
///
/// let pkg = Package::open("presentation.pptx")?;
/// let pres = pkg.presentation()?;
///
/// if let (Some(width), Some(height)) = (pres.slide_width(), pres.slide_height()) {
///     println!("Slide size: {}x{} EMUs", width, height);
/// }
///
/// for layout in pres.slide_layouts()? {
///     println!("Layout: {}", layout.name());
/// }
/// # Ok::<(), lectern::OoxmlError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Presentation<'a> {
    /// The underlying presentation part
    part: PresentationPart<'a>,
    /// Reference to the OPC package for accessing related parts
    package: &'a OpcPackage,
}

impl<'a> Presentation<'a> {
    /// Create a new Presentation.
    ///
    /// This is typically called internally by `Package::presentation()`.
    #[inline]
    pub(crate) fn new(part: PresentationPart<'a>, package: &'a OpcPackage) -> Self {
        Self { part, package }
    }

    #[inline]
    pub fn partname(&self) -> &'a PackURI {
        self.part.partname()
    }

    /// Get the number of slides in the presentation.
    pub fn slide_count(&self) -> Result<usize> {
        Ok(self.part.slide_count())
    }

    /// Slide width in EMUs, `None` when `p:sldSz` is missing.
    #[inline]
    pub fn slide_width(&self) -> Option<Emu> {
        self.part.slide_width()
    }

    /// Slide height in EMUs, `None` when `p:sldSz` is missing.
    #[inline]
    pub fn slide_height(&self) -> Option<Emu> {
        self.part.slide_height()
    }

    fn related(&self, r_id: &str) -> Result<PackURI> {
        Ok(self.part.part().related_partname(r_id)?)
    }

    /// Get all slides in the presentation, in `p:sldIdLst` order.
    pub fn slides(&self) -> Result<Vec<Slide<'a>>> {
        self.part
            .slide_rids()
            .into_iter()
            .map(|r_id| Slide::load(self.package, &self.related(r_id)?))
            .collect()
    }

    /// The slide at position `index`.
    pub fn slide(&self, index: usize) -> Result<Slide<'a>> {
        let r_id = self
            .part
            .slide_rids()
            .into_iter()
            .nth(index)
            .ok_or_else(|| OoxmlError::PartNotFound(format!("slide {index}")))?;
        Slide::load(self.package, &self.related(r_id)?)
    }

    /// Slide masters in `p:sldMasterIdLst` order.
    pub fn slide_masters(&self) -> Result<Vec<SlideMaster<'a>>> {
        self.part
            .slide_master_rids()
            .into_iter()
            .map(|r_id| SlideMaster::load(self.package, &self.related(r_id)?))
            .collect()
    }

    /// The first slide master.
    pub fn slide_master(&self) -> Result<SlideMaster<'a>> {
        let r_id = self
            .part
            .slide_master_rids()
            .into_iter()
            .next()
            .ok_or_else(|| OoxmlError::PartNotFound("slide master".to_string()))?;
        SlideMaster::load(self.package, &self.related(r_id)?)
    }

    /// Layouts of the first slide master.
    pub fn slide_layouts(&self) -> Result<Vec<SlideLayout<'a>>> {
        self.slide_master()?.slide_layouts()
    }

    /// Layout `index` of the first slide master.
    pub fn slide_layout(&self, index: usize) -> Result<SlideLayout<'a>> {
        self.slide_layouts()?
            .into_iter()
            .nth(index)
            .ok_or_else(|| OoxmlError::PartNotFound(format!("slide layout {index}")))
    }
}
