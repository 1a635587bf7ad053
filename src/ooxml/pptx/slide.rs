/// Slide, slide layout and slide master views.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::opc::constants::relationship_type as rt;
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::oxml::XmlElement;
use crate::ooxml::pptx::parts::slide::{SHAPE_TAGS, shape_id};
use crate::ooxml::pptx::parts::{SlideKind, SlidePart};
use crate::ooxml::pptx::shapes::{Placeholder, Shape};
use std::ops::Deref;

/// What slides, layouts and masters have in common: a shape tree, a name
/// and a place in the inheritance chain.
#[derive(Debug, Clone, Copy)]
pub struct BaseSlide<'a> {
    part: SlidePart<'a>,
    package: &'a OpcPackage,
}

impl<'a> BaseSlide<'a> {
    /// View of the slide-like part at `partname`.
    pub(crate) fn load(package: &'a OpcPackage, partname: &PackURI) -> Result<Self> {
        let part = SlidePart::from_part(package.part(partname)?)?;
        Ok(Self { part, package })
    }

    #[inline]
    pub fn partname(&self) -> &'a PackURI {
        self.part.partname()
    }

    #[inline]
    pub fn kind(&self) -> SlideKind {
        self.part.kind()
    }

    /// `p:cSld@name`, e.g. the layout name "Title Slide".
    #[inline]
    pub fn name(&self) -> &'a str {
        self.part.name()
    }

    #[inline]
    pub(crate) fn package(&self) -> &'a OpcPackage {
        self.package
    }

    #[inline]
    pub(crate) fn root(&self) -> &'a XmlElement {
        self.part.root()
    }

    /// Top-level shapes of the shape tree, in document order.
    pub fn shapes(&self) -> Result<Vec<Shape<'a>>> {
        let tree = self.part.sp_tree()?;
        Ok(tree
            .elements()
            .filter(|e| SHAPE_TAGS.contains(&e.name()))
            .map(|e| Shape::new(*self, e))
            .collect())
    }

    /// The shape at position `index` of the shape tree.
    pub fn shape(&self, index: usize) -> Result<Shape<'a>> {
        self.shapes()?.into_iter().nth(index).ok_or_else(|| {
            OoxmlError::ShapeNotFound(format!("shape {index} on {}", self.partname()))
        })
    }

    /// The shape with `p:cNvPr@id == id`, looking inside group shapes.
    pub fn find_shape(&self, id: u32) -> Result<Shape<'a>> {
        fn walk<'a>(tree: &'a XmlElement, id: u32) -> Option<&'a XmlElement> {
            tree.elements()
                .filter(|e| SHAPE_TAGS.contains(&e.name()))
                .find_map(|e| {
                    if shape_id(e) == Some(id) {
                        Some(e)
                    } else if e.name() == "p:grpSp" {
                        walk(e, id)
                    } else {
                        None
                    }
                })
        }
        walk(self.part.sp_tree()?, id)
            .map(|e| Shape::new(*self, e))
            .ok_or_else(|| OoxmlError::ShapeNotFound(format!("id {id} on {}", self.partname())))
    }

    /// Placeholders ordered by `idx`.
    pub fn placeholders(&self) -> Result<Vec<Placeholder<'a>>> {
        let mut placeholders: Vec<Placeholder<'a>> = self
            .shapes()?
            .into_iter()
            .filter_map(|shape| shape.placeholder())
            .collect();
        placeholders.sort_by_key(|ph| ph.idx());
        Ok(placeholders)
    }

    /// The placeholder with slot index `idx`.
    pub fn placeholder(&self, idx: u32) -> Result<Placeholder<'a>> {
        self.shapes()?
            .into_iter()
            .filter_map(|shape| shape.placeholder())
            .find(|ph| ph.idx() == idx)
            .ok_or_else(|| {
                OoxmlError::PlaceholderNotFound(format!("idx {idx} on {}", self.partname()))
            })
    }

    /// First title or centred title placeholder.
    pub fn title(&self) -> Result<Option<Placeholder<'a>>> {
        Ok(self
            .shapes()?
            .into_iter()
            .filter_map(|shape| shape.placeholder())
            .find(|ph| ph.ph_type().is_title()))
    }

    /// Next part up the inheritance chain: the layout of a slide, the master
    /// of a layout, nothing for a master.
    pub fn parent(&self) -> Result<Option<BaseSlide<'a>>> {
        let (reltype, expected) = match self.kind() {
            SlideKind::Slide => (rt::SLIDE_LAYOUT, SlideKind::Layout),
            SlideKind::Layout => (rt::SLIDE_MASTER, SlideKind::Master),
            SlideKind::Master => return Ok(None),
        };
        let partname = self
            .part
            .part()
            .rels()
            .part_with_reltype(reltype)?
            .target_partname()?;
        let parent = Self::load(self.package, &partname)?;
        if parent.kind() != expected {
            return Err(OoxmlError::InvalidContentType {
                expected: expected.content_type().to_string(),
                got: parent.part.part().content_type().to_string(),
            });
        }
        Ok(Some(parent))
    }
}

macro_rules! slide_view {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name<'a>(BaseSlide<'a>);

        impl<'a> $name<'a> {
            pub(crate) fn load(package: &'a OpcPackage, partname: &PackURI) -> Result<Self> {
                let base = BaseSlide::load(package, partname)?;
                if base.kind() != $kind {
                    return Err(OoxmlError::InvalidContentType {
                        expected: $kind.content_type().to_string(),
                        got: base.part.part().content_type().to_string(),
                    });
                }
                Ok(Self(base))
            }

            #[inline]
            pub fn base(&self) -> BaseSlide<'a> {
                self.0
            }
        }

        impl<'a> Deref for $name<'a> {
            type Target = BaseSlide<'a>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }
    };
}

slide_view!(
    /// A slide.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use lectern::ooxml::pptx::Package;
    ///
    /// let pkg = Package::open("presentation.pptx")?;
    /// let slide = pkg.presentation()?.slide(0)?;
    /// if let Some(title) = slide.title()? {
    ///     println!("title: {}", title.shape().text());
    /// }
    /// println!("layout: {}", slide.slide_layout()?.name());
    /// # Ok::<(), lectern::OoxmlError>(())
    /// ```
    Slide,
    SlideKind::Slide
);

slide_view!(
    /// A slide layout.
    SlideLayout,
    SlideKind::Layout
);

slide_view!(
    /// A slide master.
    SlideMaster,
    SlideKind::Master
);

impl<'a> Slide<'a> {
    /// The layout this slide is based on.
    pub fn slide_layout(&self) -> Result<SlideLayout<'a>> {
        match self.0.parent()? {
            Some(parent) => SlideLayout::load(parent.package, parent.partname()),
            None => Err(OoxmlError::PartNotFound(format!(
                "slide layout of {}",
                self.partname()
            ))),
        }
    }
}

impl<'a> SlideLayout<'a> {
    /// The master this layout inherits from.
    pub fn slide_master(&self) -> Result<SlideMaster<'a>> {
        match self.0.parent()? {
            Some(parent) => SlideMaster::load(parent.package, parent.partname()),
            None => Err(OoxmlError::PartNotFound(format!(
                "slide master of {}",
                self.partname()
            ))),
        }
    }
}

impl<'a> SlideMaster<'a> {
    /// Layouts listed in `p:sldLayoutIdLst`, in order.
    pub fn slide_layouts(&self) -> Result<Vec<SlideLayout<'a>>> {
        let part = self.0.part.part();
        self.0
            .part
            .slide_layout_rids()
            .into_iter()
            .map(|r_id| SlideLayout::load(self.0.package, &part.related_partname(r_id)?))
            .collect()
    }
}
