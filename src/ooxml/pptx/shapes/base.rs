/// Base shape view shared by every element of a shape tree.
use crate::common::Emu;
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::oxml::XmlElement;
use crate::ooxml::pptx::inherit::GeometryField;
use crate::ooxml::pptx::parts::slide::{c_nv_pr, nv_props, shape_id};
use crate::ooxml::pptx::shapes::placeholder::{Placeholder, PlaceholderFormat};
use crate::ooxml::pptx::shapes::textframe::TextFrame;
use crate::ooxml::pptx::slide::BaseSlide;

/// Shape type enumeration.
///
/// Any shape carrying a `p:ph` reports [`Placeholder`](Self::Placeholder)
/// whatever its element; other shapes report their element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    Placeholder,
    /// A preset or custom geometry shape (p:sp)
    AutoShape,
    /// A p:sp flagged as a text box
    TextBox,
    /// A picture (p:pic)
    Picture,
    /// A graphic frame holding a chart
    Chart,
    /// A graphic frame holding a table
    Table,
    /// Any other graphic frame (diagram, OLE object)
    GraphicFrame,
    /// A group shape (p:grpSp)
    GroupShape,
    /// A connector shape (p:cxnSp)
    Connector,
    /// Unknown or unsupported shape type
    Unknown,
}

/// Addresses a shape for mutation: the part holding it and its shape id.
///
/// Obtained from a read view and handed to the mutating methods of
/// [`Package`](crate::ooxml::pptx::Package).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeLocator {
    partname: PackURI,
    shape_id: u32,
}

impl ShapeLocator {
    #[inline]
    pub fn new(partname: PackURI, shape_id: u32) -> Self {
        Self { partname, shape_id }
    }

    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    #[inline]
    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }
}

/// A shape in a slide, slide layout or slide master shape tree.
///
/// Position and size are the values set directly on the shape; use
/// [`Placeholder`] for values resolved through inheritance.
#[derive(Debug, Clone, Copy)]
pub struct Shape<'a> {
    slide: BaseSlide<'a>,
    element: &'a XmlElement,
}

impl<'a> Shape<'a> {
    #[inline]
    pub(crate) fn new(slide: BaseSlide<'a>, element: &'a XmlElement) -> Self {
        Self { slide, element }
    }

    /// The slide-like part this shape belongs to.
    #[inline]
    pub fn slide(&self) -> BaseSlide<'a> {
        self.slide
    }

    #[inline]
    pub fn element(&self) -> &'a XmlElement {
        self.element
    }

    /// `p:cNvPr@id`, 0 when missing.
    pub fn shape_id(&self) -> u32 {
        shape_id(self.element).unwrap_or(0)
    }

    /// `p:cNvPr@name`.
    pub fn name(&self) -> &'a str {
        c_nv_pr(self.element)
            .and_then(|c| c.attr("name"))
            .unwrap_or("")
    }

    /// `p:cNvPr@descr`.
    pub fn description(&self) -> Option<&'a str> {
        c_nv_pr(self.element).and_then(|c| c.attr("descr"))
    }

    pub fn locator(&self) -> ShapeLocator {
        ShapeLocator::new(self.slide.partname().clone(), self.shape_id())
    }

    /// `p:nvPr/p:ph` wrapped as a placeholder format.
    pub fn placeholder_format(&self) -> Option<PlaceholderFormat<'a>> {
        nv_props(self.element)?
            .find(&["p:nvPr", "p:ph"])
            .map(PlaceholderFormat::new)
    }

    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.placeholder_format().is_some()
    }

    /// Placeholder view of this shape.
    #[inline]
    pub fn placeholder(&self) -> Option<Placeholder<'a>> {
        Placeholder::from_shape(*self)
    }

    pub fn shape_type(&self) -> ShapeType {
        if self.is_placeholder() {
            return ShapeType::Placeholder;
        }
        match self.element.name() {
            "p:sp" => {
                let text_box = nv_props(self.element)
                    .and_then(|nv| nv.child("p:cNvSpPr"))
                    .and_then(|c| c.attr("txBox"))
                    .is_some_and(|v| v == "1" || v == "true");
                if text_box {
                    ShapeType::TextBox
                } else {
                    ShapeType::AutoShape
                }
            },
            "p:pic" => ShapeType::Picture,
            "p:graphicFrame" => {
                let uri = self
                    .element
                    .find(&["a:graphic", "a:graphicData"])
                    .and_then(|data| data.attr("uri"))
                    .unwrap_or("");
                if uri.ends_with("/chart") {
                    ShapeType::Chart
                } else if uri.ends_with("/table") {
                    ShapeType::Table
                } else {
                    ShapeType::GraphicFrame
                }
            },
            "p:grpSp" => ShapeType::GroupShape,
            "p:cxnSp" => ShapeType::Connector,
            _ => ShapeType::Unknown,
        }
    }

    /// The transform element holding the shape's own position and size.
    pub fn xfrm(&self) -> Option<&'a XmlElement> {
        xfrm(self.element)
    }

    /// Directly set left edge.
    #[inline]
    pub fn left(&self) -> Option<Emu> {
        direct_value(self.element, GeometryField::Left)
    }

    #[inline]
    pub fn top(&self) -> Option<Emu> {
        direct_value(self.element, GeometryField::Top)
    }

    #[inline]
    pub fn width(&self) -> Option<Emu> {
        direct_value(self.element, GeometryField::Width)
    }

    #[inline]
    pub fn height(&self) -> Option<Emu> {
        direct_value(self.element, GeometryField::Height)
    }

    #[inline]
    pub fn has_text_frame(&self) -> bool {
        self.element.child("p:txBody").is_some()
    }

    pub fn text_frame(&self) -> Option<TextFrame<'a>> {
        self.element.child("p:txBody").map(TextFrame::new)
    }

    /// Text of the shape's text frame, empty without one.
    pub fn text(&self) -> String {
        self.text_frame().map(|tf| tf.text()).unwrap_or_default()
    }
}

/// `a:xfrm` (or `p:xfrm` for graphic frames) of a shape element.
pub(crate) fn xfrm(element: &XmlElement) -> Option<&XmlElement> {
    match element.name() {
        "p:graphicFrame" => element.child("p:xfrm"),
        "p:grpSp" => element.find(&["p:grpSpPr", "a:xfrm"]),
        _ => element.find(&["p:spPr", "a:xfrm"]),
    }
}

/// A geometry value set directly on a shape element.
pub(crate) fn direct_value(element: &XmlElement, field: GeometryField) -> Option<Emu> {
    let (child, attr) = match field {
        GeometryField::Left => ("a:off", "x"),
        GeometryField::Top => ("a:off", "y"),
        GeometryField::Width => ("a:ext", "cx"),
        GeometryField::Height => ("a:ext", "cy"),
    };
    xfrm(element)?.child(child)?.attr(attr)?.parse().ok()
}
