/// Placeholder shapes: classification, inherited geometry and proxy selection.
use crate::common::Emu;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::XmlElement;
use crate::ooxml::pptx::inherit::{self, Geometry, GeometryField};
use crate::ooxml::pptx::parts::SlideKind;
use crate::ooxml::pptx::shapes::base::{Shape, ShapeLocator, ShapeType};
use crate::ooxml::pptx::shapes::picture::PlaceholderPicture;
use crate::ooxml::pptx::shapes::textframe::TextFrame;
use std::fmt;

/// Semantic kind of a placeholder, from `p:ph@type` and `p:ph@orient`.
///
/// A `p:ph` without a `type` attribute is an [`Object`](Self::Object)
/// (content) placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaceholderType {
    Title,
    Body,
    CenterTitle,
    Subtitle,
    Date,
    SlideNumber,
    Footer,
    Header,
    #[default]
    Object,
    Chart,
    Table,
    /// `clipArt`, a bitmap placeholder
    ClipArt,
    /// `dgm`, a SmartArt diagram placeholder
    OrgChart,
    MediaClip,
    SlideImage,
    Picture,
    VerticalBody,
    VerticalObject,
    VerticalTitle,
}

impl PlaceholderType {
    /// Classify from the `type` and `orient` attributes of `p:ph`.
    ///
    /// ```
    /// use lectern::ooxml::pptx::PlaceholderType;
    ///
    /// assert_eq!(PlaceholderType::from_xml(None, None), PlaceholderType::Object);
    /// assert_eq!(PlaceholderType::from_xml(Some("dgm"), None), PlaceholderType::OrgChart);
    /// assert_eq!(
    ///     PlaceholderType::from_xml(Some("body"), Some("vert")),
    ///     PlaceholderType::VerticalBody
    /// );
    /// ```
    pub fn from_xml(type_code: Option<&str>, orient: Option<&str>) -> Self {
        let vertical = orient == Some("vert");
        match type_code.unwrap_or("obj") {
            "title" if vertical => Self::VerticalTitle,
            "title" => Self::Title,
            "body" if vertical => Self::VerticalBody,
            "body" => Self::Body,
            "ctrTitle" => Self::CenterTitle,
            "subTitle" => Self::Subtitle,
            "dt" => Self::Date,
            "sldNum" => Self::SlideNumber,
            "ftr" => Self::Footer,
            "hdr" => Self::Header,
            "obj" if vertical => Self::VerticalObject,
            "obj" => Self::Object,
            "chart" => Self::Chart,
            "tbl" => Self::Table,
            "clipArt" => Self::ClipArt,
            "dgm" => Self::OrgChart,
            "media" => Self::MediaClip,
            "sldImg" => Self::SlideImage,
            "pic" => Self::Picture,
            other => {
                tracing::debug!(type_code = other, "unknown placeholder type, treating as object");
                Self::Object
            },
        }
    }

    /// Value of `p:ph@type` for this kind.
    pub fn xml_code(self) -> &'static str {
        match self {
            Self::Title | Self::VerticalTitle => "title",
            Self::Body | Self::VerticalBody => "body",
            Self::CenterTitle => "ctrTitle",
            Self::Subtitle => "subTitle",
            Self::Date => "dt",
            Self::SlideNumber => "sldNum",
            Self::Footer => "ftr",
            Self::Header => "hdr",
            Self::Object | Self::VerticalObject => "obj",
            Self::Chart => "chart",
            Self::Table => "tbl",
            Self::ClipArt => "clipArt",
            Self::OrgChart => "dgm",
            Self::MediaClip => "media",
            Self::SlideImage => "sldImg",
            Self::Picture => "pic",
        }
    }

    /// The master placeholder kind a layout placeholder of this kind
    /// inherits from.
    pub fn base(self) -> Self {
        match self {
            Self::Title | Self::CenterTitle | Self::VerticalTitle => Self::Title,
            Self::Body
            | Self::Chart
            | Self::ClipArt
            | Self::OrgChart
            | Self::MediaClip
            | Self::Object
            | Self::Picture
            | Self::Subtitle
            | Self::Table
            | Self::VerticalBody
            | Self::VerticalObject => Self::Body,
            Self::Date | Self::Footer | Self::SlideNumber | Self::Header | Self::SlideImage => self,
        }
    }

    /// Prefix PowerPoint uses when naming a new placeholder of this kind.
    pub fn basename(self) -> &'static str {
        match self {
            Self::Title | Self::CenterTitle | Self::VerticalTitle => "Title",
            Self::Subtitle => "Subtitle",
            Self::Body | Self::VerticalBody => "Text Placeholder",
            Self::Object | Self::VerticalObject => "Content Placeholder",
            Self::Chart => "Chart Placeholder",
            Self::Table => "Table Placeholder",
            Self::ClipArt => "ClipArt Placeholder",
            Self::OrgChart => "SmartArt Placeholder",
            Self::MediaClip => "Media Placeholder",
            Self::Picture => "Picture Placeholder",
            Self::SlideImage => "Slide Image Placeholder",
            Self::Date => "Date Placeholder",
            Self::Footer => "Footer Placeholder",
            Self::Header => "Header Placeholder",
            Self::SlideNumber => "Slide Number Placeholder",
        }
    }

    /// Whether a freshly added placeholder of this kind gets a text body.
    #[inline]
    pub fn has_text_frame(self) -> bool {
        matches!(
            self,
            Self::Title
                | Self::CenterTitle
                | Self::Subtitle
                | Self::Body
                | Self::Object
                | Self::VerticalBody
                | Self::VerticalObject
                | Self::VerticalTitle
        )
    }

    /// Whether a picture can be inserted into an unpopulated placeholder of
    /// this kind.
    #[inline]
    pub fn accepts_picture(self) -> bool {
        matches!(self, Self::Picture | Self::ClipArt)
    }

    /// Whether this is a title or centred title.
    #[inline]
    pub fn is_title(self) -> bool {
        matches!(self, Self::Title | Self::CenterTitle | Self::VerticalTitle)
    }

    /// Variant name, e.g. `"ClipArt"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Body => "Body",
            Self::CenterTitle => "CenterTitle",
            Self::Subtitle => "Subtitle",
            Self::Date => "Date",
            Self::SlideNumber => "SlideNumber",
            Self::Footer => "Footer",
            Self::Header => "Header",
            Self::Object => "Object",
            Self::Chart => "Chart",
            Self::Table => "Table",
            Self::ClipArt => "ClipArt",
            Self::OrgChart => "OrgChart",
            Self::MediaClip => "MediaClip",
            Self::SlideImage => "SlideImage",
            Self::Picture => "Picture",
            Self::VerticalBody => "VerticalBody",
            Self::VerticalObject => "VerticalObject",
            Self::VerticalTitle => "VerticalTitle",
        }
    }
}

impl fmt::Display for PlaceholderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read view of a `p:ph` element.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderFormat<'a> {
    element: &'a XmlElement,
}

impl<'a> PlaceholderFormat<'a> {
    #[inline]
    pub(crate) fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    /// The `p:ph` element itself.
    #[inline]
    pub fn element(&self) -> &'a XmlElement {
        self.element
    }

    /// Slot index, 0 when `idx` is not declared.
    pub fn idx(&self) -> u32 {
        self.element
            .attr("idx")
            .and_then(|idx| idx.parse().ok())
            .unwrap_or(0)
    }

    pub fn ph_type(&self) -> PlaceholderType {
        PlaceholderType::from_xml(self.element.attr("type"), self.element.attr("orient"))
    }

    /// `p:ph@sz`: `full`, `half` or `quarter`.
    pub fn size(&self) -> Option<&'a str> {
        self.element.attr("sz")
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.element.attr("orient") == Some("vert")
    }
}

/// The proxy a placeholder shape is presented as.
///
/// Chosen once by [`ProxyKind::classify`] from the shape element, the
/// placeholder type and the part the shape lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyKind {
    /// An unpopulated slide placeholder with no specialised behaviour
    SlidePlaceholder,
    /// An unpopulated chart placeholder
    ChartPlaceholder,
    /// An unpopulated table placeholder
    TablePlaceholder,
    /// An unpopulated picture or clip-art placeholder; accepts a picture
    PicturePlaceholder,
    /// A placeholder populated with a chart, table or diagram
    PlaceholderGraphicFrame,
    /// A placeholder populated with a picture; carries crop values
    PlaceholderPicture,
    LayoutPlaceholder,
    MasterPlaceholder,
}

impl ProxyKind {
    /// Pick the proxy for a placeholder shape element.
    pub fn classify(kind: SlideKind, element_name: &str, ph_type: PlaceholderType) -> Self {
        match kind {
            SlideKind::Layout => return Self::LayoutPlaceholder,
            SlideKind::Master => return Self::MasterPlaceholder,
            SlideKind::Slide => {},
        }
        match element_name {
            "p:graphicFrame" => Self::PlaceholderGraphicFrame,
            "p:pic" => Self::PlaceholderPicture,
            _ => match ph_type {
                PlaceholderType::Chart => Self::ChartPlaceholder,
                PlaceholderType::Table => Self::TablePlaceholder,
                PlaceholderType::Picture | PlaceholderType::ClipArt => Self::PicturePlaceholder,
                _ => Self::SlidePlaceholder,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::SlidePlaceholder => "SlidePlaceholder",
            Self::ChartPlaceholder => "ChartPlaceholder",
            Self::TablePlaceholder => "TablePlaceholder",
            Self::PicturePlaceholder => "PicturePlaceholder",
            Self::PlaceholderGraphicFrame => "PlaceholderGraphicFrame",
            Self::PlaceholderPicture => "PlaceholderPicture",
            Self::LayoutPlaceholder => "LayoutPlaceholder",
            Self::MasterPlaceholder => "MasterPlaceholder",
        }
    }

    /// Whether the placeholder has been filled with content.
    #[inline]
    pub fn is_populated(self) -> bool {
        matches!(self, Self::PlaceholderGraphicFrame | Self::PlaceholderPicture)
    }
}

impl fmt::Display for ProxyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A placeholder shape on a slide, slide layout or slide master.
///
/// Position and size fall back through the inheritance chain one field at
/// a time: a slide placeholder to the layout placeholder with the same
/// `idx`, a layout placeholder to the master placeholder of its base type.
///
/// # Examples
///
/// ```rust,no_run
/// use lectern::ooxml::pptx::Package;
///
/// let pkg = Package::open("deck.pptx")?;
/// let pres = pkg.presentation()?;
/// let body = pres.slide_master()?.placeholder(1)?;
/// println!("{} at {}", body.proxy(), body.left()?);
/// # Ok::<(), lectern::OoxmlError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Placeholder<'a> {
    shape: Shape<'a>,
    format: PlaceholderFormat<'a>,
}

impl<'a> Placeholder<'a> {
    /// `None` when `shape` carries no `p:ph`.
    pub fn from_shape(shape: Shape<'a>) -> Option<Self> {
        let format = shape.placeholder_format()?;
        Some(Self { shape, format })
    }

    #[inline]
    pub fn shape(&self) -> Shape<'a> {
        self.shape
    }

    #[inline]
    pub fn element(&self) -> &'a XmlElement {
        self.shape.element()
    }

    #[inline]
    pub fn placeholder_format(&self) -> PlaceholderFormat<'a> {
        self.format
    }

    #[inline]
    pub fn idx(&self) -> u32 {
        self.format.idx()
    }

    #[inline]
    pub fn ph_type(&self) -> PlaceholderType {
        self.format.ph_type()
    }

    /// Placeholders always report [`ShapeType::Placeholder`].
    #[inline]
    pub fn shape_type(&self) -> ShapeType {
        ShapeType::Placeholder
    }

    pub fn proxy(&self) -> ProxyKind {
        ProxyKind::classify(self.shape.slide().kind(), self.element().name(), self.ph_type())
    }

    #[inline]
    pub fn name(&self) -> &'a str {
        self.shape.name()
    }

    #[inline]
    pub fn shape_id(&self) -> u32 {
        self.shape.shape_id()
    }

    #[inline]
    pub fn locator(&self) -> ShapeLocator {
        self.shape.locator()
    }

    /// Effective left edge in EMU.
    pub fn left(&self) -> Result<Emu> {
        inherit::resolve(self, GeometryField::Left)
    }

    /// Effective top edge in EMU.
    pub fn top(&self) -> Result<Emu> {
        inherit::resolve(self, GeometryField::Top)
    }

    /// Effective width in EMU.
    pub fn width(&self) -> Result<Emu> {
        inherit::resolve(self, GeometryField::Width)
    }

    /// Effective height in EMU.
    pub fn height(&self) -> Result<Emu> {
        inherit::resolve(self, GeometryField::Height)
    }

    /// All four effective geometry fields.
    pub fn geometry(&self) -> Result<Geometry> {
        Ok(Geometry {
            left: self.left()?,
            top: self.top()?,
            width: self.width()?,
            height: self.height()?,
        })
    }

    /// The placeholder this one inherits from, if any.
    pub fn base_placeholder(&self) -> Result<Option<Placeholder<'a>>> {
        inherit::base_placeholder(self)
    }

    /// Picture view of a populated picture placeholder.
    pub fn as_picture(&self) -> Option<PlaceholderPicture<'a>> {
        (self.proxy() == ProxyKind::PlaceholderPicture).then(|| PlaceholderPicture::new(*self))
    }

    #[inline]
    pub fn text_frame(&self) -> Option<TextFrame<'a>> {
        self.shape.text_frame()
    }

    /// Fails with [`OoxmlError::StateMismatch`] unless a picture may be
    /// inserted here.
    pub(crate) fn ensure_accepts_picture(&self) -> Result<()> {
        let proxy = self.proxy();
        if proxy != ProxyKind::PicturePlaceholder {
            return Err(OoxmlError::StateMismatch(format!(
                "placeholder idx {} on {} is a {}, not an unpopulated picture placeholder",
                self.idx(),
                self.shape.slide().partname(),
                proxy
            )));
        }
        Ok(())
    }
}
