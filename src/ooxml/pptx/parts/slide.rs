/// Slide, slide layout and slide master parts.
///
/// The three part kinds share the `p:cSld/p:spTree` shape tree and differ in
/// where they sit in the inheritance chain: a slide relates to one layout, a
/// layout to one master, and a master lists its layouts.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, namespace as ns};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::part::Part;
use crate::ooxml::oxml::{XmlDocument, XmlElement};
use crate::ooxml::pptx::shapes::placeholder::PlaceholderType;
use std::fmt;

/// Which of the three slide-like parts a part is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlideKind {
    Slide,
    Layout,
    Master,
}

impl SlideKind {
    /// Kind for a part content type.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            ct::PML_SLIDE => Some(Self::Slide),
            ct::PML_SLIDE_LAYOUT => Some(Self::Layout),
            ct::PML_SLIDE_MASTER => Some(Self::Master),
            _ => None,
        }
    }

    #[inline]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Slide => ct::PML_SLIDE,
            Self::Layout => ct::PML_SLIDE_LAYOUT,
            Self::Master => ct::PML_SLIDE_MASTER,
        }
    }
}

impl fmt::Display for SlideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Slide => "slide",
            Self::Layout => "slide layout",
            Self::Master => "slide master",
        })
    }
}

/// A slide-like part: the OPC part plus its parsed root element.
#[derive(Debug, Clone, Copy)]
pub struct SlidePart<'a> {
    part: &'a dyn Part,
    root: &'a XmlElement,
    kind: SlideKind,
}

impl<'a> SlidePart<'a> {
    /// Wrap `part`, which must be a slide, slide layout or slide master.
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        let kind = SlideKind::from_content_type(part.content_type()).ok_or_else(|| {
            OoxmlError::InvalidContentType {
                expected: "slide, slide layout or slide master".to_string(),
                got: part.content_type().to_string(),
            }
        })?;
        let root = part
            .as_xml()
            .map(XmlDocument::root)
            .ok_or_else(|| OoxmlError::Xml(format!("{} is not parsed", part.partname())))?;
        Ok(Self { part, root, kind })
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }

    #[inline]
    pub fn partname(&self) -> &'a PackURI {
        self.part.partname()
    }

    #[inline]
    pub fn kind(&self) -> SlideKind {
        self.kind
    }

    #[inline]
    pub fn root(&self) -> &'a XmlElement {
        self.root
    }

    /// `p:cSld@name`, empty when absent.
    pub fn name(&self) -> &'a str {
        self.root
            .child("p:cSld")
            .and_then(|c_sld| c_sld.attr("name"))
            .unwrap_or("")
    }

    /// The `p:spTree` shape tree.
    pub fn sp_tree(&self) -> Result<&'a XmlElement> {
        sp_tree(self.root)
            .ok_or_else(|| OoxmlError::Xml(format!("{} has no p:spTree", self.partname())))
    }

    /// rIds of a master's `p:sldLayoutIdLst`, in order.
    pub fn slide_layout_rids(&self) -> Vec<&'a str> {
        self.root
            .find(&["p:sldLayoutIdLst"])
            .map(|lst| {
                lst.elements()
                    .filter(|e| e.name() == "p:sldLayoutId")
                    .filter_map(|e| e.attr("r:id"))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// `p:cSld/p:spTree` under a slide-like root.
pub(crate) fn sp_tree(root: &XmlElement) -> Option<&XmlElement> {
    root.find(&["p:cSld", "p:spTree"])
}

pub(crate) fn sp_tree_mut(root: &mut XmlElement) -> Option<&mut XmlElement> {
    root.find_mut(&["p:cSld", "p:spTree"])
}

/// Shape elements that may appear in a shape tree.
pub(crate) const SHAPE_TAGS: [&str; 6] = [
    "p:sp",
    "p:pic",
    "p:graphicFrame",
    "p:grpSp",
    "p:cxnSp",
    "p:contentPart",
];

/// The non-visual properties wrapper of a shape element (`p:nvSpPr`,
/// `p:nvPicPr`, ...).
pub(crate) fn nv_props(shape: &XmlElement) -> Option<&XmlElement> {
    shape.elements().find(|e| {
        e.name().starts_with("p:nv") && e.name().ends_with("Pr") && e.name() != "p:nvPr"
    })
}

/// `p:cNvPr` of a shape element.
pub(crate) fn c_nv_pr(shape: &XmlElement) -> Option<&XmlElement> {
    nv_props(shape)?.child("p:cNvPr")
}

/// Shape id from `p:cNvPr@id`.
pub(crate) fn shape_id(shape: &XmlElement) -> Option<u32> {
    c_nv_pr(shape)?.attr("id")?.parse().ok()
}

/// Largest shape id used anywhere in the tree, group members included.
pub(crate) fn max_shape_id(tree: &XmlElement) -> u32 {
    tree.descendants("p:cNvPr")
        .into_iter()
        .filter_map(|c| c.attr("id")?.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

/// Mutable shape element with `id`, searched through group shapes too.
pub(crate) fn find_shape_mut(tree: &mut XmlElement, id: u32) -> Option<&mut XmlElement> {
    let pos = tree.children().iter().position(|node| match node {
        crate::ooxml::oxml::XmlNode::Element(e) => {
            SHAPE_TAGS.contains(&e.name()) && shape_id(e) == Some(id)
        },
        crate::ooxml::oxml::XmlNode::Text(_) => false,
    });
    if let Some(pos) = pos {
        return match &mut tree.children_mut()[pos] {
            crate::ooxml::oxml::XmlNode::Element(e) => Some(e),
            crate::ooxml::oxml::XmlNode::Text(_) => None,
        };
    }
    tree.elements_mut()
        .filter(|e| e.name() == "p:grpSp")
        .find_map(|group| find_shape_mut(group, id))
}

/// Root of a new, empty slide.
pub(crate) fn new_slide_root() -> XmlElement {
    let nv_grp_sp_pr = XmlElement::new("p:nvGrpSpPr")
        .with_child(
            XmlElement::new("p:cNvPr")
                .with_attr("id", "1")
                .with_attr("name", ""),
        )
        .with_child(XmlElement::new("p:cNvGrpSpPr"))
        .with_child(XmlElement::new("p:nvPr"));
    let sp_tree = XmlElement::new("p:spTree")
        .with_child(nv_grp_sp_pr)
        .with_child(XmlElement::new("p:grpSpPr"));

    XmlElement::new("p:sld")
        .with_attr("xmlns:a", ns::DML_MAIN)
        .with_attr("xmlns:p", ns::PML_MAIN)
        .with_attr("xmlns:r", ns::OFC_RELATIONSHIPS)
        .with_child(XmlElement::new("p:cSld").with_child(sp_tree))
        .with_child(
            XmlElement::new("p:clrMapOvr").with_child(XmlElement::new("a:masterClrMapping")),
        )
}

/// A bare slide placeholder cloned from a layout placeholder.
///
/// The clone carries no `a:xfrm`, so its position and size keep following
/// the layout. Text-bearing kinds get an empty text body.
pub(crate) fn new_placeholder_sp(
    id: u32,
    ph_type: PlaceholderType,
    layout_ph: &XmlElement,
) -> XmlElement {
    let vertical = layout_ph.attr("orient") == Some("vert");
    let mut name = String::new();
    if vertical {
        name.push_str("Vertical ");
    }
    name.push_str(ph_type.basename());
    name.push_str(&format!(" {}", id.saturating_sub(1)));

    let mut ph = XmlElement::new("p:ph");
    if let Some(code) = layout_ph.attr("type").filter(|code| *code != "obj") {
        ph.set_attr("type", code);
    }
    for key in ["orient", "sz"] {
        if let Some(value) = layout_ph.attr(key) {
            ph.set_attr(key, value);
        }
    }
    if let Some(idx) = layout_ph.attr("idx").filter(|idx| *idx != "0") {
        ph.set_attr("idx", idx);
    }

    let nv_sp_pr = XmlElement::new("p:nvSpPr")
        .with_child(
            XmlElement::new("p:cNvPr")
                .with_attr("id", id.to_string())
                .with_attr("name", name),
        )
        .with_child(
            XmlElement::new("p:cNvSpPr")
                .with_child(XmlElement::new("a:spLocks").with_attr("noGrp", "1")),
        )
        .with_child(XmlElement::new("p:nvPr").with_child(ph));

    let mut sp = XmlElement::new("p:sp")
        .with_child(nv_sp_pr)
        .with_child(XmlElement::new("p:spPr"));
    if ph_type.has_text_frame() {
        sp.push(crate::ooxml::pptx::shapes::textframe::new_tx_body());
    }
    sp
}
