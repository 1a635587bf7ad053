/// Presentation part - the main part in a .pptx package.
///
/// Corresponds to `/ppt/presentation.xml` in the package. It lists the slide
/// masters and slides by relationship id and carries the slide size.
use crate::common::Emu;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::part::Part;
use crate::ooxml::oxml::{XmlDocument, XmlElement};

/// Children of `p:presentation` that come after `p:sldIdLst`.
const SLD_ID_LST_SUCCESSORS: [&str; 11] = [
    "p:sldSz",
    "p:notesSz",
    "p:smartTags",
    "p:embeddedFontLst",
    "p:custShowLst",
    "p:photoAlbum",
    "p:custDataLst",
    "p:kinsoku",
    "p:defaultTextStyle",
    "p:modifyVerifier",
    "p:extLst",
];

/// Smallest id PowerPoint accepts for `p:sldId`.
const MIN_SLIDE_ID: u32 = 256;

/// The main presentation part.
#[derive(Debug, Clone, Copy)]
pub struct PresentationPart<'a> {
    part: &'a dyn Part,
    root: &'a XmlElement,
}

impl<'a> PresentationPart<'a> {
    /// Wrap the main document part, which must be a presentation, template
    /// or slide show.
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        if !is_presentation_content_type(part.content_type()) {
            return Err(OoxmlError::InvalidContentType {
                expected: ct::PML_PRESENTATION_MAIN.to_string(),
                got: part.content_type().to_string(),
            });
        }
        let root = part
            .as_xml()
            .map(XmlDocument::root)
            .ok_or_else(|| OoxmlError::Xml(format!("{} is not parsed", part.partname())))?;
        Ok(Self { part, root })
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }

    #[inline]
    pub fn partname(&self) -> &'a PackURI {
        self.part.partname()
    }

    /// rIds of `p:sldIdLst`, in slide order.
    pub fn slide_rids(&self) -> Vec<&'a str> {
        id_list_rids(self.root, "p:sldIdLst", "p:sldId")
    }

    /// rIds of `p:sldMasterIdLst`.
    pub fn slide_master_rids(&self) -> Vec<&'a str> {
        id_list_rids(self.root, "p:sldMasterIdLst", "p:sldMasterId")
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slide_rids().len()
    }

    /// `p:sldSz@cx`.
    pub fn slide_width(&self) -> Option<Emu> {
        self.root.child("p:sldSz")?.attr("cx")?.parse().ok()
    }

    /// `p:sldSz@cy`.
    pub fn slide_height(&self) -> Option<Emu> {
        self.root.child("p:sldSz")?.attr("cy")?.parse().ok()
    }
}

/// Whether `content_type` is one of the main-part types a .pptx, .potx or
/// .ppsx package uses.
#[inline]
pub fn is_presentation_content_type(content_type: &str) -> bool {
    matches!(
        content_type,
        ct::PML_PRESENTATION_MAIN | ct::PML_TEMPLATE_MAIN | ct::PML_SLIDESHOW_MAIN
    )
}

fn id_list_rids<'a>(root: &'a XmlElement, list: &str, entry: &str) -> Vec<&'a str> {
    root.child(list)
        .map(|lst| {
            lst.elements()
                .filter(|e| e.name() == entry)
                .filter_map(|e| e.attr("r:id"))
                .collect()
        })
        .unwrap_or_default()
}

/// Append a `p:sldId` for relationship `r_id`, creating `p:sldIdLst` when
/// the presentation has no slides yet. Returns the new slide id.
pub(crate) fn add_slide_id(root: &mut XmlElement, r_id: &str) -> u32 {
    let lst = root.get_or_insert("p:sldIdLst", &SLD_ID_LST_SUCCESSORS);
    let next_id = lst
        .elements()
        .filter_map(|e| e.attr("id")?.parse::<u32>().ok())
        .max()
        .map_or(MIN_SLIDE_ID, |max| (max + 1).max(MIN_SLIDE_ID));
    lst.push(
        XmlElement::new("p:sldId")
            .with_attr("id", next_id.to_string())
            .with_attr("r:id", r_id),
    );
    next_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::part::XmlPart;

    const PRESENTATION: &str = r#"<p:presentation xmlns:p="p" xmlns:r="r"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst><p:sldId id="256" r:id="rId2"/><p:sldId id="260" r:id="rId3"/></p:sldIdLst><p:sldSz cx="9144000" cy="6858000"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#;

    fn part(xml: &str, content_type: &str) -> XmlPart {
        XmlPart::load(
            PackURI::new("/ppt/presentation.xml").unwrap(),
            content_type,
            xml.as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn test_reads_lists_and_size() {
        let part = part(PRESENTATION, ct::PML_PRESENTATION_MAIN);
        let pres = PresentationPart::from_part(&part).unwrap();
        assert_eq!(pres.slide_rids(), ["rId2", "rId3"]);
        assert_eq!(pres.slide_master_rids(), ["rId1"]);
        assert_eq!(pres.slide_count(), 2);
        assert_eq!(pres.slide_width(), Some(9_144_000));
        assert_eq!(pres.slide_height(), Some(6_858_000));
    }

    #[test]
    fn test_rejects_other_main_parts() {
        let part = part(PRESENTATION, ct::PML_SLIDE);
        assert!(matches!(
            PresentationPart::from_part(&part),
            Err(OoxmlError::InvalidContentType { .. })
        ));
        let template = self::part(PRESENTATION, ct::PML_TEMPLATE_MAIN);
        assert!(PresentationPart::from_part(&template).is_ok());
    }

    #[test]
    fn test_add_slide_id_continues_numbering() {
        let mut root = XmlDocument::parse(PRESENTATION.as_bytes()).unwrap().root().clone();
        assert_eq!(add_slide_id(&mut root, "rId4"), 261);
        let last = root.child("p:sldIdLst").unwrap().elements().last().unwrap();
        assert_eq!(last.attr("r:id"), Some("rId4"));
    }

    #[test]
    fn test_add_slide_id_creates_list_in_order() {
        let xml = r#"<p:presentation xmlns:p="p"><p:sldMasterIdLst/><p:sldSz cx="1" cy="1"/></p:presentation>"#;
        let mut root = XmlDocument::parse(xml.as_bytes()).unwrap().root().clone();
        assert_eq!(add_slide_id(&mut root, "rId2"), 256);
        let names: Vec<&str> = root.elements().map(XmlElement::name).collect();
        assert_eq!(names, ["p:sldMasterIdLst", "p:sldIdLst", "p:sldSz"]);
    }
}
