//! Built-in default presentation.
//!
//! A 4:3 presentation with no slides, one slide master (title, body, date,
//! footer and slide number placeholders) and two layouts: "Title Slide"
//! and "Title and Content". The part bodies live under `resources/`.
use crate::ooxml::error::Result;
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::part::PartFactory;

macro_rules! resource {
    ($path:literal) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/resources/", $path))
    };
}

/// One part of the template with its relationships as
/// `(rId, relationship type, relative target)`.
struct TemplatePart {
    partname: &'static str,
    content_type: &'static str,
    body: &'static str,
    rels: &'static [(&'static str, &'static str, &'static str)],
}

const PACKAGE_RELS: &[(&str, &str, &str)] = &[
    ("rId1", rt::OFFICE_DOCUMENT, "ppt/presentation.xml"),
    ("rId2", rt::CORE_PROPERTIES, "docProps/core.xml"),
];

const PARTS: &[TemplatePart] = &[
    TemplatePart {
        partname: "/ppt/presentation.xml",
        content_type: ct::PML_PRESENTATION_MAIN,
        body: resource!("presentation.xml"),
        rels: &[
            ("rId1", rt::SLIDE_MASTER, "slideMasters/slideMaster1.xml"),
            ("rId2", rt::PRES_PROPS, "presProps.xml"),
            ("rId3", rt::VIEW_PROPS, "viewProps.xml"),
            ("rId4", rt::THEME, "theme/theme1.xml"),
            ("rId5", rt::TABLE_STYLES, "tableStyles.xml"),
        ],
    },
    TemplatePart {
        partname: "/ppt/slideMasters/slideMaster1.xml",
        content_type: ct::PML_SLIDE_MASTER,
        body: resource!("slideMasters/slideMaster1.xml"),
        rels: &[
            ("rId1", rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
            ("rId2", rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout2.xml"),
            ("rId3", rt::THEME, "../theme/theme1.xml"),
        ],
    },
    TemplatePart {
        partname: "/ppt/slideLayouts/slideLayout1.xml",
        content_type: ct::PML_SLIDE_LAYOUT,
        body: resource!("slideLayouts/slideLayout1.xml"),
        rels: &[("rId1", rt::SLIDE_MASTER, "../slideMasters/slideMaster1.xml")],
    },
    TemplatePart {
        partname: "/ppt/slideLayouts/slideLayout2.xml",
        content_type: ct::PML_SLIDE_LAYOUT,
        body: resource!("slideLayouts/slideLayout2.xml"),
        rels: &[("rId1", rt::SLIDE_MASTER, "../slideMasters/slideMaster1.xml")],
    },
    TemplatePart {
        partname: "/ppt/theme/theme1.xml",
        content_type: ct::OFC_THEME,
        body: resource!("theme/theme1.xml"),
        rels: &[],
    },
    TemplatePart {
        partname: "/ppt/presProps.xml",
        content_type: ct::PML_PRES_PROPS,
        body: resource!("presProps.xml"),
        rels: &[],
    },
    TemplatePart {
        partname: "/ppt/viewProps.xml",
        content_type: ct::PML_VIEW_PROPS,
        body: resource!("viewProps.xml"),
        rels: &[],
    },
    TemplatePart {
        partname: "/ppt/tableStyles.xml",
        content_type: ct::PML_TABLE_STYLES,
        body: resource!("tableStyles.xml"),
        rels: &[],
    },
    TemplatePart {
        partname: "/docProps/core.xml",
        content_type: ct::OPC_CORE_PROPERTIES,
        body: resource!("docProps/core.xml"),
        rels: &[],
    },
];

/// A fresh in-memory copy of the default presentation.
pub(crate) fn default_package() -> Result<OpcPackage> {
    let mut package = OpcPackage::new();
    for (r_id, reltype, target) in PACKAGE_RELS {
        package.rels_mut().add(*r_id, *reltype, *target, false);
    }

    for template in PARTS {
        let partname = PackURI::new(template.partname)
            .map_err(crate::ooxml::opc::error::OpcError::InvalidPackUri)?;
        let mut part = PartFactory::load(
            partname,
            template.content_type,
            template.body.as_bytes().to_vec(),
        )?;
        for (r_id, reltype, target) in template.rels {
            part.rels_mut().add(*r_id, *reltype, *target, false);
        }
        package.add_part(part);
    }

    tracing::debug!(parts = package.part_count(), "built default presentation");
    Ok(package)
}
