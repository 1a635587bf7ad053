//! Test decks written straight to ZIP so the library reads packages it did
//! not produce itself.
#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

const RT: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const CT: &str = "application/vnd.openxmlformats-officedocument.presentationml";

/// Geometry of a picture placeholder on the test layout.
pub const PICTURE_FRAME: (i64, i64, i64, i64) = (2_743_200, 2_057_400, 3_657_600, 2_743_200);

/// `(kind, ph attributes)` of the unpopulated deck, one slide each.
pub const UNPOPULATED: &[(&str, &str)] = &[
    ("title", r#"type="title""#),
    ("content", r#"idx="1""#),
    ("text", r#"type="body" idx="1""#),
    ("chart", r#"type="chart" idx="1""#),
    ("table", r#"type="tbl" idx="1""#),
    ("smart art", r#"type="dgm" idx="1""#),
    ("media", r#"type="media" idx="1""#),
    ("clip art", r#"type="clipArt" idx="1""#),
    ("picture", r#"type="pic" idx="1""#),
];

/// `(kind, element, ph attributes)` of the populated deck, one slide each.
pub const POPULATED: &[(&str, &str, &str)] = &[
    ("picture", "p:pic", r#"type="pic" idx="1""#),
    ("clip art", "p:pic", r#"type="clipArt" idx="1""#),
    ("table", "p:graphicFrame", r#"type="tbl" idx="1""#),
    ("chart", "p:graphicFrame", r#"type="chart" idx="1""#),
    ("title", "p:sp", r#"type="title""#),
    ("content", "p:sp", r#"idx="1""#),
    ("text", "p:sp", r#"type="body" idx="1""#),
    ("smart art", "p:graphicFrame", r#"type="dgm" idx="1""#),
    ("media", "p:pic", r#"type="media" idx="1""#),
];

fn xfrm((x, y, cx, cy): (i64, i64, i64, i64)) -> String {
    format!(r#"<a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#)
}

/// A `p:sp` placeholder, with its own frame when `frame` is given.
pub fn sp(id: u32, name: &str, ph: &str, frame: Option<(i64, i64, i64, i64)>) -> String {
    let sp_pr = frame.map(xfrm).unwrap_or_default();
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph {ph}/></p:nvPr></p:nvSpPr><p:spPr>{sp_pr}</p:spPr><p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody></p:sp>"#
    )
}

/// A `p:sp` placeholder with its own size but no offset.
pub fn sized_sp(id: u32, name: &str, ph: &str, (cx, cy): (i64, i64)) -> String {
    sp(id, name, ph, None).replacen(
        "<p:spPr></p:spPr>",
        &format!(r#"<p:spPr><a:xfrm><a:ext cx="{cx}" cy="{cy}"/></a:xfrm></p:spPr>"#),
        1,
    )
}

fn populated(id: u32, element: &str, ph: &str) -> String {
    let name = format!("Placeholder {}", id - 1);
    match element {
        "p:pic" => format!(
            r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="{name}"/><p:cNvPicPr><a:picLocks noGrp="1"/></p:cNvPicPr><p:nvPr><p:ph {ph}/></p:nvPr></p:nvPicPr><p:blipFill><a:blip r:embed="rId2"/><a:srcRect l="10000" r="10000"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr/></p:pic>"#
        ),
        "p:graphicFrame" => format!(
            r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="{id}" name="{name}"/><p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr><p:ph {ph}/></p:nvPr></p:nvGraphicFramePr><p:xfrm/><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"/></a:graphic></p:graphicFrame>"#
        ),
        _ => sp(id, &name, ph, None),
    }
}

fn slide_xml(root: &str, name: Option<&str>, shapes: &str, tail: &str) -> String {
    let name = name.map(|n| format!(r#" name="{n}""#)).unwrap_or_default();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><{root} {NS}><p:cSld{name}><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{shapes}</p:spTree></p:cSld>{tail}</{root}>"#
    )
}

fn rels(entries: &[(&str, &str, &str)]) -> String {
    let body: String = entries
        .iter()
        .map(|(id, kind, target)| {
            format!(r#"<Relationship Id="{id}" Type="{RT}/{kind}" Target="{target}"/>"#)
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{body}</Relationships>"#
    )
}

/// A deck with one master, one layout and the given slide shape trees.
///
/// Master: title (457200, 274638, 8229600, 1143000) and body idx 1
/// (1110444, 1686508, 6923112, 3484984).
/// Layout: title without a frame, object idx 1 with its own frame and a
/// picture placeholder idx 10 at [`PICTURE_FRAME`].
pub struct DeckBuilder {
    slides: Vec<String>,
    media: Vec<(String, Vec<u8>)>,
}

impl DeckBuilder {
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            media: Vec::new(),
        }
    }

    /// Add a slide holding `shapes`; ids 2.. are the caller's to pick.
    pub fn slide(mut self, shapes: impl Into<String>) -> Self {
        self.slides.push(shapes.into());
        self
    }

    pub fn media(mut self, name: &str, blob: Vec<u8>) -> Self {
        self.media.push((name.to_string(), blob));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        let mut put = |name: &str, body: &[u8]| {
            zip.start_file(name, options).unwrap();
            zip.write_all(body).unwrap();
        };

        let mut overrides = String::new();
        for (name, kind) in [
            ("/ppt/presentation.xml", "presentation.main+xml"),
            ("/ppt/slideMasters/slideMaster1.xml", "slideMaster+xml"),
            ("/ppt/slideLayouts/slideLayout1.xml", "slideLayout+xml"),
        ] {
            overrides.push_str(&format!(
                r#"<Override PartName="{name}" ContentType="{CT}.{kind}"/>"#
            ));
        }
        for n in 1..=self.slides.len() {
            overrides.push_str(&format!(
                r#"<Override PartName="/ppt/slides/slide{n}.xml" ContentType="{CT}.slide+xml"/>"#
            ));
        }
        put(
            "[Content_Types].xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Default Extension="emf" ContentType="image/x-emf"/>{overrides}</Types>"#
            )
            .as_bytes(),
        );
        put(
            "_rels/.rels",
            rels(&[("rId1", "officeDocument", "ppt/presentation.xml")]).as_bytes(),
        );

        let mut pres_rels = vec![(
            "rId1".to_string(),
            "slideMaster",
            "slideMasters/slideMaster1.xml".to_string(),
        )];
        let mut sld_ids = String::new();
        for n in 1..=self.slides.len() {
            pres_rels.push((format!("rId{}", n + 1), "slide", format!("slides/slide{n}.xml")));
            sld_ids.push_str(&format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + n, n + 1));
        }
        put(
            "ppt/presentation.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation {NS}><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst>{sld_ids}</p:sldIdLst><p:sldSz cx="9144000" cy="6858000"/><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#
            )
            .as_bytes(),
        );
        let pres_rels: Vec<(&str, &str, &str)> = pres_rels
            .iter()
            .map(|(id, kind, target)| (id.as_str(), *kind, target.as_str()))
            .collect();
        put("ppt/_rels/presentation.xml.rels", rels(&pres_rels).as_bytes());

        let master_shapes = [
            sp(2, "Title Placeholder 1", r#"type="title""#, Some((457_200, 274_638, 8_229_600, 1_143_000))),
            sp(3, "Text Placeholder 2", r#"type="body" idx="1""#, Some((1_110_444, 1_686_508, 6_923_112, 3_484_984))),
        ]
        .concat();
        put(
            "ppt/slideMasters/slideMaster1.xml",
            slide_xml(
                "p:sldMaster",
                None,
                &master_shapes,
                r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
            )
            .as_bytes(),
        );
        put(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            rels(&[("rId1", "slideLayout", "../slideLayouts/slideLayout1.xml")]).as_bytes(),
        );

        let layout_shapes = [
            sp(2, "Title 1", r#"type="title""#, None),
            sp(3, "Content Placeholder 2", r#"idx="1""#, Some((468_312, 1_700_212, 8_208_143, 4_537_099))),
            sp(4, "Picture Placeholder 3", r#"type="pic" idx="10""#, Some(PICTURE_FRAME)),
        ]
        .concat();
        put(
            "ppt/slideLayouts/slideLayout1.xml",
            slide_xml("p:sldLayout", Some("Picture with Content"), &layout_shapes, "").as_bytes(),
        );
        put(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            rels(&[("rId1", "slideMaster", "../slideMasters/slideMaster1.xml")]).as_bytes(),
        );

        for (n, shapes) in self.slides.iter().enumerate() {
            let n = n + 1;
            put(
                &format!("ppt/slides/slide{n}.xml"),
                slide_xml("p:sld", None, shapes, "").as_bytes(),
            );
            let mut slide_rels = vec![("rId1", "slideLayout", "../slideLayouts/slideLayout1.xml".to_string())];
            if let Some((name, _)) = self.media.first() {
                slide_rels.push(("rId2", "image", format!("../media/{name}")));
            }
            let slide_rels: Vec<(&str, &str, &str)> = slide_rels
                .iter()
                .map(|(id, kind, target)| (*id, *kind, target.as_str()))
                .collect();
            put(
                &format!("ppt/slides/_rels/slide{n}.xml.rels"),
                rels(&slide_rels).as_bytes(),
            );
        }
        for (name, blob) in &self.media {
            put(&format!("ppt/media/{name}"), blob);
        }

        zip.finish().unwrap().into_inner()
    }
}

/// Slide 1: a title without a frame and an object placeholder idx 10 with
/// its own frame. Slide 2: an unpopulated picture placeholder idx 10.
/// Slide 3: a picture placeholder idx 10 sized 111 x 222 but not placed,
/// and a body placeholder idx 7 the layout has no slot for. Slide 4:
/// another unpopulated picture placeholder idx 10.
pub fn inherit_props_deck() -> Vec<u8> {
    DeckBuilder::new()
        .slide(
            [
                sp(2, "Title 1", r#"type="title""#, None),
                sp(3, "Content Placeholder 2", r#"idx="10""#, Some((468_312, 1_700_212, 8_208_143, 4_537_099))),
            ]
            .concat(),
        )
        .slide(sp(2, "Picture Placeholder 1", r#"type="pic" idx="10""#, None))
        .slide(
            [
                sized_sp(2, "Picture Placeholder 1", r#"type="pic" idx="10""#, (111, 222)),
                sp(3, "Text Placeholder 2", r#"type="body" idx="7""#, None),
            ]
            .concat(),
        )
        .slide(sp(2, "Picture Placeholder 1", r#"type="pic" idx="10""#, None))
        .build()
}

/// Leading bytes of an EMF file: the `EMR_HEADER` record type and size.
pub const EMF: &[u8] = &[1, 0, 0, 0, 108, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

/// One slide holding a picture placeholder filled with [`EMF`].
pub fn metafile_deck() -> Vec<u8> {
    DeckBuilder::new()
        .media("image1.emf", EMF.to_vec())
        .slide(populated(2, "p:pic", r#"type="pic" idx="1""#))
        .build()
}

pub fn unpopulated_deck() -> Vec<u8> {
    UNPOPULATED
        .iter()
        .fold(DeckBuilder::new(), |deck, (kind, ph)| {
            deck.slide(sp(2, &format!("{kind} 1"), ph, None))
        })
        .build()
}

pub fn populated_deck() -> Vec<u8> {
    POPULATED
        .iter()
        .fold(DeckBuilder::new().media("image1.png", png(8, 6)), |deck, (_, element, ph)| {
            deck.slide(populated(2, element, ph))
        })
        .build()
}

/// Position of the slide holding `kind` in the unpopulated or populated deck.
pub fn slide_index(populated: bool, kind: &str) -> Option<usize> {
    if populated {
        POPULATED.iter().position(|(k, _, _)| *k == kind)
    } else {
        UNPOPULATED.iter().position(|(k, _)| *k == kind)
    }
}

/// A black PNG of the given pixel size.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}
