/// Text frames: paragraphs and runs of a shape's `p:txBody`.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::XmlElement;

/// Deepest paragraph indent level DrawingML allows.
pub const MAX_LEVEL: u8 = 8;

/// Children of `a:p` that follow `a:pPr`.
const P_PR_SUCCESSORS: [&str; 4] = ["a:r", "a:br", "a:fld", "a:endParaRPr"];

/// Text frame of a shape.
///
/// # Examples
///
/// ```rust,no_run
/// use lectern::ooxml::pptx::Package;
///
/// let pkg = Package::open("presentation.pptx")?;
/// let slide = pkg.presentation()?.slide(0)?;
/// for shape in slide.shapes()? {
///     if let Some(tf) = shape.text_frame() {
///         for para in tf.paragraphs() {
///             println!("[{}] {}", para.level(), para.text());
///         }
///     }
/// }
/// # Ok::<(), lectern::OoxmlError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TextFrame<'a> {
    element: &'a XmlElement,
}

impl<'a> TextFrame<'a> {
    #[inline]
    pub(crate) fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    pub fn paragraphs(&self) -> Vec<Paragraph<'a>> {
        self.element
            .elements()
            .filter(|e| e.name() == "a:p")
            .map(|element| Paragraph { element })
            .collect()
    }

    /// Paragraph texts joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs()
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// An `a:p` paragraph.
#[derive(Debug, Clone, Copy)]
pub struct Paragraph<'a> {
    element: &'a XmlElement,
}

impl<'a> Paragraph<'a> {
    /// Indent level from `a:pPr@lvl`, 0 when unset.
    pub fn level(&self) -> u8 {
        self.element
            .child("a:pPr")
            .and_then(|p_pr| p_pr.attr("lvl"))
            .and_then(|lvl| lvl.parse().ok())
            .unwrap_or(0)
    }

    pub fn runs(&self) -> Vec<Run<'a>> {
        self.element
            .elements()
            .filter(|e| e.name() == "a:r")
            .map(|element| Run { element })
            .collect()
    }

    /// Run and field text, with line breaks as vertical tabs.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for child in self.element.elements() {
            match child.name() {
                "a:r" | "a:fld" => {
                    if let Some(t) = child.child("a:t") {
                        text.push_str(&decode_xstring(&t.text()));
                    }
                },
                "a:br" => text.push('\u{b}'),
                _ => {},
            }
        }
        text
    }
}

/// An `a:r` run.
#[derive(Debug, Clone, Copy)]
pub struct Run<'a> {
    element: &'a XmlElement,
}

impl<'a> Run<'a> {
    pub fn text(&self) -> String {
        self.element
            .child("a:t")
            .map(|t| decode_xstring(&t.text()))
            .unwrap_or_default()
    }
}

/// An empty text body: body properties, list style and one paragraph.
pub(crate) fn new_tx_body() -> XmlElement {
    XmlElement::new("p:txBody")
        .with_child(XmlElement::new("a:bodyPr"))
        .with_child(XmlElement::new("a:lstStyle"))
        .with_child(XmlElement::new("a:p"))
}

/// Decode the `_xHHHH_` escapes OOXML writes for characters XML cannot hold.
fn decode_xstring(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find("_x") {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let decoded = tail
            .get(2..6)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .filter(|_| tail.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &tail[7..];
            },
            None => {
                out.push_str("_x");
                rest = &tail[2..];
            },
        }
    }
    out.push_str(rest);
    out
}

fn run(text: &str) -> XmlElement {
    let mut t = XmlElement::new("a:t");
    t.set_text(text);
    XmlElement::new("a:r")
        .with_child(XmlElement::new("a:rPr").with_attr("lang", "en-US").with_attr("dirty", "0"))
        .with_child(t)
}

/// Replace the text of shape element `sp` with `text`, one paragraph per
/// line. A vertical tab becomes an `a:br` line break within the paragraph.
/// The first paragraph keeps its `a:pPr`.
pub(crate) fn set_shape_text(sp: &mut XmlElement, text: &str) -> Result<()> {
    if sp.name() != "p:sp" {
        return Err(OoxmlError::StateMismatch(format!(
            "{} cannot hold text",
            sp.name()
        )));
    }
    if sp.child("p:txBody").is_none() {
        sp.insert_before(new_tx_body(), &["p:extLst"]);
    }
    let tx_body = sp
        .child_mut("p:txBody")
        .ok_or_else(|| OoxmlError::Xml("p:txBody missing after insert".to_string()))?;

    let p_pr = tx_body
        .child("a:p")
        .and_then(|p| p.child("a:pPr"))
        .cloned();
    tx_body.remove_children("a:p");

    for (i, line) in text.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let mut p = XmlElement::new("a:p");
        if i == 0 {
            if let Some(p_pr) = &p_pr {
                p.push(p_pr.clone());
            }
        }
        for (j, segment) in line.split('\u{b}').enumerate() {
            if j > 0 {
                p.push(XmlElement::new("a:br"));
            }
            if !segment.is_empty() {
                p.push(run(segment));
            }
        }
        tx_body.insert_before(p, &["a:extLst"]);
    }
    Ok(())
}

/// Set `a:pPr@lvl` of paragraph `index` in shape element `sp`.
pub(crate) fn set_paragraph_level(sp: &mut XmlElement, index: usize, level: u8) -> Result<()> {
    if level > MAX_LEVEL {
        return Err(OoxmlError::InvalidValue(format!(
            "paragraph level {level} outside 0..={MAX_LEVEL}"
        )));
    }
    let p = sp
        .child_mut("p:txBody")
        .and_then(|tx_body| tx_body.elements_mut().filter(|e| e.name() == "a:p").nth(index))
        .ok_or_else(|| OoxmlError::InvalidValue(format!("no paragraph {index}")))?;

    let p_pr = p.get_or_insert("a:pPr", &P_PR_SUCCESSORS);
    if level == 0 {
        p_pr.remove_attr("lvl");
    } else {
        p_pr.set_attr("lvl", level.to_string());
    }
    Ok(())
}
