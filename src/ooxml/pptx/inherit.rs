/// Placeholder geometry inheritance.
///
/// A slide placeholder inherits from the layout placeholder with the same
/// `idx`; a layout placeholder inherits from the master placeholder of the
/// same base type. Each of the four geometry fields is resolved on its own,
/// so a placeholder may set its size while inheriting its position.
use crate::common::Emu;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::parts::SlideKind;
use crate::ooxml::pptx::shapes::Placeholder;
use crate::ooxml::pptx::shapes::base::direct_value;
use std::fmt;

/// Effective position and size of a placeholder, in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Geometry {
    pub left: Emu,
    pub top: Emu,
    pub width: Emu,
    pub height: Emu,
}

/// One of the four inheritable geometry fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryField {
    Left,
    Top,
    Width,
    Height,
}

impl fmt::Display for GeometryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Top => "top",
            Self::Width => "width",
            Self::Height => "height",
        })
    }
}

/// The placeholder `placeholder` inherits from, `None` for a master
/// placeholder or when the parent part has no matching placeholder.
pub fn base_placeholder<'a>(placeholder: &Placeholder<'a>) -> Result<Option<Placeholder<'a>>> {
    let slide = placeholder.shape().slide();
    let Some(parent) = slide.parent()? else {
        return Ok(None);
    };
    let candidates = parent.placeholders()?;

    let found = match slide.kind() {
        SlideKind::Slide => {
            let idx = placeholder.idx();
            candidates.into_iter().find(|ph| ph.idx() == idx)
        },
        SlideKind::Layout => {
            let base = placeholder.ph_type().base();
            candidates.into_iter().find(|ph| ph.ph_type().base() == base)
        },
        SlideKind::Master => None,
    };
    Ok(found)
}

/// Effective value of `field`: the first value set directly along the chain
/// starting at `placeholder`.
///
/// Fails with [`OoxmlError::PlaceholderNotFound`] when no placeholder in the
/// chain sets the field, including when the chain is broken by a missing
/// part or an unmatched `idx`.
pub fn resolve(placeholder: &Placeholder<'_>, field: GeometryField) -> Result<Emu> {
    let mut current = *placeholder;
    loop {
        if let Some(value) = direct_value(current.element(), field) {
            return Ok(value);
        }
        match base_placeholder(&current) {
            Ok(Some(base)) => current = base,
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(
                    partname = %current.shape().slide().partname(),
                    idx = current.idx(),
                    error = %e,
                    "placeholder inheritance chain broken"
                );
                break;
            },
        }
    }
    Err(OoxmlError::PlaceholderNotFound(format!(
        "no {field} for placeholder idx {} on {}",
        placeholder.idx(),
        placeholder.shape().slide().partname()
    )))
}
