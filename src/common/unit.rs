//! Length units.
//!
//! DrawingML expresses every position and extent in English Metric Units.

/// A length in English Metric Units.
pub type Emu = i64;

pub const EMUS_PER_INCH: Emu = 914_400;
pub const EMUS_PER_CM: Emu = 360_000;
pub const EMUS_PER_MM: Emu = 36_000;
pub const EMUS_PER_PT: Emu = 12_700;

#[inline]
pub fn inches(value: f64) -> Emu {
    (value * EMUS_PER_INCH as f64).round() as Emu
}

#[inline]
pub fn cm(value: f64) -> Emu {
    (value * EMUS_PER_CM as f64).round() as Emu
}

#[inline]
pub fn mm(value: f64) -> Emu {
    (value * EMUS_PER_MM as f64).round() as Emu
}

#[inline]
pub fn pt(value: f64) -> Emu {
    (value * EMUS_PER_PT as f64).round() as Emu
}

#[inline]
pub fn emu_to_inches(emu: Emu) -> f64 {
    emu as f64 / EMUS_PER_INCH as f64
}

#[inline]
pub fn emu_to_pt(emu: Emu) -> f64 {
    emu as f64 / EMUS_PER_PT as f64
}
