//! Utilities shared by the package and presentation layers.

pub mod unit;
pub mod xml;

pub use unit::Emu;
