//! Shift register drivers

pub mod hc595;

pub use hc595::Hc595;
pub use vgashift_core::traits::ShiftRegister;
