//! Hardware abstraction traits
//!
//! These traits define the interface between the timing logic and the
//! driver implementations.

pub mod shift_register;

pub use shift_register::ShiftRegister;
