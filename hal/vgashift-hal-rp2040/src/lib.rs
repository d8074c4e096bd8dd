//! RP2040-specific HAL for the vgashift video driver
//!
//! Implements the `vgashift-hal` traits on top of embassy-rp:
//!
//! - Number-addressed pin bank for config-driven wiring
//! - GPIO port and output pins
//! - Cycle-counted busy wait

#![no_std]

pub mod delay;
pub mod gpio;
pub mod pins;

pub use delay::CortexDelay;
pub use gpio::{RpGpioPort, RpOutput};
pub use pins::{PinBank, PinError, SparePeripherals, PIN_COUNT};
