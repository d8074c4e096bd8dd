//! Board-agnostic core logic for the vgashift firmware
//!
//! This crate contains the logic that does not depend on a specific chip:
//!
//! - Shift register trait consumed by the sync generator
//! - Scanline state machine (line, vertical sync window, pixel counter)
//! - Run/stop control for the timing loop
//! - Configuration types, nanosecond-to-cycle conversion and validation

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod signal;
pub mod traits;
