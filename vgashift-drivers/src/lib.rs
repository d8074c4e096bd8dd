//! Hardware driver implementations
//!
//! This crate provides the pieces that touch pins and burn cycles:
//!
//! - 74HC595 shift register chain, bit-banged over a [`GpioPort`]
//!   (needs a global allocator for its output shadow)
//! - Raster sync generator driving the chain once per scanline
//! - Split sync/pixel loops for running the two halves on separate cores
//!
//! [`GpioPort`]: vgashift_hal::GpioPort

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod shift_register;
pub mod signal;

#[cfg(test)]
pub(crate) mod mock;
