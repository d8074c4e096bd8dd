//! vgashift Hardware Abstraction Layer
//!
//! This crate defines the small set of platform capabilities the shift
//! register driver and the sync generator need. Chip-specific crates
//! implement them so the timing code itself stays board-agnostic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  vgashift-firmware                      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  vgashift-drivers / vgashift-core       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  vgashift-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  vgashift-hal-rp2040                    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::GpioPort`] - numbered digital outputs, initialised on demand
//! - [`gpio::OutputPin`] - a single owned digital output
//! - [`delay::CycleDelay`] - cycle-counted busy wait
//!
//! [`eh`] adapts `embedded-hal` 1.0 pins and delays to these traits.

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod eh;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use delay::CycleDelay;
pub use gpio::{GpioPort, OutputPin, Pin};
