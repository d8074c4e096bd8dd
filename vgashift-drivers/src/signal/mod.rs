//! Raster signal generation

pub mod generator;
pub mod split;

pub use generator::SignalGenerator;
pub use split::{LineSink, LineSource, PixelFeeder, SyncTimer};
