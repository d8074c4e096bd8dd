//! Raster signal logic
//!
//! Pure scanline bookkeeping and loop control, independent of pins and
//! delays.

pub mod frame;
pub mod liveness;

pub use frame::{FrameCounter, LinePlan, VsyncEdge};
pub use liveness::{AlwaysRun, LineBudget, Liveness, StopFlag};
