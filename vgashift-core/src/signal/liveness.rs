//! Run/stop control for the timing loop
//!
//! The generator asks a [`Liveness`] once per line whether to keep going.
//! Checks never happen inside a line, so they cannot add jitter to sync
//! edges or bit timing.

use portable_atomic::{AtomicBool, Ordering};

/// Decides whether the timing loop runs another line
pub trait Liveness {
    /// Return false to stop before the next line
    fn keep_running(&mut self) -> bool;
}

impl<T: Liveness + ?Sized> Liveness for &mut T {
    fn keep_running(&mut self) -> bool {
        T::keep_running(self)
    }
}

/// Never stops
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysRun;

impl Liveness for AlwaysRun {
    #[inline(always)]
    fn keep_running(&mut self) -> bool {
        true
    }
}

/// Runs a fixed number of lines, then stops
#[derive(Debug, Clone, Copy)]
pub struct LineBudget {
    remaining: u32,
}

impl LineBudget {
    /// Allow `lines` more lines
    pub const fn new(lines: u32) -> Self {
        Self { remaining: lines }
    }

    /// Lines left in the budget
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl Liveness for LineBudget {
    fn keep_running(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Stop request shared between cores
///
/// Lives in a `static`; one side calls [`request_stop`](Self::request_stop),
/// the loop on the other side polls it through `&StopFlag`.
#[derive(Debug)]
pub struct StopFlag {
    stop: AtomicBool,
}

impl StopFlag {
    /// Create a flag with no stop requested
    pub const fn new() -> Self {
        Self {
            stop: AtomicBool::new(false),
        }
    }

    /// Ask the loop to stop after its current line
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Check if a stop has been requested
    pub fn is_stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Clear a previous stop request
    pub fn reset(&self) {
        self.stop.store(false, Ordering::Release);
    }
}

impl Default for StopFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl Liveness for &StopFlag {
    #[inline(always)]
    fn keep_running(&mut self) -> bool {
        !self.is_stop_requested()
    }
}
