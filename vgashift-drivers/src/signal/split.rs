//! Sync and pixel loops for two cores
//!
//! [`SyncTimer`] owns the sync lines and the line counter. At the end of
//! each horizontal sync pulse it hands the line's [`LinePlan`] to a
//! [`LineSink`]. [`PixelFeeder`] runs on the other core, pulls plans from a
//! [`LineSource`] and shifts out the words they carry.
//!
//! The queue between them is supplied by the caller and must be safe to
//! share between cores.

use vgashift_core::config::{ClockConfig, SignalTiming};
use vgashift_core::signal::{FrameCounter, LinePlan, Liveness};
use vgashift_core::traits::ShiftRegister;
use vgashift_hal::{CycleDelay, OutputPin};

/// Receives a plan each time a line starts
pub trait LineSink {
    /// Called right after the horizontal sync pulse; must not block
    fn line_started(&mut self, plan: LinePlan);
}

/// Yields plans for lines whose pixels are due
pub trait LineSource {
    /// Next pending line, or `None` if nothing is queued
    fn next_line(&mut self) -> Option<LinePlan>;
}

impl<T: LineSink + ?Sized> LineSink for &mut T {
    fn line_started(&mut self, plan: LinePlan) {
        T::line_started(self, plan)
    }
}

impl<T: LineSource + ?Sized> LineSource for &mut T {
    fn next_line(&mut self) -> Option<LinePlan> {
        T::next_line(self)
    }
}

/// Sync half of the raster: sync pulses and line pacing only
pub struct SyncTimer<H, V, D, S> {
    hsync: H,
    vsync: V,
    delay: D,
    sink: S,
    counter: FrameCounter,
    hsync_cycles: u32,
    hold_cycles: u32,
}

impl<H, V, D, S> SyncTimer<H, V, D, S>
where
    H: OutputPin,
    V: OutputPin,
    D: CycleDelay,
    S: LineSink,
{
    /// Create a timer and park both sync lines high
    pub fn new(
        mut hsync: H,
        mut vsync: V,
        delay: D,
        sink: S,
        timing: SignalTiming,
        clock: ClockConfig,
    ) -> Self {
        hsync.set_high();
        vsync.set_high();

        Self {
            hsync,
            vsync,
            delay,
            sink,
            hsync_cycles: clock.ns_to_cycles(timing.hsync_ns),
            hold_cycles: clock.ns_to_cycles(timing.line_hold_ns),
            counter: FrameCounter::new(timing),
        }
    }

    /// Emit one line's sync and notify the sink
    #[inline(always)]
    pub fn step_line(&mut self) -> LinePlan {
        let plan = self.counter.advance();

        if let Some(edge) = plan.vsync {
            self.vsync.set_state(edge.level());
        }

        self.hsync.set_low();
        self.delay.wait_at_least_cycles(self.hsync_cycles);
        self.hsync.set_high();

        self.sink.line_started(plan);

        self.delay.wait_at_least_cycles(self.hold_cycles);
        plan
    }

    /// Emit lines while `liveness` allows, returning how many were emitted
    pub fn run<L: Liveness>(&mut self, mut liveness: L) -> u32 {
        let mut lines = 0u32;
        while liveness.keep_running() {
            self.step_line();
            lines = lines.wrapping_add(1);
        }
        lines
    }

    /// Emit lines until power-off
    pub fn run_forever(&mut self) -> ! {
        loop {
            self.step_line();
        }
    }

    /// Line counters
    pub fn counter(&self) -> &FrameCounter {
        &self.counter
    }

    /// Sink receiving line plans
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Pixel half of the raster: writes queued words to the shift register
pub struct PixelFeeder<R, Q> {
    register: R,
    source: Q,
    lines: u32,
}

impl<R: ShiftRegister, Q: LineSource> PixelFeeder<R, Q> {
    /// Create a feeder
    pub fn new(register: R, source: Q) -> Self {
        Self {
            register,
            source,
            lines: 0,
        }
    }

    /// Write the next queued line, if any
    ///
    /// Returns true if a line was written.
    #[inline(always)]
    pub fn poll(&mut self) -> bool {
        match self.source.next_line() {
            Some(plan) => {
                for word in plan.words() {
                    self.register.write_word(word);
                }
                self.lines = self.lines.wrapping_add(1);
                true
            }
            None => false,
        }
    }

    /// Poll until `liveness` says stop, returning lines written by this call
    ///
    /// Liveness is checked once per poll, whether or not a line was queued.
    pub fn run<L: Liveness>(&mut self, mut liveness: L) -> u32 {
        let start = self.lines;
        while liveness.keep_running() {
            self.poll();
        }
        self.lines.wrapping_sub(start)
    }

    /// Total lines written
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Shift register being fed
    pub fn register(&self) -> &R {
        &self.register
    }

    /// Take the feeder apart
    pub fn into_parts(self) -> (R, Q) {
        (self.register, self.source)
    }
}
