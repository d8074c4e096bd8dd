//! Raster sync generator
//!
//! Emits one scanline per [`SignalGenerator::step_line`]:
//!
//! 1. vertical sync edge, if the line has one
//! 2. horizontal sync low, hold, high
//! 3. pixel words pushed through the shift register
//! 4. hold for the rest of the line
//!
//! Everything happens on the calling core with busy waits only. The
//! liveness check in [`SignalGenerator::run`] sits between lines.

use vgashift_core::config::{ClockConfig, SignalTiming};
use vgashift_core::signal::{FrameCounter, LineBudget, LinePlan, Liveness};
use vgashift_core::traits::ShiftRegister;
use vgashift_hal::{CycleDelay, OutputPin};

/// Single-core sync and pixel generator
pub struct SignalGenerator<R, H, V, D> {
    register: R,
    hsync: H,
    vsync: V,
    delay: D,
    counter: FrameCounter,
    hsync_cycles: u32,
    hold_cycles: u32,
}

impl<R, H, V, D> SignalGenerator<R, H, V, D>
where
    R: ShiftRegister,
    H: OutputPin,
    V: OutputPin,
    D: CycleDelay,
{
    /// Create a generator and park both sync lines high
    pub fn new(
        register: R,
        mut hsync: H,
        mut vsync: V,
        delay: D,
        timing: SignalTiming,
        clock: ClockConfig,
    ) -> Self {
        hsync.set_high();
        vsync.set_high();

        Self {
            register,
            hsync,
            vsync,
            delay,
            hsync_cycles: clock.ns_to_cycles(timing.hsync_ns),
            hold_cycles: clock.ns_to_cycles(timing.line_hold_ns),
            counter: FrameCounter::new(timing),
        }
    }

    /// Emit exactly one scanline
    #[inline(always)]
    pub fn step_line(&mut self) -> LinePlan {
        let plan = self.counter.advance();

        if let Some(edge) = plan.vsync {
            self.vsync.set_state(edge.level());
        }

        self.hsync.set_low();
        self.delay.wait_at_least_cycles(self.hsync_cycles);
        self.hsync.set_high();

        for word in plan.words() {
            self.register.write_word(word);
        }

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

    /// Emit `lines` scanlines
    pub fn run_lines(&mut self, lines: u32) -> u32 {
        self.run(LineBudget::new(lines))
    }

    /// Emit `frames` frames' worth of lines from the current position
    pub fn run_frames(&mut self, frames: u32) -> u32 {
        let per_frame = self.counter.timing().lines_per_frame as u32;
        self.run_lines(frames.saturating_mul(per_frame))
    }

    /// Emit scanlines until power-off
    pub fn run_forever(&mut self) -> ! {
        loop {
            self.step_line();
        }
    }

    /// Line and pixel counters
    pub fn counter(&self) -> &FrameCounter {
        &self.counter
    }

    /// Shift register being fed
    pub fn register(&self) -> &R {
        &self.register
    }

    /// Busy-wait cycles for the sync pulse and the line hold
    pub fn line_cycles(&self) -> (u32, u32) {
        (self.hsync_cycles, self.hold_cycles)
    }

    /// Take the generator apart
    pub fn into_parts(self) -> (R, H, V, D) {
        (self.register, self.hsync, self.vsync, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{CountingDelay, MockPin, MockRegister};
    use vgashift_core::signal::{StopFlag, VsyncEdge};

    type TestGenerator = SignalGenerator<MockRegister, MockPin, MockPin, CountingDelay>;

    fn generator() -> TestGenerator {
        SignalGenerator::new(
            MockRegister::default(),
            MockPin::default(),
            MockPin::default(),
            CountingDelay::default(),
            SignalTiming::VGA_525,
            ClockConfig::RP2040_125MHZ,
        )
    }

    #[test]
    fn test_sync_lines_idle_high() {
        let gen = generator();
        assert!(gen.hsync.is_set_high());
        assert!(gen.vsync.is_set_high());
        assert_eq!(gen.line_cycles(), (473, 608));
    }

    #[test]
    fn test_first_line() {
        let mut gen = generator();
        let plan = gen.step_line();

        assert_eq!(plan.line, 0);
        assert_eq!(plan.vsync, Some(VsyncEdge::Assert));
        assert!(gen.vsync.is_set_low());

        // One hsync pulse, ending high
        assert_eq!(gen.hsync.falls, 1);
        assert!(gen.hsync.is_set_high());

        assert_eq!(gen.register.words.as_slice(), &[0, 1]);
        assert_eq!(gen.delay.calls, 2);
        assert_eq!(gen.delay.total_cycles, 473 + 608);
    }

    #[test]
    fn test_full_frame() {
        let mut gen = generator();

        for line in 0..525u16 {
            let falls_before = gen.hsync.falls;
            let plan = gen.step_line();

            assert_eq!(plan.line, line);
            assert_eq!(gen.vsync.is_set_low(), line < 3, "vsync on line {}", line);
            assert_eq!(gen.hsync.falls, falls_before + 1);
            assert!(gen.hsync.is_set_high());
        }

        // Rises include parking the line high at construction
        assert_eq!(gen.vsync.falls, 1);
        assert_eq!(gen.vsync.rises, 2);
        assert_eq!(gen.register.word_count, 1050);
        assert_eq!(gen.register.last_word, Some(1049));
        assert_eq!(gen.counter().line(), 0);
        assert_eq!(gen.counter().frames(), 1);
    }

    #[test]
    fn test_pixel_counter_wraps_across_frames() {
        let mut gen = generator();

        // 63 frames = 33075 lines = 66150 words, past 65536
        let lines = gen.run_frames(63);
        assert_eq!(lines, 63 * 525);
        assert_eq!(gen.register.word_count, 66150);
        assert_eq!(gen.register.last_word, Some((66150u32 - 1) as u16));
        assert_eq!(gen.counter().pixel(), (66150u32 % 65536) as u16);
        assert_eq!(gen.counter().frames(), 63);
    }

    #[test]
    fn test_run_lines_is_bounded() {
        let mut gen = generator();
        assert_eq!(gen.run_lines(10), 10);
        assert_eq!(gen.hsync.falls, 10);
        assert_eq!(gen.counter().line(), 10);
        assert_eq!(gen.run_lines(0), 0);
    }

    #[test]
    fn test_stop_flag_halts_between_lines() {
        let stop = StopFlag::new();
        stop.request_stop();

        let mut gen = generator();
        assert_eq!(gen.run(&stop), 0);
        assert_eq!(gen.hsync.falls, 0);

        stop.reset();
        let mut budget = LineBudget::new(3);
        assert_eq!(gen.run(&mut budget), 3);
    }

    #[test]
    fn test_into_parts() {
        let mut gen = generator();
        gen.step_line();
        let (register, hsync, vsync, _delay) = gen.into_parts();
        assert_eq!(register.word_count, 2);
        assert_eq!(hsync.falls, 1);
        assert!(vsync.is_set_low());
    }
}
