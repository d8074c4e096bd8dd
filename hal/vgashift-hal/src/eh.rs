//! Adapters for `embedded-hal` 1.0 peripherals
//!
//! Lets any chip HAL that speaks `embedded-hal` drive the sync lines or
//! provide the busy wait. Pin errors are dropped: the timing code has no
//! error path, and GPIO writes are infallible on every supported chip.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin as EhOutputPin;

use crate::delay::CycleDelay;
use crate::gpio::OutputPin;

/// Wraps an `embedded-hal` output pin and remembers the last level written
pub struct EhOutput<P> {
    pin: P,
    high: bool,
}

impl<P: EhOutputPin> EhOutput<P> {
    /// Wrap a pin, assuming it currently drives low
    pub fn new(pin: P) -> Self {
        Self { pin, high: false }
    }

    /// Return the wrapped pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: EhOutputPin> OutputPin for EhOutput<P> {
    #[inline(always)]
    fn set_high(&mut self) {
        let _ = self.pin.set_high();
        self.high = true;
    }

    #[inline(always)]
    fn set_low(&mut self) {
        let _ = self.pin.set_low();
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Turns a nanosecond `DelayNs` into a [`CycleDelay`]
///
/// `cycle_ns` is the CPU cycle period, e.g. 8 for a 125 MHz core.
pub struct EhCycleDelay<D> {
    delay: D,
    cycle_ns: u32,
}

impl<D: DelayNs> EhCycleDelay<D> {
    /// Create a cycle delay for a core with the given cycle period
    pub fn new(delay: D, cycle_ns: u32) -> Self {
        Self { delay, cycle_ns }
    }
}

impl<D: DelayNs> CycleDelay for EhCycleDelay<D> {
    fn wait_at_least_cycles(&mut self, cycles: u32) {
        if cycles == 0 {
            return;
        }
        self.delay.delay_ns(cycles.saturating_mul(self.cycle_ns));
    }
}
