//! Test doubles for pins, delays and the shift register chain

use heapless::Vec;
use vgashift_core::config::Hc595Pins;
use vgashift_core::traits::ShiftRegister;
use vgashift_hal::{CycleDelay, GpioPort, OutputPin};

/// GPIO port wired to a simulated 74HC595 chain
///
/// Bits enter on the rising clock edge, the whole chain is copied to the
/// outputs on the rising latch edge, and a low clear line empties the shift
/// stage. Chip 0 is the one nearest the MCU.
pub struct Sim595 {
    pins: Hc595Pins,
    pub levels: [bool; 32],
    pub initialized: u32,
    pub shift: u64,
    pub storage: u64,
    pub clock_edges: u32,
    pub latch_pulses: u32,
    pub clear_pulses: u32,
    pub level_writes: u32,
}

impl Sim595 {
    pub fn new(pins: Hc595Pins) -> Self {
        Self {
            pins,
            levels: [false; 32],
            initialized: 0,
            shift: 0,
            storage: 0,
            clock_edges: 0,
            latch_pulses: 0,
            clear_pulses: 0,
            level_writes: 0,
        }
    }

    /// Parallel output byte of chip `index`
    pub fn output(&self, index: usize) -> u8 {
        (self.storage >> (8 * index)) as u8
    }

    pub fn is_initialized(&self, pin: u8) -> bool {
        self.initialized & (1 << pin) != 0
    }

    pub fn level(&self, pin: u8) -> bool {
        self.levels[pin as usize]
    }
}

impl GpioPort for Sim595 {
    fn init_output(&mut self, pin: u8) {
        self.initialized |= 1 << pin;
    }

    fn set_level(&mut self, pin: u8, high: bool) {
        let was_high = self.levels[pin as usize];
        self.levels[pin as usize] = high;
        self.level_writes += 1;

        let rising = !was_high && high;

        if Some(pin) == self.pins.clock.id() && rising {
            let bit = self
                .pins
                .serial
                .id()
                .map(|p| self.levels[p as usize])
                .unwrap_or(false);
            self.shift = (self.shift << 1) | bit as u64;
            self.clock_edges += 1;
        }
        if Some(pin) == self.pins.latch.id() && rising {
            self.storage = self.shift;
            self.latch_pulses += 1;
        }
        if Some(pin) == self.pins.clear.id() && !high {
            self.shift = 0;
            self.clear_pulses += 1;
        }
    }
}

/// Delay that only counts what it was asked for
#[derive(Default)]
pub struct CountingDelay {
    pub calls: u32,
    pub total_cycles: u64,
    pub last: Option<u32>,
}

impl CycleDelay for CountingDelay {
    fn wait_at_least_cycles(&mut self, cycles: u32) {
        self.calls += 1;
        self.total_cycles += cycles as u64;
        self.last = Some(cycles);
    }
}

/// Output pin counting its edges
#[derive(Default)]
pub struct MockPin {
    pub high: bool,
    pub rises: u32,
    pub falls: u32,
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        if !self.high {
            self.rises += 1;
        }
        self.high = true;
    }

    fn set_low(&mut self) {
        if self.high {
            self.falls += 1;
        }
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Shift register recording the words it receives
#[derive(Default)]
pub struct MockRegister {
    pub words: Vec<u16, 64>,
    pub word_count: u32,
    pub last_word: Option<u16>,
}

impl ShiftRegister for MockRegister {
    fn write_data(&mut self, bytes: &[u8]) {
        if let [lo, hi] = bytes {
            let word = u16::from_le_bytes([*lo, *hi]);
            // Only the first 64 are kept; counts cover everything
            let _ = self.words.push(word);
            self.word_count += 1;
            self.last_word = Some(word);
        }
    }

    fn clear(&mut self) {}

    fn output_enable(&mut self, _enabled: bool) {}
}
