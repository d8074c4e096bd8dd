//! 74HC595 serial-in/parallel-out shift register
//!
//! The chain is bit-banged over plain GPIO. Every half-cycle of every
//! control line (clock high, clock low, clear pulse, latch pulse) lasts the
//! same number of busy-wait cycles, derived once from the configured pulse
//! width.
//!
//! # Wire format
//!
//! A transfer walks the input from its last byte to its first. Each byte is
//! shifted out most significant bit first and latched on its own, so an
//! n-byte write produces n latch pulses. After the transfer the chip nearest
//! the MCU holds `bytes[0]`.
//!
//! # Shadow state
//!
//! The driver keeps a copy of what it last latched. Operations that need an
//! unwired line still update the copy, which is then the only record of the
//! intended output. The copy lives on the heap and grows to the longest
//! write or the highest bit touched; it never shrinks.

use alloc::vec::Vec;
use vgashift_core::config::{ClockConfig, Hc595Config, Hc595Pins};
use vgashift_core::traits::ShiftRegister;
use vgashift_hal::{CycleDelay, GpioPort};

/// 74HC595 chain driver
pub struct Hc595<G, D> {
    port: G,
    delay: D,
    clock: ClockConfig,
    config: Hc595Config,
    /// Busy-wait cycles per half pulse
    half_pulse: u32,
    shadow: Vec<u8>,
    output_enabled: bool,
}

impl<G: GpioPort, D: CycleDelay> Hc595<G, D> {
    /// Create a driver and configure its pins
    pub fn new(port: G, delay: D, config: Hc595Config, clock: ClockConfig) -> Self {
        let mut driver = Self {
            port,
            delay,
            clock,
            config,
            half_pulse: 0,
            shadow: Vec::new(),
            output_enabled: false,
        };
        driver.configure(config);
        driver
    }

    /// Replace the pin wiring and pulse width
    ///
    /// Every wired pin is switched to output mode. Safe to call again; the
    /// shadow buffer and enable flag are kept.
    pub fn configure(&mut self, config: Hc595Config) {
        self.config = config;
        self.half_pulse = self.clock.ns_to_cycles(config.pulse_ns);

        for pin in config.pins.as_array().into_iter().filter_map(|p| p.id()) {
            self.port.init_output(pin);
        }
    }

    /// Active configuration
    pub fn config(&self) -> &Hc595Config {
        &self.config
    }

    /// Active pin wiring
    pub fn pins(&self) -> &Hc595Pins {
        &self.config.pins
    }

    /// Configured pulse width in nanoseconds
    pub fn pulse_ns(&self) -> u32 {
        self.config.pulse_ns
    }

    /// Busy-wait cycles used for every half pulse
    pub fn half_pulse_cycles(&self) -> u32 {
        self.half_pulse
    }

    /// Last latched bytes, index 0 = chip nearest the MCU
    pub fn data(&self) -> &[u8] {
        &self.shadow
    }

    /// Read one output bit from the shadow buffer
    ///
    /// Bits past the end of the buffer read as `false`.
    pub fn bit(&self, bit: usize) -> bool {
        let mask = 1u8 << (bit % 8);
        self.shadow
            .get(bit / 8)
            .map(|byte| byte & mask != 0)
            .unwrap_or(false)
    }

    /// Tracked output-enable state
    pub fn is_output_enabled(&self) -> bool {
        self.output_enabled
    }

    /// Set one output and retransmit the whole chain
    pub fn set_bit(&mut self, bit: usize, value: bool) {
        self.modify_bit(bit, |byte, mask| {
            if value {
                byte | mask
            } else {
                byte & !mask
            }
        });
    }

    /// Clear one output and retransmit the whole chain
    pub fn reset_bit(&mut self, bit: usize) {
        self.set_bit(bit, false);
    }

    /// Invert one output and retransmit the whole chain
    pub fn toggle_bit(&mut self, bit: usize) {
        self.modify_bit(bit, |byte, mask| byte ^ mask);
    }

    /// Write an optional buffer; `None` behaves like an empty write
    pub fn write_data_opt(&mut self, bytes: Option<&[u8]>) {
        if let Some(bytes) = bytes {
            self.transfer(bytes);
        }
    }

    /// GPIO port driving the control lines
    pub fn port(&self) -> &G {
        &self.port
    }

    /// Give back the port and delay
    pub fn release(self) -> (G, D) {
        (self.port, self.delay)
    }

    fn modify_bit(&mut self, bit: usize, f: impl FnOnce(u8, u8) -> u8) {
        let index = bit / 8;
        self.grow_to(index + 1);

        let mask = 1u8 << (bit % 8);
        self.shadow[index] = f(self.shadow[index], mask);

        let snapshot = self.shadow.clone();
        self.transfer(&snapshot);
    }

    /// Extend the shadow with zeros, never shrinking it
    fn grow_to(&mut self, len: usize) {
        if self.shadow.len() < len {
            self.shadow.resize(len, 0);
        }
    }

    fn transfer(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.grow_to(bytes.len());

        let pins = self.config.pins;
        self.port.drive(pins.latch, false);

        for (index, &byte) in bytes.iter().enumerate().rev() {
            self.shadow[index] = byte;
            self.shift_byte(byte);
            self.pulse(pins.latch.id());
        }
    }

    #[inline(always)]
    fn shift_byte(&mut self, byte: u8) {
        let pins = self.config.pins;
        let (Some(serial), Some(clock)) = (pins.serial.id(), pins.clock.id()) else {
            return;
        };

        self.port.set_level(clock, false);
        for bit in (0..8).rev() {
            self.port.set_level(serial, byte & (1 << bit) != 0);
            self.delay.wait_at_least_cycles(self.half_pulse);
            self.port.set_level(clock, true);
            self.delay.wait_at_least_cycles(self.half_pulse);
            self.port.set_level(clock, false);
        }
    }

    /// High for one half pulse, then low
    #[inline(always)]
    fn pulse(&mut self, pin: Option<u8>) {
        if let Some(pin) = pin {
            self.port.set_level(pin, true);
            self.delay.wait_at_least_cycles(self.half_pulse);
            self.port.set_level(pin, false);
        }
    }
}

impl<G: GpioPort, D: CycleDelay> ShiftRegister for Hc595<G, D> {
    fn write_data(&mut self, bytes: &[u8]) {
        self.transfer(bytes);
    }

    /// Pulse the active-low clear line, then zero the shadow
    fn clear(&mut self) {
        if let Some(pin) = self.config.pins.clear.id() {
            self.port.set_level(pin, false);
            self.delay.wait_at_least_cycles(self.half_pulse);
            self.port.set_level(pin, true);
        }
        self.shadow.iter_mut().for_each(|byte| *byte = 0);
    }

    /// Drive /OE to the inverse of `enabled`
    fn output_enable(&mut self, enabled: bool) {
        self.port.drive(self.config.pins.output_enable, !enabled);
        self.output_enabled = enabled;
    }
}
