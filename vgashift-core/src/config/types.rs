//! Configuration type definitions
//!
//! Driver, signal and board configuration. Values are fixed at start-up;
//! nothing here is persisted.

use heapless::Vec;
use vgashift_hal::Pin;

use super::hardware::{ClockConfig, Hc595Pins, SignalPins, GPIO_COUNT};

/// Default half-cycle pulse width for the 74HC595 control lines
pub const DEFAULT_PULSE_NS: u32 = 40;

/// Line hold used when pixel words are fed from the second core
///
/// With the pixel writes moved off the sync core, the hold covers the whole
/// active part of the line.
pub const DUAL_CORE_LINE_HOLD_NS: u32 = 27_890;

/// Pixel words per line when fed from the second core
pub const DUAL_CORE_WORDS_PER_LINE: u8 = 1;

/// Configuration error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// GPIO number outside the chip's range
    InvalidPin(u8),
    /// The same GPIO is used for two functions
    DuplicatePin(u8),
    /// Frame must contain at least one line
    EmptyFrame,
    /// Vertical sync window is empty or its release line is not in the frame
    InvalidVsyncWindow,
    /// Clock cycle length of zero
    InvalidClock,
}

/// 74HC595 driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hc595Config {
    /// Control line wiring
    pub pins: Hc595Pins,
    /// Width of every half-cycle on every control line, in nanoseconds
    pub pulse_ns: u32,
}

impl Hc595Config {
    /// Create a configuration from pins and pulse width
    pub const fn new(pins: Hc595Pins, pulse_ns: u32) -> Self {
        Self { pins, pulse_ns }
    }

    /// Configuration with no lines wired (software-only shadow)
    pub const fn unwired() -> Self {
        Self::new(Hc595Pins::unassigned(), DEFAULT_PULSE_NS)
    }
}

impl Default for Hc595Config {
    fn default() -> Self {
        Self::new(Hc595Pins::default(), DEFAULT_PULSE_NS)
    }
}

/// Raster timing
///
/// Durations are busy-wait budgets, not wall-clock guarantees. They must be
/// calibrated against the real clock to meet the monitor's sync tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalTiming {
    /// Lines per frame, including blanking
    pub lines_per_frame: u16,
    /// Line on which vertical sync is asserted (driven low)
    pub vsync_start_line: u16,
    /// Line on which vertical sync is released (driven high)
    pub vsync_end_line: u16,
    /// Horizontal sync pulse hold, in nanoseconds
    pub hsync_ns: u32,
    /// Hold after the pixel words, in nanoseconds
    pub line_hold_ns: u32,
    /// Pixel words written per line
    pub words_per_line: u8,
}

impl SignalTiming {
    /// 525-line frame with a 3-line vertical sync
    pub const VGA_525: Self = Self {
        lines_per_frame: 525,
        vsync_start_line: 0,
        vsync_end_line: 3,
        hsync_ns: 3810,
        line_hold_ns: 4890,
        words_per_line: 2,
    };

    /// Check the vertical sync window against the frame length
    ///
    /// The release line must be a real line of the frame, otherwise vsync
    /// would never be driven high again.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lines_per_frame == 0 {
            return Err(ConfigError::EmptyFrame);
        }
        if self.vsync_start_line >= self.vsync_end_line
            || self.vsync_end_line >= self.lines_per_frame
        {
            return Err(ConfigError::InvalidVsyncWindow);
        }
        Ok(())
    }
}

impl Default for SignalTiming {
    fn default() -> Self {
        Self::VGA_525
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// Shift register wiring and pulse width
    pub shift_register: Hc595Config,
    /// Sync line wiring
    pub signal_pins: SignalPins,
    /// Raster timing
    pub timing: SignalTiming,
    /// CPU clock for delay conversion
    pub clock: ClockConfig,
    /// Feed pixel words from the second core
    pub dual_core: bool,
}

impl BoardConfig {
    /// Validate the whole configuration
    ///
    /// Checks that every wired GPIO exists and is used only once, that the
    /// raster timing is consistent, and that the clock is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut used: Vec<u8, 8> = Vec::new();

        let sync = [
            Pin::Assigned(self.signal_pins.hsync),
            Pin::Assigned(self.signal_pins.vsync),
        ];
        let all = self.shift_register.pins.as_array().into_iter().chain(sync);

        for pin in all.filter_map(Pin::id) {
            if pin >= GPIO_COUNT {
                return Err(ConfigError::InvalidPin(pin));
            }
            if used.contains(&pin) {
                return Err(ConfigError::DuplicatePin(pin));
            }
            // Capacity covers all seven lines
            let _ = used.push(pin);
        }

        self.timing.validate()?;

        if self.clock.cycle_ns == 0 {
            return Err(ConfigError::InvalidClock);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_board_is_valid() {
        let config = BoardConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.shift_register.pulse_ns, 40);
        assert_eq!(config.timing.lines_per_frame, 525);
        assert!(!config.dual_core);
    }

    #[test]
    fn test_duplicate_pin_rejected() {
        let mut config = BoardConfig::default();
        // hsync collides with the shift register clock
        config.signal_pins.hsync = 2;
        assert_eq!(config.validate(), Err(ConfigError::DuplicatePin(2)));
    }

    #[test]
    fn test_out_of_range_pin_rejected() {
        let mut config = BoardConfig::default();
        config.shift_register.pins.output_enable = Pin::Assigned(40);
        assert_eq!(config.validate(), Err(ConfigError::InvalidPin(40)));
    }

    #[test]
    fn test_unwired_driver_is_valid() {
        let config = BoardConfig {
            shift_register: Hc595Config::unwired(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_vsync_window() {
        let mut timing = SignalTiming::default();
        assert_eq!(timing.validate(), Ok(()));

        timing.vsync_end_line = 0;
        assert_eq!(timing.validate(), Err(ConfigError::InvalidVsyncWindow));

        timing.vsync_end_line = 526;
        assert_eq!(timing.validate(), Err(ConfigError::InvalidVsyncWindow));

        // Release on line 525 would never happen in a 525-line frame
        timing.vsync_start_line = 500;
        timing.vsync_end_line = 525;
        assert_eq!(timing.validate(), Err(ConfigError::InvalidVsyncWindow));

        timing.vsync_end_line = 524;
        assert_eq!(timing.validate(), Ok(()));

        timing.lines_per_frame = 0;
        assert_eq!(timing.validate(), Err(ConfigError::EmptyFrame));
    }

    #[test]
    fn test_zero_clock_rejected() {
        let mut config = BoardConfig::default();
        config.clock.cycle_ns = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidClock));
    }
}
