//! Hardware configuration types
//!
//! Pin wiring for the 74HC595 chain and the two sync lines, plus the CPU
//! clock description used to turn nanoseconds into busy-wait cycles.

use vgashift_hal::Pin;

/// Number of user GPIOs on RP2040
pub const GPIO_COUNT: u8 = 30;

/// 74HC595 control lines
///
/// Any line may be left [`Pin::Unassigned`]. The driver then skips the
/// operations that need it and only updates its shadow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hc595Pins {
    /// Serial data input (SER / DS)
    pub serial: Pin,
    /// Shift register clock (SRCLK / SH_CP)
    pub clock: Pin,
    /// Shift register clear, active-low (/SRCLR / MR)
    pub clear: Pin,
    /// Storage register clock / latch (RCLK / ST_CP)
    pub latch: Pin,
    /// Output enable, active-low (/OE)
    pub output_enable: Pin,
}

impl Hc595Pins {
    /// All lines unwired
    pub const fn unassigned() -> Self {
        Self {
            serial: Pin::Unassigned,
            clock: Pin::Unassigned,
            clear: Pin::Unassigned,
            latch: Pin::Unassigned,
            output_enable: Pin::Unassigned,
        }
    }

    /// Build from raw board-table values where `0xFF` means unwired
    pub const fn from_raw(serial: u8, clock: u8, clear: u8, latch: u8, output_enable: u8) -> Self {
        Self {
            serial: Pin::from_raw(serial),
            clock: Pin::from_raw(clock),
            clear: Pin::from_raw(clear),
            latch: Pin::from_raw(latch),
            output_enable: Pin::from_raw(output_enable),
        }
    }

    /// All five lines in a fixed order (serial, clock, clear, latch, OE)
    pub const fn as_array(&self) -> [Pin; 5] {
        [
            self.serial,
            self.clock,
            self.clear,
            self.latch,
            self.output_enable,
        ]
    }

    /// True if both serial data and clock are wired, i.e. bits can be shifted
    pub const fn can_shift(&self) -> bool {
        self.serial.is_assigned() && self.clock.is_assigned()
    }
}

impl Default for Hc595Pins {
    /// Wiring of the reference board: SER=5, SRCLK=2, /SRCLR=3, RCLK=4, /OE unwired
    fn default() -> Self {
        Self::from_raw(5, 2, 3, 4, Pin::UNASSIGNED_RAW)
    }
}

/// Sync output lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalPins {
    /// Horizontal sync GPIO
    pub hsync: u8,
    /// Vertical sync GPIO
    pub vsync: u8,
}

impl Default for SignalPins {
    fn default() -> Self {
        Self { hsync: 1, vsync: 0 }
    }
}

/// CPU clock description for cycle-counted delays
///
/// A delay of `ns` nanoseconds becomes `ns / cycle_ns - overhead_cycles`
/// busy-wait cycles. `overhead_cycles` accounts for the call and loop cost of
/// the wait itself and must be measured per board and optimisation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    /// Length of one CPU cycle in nanoseconds
    pub cycle_ns: u32,
    /// Cycles subtracted from every wait to compensate for call overhead
    pub overhead_cycles: u32,
}

impl ClockConfig {
    /// RP2040 at the default 125 MHz system clock
    pub const RP2040_125MHZ: Self = Self {
        cycle_ns: 8,
        overhead_cycles: 3,
    };

    /// Convert nanoseconds into a busy-wait cycle count
    ///
    /// Saturates at zero when the requested delay is shorter than the
    /// overhead. A zero `cycle_ns` yields zero rather than dividing by zero.
    pub const fn ns_to_cycles(&self, ns: u32) -> u32 {
        if self.cycle_ns == 0 {
            return 0;
        }
        (ns / self.cycle_ns).saturating_sub(self.overhead_cycles)
    }

    /// Clock frequency in kHz
    pub const fn freq_khz(&self) -> u32 {
        if self.cycle_ns == 0 {
            return 0;
        }
        1_000_000 / self.cycle_ns
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::RP2040_125MHZ
    }
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio5" -> Assigned(5)
/// - "5" -> Assigned(5)
/// - "none" or "" -> Unassigned
///
/// Returns `None` for anything else, including out-of-range GPIO numbers.
pub fn parse_pin(s: &str) -> Option<Pin> {
    let s = s.trim();

    if s.is_empty() || s.eq_ignore_ascii_case("none") {
        return Some(Pin::Unassigned);
    }

    let num_str = s.strip_prefix("gpio").unwrap_or(s);
    let pin: u8 = num_str.parse().ok()?;

    if pin >= GPIO_COUNT {
        return None;
    }

    Some(Pin::Assigned(pin))
}
