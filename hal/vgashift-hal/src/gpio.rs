//! GPIO pin abstractions
//!
//! Two shapes of output are used by the firmware:
//!
//! - [`GpioPort`]: a bank of outputs addressed by pin number. The shift
//!   register driver is configured with pin numbers at runtime, any of which
//!   may be left unwired.
//! - [`OutputPin`]: a single output owned by its user, used for the sync
//!   lines.

/// A GPIO assignment that may be left unwired
///
/// Every operation that would touch an [`Pin::Unassigned`] line becomes a
/// no-op, so partially wired boards keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pin {
    /// Wired to this GPIO number
    Assigned(u8),
    /// Not connected
    #[default]
    Unassigned,
}

impl Pin {
    /// Raw value used by board tables to mark a pin as not connected
    pub const UNASSIGNED_RAW: u8 = 0xFF;

    /// Convert a raw board-table value, treating `0xFF` as unwired
    pub const fn from_raw(raw: u8) -> Self {
        if raw == Self::UNASSIGNED_RAW {
            Pin::Unassigned
        } else {
            Pin::Assigned(raw)
        }
    }

    /// Raw board-table value (`0xFF` when unwired)
    pub const fn raw(self) -> u8 {
        match self {
            Pin::Assigned(id) => id,
            Pin::Unassigned => Self::UNASSIGNED_RAW,
        }
    }

    /// GPIO number, if wired
    pub const fn id(self) -> Option<u8> {
        match self {
            Pin::Assigned(id) => Some(id),
            Pin::Unassigned => None,
        }
    }

    /// Check if the pin is wired
    pub const fn is_assigned(self) -> bool {
        matches!(self, Pin::Assigned(_))
    }
}

impl From<Option<u8>> for Pin {
    fn from(value: Option<u8>) -> Self {
        match value {
            Some(id) => Pin::Assigned(id),
            None => Pin::Unassigned,
        }
    }
}

/// Bank of digital outputs addressed by GPIO number
///
/// Implementations own the actual hardware and must tolerate repeated
/// `init_output` calls for the same pin. Setting the level of a pin that
/// was never initialised is silently ignored.
pub trait GpioPort {
    /// Initialise the pin and switch it to output mode
    fn init_output(&mut self, pin: u8);

    /// Drive the pin to the given level (true = high)
    fn set_level(&mut self, pin: u8, high: bool);

    /// Drive an optional pin, doing nothing when it is unwired
    #[inline(always)]
    fn drive(&mut self, pin: Pin, high: bool) {
        if let Pin::Assigned(id) = pin {
            self.set_level(id, high);
        }
    }
}

impl<T: GpioPort + ?Sized> GpioPort for &mut T {
    fn init_output(&mut self, pin: u8) {
        T::init_output(self, pin)
    }

    #[inline(always)]
    fn set_level(&mut self, pin: u8, high: bool) {
        T::set_level(self, pin, high)
    }
}

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    #[inline(always)]
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_from_raw() {
        assert_eq!(Pin::from_raw(5), Pin::Assigned(5));
        assert_eq!(Pin::from_raw(0), Pin::Assigned(0));
        assert_eq!(Pin::from_raw(0xFF), Pin::Unassigned);

        assert_eq!(Pin::Assigned(4).raw(), 4);
        assert_eq!(Pin::Unassigned.raw(), 0xFF);
    }

    #[test]
    fn test_pin_accessors() {
        assert_eq!(Pin::Assigned(2).id(), Some(2));
        assert_eq!(Pin::Unassigned.id(), None);
        assert!(Pin::Assigned(2).is_assigned());
        assert!(!Pin::Unassigned.is_assigned());
        assert_eq!(Pin::default(), Pin::Unassigned);
        assert_eq!(Pin::from(Some(7)), Pin::Assigned(7));
        assert_eq!(Pin::from(None), Pin::Unassigned);
    }

    struct LevelPort {
        levels: [bool; 4],
    }

    impl GpioPort for LevelPort {
        fn init_output(&mut self, _pin: u8) {}

        fn set_level(&mut self, pin: u8, high: bool) {
            self.levels[pin as usize] = high;
        }
    }

    #[test]
    fn test_drive_skips_unassigned() {
        let mut port = LevelPort { levels: [false; 4] };

        port.drive(Pin::Assigned(1), true);
        port.drive(Pin::Unassigned, true);
        assert_eq!(port.levels, [false, true, false, false]);

        // Through a mutable reference
        let mut by_ref = &mut port;
        GpioPort::drive(&mut by_ref, Pin::Assigned(3), true);
        assert_eq!(port.levels, [false, true, false, true]);
    }
}
