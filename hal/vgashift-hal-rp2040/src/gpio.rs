//! GPIO outputs for the shift register and sync lines

use embassy_rp::gpio::{Level, Output};
use vgashift_hal::{GpioPort, OutputPin};

use crate::pins::{PinBank, PinError, PIN_COUNT};

/// Output pin driven straight from a driver
pub struct RpOutput(Output<'static>);

impl RpOutput {
    /// Claim `pin` from the bank as an output at `initial` level
    pub fn take(bank: &mut PinBank, pin: u8, initial: bool) -> Result<Self, PinError> {
        let pin = bank.take(pin)?;
        Ok(Self(Output::new(pin, Level::from(initial))))
    }
}

impl OutputPin for RpOutput {
    #[inline(always)]
    fn set_high(&mut self) {
        self.0.set_high();
    }

    #[inline(always)]
    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Number-addressed GPIO port backed by a [`PinBank`]
///
/// Pins are claimed from the bank on [`GpioPort::init_output`]. Writes to
/// a pin that was never initialised, or that the bank no longer held, are
/// dropped.
pub struct RpGpioPort {
    bank: PinBank,
    outputs: [Option<Output<'static>>; PIN_COUNT],
    last_error: Option<PinError>,
}

impl RpGpioPort {
    /// Create a port drawing pins from `bank`
    pub fn new(bank: PinBank) -> Self {
        Self {
            bank,
            outputs: core::array::from_fn(|_| None),
            last_error: None,
        }
    }

    /// Most recent pin claim that failed, if any
    pub fn last_error(&self) -> Option<PinError> {
        self.last_error
    }

    /// Check if `pin` has been set up as an output
    pub fn is_output(&self, pin: u8) -> bool {
        matches!(self.outputs.get(pin as usize), Some(Some(_)))
    }

    /// Bank holding the pins this port has not claimed
    pub fn bank_mut(&mut self) -> &mut PinBank {
        &mut self.bank
    }
}

impl GpioPort for RpGpioPort {
    fn init_output(&mut self, pin: u8) {
        if self.is_output(pin) {
            return;
        }
        match self.bank.take(pin) {
            Ok(p) => self.outputs[pin as usize] = Some(Output::new(p, Level::Low)),
            Err(e) => self.last_error = Some(e),
        }
    }

    #[inline(always)]
    fn set_level(&mut self, pin: u8, high: bool) {
        if let Some(Some(out)) = self.outputs.get_mut(pin as usize) {
            out.set_level(Level::from(high));
        }
    }
}
