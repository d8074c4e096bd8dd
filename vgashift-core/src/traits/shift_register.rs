//! Serial-in/parallel-out shift register trait

/// A latched serial-to-parallel output chain
///
/// Multi-byte values are transferred least-significant byte first in the
/// input slice. How the bytes reach the wire is up to the implementation.
pub trait ShiftRegister {
    /// Shift out and latch a byte sequence
    ///
    /// An empty slice is a no-op.
    fn write_data(&mut self, bytes: &[u8]);

    /// Reset every output to zero
    fn clear(&mut self);

    /// Enable or disable the parallel output stage
    fn output_enable(&mut self, enabled: bool);

    /// Disable the parallel output stage
    fn output_disable(&mut self) {
        self.output_enable(false);
    }

    /// Write a single byte
    fn write_byte(&mut self, value: u8) {
        self.write_data(&[value]);
    }

    /// Write a 16-bit value as two bytes, low byte first
    fn write_word(&mut self, value: u16) {
        self.write_data(&value.to_le_bytes());
    }

    /// Write a 32-bit value as four bytes, low byte first
    fn write_dword(&mut self, value: u32) {
        self.write_data(&value.to_le_bytes());
    }
}

impl<T: ShiftRegister + ?Sized> ShiftRegister for &mut T {
    fn write_data(&mut self, bytes: &[u8]) {
        T::write_data(self, bytes)
    }

    fn clear(&mut self) {
        T::clear(self)
    }

    fn output_enable(&mut self, enabled: bool) {
        T::output_enable(self, enabled)
    }

    fn write_word(&mut self, value: u16) {
        T::write_word(self, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Records every transfer as-is
    struct Recorder {
        transfers: Vec<Vec<u8, 4>, 8>,
        enabled: bool,
    }

    impl ShiftRegister for Recorder {
        fn write_data(&mut self, bytes: &[u8]) {
            if bytes.is_empty() {
                return;
            }
            let _ = self.transfers.push(Vec::from_slice(bytes).unwrap());
        }

        fn clear(&mut self) {
            self.transfers.clear();
        }

        fn output_enable(&mut self, enabled: bool) {
            self.enabled = enabled;
        }
    }

    #[test]
    fn test_width_decomposition_is_little_endian() {
        let mut reg = Recorder {
            transfers: Vec::new(),
            enabled: true,
        };

        reg.write_byte(0x5A);
        reg.write_word(0x1234);
        reg.write_dword(0xDEAD_BEEF);

        assert_eq!(reg.transfers[0].as_slice(), &[0x5A]);
        assert_eq!(reg.transfers[1].as_slice(), &[0x34, 0x12]);
        assert_eq!(reg.transfers[2].as_slice(), &[0xEF, 0xBE, 0xAD, 0xDE]);
    }

    #[test]
    fn test_output_disable_and_forwarding() {
        let mut reg = Recorder {
            transfers: Vec::new(),
            enabled: true,
        };

        {
            let mut by_ref = &mut reg;
            ShiftRegister::output_disable(&mut by_ref);
            ShiftRegister::write_word(&mut by_ref, 0xBEEF);
        }

        assert!(!reg.enabled);
        assert_eq!(reg.transfers[0].as_slice(), &[0xEF, 0xBE]);

        reg.clear();
        assert!(reg.transfers.is_empty());
    }
}
