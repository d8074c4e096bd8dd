//! Cycle-counted busy waits
//!
//! Sync and shift timing is measured in CPU cycles and must never yield
//! to a scheduler. Implementations block the calling core.

/// Busy-wait for a minimum number of CPU cycles
pub trait CycleDelay {
    /// Block for at least `cycles` cycles
    ///
    /// There is no upper bound guarantee. A count of zero may return
    /// immediately.
    fn wait_at_least_cycles(&mut self, cycles: u32);
}

impl<T: CycleDelay + ?Sized> CycleDelay for &mut T {
    #[inline(always)]
    fn wait_at_least_cycles(&mut self, cycles: u32) {
        T::wait_at_least_cycles(self, cycles)
    }
}
