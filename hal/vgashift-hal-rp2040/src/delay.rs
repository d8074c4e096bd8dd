//! Cycle-counted busy wait

use vgashift_hal::CycleDelay;

/// Busy wait on the core's instruction counter
///
/// Never yields and never touches the timer peripheral, so it is safe to use
/// from either core with interrupts enabled or not.
#[derive(Debug, Clone, Copy, Default)]
pub struct CortexDelay;

impl CycleDelay for CortexDelay {
    #[inline(always)]
    fn wait_at_least_cycles(&mut self, cycles: u32) {
        if cycles > 0 {
            cortex_m::asm::delay(cycles);
        }
    }
}
