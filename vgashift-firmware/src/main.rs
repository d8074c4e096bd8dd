//! vgashift - 74HC595 raster firmware
//!
//! Bit-bangs pixel words into a 74HC595 chain while driving horizontal and
//! vertical sync lines, all timed by cycle-counted busy waits.
//!
//! Wiring and timing come from the embedded board.toml. With the
//! `dual-core` feature and `dual_core = true`, the pixel writes move to
//! core 1 and core 0 only keeps sync.

#![no_std]
#![no_main]

extern crate alloc;

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Instant;
use embedded_alloc::LlffHeap as Heap;
use {defmt_rtt as _, panic_probe as _};

use vgashift_core::traits::ShiftRegister;
use vgashift_drivers::shift_register::Hc595;
use vgashift_drivers::signal::SignalGenerator;
use vgashift_hal_rp2040::{CortexDelay, PinBank, RpGpioPort, RpOutput};

mod config;
#[cfg(feature = "dual-core")]
mod dual_core;

// Heap allocator for the shift register shadow
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 4KB, far more than a 32-chip chain needs
const HEAP_SIZE: usize = 4 * 1024;

/// Shift register as wired on this board
pub(crate) type Register = Hc595<RpGpioPort, CortexDelay>;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("vgashift firmware starting...");

    init_heap();

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    let (bank, spare) = PinBank::from_peripherals(p);
    let mut port = RpGpioPort::new(bank);

    // Sync lines idle high
    let hsync = unwrap!(RpOutput::take(port.bank_mut(), config.signal_pins.hsync, true));
    let vsync = unwrap!(RpOutput::take(port.bank_mut(), config.signal_pins.vsync, true));

    let mut register = Register::new(port, CortexDelay, config.shift_register, config.clock);
    if let Some(e) = register.port().last_error() {
        warn!("Shift register pin unavailable: {:?}", e);
    }
    if !register.pins().can_shift() {
        warn!("Serial or clock line not wired, only the shadow will change");
    }
    register.clear();
    register.output_enable(true);

    info!(
        "74HC595 ready: {} ns pulse = {} cycles at {} kHz",
        register.pulse_ns(),
        register.half_pulse_cycles(),
        config.clock.freq_khz()
    );
    info!("Starting raster at {} us", Instant::now().as_micros());

    if config.dual_core {
        #[cfg(feature = "dual-core")]
        dual_core::run(spare.core1, register, hsync, vsync, &config).await;

        #[cfg(not(feature = "dual-core"))]
        warn!("dual_core set but firmware built without the dual-core feature");
    }
    #[cfg(not(feature = "dual-core"))]
    let _ = spare;

    let mut generator = SignalGenerator::new(
        register,
        hsync,
        vsync,
        CortexDelay,
        config.timing,
        config.clock,
    );

    let (hsync_cycles, hold_cycles) = generator.line_cycles();
    info!(
        "Single-core raster: {} lines/frame, hsync {} cycles, hold {} cycles",
        config.timing.lines_per_frame, hsync_cycles, hold_cycles
    );

    generator.run_forever()
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
