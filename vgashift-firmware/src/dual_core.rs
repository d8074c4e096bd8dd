//! Pixel feed on core 1
//!
//! Core 0 keeps the sync lines and pushes one [`LinePlan`] per line into
//! [`LINES`]. Core 1 drains the channel and shifts the words out. A full
//! channel drops the plan and bumps [`OVERRUNS`]; the sync timing never
//! waits on core 1.

use defmt::*;
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::peripherals::CORE1;
use embassy_rp::Peri;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_time::{with_timeout, Duration};
use portable_atomic::{AtomicU32, Ordering};
use static_cell::StaticCell;

use vgashift_core::config::BoardConfig;
use vgashift_core::signal::{LinePlan, StopFlag};
use vgashift_drivers::signal::{LineSink, LineSource, PixelFeeder, SyncTimer};
use vgashift_hal_rp2040::{CortexDelay, RpOutput};

use crate::Register;

/// Lines core 1 may fall behind before plans are dropped
const LINE_QUEUE_DEPTH: usize = 4;

/// How long core 0 waits for core 1 to come up
const FEEDER_READY_TIMEOUT: Duration = Duration::from_millis(100);

/// Plans for lines whose sync pulse has been sent
pub static LINES: Channel<CriticalSectionRawMutex, LinePlan, LINE_QUEUE_DEPTH> = Channel::new();

/// Plans dropped because the channel was full
pub static OVERRUNS: AtomicU32 = AtomicU32::new(0);

/// Stops the pixel feed after its current poll
pub static STOP: StopFlag = StopFlag::new();

/// Raised by core 1 once the feeder owns the shift register
static FEEDER_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();

static CORE1_STACK: StaticCell<Stack<4096>> = StaticCell::new();

/// Core 0 side of [`LINES`]
struct ChannelSink;

impl LineSink for ChannelSink {
    #[inline(always)]
    fn line_started(&mut self, plan: LinePlan) {
        if LINES.try_send(plan).is_err() {
            OVERRUNS.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Core 1 side of [`LINES`]
struct ChannelSource;

impl LineSource for ChannelSource {
    #[inline(always)]
    fn next_line(&mut self) -> Option<LinePlan> {
        LINES.try_receive().ok()
    }
}

/// Hand the shift register to core 1 and run sync timing on this core
pub async fn run(
    core1: Peri<'static, CORE1>,
    register: Register,
    hsync: RpOutput,
    vsync: RpOutput,
    config: &BoardConfig,
) -> ! {
    let stack = CORE1_STACK.init(Stack::new());
    spawn_core1(core1, stack, move || feeder_main(register));

    if with_timeout(FEEDER_READY_TIMEOUT, FEEDER_READY.wait())
        .await
        .is_err()
    {
        warn!("Pixel feeder not ready, starting sync anyway");
    }

    let mut sync = SyncTimer::new(
        hsync,
        vsync,
        CortexDelay,
        ChannelSink,
        config.timing,
        config.clock,
    );

    info!(
        "Dual-core raster: {} lines/frame, {} words/line, hold {} ns",
        config.timing.lines_per_frame, config.timing.words_per_line, config.timing.line_hold_ns
    );

    sync.run_forever()
}

fn feeder_main(register: Register) -> ! {
    let mut feeder = PixelFeeder::new(register, ChannelSource);
    FEEDER_READY.signal(());
    info!("Pixel feeder running on core 1");

    let lines = feeder.run(&STOP);
    info!(
        "Pixel feeder stopped after {} lines, {} overruns",
        lines,
        OVERRUNS.load(Ordering::Relaxed)
    );

    loop {
        cortex_m::asm::wfe();
    }
}
