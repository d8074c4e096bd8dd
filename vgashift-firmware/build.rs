//! Build script for vgashift-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates board.toml at compile time

use std::collections::BTreeSet;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// GPIOs on the RP2040
const GPIO_COUNT: u8 = 30;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Pin given as `"gpio5"`, `"none"` or a bare number
#[derive(Deserialize)]
#[serde(untagged)]
enum PinValue {
    Number(i64),
    Name(String),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BoardFile {
    #[serde(default)]
    dual_core: bool,
    #[serde(default)]
    shift_register: ShiftRegisterSection,
    #[serde(default)]
    signal: SignalSection,
    #[serde(default)]
    clock: ClockSection,
}

// Timing fields are only type-checked
#[allow(dead_code)]
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ShiftRegisterSection {
    serial_pin: Option<PinValue>,
    clock_pin: Option<PinValue>,
    clear_pin: Option<PinValue>,
    latch_pin: Option<PinValue>,
    output_enable_pin: Option<PinValue>,
    pulse_ns: Option<u32>,
}

// Timing fields are only type-checked
#[allow(dead_code)]
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SignalSection {
    hsync_pin: Option<PinValue>,
    vsync_pin: Option<PinValue>,
    lines_per_frame: Option<u16>,
    vsync_start_line: Option<u16>,
    vsync_end_line: Option<u16>,
    hsync_ns: Option<u32>,
    line_hold_ns: Option<u32>,
    words_per_line: Option<u8>,
}

// Timing fields are only type-checked
#[allow(dead_code)]
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ClockSection {
    cycle_ns: Option<u32>,
    overhead_cycles: Option<u32>,
}

/// Resolve a pin entry to a GPIO number, `None` meaning not wired
fn resolve_pin(
    value: Option<&PinValue>,
    default: Option<u8>,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<u8> {
    let Some(value) = value else {
        return default;
    };

    let number = match value {
        PinValue::Number(n) => Some(*n),
        PinValue::Name(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("none") {
                return None;
            }
            s.strip_prefix("gpio").unwrap_or(s).parse::<i64>().ok()
        }
    };

    match number {
        Some(n) if (0..GPIO_COUNT as i64).contains(&n) => Some(n as u8),
        _ => {
            errors.push(format!("{} must be gpio0-gpio29 or \"none\"", name));
            None
        }
    }
}

/// Validate board.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds board.toml from the vgashift-firmware       ║\n\
            ║  directory. Restore it or create one with the board wiring.      ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => panic!("\nERROR: Failed to read board.toml: {}\n", e),
    };

    let board: BoardFile = match toml::from_str(&content) {
        Ok(board) => board,
        Err(e) => panic!("\nERROR: Invalid board.toml\n\n{}\n", e),
    };

    let errors = check_board(&board);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    if board.dual_core {
        println!("cargo:warning=board.toml selects dual-core pixel feed");
    }
}

/// Same rules as `BoardConfig::validate`, with readable messages
fn check_board(board: &BoardFile) -> Vec<String> {
    let mut errors = Vec::new();
    let sr = &board.shift_register;
    let sig = &board.signal;

    let mut pin = |name: &'static str, value: &Option<PinValue>, default: Option<u8>| {
        (name, resolve_pin(value.as_ref(), default, name, &mut errors))
    };
    let pins = [
        pin("serial_pin", &sr.serial_pin, Some(5)),
        pin("clock_pin", &sr.clock_pin, Some(2)),
        pin("clear_pin", &sr.clear_pin, Some(3)),
        pin("latch_pin", &sr.latch_pin, Some(4)),
        pin("output_enable_pin", &sr.output_enable_pin, None),
        pin("hsync_pin", &sig.hsync_pin, Some(1)),
        pin("vsync_pin", &sig.vsync_pin, Some(0)),
    ];

    for (name, pin) in &pins[5..] {
        if pin.is_none() {
            errors.push(format!("[signal] {} must be wired", name));
        }
    }

    let mut used = BTreeSet::new();
    for (name, pin) in &pins {
        if let Some(pin) = pin {
            if !used.insert(*pin) {
                errors.push(format!("{} reuses gpio{}", name, pin));
            }
        }
    }

    let lines = sig.lines_per_frame.unwrap_or(525);
    let start = sig.vsync_start_line.unwrap_or(0);
    let end = sig.vsync_end_line.unwrap_or(3);
    if lines == 0 {
        errors.push("[signal] lines_per_frame must be at least 1".into());
    }
    if start >= end || end >= lines {
        errors.push(format!(
            "[signal] vsync {}..{} must end before line {}",
            start, end, lines
        ));
    }

    if board.clock.cycle_ns == Some(0) {
        errors.push("[clock] cycle_ns must be non-zero".into());
    }

    errors
}
