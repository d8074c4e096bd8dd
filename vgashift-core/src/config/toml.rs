//! Minimal TOML reader for the board file
//!
//! Handles only the subset the board file uses. It does NOT support the
//! full TOML grammar.
//!
//! Supported:
//! - `key = value` pairs (quoted or bare strings, integers, booleans)
//! - `[shift_register]`, `[signal]` and `[clock]` section headers
//! - Comments (`# ...`), including after a value
//!
//! Unknown keys are ignored so that newer board files still load. Unknown
//! sections are rejected.

use heapless::String;
use vgashift_hal::Pin;

use super::hardware::parse_pin;
use super::types::{BoardConfig, DUAL_CORE_LINE_HOLD_NS, DUAL_CORE_WORDS_PER_LINE};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Pin string is not `gpioN`, `N` or `none`
    InvalidPin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    ShiftRegister,
    Signal,
    Clock,
}

/// Parse a board file into a [`BoardConfig`]
///
/// Keys that are absent keep their [`BoardConfig::default`] value, except
/// under `dual_core = true`: a missing `line_hold_ns` becomes
/// [`DUAL_CORE_LINE_HOLD_NS`] and a missing `words_per_line` becomes
/// [`DUAL_CORE_WORDS_PER_LINE`]. The result is not validated; call
/// [`BoardConfig::validate`] on it.
pub fn parse_board_config(input: &str) -> Result<BoardConfig, ParseError> {
    let mut config = BoardConfig::default();
    let mut section = Section::Root;
    let mut line_hold_given = false;
    let mut words_given = false;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = line
                .split('#')
                .next()
                .map(str::trim)
                .and_then(|h| h.strip_prefix('['))
                .and_then(|h| h.strip_suffix(']'))
                .ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(header)?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            if section == Section::Signal {
                line_hold_given |= key == "line_hold_ns";
                words_given |= key == "words_per_line";
            }
            apply_value(section, key, value, &mut config)?;
        }
    }

    if config.dual_core {
        if !line_hold_given {
            config.timing.line_hold_ns = DUAL_CORE_LINE_HOLD_NS;
        }
        if !words_given {
            config.timing.words_per_line = DUAL_CORE_WORDS_PER_LINE;
        }
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "shift_register" => Ok(Section::ShiftRegister),
        "signal" => Ok(Section::Signal),
        "clock" => Ok(Section::Clock),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Split `key = value`, dropping a trailing comment
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let mut value = value.trim();

    if let Some(hash_pos) = value.find('#') {
        // Only a # outside quotes starts a comment
        if value[..hash_pos].matches('"').count() % 2 == 0 {
            value = value[..hash_pos].trim();
        }
    }

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Integer, allowing `_` digit separators
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits: String<12> = String::new();
    for c in parse_string(value).chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_optional_pin(value: &str) -> Result<Pin, ParseError> {
    parse_pin(parse_string(value)).ok_or(ParseError::InvalidPin)
}

/// Sync lines are always wired
fn parse_required_pin(value: &str) -> Result<u8, ParseError> {
    parse_optional_pin(value)?.id().ok_or(ParseError::InvalidPin)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut BoardConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => {
            if key == "dual_core" {
                config.dual_core = parse_bool(value)?;
            }
        }
        Section::ShiftRegister => {
            let sr = &mut config.shift_register;
            match key {
                "serial_pin" => sr.pins.serial = parse_optional_pin(value)?,
                "clock_pin" => sr.pins.clock = parse_optional_pin(value)?,
                "clear_pin" => sr.pins.clear = parse_optional_pin(value)?,
                "latch_pin" => sr.pins.latch = parse_optional_pin(value)?,
                "output_enable_pin" => sr.pins.output_enable = parse_optional_pin(value)?,
                "pulse_ns" => sr.pulse_ns = parse_int(value)?,
                _ => {}
            }
        }
        Section::Signal => match key {
            "hsync_pin" => config.signal_pins.hsync = parse_required_pin(value)?,
            "vsync_pin" => config.signal_pins.vsync = parse_required_pin(value)?,
            "lines_per_frame" => config.timing.lines_per_frame = parse_int(value)?,
            "vsync_start_line" => config.timing.vsync_start_line = parse_int(value)?,
            "vsync_end_line" => config.timing.vsync_end_line = parse_int(value)?,
            "hsync_ns" => config.timing.hsync_ns = parse_int(value)?,
            "line_hold_ns" => config.timing.line_hold_ns = parse_int(value)?,
            "words_per_line" => config.timing.words_per_line = parse_int(value)?,
            _ => {}
        },
        Section::Clock => match key {
            "cycle_ns" => config.clock.cycle_ns = parse_int(value)?,
            "overhead_cycles" => config.clock.overhead_cycles = parse_int(value)?,
            _ => {}
        },
    }
    Ok(())
}
