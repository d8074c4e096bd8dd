//! Configuration types
//!
//! Board-agnostic configuration for the shift register driver and the sync
//! generator, with validation and a parser for the board file.

pub mod hardware;
pub mod toml;
pub mod types;

pub use hardware::*;
pub use toml::{parse_board_config, ParseError};
pub use types::*;
