//! Board configuration
//!
//! The board file is compiled into the image. A file that fails to parse or
//! validate is reported and replaced by the built-in defaults, so the board
//! always comes up with some raster.

use defmt::*;
use vgashift_core::config::{parse_board_config, BoardConfig};

/// Embedded board configuration (compiled into firmware)
/// Edit board.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../board.toml");

/// Load the embedded configuration, falling back to defaults
pub fn load() -> BoardConfig {
    let config = match parse_board_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse board.toml: {:?}", e);
            error!("Using default board configuration");
            return BoardConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        error!("Invalid board.toml: {:?}", e);
        error!("Using default board configuration");
        return BoardConfig::default();
    }

    info!("Parsed embedded configuration successfully");
    config
}
