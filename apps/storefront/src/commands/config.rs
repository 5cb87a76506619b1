//! # Config Commands

use crate::state::ConfigState;

/// Returns the active configuration.
pub fn get_config(config: &ConfigState) -> ConfigState {
    config.clone()
}
