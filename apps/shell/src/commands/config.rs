//! # Config Commands

use tracing::debug;

use crate::error::AppResult;
use crate::state::ConfigState;

/// Gets the current application configuration.
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

/// The configuration as the TOML a config file would hold.
pub fn render_config(config: &ConfigState) -> AppResult<String> {
    debug!("render_config command");
    Ok(config.to_toml()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_config() {
        let rendered = render_config(&ConfigState::default()).unwrap();
        assert!(rendered.contains("store_name = \"Storefront\""));
        assert!(rendered.contains("dwell_ms = 2000"));
        assert_eq!(get_config(&ConfigState::default()), ConfigState::default());
    }
}
