//! Configuration module.
//!
//! Settings resolve with precedence: defaults → config file → env vars → CLI.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    CliOverrides, ConfigError, ConfigFile, ResolvedConfig,
};

use crate::inspect::{AttributeFilter, InspectOptions};

impl ResolvedConfig {
    /// Options for building the inspection tree.
    pub fn inspect_options(&self) -> InspectOptions {
        InspectOptions {
            band_size: self.band_size,
            filter: AttributeFilter {
                show_hidden: self.show_hidden,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BandSize;

    #[test]
    fn inspect_options_follow_config() {
        let config = ResolvedConfig {
            band_size: BandSize::new(10).unwrap(),
            show_hidden: true,
            ..ResolvedConfig::default()
        };
        let options = config.inspect_options();
        assert_eq!(options.band_size.get(), 10);
        assert!(options.filter.show_hidden);
    }

    #[test]
    fn default_config_uses_default_band_size() {
        let options = ResolvedConfig::default().inspect_options();
        assert_eq!(options.band_size, BandSize::DEFAULT);
        assert!(!options.filter.show_hidden);
    }
}
