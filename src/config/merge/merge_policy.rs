//! Base builder: serde defaults seeded as the lowest layer.

use crate::config::ShellConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};

/// Builder preloaded with `ShellConfig::default()`, so partial sources only
/// override the keys they name.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = toml::to_string(&ShellConfig::default())
        .map_err(|e| ConfigError::Message(format!("Failed to encode defaults: {}", e)))?;
    Ok(Config::builder().add_source(File::from_str(&defaults, FileFormat::Toml)))
}
