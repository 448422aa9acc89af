//! Global config file: `$XDG_CONFIG_HOME/shellfs/config.toml`, optional.

use crate::config::paths::xdg_root;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use tracing::debug;

/// Add the global config file when the config directory can be determined.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Ok(path) = xdg_root::global_config_path() else {
        debug!("No config directory; skipping global config file");
        return Ok(builder);
    };
    debug!(path = %path.display(), "Global config file");
    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(false)))
}
