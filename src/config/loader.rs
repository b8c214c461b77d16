use std::fs;
use std::path::Path;

use super::core::MigrateConfig;
use crate::errors::{MigrateError, Result};

/// Parse configuration from a TOML string.
pub fn parse_config(contents: &str) -> std::result::Result<MigrateConfig, String> {
    toml::from_str::<MigrateConfig>(contents).map_err(|e| e.to_string())
}

/// Load an explicitly requested config file. A missing file is an error here.
pub fn load_config_from(path: &Path) -> Result<MigrateConfig> {
    let contents =
        fs::read_to_string(path).map_err(|e| MigrateError::config(path, e.to_string()))?;
    let config = parse_config(&contents).map_err(|message| MigrateError::config(path, message))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load the default config file if present, falling back to defaults when it
/// does not exist. A file that exists but does not parse is still an error.
pub fn load_default_config(path: &Path) -> Result<MigrateConfig> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let config =
                parse_config(&contents).map_err(|message| MigrateError::config(path, message))?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No {} found, using defaults", path.display());
            Ok(MigrateConfig::default())
        }
        Err(e) => Err(MigrateError::config(path, e.to_string())),
    }
}
