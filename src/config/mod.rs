mod core;
mod loader;

pub use self::core::{
    default_source_extension, default_template_suffix, MigrateConfig, RunConfig, ScanConfig,
};
pub use loader::{load_config_from, load_default_config, parse_config};

use std::path::{Path, PathBuf};

use crate::errors::Result;

/// File looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = ".collective-migrate.toml";

/// Template written by `collective-migrate init`.
pub const DEFAULT_CONFIG: &str = r#"# collective-migrate configuration

[scan]
# Files ending with this suffix are always converted
template_suffix = ".blade.php"
# Other files with this extension are converted only when they call Form:: or Html::
source_extension = "php"
ignore = [
    "vendor/**",
    "node_modules/**",
]

[run]
parallel = true
# 0 uses one worker per CPU
jobs = 0
"#;

/// Resolve the configuration for a run: an explicit path must exist,
/// otherwise the default file is optional.
pub fn load(explicit: Option<&Path>) -> Result<MigrateConfig> {
    match explicit {
        Some(path) => load_config_from(path),
        None => load_default_config(&PathBuf::from(CONFIG_FILE_NAME)),
    }
}
