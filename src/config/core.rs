use serde::{Deserialize, Serialize};

/// Root configuration structure for collective-migrate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MigrateConfig {
    /// Which files the collector picks up
    #[serde(default)]
    pub scan: ScanConfig,

    /// How the run is executed
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Files whose name ends with this suffix are always processed
    #[serde(default = "default_template_suffix")]
    pub template_suffix: String,

    /// Files with this extension are processed only if they mention a legacy helper
    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    /// Glob patterns excluded from the walk
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            template_suffix: default_template_suffix(),
            source_extension: default_source_extension(),
            ignore: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Worker threads; 0 means one per CPU
    #[serde(default)]
    pub jobs: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            jobs: 0,
        }
    }
}

pub fn default_template_suffix() -> String {
    ".blade.php".to_string()
}

pub fn default_source_extension() -> String {
    "php".to_string()
}

fn default_parallel() -> bool {
    true
}
