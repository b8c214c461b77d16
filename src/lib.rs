// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod convert;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod progress;

// Re-export commonly used types
pub use crate::commands::migrate::{ConversionStats, FileReport, MigrateOptions};
pub use crate::config::MigrateConfig;
pub use crate::convert::{Conversion, Pipeline, Target};
pub use crate::errors::{FileFailure, MigrateError, OperationType};
pub use crate::io::walker::FileCollector;
