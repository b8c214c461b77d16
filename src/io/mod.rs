pub mod output;
pub mod walker;

use std::fs;
use std::path::Path;

use crate::errors::{MigrateError, Result};

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| MigrateError::read(path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| MigrateError::write(path, e))
}
