//! Error collection for batch file processing.
//!
//! Each template is converted independently, so a failure on one file is
//! recorded and the run carries on. Callers get BOTH the successes and the
//! failures back.

use serde::Serialize;
use std::path::PathBuf;

use super::MigrateError;

/// Results from processing a batch of files.
#[derive(Debug, Clone)]
pub struct MigrationResults<T> {
    pub successes: Vec<T>,
    pub failures: Vec<FileFailure>,
}

impl<T> MigrationResults<T> {
    pub fn new(successes: Vec<T>, failures: Vec<FileFailure>) -> Self {
        Self {
            successes,
            failures,
        }
    }

    /// Split per-file results into successes and failures.
    pub fn partition(results: impl IntoIterator<Item = Result<T, FileFailure>>) -> Self {
        let mut successes = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(value) => successes.push(value),
                Err(failure) => failures.push(failure),
            }
        }
        Self::new(successes, failures)
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn total_count(&self) -> usize {
        self.successes.len() + self.failure_count()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Information about a file that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub operation: OperationType,
    pub error: String,
}

impl FileFailure {
    pub fn new(path: PathBuf, operation: OperationType, error: impl ToString) -> Self {
        Self {
            path,
            operation,
            error: error.to_string(),
        }
    }
}

impl From<MigrateError> for FileFailure {
    fn from(err: MigrateError) -> Self {
        let path = match &err {
            MigrateError::Read { path, .. }
            | MigrateError::Write { path, .. }
            | MigrateError::Walk { path, .. }
            | MigrateError::Config { path, .. } => path.clone(),
        };
        Self::new(path, err.operation(), &err)
    }
}

/// Type of operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    FileRead,
    FileWrite,
    DirectoryAccess,
    Other,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileRead => "File read",
            Self::FileWrite => "File write",
            Self::DirectoryAccess => "Directory access",
            Self::Other => "Other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_partition_keeps_both_sides() {
        let results = MigrationResults::partition(vec![
            Ok(1),
            Err(FileFailure::new(
                PathBuf::from("a.blade.php"),
                OperationType::FileRead,
                "Permission denied",
            )),
            Ok(2),
        ]);

        assert_eq!(results.successes, vec![1, 2]);
        assert_eq!(results.failure_count(), 1);
        assert_eq!(results.total_count(), 3);
        assert!(!results.is_complete_success());
    }

    #[test]
    fn test_failure_from_migrate_error() {
        let failure: FileFailure = MigrateError::write(
            "b.blade.php",
            io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        )
        .into();

        assert_eq!(failure.path, PathBuf::from("b.blade.php"));
        assert_eq!(failure.operation, OperationType::FileWrite);
        assert_eq!(failure.error, "Failed to write b.blade.php: read-only");
    }

    #[test]
    fn test_operation_type_as_str() {
        assert_eq!(OperationType::FileRead.as_str(), "File read");
        assert_eq!(OperationType::DirectoryAccess.as_str(), "Directory access");
    }
}
