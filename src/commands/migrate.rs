//! Pipeline driver: collect files, convert each one, persist changes and
//! accumulate statistics.

use anyhow::{Context, Result};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressIterator};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::setup::configure_thread_pool;
use crate::config::{self, ScanConfig};
use crate::convert::Target;
use crate::errors::{FileFailure, MigrationResults};
use crate::formatting::FormattingConfig;
use crate::io::output::{JsonWriter, OutputFormat, ReportWriter, TerminalWriter};
use crate::io::walker::FileCollector;
use crate::io::{read_file, write_file};
use crate::progress::{ProgressConfig, ProgressManager, TEMPLATE_FILES};

/// Settings for one migration run, after config and CLI flags are merged.
#[derive(Debug, Clone)]
pub struct MigrateOptions {
    pub root: PathBuf,
    pub target: Target,
    pub dry_run: bool,
    pub parallel: bool,
    pub scan: ScanConfig,
}

impl MigrateOptions {
    pub fn new(root: PathBuf, target: Target) -> Self {
        Self {
            root,
            target,
            dry_run: false,
            parallel: true,
            scan: ScanConfig::default(),
        }
    }
}

/// Outcome for one processed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    /// Marker occurrences before conversion
    pub before: usize,
    /// Marker occurrences left afterwards
    pub after: usize,
    pub changed: bool,
    pub written: bool,
}

impl FileReport {
    pub fn converted(&self) -> usize {
        self.before.saturating_sub(self.after)
    }
}

/// Totals for a run. Serialized as-is for `--format json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    pub target: Target,
    pub dry_run: bool,
    pub files_scanned: usize,
    pub files_modified: usize,
    pub occurrences_converted: usize,
    pub occurrences_remaining: usize,
    pub files: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
}

impl ConversionStats {
    fn from_results(target: Target, dry_run: bool, results: MigrationResults<FileReport>) -> Self {
        let MigrationResults {
            successes: mut files,
            failures: mut failures,
        } = results;
        files.sort_by(|a, b| a.path.cmp(&b.path));
        failures.sort_by(|a, b| a.path.cmp(&b.path));

        Self {
            target,
            dry_run,
            files_scanned: files.len() + failures.len(),
            files_modified: files.iter().filter(|f| f.changed).count(),
            occurrences_converted: files.iter().map(FileReport::converted).sum(),
            occurrences_remaining: files.iter().map(|f| f.after).sum(),
            files,
            failures,
        }
    }

    pub fn modified(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.changed)
    }
}

/// Collect the files a run will touch.
pub fn collect_files(options: &MigrateOptions) -> crate::errors::Result<Vec<PathBuf>> {
    FileCollector::new(options.root.clone())
        .with_scan_config(&options.scan)
        .with_target(options.target)
        .collect()
}

/// Convert one file, writing it back when something changed.
pub fn process_file(path: &Path, target: Target, dry_run: bool) -> Result<FileReport, FileFailure> {
    let content = read_file(path)?;
    let conversion = target.convert(&content);

    let written = conversion.changed && !dry_run;
    if written {
        write_file(path, &conversion.output)?;
    }

    log::debug!(
        "{}: {} converted, {} remaining",
        path.display(),
        conversion.converted(),
        conversion.after
    );

    Ok(FileReport {
        path: path.to_path_buf(),
        before: conversion.before,
        after: conversion.after,
        changed: conversion.changed,
        written,
    })
}

/// Process every file, in parallel unless disabled. Failures are collected
/// and never stop the run.
pub fn process_files(
    files: &[PathBuf],
    options: &MigrateOptions,
    progress: &ProgressBar,
) -> ConversionStats {
    let convert = |path: &PathBuf| process_file(path, options.target, options.dry_run);

    let results: Vec<_> = if options.parallel {
        files
            .par_iter()
            .progress_with(progress.clone())
            .map(convert)
            .collect()
    } else {
        files
            .iter()
            .progress_with(progress.clone())
            .map(convert)
            .collect()
    };

    let results = MigrationResults::partition(results);
    if !results.is_complete_success() {
        log::warn!(
            "{} of {} files could not be processed",
            results.failure_count(),
            results.total_count()
        );
    }

    ConversionStats::from_results(options.target, options.dry_run, results)
}

/// Collect and convert without any reporting.
pub fn run(options: &MigrateOptions) -> crate::errors::Result<ConversionStats> {
    let files = collect_files(options)?;
    Ok(process_files(&files, options, &ProgressBar::hidden()))
}

/// Everything the `form`, `html` and `all` subcommands need.
#[derive(Debug, Clone)]
pub struct MigrateCommand {
    pub path: PathBuf,
    pub target: Target,
    pub dry_run: bool,
    pub format: OutputFormat,
    pub no_parallel: bool,
    pub jobs: Option<usize>,
    pub config: Option<PathBuf>,
    pub quiet: bool,
    pub plain: bool,
}

impl MigrateCommand {
    fn options(&self, config: config::MigrateConfig) -> MigrateOptions {
        MigrateOptions {
            root: self.path.clone(),
            target: self.target,
            dry_run: self.dry_run,
            parallel: config.run.parallel && !self.no_parallel,
            scan: config.scan,
        }
    }
}

/// Run a conversion subcommand and print its report to stdout.
pub fn migrate(command: MigrateCommand) -> Result<()> {
    let config = config::load(command.config.as_deref())?;
    configure_thread_pool(command.jobs.unwrap_or(config.run.jobs));
    let options = command.options(config);
    FormattingConfig::for_cli(command.plain).apply();

    let stdout = std::io::stdout();
    let mut writer: Box<dyn ReportWriter> = match command.format {
        OutputFormat::Json => Box::new(JsonWriter::new(stdout.lock())),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(stdout.lock())),
    };

    let files = collect_files(&options)
        .with_context(|| format!("Failed to collect files under {}", options.root.display()))?;
    writer.write_start(files.len())?;

    let manager = ProgressManager::new(ProgressConfig::from_env(command.quiet));
    let progress = manager.create_bar(files.len() as u64, TEMPLATE_FILES);
    let stats = process_files(&files, &options, &progress);
    progress.finish_and_clear();

    writer.write_report(&stats)?;
    Ok(())
}
