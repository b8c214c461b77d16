use clap::ValueEnum;
use colored::*;
use std::io::Write;

use crate::commands::migrate::ConversionStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

pub trait ReportWriter {
    /// Called once the file list is known, before any file is converted.
    fn write_start(&mut self, file_count: usize) -> anyhow::Result<()>;

    fn write_report(&mut self, stats: &ConversionStats) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_start(&mut self, _file_count: usize) -> anyhow::Result<()> {
        Ok(())
    }

    fn write_report(&mut self, stats: &ConversionStats) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(stats)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_changes(&mut self, stats: &ConversionStats) -> anyhow::Result<()> {
        let label = if stats.dry_run {
            "Would modify:"
        } else {
            "Modified:"
        };
        for report in stats.modified() {
            writeln!(
                self.writer,
                "{} {} ({} replacements)",
                label.green(),
                report.path.display(),
                report.converted()
            )?;
        }
        Ok(())
    }

    fn write_failures(&mut self, stats: &ConversionStats) -> anyhow::Result<()> {
        for failure in &stats.failures {
            writeln!(self.writer, "{} {}", "Warning:".yellow(), failure.error)?;
        }
        Ok(())
    }

    fn write_summary(&mut self, stats: &ConversionStats) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "Summary:".bold())?;
        writeln!(self.writer, "Files processed: {}", stats.files_scanned)?;
        writeln!(self.writer, "Files modified: {}", stats.files_modified)?;
        writeln!(
            self.writer,
            "Total replacements: {}",
            stats.occurrences_converted
        )?;

        if stats.occurrences_converted > 0 {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", stats.target.advisory().yellow())?;
        }
        Ok(())
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_start(&mut self, file_count: usize) -> anyhow::Result<()> {
        writeln!(self.writer, "Found {file_count} files to process.")?;
        Ok(())
    }

    fn write_report(&mut self, stats: &ConversionStats) -> anyhow::Result<()> {
        self.write_changes(stats)?;
        self.write_failures(stats)?;
        self.write_summary(stats)?;
        Ok(())
    }
}
