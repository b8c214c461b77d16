pub mod setup;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::migrate::MigrateCommand;
use crate::convert::Target;
use crate::io::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "collective-migrate")]
#[command(
    about = "Convert Laravel Collective Form:: and Html:: calls into plain Blade markup",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert Form:: calls
    Form(ConvertArgs),

    /// Convert Html:: calls
    Html(ConvertArgs),

    /// Convert Form:: calls, then Html:: calls
    All(ConvertArgs),

    /// Write a default .collective-migrate.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Directory (or single file) to convert
    #[arg(default_value = "resources/views")]
    pub path: PathBuf,

    /// Report what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Number of worker threads (0 = one per CPU)
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Process files one at a time
    #[arg(long)]
    pub no_parallel: bool,

    /// Configuration file (defaults to ./.collective-migrate.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Disable colored output
    #[arg(long)]
    pub plain: bool,
}

impl ConvertArgs {
    pub fn into_command(self, target: Target) -> MigrateCommand {
        MigrateCommand {
            path: self.path,
            target,
            dry_run: self.dry_run,
            format: self.format,
            no_parallel: self.no_parallel,
            jobs: self.jobs,
            config: self.config,
            quiet: self.quiet,
            plain: self.plain,
        }
    }
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Commands::Form(args) | Commands::Html(args) | Commands::All(args) => args.verbosity,
            Commands::Init { .. } => 0,
        }
    }
}
