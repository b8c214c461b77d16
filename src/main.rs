use anyhow::Result;
use clap::Parser;
use collective_migrate::cli::setup::init_logging;
use collective_migrate::cli::{Cli, Commands};
use collective_migrate::commands;
use collective_migrate::convert::Target;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.verbosity());

    match cli.command {
        Commands::Form(args) => commands::migrate(args.into_command(Target::Form)),
        Commands::Html(args) => commands::migrate(args.into_command(Target::Html)),
        Commands::All(args) => commands::migrate(args.into_command(Target::All)),
        Commands::Init { force } => commands::init_config(force),
    }
}
