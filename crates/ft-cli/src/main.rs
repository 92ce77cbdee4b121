use std::io;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ft_cli::commands::{balance, daysoff, list};
use ft_cli::{Cli, Commands, load_from};
use ft_ledger::TimewarriorLedger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so JSON output stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let today = config.today_at(Utc::now());
    let mut stdout = io::stdout().lock();

    match command {
        Commands::Balance(args) => {
            let ledger = TimewarriorLedger::new(config.ledger.command.clone(), config.time_zone);
            balance::run(&mut stdout, args, &config, ledger, today)?;
        }
        Commands::DaysOff(args) => daysoff::run(&mut stdout, args, &config, today)?,
        Commands::List(args) => list::run(&mut stdout, args, &config, today)?,
    }

    Ok(())
}
