//! # bizdesk
//!
//! Entry point. Parses arguments, loads configuration and prints the
//! result of one command.

use anyhow::Context;
use clap::Parser;
use tracing::info;

use bizdesk_cli::config::CliConfig;
use bizdesk_cli::{execute, init_tracing, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CliConfig::from_env().context("Failed to load configuration")?;
    info!(
        currency = %config.currency_code,
        vat_bps = config.vat_rate.bps(),
        "Configuration loaded"
    );

    let today = chrono::Local::now().date_naive();

    match execute(&cli, &config, today) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(err) if cli.json => {
            println!("{}", serde_json::to_string_pretty(&err)?);
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}
