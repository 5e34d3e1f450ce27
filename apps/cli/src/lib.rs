//! # bizdesk CLI Library
//!
//! Command-line front end over `bizdesk-core`: plan quotes, subscription
//! expiry and invoice totals.
//!
//! ## Module Organization
//! ```text
//! bizdesk_cli/
//! ├── lib.rs          ◄─── You are here (argument parsing, dispatch, logging)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── plans.rs    ◄─── Plan catalogue listing
//! │   ├── pricing.rs  ◄─── Quotes and expiry dates
//! │   └── invoice.rs  ◄─── Draft documents and totals
//! ├── config.rs       ◄─── Environment configuration
//! └── error.rs        ◄─── CLI error type
//! ```
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  argv ──► Cli (clap) ──► execute() ──► commands::* ──► bizdesk-core    │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                  Result<String, CliError> ──► stdout / stderr           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `execute` takes "today" as a parameter so every command is reproducible
//! in tests; only `main` reads the clock.

pub mod commands;
pub mod config;
pub mod error;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use bizdesk_core::DocumentKind;

use crate::config::CliConfig;
use crate::error::CliError;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn,bizdesk=info";

/// Log filter for `--verbose`: our crates at debug, dependencies stay quiet.
pub const VERBOSE_LOG_FILTER: &str = "warn,bizdesk=debug";

/// Subscription pricing and invoice totals for the bizdesk dashboard.
#[derive(Debug, Parser)]
#[command(name = "bizdesk", version, about)]
pub struct Cli {
    /// Log bizdesk events at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the plan catalogue with monthly prices and features
    Plans,

    /// Quote one plan for one billing period
    Quote {
        /// Plan tier (basic, premium, pro)
        #[arg(long)]
        plan: String,

        /// Billing period (monthly, quarterly, annual)
        #[arg(long, default_value = "monthly")]
        period: String,

        /// Issue date, YYYY-MM-DD or DD/MM/YYYY (defaults to today)
        #[arg(long)]
        issued: Option<String>,
    },

    /// Quote every plan for every billing period
    QuoteAll {
        /// Issue date, YYYY-MM-DD or DD/MM/YYYY (defaults to today)
        #[arg(long)]
        issued: Option<String>,
    },

    /// Compute the expiry date of a subscription
    Expiry {
        /// Issue date, YYYY-MM-DD or DD/MM/YYYY
        #[arg(long)]
        issued: String,

        /// Duration in months
        #[arg(long)]
        months: u32,
    },

    /// Compute the totals of a sales document
    Invoice {
        /// One line item; repeat for more lines
        #[arg(long = "line", value_name = "QTY:PRICE[:DISCOUNT%]", required = true)]
        lines: Vec<String>,

        /// Document kind
        #[arg(long, value_enum, default_value_t = KindArg::InvoiceReceipt)]
        kind: KindArg,

        /// Issue date (defaults to today)
        #[arg(long)]
        issued: Option<String>,

        /// Due date (defaults to the issue date)
        #[arg(long)]
        due: Option<String>,

        /// Free-text notes printed on the document
        #[arg(long)]
        notes: Option<String>,
    },
}

/// Document kind as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    InvoiceReceipt,
    Proforma,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::InvoiceReceipt => DocumentKind::InvoiceReceipt,
            KindArg::Proforma => DocumentKind::Proforma,
        }
    }
}

/// Runs one parsed command and returns what should be printed.
pub fn execute(cli: &Cli, config: &CliConfig, today: NaiveDate) -> Result<String, CliError> {
    debug!(command = ?cli.command, json = cli.json, "Executing command");

    match &cli.command {
        Command::Plans => commands::plans::list_plans(config, cli.json),
        Command::Quote {
            plan,
            period,
            issued,
        } => {
            let issued = commands::resolve_date("issued", issued.as_deref(), today)?;
            commands::pricing::quote(config, plan, period, issued, cli.json)
        }
        Command::QuoteAll { issued } => {
            let issued = commands::resolve_date("issued", issued.as_deref(), today)?;
            commands::pricing::quote_all(config, issued, cli.json)
        }
        Command::Expiry { issued, months } => {
            let issued = commands::resolve_date("issued", Some(issued), today)?;
            commands::pricing::expiry(config, issued, *months, today, cli.json)
        }
        Command::Invoice {
            lines,
            kind,
            issued,
            due,
            notes,
        } => {
            let issued = commands::resolve_date("issued", issued.as_deref(), today)?;
            let due = commands::resolve_date("due", due.as_deref(), issued)?;
            let request = commands::invoice::InvoiceRequest {
                kind: (*kind).into(),
                issued,
                due,
                notes: notes.clone(),
                lines,
            };
            commands::invoice::invoice(config, &request, cli.json)
        }
    }
}

/// Picks the filter directives for [`init_tracing`].
///
/// `--verbose` wins over `RUST_LOG`, which wins over [`DEFAULT_LOG_FILTER`].
/// A blank `RUST_LOG` counts as unset.
pub fn log_directives(verbose: bool, rust_log: Option<&str>) -> &str {
    if verbose {
        return VERBOSE_LOG_FILTER;
    }
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => directives,
        _ => DEFAULT_LOG_FILTER,
    }
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so stdout stays clean for `--json`.
pub fn init_tracing(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::try_new(log_directives(verbose, rust_log.as_deref()))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
