// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `strand` - command-line client for the strand computational platform.

mod commands;
mod exit_error;
mod output;

use clap::{Parser, Subcommand};

use crate::exit_error::ExitError;
use crate::output::OutputFormat;

/// Version string: crate version plus git hash (e.g. "0.1.0+abc1234")
const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_GIT_HASH"));

#[derive(Parser)]
#[command(name = "strand", version = VERSION, about = "Client for the strand computational platform")]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Session to operate on (falls back to the STRAND_SESSION variable)
    #[arg(long, global = true)]
    session: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Authenticate and store a token
    Login(commands::login::LoginArgs),
    /// Manage sessions
    Session(commands::session::SessionArgs),
    /// Manage datasets in a session
    Dataset(commands::dataset::DatasetArgs),
    /// Inspect and follow jobs
    Job(commands::job::JobArgs),
    /// Run a tool and optionally follow it to completion
    Run(commands::run::RunArgs),
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("STRAND_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    let session = cli.session.as_deref();
    match cli.command {
        Command::Login(args) => commands::login::handle(args).await,
        Command::Session(args) => commands::session::handle(args, cli.format).await,
        Command::Dataset(args) => commands::dataset::handle(args, session, cli.format).await,
        Command::Job(args) => commands::job::handle(args, session, cli.format).await,
        Command::Run(args) => commands::run::handle(args, session).await,
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = dispatch(cli).await {
        match err.downcast::<ExitError>() {
            Ok(exit) => {
                eprintln!("{}", exit.message);
                std::process::exit(exit.code);
            }
            Err(err) => {
                eprintln!("error: {err:#}");
                std::process::exit(1);
            }
        }
    }
}
