//! jobwatch CLI - Submit remote jobs and wait for them to finish.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::net::SocketAddr;
use std::process::ExitCode;

mod commands;
mod display;
mod logging;

#[derive(Parser)]
#[command(name = "jobwatch")]
#[command(about = "Submit remote jobs and poll them to completion", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reference job status service
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: SocketAddr,

        /// Shortest time a job stays pending, in milliseconds
        #[arg(long, default_value = "5000")]
        min_delay_ms: u64,

        /// Longest time a job stays pending, in milliseconds
        #[arg(long, default_value = "15000")]
        max_delay_ms: u64,

        /// Probability that a job ends in error (0.0 - 1.0)
        #[arg(long, default_value = "0.5")]
        failure_rate: f64,
    },

    /// Create a job and print its ID
    Submit {
        /// Base URL of the job status service
        #[arg(long, default_value = "http://localhost:8080")]
        url: String,

        #[command(flatten)]
        polling: PollingArgs,
    },

    /// Wait for an existing job to finish
    Wait {
        /// Job ID returned at creation
        job_id: String,

        /// Base URL of the job status service
        #[arg(long, default_value = "http://localhost:8080")]
        url: String,

        #[command(flatten)]
        polling: PollingArgs,
    },

    /// Create a job and wait for it to finish
    Run {
        /// Base URL of the job status service
        #[arg(long, default_value = "http://localhost:8080")]
        url: String,

        #[command(flatten)]
        polling: PollingArgs,
    },
}

/// Polling settings shared by the client commands.
#[derive(Args, Clone, Copy)]
struct PollingArgs {
    /// Maximum number of status lookups
    #[arg(long, default_value = "10")]
    max_attempts: u32,

    /// Delay before the second lookup, in milliseconds
    #[arg(long, default_value = "100")]
    base_delay_ms: u64,

    /// Upper bound on the backoff delay, in milliseconds
    #[arg(long, default_value = "10000")]
    max_delay_ms: u64,

    /// Bound on a single request, in milliseconds
    #[arg(long, default_value = "30000")]
    per_call_timeout_ms: u64,

    /// Overall deadline, in seconds
    #[arg(long, default_value = "120")]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            display::report_error(&err);
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let cancel = commands::cancel_on_ctrl_c();

    match command {
        Commands::Serve {
            bind,
            min_delay_ms,
            max_delay_ms,
            failure_rate,
        } => commands::serve::serve(bind, min_delay_ms, max_delay_ms, failure_rate, cancel).await,
        Commands::Submit { url, polling } => {
            commands::submit::submit(&url, &polling, &cancel).await
        }
        Commands::Wait {
            job_id,
            url,
            polling,
        } => commands::wait::wait(&job_id, &url, &polling, cli.quiet, &cancel).await,
        Commands::Run { url, polling } => {
            commands::run::run(&url, &polling, cli.quiet, &cancel).await
        }
    }
}
