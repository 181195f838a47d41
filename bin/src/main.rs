//! netsonde CLI - adaptive network throughput probe.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "netsonde")]
#[command(about = "Adaptive network throughput probe", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe download throughput for a URL
    Run {
        /// Probe target (URL, bare host, or base64-encoded URL)
        url: String,

        /// Hard cap on probe duration in seconds
        #[arg(short = 'd', long, default_value = "25")]
        max_duration: u64,

        /// Give up if no data arrives for this many seconds
        #[arg(long)]
        read_timeout: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Record the run in the session store
        #[arg(long)]
        save: bool,

        /// Write the result as JSON into this directory, named after the target
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// List recorded probe runs
    History {
        /// Show at most this many records
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Remove finished records from the session store
    Clean,
}

/// Installs the tracing subscriber, mapping CLI flags to a default filter.
///
/// `RUST_LOG` still wins when set.
fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Run {
            url,
            max_duration,
            read_timeout,
            format,
            save,
            output_dir,
        } => {
            commands::run::run(
                &url,
                max_duration,
                read_timeout,
                format,
                save,
                output_dir,
                cli.quiet,
            )
            .await
        }
        Commands::History { limit, format } => commands::history::history(limit, format),
        Commands::Clean => commands::clean::clean(cli.quiet),
    }
}
