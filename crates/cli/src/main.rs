//! Robusta CLI.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use robusta_cli::commands::discover::DiscoverPrometheusCommand;
use robusta_cli::commands::gen_token::GenTokenCommand;
use robusta_cli::commands::logs::LogsCommand;
use robusta_cli::{commands, ui};
use robusta_core::DiscoveryCache;
use tracing_subscriber::EnvFilter;

/// Robusta - Kubernetes observability and automation.
#[derive(Parser)]
#[command(name = "robusta", version, about = "Robusta command line tool")]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate token required to run actions manually in Robusta UI.
    GenToken(GenTokenCommand),

    /// Fetch Robusta runner logs.
    Logs(LogsCommand),

    /// Find the URL of the in-cluster Prometheus server.
    DiscoverPrometheus(DiscoverPrometheusCommand),

    /// Show the version of the local robusta-cli.
    Version,
}

impl Commands {
    fn debug(&self) -> bool {
        matches!(self, Self::GenToken(cmd) if cmd.debug)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose || cli.command.debug() {
        EnvFilter::new("info,robusta_cli=debug,robusta_core=debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cache = DiscoveryCache::new();

    let result = match cli.command {
        Commands::GenToken(cmd) => {
            return match cmd.run().await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    ui::print_error(&e.to_string());
                    ExitCode::from(e.exit_code())
                }
            };
        }
        Commands::Logs(cmd) => cmd.run(),
        Commands::DiscoverPrometheus(cmd) => cmd.run(&cache).await,
        Commands::Version => {
            commands::print_version();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
