use clap::{Parser, Subcommand};
use klock_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod console;

#[derive(Parser)]
#[command(name = "klock", version, about = "Hours calculator and focus timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current time
    Clock {
        /// Keep refreshing every second until Ctrl-C
        #[arg(long)]
        watch: bool,
    },
    /// Hours calculator
    Calc {
        #[command(subcommand)]
        action: commands::calc::CalcAction,
    },
    /// Focus session timer
    Focus {
        #[command(subcommand)]
        action: commands::focus::FocusAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Commands::Clock { watch } => commands::clock::run(watch),
        Commands::Calc { action } => commands::calc::run(action),
        Commands::Focus { action } => commands::focus::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise the configured filter. Logs go to stderr.
///
/// Reads the config without writing it, so commands that never touch the
/// data directory leave it alone.
fn init_logging() {
    let (fallback, load_error) = match Config::peek() {
        Ok(config) => (config.log.filter, None),
        Err(e) => (Config::default().log.filter, Some(e)),
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = load_error {
        tracing::warn!(error = %e, "ignoring unreadable config");
    }
}
