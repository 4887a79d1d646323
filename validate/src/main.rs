//! combo-validate - check combo tables and replay input scripts against them.
//!
//! Usage:
//!   combo-validate check [TABLE]
//!   combo-validate show [TABLE]
//!   combo-validate replay [TABLE] --script <FILE> [--tick-ms N]
//!
//! TABLE is a TOML file or a directory of them; it defaults to the user's
//! config directory.

mod commands;
mod replay;
mod script;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Check and replay combo tables")]
struct Cli {
    /// Append logs to combo-validate.log in this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List combos in priority order and report unreachable ones
    Check { path: Option<PathBuf> },
    /// Print the normalised combo table as TOML
    Show { path: Option<PathBuf> },
    /// Replay a timestamped input script
    Replay {
        path: Option<PathBuf>,
        #[arg(short, long)]
        script: PathBuf,
        /// Frame interval for injected ticks (0 = only explicit ticks)
        #[arg(long, default_value_t = 16)]
        tick_ms: u64,
    },
}

/// Initialize logging, writing to `log_dir` if given, otherwise stderr.
fn init_logging(log_dir: Option<&PathBuf>) -> Option<WorkerGuard> {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .from_env_lossy();

    if let Some(dir) = log_dir {
        let appender = tracing_appender::rolling::never(dir, "combo-validate.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
            .init();
        return Some(guard);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
    None
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    // Flushes buffered log lines on drop
    let _guard = init_logging(cli.log_dir.as_ref());

    let result = match cli.command {
        Commands::Check { path } => {
            commands::resolve_table_path(path).and_then(|p| commands::check(&p))
        }
        Commands::Show { path } => {
            commands::resolve_table_path(path).and_then(|p| commands::show(&p))
        }
        Commands::Replay {
            path,
            script,
            tick_ms,
        } => commands::resolve_table_path(path)
            .and_then(|p| commands::replay_script(&p, &script, tick_ms)),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "combo-validate failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
