use std::path::{Path, PathBuf};
use std::process::ExitCode;

use combo_core::combos::{self, ConfigError, default_combo_dir};
use combo_core::{ComboSet, MatchOutcome};
use combo_types::formatting::{format_gap, format_steps, format_timestamp_ms};

use crate::replay::replay;
use crate::script::{ScriptError, parse_script};

/// Exit code when a replay ran but expectations failed
const EXIT_EXPECTATIONS_FAILED: u8 = 2;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("no combo table given and no default config directory available")]
    NoTablePath,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read script {path:?}: {source}")]
    ReadScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error("failed to render combo table: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Use the given table path, or fall back to the user config directory.
pub fn resolve_table_path(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    path.or_else(default_combo_dir).ok_or(CliError::NoTablePath)
}

/// List combos in priority order and report shadowed ones.
pub fn check(path: &Path) -> Result<ExitCode, CliError> {
    let set = combos::load_combo_set(path)?;

    println!(
        "{} combos, default gap {}",
        set.len(),
        format_gap(set.default_max_gap())
    );
    for (idx, combo) in set.combos().iter().enumerate() {
        println!(
            "{:>3}. {:<20} {:<40} gap {}",
            idx + 1,
            combo.display_name(),
            format_steps(combo.steps.as_slice()),
            format_gap(set.gap_for(combo))
        );
    }

    let shadowed = set.shadowed();
    if !shadowed.is_empty() {
        println!();
        println!("{} combo(s) can never complete:", shadowed.len());
        for shadow in &shadowed {
            println!("  {} (always preempted by {})", shadow.combo, shadow.by);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Print the normalised table as TOML.
pub fn show(path: &Path) -> Result<ExitCode, CliError> {
    let set = combos::load_combo_set(path)?;
    print!("{}", toml::to_string_pretty(&set.to_config())?);
    Ok(ExitCode::SUCCESS)
}

/// Replay a script and report outcomes and failed expectations.
pub fn replay_script(path: &Path, script_path: &Path, tick_ms: u64) -> Result<ExitCode, CliError> {
    let set: ComboSet = combos::load_combo_set(path)?;
    let text = std::fs::read_to_string(script_path).map_err(|e| CliError::ReadScript {
        path: script_path.to_path_buf(),
        source: e,
    })?;
    let script = parse_script(&text)?;

    let report = replay(set, &script, tick_ms);

    for event in &report.events {
        let detail = match &event.outcome {
            MatchOutcome::Completed(combo) => {
                format!("{} ({})", event.outcome, format_steps(combo.steps.as_slice()))
            }
            other => other.to_string(),
        };
        println!("{}  {}", format_timestamp_ms(event.at_ms), detail);
    }

    println!(
        "{} script lines, {} ticks, {} outcomes",
        script.len(),
        report.ticks,
        report.events.len()
    );

    if report.passed() {
        return Ok(ExitCode::SUCCESS);
    }

    for failure in &report.failures {
        println!(
            "FAILED line {}: expected {}, got {}",
            failure.line, failure.expected, failure.actual
        );
    }
    Ok(ExitCode::from(EXIT_EXPECTATIONS_FAILED))
}
