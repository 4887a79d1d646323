//! Combo table loading
//!
//! Tables are TOML files (see [`ComboTableConfig`]). A single file or a whole
//! directory can be loaded; directory files are read in file-name order so
//! priority between files is deterministic.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use combo_types::{ComboTableConfig, DEFAULT_MAX_GAP_MS};

use super::definition::ComboDefinition;
use super::set::{ComboSet, ComboSetError};

/// Errors that can occur during combo table loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("combo table path {path:?} does not exist")]
    NotFound { path: PathBuf },

    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("serialize error for {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: toml::ser::Error,
    },

    #[error("invalid combo table {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ComboSetError,
    },
}

/// Load a file or a directory of tables and build a validated set.
pub fn load_combo_set(path: &Path) -> Result<ComboSet, ConfigError> {
    let table = load_table(path)?;
    let set = build_combo_set(&table).map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    for shadow in set.shadowed() {
        tracing::warn!(
            combo = %shadow.combo,
            by = %shadow.by,
            "Combo can never complete: another combo always fires first"
        );
    }
    tracing::info!(path = ?path, combos = set.len(), "Loaded combo table");

    Ok(set)
}

/// Load a file or directory into a single merged table (no validation).
pub fn load_table(path: &Path) -> Result<ComboTableConfig, ConfigError> {
    if path.is_dir() {
        load_directory(path)
    } else if path.exists() {
        load_file(path)
    } else {
        Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Load all TOML files from a directory, merged in file-name order.
///
/// Files that fail to read or parse are skipped with a warning; the rest
/// still load.
pub fn load_directory(dir: &Path) -> Result<ComboTableConfig, ConfigError> {
    let entries = fs::read_dir(dir).map_err(|e| ConfigError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    let mut merged = ComboTableConfig::default();
    for path in paths {
        match load_file(&path) {
            Ok(table) => merge_into(&mut merged, table, &path),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping combo table");
            }
        }
    }

    Ok(merged)
}

/// Load a single TOML table file
pub fn load_file(path: &Path) -> Result<ComboTableConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save a table to a TOML file
pub fn save_file(path: &Path, table: &ComboTableConfig) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(table).map_err(|e| ConfigError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;

    fs::write(path, contents).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Validate a table into a [`ComboSet`], dropping disabled combos.
pub fn build_combo_set(table: &ComboTableConfig) -> Result<ComboSet, ComboSetError> {
    let default_gap =
        Duration::from_millis(table.default_max_gap_ms.unwrap_or(DEFAULT_MAX_GAP_MS));

    let combos = table.enabled_combos().map(|cfg| ComboDefinition {
        id: cfg.id.clone(),
        name: cfg.name.clone(),
        steps: cfg.steps.iter().map(Into::into).collect(),
        max_gap_override: cfg.max_gap_ms.map(Duration::from_millis),
    });

    ComboSet::new(combos, default_gap)
}

/// Get the default user combo table directory
pub fn default_combo_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("combo-engine").join("combos"))
}

fn merge_into(merged: &mut ComboTableConfig, table: ComboTableConfig, path: &Path) {
    if merged.default_max_gap_ms.is_none() {
        merged.default_max_gap_ms = table.default_max_gap_ms;
    } else if table.default_max_gap_ms.is_some()
        && table.default_max_gap_ms != merged.default_max_gap_ms
    {
        tracing::warn!(
            file = ?path.file_name(),
            "Ignoring default_max_gap_ms: an earlier table already set it"
        );
    }

    let duplicates: Vec<&str> = table
        .combos
        .iter()
        .filter(|c| merged.combos.iter().any(|m| m.id == c.id))
        .map(|c| c.id.as_str())
        .collect();
    if !duplicates.is_empty() {
        tracing::warn!(file = ?path.file_name(), ?duplicates, "Duplicate combo IDs");
    }

    merged.combos.extend(table.combos);
}
