//! Combo definitions and combo tables
//!
//! This module provides:
//! - **Definitions**: Immutable templates describing one combo's steps and timing
//! - **Sets**: Validated, priority-ordered collections the engine matches against
//! - **Config loading**: TOML combo tables from files or directories
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Combo table (TOML config)                    │
//! │      "hadouken = Down > Forward > Punch, 250ms between steps"   │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                      build_combo_set()
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    ComboSet (validated, ordered)                 │
//! │        priority order, default gap, shadowed-combo report        │
//! └─────────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                         ComboEngine
//! ```

mod config;
mod definition;
mod set;

pub use config::{
    ConfigError, build_combo_set, default_combo_dir, load_combo_set, load_directory, load_file,
    load_table, save_file,
};
pub use definition::ComboDefinition;
pub use set::{ComboSet, ComboSetError, Shadowed};
