pub mod combos;
pub mod dispatch;
pub mod engine;
pub mod symbol;

// Re-exports for convenience
pub use combos::{ComboDefinition, ComboSet, ComboSetError, ConfigError, load_combo_set};
pub use dispatch::{ComboSession, OutcomeHandler, OutcomeLog};
pub use engine::{ComboEngine, MatchOutcome, ResetReason};
pub use symbol::ActionSymbol;
