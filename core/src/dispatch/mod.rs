//! Outcome dispatch
//!
//! The engine only returns outcomes; hosts that prefer push-style
//! notification wrap it in a [`ComboSession`] and register
//! [`OutcomeHandler`]s (effects, audio, UI) that receive every completed or
//! abandoned combo.

mod handler;
mod session;

pub use handler::{OutcomeHandler, OutcomeLog};
pub use session::ComboSession;
