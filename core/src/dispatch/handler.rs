use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::engine::MatchOutcome;

/// Trait for anything that reacts to combo outcomes (effects, UI, audio).
///
/// Only terminal outcomes (`Completed` / `Reset`) are delivered.
pub trait OutcomeHandler {
    fn handle_outcome(&mut self, outcome: &MatchOutcome, at: Instant);
}

/// Records every outcome it receives, in order.
///
/// Clones share the same log, so one clone can be registered with a
/// [`ComboSession`](super::ComboSession) while another is read by the host.
#[derive(Debug, Default, Clone)]
pub struct OutcomeLog {
    entries: Arc<Mutex<Vec<(Instant, MatchOutcome)>>>,
}

impl OutcomeLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(Instant, MatchOutcome)>> {
        // A panicking handler elsewhere doesn't invalidate recorded outcomes
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of everything recorded so far
    pub fn entries(&self) -> Vec<(Instant, MatchOutcome)> {
        self.lock().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<(Instant, MatchOutcome)> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Ids of completed combos, oldest first
    pub fn completed_ids(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|(_, o)| o.completed().map(|c| c.id.clone()))
            .collect()
    }
}

impl OutcomeHandler for OutcomeLog {
    fn handle_outcome(&mut self, outcome: &MatchOutcome, at: Instant) {
        self.lock().push((at, outcome.clone()));
    }
}
