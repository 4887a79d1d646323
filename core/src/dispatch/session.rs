use std::time::Instant;

use crate::combos::ComboSet;
use crate::engine::{ComboEngine, MatchOutcome, ResetReason};
use crate::symbol::ActionSymbol;

use super::OutcomeHandler;

/// A combo engine plus the handlers that react to its outcomes.
///
/// All calls must come from a single writer; the session does no locking.
pub struct ComboSession {
    engine: ComboEngine,
    handlers: Vec<Box<dyn OutcomeHandler + Send>>,
}

impl ComboSession {
    pub fn new(combos: ComboSet) -> Self {
        Self {
            engine: ComboEngine::new(combos),
            handlers: Vec::new(),
        }
    }

    /// Register a handler to receive terminal outcomes
    pub fn add_handler(&mut self, handler: Box<dyn OutcomeHandler + Send>) {
        self.handlers.push(handler);
    }

    pub fn engine(&self) -> &ComboEngine {
        &self.engine
    }

    /// Feed a symbol, dispatching any terminal outcome.
    ///
    /// The pending window is checked first, so a symbol arriving after the
    /// window closed starts a new sequence instead of extending a stale one.
    pub fn submit(&mut self, symbol: ActionSymbol, now: Instant) -> MatchOutcome {
        self.tick(now);
        let outcome = self.engine.submit(symbol, now);
        self.dispatch(&outcome, now);
        outcome
    }

    /// Advance time, dispatching a timeout if one occurs.
    pub fn tick(&mut self, now: Instant) -> MatchOutcome {
        let outcome = self.engine.tick(now);
        self.dispatch(&outcome, now);
        outcome
    }

    /// Abandon the current sequence.
    ///
    /// Dispatches `Reset(ExplicitReset)` only if a sequence was in progress.
    pub fn reset(&mut self, now: Instant) {
        if self.engine.is_idle() {
            return;
        }
        self.engine.reset();
        self.dispatch(&MatchOutcome::Reset(ResetReason::ExplicitReset), now);
    }

    fn dispatch(&mut self, outcome: &MatchOutcome, at: Instant) {
        if !outcome.is_terminal() {
            return;
        }
        for handler in &mut self.handlers {
            handler.handle_outcome(outcome, at);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::combos::ComboDefinition;
    use crate::dispatch::OutcomeLog;

    fn make_session() -> (ComboSession, OutcomeLog) {
        let set = ComboSet::new(
            vec![
                ComboDefinition::new("ab", ["A", "B"]).with_max_gap(Duration::from_millis(200)),
                ComboDefinition::new("c", ["C"]),
            ],
            Duration::from_millis(500),
        )
        .unwrap();
        let log = OutcomeLog::new();
        let mut session = ComboSession::new(set);
        session.add_handler(Box::new(log.clone()));
        (session, log)
    }

    fn sym(name: &str) -> ActionSymbol {
        ActionSymbol::new(name)
    }

    fn outcomes(log: &OutcomeLog) -> Vec<MatchOutcome> {
        log.entries().into_iter().map(|(_, o)| o).collect()
    }

    #[test]
    fn test_only_terminal_outcomes_are_dispatched() {
        let (mut session, log) = make_session();
        let t0 = Instant::now();

        session.submit(sym("A"), t0);
        session.tick(t0 + Duration::from_millis(50));
        session.submit(sym("B"), t0 + Duration::from_millis(100));

        assert_eq!(log.completed_ids(), vec!["ab".to_string()]);
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].0, t0 + Duration::from_millis(100));
    }

    #[test]
    fn test_late_submit_times_out_before_accepting() {
        let (mut session, log) = make_session();
        let t0 = Instant::now();

        session.submit(sym("A"), t0);
        // No ticks in between; B arrives after the 200ms window
        let outcome = session.submit(sym("B"), t0 + Duration::from_millis(400));

        assert_eq!(outcome, MatchOutcome::Reset(ResetReason::NoLongerViable));
        assert_eq!(
            outcomes(&log),
            vec![
                MatchOutcome::Reset(ResetReason::TimedOut),
                MatchOutcome::Reset(ResetReason::NoLongerViable),
            ]
        );
    }

    #[test]
    fn test_explicit_reset_only_when_accumulating() {
        let (mut session, log) = make_session();
        let t0 = Instant::now();

        session.reset(t0);
        assert!(log.is_empty());

        session.submit(sym("A"), t0);
        session.reset(t0 + Duration::from_millis(10));
        session.reset(t0 + Duration::from_millis(20));

        assert!(session.engine().is_idle());
        assert_eq!(
            outcomes(&log),
            vec![MatchOutcome::Reset(ResetReason::ExplicitReset)]
        );
    }

    #[test]
    fn test_every_handler_receives_outcome() {
        let (mut session, first) = make_session();
        let second = OutcomeLog::new();
        session.add_handler(Box::new(second.clone()));

        session.submit(sym("C"), Instant::now());

        assert_eq!(first.completed_ids(), vec!["c".to_string()]);
        assert_eq!(second.completed_ids(), vec!["c".to_string()]);
    }

    #[test]
    fn test_drain_empties_log() {
        let (mut session, log) = make_session();
        session.submit(sym("C"), Instant::now());

        assert_eq!(log.drain().len(), 1);
        assert!(log.is_empty());
    }
}
