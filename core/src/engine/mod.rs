//! Combo matching state machine.
//!
//! The engine has two states:
//! - Idle: nothing pending, waiting for the first symbol
//! - Accumulating: a prefix of at least one combo has been entered
//!
//! `submit` appends a symbol and resolves it against the [`ComboSet`]
//! (exact match first, then prefix viability). `tick` is driven by the host
//! every frame and abandons the sequence once the allowed gap has elapsed.
//! Every terminal outcome returns the engine to Idle.

mod outcome;


use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::combos::{ComboDefinition, ComboSet};
use crate::symbol::ActionSymbol;

pub use outcome::{MatchOutcome, ResetReason};

/// Mutable progress through the combo table. Owned by exactly one engine.
#[derive(Debug, Default)]
struct EngineState {
    pending: Vec<ActionSymbol>,
    last_event_time: Option<Instant>,
}

impl EngineState {
    fn clear(&mut self) {
        self.pending.clear();
        self.last_event_time = None;
    }
}

#[derive(Debug)]
pub struct ComboEngine {
    combos: ComboSet,
    state: EngineState,
}

impl ComboEngine {
    pub fn new(combos: ComboSet) -> Self {
        let state = EngineState {
            pending: Vec::with_capacity(combos.max_steps()),
            last_event_time: None,
        };
        Self { combos, state }
    }

    // ─── Input ──────────────────────────────────────────────────────────────

    /// Feed one action symbol observed at `now`.
    ///
    /// Matching is greedy: a combo that matches exactly fires immediately,
    /// even if the sequence is also a prefix of a longer combo.
    pub fn submit(&mut self, symbol: ActionSymbol, now: Instant) -> MatchOutcome {
        self.state.pending.push(symbol);
        self.state.last_event_time = Some(now);

        if let Some(winner) = self.combos.exact_match(&self.state.pending) {
            let winner = Arc::clone(winner);
            tracing::debug!(combo = %winner.id, steps = winner.len(), "Combo completed");
            self.state.clear();
            return MatchOutcome::Completed(winner);
        }

        if self.combos.viable(&self.state.pending).next().is_some() {
            tracing::trace!(
                symbol = %symbol,
                pending = self.state.pending.len(),
                "Sequence still viable"
            );
            return MatchOutcome::StillPending;
        }

        tracing::debug!(
            symbol = %symbol,
            pending = self.state.pending.len(),
            "Sequence no longer matches any combo"
        );
        self.state.clear();
        MatchOutcome::Reset(ResetReason::NoLongerViable)
    }

    /// Check the pending sequence against its timing window.
    ///
    /// Idle engines always report `StillPending`.
    pub fn tick(&mut self, now: Instant) -> MatchOutcome {
        let Some(last) = self.state.last_event_time else {
            return MatchOutcome::StillPending;
        };
        if self.state.pending.is_empty() {
            return MatchOutcome::StillPending;
        }

        let allowed = self.current_gap();
        let elapsed = now.saturating_duration_since(last);
        if elapsed > allowed {
            tracing::debug!(
                pending = self.state.pending.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                allowed_ms = allowed.as_millis() as u64,
                "Combo window expired"
            );
            self.state.clear();
            return MatchOutcome::Reset(ResetReason::TimedOut);
        }

        MatchOutcome::StillPending
    }

    /// Abandon any in-progress sequence. Idempotent.
    pub fn reset(&mut self) {
        if !self.state.pending.is_empty() {
            tracing::debug!(pending = self.state.pending.len(), "Sequence reset by host");
        }
        self.state.clear();
    }

    // ─── Queries ────────────────────────────────────────────────────────────

    /// Symbols accepted since the engine was last idle
    pub fn pending(&self) -> &[ActionSymbol] {
        &self.state.pending
    }

    /// When the most recent symbol was accepted (None while idle)
    pub fn last_event_time(&self) -> Option<Instant> {
        self.state.last_event_time
    }

    pub fn is_idle(&self) -> bool {
        self.state.pending.is_empty()
    }

    pub fn combo_set(&self) -> &ComboSet {
        &self.combos
    }

    /// Combos the pending sequence can still grow into (empty while idle)
    pub fn viable_combos(&self) -> impl Iterator<Item = &Arc<ComboDefinition>> {
        let idle = self.is_idle();
        self.combos
            .viable(&self.state.pending)
            .filter(move |_| !idle)
    }

    /// Gap the next symbol must arrive within (None while idle)
    pub fn allowed_gap(&self) -> Option<Duration> {
        if self.is_idle() {
            None
        } else {
            Some(self.current_gap())
        }
    }

    /// Time left before `tick(now)` would time the sequence out.
    ///
    /// `Some(Duration::ZERO)` once the window has passed, None while idle.
    pub fn time_remaining(&self, now: Instant) -> Option<Duration> {
        let last = self.state.last_event_time?;
        let allowed = self.allowed_gap()?;
        let deadline = last + allowed;
        Some(deadline.saturating_duration_since(now))
    }

    /// Most lenient gap among viable combos.
    ///
    /// A tightly-timed short combo must not expire a sequence that is still a
    /// valid prefix of a more lenient one.
    fn current_gap(&self) -> Duration {
        let gap = self
            .combos
            .viable(&self.state.pending)
            .map(|combo| self.combos.gap_for(combo))
            .max();

        match gap {
            Some(gap) => gap,
            None => {
                tracing::warn!(
                    pending = self.state.pending.len(),
                    "No viable combo for pending sequence, using default gap"
                );
                self.combos.default_max_gap()
            }
        }
    }
}
