//! Script replay against a combo set.
//!
//! The replay mimics a host frame loop: between two script lines it injects
//! `tick` calls every `tick_ms`, so timeouts fire when a game would see them.

use std::time::{Duration, Instant};

use combo_core::{ActionSymbol, ComboSession, ComboSet, MatchOutcome, OutcomeLog};

use crate::script::{Command, Expectation, ScriptLine};

/// A terminal outcome observed during replay
#[derive(Debug, Clone)]
pub struct ReplayEvent {
    /// Milliseconds since replay start
    pub at_ms: u64,
    pub outcome: MatchOutcome,
}

/// An `expect` line that did not hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectFailure {
    pub line: usize,
    pub expected: String,
    pub actual: String,
}

#[derive(Debug, Default)]
pub struct ReplayReport {
    pub events: Vec<ReplayEvent>,
    pub failures: Vec<ExpectFailure>,
    pub ticks: usize,
}

impl ReplayReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run `script` against a fresh engine over `combos`.
///
/// `tick_ms = 0` disables injected ticks; only explicit `tick` lines run.
pub fn replay(combos: ComboSet, script: &[ScriptLine], tick_ms: u64) -> ReplayReport {
    let base = Instant::now();
    let at = |ms: u64| base + Duration::from_millis(ms);

    let log = OutcomeLog::new();
    let mut session = ComboSession::new(combos);
    session.add_handler(Box::new(log.clone()));

    let mut report = ReplayReport::default();
    // Outcomes since the previous `expect` line
    let mut window: Vec<MatchOutcome> = Vec::new();
    let mut clock_ms = 0;

    for line in script {
        if tick_ms > 0 {
            // Ticks sit on a fixed grid, like frames
            let mut next_tick = (clock_ms / tick_ms + 1) * tick_ms;
            while next_tick < line.at_ms {
                session.tick(at(next_tick));
                report.ticks += 1;
                next_tick += tick_ms;
            }
        }
        clock_ms = line.at_ms;
        let now = at(line.at_ms);

        match &line.command {
            Command::Press(name) => {
                session.submit(ActionSymbol::new(name), now);
            }
            Command::Tick => {
                session.tick(now);
                report.ticks += 1;
            }
            Command::Reset => session.reset(now),
            Command::Expect(expectation) => {
                collect(&log, base, &mut report, &mut window);
                if let Err(actual) = check(expectation, &window, session.engine().is_idle()) {
                    tracing::debug!(line = line.line, %actual, "Expectation failed");
                    report.failures.push(ExpectFailure {
                        line: line.line,
                        expected: describe(expectation),
                        actual,
                    });
                }
                window.clear();
                continue;
            }
        }
        collect(&log, base, &mut report, &mut window);
    }

    report
}

/// Move newly dispatched outcomes into the report and the expectation window.
fn collect(
    log: &OutcomeLog,
    base: Instant,
    report: &mut ReplayReport,
    window: &mut Vec<MatchOutcome>,
) {
    for (at, outcome) in log.drain() {
        let at_ms = u64::try_from(at.duration_since(base).as_millis()).unwrap_or(u64::MAX);
        window.push(outcome.clone());
        report.events.push(ReplayEvent { at_ms, outcome });
    }
}

fn check(expectation: &Expectation, window: &[MatchOutcome], idle: bool) -> Result<(), String> {
    let holds = match expectation {
        Expectation::Completed(id) => window
            .iter()
            .any(|o| o.completed().is_some_and(|c| &c.id == id)),
        Expectation::Reset(reason) => window.iter().any(|o| o.reset_reason() == Some(*reason)),
        Expectation::Pending => window.is_empty() && !idle,
        Expectation::Idle => idle,
    };
    if holds {
        return Ok(());
    }

    let state = if idle { "idle" } else { "pending" };
    if window.is_empty() {
        Err(format!("no outcome, engine {}", state))
    } else {
        let seen: Vec<String> = window.iter().map(ToString::to_string).collect();
        Err(format!("{}, engine {}", seen.join(", "), state))
    }
}

fn describe(expectation: &Expectation) -> String {
    match expectation {
        Expectation::Completed(id) => format!("completed {}", id),
        Expectation::Reset(reason) => format!("reset {}", reason),
        Expectation::Pending => "pending".to_string(),
        Expectation::Idle => "idle".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;
    use combo_core::{ComboDefinition, ResetReason};

    fn make_set() -> ComboSet {
        ComboSet::new(
            vec![
                ComboDefinition::new("a", ["Up", "Down"])
                    .with_max_gap(Duration::from_millis(200)),
                ComboDefinition::new("light", ["Hit"]),
                ComboDefinition::new("combo2", ["Hit", "Hit"]),
            ],
            Duration::from_millis(500),
        )
        .unwrap()
    }

    #[test]
    fn test_injected_ticks_time_out_sequence() {
        let script = parse_script(
            "0 press Up\n100 expect pending\n300 expect reset timed_out\n300 expect idle\n",
        )
        .unwrap();

        let report = replay(make_set(), &script, 16);

        assert!(report.passed(), "{:?}", report.failures);
        assert_eq!(report.events.len(), 1);
        assert_eq!(
            report.events[0].outcome,
            MatchOutcome::Reset(ResetReason::TimedOut)
        );
        // First tick past the 200ms window (16ms cadence)
        assert_eq!(report.events[0].at_ms, 208);
    }

    #[test]
    fn test_without_ticks_window_only_closes_on_input() {
        let script = parse_script("0 press Up\n300 expect pending\n").unwrap();
        let report = replay(make_set(), &script, 0);
        assert!(report.passed());
        assert_eq!(report.ticks, 0);
    }

    #[test]
    fn test_greedy_match_reported() {
        let script = parse_script(
            "0 press Hit\n0 expect completed light\n50 press Hit\n50 expect completed combo2\n",
        )
        .unwrap();

        let report = replay(make_set(), &script, 16);

        assert_eq!(report.failures.len(), 1);
        let failure = &report.failures[0];
        assert_eq!(failure.line, 4);
        assert_eq!(failure.expected, "completed combo2");
        assert_eq!(failure.actual, "completed light, engine idle");
    }

    #[test]
    fn test_explicit_reset_dispatched() {
        let script =
            parse_script("0 press Up\n10 reset\n10 expect reset explicit_reset\n").unwrap();
        let report = replay(make_set(), &script, 16);
        assert!(report.passed(), "{:?}", report.failures);
    }
}
