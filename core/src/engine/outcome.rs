use std::fmt;
use std::sync::Arc;

use crate::combos::ComboDefinition;

/// Why an in-progress sequence was abandoned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResetReason {
    /// The pending sequence is no longer a prefix of any combo
    NoLongerViable,
    /// Too much time passed since the last accepted symbol
    TimedOut,
    /// The host abandoned the sequence (e.g., player stunned)
    ExplicitReset,
}

impl ResetReason {
    pub const ALL: [ResetReason; 3] = [Self::NoLongerViable, Self::TimedOut, Self::ExplicitReset];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoLongerViable => "no_longer_viable",
            Self::TimedOut => "timed_out",
            Self::ExplicitReset => "explicit_reset",
        }
    }
}

impl fmt::Display for ResetReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one `submit` or `tick` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// A combo finished; the engine is idle again
    Completed(Arc<ComboDefinition>),
    /// Nothing terminal happened
    StillPending,
    /// The sequence was abandoned; the engine is idle again
    Reset(ResetReason),
}

impl MatchOutcome {
    /// True for `Completed` and `Reset`, the outcomes hosts react to.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::StillPending)
    }

    pub fn completed(&self) -> Option<&Arc<ComboDefinition>> {
        match self {
            Self::Completed(combo) => Some(combo),
            _ => None,
        }
    }

    pub fn reset_reason(&self) -> Option<ResetReason> {
        match self {
            Self::Reset(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed(combo) => write!(f, "completed {}", combo.id),
            Self::StillPending => f.write_str("pending"),
            Self::Reset(reason) => write!(f, "reset {}", reason),
        }
    }
}
