//! Combo definition type
//!
//! A definition is the immutable template for one combo: which symbols, in
//! which order, and how long the player may pause between them.

use std::time::Duration;

use crate::symbol::ActionSymbol;

/// Definition of a combo (registered once, never mutated afterwards)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboDefinition {
    /// Unique identifier the host uses to look up effects
    pub id: String,

    /// Display name (None = use id)
    pub name: Option<String>,

    /// Ordered steps; never empty once inside a `ComboSet`
    pub steps: Vec<ActionSymbol>,

    /// Maximum gap between two consecutive steps (None = set default)
    pub max_gap_override: Option<Duration>,
}

impl ComboDefinition {
    pub fn new<S: Into<ActionSymbol>>(
        id: impl Into<String>,
        steps: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            steps: steps.into_iter().map(Into::into).collect(),
            max_gap_override: None,
        }
    }

    pub fn with_max_gap(mut self, gap: Duration) -> Self {
        self.max_gap_override = Some(gap);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Number of steps in this combo
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// True if `pending` is exactly this combo, element for element.
    pub fn is_exact_match(&self, pending: &[ActionSymbol]) -> bool {
        self.steps == pending
    }

    /// True if `pending` is a (possibly complete) prefix of this combo.
    pub fn is_viable(&self, pending: &[ActionSymbol]) -> bool {
        self.steps.starts_with(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syms(names: &[&str]) -> Vec<ActionSymbol> {
        names.iter().map(|n| ActionSymbol::new(n)).collect()
    }

    #[test]
    fn test_exact_match_requires_same_length_and_order() {
        let combo = ComboDefinition::new("ab", ["A", "B"]);
        assert!(combo.is_exact_match(&syms(&["A", "B"])));
        assert!(!combo.is_exact_match(&syms(&["A"])));
        assert!(!combo.is_exact_match(&syms(&["B", "A"])));
        assert!(!combo.is_exact_match(&syms(&["A", "B", "B"])));
    }

    #[test]
    fn test_viable_prefixes() {
        let combo = ComboDefinition::new("abc", ["A", "B", "C"]);
        assert!(combo.is_viable(&syms(&["A"])));
        assert!(combo.is_viable(&syms(&["A", "B"])));
        assert!(combo.is_viable(&syms(&["A", "B", "C"])));
        assert!(!combo.is_viable(&syms(&["B"])));
        assert!(!combo.is_viable(&syms(&["A", "B", "C", "D"])));
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let combo = ComboDefinition::new("hadouken", ["Down", "Forward", "Punch"]);
        assert_eq!(combo.display_name(), "hadouken");
        let combo = combo.with_name("Hadouken!");
        assert_eq!(combo.display_name(), "Hadouken!");
    }
}
