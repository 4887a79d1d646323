//! Validated, ordered collection of combo definitions.
//!
//! Order is priority: when several combos match the pending sequence exactly,
//! the one registered first wins. Duplicates and prefix-overlapping combos
//! are legal; [`ComboSet::shadowed`] reports which of them can never fire.

use std::sync::Arc;
use std::time::Duration;

use hashbrown::HashMap;

use combo_types::{ComboConfig, ComboTableConfig};

use super::definition::ComboDefinition;
use crate::symbol::ActionSymbol;

/// Construction-time rejection of a combo table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComboSetError {
    #[error("default max gap must be greater than zero")]
    NonPositiveGap,

    #[error("combo #{index} has an empty id")]
    EmptyId { index: usize },

    #[error("combo '{id}' has no steps")]
    EmptySteps { id: String },

    #[error("combo '{id}' has a zero max gap override")]
    NonPositiveOverride { id: String },
}

/// A combo that greedy matching can never complete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shadowed {
    /// The unreachable combo
    pub combo: String,
    /// The combo that always fires first
    pub by: String,
}

#[derive(Debug, Clone)]
pub struct ComboSet {
    combos: Vec<Arc<ComboDefinition>>,
    default_max_gap: Duration,
}

impl ComboSet {
    /// Validate and register combos in priority order.
    pub fn new(
        combos: impl IntoIterator<Item = ComboDefinition>,
        default_max_gap: Duration,
    ) -> Result<Self, ComboSetError> {
        if default_max_gap.is_zero() {
            return Err(ComboSetError::NonPositiveGap);
        }

        let mut registered = Vec::new();
        for (index, combo) in combos.into_iter().enumerate() {
            if combo.id.trim().is_empty() {
                return Err(ComboSetError::EmptyId { index });
            }
            if combo.steps.is_empty() {
                return Err(ComboSetError::EmptySteps { id: combo.id });
            }
            if combo.max_gap_override.is_some_and(|gap| gap.is_zero()) {
                return Err(ComboSetError::NonPositiveOverride { id: combo.id });
            }
            registered.push(Arc::new(combo));
        }

        Ok(Self {
            combos: registered,
            default_max_gap,
        })
    }

    /// All combos in priority order
    pub fn combos(&self) -> &[Arc<ComboDefinition>] {
        &self.combos
    }

    pub fn default_max_gap(&self) -> Duration {
        self.default_max_gap
    }

    /// First combo registered with `id`
    pub fn get(&self, id: &str) -> Option<&Arc<ComboDefinition>> {
        self.combos.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.combos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    /// Length of the longest combo; the engine never holds more pending steps.
    pub fn max_steps(&self) -> usize {
        self.combos.iter().map(|c| c.len()).max().unwrap_or(0)
    }

    /// Effective gap for a combo (override or set default)
    pub fn gap_for(&self, combo: &ComboDefinition) -> Duration {
        combo.max_gap_override.unwrap_or(self.default_max_gap)
    }

    /// Highest-priority combo whose steps equal `pending`.
    pub fn exact_match(&self, pending: &[ActionSymbol]) -> Option<&Arc<ComboDefinition>> {
        self.combos.iter().find(|c| c.is_exact_match(pending))
    }

    /// Combos that `pending` is still a prefix of.
    pub fn viable<'a>(
        &'a self,
        pending: &'a [ActionSymbol],
    ) -> impl Iterator<Item = &'a Arc<ComboDefinition>> + 'a {
        self.combos.iter().filter(move |c| c.is_viable(pending))
    }

    /// Combos that can never complete because another combo always fires first.
    ///
    /// A combo is shadowed by an earlier combo with identical steps, or by any
    /// combo whose steps are a strict prefix of its own. The reported `by` is
    /// the combo that would actually fire (shortest prefix, highest priority).
    pub fn shadowed(&self) -> Vec<Shadowed> {
        // steps -> index of the first combo registered with exactly those steps
        let mut first_by_steps: HashMap<&[ActionSymbol], usize> = HashMap::new();
        for (idx, combo) in self.combos.iter().enumerate() {
            first_by_steps.entry(combo.steps.as_slice()).or_insert(idx);
        }

        let mut result = Vec::new();
        for (idx, combo) in self.combos.iter().enumerate() {
            let winner = (1..=combo.steps.len()).find_map(|len| {
                let owner = *first_by_steps.get(&combo.steps[..len])?;
                (owner != idx).then_some(owner)
            });
            if let Some(owner) = winner {
                result.push(Shadowed {
                    combo: combo.id.clone(),
                    by: self.combos[owner].id.clone(),
                });
            }
        }
        result
    }

    /// Convert back into the on-disk table shape.
    pub fn to_config(&self) -> ComboTableConfig {
        ComboTableConfig {
            default_max_gap_ms: Some(duration_to_ms(self.default_max_gap)),
            combos: self
                .combos
                .iter()
                .map(|c| ComboConfig {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    enabled: true,
                    steps: c.steps.iter().map(|s| s.as_str().to_string()).collect(),
                    max_gap_ms: c.max_gap_override.map(duration_to_ms),
                })
                .collect(),
        }
    }
}

fn duration_to_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
