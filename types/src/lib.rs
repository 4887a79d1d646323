//! Shared combo table types.
//!
//! These are the on-disk shapes of designer-authored combo tables. They carry
//! no matching logic; `combo-core` validates them into a `ComboSet`.

pub mod formatting;

use serde::{Deserialize, Serialize};

/// Gap used when no table specifies `default_max_gap_ms`.
pub const DEFAULT_MAX_GAP_MS: u64 = 500;

// ═══════════════════════════════════════════════════════════════════════════
// Combo Entries
// ═══════════════════════════════════════════════════════════════════════════

/// One combo as written in a table file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboConfig {
    /// Unique identifier the host uses to look up effects (e.g., "rising_dragon")
    pub id: String,

    /// Display name (None = use id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether this combo is registered at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Ordered action symbols, first to last
    #[serde(default)]
    pub steps: Vec<String>,

    /// Per-combo maximum gap between steps (None = table default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_gap_ms: Option<u64>,
}

impl ComboConfig {
    /// Name shown to players and in CLI output.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Table File Structure
// ═══════════════════════════════════════════════════════════════════════════

/// Root structure of a combo table file.
///
/// ```toml
/// default_max_gap_ms = 500
///
/// [[combo]]
/// id = "hadouken"
/// steps = ["Down", "Forward", "Punch"]
/// max_gap_ms = 250
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboTableConfig {
    /// Default maximum gap between steps for combos without an override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_max_gap_ms: Option<u64>,

    /// Combos in priority order
    #[serde(default, rename = "combo")]
    pub combos: Vec<ComboConfig>,
}

impl ComboTableConfig {
    /// Combos that should be registered, in file order.
    pub fn enabled_combos(&self) -> impl Iterator<Item = &ComboConfig> {
        self.combos.iter().filter(|c| c.enabled)
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table() {
        let toml = r#"
default_max_gap_ms = 400

[[combo]]
id = "light"
steps = ["Hit"]

[[combo]]
id = "uppercut"
name = "Rising Uppercut"
steps = ["Down", "Up", "Hit"]
max_gap_ms = 200
"#;

        let table: ComboTableConfig = toml::from_str(toml).unwrap();
        assert_eq!(table.default_max_gap_ms, Some(400));
        assert_eq!(table.combos.len(), 2);
        assert_eq!(table.combos[0].id, "light");
        assert!(table.combos[0].enabled);
        assert_eq!(table.combos[0].max_gap_ms, None);
        assert_eq!(table.combos[1].display_name(), "Rising Uppercut");
        assert_eq!(table.combos[1].steps, vec!["Down", "Up", "Hit"]);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let table: ComboTableConfig = toml::from_str("[[combo]]\nid = \"bare\"\n").unwrap();
        assert_eq!(table.default_max_gap_ms, None);
        assert!(table.combos[0].steps.is_empty());
        assert_eq!(table.combos[0].display_name(), "bare");
    }

    #[test]
    fn test_enabled_combos_skips_disabled() {
        let toml = r#"
[[combo]]
id = "a"
steps = ["A"]

[[combo]]
id = "b"
steps = ["B"]
enabled = false
"#;
        let table: ComboTableConfig = toml::from_str(toml).unwrap();
        let ids: Vec<_> = table.enabled_combos().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_serialize_omits_unset_options() {
        let table = ComboTableConfig {
            default_max_gap_ms: None,
            combos: vec![ComboConfig {
                id: "jab".to_string(),
                name: None,
                enabled: true,
                steps: vec!["Hit".to_string()],
                max_gap_ms: None,
            }],
        };
        let text = toml::to_string(&table).unwrap();
        assert!(!text.contains("max_gap_ms"));
        assert!(!text.contains("name"));
        assert!(text.contains("[[combo]]"));
    }
}
