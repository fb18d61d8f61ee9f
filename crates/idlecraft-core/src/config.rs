//! Engine configuration: policy switches and the RNG seed.
//!
//! Catalog-provided settings (starting currency, recommended tick) live in
//! [`crate::catalog::CatalogMeta`]; everything here is chosen by the host.

use serde::{Deserialize, Serialize};

/// How a card's effect value grows with its level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardScaling {
    /// `base + per_level * (level - 1)`.
    #[default]
    Linear,
    /// `base * level`.
    PerLevel,
}

/// Level assigned to the card produced by a combination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineLevel {
    /// `max(level_a, level_b) + 1`. The result always outranks both inputs.
    #[default]
    HighestPlusOne,
    /// Level of the first (oldest) selected card plus one.
    FirstSelectedPlusOne,
}

/// Which card types a draw may produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPool {
    /// Only card types whose unlock condition currently holds.
    #[default]
    Unlocked,
    /// Every card type in the catalog, ignoring unlock conditions.
    Catalog,
}

/// Host-chosen engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for the card-draw RNG.
    pub seed: u64,
    pub card_scaling: CardScaling,
    pub combine_level: CombineLevel,
    pub draw_pool: DrawPool,
    /// Overrides the catalog's recommended tick length for `Engine::advance`.
    pub tick_seconds: Option<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0x1D1E_C0DE,
            card_scaling: CardScaling::default(),
            combine_level: CombineLevel::default(),
            draw_pool: DrawPool::default(),
            tick_seconds: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.card_scaling, CardScaling::Linear);
        assert_eq!(config.combine_level, CombineLevel::HighestPlusOne);
        assert_eq!(config.draw_pool, DrawPool::Unlocked);
        assert!(config.tick_seconds.is_none());
    }

    #[test]
    fn policies_use_snake_case_names() {
        let json = serde_json::to_string(&CombineLevel::FirstSelectedPlusOne).unwrap();
        assert_eq!(json, "\"first_selected_plus_one\"");
        let pool: DrawPool = serde_json::from_str("\"catalog\"").unwrap();
        assert_eq!(pool, DrawPool::Catalog);
    }
}
