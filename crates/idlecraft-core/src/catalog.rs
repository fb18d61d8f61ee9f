//! The content catalog: narrative stages, generators, upgrades, and card types.
//!
//! Built once through [`CatalogBuilder`] and frozen by [`CatalogBuilder::build`].
//! Entries get dense ids in registration order; the content's string keys
//! stay available for lookups.

use crate::effect::{CardEffect, UpgradeEffect};
use crate::fixed::Amount;
use crate::id::{CardTypeId, GeneratorId, StageId, UpgradeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of cards consumed by one combination. The selection cap matches it.
pub const COMBINE_ARITY: usize = 2;

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// When a piece of content becomes available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnlockCondition {
    /// Always available.
    Auto,
    /// Available while the player holds at least this much currency.
    CurrencyAtLeast(Amount),
    /// Available once the current stage's order reaches this stage's order.
    StageAtLeast(StageId),
}

/// A story checkpoint. Stages form a total order by `order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeStage {
    pub key: String,
    pub order: u32,
    pub unlock: UnlockCondition,
    pub title: String,
    pub story: String,
}

/// A repeatable purchase that produces currency every second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorDef {
    pub key: String,
    /// Informational only.
    pub tier: u32,
    pub base_cost: Amount,
    /// Currency per owned unit per second.
    pub base_rate: Amount,
    /// Cost multiplier per owned unit. Always greater than one.
    pub cost_scaling: Amount,
    pub unlock: UnlockCondition,
    pub name: String,
    pub description: String,
}

/// A one-time purchase with a permanent effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeDef {
    pub key: String,
    pub cost: Amount,
    pub effect: UpgradeEffect,
    pub unlock: UnlockCondition,
    pub name: String,
    pub description: String,
}

/// Card rarity. Compared for equality only, never ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// A collectible card type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardTypeDef {
    pub key: String,
    pub name: String,
    pub rarity: Rarity,
    pub description: String,
    pub effect: CardEffect,
    pub image: String,
    /// Sell price of a level-1 card; scales linearly with level.
    pub intrinsic_value: Amount,
    pub unlock: UnlockCondition,
}

/// Which selected pairs may be combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationRule {
    pub same_name: bool,
    pub same_rarity: bool,
}

impl Default for CombinationRule {
    fn default() -> Self {
        Self {
            same_name: true,
            same_rarity: true,
        }
    }
}

/// Catalog-wide settings shipped with the content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogMeta {
    /// Recommended simulation step, in seconds.
    pub tick_seconds: f64,
    pub currency_start: Amount,
    pub currency_name: String,
}

impl Default for CatalogMeta {
    fn default() -> Self {
        Self {
            tick_seconds: 0.1,
            currency_start: Amount::ZERO,
            currency_name: "Coins".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while assembling a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate {kind} key '{key}'")]
    DuplicateKey { kind: &'static str, key: String },

    #[error("{kind} '{key}': {detail}")]
    InvalidValue {
        kind: &'static str,
        key: String,
        detail: &'static str,
    },

    #[error("{kind} '{key}' references unknown stage {stage:?}")]
    UnknownStage {
        kind: &'static str,
        key: String,
        stage: StageId,
    },

    #[error("stages '{first}' and '{second}' share order {order}")]
    DuplicateStageOrder {
        first: String,
        second: String,
        order: u32,
    },

    #[error("catalog has no narrative stages")]
    NoStages,

    #[error("combination must consume exactly 2 cards, got {0}")]
    CombinationArity(usize),

    #[error("tick length must be a positive number of seconds, got {0}")]
    InvalidTick(f64),
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for constructing an immutable [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    meta: CatalogMeta,
    combination: CombinationRule,
    stages: Vec<NarrativeStage>,
    stage_keys: HashMap<String, StageId>,
    generators: Vec<GeneratorDef>,
    generator_keys: HashMap<String, GeneratorId>,
    upgrades: Vec<UpgradeDef>,
    upgrade_keys: HashMap<String, UpgradeId>,
    card_types: Vec<CardTypeDef>,
    card_type_keys: HashMap<String, CardTypeId>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_meta(&mut self, meta: CatalogMeta) -> &mut Self {
        self.meta = meta;
        self
    }

    /// Set the combination rule. Only pairwise combination is supported.
    pub fn set_combination_rule(
        &mut self,
        card_count: usize,
        rule: CombinationRule,
    ) -> Result<&mut Self, CatalogError> {
        if card_count != COMBINE_ARITY {
            return Err(CatalogError::CombinationArity(card_count));
        }
        self.combination = rule;
        Ok(self)
    }

    /// Look up a stage registered so far. Used to resolve unlock references.
    pub fn stage_id(&self, key: &str) -> Option<StageId> {
        self.stage_keys.get(key).copied()
    }

    pub fn register_stage(&mut self, stage: NarrativeStage) -> Result<StageId, CatalogError> {
        if self.stage_keys.contains_key(&stage.key) {
            return Err(CatalogError::DuplicateKey {
                kind: "stage",
                key: stage.key,
            });
        }
        if let UnlockCondition::CurrencyAtLeast(v) = stage.unlock
            && v < Amount::ZERO
        {
            return Err(invalid("stage", &stage.key, "currency threshold is negative"));
        }
        let id = StageId(self.stages.len() as u32);
        self.stage_keys.insert(stage.key.clone(), id);
        self.stages.push(stage);
        Ok(id)
    }

    pub fn register_generator(&mut self, def: GeneratorDef) -> Result<GeneratorId, CatalogError> {
        if self.generator_keys.contains_key(&def.key) {
            return Err(CatalogError::DuplicateKey {
                kind: "generator",
                key: def.key,
            });
        }
        if def.base_cost <= Amount::ZERO {
            return Err(invalid("generator", &def.key, "base cost must be positive"));
        }
        if def.base_rate < Amount::ZERO {
            return Err(invalid("generator", &def.key, "base rate is negative"));
        }
        if def.cost_scaling <= Amount::ONE {
            return Err(invalid("generator", &def.key, "cost scaling must exceed 1"));
        }
        let id = GeneratorId(self.generators.len() as u32);
        self.generator_keys.insert(def.key.clone(), id);
        self.generators.push(def);
        Ok(id)
    }

    pub fn register_upgrade(&mut self, def: UpgradeDef) -> Result<UpgradeId, CatalogError> {
        if self.upgrade_keys.contains_key(&def.key) {
            return Err(CatalogError::DuplicateKey {
                kind: "upgrade",
                key: def.key,
            });
        }
        if def.cost <= Amount::ZERO {
            return Err(invalid("upgrade", &def.key, "cost must be positive"));
        }
        let UpgradeEffect::Multiplier { value, .. } = def.effect;
        if value < Amount::ZERO {
            return Err(invalid("upgrade", &def.key, "multiplier is negative"));
        }
        let id = UpgradeId(self.upgrades.len() as u32);
        self.upgrade_keys.insert(def.key.clone(), id);
        self.upgrades.push(def);
        Ok(id)
    }

    pub fn register_card_type(&mut self, def: CardTypeDef) -> Result<CardTypeId, CatalogError> {
        if self.card_type_keys.contains_key(&def.key) {
            return Err(CatalogError::DuplicateKey {
                kind: "card type",
                key: def.key,
            });
        }
        if def.intrinsic_value < Amount::ZERO {
            return Err(invalid("card type", &def.key, "intrinsic value is negative"));
        }
        let curve = def.effect.curve();
        if curve.base < Amount::ZERO || curve.per_level < Amount::ZERO {
            return Err(invalid("card type", &def.key, "effect values must be non-negative"));
        }
        let id = CardTypeId(self.card_types.len() as u32);
        self.card_type_keys.insert(def.key.clone(), id);
        self.card_types.push(def);
        Ok(id)
    }

    /// Validate cross-references and freeze the catalog.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        if !(self.meta.tick_seconds.is_finite() && self.meta.tick_seconds > 0.0) {
            return Err(CatalogError::InvalidTick(self.meta.tick_seconds));
        }
        if self.meta.currency_start < Amount::ZERO {
            return Err(invalid("catalog", "meta", "starting currency is negative"));
        }
        if self.stages.is_empty() {
            return Err(CatalogError::NoStages);
        }

        let stage_count = self.stages.len() as u32;
        let check = |kind: &'static str, key: &str, unlock: &UnlockCondition| {
            match unlock {
                UnlockCondition::StageAtLeast(stage) if stage.0 >= stage_count => {
                    Err(CatalogError::UnknownStage {
                        kind,
                        key: key.to_string(),
                        stage: *stage,
                    })
                }
                _ => Ok(()),
            }
        };
        for s in &self.stages {
            check("stage", &s.key, &s.unlock)?;
        }
        for g in &self.generators {
            check("generator", &g.key, &g.unlock)?;
        }
        for u in &self.upgrades {
            check("upgrade", &u.key, &u.unlock)?;
        }
        for c in &self.card_types {
            check("card type", &c.key, &c.unlock)?;
        }

        let mut stage_order: Vec<StageId> = (0..stage_count).map(StageId).collect();
        stage_order.sort_by_key(|id| self.stages[id.0 as usize].order);
        for pair in stage_order.windows(2) {
            let a = &self.stages[pair[0].0 as usize];
            let b = &self.stages[pair[1].0 as usize];
            if a.order == b.order {
                return Err(CatalogError::DuplicateStageOrder {
                    first: a.key.clone(),
                    second: b.key.clone(),
                    order: a.order,
                });
            }
        }

        Ok(Catalog {
            meta: self.meta,
            combination: self.combination,
            stages: self.stages,
            stage_keys: self.stage_keys,
            stage_order,
            generators: self.generators,
            generator_keys: self.generator_keys,
            upgrades: self.upgrades,
            upgrade_keys: self.upgrade_keys,
            card_types: self.card_types,
            card_type_keys: self.card_type_keys,
        })
    }
}

fn invalid(kind: &'static str, key: &str, detail: &'static str) -> CatalogError {
    CatalogError::InvalidValue {
        kind,
        key: key.to_string(),
        detail,
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Immutable content catalog. Frozen after `build()`.
#[derive(Debug, Clone)]
pub struct Catalog {
    meta: CatalogMeta,
    combination: CombinationRule,
    stages: Vec<NarrativeStage>,
    stage_keys: HashMap<String, StageId>,
    /// Stage ids sorted by ascending `order`.
    stage_order: Vec<StageId>,
    generators: Vec<GeneratorDef>,
    generator_keys: HashMap<String, GeneratorId>,
    upgrades: Vec<UpgradeDef>,
    upgrade_keys: HashMap<String, UpgradeId>,
    card_types: Vec<CardTypeDef>,
    card_type_keys: HashMap<String, CardTypeId>,
}

impl Catalog {
    pub fn meta(&self) -> &CatalogMeta {
        &self.meta
    }

    pub fn combination_rule(&self) -> CombinationRule {
        self.combination
    }

    // -- Stages --

    pub fn stage(&self, id: StageId) -> Option<&NarrativeStage> {
        self.stages.get(id.0 as usize)
    }

    pub fn stage_by_key(&self, key: &str) -> Option<StageId> {
        self.stage_keys.get(key).copied()
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// The stage with the lowest order; every playthrough starts here.
    pub fn first_stage(&self) -> StageId {
        // `build` rejects empty stage lists.
        self.stage_order[0]
    }

    /// The stage that follows `id` in order, if any.
    pub fn next_stage(&self, id: StageId) -> Option<StageId> {
        let pos = self.stage_order.iter().position(|s| *s == id)?;
        self.stage_order.get(pos + 1).copied()
    }

    /// Stage ids in ascending order.
    pub fn stages_in_order(&self) -> &[StageId] {
        &self.stage_order
    }

    /// The order of a stage, or `None` for ids outside the catalog.
    pub fn stage_order(&self, id: StageId) -> Option<u32> {
        self.stage(id).map(|s| s.order)
    }

    // -- Generators --

    pub fn generator(&self, id: GeneratorId) -> Option<&GeneratorDef> {
        self.generators.get(id.0 as usize)
    }

    pub fn generator_by_key(&self, key: &str) -> Option<GeneratorId> {
        self.generator_keys.get(key).copied()
    }

    pub fn generator_count(&self) -> usize {
        self.generators.len()
    }

    pub fn generators(&self) -> impl Iterator<Item = (GeneratorId, &GeneratorDef)> {
        self.generators
            .iter()
            .enumerate()
            .map(|(i, g)| (GeneratorId(i as u32), g))
    }

    // -- Upgrades --

    pub fn upgrade(&self, id: UpgradeId) -> Option<&UpgradeDef> {
        self.upgrades.get(id.0 as usize)
    }

    pub fn upgrade_by_key(&self, key: &str) -> Option<UpgradeId> {
        self.upgrade_keys.get(key).copied()
    }

    pub fn upgrade_count(&self) -> usize {
        self.upgrades.len()
    }

    pub fn upgrades(&self) -> impl Iterator<Item = (UpgradeId, &UpgradeDef)> {
        self.upgrades
            .iter()
            .enumerate()
            .map(|(i, u)| (UpgradeId(i as u32), u))
    }

    // -- Card types --

    pub fn card_type(&self, id: CardTypeId) -> Option<&CardTypeDef> {
        self.card_types.get(id.0 as usize)
    }

    pub fn card_type_by_key(&self, key: &str) -> Option<CardTypeId> {
        self.card_type_keys.get(key).copied()
    }

    pub fn card_type_count(&self) -> usize {
        self.card_types.len()
    }

    pub fn card_types(&self) -> impl Iterator<Item = (CardTypeId, &CardTypeDef)> {
        self.card_types
            .iter()
            .enumerate()
            .map(|(i, c)| (CardTypeId(i as u32), c))
    }
}
