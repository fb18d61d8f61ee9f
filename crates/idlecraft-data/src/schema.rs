//! Serde structs for the two content documents.
//!
//! `gameData` holds the catalog meta, narrative stages, generators, and
//! upgrades; `cards` holds card types and the combination rule. Field names
//! follow the shipped JSON files (including the camelCase generator fields);
//! snake_case aliases are accepted so RON and TOML files read naturally.

use idlecraft_core::catalog::Rarity;
use serde::{Deserialize, Serialize};

// ===========================================================================
// gameData
// ===========================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDataFile {
    pub meta: MetaData,
    pub narrative_stages: Vec<StageData>,
    #[serde(default)]
    pub generators: Vec<GeneratorData>,
    #[serde(default)]
    pub upgrades: Vec<UpgradeData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaData {
    pub engine: EngineMetaData,
    #[serde(default)]
    pub theme: MetaThemeData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineMetaData {
    pub tick_seconds_recommended: f64,
    #[serde(default)]
    pub currency_start: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaThemeData {
    pub currency_name: String,
}

impl Default for MetaThemeData {
    fn default() -> Self {
        Self {
            currency_name: "Coins".to_string(),
        }
    }
}

/// `{ "type": "auto" }`, `{ "type": "currency", "value": 500 }`, or
/// `{ "type": "narrative_stage", "value": "stage1" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum UnlockData {
    Auto,
    Currency(f64),
    NarrativeStage(String),
}

/// Display name plus a longer text. Stages call the text `story_text`,
/// everything else `description`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeData {
    pub name: String,
    #[serde(default, alias = "story_text")]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageData {
    pub id: String,
    pub order: u32,
    pub unlock_condition: UnlockData,
    pub theme: ThemeData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorData {
    pub id: String,
    #[serde(default)]
    pub tier: u32,
    #[serde(rename = "baseCost", alias = "base_cost")]
    pub base_cost: f64,
    #[serde(rename = "baseRate", alias = "base_rate")]
    pub base_rate: f64,
    #[serde(rename = "costScaling", alias = "cost_scaling")]
    pub cost_scaling: f64,
    pub unlock_condition: UnlockData,
    #[serde(default)]
    pub theme: ThemeData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiplierTargetData {
    Global,
    CurrencyPerClick,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpgradeEffectData {
    Multiplier {
        target: MultiplierTargetData,
        value: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeData {
    pub id: String,
    pub cost: f64,
    pub effect: UpgradeEffectData,
    pub unlock_condition: UnlockData,
    #[serde(default)]
    pub theme: ThemeData,
}

// ===========================================================================
// cards
// ===========================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardsFile {
    pub card_types: Vec<CardTypeData>,
    #[serde(default)]
    pub combination_rules: CombinationRulesData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardEffectKind {
    ClickPower,
    ClickMultiplier,
    AutoclickRate,
    GlobalMultiplier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardEffectData {
    #[serde(rename = "type")]
    pub kind: CardEffectKind,
    pub base_value: f64,
    #[serde(default)]
    pub scaling_per_level: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardTypeData {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "effect")]
    pub effects: CardEffectData,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub intrinsic_value: f64,
    #[serde(default = "unlock_auto")]
    pub unlock_condition: UnlockData,
}

fn unlock_auto() -> UnlockData {
    UnlockData::Auto
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombinationRulesData {
    #[serde(default)]
    pub basic_combination: BasicCombinationData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BasicCombinationData {
    #[serde(default)]
    pub input_requirements: InputRequirementsData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputRequirementsData {
    #[serde(default = "default_card_count")]
    pub card_count: usize,
    #[serde(default = "default_true")]
    pub same_name: bool,
    #[serde(default = "default_true")]
    pub same_rarity: bool,
}

impl Default for InputRequirementsData {
    fn default() -> Self {
        Self {
            card_count: default_card_count(),
            same_name: true,
            same_rarity: true,
        }
    }
}

fn default_card_count() -> usize {
    2
}

fn default_true() -> bool {
    true
}
