//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::catalog::*;
use crate::effect::{CardEffect, LevelCurve, MultiplierTarget, UpgradeEffect};
use crate::fixed::{Amount, f64_to_amount};
use crate::id::StageId;

// ===========================================================================
// Fixed-point helper
// ===========================================================================

pub fn amount(v: f64) -> Amount {
    f64_to_amount(v)
}

// ===========================================================================
// Definition constructors
// ===========================================================================

pub fn stage(key: &str, order: u32, unlock: UnlockCondition, title: &str, story: &str) -> NarrativeStage {
    NarrativeStage {
        key: key.to_string(),
        order,
        unlock,
        title: title.to_string(),
        story: story.to_string(),
    }
}

pub fn generator(
    key: &str,
    name: &str,
    base_cost: f64,
    base_rate: f64,
    cost_scaling: f64,
    unlock: UnlockCondition,
) -> GeneratorDef {
    GeneratorDef {
        key: key.to_string(),
        tier: 1,
        base_cost: amount(base_cost),
        base_rate: amount(base_rate),
        cost_scaling: amount(cost_scaling),
        unlock,
        name: name.to_string(),
        description: String::new(),
    }
}

pub fn multiplier_upgrade(
    key: &str,
    cost: f64,
    target: MultiplierTarget,
    value: f64,
    unlock: UnlockCondition,
) -> UpgradeDef {
    UpgradeDef {
        key: key.to_string(),
        cost: amount(cost),
        effect: UpgradeEffect::Multiplier {
            target,
            value: amount(value),
        },
        unlock,
        name: key.to_string(),
        description: String::new(),
    }
}

pub fn card_type(
    key: &str,
    name: &str,
    rarity: Rarity,
    effect: CardEffect,
    intrinsic_value: f64,
    unlock: UnlockCondition,
) -> CardTypeDef {
    CardTypeDef {
        key: key.to_string(),
        name: name.to_string(),
        rarity,
        description: String::new(),
        effect,
        image: String::new(),
        intrinsic_value: amount(intrinsic_value),
        unlock,
    }
}

pub fn curve(base: f64, per_level: f64) -> LevelCurve {
    LevelCurve::new(amount(base), amount(per_level))
}

// ===========================================================================
// Catalogs
// ===========================================================================

/// Register the two stages, two generators, one upgrade, and two card types
/// of the built-in content. Returns the stage ids.
fn register_default_content(b: &mut CatalogBuilder) -> (StageId, StageId) {
    b.set_meta(CatalogMeta {
        tick_seconds: 0.1,
        currency_start: amount(100.0),
        currency_name: "Coins".to_string(),
    });
    let stage1 = b
        .register_stage(stage(
            "stage1",
            1,
            UnlockCondition::Auto,
            "Glass in Crypto Castle",
            "In the beginning, there was just a glass of water in a castle made of promises...",
        ))
        .unwrap();
    let stage2 = b
        .register_stage(stage(
            "stage2",
            2,
            UnlockCondition::CurrencyAtLeast(amount(500.0)),
            "Bitcoin Wizard Jesus: Water → Wine",
            "And lo, the water became wine, and the people said 'surely this is magic'...",
        ))
        .unwrap();

    b.register_generator(generator(
        "generator1",
        "Tap Wallet",
        10.0,
        2.0,
        1.15,
        UnlockCondition::StageAtLeast(stage1),
    ))
    .unwrap();
    b.register_generator(generator(
        "generator2",
        "Solo Miner",
        100.0,
        8.0,
        1.15,
        UnlockCondition::StageAtLeast(stage1),
    ))
    .unwrap();

    b.register_upgrade(multiplier_upgrade(
        "upgrade1",
        300.0,
        MultiplierTarget::Global,
        2.0,
        UnlockCondition::StageAtLeast(stage2),
    ))
    .unwrap();

    b.register_card_type(card_type(
        "btc_miner",
        "Bitcoin Miner",
        Rarity::Common,
        CardEffect::ClickPower(curve(2.0, 1.5)),
        25.0,
        UnlockCondition::StageAtLeast(stage1),
    ))
    .unwrap();
    b.register_card_type(card_type(
        "eth_staker",
        "ETH Staker",
        Rarity::Uncommon,
        CardEffect::AutoclickRate(curve(1.0, 0.8)),
        75.0,
        UnlockCondition::StageAtLeast(stage2),
    ))
    .unwrap();

    (stage1, stage2)
}

/// The built-in content: start at 100 coins, stage 2 at 500 coins.
pub fn sample_catalog() -> Catalog {
    let mut b = CatalogBuilder::new();
    register_default_content(&mut b);
    b.build().unwrap()
}

/// The built-in content with a custom combination rule.
pub fn catalog_with_rule(rule: CombinationRule) -> Catalog {
    let mut b = CatalogBuilder::new();
    register_default_content(&mut b);
    b.set_combination_rule(COMBINE_ARITY, rule).unwrap();
    b.build().unwrap()
}

/// The built-in content plus one of every effect kind.
pub fn rich_catalog() -> Catalog {
    let mut b = CatalogBuilder::new();
    let (stage1, _) = register_default_content(&mut b);
    b.register_upgrade(multiplier_upgrade(
        "water_to_wine",
        50.0,
        MultiplierTarget::Global,
        2.0,
        UnlockCondition::Auto,
    ))
    .unwrap();
    b.register_upgrade(multiplier_upgrade(
        "golden_finger",
        50.0,
        MultiplierTarget::CurrencyPerClick,
        3.0,
        UnlockCondition::Auto,
    ))
    .unwrap();
    b.register_card_type(card_type(
        "whale_hands",
        "Whale Hands",
        Rarity::Rare,
        CardEffect::ClickMultiplier(curve(2.0, 0.5)),
        200.0,
        UnlockCondition::StageAtLeast(stage1),
    ))
    .unwrap();
    b.register_card_type(card_type(
        "halving_halo",
        "Halving Halo",
        Rarity::Epic,
        CardEffect::GlobalMultiplier(curve(1.5, 0.25)),
        500.0,
        UnlockCondition::StageAtLeast(stage1),
    ))
    .unwrap();
    b.build().unwrap()
}

/// One stage, and a card type that only unlocks at a balance nobody has.
pub fn catalog_with_locked_cards() -> Catalog {
    let mut b = CatalogBuilder::new();
    b.register_stage(stage("only", 1, UnlockCondition::Auto, "Only", ""))
        .unwrap();
    b.register_card_type(card_type(
        "unobtainium",
        "Unobtainium",
        Rarity::Legendary,
        CardEffect::ClickPower(curve(100.0, 0.0)),
        1.0,
        UnlockCondition::CurrencyAtLeast(amount(1.0e12)),
    ))
    .unwrap();
    b.build().unwrap()
}

/// A single cheap generator and a long chain of currency-gated stages, for
/// long-running property tests and benchmarks.
pub fn ladder_catalog(stages: u32) -> Catalog {
    let mut b = CatalogBuilder::new();
    b.set_meta(CatalogMeta {
        tick_seconds: 0.5,
        currency_start: amount(10.0),
        currency_name: "Coins".to_string(),
    });
    b.register_stage(stage("rung0", 0, UnlockCondition::Auto, "Rung 0", ""))
        .unwrap();
    for i in 1..stages {
        let threshold = amount(f64::from(i) * 25.0);
        b.register_stage(stage(
            &format!("rung{i}"),
            i,
            UnlockCondition::CurrencyAtLeast(threshold),
            &format!("Rung {i}"),
            "",
        ))
        .unwrap();
    }
    b.register_generator(generator(
        "drip",
        "Drip",
        5.0,
        1.0,
        1.1,
        UnlockCondition::Auto,
    ))
    .unwrap();
    b.register_card_type(card_type(
        "pebble",
        "Pebble",
        Rarity::Common,
        CardEffect::AutoclickRate(curve(0.5, 0.5)),
        3.0,
        UnlockCondition::Auto,
    ))
    .unwrap();
    b.build().unwrap()
}
