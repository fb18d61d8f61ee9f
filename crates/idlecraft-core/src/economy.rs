//! Pure economy math: production rate, click yield, and generator costs.
//!
//! Nothing here mutates state. The engine calls these to decide how much to
//! credit or debit; the display calls them to show prices and rates.

use crate::catalog::{Catalog, GeneratorDef};
use crate::config::CardScaling;
use crate::effect::{CardEffect, MultiplierTarget, UpgradeEffect};
use crate::fixed::{Amount, amount_to_f64, f64_to_amount};
use crate::progress::PlayerProgress;
use serde::{Deserialize, Serialize};

/// Additive value of a click before any multiplier.
pub const BASE_CLICK_VALUE: Amount = Amount::ONE;

// ---------------------------------------------------------------------------
// Generator cost curve
// ---------------------------------------------------------------------------

/// Price of the next unit: `floor(base_cost * cost_scaling ^ owned)`.
///
/// Evaluated in f64 on the content's own values, which round-trip through
/// `Amount` exactly, so prices match the shipped balance: `1000 × 1.15` is
/// 1150 and `100 × 1.15` is 114. Overflow saturates.
pub fn generator_cost(def: &GeneratorDef, owned: u32) -> Amount {
    let base = amount_to_f64(def.base_cost);
    let scaling = amount_to_f64(def.cost_scaling);
    f64_to_amount((base * scaling.powf(f64::from(owned))).floor())
}

// ---------------------------------------------------------------------------
// Production
// ---------------------------------------------------------------------------

/// Passive production split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionBreakdown {
    /// Σ owned × base_rate over generators.
    pub generators: Amount,
    /// Σ autoclick card values.
    pub cards: Amount,
    /// Π global upgrade multipliers × Π global card multipliers.
    pub multiplier: Amount,
}

impl ProductionBreakdown {
    /// Currency per second.
    pub fn total(&self) -> Amount {
        self.generators
            .saturating_add(self.cards)
            .saturating_mul(self.multiplier)
    }
}

pub fn production_breakdown(
    catalog: &Catalog,
    progress: &PlayerProgress,
    scaling: CardScaling,
) -> ProductionBreakdown {
    let mut generators = Amount::ZERO;
    for (id, def) in catalog.generators() {
        let owned = progress.generator_count(id);
        if owned > 0 {
            generators =
                generators.saturating_add(def.base_rate.saturating_mul(Amount::from_num(owned)));
        }
    }

    let mut multiplier = Amount::ONE;
    for id in progress.upgrades() {
        let Some(def) = catalog.upgrade(id) else {
            continue;
        };
        match def.effect {
            UpgradeEffect::Multiplier {
                target: MultiplierTarget::Global,
                value,
            } => multiplier = multiplier.saturating_mul(value),
            UpgradeEffect::Multiplier {
                target: MultiplierTarget::CurrencyPerClick,
                ..
            } => {}
        }
    }

    let mut cards = Amount::ZERO;
    for (_, card) in progress.cards() {
        let Some(def) = catalog.card_type(card.card_type) else {
            continue;
        };
        match def.effect {
            CardEffect::AutoclickRate(curve) => {
                cards = cards.saturating_add(curve.at(card.level, scaling));
            }
            CardEffect::GlobalMultiplier(curve) => {
                multiplier = multiplier.saturating_mul(curve.at(card.level, scaling));
            }
            CardEffect::ClickPower(_) | CardEffect::ClickMultiplier(_) => {}
        }
    }

    ProductionBreakdown {
        generators,
        cards,
        multiplier,
    }
}

/// Currency per second from generators, upgrades, and cards.
pub fn production_rate(catalog: &Catalog, progress: &PlayerProgress, scaling: CardScaling) -> Amount {
    production_breakdown(catalog, progress, scaling).total()
}

// ---------------------------------------------------------------------------
// Clicks
// ---------------------------------------------------------------------------

/// What one manual click is worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickYield {
    pub additive: Amount,
    pub multiplier: Amount,
}

impl ClickYield {
    pub fn total(&self) -> Amount {
        self.additive.saturating_mul(self.multiplier)
    }
}

pub fn click_yield(catalog: &Catalog, progress: &PlayerProgress, scaling: CardScaling) -> ClickYield {
    let mut additive = BASE_CLICK_VALUE;
    let mut multiplier = Amount::ONE;

    for id in progress.upgrades() {
        let Some(def) = catalog.upgrade(id) else {
            continue;
        };
        match def.effect {
            UpgradeEffect::Multiplier {
                target: MultiplierTarget::CurrencyPerClick,
                value,
            } => multiplier = multiplier.saturating_mul(value),
            UpgradeEffect::Multiplier {
                target: MultiplierTarget::Global,
                ..
            } => {}
        }
    }

    for (_, card) in progress.cards() {
        let Some(def) = catalog.card_type(card.card_type) else {
            continue;
        };
        match def.effect {
            CardEffect::ClickPower(curve) => {
                additive = additive.saturating_add(curve.at(card.level, scaling));
            }
            CardEffect::ClickMultiplier(curve) => {
                multiplier = multiplier.saturating_mul(curve.at(card.level, scaling));
            }
            CardEffect::AutoclickRate(_) | CardEffect::GlobalMultiplier(_) => {}
        }
    }

    ClickYield {
        additive,
        multiplier,
    }
}
