//! Effects carried by upgrades and card types.
//!
//! Each effect kind is its own variant, so adding a kind forces every
//! consumer in [`crate::economy`] to handle it.

use crate::config::CardScaling;
use crate::fixed::Amount;
use serde::{Deserialize, Serialize};

/// What an upgrade multiplier applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiplierTarget {
    /// Passive production (currency per second).
    Global,
    /// Manual click yield.
    CurrencyPerClick,
}

/// A permanent effect granted by an owned upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeEffect {
    Multiplier {
        target: MultiplierTarget,
        value: Amount,
    },
}

/// Base value of a card effect and its growth per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCurve {
    pub base: Amount,
    pub per_level: Amount,
}

impl LevelCurve {
    pub fn new(base: Amount, per_level: Amount) -> Self {
        Self { base, per_level }
    }

    /// Effect value at `level` (1-indexed; level 0 is treated as 1).
    pub fn at(&self, level: u32, scaling: CardScaling) -> Amount {
        let level = level.max(1);
        match scaling {
            CardScaling::Linear => self
                .base
                .saturating_add(self.per_level.saturating_mul(Amount::from_num(level - 1))),
            CardScaling::PerLevel => self.base.saturating_mul(Amount::from_num(level)),
        }
    }
}

/// The effect an owned card has on production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEffect {
    /// Adds to the additive part of each click.
    ClickPower(LevelCurve),
    /// Multiplies each click.
    ClickMultiplier(LevelCurve),
    /// Adds currency per second before multipliers.
    AutoclickRate(LevelCurve),
    /// Multiplies passive production.
    GlobalMultiplier(LevelCurve),
}

impl CardEffect {
    pub fn curve(&self) -> &LevelCurve {
        match self {
            CardEffect::ClickPower(c)
            | CardEffect::ClickMultiplier(c)
            | CardEffect::AutoclickRate(c)
            | CardEffect::GlobalMultiplier(c) => c,
        }
    }

    pub fn value_at(&self, level: u32, scaling: CardScaling) -> Amount {
        self.curve().at(level, scaling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::f64_to_amount;

    fn curve(base: f64, per_level: f64) -> LevelCurve {
        LevelCurve::new(f64_to_amount(base), f64_to_amount(per_level))
    }

    #[test]
    fn linear_scaling_adds_per_level() {
        let c = curve(2.0, 1.5);
        assert_eq!(c.at(1, CardScaling::Linear), f64_to_amount(2.0));
        assert_eq!(c.at(2, CardScaling::Linear), f64_to_amount(3.5));
        assert_eq!(c.at(3, CardScaling::Linear), f64_to_amount(5.0));
    }

    #[test]
    fn per_level_scaling_multiplies_base() {
        let c = curve(2.0, 1.5);
        assert_eq!(c.at(1, CardScaling::PerLevel), f64_to_amount(2.0));
        assert_eq!(c.at(3, CardScaling::PerLevel), f64_to_amount(6.0));
    }

    #[test]
    fn level_zero_is_treated_as_one() {
        let c = curve(4.0, 1.0);
        assert_eq!(c.at(0, CardScaling::Linear), c.at(1, CardScaling::Linear));
        assert_eq!(c.at(0, CardScaling::PerLevel), c.at(1, CardScaling::PerLevel));
    }

    #[test]
    fn value_at_reads_the_curve_of_any_variant() {
        let c = curve(1.0, 0.5);
        for effect in [
            CardEffect::ClickPower(c),
            CardEffect::ClickMultiplier(c),
            CardEffect::AutoclickRate(c),
            CardEffect::GlobalMultiplier(c),
        ] {
            assert_eq!(effect.value_at(2, CardScaling::Linear), f64_to_amount(1.5));
        }
    }
}
