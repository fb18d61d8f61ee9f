//! Read-only views of engine state for displays.
//!
//! Every view is an owned snapshot with display strings already formatted,
//! so a display never reaches into the catalog or progress directly.

use crate::catalog::Rarity;
use crate::engine::Engine;
use crate::fixed::Amount;
use crate::format::{format_currency, format_rate};
use crate::id::{CardId, CardTypeId, GeneratorId, StageId, UpgradeId};
use crate::progression;
use serde::Serialize;

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

/// Headline numbers: balance, rate, and where the story is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudView {
    pub currency: Amount,
    pub currency_text: String,
    pub currency_name: String,
    pub rate: Amount,
    pub rate_text: String,
    pub click_value: Amount,
    pub stage: StageId,
    pub stage_title: String,
    pub tick: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorView {
    pub id: GeneratorId,
    pub key: String,
    pub name: String,
    pub description: String,
    pub owned: u32,
    pub cost: Amount,
    pub cost_text: String,
    pub affordable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeView {
    pub id: UpgradeId,
    pub key: String,
    pub name: String,
    pub description: String,
    pub cost: Amount,
    pub cost_text: String,
    pub affordable: bool,
}

/// One owned card, in acquisition order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub position: usize,
    pub id: CardId,
    pub card_type: CardTypeId,
    pub name: String,
    pub rarity: Rarity,
    pub description: String,
    pub image: String,
    pub level: u32,
    pub selected: bool,
}

/// Which card actions are currently available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardActionsView {
    pub can_draw: bool,
    pub can_combine: bool,
    pub can_sell: bool,
    pub sell_preview: Amount,
    pub sell_preview_text: String,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

impl Engine {
    pub fn hud(&self) -> HudView {
        let currency = self.currency();
        let rate = self.production_rate();
        let stage = self.stage();
        HudView {
            currency,
            currency_text: format_currency(currency),
            currency_name: self.catalog().meta().currency_name.clone(),
            rate,
            rate_text: format_rate(rate),
            click_value: self.click_yield().total(),
            stage,
            stage_title: self
                .catalog()
                .stage(stage)
                .map(|s| s.title.clone())
                .unwrap_or_default(),
            tick: self.tick(),
        }
    }

    /// Generators whose unlock condition holds, in catalog order.
    pub fn generator_views(&self) -> Vec<GeneratorView> {
        let catalog = self.catalog();
        let progress = self.progress();
        catalog
            .generators()
            .filter(|(id, _)| progression::generator_visible(catalog, progress, *id))
            .filter_map(|(id, def)| {
                let cost = self.generator_cost(id)?;
                Some(GeneratorView {
                    id,
                    key: def.key.clone(),
                    name: def.name.clone(),
                    description: def.description.clone(),
                    owned: progress.generator_count(id),
                    cost,
                    cost_text: format_currency(cost),
                    affordable: progress.currency() >= cost,
                })
            })
            .collect()
    }

    /// Unlocked upgrades not yet owned, in catalog order.
    pub fn upgrade_views(&self) -> Vec<UpgradeView> {
        let catalog = self.catalog();
        let progress = self.progress();
        catalog
            .upgrades()
            .filter(|(id, _)| progression::upgrade_visible(catalog, progress, *id))
            .map(|(id, def)| UpgradeView {
                id,
                key: def.key.clone(),
                name: def.name.clone(),
                description: def.description.clone(),
                cost: def.cost,
                cost_text: format_currency(def.cost),
                affordable: progress.currency() >= def.cost,
            })
            .collect()
    }

    pub fn card_views(&self) -> Vec<CardView> {
        let catalog = self.catalog();
        let progress = self.progress();
        progress
            .cards()
            .enumerate()
            .filter_map(|(position, (id, card))| {
                let def = catalog.card_type(card.card_type)?;
                Some(CardView {
                    position,
                    id,
                    card_type: card.card_type,
                    name: def.name.clone(),
                    rarity: def.rarity,
                    description: def.description.clone(),
                    image: def.image.clone(),
                    level: card.level,
                    selected: progress.is_selected(id),
                })
            })
            .collect()
    }

    pub fn card_actions(&self) -> CardActionsView {
        let sell_preview = self.sell_preview();
        CardActionsView {
            can_draw: !crate::cards::draw_pool(self.catalog(), self.progress(), self.config().draw_pool)
                .is_empty(),
            can_combine: self.can_combine(),
            can_sell: self.progress().selection_len() > 0,
            sell_preview,
            sell_preview_text: format_currency(sell_preview),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::EngineConfig;
    use crate::engine::Engine;
    use crate::fixed::Amount;
    use crate::id::GeneratorId;
    use crate::test_utils::*;

    #[test]
    fn hud_formats_balance_and_rate() {
        let mut engine = Engine::new(sample_catalog(), EngineConfig::default());
        engine.purchase_generator(GeneratorId(0)).unwrap();
        let hud = engine.hud();
        assert_eq!(hud.currency_text, "90");
        assert_eq!(hud.rate_text, "2 / sec");
        assert_eq!(hud.currency_name, "Coins");
        assert_eq!(hud.stage_title, "Glass in Crypto Castle");
        assert_eq!(hud.click_value, Amount::ONE);
    }

    #[test]
    fn generator_views_show_next_cost_and_affordability() {
        let mut engine = Engine::new(sample_catalog(), EngineConfig::default());
        engine.purchase_generator(GeneratorId(1)).unwrap();
        let views = engine.generator_views();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].name, "Tap Wallet");
        assert_eq!(views[0].cost, Amount::from_num(10));
        assert!(!views[0].affordable);
        assert_eq!(views[1].owned, 1);
        assert_eq!(views[1].cost_text, "114");
    }

    #[test]
    fn upgrades_hidden_until_unlocked_and_after_purchase() {
        let mut engine = Engine::new(sample_catalog(), EngineConfig::default());
        assert!(engine.upgrade_views().is_empty());
        for _ in 0..400 {
            engine.click();
        }
        let views = engine.upgrade_views();
        assert_eq!(views.len(), 1);
        assert!(views[0].affordable);
        engine.purchase_upgrade(views[0].id).unwrap();
        assert!(engine.upgrade_views().is_empty());
    }

    #[test]
    fn card_views_track_selection_and_actions() {
        let mut engine = Engine::new(sample_catalog(), EngineConfig::default());
        engine.draw_card().unwrap();
        engine.draw_card().unwrap();
        engine.toggle_select_at(1).unwrap();

        let cards = engine.card_views();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name, "Bitcoin Miner");
        assert!(!cards[0].selected);
        assert!(cards[1].selected);
        assert_eq!(cards[1].position, 1);

        let actions = engine.card_actions();
        assert!(actions.can_draw);
        assert!(!actions.can_combine);
        assert!(actions.can_sell);
        assert_eq!(actions.sell_preview_text, "25");

        engine.toggle_select_at(0).unwrap();
        assert!(engine.card_actions().can_combine);
    }
}
