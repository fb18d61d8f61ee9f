//! A scripted player: clicks, buys the cheapest affordable item, and keeps the
//! card hand tidy by combining pairs and selling the overflow.

use idlecraft_core::catalog::UnlockCondition;
use idlecraft_core::engine::Engine;
use idlecraft_core::fixed::{Amount, f64_to_amount};
use idlecraft_core::id::{CardId, GeneratorId, UpgradeId};
use serde::Serialize;
use std::collections::HashMap;
use tracing::trace;

/// Upper bound on purchases or combinations in one decision pass.
const MAX_ACTIONS_PER_PASS: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutoplayPolicy {
    /// Manual clicks per simulated second. Fractions carry over between ticks.
    pub clicks_per_second: f64,
    /// Simulated seconds between card draws. Zero disables drawing.
    pub draw_interval_seconds: f64,
    /// Hand size above which the two oldest cards are sold.
    pub max_hand: usize,
    pub buy_upgrades: bool,
    /// Stop shopping when the next currency-gated stage is reachable within
    /// this many seconds of income. Zero never saves.
    pub save_horizon_seconds: f64,
}

impl Default for AutoplayPolicy {
    fn default() -> Self {
        Self {
            clicks_per_second: 5.0,
            draw_interval_seconds: 10.0,
            max_hand: 12,
            buy_upgrades: true,
            save_horizon_seconds: 60.0,
        }
    }
}

/// What the autoplayer did, summed over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActionTally {
    pub clicks: u64,
    pub generators_bought: u64,
    pub upgrades_bought: u64,
    pub cards_drawn: u64,
    pub combinations: u64,
    pub cards_sold: u64,
    pub rejections: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Purchase {
    Generator(GeneratorId),
    Upgrade(UpgradeId),
}

pub struct Autoplayer {
    policy: AutoplayPolicy,
    click_budget: f64,
    draw_budget: f64,
    tally: ActionTally,
}

impl Autoplayer {
    pub fn new(policy: AutoplayPolicy) -> Self {
        Self {
            policy,
            click_budget: 0.0,
            draw_budget: 0.0,
            tally: ActionTally::default(),
        }
    }

    pub fn policy(&self) -> &AutoplayPolicy {
        &self.policy
    }

    pub fn tally(&self) -> ActionTally {
        self.tally
    }

    /// Issue every intent due after `elapsed_seconds` of simulated time.
    pub fn act(&mut self, engine: &mut Engine, elapsed_seconds: f64) {
        self.click(engine, elapsed_seconds);
        self.draw(engine, elapsed_seconds);
        self.combine_pairs(engine);
        self.sell_overflow(engine);
        self.shop(engine);
    }

    fn click(&mut self, engine: &mut Engine, elapsed_seconds: f64) {
        self.click_budget += self.policy.clicks_per_second.max(0.0) * elapsed_seconds;
        while self.click_budget >= 1.0 {
            self.click_budget -= 1.0;
            engine.click();
            self.tally.clicks += 1;
        }
    }

    fn draw(&mut self, engine: &mut Engine, elapsed_seconds: f64) {
        let interval = self.policy.draw_interval_seconds;
        if interval.is_nan() || interval <= 0.0 {
            return;
        }
        self.draw_budget += elapsed_seconds;
        while self.draw_budget >= interval {
            self.draw_budget -= interval;
            match engine.draw_card() {
                Ok(_) => self.tally.cards_drawn += 1,
                Err(err) => self.reject("draw", &err),
            }
        }
    }

    fn combine_pairs(&mut self, engine: &mut Engine) {
        for _ in 0..MAX_ACTIONS_PER_PASS {
            let Some((a, b)) = matching_pair(engine) else {
                return;
            };
            if !self.select_only(engine, &[a, b]) || !engine.can_combine() {
                engine.clear_selection();
                return;
            }
            match engine.combine_selected() {
                Ok(_) => self.tally.combinations += 1,
                Err(err) => {
                    self.reject("combine", &err);
                    engine.clear_selection();
                    return;
                }
            }
        }
    }

    fn sell_overflow(&mut self, engine: &mut Engine) {
        while engine.progress().card_count() > self.policy.max_hand {
            let oldest: Vec<CardId> = engine.progress().cards().take(2).map(|(id, _)| id).collect();
            if !self.select_only(engine, &oldest) {
                engine.clear_selection();
                return;
            }
            match engine.sell_selected() {
                Ok(sold) => self.tally.cards_sold += sold.cards.len() as u64,
                Err(err) => {
                    self.reject("sell", &err);
                    return;
                }
            }
        }
    }

    fn shop(&mut self, engine: &mut Engine) {
        if self.saving_for_stage(engine) {
            return;
        }
        for _ in 0..MAX_ACTIONS_PER_PASS {
            let Some(choice) = self.cheapest_affordable(engine) else {
                return;
            };
            let result = match choice {
                Purchase::Generator(id) => engine.purchase_generator(id).map(|_| {
                    self.tally.generators_bought += 1;
                }),
                Purchase::Upgrade(id) => engine.purchase_upgrade(id).map(|_| {
                    self.tally.upgrades_bought += 1;
                }),
            };
            if let Err(err) = result {
                self.reject("purchase", &err);
                return;
            }
        }
    }

    /// True when the next stage is a balance threshold close enough that
    /// spending would only delay it.
    fn saving_for_stage(&self, engine: &Engine) -> bool {
        let catalog = engine.catalog();
        let Some(UnlockCondition::CurrencyAtLeast(threshold)) = catalog
            .next_stage(engine.stage())
            .and_then(|id| catalog.stage(id))
            .map(|stage| stage.unlock)
        else {
            return false;
        };
        let horizon = f64_to_amount(self.policy.save_horizon_seconds.max(0.0));
        let clicks = f64_to_amount(self.policy.clicks_per_second.max(0.0))
            .saturating_mul(engine.click_yield().total());
        let income = engine
            .production_rate()
            .saturating_add(clicks)
            .saturating_mul(horizon);
        threshold.saturating_sub(engine.currency()) <= income
    }

    fn cheapest_affordable(&self, engine: &Engine) -> Option<Purchase> {
        let generators = engine
            .generator_views()
            .into_iter()
            .filter(|view| view.affordable)
            .map(|view| (view.cost, Purchase::Generator(view.id)));
        let upgrades = engine
            .upgrade_views()
            .into_iter()
            .filter(|view| self.policy.buy_upgrades && view.affordable)
            .map(|view| (view.cost, Purchase::Upgrade(view.id)));
        generators
            .chain(upgrades)
            .min_by_key(|(cost, _): &(Amount, Purchase)| *cost)
            .map(|(_, choice)| choice)
    }

    /// Replace the selection with `cards`. Returns false after the first
    /// rejected toggle.
    fn select_only(&mut self, engine: &mut Engine, cards: &[CardId]) -> bool {
        engine.clear_selection();
        for id in cards {
            if let Err(err) = engine.toggle_select(*id) {
                self.reject("select", &err);
                return false;
            }
        }
        true
    }

    fn reject(&mut self, intent: &'static str, err: &idlecraft_core::error::EngineError) {
        self.tally.rejections += 1;
        trace!(target: "idlecraft.demo", intent, error = %err, "autoplay intent rejected");
    }
}

/// The two oldest cards sharing a type and level, if any.
fn matching_pair(engine: &Engine) -> Option<(CardId, CardId)> {
    let mut seen: HashMap<_, CardId> = HashMap::new();
    for (id, card) in engine.progress().cards() {
        if let Some(first) = seen.insert((card.card_type, card.level), id) {
            return Some((first, id));
        }
    }
    None
}
