//! The engine: owns the catalog, the player's progress, and the event queue.
//!
//! Every tick and every player intent goes through `&mut Engine`, so intents
//! and ticks are serialized by construction. After each mutation the
//! progression gate runs and any stage advances are queued as events.

use crate::cards::{self, Combined, SelectionChange, Sold};
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::economy::{self, ClickYield, ProductionBreakdown};
use crate::error::EngineError;
use crate::event::EngineEvent;
use crate::fixed::{Amount, checked_f64_to_amount, f64_to_amount};
use crate::id::{CardId, GeneratorId, StageId, UpgradeId};
use crate::progress::PlayerProgress;
use crate::progression;
use crate::rng::SimRng;
use crate::sim::{SimClock, StateHash};
use tracing::{debug, info, warn};

/// Step length used when neither the config nor the catalog yields a usable one.
const FALLBACK_TICK_SECONDS: f64 = 0.1;

pub struct Engine {
    catalog: Catalog,
    progress: PlayerProgress,
    config: EngineConfig,
    rng: SimRng,
    clock: SimClock,
    /// Fixed step length for `advance`.
    tick_seconds: Amount,
    events: Vec<EngineEvent>,
}

impl Engine {
    /// Start a new playthrough. The opening stage is announced as a
    /// [`EngineEvent::StageAdvanced`] so the display can show its story.
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        let tick_seconds = resolve_tick(&catalog, &config);
        let progress = PlayerProgress::new(&catalog);
        let rng = SimRng::new(config.seed);
        let mut engine = Self {
            catalog,
            progress,
            config,
            rng,
            clock: SimClock::new(),
            tick_seconds,
            events: Vec::new(),
        };
        let opening = engine.progress.stage();
        engine.announce_stage(opening);
        engine.settle();
        engine
    }

    // -- Accessors --

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn progress(&self) -> &PlayerProgress {
        &self.progress
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn currency(&self) -> Amount {
        self.progress.currency()
    }

    pub fn stage(&self) -> StageId {
        self.progress.stage()
    }

    /// Ticks applied so far.
    pub fn tick(&self) -> u64 {
        self.clock.tick
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Fixed step length used by [`Engine::advance`].
    pub fn tick_seconds(&self) -> Amount {
        self.tick_seconds
    }

    // -- Economy --

    pub fn production_rate(&self) -> Amount {
        economy::production_rate(&self.catalog, &self.progress, self.config.card_scaling)
    }

    pub fn production_breakdown(&self) -> ProductionBreakdown {
        economy::production_breakdown(&self.catalog, &self.progress, self.config.card_scaling)
    }

    pub fn click_yield(&self) -> ClickYield {
        economy::click_yield(&self.catalog, &self.progress, self.config.card_scaling)
    }

    /// Price of the next unit of a generator.
    pub fn generator_cost(&self, id: GeneratorId) -> Option<Amount> {
        let def = self.catalog.generator(id)?;
        Some(economy::generator_cost(def, self.progress.generator_count(id)))
    }

    // -- Time --

    /// Credit `production_rate × elapsed_seconds`. Non-finite or negative
    /// durations count as zero. Returns the amount credited.
    pub fn apply_tick(&mut self, elapsed_seconds: f64) -> Amount {
        let seconds = if elapsed_seconds.is_finite() && elapsed_seconds > 0.0 {
            f64_to_amount(elapsed_seconds)
        } else {
            Amount::ZERO
        };
        self.step(seconds)
    }

    /// Feed wall time and run every whole fixed step now due. Returns the
    /// number of steps run; the remainder carries over to the next call.
    pub fn advance(&mut self, wall_seconds: f64) -> u64 {
        let seconds = if wall_seconds.is_finite() && wall_seconds > 0.0 {
            f64_to_amount(wall_seconds)
        } else {
            Amount::ZERO
        };
        let due = self.clock.accumulate(seconds, self.tick_seconds);
        for _ in 0..due {
            self.step(self.tick_seconds);
        }
        due
    }

    fn step(&mut self, seconds: Amount) -> Amount {
        let earned = self.production_rate().saturating_mul(seconds);
        self.progress.credit(earned);
        self.clock.record_tick(seconds);
        self.settle();
        earned
    }

    // -- Intents --

    /// Apply one manual click. Returns the amount credited.
    pub fn click(&mut self) -> Amount {
        let earned = self.click_yield().total();
        self.progress.credit(earned);
        self.settle();
        earned
    }

    /// Buy one unit of a generator. Returns the price paid.
    pub fn purchase_generator(&mut self, id: GeneratorId) -> Result<Amount, EngineError> {
        let def = self
            .catalog
            .generator(id)
            .ok_or(EngineError::UnknownGenerator(id))?;
        if !progression::generator_visible(&self.catalog, &self.progress, id) {
            return Err(EngineError::Locked);
        }
        let cost = economy::generator_cost(def, self.progress.generator_count(id));
        if !self.progress.try_debit(cost) {
            return Err(EngineError::Unaffordable {
                cost,
                available: self.progress.currency(),
            });
        }
        let owned = self.progress.add_generator(id);
        debug!(
            target: "idlecraft.economy",
            generator = %def.key,
            %cost,
            owned,
            "generator purchased"
        );
        self.events.push(EngineEvent::GeneratorPurchased {
            generator: id,
            cost,
            owned,
            tick: self.clock.tick,
        });
        self.settle();
        Ok(cost)
    }

    /// Buy an upgrade. Returns the price paid.
    pub fn purchase_upgrade(&mut self, id: UpgradeId) -> Result<Amount, EngineError> {
        let def = self
            .catalog
            .upgrade(id)
            .ok_or(EngineError::UnknownUpgrade(id))?;
        if self.progress.owns_upgrade(id) {
            return Err(EngineError::AlreadyOwned(id));
        }
        if !progression::upgrade_unlocked(&self.catalog, &self.progress, id) {
            return Err(EngineError::Locked);
        }
        let cost = def.cost;
        if !self.progress.try_debit(cost) {
            return Err(EngineError::Unaffordable {
                cost,
                available: self.progress.currency(),
            });
        }
        self.progress.insert_upgrade(id);
        debug!(target: "idlecraft.economy", upgrade = %def.key, %cost, "upgrade purchased");
        self.events.push(EngineEvent::UpgradePurchased {
            upgrade: id,
            cost,
            tick: self.clock.tick,
        });
        self.settle();
        Ok(cost)
    }

    /// Draw a random level-1 card. Clears the selection.
    pub fn draw_card(&mut self) -> Result<CardId, EngineError> {
        let (card, card_type) = cards::draw_card(
            &self.catalog,
            &mut self.progress,
            &mut self.rng,
            self.config.draw_pool,
        )?;
        debug!(target: "idlecraft.cards", ?card, ?card_type, "card drawn");
        self.events.push(EngineEvent::CardDrawn {
            card,
            card_type,
            tick: self.clock.tick,
        });
        self.settle();
        Ok(card)
    }

    pub fn toggle_select(&mut self, card: CardId) -> Result<SelectionChange, EngineError> {
        cards::toggle_select(&mut self.progress, card)
    }

    /// Toggle the card at a display position (acquisition order).
    pub fn toggle_select_at(&mut self, index: usize) -> Result<SelectionChange, EngineError> {
        let card = self
            .progress
            .card_at(index)
            .ok_or(EngineError::UnknownCardIndex(index))?;
        self.toggle_select(card)
    }

    /// Deselect every card. Never fails.
    pub fn clear_selection(&mut self) {
        self.progress.clear_selection();
    }

    pub fn can_combine(&self) -> bool {
        cards::can_combine(&self.catalog, &self.progress)
    }

    pub fn combine_selected(&mut self) -> Result<Combined, EngineError> {
        let combined = cards::combine(&self.catalog, &mut self.progress, self.config.combine_level)?;
        debug!(
            target: "idlecraft.cards",
            result = ?combined.result,
            level = combined.level,
            "cards combined"
        );
        self.events.push(EngineEvent::CardsCombined {
            consumed: combined.consumed,
            result: combined.result,
            level: combined.level,
            tick: self.clock.tick,
        });
        self.settle();
        Ok(combined)
    }

    pub fn sell_preview(&self) -> Amount {
        cards::sell_preview(&self.catalog, &self.progress)
    }

    pub fn sell_selected(&mut self) -> Result<Sold, EngineError> {
        let sold = cards::sell(&self.catalog, &mut self.progress)?;
        debug!(
            target: "idlecraft.cards",
            count = sold.cards.len(),
            proceeds = %sold.proceeds,
            "cards sold"
        );
        self.events.push(EngineEvent::CardsSold {
            cards: sold.cards.clone(),
            proceeds: sold.proceeds,
            tick: self.clock.tick,
        });
        self.settle();
        Ok(sold)
    }

    // -- Events --

    /// Drain all pending events.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Get a read-only view of pending events.
    pub fn pending_events(&self) -> &[EngineEvent] {
        &self.events
    }

    // -- Determinism --

    /// Hash of the player's progress, the RNG state, and the clock.
    pub fn state_hash(&self) -> u64 {
        let mut h = StateHash::new();
        h.write_amount(self.progress.currency());
        h.write_u32(self.progress.stage().0);
        for count in self.progress.generator_counts() {
            h.write_u32(*count);
        }
        for upgrade in self.progress.upgrades() {
            h.write_u32(upgrade.0);
        }
        for (_, card) in self.progress.cards() {
            h.write_u32(card.card_type.0);
            h.write_u32(card.level);
        }
        for card in self.progress.selection() {
            if let Some(pos) = self.progress.position_of(card) {
                h.write_u64(pos as u64);
            }
        }
        h.write_u64(self.rng.state());
        h.write_u64(self.clock.tick);
        h.write_amount(self.clock.accumulator);
        h.finish()
    }

    // -- Internal helpers --

    /// Run the progression gate and announce every stage entered.
    fn settle(&mut self) {
        for stage in progression::advance_stages(&self.catalog, &mut self.progress) {
            self.announce_stage(stage);
        }
    }

    fn announce_stage(&mut self, stage: StageId) {
        let Some(def) = self.catalog.stage(stage) else {
            return;
        };
        info!(
            target: "idlecraft.progression",
            stage = %def.key,
            order = def.order,
            tick = self.clock.tick,
            "entered stage: {}",
            def.title
        );
        self.events.push(EngineEvent::StageAdvanced {
            stage,
            title: def.title.clone(),
            story: def.story.clone(),
            tick: self.clock.tick,
        });
    }
}

fn resolve_tick(catalog: &Catalog, config: &EngineConfig) -> Amount {
    let usable = |seconds: f64| checked_f64_to_amount(seconds).filter(|v| *v > Amount::ZERO);
    if let Some(requested) = config.tick_seconds {
        match usable(requested) {
            Some(v) => return v,
            None => warn!(
                target: "idlecraft.engine",
                requested,
                "ignoring unusable tick override"
            ),
        }
    }
    usable(catalog.meta().tick_seconds).unwrap_or_else(|| f64_to_amount(FALLBACK_TICK_SECONDS))
}
