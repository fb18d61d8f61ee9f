//! The player's mutable simulation state.
//!
//! [`PlayerProgress`] is owned by the engine and only mutated inside one
//! engine operation at a time. Its methods keep the store-level invariants
//! (non-negative currency, upgrades owned at most once, selection pointing
//! at live cards); the rules about *when* to mutate live in the economy,
//! progression, and card modules.

use crate::catalog::Catalog;
use crate::fixed::Amount;
use crate::id::{CardId, CardTypeId, GeneratorId, StageId, UpgradeId};
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use std::collections::{BTreeSet, VecDeque};

/// An owned card. Levels start at 1 and only grow through combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    pub card_type: CardTypeId,
    pub level: u32,
}

impl CardInstance {
    pub fn new(card_type: CardTypeId) -> Self {
        Self {
            card_type,
            level: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProgress {
    currency: Amount,
    /// Owned count per generator, indexed by `GeneratorId`.
    generators: Vec<u32>,
    upgrades: BTreeSet<UpgradeId>,
    cards: SlotMap<CardId, CardInstance>,
    /// Acquisition order of owned cards, for display and positional access.
    card_order: Vec<CardId>,
    /// Selected cards, oldest first.
    selection: VecDeque<CardId>,
    stage: StageId,
}

impl PlayerProgress {
    /// Fresh progress for a new playthrough of `catalog`.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            currency: catalog.meta().currency_start.max(Amount::ZERO),
            generators: vec![0; catalog.generator_count()],
            upgrades: BTreeSet::new(),
            cards: SlotMap::with_key(),
            card_order: Vec::new(),
            selection: VecDeque::new(),
            stage: catalog.first_stage(),
        }
    }

    // -- Currency --

    pub fn currency(&self) -> Amount {
        self.currency
    }

    /// Add currency. Negative amounts are ignored.
    pub fn credit(&mut self, amount: Amount) {
        if amount > Amount::ZERO {
            self.currency = self.currency.saturating_add(amount);
        }
    }

    /// Remove `amount` if the balance covers it. Returns whether it did.
    pub fn try_debit(&mut self, amount: Amount) -> bool {
        if amount < Amount::ZERO || self.currency < amount {
            return false;
        }
        self.currency -= amount;
        true
    }

    // -- Generators --

    pub fn generator_count(&self, id: GeneratorId) -> u32 {
        self.generators.get(id.0 as usize).copied().unwrap_or(0)
    }

    /// Owned counts, indexed by generator id.
    pub fn generator_counts(&self) -> &[u32] {
        &self.generators
    }

    pub(crate) fn add_generator(&mut self, id: GeneratorId) -> u32 {
        let idx = id.0 as usize;
        if idx >= self.generators.len() {
            self.generators.resize(idx + 1, 0);
        }
        self.generators[idx] = self.generators[idx].saturating_add(1);
        self.generators[idx]
    }

    // -- Upgrades --

    pub fn owns_upgrade(&self, id: UpgradeId) -> bool {
        self.upgrades.contains(&id)
    }

    pub fn upgrades(&self) -> impl Iterator<Item = UpgradeId> + '_ {
        self.upgrades.iter().copied()
    }

    /// Returns `false` if the upgrade was already owned.
    pub(crate) fn insert_upgrade(&mut self, id: UpgradeId) -> bool {
        self.upgrades.insert(id)
    }

    // -- Cards --

    pub fn card(&self, id: CardId) -> Option<&CardInstance> {
        self.cards.get(id)
    }

    pub fn card_count(&self) -> usize {
        self.card_order.len()
    }

    /// The card at a display position.
    pub fn card_at(&self, index: usize) -> Option<CardId> {
        self.card_order.get(index).copied()
    }

    pub fn position_of(&self, id: CardId) -> Option<usize> {
        self.card_order.iter().position(|c| *c == id)
    }

    /// Owned cards in acquisition order.
    pub fn cards(&self) -> impl Iterator<Item = (CardId, &CardInstance)> + '_ {
        self.card_order
            .iter()
            .filter_map(|id| self.cards.get(*id).map(|card| (*id, card)))
    }

    pub(crate) fn push_card(&mut self, card: CardInstance) -> CardId {
        let id = self.cards.insert(card);
        self.card_order.push(id);
        id
    }

    /// Remove a card, dropping it from the display order and the selection.
    pub(crate) fn remove_card(&mut self, id: CardId) -> Option<CardInstance> {
        let card = self.cards.remove(id)?;
        self.card_order.retain(|c| *c != id);
        self.selection.retain(|c| *c != id);
        Some(card)
    }

    // -- Selection --

    /// Selected cards, oldest first.
    pub fn selection(&self) -> impl Iterator<Item = CardId> + '_ {
        self.selection.iter().copied()
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_selected(&self, id: CardId) -> bool {
        self.selection.contains(&id)
    }

    pub(crate) fn selection_mut(&mut self) -> &mut VecDeque<CardId> {
        &mut self.selection
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // -- Stage --

    pub fn stage(&self) -> StageId {
        self.stage
    }

    pub(crate) fn set_stage(&mut self, stage: StageId) {
        self.stage = stage;
    }
}
