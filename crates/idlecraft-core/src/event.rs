//! Events emitted by the engine for the display to consume.
//!
//! Events queue up inside the engine until drained with
//! [`crate::engine::Engine::drain_events`]. Stage advances carry their
//! narrative text so the display never needs to look it up.

use crate::fixed::Amount;
use crate::id::{CardId, CardTypeId, GeneratorId, StageId, UpgradeId};
use serde::{Deserialize, Serialize};

/// An engine event. All events carry the tick at which they occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    // -- Narrative --
    StageAdvanced {
        stage: StageId,
        title: String,
        story: String,
        tick: u64,
    },

    // -- Purchases --
    GeneratorPurchased {
        generator: GeneratorId,
        cost: Amount,
        owned: u32,
        tick: u64,
    },
    UpgradePurchased {
        upgrade: UpgradeId,
        cost: Amount,
        tick: u64,
    },

    // -- Cards --
    CardDrawn {
        card: CardId,
        card_type: CardTypeId,
        tick: u64,
    },
    CardsCombined {
        consumed: [CardId; 2],
        result: CardId,
        level: u32,
        tick: u64,
    },
    CardsSold {
        cards: Vec<CardId>,
        proceeds: Amount,
        tick: u64,
    },
}

/// Discriminant of [`EngineEvent`], for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    StageAdvanced,
    GeneratorPurchased,
    UpgradePurchased,
    CardDrawn,
    CardsCombined,
    CardsSold,
}

impl EngineEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            EngineEvent::StageAdvanced { .. } => EventKind::StageAdvanced,
            EngineEvent::GeneratorPurchased { .. } => EventKind::GeneratorPurchased,
            EngineEvent::UpgradePurchased { .. } => EventKind::UpgradePurchased,
            EngineEvent::CardDrawn { .. } => EventKind::CardDrawn,
            EngineEvent::CardsCombined { .. } => EventKind::CardsCombined,
            EngineEvent::CardsSold { .. } => EventKind::CardsSold,
        }
    }

    pub fn tick(&self) -> u64 {
        match self {
            EngineEvent::StageAdvanced { tick, .. }
            | EngineEvent::GeneratorPurchased { tick, .. }
            | EngineEvent::UpgradePurchased { tick, .. }
            | EngineEvent::CardDrawn { tick, .. }
            | EngineEvent::CardsCombined { tick, .. }
            | EngineEvent::CardsSold { tick, .. } => *tick,
        }
    }
}
