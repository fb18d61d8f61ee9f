//! Rejections returned by engine intents.
//!
//! Every operation validates fully before mutating, so an `Err` always means
//! the player's progress is exactly as it was before the call.

use crate::fixed::Amount;
use crate::id::{CardId, GeneratorId, UpgradeId};
use serde::{Deserialize, Serialize};

/// Coarse classification of a rejection, for displays that only need to pick
/// a message category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejection {
    Unaffordable,
    AlreadyOwned,
    InvalidSelection,
    Locked,
    Unknown,
}

/// Why the current card selection cannot be combined or sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionProblem {
    Empty,
    NeedsExactlyTwo { selected: usize },
    /// The pair differs in name or rarity.
    Mismatched,
}

impl std::fmt::Display for SelectionProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionProblem::Empty => write!(f, "no cards selected"),
            SelectionProblem::NeedsExactlyTwo { selected } => {
                write!(f, "exactly two cards must be selected, {selected} are")
            }
            SelectionProblem::Mismatched => write!(f, "selected cards do not match"),
        }
    }
}

/// Errors returned by [`crate::engine::Engine`] intents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("cannot afford: costs {cost}, have {available}")]
    Unaffordable { cost: Amount, available: Amount },

    #[error("upgrade {0:?} is already owned")]
    AlreadyOwned(UpgradeId),

    #[error("not unlocked yet")]
    Locked,

    #[error("generator not found: {0:?}")]
    UnknownGenerator(GeneratorId),

    #[error("upgrade not found: {0:?}")]
    UnknownUpgrade(UpgradeId),

    #[error("card not found: {0:?}")]
    UnknownCard(CardId),

    #[error("no card position {0}")]
    UnknownCardIndex(usize),

    #[error("no card types available to draw")]
    NothingToDraw,

    #[error("invalid selection: {0}")]
    InvalidSelection(SelectionProblem),
}

impl EngineError {
    pub fn kind(&self) -> Rejection {
        match self {
            EngineError::Unaffordable { .. } => Rejection::Unaffordable,
            EngineError::AlreadyOwned(_) => Rejection::AlreadyOwned,
            EngineError::Locked => Rejection::Locked,
            EngineError::InvalidSelection(_) => Rejection::InvalidSelection,
            EngineError::UnknownGenerator(_)
            | EngineError::UnknownUpgrade(_)
            | EngineError::UnknownCard(_)
            | EngineError::UnknownCardIndex(_)
            | EngineError::NothingToDraw => Rejection::Unknown,
        }
    }
}
