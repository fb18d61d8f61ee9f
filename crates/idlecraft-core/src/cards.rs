//! Card collection: drawing, selection, combination, and sale.
//!
//! Cards are addressed by stable [`CardId`] keys, so removing one card never
//! shifts another card's identity or invalidates the selection.

use crate::catalog::{COMBINE_ARITY, Catalog};
use crate::config::{CombineLevel, DrawPool};
use crate::error::{EngineError, SelectionProblem};
use crate::fixed::Amount;
use crate::id::{CardId, CardTypeId};
use crate::progress::{CardInstance, PlayerProgress};
use crate::progression::card_type_unlocked;
use crate::rng::SimRng;
use serde::{Deserialize, Serialize};

/// Most cards that can be selected at once.
pub const SELECTION_CAP: usize = COMBINE_ARITY;

/// Effect of a selection toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionChange {
    Selected,
    Deselected,
    /// Selected, pushing out the oldest selection.
    Replaced { evicted: CardId },
}

/// Outcome of a successful combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combined {
    pub consumed: [CardId; 2],
    pub result: CardId,
    pub card_type: CardTypeId,
    pub level: u32,
}

/// Outcome of a successful sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sold {
    pub cards: Vec<CardId>,
    pub proceeds: Amount,
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Card types a draw may produce right now.
pub fn draw_pool(catalog: &Catalog, progress: &PlayerProgress, pool: DrawPool) -> Vec<CardTypeId> {
    catalog
        .card_types()
        .map(|(id, _)| id)
        .filter(|id| match pool {
            DrawPool::Catalog => true,
            DrawPool::Unlocked => card_type_unlocked(catalog, progress, *id),
        })
        .collect()
}

/// Add one level-1 card of a uniformly chosen type and clear the selection.
pub fn draw_card(
    catalog: &Catalog,
    progress: &mut PlayerProgress,
    rng: &mut SimRng,
    pool: DrawPool,
) -> Result<(CardId, CardTypeId), EngineError> {
    let candidates = draw_pool(catalog, progress, pool);
    let index = rng
        .next_index(candidates.len())
        .ok_or(EngineError::NothingToDraw)?;
    let card_type = candidates[index];
    let id = progress.push_card(CardInstance::new(card_type));
    progress.clear_selection();
    Ok((id, card_type))
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Toggle a card in or out of the selection. When the selection is full the
/// oldest entry is evicted.
pub fn toggle_select(progress: &mut PlayerProgress, card: CardId) -> Result<SelectionChange, EngineError> {
    if progress.card(card).is_none() {
        return Err(EngineError::UnknownCard(card));
    }
    let selection = progress.selection_mut();
    if let Some(pos) = selection.iter().position(|c| *c == card) {
        selection.remove(pos);
        return Ok(SelectionChange::Deselected);
    }
    let evicted = if selection.len() >= SELECTION_CAP {
        selection.pop_front()
    } else {
        None
    };
    selection.push_back(card);
    Ok(match evicted {
        Some(evicted) => SelectionChange::Replaced { evicted },
        None => SelectionChange::Selected,
    })
}

// ---------------------------------------------------------------------------
// Combination
// ---------------------------------------------------------------------------

/// The selected pair, oldest first, if it may be combined.
pub fn combine_check(catalog: &Catalog, progress: &PlayerProgress) -> Result<(CardId, CardId), SelectionProblem> {
    let selected: Vec<CardId> = progress.selection().collect();
    let [first, second] = selected[..] else {
        return Err(if selected.is_empty() {
            SelectionProblem::Empty
        } else {
            SelectionProblem::NeedsExactlyTwo {
                selected: selected.len(),
            }
        });
    };

    let def_of = |id: CardId| {
        progress
            .card(id)
            .and_then(|card| catalog.card_type(card.card_type))
    };
    let (Some(a), Some(b)) = (def_of(first), def_of(second)) else {
        return Err(SelectionProblem::Mismatched);
    };

    let rule = catalog.combination_rule();
    if (rule.same_name && a.name != b.name) || (rule.same_rarity && a.rarity != b.rarity) {
        return Err(SelectionProblem::Mismatched);
    }
    Ok((first, second))
}

pub fn can_combine(catalog: &Catalog, progress: &PlayerProgress) -> bool {
    combine_check(catalog, progress).is_ok()
}

/// Replace the selected pair with one card of the first selected card's type,
/// one level higher.
pub fn combine(
    catalog: &Catalog,
    progress: &mut PlayerProgress,
    policy: CombineLevel,
) -> Result<Combined, EngineError> {
    let (first, second) = combine_check(catalog, progress).map_err(EngineError::InvalidSelection)?;
    let a = *progress.card(first).ok_or(EngineError::UnknownCard(first))?;
    let b = *progress.card(second).ok_or(EngineError::UnknownCard(second))?;
    progress.remove_card(first);
    progress.remove_card(second);

    let level = match policy {
        CombineLevel::HighestPlusOne => a.level.max(b.level),
        CombineLevel::FirstSelectedPlusOne => a.level,
    }
    .saturating_add(1);
    let result = progress.push_card(CardInstance {
        card_type: a.card_type,
        level,
    });
    progress.clear_selection();

    Ok(Combined {
        consumed: [first, second],
        result,
        card_type: a.card_type,
        level,
    })
}

// ---------------------------------------------------------------------------
// Sale
// ---------------------------------------------------------------------------

/// Sale price of one card: `intrinsic_value × level`.
pub fn card_value(catalog: &Catalog, card: &CardInstance) -> Amount {
    catalog.card_type(card.card_type).map_or(Amount::ZERO, |def| {
        def.intrinsic_value
            .saturating_mul(Amount::from_num(card.level.max(1)))
    })
}

/// What selling the current selection would pay.
pub fn sell_preview(catalog: &Catalog, progress: &PlayerProgress) -> Amount {
    progress
        .selection()
        .filter_map(|id| progress.card(id))
        .fold(Amount::ZERO, |acc, card| {
            acc.saturating_add(card_value(catalog, card))
        })
}

/// Sell every selected card.
pub fn sell(catalog: &Catalog, progress: &mut PlayerProgress) -> Result<Sold, EngineError> {
    if progress.selection_len() == 0 {
        return Err(EngineError::InvalidSelection(SelectionProblem::Empty));
    }
    let proceeds = sell_preview(catalog, progress);
    let cards: Vec<CardId> = progress.selection().collect();
    for id in &cards {
        progress.remove_card(*id);
    }
    progress.clear_selection();
    progress.credit(proceeds);
    Ok(Sold { cards, proceeds })
}
