//! Unlock conditions and narrative stage advancement.
//!
//! Visibility of generators, upgrades, and card types is derived from the
//! current stage and balance on every query; nothing is cached. Stage
//! advancement is the only state change made here.

use crate::catalog::{Catalog, UnlockCondition};
use crate::id::{CardTypeId, GeneratorId, StageId, UpgradeId};
use crate::progress::PlayerProgress;

/// Whether `condition` holds for the given progress.
pub fn condition_met(catalog: &Catalog, progress: &PlayerProgress, condition: &UnlockCondition) -> bool {
    match condition {
        UnlockCondition::Auto => true,
        UnlockCondition::CurrencyAtLeast(threshold) => progress.currency() >= *threshold,
        UnlockCondition::StageAtLeast(stage) => stage_reached(catalog, progress, *stage),
    }
}

/// Whether the current stage's order is at least `stage`'s order.
pub fn stage_reached(catalog: &Catalog, progress: &PlayerProgress, stage: StageId) -> bool {
    match (
        catalog.stage_order(stage),
        catalog.stage_order(progress.stage()),
    ) {
        (Some(required), Some(current)) => required <= current,
        _ => false,
    }
}

pub fn generator_visible(catalog: &Catalog, progress: &PlayerProgress, id: GeneratorId) -> bool {
    catalog
        .generator(id)
        .is_some_and(|def| condition_met(catalog, progress, &def.unlock))
}

/// Unlocked upgrades that are not yet owned.
pub fn upgrade_visible(catalog: &Catalog, progress: &PlayerProgress, id: UpgradeId) -> bool {
    upgrade_unlocked(catalog, progress, id) && !progress.owns_upgrade(id)
}

pub fn upgrade_unlocked(catalog: &Catalog, progress: &PlayerProgress, id: UpgradeId) -> bool {
    catalog
        .upgrade(id)
        .is_some_and(|def| condition_met(catalog, progress, &def.unlock))
}

pub fn card_type_unlocked(catalog: &Catalog, progress: &PlayerProgress, id: CardTypeId) -> bool {
    catalog
        .card_type(id)
        .is_some_and(|def| condition_met(catalog, progress, &def.unlock))
}

/// The next stage, if its unlock condition currently holds.
pub fn pending_stage(catalog: &Catalog, progress: &PlayerProgress) -> Option<StageId> {
    let next = catalog.next_stage(progress.stage())?;
    let def = catalog.stage(next)?;
    condition_met(catalog, progress, &def.unlock).then_some(next)
}

/// Advance through every stage whose condition holds, one at a time in
/// order. Returns the stages entered, oldest first.
pub fn advance_stages(catalog: &Catalog, progress: &mut PlayerProgress) -> Vec<StageId> {
    let mut entered = Vec::new();
    while let Some(next) = pending_stage(catalog, progress) {
        progress.set_stage(next);
        entered.push(next);
    }
    entered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogBuilder, NarrativeStage};
    use crate::fixed::f64_to_amount;
    use crate::test_utils::*;

    fn stage(key: &str, order: u32, unlock: UnlockCondition) -> NarrativeStage {
        NarrativeStage {
            key: key.to_string(),
            order,
            unlock,
            title: key.to_string(),
            story: String::new(),
        }
    }

    #[test]
    fn starts_at_first_stage_with_nothing_pending() {
        let catalog = sample_catalog();
        let progress = PlayerProgress::new(&catalog);
        assert_eq!(progress.stage(), catalog.stage_by_key("stage1").unwrap());
        assert_eq!(pending_stage(&catalog, &progress), None);
    }

    #[test]
    fn currency_threshold_advances_stage() {
        let catalog = sample_catalog();
        let mut progress = PlayerProgress::new(&catalog);
        progress.credit(f64_to_amount(399.0));
        assert!(advance_stages(&catalog, &mut progress).is_empty());

        progress.credit(f64_to_amount(1.0));
        let entered = advance_stages(&catalog, &mut progress);
        assert_eq!(entered, vec![catalog.stage_by_key("stage2").unwrap()]);

        // Idempotent.
        assert!(advance_stages(&catalog, &mut progress).is_empty());
    }

    #[test]
    fn stage_never_regresses_when_currency_drops() {
        let catalog = sample_catalog();
        let mut progress = PlayerProgress::new(&catalog);
        progress.credit(f64_to_amount(400.0));
        advance_stages(&catalog, &mut progress);
        let stage2 = catalog.stage_by_key("stage2").unwrap();
        assert_eq!(progress.stage(), stage2);

        assert!(progress.try_debit(f64_to_amount(500.0)));
        advance_stages(&catalog, &mut progress);
        assert_eq!(progress.stage(), stage2);
    }

    #[test]
    fn several_thresholds_fire_in_order() {
        let mut b = CatalogBuilder::new();
        let s1 = b.register_stage(stage("s1", 1, UnlockCondition::Auto)).unwrap();
        let s2 = b
            .register_stage(stage("s2", 2, UnlockCondition::CurrencyAtLeast(f64_to_amount(10.0))))
            .unwrap();
        let s3 = b
            .register_stage(stage("s3", 3, UnlockCondition::CurrencyAtLeast(f64_to_amount(20.0))))
            .unwrap();
        let s4 = b
            .register_stage(stage("s4", 4, UnlockCondition::CurrencyAtLeast(f64_to_amount(1000.0))))
            .unwrap();
        let catalog = b.build().unwrap();
        let mut progress = PlayerProgress::new(&catalog);
        assert_eq!(progress.stage(), s1);

        progress.credit(f64_to_amount(50.0));
        assert_eq!(advance_stages(&catalog, &mut progress), vec![s2, s3]);
        assert_eq!(progress.stage(), s3);
        assert!(!stage_reached(&catalog, &progress, s4));
    }

    #[test]
    fn gaps_in_stage_order_are_walked() {
        let mut b = CatalogBuilder::new();
        b.register_stage(stage("a", 10, UnlockCondition::Auto)).unwrap();
        let c = b.register_stage(stage("c", 30, UnlockCondition::Auto)).unwrap();
        let catalog = b.build().unwrap();
        let mut progress = PlayerProgress::new(&catalog);
        assert_eq!(advance_stages(&catalog, &mut progress), vec![c]);
    }

    #[test]
    fn stage_gated_content_visibility() {
        let catalog = sample_catalog();
        let mut progress = PlayerProgress::new(&catalog);
        let upgrade = catalog.upgrade_by_key("upgrade1").unwrap();
        let staker = catalog.card_type_by_key("eth_staker").unwrap();
        let miner = catalog.card_type_by_key("btc_miner").unwrap();

        assert!(generator_visible(&catalog, &progress, GeneratorId(0)));
        assert!(generator_visible(&catalog, &progress, GeneratorId(1)));
        assert!(!upgrade_visible(&catalog, &progress, upgrade));
        assert!(card_type_unlocked(&catalog, &progress, miner));
        assert!(!card_type_unlocked(&catalog, &progress, staker));

        progress.credit(f64_to_amount(400.0));
        advance_stages(&catalog, &mut progress);
        assert!(upgrade_visible(&catalog, &progress, upgrade));
        assert!(card_type_unlocked(&catalog, &progress, staker));

        progress.insert_upgrade(upgrade);
        assert!(upgrade_unlocked(&catalog, &progress, upgrade));
        assert!(!upgrade_visible(&catalog, &progress, upgrade));
    }

    #[test]
    fn unknown_ids_are_never_visible() {
        let catalog = sample_catalog();
        let progress = PlayerProgress::new(&catalog);
        assert!(!generator_visible(&catalog, &progress, GeneratorId(42)));
        assert!(!upgrade_visible(&catalog, &progress, UpgradeId(42)));
        assert!(!stage_reached(&catalog, &progress, StageId(42)));
    }
}
