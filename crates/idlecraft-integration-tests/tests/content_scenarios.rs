//! Content files on disk through the loader, the engine, and the headless
//! runner.
//!
//! The orchard content is written as TOML (`gameData`) plus JSON (`cards`)
//! so one directory exercises two formats at once.

use std::fs;
use std::path::{Path, PathBuf};

use idlecraft_core::config::EngineConfig;
use idlecraft_core::engine::Engine;
use idlecraft_core::error::EngineError;
use idlecraft_core::event::EngineEvent;
use idlecraft_core::fixed::Amount;
use idlecraft_data::builtin::{CARDS_JSON, GAME_DATA_JSON};
use idlecraft_data::{builtin_catalog, load_content_dir};
use idlecraft_demo::{AutoplayPolicy, RunOptions, RunReport, load_content, run};

const ORCHARD_GAME_DATA: &str = r#"
[meta.engine]
tick_seconds_recommended = 0.25
currency_start = 0

[meta.theme]
currency_name = "Apples"

[[narrative_stages]]
id = "seed"
order = 1
unlock_condition = { type = "auto" }
theme = { name = "Seed", story_text = "A single pip in the dirt." }

[[narrative_stages]]
id = "sapling"
order = 2
unlock_condition = { type = "currency", value = 50 }
theme = { name = "Sapling", story_text = "Something green." }

[[narrative_stages]]
id = "grove"
order = 3
unlock_condition = { type = "currency", value = 400 }
theme = { name = "Grove", story_text = "Trees as far as you can see." }

[[generators]]
id = "picker"
base_cost = 5
base_rate = 1.0
cost_scaling = 1.2
unlock_condition = { type = "narrative_stage", value = "seed" }
theme = { name = "Picker" }

[[generators]]
id = "press"
base_cost = 60
base_rate = 6.0
cost_scaling = 1.25
unlock_condition = { type = "narrative_stage", value = "sapling" }
theme = { name = "Cider Press" }

[[upgrades]]
id = "baskets"
cost = 40
effect = { type = "multiplier", target = "currency_per_click", value = 2.0 }
unlock_condition = { type = "narrative_stage", value = "seed" }
theme = { name = "Baskets" }
"#;

const ORCHARD_CARDS: &str = r#"{
  "card_types": [
    {
      "id": "worm",
      "name": "Friendly Worm",
      "rarity": "common",
      "effects": { "type": "click_power", "base_value": 1.0, "scaling_per_level": 0.5 },
      "intrinsic_value": 3
    }
  ]
}"#;

fn make_test_dir(suffix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "idlecraft_integration_{suffix}_{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn cleanup(dir: &Path) {
    let _ = fs::remove_dir_all(dir);
}

fn write_orchard(dir: &Path) {
    fs::write(dir.join("gameData.toml"), ORCHARD_GAME_DATA).unwrap();
    fs::write(dir.join("cards.json"), ORCHARD_CARDS).unwrap();
}

fn headless(engine: &mut Engine, seconds: f64, content: &str) -> RunReport {
    let options = RunOptions {
        seconds,
        policy: AutoplayPolicy::default(),
        content: content.to_string(),
    };
    run(engine, &options).unwrap()
}

// ===========================================================================
// Loading
// ===========================================================================

#[test]
fn orchard_loads_from_mixed_formats() {
    let dir = make_test_dir("orchard_load");
    write_orchard(&dir);
    let catalog = load_content_dir(&dir).unwrap();
    assert_eq!(catalog.meta().currency_name, "Apples");
    assert_eq!(catalog.meta().tick_seconds, 0.25);
    assert_eq!(catalog.stage_count(), 3);
    assert_eq!(catalog.generator_count(), 2);
    assert_eq!(catalog.upgrade_count(), 1);
    assert_eq!(catalog.card_type_count(), 1);
    cleanup(&dir);
}

#[test]
fn builtin_files_on_disk_play_like_the_embedded_copy() {
    let dir = make_test_dir("builtin_copy");
    fs::write(dir.join("gameData.json"), GAME_DATA_JSON).unwrap();
    fs::write(dir.join("cards.json"), CARDS_JSON).unwrap();

    let mut from_disk = Engine::new(load_content_dir(&dir).unwrap(), EngineConfig::default());
    let mut embedded = Engine::new(builtin_catalog().unwrap(), EngineConfig::default());
    let a = headless(&mut from_disk, 120.0, "disk");
    let b = headless(&mut embedded, 120.0, "embedded");
    assert_eq!(a.state_hash, b.state_hash);
    cleanup(&dir);
}

#[test]
fn incomplete_directory_falls_back_and_still_plays() {
    let dir = make_test_dir("incomplete");
    fs::write(dir.join("gameData.toml"), ORCHARD_GAME_DATA).unwrap();

    let (catalog, label) = load_content(Some(&dir)).unwrap();
    assert!(label.starts_with("built-in content ("), "label was {label}");
    let mut engine = Engine::new(catalog, EngineConfig::default());
    let report = headless(&mut engine, 30.0, &label);
    assert_eq!(report.currency_name, "Coins");
    assert_eq!(report.content, label);
    cleanup(&dir);
}

// ===========================================================================
// Playthroughs
// ===========================================================================

#[test]
fn orchard_scripted_playthrough() {
    let dir = make_test_dir("orchard_script");
    write_orchard(&dir);
    let mut engine = Engine::new(load_content_dir(&dir).unwrap(), EngineConfig::default());
    let picker = engine.catalog().generator_by_key("picker").unwrap();
    let press = engine.catalog().generator_by_key("press").unwrap();
    engine.drain_events();

    assert_eq!(
        engine.purchase_generator(picker),
        Err(EngineError::Unaffordable {
            cost: Amount::from_num(5),
            available: Amount::ZERO,
        })
    );
    for _ in 0..5 {
        engine.click();
    }
    engine.purchase_generator(picker).unwrap();
    assert_eq!(engine.currency(), Amount::ZERO);

    assert_eq!(engine.advance(10.0), 40);
    assert_eq!(engine.currency(), Amount::from_num(10));
    assert!(engine.generator_views().iter().all(|view| view.id != press));

    for _ in 0..40 {
        engine.click();
    }
    let events = engine.drain_events();
    let titles: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::StageAdvanced { title, .. } => Some(title.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(titles, ["Sapling"]);
    assert!(engine.generator_views().iter().any(|view| view.id == press));
    cleanup(&dir);
}

#[test]
fn autoplayed_orchard_reaches_the_grove() {
    let dir = make_test_dir("orchard_auto");
    write_orchard(&dir);
    let mut engine = Engine::new(load_content_dir(&dir).unwrap(), EngineConfig::default());
    let report = headless(&mut engine, 600.0, "orchard");

    let titles: Vec<_> = report.stages.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["Seed", "Sapling", "Grove"]);
    assert_eq!(report.stage, "Grove");
    assert_eq!(report.ticks, 2400);
    assert!(report.actions.generators_bought > 0);
    assert!(report.cards.iter().all(|card| card.name == "Friendly Worm"));

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["currency_name"], "Apples");
    assert_eq!(json["stages"][2]["title"], "Grove");
    cleanup(&dir);
}

#[test]
fn tick_override_changes_the_step_count() {
    let dir = make_test_dir("orchard_tick");
    write_orchard(&dir);
    let config = EngineConfig {
        tick_seconds: Some(0.5),
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(load_content_dir(&dir).unwrap(), config);
    let report = headless(&mut engine, 10.0, "orchard");
    assert_eq!(report.ticks, 20);
    assert_eq!(report.simulated_seconds, 10.0);
    cleanup(&dir);
}

#[test]
fn same_seed_same_outcome_across_loads() {
    let dir = make_test_dir("orchard_seed");
    write_orchard(&dir);
    let play = |seed| {
        let config = EngineConfig {
            seed,
            ..EngineConfig::default()
        };
        let mut engine = Engine::new(load_content_dir(&dir).unwrap(), config);
        headless(&mut engine, 300.0, "orchard")
    };
    assert_eq!(play(11), play(11));
    cleanup(&dir);
}
