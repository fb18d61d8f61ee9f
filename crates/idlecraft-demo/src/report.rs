//! End-of-run summary, rendered as text for people or JSON for scripts.

use crate::autoplay::ActionTally;
use crate::error::DemoError;
use idlecraft_core::catalog::Rarity;
use idlecraft_core::engine::Engine;
use idlecraft_core::event::EngineEvent;
use idlecraft_core::fixed::amount_to_f64;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// A stage reached during the run, with the story shown to the player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageEntry {
    pub title: String,
    pub story: String,
    pub tick: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnedGenerator {
    pub key: String,
    pub name: String,
    pub owned: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandCard {
    pub name: String,
    pub rarity: Rarity,
    pub level: u32,
}

/// Collects events while the run is in progress.
#[derive(Debug, Default)]
pub struct EventLog {
    stages: Vec<StageEntry>,
    counts: BTreeMap<String, u64>,
}

impl EventLog {
    pub fn record(&mut self, events: Vec<EngineEvent>) {
        for event in events {
            *self.counts.entry(format!("{:?}", event.kind())).or_default() += 1;
            if let EngineEvent::StageAdvanced {
                title, story, tick, ..
            } = event
            {
                self.stages.push(StageEntry { title, story, tick });
            }
        }
    }

    pub fn stages(&self) -> &[StageEntry] {
        &self.stages
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Where the content came from.
    pub content: String,
    pub seed: u64,
    pub simulated_seconds: f64,
    pub ticks: u64,
    pub currency_name: String,
    pub currency: f64,
    pub currency_text: String,
    pub rate: f64,
    pub rate_text: String,
    pub click_value: f64,
    pub stage: String,
    pub stages: Vec<StageEntry>,
    pub generators: Vec<OwnedGenerator>,
    pub upgrades: Vec<String>,
    pub cards: Vec<HandCard>,
    pub actions: ActionTally,
    pub events: BTreeMap<String, u64>,
    /// FNV-1a hash of the final progress, as 16 hex digits.
    pub state_hash: String,
}

impl RunReport {
    pub fn capture(
        engine: &Engine,
        content: String,
        simulated_seconds: f64,
        actions: ActionTally,
        log: EventLog,
    ) -> Self {
        let hud = engine.hud();
        let catalog = engine.catalog();
        let generators = catalog
            .generators()
            .map(|(id, def)| OwnedGenerator {
                key: def.key.clone(),
                name: def.name.clone(),
                owned: engine.progress().generator_count(id),
            })
            .filter(|g| g.owned > 0)
            .collect();
        let mut upgrades: Vec<_> = engine.progress().upgrades().collect();
        upgrades.sort();
        let upgrades = upgrades
            .into_iter()
            .filter_map(|id| catalog.upgrade(id).map(|def| def.name.clone()))
            .collect();
        let cards = engine
            .card_views()
            .into_iter()
            .map(|view| HandCard {
                name: view.name,
                rarity: view.rarity,
                level: view.level,
            })
            .collect();

        Self {
            content,
            seed: engine.config().seed,
            simulated_seconds,
            ticks: hud.tick,
            currency_name: hud.currency_name,
            currency: amount_to_f64(hud.currency),
            currency_text: hud.currency_text,
            rate: amount_to_f64(hud.rate),
            rate_text: hud.rate_text,
            click_value: amount_to_f64(hud.click_value),
            stage: hud.stage_title,
            stages: log.stages,
            generators,
            upgrades,
            cards,
            actions,
            events: log.counts,
            state_hash: format!("{:016x}", engine.state_hash()),
        }
    }

    pub fn to_json(&self) -> Result<String, DemoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== idlecraft: {} ===", self.content);
        for stage in &self.stages {
            let _ = writeln!(out, "[tick {:>6}] {}", stage.tick, stage.title);
            if !stage.story.is_empty() {
                let _ = writeln!(out, "              {}", stage.story);
            }
        }
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} {}  ({})  click {}",
            self.currency_text, self.currency_name, self.rate_text, self.click_value
        );
        let _ = writeln!(out, "stage:      {}", self.stage);
        let _ = writeln!(
            out,
            "time:       {:.1}s over {} ticks",
            self.simulated_seconds, self.ticks
        );
        for generator in &self.generators {
            let _ = writeln!(out, "generator:  {} x{}", generator.name, generator.owned);
        }
        for upgrade in &self.upgrades {
            let _ = writeln!(out, "upgrade:    {upgrade}");
        }
        for card in &self.cards {
            let _ = writeln!(
                out,
                "card:       {} ({:?}) lvl {}",
                card.name, card.rarity, card.level
            );
        }
        let a = &self.actions;
        let _ = writeln!(
            out,
            "actions:    {} clicks, {} generators, {} upgrades, {} draws, {} combines, {} sold",
            a.clicks,
            a.generators_bought,
            a.upgrades_bought,
            a.cards_drawn,
            a.combinations,
            a.cards_sold
        );
        let _ = writeln!(out, "state hash: {}", self.state_hash);
        out
    }
}
