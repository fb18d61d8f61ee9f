//! Idlecraft Core -- the progression and economy engine for incremental games.
//!
//! A player earns currency from manual clicks and purchased generators,
//! spends it on generators with escalating prices and one-time upgrades, and
//! moves through narrative stages gated by currency thresholds. A card
//! collection runs alongside: cards are drawn at random, combined in matching
//! pairs to level up, and sold for currency.
//!
//! # Flow
//!
//! 1. Content is registered through [`catalog::CatalogBuilder`] and frozen
//!    into an immutable [`catalog::Catalog`].
//! 2. [`engine::Engine::new`] takes the catalog and an
//!    [`config::EngineConfig`] and owns all mutable state from then on.
//! 3. The host calls [`engine::Engine::apply_tick`] on its own timer, or
//!    [`engine::Engine::advance`] with wall time, and forwards player intents
//!    (clicks, purchases, card actions).
//! 4. After every mutation the progression gate runs; stage advances and
//!    other changes are queued as [`event::EngineEvent`]s.
//! 5. The display drains events and re-reads the [`query`] views.
//!
//! # Key Types
//!
//! - [`engine::Engine`] -- Owns catalog, progress, RNG, clock, and events.
//! - [`catalog::Catalog`] -- Stages, generators, upgrades, and card types.
//! - [`progress::PlayerProgress`] -- Balance, owned items, cards, selection.
//! - [`fixed::Amount`] -- Q64.64 fixed-point type for every currency value.
//! - [`error::EngineError`] -- Why an intent was rejected.

pub mod cards;
pub mod catalog;
pub mod config;
pub mod economy;
pub mod effect;
pub mod engine;
pub mod error;
pub mod event;
pub mod fixed;
pub mod format;
pub mod id;
pub mod progress;
pub mod progression;
pub mod query;
pub mod rng;
pub mod sim;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
