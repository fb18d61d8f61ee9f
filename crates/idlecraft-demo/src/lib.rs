//! Headless host for the idlecraft engine.
//!
//! Loads content, drives the fixed-step tick, plays with a scripted
//! [`autoplay::Autoplayer`], and summarizes the run as a
//! [`report::RunReport`]. The `idlecraft` binary wraps this with a CLI.

pub mod autoplay;
pub mod error;
pub mod report;
pub mod runner;

pub use autoplay::{ActionTally, AutoplayPolicy, Autoplayer};
pub use error::DemoError;
pub use report::RunReport;
pub use runner::{RunOptions, load_content, run};
