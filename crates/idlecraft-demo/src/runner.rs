//! Headless run loop: fixed-step ticks with the autoplayer acting between them.

use crate::autoplay::{AutoplayPolicy, Autoplayer};
use crate::error::DemoError;
use crate::report::{EventLog, RunReport};
use idlecraft_core::catalog::Catalog;
use idlecraft_core::engine::Engine;
use idlecraft_core::fixed::amount_to_f64;
use idlecraft_data::{ContentSource, builtin_catalog, load_or_builtin};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Load the catalog from `dir`, or the built-in content when no directory is
/// given. Returns the catalog and a label describing where it came from.
pub fn load_content(dir: Option<&Path>) -> Result<(Catalog, String), DemoError> {
    let Some(dir) = dir else {
        let catalog = builtin_catalog().map_err(|source| DemoError::DataLoad {
            dir: PathBuf::from("<builtin>"),
            source,
        })?;
        return Ok((catalog, "built-in content".to_string()));
    };
    let (catalog, source) = load_or_builtin(dir).map_err(|source| DemoError::DataLoad {
        dir: dir.to_path_buf(),
        source,
    })?;
    let label = match source {
        ContentSource::Directory(path) => path.display().to_string(),
        ContentSource::Builtin { reason } => format!("built-in content ({reason})"),
    };
    Ok((catalog, label))
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Simulated seconds to play.
    pub seconds: f64,
    pub policy: AutoplayPolicy,
    /// Label for the content source, copied into the report.
    pub content: String,
}

/// Number of whole fixed steps that fit in `seconds`.
pub fn steps_for(engine: &Engine, seconds: f64) -> Result<u64, DemoError> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(DemoError::InvalidArgument {
            name: "seconds",
            detail: format!("{seconds} is not a non-negative number"),
        });
    }
    let tick = amount_to_f64(engine.tick_seconds());
    // Absorb the rounding in the f64 division so 10 / 0.1 is 100 steps.
    Ok((seconds / tick + 1e-9).floor() as u64)
}

/// Play `options.seconds` of simulated time and summarize the result.
pub fn run(engine: &mut Engine, options: &RunOptions) -> Result<RunReport, DemoError> {
    let steps = steps_for(engine, options.seconds)?;
    let tick = amount_to_f64(engine.tick_seconds());
    let start = engine.tick();
    let mut player = Autoplayer::new(options.policy.clone());
    let mut log = EventLog::default();
    log.record(engine.drain_events());

    info!(
        target: "idlecraft.demo",
        steps,
        tick_seconds = tick,
        content = %options.content,
        "starting headless run"
    );

    while engine.tick() - start < steps {
        let ran = engine.advance(tick);
        if ran == 0 {
            continue;
        }
        player.act(engine, tick * ran as f64);
        let events = engine.drain_events();
        if !events.is_empty() {
            debug!(target: "idlecraft.demo", tick = engine.tick(), count = events.len(), "events");
        }
        log.record(events);
    }

    let simulated = amount_to_f64(engine.clock().elapsed);
    let report = RunReport::capture(engine, options.content.clone(), simulated, player.tally(), log);
    info!(
        target: "idlecraft.demo",
        ticks = report.ticks,
        currency = %report.currency_text,
        stage = %report.stage,
        state_hash = %report.state_hash,
        "run finished"
    );
    Ok(report)
}
