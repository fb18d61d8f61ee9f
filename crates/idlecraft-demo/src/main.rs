use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use idlecraft_core::config::{self, EngineConfig};
use idlecraft_core::engine::Engine;
use idlecraft_demo::{AutoplayPolicy, RunOptions, load_content, run};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

/// Headless runner for the idlecraft incremental-game engine.
#[derive(Debug, Parser)]
#[command(name = "idlecraft", version, about)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play a simulated session with the autoplayer and print a report.
    Run(RunArgs),
    /// Load a content directory strictly and print what it contains.
    Validate {
        #[arg(long, value_name = "DIR")]
        data: PathBuf,
    },
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Content directory holding `gameData.*` and `cards.*`. Built-in
    /// content is used when omitted or when loading fails.
    #[arg(long, value_name = "DIR")]
    data: Option<PathBuf>,

    /// Simulated seconds to play.
    #[arg(long, value_name = "SECONDS", default_value_t = 600.0)]
    seconds: f64,

    /// Card-draw RNG seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the content's recommended tick length.
    #[arg(long, value_name = "SECONDS")]
    tick_seconds: Option<f64>,

    #[arg(long, value_name = "N", default_value_t = 5.0)]
    clicks_per_second: f64,

    /// Seconds between card draws; 0 disables drawing.
    #[arg(long, value_name = "SECONDS", default_value_t = 10.0)]
    draw_interval: f64,

    /// Sell the oldest cards once the hand grows past this size.
    #[arg(long, value_name = "N", default_value_t = 12)]
    max_hand: usize,

    #[arg(long)]
    no_upgrades: bool,

    #[arg(long, value_enum, default_value_t = CardScaling::Linear)]
    card_scaling: CardScaling,

    #[arg(long, value_enum, default_value_t = CombineLevel::HighestPlusOne)]
    combine_level: CombineLevel,

    #[arg(long, value_enum, default_value_t = DrawPool::Unlocked)]
    draw_pool: DrawPool,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CardScaling {
    Linear,
    PerLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CombineLevel {
    HighestPlusOne,
    FirstSelectedPlusOne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DrawPool {
    Unlocked,
    Catalog,
}

impl From<CardScaling> for config::CardScaling {
    fn from(value: CardScaling) -> Self {
        match value {
            CardScaling::Linear => Self::Linear,
            CardScaling::PerLevel => Self::PerLevel,
        }
    }
}

impl From<CombineLevel> for config::CombineLevel {
    fn from(value: CombineLevel) -> Self {
        match value {
            CombineLevel::HighestPlusOne => Self::HighestPlusOne,
            CombineLevel::FirstSelectedPlusOne => Self::FirstSelectedPlusOne,
        }
    }
}

impl From<DrawPool> for config::DrawPool {
    fn from(value: DrawPool) -> Self {
        match value {
            DrawPool::Unlocked => Self::Unlocked,
            DrawPool::Catalog => Self::Catalog,
        }
    }
}

impl RunArgs {
    fn engine_config(&self) -> EngineConfig {
        let defaults = EngineConfig::default();
        EngineConfig {
            seed: self.seed.unwrap_or(defaults.seed),
            card_scaling: self.card_scaling.into(),
            combine_level: self.combine_level.into(),
            draw_pool: self.draw_pool.into(),
            tick_seconds: self.tick_seconds.or(defaults.tick_seconds),
        }
    }

    fn policy(&self) -> AutoplayPolicy {
        AutoplayPolicy {
            clicks_per_second: self.clicks_per_second,
            draw_interval_seconds: self.draw_interval,
            max_hand: self.max_hand,
            buy_upgrades: !self.no_upgrades,
            ..AutoplayPolicy::default()
        }
    }
}

fn init_tracing(verbose: u8, format: LogFormat) {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run_command(args: RunArgs) -> Result<()> {
    let (catalog, content) = load_content(args.data.as_deref())?;
    let mut engine = Engine::new(catalog, args.engine_config());
    let options = RunOptions {
        seconds: args.seconds,
        policy: args.policy(),
        content,
    };
    let report = run(&mut engine, &options).context("headless run failed")?;
    match args.report {
        ReportFormat::Text => print!("{}", report.render_text()),
        ReportFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn validate_command(dir: PathBuf) -> Result<()> {
    let catalog = idlecraft_data::load_content_dir(&dir)
        .with_context(|| format!("content in {} is invalid", dir.display()))?;
    info!(target: "idlecraft.demo", dir = %dir.display(), "content is valid");
    println!(
        "{}: {} stages, {} generators, {} upgrades, {} card types",
        dir.display(),
        catalog.stage_count(),
        catalog.generator_count(),
        catalog.upgrade_count(),
        catalog.card_type_count()
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);
    match cli.command {
        Command::Run(args) => run_command(args),
        Command::Validate { data } => validate_command(data),
    }
}
