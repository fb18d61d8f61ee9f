//! Resolution pipeline: reads content files, resolves name references, builds
//! the catalog.
//!
//! Provides format detection (RON/JSON/TOML), file discovery, and
//! deserialization helpers, plus [`load_or_builtin`], which falls back to the
//! embedded content when a content directory cannot be loaded.

use crate::builtin;
use crate::schema::*;
use idlecraft_core::catalog::*;
use idlecraft_core::effect::{CardEffect, LevelCurve, MultiplierTarget, UpgradeEffect};
use idlecraft_core::fixed::{Amount, checked_f64_to_amount};
use idlecraft_core::id::StageId;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Base name of the catalog document.
pub const GAME_DATA_BASE: &str = "gameData";
/// Base name of the card document.
pub const CARDS_BASE: &str = "cards";

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during content loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required content file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A name reference could not be resolved.
    #[error("unresolved {expected_kind} reference '{name}' in {file}")]
    UnresolvedRef {
        file: PathBuf,
        name: String,
        expected_kind: &'static str,
    },

    /// A duplicate name was found.
    #[error("duplicate name '{name}' in {file}")]
    DuplicateName { file: PathBuf, name: String },

    /// A number was NaN, infinite, or out of range.
    #[error("invalid number for {field} of '{key}' in {file}: {value}")]
    InvalidNumber {
        file: PathBuf,
        key: String,
        field: &'static str,
        value: f64,
    },

    /// The resolved content failed catalog validation.
    #[error("invalid content in {file}: {source}")]
    Catalog {
        file: PathBuf,
        #[source]
        source: CatalogError,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported content file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a content file with the given base name.
///
/// Looks for `{base_name}.ron`, `{base_name}.toml`, and `{base_name}.json`.
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for ext in ["ron", "toml", "json"] {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Deserialize `content` in the given format. `file` is only used for errors.
pub fn deserialize_str<T: DeserializeOwned>(
    content: &str,
    format: Format,
    file: &Path,
) -> Result<T, DataLoadError> {
    let parse_err = |detail: String| DataLoadError::Parse {
        file: file.to_path_buf(),
        detail,
    };
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
        Format::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
    }
}

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    deserialize_str(&content, format, path)
}

// ===========================================================================
// Name resolution helpers
// ===========================================================================

/// Look up a name in a map, returning an `UnresolvedRef` error if not found.
pub fn resolve_name<'a, V>(
    map: &'a HashMap<String, V>,
    name: &str,
    file: &Path,
    expected_kind: &'static str,
) -> Result<&'a V, DataLoadError> {
    map.get(name).ok_or_else(|| DataLoadError::UnresolvedRef {
        file: file.to_path_buf(),
        name: name.to_string(),
        expected_kind,
    })
}

/// Check whether a name already exists in a map, returning a `DuplicateName`
/// error if so.
pub fn check_duplicate<V>(
    map: &HashMap<String, V>,
    name: &str,
    file: &Path,
) -> Result<(), DataLoadError> {
    if map.contains_key(name) {
        Err(DataLoadError::DuplicateName {
            file: file.to_path_buf(),
            name: name.to_string(),
        })
    } else {
        Ok(())
    }
}

// ===========================================================================
// Catalog construction
// ===========================================================================

/// Content documents paired with the paths they came from.
pub struct ContentDocuments<'a> {
    pub game: &'a GameDataFile,
    pub game_file: &'a Path,
    pub cards: &'a CardsFile,
    pub cards_file: &'a Path,
}

fn amount(file: &Path, key: &str, field: &'static str, value: f64) -> Result<Amount, DataLoadError> {
    checked_f64_to_amount(value).ok_or_else(|| DataLoadError::InvalidNumber {
        file: file.to_path_buf(),
        key: key.to_string(),
        field,
        value,
    })
}

fn unlock(
    data: &UnlockData,
    stages: &HashMap<String, StageId>,
    file: &Path,
    key: &str,
) -> Result<UnlockCondition, DataLoadError> {
    Ok(match data {
        UnlockData::Auto => UnlockCondition::Auto,
        UnlockData::Currency(v) => UnlockCondition::CurrencyAtLeast(amount(file, key, "unlock value", *v)?),
        UnlockData::NarrativeStage(name) => {
            UnlockCondition::StageAtLeast(*resolve_name(stages, name, file, "narrative stage")?)
        }
    })
}

/// Resolve both documents into a validated [`Catalog`].
pub fn build_catalog(docs: ContentDocuments<'_>) -> Result<Catalog, DataLoadError> {
    let ContentDocuments {
        game,
        game_file,
        cards,
        cards_file,
    } = docs;
    let catalog_err = |file: &Path| {
        let file = file.to_path_buf();
        move |source: CatalogError| DataLoadError::Catalog { file, source }
    };

    let mut builder = CatalogBuilder::new();
    if !(game.meta.engine.tick_seconds_recommended.is_finite()
        && game.meta.engine.tick_seconds_recommended > 0.0)
    {
        return Err(DataLoadError::InvalidNumber {
            file: game_file.to_path_buf(),
            key: "meta".to_string(),
            field: "tick_seconds_recommended",
            value: game.meta.engine.tick_seconds_recommended,
        });
    }
    builder.set_meta(CatalogMeta {
        tick_seconds: game.meta.engine.tick_seconds_recommended,
        currency_start: amount(game_file, "meta", "currency_start", game.meta.engine.currency_start)?,
        currency_name: game.meta.theme.currency_name.clone(),
    });

    // Stage ids are dense in registration order, so every stage name can be
    // resolved before any stage is registered.
    let mut stage_ids: HashMap<String, StageId> = HashMap::new();
    for (i, stage) in game.narrative_stages.iter().enumerate() {
        check_duplicate(&stage_ids, &stage.id, game_file)?;
        stage_ids.insert(stage.id.clone(), StageId(i as u32));
    }

    for stage in &game.narrative_stages {
        builder
            .register_stage(NarrativeStage {
                key: stage.id.clone(),
                order: stage.order,
                unlock: unlock(&stage.unlock_condition, &stage_ids, game_file, &stage.id)?,
                title: stage.theme.name.clone(),
                story: stage.theme.description.clone(),
            })
            .map_err(catalog_err(game_file))?;
    }

    for g in &game.generators {
        builder
            .register_generator(GeneratorDef {
                key: g.id.clone(),
                tier: g.tier,
                base_cost: amount(game_file, &g.id, "baseCost", g.base_cost)?,
                base_rate: amount(game_file, &g.id, "baseRate", g.base_rate)?,
                cost_scaling: amount(game_file, &g.id, "costScaling", g.cost_scaling)?,
                unlock: unlock(&g.unlock_condition, &stage_ids, game_file, &g.id)?,
                name: g.theme.name.clone(),
                description: g.theme.description.clone(),
            })
            .map_err(catalog_err(game_file))?;
    }

    for u in &game.upgrades {
        let UpgradeEffectData::Multiplier { target, value } = &u.effect;
        let target = match target {
            MultiplierTargetData::Global => MultiplierTarget::Global,
            MultiplierTargetData::CurrencyPerClick => MultiplierTarget::CurrencyPerClick,
        };
        builder
            .register_upgrade(UpgradeDef {
                key: u.id.clone(),
                cost: amount(game_file, &u.id, "cost", u.cost)?,
                effect: UpgradeEffect::Multiplier {
                    target,
                    value: amount(game_file, &u.id, "effect value", *value)?,
                },
                unlock: unlock(&u.unlock_condition, &stage_ids, game_file, &u.id)?,
                name: u.theme.name.clone(),
                description: u.theme.description.clone(),
            })
            .map_err(catalog_err(game_file))?;
    }

    for c in &cards.card_types {
        let curve = LevelCurve::new(
            amount(cards_file, &c.id, "base_value", c.effects.base_value)?,
            amount(cards_file, &c.id, "scaling_per_level", c.effects.scaling_per_level)?,
        );
        let effect = match c.effects.kind {
            CardEffectKind::ClickPower => CardEffect::ClickPower(curve),
            CardEffectKind::ClickMultiplier => CardEffect::ClickMultiplier(curve),
            CardEffectKind::AutoclickRate => CardEffect::AutoclickRate(curve),
            CardEffectKind::GlobalMultiplier => CardEffect::GlobalMultiplier(curve),
        };
        builder
            .register_card_type(CardTypeDef {
                key: c.id.clone(),
                name: c.name.clone(),
                rarity: c.rarity,
                description: c.description.clone(),
                effect,
                image: c.image.clone(),
                intrinsic_value: amount(cards_file, &c.id, "intrinsic_value", c.intrinsic_value)?,
                unlock: unlock(&c.unlock_condition, &stage_ids, cards_file, &c.id)?,
            })
            .map_err(catalog_err(cards_file))?;
    }

    let req = &cards.combination_rules.basic_combination.input_requirements;
    builder
        .set_combination_rule(
            req.card_count,
            CombinationRule {
                same_name: req.same_name,
                same_rarity: req.same_rarity,
            },
        )
        .map_err(catalog_err(cards_file))?;

    builder.build().map_err(catalog_err(game_file))
}

// ===========================================================================
// Loading
// ===========================================================================

/// Where the loaded content came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Directory(PathBuf),
    /// The embedded content, substituted because loading failed.
    Builtin { reason: String },
}

/// Load `gameData.*` and `cards.*` from a directory.
pub fn load_content_dir(dir: &Path) -> Result<Catalog, DataLoadError> {
    let game_file = require_data_file(dir, GAME_DATA_BASE)?;
    let cards_file = require_data_file(dir, CARDS_BASE)?;
    load_content_files(&game_file, &cards_file)
}

/// Load the two documents from explicit paths.
pub fn load_content_files(game_file: &Path, cards_file: &Path) -> Result<Catalog, DataLoadError> {
    let game: GameDataFile = deserialize_file(game_file)?;
    let cards: CardsFile = deserialize_file(cards_file)?;
    let catalog = build_catalog(ContentDocuments {
        game: &game,
        game_file,
        cards: &cards,
        cards_file,
    })?;
    info!(
        target: "idlecraft.data",
        game_file = %game_file.display(),
        cards_file = %cards_file.display(),
        stages = catalog.stage_count(),
        generators = catalog.generator_count(),
        upgrades = catalog.upgrade_count(),
        card_types = catalog.card_type_count(),
        "content loaded"
    );
    Ok(catalog)
}

/// Load content from `dir`, or the embedded content if that fails.
///
/// Only fails if the embedded content itself is broken.
pub fn load_or_builtin(dir: &Path) -> Result<(Catalog, ContentSource), DataLoadError> {
    match load_content_dir(dir) {
        Ok(catalog) => Ok((catalog, ContentSource::Directory(dir.to_path_buf()))),
        Err(err) => {
            warn!(
                target: "idlecraft.data",
                dir = %dir.display(),
                error = %err,
                "could not load content, using built-in content"
            );
            let catalog = builtin::builtin_catalog()?;
            Ok((
                catalog,
                ContentSource::Builtin {
                    reason: err.to_string(),
                },
            ))
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "idlecraft_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Clean up a test directory.
    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    fn write_builtin(dir: &Path) {
        fs::write(dir.join("gameData.json"), builtin::GAME_DATA_JSON).unwrap();
        fs::write(dir.join("cards.json"), builtin::CARDS_JSON).unwrap();
    }

    fn docs<'a>(game: &'a GameDataFile, cards: &'a CardsFile) -> ContentDocuments<'a> {
        ContentDocuments {
            game,
            game_file: Path::new("gameData.json"),
            cards,
            cards_file: Path::new("cards.json"),
        }
    }

    fn builtin_docs() -> (GameDataFile, CardsFile) {
        (
            serde_json::from_str(builtin::GAME_DATA_JSON).unwrap(),
            serde_json::from_str(builtin::CARDS_JSON).unwrap(),
        )
    }

    // -----------------------------------------------------------------------
    // detect_format / find_data_file
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("cards.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("cards.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("cards.json")).unwrap(), Format::Json);
        assert!(matches!(
            detect_format(Path::new("cards.yaml")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            detect_format(Path::new("cards")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn find_data_file_found_and_missing() {
        let dir = make_test_dir("find");
        assert_eq!(find_data_file(&dir, "cards").unwrap(), None);
        fs::write(dir.join("cards.toml"), "").unwrap();
        assert_eq!(
            find_data_file(&dir, "cards").unwrap(),
            Some(dir.join("cards.toml"))
        );
        cleanup(&dir);
    }

    #[test]
    fn find_data_file_conflict() {
        let dir = make_test_dir("find_conflict");
        fs::write(dir.join("cards.ron"), "").unwrap();
        fs::write(dir.join("cards.json"), "{}").unwrap();
        assert!(matches!(
            find_data_file(&dir, "cards"),
            Err(DataLoadError::ConflictingFormats { .. })
        ));
        cleanup(&dir);
    }

    #[test]
    fn require_data_file_missing() {
        let dir = make_test_dir("require_missing");
        let result = require_data_file(&dir, GAME_DATA_BASE);
        assert!(matches!(
            result,
            Err(DataLoadError::MissingRequired { ref file, .. }) if file == "gameData"
        ));
        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // Catalog construction
    // -----------------------------------------------------------------------

    #[test]
    fn builtin_documents_resolve() {
        let (game, cards) = builtin_docs();
        let catalog = build_catalog(docs(&game, &cards)).unwrap();
        assert_eq!(catalog.stage_count(), 2);
        assert_eq!(catalog.generator_count(), 2);
        assert_eq!(catalog.upgrade_count(), 1);
        assert_eq!(catalog.card_type_count(), 2);
        assert_eq!(catalog.meta().currency_start, Amount::from_num(100));

        let stage2 = catalog.stage_by_key("stage2").unwrap();
        let upgrade = catalog.upgrade(catalog.upgrade_by_key("upgrade1").unwrap()).unwrap();
        assert_eq!(upgrade.unlock, UnlockCondition::StageAtLeast(stage2));
        assert_eq!(
            catalog.stage(stage2).unwrap().unlock,
            UnlockCondition::CurrencyAtLeast(Amount::from_num(500))
        );
    }

    #[test]
    fn unresolved_stage_reference() {
        let (mut game, cards) = builtin_docs();
        game.generators[0].unlock_condition = UnlockData::NarrativeStage("stage9".to_string());
        assert!(matches!(
            build_catalog(docs(&game, &cards)),
            Err(DataLoadError::UnresolvedRef { ref name, expected_kind: "narrative stage", .. })
                if name == "stage9"
        ));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let (game, mut cards) = builtin_docs();
        let copy = cards.card_types[0].clone();
        cards.card_types.push(copy);
        let err = build_catalog(docs(&game, &cards)).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::Catalog {
                ref file,
                source: idlecraft_core::catalog::CatalogError::DuplicateKey { ref key, .. },
            } if key == "btc_miner" && file.ends_with("cards.json")
        ));
    }

    #[test]
    fn duplicate_generator_ids_name_the_game_file() {
        let (mut game, cards) = builtin_docs();
        let copy = game.generators[0].clone();
        game.generators.push(copy);
        let err = build_catalog(docs(&game, &cards)).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::Catalog {
                ref file,
                source: idlecraft_core::catalog::CatalogError::DuplicateKey { ref key, .. },
            } if key == "generator1" && file.ends_with("gameData.json")
        ));
    }

    #[test]
    fn duplicate_stage_ids_rejected_before_resolution() {
        let (mut game, cards) = builtin_docs();
        let copy = game.narrative_stages[0].clone();
        game.narrative_stages.push(copy);
        assert!(matches!(
            build_catalog(docs(&game, &cards)),
            Err(DataLoadError::DuplicateName { ref name, .. }) if name == "stage1"
        ));
    }

    #[test]
    fn non_finite_numbers_rejected() {
        let (mut game, cards) = builtin_docs();
        game.generators[1].base_rate = f64::INFINITY;
        assert!(matches!(
            build_catalog(docs(&game, &cards)),
            Err(DataLoadError::InvalidNumber { field: "baseRate", .. })
        ));

        let (mut game, cards) = builtin_docs();
        game.meta.engine.tick_seconds_recommended = 0.0;
        assert!(matches!(
            build_catalog(docs(&game, &cards)),
            Err(DataLoadError::InvalidNumber { field: "tick_seconds_recommended", .. })
        ));
    }

    #[test]
    fn catalog_validation_surfaces_with_file() {
        let (mut game, cards) = builtin_docs();
        game.generators[0].cost_scaling = 1.0;
        let err = build_catalog(docs(&game, &cards)).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::Catalog { source: CatalogError::InvalidValue { kind: "generator", .. }, .. }
        ));
        assert!(err.to_string().contains("gameData.json"));

        let (mut game, cards) = builtin_docs();
        game.narrative_stages[1].order = 1;
        assert!(matches!(
            build_catalog(docs(&game, &cards)),
            Err(DataLoadError::Catalog { source: CatalogError::DuplicateStageOrder { .. }, .. })
        ));
    }

    #[test]
    fn combination_rule_must_be_pairwise() {
        let (game, mut cards) = builtin_docs();
        cards.combination_rules.basic_combination.input_requirements.card_count = 3;
        assert!(matches!(
            build_catalog(docs(&game, &cards)),
            Err(DataLoadError::Catalog { source: CatalogError::CombinationArity(3), .. })
        ));
    }

    // -----------------------------------------------------------------------
    // Directory loading
    // -----------------------------------------------------------------------

    #[test]
    fn load_content_dir_json() {
        let dir = make_test_dir("load_json");
        write_builtin(&dir);
        let catalog = load_content_dir(&dir).unwrap();
        assert_eq!(catalog.card_type_count(), 2);
        cleanup(&dir);
    }

    #[test]
    fn load_content_dir_toml_and_ron() {
        let dir = make_test_dir("load_mixed");
        fs::write(
            dir.join("gameData.toml"),
            r#"
[meta.engine]
tick_seconds_recommended = 0.5
currency_start = 5

[[narrative_stages]]
id = "dawn"
order = 1
unlock_condition = { type = "auto" }
theme = { name = "Dawn", story_text = "It begins." }

[[generators]]
id = "lemonade"
base_cost = 4
base_rate = 1.0
cost_scaling = 1.07
unlock_condition = { type = "narrative_stage", value = "dawn" }
theme = { name = "Lemonade Stand" }
"#,
        )
        .unwrap();
        fs::write(
            dir.join("cards.ron"),
            r#"(
    card_types: [
        (
            id: "sun",
            name: "Sun",
            rarity: rare,
            effects: (type: global_multiplier, base_value: 1.5),
            intrinsic_value: 10.0,
        ),
    ],
)"#,
        )
        .unwrap();

        let catalog = load_content_dir(&dir).unwrap();
        assert_eq!(catalog.meta().tick_seconds, 0.5);
        assert_eq!(catalog.meta().currency_name, "Coins");
        let lemonade = catalog
            .generator(catalog.generator_by_key("lemonade").unwrap())
            .unwrap();
        assert_eq!(lemonade.name, "Lemonade Stand");
        let sun = catalog.card_type(catalog.card_type_by_key("sun").unwrap()).unwrap();
        assert_eq!(sun.unlock, UnlockCondition::Auto);
        assert!(matches!(sun.effect, CardEffect::GlobalMultiplier(_)));
        cleanup(&dir);
    }

    #[test]
    fn parse_errors_name_the_file() {
        let dir = make_test_dir("parse_err");
        fs::write(dir.join("gameData.json"), "{ not json").unwrap();
        fs::write(dir.join("cards.json"), builtin::CARDS_JSON).unwrap();
        let err = load_content_dir(&dir).unwrap_err();
        assert!(matches!(err, DataLoadError::Parse { ref file, .. } if file.ends_with("gameData.json")));
        cleanup(&dir);
    }

    #[test]
    fn load_or_builtin_prefers_directory() {
        let dir = make_test_dir("prefer_dir");
        write_builtin(&dir);
        let (_, source) = load_or_builtin(&dir).unwrap();
        assert_eq!(source, ContentSource::Directory(dir.clone()));
        cleanup(&dir);
    }

    #[test]
    fn load_or_builtin_falls_back_with_reason() {
        let dir = make_test_dir("fallback");
        fs::write(dir.join("gameData.json"), builtin::GAME_DATA_JSON).unwrap();
        let (catalog, source) = load_or_builtin(&dir).unwrap();
        assert_eq!(catalog.generator_count(), 2);
        match source {
            ContentSource::Builtin { reason } => assert!(reason.contains("cards")),
            other => panic!("expected builtin fallback, got {other:?}"),
        }
        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // Error display messages
    // -----------------------------------------------------------------------

    #[test]
    fn error_display_messages() {
        let e = DataLoadError::MissingRequired {
            file: "cards".to_string(),
            dir: PathBuf::from("/content"),
        };
        assert!(format!("{e}").contains("cards"));
        assert!(format!("{e}").contains("/content"));

        let e = DataLoadError::InvalidNumber {
            file: PathBuf::from("gameData.json"),
            key: "generator1".to_string(),
            field: "baseCost",
            value: f64::NAN,
        };
        let msg = format!("{e}");
        assert!(msg.contains("baseCost"));
        assert!(msg.contains("generator1"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let data_err: DataLoadError = io_err.into();
        assert!(matches!(data_err, DataLoadError::Io(_)));
        assert!(format!("{data_err}").contains("file not found"));
    }
}
