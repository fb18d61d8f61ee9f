//! The embedded default content, used when no content directory loads.

use crate::loader::{ContentDocuments, DataLoadError, Format, build_catalog, deserialize_str};
use crate::schema::{CardsFile, GameDataFile};
use idlecraft_core::catalog::Catalog;
use std::path::Path;

pub const GAME_DATA_JSON: &str = include_str!("../data/gameData.json");
pub const CARDS_JSON: &str = include_str!("../data/cards.json");

const GAME_DATA_NAME: &str = "<builtin>/gameData.json";
const CARDS_NAME: &str = "<builtin>/cards.json";

/// Parse and resolve the embedded documents.
pub fn builtin_catalog() -> Result<Catalog, DataLoadError> {
    let game_file = Path::new(GAME_DATA_NAME);
    let cards_file = Path::new(CARDS_NAME);
    let game: GameDataFile = deserialize_str(GAME_DATA_JSON, Format::Json, game_file)?;
    let cards: CardsFile = deserialize_str(CARDS_JSON, Format::Json, cards_file)?;
    build_catalog(ContentDocuments {
        game: &game,
        game_file,
        cards: &cards,
        cards_file,
    })
}
