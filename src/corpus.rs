//! Card corpus access.
//!
//! The validator never looks cards up itself: callers resolve every
//! reference first through a [`CardResolver`], usually a [`CardCorpus`]
//! loaded from imported card data.

use std::collections::HashMap;

use crate::card::Card;
use crate::ids::CardId;

/// Read-only lookup from a card reference to its card data.
pub trait CardResolver {
    fn resolve(&self, id: &CardId) -> Option<&Card>;
}

impl CardResolver for HashMap<CardId, Card> {
    fn resolve(&self, id: &CardId) -> Option<&Card> {
        self.get(id)
    }
}

impl<T: CardResolver + ?Sized> CardResolver for &T {
    fn resolve(&self, id: &CardId) -> Option<&Card> {
        (**self).resolve(id)
    }
}

/// In-memory card registry.
///
/// Provides lookup by id and by name (case-insensitive).
#[derive(Debug, Clone, Default)]
pub struct CardCorpus {
    cards: HashMap<CardId, Card>,
    /// Lowercased name to the first id registered under it.
    names: HashMap<String, CardId>,
}

impl CardCorpus {
    /// Create a new empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card, replacing any record with the same id.
    ///
    /// The name index keeps the first printing registered for a name.
    pub fn register(&mut self, card: Card) {
        self.names
            .entry(card.name.to_lowercase())
            .or_insert_with(|| card.id.clone());
        self.cards.insert(card.id.clone(), card);
    }

    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    /// Finds a card by name, ignoring case and surrounding whitespace.
    pub fn find_by_name(&self, name: &str) -> Option<&Card> {
        let id = self.names.get(&name.trim().to_lowercase())?;
        self.cards.get(id)
    }

    pub fn all(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl CardResolver for CardCorpus {
    fn resolve(&self, id: &CardId) -> Option<&Card> {
        self.get(id)
    }
}

impl FromIterator<Card> for CardCorpus {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        let mut corpus = Self::new();
        for card in iter {
            corpus.register(card);
        }
        corpus
    }
}

#[cfg(feature = "serialization")]
pub use scryfall::CorpusError;

#[cfg(feature = "serialization")]
mod scryfall {
    use std::io::Read;

    use serde::Deserialize;
    use thiserror::Error;

    use super::CardCorpus;
    use crate::card::Card;
    use crate::color::ColorSet;
    use crate::ids::CardId;
    use crate::mana::{ManaCost, ManaCostError};
    use crate::types::TypeLine;

    #[derive(Debug, Error)]
    pub enum CorpusError {
        #[error("failed to read card data: {0}")]
        Io(#[from] std::io::Error),
        #[error("card data is not valid JSON: {0}")]
        Json(#[from] serde_json::Error),
    }

    #[derive(Debug, Deserialize)]
    struct ScryfallCard {
        id: String,
        name: String,
        #[serde(default)]
        type_line: Option<String>,
        #[serde(default)]
        mana_cost: Option<String>,
        #[serde(default)]
        oracle_text: Option<String>,
        #[serde(default)]
        color_identity: ColorSet,
        #[serde(default)]
        card_faces: Option<Vec<ScryfallFace>>,
        #[serde(default)]
        lang: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    struct ScryfallFace {
        #[serde(default)]
        mana_cost: Option<String>,
        #[serde(default)]
        type_line: Option<String>,
        #[serde(default)]
        oracle_text: Option<String>,
    }

    impl ScryfallCard {
        fn faces(&self) -> &[ScryfallFace] {
            self.card_faces.as_deref().unwrap_or_default()
        }

        fn oracle_text(&self) -> String {
            if let Some(text) = self.oracle_text.as_ref() {
                return text.clone();
            }
            let parts: Vec<&str> = self
                .faces()
                .iter()
                .filter_map(|face| face.oracle_text.as_deref())
                .collect();
            parts.join("\n")
        }

        fn type_line(&self) -> String {
            if let Some(line) = self.type_line.as_ref() {
                return line.clone();
            }
            let parts: Vec<&str> = self
                .faces()
                .iter()
                .filter_map(|face| face.type_line.as_deref())
                .collect();
            parts.join(" // ")
        }

        fn mana_cost(&self) -> Option<&str> {
            self.mana_cost
                .as_deref()
                .or_else(|| self.faces().first()?.mana_cost.as_deref())
                .filter(|cost| !cost.trim().is_empty())
        }

        fn into_card(self) -> Result<Card, ManaCostError> {
            let mana_cost = self.mana_cost().map(ManaCost::parse).transpose()?;
            let oracle_text = self.oracle_text();
            let type_line = TypeLine::parse(&self.type_line());
            Ok(Card {
                id: CardId::new(self.id),
                name: self.name,
                type_line,
                mana_cost,
                oracle_text,
                color_identity: self.color_identity,
            })
        }
    }

    impl CardCorpus {
        /// Loads a Scryfall bulk-data JSON array.
        ///
        /// Non-English printings are skipped, as are records whose mana cost
        /// cannot be parsed (logged at `warn`).
        pub fn from_scryfall_reader<R: Read>(reader: R) -> Result<Self, CorpusError> {
            let records: Vec<ScryfallCard> = serde_json::from_reader(reader)?;
            let total = records.len();
            let mut corpus = CardCorpus::new();
            let mut skipped = 0usize;

            for record in records {
                if record.lang.as_deref().unwrap_or("en") != "en" {
                    continue;
                }
                let name = record.name.clone();
                match record.into_card() {
                    Ok(card) => corpus.register(card),
                    Err(err) => {
                        skipped += 1;
                        tracing::warn!(card = %name, error = %err, "skipping card record");
                    }
                }
            }

            tracing::info!(total, loaded = corpus.len(), skipped, "loaded card corpus");
            Ok(corpus)
        }

        /// Loads a JSON array of cards in this crate's own [`Card`] shape.
        pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CorpusError> {
            let cards: Vec<Card> = serde_json::from_reader(reader)?;
            Ok(cards.into_iter().collect())
        }

        pub fn from_scryfall_path(path: impl AsRef<std::path::Path>) -> Result<Self, CorpusError> {
            let file = std::fs::File::open(path)?;
            Self::from_scryfall_reader(std::io::BufReader::new(file))
        }
    }
}
