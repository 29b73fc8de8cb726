pub mod card;
pub mod color;
pub mod corpus;
pub mod deck;
pub mod identity;
pub mod ids;
pub mod import;
pub mod mana;
pub mod rules;
pub mod types;
pub mod validator;
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod wasm_api;

pub use card::{Card, CardBuilder};
pub use color::{Color, ColorSet};
#[cfg(feature = "serialization")]
pub use corpus::CorpusError;
pub use corpus::{CardCorpus, CardResolver};
pub use deck::{Deck, DeckEntry, DeckRole, InputError, ResolvedEntry, resolve_entries};
pub use identity::{card_color_identity, card_fits_identity, deck_color_identity};
pub use ids::CardId;
pub use import::{ImportError, ParsedDecklist, parse_decklist, screen_import};
pub use mana::{ManaCost, ManaCostError, ManaSymbol};
pub use rules::{CommanderRules, PairingRule, RulesError};
pub use types::{CardType, Supertype, TypeLine};
pub use validator::{
    DeckValidator, DeckViolation, MAINBOARD_SIZE, SIDEBOARD_LIMIT, ValidationError,
    ValidationReport, ViolationKind,
};
