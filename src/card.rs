use crate::color::ColorSet;
use crate::ids::CardId;
use crate::mana::ManaCost;
use crate::types::{CardType, Supertype, TypeLine};

/// A card record as supplied by the card corpus.
///
/// Immutable from the validator's point of view: only the fields that deck
/// legality depends on are modeled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub type_line: TypeLine,
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub mana_cost: Option<ManaCost>,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub oracle_text: String,
    /// Colors the corpus assigns to the card's identity, independent of its
    /// mana cost (color indicators, hybrid pips, mana symbols in rules text).
    #[cfg_attr(feature = "serialization", serde(default))]
    pub color_identity: ColorSet,
}

impl Card {
    /// Returns true if this card has the given card type.
    pub fn has_card_type(&self, card_type: CardType) -> bool {
        self.type_line.has_card_type(card_type)
    }

    /// Returns true if this card has the given supertype.
    pub fn has_supertype(&self, supertype: Supertype) -> bool {
        self.type_line.has_supertype(supertype)
    }

    /// Returns true if this card has the given subtype.
    pub fn has_subtype(&self, subtype: &str) -> bool {
        self.type_line.has_subtype(subtype)
    }

    /// Returns true if this is a creature card.
    pub fn is_creature(&self) -> bool {
        self.has_card_type(CardType::Creature)
    }

    /// Returns true if this is an artifact card.
    pub fn is_artifact(&self) -> bool {
        self.has_card_type(CardType::Artifact)
    }

    /// Returns true if this is a legendary card.
    pub fn is_legendary(&self) -> bool {
        self.has_supertype(Supertype::Legendary)
    }

    /// Returns true for basic lands, snow-covered ones included.
    pub fn is_basic_land(&self) -> bool {
        self.has_supertype(Supertype::Basic) && self.has_card_type(CardType::Land)
    }

    /// Oracle text lowercased for keyword searches.
    pub fn oracle_text_lower(&self) -> String {
        self.oracle_text.to_lowercase()
    }
}

/// Builder for constructing Card instances.
#[derive(Debug, Default, Clone)]
pub struct CardBuilder {
    id: CardId,
    name: String,
    type_line: TypeLine,
    mana_cost: Option<ManaCost>,
    oracle_text: String,
    color_identity: ColorSet,
}

impl CardBuilder {
    pub fn new(id: impl Into<CardId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn type_line(mut self, type_line: &str) -> Self {
        self.type_line = TypeLine::parse(type_line);
        self
    }

    pub fn mana_cost(mut self, cost: ManaCost) -> Self {
        self.mana_cost = Some(cost);
        self
    }

    pub fn oracle_text(mut self, text: impl Into<String>) -> Self {
        self.oracle_text = text.into();
        self
    }

    pub fn color_identity(mut self, colors: ColorSet) -> Self {
        self.color_identity = colors;
        self
    }

    pub fn build(self) -> Card {
        Card {
            id: self.id,
            name: self.name,
            type_line: self.type_line,
            mana_cost: self.mana_cost,
            oracle_text: self.oracle_text,
            color_identity: self.color_identity,
        }
    }
}
