//! Deck lists and their resolution against a card corpus.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::card::Card;
use crate::corpus::CardResolver;
use crate::ids::CardId;

/// The part of a deck an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum DeckRole {
    Commander,
    #[default]
    Mainboard,
    Sideboard,
}

impl DeckRole {
    pub fn as_str(self) -> &'static str {
        match self {
            DeckRole::Commander => "commander",
            DeckRole::Mainboard => "mainboard",
            DeckRole::Sideboard => "sideboard",
        }
    }
}

impl fmt::Display for DeckRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown deck role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for DeckRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commander" => Ok(DeckRole::Commander),
            "mainboard" => Ok(DeckRole::Mainboard),
            "sideboard" => Ok(DeckRole::Sideboard),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(feature = "serialization")]
fn one() -> u32 {
    1
}

/// A reference to a card with its role and quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct DeckEntry {
    pub card: CardId,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub role: DeckRole,
    #[cfg_attr(feature = "serialization", serde(default = "one"))]
    pub quantity: u32,
}

impl DeckEntry {
    pub fn new(card: impl Into<CardId>, role: DeckRole, quantity: u32) -> Self {
        Self {
            card: card.into(),
            role,
            quantity,
        }
    }

    pub fn commander(card: impl Into<CardId>) -> Self {
        Self::new(card, DeckRole::Commander, 1)
    }

    pub fn mainboard(card: impl Into<CardId>, quantity: u32) -> Self {
        Self::new(card, DeckRole::Mainboard, quantity)
    }

    pub fn sideboard(card: impl Into<CardId>, quantity: u32) -> Self {
        Self::new(card, DeckRole::Sideboard, quantity)
    }
}

/// A user's deck as stored: an ordered list of entries.
///
/// Nothing here is enforced; legality is decided by the validator at save time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Deck {
    #[cfg_attr(feature = "serialization", serde(default))]
    pub name: String,
    #[cfg_attr(
        feature = "serialization",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub owner: Option<String>,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub entries: Vec<DeckEntry>,
}

impl Deck {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn push(&mut self, entry: DeckEntry) {
        self.entries.push(entry);
    }

    pub fn commanders(&self) -> impl Iterator<Item = &DeckEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.role == DeckRole::Commander)
    }

    /// Sum of quantities for one role, saturating at `u32::MAX`.
    pub fn count(&self, role: DeckRole) -> u32 {
        self.entries
            .iter()
            .filter(|entry| entry.role == role)
            .fold(0u32, |total, entry| total.saturating_add(entry.quantity))
    }
}

/// Precondition failures: the entry list could not be handed to the validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("card reference '{0}' could not be resolved")]
    UnresolvedCard(CardId),
    #[error("card '{0}' has a quantity of zero")]
    ZeroQuantity(CardId),
}

/// An entry whose card data has been fetched from the corpus.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedEntry<'a> {
    pub card: &'a Card,
    pub role: DeckRole,
    pub quantity: u32,
}

impl<'a> ResolvedEntry<'a> {
    pub fn new(card: &'a Card, role: DeckRole, quantity: u32) -> Self {
        Self {
            card,
            role,
            quantity,
        }
    }
}

/// Resolves every entry, failing on the first unknown reference or zero quantity.
pub fn resolve_entries<'a, R>(
    entries: &[DeckEntry],
    resolver: &'a R,
) -> Result<Vec<ResolvedEntry<'a>>, InputError>
where
    R: CardResolver + ?Sized,
{
    entries
        .iter()
        .map(|entry| {
            if entry.quantity == 0 {
                return Err(InputError::ZeroQuantity(entry.card.clone()));
            }
            let card = resolver
                .resolve(&entry.card)
                .ok_or_else(|| InputError::UnresolvedCard(entry.card.clone()))?;
            Ok(ResolvedEntry::new(card, entry.role, entry.quantity))
        })
        .collect()
}
