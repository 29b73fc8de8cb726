//! Commander deck validation.
//!
//! [`DeckValidator::validate`] checks a fully resolved deck and returns the
//! first rule it breaks. The checks always run in the same order, which
//! decides the message a user sees when several rules are broken at once:
//!
//! 1. the deck has entries
//! 2. there is at least one commander
//! 3. every commander is eligible
//! 4. every non-commander card fits the deck's color identity
//! 5. multiple commanders share one pairing mechanic within its maximum
//! 6. the mainboard holds exactly 99 cards
//! 7. mainboard duplicates are basic lands or listed exceptions
//! 8. the sideboard holds at most 10 cards
//!
//! Validation is pure: no lookups, no mutation, no shared state.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, trace};

use crate::corpus::CardResolver;
use crate::deck::{DeckEntry, DeckRole, InputError, ResolvedEntry, resolve_entries};
use crate::identity::{card_color_identity, card_fits_identity, deck_color_identity};
use crate::rules::{
    CommanderRules, PairingViolation, RulesError, allows_multiple, check_pairing, is_eligible_commander,
};

/// Number of non-commander cards a legal deck holds.
pub const MAINBOARD_SIZE: u32 = 99;

/// Most cards a deck may keep in its sideboard.
pub const SIDEBOARD_LIMIT: u32 = 10;

/// Broad category of a rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ViolationKind {
    Structural,
    Eligibility,
    Identity,
    Pairing,
    Quantity,
}

/// A deck rule the candidate list breaks. `Display` is the user-facing reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckViolation {
    #[error("Deck has no cards")]
    EmptyDeck,
    #[error("Deck must have at least one commander")]
    NoCommander,
    #[error("\"{0}\" is not a legal commander")]
    IllegalCommander(String),
    #[error("Card \"{0}\" violates deck color identity")]
    ColorIdentity(String),
    #[error("Commander pairing types must match")]
    PairingMismatch,
    #[error("Invalid commander pairing")]
    InvalidPairing,
    #[error("Too many commanders for pairing rule ({0})")]
    TooManyCommanders(String),
    #[error("Mainboard must contain exactly {expected} cards (found {found})")]
    MainboardSize { found: u32, expected: u32 },
    #[error("Card \"{0}\" violates singleton rules")]
    Singleton(String),
    #[error("Sideboard may not exceed {limit} cards")]
    SideboardSize { found: u32, limit: u32 },
}

impl DeckViolation {
    pub fn kind(&self) -> ViolationKind {
        match self {
            DeckViolation::EmptyDeck | DeckViolation::NoCommander => ViolationKind::Structural,
            DeckViolation::IllegalCommander(_) => ViolationKind::Eligibility,
            DeckViolation::ColorIdentity(_) => ViolationKind::Identity,
            DeckViolation::PairingMismatch
            | DeckViolation::InvalidPairing
            | DeckViolation::TooManyCommanders(_) => ViolationKind::Pairing,
            DeckViolation::MainboardSize { .. }
            | DeckViolation::Singleton(_)
            | DeckViolation::SideboardSize { .. } => ViolationKind::Quantity,
        }
    }

    /// The offending card's name, for violations about one card.
    pub fn card_name(&self) -> Option<&str> {
        match self {
            DeckViolation::IllegalCommander(name)
            | DeckViolation::ColorIdentity(name)
            | DeckViolation::Singleton(name) => Some(name),
            _ => None,
        }
    }
}

impl From<PairingViolation> for DeckViolation {
    fn from(violation: PairingViolation) -> Self {
        match violation {
            PairingViolation::Mismatch => DeckViolation::PairingMismatch,
            PairingViolation::UnknownRule => DeckViolation::InvalidPairing,
            PairingViolation::TooMany { keyword } => DeckViolation::TooManyCommanders(keyword),
        }
    }
}

/// Failure of [`DeckValidator::validate_deck`]: either the input broke the
/// caller's contract, or the deck broke a rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Violation(#[from] DeckViolation),
}

/// Serializable outcome for an HTTP response or UI message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize))]
pub struct ValidationReport {
    pub valid: bool,
    #[cfg_attr(feature = "serialization", serde(skip_serializing_if = "Option::is_none"))]
    pub reason: Option<String>,
    #[cfg_attr(feature = "serialization", serde(skip_serializing_if = "Option::is_none"))]
    pub kind: Option<ViolationKind>,
}

impl From<&Result<(), DeckViolation>> for ValidationReport {
    fn from(result: &Result<(), DeckViolation>) -> Self {
        match result {
            Ok(()) => Self {
                valid: true,
                reason: None,
                kind: None,
            },
            Err(violation) => Self {
                valid: false,
                reason: Some(violation.to_string()),
                kind: Some(violation.kind()),
            },
        }
    }
}

/// Validates decks against one immutable set of rule tables.
#[derive(Debug, Clone, Default)]
pub struct DeckValidator {
    rules: CommanderRules,
}

impl DeckValidator {
    /// Builds a validator over `rules`, rejecting tables that
    /// [`CommanderRules::normalized`] rejects.
    pub fn new(rules: CommanderRules) -> Result<Self, RulesError> {
        Ok(Self {
            rules: rules.normalized()?,
        })
    }

    pub fn rules(&self) -> &CommanderRules {
        &self.rules
    }

    /// Resolves the entries through `resolver`, then validates them.
    pub fn validate_deck<R>(&self, entries: &[DeckEntry], resolver: &R) -> Result<(), ValidationError>
    where
        R: CardResolver + ?Sized,
    {
        let resolved = resolve_entries(entries, resolver)?;
        self.validate(&resolved)?;
        Ok(())
    }

    /// Validates a resolved deck, returning the first violated rule.
    pub fn validate(&self, entries: &[ResolvedEntry<'_>]) -> Result<(), DeckViolation> {
        let result = self.check(entries);
        if let Err(violation) = &result {
            debug!(
                kind = ?violation.kind(),
                reason = %violation,
                entries = entries.len(),
                "deck rejected"
            );
        }
        result
    }

    fn check(&self, entries: &[ResolvedEntry<'_>]) -> Result<(), DeckViolation> {
        if entries.is_empty() {
            return Err(DeckViolation::EmptyDeck);
        }

        let commanders: Vec<&ResolvedEntry<'_>> = entries
            .iter()
            .filter(|entry| entry.role == DeckRole::Commander)
            .collect();
        if commanders.is_empty() {
            return Err(DeckViolation::NoCommander);
        }

        if let Some(entry) = commanders
            .iter()
            .find(|entry| !is_eligible_commander(entry.card, &self.rules))
        {
            return Err(DeckViolation::IllegalCommander(entry.card.name.clone()));
        }

        let identity = deck_color_identity(entries, &self.rules);
        trace!(%identity, "deck color identity");

        if let Some(entry) = entries.iter().find(|entry| {
            entry.role != DeckRole::Commander && !card_fits_identity(entry.card, identity)
        }) {
            trace!(
                card = %entry.card.name,
                escaping = %card_color_identity(entry.card).outside(identity),
                "card outside deck identity"
            );
            return Err(DeckViolation::ColorIdentity(entry.card.name.clone()));
        }

        if commanders.len() > 1 {
            let cards: Vec<_> = commanders.iter().map(|entry| entry.card).collect();
            check_pairing(&cards, &self.rules)?;
        }

        // A commander listed again in the mainboard is not counted there.
        let commander_names: HashSet<&str> = commanders
            .iter()
            .map(|entry| entry.card.name.as_str())
            .collect();
        let mainboard: Vec<&ResolvedEntry<'_>> = entries
            .iter()
            .filter(|entry| entry.role == DeckRole::Mainboard)
            .filter(|entry| !commander_names.contains(entry.card.name.as_str()))
            .collect();

        let mainboard_count = total_quantity(mainboard.iter().copied());
        if mainboard_count != u64::from(MAINBOARD_SIZE) {
            return Err(DeckViolation::MainboardSize {
                found: saturate(mainboard_count),
                expected: MAINBOARD_SIZE,
            });
        }

        if let Some(entry) = mainboard
            .iter()
            .find(|entry| entry.quantity > 1 && !allows_multiple(entry.card, &self.rules))
        {
            return Err(DeckViolation::Singleton(entry.card.name.clone()));
        }

        let sideboard_count = total_quantity(
            entries
                .iter()
                .filter(|entry| entry.role == DeckRole::Sideboard),
        );
        if sideboard_count > u64::from(SIDEBOARD_LIMIT) {
            return Err(DeckViolation::SideboardSize {
                found: saturate(sideboard_count),
                limit: SIDEBOARD_LIMIT,
            });
        }

        Ok(())
    }
}

// Summed wide so that huge quantities cannot wrap back into range.
fn total_quantity<'a, 'c: 'a>(entries: impl Iterator<Item = &'a ResolvedEntry<'c>>) -> u64 {
    entries.map(|entry| u64::from(entry.quantity)).sum()
}

fn saturate(count: u64) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, CardBuilder};
    use crate::color::ColorSet;
    use crate::mana::ManaCost;
    use crate::rules::PairingRule;

    fn card(name: &str, type_line: &str, cost: &str, identity: &str, text: &str) -> Card {
        let mut builder = CardBuilder::new(name, name)
            .type_line(type_line)
            .oracle_text(text)
            .color_identity(ColorSet::from_letters(identity));
        if !cost.is_empty() {
            builder = builder.mana_cost(ManaCost::parse(cost).unwrap());
        }
        builder.build()
    }

    fn island() -> Card {
        card("Island", "Basic Land — Island", "", "U", "({T}: Add {U}.)")
    }

    fn talrand() -> Card {
        card(
            "Talrand, Sky Summoner",
            "Legendary Creature — Merfolk Wizard",
            "{2}{U}{U}",
            "U",
            "Whenever you cast an instant or sorcery spell, create a 2/2 blue Drake creature token with flying.",
        )
    }

    #[test]
    fn test_empty_deck() {
        let validator = DeckValidator::default();
        assert_eq!(validator.validate(&[]), Err(DeckViolation::EmptyDeck));
    }

    #[test]
    fn test_minimal_legal_deck() {
        let validator = DeckValidator::default();
        let commander = talrand();
        let island = island();
        let entries = [
            ResolvedEntry::new(&commander, DeckRole::Commander, 1),
            ResolvedEntry::new(&island, DeckRole::Mainboard, 99),
        ];
        assert_eq!(validator.validate(&entries), Ok(()));
    }

    #[test]
    fn test_commander_repeated_in_mainboard_is_not_counted() {
        let validator = DeckValidator::default();
        let commander = talrand();
        let island = island();
        let entries = [
            ResolvedEntry::new(&commander, DeckRole::Commander, 1),
            ResolvedEntry::new(&commander, DeckRole::Mainboard, 1),
            ResolvedEntry::new(&island, DeckRole::Mainboard, 99),
        ];
        assert_eq!(validator.validate(&entries), Ok(()));
    }

    #[test]
    fn test_mainboard_size_reason() {
        let validator = DeckValidator::default();
        let commander = talrand();
        let island = island();
        let entries = [
            ResolvedEntry::new(&commander, DeckRole::Commander, 1),
            ResolvedEntry::new(&island, DeckRole::Mainboard, 98),
        ];
        let err = validator.validate(&entries).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Mainboard must contain exactly 99 cards (found 98)"
        );
        assert_eq!(err.kind(), ViolationKind::Quantity);
    }

    #[test]
    fn test_new_normalizes_rule_tables() {
        let zero = CommanderRules::empty().with_pairing_rule(PairingRule::new("none", "x", 0));
        assert!(matches!(DeckValidator::new(zero), Err(RulesError::ZeroMax(_))));

        let mut rules = CommanderRules::empty();
        rules.pairing.push(PairingRule {
            name: "shout".to_string(),
            keyword: " PARTNER ".to_string(),
            max: 2,
        });
        let validator = DeckValidator::new(rules).unwrap();
        assert!(validator.rules().pairing_rule("partner").is_some());
    }

    #[test]
    fn test_counts_saturate_instead_of_wrapping() {
        assert_eq!(saturate(u64::from(u32::MAX) + 100), u32::MAX);
        assert_eq!(saturate(98), 98);
    }

    #[test]
    fn test_sideboard_is_checked_for_identity() {
        let validator = DeckValidator::default();
        let commander = talrand();
        let island = island();
        let bolt = card("Lightning Bolt", "Instant", "{R}", "R", "");
        let entries = [
            ResolvedEntry::new(&commander, DeckRole::Commander, 1),
            ResolvedEntry::new(&island, DeckRole::Mainboard, 99),
            ResolvedEntry::new(&bolt, DeckRole::Sideboard, 1),
        ];
        assert_eq!(
            validator.validate(&entries),
            Err(DeckViolation::ColorIdentity("Lightning Bolt".to_string()))
        );
    }

    #[test]
    fn test_violation_kinds_and_names() {
        assert_eq!(DeckViolation::NoCommander.kind(), ViolationKind::Structural);
        assert_eq!(
            DeckViolation::IllegalCommander("X".into()).kind(),
            ViolationKind::Eligibility
        );
        assert_eq!(DeckViolation::InvalidPairing.kind(), ViolationKind::Pairing);
        assert_eq!(
            DeckViolation::Singleton("Sol Ring".into()).card_name(),
            Some("Sol Ring")
        );
        assert_eq!(DeckViolation::PairingMismatch.card_name(), None);
    }

    #[test]
    fn test_reason_strings() {
        assert_eq!(
            DeckViolation::IllegalCommander("Sol Ring".into()).to_string(),
            "\"Sol Ring\" is not a legal commander"
        );
        assert_eq!(
            DeckViolation::TooManyCommanders("partner".into()).to_string(),
            "Too many commanders for pairing rule (partner)"
        );
        assert_eq!(
            DeckViolation::SideboardSize { found: 11, limit: 10 }.to_string(),
            "Sideboard may not exceed 10 cards"
        );
    }

    #[test]
    fn test_report_from_result() {
        let legal: Result<(), DeckViolation> = Ok(());
        let ok = ValidationReport::from(&legal);
        assert!(ok.valid);
        assert_eq!(ok.reason, None);

        let illegal: Result<(), DeckViolation> = Err(DeckViolation::NoCommander);
        let err = ValidationReport::from(&illegal);
        assert!(!err.valid);
        assert_eq!(
            err.reason.as_deref(),
            Some("Deck must have at least one commander")
        );
        assert_eq!(err.kind, Some(ViolationKind::Structural));
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn test_report_json() {
        let illegal: Result<(), DeckViolation> = Err(DeckViolation::ColorIdentity("Bolt".into()));
        let report = ValidationReport::from(&illegal);
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"valid":false,"reason":"Card \"Bolt\" violates deck color identity","kind":"identity"}"#
        );
        let legal: Result<(), DeckViolation> = Ok(());
        let ok = serde_json::to_string(&ValidationReport::from(&legal)).unwrap();
        assert_eq!(ok, r#"{"valid":true}"#);
    }
}
