//! Co-commander pairing mechanics (partner, backgrounds, and friends).
//!
//! Keywords are matched as lowercase substrings of a card's oracle text.
//! Reminder text counts the same as the keyword itself.

use std::collections::BTreeSet;

use crate::card::Card;

use super::CommanderRules;

/// One pairing mechanic: the keyword that declares it and how many
/// commanders it allows together.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct PairingRule {
    pub name: String,
    pub keyword: String,
    pub max: usize,
}

impl PairingRule {
    /// The keyword is stored trimmed and lowercased.
    pub fn new(name: impl Into<String>, keyword: impl AsRef<str>, max: usize) -> Self {
        Self {
            name: name.into(),
            keyword: keyword.as_ref().trim().to_lowercase(),
            max,
        }
    }

    pub(crate) fn defaults() -> Vec<Self> {
        vec![
            Self::new("partner", "partner", 2),
            // One legendary creature plus one Background.
            Self::new("background", "choose a background", 2),
            Self::new("doctors_companion", "doctor's companion", 2),
            Self::new("friends_forever", "friends forever", 2),
        ]
    }
}

/// Returns the keyword of the first pairing rule found in the card's oracle
/// text, in table order.
pub fn pairing_keyword_of<'r>(card: &Card, rules: &'r CommanderRules) -> Option<&'r str> {
    let text = card.oracle_text_lower();
    rules
        .pairing
        .iter()
        .find(|rule| !rule.keyword.is_empty() && text.contains(rule.keyword.as_str()))
        .map(|rule| rule.keyword.as_str())
}

/// Why a multi-commander combination was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingViolation {
    /// Commanders declare different mechanics, or none at all.
    Mismatch,
    /// The shared keyword has no rule in the table.
    UnknownRule,
    /// More commanders than the shared rule allows.
    TooMany { keyword: String },
}

/// Checks that a set of commanders share exactly one pairing mechanic and
/// stay within its maximum.
///
/// Uniformity is checked before the count, so two commanders with different
/// mechanics report a mismatch rather than a count problem. A single
/// commander always passes.
pub fn check_pairing(commanders: &[&Card], rules: &CommanderRules) -> Result<(), PairingViolation> {
    if commanders.len() <= 1 {
        return Ok(());
    }

    let keywords: BTreeSet<&str> = commanders
        .iter()
        .filter_map(|card| pairing_keyword_of(card, rules))
        .collect();

    let mut shared = keywords.iter();
    let (Some(keyword), None) = (shared.next(), shared.next()) else {
        return Err(PairingViolation::Mismatch);
    };

    let rule = rules
        .pairing_rule(keyword)
        .ok_or(PairingViolation::UnknownRule)?;

    if commanders.len() > rule.max {
        return Err(PairingViolation::TooMany {
            keyword: keyword.to_string(),
        });
    }

    Ok(())
}
