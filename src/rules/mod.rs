//! Commander format rule tables.
//!
//! The tables are plain data held by [`CommanderRules`] and handed to the
//! validator at construction time. The shipped defaults track the governing
//! body's published exceptions; deployments can replace them from a TOML
//! file without touching validator logic.

pub mod eligibility;
pub mod pairing;
pub mod singleton;

pub use eligibility::{grants_commander_status, is_eligible_commander, is_structural_commander};
pub use pairing::{PairingRule, PairingViolation, check_pairing, pairing_keyword_of};
pub use singleton::allows_multiple;

use std::collections::BTreeSet;

use thiserror::Error;

/// Non-creature cards explicitly allowed as commanders.
const COMMANDER_EXCEPTIONS: &[&str] = &[
    // Planeswalkers
    "Teferi, Temporal Archmage",
    "Daretti, Scrap Savant",
    "Freyalise, Llanowar's Fury",
    "Nahiri, the Lithomancer",
    "Ob Nixilis of the Black Oath",
    "Sorin, Lord of Innistrad",
    "Tevesh Szat, Doom of Fools",
    "Jeska, Thrice Reborn",
    // Vehicles
    "Shorikai, Genesis Engine",
];

/// Cards whose text allows any number of copies in a deck.
const SINGLETON_EXCEPTIONS: &[&str] = &[
    "Relentless Rats",
    "Shadowborn Apostle",
    "Persistent Petitioners",
    "Rat Colony",
    "Dragon's Approach",
    "Nazgûl",
    "Slime Against Humanity",
    "Hare Apparent",
    "Seven Dwarves",
    "Templar Knight",
];

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serialization")]
    #[error("invalid rules file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("pairing rule '{0}' has an empty keyword")]
    EmptyKeyword(String),
    #[error("pairing rule '{0}' must allow at least one commander")]
    ZeroMax(String),
}

/// The rule tables consulted during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CommanderRules {
    /// Exact card names that are legal commanders outside the structural test.
    pub commander_exceptions: BTreeSet<String>,
    /// Pairing mechanics in match order; the first matching keyword wins.
    pub pairing: Vec<PairingRule>,
    /// Exact card names exempt from the one-copy rule (basic lands always are).
    pub singleton_exceptions: BTreeSet<String>,
}

impl Default for CommanderRules {
    fn default() -> Self {
        Self {
            commander_exceptions: COMMANDER_EXCEPTIONS.iter().map(|s| s.to_string()).collect(),
            pairing: PairingRule::defaults(),
            singleton_exceptions: SINGLETON_EXCEPTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CommanderRules {
    /// Rules with every table empty.
    pub fn empty() -> Self {
        Self {
            commander_exceptions: BTreeSet::new(),
            pairing: Vec::new(),
            singleton_exceptions: BTreeSet::new(),
        }
    }

    pub fn with_commander_exception(mut self, name: impl Into<String>) -> Self {
        self.commander_exceptions.insert(name.into());
        self
    }

    /// Appends a pairing rule after the existing ones.
    pub fn with_pairing_rule(mut self, rule: PairingRule) -> Self {
        self.pairing.push(rule);
        self
    }

    pub fn with_singleton_exception(mut self, name: impl Into<String>) -> Self {
        self.singleton_exceptions.insert(name.into());
        self
    }

    pub fn is_commander_exception(&self, name: &str) -> bool {
        self.commander_exceptions.contains(name)
    }

    pub fn is_singleton_exception(&self, name: &str) -> bool {
        self.singleton_exceptions.contains(name)
    }

    /// Looks up the pairing rule declaring `keyword`.
    pub fn pairing_rule(&self, keyword: &str) -> Option<&PairingRule> {
        self.pairing.iter().find(|rule| rule.keyword == keyword)
    }

    /// Rejects empty keywords and zero maximums, and lowercases keywords.
    pub fn normalized(mut self) -> Result<Self, RulesError> {
        for rule in &mut self.pairing {
            rule.keyword = rule.keyword.trim().to_lowercase();
            if rule.keyword.is_empty() {
                return Err(RulesError::EmptyKeyword(rule.name.clone()));
            }
            if rule.max == 0 {
                return Err(RulesError::ZeroMax(rule.name.clone()));
            }
        }
        Ok(self)
    }

    /// Parses rules from TOML. Missing tables fall back to the defaults.
    ///
    /// ```toml
    /// commander_exceptions = ["Teferi, Temporal Archmage"]
    /// singleton_exceptions = ["Relentless Rats"]
    ///
    /// [[pairing]]
    /// name = "partner"
    /// keyword = "partner"
    /// max = 2
    /// ```
    #[cfg(feature = "serialization")]
    pub fn from_toml_str(text: &str) -> Result<Self, RulesError> {
        let rules: CommanderRules = toml::from_str(text)?;
        rules.normalized()
    }

    #[cfg(feature = "serialization")]
    pub fn from_toml_path(path: impl AsRef<std::path::Path>) -> Result<Self, RulesError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
