//! Shared fixtures for deck validation tests.
//!
//! Cards are registered under their name, so entries can refer to them by
//! name directly:
//!
//! ```ignore
//! let result = DeckScript::new()
//!     .commander("Talrand, Sky Summoner")
//!     .main("Island", 99)
//!     .check();
//! ```

#![allow(dead_code)]

use std::sync::OnceLock;

use decklegal::{
    Card, CardBuilder, CardCorpus, ColorSet, CommanderRules, DeckEntry, DeckValidator,
    DeckViolation, ManaCost, ValidationError,
};

/// Number of colorless filler artifacts in the shared corpus.
pub const FILLER_COUNT: usize = 120;

fn card(name: &str, type_line: &str, cost: &str, identity: &str, text: &str) -> Card {
    let mut builder = CardBuilder::new(name, name)
        .type_line(type_line)
        .oracle_text(text)
        .color_identity(ColorSet::from_letters(identity));
    if !cost.is_empty() {
        builder = builder.mana_cost(ManaCost::parse(cost).expect("fixture mana cost"));
    }
    builder.build()
}

pub fn filler_name(index: usize) -> String {
    format!("Filler Relic {index}")
}

fn build_corpus() -> CardCorpus {
    let mut cards = vec![
        card(
            "Talrand, Sky Summoner",
            "Legendary Creature — Merfolk Wizard",
            "{2}{U}{U}",
            "U",
            "Whenever you cast an instant or sorcery spell, create a 2/2 blue Drake creature token with flying.",
        ),
        card(
            "Krenko, Mob Boss",
            "Legendary Creature — Goblin Warrior",
            "{2}{R}{R}",
            "R",
            "{T}: Create X 1/1 red Goblin creature tokens, where X is the number of Goblins you control.",
        ),
        card(
            "Grand Arbiter Augustin IV",
            "Legendary Creature — Human Advisor",
            "{2}{W}{U}",
            "WU",
            "White spells you cast cost {1} less to cast.",
        ),
        card(
            "Thrasios, Triton Hero",
            "Legendary Creature — Merfolk Wizard",
            "{G}{U}",
            "GU",
            "{4}: Scry 1, then reveal the top card of your library. If it's a land card, put it onto the battlefield tapped. Otherwise, draw a card.\nPartner (You can have two commanders if both have partner.)",
        ),
        card(
            "Tymna the Weaver",
            "Legendary Creature — Human Cleric",
            "{1}{W}{B}",
            "WB",
            "Lifelink\nAt the beginning of each of your postcombat main phases, you may pay X life, where X is the number of opponents that were dealt combat damage this turn. If you do, draw X cards.\nPartner",
        ),
        card(
            "Kraum, Ludevic's Opus",
            "Legendary Creature — Zombie Horror",
            "{3}{U}{R}",
            "UR",
            "Flying, haste\nWhenever an opponent casts their second spell each turn, draw a card.\nPartner",
        ),
        card(
            "Wilson, Refined Grizzly",
            "Legendary Creature — Bear Warrior",
            "{1}{G}",
            "G",
            "Choose a Background (You can have a Background as a second commander.)\nReach, trample, ward {2}",
        ),
        card(
            "Teferi, Temporal Archmage",
            "Legendary Planeswalker — Teferi",
            "{4}{U}{U}",
            "U",
            "+1: Look at the top two cards of your library.\nTeferi, Temporal Archmage can be your commander.",
        ),
        card(
            "Shorikai, Genesis Engine",
            "Legendary Artifact — Vehicle",
            "{4}",
            "WU",
            "{1}, {T}: Draw two cards, then discard a card.\nCrew 8",
        ),
        card("Island", "Basic Land — Island", "", "U", "({T}: Add {U}.)"),
        card("Forest", "Basic Land — Forest", "", "G", "({T}: Add {G}.)"),
        card("Mountain", "Basic Land — Mountain", "", "R", "({T}: Add {R}.)"),
        card("Swamp", "Basic Land — Swamp", "", "B", "({T}: Add {B}.)"),
        card("Wastes", "Basic Land", "", "", "{T}: Add {C}."),
        card(
            "Snow-Covered Island",
            "Basic Snow Land — Island",
            "",
            "U",
            "({T}: Add {U}.)",
        ),
        card("Lightning Bolt", "Instant", "{R}", "R", "Lightning Bolt deals 3 damage to any target."),
        card("Counterspell", "Instant", "{U}{U}", "U", "Counter target spell."),
        card("Swords to Plowshares", "Instant", "{W}", "W", "Exile target creature."),
        card("Llanowar Elves", "Creature — Elf Druid", "{G}", "G", "{T}: Add {G}."),
        card("Sol Ring", "Artifact", "{1}", "", "{T}: Add {C}{C}."),
        card("Command Tower", "Land", "", "", "{T}: Add one mana of any color in your commander's color identity."),
        card(
            "Relentless Rats",
            "Creature — Rat",
            "{1}{B}{B}",
            "B",
            "Relentless Rats gets +1/+1 for each other creature on the battlefield named Relentless Rats.\nA deck can have any number of cards named Relentless Rats.",
        ),
    ];
    cards.extend(
        (0..FILLER_COUNT).map(|index| card(&filler_name(index), "Artifact", "{2}", "", "")),
    );
    cards.into_iter().collect()
}

/// The card pool every fixture deck draws from.
pub fn corpus() -> &'static CardCorpus {
    static CORPUS: OnceLock<CardCorpus> = OnceLock::new();
    CORPUS.get_or_init(build_corpus)
}

/// Looks a fixture card up by name.
pub fn card_named(name: &str) -> &'static Card {
    corpus()
        .find_by_name(name)
        .unwrap_or_else(|| panic!("no fixture card named {name}"))
}

/// Builds a deck entry by entry, then runs it through a validator.
#[derive(Debug, Clone, Default)]
pub struct DeckScript {
    entries: Vec<DeckEntry>,
    rules: Option<CommanderRules>,
}

impl DeckScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commander(mut self, name: &str) -> Self {
        self.entries.push(DeckEntry::commander(name));
        self
    }

    pub fn main(mut self, name: &str, quantity: u32) -> Self {
        self.entries.push(DeckEntry::mainboard(name, quantity));
        self
    }

    pub fn side(mut self, name: &str, quantity: u32) -> Self {
        self.entries.push(DeckEntry::sideboard(name, quantity));
        self
    }

    /// Adds `count` distinct filler artifacts, one copy each, starting at
    /// filler number `from`.
    pub fn fillers(mut self, from: usize, count: usize) -> Self {
        for index in from..from + count {
            self.entries
                .push(DeckEntry::mainboard(filler_name(index), 1));
        }
        self
    }

    pub fn rules(mut self, rules: CommanderRules) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn entries(&self) -> &[DeckEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<DeckEntry> {
        self.entries
    }

    pub fn validator(&self) -> DeckValidator {
        DeckValidator::new(self.rules.clone().unwrap_or_default())
            .expect("fixture rule tables are valid")
    }

    /// Validates the deck. Input errors fail the test; fixtures always resolve.
    pub fn check(&self) -> Result<(), DeckViolation> {
        check_entries(&self.validator(), &self.entries)
    }
}

pub fn check_entries(validator: &DeckValidator, entries: &[DeckEntry]) -> Result<(), DeckViolation> {
    match validator.validate_deck(entries, corpus()) {
        Ok(()) => Ok(()),
        Err(ValidationError::Violation(violation)) => Err(violation),
        Err(ValidationError::Input(err)) => panic!("fixture deck failed to resolve: {err}"),
    }
}

/// Reason string of a failed check.
pub fn reason(result: Result<(), DeckViolation>) -> String {
    match result {
        Ok(()) => panic!("expected the deck to be rejected"),
        Err(violation) => violation.to_string(),
    }
}
