//! Which cards may be designated as a commander.

use crate::card::Card;

use super::CommanderRules;

const COMMANDER_TEXT: &str = "can be your commander";

/// Legendary creatures, plus legendary artifacts the rules opened to
/// commander use (Vehicles and Spacecraft).
pub fn is_structural_commander(card: &Card) -> bool {
    if !card.is_legendary() {
        return false;
    }
    card.is_creature()
        || (card.is_artifact() && (card.has_subtype("Vehicle") || card.has_subtype("Spacecraft")))
}

/// True when the card's own rules text lets it lead a deck.
pub fn grants_commander_status(card: &Card) -> bool {
    card.oracle_text_lower().contains(COMMANDER_TEXT)
}

/// A card is a legal commander if it passes the structural test, says so in
/// its rules text, or is named in the exception list (exact, case-sensitive).
pub fn is_eligible_commander(card: &Card, rules: &CommanderRules) -> bool {
    is_structural_commander(card)
        || rules.is_commander_exception(&card.name)
        || grants_commander_status(card)
}
