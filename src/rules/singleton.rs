use crate::card::Card;

use super::CommanderRules;

/// True if the card may appear in more than one copy: basic lands, and cards
/// named in the singleton exception list.
pub fn allows_multiple(card: &Card, rules: &CommanderRules) -> bool {
    card.is_basic_land() || rules.is_singleton_exception(&card.name)
}
