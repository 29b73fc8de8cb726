//! Color identity derivation for cards and whole decks.
//!
//! A card's identity is the union of the single-color pips in its mana cost
//! and the identity colors the corpus declares for it. A deck's identity is
//! the union over its commanders, plus any other card whose text lets it
//! stand beside a commander (legendary creatures, pairing keywords, and
//! "can be your commander").

use crate::card::Card;
use crate::color::ColorSet;
use crate::deck::{DeckRole, ResolvedEntry};
use crate::rules::{CommanderRules, grants_commander_status, pairing_keyword_of};

/// Computes the color identity a single card contributes.
pub fn card_color_identity(card: &Card) -> ColorSet {
    let from_cost = card
        .mana_cost
        .as_ref()
        .map(|cost| cost.single_color_pips())
        .unwrap_or_default();
    from_cost.union(card.color_identity)
}

/// Whether a card's colors count toward the deck identity even when it is
/// not in the commander role.
pub fn expands_identity(card: &Card, rules: &CommanderRules) -> bool {
    (card.is_legendary() && card.is_creature())
        || pairing_keyword_of(card, rules).is_some()
        || grants_commander_status(card)
}

/// Aggregate identity of a deck. Independent of entry order.
pub fn deck_color_identity(entries: &[ResolvedEntry<'_>], rules: &CommanderRules) -> ColorSet {
    entries
        .iter()
        .filter(|entry| entry.role == DeckRole::Commander || expands_identity(entry.card, rules))
        .fold(ColorSet::COLORLESS, |identity, entry| {
            identity.union(card_color_identity(entry.card))
        })
}

/// True iff the card's identity is a subset of `allowed`. Colorless cards
/// always fit.
pub fn card_fits_identity(card: &Card, allowed: ColorSet) -> bool {
    allowed.contains_all(card_color_identity(card))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardBuilder;
    use crate::color::Color;
    use crate::mana::ManaCost;

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

    #[test]
    fn test_identity_from_mana_cost() {
        let bolt = card("Lightning Bolt", "Instant", "{R}", "", "");
        assert_eq!(card_color_identity(&bolt), ColorSet::RED);
    }

    #[test]
    fn test_identity_unions_declared_colors() {
        // Declared identity covers the {G} in rules text.
        let dork = card("Mana Dork", "Creature — Elf", "{W}", "G", "{T}: Add {G}.");
        let identity = card_color_identity(&dork);
        assert!(identity.contains(Color::White));
        assert!(identity.contains(Color::Green));
        assert_eq!(identity.count(), 2);
    }

    #[test]
    fn test_hybrid_cost_relies_on_declared_identity() {
        let undeclared = card("Hybrid", "Creature — Elf", "{G/W}", "", "");
        assert!(card_color_identity(&undeclared).is_empty());
        let declared = card("Hybrid", "Creature — Elf", "{G/W}", "GW", "");
        assert_eq!(card_color_identity(&declared), ColorSet::from_letters("GW"));
    }

    #[test]
    fn test_colorless_card_fits_anything() {
        let sol_ring = card("Sol Ring", "Artifact", "{1}", "", "{T}: Add {C}{C}.");
        assert!(card_fits_identity(&sol_ring, ColorSet::COLORLESS));
        assert!(card_fits_identity(&sol_ring, ColorSet::from_letters("WUBRG")));
    }

    #[test]
    fn test_card_fits_identity_subset() {
        let boros_charm = card("Boros Charm", "Instant", "{R}{W}", "RW", "");
        assert!(card_fits_identity(&boros_charm, ColorSet::from_letters("RWB")));
        assert!(!card_fits_identity(&boros_charm, ColorSet::from_letters("R")));
    }

    #[test]
    fn test_expands_identity() {
        let rules = CommanderRules::default();
        let legend = card("Legend", "Legendary Creature — Elf", "{G}", "G", "");
        let background = card(
            "Background",
            "Legendary Enchantment — Background",
            "{1}{B}",
            "B",
            "Commander creatures you own have menace.",
        );
        let partner = card("Partner", "Creature — Human", "{U}", "U", "Partner");
        let walker = card(
            "Walker",
            "Legendary Planeswalker — Grist",
            "{1}{B}{G}",
            "BG",
            "Walker can be your commander.",
        );
        assert!(expands_identity(&legend, &rules));
        assert!(!expands_identity(&background, &rules));
        assert!(expands_identity(&partner, &rules));
        assert!(expands_identity(&walker, &rules));
    }

    #[test]
    fn test_deck_identity_unions_commanders_and_expanders() {
        let rules = CommanderRules::default();
        let commander = card("Krenko", "Legendary Creature — Goblin", "{2}{R}{R}", "R", "");
        let legend_in_main = card("Legend", "Legendary Creature — Elf", "{G}", "G", "");
        let plain = card("Island", "Basic Land — Island", "", "U", "");

        let entries = vec![
            ResolvedEntry::new(&commander, DeckRole::Commander, 1),
            ResolvedEntry::new(&legend_in_main, DeckRole::Mainboard, 1),
            ResolvedEntry::new(&plain, DeckRole::Mainboard, 10),
        ];
        assert_eq!(
            deck_color_identity(&entries, &rules),
            ColorSet::from_letters("RG")
        );
    }

    #[test]
    fn test_deck_identity_empty_without_commanders() {
        let rules = CommanderRules::default();
        let bolt = card("Lightning Bolt", "Instant", "{R}", "R", "");
        let entries = vec![ResolvedEntry::new(&bolt, DeckRole::Mainboard, 1)];
        assert!(deck_color_identity(&entries, &rules).is_empty());
    }
}
