//! Deck suppliers.
//!
//! A deck supplier produces a fresh, independent list of cards with a
//! fixed expected size. The engine clones nothing from the supplier;
//! every call to `cards` yields new cards in their default state.

use crate::cards::card::{Card, CardKind, Color, FlowAction, WildKind};

/// Source of a fresh deck.
pub trait DeckSupplier {
    /// Total number of cards a fresh deck contains.
    ///
    /// The engine asserts card conservation against this size.
    fn expected_size(&self) -> usize;

    /// Produce a fresh deck, all cards in default state.
    fn cards(&self) -> Vec<Card>;
}

/// The standard 108-card deck.
///
/// Per solid color: one 0, two each of 1-9, two Skip, two Reverse, two
/// Draw-2. Plus four Wild and four Wild-Draw-4.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardDeck;

impl DeckSupplier for StandardDeck {
    fn expected_size(&self) -> usize {
        108
    }

    fn cards(&self) -> Vec<Card> {
        let mut deck = Vec::with_capacity(self.expected_size());

        for color in Color::SOLID {
            deck.push(Card::new(color, CardKind::Number(0)));
            for value in 1..=9 {
                deck.push(Card::new(color, CardKind::Number(value)));
                deck.push(Card::new(color, CardKind::Number(value)));
            }
            for _ in 0..2 {
                deck.push(Card::new(color, CardKind::Flow(FlowAction::Skip)));
                deck.push(Card::new(color, CardKind::Flow(FlowAction::Reverse)));
                deck.push(Card::new(color, CardKind::Penalty(2)));
            }
        }

        for _ in 0..4 {
            deck.push(Card::new(Color::Wild, CardKind::Wild(WildKind::ChooseColor)));
            deck.push(Card::new(Color::Wild, CardKind::Wild(WildKind::DrawFour)));
        }

        deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_deck_size() {
        let deck = StandardDeck.cards();
        assert_eq!(deck.len(), StandardDeck.expected_size());
        assert_eq!(deck.len(), 108);
    }

    #[test]
    fn test_standard_deck_composition() {
        let deck = StandardDeck.cards();

        let zeros = deck
            .iter()
            .filter(|c| c.kind() == CardKind::Number(0))
            .count();
        assert_eq!(zeros, 4);

        let fives = deck
            .iter()
            .filter(|c| c.kind() == CardKind::Number(5))
            .count();
        assert_eq!(fives, 8);

        let draw_twos = deck
            .iter()
            .filter(|c| c.kind() == CardKind::Penalty(2))
            .count();
        assert_eq!(draw_twos, 8);

        let skips = deck
            .iter()
            .filter(|c| c.kind() == CardKind::Flow(FlowAction::Skip))
            .count();
        assert_eq!(skips, 8);

        let wilds = deck
            .iter()
            .filter(|c| matches!(c.kind(), CardKind::Wild(_)))
            .count();
        assert_eq!(wilds, 8);

        let red = deck
            .iter()
            .filter(|c| c.color() == Color::Red)
            .count();
        assert_eq!(red, 25);
    }

    #[test]
    fn test_fresh_decks_are_independent() {
        let a = StandardDeck.cards();
        let b = StandardDeck.cards();

        assert_eq!(a, b);
        assert!(a.iter().all(|c| !c.is_open() && c.placer().is_none()));
    }
}
