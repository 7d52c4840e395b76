//! The draw pile.
//!
//! A shuffled FIFO queue: cards enter at the back when the pile is
//! refilled from the discard pile and leave from the front when drawn.
//! `draw` fails on insufficient cards rather than silently
//! under-returning; callers that need resilience go through the
//! game-level safe-draw helper, which recycles the discard pile first.

use std::collections::VecDeque;

use crate::cards::{Card, CardKind};
use crate::core::error::PileError;
use crate::core::rng::GameRng;

/// Shuffled FIFO source of cards.
#[derive(Clone, Debug, Default)]
pub struct DrawPile {
    cards: VecDeque<Card>,
    initial_taken: bool,
}

impl DrawPile {
    /// Create a pile from a deck, shuffling it in place.
    #[must_use]
    pub fn shuffled(mut deck: Vec<Card>, rng: &mut GameRng) -> Self {
        rng.shuffle(&mut deck);
        Self {
            cards: deck.into(),
            initial_taken: false,
        }
    }

    /// Create a pile from already-ordered cards, without shuffling.
    ///
    /// Used by tests that need a fixed deal.
    #[must_use]
    pub fn from_ordered(deck: Vec<Card>) -> Self {
        Self {
            cards: deck.into(),
            initial_taken: false,
        }
    }

    /// Number of cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the pile is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remove and return `n` cards from the front.
    ///
    /// Fails with `PileError::Insufficient` when fewer than `n` remain;
    /// in that case nothing is removed.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, PileError> {
        if n > self.cards.len() {
            return Err(PileError::Insufficient {
                requested: n,
                available: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..n).collect())
    }

    /// Remove and return the front card, if any.
    pub fn draw_one(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Extract the first number card to seed the discard pile.
    ///
    /// Action and wild cards are skipped, not removed. A one-time
    /// operation: a second call is an error, as is a pile holding no
    /// number card at all.
    pub fn draw_initial_card(&mut self) -> Result<Card, PileError> {
        if self.initial_taken {
            return Err(PileError::InitialCardTaken);
        }

        let position = self
            .cards
            .iter()
            .position(|card| matches!(card.kind(), CardKind::Number(_)))
            .ok_or(PileError::NoInitialCard)?;

        self.initial_taken = true;
        Ok(self
            .cards
            .remove(position)
            .expect("position came from this queue"))
    }

    /// Append recycled cards to the back and reshuffle the whole pile.
    pub fn refill(&mut self, cards: Vec<Card>, rng: &mut GameRng) {
        self.cards.extend(cards);
        let slice = self.cards.make_contiguous();
        rng.shuffle(slice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Color, FlowAction, StandardDeck, DeckSupplier};

    fn number(value: u8) -> Card {
        Card::new(Color::Red, CardKind::Number(value))
    }

    #[test]
    fn test_draw_from_front() {
        let mut pile = DrawPile::from_ordered(vec![number(1), number(2), number(3)]);

        let drawn = pile.draw(2).unwrap();
        assert_eq!(drawn, vec![number(1), number(2)]);
        assert_eq!(pile.len(), 1);
    }

    #[test]
    fn test_draw_insufficient() {
        let mut pile = DrawPile::from_ordered(vec![number(1)]);

        let err = pile.draw(3).unwrap_err();
        assert_eq!(
            err,
            PileError::Insufficient {
                requested: 3,
                available: 1
            }
        );
        // Nothing was removed
        assert_eq!(pile.len(), 1);
    }

    #[test]
    fn test_draw_one() {
        let mut pile = DrawPile::from_ordered(vec![number(4)]);
        assert_eq!(pile.draw_one(), Some(number(4)));
        assert_eq!(pile.draw_one(), None);
    }

    #[test]
    fn test_initial_card_skips_action_cards() {
        let skip = Card::new(Color::Blue, CardKind::Flow(FlowAction::Skip));
        let penalty = Card::new(Color::Green, CardKind::Penalty(2));
        let mut pile = DrawPile::from_ordered(vec![skip.clone(), penalty.clone(), number(6)]);

        let initial = pile.draw_initial_card().unwrap();
        assert_eq!(initial, number(6));

        // The skipped cards are still in the pile, in order
        assert_eq!(pile.draw_one(), Some(skip));
        assert_eq!(pile.draw_one(), Some(penalty));
    }

    #[test]
    fn test_initial_card_twice_is_error() {
        let mut pile = DrawPile::from_ordered(vec![number(1), number(2)]);

        pile.draw_initial_card().unwrap();
        assert_eq!(pile.draw_initial_card(), Err(PileError::InitialCardTaken));
    }

    #[test]
    fn test_initial_card_requires_number() {
        let mut pile = DrawPile::from_ordered(vec![
            Card::new(Color::Red, CardKind::Penalty(2)),
            Card::new(Color::Blue, CardKind::Flow(FlowAction::Reverse)),
        ]);

        assert_eq!(pile.draw_initial_card(), Err(PileError::NoInitialCard));
    }

    #[test]
    fn test_shuffled_is_deterministic() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let mut a = DrawPile::shuffled(StandardDeck.cards(), &mut rng1);
        let mut b = DrawPile::shuffled(StandardDeck.cards(), &mut rng2);

        for _ in 0..108 {
            assert_eq!(a.draw_one(), b.draw_one());
        }
    }

    #[test]
    fn test_refill() {
        let mut rng = GameRng::new(9);
        let mut pile = DrawPile::from_ordered(vec![number(1)]);

        pile.refill(vec![number(2), number(3), number(4)], &mut rng);
        assert_eq!(pile.len(), 4);
    }
}
