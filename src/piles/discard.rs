//! The discard pile.
//!
//! A stack: the most recent placement is the top and is the legality
//! reference for the next move. The pile also supports the stacking
//! lookback that computes the accumulated penalty of a run of open
//! penalty cards, and the recycling step that hands everything below
//! the top back to the draw pile when it runs dry.

use crate::cards::{Card, CardKind};
use crate::core::error::CardStateError;

/// LIFO history of placed cards. Index 0 is the top.
#[derive(Clone, Debug, Default)]
pub struct DiscardPile {
    cards: Vec<Card>,
}

impl DiscardPile {
    /// Create an empty pile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards in the pile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the pile is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Push a card as the new top.
    pub fn add(&mut self, card: Card) {
        self.cards.insert(0, card);
    }

    /// The current top card, if any.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Mutable access to the top card.
    pub fn top_mut(&mut self) -> Option<&mut Card> {
        self.cards.first_mut()
    }

    /// The cards from top to bottom.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Accumulated penalty of the run of open penalty cards at the top.
    ///
    /// Walks down from the top while cards remain open, are penalty
    /// cards, and share the top card's draw amount; the walk stops at
    /// the first card breaking any of those conditions. The total is
    /// `run length x shared amount`, or 0 when the top is not an open
    /// penalty card.
    #[must_use]
    pub fn consecutive_draw(&self) -> usize {
        let amount = match self.top() {
            Some(card) if card.is_open() => match card.kind() {
                CardKind::Penalty(amount) => amount as usize,
                _ => return 0,
            },
            _ => return 0,
        };

        self.run_len(amount) * amount
    }

    /// Close every card in the current penalty run.
    ///
    /// Called when a defender takes the accumulated draw.
    pub fn close_run(&mut self) -> Result<(), CardStateError> {
        let amount = match self.top() {
            Some(card) if card.is_open() => match card.kind() {
                CardKind::Penalty(amount) => amount as usize,
                _ => return Ok(()),
            },
            _ => return Ok(()),
        };

        let len = self.run_len(amount);
        for card in &mut self.cards[..len] {
            card.set_open(false)?;
        }
        Ok(())
    }

    fn run_len(&self, amount: usize) -> usize {
        self.cards
            .iter()
            .take_while(|card| {
                card.is_open() && card.kind() == CardKind::Penalty(amount as u8)
            })
            .count()
    }

    /// Take everything below the top for recycling into a draw pile.
    ///
    /// Removes all cards except the current top and resets them to
    /// their default state. Leaves only the top card behind; the caller
    /// refills the draw pile with the returned cards.
    #[must_use]
    pub fn recycle_below_top(&mut self) -> Vec<Card> {
        let mut recycled: Vec<Card> = if self.cards.len() > 1 {
            self.cards.split_off(1)
        } else {
            Vec::new()
        };

        for card in &mut recycled {
            card.reset();
        }

        recycled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Color, FlowAction};
    use crate::core::player::PlayerId;

    fn open_penalty(color: Color, amount: u8) -> Card {
        let mut card = Card::new(color, CardKind::Penalty(amount));
        card.set_open(true).unwrap();
        card
    }

    #[test]
    fn test_add_makes_new_top() {
        let mut pile = DiscardPile::new();
        pile.add(Card::new(Color::Red, CardKind::Number(1)));
        pile.add(Card::new(Color::Blue, CardKind::Number(2)));

        assert_eq!(pile.len(), 2);
        assert_eq!(pile.top().unwrap().kind(), CardKind::Number(2));
    }

    #[test]
    fn test_consecutive_draw_single() {
        let mut pile = DiscardPile::new();
        pile.add(Card::new(Color::Red, CardKind::Number(4)));
        pile.add(open_penalty(Color::Blue, 2));

        assert_eq!(pile.consecutive_draw(), 2);
    }

    #[test]
    fn test_consecutive_draw_run() {
        let mut pile = DiscardPile::new();
        pile.add(Card::new(Color::Red, CardKind::Number(4)));
        pile.add(open_penalty(Color::Red, 2));
        pile.add(open_penalty(Color::Green, 2));
        pile.add(open_penalty(Color::Blue, 2));

        assert_eq!(pile.consecutive_draw(), 6);
    }

    #[test]
    fn test_consecutive_draw_stops_at_closed_card() {
        let mut pile = DiscardPile::new();
        let mut closed = Card::new(Color::Red, CardKind::Penalty(2));
        // placed earlier and already resolved
        closed.assign_placer(PlayerId::new(0)).unwrap();

        pile.add(closed);
        pile.add(open_penalty(Color::Green, 2));
        pile.add(open_penalty(Color::Blue, 2));

        // Only the two cards above the closed one count
        assert_eq!(pile.consecutive_draw(), 4);
    }

    #[test]
    fn test_consecutive_draw_stops_at_different_amount() {
        let mut pile = DiscardPile::new();
        pile.add(open_penalty(Color::Red, 4));
        pile.add(open_penalty(Color::Blue, 2));

        assert_eq!(pile.consecutive_draw(), 2);
    }

    #[test]
    fn test_consecutive_draw_zero_when_top_not_penalty() {
        let mut pile = DiscardPile::new();
        pile.add(open_penalty(Color::Red, 2));
        pile.add(Card::new(Color::Red, CardKind::Number(7)));

        assert_eq!(pile.consecutive_draw(), 0);

        let mut pile = DiscardPile::new();
        let mut skip = Card::new(Color::Red, CardKind::Flow(FlowAction::Skip));
        skip.set_open(true).unwrap();
        pile.add(skip);

        assert_eq!(pile.consecutive_draw(), 0);
    }

    #[test]
    fn test_close_run() {
        let mut pile = DiscardPile::new();
        pile.add(Card::new(Color::Red, CardKind::Number(4)));
        pile.add(open_penalty(Color::Red, 2));
        pile.add(open_penalty(Color::Blue, 2));

        pile.close_run().unwrap();

        assert_eq!(pile.consecutive_draw(), 0);
        assert!(pile.cards().iter().all(|c| !c.is_open()));
    }

    #[test]
    fn test_recycle_below_top_leaves_top() {
        let mut pile = DiscardPile::new();

        let mut buried = Card::new(Color::Wild, CardKind::Wild(crate::cards::WildKind::ChooseColor));
        buried.assign_mask(Color::Red).unwrap();
        buried.assign_placer(PlayerId::new(1)).unwrap();
        pile.add(buried);
        pile.add(Card::new(Color::Green, CardKind::Number(3)));
        pile.add(Card::new(Color::Blue, CardKind::Number(8)));

        let recycled = pile.recycle_below_top();

        assert_eq!(pile.len(), 1);
        assert_eq!(pile.top().unwrap().kind(), CardKind::Number(8));
        assert_eq!(recycled.len(), 2);

        // Recycled cards are back in default state
        for card in &recycled {
            assert_eq!(card.color_mask(), None);
            assert_eq!(card.placer(), None);
            assert!(!card.is_open());
        }
    }

    #[test]
    fn test_recycle_below_top_from_single_card() {
        let mut pile = DiscardPile::new();
        pile.add(Card::new(Color::Red, CardKind::Number(0)));

        assert!(pile.recycle_below_top().is_empty());
        assert_eq!(pile.len(), 1);
    }
}
