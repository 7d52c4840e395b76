//! A player's hand.

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Ordered list of cards held by one player.
///
/// A player owns exactly one hand at a time; certain house rules swap
/// hands wholesale between players.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The held cards, in hand order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Add a card to the back of the hand.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove and return the card at `index`.
    ///
    /// Panics if `index` is out of bounds; callers validate indices
    /// against the hand they snapshot.
    pub fn remove(&mut self, index: usize) -> Card {
        self.cards.remove(index)
    }

    /// Get the card at `index`, if it exists.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }
}
