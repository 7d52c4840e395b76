//! Players: hands and strategy hooks.

pub mod hand;
pub mod strategy;

pub use hand::Hand;
pub use strategy::{FirstPlaceable, PlayerChoice, RandomStrategy, Strategy};

/// A seated player: a name, one hand, and the strategy that answers
/// for them.
pub struct Player {
    /// Display name, used by event sinks.
    pub name: String,
    /// The cards currently held.
    pub hand: Hand,
    /// External decision hooks.
    pub strategy: Box<dyn Strategy>,
}

impl Player {
    /// Create a player with an empty hand.
    #[must_use]
    pub fn new(name: impl Into<String>, strategy: Box<dyn Strategy>) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(),
            strategy,
        }
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("hand", &self.hand)
            .finish_non_exhaustive()
    }
}
