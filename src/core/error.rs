//! Error types.
//!
//! Two families exist:
//!
//! - **Configuration-time errors** surface before any round starts
//!   (a `Fail` conflict between two rules in a pack).
//! - **Invariant violations** indicate a broken rule implementation:
//!   double-setting a card's placer, re-opening an open card, masking a
//!   solid-color card, drawing past a pile's end without the safe-draw
//!   path. These abort the round immediately.
//!
//! In-band gameplay irregularities (an illegal card choice, an invalid
//! color) are *not* errors: they are reported through the event sink and
//! the offending phase repeats.

use crate::core::player::PlayerId;

/// Top-level engine error.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Two rules in one pack declared a `Fail` conflict against each other.
    /// Configuration-time error: the pack cannot be frozen.
    #[error("rule '{first}' cannot coexist with rule '{second}'")]
    RuleConflict { first: String, second: String },

    /// A game needs at least two players.
    #[error("a game needs at least 2 players, got {0}")]
    TooFewPlayers(usize),

    /// Card state machine violation.
    #[error(transparent)]
    Card(#[from] CardStateError),

    /// Pile operation violation.
    #[error(transparent)]
    Pile(#[from] PileError),
}

/// Invalid transition in a card's mutable state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CardStateError {
    #[error("card is already open")]
    AlreadyOpen,

    #[error("card is already closed")]
    AlreadyClosed,

    #[error("placer is already set to {0}")]
    PlacerAlreadySet(PlayerId),

    #[error("color mask is already set")]
    MaskAlreadySet,

    #[error("only wild cards accept a color mask")]
    MaskOnSolidColor,

    #[error("the wildcard sentinel is not a valid color mask")]
    WildMask,
}

/// Invalid pile operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PileError {
    /// `draw(n)` with fewer than `n` cards left. Callers that need
    /// resilience go through the game-level safe-draw helper instead.
    #[error("requested {requested} cards but only {available} remain")]
    Insufficient { requested: usize, available: usize },

    /// `draw_initial_card` is a one-time operation.
    #[error("the initial card was already drawn")]
    InitialCardTaken,

    /// The pile holds no number card to seed the discard pile with.
    #[error("no number card available to seed the discard pile")]
    NoInitialCard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::RuleConflict {
            first: "progressive-draw".to_string(),
            second: "draw-penalty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "rule 'progressive-draw' cannot coexist with rule 'draw-penalty'"
        );
    }

    #[test]
    fn test_card_error_conversion() {
        let err: EngineError = CardStateError::AlreadyOpen.into();
        assert_eq!(err.to_string(), "card is already open");
    }

    #[test]
    fn test_pile_error_display() {
        let err = PileError::Insufficient {
            requested: 4,
            available: 1,
        };
        assert_eq!(err.to_string(), "requested 4 cards but only 1 remain");
    }
}
