//! The card model.
//!
//! A card's identity — base color and kind — is fixed when it is dealt.
//! Three mutable fields form a small state machine on top of it:
//!
//! - `activation`: whether a special card's effect is still pending
//!   (`Open`) or has been resolved (`Closed`). Transitions are checked;
//!   setting a card to the state it is already in is a typed error.
//! - `color_mask`: a color assigned to a wild card after placement,
//!   overriding its base color for placement purposes only. Settable at
//!   most once, only on a wild base, and never the sentinel itself.
//! - `placer`: the player who placed the card on the discard pile.
//!   Settable at most once.
//!
//! `reset` restores all three to their defaults when a card is recycled
//! into a fresh draw pile.

use serde::{Deserialize, Serialize};

use crate::core::error::CardStateError;
use crate::core::player::PlayerId;

/// Card color. `Wild` is the wildcard sentinel, never a concrete color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
    Wild,
}

impl Color {
    /// The four concrete colors, excluding the sentinel.
    pub const SOLID: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];
}

/// Turn-flow effect carried by an action card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowAction {
    /// The next player loses their turn.
    Skip,
    /// The play direction reverses.
    Reverse,
}

/// Payload of a wild card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WildKind {
    /// Plain wild: the placer picks the effective color.
    ChooseColor,
    /// Wild draw four: picks a color and forces a four-card draw.
    DrawFour,
}

/// Card kind with kind-specific payload.
///
/// Dispatch is by exhaustive pattern matching; there is no card type
/// hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Numeric card, value 0-9.
    Number(u8),
    /// Penalty card forcing a draw of the given amount (e.g. draw two).
    Penalty(u8),
    /// Turn-flow action card.
    Flow(FlowAction),
    /// Wild card.
    Wild(WildKind),
}

impl CardKind {
    /// Whether a card of this kind carries an effect that stays pending
    /// across the turn boundary when placed.
    ///
    /// Reverse resolves in the same decision phase and plain wilds
    /// resolve when the color is chosen, so neither opens.
    #[must_use]
    pub fn opens_on_placement(self) -> bool {
        matches!(
            self,
            CardKind::Penalty(_) | CardKind::Flow(FlowAction::Skip) | CardKind::Wild(WildKind::DrawFour)
        )
    }
}

/// Whether a special card's effect is pending (`Open`) or resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activation {
    Open,
    #[default]
    Closed,
}

/// A playing card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    color: Color,
    kind: CardKind,
    #[serde(default)]
    color_mask: Option<Color>,
    #[serde(default)]
    placer: Option<PlayerId>,
    #[serde(default)]
    activation: Activation,
}

impl Card {
    /// Create a card in its default state (closed, unmasked, unplaced).
    #[must_use]
    pub fn new(color: Color, kind: CardKind) -> Self {
        Self {
            color,
            kind,
            color_mask: None,
            placer: None,
            activation: Activation::Closed,
        }
    }

    /// Base color, immutable.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Card kind, immutable.
    #[must_use]
    pub fn kind(&self) -> CardKind {
        self.kind
    }

    /// Color used for placement decisions: the mask if one was assigned,
    /// otherwise the base color.
    #[must_use]
    pub fn effective_color(&self) -> Color {
        self.color_mask.unwrap_or(self.color)
    }

    /// The assigned color mask, if any.
    #[must_use]
    pub fn color_mask(&self) -> Option<Color> {
        self.color_mask
    }

    /// The player who placed this card, if it has been placed.
    #[must_use]
    pub fn placer(&self) -> Option<PlayerId> {
        self.placer
    }

    /// Whether the card's effect is still pending.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.activation == Activation::Open
    }

    /// Toggle the open/closed state.
    ///
    /// Setting the state it is already in is an invariant violation.
    pub fn set_open(&mut self, open: bool) -> Result<(), CardStateError> {
        match (self.activation, open) {
            (Activation::Open, true) => Err(CardStateError::AlreadyOpen),
            (Activation::Closed, false) => Err(CardStateError::AlreadyClosed),
            (_, true) => {
                self.activation = Activation::Open;
                Ok(())
            }
            (_, false) => {
                self.activation = Activation::Closed;
                Ok(())
            }
        }
    }

    /// Assign the color mask.
    ///
    /// Only valid once, only on a wild base, and the sentinel itself is
    /// not a color.
    pub fn assign_mask(&mut self, color: Color) -> Result<(), CardStateError> {
        if self.color != Color::Wild {
            return Err(CardStateError::MaskOnSolidColor);
        }
        if self.color_mask.is_some() {
            return Err(CardStateError::MaskAlreadySet);
        }
        if color == Color::Wild {
            return Err(CardStateError::WildMask);
        }
        self.color_mask = Some(color);
        Ok(())
    }

    /// Record which player placed this card. Only valid once.
    pub fn assign_placer(&mut self, player: PlayerId) -> Result<(), CardStateError> {
        if let Some(existing) = self.placer {
            return Err(CardStateError::PlacerAlreadySet(existing));
        }
        self.placer = Some(player);
        Ok(())
    }

    /// Restore the mutable fields to their defaults.
    ///
    /// Called when the card returns to a draw pile.
    pub fn reset(&mut self) {
        self.color_mask = None;
        self.placer = None;
        self.activation = Activation::Closed;
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            CardKind::Number(n) => write!(f, "{:?} {n}", self.color),
            CardKind::Penalty(n) => write!(f, "{:?} Draw {n}", self.color),
            CardKind::Flow(FlowAction::Skip) => write!(f, "{:?} Skip", self.color),
            CardKind::Flow(FlowAction::Reverse) => write!(f, "{:?} Reverse", self.color),
            CardKind::Wild(WildKind::ChooseColor) => match self.color_mask {
                Some(c) => write!(f, "Wild ({c:?})"),
                None => write!(f, "Wild"),
            },
            CardKind::Wild(WildKind::DrawFour) => match self.color_mask {
                Some(c) => write!(f, "Wild Draw 4 ({c:?})"),
                None => write!(f, "Wild Draw 4"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_defaults() {
        let card = Card::new(Color::Red, CardKind::Number(5));

        assert_eq!(card.color(), Color::Red);
        assert_eq!(card.kind(), CardKind::Number(5));
        assert_eq!(card.effective_color(), Color::Red);
        assert!(!card.is_open());
        assert_eq!(card.placer(), None);
        assert_eq!(card.color_mask(), None);
    }

    #[test]
    fn test_open_close_transitions() {
        let mut card = Card::new(Color::Blue, CardKind::Penalty(2));

        assert!(card.set_open(true).is_ok());
        assert!(card.is_open());

        // Double-open is an error
        assert_eq!(card.set_open(true), Err(CardStateError::AlreadyOpen));

        assert!(card.set_open(false).is_ok());
        assert!(!card.is_open());

        // Double-close is an error
        assert_eq!(card.set_open(false), Err(CardStateError::AlreadyClosed));
    }

    #[test]
    fn test_mask_only_on_wild() {
        let mut solid = Card::new(Color::Green, CardKind::Number(3));
        assert_eq!(
            solid.assign_mask(Color::Red),
            Err(CardStateError::MaskOnSolidColor)
        );

        let mut wild = Card::new(Color::Wild, CardKind::Wild(WildKind::ChooseColor));
        assert!(wild.assign_mask(Color::Red).is_ok());
        assert_eq!(wild.effective_color(), Color::Red);
        assert_eq!(wild.color(), Color::Wild); // Base unchanged
    }

    #[test]
    fn test_mask_set_once() {
        let mut wild = Card::new(Color::Wild, CardKind::Wild(WildKind::DrawFour));

        wild.assign_mask(Color::Blue).unwrap();
        assert_eq!(
            wild.assign_mask(Color::Green),
            Err(CardStateError::MaskAlreadySet)
        );
    }

    #[test]
    fn test_mask_rejects_sentinel() {
        let mut wild = Card::new(Color::Wild, CardKind::Wild(WildKind::ChooseColor));
        assert_eq!(wild.assign_mask(Color::Wild), Err(CardStateError::WildMask));
    }

    #[test]
    fn test_placer_set_once() {
        let mut card = Card::new(Color::Yellow, CardKind::Number(9));

        assert!(card.assign_placer(PlayerId::new(1)).is_ok());
        assert_eq!(card.placer(), Some(PlayerId::new(1)));
        assert_eq!(
            card.assign_placer(PlayerId::new(2)),
            Err(CardStateError::PlacerAlreadySet(PlayerId::new(1)))
        );
    }

    #[test]
    fn test_reset() {
        let mut card = Card::new(Color::Wild, CardKind::Wild(WildKind::DrawFour));
        card.assign_placer(PlayerId::new(0)).unwrap();
        card.assign_mask(Color::Red).unwrap();
        card.set_open(true).unwrap();

        card.reset();

        assert_eq!(card.placer(), None);
        assert_eq!(card.color_mask(), None);
        assert!(!card.is_open());
        assert_eq!(card.effective_color(), Color::Wild);

        // Reset state accepts the mutations again
        assert!(card.assign_mask(Color::Green).is_ok());
        assert!(card.assign_placer(PlayerId::new(1)).is_ok());
    }

    #[test]
    fn test_opens_on_placement() {
        assert!(CardKind::Penalty(2).opens_on_placement());
        assert!(CardKind::Flow(FlowAction::Skip).opens_on_placement());
        assert!(CardKind::Wild(WildKind::DrawFour).opens_on_placement());

        assert!(!CardKind::Number(7).opens_on_placement());
        assert!(!CardKind::Flow(FlowAction::Reverse).opens_on_placement());
        assert!(!CardKind::Wild(WildKind::ChooseColor).opens_on_placement());
    }

    #[test]
    fn test_display() {
        let card = Card::new(Color::Red, CardKind::Number(7));
        assert_eq!(format!("{card}"), "Red 7");

        let mut wild = Card::new(Color::Wild, CardKind::Wild(WildKind::ChooseColor));
        assert_eq!(format!("{wild}"), "Wild");
        wild.assign_mask(Color::Blue).unwrap();
        assert_eq!(format!("{wild}"), "Wild (Blue)");
    }

    #[test]
    fn test_serialization() {
        let mut card = Card::new(Color::Wild, CardKind::Wild(WildKind::DrawFour));
        card.assign_mask(Color::Red).unwrap();

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
