//! Card model and deck suppliers.

pub mod card;
pub mod deck;

pub use card::{Activation, Card, CardKind, Color, FlowAction, WildKind};
pub use deck::{DeckSupplier, StandardDeck};
