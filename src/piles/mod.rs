//! Pile primitives: the draw pile and the discard pile.

pub mod discard;
pub mod draw;

pub use discard::DiscardPile;
pub use draw::DrawPile;
