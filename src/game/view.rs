//! The read-only snapshot handed to strategies.

use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::player::{PlayerId, PlayerMap};

/// What a strategy is allowed to see when deciding.
///
/// An owned snapshot: it stays valid while the strategy deliberates and
/// exposes nothing another player's hand would leak.
#[derive(Clone, Debug)]
pub struct GameView {
    /// The player being asked.
    pub current: PlayerId,
    /// The top of the discard pile (the legality reference).
    pub top: Card,
    /// The asking player's own hand.
    pub hand: Vec<Card>,
    /// Hand indices that may legally be placed right now.
    pub placeable: SmallVec<[usize; 8]>,
    /// Number of cards every player holds (public knowledge).
    pub hand_sizes: PlayerMap<usize>,
    /// Whether the play direction is reversed.
    pub reversed: bool,
    /// Accumulated penalty of the open run on top of the discard pile.
    pub pending_penalty: usize,
    /// Cards left in the draw pile.
    pub draw_pile_size: usize,
    /// Cards in the discard pile.
    pub discard_size: usize,
}
