//! Strategy hooks.
//!
//! Strategies are external collaborators: the engine calls into them
//! synchronously and blocks until they answer. Console-driven and
//! heuristic players live outside this crate; the baseline strategies
//! here exist so rounds can be driven deterministically (tests,
//! simulations).

use crate::cards::{Card, Color};
use crate::core::rng::GameRng;
use crate::game::GameView;

/// A player's answer to "which card do you play?".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerChoice {
    /// Place the card at this hand index.
    Play(usize),
    /// Place nothing and draw instead.
    Draw,
    /// Request that the game end.
    Quit,
}

/// Decision hooks consulted during a player's turn.
pub trait Strategy {
    /// Choose a card to place, or draw, or quit.
    fn choose_card(&mut self, view: &GameView) -> PlayerChoice;

    /// Choose the effective color for a placed wild card.
    ///
    /// Returning the wildcard sentinel is reported as an invalid-color
    /// event and the question is asked again.
    fn choose_color(&mut self, view: &GameView) -> Color;

    /// After drawing because no card was placed: play the drawn card
    /// immediately (if legal)?
    fn should_play_drawn(&mut self, view: &GameView, drawn: &Card) -> bool;
}

/// Plays the first placeable card, always plays a legal drawn card,
/// and picks the most common color in hand for wilds.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstPlaceable;

impl Strategy for FirstPlaceable {
    fn choose_card(&mut self, view: &GameView) -> PlayerChoice {
        match view.placeable.first() {
            Some(&idx) => PlayerChoice::Play(idx),
            None => PlayerChoice::Draw,
        }
    }

    fn choose_color(&mut self, view: &GameView) -> Color {
        most_common_color(&view.hand)
    }

    fn should_play_drawn(&mut self, _view: &GameView, _drawn: &Card) -> bool {
        true
    }
}

/// Plays a uniformly random placeable card.
#[derive(Clone, Debug)]
pub struct RandomStrategy {
    rng: GameRng,
}

impl RandomStrategy {
    /// Create a random strategy with its own seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn choose_card(&mut self, view: &GameView) -> PlayerChoice {
        match self.rng.choose(&view.placeable) {
            Some(&idx) => PlayerChoice::Play(idx),
            None => PlayerChoice::Draw,
        }
    }

    fn choose_color(&mut self, _view: &GameView) -> Color {
        let idx = self.rng.gen_range(0..Color::SOLID.len());
        Color::SOLID[idx]
    }

    fn should_play_drawn(&mut self, _view: &GameView, _drawn: &Card) -> bool {
        true
    }
}

/// The solid color appearing most often in `hand` (falls back to Red).
fn most_common_color(hand: &[Card]) -> Color {
    let mut counts = [0usize; Color::SOLID.len()];
    for card in hand {
        if let Some(pos) = Color::SOLID.iter().position(|&c| c == card.effective_color()) {
            counts[pos] += 1;
        }
    }

    let best = counts
        .iter()
        .enumerate()
        .max_by_key(|(_, &count)| count)
        .map(|(idx, _)| idx)
        .unwrap_or(0);

    Color::SOLID[best]
}
