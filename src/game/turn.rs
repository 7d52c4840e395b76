//! The three-phase turn state machine.
//!
//! Every turn runs the same skeleton:
//!
//! 1. **Initialization** loops over the flow rules until no rule
//!    requests a repeat. Rules resolve pending card effects here (a
//!    skip closing itself, an open penalty forcing draws) and may
//!    request the turn be lost.
//! 2. **Decision**: the player's strategy is asked for a choice, which
//!    is threaded through the flow rules in pack order. A rule may
//!    re-ask the player by requesting a repeat. When the pass placed a
//!    card, every rule's `on_card_placed` hook then sees it, whatever
//!    the pack order. Skipped entirely when initialization lost the
//!    turn.
//! 3. **Finish** runs once per game, not per turn (see `Game::finish`).
//!
//! The loop caps repeats so a misbehaving rule cannot spin forever.

use super::Game;
use crate::core::error::EngineError;
use crate::core::event::GameEvent;
use crate::players::PlayerChoice;
use crate::rules::rule::{Decision, PhaseSignals};

/// Upper bound on repeat passes within one phase.
///
/// Honest rules settle in a handful of passes; hitting the cap means a
/// rule keeps requesting repeats without making progress.
const MAX_PHASE_PASSES: usize = 256;

impl Game {
    /// Run one full turn for the current player.
    pub fn run_turn(&mut self) -> Result<(), EngineError> {
        self.refresh_top();
        let pack = self.rules();

        // Initialization phase. Lose-turn requests stick across passes.
        let mut turn_lost = false;
        for _ in 0..MAX_PHASE_PASSES {
            let mut signals = PhaseSignals::default();
            for rule in pack.flow_rules() {
                rule.on_initialization(self, &mut signals)?;
            }
            turn_lost |= signals.turn_lost();
            if !signals.repeat_requested() {
                break;
            }
        }

        if turn_lost {
            let player = self.current_player();
            self.emit(GameEvent::TurnLost { player });
            self.refresh_top();
            return Ok(());
        }

        // Decision phase.
        for _ in 0..MAX_PHASE_PASSES {
            let player = self.current_player();
            let view = self.view_for(player);
            let choice = self.strategy_choice(&view);

            let chosen = match choice {
                PlayerChoice::Play(index) => {
                    if !self.is_placeable_from_hand(player, index) {
                        self.emit(GameEvent::IllegalChoice { player, index });
                        continue;
                    }
                    Some(index)
                }
                PlayerChoice::Draw => None,
                PlayerChoice::Quit => {
                    self.request_end();
                    return Ok(());
                }
            };

            if self.end_requested() {
                return Ok(());
            }

            let mut decision = Decision::new(player, chosen);
            let mut signals = PhaseSignals::default();
            for rule in pack.flow_rules() {
                rule.on_decision(self, &mut decision, &mut signals)?;
                if self.end_requested() {
                    return Ok(());
                }
            }

            // Placement reactions run after the whole decision pass, so
            // a reacting rule's position in pack order never matters.
            if let Some(placed) = decision.placed.take() {
                for rule in pack.flow_rules() {
                    rule.on_card_placed(self, player, &placed)?;
                }
            }

            if !signals.repeat_requested() {
                break;
            }
        }

        self.refresh_top();
        Ok(())
    }

    fn strategy_choice(&mut self, view: &super::GameView) -> PlayerChoice {
        let player = view.current;
        self.players[player].strategy.choose_card(view)
    }
}
