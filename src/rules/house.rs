//! House rule packs.
//!
//! Each pack is a small set of rules merged ahead of the official pack,
//! overriding official behavior through one-way conflict declarations:
//!
//! - **Progressive draw**: a defender facing an open penalty card may
//!   stack a matching penalty card instead of drawing, passing the
//!   accumulated total on. Replaces the official penalty-draw rule.
//! - **Seven swap**: placing a 7 swaps the placer's hand with the next
//!   player's.

use crate::cards::{Card, CardKind};
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::game::Game;
use crate::rules::official::PENALTY_DRAW_RULE;
use crate::rules::rule::{
    Clearance, ConflictResolution, Decision, FlowRule, PhaseSignals, PlacementRule, Rule,
};

/// The progressive-draw pack: stacking penalties plus the placement
/// lock that enforces it.
#[must_use]
pub fn progressive_pack() -> Vec<Box<dyn Rule>> {
    vec![Box::new(ProgressiveDrawRule), Box::new(OpenPenaltyLockRule)]
}

/// The seven-swap pack.
#[must_use]
pub fn seven_swap_pack() -> Vec<Box<dyn Rule>> {
    vec![Box::new(SevenSwapRule)]
}

/// Amount of the open penalty card at the top of the discard pile.
fn open_penalty_amount(game: &Game) -> Option<u8> {
    match game.discard().top() {
        Some(card) if card.is_open() => match card.kind() {
            CardKind::Penalty(amount) => Some(amount),
            _ => None,
        },
        _ => None,
    }
}

/// Stacking penalty draws.
///
/// While the top of the discard pile is an open penalty card, the
/// defender may answer with a penalty card of the same amount; the run
/// grows and the decision passes on. A defender who cannot stack, or
/// chooses to draw anyway, takes the whole accumulated total.
pub struct ProgressiveDrawRule;

impl Rule for ProgressiveDrawRule {
    fn name(&self) -> &'static str {
        "progressive-draw"
    }

    fn conflicts_with(&self, other: &dyn Rule) -> Option<ConflictResolution> {
        if other.name() == PENALTY_DRAW_RULE {
            Some(ConflictResolution::Replace)
        } else {
            None
        }
    }

    fn as_flow(&self) -> Option<&dyn FlowRule> {
        Some(self)
    }
}

impl ProgressiveDrawRule {
    fn take_accumulated(game: &mut Game) -> Result<(), EngineError> {
        let total = game.discard().consecutive_draw();
        let defender = game.current_player();
        game.safe_draw(defender, total);
        game.discard_mut().close_run()?;
        game.refresh_top();
        Ok(())
    }
}

impl FlowRule for ProgressiveDrawRule {
    fn on_initialization(
        &self,
        game: &mut Game,
        signals: &mut PhaseSignals,
    ) -> Result<(), EngineError> {
        let Some(amount) = open_penalty_amount(game) else {
            return Ok(());
        };

        let defender = game.current_player();
        let can_stack = game
            .hand(defender)
            .iter()
            .any(|card| card.kind() == CardKind::Penalty(amount));
        if can_stack {
            // The decision phase runs; the placement lock narrows the
            // legal placements to stacking cards.
            return Ok(());
        }

        Self::take_accumulated(game)?;
        signals.request_lose_turn();
        signals.request_repeat();
        Ok(())
    }

    fn on_decision(
        &self,
        game: &mut Game,
        decision: &mut Decision,
        _signals: &mut PhaseSignals,
    ) -> Result<(), EngineError> {
        if decision.resolved || decision.chosen.is_some() {
            return Ok(());
        }
        if open_penalty_amount(game).is_none() {
            return Ok(());
        }

        // A defender who could stack but drew instead takes the full
        // accumulated total, not a single card.
        Self::take_accumulated(game)?;
        decision.resolved = true;
        Ok(())
    }
}

/// While the top is an open penalty card, only a penalty card of the
/// same amount may be placed.
pub struct OpenPenaltyLockRule;

impl Rule for OpenPenaltyLockRule {
    fn name(&self) -> &'static str {
        "open-penalty-lock"
    }

    fn as_placement(&self) -> Option<&dyn PlacementRule> {
        Some(self)
    }
}

impl PlacementRule for OpenPenaltyLockRule {
    fn clearance(&self, target: &Card, candidate: &Card, _hand: &[Card]) -> Clearance {
        let amount = match target.kind() {
            CardKind::Penalty(amount) if target.is_open() => amount,
            _ => return Clearance::Neutral,
        };

        if candidate.kind() == CardKind::Penalty(amount) {
            Clearance::Allowed
        } else {
            Clearance::Prohibited
        }
    }
}

/// Placing a 7 swaps the placer's hand with the next player's.
pub struct SevenSwapRule;

impl Rule for SevenSwapRule {
    fn name(&self) -> &'static str {
        "seven-swap"
    }

    fn as_flow(&self) -> Option<&dyn FlowRule> {
        Some(self)
    }
}

impl FlowRule for SevenSwapRule {
    fn on_card_placed(
        &self,
        game: &mut Game,
        player: PlayerId,
        card: &Card,
    ) -> Result<(), EngineError> {
        if card.kind() == CardKind::Number(7) {
            let neighbor = game.next_player(player);
            game.swap_hands(player, neighbor);
        }
        Ok(())
    }
}
