//! The official base rules.
//!
//! `official_pack` is always merged into a game's rule pack, after any
//! house packs. It carries the baseline placement legality (same color,
//! same value, wilds plus the wild-draw-four restriction) and the flow
//! behavior of the special cards: skip, draw-two, wild draw four and
//! reverse. The decision rule that actually moves a card from hand to
//! pile also lives here.
//!
//! House packs override individual pieces through one-way conflict
//! declarations against the names defined in this module.

use crate::cards::{Card, CardKind, Color, FlowAction, WildKind};
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::game::Game;
use crate::rules::rule::{
    Clearance, Decision, FlowRule, PhaseSignals, PlacementRule, Rule,
};

/// Name of the base penalty-draw rule, declared against by stacking
/// house rules.
pub const PENALTY_DRAW_RULE: &str = "draw-penalty";

/// The complete base rule set.
#[must_use]
pub fn official_pack() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(SameColorRule),
        Box::new(SameValueRule),
        Box::new(WildRule),
        Box::new(WildDrawFourRestrictionRule),
        Box::new(DecisionRule),
        Box::new(SkipRule),
        Box::new(PenaltyDrawRule),
        Box::new(WildDrawFourRule),
        Box::new(ReverseRule),
    ]
}

/// Clears a candidate whose effective color matches the top's.
pub struct SameColorRule;

impl Rule for SameColorRule {
    fn name(&self) -> &'static str {
        "same-color"
    }

    fn as_placement(&self) -> Option<&dyn PlacementRule> {
        Some(self)
    }
}

impl PlacementRule for SameColorRule {
    fn clearance(&self, target: &Card, candidate: &Card, _hand: &[Card]) -> Clearance {
        // Wild candidates are the wild rule's business.
        if candidate.color() == Color::Wild {
            return Clearance::Neutral;
        }
        if candidate.color() == target.effective_color() {
            Clearance::Allowed
        } else {
            Clearance::Neutral
        }
    }
}

/// Clears a candidate of the same kind and value as the top.
pub struct SameValueRule;

impl Rule for SameValueRule {
    fn name(&self) -> &'static str {
        "same-value"
    }

    fn as_placement(&self) -> Option<&dyn PlacementRule> {
        Some(self)
    }
}

impl PlacementRule for SameValueRule {
    fn clearance(&self, target: &Card, candidate: &Card, _hand: &[Card]) -> Clearance {
        if matches!(candidate.kind(), CardKind::Wild(_)) {
            return Clearance::Neutral;
        }
        if candidate.kind() == target.kind() {
            Clearance::Allowed
        } else {
            Clearance::Neutral
        }
    }
}

/// Clears any wild card.
pub struct WildRule;

impl Rule for WildRule {
    fn name(&self) -> &'static str {
        "wild"
    }

    fn as_placement(&self) -> Option<&dyn PlacementRule> {
        Some(self)
    }
}

impl PlacementRule for WildRule {
    fn clearance(&self, _target: &Card, candidate: &Card, _hand: &[Card]) -> Clearance {
        if candidate.color() == Color::Wild {
            Clearance::Allowed
        } else {
            Clearance::Neutral
        }
    }
}

/// Vetoes a wild draw four while the hand holds a color match.
///
/// A `Prohibited` vote overrides the wild rule's `Allowed`, so the
/// combined effect is "wild draw four only as a last resort".
pub struct WildDrawFourRestrictionRule;

impl Rule for WildDrawFourRestrictionRule {
    fn name(&self) -> &'static str {
        "wild-draw-four-restriction"
    }

    fn as_placement(&self) -> Option<&dyn PlacementRule> {
        Some(self)
    }
}

impl PlacementRule for WildDrawFourRestrictionRule {
    fn clearance(&self, target: &Card, candidate: &Card, hand: &[Card]) -> Clearance {
        if candidate.kind() != CardKind::Wild(WildKind::DrawFour) {
            return Clearance::Neutral;
        }
        let has_color_match = hand.iter().any(|card| {
            card.color() != Color::Wild && card.color() == target.effective_color()
        });
        if has_color_match {
            Clearance::Prohibited
        } else {
            Clearance::Neutral
        }
    }
}

/// Carries out the player's decision: places the chosen card, or draws
/// one and offers to play it.
pub struct DecisionRule;

impl Rule for DecisionRule {
    fn name(&self) -> &'static str {
        "decision"
    }

    fn as_flow(&self) -> Option<&dyn FlowRule> {
        Some(self)
    }
}

impl FlowRule for DecisionRule {
    fn on_decision(
        &self,
        game: &mut Game,
        decision: &mut Decision,
        _signals: &mut PhaseSignals,
    ) -> Result<(), EngineError> {
        if decision.resolved {
            return Ok(());
        }

        match decision.chosen {
            Some(index) => {
                let placed = game.place_from_hand(decision.player, index)?;
                decision.placed = Some(placed);
            }
            None => {
                if game.safe_draw(decision.player, 1) == 1 {
                    let drawn_index = game.hand(decision.player).len() - 1;
                    if game.is_placeable_from_hand(decision.player, drawn_index)
                        && game.ask_should_play_drawn(decision.player, drawn_index)
                    {
                        let placed = game.place_from_hand(decision.player, drawn_index)?;
                        decision.placed = Some(placed);
                    }
                }
            }
        }

        decision.resolved = true;
        Ok(())
    }
}

/// Resolves an open skip: the card closes and the turn is lost.
pub struct SkipRule;

impl Rule for SkipRule {
    fn name(&self) -> &'static str {
        "skip"
    }

    fn as_flow(&self) -> Option<&dyn FlowRule> {
        Some(self)
    }
}

impl FlowRule for SkipRule {
    fn on_initialization(
        &self,
        game: &mut Game,
        signals: &mut PhaseSignals,
    ) -> Result<(), EngineError> {
        let is_open_skip = matches!(
            game.discard().top(),
            Some(card) if card.is_open() && card.kind() == CardKind::Flow(FlowAction::Skip)
        );
        if !is_open_skip {
            return Ok(());
        }

        if let Some(top) = game.discard_mut().top_mut() {
            top.set_open(false)?;
        }
        game.refresh_top();
        signals.request_lose_turn();
        signals.request_repeat();
        Ok(())
    }
}

/// Resolves an open penalty run: the defender draws the accumulated
/// total and loses the turn.
///
/// House stacking rules replace this rule by name to let the defender
/// answer with a matching penalty card instead.
pub struct PenaltyDrawRule;

impl Rule for PenaltyDrawRule {
    fn name(&self) -> &'static str {
        PENALTY_DRAW_RULE
    }

    fn as_flow(&self) -> Option<&dyn FlowRule> {
        Some(self)
    }
}

impl FlowRule for PenaltyDrawRule {
    fn on_initialization(
        &self,
        game: &mut Game,
        signals: &mut PhaseSignals,
    ) -> Result<(), EngineError> {
        let total = game.discard().consecutive_draw();
        if total == 0 {
            return Ok(());
        }

        let defender = game.current_player();
        game.safe_draw(defender, total);
        game.discard_mut().close_run()?;
        game.refresh_top();
        signals.request_lose_turn();
        signals.request_repeat();
        Ok(())
    }
}

/// Resolves an open wild draw four: the defender draws four and loses
/// the turn.
pub struct WildDrawFourRule;

impl Rule for WildDrawFourRule {
    fn name(&self) -> &'static str {
        "wild-draw-four"
    }

    fn as_flow(&self) -> Option<&dyn FlowRule> {
        Some(self)
    }
}

impl FlowRule for WildDrawFourRule {
    fn on_initialization(
        &self,
        game: &mut Game,
        signals: &mut PhaseSignals,
    ) -> Result<(), EngineError> {
        let is_open_draw_four = matches!(
            game.discard().top(),
            Some(card) if card.is_open() && card.kind() == CardKind::Wild(WildKind::DrawFour)
        );
        if !is_open_draw_four {
            return Ok(());
        }

        let defender = game.current_player();
        game.safe_draw(defender, 4);
        if let Some(top) = game.discard_mut().top_mut() {
            top.set_open(false)?;
        }
        game.refresh_top();
        signals.request_lose_turn();
        signals.request_repeat();
        Ok(())
    }
}

/// Reverses the play direction when a reverse card is placed.
pub struct ReverseRule;

impl Rule for ReverseRule {
    fn name(&self) -> &'static str {
        "reverse"
    }

    fn as_flow(&self) -> Option<&dyn FlowRule> {
        Some(self)
    }
}

impl FlowRule for ReverseRule {
    fn on_card_placed(
        &self,
        game: &mut Game,
        _player: PlayerId,
        card: &Card,
    ) -> Result<(), EngineError> {
        if card.kind() == CardKind::Flow(FlowAction::Reverse) {
            game.reverse_direction();
        }
        Ok(())
    }
}
