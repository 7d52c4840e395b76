//! The rule abstraction.
//!
//! Rules come in two capability shapes:
//!
//! - **Placement rules** vote on the legality of placing one card on
//!   another. Votes are three-valued (`Allowed`, `Neutral`,
//!   `Prohibited`) and combined by the clearance evaluator.
//! - **Flow rules** react to the turn phases (initialization, decision
//!   and the per-game finish phase) and to completed placements. Each
//!   hook is optional.
//!
//! A single rule object may expose either capability or both. Rules may
//! also declare one-way conflicts against other rules; the pack's
//! conflict resolver consumes those declarations at configuration time.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::error::EngineError;
use crate::core::player::PlayerId;
use crate::game::Game;

/// Result of a completed round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// A placement rule's vote on one candidate card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Clearance {
    /// The rule clears this placement.
    Allowed,
    /// The rule has no opinion. Ignored by the evaluator.
    Neutral,
    /// The rule vetoes this placement, overriding any `Allowed` vote.
    Prohibited,
}

/// How a declared conflict between two rules is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictResolution {
    /// The rules cannot coexist; pack resolution aborts.
    Fail,
    /// The declaring rule supersedes the other rule, which is removed.
    Replace,
    /// The declaring rule steps aside and is removed itself.
    Backoff,
}

/// Phase-control signals accumulated across one pass over the flow rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct PhaseSignals {
    repeat: bool,
    lose_turn: bool,
}

impl PhaseSignals {
    /// Request that the current phase run again after this pass.
    pub fn request_repeat(&mut self) {
        self.repeat = true;
    }

    /// Request that the player lose the entire turn: the decision phase
    /// is skipped once the initialization loop settles.
    pub fn request_lose_turn(&mut self) {
        self.lose_turn = true;
    }

    /// Whether any rule requested a repeat during this pass.
    #[must_use]
    pub fn repeat_requested(&self) -> bool {
        self.repeat
    }

    /// Whether any rule requested the turn be lost.
    #[must_use]
    pub fn turn_lost(&self) -> bool {
        self.lose_turn
    }
}

/// A player's decision, threaded through the decision-phase rules.
///
/// The rule that performs the placement records what it did; once the
/// pass over `on_decision` completes, the turn machine reports the
/// recorded card to every rule's `on_card_placed`, so reactions to a
/// placement never depend on where a rule sits in pack order.
#[derive(Clone, Debug)]
pub struct Decision {
    /// The deciding player.
    pub player: PlayerId,
    /// Hand index of the chosen card; `None` means "draw".
    pub chosen: Option<usize>,
    /// Snapshot of the card that was placed, if any rule placed one.
    pub placed: Option<Card>,
    /// Set by a rule that fully handled the decision; rules that would
    /// otherwise act on it must stand down.
    pub resolved: bool,
}

impl Decision {
    /// A fresh, unhandled decision.
    #[must_use]
    pub fn new(player: PlayerId, chosen: Option<usize>) -> Self {
        Self {
            player,
            chosen,
            placed: None,
            resolved: false,
        }
    }
}

/// A composable game rule.
///
/// `conflicts_with` declarations are one-directional by convention: for
/// one semantic conflict, exactly one of the two rules declares it. The
/// resolver does not enforce symmetry (see `RulePackBuilder::resolve`).
pub trait Rule {
    /// Stable name, used in conflict reports and events.
    fn name(&self) -> &'static str;

    /// Declare a conflict against another rule.
    fn conflicts_with(&self, _other: &dyn Rule) -> Option<ConflictResolution> {
        None
    }

    /// This rule's placement capability, if it has one.
    fn as_placement(&self) -> Option<&dyn PlacementRule> {
        None
    }

    /// This rule's flow capability, if it has one.
    fn as_flow(&self) -> Option<&dyn FlowRule> {
        None
    }
}

/// Votes on whether a candidate card may be placed on a target card.
pub trait PlacementRule {
    /// Vote on placing `candidate` (held in `hand`) onto `target`.
    fn clearance(&self, target: &Card, candidate: &Card, hand: &[Card]) -> Clearance;
}

/// Reacts to turn phases. Every hook defaults to a no-op.
pub trait FlowRule {
    /// Called repeatedly at the start of a turn until no rule requests
    /// a repeat. May resolve pending card effects, force draws, or
    /// request the turn be lost.
    fn on_initialization(
        &self,
        _game: &mut Game,
        _signals: &mut PhaseSignals,
    ) -> Result<(), EngineError> {
        Ok(())
    }

    /// Called with the player's decision, in pack order. May perform
    /// the placement, request a repeat (re-ask the player), or reverse
    /// the play direction via the game.
    fn on_decision(
        &self,
        _game: &mut Game,
        _decision: &mut Decision,
        _signals: &mut PhaseSignals,
    ) -> Result<(), EngineError> {
        Ok(())
    }

    /// Called after a decision pass placed a card, with a snapshot of
    /// that card. Runs for every flow rule regardless of pack order,
    /// after the decision hooks of the same pass.
    fn on_card_placed(
        &self,
        _game: &mut Game,
        _player: PlayerId,
        _card: &Card,
    ) -> Result<(), EngineError> {
        Ok(())
    }

    /// Called once after a tentative result is decided. Returning
    /// `Some(player)` objects to the tentative result and proposes that
    /// player as the winner instead.
    fn on_finish(&self, _game: &Game, _tentative: &GameResult) -> Option<PlayerId> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signals_accumulate() {
        let mut signals = PhaseSignals::default();
        assert!(!signals.repeat_requested());
        assert!(!signals.turn_lost());

        signals.request_repeat();
        signals.request_lose_turn();

        assert!(signals.repeat_requested());
        assert!(signals.turn_lost());
    }

    #[test]
    fn test_decision_new() {
        let decision = Decision::new(PlayerId::new(1), Some(3));

        assert_eq!(decision.player, PlayerId::new(1));
        assert_eq!(decision.chosen, Some(3));
        assert!(decision.placed.is_none());
        assert!(!decision.resolved);
    }

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId::new(1));
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(PlayerId::new(0)));
    }

    #[test]
    fn test_default_rule_has_no_capabilities() {
        struct Bare;
        impl Rule for Bare {
            fn name(&self) -> &'static str {
                "bare"
            }
        }

        let rule = Bare;
        assert!(rule.as_placement().is_none());
        assert!(rule.as_flow().is_none());
        assert!(rule.conflicts_with(&Bare).is_none());
    }
}
