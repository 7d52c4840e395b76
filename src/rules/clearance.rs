//! The placement-clearance evaluator.
//!
//! Combines every placement rule's vote on a candidate card into one
//! allow/deny decision:
//!
//! > legal ⇔ (at least one `Allowed`) ∧ (no `Prohibited`)
//!
//! `Neutral` votes are ignored, so a candidate no rule has an opinion
//! about is illegal. Rule authors layer independent legality axes
//! (same color, same value, wild) as `Allowed` producers and exception
//! cases as `Prohibited` producers that override any `Allowed` vote.

use smallvec::SmallVec;

use crate::cards::Card;
use crate::rules::pack::RulePack;
use crate::rules::rule::Clearance;

/// Decide whether `candidate` (held in `hand`) may be placed on `target`.
#[must_use]
pub fn is_placeable(pack: &RulePack, target: &Card, candidate: &Card, hand: &[Card]) -> bool {
    let mut allowed = false;

    for rule in pack.placement_rules() {
        match rule.clearance(target, candidate, hand) {
            Clearance::Prohibited => return false,
            Clearance::Allowed => allowed = true,
            Clearance::Neutral => {}
        }
    }

    allowed
}

/// Hand indices of every card that may legally be placed on `target`.
///
/// Recomputed whenever the target card or rule pack changes; never
/// cached across turns.
#[must_use]
pub fn possible_placements(pack: &RulePack, target: &Card, hand: &[Card]) -> SmallVec<[usize; 8]> {
    hand.iter()
        .enumerate()
        .filter(|(_, candidate)| is_placeable(pack, target, candidate, hand))
        .map(|(idx, _)| idx)
        .collect()
}
