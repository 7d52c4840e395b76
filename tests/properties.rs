//! Property tests for the pile lookback and the clearance evaluator.

use proptest::prelude::*;

use wildstack::cards::{Card, CardKind, Color};
use wildstack::piles::DiscardPile;
use wildstack::rules::rule::{Clearance, PlacementRule, Rule};
use wildstack::rules::{is_placeable, RulePackBuilder};
use wildstack::RulePack;

fn open_penalty(amount: u8) -> Card {
    let mut card = Card::new(Color::Red, CardKind::Penalty(amount));
    card.set_open(true).unwrap();
    card
}

/// Votes the same clearance for every candidate.
#[derive(Clone, Copy)]
struct Constant(Clearance);

impl Rule for Constant {
    fn name(&self) -> &'static str {
        "constant"
    }

    fn as_placement(&self) -> Option<&dyn PlacementRule> {
        Some(self)
    }
}

impl PlacementRule for Constant {
    fn clearance(&self, _target: &Card, _candidate: &Card, _hand: &[Card]) -> Clearance {
        self.0
    }
}

fn pack_of(votes: &[Clearance]) -> RulePack {
    let mut builder = RulePackBuilder::new();
    for &vote in votes {
        builder = builder.with_rule(Box::new(Constant(vote)));
    }
    builder.resolve().unwrap()
}

fn vote() -> impl Strategy<Value = Clearance> {
    prop_oneof![
        Just(Clearance::Allowed),
        Just(Clearance::Neutral),
        Just(Clearance::Prohibited),
    ]
}

proptest! {
    /// The accumulated penalty is always run length times the shared
    /// amount, regardless of what lies below the run.
    #[test]
    fn consecutive_draw_counts_the_run(
        run_len in 0usize..6,
        amount in 1u8..5,
        below_number in 0u8..10,
    ) {
        let mut pile = DiscardPile::new();
        pile.add(Card::new(Color::Blue, CardKind::Number(below_number)));
        for _ in 0..run_len {
            pile.add(open_penalty(amount));
        }

        prop_assert_eq!(pile.consecutive_draw(), run_len * amount as usize);
    }

    /// A closed card anywhere in the stack truncates the walk above it.
    #[test]
    fn closed_card_truncates_the_run(
        above in 1usize..5,
        below in 0usize..5,
        amount in 1u8..5,
    ) {
        let mut pile = DiscardPile::new();
        for _ in 0..below {
            pile.add(open_penalty(amount));
        }
        pile.add(Card::new(Color::Green, CardKind::Penalty(amount)));
        for _ in 0..above {
            pile.add(open_penalty(amount));
        }

        prop_assert_eq!(pile.consecutive_draw(), above * amount as usize);
    }

    /// Closing the run always zeroes the accumulated penalty.
    #[test]
    fn close_run_zeroes_the_penalty(run_len in 1usize..6, amount in 1u8..5) {
        let mut pile = DiscardPile::new();
        pile.add(Card::new(Color::Blue, CardKind::Number(3)));
        for _ in 0..run_len {
            pile.add(open_penalty(amount));
        }

        pile.close_run().unwrap();
        prop_assert_eq!(pile.consecutive_draw(), 0);
    }

    /// The clearance decision is exactly
    /// (any Allowed) and (no Prohibited).
    #[test]
    fn clearance_matches_the_vote_formula(votes in proptest::collection::vec(vote(), 0..8)) {
        let pack = pack_of(&votes);
        let target = Card::new(Color::Red, CardKind::Number(1));
        let candidate = Card::new(Color::Red, CardKind::Number(2));
        let hand = [candidate.clone()];

        let expected = votes.contains(&Clearance::Allowed)
            && !votes.contains(&Clearance::Prohibited);
        prop_assert_eq!(is_placeable(&pack, &target, &candidate, &hand), expected);
    }

    /// Appending Neutral voters never changes the decision.
    #[test]
    fn neutral_votes_are_inert(
        votes in proptest::collection::vec(vote(), 0..6),
        extra_neutrals in 1usize..4,
    ) {
        let target = Card::new(Color::Red, CardKind::Number(1));
        let candidate = Card::new(Color::Red, CardKind::Number(2));
        let hand = [candidate.clone()];

        let without = pack_of(&votes);
        let mut padded = votes.clone();
        padded.extend(std::iter::repeat(Clearance::Neutral).take(extra_neutrals));
        let with = pack_of(&padded);

        prop_assert_eq!(
            is_placeable(&without, &target, &candidate, &hand),
            is_placeable(&with, &target, &candidate, &hand),
        );
    }
}
