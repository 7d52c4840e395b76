//! Rule packs and the conflict resolver.
//!
//! A pack is an ordered collection of rules, unique by box identity
//! (two boxes of the same rule type are two distinct rules). Packs are
//! merged and conflict-resolved once, at configuration time, and the
//! frozen result is consulted for the rest of the round.
//!
//! ## Conflict resolution
//!
//! For every ordered pair (A, B) of distinct rules, the resolver asks
//! `A.conflicts_with(B)`:
//!
//! - `Fail` aborts resolution with a configuration error naming both
//!   rules.
//! - `Backoff` marks A (the declaring rule) for removal.
//! - `Replace` marks B (the queried rule) for removal.
//!
//! Marked rules are removed only after the full scan, so the outcome is
//! independent of input iteration order. Declarations are one-way by
//! convention; a debug build warns when both directions of a pair
//! declare a resolution.

use rustc_hash::FxHashSet;

use crate::core::error::EngineError;
use crate::rules::rule::{ConflictResolution, FlowRule, PlacementRule, Rule};

/// Mutable collection of rules, prior to conflict resolution.
#[derive(Default)]
pub struct RulePackBuilder {
    rules: Vec<Box<dyn Rule>>,
}

impl RulePackBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single rule.
    #[must_use]
    pub fn with_rule(mut self, rule: Box<dyn Rule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append every rule of another (unresolved) collection, in order.
    #[must_use]
    pub fn with_pack(mut self, rules: Vec<Box<dyn Rule>>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Number of rules currently collected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve conflicts and freeze the pack.
    pub fn resolve(self) -> Result<RulePack, EngineError> {
        let rules = self.rules;
        let mut marked: FxHashSet<usize> = FxHashSet::default();

        for (a_idx, a) in rules.iter().enumerate() {
            for (b_idx, b) in rules.iter().enumerate() {
                if a_idx == b_idx {
                    continue;
                }
                let Some(resolution) = a.conflicts_with(b.as_ref()) else {
                    continue;
                };

                #[cfg(debug_assertions)]
                if b.conflicts_with(a.as_ref()).is_some() && a_idx < b_idx {
                    eprintln!(
                        "warning: rules '{}' and '{}' both declare a conflict; \
                         declarations are expected to be one-way",
                        a.name(),
                        b.name()
                    );
                }

                match resolution {
                    ConflictResolution::Fail => {
                        return Err(EngineError::RuleConflict {
                            first: a.name().to_string(),
                            second: b.name().to_string(),
                        });
                    }
                    ConflictResolution::Backoff => {
                        marked.insert(a_idx);
                    }
                    ConflictResolution::Replace => {
                        marked.insert(b_idx);
                    }
                }
            }
        }

        let rules = rules
            .into_iter()
            .enumerate()
            .filter(|(idx, _)| !marked.contains(idx))
            .map(|(_, rule)| rule)
            .collect();

        Ok(RulePack { rules })
    }
}

/// Frozen, conflict-resolved rule set.
///
/// Invariant: no two remaining rules report `Fail` against each other.
pub struct RulePack {
    rules: Vec<Box<dyn Rule>>,
}

impl RulePack {
    /// Number of rules in the pack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the pack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over every rule, in pack order.
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(Box::as_ref)
    }

    /// Iterate over the placement capabilities, in pack order.
    pub fn placement_rules(&self) -> impl Iterator<Item = &dyn PlacementRule> {
        self.rules.iter().filter_map(|rule| rule.as_placement())
    }

    /// Iterate over the flow capabilities, in pack order.
    pub fn flow_rules(&self) -> impl Iterator<Item = &dyn FlowRule> {
        self.rules.iter().filter_map(|rule| rule.as_flow())
    }

    /// Whether the pack contains a rule with the given name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.iter().any(|rule| rule.name() == name)
    }
}

impl std::fmt::Debug for RulePack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.name()))
            .finish()
    }
}
