//! Rules: the trait, packs, clearance evaluation, and the shipped rule
//! sets.

pub mod clearance;
pub mod house;
pub mod official;
pub mod pack;
pub mod rule;

pub use clearance::{is_placeable, possible_placements};
pub use pack::{RulePack, RulePackBuilder};
pub use rule::{
    Clearance, ConflictResolution, Decision, FlowRule, GameResult, PhaseSignals, PlacementRule,
    Rule,
};
