//! Rule-composable engine for shedding-style card games.
//!
//! The engine plays UNO-like rounds for 2-255 players, but no game
//! behavior is hardwired: everything beyond the turn skeleton is a
//! rule, and rules are composed into packs at configuration time.
//!
//! ## Design principles
//!
//! - **Rules over branches**: placement legality and turn flow are
//!   decided by rule objects consulted in pack order, not by a fixed
//!   decision tree. House variants replace official behavior through
//!   declared conflicts, never by editing the engine.
//! - **Checked card state**: a card's pending effect, color mask, and
//!   placer form a small state machine with typed transition errors.
//! - **Deterministic rounds**: one seed fixes the shuffle, the deal,
//!   and every recycle of the discard pile.
//! - **Observable transitions**: every placement, draw, reversal, and
//!   reshuffle is reported through an event sink.
//!
//! ## Modules
//!
//! - [`core`]: player identity, RNG, errors, events
//! - [`cards`]: the card model and deck suppliers
//! - [`piles`]: draw and discard piles
//! - [`rules`]: the rule traits, packs, and shipped rule sets
//! - [`players`]: hands and strategy hooks
//! - [`game`]: the game object and the turn state machine
//!
//! ## Example
//!
//! ```no_run
//! use wildstack::game::GameBuilder;
//! use wildstack::players::FirstPlaceable;
//! use wildstack::rules::house::progressive_pack;
//!
//! let mut game = GameBuilder::new()
//!     .player("Ada", Box::new(FirstPlaceable))
//!     .player("Grace", Box::new(FirstPlaceable))
//!     .seed(42)
//!     .house_pack(progressive_pack())
//!     .build()
//!     .unwrap();
//!
//! let result = game.play().unwrap();
//! println!("{result:?}");
//! ```

pub mod cards;
pub mod core;
pub mod game;
pub mod piles;
pub mod players;
pub mod rules;

pub use crate::cards::{Card, CardKind, Color, DeckSupplier, FlowAction, StandardDeck, WildKind};
pub use crate::core::error::EngineError;
pub use crate::core::event::{EventSink, GameEvent, NullSink, RecordingSink};
pub use crate::core::player::{PlayerId, PlayerMap};
pub use crate::game::{Game, GameBuilder, GameView};
pub use crate::players::{FirstPlaceable, PlayerChoice, RandomStrategy, Strategy};
pub use crate::rules::{GameResult, Rule, RulePack, RulePackBuilder};
