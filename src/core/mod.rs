//! Core types: players, RNG, errors, events.

pub mod error;
pub mod event;
pub mod player;
pub mod rng;

pub use error::{CardStateError, EngineError, PileError};
pub use event::{EventSink, GameEvent, NullSink, RecordingSink};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
