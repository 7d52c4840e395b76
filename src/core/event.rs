//! Game events and the event sink.
//!
//! The engine reports every observable transition through a single
//! abstract hook. Sinks render, log, or ignore events; failures inside a
//! sink are not the engine's concern and nothing is returned to it.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Color};
use crate::core::player::PlayerId;

/// An observable game transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A card was placed on the discard pile.
    CardPlaced { player: PlayerId, card: Card },
    /// A player drew cards (from the draw pile or as a penalty).
    CardsDrawn { player: PlayerId, count: usize },
    /// A color mask was assigned to a wild card.
    ColorChosen { player: PlayerId, color: Color },
    /// A strategy returned the wildcard sentinel as a color choice.
    InvalidColor { player: PlayerId },
    /// A strategy chose a card that no placement rule cleared.
    IllegalChoice { player: PlayerId, index: usize },
    /// A player lost their turn without a decision phase.
    TurnLost { player: PlayerId },
    /// The play direction was reversed.
    DirectionReversed { reversed: bool },
    /// Two players swapped hands wholesale.
    HandsSwapped { first: PlayerId, second: PlayerId },
    /// The discard pile below the top was recycled into the draw pile.
    PileReshuffled { count: usize },
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::CardPlaced { player, card } => {
                write!(f, "{player} placed {card}")
            }
            GameEvent::CardsDrawn { player, count } => {
                write!(f, "{player} drew {count} card(s)")
            }
            GameEvent::ColorChosen { player, color } => {
                write!(f, "{player} chose {color:?}")
            }
            GameEvent::InvalidColor { player } => {
                write!(f, "{player} chose an invalid color")
            }
            GameEvent::IllegalChoice { player, index } => {
                write!(f, "{player} chose card {index}, which cannot be placed")
            }
            GameEvent::TurnLost { player } => {
                write!(f, "{player} lost their turn")
            }
            GameEvent::DirectionReversed { reversed } => {
                write!(
                    f,
                    "play direction is now {}",
                    if *reversed { "reversed" } else { "normal" }
                )
            }
            GameEvent::HandsSwapped { first, second } => {
                write!(f, "{first} and {second} swapped hands")
            }
            GameEvent::PileReshuffled { count } => {
                write!(f, "{count} discarded card(s) reshuffled into the draw pile")
            }
        }
    }
}

/// Receiver for game events.
///
/// Called at every observable transition. No return value: the engine
/// never reacts to its observers.
pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent);
}

/// Shared sinks let a caller keep a handle on the events a game emits.
impl<T: EventSink> EventSink for std::rc::Rc<std::cell::RefCell<T>> {
    fn on_event(&mut self, event: &GameEvent) {
        self.borrow_mut().on_event(event);
    }
}

/// Sink that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Sink that records every event, for inspection in tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<GameEvent>,
}

impl EventSink for RecordingSink {
    fn on_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
