//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{AiEvent, BattleEvent, BoardEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Phases, movement and terrain effects
    Board,
    /// Forecasts, strikes, deaths
    Battle,
    /// Enemy decision making
    Ai,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Board(BoardEvent),
    Battle(BattleEvent),
    Ai(AiEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Board(_) => Topic::Board,
            Event::Battle(_) => Topic::Battle,
            Event::Ai(_) => Topic::Ai,
        }
    }
}

impl From<BoardEvent> for Event {
    fn from(event: BoardEvent) -> Self {
        Event::Board(event)
    }
}

impl From<BattleEvent> for Event {
    fn from(event: BattleEvent) -> Self {
        Event::Battle(event)
    }
}

impl From<AiEvent> for Event {
    fn from(event: AiEvent) -> Self {
        Event::Ai(event)
    }
}

#[derive(Debug)]
struct Channels {
    board: broadcast::Sender<Event>,
    battle: broadcast::Sender<Event>,
    ai: broadcast::Sender<Event>,
}

/// Topic-based event bus
///
/// Channels are created up front for every topic, so publishing and
/// subscribing never lock. Clones share the same channels.
#[derive(Debug, Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                board: broadcast::channel(capacity).0,
                battle: broadcast::channel(capacity).0,
                ai: broadcast::channel(capacity).0,
            }),
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Board => &self.channels.board,
            Topic::Battle => &self.channels.battle,
            Topic::Ai => &self.channels.ai,
        }
    }

    /// Publish an event to its corresponding topic
    ///
    /// Best-effort: an event nobody is subscribed to is dropped.
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
