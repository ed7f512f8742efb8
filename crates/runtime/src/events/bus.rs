//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::ProgressionEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Point balance changes
    Points,
    /// Rewards, levels and the tutorial
    Milestones,
}

impl ProgressionEvent {
    pub fn topic(&self) -> Topic {
        match self {
            ProgressionEvent::PointsAwarded { .. } => Topic::Points,
            ProgressionEvent::RewardUnlocked { .. }
            | ProgressionEvent::LevelCompleted { .. }
            | ProgressionEvent::TutorialCompleted { .. } => Topic::Milestones,
        }
    }
}

/// Topic-based event bus
///
/// Clones share the same channels.
#[derive(Clone)]
pub struct EventBus {
    points: broadcast::Sender<ProgressionEvent>,
    milestones: broadcast::Sender<ProgressionEvent>,
}

impl EventBus {
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: broadcast::channel(capacity).0,
            milestones: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<ProgressionEvent> {
        match topic {
            Topic::Points => &self.points,
            Topic::Milestones => &self.milestones,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: ProgressionEvent) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<ProgressionEvent> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
