//! Broadcast bus for store change notifications.
//!
//! Events are published only after a completed, validated mutation; a
//! renderer that observes an event can always read a consistent store.
//! Delivery is best-effort: slow consumers lag and missed events are
//! recoverable by re-reading the store.
use tokio::sync::broadcast;

/// Notifications emitted by the session store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    /// A remote snapshot replaced the local session.
    SessionLoaded,
    /// The session was reset to no-game.
    SessionCleared,
    /// The backend confirmed a freshly created game.
    NewGameStarted,
    /// A guess was evaluated and appended at `turn_index`.
    TurnAppended { turn_index: usize },
    /// The session reached a terminal phase.
    GameOver { won: bool },
    /// The editing buffer changed.
    PendingInputChanged,
    /// The backend rejected the submitted guess as invalid.
    GuessRejected,
}

/// Store-to-renderer event channel.
pub struct EventBus {
    tx: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    const DEFAULT_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: StoreEvent) {
        if self.tx.send(event).is_err() {
            // No subscribers yet - this is normal, not an error.
            tracing::trace!(?event, "no subscribers for store event");
        }
    }

    /// Subscribe to store events from this point onward.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.publish(StoreEvent::TurnAppended { turn_index: 0 });
        bus.publish(StoreEvent::GameOver { won: true });

        assert_eq!(
            rx.recv().await.expect("open channel"),
            StoreEvent::TurnAppended { turn_index: 0 }
        );
        assert_eq!(
            rx.recv().await.expect("open channel"),
            StoreEvent::GameOver { won: true }
        );
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::new();
        bus.publish(StoreEvent::SessionCleared);
    }
}
