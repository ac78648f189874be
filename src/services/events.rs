//! In-process event bus for catalog changes
//!
//! Built on a broadcast channel: a mutation publishes after its write is
//! confirmed, and every subscription connection open at that moment receives
//! the event in order. Listeners that register later do not see earlier
//! events, and publishing with no listeners is a no-op. Dropping a receiver
//! deregisters the listener.

use tokio::sync::broadcast;

use crate::db::BookRecord;

/// Events broadcast when the catalog changes
///
/// Each variant is a topic; subscribers filter on the variant they care about.
#[derive(Debug, Clone)]
pub enum CatalogEvent {
    /// A book was persisted by the addBook mutation
    BookAdded { book: BookRecord },
}

/// Process-wide publish/subscribe channel for catalog events.
///
/// Created once at startup and injected into the schema; resolvers receive it
/// through the request context rather than a shared global.
pub struct EventBus {
    event_tx: broadcast::Sender<CatalogEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (event_tx, _) = broadcast::channel(capacity);
        Self { event_tx }
    }

    /// Register a listener for subsequent events
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.event_tx.subscribe()
    }

    /// Deliver an event to every currently registered listener.
    ///
    /// Does not block and does not fail when nobody is listening.
    pub fn publish(&self, event: CatalogEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Number of currently registered listeners
    pub fn listener_count(&self) -> usize {
        self.event_tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str) -> BookRecord {
        BookRecord {
            id: "b1".to_string(),
            title: title.to_string(),
            published: 1997,
            author_id: "a1".to_string(),
            genres: vec!["fantasy".to_string()],
            created_at: String::new(),
        }
    }

    #[tokio::test]
    async fn test_publish_without_listeners_is_noop() {
        let bus = EventBus::default();
        assert_eq!(bus.listener_count(), 0);
        // must not panic or error
        bus.publish(CatalogEvent::BookAdded { book: book("T") });
    }

    #[tokio::test]
    async fn test_all_listeners_receive_published_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(CatalogEvent::BookAdded { book: book("T") });

        let CatalogEvent::BookAdded { book: b1 } = rx1.recv().await.unwrap();
        let CatalogEvent::BookAdded { book: b2 } = rx2.recv().await.unwrap();
        assert_eq!(b1.title, "T");
        assert_eq!(b2.title, "T");
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_events() {
        let bus = EventBus::default();
        let mut early = bus.subscribe();

        bus.publish(CatalogEvent::BookAdded { book: book("first") });
        let mut late = bus.subscribe();
        bus.publish(CatalogEvent::BookAdded { book: book("second") });

        let CatalogEvent::BookAdded { book: b } = late.recv().await.unwrap();
        assert_eq!(b.title, "second");

        let CatalogEvent::BookAdded { book: b } = early.recv().await.unwrap();
        assert_eq!(b.title, "first");
        let CatalogEvent::BookAdded { book: b } = early.recv().await.unwrap();
        assert_eq!(b.title, "second");
    }

    #[tokio::test]
    async fn test_dropped_receiver_deregisters() {
        let bus = EventBus::default();
        let rx = bus.subscribe();
        assert_eq!(bus.listener_count(), 1);
        drop(rx);
        assert_eq!(bus.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_events_arrive_in_publish_order() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        for title in ["one", "two", "three"] {
            bus.publish(CatalogEvent::BookAdded { book: book(title) });
        }

        for expected in ["one", "two", "three"] {
            let CatalogEvent::BookAdded { book: b } = rx.recv().await.unwrap();
            assert_eq!(b.title, expected);
        }
    }
}
