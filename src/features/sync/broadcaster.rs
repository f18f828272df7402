use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::Utc;
use tokio::sync::mpsc;

use crate::features::pharmacies::dtos::PharmacyResponseDto;
use crate::features::sync::dtos::SyncMessage;

/// Per-subscriber queue depth. A subscriber that cannot drain this many
/// pending messages is considered dead and dropped.
const SUBSCRIBER_QUEUE_SIZE: usize = 8;

const WELCOME_MESSAGE: &str = "Connexion établie pour les mises à jour en temps réel";

/// Registry of live sync subscribers, owned by the server process and shared
/// via `Arc` (constructed once at startup, never a module-level global).
///
/// Delivery is fire-and-forget: `broadcast` never awaits a subscriber, and a
/// subscriber whose queue is closed or full is silently removed. At-most-once
/// per subscriber, no retry.
pub struct Broadcaster {
    next_id: AtomicU64,
    subscribers: Mutex<HashMap<u64, mpsc::Sender<SyncMessage>>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            subscribers: Mutex::new(HashMap::new()),
        }
    }

    /// Register a new subscriber. The returned receiver immediately holds a
    /// one-time `CONNECTION_ESTABLISHED` message (advisory, no data).
    pub fn subscribe(&self) -> (u64, mpsc::Receiver<SyncMessage>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(SUBSCRIBER_QUEUE_SIZE);

        // Queue is freshly created, this send cannot fail.
        let _ = tx.try_send(SyncMessage::ConnectionEstablished {
            message: WELCOME_MESSAGE.to_string(),
        });

        self.subscribers
            .lock()
            .expect("subscriber registry poisoned")
            .insert(id, tx);

        (id, rx)
    }

    /// Remove a subscriber. Idempotent: removing an id that already errored
    /// out or was never registered is a no-op.
    pub fn unsubscribe(&self, id: u64) {
        self.subscribers
            .lock()
            .expect("subscriber registry poisoned")
            .remove(&id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .expect("subscriber registry poisoned")
            .len()
    }

    /// Fan the refreshed current-week dataset out to every live subscriber.
    /// Returns the number of subscribers the message was queued for.
    pub fn broadcast(&self, pharmacies: Vec<PharmacyResponseDto>) -> usize {
        let message = SyncMessage::PharmacyDataUpdated {
            data: pharmacies,
            timestamp: Utc::now().to_rfc3339(),
        };

        let mut subscribers = self
            .subscribers
            .lock()
            .expect("subscriber registry poisoned");

        let mut dead: Vec<u64> = Vec::new();
        let mut delivered = 0;

        for (&id, tx) in subscribers.iter() {
            match tx.try_send(message.clone()) {
                Ok(()) => delivered += 1,
                Err(_) => dead.push(id),
            }
        }

        for id in dead {
            subscribers.remove(&id);
            tracing::debug!(subscriber_id = id, "Dropped unreachable sync subscriber");
        }

        tracing::info!(
            delivered,
            total = subscribers.len(),
            "Broadcast dataset update"
        );

        delivered
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_subscriber_gets_connection_established() {
        let broadcaster = Broadcaster::new();
        let (_id, mut rx) = broadcaster.subscribe();

        let msg = rx.recv().await.unwrap();
        assert!(matches!(msg, SyncMessage::ConnectionEstablished { .. }));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_open_subscriber() {
        let broadcaster = Broadcaster::new();
        let (_a, mut rx_a) = broadcaster.subscribe();
        let (_b, mut rx_b) = broadcaster.subscribe();

        // Drain the welcome messages first.
        rx_a.recv().await.unwrap();
        rx_b.recv().await.unwrap();

        let delivered = broadcaster.broadcast(Vec::new());
        assert_eq!(delivered, 2);

        for rx in [&mut rx_a, &mut rx_b] {
            let msg = rx.recv().await.unwrap();
            assert!(matches!(msg, SyncMessage::PharmacyDataUpdated { .. }));
        }
    }

    #[tokio::test]
    async fn test_disconnected_subscriber_is_skipped_and_dropped() {
        let broadcaster = Broadcaster::new();
        let (_a, rx_a) = broadcaster.subscribe();
        let (_b, mut rx_b) = broadcaster.subscribe();
        drop(rx_a);

        let delivered = broadcaster.broadcast(Vec::new());
        assert_eq!(delivered, 1);
        assert_eq!(broadcaster.subscriber_count(), 1);

        rx_b.recv().await.unwrap(); // welcome
        let msg = rx_b.recv().await.unwrap();
        assert!(matches!(msg, SyncMessage::PharmacyDataUpdated { .. }));
    }

    #[tokio::test]
    async fn test_unsubscribe_is_idempotent() {
        let broadcaster = Broadcaster::new();
        let (id, _rx) = broadcaster.subscribe();

        broadcaster.unsubscribe(id);
        broadcaster.unsubscribe(id);
        broadcaster.unsubscribe(9999);
        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_subscriber_joining_after_broadcast_receives_nothing_stale() {
        let broadcaster = Broadcaster::new();
        broadcaster.broadcast(Vec::new());

        let (_id, mut rx) = broadcaster.subscribe();
        let msg = rx.recv().await.unwrap();
        // Only the welcome; the earlier broadcast is not replayed.
        assert!(matches!(msg, SyncMessage::ConnectionEstablished { .. }));
        assert!(rx.try_recv().is_err());
    }
}
