//! Observer interface for location updates.
//!
//! - [`LocationObserver`] - callback invoked by a provider with new fixes
//! - [`BroadcastObserver`] - adapter that fans fixes out over a tokio
//!   broadcast channel for async consumers

use tokio::sync::broadcast;

use super::position::Position;

/// Default broadcast channel capacity.
pub const DEFAULT_BROADCAST_CAPACITY: usize = 16;

/// Receives location updates from a provider.
///
/// Providers hold observers weakly; keep the `Arc` alive for as long as
/// updates should be delivered.
pub trait LocationObserver: Send + Sync {
    /// Called with one or more new fixes, oldest first.
    ///
    /// `source` is the label of the provider that produced them.
    fn locations_updated(&self, source: &str, positions: &[Position]);
}

/// Observer that republishes every fix on a broadcast channel.
///
/// # Usage
///
/// ```ignore
/// let observer = Arc::new(BroadcastObserver::new());
/// let mut rx = observer.subscribe();
///
/// let as_dyn: Arc<dyn LocationObserver> = observer.clone();
/// provider.set_observer(Some(&as_dyn));
///
/// while let Ok(position) = rx.recv().await {
///     // Handle position update
/// }
/// ```
#[derive(Debug)]
pub struct BroadcastObserver {
    tx: broadcast::Sender<Position>,
}

impl Default for BroadcastObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastObserver {
    /// Create with the default channel capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BROADCAST_CAPACITY)
    }

    /// Create with a specific channel capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Subscribe to position updates.
    pub fn subscribe(&self) -> broadcast::Receiver<Position> {
        self.tx.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl LocationObserver for BroadcastObserver {
    fn locations_updated(&self, source: &str, positions: &[Position]) {
        for position in positions {
            // No subscribers is not an error; the fix is simply dropped
            if self.tx.send(position.clone()).is_err() {
                tracing::trace!(source, "No subscribers for location update");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinate;

    #[test]
    fn test_broadcast_forwards_positions_in_order() {
        let observer = BroadcastObserver::new();
        let mut rx = observer.subscribe();

        let positions = vec![
            Position::from_coordinate(Coordinate::new(1.0, 2.0)),
            Position::from_coordinate(Coordinate::new(3.0, 4.0)),
        ];
        observer.locations_updated("test", &positions);

        assert_eq!(rx.try_recv().unwrap().coordinate, Coordinate::new(1.0, 2.0));
        assert_eq!(rx.try_recv().unwrap().coordinate, Coordinate::new(3.0, 4.0));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_broadcast_without_subscribers_does_not_fail() {
        let observer = BroadcastObserver::with_capacity(0);
        assert_eq!(observer.subscriber_count(), 0);

        observer.locations_updated("test", &[Position::from_coordinate(Coordinate::new(0.0, 0.0))]);
    }
}
