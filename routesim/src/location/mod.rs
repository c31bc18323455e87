//! Simulated location services.
//!
//! This module provides a location provider that replays a previously
//! computed route as if it were a live sensor, so navigation flows can be
//! exercised without moving.
//!
//! # Components
//!
//! - [`feed`] - `RouteLocationProvider`, the timer-driven route replay
//! - [`provider`] - `LocationProvider` trait and permission/heading types
//! - [`observer`] - `LocationObserver` trait and `BroadcastObserver`
//! - [`position`] - `Position` records delivered to observers
//!
//! # Usage
//!
//! ```ignore
//! use routesim::location::{
//!     BroadcastObserver, LocationObserver, LocationProvider, RouteLocationProvider,
//! };
//!
//! let provider = RouteLocationProvider::new(route);
//! let observer = Arc::new(BroadcastObserver::new());
//! let mut rx = observer.subscribe();
//!
//! let as_dyn: Arc<dyn LocationObserver> = observer.clone();
//! provider.set_observer(Some(&as_dyn));
//! provider.start_updating_location();
//!
//! while let Ok(position) = rx.recv().await {
//!     println!("{}", position.coordinate);
//! }
//! ```

pub mod feed;
pub mod observer;
pub mod position;
pub mod provider;

pub use feed::{
    FeedConfig, RouteLocationProvider, DEFAULT_FEED_LABEL, DEFAULT_UPDATE_INTERVAL,
    MIN_UPDATE_INTERVAL,
};
pub use observer::{BroadcastObserver, LocationObserver, DEFAULT_BROADCAST_CAPACITY};
pub use position::Position;
pub use provider::{
    AccuracyAuthorization, AuthorizationStatus, DeviceOrientation, Heading, LocationProvider,
};
