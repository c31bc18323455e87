//! RouteSim - replay a driving route as a simulated live location feed
//!
//! This library provides a location provider that walks a previously computed
//! route on a fixed timer and reports each point to an observer, so
//! navigation code can be exercised without physical movement.
//!
//! # High-Level API
//!
//! ```ignore
//! use std::sync::Arc;
//! use routesim::location::{BroadcastObserver, LocationObserver, LocationProvider, RouteLocationProvider};
//! use routesim::route::demo_route;
//!
//! let route = Arc::new(demo_route(25.0));
//! let provider = RouteLocationProvider::new(route);
//!
//! let observer = Arc::new(BroadcastObserver::new());
//! let mut rx = observer.subscribe();
//! let as_dyn: Arc<dyn LocationObserver> = observer.clone();
//! provider.set_observer(Some(&as_dyn));
//!
//! provider.start_updating_location();
//! let position = rx.recv().await?;
//! ```
//!
//! # Modules
//!
//! - [`coord`] - coordinates and spherical geometry
//! - [`route`] - route shapes, GeoJSON loading, demo waypoints
//! - [`location`] - the simulated location provider and observer interface
//! - [`progress`] - distance travelled and remaining path along a route
//! - [`config`] - `~/.routesim/config.ini`
//! - [`logging`] - tracing setup

pub mod config;
pub mod coord;
pub mod location;
pub mod logging;
pub mod progress;
pub mod route;

/// Version of the RouteSim library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
