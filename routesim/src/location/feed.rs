//! Simulated location feed that replays a route.
//!
//! [`RouteLocationProvider`] walks a route's coordinates on a fixed timer and
//! reports each one as a [`Position`] to the registered observer, standing in
//! for a real location sensor when exercising navigation code without moving.
//!
//! # Design
//!
//! - One fix per tick, one tick per interval (default 1 second)
//! - First tick fires one interval after `start_updating_location`
//! - The cursor wraps after the last coordinate, so replay never ends on its own
//! - The cursor advances even when no observer is registered
//! - Empty or missing routes produce no ticks' worth of output and never fail
//!
//! # Scheduling
//!
//! Each active schedule is a tokio task driven by an interval and stopped by
//! a [`CancellationToken`]. Restarting cancels the previous task before a new
//! one is spawned, so at most one schedule delivers at a time. The task only
//! holds a weak reference to the feed state; dropping the provider cancels
//! the schedule and nothing is delivered afterwards.
//!
//! # Usage
//!
//! ```ignore
//! let route = Arc::new(demo_route(25.0));
//! let provider = RouteLocationProvider::new(route);
//!
//! let observer: Arc<dyn LocationObserver> = Arc::new(BroadcastObserver::new());
//! provider.set_observer(Some(&observer));
//! provider.start_updating_location();
//! // ... one fix per second ...
//! provider.stop_updating_location();
//! ```

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::route::Route;

use super::observer::LocationObserver;
use super::position::Position;
use super::provider::{
    AccuracyAuthorization, AuthorizationStatus, DeviceOrientation, Heading, LocationProvider,
};

/// Default time between fixes.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(1);

/// Shortest interval accepted; smaller values are raised to this.
pub const MIN_UPDATE_INTERVAL: Duration = Duration::from_millis(1);

/// Default source label passed to observers.
pub const DEFAULT_FEED_LABEL: &str = "route-replay";

/// Configuration for a route replay feed.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use routesim::location::FeedConfig;
///
/// let config = FeedConfig::new()
///     .with_interval(Duration::from_millis(500))
///     .with_label("test-drive");
/// assert_eq!(config.interval(), Duration::from_millis(500));
/// assert_eq!(config.label(), "test-drive");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    interval: Duration,
    label: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_UPDATE_INTERVAL,
            label: DEFAULT_FEED_LABEL.to_string(),
        }
    }
}

impl FeedConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time between fixes. Clamped to [`MIN_UPDATE_INTERVAL`].
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_UPDATE_INTERVAL);
        self
    }

    /// Set the source label reported to observers.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Time between fixes.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Source label reported to observers.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Mutable replay state.
struct ReplayState {
    /// Index of the next coordinate to emit.
    cursor: usize,
    /// Current observer (not owned).
    observer: Option<Weak<dyn LocationObserver>>,
    /// Ticks that advanced the cursor.
    ticks: u64,
}

/// State shared between the provider and its scheduled task.
struct FeedShared {
    route: Option<Arc<Route>>,
    label: String,
    state: Mutex<ReplayState>,
}

impl FeedShared {
    /// Emit the coordinate under the cursor and advance it.
    ///
    /// Returns false without touching the cursor if there is nothing to replay.
    fn tick(&self) -> bool {
        let Some(route) = self.route.as_deref().filter(|r| !r.is_empty()) else {
            tracing::trace!(source = %self.label, "No route to replay, skipping tick");
            return false;
        };

        let (index, position, observer) = {
            let mut state = self.state.lock();
            let index = state.cursor;
            let position = Position::from_coordinate(route.coordinates()[index]);
            state.cursor = (index + 1) % route.len();
            state.ticks += 1;
            let observer = state.observer.as_ref().and_then(Weak::upgrade);
            (index, position, observer)
        };

        tracing::debug!(
            source = %self.label,
            index,
            lat = format!("{:.7}", position.latitude()),
            lon = format!("{:.7}", position.longitude()),
            observed = observer.is_some(),
            "Simulated location update"
        );

        // Deliver outside the lock so the observer may call back into the feed
        if let Some(observer) = observer {
            observer.locations_updated(&self.label, std::slice::from_ref(&position));
        }

        true
    }
}

/// A location provider that replays a fixed route on a timer.
pub struct RouteLocationProvider {
    shared: Arc<FeedShared>,
    interval: Duration,
    runtime: Option<Handle>,
    /// Cancellation token of the active schedule, if any.
    schedule: Mutex<Option<CancellationToken>>,
}

impl RouteLocationProvider {
    /// Create a feed for `route` with the default configuration.
    ///
    /// Scheduling uses the tokio runtime current at construction, if any.
    pub fn new(route: Arc<Route>) -> Self {
        Self::with_config(Some(route), FeedConfig::default())
    }

    /// Create a feed with an explicit configuration.
    ///
    /// A `None` route behaves like an empty one: the feed can be started and
    /// stopped but never emits.
    pub fn with_config(route: Option<Arc<Route>>, config: FeedConfig) -> Self {
        Self {
            shared: Arc::new(FeedShared {
                route,
                label: config.label,
                state: Mutex::new(ReplayState {
                    cursor: 0,
                    observer: None,
                    ticks: 0,
                }),
            }),
            interval: config.interval.max(MIN_UPDATE_INTERVAL),
            runtime: Handle::try_current().ok(),
            schedule: Mutex::new(None),
        }
    }

    /// Create a feed with no route.
    pub fn idle() -> Self {
        Self::with_config(None, FeedConfig::default())
    }

    /// Schedule ticks on the given runtime instead of the ambient one.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// The route being replayed.
    pub fn route(&self) -> Option<&Arc<Route>> {
        self.shared.route.as_ref()
    }

    /// Source label reported to observers.
    pub fn label(&self) -> &str {
        &self.shared.label
    }

    /// Time between fixes.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Index of the next coordinate to emit.
    pub fn cursor(&self) -> usize {
        self.shared.state.lock().cursor
    }

    /// Number of ticks that advanced the cursor since construction.
    pub fn tick_count(&self) -> u64 {
        self.shared.state.lock().ticks
    }

    /// Returns true while a schedule is installed.
    pub fn is_active(&self) -> bool {
        self.schedule
            .lock()
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
    }

    /// Run one tick immediately, bypassing the timer.
    #[cfg(test)]
    pub(crate) fn tick(&self) -> bool {
        self.shared.tick()
    }
}

impl LocationProvider for RouteLocationProvider {
    fn set_observer(&self, observer: Option<&Arc<dyn LocationObserver>>) {
        self.shared.state.lock().observer = observer.map(Arc::downgrade);
    }

    fn authorization_status(&self) -> AuthorizationStatus {
        AuthorizationStatus::AuthorizedAlways
    }

    fn accuracy_authorization(&self) -> AccuracyAuthorization {
        AccuracyAuthorization::FullAccuracy
    }

    fn heading(&self) -> Option<Heading> {
        None
    }

    fn heading_orientation(&self) -> DeviceOrientation {
        DeviceOrientation::Portrait
    }

    fn request_always_authorization(&self) {}

    fn request_when_in_use_authorization(&self) {}

    fn request_temporary_full_accuracy_authorization(&self, _purpose_key: &str) {}

    fn start_updating_location(&self) {
        let Some(runtime) = self
            .runtime
            .clone()
            .or_else(|| Handle::try_current().ok())
        else {
            tracing::warn!(
                source = %self.shared.label,
                "No tokio runtime available, location updates not started"
            );
            return;
        };

        let cancellation = CancellationToken::new();
        let first_tick = tokio::time::Instant::now() + self.interval;

        let mut schedule = self.schedule.lock();
        if let Some(previous) = schedule.replace(cancellation.clone()) {
            previous.cancel();
            tracing::debug!(source = %self.shared.label, "Replaced existing update schedule");
        }
        runtime.spawn(run_schedule(
            Arc::downgrade(&self.shared),
            first_tick,
            self.interval,
            cancellation,
        ));

        tracing::info!(
            source = %self.shared.label,
            interval_ms = self.interval.as_millis() as u64,
            points = self.shared.route.as_ref().map_or(0, |r| r.len()),
            "Started simulated location updates"
        );
    }

    fn stop_updating_location(&self) {
        match self.schedule.lock().take() {
            Some(token) => {
                token.cancel();
                tracing::info!(source = %self.shared.label, "Stopped simulated location updates");
            }
            None => {
                tracing::trace!(source = %self.shared.label, "Location updates already stopped");
            }
        }
    }

    fn start_updating_heading(&self) {}

    fn stop_updating_heading(&self) {}

    fn dismiss_heading_calibration_display(&self) {}
}

impl Drop for RouteLocationProvider {
    fn drop(&mut self) {
        if let Some(token) = self.schedule.get_mut().take() {
            token.cancel();
        }
    }
}

/// Tick loop for one schedule.
async fn run_schedule(
    shared: Weak<FeedShared>,
    first_tick: tokio::time::Instant,
    period: Duration,
    cancellation: CancellationToken,
) {
    let mut ticker = tokio::time::interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancellation.cancelled() => {
                tracing::debug!("Route replay schedule cancelled");
                break;
            }
            _ = ticker.tick() => {
                let Some(shared) = shared.upgrade() else {
                    break;
                };
                shared.tick();
            }
        }
    }
}
