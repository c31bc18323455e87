//! Integration tests for the route replay location feed.
//!
//! These tests verify the complete replay flow including:
//! - Route → RouteLocationProvider → observer on a paused tokio clock
//! - Cyclic replay order and cadence
//! - Schedule lifecycle (restart, stop, drop)
//! - Broadcast subscription feeding route progress
//! - Cross-thread control on a multi-thread runtime
//!
//! Run with: `cargo test --test route_replay_integration`

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use proptest::prelude::*;

use routesim::coord::Coordinate;
use routesim::location::{
    BroadcastObserver, FeedConfig, LocationObserver, LocationProvider, Position,
    RouteLocationProvider,
};
use routesim::progress::RouteProgress;
use routesim::route::{demo_route, Route, MAPBOX_DC, WHITE_HOUSE};

// ============================================================================
// Helper Functions
// ============================================================================

/// Observer that records every coordinate it receives.
#[derive(Default)]
struct Recorder {
    coordinates: Mutex<Vec<Coordinate>>,
    batch_sizes: Mutex<Vec<usize>>,
}

impl Recorder {
    fn coordinates(&self) -> Vec<Coordinate> {
        self.coordinates.lock().clone()
    }

    fn count(&self) -> usize {
        self.coordinates.lock().len()
    }
}

impl LocationObserver for Recorder {
    fn locations_updated(&self, _source: &str, positions: &[Position]) {
        self.batch_sizes.lock().push(positions.len());
        self.coordinates
            .lock()
            .extend(positions.iter().map(|p| p.coordinate));
    }
}

fn attach(provider: &RouteLocationProvider) -> Arc<Recorder> {
    let recorder = Arc::new(Recorder::default());
    let as_dyn: Arc<dyn LocationObserver> = recorder.clone();
    provider.set_observer(Some(&as_dyn));
    recorder
}

/// The two demo waypoints as a bare route.
fn waypoint_route() -> Arc<Route> {
    Arc::new(Route::new(vec![MAPBOX_DC, WHITE_HOUSE]))
}

/// Sleep long enough for `ticks` one-second ticks to fire, but not the next.
async fn wait_for_ticks(ticks: u64) {
    tokio::time::sleep(Duration::from_millis(ticks * 1000 + 500)).await;
}

// ============================================================================
// Integration Tests
// ============================================================================

/// Three ticks over a two-point route replay origin, destination, origin.
#[tokio::test(start_paused = true)]
async fn test_three_ticks_replay_waypoints_in_order() {
    let provider = RouteLocationProvider::new(waypoint_route());
    let recorder = attach(&provider);

    provider.start_updating_location();
    wait_for_ticks(3).await;
    provider.stop_updating_location();

    assert_eq!(
        recorder.coordinates(),
        vec![
            Coordinate::new(38.9131752, -77.0324047),
            Coordinate::new(38.8977, -77.0365),
            Coordinate::new(38.9131752, -77.0324047),
        ]
    );
    assert!(recorder.batch_sizes.lock().iter().all(|&n| n == 1));
}

/// Empty routes never reach the observer no matter how long the feed runs.
#[tokio::test(start_paused = true)]
async fn test_empty_route_produces_no_updates() {
    let provider = RouteLocationProvider::new(Arc::new(Route::empty()));
    let recorder = attach(&provider);

    provider.start_updating_location();
    assert!(provider.is_active());
    wait_for_ticks(10).await;

    assert_eq!(recorder.count(), 0);
    assert_eq!(provider.cursor(), 0);
}

/// Starting twice keeps a single one-per-interval cadence.
#[tokio::test(start_paused = true)]
async fn test_double_start_keeps_single_cadence() {
    let provider = RouteLocationProvider::new(waypoint_route());
    let recorder = attach(&provider);

    provider.start_updating_location();
    tokio::time::sleep(Duration::from_millis(400)).await;
    provider.start_updating_location();

    // Second schedule measures from its own start: ticks at 1.4s, 2.4s, 3.4s
    tokio::time::sleep(Duration::from_millis(3100)).await;
    assert_eq!(recorder.count(), 3);
    assert_eq!(provider.tick_count(), 3);
}

/// Stop on an idle feed is harmless, and stop after start halts delivery.
#[tokio::test(start_paused = true)]
async fn test_stop_is_idempotent() {
    let provider = RouteLocationProvider::new(waypoint_route());
    let recorder = attach(&provider);

    provider.stop_updating_location();
    provider.start_updating_location();
    wait_for_ticks(2).await;
    provider.stop_updating_location();
    provider.stop_updating_location();

    wait_for_ticks(5).await;
    assert_eq!(recorder.count(), 2);
    assert!(!provider.is_active());
}

/// Dropping a running provider cancels its schedule.
#[tokio::test(start_paused = true)]
async fn test_drop_without_stop_cancels_schedule() {
    let provider = RouteLocationProvider::new(waypoint_route());
    let recorder = attach(&provider);

    provider.start_updating_location();
    wait_for_ticks(1).await;
    assert_eq!(recorder.count(), 1);

    drop(provider);
    wait_for_ticks(5).await;
    assert_eq!(recorder.count(), 1);
}

/// Swapping observers between ticks routes later fixes to the new one only.
#[tokio::test(start_paused = true)]
async fn test_observer_swap_between_ticks() {
    let provider = RouteLocationProvider::new(waypoint_route());
    let first = attach(&provider);

    provider.start_updating_location();
    wait_for_ticks(1).await;

    let second = attach(&provider);
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert_eq!(first.coordinates(), vec![MAPBOX_DC]);
    assert_eq!(second.coordinates(), vec![WHITE_HOUSE, MAPBOX_DC]);
}

/// A custom interval changes the cadence.
#[tokio::test(start_paused = true)]
async fn test_custom_interval() {
    let provider = RouteLocationProvider::with_config(
        Some(waypoint_route()),
        FeedConfig::new().with_interval(Duration::from_millis(250)),
    );
    let recorder = attach(&provider);

    provider.start_updating_location();
    tokio::time::sleep(Duration::from_millis(1100)).await;

    assert_eq!(recorder.count(), 4);
}

/// Broadcast subscribers can follow progress along the replayed route.
#[tokio::test(start_paused = true)]
async fn test_broadcast_subscriber_tracks_progress() {
    let route = Arc::new(demo_route(200.0));
    let provider = RouteLocationProvider::new(route.clone());

    let observer = Arc::new(BroadcastObserver::new());
    let mut rx = observer.subscribe();
    let as_dyn: Arc<dyn LocationObserver> = observer.clone();
    provider.set_observer(Some(&as_dyn));

    let mut progress = RouteProgress::new(route.clone());
    let cumulative = route.cumulative_distances();

    provider.start_updating_location();
    for expected in cumulative.iter().take(5) {
        let position = rx.recv().await.expect("feed should keep emitting");
        let traveled = progress.update(&position);
        assert!((traveled - expected).abs() < 0.5);
    }
    provider.stop_updating_location();

    let remaining = progress.remaining_path().unwrap();
    assert_eq!(remaining.last(), route.last());
    assert!(remaining.distance() < route.distance());
}

/// A route loaded from GeoJSON replays in file order.
#[tokio::test(start_paused = true)]
async fn test_replay_route_loaded_from_geojson() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("route.geojson");
    std::fs::write(
        &path,
        r#"{"type": "Feature", "properties": {}, "geometry": {
            "type": "LineString",
            "coordinates": [[-77.0324, 38.9131], [-77.0340, 38.9050], [-77.0365, 38.8977]]
        }}"#,
    )
    .unwrap();

    let route = Arc::new(Route::from_geojson_file(&path).unwrap());
    let provider = RouteLocationProvider::new(route);
    let recorder = attach(&provider);

    provider.start_updating_location();
    wait_for_ticks(4).await;

    assert_eq!(
        recorder.coordinates(),
        vec![
            Coordinate::new(38.9131, -77.0324),
            Coordinate::new(38.9050, -77.0340),
            Coordinate::new(38.8977, -77.0365),
            Coordinate::new(38.9131, -77.0324),
        ]
    );
}

/// Observer swaps and stop from another thread while worker threads deliver ticks.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cross_thread_control_while_delivering() {
    let provider = Arc::new(RouteLocationProvider::with_config(
        Some(Arc::new(demo_route(100.0))),
        FeedConfig::new().with_interval(Duration::from_millis(2)),
    ));
    let first = attach(&provider);
    let second = Arc::new(Recorder::default());

    provider.start_updating_location();

    let controller = {
        let provider = Arc::clone(&provider);
        let first: Arc<dyn LocationObserver> = first.clone();
        let second: Arc<dyn LocationObserver> = second.clone();
        tokio::task::spawn_blocking(move || {
            for i in 0..100 {
                let next = if i % 2 == 0 { &second } else { &first };
                provider.set_observer(Some(next));
                std::thread::sleep(Duration::from_millis(1));
            }
            provider.stop_updating_location();
        })
    };
    controller.await.unwrap();
    assert!(!provider.is_active());

    // Let a tick that was mid-delivery at stop time finish
    tokio::time::sleep(Duration::from_millis(50)).await;
    let ticks = provider.tick_count();
    let delivered = first.count() + second.count();
    assert!(ticks > 0, "feed should have ticked while running");
    assert_eq!(delivered as u64, ticks, "every tick reaches exactly one observer");

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(provider.tick_count(), ticks, "no ticks after stop");
    assert_eq!(first.count() + second.count(), delivered);
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// After k ticks the observer has seen route[0..k] modulo the route length.
    #[test]
    fn prop_replay_is_cyclic(len in 1usize..8, ticks in 0u64..20) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();

        let received = runtime.block_on(async {
            let route: Route = (0..len)
                .map(|i| Coordinate::new(i as f64, -(i as f64)))
                .collect();
            let provider = RouteLocationProvider::new(Arc::new(route));
            let recorder = attach(&provider);

            provider.start_updating_location();
            wait_for_ticks(ticks).await;
            provider.stop_updating_location();

            recorder.coordinates()
        });

        let expected: Vec<Coordinate> = (0..ticks as usize)
            .map(|k| {
                let i = k % len;
                Coordinate::new(i as f64, -(i as f64))
            })
            .collect();
        prop_assert_eq!(received, expected);
    }
}
