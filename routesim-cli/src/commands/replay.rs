//! Replay command: drive the simulated location feed and print each fix.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use routesim::location::{
    BroadcastObserver, FeedConfig, LocationObserver, LocationProvider, Position,
    RouteLocationProvider,
};
use routesim::progress::RouteProgress;
use routesim::route::Route;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::Notify;
use tracing::{info, warn};

use super::common::{format_distance, RouteSource};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the replay command.
#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// GeoJSON file containing the route (default: config or built-in demo)
    #[arg(long)]
    pub route: Option<PathBuf>,

    /// Stop after this many positions (default: run until Ctrl+C)
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Milliseconds between positions (overrides config)
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Maximum distance between replayed points in meters (0 keeps the raw shape)
    #[arg(long)]
    pub spacing: Option<f64>,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub debug: bool,
}

/// Summary of a finished replay.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ReplaySummary {
    received: u64,
    lagged: u64,
    interrupted: bool,
}

/// Run the replay command.
pub fn run(args: ReplayArgs) -> Result<(), CliError> {
    let runner = CliRunner::with_debug(args.debug)?;
    runner.log_startup("replay");
    let config = runner.config();

    let source = RouteSource::resolve(args.route, args.spacing, config)?;
    let route = Arc::new(source.load()?);

    let mut feed_config = config.feed.to_feed_config();
    if let Some(interval_ms) = args.interval_ms {
        if interval_ms == 0 {
            return Err(CliError::Config(
                "--interval-ms must be at least 1".to_string(),
            ));
        }
        feed_config = feed_config.with_interval(Duration::from_millis(interval_ms));
    }

    println!("RouteSim v{}", routesim::VERSION);
    println!("================");
    println!();
    println!("Route:    {}", source.describe());
    println!(
        "Points:   {} ({})",
        route.len(),
        format_distance(route.distance())
    );
    println!("Interval: {} ms", feed_config.interval().as_millis());
    match args.ticks {
        Some(n) => println!("Ticks:    {}", n),
        None => println!("Ticks:    unlimited (Ctrl+C to stop)"),
    }
    println!();

    if route.is_empty() {
        warn!("Route is empty, the feed will not emit any positions");
        println!("Warning: the route is empty; no positions will be emitted.");
        println!();
    }

    let shutdown = Arc::new(Notify::new());
    let handler_shutdown = Arc::clone(&shutdown);
    ctrlc::set_handler(move || handler_shutdown.notify_one())
        .map_err(|e| CliError::SignalHandler(e.to_string()))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(e.to_string()))?;

    let summary = runtime.block_on(replay(route, feed_config, args.ticks, shutdown));

    println!();
    if summary.interrupted {
        println!("Interrupted.");
    }
    println!("Received {} position(s).", summary.received);
    if summary.lagged > 0 {
        println!("Skipped {} position(s) while printing fell behind.", summary.lagged);
    }
    info!(
        received = summary.received,
        lagged = summary.lagged,
        interrupted = summary.interrupted,
        "Replay finished"
    );

    Ok(())
}

/// Drive the feed until `ticks` positions arrive or shutdown is signalled.
async fn replay(
    route: Arc<Route>,
    feed_config: FeedConfig,
    ticks: Option<u64>,
    shutdown: Arc<Notify>,
) -> ReplaySummary {
    let provider = RouteLocationProvider::with_config(Some(Arc::clone(&route)), feed_config);
    let observer = Arc::new(BroadcastObserver::new());
    let mut rx = observer.subscribe();
    let as_dyn: Arc<dyn LocationObserver> = observer.clone();
    provider.set_observer(Some(&as_dyn));

    let mut progress = RouteProgress::new(route);
    let mut summary = ReplaySummary {
        received: 0,
        lagged: 0,
        interrupted: false,
    };

    provider.start_updating_location();

    while ticks.map_or(true, |limit| summary.received < limit) {
        tokio::select! {
            _ = shutdown.notified() => {
                summary.interrupted = true;
                break;
            }
            result = rx.recv() => match result {
                Ok(position) => {
                    summary.received += 1;
                    progress.update(&position);
                    print_position(summary.received, &position, &progress);
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Position subscriber lagged");
                    summary.lagged += skipped;
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    provider.stop_updating_location();
    summary
}

fn print_position(index: u64, position: &Position, progress: &RouteProgress) {
    println!(
        "[{:>4}] {}  {}  {} / {} ({:.1}%)",
        index,
        position.timestamp.format("%H:%M:%S%.3f"),
        position.coordinate,
        format_distance(progress.distance_traveled()),
        format_distance(progress.total_distance()),
        progress.fraction_traveled() * 100.0,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use routesim::route::demo_route;

    #[tokio::test(start_paused = true)]
    async fn test_replay_stops_after_requested_ticks() {
        let route = Arc::new(demo_route(200.0));
        let summary = replay(route, FeedConfig::new(), Some(3), Arc::new(Notify::new())).await;

        assert_eq!(summary.received, 3);
        assert!(!summary.interrupted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_interrupted_by_shutdown() {
        let shutdown = Arc::new(Notify::new());
        shutdown.notify_one();

        let route = Arc::new(demo_route(200.0));
        let summary = replay(route, FeedConfig::new(), None, shutdown).await;

        assert_eq!(summary.received, 0);
        assert!(summary.interrupted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ticks_returns_immediately() {
        let route = Arc::new(demo_route(200.0));
        let summary = replay(route, FeedConfig::new(), Some(0), Arc::new(Notify::new())).await;
        assert_eq!(summary.received, 0);
    }
}
