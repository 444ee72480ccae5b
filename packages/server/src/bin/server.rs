//! Ride dispatch server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin ridelink-server
//! cargo run --bin ridelink-server -- --host 0.0.0.0 --port 3000 --step-delay-ms 200 --seed 42
//! ```

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use clap::Parser;
use ridelink_server::{
    domain::{DEFAULT_STEP_DELAY, DEFAULT_STEPS, DriverFactory, MotionConfig, RandomSource},
    infrastructure::{
        message_pusher::WebSocketRideEventPusher, random::StdRandomSource,
        repository::InMemoryConnectionRegistry,
    },
    ui::Server,
    usecase::{
        ConnectRiderUseCase, DisconnectRiderUseCase, ListConnectionsUseCase,
        RandomSourceFactory, RideSessionFactory,
    },
};
use ridelink_shared::{logger::setup_logger, time::SystemClock};
use tokio::sync::Mutex;

/// Upper bound for `--steps`.
const MAX_STEPS: i64 = 100_000;

#[derive(Parser, Debug)]
#[command(name = "ridelink-server")]
#[command(about = "Simulated ride dispatch server over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Interpolation steps per leg
    #[arg(
        long,
        default_value_t = DEFAULT_STEPS,
        value_parser = clap::value_parser!(u32).range(1..=MAX_STEPS)
    )]
    steps: u32,

    /// Delay between two driver positions, in milliseconds
    #[arg(long, default_value_t = DEFAULT_STEP_DELAY.as_millis() as u64)]
    step_delay_ms: u64,

    /// Seed for driver fabrication (reproducible drivers)
    #[arg(long)]
    seed: Option<u64>,
}

/// Every session gets its own source; with a seed, session `n` uses `seed + n`.
fn random_source_factory(seed: Option<u64>) -> RandomSourceFactory {
    let sessions = AtomicU64::new(0);
    Arc::new(move || {
        let session_seed = seed.map(|s| s.wrapping_add(sessions.fetch_add(1, Ordering::Relaxed)));
        Box::new(StdRandomSource::new(session_seed)) as Box<dyn RandomSource>
    })
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let motion = MotionConfig::new(args.steps, Duration::from_millis(args.step_delay_ms));
    tracing::info!(
        "Driver motion: {} steps per leg, {:?} per step, {:?} per leg (seed: {:?})",
        motion.steps,
        motion.step_delay,
        motion.leg_duration(),
        args.seed
    );

    // 1. Registry (in-memory, metrics/logging only)
    let registry = Arc::new(InMemoryConnectionRegistry::new());

    // 2. EventPusher (WebSocket implementation)
    let event_pusher = Arc::new(WebSocketRideEventPusher::new(Arc::new(Mutex::new(
        HashMap::new(),
    ))));

    // 3. UseCases
    let connect_rider_usecase = Arc::new(ConnectRiderUseCase::new(
        registry.clone(),
        event_pusher.clone(),
        Arc::new(SystemClock),
    ));
    let disconnect_rider_usecase = Arc::new(DisconnectRiderUseCase::new(
        registry.clone(),
        event_pusher.clone(),
    ));
    let list_connections_usecase = Arc::new(ListConnectionsUseCase::new(registry.clone()));
    let ride_session_factory = Arc::new(RideSessionFactory::new(
        event_pusher.clone(),
        random_source_factory(args.seed),
        DriverFactory::default(),
        motion,
    ));

    // 4. Create and run the server
    let server = Server::new(
        connect_rider_usecase,
        disconnect_rider_usecase,
        list_connections_usecase,
        ride_session_factory,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
