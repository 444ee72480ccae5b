//! Rider client for the ride dispatch server.
//!
//! Set pickup and drop, see distance, ETA and fare, book a ride and watch the
//! driver move. Reconnects automatically (max 5 attempts, 5 seconds apart).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin ridelink-client
//! cargo run --bin ridelink-client -- --url ws://127.0.0.1:3000/ws --speed-kmh 30
//! ```

use std::sync::Arc;

use clap::Parser;

use ridelink_client::route::StraightLineRouteProvider;
use ridelink_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "ridelink-client")]
#[command(about = "Interactive rider client for the ride dispatch server", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Average speed used for route duration estimates
    #[arg(long, default_value_t = StraightLineRouteProvider::DEFAULT_SPEED_KMH)]
    speed_kmh: f64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let routes = Arc::new(StraightLineRouteProvider::new(args.speed_kmh));

    // Run the client
    if let Err(e) = ridelink_client::run_client(args.url, routes).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
