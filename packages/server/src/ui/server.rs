//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectRiderUseCase, DisconnectRiderUseCase, ListConnectionsUseCase, RideSessionFactory,
};

use super::{
    handler::{get_connections, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Ride dispatch server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_rider_usecase,
///     disconnect_rider_usecase,
///     list_connections_usecase,
///     ride_session_factory,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    connect_rider_usecase: Arc<ConnectRiderUseCase>,
    disconnect_rider_usecase: Arc<DisconnectRiderUseCase>,
    list_connections_usecase: Arc<ListConnectionsUseCase>,
    ride_session_factory: Arc<RideSessionFactory>,
}

impl Server {
    pub fn new(
        connect_rider_usecase: Arc<ConnectRiderUseCase>,
        disconnect_rider_usecase: Arc<DisconnectRiderUseCase>,
        list_connections_usecase: Arc<ListConnectionsUseCase>,
        ride_session_factory: Arc<RideSessionFactory>,
    ) -> Self {
        Self {
            connect_rider_usecase,
            disconnect_rider_usecase,
            list_connections_usecase,
            ride_session_factory,
        }
    }

    /// Build the router with all endpoints.
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_rider_usecase: self.connect_rider_usecase,
            disconnect_rider_usecase: self.disconnect_rider_usecase,
            list_connections_usecase: self.list_connections_usecase,
            ride_session_factory: self.ride_session_factory,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/connections", get(get_connections))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Bind to `host:port` and serve until Ctrl+C / SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(
        self,
        host: String,
        port: u16,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(
        self,
        listener: TcpListener,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        let app = self.router();

        tracing::info!("Ride server listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}
