//! WebSocket client session management.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use tokio::{
    net::TcpStream,
    sync::{Mutex, mpsc},
};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use ridelink_server::infrastructure::dto::websocket::{ClientCommand, ServerEvent};

use crate::{
    booking::{BookingState, EventOutcome},
    domain::{UserCommand, parse_command},
    error::ClientError,
    route::GeoRouteProvider,
};

use super::{formatter::RideFormatter, ui::redisplay_prompt};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Everything a session needs that outlives one connection.
pub struct SessionContext {
    pub booking: Arc<Mutex<BookingState>>,
    pub routes: Arc<dyn GeoRouteProvider>,
}

/// Run one connection until the rider quits or the connection drops.
///
/// `Ok(())` means the rider quit; a lost connection is reported as
/// `ClientError::ConnectionError` after the booking has been reset.
pub async fn run_client_session(
    url: &str,
    context: &SessionContext,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to ride server!");
    println!("\nConnected. Type 'help' for commands. Press Ctrl+C to exit.\n");

    let (mut write, mut read) = ws_stream.split();

    // Spawn a task to handle incoming events
    let booking = context.booking.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let event = match serde_json::from_str::<ServerEvent>(text.as_str()) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("Unrecognized frame '{}': {}", text.as_str(), e);
                            continue;
                        }
                    };
                    let output = apply_server_event(&booking, event).await;
                    if let Some(output) = output {
                        print!("{}", output);
                        redisplay_prompt();
                    }
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    redisplay_prompt();
    let result = loop {
        tokio::select! {
            _ = &mut read_task => {
                break Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    // input closed (Ctrl+C / Ctrl+D)
                    break Ok(());
                };
                match handle_line(&line, context, &mut write).await {
                    Ok(true) => {}
                    Ok(false) => break Ok(()),
                    Err(e) => break Err(e),
                }
                redisplay_prompt();
            }
        }
    };

    read_task.abort();
    match &result {
        Ok(()) => {
            write.close().await.ok();
        }
        Err(_) => {
            context.booking.lock().await.connection_lost();
            println!("\nConnection lost; any active ride was cancelled.");
        }
    }
    result
}

/// Apply one server event and return the text to show, if any.
async fn apply_server_event(booking: &Mutex<BookingState>, event: ServerEvent) -> Option<String> {
    let mut state = booking.lock().await;
    match state.apply_event(event.clone()) {
        EventOutcome::Updated => match event {
            ServerEvent::DriverAssigned(driver) => {
                Some(RideFormatter::format_driver_assigned(&driver))
            }
            ServerEvent::DriverLocation(_) => state
                .driver_location()
                .map(|p| RideFormatter::format_driver_location(&p)),
            ServerEvent::RideStatus(_) => Some(RideFormatter::format_status(state.status())),
            ServerEvent::RideError(_) => None,
        },
        EventOutcome::Ignored => None,
        EventOutcome::Rejected(error) => Some(RideFormatter::format_ride_error(&error)),
    }
}

/// Returns `Ok(false)` when the rider asked to quit.
async fn handle_line(
    line: &str,
    context: &SessionContext,
    write: &mut WsSink,
) -> Result<bool, ClientError> {
    let command = match parse_command(line) {
        Ok(command) => command,
        Err(e) => {
            println!("{} (type 'help')", e);
            return Ok(true);
        }
    };

    match command {
        UserCommand::Pickup(pickup) => {
            context.booking.lock().await.set_pickup(pickup);
            refresh_route(context).await;
        }
        UserCommand::Drop(drop) => {
            context.booking.lock().await.set_drop(drop);
            refresh_route(context).await;
        }
        UserCommand::Request => {
            let payload = context.booking.lock().await.request_ride();
            match payload {
                Ok(payload) => {
                    send_command(write, ClientCommand::RequestRide(payload)).await?;
                    let status = context.booking.lock().await.status();
                    println!("{}", RideFormatter::format_status(status));
                }
                Err(e) => println!("{}", e),
            }
        }
        UserCommand::Cancel => {
            context.booking.lock().await.cancel_ride();
            send_command(write, ClientCommand::CancelRide).await?;
        }
        UserCommand::Status => {
            print!("{}", RideFormatter::format_summary(&*context.booking.lock().await));
        }
        UserCommand::Help => println!("{}", RideFormatter::format_help()),
        UserCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// Recompute the route when pickup and drop are both set.
async fn refresh_route(context: &SessionContext) {
    let endpoints = context.booking.lock().await.needs_route();
    let Some((pickup, drop)) = endpoints else {
        return;
    };

    let result = context.routes.route(pickup, drop).await;
    let mut state = context.booking.lock().await;
    state.apply_route(pickup, drop, result);
    match state.route() {
        Some(route) => print!("{}", RideFormatter::format_route(route, state.fare_estimate())),
        None => println!("Route unavailable; fare cannot be estimated."),
    }
}

async fn send_command(write: &mut WsSink, command: ClientCommand) -> Result<(), ClientError> {
    let json = serde_json::to_string(&command)
        .map_err(|e| ClientError::InvalidCommand(e.to_string()))?;
    write
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}
