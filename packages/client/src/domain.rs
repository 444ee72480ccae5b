//! Domain logic for client-side operations.
//!
//! Pure functions: command parsing and the reconnection policy.

use ridelink_server::domain::Coordinate;

use crate::error::ClientError;

/// A line typed by the rider.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    Pickup(Coordinate),
    Drop(Coordinate),
    Request,
    Cancel,
    Status,
    Help,
    Quit,
}

/// Parse one input line.
///
/// Coordinates may be separated by spaces or a comma: `pickup 12.9 77.6`,
/// `drop 12.95,77.65`.
pub fn parse_command(line: &str) -> Result<UserCommand, ClientError> {
    let mut words = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty());
    let Some(keyword) = words.next() else {
        return Err(ClientError::InvalidCommand("empty input".to_string()));
    };
    let args: Vec<&str> = words.collect();

    let command = match (keyword.to_lowercase().as_str(), args.as_slice()) {
        ("pickup", [lat, lng]) => UserCommand::Pickup(parse_coordinate(lat, lng)?),
        ("drop", [lat, lng]) => UserCommand::Drop(parse_coordinate(lat, lng)?),
        ("request" | "book", []) => UserCommand::Request,
        ("cancel", []) => UserCommand::Cancel,
        ("status", []) => UserCommand::Status,
        ("help", []) => UserCommand::Help,
        ("quit" | "exit", []) => UserCommand::Quit,
        ("pickup" | "drop", _) => {
            return Err(ClientError::InvalidCommand(format!(
                "usage: {} <lat> <lng>",
                keyword
            )));
        }
        _ => return Err(ClientError::InvalidCommand(line.trim().to_string())),
    };
    Ok(command)
}

fn parse_coordinate(lat: &str, lng: &str) -> Result<Coordinate, ClientError> {
    let parse = |value: &str| {
        value
            .parse::<f64>()
            .map_err(|_| ClientError::InvalidCommand(format!("'{}' is not a number", value)))
    };
    Coordinate::new(parse(lat)?, parse(lng)?)
        .map_err(|e| ClientError::InvalidCommand(e.to_string()))
}

/// Check if the client should exit immediately based on the error type.
///
/// `true` for errors a reconnect cannot fix (e.g., a malformed URL).
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::InvalidUrl(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    current_attempt < max_attempts
}
