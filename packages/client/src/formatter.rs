//! Text formatting for the rider's terminal.

use ridelink_server::{
    domain::{Coordinate, RideStatus},
    infrastructure::dto::websocket::{DriverDto, RideErrorDto},
};

use crate::{booking::BookingState, route::RouteInfo};

const RULE: &str = "============================================================";

pub struct RideFormatter;

impl RideFormatter {
    pub fn format_driver_assigned(driver: &DriverDto) -> String {
        format!(
            "\n\n{}\nDriver assigned: {} ({})\nCar: {}\nStarting at ({:.6}, {:.6})\n{}\n",
            RULE, driver.name, driver.id, driver.car, driver.position.lat, driver.position.lng, RULE
        )
    }

    pub fn format_driver_location(position: &Coordinate) -> String {
        format!("\n  driver at {}\n", position)
    }

    pub fn format_status(status: RideStatus) -> String {
        let text = match status {
            RideStatus::Idle => "No active ride",
            RideStatus::Requested => "Looking for a driver...",
            RideStatus::DriverAssigned => "Driver assigned",
            RideStatus::DriverArriving => "Driver has arrived at pickup",
            RideStatus::Ongoing => "Ride started",
            RideStatus::Completed => "Ride completed",
        };
        format!("\n[{}] {}\n", status, text)
    }

    pub fn format_ride_error(error: &RideErrorDto) -> String {
        format!("\n! {} ({})\n", error.message, error.code)
    }

    pub fn format_route(route: &RouteInfo, fare: Option<u32>) -> String {
        format!(
            "\nDistance: {} km, ETA: {} min, Fare: {}\n",
            route.distance_km,
            route.duration_min,
            format_fare(fare)
        )
    }

    /// Summary shown by the `status` command.
    pub fn format_summary(state: &BookingState) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\n", RULE));
        output.push_str(&format!("Status:   {}\n", state.status()));
        output.push_str(&format!("Pickup:   {}\n", format_point(state.pickup())));
        output.push_str(&format!("Drop:     {}\n", format_point(state.drop_point())));

        match (state.distance_km(), state.eta_min()) {
            (Some(km), Some(min)) => {
                output.push_str(&format!("Distance: {} km\n", km));
                output.push_str(&format!("ETA:      {} min\n", min));
            }
            _ => output.push_str("Route:    (not available)\n"),
        }
        output.push_str(&format!("Fare:     {}\n", format_fare(state.fare_estimate())));

        if let Some(driver) = state.driver() {
            output.push_str(&format!("Driver:   {} - {}\n", driver.name, driver.car));
            output.push_str(&format!(
                "Position: {}\n",
                format_point(state.driver_location())
            ));
        }
        output.push_str(&format!("{}\n", RULE));
        output
    }

    pub fn format_help() -> String {
        [
            "",
            "Commands:",
            "  pickup <lat> <lng>   set pickup location",
            "  drop <lat> <lng>     set drop location",
            "  request              book a ride",
            "  cancel               cancel the ride",
            "  status               show booking details",
            "  quit                 exit",
            "",
        ]
        .join("\n")
    }
}

fn format_point(point: Option<Coordinate>) -> String {
    point.map_or_else(|| "(not set)".to_string(), |p| p.to_string())
}

fn format_fare(fare: Option<u32>) -> String {
    fare.map_or_else(|| "-".to_string(), |f| format!("₹ {}", f))
}
