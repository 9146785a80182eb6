use crate::api::{RouteMode, RoutePayload};
use crate::constants::AVERAGE_SPEED;

/// Estimated travel time in whole minutes
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn travel_time_minutes(distance: f64) -> i64 {
    (distance * 60.0 / AVERAGE_SPEED).round() as i64
}

/// Flat fare for a total path distance
#[must_use]
pub fn fare_for_distance(distance: f64) -> u32 {
    match distance {
        d if d <= 2.0 => 10,
        d if d <= 5.0 => 15,
        d if d <= 12.0 => 20,
        d if d <= 21.0 => 30,
        d if d <= 32.0 => 40,
        _ => 50,
    }
}

/// Number of places where consecutive segments change line
#[must_use]
pub fn count_interchanges(lines: &[String]) -> u32 {
    let changes = lines.windows(2).filter(|pair| pair[0] != pair[1]).count();
    u32::try_from(changes).unwrap_or(u32::MAX)
}

/// Everything the result panel shows for one route
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub heading: &'static str,
    pub source: String,
    pub destination: String,
    pub travel_minutes: i64,
    pub fare: u32,
    /// Only reported for minimum-interchange routes
    pub interchanges: Option<u32>,
    pub distance: f64,
}

impl RouteSummary {
    #[must_use]
    pub fn from_payload(mode: RouteMode, source: &str, destination: &str, payload: &RoutePayload) -> Self {
        let interchanges = match mode {
            RouteMode::ShortestPath => None,
            RouteMode::MinimumInterchange => Some(
                payload
                    .total_line_changes
                    .unwrap_or_else(|| count_interchanges(&payload.lines)),
            ),
        };

        Self {
            heading: mode.heading(),
            source: source.to_string(),
            destination: destination.to_string(),
            travel_minutes: travel_time_minutes(payload.total_distance),
            fare: fare_for_distance(payload.total_distance),
            interchanges,
            distance: payload.total_distance,
        }
    }

    #[must_use]
    pub fn distance_label(&self) -> String {
        format!("{:.2}", self.distance)
    }
}
