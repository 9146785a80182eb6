use serde::{Deserialize, Serialize};

/// An undirected link between two stations on one line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub station_a: String,
    pub station_b: String,
    pub line_color: String,
    pub distance: f64,
}

impl Connection {
    #[must_use]
    pub fn new(
        station_a: impl Into<String>,
        station_b: impl Into<String>,
        line_color: impl Into<String>,
        distance: f64,
    ) -> Self {
        Self {
            station_a: station_a.into(),
            station_b: station_b.into(),
            line_color: line_color.into(),
            distance,
        }
    }

    /// True if this connection links `a` and `b`, in either order
    #[must_use]
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.station_a == a && self.station_b == b) || (self.station_a == b && self.station_b == a)
    }
}
