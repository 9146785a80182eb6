use serde::{Deserialize, Serialize};

/// A named point of the network as read from the coordinate source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub raw_x: f64,
    pub raw_y: f64,
    pub color: String,
    /// Pixel position, only set once the whole station set has been normalized
    #[serde(skip)]
    pub screen: Option<(f64, f64)>,
}

impl Station {
    #[must_use]
    pub fn new(name: impl Into<String>, raw_x: f64, raw_y: f64, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_x,
            raw_y,
            color: color.into(),
            screen: None,
        }
    }

    #[must_use]
    pub fn raw_position(&self) -> (f64, f64) {
        (self.raw_x, self.raw_y)
    }

    /// Screen position if it is known and usable for drawing
    #[must_use]
    pub fn drawable_position(&self) -> Option<(f64, f64)> {
        self.screen.filter(|(x, y)| x.is_finite() && y.is_finite())
    }
}
