use serde::{Deserialize, Serialize};

use crate::constants::{MAP_HEIGHT, MAP_PADDING, MAP_WIDTH};

/// Fixed-size drawing area the network is fitted into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            padding: MAP_PADDING,
        }
    }
}

/// Axis-aligned bounding box over raw station coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Computes the bounding box of a set of points.
    ///
    /// Returns `None` for an empty set. NaN coordinates are ignored by the
    /// min/max fold, so a single malformed row cannot poison the whole box.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        points.into_iter().fold(None, |acc: Option<Self>, (x, y)| {
            Some(match acc {
                None => Self { min_x: x, max_x: x, min_y: y, max_y: y },
                Some(b) => Self {
                    min_x: b.min_x.min(x),
                    max_x: b.max_x.max(x),
                    min_y: b.min_y.min(y),
                    max_y: b.max_y.max(y),
                },
            })
        })
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Maps raw coordinates into viewport pixels.
///
/// Each axis gets its own scale factor, so the aspect ratio of the source data is
/// not preserved. The Y axis is flipped because source coordinates grow upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    bounds: Bounds,
    viewport: Viewport,
    scale_x: f64,
    scale_y: f64,
}

impl ScreenTransform {
    #[must_use]
    pub fn fit(bounds: Bounds, viewport: Viewport) -> Self {
        Self {
            bounds,
            viewport,
            scale_x: axis_scale(viewport.width - 2.0 * viewport.padding, bounds.width()),
            scale_y: axis_scale(viewport.height - 2.0 * viewport.padding, bounds.height()),
        }
    }

    #[must_use]
    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    #[must_use]
    pub fn to_screen(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let padding = self.viewport.padding;
        let screen_x = padding + (x - self.bounds.min_x) * self.scale_x;
        let screen_y = self.viewport.height - (padding + (y - self.bounds.min_y) * self.scale_y);
        (screen_x, screen_y)
    }
}

// A zero-width axis collapses onto the padding offset instead of dividing by zero
fn axis_scale(available: f64, span: f64) -> f64 {
    if span == 0.0 {
        1.0
    } else {
        available / span
    }
}

/// Normalizes every point against the bounding box of the whole set
#[must_use]
pub fn normalize(points: &[(f64, f64)], viewport: Viewport) -> Vec<(f64, f64)> {
    let Some(bounds) = Bounds::from_points(points.iter().copied()) else {
        return Vec::new();
    };
    let transform = ScreenTransform::fit(bounds, viewport);
    points.iter().map(|&p| transform.to_screen(p)).collect()
}
