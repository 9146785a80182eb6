use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_ELEMENT_ID, MARKER_RADIUS, SEGMENT_DELAY_MS, TOOLTIP_OFFSET,
};
use crate::geometry::Viewport;

/// Runtime settings for the map page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub coordinates_url: String,
    pub connections_url: String,
    pub route_service_url: String,
    pub viewport: Viewport,
    pub marker_radius: f64,
    pub segment_delay_ms: u32,
    pub tooltip_offset: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            coordinates_url: "metro_coordinates.csv".to_string(),
            connections_url: "Delhi_Metro_Lines.csv".to_string(),
            route_service_url: "http://localhost:8080".to_string(),
            viewport: Viewport::default(),
            marker_radius: MARKER_RADIUS,
            segment_delay_ms: SEGMENT_DELAY_MS,
            tooltip_offset: TOOLTIP_OFFSET,
        }
    }
}

impl MapConfig {
    /// Parse a config from JSON, missing fields keep their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid JSON object for this config
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse map config: {e}"))
    }

    /// Read the config embedded in the page, falling back to defaults
    #[must_use]
    pub fn load_from_document() -> Self {
        let Some(text) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };

        match Self::from_json(&text) {
            Ok(config) => config,
            Err(e) => {
                crate::log_error!("{}", e);
                Self::default()
            }
        }
    }
}
