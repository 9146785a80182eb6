/// Default viewport width in pixels
pub const MAP_WIDTH: f64 = 1000.0;

/// Default viewport height in pixels
pub const MAP_HEIGHT: f64 = 650.0;

/// Margin kept free on every side of the viewport
pub const MAP_PADDING: f64 = 40.0;

/// Radius of a station marker in pixels
pub const MARKER_RADIUS: f64 = 6.0;

/// Stroke width of a regular connection edge
pub const EDGE_WIDTH: f64 = 2.0;

/// Stroke width of an animated path segment
pub const PATH_SEGMENT_WIDTH: f64 = 4.0;

/// Pause between two animated path segments
pub const SEGMENT_DELAY_MS: u32 = 300;

/// Distance between the pointer and the tooltip's top-left corner
pub const TOOLTIP_OFFSET: f64 = 10.0;

/// Average train speed in distance units per hour, used for travel time estimates
pub const AVERAGE_SPEED: f64 = 40.0;

/// Session storage key holding the raw connection source
pub const CONNECTIONS_CACHE_KEY: &str = "metro_lines_data";

/// Id of the optional inline JSON element carrying a `MapConfig`
pub const CONFIG_ELEMENT_ID: &str = "metro-map-config";
