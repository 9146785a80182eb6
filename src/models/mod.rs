mod connection;
mod line_color;
mod station;
mod transit_graph;
mod view_state;

pub use connection::Connection;
pub use line_color::{css_color, FALLBACK_COLOR};
pub use station::Station;
pub use transit_graph::TransitGraph;
pub use view_state::ViewState;
