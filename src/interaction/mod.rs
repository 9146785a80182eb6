pub mod controller;
pub mod session;
pub mod summary;

pub use controller::{InteractionController, RouteQuery, ViewSnapshot};
pub use session::MapSession;
pub use summary::{fare_for_distance, travel_time_minutes, RouteSummary};
