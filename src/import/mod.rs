pub mod csv;

pub use self::csv::{parse_connections, parse_stations, DroppedRow, ParsedRecords};
