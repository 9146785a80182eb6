use csv::{ReaderBuilder, StringRecord, Trim};

use crate::logging::log;
use crate::models::{Connection, Station};

/// Number of fields in a `name, x, y, color` row
pub const STATION_FIELDS: usize = 4;

/// Number of fields in a `stationA, stationB, color, distance` row
pub const CONNECTION_FIELDS: usize = 4;

/// A data row that was skipped because it did not match the expected shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroppedRow {
    /// 1-based line number in the source text
    pub line: u64,
    pub field_count: usize,
}

/// Well-formed records plus the rows that were dropped while reading them
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecords<T> {
    pub records: Vec<T>,
    pub dropped: Vec<DroppedRow>,
}

impl<T> Default for ParsedRecords<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            dropped: Vec::new(),
        }
    }
}

/// Parse the station coordinate source.
///
/// Coordinates that are not numbers become NaN and are passed on unchanged.
#[must_use]
pub fn parse_stations(text: &str) -> ParsedRecords<Station> {
    parse_rows(text, STATION_FIELDS, |row| {
        Station::new(&row[0], parse_number(&row[1]), parse_number(&row[2]), &row[3])
    })
}

/// Parse the connection source
#[must_use]
pub fn parse_connections(text: &str) -> ParsedRecords<Connection> {
    parse_rows(text, CONNECTION_FIELDS, |row| {
        Connection::new(&row[0], &row[1], &row[2], parse_number(&row[3]))
    })
}

fn parse_rows<T>(
    text: &str,
    expected_fields: usize,
    build: impl Fn(&StringRecord) -> T,
) -> ParsedRecords<T> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut parsed = ParsedRecords::default();

    for result in reader.records() {
        match result {
            Ok(row) if row.len() == expected_fields => parsed.records.push(build(&row)),
            Ok(row) => parsed.dropped.push(DroppedRow {
                line: row.position().map_or(0, csv::Position::line),
                field_count: row.len(),
            }),
            Err(e) => parsed.dropped.push(DroppedRow {
                line: e.position().map_or(0, csv::Position::line),
                field_count: 0,
            }),
        }
    }

    if !parsed.dropped.is_empty() {
        log!("Dropped {} malformed rows", parsed.dropped.len());
    }

    parsed
}

fn parse_number(field: &str) -> f64 {
    field.parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stations_trims_fields() {
        let csv = "Station,X,Y,Color\n  Rajiv Chowk , 77.2197 ,28.6328, Blue \r\nKashmere Gate,77.2285,28.6675,Red\n";
        let parsed = parse_stations(csv);

        assert!(parsed.dropped.is_empty());
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].name, "Rajiv Chowk");
        assert_eq!(parsed.records[0].color, "Blue");
        assert!((parsed.records[0].raw_x - 77.2197).abs() < 1e-12);
        assert!((parsed.records[1].raw_y - 28.6675).abs() < 1e-12);
    }

    #[test]
    fn test_malformed_number_becomes_nan() {
        let parsed = parse_stations("name,x,y,color\nA,abc,1.0,Blue\n");

        assert_eq!(parsed.records.len(), 1);
        assert!(parsed.records[0].raw_x.is_nan());
        assert_eq!(parsed.records[0].raw_y, 1.0);
    }

    #[test]
    fn test_rows_with_wrong_field_count_are_dropped() {
        let csv = "a,b,color,distance\nA,B,Blue,1.5\nB,C,Blue\nC,D,Red,2.0,extra\nD,E,Red,0.8\n";
        let parsed = parse_connections(csv);

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[1].station_a, "D");
        assert_eq!(
            parsed.dropped,
            vec![
                DroppedRow { line: 3, field_count: 3 },
                DroppedRow { line: 4, field_count: 5 },
            ]
        );
    }

    #[test]
    fn test_header_only_yields_nothing() {
        let parsed = parse_connections("stationA,stationB,color,distance\n");
        assert!(parsed.records.is_empty());
        assert!(parsed.dropped.is_empty());

        assert_eq!(parse_stations(""), ParsedRecords::default());
    }

    #[test]
    fn test_connection_distance_is_parsed() {
        let parsed = parse_connections("h1,h2,h3,h4\nA, B ,Yellow, 2.25\n");

        assert_eq!(parsed.records[0], Connection::new("A", "B", "Yellow", 2.25));
    }
}
