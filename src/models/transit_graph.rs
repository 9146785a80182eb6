use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use super::{Connection, Station};
use crate::geometry::{normalize, Viewport};
use crate::logging::log;

/// Stations with resolved screen positions and the connections between them.
///
/// Rebuilt from scratch on every render pass.
#[derive(Debug, Clone, Default)]
pub struct TransitGraph {
    pub graph: UnGraph<Station, Connection>,
    station_name_to_index: HashMap<String, NodeIndex>,
}

impl TransitGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from ingested records, fitting station positions into `viewport`.
    ///
    /// Duplicate station names keep the first record. Connections naming a station
    /// that is not in the set are dropped.
    #[must_use]
    pub fn build(stations: Vec<Station>, connections: Vec<Connection>, viewport: Viewport) -> Self {
        let mut graph = Self::new();

        for station in stations {
            if graph.add_station(station).is_none() {
                log!("Ignoring duplicate station record");
            }
        }
        graph.normalize(viewport);

        let total = connections.len();
        let kept = connections
            .into_iter()
            .filter_map(|connection| graph.add_connection(connection))
            .count();
        if kept < total {
            log!("Dropped {} connections with unknown stations", total - kept);
        }

        graph
    }

    /// Add a station, returns `None` if the name is already taken
    pub fn add_station(&mut self, station: Station) -> Option<NodeIndex> {
        if self.station_name_to_index.contains_key(&station.name) {
            return None;
        }
        let name = station.name.clone();
        let index = self.graph.add_node(station);
        self.station_name_to_index.insert(name, index);
        Some(index)
    }

    /// Add a connection, returns `None` if either endpoint is unknown
    pub fn add_connection(&mut self, connection: Connection) -> Option<EdgeIndex> {
        let a = self.get_station_index(&connection.station_a)?;
        let b = self.get_station_index(&connection.station_b)?;
        Some(self.graph.add_edge(a, b, connection))
    }

    /// Resolve screen positions for every station against the bounds of the whole set
    pub fn normalize(&mut self, viewport: Viewport) {
        let raw: Vec<(f64, f64)> = self.stations().map(Station::raw_position).collect();
        let screen = normalize(&raw, viewport);
        for (station, position) in self.graph.node_weights_mut().zip(screen) {
            station.screen = Some(position);
        }
    }

    #[must_use]
    pub fn get_station_index(&self, name: &str) -> Option<NodeIndex> {
        self.station_name_to_index.get(name).copied()
    }

    #[must_use]
    pub fn station(&self, name: &str) -> Option<&Station> {
        self.get_station_index(name)
            .and_then(|index| self.graph.node_weight(index))
    }

    /// Stations in the order they were read
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.graph.node_weights()
    }

    /// Connections in the order they were read
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.graph.edge_weights()
    }

    /// Find the first connection linking `a` and `b`, regardless of stored direction
    #[must_use]
    pub fn connection_between(&self, a: &str, b: &str) -> Option<&Connection> {
        let ia = self.get_station_index(a)?;
        let ib = self.get_station_index(b)?;
        self.graph
            .edges_connecting(ia, ib)
            .min_by_key(|edge| edge.id())
            .map(|edge| edge.weight())
    }

    #[must_use]
    pub fn station_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Station names sorted alphabetically, for the selectors
    #[must_use]
    pub fn sorted_station_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.stations().map(|s| s.name.clone()).collect();
        names.sort();
        names
    }
}
