use std::collections::HashMap;

use super::scene::{Edge, EdgeKind, MapSurface, Marker, MarkerHandle};
use crate::constants::{EDGE_WIDTH, MARKER_RADIUS};
use crate::logging::log;
use crate::models::{css_color, Connection, TransitGraph};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub show_connections: bool,
    pub marker_radius: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_connections: true,
            marker_radius: MARKER_RADIUS,
        }
    }
}

/// What one render pass produced: the graph it drew and a handle per station marker
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    graph: TransitGraph,
    markers: HashMap<String, MarkerHandle>,
}

impl RenderContext {
    #[must_use]
    pub fn graph(&self) -> &TransitGraph {
        &self.graph
    }

    #[must_use]
    pub fn marker(&self, station: &str) -> Option<MarkerHandle> {
        self.markers.get(station).copied()
    }
}

/// Build the edge for a connection, `None` if either endpoint has no usable position
#[must_use]
pub fn connection_edge(
    graph: &TransitGraph,
    connection: &Connection,
    width: f64,
    kind: EdgeKind,
) -> Option<Edge> {
    let from = graph.station(&connection.station_a)?.drawable_position()?;
    let to = graph.station(&connection.station_b)?.drawable_position()?;
    Some(Edge {
        from,
        to,
        color: css_color(&connection.line_color),
        width,
        kind,
    })
}

/// Draw the whole map, replacing whatever the surface showed before.
///
/// Connection edges go down first, station markers on top of them.
pub fn render_map<S: MapSurface + ?Sized>(
    surface: &mut S,
    graph: TransitGraph,
    options: &RenderOptions,
) -> RenderContext {
    surface.clear();

    let mut edge_count = 0;
    if options.show_connections {
        for connection in graph.connections() {
            let Some(edge) = connection_edge(&graph, connection, EDGE_WIDTH, EdgeKind::Connection) else {
                continue;
            };
            surface.add_edge(edge);
            edge_count += 1;
        }
    }

    let mut markers = HashMap::with_capacity(graph.station_count());
    for station in graph.stations() {
        let handle = surface.add_marker(Marker {
            station: station.name.clone(),
            center: station.screen.unwrap_or((f64::NAN, f64::NAN)),
            radius: options.marker_radius,
            color: css_color(&station.color),
            highlighted: false,
        });
        markers.insert(station.name.clone(), handle);
    }

    log!("Rendered {} stations and {} connections", markers.len(), edge_count);

    RenderContext { graph, markers }
}
