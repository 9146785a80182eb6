/// Reference to a marker drawn during one render pass.
///
/// A handle is only honoured by the pass that created it; once the surface is
/// cleared, older handles are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MarkerHandle {
    generation: u64,
    index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Connection,
    PathSegment,
}

impl EdgeKind {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Connection => "connection",
            Self::PathSegment => "path-segment",
        }
    }
}

/// A station dot, positioned by its centre
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub station: String,
    pub center: (f64, f64),
    pub radius: f64,
    pub color: &'static str,
    pub highlighted: bool,
}

impl Marker {
    /// Top-left corner for absolutely positioned elements
    #[must_use]
    pub fn top_left(&self) -> (f64, f64) {
        (self.center.0 - self.radius, self.center.1 - self.radius)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub color: &'static str,
    pub width: f64,
    pub kind: EdgeKind,
}

impl Edge {
    /// Hashable identity of the drawn line
    #[must_use]
    pub fn key(&self) -> (EdgeKind, [u64; 4]) {
        (
            self.kind,
            [self.from.0.to_bits(), self.from.1.to_bits(), self.to.0.to_bits(), self.to.1.to_bits()],
        )
    }
}

/// Drawing target for the map.
///
/// Edges live on a layer beneath the markers that never takes pointer input.
pub trait MapSurface {
    /// Remove every marker and edge and invalidate outstanding handles
    fn clear(&mut self);

    fn add_marker(&mut self, marker: Marker) -> MarkerHandle;

    fn add_edge(&mut self, edge: Edge);

    /// Remove every edge, keeping markers
    fn clear_edges(&mut self);

    /// Remove path segments and station highlights, keeping the base map
    fn clear_highlights(&mut self);

    /// Mark a station as part of the highlighted path; stale handles are ignored
    fn highlight_marker(&mut self, handle: MarkerHandle);

    /// Run several drawing calls so they become visible as one change
    fn batch<R>(&mut self, draw: impl FnOnce(&mut dyn MapSurface) -> R) -> R
    where
        Self: Sized,
    {
        draw(self)
    }
}

/// Retained display list rendered by the map view
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    generation: u64,
    pub markers: Vec<Marker>,
    pub edges: Vec<Edge>,
}

impl Default for Scene {
    fn default() -> Self {
        // Generation 0 is reserved for detached handles
        Self {
            generation: 1,
            markers: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render pass the scene currently shows
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[cfg(test)]
    fn marker(&self, handle: MarkerHandle) -> Option<&Marker> {
        if handle.generation == self.generation {
            self.markers.get(handle.index)
        } else {
            None
        }
    }

    pub fn path_segments(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| e.kind == EdgeKind::PathSegment)
    }

    pub fn highlighted_stations(&self) -> impl Iterator<Item = &str> {
        self.markers
            .iter()
            .filter(|m| m.highlighted)
            .map(|m| m.station.as_str())
    }
}

impl MapSurface for Scene {
    fn clear(&mut self) {
        self.generation += 1;
        self.markers.clear();
        self.edges.clear();
    }

    fn add_marker(&mut self, marker: Marker) -> MarkerHandle {
        self.markers.push(marker);
        MarkerHandle {
            generation: self.generation,
            index: self.markers.len() - 1,
        }
    }

    fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    fn clear_edges(&mut self) {
        self.edges.clear();
    }

    fn clear_highlights(&mut self) {
        self.edges.retain(|e| e.kind != EdgeKind::PathSegment);
        for marker in &mut self.markers {
            marker.highlighted = false;
        }
    }

    fn highlight_marker(&mut self, handle: MarkerHandle) {
        if handle.generation != self.generation {
            return;
        }
        if let Some(marker) = self.markers.get_mut(handle.index) {
            marker.highlighted = true;
        }
    }
}
