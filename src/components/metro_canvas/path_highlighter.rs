use std::collections::VecDeque;

use super::renderer::{connection_edge, RenderContext};
use super::scene::{Edge, EdgeKind, MapSurface, MarkerHandle};
use crate::constants::PATH_SEGMENT_WIDTH;
use crate::logging::log;

/// Suspends the highlight sequence between two segments
#[allow(async_fn_in_trait)]
pub trait Delay {
    async fn wait(&self, millis: u32);
}

/// Browser timer based delay
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutDelay;

impl Delay for TimeoutDelay {
    async fn wait(&self, millis: u32) {
        gloo_timers::future::TimeoutFuture::new(millis).await;
    }
}

/// Queue of draw-and-wait steps that animates a path over a rendered map.
///
/// The plan is resolved up front against one render pass, so running it never
/// needs the graph again. Segments whose stations or connection are missing are
/// left out; the stations of the path are still highlighted at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightPlan {
    segments: VecDeque<Edge>,
    stations: Vec<MarkerHandle>,
    delay_ms: u32,
    replaces_map: bool,
}

impl HighlightPlan {
    #[must_use]
    pub fn build(context: &RenderContext, path: &[String], delay_ms: u32) -> Self {
        if path.len() < 2 {
            return Self::clearing(delay_ms);
        }

        let graph = context.graph();
        let segments: VecDeque<Edge> = path
            .windows(2)
            .filter_map(|pair| {
                let connection = graph.connection_between(&pair[0], &pair[1])?;
                let mut edge = connection_edge(graph, connection, PATH_SEGMENT_WIDTH, EdgeKind::PathSegment)?;
                // Draw in travel direction even when the connection is stored reversed
                if connection.station_a != pair[0] {
                    std::mem::swap(&mut edge.from, &mut edge.to);
                }
                Some(edge)
            })
            .collect();

        let stations = path.iter().filter_map(|name| context.marker(name)).collect();

        log!("Highlighting {} of {} path segments", segments.len(), path.len() - 1);

        Self {
            segments,
            stations,
            delay_ms,
            replaces_map: true,
        }
    }

    /// A plan that only removes an earlier highlight
    #[must_use]
    pub fn clearing(delay_ms: u32) -> Self {
        Self {
            segments: VecDeque::new(),
            stations: Vec::new(),
            delay_ms,
            replaces_map: false,
        }
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn segments(&self) -> impl Iterator<Item = &Edge> {
        self.segments.iter()
    }

    /// Run the plan, pausing after every drawn segment
    pub async fn run<S: MapSurface, D: Delay>(mut self, surface: &mut S, delay: &D) {
        if !self.replaces_map {
            surface.clear_highlights();
            return;
        }

        surface.clear_edges();
        surface.clear_highlights();

        while let Some(segment) = self.segments.pop_front() {
            surface.add_edge(segment);
            delay.wait(self.delay_ms).await;
        }

        for handle in self.stations {
            surface.highlight_marker(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::metro_canvas::renderer::{render_map, RenderOptions};
    use crate::components::metro_canvas::scene::{Marker, Scene};
    use crate::geometry::Viewport;
    use crate::models::{Connection, Station, TransitGraph};
    use futures::executor::block_on;
    use std::cell::Cell;

    /// Advances a virtual clock instead of sleeping
    #[derive(Default)]
    struct VirtualClock {
        now: Cell<u32>,
    }

    impl Delay for VirtualClock {
        async fn wait(&self, millis: u32) {
            self.now.set(self.now.get() + millis);
        }
    }

    /// Scene that notes the virtual time of every path segment
    struct TimedScene<'a> {
        scene: Scene,
        clock: &'a VirtualClock,
        drawn_at: Vec<u32>,
    }

    impl MapSurface for TimedScene<'_> {
        fn clear(&mut self) {
            self.scene.clear();
        }

        fn add_marker(&mut self, marker: Marker) -> MarkerHandle {
            self.scene.add_marker(marker)
        }

        fn add_edge(&mut self, edge: Edge) {
            if edge.kind == EdgeKind::PathSegment {
                self.drawn_at.push(self.clock.now.get());
            }
            self.scene.add_edge(edge);
        }

        fn clear_edges(&mut self) {
            self.scene.clear_edges();
        }

        fn clear_highlights(&mut self) {
            self.scene.clear_highlights();
        }

        fn highlight_marker(&mut self, handle: MarkerHandle) {
            self.scene.highlight_marker(handle);
        }
    }

    fn path(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn rendered(connections: Vec<Connection>) -> (Scene, RenderContext) {
        let stations = vec![
            Station::new("A", 0.0, 0.0, "Blue"),
            Station::new("B", 10.0, 0.0, "Blue"),
            Station::new("C", 10.0, 10.0, "Red"),
            Station::new("D", 20.0, 10.0, "Red"),
        ];
        let graph = TransitGraph::build(stations, connections, Viewport::default());
        let mut scene = Scene::new();
        let context = render_map(&mut scene, graph, &RenderOptions::default());
        (scene, context)
    }

    #[test]
    fn test_segments_follow_path_order() {
        let (mut scene, context) = rendered(vec![
            Connection::new("A", "B", "Blue", 1.0),
            Connection::new("B", "C", "Red", 1.0),
        ]);
        let plan = HighlightPlan::build(&context, &path(&["A", "B", "C"]), 300);
        assert_eq!(plan.segment_count(), 2);

        block_on(plan.run(&mut scene, &VirtualClock::default()));

        let segments: Vec<_> = scene.path_segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].color, "blue");
        assert_eq!(segments[1].color, "red");
        assert_eq!(segments[0].to, segments[1].from);
        assert!(segments.iter().all(|s| s.width == PATH_SEGMENT_WIDTH));
        // Base connections are replaced by the path
        assert_eq!(scene.edges.len(), 2);
        assert_eq!(scene.highlighted_stations().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_missing_connection_skips_only_that_segment() {
        let (mut scene, context) = rendered(vec![Connection::new("B", "C", "Red", 1.0)]);
        let plan = HighlightPlan::build(&context, &path(&["A", "B", "C"]), 300);

        block_on(plan.run(&mut scene, &VirtualClock::default()));

        let segments: Vec<_> = scene.path_segments().collect();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].from, context.graph().station("B").and_then(|s| s.screen).expect("B"));
        assert_eq!(scene.highlighted_stations().count(), 3);
    }

    #[test]
    fn test_reversed_connection_is_found() {
        let (mut scene, context) = rendered(vec![Connection::new("B", "A", "Blue", 1.0)]);
        let plan = HighlightPlan::build(&context, &path(&["A", "B"]), 300);

        block_on(plan.run(&mut scene, &VirtualClock::default()));

        let segment = scene.path_segments().next().expect("Segment A-B drawn");
        assert_eq!(segment.from, context.graph().station("A").and_then(|s| s.screen).expect("A"));
        assert_eq!(segment.to, context.graph().station("B").and_then(|s| s.screen).expect("B"));
    }

    #[test]
    fn test_unknown_station_is_skipped_and_traversal_continues() {
        let (mut scene, context) = rendered(vec![
            Connection::new("A", "B", "Blue", 1.0),
            Connection::new("C", "D", "Red", 1.0),
        ]);
        let plan = HighlightPlan::build(&context, &path(&["A", "B", "Ghost", "C", "D"]), 300);
        assert_eq!(plan.segment_count(), 2);

        block_on(plan.run(&mut scene, &VirtualClock::default()));

        assert_eq!(scene.highlighted_stations().collect::<Vec<_>>(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_segments_are_spaced_by_delay() {
        let clock = VirtualClock::default();
        let (scene, context) = rendered(vec![
            Connection::new("A", "B", "Blue", 1.0),
            Connection::new("B", "C", "Red", 1.0),
            Connection::new("C", "D", "Red", 1.0),
        ]);
        let mut surface = TimedScene { scene, clock: &clock, drawn_at: Vec::new() };
        let plan = HighlightPlan::build(&context, &path(&["A", "B", "C", "D"]), 300);

        block_on(plan.run(&mut surface, &clock));

        assert_eq!(surface.drawn_at, vec![0, 300, 600]);
        assert_eq!(clock.now.get(), 900);
    }

    #[test]
    fn test_short_path_only_clears_previous_highlight() {
        let (mut scene, context) = rendered(vec![
            Connection::new("A", "B", "Blue", 1.0),
            Connection::new("B", "C", "Red", 1.0),
        ]);
        let base_edges = scene.edges.clone();
        block_on(HighlightPlan::build(&context, &path(&["A", "B", "C"]), 300).run(&mut scene, &VirtualClock::default()));

        let clock = VirtualClock::default();
        let plan = HighlightPlan::build(&context, &path(&["A"]), 300);
        assert_eq!(plan.segment_count(), 0);
        block_on(plan.run(&mut scene, &clock));

        assert_eq!(scene.path_segments().count(), 0);
        assert_eq!(scene.highlighted_stations().count(), 0);
        assert_eq!(clock.now.get(), 0);

        // An empty path leaves an untouched base map alone
        let (mut fresh, context) = rendered(vec![
            Connection::new("A", "B", "Blue", 1.0),
            Connection::new("B", "C", "Red", 1.0),
        ]);
        block_on(HighlightPlan::build(&context, &[], 300).run(&mut fresh, &clock));
        assert_eq!(fresh.edges, base_edges);
    }
}
