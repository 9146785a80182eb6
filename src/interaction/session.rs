use std::cell::RefCell;
use std::rc::Rc;

use super::controller::{InteractionController, ViewSnapshot};
use crate::api::{MapDataSource, RouteMode, RouteService};
use crate::components::metro_canvas::{render_map, Delay, HighlightPlan, MapSurface, RenderOptions};
use crate::config::MapConfig;
use crate::error::MapError;
use crate::import::csv::{parse_connections, parse_stations};
use crate::logging::{log, log_error};
use crate::models::TransitGraph;

/// Drives the page: loads data, renders the map and animates routes.
///
/// Cloning is cheap and every clone shares the same controller. The controller is
/// only borrowed between awaits, so a second action started while a highlight is
/// still running proceeds independently of the first.
pub struct MapSession<D, R, S, T> {
    controller: Rc<RefCell<InteractionController>>,
    config: Rc<MapConfig>,
    data: Rc<D>,
    routes: Rc<R>,
    surface: S,
    delay: Rc<T>,
    on_update: Rc<dyn Fn(ViewSnapshot)>,
}

impl<D, R, S: Clone, T> Clone for MapSession<D, R, S, T> {
    fn clone(&self) -> Self {
        Self {
            controller: Rc::clone(&self.controller),
            config: Rc::clone(&self.config),
            data: Rc::clone(&self.data),
            routes: Rc::clone(&self.routes),
            surface: self.surface.clone(),
            delay: Rc::clone(&self.delay),
            on_update: Rc::clone(&self.on_update),
        }
    }
}

impl<D, R, S, T> MapSession<D, R, S, T>
where
    D: MapDataSource,
    R: RouteService,
    S: MapSurface + Clone,
    T: Delay,
{
    pub fn new(config: MapConfig, data: D, routes: R, surface: S, delay: T) -> Self {
        Self {
            controller: Rc::new(RefCell::new(InteractionController::new())),
            config: Rc::new(config),
            data: Rc::new(data),
            routes: Rc::new(routes),
            surface,
            delay: Rc::new(delay),
            on_update: Rc::new(|_: ViewSnapshot| {}),
        }
    }

    /// Register the callback that receives every new view snapshot
    #[must_use]
    pub fn with_observer(mut self, on_update: impl Fn(ViewSnapshot) + 'static) -> Self {
        self.on_update = Rc::new(on_update);
        self
    }

    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        self.controller.borrow().snapshot()
    }

    #[must_use]
    pub fn current_path(&self) -> Vec<String> {
        self.controller.borrow().current_path().to_vec()
    }

    fn publish(&self) {
        let snapshot = self.controller.borrow().snapshot();
        (self.on_update)(snapshot);
    }

    pub fn dismiss_notice(&self) {
        self.controller.borrow_mut().dismiss_notice();
        self.publish();
    }

    /// Fill the connection cache before the first render; failures are only logged
    pub async fn prefetch_connections(&self) {
        if let Err(e) = self.data.connection_records().await {
            log_error!("Error loading metro lines data: {}", e);
        }
    }

    /// Sorted station names for the source and destination selectors
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinate source cannot be fetched
    pub async fn station_names(&self) -> Result<Vec<String>, MapError> {
        let stations = parse_stations(&self.data.station_records().await?).records;
        Ok(TransitGraph::build(stations, Vec::new(), self.config.viewport).sorted_station_names())
    }

    /// Show the full map with every connection
    ///
    /// # Errors
    ///
    /// Returns an error if the map data cannot be loaded
    pub async fn show_map(&self) -> Result<(), MapError> {
        self.controller.borrow_mut().show_map();
        self.publish();
        self.load_and_display(true).await
    }

    /// Show stations only and wait for a route mode to be chosen
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid selection or if the map data cannot be loaded
    pub async fn search(&self, source: &str, destination: &str) -> Result<(), MapError> {
        let outcome = self.controller.borrow_mut().search(source, destination);
        self.publish();
        self.surface.clone().clear_highlights();
        outcome?;
        self.load_and_display(false).await
    }

    /// Ask the route service for a path between the selected stations and animate
    /// it over the full map
    ///
    /// # Errors
    ///
    /// Returns an error if the selection is invalid, the request fails, or the map
    /// data cannot be loaded
    pub async fn query_route(&self, mode: RouteMode, source: &str, destination: &str) -> Result<(), MapError> {
        let query = self
            .controller
            .borrow_mut()
            .begin_route_query(mode, source, destination);
        self.publish();
        let query = query?;

        let result = self
            .routes
            .find_route(mode, &query.source, &query.destination)
            .await;
        if let Err(e) = &result {
            log_error!("Error fetching route: {}", e);
        }

        let outcome = self.controller.borrow_mut().complete_route(&query, result);
        self.publish();
        if let Err(e) = outcome {
            self.surface.clone().clear_highlights();
            return Err(e);
        }

        self.load_and_display(true).await?;
        self.highlight_current_path().await
    }

    /// Rebuild the graph from the data sources and redraw it
    ///
    /// # Errors
    ///
    /// Returns an error if either source cannot be fetched; a notice is raised
    pub async fn load_and_display(&self, show_connections: bool) -> Result<(), MapError> {
        let graph = match self.load_graph(show_connections).await {
            Ok(graph) => graph,
            Err(e) => {
                log_error!("Error loading or processing CSV: {}", e);
                self.controller.borrow_mut().report_load_failure();
                self.publish();
                return Err(e);
            }
        };

        let options = RenderOptions {
            show_connections,
            marker_radius: self.config.marker_radius,
        };
        let mut surface = self.surface.clone();
        let context = surface.batch(|target| render_map(target, graph, &options));
        self.controller.borrow_mut().install_context(context);
        Ok(())
    }

    async fn load_graph(&self, show_connections: bool) -> Result<TransitGraph, MapError> {
        let stations = parse_stations(&self.data.station_records().await?).records;
        let connections = if show_connections {
            parse_connections(&self.data.connection_records().await?).records
        } else {
            Vec::new()
        };
        Ok(TransitGraph::build(stations, connections, self.config.viewport))
    }

    async fn highlight_current_path(&self) -> Result<(), MapError> {
        let plan = {
            let controller = self.controller.borrow();
            let context = controller.context().ok_or(MapError::MapNotRendered)?;
            HighlightPlan::build(context, controller.current_path(), self.config.segment_delay_ms)
        };
        log!("Animating {} segments", plan.segment_count());

        let mut surface = self.surface.clone();
        plan.run(&mut surface, &*self.delay).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CachedMapData, RoutePayload};
    use crate::constants::CONNECTIONS_CACHE_KEY;
    use crate::storage::{MemoryStore, SessionStore};
    use crate::components::metro_canvas::{Edge, EdgeKind, Marker, MarkerHandle, Scene};
    use crate::models::ViewState;
    use futures::executor::block_on;
    use std::cell::Cell;

    const STATIONS: &str = "name,x,y,color\nA,0,0,Blue\nB,10,0,Blue\nC,10,10,Red\n";
    const CONNECTIONS: &str = "a,b,color,distance\nA,B,Blue,4\nC,B,Red,6\n";

    struct StaticData {
        fail: bool,
    }

    impl MapDataSource for StaticData {
        async fn station_records(&self) -> Result<String, MapError> {
            if self.fail {
                return Err(MapError::Http { url: "metro_coordinates.csv".to_string(), status: 500 });
            }
            Ok(STATIONS.to_string())
        }

        async fn connection_records(&self) -> Result<String, MapError> {
            Ok(CONNECTIONS.to_string())
        }
    }

    struct FixedRoutes {
        reply: Result<RoutePayload, MapError>,
        requests: RefCell<Vec<(RouteMode, String, String)>>,
    }

    impl RouteService for FixedRoutes {
        async fn find_route(
            &self,
            mode: RouteMode,
            source: &str,
            destination: &str,
        ) -> Result<RoutePayload, MapError> {
            self.requests
                .borrow_mut()
                .push((mode, source.to_string(), destination.to_string()));
            self.reply.clone()
        }
    }

    #[derive(Clone, Default)]
    struct Clock(Rc<Cell<u32>>);

    impl Delay for Clock {
        async fn wait(&self, millis: u32) {
            self.0.set(self.0.get() + millis);
        }
    }

    /// Shared scene that timestamps path segments with the virtual clock
    #[derive(Clone, Default)]
    struct SharedScene {
        scene: Rc<RefCell<Scene>>,
        clock: Clock,
        drawn_at: Rc<RefCell<Vec<u32>>>,
    }

    impl MapSurface for SharedScene {
        fn clear(&mut self) {
            self.scene.borrow_mut().clear();
        }

        fn add_marker(&mut self, marker: Marker) -> MarkerHandle {
            self.scene.borrow_mut().add_marker(marker)
        }

        fn add_edge(&mut self, edge: Edge) {
            if edge.kind == EdgeKind::PathSegment {
                self.drawn_at.borrow_mut().push(self.clock.0.get());
            }
            self.scene.borrow_mut().add_edge(edge);
        }

        fn clear_edges(&mut self) {
            self.scene.borrow_mut().clear_edges();
        }

        fn clear_highlights(&mut self) {
            self.scene.borrow_mut().clear_highlights();
        }

        fn highlight_marker(&mut self, handle: MarkerHandle) {
            self.scene.borrow_mut().highlight_marker(handle);
        }
    }

    type TestSession = MapSession<StaticData, FixedRoutes, SharedScene, Clock>;

    fn session(reply: Result<RoutePayload, MapError>, fail_data: bool) -> (TestSession, SharedScene) {
        let surface = SharedScene::default();
        let routes = FixedRoutes { reply, requests: RefCell::new(Vec::new()) };
        let session = MapSession::new(
            MapConfig::default(),
            StaticData { fail: fail_data },
            routes,
            surface.clone(),
            surface.clock.clone(),
        );
        (session, surface)
    }

    fn route_abc() -> RoutePayload {
        RoutePayload {
            path: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            total_distance: 10.0,
            total_line_changes: None,
            lines: Vec::new(),
        }
    }

    #[test]
    fn test_show_map_draws_connections() {
        let (session, surface) = session(Ok(route_abc()), false);

        block_on(session.show_map()).expect("Map loads");

        let scene = surface.scene.borrow();
        assert_eq!(scene.markers.len(), 3);
        assert_eq!(scene.edges.len(), 2);
        assert_eq!(session.snapshot().view, ViewState::MapOnly);
    }

    #[test]
    fn test_search_shows_stations_only() {
        let (session, surface) = session(Ok(route_abc()), false);

        block_on(session.search("A", "C")).expect("Valid search");

        let scene = surface.scene.borrow();
        assert_eq!(scene.markers.len(), 3);
        assert!(scene.edges.is_empty());
        assert!(session.snapshot().awaiting_route);
    }

    #[test]
    fn test_shortest_path_end_to_end() {
        let (session, surface) = session(Ok(route_abc()), false);
        let published = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&published);
        let session = session.with_observer(move |snapshot| sink.borrow_mut().push(snapshot));

        block_on(session.search("A", "C")).expect("Valid search");
        block_on(session.query_route(RouteMode::ShortestPath, "A", "C")).expect("Route found");

        let snapshot = session.snapshot();
        assert_eq!(snapshot.view, ViewState::Result);
        let summary = snapshot.summary.expect("Summary shown");
        assert_eq!(summary.travel_minutes, 15);
        assert_eq!(summary.fare, 20);
        assert_eq!(summary.distance_label(), "10.00");

        assert_eq!(*surface.drawn_at.borrow(), vec![0, 300]);
        let scene = surface.scene.borrow();
        assert_eq!(scene.path_segments().count(), 2);
        assert_eq!(scene.highlighted_stations().collect::<Vec<_>>(), vec!["A", "B", "C"]);

        assert_eq!(
            *session.routes.requests.borrow(),
            vec![(RouteMode::ShortestPath, "A".to_string(), "C".to_string())]
        );
        assert_eq!(published.borrow().last(), Some(&session.snapshot()));
    }

    #[test]
    fn test_service_error_clears_path_and_notifies() {
        let (session, surface) = session(Err(MapError::Service("Error: No path found!".to_string())), false);

        block_on(session.search("A", "C")).expect("Valid search");
        let result = block_on(session.query_route(RouteMode::ShortestPath, "A", "C"));

        assert!(result.is_err());
        let snapshot = session.snapshot();
        assert_eq!(snapshot.view, ViewState::MapOnly);
        assert_eq!(snapshot.notice.as_deref(), Some("Error: No path found!"));
        assert!(session.current_path().is_empty());
        assert_eq!(surface.scene.borrow().path_segments().count(), 0);
    }

    #[test]
    fn test_route_query_requires_selection() {
        let (session, _surface) = session(Ok(route_abc()), false);

        let result = block_on(session.query_route(RouteMode::MinimumInterchange, "A", ""));

        assert_eq!(result, Err(MapError::InvalidSelection));
        assert!(session.routes.requests.borrow().is_empty());
        assert_eq!(
            session.snapshot().notice.as_deref(),
            Some("Please select source and destination stations first.")
        );
    }

    #[test]
    fn test_route_query_follows_changed_selection() {
        let (session, _surface) = session(Ok(route_abc()), false);

        block_on(session.search("A", "B")).expect("Valid search");
        block_on(session.query_route(RouteMode::MinimumInterchange, "A", "C")).expect("Route found");

        assert_eq!(
            *session.routes.requests.borrow(),
            vec![(RouteMode::MinimumInterchange, "A".to_string(), "C".to_string())]
        );
        let summary = session.snapshot().summary.expect("Summary shown");
        assert_eq!(summary.destination, "C");
    }

    #[test]
    fn test_invalid_search_does_not_render() {
        let (session, surface) = session(Ok(route_abc()), false);

        let result = block_on(session.search("A", "A"));

        assert_eq!(result, Err(MapError::InvalidSelection));
        assert!(surface.scene.borrow().markers.is_empty());
        assert_eq!(session.snapshot().view, ViewState::Home);
    }

    #[test]
    fn test_data_failure_raises_notice() {
        let (session, _surface) = session(Ok(route_abc()), true);

        let result = block_on(session.show_map());

        assert!(matches!(result, Err(MapError::Http { status: 500, .. })));
        assert_eq!(session.snapshot().notice.as_deref(), Some("Error loading metro data."));
    }

    #[test]
    fn test_prefetch_fills_connection_cache() {
        let surface = SharedScene::default();
        let data = CachedMapData::new(StaticData { fail: false }, MemoryStore::new());
        let routes = FixedRoutes { reply: Ok(route_abc()), requests: RefCell::new(Vec::new()) };
        let session = MapSession::new(MapConfig::default(), data, routes, surface.clone(), surface.clock.clone());

        block_on(session.prefetch_connections());

        assert_eq!(session.data.store().get_item(CONNECTIONS_CACHE_KEY).as_deref(), Some(CONNECTIONS));
    }

    #[test]
    fn test_station_names_are_sorted() {
        let (session, _surface) = session(Ok(route_abc()), false);

        let names = block_on(session.station_names()).expect("Names load");

        assert_eq!(names, vec!["A", "B", "C"]);
    }
}
