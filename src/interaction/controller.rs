use super::summary::RouteSummary;
use crate::api::{RouteMode, RoutePayload};
use crate::components::metro_canvas::RenderContext;
use crate::error::MapError;
use crate::models::ViewState;

pub const INVALID_SEARCH_NOTICE: &str = "Please select different source and destination stations.";
pub const MISSING_SELECTION_NOTICE: &str = "Please select source and destination stations first.";
pub const MAP_LOAD_NOTICE: &str = "Error loading metro data.";

/// What the page shows, published after every state change
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewSnapshot {
    pub view: ViewState,
    /// Map shown for a search, waiting for a route mode to be picked
    pub awaiting_route: bool,
    pub summary: Option<RouteSummary>,
    pub notice: Option<String>,
}

/// A route request ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuery {
    pub mode: RouteMode,
    pub source: String,
    pub destination: String,
}

/// Check that a search names two different, non-empty stations
///
/// # Errors
///
/// Returns `MapError::InvalidSelection` otherwise
pub fn validate_selection(source: &str, destination: &str) -> Result<(String, String), MapError> {
    let source = source.trim();
    let destination = destination.trim();
    if source.is_empty() || destination.is_empty() || source == destination {
        return Err(MapError::InvalidSelection);
    }
    Ok((source.to_string(), destination.to_string()))
}

/// View-state machine of the page.
///
/// Every method is synchronous; the async session calls them between awaits so no
/// borrow of the controller is held while a request or animation is suspended.
#[derive(Debug, Default)]
pub struct InteractionController {
    view: ViewState,
    awaiting_route: bool,
    current_path: Vec<String>,
    summary: Option<RouteSummary>,
    notice: Option<String>,
    context: Option<RenderContext>,
}

impl InteractionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn view_state(&self) -> ViewState {
        self.view
    }

    #[must_use]
    pub fn current_path(&self) -> &[String] {
        &self.current_path
    }

    #[must_use]
    pub fn context(&self) -> Option<&RenderContext> {
        self.context.as_ref()
    }

    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            view: self.view,
            awaiting_route: self.awaiting_route,
            summary: self.summary.clone(),
            notice: self.notice.clone(),
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Home → map with every connection, no route
    pub fn show_map(&mut self) {
        self.notice = None;
        self.view = ViewState::MapOnly;
        self.awaiting_route = false;
        self.clear_route();
    }

    /// Start a search; the map is shown without connections until a route is requested
    ///
    /// # Errors
    ///
    /// Returns `MapError::InvalidSelection` if the stations are missing or identical.
    /// A notice is raised; Home and MapOnly stay put, a shown result falls back to MapOnly
    pub fn search(&mut self, source: &str, destination: &str) -> Result<(), MapError> {
        self.notice = None;
        self.clear_route();

        match validate_selection(source, destination) {
            Ok(_) => {
                self.view = ViewState::MapOnly;
                self.awaiting_route = true;
                Ok(())
            }
            Err(e) => {
                // A cleared result must not stay on screen
                if self.view == ViewState::Result {
                    self.view = ViewState::MapOnly;
                }
                self.awaiting_route = false;
                self.notice = Some(INVALID_SEARCH_NOTICE.to_string());
                Err(e)
            }
        }
    }

    /// Prepare a route request for the stations selected when the mode is picked
    ///
    /// # Errors
    ///
    /// Returns `MapError::InvalidSelection` if a station is missing or both are the same
    pub fn begin_route_query(
        &mut self,
        mode: RouteMode,
        source: &str,
        destination: &str,
    ) -> Result<RouteQuery, MapError> {
        self.notice = None;
        match validate_selection(source, destination) {
            Ok((source, destination)) => Ok(RouteQuery { mode, source, destination }),
            Err(e) => {
                let missing = source.trim().is_empty() || destination.trim().is_empty();
                self.notice = Some(
                    if missing { MISSING_SELECTION_NOTICE } else { INVALID_SEARCH_NOTICE }.to_string(),
                );
                Err(e)
            }
        }
    }

    /// Apply the service's answer to a route request
    ///
    /// # Errors
    ///
    /// Passes the request error through after reverting to the map-only view
    pub fn complete_route(
        &mut self,
        query: &RouteQuery,
        result: Result<RoutePayload, MapError>,
    ) -> Result<(), MapError> {
        match result {
            Ok(payload) => {
                self.summary = Some(RouteSummary::from_payload(
                    query.mode,
                    &query.source,
                    &query.destination,
                    &payload,
                ));
                self.current_path = payload.path;
                self.view = ViewState::Result;
                self.awaiting_route = false;
                Ok(())
            }
            Err(e) => {
                self.clear_route();
                self.view = ViewState::MapOnly;
                self.notice = Some(match &e {
                    MapError::Service(message) => message.clone(),
                    _ => query.mode.failure_message().to_string(),
                });
                Err(e)
            }
        }
    }

    /// Keep the outcome of the latest render pass
    pub fn install_context(&mut self, context: RenderContext) {
        self.context = Some(context);
    }

    pub fn report_load_failure(&mut self) {
        self.notice = Some(MAP_LOAD_NOTICE.to_string());
    }

    fn clear_route(&mut self) {
        self.summary = None;
        self.current_path.clear();
    }
}
