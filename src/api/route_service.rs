use serde::{Deserialize, Serialize};

use super::fetch_text;
use crate::error::MapError;

/// Which route the external service should compute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMode {
    ShortestPath,
    MinimumInterchange,
}

impl RouteMode {
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::ShortestPath => "shortest_path",
            Self::MinimumInterchange => "min_exchanges",
        }
    }

    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::ShortestPath => "Shortest Path Route",
            Self::MinimumInterchange => "Minimum Interchange Route",
        }
    }

    /// Notice shown when the service cannot be reached
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::ShortestPath => "Failed to fetch shortest path.",
            Self::MinimumInterchange => "Failed to fetch minimum interchange path.",
        }
    }
}

/// A successful route computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePayload {
    pub path: Vec<String>,
    pub total_distance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_line_changes: Option<u32>,
    /// Line color of every segment, in path order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RouteReply {
    Failure { error: String },
    Success(RoutePayload),
}

/// Decode the service's JSON body
///
/// # Errors
///
/// Returns `MapError::Service` for an `{error}` reply and `MapError::Decode` for
/// anything that is neither an error nor a route
pub fn parse_route_reply(body: &str) -> Result<RoutePayload, MapError> {
    match serde_json::from_str(body).map_err(|e| MapError::Decode(e.to_string()))? {
        RouteReply::Failure { error } => Err(MapError::Service(error)),
        RouteReply::Success(payload) => Ok(payload),
    }
}

/// The path-computation collaborator
#[allow(async_fn_in_trait)]
pub trait RouteService {
    async fn find_route(
        &self,
        mode: RouteMode,
        source: &str,
        destination: &str,
    ) -> Result<RoutePayload, MapError>;
}

/// Route service reached over HTTP GET
#[derive(Debug, Clone)]
pub struct HttpRouteService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRouteService {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Full request URL, station names are percent-encoded
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not a valid absolute URL
    pub fn request_url(&self, mode: RouteMode, source: &str, destination: &str) -> Result<String, MapError> {
        let endpoint = format!("{}/{}", self.base_url.trim_end_matches('/'), mode.endpoint());
        let request = self
            .client
            .get(endpoint)
            .query(&[("source", source), ("destination", destination)])
            .build()?;
        Ok(request.url().to_string())
    }
}

impl RouteService for HttpRouteService {
    async fn find_route(
        &self,
        mode: RouteMode,
        source: &str,
        destination: &str,
    ) -> Result<RoutePayload, MapError> {
        let url = self.request_url(mode, source, destination)?;
        let body = fetch_text(&self.client, &url).await?;
        parse_route_reply(&body)
    }
}
