pub mod map_data;
pub mod route_service;

pub use map_data::{CachedMapData, HttpMapData, MapDataSource};
pub use route_service::{parse_route_reply, HttpRouteService, RouteMode, RoutePayload, RouteService};

use crate::error::MapError;

/// Resolve a possibly relative URL against the page origin
#[must_use]
pub fn resolve_url(origin: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("{}/{}", origin.trim_end_matches('/'), url.trim_start_matches('/'))
    }
}

/// Origin of the current page, if running in a browser window
#[must_use]
pub fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

/// GET a URL and return its body as text
///
/// # Errors
///
/// Returns an error if the request fails or the status is not a success
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, MapError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(MapError::Http {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.text().await?)
}
