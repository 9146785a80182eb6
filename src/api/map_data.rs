use super::fetch_text;
use crate::constants::CONNECTIONS_CACHE_KEY;
use crate::error::MapError;
use crate::logging::{log, log_error};
use crate::storage::SessionStore;

/// Provider of the two delimited-text sources the map is built from
#[allow(async_fn_in_trait)]
pub trait MapDataSource {
    /// `name, x, y, color` rows
    async fn station_records(&self) -> Result<String, MapError>;

    /// `stationA, stationB, color, distance` rows
    async fn connection_records(&self) -> Result<String, MapError>;
}

/// Fetches both sources over HTTP
#[derive(Debug, Clone)]
pub struct HttpMapData {
    client: reqwest::Client,
    coordinates_url: String,
    connections_url: String,
}

impl HttpMapData {
    #[must_use]
    pub fn new(coordinates_url: impl Into<String>, connections_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            coordinates_url: coordinates_url.into(),
            connections_url: connections_url.into(),
        }
    }
}

impl MapDataSource for HttpMapData {
    async fn station_records(&self) -> Result<String, MapError> {
        fetch_text(&self.client, &self.coordinates_url).await
    }

    async fn connection_records(&self) -> Result<String, MapError> {
        fetch_text(&self.client, &self.connections_url).await
    }
}

/// Keeps the connection source in a session store so highlight redraws do not
/// fetch it again. Station records are always read from the inner source.
#[derive(Debug)]
pub struct CachedMapData<D, K> {
    inner: D,
    store: K,
}

impl<D: MapDataSource, K: SessionStore> CachedMapData<D, K> {
    pub fn new(inner: D, store: K) -> Self {
        Self { inner, store }
    }

    pub fn store(&self) -> &K {
        &self.store
    }
}

impl<D: MapDataSource, K: SessionStore> MapDataSource for CachedMapData<D, K> {
    async fn station_records(&self) -> Result<String, MapError> {
        self.inner.station_records().await
    }

    async fn connection_records(&self) -> Result<String, MapError> {
        if let Some(cached) = self.store.get_item(CONNECTIONS_CACHE_KEY) {
            return Ok(cached);
        }

        log!("Connection cache miss, fetching");
        let text = self.inner.connection_records().await?;
        if let Err(e) = self.store.set_item(CONNECTIONS_CACHE_KEY, &text) {
            log_error!("{}", e);
        }
        Ok(text)
    }
}
