//! Boundary Sources
//!
//! Where the country outlines come from. The dataset is fetched afresh on
//! every render; nothing is cached between uploads.

use super::boundary::{parse_feature_collection, BoundaryRecord};
use super::error::{BoundaryError, BoundaryResult};
use crate::config::BoundaryConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Provider of the world boundary dataset
#[async_trait]
pub trait BoundarySource: Send + Sync {
    /// Human-readable location, used in logs and health output
    fn describe(&self) -> String;

    /// Retrieve and parse the full dataset
    async fn fetch(&self) -> BoundaryResult<Vec<BoundaryRecord>>;
}

/// Remote GeoJSON over HTTP(S)
pub struct HttpBoundarySource {
    client: Client,
    url: String,
    name_property: String,
}

impl HttpBoundarySource {
    pub fn new(
        url: impl Into<String>,
        name_property: impl Into<String>,
        timeout: Duration,
    ) -> BoundaryResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
            name_property: name_property.into(),
        })
    }
}

#[async_trait]
impl BoundarySource for HttpBoundarySource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> BoundaryResult<Vec<BoundaryRecord>> {
        tracing::debug!(url = %self.url, "Fetching boundary dataset");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BoundaryError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let text = response.text().await?;
        parse_feature_collection(&text, &self.name_property)
    }
}

/// GeoJSON file on local disk
pub struct FileBoundarySource {
    path: PathBuf,
    name_property: String,
}

impl FileBoundarySource {
    pub fn new(path: impl Into<PathBuf>, name_property: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name_property: name_property.into(),
        }
    }
}

#[async_trait]
impl BoundarySource for FileBoundarySource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> BoundaryResult<Vec<BoundaryRecord>> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        parse_feature_collection(&text, &self.name_property)
    }
}

/// GeoJSON text held in memory
pub struct StaticBoundarySource {
    geojson: String,
    name_property: String,
}

impl StaticBoundarySource {
    pub fn new(geojson: impl Into<String>) -> Self {
        Self {
            geojson: geojson.into(),
            name_property: "name".to_string(),
        }
    }

    pub fn with_name_property(mut self, name_property: impl Into<String>) -> Self {
        self.name_property = name_property.into();
        self
    }
}

#[async_trait]
impl BoundarySource for StaticBoundarySource {
    fn describe(&self) -> String {
        "in-memory".to_string()
    }

    async fn fetch(&self) -> BoundaryResult<Vec<BoundaryRecord>> {
        parse_feature_collection(&self.geojson, &self.name_property)
    }
}

/// Build the configured source: `http://` and `https://` URLs go over the
/// network, anything else is read as a file path (`file://` prefix allowed).
pub fn source_from_config(config: &BoundaryConfig) -> BoundaryResult<Arc<dyn BoundarySource>> {
    let url = config.url.trim();

    if url.starts_with("http://") || url.starts_with("https://") {
        let source = HttpBoundarySource::new(
            url,
            config.name_property.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Arc::new(source))
    } else {
        let path = url.strip_prefix("file://").unwrap_or(url);
        Ok(Arc::new(FileBoundarySource::new(
            path,
            config.name_property.clone(),
        )))
    }
}
