//! Loader configuration.
//!
//! A [`LoaderConfig`] is built once (normally from the command line) and handed to each
//! component that needs it.

use std::time::Duration;

use crate::error::{LoaderError, LoaderResult};

/// Number of documents per update request.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Connect/read timeout applied to every HTTP request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Target service and batching settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Host of the search service.
    pub host: String,
    /// Port of the search service.
    pub port: u16,
    /// Collection documents are written to.
    pub collection: String,
    /// Documents per update request.
    pub batch_size: usize,
    /// HTTP timeout.
    pub timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8888,
            collection: "citibike".to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LoaderConfig {
    /// Check the settings that would otherwise fail late.
    pub fn validate(&self) -> LoaderResult<()> {
        if self.batch_size == 0 {
            return Err(LoaderError::InvalidConfig {
                message: "batch_size must be > 0".to_string(),
            });
        }
        if self.host.trim().is_empty() {
            return Err(LoaderError::InvalidConfig {
                message: "host must not be empty".to_string(),
            });
        }
        if self.collection.trim().is_empty() || self.collection.contains('/') {
            return Err(LoaderError::InvalidConfig {
                message: format!("invalid collection name '{}'", self.collection),
            });
        }
        Ok(())
    }

    /// `http://{host}:{port}`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// `{base}/solr/{collection}`
    pub fn solr_url(&self) -> String {
        format!("{}/solr/{}", self.base_url(), self.collection)
    }

    /// `{base}/api`
    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url())
    }

    /// `{base}/api/collections/{collection}`
    pub fn collection_url(&self) -> String {
        format!("{}/collections/{}", self.api_url(), self.collection)
    }

    /// `{base}/api/collections/{collection}/fields`
    pub fn fields_url(&self) -> String {
        format!("{}/fields", self.collection_url())
    }
}
