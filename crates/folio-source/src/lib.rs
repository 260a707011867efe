//! Folio Content Source
//!
//! Fetches the homepage document graph from a headless content backend.
//!
//! # Modules
//!
//! - [`query`] - The fixed content query and its response shape
//! - [`prismic`] - HTTP client for the Prismic GraphQL API
//! - [`snapshot`] - Offline source reading a JSON snapshot
//! - [`error`] - Fetch errors

pub mod error;
pub mod prismic;
pub mod query;
pub mod snapshot;

use async_trait::async_trait;
use folio_core::{Config, ContentGraph};

pub use error::{Result, SourceError};
pub use prismic::PrismicSource;
pub use query::{QUERY, QueryResponse};
pub use snapshot::SnapshotSource;

/// A place the document graph can be fetched from.
///
/// A fetch is one logical round trip; implementations never retry.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Human readable description of the source, for logs.
    fn describe(&self) -> String;

    /// Fetch a fresh snapshot of the document graph.
    async fn fetch(&self) -> Result<ContentGraph>;
}

/// Pick the source named by the configuration.
///
/// A configured snapshot wins over the HTTP API.
pub fn source_from_config(config: &Config) -> Result<Box<dyn ContentSource>> {
    let site = config.site_metadata();

    if let Some(path) = &config.source.snapshot {
        return Ok(Box::new(SnapshotSource::new(path, site)));
    }

    let endpoint = config
        .source
        .api_endpoint()
        .ok_or(SourceError::NotConfigured)?;

    let mut source = PrismicSource::new(endpoint, site)
        .with_timeout(std::time::Duration::from_secs(config.source.timeout_secs));
    if let Some(token) = &config.source.access_token {
        source = source.with_access_token(token);
    }
    Ok(Box::new(source))
}
