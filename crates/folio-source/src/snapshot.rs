//! Offline content source.
//!
//! Reads a JSON file holding the full query response shape, site section
//! included. Useful for reproducible builds and tests.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use folio_core::{ContentGraph, CoreError, SiteMetadata};
use tracing::info;

use crate::{ContentSource, error::Result, query::QueryResponse};

/// Content source backed by a JSON snapshot on disk.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
    site: SiteMetadata,
}

impl SnapshotSource {
    /// Create a snapshot source; `site` fills in a missing site section.
    pub fn new(path: impl Into<PathBuf>, site: SiteMetadata) -> Self {
        Self {
            path: path.into(),
            site,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ContentSource for SnapshotSource {
    fn describe(&self) -> String {
        format!("snapshot {}", self.path.display())
    }

    async fn fetch(&self) -> Result<ContentGraph> {
        info!(path = %self.path.display(), "reading content snapshot");

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(CoreError::from)?;
        let response: QueryResponse = serde_json::from_str(&raw)
            .map_err(|e| CoreError::content(&self.path, e.to_string()))?;

        Ok(response.into_graph(self.site.clone()))
    }
}
