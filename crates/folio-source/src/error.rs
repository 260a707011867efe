//! Content fetch errors.

use folio_core::CoreError;
use thiserror::Error;

/// Result type for content fetching.
pub type Result<T> = std::result::Result<T, SourceError>;

/// The content source was unreachable or rejected the query.
///
/// None of these are recovered from locally; they fail the build.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport failure (DNS, connect, timeout).
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status.
    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The API descriptor lists no master ref.
    #[error("no master ref advertised by {0}")]
    MissingMasterRef(String),

    /// The GraphQL endpoint reported errors.
    #[error("query rejected: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The response carried neither data nor errors.
    #[error("query returned no data")]
    EmptyResponse,

    /// The body was not the expected JSON shape.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Snapshot reading failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// No repository, endpoint or snapshot configured.
    #[error("no content source configured")]
    NotConfigured,
}
