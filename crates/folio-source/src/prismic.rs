//! Prismic GraphQL client.
//!
//! A fetch reads the repository's master ref from the REST API descriptor and
//! then runs [`QUERY`](crate::QUERY) against the GraphQL endpoint pinned to
//! that ref. Site metadata is not stored in Prismic and comes from
//! configuration.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use folio_core::{ContentGraph, SiteMetadata};
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    ContentSource,
    error::{Result, SourceError},
    query::{PrismicData, QUERY, QueryResponse, minify_query},
};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Content source backed by a Prismic repository.
#[derive(Clone)]
pub struct PrismicSource {
    /// REST API descriptor URL, e.g. `https://repo.cdn.prismic.io/api/v2`.
    endpoint: String,
    access_token: Option<String>,
    timeout: Duration,
    site: SiteMetadata,
}

impl fmt::Debug for PrismicSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrismicSource")
            .field("endpoint", &self.endpoint)
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .field("site", &self.site)
            .finish()
    }
}

/// Subset of the API descriptor we need.
#[derive(Debug, Deserialize)]
struct ApiDescriptor {
    #[serde(default)]
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,

    #[serde(default)]
    is_master_ref: bool,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<PrismicData>,

    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl PrismicSource {
    /// Create a source for the API descriptor at `endpoint`.
    pub fn new(endpoint: impl Into<String>, site: SiteMetadata) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            access_token: None,
            timeout: DEFAULT_TIMEOUT,
            site,
        }
    }

    /// Authenticate against a private repository.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// GraphQL endpoint living next to the API descriptor.
    #[must_use]
    pub fn graphql_url(&self) -> String {
        let base = self
            .endpoint
            .strip_suffix("/api/v2")
            .unwrap_or(&self.endpoint);
        format!("{base}/graphql")
    }

    fn client(&self) -> Result<Client> {
        Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(SourceError::Client)
    }

    /// Read the master ref from the API descriptor.
    async fn master_ref(&self, client: &Client) -> Result<String> {
        let mut request = client.get(&self.endpoint);
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token)]);
        }

        // The request URL carries the token as a query parameter.
        let response = request.send().await.map_err(|e| SourceError::Http {
            url: self.endpoint.clone(),
            source: e.without_url(),
        })?;
        let body = read_body(&self.endpoint, response).await?;
        let descriptor: ApiDescriptor = serde_json::from_str(&body)?;

        descriptor
            .refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference)
            .ok_or_else(|| SourceError::MissingMasterRef(self.endpoint.clone()))
    }

    /// Run the homepage query pinned to `reference`.
    async fn run_query(&self, client: &Client, reference: &str) -> Result<PrismicData> {
        let url = self.graphql_url();
        let query = minify_query(QUERY);

        let mut request = client
            .get(&url)
            .query(&[("query", query.as_str())])
            .header("Prismic-Ref", reference);
        if let Some(token) = &self.access_token {
            request = request.header("Authorization", format!("Token {token}"));
        }

        let response = request.send().await.map_err(|e| SourceError::Http {
            url: url.clone(),
            source: e,
        })?;
        let body = read_body(&url, response).await?;
        let parsed: GraphQlResponse = serde_json::from_str(&body)?;

        if let Some(errors) = parsed.errors.filter(|e| !e.is_empty()) {
            return Err(SourceError::GraphQl(
                errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        parsed.data.ok_or(SourceError::EmptyResponse)
    }
}

#[async_trait]
impl ContentSource for PrismicSource {
    fn describe(&self) -> String {
        format!("prismic {}", self.endpoint)
    }

    async fn fetch(&self) -> Result<ContentGraph> {
        info!(endpoint = %self.endpoint, "fetching content from prismic");

        let client = self.client()?;
        let reference = self.master_ref(&client).await?;
        debug!(%reference, "resolved master ref");

        let data = self.run_query(&client, &reference).await?;
        let graph = QueryResponse::from_prismic(data).into_graph(self.site.clone());

        info!(
            homepages = graph.homepages.len(),
            projects = graph.projects.as_ref().map_or(0, Vec::len),
            "content fetched"
        );
        Ok(graph)
    }
}

/// Read a response body, turning non-success statuses into errors.
async fn read_body(url: &str, response: Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await.map_err(|e| SourceError::Http {
        url: url.to_string(),
        source: e.without_url(),
    })?;

    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status,
            body,
        });
    }
    Ok(body)
}
