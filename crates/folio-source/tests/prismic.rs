//! Integration tests for the Prismic client against an in-process API.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode},
    routing::get,
};
use folio_core::SiteMetadata;
use folio_source::{ContentSource, PrismicSource, SourceError};
use serde_json::json;

const GRAPHQL_FIXTURE: &str = include_str!("fixtures/graphql.json");

fn site() -> SiteMetadata {
    SiteMetadata {
        title: "Phillip Choi".to_string(),
        description: "Front-end developer".to_string(),
        author: "@pchoi".to_string(),
    }
}

/// Serve `router` on an ephemeral port and return its API descriptor URL.
async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api/v2")
}

async fn descriptor() -> Json<serde_json::Value> {
    Json(json!({
        "refs": [
            {"id": "preview", "ref": "preview-1", "label": "Preview", "isMasterRef": false},
            {"id": "master", "ref": "master-1", "label": "Master", "isMasterRef": true}
        ]
    }))
}

async fn graphql(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    let reference = headers.get("prismic-ref").and_then(|v| v.to_str().ok());
    if reference != Some("master-1") {
        return (StatusCode::BAD_REQUEST, "missing ref".to_string());
    }
    let query_ok = params
        .get("query")
        .is_some_and(|q| q.contains("allHomepages") && q.contains("allProjects"));
    if !query_ok {
        return (StatusCode::BAD_REQUEST, "bad query".to_string());
    }
    (StatusCode::OK, GRAPHQL_FIXTURE.to_string())
}

#[tokio::test]
async fn test_fetch_resolves_master_ref_and_decodes() {
    let router = Router::new()
        .route("/api/v2", get(descriptor))
        .route("/graphql", get(graphql));
    let endpoint = spawn(router).await;

    let graph = PrismicSource::new(endpoint, site()).fetch().await.unwrap();

    assert_eq!(graph.homepages.len(), 1);
    let home = &graph.homepages[0];
    assert_eq!(home.hero_title.first_text(), Some("Hi, I'm Phil."));
    assert_eq!(home.about_links[0].url(), Some("https://github.com/pchoi"));

    let projects = graph.projects.expect("projects present");
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].uid(), "fashion-nova");
    assert!(projects[1].project_link.is_none());

    assert_eq!(graph.site, site());
}

#[tokio::test]
async fn test_fetch_sends_access_token() {
    let router = Router::new()
        .route(
            "/api/v2",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                if params.get("access_token").map(String::as_str) != Some("secret") {
                    return Err(StatusCode::UNAUTHORIZED);
                }
                Ok(descriptor().await)
            }),
        )
        .route(
            "/graphql",
            get(|headers: HeaderMap| async move {
                let auth = headers.get("authorization").and_then(|v| v.to_str().ok());
                if auth != Some("Token secret") {
                    return (StatusCode::UNAUTHORIZED, String::new());
                }
                (StatusCode::OK, GRAPHQL_FIXTURE.to_string())
            }),
        );
    let endpoint = spawn(router).await;

    let graph = PrismicSource::new(endpoint, site())
        .with_access_token("secret")
        .fetch()
        .await
        .unwrap();
    assert_eq!(graph.homepages.len(), 1);
}

#[tokio::test]
async fn test_graphql_errors_fail_the_fetch() {
    let router = Router::new().route("/api/v2", get(descriptor)).route(
        "/graphql",
        get(|| async {
            Json(json!({
                "data": null,
                "errors": [{"message": "Field 'hero_title' doesn't exist on type 'Homepage'"}]
            }))
        }),
    );
    let endpoint = spawn(router).await;

    let err = PrismicSource::new(endpoint, site())
        .fetch()
        .await
        .unwrap_err();
    match err {
        SourceError::GraphQl(messages) => {
            assert_eq!(messages.len(), 1);
            assert!(messages[0].contains("hero_title"));
        }
        other => panic!("expected GraphQl error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_error_status_fails_the_fetch() {
    let router = Router::new().route(
        "/api/v2",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    );
    let endpoint = spawn(router).await;

    let err = PrismicSource::new(endpoint, site())
        .fetch()
        .await
        .unwrap_err();
    match err {
        SourceError::Status { status, body, .. } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_master_ref() {
    let router = Router::new().route("/api/v2", get(|| async { Json(json!({"refs": []})) }));
    let endpoint = spawn(router).await;

    let err = PrismicSource::new(endpoint, site())
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::MissingMasterRef(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = PrismicSource::new(format!("http://{addr}/api/v2"), site())
        .with_timeout(std::time::Duration::from_secs(2))
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::Http { .. }));
}
