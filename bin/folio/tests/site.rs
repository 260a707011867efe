//! End-to-end tests for the sample site under `site/`.

use std::{fs, path::Path};

use folio::cmd::{Site, build::build_site};
use tempfile::TempDir;

const SAMPLE_CONFIG: &str = "../../site/folio.toml";

fn sample_site() -> Option<Site> {
    let config_path = Path::new(SAMPLE_CONFIG);
    if !config_path.exists() {
        // Skip if running from different working directory
        return None;
    }
    Some(Site::load(config_path, None).expect("sample config should load"))
}

#[test]
fn test_sample_site_config_loads() {
    let Some(site) = sample_site() else {
        return;
    };

    assert_eq!(site.config.site.title, "Phillip Choi");
    assert_eq!(site.config.allow_list().len(), 5);
    assert!(
        site.config
            .source
            .snapshot
            .as_deref()
            .is_some_and(|p| p.ends_with("content.json"))
    );
}

#[tokio::test]
async fn test_sample_site_builds() {
    let Some(site) = sample_site() else {
        return;
    };
    let output = TempDir::new().unwrap();

    let stats = build_site(&site, Some(output.path())).await.unwrap();

    assert_eq!(stats.pages, 1);
    assert_eq!(stats.featured, 2);
    assert_eq!(stats.assets, 2);
    assert!(!stats.blank);

    let html = fs::read_to_string(output.path().join("index.html")).unwrap();

    // Featured projects in source order, unlisted ones left out.
    let nova = html.find(r#"href="/work/fashion-nova""#).unwrap();
    let stikwood = html.find(r#"href="/work/stikwood""#).unwrap();
    assert!(nova < stikwood);
    assert!(!html.contains("weather-widget"));

    assert!(html.contains(r#"<meta name="twitter:creator" content="@webdevpchoi">"#));
    assert!(html.contains(r#"<link rel="canonical" href="https://phillipchoi.dev/">"#));
    assert!(html.contains(r#"<strong>Front-end</strong> developer in Los Angeles."#));
    assert!(html.contains(r#"alt="GitHub Icon""#));
    assert!(html.contains("mailto:webdevpchoi@gmail.com"));
    assert!(output.path().join("icons/github.svg").exists());
}

#[tokio::test]
async fn test_sample_site_served() {
    let Some(site) = sample_site() else {
        return;
    };
    let output = TempDir::new().unwrap();
    build_site(&site, Some(output.path())).await.unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = folio::server::create_router(output.path());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let response = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Clients I've worked with..."));

    let missing = reqwest::get(format!("http://{addr}/nope.html")).await.unwrap();
    assert_eq!(missing.status().as_u16(), 404);
}

#[tokio::test]
async fn test_snapshot_with_absent_projects_writes_blank_page() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("folio.toml"),
        "[site]\ntitle = \"Blank\"\n\n[source]\nsnapshot = \"content.json\"\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("content.json"),
        r#"{"prismic": {"allHomepages": {"edges": []}}}"#,
    )
    .unwrap();

    let site = Site::load(&dir.path().join("folio.toml"), None).unwrap();
    let stats = build_site(&site, None).await.unwrap();

    assert!(stats.blank);
    let html = fs::read_to_string(dir.path().join("public/index.html")).unwrap();
    assert!(html.is_empty());
}
