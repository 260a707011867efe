//! Serve command - builds once, then serves the output directory

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use tokio::net::TcpListener;

use super::{Site, build::build_site};
use crate::server::create_router;

/// Run the serve command.
pub async fn run(config_path: &Path, port: u16, snapshot: Option<&Path>) -> Result<()> {
    tracing::info!(?config_path, port, "Starting server");

    let site = Site::load(config_path, snapshot)?;
    let output_dir = site.output_dir();

    tracing::info!("Running initial build...");
    let stats = build_site(&site, None).await?;
    tracing::info!(?stats, "Initial build complete");

    let app = create_router(&output_dir);
    let addr = format!("127.0.0.1:{port}");

    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  Server running at http://{addr}");
    println!("  Serving {}", output_dir.display());
    println!("  Press Ctrl+C to stop");
    println!();

    axum::serve(listener, app).await.wrap_err("Server error")?;

    Ok(())
}
