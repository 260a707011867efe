//! Build command - fetches content and generates the homepage

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use folio_generator::{BuildStats, Builder};

use super::Site;

/// Run the build command.
///
/// `output` overrides `build.output_dir`; `snapshot` overrides the content
/// source with a JSON file.
pub async fn run(
    config_path: &Path,
    output: Option<&Path>,
    snapshot: Option<&Path>,
) -> Result<BuildStats> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, ?snapshot, "Starting build");

    let site = Site::load(config_path, snapshot)?;
    let stats = build_site(&site, output).await?;

    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Pages:      {}", stats.pages);
    println!("  Featured:   {}", stats.featured);
    println!("  Assets:     {}", stats.assets);
    if stats.blank {
        println!("  ⚠ Homepage or projects missing, wrote an empty page");
    }
    println!();
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!(
        "  Output:     {}",
        output.map_or_else(|| site.output_dir(), Path::to_path_buf).display()
    );
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(stats)
}

/// Fetch content for `site` and write the homepage.
pub async fn build_site(site: &Site, output: Option<&Path>) -> Result<BuildStats> {
    let content = site.fetch().await?;

    let output_dir = output.map_or_else(|| site.output_dir(), Path::to_path_buf);
    let mut builder = Builder::new(site.config.clone(), &output_dir);

    let static_dir = site.static_dir();
    if static_dir.is_dir() {
        tracing::info!(dir = %static_dir.display(), "Found static directory, will copy to output");
        builder = builder.with_static_dir(static_dir);
    }

    builder.build(&content).wrap_err("Build failed")
}
