//! Check command - validate configuration and content

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use folio_core::{ContentGraph, MalformedPolicy};
use folio_generator::{assemble_page_model, select_featured, select_homepage};
use folio_source::source_from_config;

use super::Site;

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates the configuration; with `fetch`, also fetches content and checks
/// that it assembles into a homepage.
pub async fn run(config_path: &Path, strict: bool, fetch: bool) -> Result<()> {
    tracing::info!(?config_path, strict, fetch, "Checking configuration and content");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let site = match Site::load(config_path, None) {
        Ok(site) => {
            println!("  ✓ Configuration valid");
            Some(site)
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e:#}"));
            println!("  ✗ Configuration invalid: {e:#}");
            None
        }
    };

    if let Some(ref site) = site {
        println!("\nChecking configuration values...");
        check_config_values(site, &mut result);

        println!("\nChecking content source...");
        match source_from_config(&site.config) {
            Ok(source) => println!("  ✓ {}", source.describe()),
            Err(e) => {
                result.add_error(format!("Content source: {e}"));
                println!("  ✗ {e}");
            }
        }

        if fetch {
            println!("\nFetching content...");
            match site.fetch().await {
                Ok(content) => check_content(site, &content, &mut result),
                Err(e) => {
                    result.add_error(format!("{e:#}"));
                    println!("  ✗ Fetch failed");
                }
            }
        }
    }

    // Print summary
    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Check configuration values for common issues.
fn check_config_values(site: &Site, result: &mut ValidationResult) {
    let config = &site.config;

    match config.site.base_url.as_deref() {
        None | Some("") => result.add_warning("site.base_url is not set, no canonical link"),
        Some(url) if !url.starts_with("http") => {
            result.add_warning("site.base_url should start with http:// or https://");
        }
        Some(_) => {}
    }

    if config.site.description.is_empty() {
        result.add_warning("site.description is empty");
    }

    if config.site.author.is_empty() {
        result.add_warning("site.author is empty, twitter:creator will be blank");
    }

    if config.featured.titles.is_empty() {
        result.add_warning("featured.titles is empty, no projects will be shown");
    }

    if !config.contact.resume.starts_with('/') {
        result.add_warning("contact.resume should be a site-relative path");
    }

    let output = site.output_dir();
    if output.exists() && !output.is_dir() {
        result.add_error(format!(
            "Output path exists but is not a directory: {}",
            output.display()
        ));
    }

    let static_dir = site.static_dir();
    if !static_dir.is_dir() {
        result.add_warning(format!(
            "Static directory missing: {}",
            static_dir.display()
        ));
    } else {
        let resume = static_dir.join(config.contact.resume.trim_start_matches('/'));
        if !resume.exists() {
            result.add_warning(format!("Resume not found at {}", resume.display()));
        }
    }

    println!("  ✓ Configuration values checked");
}

/// Check that fetched content assembles into a non-empty homepage.
fn check_content(site: &Site, content: &ContentGraph, result: &mut ValidationResult) {
    let config = &site.config;

    println!("  ✓ {} homepage document(s)", content.homepages.len());
    if content.homepages.len() > 1 {
        result.add_warning("More than one homepage document, only the first is used");
    }

    let Some(projects) = content.projects.as_deref() else {
        result.add_warning("Project collection absent, homepage will be empty");
        return;
    };
    println!("  ✓ {} project document(s)", projects.len());

    // Strict pass first; under the skip policy its error is reported as a warning.
    let allow_list = config.allow_list();
    let featured = match select_featured(projects, &allow_list, MalformedPolicy::Fail) {
        Ok(featured) => featured,
        Err(e) if config.featured.malformed == MalformedPolicy::Skip => {
            result.add_warning(format!("{e} (skipped)"));
            match select_featured(projects, &allow_list, MalformedPolicy::Skip) {
                Ok(featured) => featured,
                Err(e) => {
                    result.add_error(e.to_string());
                    return;
                }
            }
        }
        Err(e) => {
            result.add_error(e.to_string());
            return;
        }
    };

    println!("  ✓ {} featured project(s)", featured.len());
    for title in allow_list.iter() {
        let matched = featured
            .iter()
            .any(|p| p.project_title.first_text().is_some_and(|t| t.to_lowercase() == title));
        if !matched {
            result.add_warning(format!("No project titled \"{title}\""));
        }
    }

    match assemble_page_model(
        select_homepage(&content.homepages),
        Some(featured.as_slice()),
        &content.site,
        &config.contact,
        config.featured.malformed,
    ) {
        Ok(Some(_)) => println!("  ✓ Homepage assembles"),
        Ok(None) => result.add_warning("No homepage document, homepage will be empty"),
        Err(e) => result.add_error(e.to_string()),
    }
}
