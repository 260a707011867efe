//! Build orchestration.
//!
//! Coordinates the full site build: select, assemble, render, clean, copy, write.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};

use folio_core::{Config, ContentGraph};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    assembly::{AssemblyError, assemble_page_model, select_featured, select_homepage},
    assets::{AssetError, AssetProcessor},
    clock::{Clock, SystemClock},
    html::{HtmlError, HtmlGenerator},
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed content.
    #[error("assembly error: {0}")]
    Assembly(#[from] AssemblyError),

    /// HTML generation error.
    #[error("HTML error: {0}")]
    Html(#[from] HtmlError),

    /// Asset error.
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of pages generated.
    pub pages: usize,

    /// Number of projects shown on the homepage.
    pub featured: usize,

    /// Number of assets copied.
    pub assets: usize,

    /// Whether the homepage was written empty because content was absent.
    pub blank: bool,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    output_dir: PathBuf,
    static_dir: Option<PathBuf>,
    clock: Arc<dyn Clock>,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(config: Config, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            output_dir: output_dir.into(),
            static_dir: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// Set the static assets directory.
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Set the time source used for the footer year.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Execute the full build for an already fetched content graph.
    pub fn build(&self, content: &ContentGraph) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(output = %self.output_dir.display(), "starting build");

        // 1. Render the homepage; a failure leaves the previous output intact
        let generator = HtmlGenerator::new(&self.config).with_clock(Arc::clone(&self.clock));
        let output_path = generator.output_path(&self.output_dir);

        let html = match self.render_homepage(&generator, content)? {
            Some((html, featured)) => {
                stats.featured = featured;
                html
            }
            None => {
                warn!(
                    homepages = content.homepages.len(),
                    projects_present = content.projects.is_some(),
                    "homepage or project collection absent, writing empty page"
                );
                stats.blank = true;
                String::new()
            }
        };

        // 2. Clean output directory
        self.clean_output()?;

        // 3. Copy static assets; the generated page is written afterwards
        if let Some(ref static_dir) = self.static_dir {
            stats.assets = AssetProcessor::new()
                .process(static_dir, &self.output_dir)?
                .len();
        }

        // 4. Write the page
        fs::write(&output_path, html)?;
        debug!(path = %output_path.display(), "wrote page");
        stats.pages = 1;

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            pages = stats.pages,
            featured = stats.featured,
            assets = stats.assets,
            blank = stats.blank,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Render the homepage, or `None` when the page has nothing to show.
    fn render_homepage(
        &self,
        generator: &HtmlGenerator,
        content: &ContentGraph,
    ) -> Result<Option<(String, usize)>> {
        let policy = self.config.featured.malformed;
        let allow_list = self.config.allow_list();

        let homepage = select_homepage(&content.homepages);
        let featured = content
            .projects
            .as_deref()
            .map(|projects| select_featured(projects, &allow_list, policy))
            .transpose()?;

        info!(
            featured = featured.as_ref().map_or(0, Vec::len),
            "selected featured projects"
        );

        let model = assemble_page_model(
            homepage,
            featured.as_deref(),
            &content.site,
            &self.config.contact,
            policy,
        )?;

        match model {
            Some(model) => {
                let count = model.work.cards.len();
                Ok(Some((generator.render_home(&model)?, count)))
            }
            None => Ok(None),
        }
    }

    /// Clean the output directory.
    fn clean_output(&self) -> Result<()> {
        if self.output_dir.exists() {
            debug!(dir = %self.output_dir.display(), "cleaning output directory");
            fs::remove_dir_all(&self.output_dir)?;
        }
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }
}
