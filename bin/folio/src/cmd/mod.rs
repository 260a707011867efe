//! Command implementations.

pub mod build;
pub mod check;
pub mod serve;

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::{Config, ContentGraph};
use folio_source::source_from_config;

/// A loaded configuration plus the directory its relative paths resolve against.
#[derive(Debug, Clone)]
pub struct Site {
    pub config: Config,
    pub root: PathBuf,
}

impl Site {
    /// Load `config_path`, layering `FOLIO__*` environment overrides.
    ///
    /// A `snapshot` given on the command line replaces `source.snapshot` and is
    /// taken relative to the working directory.
    pub fn load(config_path: &Path, snapshot: Option<&Path>) -> Result<Self> {
        let mut config = Config::read_with_env(config_path).wrap_err_with(|| {
            format!("Failed to load configuration from {}", config_path.display())
        })?;

        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        config.source.snapshot = match snapshot {
            Some(path) => Some(path.to_path_buf()),
            None => config.source.snapshot.take().map(|p| root.join(p)),
        };
        config
            .validate()
            .wrap_err_with(|| format!("Invalid configuration in {}", config_path.display()))?;

        tracing::debug!(?config, root = %root.display(), "loaded configuration");
        Ok(Self { config, root })
    }

    /// Output directory from the configuration.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.config.build.output_dir)
    }

    /// Static directory from the configuration.
    #[must_use]
    pub fn static_dir(&self) -> PathBuf {
        self.root.join(&self.config.build.static_dir)
    }

    /// Fetch the content graph from the configured source.
    pub async fn fetch(&self) -> Result<ContentGraph> {
        let source = source_from_config(&self.config).wrap_err("No content source configured")?;
        tracing::info!(source = %source.describe(), "fetching content");

        source
            .fetch()
            .await
            .wrap_err_with(|| format!("Failed to fetch content from {}", source.describe()))
    }
}
