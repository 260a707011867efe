//! Static asset copying.
//!
//! Files under the static directory (resume PDF, icons, fonts) are copied
//! into the output tree unchanged, preserving relative paths.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

/// Asset processing errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid asset path.
    #[error("invalid asset path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Site paths of the copied assets, keyed by their source-relative path.
#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    assets: BTreeMap<String, PathBuf>,
}

impl AssetManifest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a copied asset.
    pub fn add(&mut self, site_path: impl Into<String>, dest: impl Into<PathBuf>) {
        self.assets.insert(site_path.into(), dest.into());
    }

    /// Whether an asset is served at `site_path` (e.g. `/resume.pdf`).
    #[must_use]
    pub fn contains(&self, site_path: &str) -> bool {
        self.assets.contains_key(site_path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Copies a static directory into the output directory.
#[derive(Debug, Default)]
pub struct AssetProcessor;

impl AssetProcessor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Copy every non-hidden file from `source_dir` into `dest_dir`.
    ///
    /// A missing source directory yields an empty manifest.
    pub fn process(&self, source_dir: &Path, dest_dir: &Path) -> Result<AssetManifest> {
        info!(
            source = %source_dir.display(),
            dest = %dest_dir.display(),
            "processing assets"
        );

        let mut manifest = AssetManifest::new();

        if !source_dir.exists() {
            debug!("static directory does not exist, skipping");
            return Ok(manifest);
        }

        self.process_dir(source_dir, source_dir, dest_dir, &mut manifest)?;

        info!(count = manifest.len(), "assets processed");
        Ok(manifest)
    }

    fn process_dir(
        &self,
        base_dir: &Path,
        current_dir: &Path,
        dest_base: &Path,
        manifest: &mut AssetManifest,
    ) -> Result<()> {
        for entry in fs::read_dir(current_dir)? {
            let path = entry?.path();

            // Skip hidden files/directories
            if path
                .file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with('.'))
            {
                continue;
            }

            if path.is_dir() {
                self.process_dir(base_dir, &path, dest_base, manifest)?;
            } else if path.is_file() {
                let relative = path
                    .strip_prefix(base_dir)
                    .map_err(|_| AssetError::InvalidPath(path.clone()))?;
                let dest = dest_base.join(relative);

                Self::copy_file(&path, &dest)?;

                let site_path = format!("/{}", relative.display()).replace('\\', "/");
                debug!(src = %path.display(), dest = %dest.display(), "copied asset");
                manifest.add(site_path, dest);
            }
        }

        Ok(())
    }

    /// Copy a single file, creating parent directories as needed.
    pub fn copy_file(source: &Path, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source, dest)?;
        Ok(())
    }
}
