//! Site configuration management.

use std::{
    collections::BTreeSet,
    fmt,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    content::SiteMetadata,
    error::{CoreError, Result},
};

/// Project titles shown on the homepage when no override is configured.
pub const DEFAULT_FEATURED_TITLES: [&str; 5] = [
    "fashion nova",
    "the ridge wallet",
    "stikwood",
    "alleyoop",
    "the detox market",
];

/// Main configuration structure for Folio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Content source settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Homepage project selection.
    #[serde(default)]
    pub featured: FeaturedConfig,

    /// Contact and outbound link settings.
    #[serde(default)]
    pub contact: ContactConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Site description for meta tags.
    #[serde(default)]
    pub description: String,

    /// Site author, used as the Twitter creator.
    #[serde(default)]
    pub author: String,

    /// Base URL for the site (e.g., "https://example.com").
    #[serde(default)]
    pub base_url: Option<String>,

    /// Document language code.
    #[serde(default = "default_language")]
    pub language: String,
}

/// Where content comes from.
#[derive(Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Prismic repository name.
    #[serde(default)]
    pub repository: Option<String>,

    /// Explicit API base URL, overriding the one derived from `repository`.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Access token for private repositories.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// JSON snapshot to read instead of querying the API.
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
}

impl fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceConfig")
            .field("repository", &self.repository)
            .field("endpoint", &self.endpoint)
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .field("snapshot", &self.snapshot)
            .finish()
    }
}

impl SourceConfig {
    /// API base URL, e.g. `https://my-repo.cdn.prismic.io/api/v2`.
    #[must_use]
    pub fn api_endpoint(&self) -> Option<String> {
        if let Some(endpoint) = &self.endpoint {
            return Some(endpoint.trim_end_matches('/').to_string());
        }
        self.repository
            .as_ref()
            .map(|repo| format!("https://{repo}.cdn.prismic.io/api/v2"))
    }
}

/// What to do with documents missing fields the homepage dereferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Abort the build with a malformed-document error.
    #[default]
    Fail,
    /// Skip the offending record and keep going.
    Skip,
}

/// Homepage project selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturedConfig {
    /// Project titles eligible for the homepage (case-insensitive).
    #[serde(default = "default_featured_titles")]
    pub titles: Vec<String>,

    #[serde(default)]
    pub malformed: MalformedPolicy,
}

/// Contact and outbound link settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Address behind the "Email me" button.
    #[serde(default = "default_email")]
    pub email: String,

    /// Site-relative path of the downloadable resume.
    #[serde(default = "default_resume")]
    pub resume: String,

    /// Path prefix of project detail pages.
    #[serde(default = "default_work_path")]
    pub work_path: String,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Output directory for generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Static files copied verbatim into the output.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

// Default value functions
fn default_language() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_featured_titles() -> Vec<String> {
    DEFAULT_FEATURED_TITLES.iter().map(|t| t.to_string()).collect()
}

fn default_email() -> String {
    "webdevpchoi@gmail.com".to_string()
}

fn default_resume() -> String {
    "/Phillip-Choi-Resume.pdf".to_string()
}

fn default_work_path() -> String {
    "/work".to_string()
}

fn default_output_dir() -> String {
    "public".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            repository: None,
            endpoint: None,
            access_token: None,
            timeout_secs: default_timeout_secs(),
            snapshot: None,
        }
    }
}

impl Default for FeaturedConfig {
    fn default() -> Self {
        Self {
            titles: default_featured_titles(),
            malformed: MalformedPolicy::default(),
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            email: default_email(),
            resume: default_resume(),
            work_path: default_work_path(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            static_dir: default_static_dir(),
        }
    }
}

/// Case-insensitive set of accepted project titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    titles: BTreeSet<String>,
}

impl AllowList {
    /// Build an allow-list; entries are stored lower-cased.
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            titles: titles
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Whether `title` is accepted, ignoring case.
    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.titles.contains(&title.to_lowercase())
    }

    /// Number of accepted titles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Accepted titles in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.titles.iter().map(String::as_str)
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(DEFAULT_FEATURED_TITLES)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration layered with `FOLIO__*` environment variables.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let config = Self::read_with_env(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load_with_env`], but leaves validation to the caller.
    ///
    /// Used when command-line overrides still have to be applied.
    pub fn read_with_env(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.source.repository.is_none()
            && self.source.endpoint.is_none()
            && self.source.snapshot.is_none()
        {
            return Err(CoreError::config(
                "one of source.repository, source.endpoint or source.snapshot must be set",
            ));
        }

        if self.source.timeout_secs == 0 {
            return Err(CoreError::config("source.timeout_secs must be positive"));
        }

        if self.featured.titles.is_empty() {
            tracing::warn!("featured.titles is empty, the work section will be empty");
        }

        if !self.contact.resume.starts_with('/') {
            tracing::warn!(resume = %self.contact.resume, "contact.resume should be site-relative");
        }

        Ok(())
    }

    /// Site metadata as consumed by page assembly.
    #[must_use]
    pub fn site_metadata(&self) -> SiteMetadata {
        SiteMetadata {
            title: self.site.title.clone(),
            description: self.site.description.clone(),
            author: self.site.author.clone(),
        }
    }

    /// The configured featured-project allow-list.
    #[must_use]
    pub fn allow_list(&self) -> AllowList {
        AllowList::new(&self.featured.titles)
    }

    /// Absolute URL for a site path, when a base URL is configured.
    #[must_use]
    pub fn url_for(&self, path: &str) -> Option<String> {
        self.site.base_url.as_ref().map(|base| {
            let base = base.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            format!("{base}/{path}")
        })
    }
}
