//! Folio CLI Library
//!
//! Command implementations for the Folio portfolio generator, exposed as a
//! library so they can be driven from integration tests.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, serve, check)
//! - [`server`] - Static file server for the generated site
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! # async fn run() -> color_eyre::eyre::Result<()> {
//! folio::cmd::build::run(Path::new("folio.toml"), None, None).await?;
//! # Ok(())
//! # }
//! ```

pub mod cmd;
pub mod server;

// Re-export core types for convenience
pub use folio_core::{Config, ContentGraph};
pub use folio_generator::{BuildStats, Builder};
pub use folio_source::{ContentSource, source_from_config};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
