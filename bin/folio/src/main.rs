//! Folio CLI
//!
//! Builds and serves a portfolio homepage from headless CMS content.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for Folio.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Static portfolio homepage generator"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "folio.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Fetch content and build the homepage
    Build {
        /// Output directory (defaults to build.output_dir)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Read content from a JSON snapshot instead of the API
        #[arg(long)]
        snapshot: Option<std::path::PathBuf>,
    },
    /// Build, then serve the output directory
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
        /// Read content from a JSON snapshot instead of the API
        #[arg(long)]
        snapshot: Option<std::path::PathBuf>,
    },
    /// Validate configuration and, optionally, the fetched content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
        /// Fetch content and check it assembles into a homepage
        #[arg(long)]
        fetch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { output, snapshot } => {
            folio::cmd::build::run(&cli.config, output.as_deref(), snapshot.as_deref()).await?;
        }
        Commands::Serve { port, snapshot } => {
            folio::cmd::serve::run(&cli.config, port, snapshot.as_deref()).await?;
        }
        Commands::Check { strict, fetch } => {
            folio::cmd::check::run(&cli.config, strict, fetch).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_build_command_parsing() {
        let args = ["folio", "build", "--output", "dist"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.config, std::path::PathBuf::from("folio.toml"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Build { output, snapshot } => {
                assert_eq!(output, Some(std::path::PathBuf::from("dist")));
                assert!(snapshot.is_none());
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_with_snapshot() {
        let args = ["folio", "build", "--snapshot", "content.json"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Build { output, snapshot } => {
                assert!(output.is_none());
                assert_eq!(snapshot, Some(std::path::PathBuf::from("content.json")));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_serve_command_parsing() {
        let cli = Cli::parse_from(["folio", "serve"]);
        match cli.command {
            Commands::Serve { port, snapshot } => {
                assert_eq!(port, 3000);
                assert!(snapshot.is_none());
            }
            _ => panic!("Expected Serve command"),
        }

        let cli = Cli::parse_from(["folio", "serve", "--port", "8080"]);
        match cli.command {
            Commands::Serve { port, .. } => assert_eq!(port, 8080),
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_check_command_parsing() {
        let args = ["folio", "check", "--strict", "--fetch"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Check { strict, fetch } => {
                assert!(strict);
                assert!(fetch);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let args = ["folio", "-vvv", "build"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_custom_config_path() {
        let args = ["folio", "--config", "site/folio.toml", "build"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.config, std::path::PathBuf::from("site/folio.toml"));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["folio"]).is_err());
    }
}
