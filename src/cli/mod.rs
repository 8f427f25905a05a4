//! CLI command definitions and handlers

mod analyze;
mod init;
mod serve;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::pipeline::Analyzer;

/// pyreview - Python code review service
#[derive(Parser, Debug)]
#[command(name = "pyreview")]
#[command(
    version,
    about = "Score Python code: metrics, code smells, a quality classifier and suggestions",
    after_help = "\
Examples:
  pyreview serve                        Start the HTTP service on 0.0.0.0:8000
  pyreview serve --port 9000            Use another port
  pyreview analyze app.py               Print a report for one file
  cat app.py | pyreview analyze -       Analyze stdin
  pyreview analyze app.py --format json JSON output for scripting
  pyreview init                         Write an example pyreview.toml"
)]
pub struct Cli {
    /// Config file (default: ./pyreview.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP service
    Serve {
        /// Address to bind (overrides config and PYREVIEW_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config and PORT)
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },

    /// Analyze a single Python file, or stdin with "-"
    Analyze {
        /// File to analyze
        file: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Write an example pyreview.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn load_config(cli: &Cli) -> Result<Config> {
    Config::load(cli.config.as_deref()).context("Failed to load configuration")
}

fn build_analyzer(config: &Config) -> Result<Analyzer> {
    let analyzer = Analyzer::bootstrap()
        .context("Failed to train the quality classifier")?
        .with_thresholds(config.smells)
        .with_allowed_extensions(config.server.allowed_extensions.clone());
    info!("Analyzer ready");
    Ok(analyzer)
}

pub fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Serve { host, port } => {
            let mut config = load_config(&cli)?;
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            let analyzer = build_analyzer(&config)?;
            serve::run(&config, analyzer)
        }

        Commands::Analyze { file, format } => {
            let config = load_config(&cli)?;
            let analyzer = build_analyzer(&config)?;
            analyze::run(&analyzer, file, format)
        }

        Commands::Init { force } => init::run(*force),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["pyreview", "serve", "--port", "9000", "--host", "127.0.0.1"]);
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(9000));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_parse_analyze_with_globals() {
        let cli = Cli::parse_from([
            "pyreview",
            "analyze",
            "-",
            "--format",
            "json",
            "--log-level",
            "debug",
            "--config",
            "custom.toml",
        ]);
        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Commands::Analyze { file, format } => {
                assert_eq!(file, PathBuf::from("-"));
                assert_eq!(format, "json");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["pyreview", "analyze", "a.py", "--format", "xml"]).is_err());
    }
}
