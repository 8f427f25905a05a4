//! Service configuration (pyreview.toml)
//!
//! Lookup order: the `--config` path, then `./pyreview.toml`, then built-in
//! defaults. `PORT` and `PYREVIEW_HOST` override the file.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//!
//! [smells]
//! max_function_lines = 50
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::detectors::SmellThresholds;
use crate::pipeline::default_extensions;

pub const CONFIG_FILE: &str = "pyreview.toml";

/// Commented template written by `pyreview init`
pub const EXAMPLE_CONFIG: &str = r#"# pyreview configuration

[server]
# Address and port to bind (PYREVIEW_HOST and PORT override these)
host = "0.0.0.0"
port = 8000

# Directory served under /static; index.html is the landing page
static_dir = "static"

# Largest accepted upload in bytes
max_upload_bytes = 5242880

# Accepted upload file extensions
allowed_extensions = [".py"]

[smells]
# Functions spanning more lines are reported as long
max_function_lines = 50

# More positional parameters are reported
max_parameters = 5

# Deeper if/for/while/with nesting is reported
max_nesting_depth = 4
"#;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub allowed_extensions: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            static_dir: PathBuf::from("static"),
            max_upload_bytes: 5 * 1024 * 1024,
            allowed_extensions: default_extensions(),
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub smells: SmellThresholds,
}

impl Config {
    /// Load configuration and apply environment overrides
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let local = Path::new(CONFIG_FILE);
                if local.is_file() {
                    Self::from_file(local)?
                } else {
                    debug!("No {} found, using defaults", CONFIG_FILE);
                    Self::default()
                }
            }
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply `PORT` and `PYREVIEW_HOST` from `lookup`
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv {
                    var: "PORT",
                    value: port.clone(),
                })?;
        }
        if let Some(host) = lookup("PYREVIEW_HOST") {
            if !host.trim().is_empty() {
                self.server.host = host.trim().to_string();
            }
        }
        Ok(())
    }
}
