use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::pipeline::Analyzer;

/// Shared, read-only request state
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(analyzer: Analyzer, config: &ServerConfig) -> Self {
        let analyzer = analyzer.with_allowed_extensions(config.allowed_extensions.clone());
        Self {
            analyzer: Arc::new(analyzer),
            static_dir: config.static_dir.clone(),
        }
    }
}
