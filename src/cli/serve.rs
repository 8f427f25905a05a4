//! Serve command - run the HTTP service

use anyhow::{Context, Result};

use crate::config::Config;
use crate::pipeline::Analyzer;

pub fn run(config: &Config, analyzer: Analyzer) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(crate::server::serve(&config.server, analyzer))
}
