//! Aggregator config loader (strict parsing).

pub mod schema;

use std::fs;

use devents_core::error::{DeventsError, Result};

pub use schema::{AggregatorConfig, MetricsSection};

pub fn load_from_file(path: &str) -> Result<AggregatorConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| DeventsError::Config(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AggregatorConfig> {
    let cfg: AggregatorConfig = serde_yaml::from_str(s)
        .map_err(|e| DeventsError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
