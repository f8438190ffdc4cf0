use serde::Deserialize;

use devents_core::error::{DeventsError, Result};

use crate::labels;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AggregatorConfig {
    pub version: u32,

    #[serde(default)]
    pub metrics: MetricsSection,
}

impl AggregatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(DeventsError::Config("version must be 1".into()));
        }

        self.metrics.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Custom container attribute keys, extracted in this order.
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            path: default_path(),
            port: default_port(),
            labels: Vec::new(),
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        if !self.path.starts_with('/') {
            return Err(DeventsError::Config(
                "metrics.path must start with '/'".into(),
            ));
        }
        if self.port == 0 {
            return Err(DeventsError::Config("metrics.port must be non-zero".into()));
        }
        if self.labels.iter().any(|l| l.is_empty()) {
            return Err(DeventsError::Config(
                "metrics.labels entries must not be empty".into(),
            ));
        }

        // Keys that differ only by '.' vs '_' collide once normalized for
        // exposition; catch that here instead of at counter registration.
        let mut normalized: Vec<String> = self.labels.iter().map(|l| labels::normalize(l)).collect();
        normalized.sort();
        normalized.dedup();
        if normalized.len() != self.labels.len() {
            return Err(DeventsError::Config(
                "metrics.labels collide after '.' -> '_' normalization".into(),
            ));
        }

        Ok(())
    }
}

fn default_path() -> String {
    "/metrics".into()
}
fn default_port() -> u16 {
    9090
}
