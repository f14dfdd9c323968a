pub mod loader;

pub use loader::load_config;

use crate::machine_learning::decision_tree::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// Decision tree artifact, loaded once at startup.
    pub path: String,
    pub max_depth: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: "models/decision_tree.json".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
