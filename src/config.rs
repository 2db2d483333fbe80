//! Configuration loading for MargaNav

use crate::error::{MargaError, Result};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Clone, Debug, Deserialize, Default)]
pub struct MargaConfig {
    #[serde(default)]
    pub planner: PlannerConfig,
}

/// Planner selection and replanning limits
#[derive(Clone, Debug, Deserialize)]
pub struct PlannerConfig {
    /// Which planning strategy to use (default: full-path)
    #[serde(default = "default_strategy")]
    pub strategy: StrategyKind,

    /// Maximum replan attempts within a single turn (default: 81)
    #[serde(default = "default_max_replans")]
    pub max_replans_per_turn: usize,
}

/// Planning strategy selector
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Cache a complete BFS route and replay it until invalidated
    FullPath,
    /// Recompute an A* search every turn, committing one step
    SingleStep,
}

impl StrategyKind {
    /// Parse a CLI strategy name.
    pub fn parse_name(name: &str) -> Result<Self> {
        match name {
            "full-path" => Ok(StrategyKind::FullPath),
            "single-step" => Ok(StrategyKind::SingleStep),
            other => Err(MargaError::Config(format!(
                "Unknown strategy {:?} (expected \"full-path\" or \"single-step\")",
                other
            ))),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            max_replans_per_turn: default_max_replans(),
        }
    }
}

// Default value functions
fn default_strategy() -> StrategyKind {
    StrategyKind::FullPath
}
// One attempt per grid cell bounds intra-turn retries
fn default_max_replans() -> usize {
    81
}

impl MargaConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MargaError::Config(format!("Failed to read config file: {}", e)))?;
        let config: MargaConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
