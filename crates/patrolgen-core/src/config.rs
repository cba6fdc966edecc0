//! Application configuration management.
//!
//! This module handles loading and saving the patrol assignment settings
//! together with the troop's name tables (incompatible pairs, inactive
//! scouts, troop leaders and patrol leaders).
//!
//! Configuration is stored at `~/.config/patrolgen/config.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::PatrolError;
use crate::tables::NameTables;

/// Application name used for config directory paths
const APP_NAME: &str = "patrolgen";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default report file, relative to the working directory
pub const DEFAULT_OUTPUT_FILE: &str = "patrols.txt";

/// Knobs for a single assignment run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentSettings {
    /// How many patrols to create
    pub patrol_count: usize,
    /// Allow scouts sharing a last name in the same patrol
    pub relation_allowed: bool,
    /// Every scout needs another scout within this many years
    pub max_age_difference: u32,
    /// Target average rank weight per patrol (Unranked = 0, Scout = 1, ...)
    pub target_rank: f64,
    /// Allowed distance of a patrol's average rank from the target
    pub rank_threshold: f64,
}

impl Default for AssignmentSettings {
    fn default() -> Self {
        Self {
            patrol_count: 2,
            relation_allowed: false,
            max_age_difference: 2,
            target_rank: 2.0,
            rank_threshold: 0.75,
        }
    }
}

impl AssignmentSettings {
    /// Reject contradictory settings before any placement is attempted
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.patrol_count == 0 {
            return Err(PatrolError::InvalidConfig(
                "patrol count must be at least 1".to_string(),
            ));
        }
        if !self.target_rank.is_finite() {
            return Err(PatrolError::InvalidConfig(format!(
                "target rank must be a finite number, got {}",
                self.target_rank
            )));
        }
        if !self.rank_threshold.is_finite() || self.rank_threshold < 0.0 {
            return Err(PatrolError::InvalidConfig(format!(
                "rank threshold must be a non-negative number, got {}",
                self.rank_threshold
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub settings: AssignmentSettings,
    #[serde(default)]
    pub tables: NameTables,
    pub roster_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE))
    }
}
