//! # CHLA - Contextual Hypergraph Learning Algorithm
//!
//! A small simulation of reward-driven learning over relations between
//! contexts (users, times of day, product categories, ...).
//!
//! Every pair of contexts gets a relation strength, initialized at random.
//! Each epoch, every relation receives a simulated reward and moves by
//! `learning_rate * reward`. At the end the strongest relation is reported.
//!
//! ## Design Notes
//! - Relations are pairwise only. The "hypergraph" name is historical;
//!   no relation spans more than two contexts.
//! - Rewards are noise from an injectable [`learner::RewardSource`], so
//!   runs are reproducible with a seed and testable with fixed sequences.
//! - Nothing is persisted. The relation store lives for one run.

pub mod hypergraph;
pub mod learner;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hypergraph::ContextLabel;
use learner::{DEFAULT_EPOCHS, DEFAULT_LEARNING_RATE};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Unified error type for CHLA.
#[derive(Error, Debug)]
pub enum ChlaError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The maximum over zero relations is undefined.
    #[error("No relations to summarize")]
    EmptyStore,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

pub type ChlaResult<T> = Result<T, ChlaError>;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Contexts used when no configuration file is supplied.
pub const DEFAULT_CONTEXTS: [&str; 6] = [
    "User A",
    "User B",
    "Morning",
    "Evening",
    "Electronics",
    "Clothing",
];

/// Epoch count of the built-in run.
pub const DEFAULT_RUN_EPOCHS: u64 = 10;

/// Top-level configuration for a CHLA run.
///
/// Loaded from `chla.toml` in the working directory or a path supplied
/// via CLI flag. The defaults reproduce the built-in example run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChlaConfig {
    /// Contexts and randomness.
    pub general: GeneralConfig,

    /// Update rule knobs. Missing keys fall back to the learner defaults.
    #[serde(default)]
    pub learning: LearningConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Context labels, in the order pairs are generated from.
    pub contexts: Vec<String>,

    /// Seed for the random source. None = seeded from OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningConfig {
    /// Multiplier applied to each reward. Fixed for the whole run.
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,

    /// Number of passes over all relations.
    #[serde(default = "default_epochs")]
    pub epochs: u64,
}

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

fn default_epochs() -> u64 {
    DEFAULT_EPOCHS
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            epochs: DEFAULT_EPOCHS,
        }
    }
}

impl Default for ChlaConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig {
                contexts: DEFAULT_CONTEXTS.iter().map(|c| c.to_string()).collect(),
                seed: None,
            },
            learning: LearningConfig {
                learning_rate: DEFAULT_LEARNING_RATE,
                epochs: DEFAULT_RUN_EPOCHS,
            },
        }
    }
}

impl ChlaConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> ChlaResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ChlaConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Write the default configuration to a TOML file.
    pub fn write_default(path: &Path) -> ChlaResult<()> {
        let config = Self::default();
        let content =
            toml::to_string_pretty(&config).map_err(|e| ChlaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check the configuration can drive a run.
    ///
    /// Requires at least two distinct contexts (so at least one relation
    /// exists to summarize) and a finite learning rate.
    pub fn validate(&self) -> ChlaResult<()> {
        let contexts = &self.general.contexts;
        if contexts.len() < 2 {
            return Err(ChlaError::Config(format!(
                "at least 2 contexts are required, got {}",
                contexts.len()
            )));
        }

        let mut seen = HashSet::new();
        for context in contexts {
            if !seen.insert(context.as_str()) {
                return Err(ChlaError::Config(format!(
                    "duplicate context label: {:?}",
                    context
                )));
            }
        }

        if !self.learning.learning_rate.is_finite() {
            return Err(ChlaError::Config(format!(
                "learning_rate must be finite, got {}",
                self.learning.learning_rate
            )));
        }

        Ok(())
    }

    /// Context labels in configured order.
    pub fn labels(&self) -> Vec<ContextLabel> {
        hypergraph::labels(self.general.contexts.iter().cloned())
    }
}
