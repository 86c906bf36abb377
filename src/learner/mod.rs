//! # Contextual Hypergraph Learner
//!
//! The learner owns the relation store and drives it through its three
//! phases: initialization (one random strength per context pair),
//! evolution (an epoch loop of reward updates) and summarization (the
//! strongest relation).
//!
//! Rewards are simulated noise supplied by a [`RewardSource`]. There is
//! no convergence: strengths random-walk with step size `learning_rate`.

pub mod rewards;

use std::io::Write;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::hypergraph::{context_pairs, ContextLabel, ContextPair, RelationStats, RelationStore};
use crate::{ChlaConfig, ChlaError, ChlaResult};

pub use rewards::{RewardSource, ScriptedRewards, UniformRewards};

/// Learning rate used when none is configured.
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

/// Epoch count used when none is configured.
pub const DEFAULT_EPOCHS: u64 = 100;

/// The update rule: `current + learning_rate * reward`.
///
/// No clamping. Strengths are free to leave [0, 1).
pub fn apply_reward(current: f64, reward: f64, learning_rate: f64) -> f64 {
    current + learning_rate * reward
}

/// Counters describing one call to [`Chla::evolve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionReport {
    pub epochs: u64,
    pub updates_applied: u64,
    pub lines_written: u64,
}

/// Contextual hypergraph learner over pairwise context relations.
#[derive(Debug, Clone)]
pub struct Chla {
    contexts: Vec<ContextLabel>,
    store: RelationStore,
    learning_rate: f64,
    total_updates: u64,
}

impl Chla {
    /// Learner with the default learning rate.
    pub fn new(contexts: Vec<ContextLabel>) -> Self {
        Self::with_learning_rate(contexts, DEFAULT_LEARNING_RATE)
    }

    /// Learner with an explicit learning rate. The rate is fixed for the
    /// lifetime of the learner.
    pub fn with_learning_rate(contexts: Vec<ContextLabel>, learning_rate: f64) -> Self {
        Self {
            contexts,
            store: RelationStore::new(),
            learning_rate,
            total_updates: 0,
        }
    }

    pub fn contexts(&self) -> &[ContextLabel] {
        &self.contexts
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn store(&self) -> &RelationStore {
        &self.store
    }

    /// Total number of updates applied since construction.
    pub fn total_updates(&self) -> u64 {
        self.total_updates
    }

    /// Create one relation per unordered pair of contexts.
    ///
    /// Pairs are visited in nested index order and each gets a fresh
    /// initial strength from `source`. Returns the number of relations
    /// created.
    pub fn initialize<S: RewardSource + ?Sized>(&mut self, source: &mut S) -> usize {
        let pairs = context_pairs(&self.contexts);
        let created = pairs.len();
        for pair in pairs {
            let strength = source.initial_strength();
            self.store.set(pair, strength);
        }
        info!(
            "Initialized {} relations over {} contexts",
            created,
            self.contexts.len()
        );
        created
    }

    /// Apply `reward` to the relation for `pair`.
    ///
    /// Returns the new strength, or `None` when the pair has no relation.
    /// A missing pair leaves the store untouched.
    pub fn update(&mut self, pair: &ContextPair, reward: f64) -> Option<f64> {
        let current = self.store.get(pair)?;
        let updated = apply_reward(current, reward, self.learning_rate);
        self.store.set(pair.clone(), updated);
        self.total_updates += 1;
        Some(updated)
    }

    /// Run `epochs` passes over every relation.
    ///
    /// Each pass draws one reward per relation, applies it, and writes a
    /// progress line with the new strength to `out`. Relations are visited
    /// in insertion order.
    pub fn evolve<S, W>(
        &mut self,
        epochs: u64,
        source: &mut S,
        out: &mut W,
    ) -> ChlaResult<EvolutionReport>
    where
        S: RewardSource + ?Sized,
        W: Write + ?Sized,
    {
        let pairs: Vec<ContextPair> = self.store.keys().cloned().collect();
        let mut report = EvolutionReport::default();

        for epoch in 0..epochs {
            for pair in &pairs {
                let reward = source.reward();
                if let Some(strength) = self.update(pair, reward) {
                    report.updates_applied += 1;
                    writeln!(
                        out,
                        "Epoch {}, Context {}: Updated Relation = {}",
                        epoch, pair, strength
                    )?;
                    report.lines_written += 1;
                }
            }
            report.epochs += 1;
            debug!("Epoch {} complete ({} relations)", epoch, pairs.len());
        }

        Ok(report)
    }

    /// The strongest relation strength.
    pub fn best_relation(&self) -> ChlaResult<f64> {
        self.best_pair().map(|(_, strength)| strength)
    }

    /// The strongest relation and the pair holding it. Ties go to the
    /// earliest created pair.
    pub fn best_pair(&self) -> ChlaResult<(&ContextPair, f64)> {
        self.store.max_entry().ok_or(ChlaError::EmptyStore)
    }

    /// Write the best-relation line to `out` and return the strength.
    pub fn summarize<W: Write + ?Sized>(&self, out: &mut W) -> ChlaResult<f64> {
        let (pair, strength) = self.best_pair()?;
        writeln!(out, "Best Relation: {}", strength)?;
        info!("Best relation held by {}: {}", pair, strength);
        Ok(strength)
    }

    pub fn stats(&self) -> Option<RelationStats> {
        self.store.stats()
    }
}

/// Everything a full run produced, for machine-readable reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub contexts: Vec<ContextLabel>,
    pub learning_rate: f64,
    pub seed: Option<u64>,
    pub evolution: EvolutionReport,
    pub best_pair: ContextPair,
    pub best_relation: f64,
    pub stats: RelationStats,
}

/// Initialize, evolve and summarize a learner built from `config`.
///
/// Progress lines and the best-relation line go to `out`. The config is
/// validated first; a config that passes always yields a non-empty store.
pub fn run<S, W>(config: &ChlaConfig, source: &mut S, out: &mut W) -> ChlaResult<RunSummary>
where
    S: RewardSource + ?Sized,
    W: Write + ?Sized,
{
    config.validate()?;
    let started_at = Utc::now();

    let mut chla = Chla::with_learning_rate(config.labels(), config.learning.learning_rate);
    chla.initialize(&mut *source);
    let evolution = chla.evolve(config.learning.epochs, &mut *source, &mut *out)?;
    let best_relation = chla.summarize(&mut *out)?;

    let (best_pair, _) = chla.best_pair()?;
    let best_pair = best_pair.clone();
    let stats = chla.stats().ok_or(ChlaError::EmptyStore)?;

    Ok(RunSummary {
        started_at,
        finished_at: Utc::now(),
        contexts: chla.contexts().to_vec(),
        learning_rate: chla.learning_rate(),
        seed: config.general.seed,
        evolution,
        best_pair,
        best_relation,
        stats,
    })
}
