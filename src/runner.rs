//! Stateful simulation session: the front door for repeated trials.
//!
//! [`Simulator`] owns a seeded RNG and the session's [`TrialHistory`] and
//! exposes the interactive surface:
//!
//! ```text
//! sim.run_one()?;        // one fresh pool, one trial
//! sim.run_many(1000)?;   // 1000 fresh pools, all-or-nothing
//! sim.statistics();      // recomputed from the full history
//! sim.reset_history();   // back to empty
//! ```
//!
//! Trials run sequentially; each completes before the next begins. A batch is
//! fully built before it is appended, so a failing `run_many` leaves history
//! untouched.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{check_count, check_fraction, check_pool_size, Error, Result};
use crate::history::TrialHistory;
use crate::pool::{generate_pool_with, ScoreModel};
use crate::stats::{get_statistics, Statistics};
use crate::trial::{run_trial, Trial};
use crate::DEFAULT_EXPLORATION_FRACTION;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for a [`Simulator`].
///
/// Start with [`SimulatorConfig::default()`] and adjust via the builder
/// methods or by setting fields directly.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulatorConfig {
    /// Candidates per pool (>= 1).
    pub pool_size: usize,
    /// Exploration fraction in `(0, 1)`.
    pub exploration_fraction: f64,
    /// RNG seed. Same seed and config give the same trial sequence.
    pub seed: u64,
    /// Score distribution for generated pools.
    pub score_model: ScoreModel,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            pool_size: 10,
            exploration_fraction: DEFAULT_EXPLORATION_FRACTION,
            seed: 0,
            score_model: ScoreModel::Uniform,
        }
    }
}

impl SimulatorConfig {
    pub fn with_pool_size(mut self, n: usize) -> Self {
        self.pool_size = n;
        self
    }

    pub fn with_exploration_fraction(mut self, r: f64) -> Self {
        self.exploration_fraction = r;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_score_model(mut self, model: ScoreModel) -> Self {
        self.score_model = model;
        self
    }

    /// Check every parameter.
    pub fn validate(&self) -> Result<()> {
        check_pool_size(self.pool_size)?;
        check_fraction(self.exploration_fraction)?;
        self.score_model.validate()
    }
}

// ============================================================================
// Batch helper
// ============================================================================

/// Run `count` independent trials, each over a freshly generated uniform pool of `n`.
///
/// All parameters are validated before any randomness is drawn.
pub fn run_many<R: Rng + ?Sized>(
    n: usize,
    count: usize,
    exploration_fraction: f64,
    rng: &mut R,
) -> Result<Vec<Trial>> {
    run_many_with(n, count, exploration_fraction, ScoreModel::Uniform, rng)
}

/// Like [`run_many`], with an explicit score model.
pub fn run_many_with<R: Rng + ?Sized>(
    n: usize,
    count: usize,
    exploration_fraction: f64,
    model: ScoreModel,
    rng: &mut R,
) -> Result<Vec<Trial>> {
    check_pool_size(n)?;
    check_count(count)?;
    check_fraction(exploration_fraction)?;
    model.validate()?;
    let max_batch = isize::MAX as usize / std::mem::size_of::<Trial>().max(1);
    if count > max_batch {
        return Err(Error::invalid(format!(
            "trial count {count} exceeds the largest storable batch ({max_batch})"
        )));
    }

    // Grown as trials complete; `count` alone may be far beyond what fits.
    let mut out = Vec::new();
    for _ in 0..count {
        let pool = generate_pool_with(n, model, rng)?;
        out.push(run_trial(pool, exploration_fraction)?);
    }
    Ok(out)
}

// ============================================================================
// Simulator
// ============================================================================

/// A seeded simulation session with its own trial history.
#[derive(Debug, Clone)]
pub struct Simulator {
    cfg: SimulatorConfig,
    rng: StdRng,
    history: TrialHistory,
}

impl Simulator {
    /// Create a simulator. Fails if `cfg` is invalid.
    pub fn new(cfg: SimulatorConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            rng: StdRng::seed_from_u64(cfg.seed),
            history: TrialHistory::new(),
        })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.cfg
    }

    pub fn history(&self) -> &TrialHistory {
        &self.history
    }

    /// Run one trial over a fresh pool and append it to history.
    pub fn run_one(&mut self) -> Result<&Trial> {
        let pool = generate_pool_with(self.cfg.pool_size, self.cfg.score_model, &mut self.rng)?;
        let trial = run_trial(pool, self.cfg.exploration_fraction)?;
        log_trial(&trial);
        self.history.push(trial);
        // Just pushed.
        Ok(&self.history.trials()[self.history.len() - 1])
    }

    /// Run `count` trials, each over a fresh pool, and append them in order.
    ///
    /// Returns the newly appended trials. On error nothing is appended.
    pub fn run_many(&mut self, count: usize) -> Result<&[Trial]> {
        let batch = run_many_with(
            self.cfg.pool_size,
            count,
            self.cfg.exploration_fraction,
            self.cfg.score_model,
            &mut self.rng,
        )?;
        batch.iter().for_each(log_trial);
        let successes = batch.iter().filter(|t| t.is_success()).count();
        tracing::info!(
            count,
            successes,
            pool_size = self.cfg.pool_size,
            exploration_fraction = self.cfg.exploration_fraction,
            "batch complete"
        );
        Ok(self.history.extend_batch(batch))
    }

    /// Clear the history. The RNG stream continues where it was.
    pub fn reset_history(&mut self) {
        tracing::debug!(cleared = self.history.len(), "history reset");
        self.history.reset();
    }

    /// Statistics over the current history, recomputed on every call.
    pub fn statistics(&self) -> Statistics {
        get_statistics(&self.history)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self {
            cfg: SimulatorConfig::default(),
            rng: StdRng::seed_from_u64(0),
            history: TrialHistory::new(),
        }
    }
}

fn log_trial(t: &Trial) {
    tracing::debug!(
        pool_size = t.pool_size(),
        cutoff = t.exploration_cutoff,
        threshold = t.threshold,
        selected = t.selected_index,
        best = t.best_index,
        rank = t.rank,
        fallback = t.fallback_used,
        "trial complete"
    );
}

// ============================================================================
// Tests
// ============================================================================
