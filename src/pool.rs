//! Candidate pool generation.
//!
//! A pool is the arrival-ordered sequence of candidates for one trial. Scores
//! are drawn independently; indices are `0..n` in arrival order.
//!
//! Notes:
//! - Generation is **seedable**: pass any `rand::Rng`, typically a `StdRng`
//!   seeded by the caller, so pools are reproducible in tests.
//! - The pool knows its `best_index` (lowest index on ties). The selector never
//!   reads it; it exists only for scoring trial quality.

use rand::Rng;
use rand_distr::{Beta, Distribution};

use crate::error::{check_pool_size, Error, Result};

/// One applicant in the arrival sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Position in arrival order (0-based).
    pub index: usize,
    /// Quality value. Only compared, never interpreted.
    pub score: f64,
}

/// Distribution the candidate scores are drawn from.
///
/// The selector only compares scores, so any continuous model yields the same
/// success-rate curve. `Uniform` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScoreModel {
    /// Uniform on `[0, 1)`.
    #[default]
    Uniform,
    /// `Beta(alpha, beta)` on `[0, 1]`. Both parameters must be finite and > 0.
    Beta { alpha: f64, beta: f64 },
}

impl ScoreModel {
    /// Check the model parameters.
    pub fn validate(&self) -> Result<()> {
        match *self {
            ScoreModel::Uniform => Ok(()),
            ScoreModel::Beta { alpha, beta } => {
                let ok = |x: f64| x.is_finite() && x > 0.0;
                if ok(alpha) && ok(beta) {
                    Ok(())
                } else {
                    Err(Error::invalid(format!(
                        "beta score model needs finite positive parameters, got ({alpha}, {beta})"
                    )))
                }
            }
        }
    }

    fn sampler(&self) -> Result<Sampler> {
        match *self {
            ScoreModel::Uniform => Ok(Sampler::Uniform),
            ScoreModel::Beta { alpha, beta } => {
                self.validate()?;
                Beta::new(alpha, beta)
                    .map(Sampler::Beta)
                    .map_err(|e| Error::invalid(format!("beta score model: {e}")))
            }
        }
    }
}

enum Sampler {
    Uniform,
    Beta(Beta<f64>),
}

impl Sampler {
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Sampler::Uniform => rng.random::<f64>(),
            Sampler::Beta(d) => d.sample(rng),
        }
    }
}

/// An arrival-ordered candidate pool.
///
/// Deserialization goes through [`Pool::from_scores`], so a decoded pool has
/// the same invariants as a generated one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PoolRepr"))]
pub struct Pool {
    candidates: Vec<Candidate>,
    best_index: usize,
}

impl Pool {
    /// Build a pool from explicit scores (fixtures, replays).
    ///
    /// Fails if `scores` is empty or contains a non-finite value.
    pub fn from_scores(scores: &[f64]) -> Result<Self> {
        check_pool_size(scores.len())?;
        if let Some((i, s)) = scores.iter().enumerate().find(|(_, s)| !s.is_finite()) {
            return Err(Error::invalid(format!(
                "score at index {i} is not finite: {s}"
            )));
        }
        let candidates = scores
            .iter()
            .enumerate()
            .map(|(index, &score)| Candidate { index, score })
            .collect();
        Ok(Self::from_candidates(candidates))
    }

    fn from_candidates(candidates: Vec<Candidate>) -> Self {
        let mut best_index = 0;
        for c in &candidates {
            // Strict `>` keeps the lowest index on ties.
            if c.score > candidates[best_index].score {
                best_index = c.index;
            }
        }
        Self {
            candidates,
            best_index,
        }
    }

    /// Number of candidates (always >= 1).
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Always false: pools are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidates in arrival order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Scores in arrival order.
    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.candidates.iter().map(|c| c.score)
    }

    /// Score of the candidate at `index`, if in range.
    pub fn score(&self, index: usize) -> Option<f64> {
        self.candidates.get(index).map(|c| c.score)
    }

    /// Index of the globally best score (lowest index on ties).
    pub fn best_index(&self) -> usize {
        self.best_index
    }
}

/// Wire form of a [`Pool`], checked on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PoolRepr {
    candidates: Vec<Candidate>,
    #[serde(default)]
    best_index: Option<usize>,
}

#[cfg(feature = "serde")]
impl TryFrom<PoolRepr> for Pool {
    type Error = Error;

    fn try_from(repr: PoolRepr) -> Result<Self> {
        if let Some((pos, c)) = repr
            .candidates
            .iter()
            .enumerate()
            .find(|(pos, c)| c.index != *pos)
        {
            return Err(Error::invalid(format!(
                "candidate at position {pos} has index {}",
                c.index
            )));
        }
        let scores: Vec<f64> = repr.candidates.iter().map(|c| c.score).collect();
        let pool = Pool::from_scores(&scores)?;
        match repr.best_index {
            Some(b) if b != pool.best_index => Err(Error::invalid(format!(
                "best_index {b} does not match scores (expected {})",
                pool.best_index
            ))),
            _ => Ok(pool),
        }
    }
}

/// Generate a pool of `n` candidates with uniform `[0, 1)` scores.
pub fn generate_pool<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Pool> {
    generate_pool_with(n, ScoreModel::Uniform, rng)
}

/// Generate a pool of `n` candidates with scores drawn from `model`.
pub fn generate_pool_with<R: Rng + ?Sized>(
    n: usize,
    model: ScoreModel,
    rng: &mut R,
) -> Result<Pool> {
    check_pool_size(n)?;
    let sampler = model.sampler()?;
    let candidates = (0..n)
        .map(|index| Candidate {
            index,
            score: sampler.draw(rng),
        })
        .collect();
    Ok(Pool::from_candidates(candidates))
}
