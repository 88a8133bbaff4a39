//! Closed-form success probabilities and exploration-fraction sweeps.
//!
//! For a pool of `n >= 2` and cutoff `k < n`, the rule picks the global best
//! exactly when the best sits at some index `j >= k` and the best of `[0, j)`
//! lies in the exploration prefix `[0, k)`:
//!
//! ```text
//!   P(k) = (1/n) * sum_{j=k}^{n-1} k/j
//! ```
//!
//! The fallback never succeeds for `k < n`: it only fires when the best is
//! inside the prefix. For `k = n` the fallback picks the last candidate, which
//! is the best with probability `1/n`. As `n` grows the maximiser approaches
//! `k = n/e` and `P` approaches `1/e`.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{check_count, check_fraction, check_pool_size, Error, Result};
use crate::runner::run_many;
use crate::selector::exploration_cutoff;
use crate::stats::Statistics;

/// Probability that cutoff `k` selects the global best in a uniformly random
/// arrival order of `n` distinct scores.
pub fn theoretical_success_rate(n: usize, cutoff: usize) -> Result<f64> {
    check_pool_size(n)?;
    if cutoff < 1 || cutoff > n {
        return Err(Error::invalid(format!(
            "cutoff must be in [1, {n}], got {cutoff}"
        )));
    }
    if cutoff == n {
        return Ok(1.0 / n as f64);
    }
    let k = cutoff as f64;
    let tail: f64 = (cutoff..n).map(|j| 1.0 / j as f64).sum();
    Ok(k * tail / n as f64)
}

/// The cutoff maximising [`theoretical_success_rate`] for `n` (lowest on ties).
pub fn optimal_cutoff(n: usize) -> Result<usize> {
    check_pool_size(n)?;
    if n == 1 {
        return Ok(1);
    }
    // suffix[k] = sum_{j=k}^{n-1} 1/j
    let mut suffix = vec![0.0f64; n + 1];
    for j in (1..n).rev() {
        suffix[j] = suffix[j + 1] + 1.0 / j as f64;
    }
    let mut best_k = 1usize;
    let mut best_p = f64::NEG_INFINITY;
    for k in 1..n {
        let p = k as f64 * suffix[k] / n as f64;
        if p > best_p {
            best_p = p;
            best_k = k;
        }
    }
    // k = n gives 1/n, which never beats k = 1 for n >= 2.
    Ok(best_k)
}

/// One point of an exploration-fraction sweep.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepPoint {
    pub exploration_fraction: f64,
    pub cutoff: usize,
    /// Statistics over the simulated trials at this fraction.
    pub empirical: Statistics,
    /// [`theoretical_success_rate`] at this cutoff.
    pub theoretical: f64,
}

/// Simulate `trials_per_point` trials of pool size `n` at each fraction.
///
/// Every point reuses `seed`, so all fractions see the same sequence of pools
/// and differences come from the rule alone. All fractions are validated
/// before any trial runs.
pub fn sweep_fractions(
    n: usize,
    fractions: &[f64],
    trials_per_point: usize,
    seed: u64,
) -> Result<Vec<SweepPoint>> {
    check_pool_size(n)?;
    check_count(trials_per_point)?;
    for &r in fractions {
        check_fraction(r)?;
    }

    let mut out = Vec::with_capacity(fractions.len());
    for &r in fractions {
        let mut rng = StdRng::seed_from_u64(seed);
        let trials = run_many(n, trials_per_point, r, &mut rng)?;
        let cutoff = exploration_cutoff(n, r)?;
        let point = SweepPoint {
            exploration_fraction: r,
            cutoff,
            empirical: Statistics::from_trials(&trials),
            theoretical: theoretical_success_rate(n, cutoff)?,
        };
        tracing::debug!(
            fraction = r,
            cutoff,
            empirical = point.empirical.success_rate,
            theoretical = point.theoretical,
            "sweep point"
        );
        out.push(point);
    }
    Ok(out)
}
