//! Threshold-based online selection (the "secretary" rule).
//!
//! Policy:
//! - Explore: observe the first `cutoff = max(1, floor(n * r))` candidates
//!   without selecting; the best of them becomes the threshold.
//! - Select: scan the rest in arrival order and take the first candidate whose
//!   score is strictly above the threshold. Scanning stops there.
//! - Fallback: if nobody beats the threshold, take the last candidate.
//!
//! The scan consumes scores as a stream and stops on acceptance, so the rule
//! can never see a score beyond the one it is deciding on.

use crate::error::{check_fraction, check_pool_size, Result};
use crate::pool::Pool;

/// Outcome of running the selection rule over one pool.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    /// Number of candidates observed in the exploration phase.
    pub cutoff: usize,
    /// Best score seen during exploration.
    pub threshold: f64,
    /// Index of the selected candidate. Always in `[0, n)`.
    pub selected_index: usize,
    /// True when no selection-phase candidate beat the threshold.
    pub fallback_used: bool,
}

/// Exploration cutoff for a pool of `n` with fraction `r`: `max(1, floor(n * r))`.
///
/// ```rust
/// assert_eq!(secretary::exploration_cutoff(10, 0.37).unwrap(), 3);
/// assert_eq!(secretary::exploration_cutoff(1, 0.37).unwrap(), 1);
/// ```
pub fn exploration_cutoff(n: usize, r: f64) -> Result<usize> {
    check_pool_size(n)?;
    check_fraction(r)?;
    let k = ((n as f64) * r).floor() as usize;
    Ok(k.clamp(1, n))
}

/// Run the threshold rule over `pool` with exploration fraction `r`.
pub fn select(pool: &Pool, r: f64) -> Result<Selection> {
    let cutoff = exploration_cutoff(pool.len(), r)?;
    Ok(scan(pool.scores(), cutoff))
}

/// Online scan over an arrival stream. `cutoff` must be >= 1 and the stream
/// non-empty; both are guaranteed by [`select`].
fn scan(mut arrivals: impl Iterator<Item = f64>, cutoff: usize) -> Selection {
    let mut threshold = f64::NEG_INFINITY;
    let mut seen = 0usize;

    while seen < cutoff {
        match arrivals.next() {
            Some(s) => {
                threshold = threshold.max(s);
                seen += 1;
            }
            None => break,
        }
    }

    for s in arrivals {
        let index = seen;
        seen += 1;
        if s > threshold {
            return Selection {
                cutoff,
                threshold,
                selected_index: index,
                fallback_used: false,
            };
        }
    }

    Selection {
        cutoff,
        threshold,
        selected_index: seen.saturating_sub(1),
        fallback_used: true,
    }
}

/// Rank of the candidate at `index` among all scores in `pool` (1 = best).
///
/// Equivalent to sorting scores descending with ties broken by lowest index
/// and reading off the position of `index`. Returns `None` if `index` is out
/// of range.
pub fn rank_of(pool: &Pool, index: usize) -> Option<usize> {
    let target = pool.score(index)?;
    let ahead = pool
        .candidates()
        .iter()
        .filter(|c| c.score > target || (c.score == target && c.index < index))
        .count();
    Some(ahead + 1)
}
