//! Cross-trial statistics.
//!
//! Statistics are always recomputed from the full history; nothing is cached,
//! since history may have been extended or reset since the last call.

use std::collections::BTreeMap;
use std::fmt;

use crate::history::TrialHistory;
use crate::trial::Trial;

/// Aggregate view over a trial history.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statistics {
    /// Number of trials aggregated.
    pub trials: u64,
    /// Trials whose selected candidate had rank 1.
    pub successes: u64,
    /// `successes / trials`; `0.0` when empty.
    pub success_rate: f64,
    /// Mean rank; `None` when empty.
    pub average_rank: Option<f64>,
    /// Rank -> number of trials with that rank. Only observed ranks appear.
    pub rank_distribution: BTreeMap<usize, u64>,
    /// Fraction of trials decided by the last-candidate fallback; `0.0` when empty.
    pub fallback_rate: f64,
}

/// Compute statistics over `history`.
pub fn get_statistics(history: &TrialHistory) -> Statistics {
    Statistics::from_trials(history.trials())
}

impl Statistics {
    /// Compute statistics over a slice of trials.
    pub fn from_trials(trials: &[Trial]) -> Self {
        if trials.is_empty() {
            return Self::default();
        }
        let mut rank_distribution: BTreeMap<usize, u64> = BTreeMap::new();
        let mut rank_sum = 0u64;
        let mut fallbacks = 0u64;
        for t in trials {
            *rank_distribution.entry(t.rank).or_insert(0) += 1;
            rank_sum += t.rank as u64;
            if t.fallback_used {
                fallbacks += 1;
            }
        }
        let n = trials.len() as u64;
        let successes = rank_distribution.get(&1).copied().unwrap_or(0);
        Self {
            trials: n,
            successes,
            success_rate: successes as f64 / n as f64,
            average_rank: Some(rank_sum as f64 / n as f64),
            rank_distribution,
            fallback_rate: fallbacks as f64 / n as f64,
        }
    }

    /// Wilson score interval `(lo, hi)` on the success rate at normal quantile `z`.
    ///
    /// Non-finite or non-positive `z` falls back to 1.96. Empty history gives `(0, 1)`.
    pub fn success_interval(&self, z: f64) -> (f64, f64) {
        wilson_bounds(self.successes, self.trials, z)
    }

    /// Plain-text bar chart of the rank distribution.
    ///
    /// One line per observed rank; the most frequent rank gets `width` bars.
    pub fn render_histogram(&self, width: usize) -> String {
        let max = self.rank_distribution.values().copied().max().unwrap_or(0);
        if max == 0 {
            return String::from("(no trials)\n");
        }
        let label_w = self
            .rank_distribution
            .keys()
            .last()
            .map(|r| r.to_string().len())
            .unwrap_or(1);
        let mut out = String::new();
        for (&rank, &count) in &self.rank_distribution {
            let bars = ((count as f64 / max as f64) * width as f64).round() as usize;
            let bars = if count > 0 { bars.max(1) } else { 0 };
            out.push_str(&format!(
                "{rank:>label_w$} | {} {count}\n",
                "#".repeat(bars)
            ));
        }
        out
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "trials:        {}", self.trials)?;
        writeln!(
            f,
            "success rate:  {:.1}% ({}/{})",
            self.success_rate * 100.0,
            self.successes,
            self.trials
        )?;
        match self.average_rank {
            Some(r) => writeln!(f, "average rank:  {r:.2}")?,
            None => writeln!(f, "average rank:  N/A")?,
        }
        writeln!(f, "fallback rate: {:.1}%", self.fallback_rate * 100.0)
    }
}

/// Wilson score interval `(lo, hi)` for `successes` out of `trials`.
pub(crate) fn wilson_bounds(successes: u64, trials: u64, z: f64) -> (f64, f64) {
    if trials == 0 {
        return (0.0, 1.0);
    }
    let z = if z.is_finite() && z > 0.0 { z } else { 1.96 };
    let n = trials as f64;
    let p = successes.min(trials) as f64 / n;
    let shrink = z * z / n;
    let mid = p + shrink / 2.0;
    let spread = z * (p * (1.0 - p) / n + shrink / (4.0 * n)).sqrt();
    let scale = 1.0 + shrink;
    (
        ((mid - spread) / scale).max(0.0),
        ((mid + spread) / scale).min(1.0),
    )
}
