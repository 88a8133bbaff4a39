//! Completed trial records.
//!
//! A [`Trial`] is an immutable record produced by [`run_trial`], a pure
//! function of `(pool, exploration_fraction)`. Per-candidate phase tags are
//! derived from the record rather than stored.

use crate::error::Result;
use crate::pool::Pool;
use crate::selector::{rank_of, select};

/// Phase of a candidate within a completed trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhaseTag {
    /// Not part of exploration and not selected.
    NotYetSeen,
    /// Observed during exploration only; never selectable.
    ExploredOnly,
    /// The chosen candidate.
    Selected,
}

/// One fully resolved run of the selection rule over one pool.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trial {
    /// The pool the trial ran over.
    pub pool: Pool,
    /// Exploration fraction used.
    pub exploration_fraction: f64,
    /// `max(1, floor(n * r))`.
    pub exploration_cutoff: usize,
    /// Best score in `[0, exploration_cutoff)`.
    pub threshold: f64,
    /// Chosen index.
    pub selected_index: usize,
    /// Index of the global maximum (evaluation only).
    pub best_index: usize,
    /// Rank of the chosen score among all scores, 1 = best.
    pub rank: usize,
    /// True if the last candidate was taken because nobody beat the threshold.
    pub fallback_used: bool,
}

impl Trial {
    /// Pool size.
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    /// Selected candidate was the global best.
    pub fn is_success(&self) -> bool {
        self.rank == 1
    }

    /// Score of the selected candidate, or `None` if `selected_index` is out
    /// of range (only possible for a hand-built record).
    pub fn selected_score(&self) -> Option<f64> {
        self.pool.score(self.selected_index)
    }

    /// Phase of the candidate at `index`, or `None` if out of range.
    ///
    /// `Selected` takes precedence, which matters for single-candidate pools
    /// where the only candidate is both explored and selected.
    pub fn phase_of(&self, index: usize) -> Option<PhaseTag> {
        if index >= self.pool.len() {
            None
        } else if index == self.selected_index {
            Some(PhaseTag::Selected)
        } else if index < self.exploration_cutoff {
            Some(PhaseTag::ExploredOnly)
        } else {
            Some(PhaseTag::NotYetSeen)
        }
    }

    /// Phase tags for every candidate, in arrival order.
    pub fn phase_tags(&self) -> Vec<PhaseTag> {
        (0..self.pool.len())
            .filter_map(|i| self.phase_of(i))
            .collect()
    }
}

/// Run the selection rule over `pool` and score the outcome.
///
/// Fails only if `exploration_fraction` is outside `(0, 1)`.
pub fn run_trial(pool: Pool, exploration_fraction: f64) -> Result<Trial> {
    let sel = select(&pool, exploration_fraction)?;
    // `select` guarantees the index is in range.
    let rank = rank_of(&pool, sel.selected_index).unwrap_or(pool.len());
    let best_index = pool.best_index();
    Ok(Trial {
        pool,
        exploration_fraction,
        exploration_cutoff: sel.cutoff,
        threshold: sel.threshold,
        selected_index: sel.selected_index,
        best_index,
        rank,
        fallback_used: sel.fallback_used,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_when_first_exceeder_is_global_best() {
        let p = Pool::from_scores(&[0.5, 0.2, 0.9, 0.3, 0.95, 0.1, 0.4, 0.6, 0.8, 0.7]).unwrap();
        let t = run_trial(p, 0.37).unwrap();
        assert_eq!(t.pool_size(), 10);
        assert_eq!(t.selected_index, 4);
        assert_eq!(t.best_index, 4);
        assert_eq!(t.rank, 1);
        assert!(t.is_success());
        assert_eq!(t.selected_score(), Some(0.95));
    }

    #[test]
    fn fallback_trial_misses_the_best() {
        let p = Pool::from_scores(&[0.9, 0.1, 0.2]).unwrap();
        let t = run_trial(p, 0.37).unwrap();
        assert_eq!(t.selected_index, 2);
        assert_eq!(t.best_index, 0);
        assert_eq!(t.rank, 2);
        assert!(t.fallback_used);
        assert!(!t.is_success());
    }

    #[test]
    fn phase_tags_follow_cutoff_and_selection() {
        let p = Pool::from_scores(&[0.5, 0.2, 0.9, 0.3, 0.95, 0.1]).unwrap();
        let t = run_trial(p, 0.5).unwrap();
        assert_eq!(t.exploration_cutoff, 3);
        assert_eq!(
            t.phase_tags(),
            vec![
                PhaseTag::ExploredOnly,
                PhaseTag::ExploredOnly,
                PhaseTag::ExploredOnly,
                PhaseTag::NotYetSeen,
                PhaseTag::Selected,
                PhaseTag::NotYetSeen,
            ]
        );
        assert_eq!(t.phase_of(6), None);
        let selected = t
            .phase_tags()
            .iter()
            .filter(|&&p| p == PhaseTag::Selected)
            .count();
        assert_eq!(selected, 1);
    }

    #[test]
    fn single_candidate_is_tagged_selected() {
        let t = run_trial(Pool::from_scores(&[0.3]).unwrap(), 0.37).unwrap();
        assert_eq!(t.phase_tags(), vec![PhaseTag::Selected]);
        assert!(t.is_success());
    }

    #[test]
    fn selected_score_is_none_for_out_of_range_index() {
        let mut t = run_trial(Pool::from_scores(&[0.4, 0.6]).unwrap(), 0.37).unwrap();
        assert_eq!(t.selected_score(), Some(0.6));
        t.selected_index = 5;
        assert_eq!(t.selected_score(), None);
    }

    #[test]
    fn bad_fraction_fails_without_a_record() {
        let p = Pool::from_scores(&[0.1, 0.2]).unwrap();
        assert!(run_trial(p, 1.0).is_err());
    }
}
