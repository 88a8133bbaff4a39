//! Property tests for the selection rule and the statistics it feeds.
//!
//! 1. Exactly one candidate is selected and its index is in `[0, n)`.
//! 2. The threshold is the prefix maximum; the selection is the first index at
//!    or after the cutoff that beats it, else the last index.
//! 3. Rank matches a stable descending sort of the scores.
//! 4. Rank-distribution counts sum to the history length and the success rate
//!    equals `distribution[1] / len`.

use proptest::prelude::*;
use secretary::{
    exploration_cutoff, get_statistics, run_trial, PhaseTag, Pool, TrialHistory,
};

fn arb_scores() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..1.0, 1..60)
}

/// Scores drawn from a tiny set so ties are common.
fn arb_tied_scores() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((0u8..4).prop_map(|x| x as f64 / 4.0), 1..30)
}

fn arb_fraction() -> impl Strategy<Value = f64> {
    0.01f64..0.99
}

fn reference_rank(scores: &[f64], index: usize) -> usize {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // Stable sort keeps lower indices first among equal scores.
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order.iter().position(|&i| i == index).unwrap() + 1
}

proptest! {
    #[test]
    fn exactly_one_valid_selection(scores in arb_scores(), r in arb_fraction()) {
        let n = scores.len();
        let t = run_trial(Pool::from_scores(&scores).unwrap(), r).unwrap();
        prop_assert!(t.selected_index < n);
        let selected = t.phase_tags().iter().filter(|&&p| p == PhaseTag::Selected).count();
        prop_assert_eq!(selected, 1);
        prop_assert!(t.rank >= 1 && t.rank <= n);
    }

    #[test]
    fn threshold_and_first_exceeder(scores in arb_scores(), r in arb_fraction()) {
        let n = scores.len();
        let cutoff = exploration_cutoff(n, r).unwrap();
        let t = run_trial(Pool::from_scores(&scores).unwrap(), r).unwrap();

        prop_assert_eq!(t.exploration_cutoff, cutoff);
        let prefix_max = scores[..cutoff].iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(t.threshold, prefix_max);

        let expected = (cutoff..n).find(|&i| scores[i] > prefix_max);
        match expected {
            Some(i) => {
                prop_assert_eq!(t.selected_index, i);
                prop_assert!(!t.fallback_used);
            }
            None => {
                prop_assert_eq!(t.selected_index, n - 1);
                prop_assert!(t.fallback_used);
            }
        }
    }

    #[test]
    fn rank_matches_stable_sort(scores in arb_tied_scores(), r in arb_fraction()) {
        let t = run_trial(Pool::from_scores(&scores).unwrap(), r).unwrap();
        prop_assert_eq!(t.rank, reference_rank(&scores, t.selected_index));
        prop_assert_eq!(reference_rank(&scores, t.best_index), 1);
    }

    #[test]
    fn distribution_sums_to_history_len(
        pools in prop::collection::vec(arb_scores(), 1..40),
        r in arb_fraction(),
    ) {
        let h: TrialHistory = pools
            .iter()
            .map(|s| run_trial(Pool::from_scores(s).unwrap(), r).unwrap())
            .collect();
        let s = get_statistics(&h);
        prop_assert_eq!(s.rank_distribution.values().sum::<u64>(), h.len() as u64);
        let ones = s.rank_distribution.get(&1).copied().unwrap_or(0);
        prop_assert!((s.success_rate - ones as f64 / h.len() as f64).abs() < 1e-12);
        let avg = s.average_rank.unwrap();
        prop_assert!(avg >= 1.0);
    }

    #[test]
    fn single_candidate_always_selected(score in 0.0f64..1.0, r in arb_fraction()) {
        let t = run_trial(Pool::from_scores(&[score]).unwrap(), r).unwrap();
        prop_assert_eq!(t.selected_index, 0);
        prop_assert_eq!(t.rank, 1);
    }
}
