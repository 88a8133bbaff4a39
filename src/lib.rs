//! `secretary`: a seedable simulator for the optimal-stopping ("secretary")
//! selection rule.
//!
//! A trial draws a pool of candidates in random arrival order, observes the
//! first `max(1, floor(n * r))` of them without committing, then accepts the
//! first later candidate that beats everything seen so far. If nobody does,
//! the last candidate is taken. Decisions are online and irrevocable: the rule
//! never looks ahead and never recalls a skipped candidate.
//!
//! Repeating trials gives an empirical view of the rule: how often it lands
//! the single best candidate (about `1/e` at `r = 0.37`), the average rank it
//! settles for, and the full rank distribution.
//!
//! **Building blocks:**
//! - [`generate_pool`] / [`generate_pool_with`]: fresh candidate pools from any `rand::Rng`.
//! - [`select`] / [`exploration_cutoff`] / [`rank_of`]: the selection rule and its scoring.
//! - [`run_trial`]: pure `(pool, r) -> Trial`.
//! - [`TrialHistory`]: append-only trial log with explicit reset.
//! - [`get_statistics`]: success rate, average rank, rank distribution.
//!
//! **Session:**
//! - [`Simulator`]: seeded RNG + history with `run_one` / `run_many` /
//!   `reset_history` / `statistics`.
//!
//! **Theory:**
//! - [`theory::theoretical_success_rate`], [`theory::optimal_cutoff`],
//!   [`theory::sweep_fractions`].
//!
//! **Goals:**
//! - **Deterministic by default**: same seed + config gives the same trials.
//! - **No side effects on error**: every parameter is validated before any
//!   randomness is drawn or history is touched.
//!
//! **Non-goals:**
//! - No rendering beyond a plain-text report.
//! - No persistence; history lives for the session only.
//!
//! # Example
//!
//! ```rust
//! use secretary::{Simulator, SimulatorConfig};
//!
//! let mut sim = Simulator::new(SimulatorConfig::default().with_seed(7)).unwrap();
//! sim.run_many(500).unwrap();
//! let stats = sim.statistics();
//! assert_eq!(stats.trials, 500);
//! assert_eq!(stats.rank_distribution.values().sum::<u64>(), 500);
//! ```

#![forbid(unsafe_code)]

/// Default exploration fraction: `1/e` rounded for practical use.
pub const DEFAULT_EXPLORATION_FRACTION: f64 = 0.37;

mod error;
pub use error::{Error, Result};

mod pool;
pub use pool::*;

mod selector;
pub use selector::*;

mod trial;
pub use trial::*;

mod history;
pub use history::*;

mod stats;
pub use stats::*;

mod runner;
pub use runner::*;

pub mod theory;
