//! Append-only trial history.

use crate::trial::Trial;

/// Ordered sequence of completed trials for one session.
///
/// Trials can only be appended; the only way to remove anything is
/// [`TrialHistory::reset`], which clears everything.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialHistory {
    trials: Vec<Trial>,
}

impl TrialHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one completed trial.
    pub fn push(&mut self, trial: Trial) {
        self.trials.push(trial);
    }

    /// Append a batch in order. Returns the appended slice.
    pub fn extend_batch(&mut self, batch: Vec<Trial>) -> &[Trial] {
        let start = self.trials.len();
        self.trials.extend(batch);
        &self.trials[start..]
    }

    /// Drop every trial.
    pub fn reset(&mut self) {
        self.trials.clear();
    }

    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// Trials in completion order.
    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trial> {
        self.trials.iter()
    }

    /// Most recently appended trial.
    pub fn last(&self) -> Option<&Trial> {
        self.trials.last()
    }
}

impl FromIterator<Trial> for TrialHistory {
    fn from_iter<I: IntoIterator<Item = Trial>>(iter: I) -> Self {
        Self {
            trials: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TrialHistory {
    type Item = &'a Trial;
    type IntoIter = std::slice::Iter<'a, Trial>;

    fn into_iter(self) -> Self::IntoIter {
        self.trials.iter()
    }
}
