//! Simulation results
//!
//! A [`ResultSet`] is the frozen output of one run. It is built by the
//! runner through a crate-private [`ResultAccumulator`] and is read-only
//! from then on.

use serde::Serialize;

use super::{AccuracyModel, Factor, ParameterSample};
use crate::error::SimulationError;

/// One trial: the sampled conditions and the accuracy they produced
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrialRecord {
    sample: ParameterSample,
    accuracy: f64,
}

impl TrialRecord {
    /// Evaluate the model on a sample. Records cannot be built any other way.
    pub(crate) fn evaluate(sample: ParameterSample, model: &AccuracyModel) -> Self {
        Self {
            accuracy: model.evaluate(&sample),
            sample,
        }
    }

    #[must_use]
    pub fn sample(&self) -> &ParameterSample {
        &self.sample
    }

    /// Accuracy in percent
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }
}

/// Lifecycle of a result set while the runner is filling it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunState {
    Empty,
    Accumulating,
    Finalized,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum RunStatus {
    /// Every requested trial completed
    Complete,
    /// Stopped early through the progress handle
    Cancelled,
    /// Stopped early because the random source failed
    Aborted(SimulationError),
}

/// Frozen, ordered trial outcomes from one run
#[derive(Debug, Clone, Serialize)]
pub struct ResultSet {
    trials: Vec<TrialRecord>,
    requested: usize,
    status: RunStatus,
}

impl ResultSet {
    /// Number of completed trials
    #[must_use]
    pub fn len(&self) -> usize {
        self.trials.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// Number of trials the run was configured for
    #[must_use]
    pub fn requested(&self) -> usize {
        self.requested
    }

    #[must_use]
    pub fn status(&self) -> &RunStatus {
        &self.status
    }

    /// True when fewer trials completed than were requested
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !matches!(self.status, RunStatus::Complete)
    }

    /// The error that aborted the run, if any
    #[must_use]
    pub fn failure(&self) -> Option<&SimulationError> {
        match &self.status {
            RunStatus::Aborted(err) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub fn trials(&self) -> &[TrialRecord] {
        &self.trials
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrialRecord> {
        self.trials.iter()
    }

    pub fn accuracies(&self) -> impl Iterator<Item = f64> + '_ {
        self.trials.iter().map(TrialRecord::accuracy)
    }

    pub fn response_times(&self) -> impl Iterator<Item = f64> + '_ {
        self.factor_values(Factor::ResponseTime)
    }

    /// Values of one input factor across all trials, in trial order
    pub fn factor_values(&self, factor: Factor) -> impl Iterator<Item = f64> + '_ {
        self.trials.iter().map(move |t| t.sample.value(factor))
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a TrialRecord;
    type IntoIter = std::slice::Iter<'a, TrialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.trials.iter()
    }
}

/// Append-only builder owned by the runner
#[derive(Debug)]
pub(crate) struct ResultAccumulator {
    trials: Vec<TrialRecord>,
    requested: usize,
}

impl ResultAccumulator {
    pub(crate) fn new(requested: usize) -> Self {
        Self {
            trials: Vec::with_capacity(requested),
            requested,
        }
    }

    pub(crate) fn state(&self) -> RunState {
        match self.trials.len() {
            0 => RunState::Empty,
            n if n < self.requested => RunState::Accumulating,
            _ => RunState::Finalized,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.trials.len()
    }

    pub(crate) fn push(&mut self, record: TrialRecord) {
        debug_assert!(self.trials.len() < self.requested);
        self.trials.push(record);
    }

    pub(crate) fn extend(&mut self, records: impl IntoIterator<Item = TrialRecord>) {
        self.trials.extend(records);
        debug_assert!(self.trials.len() <= self.requested);
    }

    /// Freeze the trials. A set that reached the requested count is always
    /// `Complete`, whatever stop reason was passed in.
    pub(crate) fn finish(self, stop: Option<RunStatus>) -> ResultSet {
        let status = match (self.state(), stop) {
            (RunState::Finalized, _) | (_, None) => RunStatus::Complete,
            (_, Some(status)) => status,
        };
        ResultSet {
            trials: self.trials,
            requested: self.requested,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(dc: f64) -> TrialRecord {
        TrialRecord::evaluate(
            ParameterSample {
                data_completeness: dc,
                symptom_clarity: 5,
                workflow_variation: 0,
                response_time: 0.0,
            },
            &AccuracyModel::default(),
        )
    }

    #[test]
    fn test_accumulator_state_transitions() {
        let mut acc = ResultAccumulator::new(2);
        assert_eq!(acc.state(), RunState::Empty);

        acc.push(record(0.8));
        assert_eq!(acc.state(), RunState::Accumulating);

        acc.push(record(1.0));
        assert_eq!(acc.state(), RunState::Finalized);

        let set = acc.finish(None);
        assert_eq!(set.len(), 2);
        assert_eq!(set.requested(), 2);
        assert!(!set.is_partial());
        assert_eq!(set.accuracies().collect::<Vec<_>>(), vec![72.0, 90.0]);
    }

    #[test]
    fn test_partial_set_keeps_stop_reason() {
        let mut acc = ResultAccumulator::new(3);
        acc.push(record(0.8));
        let set = acc.finish(Some(RunStatus::Cancelled));

        assert!(set.is_partial());
        assert_eq!(set.status(), &RunStatus::Cancelled);
        assert_eq!(set.len(), 1);
        assert_eq!(set.requested(), 3);
        assert!(set.failure().is_none());
    }

    #[test]
    fn test_full_set_ignores_late_cancel() {
        let mut acc = ResultAccumulator::new(1);
        acc.push(record(0.9));
        let set = acc.finish(Some(RunStatus::Cancelled));
        assert_eq!(set.status(), &RunStatus::Complete);
    }

    #[test]
    fn test_aborted_set_exposes_failure() {
        let acc = ResultAccumulator::new(5);
        let err = SimulationError::RandomSourceFailure("no entropy".into());
        let set = acc.finish(Some(RunStatus::Aborted(err.clone())));

        assert!(set.is_empty());
        assert!(set.is_partial());
        assert_eq!(set.failure(), Some(&err));
    }

    #[test]
    fn test_factor_columns_follow_trial_order() {
        let mut acc = ResultAccumulator::new(2);
        acc.extend([record(0.7), record(0.9)]);
        let set = acc.finish(None);

        let dc: Vec<f64> = set.factor_values(Factor::DataCompleteness).collect();
        assert_eq!(dc, vec![0.7, 0.9]);
        assert_eq!(set.response_times().collect::<Vec<_>>(), vec![0.0, 0.0]);
        assert_eq!((&set).into_iter().count(), 2);
    }
}
