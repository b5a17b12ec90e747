//! Scenario tests for the simulation engine
//!
//! Tests are organized by topic:
//! - `runner` - Reproducibility, batching, cancellation and source failures
//! - `statistics` - End-to-end statistics on simulated runs
//! - `sensitivity` - Normalization and degenerate-factor policy
//! - `properties` - Property tests over sampled domains


use crate::model::{AccuracyModel, ParameterSample, ResultAccumulator, ResultSet, TrialRecord};

/// Build a finalized result set from hand-picked samples
pub(crate) fn result_set_from(samples: &[ParameterSample]) -> ResultSet {
    let model = AccuracyModel::default();
    let mut acc = ResultAccumulator::new(samples.len());
    acc.extend(samples.iter().map(|s| TrialRecord::evaluate(*s, &model)));
    acc.finish(None)
}

pub(crate) fn sample(dc: f64, sc: u8, wv: u8, rt: f64) -> ParameterSample {
    ParameterSample {
        data_completeness: dc,
        symptom_clarity: sc,
        workflow_variation: wv,
        response_time: rt,
    }
}
