//! Deterministic diagnostic accuracy model
//!
//! Accuracy is a base rate scaled by four independent multiplicative factors.
//! Only the response-time penalty is clamped; the output itself never is.

use serde::{Deserialize, Serialize};

use super::ParameterSample;

/// Base diagnostic accuracy, in percent, under ideal conditions
pub const DEFAULT_BASE_ACCURACY_RATE: f64 = 90.0;

/// Highest symptom clarity score; clarity enters the model as `clarity / 5`
pub const MAX_SYMPTOM_CLARITY: f64 = 5.0;

/// Accuracy lost per workflow deviation
pub const WORKFLOW_PENALTY_PER_STEP: f64 = 0.01;

/// Response time (seconds) that maps to a penalty of 1.0 before capping
pub const RESPONSE_PENALTY_SCALE: f64 = 10.0;

/// Ceiling on the response-time penalty
pub const RESPONSE_PENALTY_CAP: f64 = 0.1;

/// Maps a parameter sample to an accuracy percentage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyModel {
    base_rate: f64,
}

impl Default for AccuracyModel {
    fn default() -> Self {
        Self {
            base_rate: DEFAULT_BASE_ACCURACY_RATE,
        }
    }
}

impl AccuracyModel {
    /// Model with a custom base rate (percent). Validation happens in
    /// [`SimulationConfig::validate`](crate::config::SimulationConfig::validate).
    #[must_use]
    pub fn with_base_rate(base_rate: f64) -> Self {
        Self { base_rate }
    }

    #[must_use]
    pub fn base_rate(&self) -> f64 {
        self.base_rate
    }

    /// Response-time penalty, capped at [`RESPONSE_PENALTY_CAP`]
    #[must_use]
    pub fn response_penalty(response_time: f64) -> f64 {
        (response_time / RESPONSE_PENALTY_SCALE).min(RESPONSE_PENALTY_CAP)
    }

    /// Accuracy in percent for one sample
    #[must_use]
    pub fn evaluate(&self, sample: &ParameterSample) -> f64 {
        let clarity = f64::from(sample.symptom_clarity) / MAX_SYMPTOM_CLARITY;
        let workflow = 1.0 - f64::from(sample.workflow_variation) * WORKFLOW_PENALTY_PER_STEP;
        let response = 1.0 - Self::response_penalty(sample.response_time);

        self.base_rate * sample.data_completeness * clarity * workflow * response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(dc: f64, sc: u8, wv: u8, rt: f64) -> ParameterSample {
        ParameterSample {
            data_completeness: dc,
            symptom_clarity: sc,
            workflow_variation: wv,
            response_time: rt,
        }
    }

    #[test]
    fn test_ideal_conditions_are_exact() {
        let model = AccuracyModel::default();
        assert_eq!(model.evaluate(&sample(0.8, 5, 0, 0.0)), 72.0);
        assert_eq!(model.evaluate(&sample(1.0, 5, 0, 0.0)), 90.0);
    }

    #[test]
    fn test_response_penalty_is_capped() {
        let model = AccuracyModel::default();
        let accuracy = model.evaluate(&sample(0.6, 1, 7, 20.0));
        assert!(
            (accuracy - 9.0468).abs() < 1e-9,
            "expected 9.0468, got {accuracy}"
        );

        // Anything at or beyond one second hits the cap
        assert_eq!(AccuracyModel::response_penalty(1.0), RESPONSE_PENALTY_CAP);
        assert_eq!(AccuracyModel::response_penalty(1_000.0), RESPONSE_PENALTY_CAP);
        assert!((AccuracyModel::response_penalty(0.5) - 0.05).abs() < 1e-15);
    }

    #[test]
    fn test_output_is_not_clamped() {
        // A base rate above 100 must pass straight through
        let model = AccuracyModel::with_base_rate(150.0);
        assert_eq!(model.evaluate(&sample(1.0, 5, 0, 0.0)), 150.0);
    }

    #[test]
    fn test_custom_base_rate_scales_linearly() {
        let default = AccuracyModel::default().evaluate(&sample(0.9, 4, 3, 0.4));
        let halved = AccuracyModel::with_base_rate(45.0).evaluate(&sample(0.9, 4, 3, 0.4));
        assert!((default / 2.0 - halved).abs() < 1e-12);
    }
}
