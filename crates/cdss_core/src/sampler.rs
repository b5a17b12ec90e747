//! Random parameter sampling
//!
//! The sampler holds no state of its own; all randomness comes from the
//! generator passed in, so a seeded generator makes every draw reproducible.

use std::ops::RangeInclusive;

use rand::Rng;
use rand_distr::{Distribution, Exp1};

use crate::model::ParameterSample;

/// Domain of `data_completeness` (continuous uniform)
pub const DATA_COMPLETENESS_RANGE: RangeInclusive<f64> = 0.6..=1.0;

/// Domain of `symptom_clarity` (discrete uniform)
pub const SYMPTOM_CLARITY_RANGE: RangeInclusive<u8> = 1..=5;

/// Domain of `workflow_variation` (discrete uniform)
pub const WORKFLOW_VARIATION_RANGE: RangeInclusive<u8> = 0..=7;

/// Mean (scale) of the exponential response-time distribution, in seconds
pub const MEAN_RESPONSE_TIME: f64 = 2.0;

/// Draws one [`ParameterSample`] per call from four independent distributions
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterSampler;

impl ParameterSampler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Draw one sample. Draw order is fixed (completeness, clarity,
    /// workflow, response time) so seeded runs stay reproducible.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ParameterSample {
        let data_completeness = rng.random_range(DATA_COMPLETENESS_RANGE);
        let symptom_clarity = rng.random_range(SYMPTOM_CLARITY_RANGE);
        let workflow_variation = rng.random_range(WORKFLOW_VARIATION_RANGE);
        let standard_exp: f64 = Exp1.sample(rng);

        ParameterSample {
            data_completeness,
            symptom_clarity,
            workflow_variation,
            response_time: standard_exp * MEAN_RESPONSE_TIME,
        }
    }
}
