mod accuracy;
mod parameters;
mod results;

pub use accuracy::{
    AccuracyModel, DEFAULT_BASE_ACCURACY_RATE, MAX_SYMPTOM_CLARITY, RESPONSE_PENALTY_CAP,
    RESPONSE_PENALTY_SCALE, WORKFLOW_PENALTY_PER_STEP,
};
pub use parameters::{Factor, ParameterSample};
pub use results::{ResultSet, RunStatus, TrialRecord};

pub(crate) use results::ResultAccumulator;
