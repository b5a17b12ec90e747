use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the simulation engine.
///
/// None of these are retried internally: each one is either a caller
/// misconfiguration or a structural property of the generated data.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SimulationError {
    /// The configuration cannot be run as given
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Statistics were requested on a result set with no completed trials
    #[error("result set is empty: no trials completed")]
    EmptyResultSet,

    /// Every input factor is constant, so no correlation is defined
    #[error("sensitivity is undefined: all input factors are degenerate across {trials} trial(s)")]
    DegenerateSensitivity { trials: usize },

    /// The randomness source failed to produce a value
    #[error("random source failure: {0}")]
    RandomSourceFailure(String),
}

pub type Result<T> = std::result::Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_distinct() {
        let errors = [
            SimulationError::InvalidConfiguration("trial_count must be positive".into()),
            SimulationError::EmptyResultSet,
            SimulationError::DegenerateSensitivity { trials: 1 },
            SimulationError::RandomSourceFailure("entropy unavailable".into()),
        ];

        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(messages[0].contains("trial_count must be positive"));
        assert!(messages[2].contains("1 trial"));
    }
}
