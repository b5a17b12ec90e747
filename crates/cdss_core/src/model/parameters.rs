//! Uncertain operating conditions drawn once per trial

use serde::{Deserialize, Serialize};

/// One draw of the four uncertain input factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSample {
    /// Fraction of the patient record available, in [0.6, 1.0]
    pub data_completeness: f64,
    /// How clearly symptoms present, 1 (vague) through 5 (textbook)
    pub symptom_clarity: u8,
    /// Number of deviations from the standard workflow, 0 through 7
    pub workflow_variation: u8,
    /// Seconds until the system responds, >= 0
    pub response_time: f64,
}

impl ParameterSample {
    /// Value of a single factor as a real number, for correlation against the output
    #[must_use]
    pub fn value(&self, factor: Factor) -> f64 {
        match factor {
            Factor::DataCompleteness => self.data_completeness,
            Factor::SymptomClarity => f64::from(self.symptom_clarity),
            Factor::WorkflowVariation => f64::from(self.workflow_variation),
            Factor::ResponseTime => self.response_time,
        }
    }
}

/// The four input factors, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    DataCompleteness,
    SymptomClarity,
    WorkflowVariation,
    ResponseTime,
}

impl Factor {
    pub const ALL: [Factor; 4] = [
        Factor::DataCompleteness,
        Factor::SymptomClarity,
        Factor::WorkflowVariation,
        Factor::ResponseTime,
    ];

    /// Machine-friendly name, matching the serialized field name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::DataCompleteness => "data_completeness",
            Self::SymptomClarity => "symptom_clarity",
            Self::WorkflowVariation => "workflow_variation",
            Self::ResponseTime => "response_time",
        }
    }

    /// Human-readable label for reports and chart axes
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::DataCompleteness => "Data Completeness",
            Self::SymptomClarity => "Symptom Clarity",
            Self::WorkflowVariation => "Workflow Variation",
            Self::ResponseTime => "Response Time",
        }
    }
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
