//! Run summary export
//!
//! The summary is written as JSON when the target ends in `.json` and as
//! YAML otherwise.

use std::path::Path;

use cdss_core::{
    ResultSet, RunStatus, SensitivityReport, SimulationConfig, SimulationError, StatisticsReport,
    TrialRecord,
};
use color_eyre::eyre::{Context, Result, eyre};
use jiff::Timestamp;
use serde::Serialize;

use crate::analysis::Analysis;
use crate::util::io::atomic_write;

/// Output format for an exported summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl ExportFormat {
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Everything worth keeping from one run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary<'a> {
    pub generated_at: Timestamp,
    pub config: &'a SimulationConfig,
    pub completed: usize,
    pub requested: usize,
    pub outcome: &'a RunStatus,
    pub statistics: Option<&'a StatisticsReport>,
    pub sensitivity: Option<&'a SensitivityReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<&'a SimulationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trials: Option<&'a [TrialRecord]>,
}

impl<'a> RunSummary<'a> {
    pub fn new(
        config: &'a SimulationConfig,
        results: &'a ResultSet,
        analysis: &'a Analysis,
        include_trials: bool,
    ) -> Self {
        let errors = [
            analysis.statistics.as_ref().err(),
            analysis.sensitivity.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self {
            generated_at: Timestamp::now(),
            config,
            completed: results.len(),
            requested: results.requested(),
            outcome: results.status(),
            statistics: analysis.statistics.as_ref().ok(),
            sensitivity: analysis.sensitivity.as_ref().ok(),
            errors,
            trials: include_trials.then(|| results.trials()),
        }
    }

    pub fn serialize(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => {
                let mut text =
                    serde_json::to_string_pretty(self).wrap_err("failed to encode summary as JSON")?;
                text.push('\n');
                Ok(text)
            }
            ExportFormat::Yaml => serde_saphyr::to_string(self)
                .map_err(|e| eyre!("failed to encode summary as YAML: {e}")),
        }
    }

    /// Write to `path`, picking the format from its extension
    pub fn write(&self, path: &Path) -> Result<()> {
        let text = self.serialize(ExportFormat::from_path(path))?;
        atomic_write(path, &text)
            .wrap_err_with(|| format!("failed to write summary to {}", path.display()))?;
        tracing::info!(path = %path.display(), "summary exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use cdss_core::{SimulationBuilder, SimulationRunner};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn fixture(trials: usize) -> (SimulationConfig, ResultSet, Analysis) {
        let config = SimulationBuilder::new().trials(trials).seed(3).build().unwrap();
        let results = SimulationRunner::new(config.clone()).unwrap().run();
        let analysis = analyze(&results, &config);
        (config, results, analysis)
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_path(&PathBuf::from("a.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(&PathBuf::from("a.JSON")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(&PathBuf::from("a.yaml")), ExportFormat::Yaml);
        assert_eq!(ExportFormat::from_path(&PathBuf::from("summary")), ExportFormat::Yaml);
    }

    #[test]
    fn test_json_export() {
        let (config, results, analysis) = fixture(200);
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.json");

        RunSummary::new(&config, &results, &analysis, false)
            .write(&path)
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["completed"], 200);
        assert_eq!(value["requested"], 200);
        assert_eq!(value["outcome"]["status"], "complete");
        assert_eq!(value["config"]["random_seed"], 3);
        assert!(value["statistics"]["mean_accuracy"].is_f64());
        assert_eq!(value["sensitivity"]["factors"].as_array().unwrap().len(), 4);
        assert!(value.get("trials").is_none());
        assert!(value.get("errors").is_none());
    }

    #[test]
    fn test_json_export_with_trials() {
        let (config, results, analysis) = fixture(5);
        let text = RunSummary::new(&config, &results, &analysis, true)
            .serialize(ExportFormat::Json)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["trials"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_yaml_export_records_errors() {
        let (config, results, analysis) = fixture(1);
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.yaml");

        RunSummary::new(&config, &results, &analysis, false)
            .write(&path)
            .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("generated_at"));
        assert!(text.contains("degenerate_sensitivity"));
        assert!(text.contains("mean_accuracy"));
    }
}
