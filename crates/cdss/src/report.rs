//! Plain-text run summary

use std::fmt::Write;

use cdss_core::{ResultSet, RunStatus, SensitivityReport, SimulationError, StatisticsReport};

use crate::analysis::Analysis;
use crate::util::format::{format_accuracy, format_count, format_seconds};

/// Summary printed after a run
#[must_use]
pub fn render_report(results: &ResultSet, analysis: &Analysis) -> String {
    let mut out = String::new();

    if let Some(note) = completion_note(results) {
        let _ = writeln!(out, "{note}\n");
    }

    out.push_str("Key Statistics:\n");
    match &analysis.statistics {
        Ok(stats) => write_statistics(&mut out, stats),
        Err(err) => {
            let _ = writeln!(out, "  unavailable: {err}");
        }
    }

    out.push_str("\nSensitivity Analysis:\n");
    match &analysis.sensitivity {
        Ok(report) => write_sensitivity(&mut out, report),
        Err(err) => {
            let _ = writeln!(out, "  unavailable: {err}");
        }
    }

    out
}

/// One line describing an incomplete run, `None` when every trial ran
#[must_use]
pub fn completion_note(results: &ResultSet) -> Option<String> {
    let counts = format!(
        "{} of {} trials completed",
        format_count(results.len()),
        format_count(results.requested())
    );
    match results.status() {
        RunStatus::Complete => None,
        RunStatus::Cancelled => Some(format!("Run cancelled: {counts}.")),
        RunStatus::Aborted(err) => Some(format!("Run aborted ({err}): {counts}.")),
    }
}

fn write_statistics(out: &mut String, stats: &StatisticsReport) {
    let _ = writeln!(
        out,
        "  Mean Accuracy: {}",
        format_accuracy(stats.mean_accuracy)
    );
    let _ = writeln!(
        out,
        "  95% CI: [{}, {}]",
        format_accuracy(stats.ci95_lower),
        format_accuracy(stats.ci95_upper)
    );
    let _ = writeln!(
        out,
        "  99th Percentile Response Time: {}",
        format_seconds(stats.p99_response_time)
    );
}

fn write_sensitivity(out: &mut String, report: &SensitivityReport) {
    for entry in report.iter() {
        let _ = write!(out, "  {}: {:.1}%", entry.factor.name(), entry.contribution);
        if entry.correlation.is_degenerate() {
            out.push_str(" (constant)");
        }
        out.push('\n');
    }
}

/// Exit-worthy analysis failure: the run produced nothing to report
#[must_use]
pub fn fatal_error(analysis: &Analysis) -> Option<&SimulationError> {
    match &analysis.statistics {
        Err(err @ SimulationError::EmptyResultSet) => Some(err),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use cdss_core::{SimulationBuilder, SimulationProgress, SimulationRunner};

    fn run(trials: usize) -> (ResultSet, Analysis) {
        let config = SimulationBuilder::new().trials(trials).seed(42).build().unwrap();
        let results = SimulationRunner::new(config.clone()).unwrap().run();
        let analysis = analyze(&results, &config);
        (results, analysis)
    }

    #[test]
    fn test_report_sections() {
        let (results, analysis) = run(1_000);
        let text = render_report(&results, &analysis);

        assert!(text.starts_with("Key Statistics:\n  Mean Accuracy: "));
        assert!(text.contains("  95% CI: ["));
        assert!(text.contains("  99th Percentile Response Time: "));
        assert!(text.contains("\nSensitivity Analysis:\n"));
        for name in [
            "data_completeness",
            "symptom_clarity",
            "workflow_variation",
            "response_time",
        ] {
            assert!(text.contains(&format!("  {name}: ")), "missing {name}");
        }
        assert!(completion_note(&results).is_none());
        assert!(fatal_error(&analysis).is_none());
    }

    #[test]
    fn test_single_trial_reports_degenerate_sensitivity() {
        let (results, analysis) = run(1);
        let text = render_report(&results, &analysis);

        assert!(text.contains("Mean Accuracy"));
        assert!(text.contains("unavailable: "));
    }

    #[test]
    fn test_cancelled_run_is_flagged() {
        let config = SimulationBuilder::new().trials(300).seed(1).build().unwrap();
        let progress = SimulationProgress::new();
        progress.cancel();
        let results = SimulationRunner::new(config.clone())
            .unwrap()
            .run_with_progress(Some(&progress));
        let analysis = analyze(&results, &config);

        let note = completion_note(&results).unwrap();
        assert_eq!(note, "Run cancelled: 0 of 300 trials completed.");
        assert_eq!(fatal_error(&analysis), Some(&SimulationError::EmptyResultSet));
        assert!(render_report(&results, &analysis).starts_with("Run cancelled"));
    }
}
