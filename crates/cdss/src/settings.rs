//! Configuration loading
//!
//! A run is configured from an optional YAML file, then from command-line
//! overrides. Missing file keys take the engine defaults.

use std::fs;
use std::path::Path;

use cdss_core::{SimulationBuilder, SimulationConfig, StdDevConvention};
use color_eyre::eyre::{Context, Result, eyre};

/// Parse a YAML configuration document
pub fn parse_config(yaml: &str) -> Result<SimulationConfig> {
    serde_saphyr::from_str(yaml).map_err(|e| eyre!("invalid simulation config: {e}"))
}

/// Load a YAML configuration file
pub fn load_config(path: &Path) -> Result<SimulationConfig> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&content).wrap_err_with(|| format!("in {}", path.display()))
}

/// Values given on the command line. `None` keeps the file value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub trials: Option<usize>,
    pub seed: Option<u64>,
    pub base_rate: Option<f64>,
    pub sample_std: bool,
    pub sequential: bool,
}

impl Overrides {
    /// Apply the overrides and validate the result
    pub fn apply(&self, config: SimulationConfig) -> Result<SimulationConfig> {
        let mut builder = SimulationBuilder::from_config(config);
        if let Some(trials) = self.trials {
            builder = builder.trials(trials);
        }
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        if let Some(rate) = self.base_rate {
            builder = builder.base_rate(rate);
        }
        if self.sample_std {
            builder = builder.std_convention(StdDevConvention::Sample);
        }
        if self.sequential {
            builder = builder.sequential();
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let config = parse_config("trial_count: 500\nrandom_seed: 42\n").unwrap();
        assert_eq!(config.trial_count, 500);
        assert_eq!(config.random_seed, Some(42));
        assert_eq!(config.base_accuracy_rate, 90.0);
        assert_eq!(config.std_convention, StdDevConvention::Population);
        assert!(config.parallel);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = "trial_count: 20\nbase_accuracy_rate: 85.5\nstd_convention: sample\nparallel: false\n";
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.base_accuracy_rate, 85.5);
        assert_eq!(config.std_convention, StdDevConvention::Sample);
        assert!(!config.parallel);
        assert_eq!(config.random_seed, None);
    }

    #[test]
    fn test_misspelled_key_is_rejected() {
        let err = parse_config("trials: 50\n").unwrap_err();
        assert!(err.to_string().contains("invalid simulation config"));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.yaml");
        fs::write(&path, "trial_count: 123\n").unwrap();

        assert_eq!(load_config(&path).unwrap().trial_count, 123);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempdir().unwrap();
        let err = load_config(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = parse_config("trial_count: 500\nrandom_seed: 1\n").unwrap();
        let overrides = Overrides {
            trials: Some(50),
            seed: Some(9),
            base_rate: Some(80.0),
            sample_std: true,
            sequential: true,
        };
        let config = overrides.apply(file).unwrap();

        assert_eq!(config.trial_count, 50);
        assert_eq!(config.random_seed, Some(9));
        assert_eq!(config.base_accuracy_rate, 80.0);
        assert_eq!(config.std_convention, StdDevConvention::Sample);
        assert!(!config.parallel);
    }

    #[test]
    fn test_overrides_reject_invalid_values() {
        let overrides = Overrides {
            trials: Some(0),
            ..Overrides::default()
        };
        assert!(overrides.apply(SimulationConfig::default()).is_err());
    }
}
