//! Trial runner
//!
//! Trials run in batches of at most [`MAX_BATCH_SIZE`]. Each batch owns a
//! `SmallRng` seeded from a batch seed, and batch seeds are drawn in order
//! from a single seed source. A trial's randomness therefore depends only on
//! the seed and its position, so sequential and parallel runs agree bit for
//! bit.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rand::rngs::{OsRng, SmallRng};
use rand::{Rng, SeedableRng, TryRngCore};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::model::{AccuracyModel, ResultAccumulator, ResultSet, RunStatus, TrialRecord};
use crate::sampler::ParameterSampler;

/// Upper bound on trials per independently seeded batch
pub const MAX_BATCH_SIZE: usize = 100;

/// Shared progress counters and cancellation flag for a run
#[derive(Debug, Clone)]
pub struct SimulationProgress {
    completed: Arc<AtomicUsize>,
    total: Arc<AtomicUsize>,
    cancelled: Arc<AtomicBool>,
}

impl SimulationProgress {
    #[must_use]
    pub fn new() -> Self {
        Self {
            completed: Arc::new(AtomicUsize::new(0)),
            total: Arc::new(AtomicUsize::new(0)),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Trials completed so far
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    /// Trials requested by the current run
    #[must_use]
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    /// Fraction complete in [0, 1]; 0 before a run starts
    #[must_use]
    pub fn fraction(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.completed() as f64 / total as f64,
        }
    }

    pub fn increment(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Reset counters for a new run. The cancel flag is left alone so a
    /// handle cancelled before the run starts stops it immediately.
    pub fn reset(&self, total: usize) {
        self.completed.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
    }

    /// Ask the run to stop after the trials currently in flight
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Default for SimulationProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs N independent trials and returns a frozen [`ResultSet`]
#[derive(Debug, Clone)]
pub struct SimulationRunner {
    config: SimulationConfig,
    sampler: ParameterSampler,
    model: AccuracyModel,
}

impl SimulationRunner {
    /// Validate the configuration and build a runner
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            model: config.accuracy_model(),
            sampler: ParameterSampler::new(),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn model(&self) -> &AccuracyModel {
        &self.model
    }

    pub fn run(&self) -> ResultSet {
        self.run_with_progress(None)
    }

    /// Run all trials, seeding from the configured seed or from the OS.
    ///
    /// Never fails outright: a random source failure or a cancellation is
    /// recorded in the returned set's [`RunStatus`] next to whatever trials
    /// completed.
    pub fn run_with_progress(&self, progress: Option<&SimulationProgress>) -> ResultSet {
        let seed = match self.config.random_seed {
            Some(seed) => seed,
            None => match OsRng.try_next_u64() {
                Ok(seed) => {
                    debug!(seed, "drew master seed from the operating system");
                    seed
                }
                Err(err) => {
                    warn!(%err, "operating system random source failed before any trial ran");
                    if let Some(p) = progress {
                        p.reset(self.config.trial_count);
                    }
                    let failure = SimulationError::RandomSourceFailure(err.to_string());
                    return ResultAccumulator::new(self.config.trial_count)
                        .finish(Some(RunStatus::Aborted(failure)));
                }
            },
        };

        let mut source = SmallRng::seed_from_u64(seed);
        self.run_with_source(&mut source, progress)
    }

    /// Run all trials drawing batch seeds from `source`.
    ///
    /// If the source fails, only the batches whose seeds were already drawn
    /// are executed and the set is tagged [`RunStatus::Aborted`].
    pub fn run_with_source<S: TryRngCore + ?Sized>(
        &self,
        source: &mut S,
        progress: Option<&SimulationProgress>,
    ) -> ResultSet {
        let total = self.config.trial_count;
        let num_batches = total.div_ceil(MAX_BATCH_SIZE);

        if let Some(p) = progress {
            p.reset(total);
        }

        let mut stop = None;
        let mut batch_seeds = Vec::with_capacity(num_batches);
        for batch in 0..num_batches {
            match source.try_next_u64() {
                Ok(seed) => batch_seeds.push(seed),
                Err(err) => {
                    warn!(batch, %err, "random source failed; aborting run");
                    stop = Some(RunStatus::Aborted(SimulationError::RandomSourceFailure(
                        err.to_string(),
                    )));
                    break;
                }
            }
        }

        debug!(
            trials = total,
            batches = batch_seeds.len(),
            parallel = self.config.parallel,
            "starting simulation run"
        );

        let mut results = ResultAccumulator::new(total);
        for batch in self.execute(&batch_seeds, total, progress) {
            results.extend(batch);
        }

        if stop.is_none() && progress.is_some_and(SimulationProgress::is_cancelled) {
            info!(
                completed = results.len(),
                requested = total,
                "simulation cancelled"
            );
            stop = Some(RunStatus::Cancelled);
        }

        let results = results.finish(stop);
        debug!(
            completed = results.len(),
            requested = total,
            partial = results.is_partial(),
            "simulation run finished"
        );
        results
    }

    fn execute(
        &self,
        batch_seeds: &[u64],
        total: usize,
        progress: Option<&SimulationProgress>,
    ) -> Vec<Vec<TrialRecord>> {
        let run = |(index, &seed): (usize, &u64)| {
            self.run_batch(seed, batch_len(index, total), progress)
        };

        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                return batch_seeds.par_iter().enumerate().map(run).collect();
            }
        }

        batch_seeds.iter().enumerate().map(run).collect()
    }

    fn run_batch(
        &self,
        seed: u64,
        len: usize,
        progress: Option<&SimulationProgress>,
    ) -> Vec<TrialRecord> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut records = Vec::with_capacity(len);

        for _ in 0..len {
            if progress.is_some_and(SimulationProgress::is_cancelled) {
                break;
            }
            records.push(run_trial(&self.sampler, &self.model, &mut rng));
            if let Some(p) = progress {
                p.increment();
            }
        }

        records
    }
}

/// Size of batch `index` when `total` trials are split into full batches
fn batch_len(index: usize, total: usize) -> usize {
    (total - index * MAX_BATCH_SIZE).min(MAX_BATCH_SIZE)
}

fn run_trial<R: Rng + ?Sized>(
    sampler: &ParameterSampler,
    model: &AccuracyModel,
    rng: &mut R,
) -> TrialRecord {
    TrialRecord::evaluate(sampler.sample(rng), model)
}

/// Validate `config` and run it to completion
pub fn simulate(config: &SimulationConfig) -> Result<ResultSet> {
    Ok(SimulationRunner::new(config.clone())?.run())
}
