//! Runs a simulation on a worker thread and logs progress while it runs

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use cdss_core::{ResultSet, SimulationProgress, SimulationRunner};
use color_eyre::eyre::{Result, eyre};

/// How often progress is logged while the run is in flight
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

/// Run to completion, logging progress every `interval`. Returns as soon as
/// the worker delivers its result.
pub fn run_watched(
    runner: &SimulationRunner,
    progress: &SimulationProgress,
    interval: Duration,
) -> Result<ResultSet> {
    thread::scope(|s| {
        let (tx, rx) = mpsc::channel();
        let worker = s.spawn(move || {
            // The receiver only goes away once a result arrived.
            let _ = tx.send(runner.run_with_progress(Some(progress)));
        });

        loop {
            match rx.recv_timeout(interval) {
                Ok(results) => return Ok(results),
                Err(RecvTimeoutError::Timeout) => tracing::debug!(
                    completed = progress.completed(),
                    total = progress.total(),
                    "{:.0}% complete",
                    progress.fraction() * 100.0
                ),
                Err(RecvTimeoutError::Disconnected) => {
                    // Joining takes ownership of the panic so the scope does not rethrow it.
                    let _ = worker.join();
                    return Err(eyre!("simulation thread panicked"));
                }
            }
        }
    })
}
