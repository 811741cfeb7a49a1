//! Rayon-based worker batches.
//!
//! The requested event count is partitioned across independent workers. Each
//! worker owns a private [`DccRng`], seeded from a per-worker seed derived
//! from the master seed, and a private [`MomentsAccumulator`]. Running sums
//! are additive, so the per-worker accumulators are merged before a single
//! `finalize()`; cross-worker merging is the only synchronisation point.
//!
//! For a fixed master seed and worker count the merged sums do not depend on
//! thread scheduling.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use nudyn_core::{DistributionRecorder, MomentsAccumulator, NullRecorder};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::config::SimulationConfig;
use super::simulator::KaonDccSimulator;
use crate::generator::GeneratorParams;
use crate::rng::DccRng;

/// Result of a parallel run.
#[derive(Debug)]
pub struct ParallelOutcome<D> {
    /// Merged accumulator, not yet finalised.
    pub moments: MomentsAccumulator,
    /// Master seed actually used (drawn from entropy when none was configured).
    pub seed: u64,
    /// Per-worker recorders, in worker order.
    pub recorders: Vec<D>,
}

impl<D> ParallelOutcome<D> {
    /// Returns `true` when fewer events were generated than requested.
    pub fn is_partial(&self, config: &SimulationConfig) -> bool {
        self.moments.n_events() < config.n_events()
    }
}

/// Data-parallel simulation over a rayon pool.
///
/// # Examples
///
/// ```rust
/// use nudyn_engine::generator::GeneratorParams;
/// use nudyn_engine::sim::{ParallelRunner, SimulationConfig};
///
/// let params = GeneratorParams::builder()
///     .multiplicity(1.0, 200.0)
///     .kaon_fraction(0.3)
///     .dcc_fraction(0.2)
///     .build()
///     .unwrap();
/// let config = SimulationConfig::builder()
///     .n_events(20_000)
///     .seed(42)
///     .workers(4)
///     .build()
///     .unwrap();
///
/// let mut outcome = ParallelRunner::new(params, config).run();
/// assert_eq!(outcome.moments.n_events(), 20_000);
/// let summary = outcome.moments.finalize().unwrap();
/// println!("nuDyn(ch,0s) = {:?}", summary.nu_dyn_ch0s());
/// ```
#[derive(Clone, Debug)]
pub struct ParallelRunner {
    params: GeneratorParams,
    config: SimulationConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl ParallelRunner {
    /// Creates a runner from validated parameters and configuration.
    pub fn new(params: GeneratorParams, config: SimulationConfig) -> Self {
        Self {
            params,
            config,
            cancel: None,
        }
    }

    /// Shares a cancellation flag with all workers.
    ///
    /// Workers check the flag at every event boundary; the merged partial
    /// accumulator remains a valid estimator.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Run configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs all workers without recorders.
    pub fn run(&self) -> ParallelOutcome<NullRecorder> {
        self.run_with(|_| NullRecorder)
    }

    /// Runs all workers, giving each a recorder built by `make_recorder(worker)`.
    ///
    /// Within a worker, its recorder sees that worker's events in generation order.
    pub fn run_with<D, F>(&self, make_recorder: F) -> ParallelOutcome<D>
    where
        D: DistributionRecorder + Send,
        F: Fn(usize) -> D + Sync,
    {
        let mut master = match self.config.seed() {
            Some(seed) => DccRng::from_seed(seed),
            None => DccRng::from_entropy(),
        };
        let seed = master.seed();
        let counts = self.config.worker_event_counts();
        let seeds = master.derive_seeds(counts.len());

        info!(
            config = %self.params.label(),
            n_events = self.config.n_events(),
            workers = counts.len(),
            seed,
            "Starting parallel run"
        );

        let cancel = self.cancel.as_deref();
        let results: Vec<(MomentsAccumulator, D)> = counts
            .par_iter()
            .zip(seeds.par_iter())
            .enumerate()
            .map(|(worker, (&n_events, &worker_seed))| {
                let mut recorder = make_recorder(worker);
                let mut simulator =
                    KaonDccSimulator::new(self.params, DccRng::from_seed(worker_seed));
                let generated = simulator.accumulate(n_events, &mut recorder, cancel);
                debug!(worker, worker_seed, generated, "Worker finished");
                (simulator.into_moments(), recorder)
            })
            .collect();

        let mut moments = MomentsAccumulator::new();
        let mut recorders = Vec::with_capacity(results.len());
        for (worker_moments, recorder) in results {
            moments.merge(&worker_moments);
            recorders.push(recorder);
        }

        if moments.n_events() < self.config.n_events() {
            warn!(
                generated = moments.n_events(),
                requested = self.config.n_events(),
                "Parallel run ended early"
            );
        }

        ParallelOutcome {
            moments,
            seed,
            recorders,
        }
    }
}
