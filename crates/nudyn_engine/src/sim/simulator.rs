//! Single-threaded simulation pipeline.
//!
//! The [`KaonDccSimulator`] coordinates:
//! 1. Event generation (via [`KaonGenerator`])
//! 2. Recorder notification (via [`DistributionRecorder`])
//! 3. Moment accumulation and finalisation (via [`MomentsAccumulator`])

use std::sync::atomic::{AtomicBool, Ordering};

use nudyn_core::{DistributionRecorder, KaonEvent, MomentsAccumulator, MomentsError, MomentsSummary};
use tracing::{info, info_span, warn};

use crate::generator::{GeneratorParams, KaonGenerator};
use crate::rng::{DccRng, RandomStream};

/// Generate-notify-fold pipeline for one parameter set.
///
/// # Examples
///
/// ```rust
/// use nudyn_core::NullRecorder;
/// use nudyn_engine::generator::GeneratorParams;
/// use nudyn_engine::rng::DccRng;
/// use nudyn_engine::sim::KaonDccSimulator;
///
/// let params = GeneratorParams::builder()
///     .multiplicity(1.0, 200.0)
///     .kaon_fraction(0.3)
///     .dcc_fraction(0.0)
///     .build()
///     .unwrap();
///
/// let mut simulator = KaonDccSimulator::new(params, DccRng::from_seed(42));
/// let summary = simulator.run(10_000, &mut NullRecorder).unwrap();
/// assert_eq!(summary.n_events(), 10_000);
/// ```
#[derive(Clone, Debug)]
pub struct KaonDccSimulator<R: RandomStream = DccRng> {
    generator: KaonGenerator<R>,
    moments: MomentsAccumulator,
}

impl<R: RandomStream> KaonDccSimulator<R> {
    /// Creates a simulator with an empty accumulator.
    pub fn new(params: GeneratorParams, rng: R) -> Self {
        Self {
            generator: KaonGenerator::new(params, rng),
            moments: MomentsAccumulator::new(),
        }
    }

    /// The event generator.
    #[inline]
    pub fn generator(&self) -> &KaonGenerator<R> {
        &self.generator
    }

    /// The accumulator.
    #[inline]
    pub fn moments(&self) -> &MomentsAccumulator {
        &self.moments
    }

    /// Mutable access to the accumulator, e.g. to reset it between epochs.
    #[inline]
    pub fn moments_mut(&mut self) -> &mut MomentsAccumulator {
        &mut self.moments
    }

    /// Releases the accumulator.
    pub fn into_moments(self) -> MomentsAccumulator {
        self.moments
    }

    /// Generates one event, notifies `recorder`, and folds the event.
    pub fn step<D: DistributionRecorder + ?Sized>(&mut self, recorder: &mut D) -> KaonEvent {
        let event = self.generator.generate();
        recorder.notify(&event);
        self.moments.add(&event);
        event
    }

    /// Runs up to `n_events` steps, stopping early at an event boundary once
    /// `cancel` is raised. Returns the number of events generated.
    pub fn accumulate<D: DistributionRecorder + ?Sized>(
        &mut self,
        n_events: u64,
        recorder: &mut D,
        cancel: Option<&AtomicBool>,
    ) -> u64 {
        for generated in 0..n_events {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                warn!(generated, requested = n_events, "Run cancelled");
                return generated;
            }
            self.step(recorder);
        }
        n_events
    }

    /// Generates `n_events` events and finalises the accumulator.
    ///
    /// # Errors
    ///
    /// Returns [`MomentsError::InsufficientData`] if fewer than two events
    /// have been accumulated in total.
    pub fn run<D: DistributionRecorder + ?Sized>(
        &mut self,
        n_events: u64,
        recorder: &mut D,
    ) -> Result<&MomentsSummary, MomentsError> {
        let label = self.generator.params().label();
        let _span = info_span!("simulate", config = %label).entered();
        info!(n_events, "Generating events");

        self.accumulate(n_events, recorder, None);
        let summary = self.moments.finalize()?;

        for field in summary.undefined_fields() {
            warn!(%field, "Derived ratio is undefined");
        }
        info!(
            n_events = summary.n_events(),
            nu_dyn_ch0 = ?summary.nu_dyn_ch0().ok(),
            nu_dyn_ch0s = ?summary.nu_dyn_ch0s().ok(),
            "Moments calculated"
        );
        Ok(summary)
    }
}
