//! Stateful sink folding events into running sums.

use super::summary::MomentsSummary;
use super::sums::RunningSums;
use crate::types::{KaonEvent, MomentsError};

/// Lifecycle state of a [`MomentsAccumulator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccumulatorState {
    /// No events folded.
    Empty,
    /// At least one event folded since the last finalisation.
    Accumulating,
    /// A derived summary is available and current.
    Finalized,
}

/// Running-statistics accumulator for the nuDyn observables.
///
/// `add()` is O(1) and infallible. `finalize()` derives a [`MomentsSummary`]
/// from the sums and caches it until the next `add()`, `merge()` or `reset()`.
///
/// Only one thread may mutate an accumulator at a time; parallel workers each
/// own one and combine them with [`merge`](Self::merge).
///
/// # Examples
///
/// ```rust
/// use nudyn_core::moments::{AccumulatorState, MomentsAccumulator};
/// use nudyn_core::types::{KaonEvent, MomentsError, SpeciesCounts};
///
/// let event = KaonEvent::new(50.0, SpeciesCounts::new(5, 2, 6), SpeciesCounts::default());
/// let mut moments = MomentsAccumulator::new();
///
/// moments.add(&event);
/// assert_eq!(
///     moments.finalize().unwrap_err(),
///     MomentsError::InsufficientData { n_events: 1 }
/// );
///
/// moments.add(&event);
/// assert!(moments.finalize().is_ok());
/// assert_eq!(moments.state(), AccumulatorState::Finalized);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MomentsAccumulator {
    sums: RunningSums,
    summary: Option<MomentsSummary>,
}

impl MomentsAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an accumulator from previously collected sums.
    pub fn from_sums(sums: RunningSums) -> Self {
        Self {
            sums,
            summary: None,
        }
    }

    /// Folds one event into the running sums.
    ///
    /// Any previously derived summary is discarded.
    #[inline]
    pub fn add(&mut self, event: &KaonEvent) {
        self.summary = None;
        self.sums.add_event(event);
    }

    /// Adds another accumulator's sums component-wise.
    ///
    /// Equivalent to having folded the other accumulator's events into this
    /// one. Any previously derived summary is discarded.
    pub fn merge(&mut self, other: &MomentsAccumulator) {
        self.summary = None;
        self.sums += &other.sums;
    }

    /// Consuming form of [`merge`](Self::merge), convenient for reductions.
    pub fn merged(mut self, other: MomentsAccumulator) -> Self {
        self.merge(&other);
        self
    }

    /// Derives the summary statistics.
    ///
    /// # Errors
    ///
    /// Returns [`MomentsError::InsufficientData`] when fewer than two events
    /// have been folded. The accumulator is left untouched, so the caller may
    /// add more events and retry.
    pub fn finalize(&mut self) -> Result<&MomentsSummary, MomentsError> {
        let summary = match self.summary.take() {
            Some(summary) => summary,
            None => MomentsSummary::from_sums(&self.sums)?,
        };
        Ok(self.summary.insert(summary))
    }

    /// Zeroes the sums and discards any derived summary.
    pub fn reset(&mut self) {
        self.sums = RunningSums::default();
        self.summary = None;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AccumulatorState {
        if self.summary.is_some() {
            AccumulatorState::Finalized
        } else if self.sums.n_events == 0 {
            AccumulatorState::Empty
        } else {
            AccumulatorState::Accumulating
        }
    }

    /// The derived summary, if finalised since the last mutation.
    #[inline]
    pub fn summary(&self) -> Option<&MomentsSummary> {
        self.summary.as_ref()
    }

    /// Raw running sums.
    #[inline]
    pub fn sums(&self) -> &RunningSums {
        &self.sums
    }

    /// Number of events folded.
    #[inline]
    pub fn n_events(&self) -> u64 {
        self.sums.n_events
    }
}
