//! Notification contract for distribution recorders.
//!
//! A recorder receives every generated event exactly once, in generation
//! order, after all of its fields are populated. Recorders build histograms
//! or other visual output outside this workspace; the simulator only
//! guarantees the notification.

use crate::types::KaonEvent;

/// Receiver of generated events.
///
/// Implemented for any `FnMut(&KaonEvent)` closure.
///
/// # Examples
///
/// ```rust
/// use nudyn_core::recorder::DistributionRecorder;
/// use nudyn_core::types::{KaonEvent, SpeciesCounts};
///
/// let mut multiplicities = Vec::new();
/// let mut recorder = |event: &KaonEvent| multiplicities.push(event.k());
///
/// recorder.notify(&KaonEvent::new(1.0, SpeciesCounts::new(1, 0, 1), SpeciesCounts::default()));
/// assert_eq!(multiplicities, vec![2]);
/// ```
pub trait DistributionRecorder {
    /// Observes one fully populated event.
    fn notify(&mut self, event: &KaonEvent);
}

impl<F> DistributionRecorder for F
where
    F: FnMut(&KaonEvent),
{
    #[inline]
    fn notify(&mut self, event: &KaonEvent) {
        self(event)
    }
}

/// Recorder that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRecorder;

impl DistributionRecorder for NullRecorder {
    #[inline]
    fn notify(&mut self, _event: &KaonEvent) {}
}
