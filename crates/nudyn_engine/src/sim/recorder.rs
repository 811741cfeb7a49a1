//! Recorder that logs every event.

use nudyn_core::{DistributionRecorder, KaonEvent};
use tracing::debug;

/// Logs each generated event at `debug` level.
///
/// Intended for short diagnostic runs; enable with `RUST_LOG=nudyn_engine=debug`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingRecorder {
    index: u64,
}

impl TracingRecorder {
    /// Creates a recorder starting at event index 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events observed.
    pub fn events_seen(&self) -> u64 {
        self.index
    }
}

impl DistributionRecorder for TracingRecorder {
    fn notify(&mut self, event: &KaonEvent) {
        debug!(index = self.index, %event, "Generated event");
        self.index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nudyn_core::SpeciesCounts;

    #[test]
    fn test_counts_notifications() {
        let mut recorder = TracingRecorder::new();
        let event = KaonEvent::new(1.0, SpeciesCounts::new(1, 0, 0), SpeciesCounts::default());
        recorder.notify(&event);
        recorder.notify(&event);
        assert_eq!(recorder.events_seen(), 2);
    }
}
