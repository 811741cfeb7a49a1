//! Generated event record.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::counts::SpeciesCounts;

/// One generated observation.
///
/// An event splits its kaons into two disjoint categories, the ordinary
/// binomial population and the DCC population. The combined totals are
/// computed on demand from the two categories and are never stored, so
/// `kc + k0 == k` holds for every event by construction.
///
/// Events are plain values: created by a generator, observed by recorders and
/// accumulators, then dropped.
///
/// # Examples
/// ```
/// use nudyn_core::types::{KaonEvent, SpeciesCounts};
///
/// let event = KaonEvent::new(
///     150.0,
///     SpeciesCounts::new(10, 4, 12),
///     SpeciesCounts::new(3, 1, 1),
/// );
/// assert_eq!(event.k(), 26);
/// assert_eq!(event.total().k0(), 13);
/// assert_eq!(event.total().k0s(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KaonEvent {
    centrality: f64,
    binomial: SpeciesCounts,
    dcc: SpeciesCounts,
}

impl KaonEvent {
    /// Creates an event from its centrality and the two category populations.
    #[inline]
    pub const fn new(centrality: f64, binomial: SpeciesCounts, dcc: SpeciesCounts) -> Self {
        Self {
            centrality,
            binomial,
            dcc,
        }
    }

    /// Continuous multiplicity proxy the event was generated at.
    #[inline]
    pub const fn centrality(&self) -> f64 {
        self.centrality
    }

    /// Ordinary (binomial) population.
    #[inline]
    pub const fn binomial(&self) -> SpeciesCounts {
        self.binomial
    }

    /// DCC population.
    #[inline]
    pub const fn dcc(&self) -> SpeciesCounts {
        self.dcc
    }

    /// Component-wise sum of both populations.
    #[inline]
    pub fn total(&self) -> SpeciesCounts {
        self.binomial + self.dcc
    }

    /// Total kaon count.
    #[inline]
    pub fn k(&self) -> u64 {
        self.total().k()
    }

    /// Overall neutral fraction, `None` when the event holds no kaons.
    pub fn k0_fraction(&self) -> Option<f64> {
        self.total().k0_fraction()
    }

    /// Overall short-lived fraction, `None` when the event holds no kaons.
    pub fn k0s_fraction(&self) -> Option<f64> {
        self.total().k0s_fraction()
    }
}

impl fmt::Display for KaonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "centrality={:.3} total[{}] binomial[{}] dcc[{}]",
            self.centrality,
            self.total(),
            self.binomial,
            self.dcc
        )
    }
}
