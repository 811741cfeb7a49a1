//! Integer running sums.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::types::{KaonEvent, SpeciesCounts};

/// First and second power sums of one category's four counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySums {
    /// Σ k
    pub k: u128,
    /// Σ k²
    pub k_sq: u128,
    /// Σ k0
    pub k0: u128,
    /// Σ k0²
    pub k0_sq: u128,
    /// Σ k0s
    pub k0s: u128,
    /// Σ k0s²
    pub k0s_sq: u128,
    /// Σ kc
    pub kc: u128,
    /// Σ kc²
    pub kc_sq: u128,
}

impl CategorySums {
    /// Folds one category's counts into the sums.
    #[inline]
    pub fn add_counts(&mut self, counts: SpeciesCounts) {
        let (k, k0, k0s, kc) = (
            u128::from(counts.k()),
            u128::from(counts.k0()),
            u128::from(counts.k0s()),
            u128::from(counts.kc()),
        );
        self.k += k;
        self.k_sq += k * k;
        self.k0 += k0;
        self.k0_sq += k0 * k0;
        self.k0s += k0s;
        self.k0s_sq += k0s * k0s;
        self.kc += kc;
        self.kc_sq += kc * kc;
    }
}

impl AddAssign<&CategorySums> for CategorySums {
    fn add_assign(&mut self, rhs: &CategorySums) {
        self.k += rhs.k;
        self.k_sq += rhs.k_sq;
        self.k0 += rhs.k0;
        self.k0_sq += rhs.k0_sq;
        self.k0s += rhs.k0s;
        self.k0s_sq += rhs.k0s_sq;
        self.kc += rhs.kc;
        self.kc_sq += rhs.kc_sq;
    }
}

/// Sufficient statistics for every derived moment.
///
/// Counts are integers, so the sums are kept as exact `u128` values; the
/// conversion to `f64` happens once per derived quantity in `finalize()`.
/// This removes accumulation and cancellation error regardless of event count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningSums {
    /// Number of events folded.
    pub n_events: u64,
    /// Sums over the combined population.
    pub total: CategorySums,
    /// Sums over the binomial population.
    pub binomial: CategorySums,
    /// Sums over the DCC population.
    pub dcc: CategorySums,
    /// Σ kc·k0 over the combined population.
    pub kc_k0: u128,
    /// Σ kc·k0s over the combined population.
    pub kc_k0s: u128,
}

impl RunningSums {
    /// Folds one event into the sums.
    pub fn add_event(&mut self, event: &KaonEvent) {
        let total = event.total();
        self.n_events += 1;
        self.total.add_counts(total);
        self.binomial.add_counts(event.binomial());
        self.dcc.add_counts(event.dcc());
        self.kc_k0 += u128::from(total.kc()) * u128::from(total.k0());
        self.kc_k0s += u128::from(total.kc()) * u128::from(total.k0s());
    }
}

impl AddAssign<&RunningSums> for RunningSums {
    fn add_assign(&mut self, rhs: &RunningSums) {
        self.n_events += rhs.n_events;
        self.total += &rhs.total;
        self.binomial += &rhs.binomial;
        self.dcc += &rhs.dcc;
        self.kc_k0 += rhs.kc_k0;
        self.kc_k0s += rhs.kc_k0s;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_event_updates_every_category() {
        let event = KaonEvent::new(
            20.0,
            SpeciesCounts::new(2, 1, 3),
            SpeciesCounts::new(4, 2, 0),
        );
        let mut sums = RunningSums::default();
        sums.add_event(&event);

        assert_eq!(sums.n_events, 1);
        assert_eq!(sums.total.k, 9);
        assert_eq!(sums.total.k_sq, 81);
        assert_eq!(sums.total.k0, 6);
        assert_eq!(sums.total.k0s_sq, 9);
        assert_eq!(sums.binomial.kc_sq, 9);
        assert_eq!(sums.dcc.k0_sq, 16);
        assert_eq!(sums.kc_k0, 18);
        assert_eq!(sums.kc_k0s, 9);
    }

    #[test]
    fn test_empty_event_only_counts() {
        let event = KaonEvent::new(0.5, SpeciesCounts::default(), SpeciesCounts::default());
        let mut sums = RunningSums::default();
        sums.add_event(&event);

        let expected = RunningSums {
            n_events: 1,
            ..RunningSums::default()
        };
        assert_eq!(sums, expected);
    }

    #[test]
    fn test_add_assign_is_componentwise() {
        let a_event = KaonEvent::new(1.0, SpeciesCounts::new(1, 0, 2), SpeciesCounts::default());
        let b_event = KaonEvent::new(1.0, SpeciesCounts::default(), SpeciesCounts::new(3, 3, 1));

        let mut sequential = RunningSums::default();
        sequential.add_event(&a_event);
        sequential.add_event(&b_event);

        let mut a = RunningSums::default();
        a.add_event(&a_event);
        let mut b = RunningSums::default();
        b.add_event(&b_event);
        b += &a;

        assert_eq!(b, sequential);
    }
}
