//! Source of uniform and binomial deviates.

use nudyn_core::Probability;

/// Supplier of the random deviates used by event generation.
///
/// Implementations must be deterministic for a given seed: the generator's
/// reproducibility guarantee is stated in terms of the sequence of calls made
/// on this trait.
pub trait RandomStream {
    /// Uniform deviate in [0, 1).
    fn uniform(&mut self) -> f64;

    /// Number of successes in `trials` independent trials with probability `p`.
    ///
    /// The result never exceeds `trials`.
    fn binomial(&mut self, trials: u64, p: Probability) -> u64;

    /// Uniform deviate in [`low`, `high`), built from a single [`uniform`](Self::uniform) draw.
    ///
    /// Requires `low < high`. Scaling a draw just below 1 can round up to
    /// `high`; such results are clamped to the largest value below `high`.
    #[inline]
    fn uniform_in(&mut self, low: f64, high: f64) -> f64 {
        let value = low + (high - low) * self.uniform();
        if value < high {
            value
        } else {
            largest_below(high).max(low)
        }
    }
}

/// Largest finite `f64` strictly below `x`.
fn largest_below(x: f64) -> f64 {
    if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else if x == 0.0 {
        -f64::from_bits(1)
    } else {
        f64::from_bits(x.to_bits() + 1)
    }
}

impl<R: RandomStream + ?Sized> RandomStream for &mut R {
    #[inline]
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }

    #[inline]
    fn binomial(&mut self, trials: u64, p: Probability) -> u64 {
        (**self).binomial(trials, p)
    }
}
