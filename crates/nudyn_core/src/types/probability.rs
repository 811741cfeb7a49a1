//! Bounded success probability for binomial thinning.

use serde::Serialize;

use super::error::ConfigError;

/// A success probability guaranteed to lie in [0, 1].
///
/// Constructed once at configuration time so that every binomial draw in the
/// generation loop is infallible.
///
/// # Examples
/// ```
/// use nudyn_core::types::Probability;
///
/// let p = Probability::new(0.3).unwrap();
/// assert_eq!(p.value(), 0.3);
/// assert!(Probability::new(1.2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Probability(f64);

impl Probability {
    /// Even odds, used for the neutral and short-lived splits.
    pub const HALF: Probability = Probability(0.5);

    /// Creates a probability, rejecting values outside [0, 1] and NaN.
    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidProbability(value))
        }
    }

    /// Returns the underlying value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }
}
