//! Error types for structured error handling.
//!
//! This module provides:
//! - `ConfigError`: Invalid generator or simulation parameters (fatal, raised at construction)
//! - `MomentsError`: Failures when deriving statistics from the running sums
//! - `RatioField`: Identifies which derived ratio is undefined

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid construction parameters.
///
/// Raised by builders and constructors only; never at generation time.
/// No default is ever substituted for a rejected value.
///
/// # Examples
/// ```
/// use nudyn_core::types::ConfigError;
///
/// let err = ConfigError::InvalidKaonFraction(1.5);
/// assert_eq!(err.to_string(), "Invalid kaon fraction 1.5: must lie in (0, 1)");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Kaon fraction outside the open interval (0, 1).
    #[error("Invalid kaon fraction {0}: must lie in (0, 1)")]
    InvalidKaonFraction(f64),

    /// DCC fraction outside the closed interval [0, 1].
    #[error("Invalid DCC fraction {0}: must lie in [0, 1]")]
    InvalidDccFraction(f64),

    /// Multiplicity bounds that are negative, non-finite or not strictly ordered.
    #[error("Invalid multiplicity range [{min}, {max}): require 0 <= min < max")]
    InvalidMultiplicityRange {
        /// Lower multiplicity bound.
        min: f64,
        /// Upper multiplicity bound.
        max: f64,
    },

    /// Probability outside [0, 1] or not finite.
    #[error("Invalid probability {0}: must lie in [0, 1]")]
    InvalidProbability(f64),

    /// Requested event count of zero.
    #[error("Invalid event count {0}: at least one event must be requested")]
    InvalidEventCount(u64),

    /// Worker count of zero.
    #[error("Invalid worker count {0}: at least one worker is required")]
    InvalidWorkerCount(usize),

    /// Invalid or missing parameter with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

/// Derived ratio identifiers, used to report which field is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatioField {
    /// Neutral-neutral correlation ratio.
    R00,
    /// Short-lived neutral correlation ratio.
    R0s0s,
    /// Charged-charged correlation ratio.
    Rcc,
    /// Charged-neutral cross ratio.
    Rc0,
    /// Charged-short-lived cross ratio.
    Rc0s,
    /// Charged versus neutral dynamical fluctuation.
    NuDynCh0,
    /// Charged versus short-lived neutral dynamical fluctuation.
    NuDynCh0s,
}

impl RatioField {
    /// All ratio fields in reporting order.
    pub const ALL: [RatioField; 7] = [
        RatioField::R00,
        RatioField::R0s0s,
        RatioField::Rcc,
        RatioField::Rc0,
        RatioField::Rc0s,
        RatioField::NuDynCh0,
        RatioField::NuDynCh0s,
    ];

    /// Conventional name of the observable.
    pub const fn name(self) -> &'static str {
        match self {
            RatioField::R00 => "R_00",
            RatioField::R0s0s => "R_0s0s",
            RatioField::Rcc => "R_cc",
            RatioField::Rc0 => "R_c0",
            RatioField::Rc0s => "R_c0s",
            RatioField::NuDynCh0 => "nuDyn_ch0",
            RatioField::NuDynCh0s => "nuDyn_ch0s",
        }
    }
}

impl fmt::Display for RatioField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors from deriving statistics out of the running sums.
///
/// # Variants
/// - `InsufficientData`: fewer than two events folded; recoverable by adding more
/// - `UndefinedRatio`: a denominator average is exactly zero for one derived field
///
/// # Examples
/// ```
/// use nudyn_core::types::{MomentsError, RatioField};
///
/// let err = MomentsError::UndefinedRatio { field: RatioField::R0s0s };
/// assert_eq!(err.to_string(), "Undefined ratio R_0s0s: denominator average is zero");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MomentsError {
    /// `finalize()` called with fewer than two events.
    #[error("Insufficient data: {n_events} event(s) accumulated, at least 2 required")]
    InsufficientData {
        /// Number of events folded so far.
        n_events: u64,
    },

    /// The denominator average of a derived ratio is exactly zero.
    #[error("Undefined ratio {field}: denominator average is zero")]
    UndefinedRatio {
        /// The affected derived field.
        field: RatioField,
    },
}
