//! Per-category kaon counts.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Charge decomposition of one kaon category.
///
/// Holds the neutral (`k0`), short-lived neutral (`k0s`) and charged (`kc`)
/// counts. The category total `k` is always `k0 + kc`; it is derived rather
/// than stored, so the decomposition can never disagree with the total.
///
/// # Examples
/// ```
/// use nudyn_core::types::SpeciesCounts;
///
/// let counts = SpeciesCounts::new(4, 1, 6);
/// assert_eq!(counts.k(), 10);
/// assert_eq!(counts.k0_fraction(), Some(0.4));
/// assert_eq!(SpeciesCounts::default().k0_fraction(), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSpeciesCounts")]
pub struct SpeciesCounts {
    k0: u64,
    k0s: u64,
    kc: u64,
}

impl SpeciesCounts {
    /// Creates a decomposition from its neutral, short-lived and charged parts.
    ///
    /// # Panics
    ///
    /// Panics if `k0s > k0`; use [`try_new`](Self::try_new) for unchecked input.
    #[inline]
    pub fn new(k0: u64, k0s: u64, kc: u64) -> Self {
        assert!(k0s <= k0, "k0s ({k0s}) exceeds k0 ({k0})");
        Self { k0, k0s, kc }
    }

    /// Creates a decomposition, rejecting a short-lived count above `k0`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] naming `k0s` if `k0s > k0`.
    pub fn try_new(k0: u64, k0s: u64, kc: u64) -> Result<Self, ConfigError> {
        if k0s <= k0 {
            Ok(Self { k0, k0s, kc })
        } else {
            Err(ConfigError::InvalidParameter {
                name: "k0s",
                value: format!("{k0s} exceeds k0 = {k0}"),
            })
        }
    }

    /// Total kaons in the category.
    #[inline]
    pub const fn k(&self) -> u64 {
        self.k0 + self.kc
    }

    /// Neutral kaons.
    #[inline]
    pub const fn k0(&self) -> u64 {
        self.k0
    }

    /// Short-lived neutral kaons.
    #[inline]
    pub const fn k0s(&self) -> u64 {
        self.k0s
    }

    /// Charged kaons.
    #[inline]
    pub const fn kc(&self) -> u64 {
        self.kc
    }

    /// Returns `true` when the category holds no kaons.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.k() == 0
    }

    /// Neutral fraction `k0 / k`, `None` for an empty category.
    pub fn k0_fraction(&self) -> Option<f64> {
        ratio(self.k0, self.k())
    }

    /// Short-lived fraction `k0s / k`, `None` for an empty category.
    pub fn k0s_fraction(&self) -> Option<f64> {
        ratio(self.k0s, self.k())
    }
}

impl Add for SpeciesCounts {
    type Output = SpeciesCounts;

    fn add(self, rhs: SpeciesCounts) -> SpeciesCounts {
        SpeciesCounts {
            k0: self.k0 + rhs.k0,
            k0s: self.k0s + rhs.k0s,
            kc: self.kc + rhs.kc,
        }
    }
}

impl fmt::Display for SpeciesCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "k={} k0={} k0s={} kc={}",
            self.k(),
            self.k0,
            self.k0s,
            self.kc
        )
    }
}

/// Unvalidated wire form; deserialisation goes through [`SpeciesCounts::try_new`].
#[derive(Deserialize)]
struct RawSpeciesCounts {
    k0: u64,
    k0s: u64,
    kc: u64,
}

impl TryFrom<RawSpeciesCounts> for SpeciesCounts {
    type Error = ConfigError;

    fn try_from(raw: RawSpeciesCounts) -> Result<Self, Self::Error> {
        Self::try_new(raw.k0, raw.k0s, raw.kc)
    }
}

fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}
