//! Derived statistics record.

use serde::Serialize;

use super::sums::{CategorySums, RunningSums};
use crate::types::{MomentsError, RatioField};

/// Averages of one counted quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct QuantityMoments {
    /// `<x>`
    pub average: f64,
    /// `<x²>`
    pub square_average: f64,
    /// `<x²> - <x>`, i.e. `<x(x-1)>`.
    pub factorial_average: f64,
}

impl QuantityMoments {
    fn from_sums(sum: u128, sum_sq: u128, n: f64) -> Self {
        let average = sum as f64 / n;
        let square_average = sum_sq as f64 / n;
        Self {
            average,
            square_average,
            factorial_average: square_average - average,
        }
    }
}

/// Moments of the four quantities of one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryMoments {
    /// All kaons.
    pub k: QuantityMoments,
    /// Neutral kaons.
    pub k0: QuantityMoments,
    /// Short-lived neutral kaons.
    pub k0s: QuantityMoments,
    /// Charged kaons.
    pub kc: QuantityMoments,
}

impl CategoryMoments {
    fn from_sums(sums: &CategorySums, n: f64) -> Self {
        Self {
            k: QuantityMoments::from_sums(sums.k, sums.k_sq, n),
            k0: QuantityMoments::from_sums(sums.k0, sums.k0_sq, n),
            k0s: QuantityMoments::from_sums(sums.k0s, sums.k0s_sq, n),
            kc: QuantityMoments::from_sums(sums.kc, sums.kc_sq, n),
        }
    }
}

/// Statistics derived from the running sums by `finalize()`.
///
/// Averages are always defined. Each correlation ratio is reported
/// separately: when its denominator average is exactly zero the accessor
/// returns [`MomentsError::UndefinedRatio`] for that field alone, and the
/// serialised form carries `null`. An undefined ratio is never reported as
/// zero or NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MomentsSummary {
    n_events: u64,
    /// Moments of the combined population.
    pub total: CategoryMoments,
    /// Moments of the binomial population.
    pub binomial: CategoryMoments,
    /// Moments of the DCC population.
    pub dcc: CategoryMoments,
    /// `<kc·k0>` over the combined population.
    pub kc_k0_average: f64,
    /// `<kc·k0s>` over the combined population.
    pub kc_k0s_average: f64,
    r_00: Option<f64>,
    r_0s0s: Option<f64>,
    r_cc: Option<f64>,
    r_c0: Option<f64>,
    r_c0s: Option<f64>,
    nu_dyn_ch0: Option<f64>,
    nu_dyn_ch0s: Option<f64>,
}

impl MomentsSummary {
    /// Derives all statistics from `sums`. Requires `sums.n_events >= 2`.
    pub(crate) fn from_sums(sums: &RunningSums) -> Result<Self, MomentsError> {
        if sums.n_events < 2 {
            return Err(MomentsError::InsufficientData {
                n_events: sums.n_events,
            });
        }
        let n = sums.n_events as f64;
        let total = CategoryMoments::from_sums(&sums.total, n);
        let kc_k0_average = sums.kc_k0 as f64 / n;
        let kc_k0s_average = sums.kc_k0s as f64 / n;

        // Denominators are tested on the exact integer sums.
        let (has_k0, has_k0s, has_kc) = (
            sums.total.k0 > 0,
            sums.total.k0s > 0,
            sums.total.kc > 0,
        );

        let r_00 = has_k0.then(|| same_species_ratio(&total.k0));
        let r_0s0s = has_k0s.then(|| same_species_ratio(&total.k0s));
        let r_cc = has_kc.then(|| same_species_ratio(&total.kc));
        let r_c0 = (has_kc && has_k0)
            .then(|| cross_species_ratio(kc_k0_average, &total.kc, &total.k0));
        let r_c0s = (has_kc && has_k0s)
            .then(|| cross_species_ratio(kc_k0s_average, &total.kc, &total.k0s));

        Ok(Self {
            n_events: sums.n_events,
            total,
            binomial: CategoryMoments::from_sums(&sums.binomial, n),
            dcc: CategoryMoments::from_sums(&sums.dcc, n),
            kc_k0_average,
            kc_k0s_average,
            r_00,
            r_0s0s,
            r_cc,
            r_c0,
            r_c0s,
            nu_dyn_ch0: nu_dyn(r_cc, r_00, r_c0),
            nu_dyn_ch0s: nu_dyn(r_cc, r_0s0s, r_c0s),
        })
    }

    /// Number of events the summary was derived from.
    #[inline]
    pub fn n_events(&self) -> u64 {
        self.n_events
    }

    /// `R_00 = F_k0 / <k0>² - 1`
    pub fn r_00(&self) -> Result<f64, MomentsError> {
        defined(self.r_00, RatioField::R00)
    }

    /// `R_0s0s = F_k0s / <k0s>² - 1`
    pub fn r_0s0s(&self) -> Result<f64, MomentsError> {
        defined(self.r_0s0s, RatioField::R0s0s)
    }

    /// `R_cc = F_kc / <kc>² - 1`
    pub fn r_cc(&self) -> Result<f64, MomentsError> {
        defined(self.r_cc, RatioField::Rcc)
    }

    /// `R_c0 = <kc·k0> / (<kc><k0>) - 1`
    pub fn r_c0(&self) -> Result<f64, MomentsError> {
        defined(self.r_c0, RatioField::Rc0)
    }

    /// `R_c0s = <kc·k0s> / (<kc><k0s>) - 1`
    pub fn r_c0s(&self) -> Result<f64, MomentsError> {
        defined(self.r_c0s, RatioField::Rc0s)
    }

    /// `nuDyn_ch0 = R_cc + R_00 - 2 R_c0`
    pub fn nu_dyn_ch0(&self) -> Result<f64, MomentsError> {
        defined(self.nu_dyn_ch0, RatioField::NuDynCh0)
    }

    /// `nuDyn_ch0s = R_cc + R_0s0s - 2 R_c0s`
    pub fn nu_dyn_ch0s(&self) -> Result<f64, MomentsError> {
        defined(self.nu_dyn_ch0s, RatioField::NuDynCh0s)
    }

    /// Looks up a derived ratio by field.
    pub fn ratio(&self, field: RatioField) -> Result<f64, MomentsError> {
        match field {
            RatioField::R00 => self.r_00(),
            RatioField::R0s0s => self.r_0s0s(),
            RatioField::Rcc => self.r_cc(),
            RatioField::Rc0 => self.r_c0(),
            RatioField::Rc0s => self.r_c0s(),
            RatioField::NuDynCh0 => self.nu_dyn_ch0(),
            RatioField::NuDynCh0s => self.nu_dyn_ch0s(),
        }
    }

    /// Fields whose denominator average is zero.
    pub fn undefined_fields(&self) -> Vec<RatioField> {
        RatioField::ALL
            .into_iter()
            .filter(|field| self.ratio(*field).is_err())
            .collect()
    }
}

#[inline]
fn same_species_ratio(x: &QuantityMoments) -> f64 {
    x.factorial_average / x.average / x.average - 1.0
}

#[inline]
fn cross_species_ratio(xy_average: f64, x: &QuantityMoments, y: &QuantityMoments) -> f64 {
    xy_average / x.average / y.average - 1.0
}

#[inline]
fn nu_dyn(r_cc: Option<f64>, r_same: Option<f64>, r_cross: Option<f64>) -> Option<f64> {
    Some(r_cc? + r_same? - 2.0 * r_cross?)
}

#[inline]
fn defined(value: Option<f64>, field: RatioField) -> Result<f64, MomentsError> {
    value.ok_or(MomentsError::UndefinedRatio { field })
}
