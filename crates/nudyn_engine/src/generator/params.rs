//! Generator parameters and validation.

use nudyn_core::{ConfigError, Probability};
use serde::{Deserialize, Serialize};

/// Rounding applied when splitting `k` into DCC and binomial populations.
///
/// The DCC share `dccFraction·k` is generally not an integer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionRounding {
    /// Round towards zero. Draws nothing extra.
    #[default]
    Truncate,
    /// Round half away from zero. Draws nothing extra.
    Nearest,
    /// Round up with probability equal to the fractional part.
    ///
    /// Unbiased in expectation. Draws one extra uniform immediately after the
    /// kaon count, only for mixed populations with `k > 0`.
    Stochastic,
}

/// How kaons are shared between the two populations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DccRegime {
    /// `dccFraction == 0`: every kaon is binomial.
    PureBinomial,
    /// `dccFraction == 1`: every kaon is DCC.
    PureDcc,
    /// `0 < dccFraction < 1`.
    Mixed(f64),
}

/// Validated generator parameters.
///
/// Use [`GeneratorParams::builder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use nudyn_engine::generator::{DccRegime, GeneratorParams};
///
/// let params = GeneratorParams::builder()
///     .multiplicity(1.0, 200.0)
///     .kaon_fraction(0.3)
///     .dcc_fraction(0.9)
///     .build()
///     .expect("valid parameters");
///
/// assert_eq!(params.dcc_regime(), DccRegime::Mixed(0.9));
/// assert_eq!(params.label(), "Kaonf=0.30_DCCf=0.90_1M200");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorParams {
    min_mult: f64,
    max_mult: f64,
    kaon_fraction: Probability,
    dcc_fraction: f64,
    rounding: PartitionRounding,
}

impl GeneratorParams {
    /// Creates a new parameter builder.
    #[inline]
    pub fn builder() -> GeneratorParamsBuilder {
        GeneratorParamsBuilder::default()
    }

    /// Lower bound of the centrality range.
    #[inline]
    pub fn min_mult(&self) -> f64 {
        self.min_mult
    }

    /// Upper bound of the centrality range.
    #[inline]
    pub fn max_mult(&self) -> f64 {
        self.max_mult
    }

    /// Probability that a trial produces a kaon.
    #[inline]
    pub fn kaon_fraction(&self) -> Probability {
        self.kaon_fraction
    }

    /// Share of kaons assigned to the DCC population.
    #[inline]
    pub fn dcc_fraction(&self) -> f64 {
        self.dcc_fraction
    }

    /// Partition rounding policy.
    #[inline]
    pub fn rounding(&self) -> PartitionRounding {
        self.rounding
    }

    /// Classifies the DCC fraction.
    pub fn dcc_regime(&self) -> DccRegime {
        if self.dcc_fraction <= 0.0 {
            DccRegime::PureBinomial
        } else if self.dcc_fraction >= 1.0 {
            DccRegime::PureDcc
        } else {
            DccRegime::Mixed(self.dcc_fraction)
        }
    }

    /// Stable label naming this configuration, e.g. `Kaonf=0.30_DCCf=0.90_1M200`.
    pub fn label(&self) -> String {
        format!(
            "Kaonf={:.2}_DCCf={:.2}_{}M{}",
            self.kaon_fraction.value(),
            self.dcc_fraction,
            self.min_mult,
            self.max_mult
        )
    }
}

/// Builder for [`GeneratorParams`].
///
/// Validation happens in [`build`](Self::build); nothing is defaulted except
/// the rounding policy.
#[derive(Clone, Debug, Default)]
pub struct GeneratorParamsBuilder {
    multiplicity: Option<(f64, f64)>,
    kaon_fraction: Option<f64>,
    dcc_fraction: Option<f64>,
    rounding: PartitionRounding,
}

impl GeneratorParamsBuilder {
    /// Sets the centrality range `[min, max)`.
    #[inline]
    pub fn multiplicity(mut self, min: f64, max: f64) -> Self {
        self.multiplicity = Some((min, max));
        self
    }

    /// Sets the kaon fraction, required in (0, 1).
    #[inline]
    pub fn kaon_fraction(mut self, fraction: f64) -> Self {
        self.kaon_fraction = Some(fraction);
        self
    }

    /// Sets the DCC fraction, required in [0, 1].
    #[inline]
    pub fn dcc_fraction(mut self, fraction: f64) -> Self {
        self.dcc_fraction = Some(fraction);
        self
    }

    /// Sets the partition rounding policy.
    #[inline]
    pub fn rounding(mut self, rounding: PartitionRounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Builds the parameters.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - any of multiplicity, kaon fraction or DCC fraction is not set
    /// - `kaon_fraction` is not in (0, 1)
    /// - `dcc_fraction` is not in [0, 1]
    /// - the multiplicity range is not `0 <= min < max` with finite bounds
    pub fn build(self) -> Result<GeneratorParams, ConfigError> {
        let (min_mult, max_mult) = self.multiplicity.ok_or(ConfigError::InvalidParameter {
            name: "multiplicity",
            value: "must be specified".to_string(),
        })?;
        let kaon_fraction = self.kaon_fraction.ok_or(ConfigError::InvalidParameter {
            name: "kaon_fraction",
            value: "must be specified".to_string(),
        })?;
        let dcc_fraction = self.dcc_fraction.ok_or(ConfigError::InvalidParameter {
            name: "dcc_fraction",
            value: "must be specified".to_string(),
        })?;

        if !(kaon_fraction > 0.0 && kaon_fraction < 1.0) {
            return Err(ConfigError::InvalidKaonFraction(kaon_fraction));
        }
        if !(0.0..=1.0).contains(&dcc_fraction) {
            return Err(ConfigError::InvalidDccFraction(dcc_fraction));
        }
        if !(min_mult.is_finite() && max_mult.is_finite() && min_mult >= 0.0 && min_mult < max_mult)
        {
            return Err(ConfigError::InvalidMultiplicityRange {
                min: min_mult,
                max: max_mult,
            });
        }

        Ok(GeneratorParams {
            min_mult,
            max_mult,
            kaon_fraction: Probability::new(kaon_fraction)?,
            dcc_fraction,
            rounding: self.rounding,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> GeneratorParamsBuilder {
        GeneratorParams::builder()
            .multiplicity(1.0, 200.0)
            .kaon_fraction(0.3)
            .dcc_fraction(0.0)
    }

    #[test]
    fn test_builder_valid() {
        let params = valid().build().unwrap();
        assert_eq!(params.min_mult(), 1.0);
        assert_eq!(params.max_mult(), 200.0);
        assert_eq!(params.kaon_fraction().value(), 0.3);
        assert_eq!(params.rounding(), PartitionRounding::Truncate);
        assert_eq!(params.dcc_regime(), DccRegime::PureBinomial);
    }

    #[test]
    fn test_missing_fields() {
        let err = GeneratorParams::builder()
            .kaon_fraction(0.3)
            .dcc_fraction(0.5)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter {
                name: "multiplicity",
                ..
            }
        ));
    }

    #[test]
    fn test_kaon_fraction_is_open_interval() {
        for bad in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
            let err = valid().kaon_fraction(bad).build().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidKaonFraction(_)), "{bad}");
        }
    }

    #[test]
    fn test_dcc_fraction_is_closed_interval() {
        assert_eq!(
            valid().dcc_fraction(1.0).build().unwrap().dcc_regime(),
            DccRegime::PureDcc
        );
        for bad in [-0.01, 1.01, f64::NAN] {
            let err = valid().dcc_fraction(bad).build().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidDccFraction(_)), "{bad}");
        }
    }

    #[test]
    fn test_multiplicity_range() {
        assert!(valid().multiplicity(0.0, 0.5).build().is_ok());
        for (min, max) in [(5.0, 5.0), (10.0, 1.0), (-1.0, 10.0), (0.0, f64::INFINITY)] {
            let err = valid().multiplicity(min, max).build().unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidMultiplicityRange { .. }),
                "[{min}, {max})"
            );
        }
    }

    #[test]
    fn test_label() {
        let params = valid()
            .multiplicity(800.0, 1000.0)
            .dcc_fraction(0.25)
            .build()
            .unwrap();
        assert_eq!(params.label(), "Kaonf=0.30_DCCf=0.25_800M1000");
    }
}
