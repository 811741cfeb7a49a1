//! Kaon event generator.

use nudyn_core::{KaonEvent, Probability, SpeciesCounts};

use super::params::{DccRegime, GeneratorParams, PartitionRounding};
use crate::rng::{DccRng, RandomStream};

/// Synthetic event generator mixing binomial and DCC kaon production.
///
/// Parameters are fixed at construction; the only mutable state is the owned
/// random stream. Each [`generate`](Self::generate) call consumes draws in a
/// fixed order:
///
/// 1. one uniform for the centrality
/// 2. one binomial for the kaon count
/// 3. one uniform for the partition, only with [`PartitionRounding::Stochastic`]
///    and a mixed population holding kaons
/// 4. if `k_DCC > 0`: one uniform (neutral fraction) and one binomial (short-lived)
/// 5. if `k_Binomial > 0`: two binomials (neutral, then short-lived)
///
/// # Examples
///
/// ```rust
/// use nudyn_engine::generator::{GeneratorParams, KaonGenerator};
/// use nudyn_engine::rng::DccRng;
///
/// let params = GeneratorParams::builder()
///     .multiplicity(800.0, 1000.0)
///     .kaon_fraction(0.3)
///     .dcc_fraction(1.0)
///     .build()
///     .unwrap();
///
/// let mut generator = KaonGenerator::new(params, DccRng::from_seed(7));
/// let event = generator.generate();
/// assert!(event.binomial().is_empty());
/// assert_eq!(event.dcc().k(), event.k());
/// ```
#[derive(Clone, Debug)]
pub struct KaonGenerator<R: RandomStream = DccRng> {
    params: GeneratorParams,
    rng: R,
}

impl<R: RandomStream> KaonGenerator<R> {
    /// Creates a generator owning `rng`.
    pub fn new(params: GeneratorParams, rng: R) -> Self {
        Self { params, rng }
    }

    /// Generation parameters.
    #[inline]
    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    /// The owned random stream.
    #[inline]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Releases the random stream.
    pub fn into_rng(self) -> R {
        self.rng
    }

    /// Generates one event.
    pub fn generate(&mut self) -> KaonEvent {
        let centrality = self
            .rng
            .uniform_in(self.params.min_mult(), self.params.max_mult());

        // The centrality doubles as the trial count.
        let trials = centrality.trunc() as u64;
        let k = self.rng.binomial(trials, self.params.kaon_fraction());

        let (k_dcc, k_binomial) = self.partition(k);
        let dcc = self.dcc_population(k_dcc);
        let binomial = self.binomial_population(k_binomial);

        KaonEvent::new(centrality, binomial, dcc)
    }

    /// Splits `k` into `(k_DCC, k_Binomial)`.
    fn partition(&mut self, k: u64) -> (u64, u64) {
        let k_dcc = match self.params.dcc_regime() {
            DccRegime::PureBinomial => 0,
            DccRegime::PureDcc => k,
            DccRegime::Mixed(fraction) => {
                let share = fraction * k as f64;
                let rounded = match self.params.rounding() {
                    PartitionRounding::Truncate => share.trunc(),
                    PartitionRounding::Nearest => share.round(),
                    PartitionRounding::Stochastic if k > 0 => {
                        let floor = share.floor();
                        if self.rng.uniform() < share - floor {
                            floor + 1.0
                        } else {
                            floor
                        }
                    }
                    PartitionRounding::Stochastic => 0.0,
                };
                (rounded as u64).min(k)
            }
        };
        (k_dcc, k - k_dcc)
    }

    /// DCC population: a single uniform neutral fraction for the whole event.
    fn dcc_population(&mut self, k_dcc: u64) -> SpeciesCounts {
        if k_dcc == 0 {
            return SpeciesCounts::default();
        }
        let neutral_fraction = self.rng.uniform();
        let k0 = ((neutral_fraction * k_dcc as f64).trunc() as u64).min(k_dcc);
        let k0s = self.rng.binomial(k0, Probability::HALF);
        SpeciesCounts::new(k0, k0s, k_dcc - k0)
    }

    /// Binomial population: independent ½ thinning at both stages.
    fn binomial_population(&mut self, k_binomial: u64) -> SpeciesCounts {
        if k_binomial == 0 {
            return SpeciesCounts::default();
        }
        let k0 = self.rng.binomial(k_binomial, Probability::HALF);
        let k0s = self.rng.binomial(k0, Probability::HALF);
        SpeciesCounts::new(k0, k0s, k_binomial - k0)
    }
}
