//! Kaon event generation.
//!
//! [`KaonGenerator`] composes draws from its [`RandomStream`](crate::rng::RandomStream)
//! into one [`KaonEvent`](nudyn_core::KaonEvent) per call:
//!
//! ```text
//! centrality ~ U(minMult, maxMult)
//! k          ~ Bin(trunc(centrality), kaonFraction)
//! k -> k_DCC + k_Binomial                (partition by dccFraction)
//! DCC:      φ ~ U(0,1); k0 = trunc(φ·k_DCC); k0s ~ Bin(k0, ½)
//! Binomial: k0 ~ Bin(k_Binomial, ½);     k0s ~ Bin(k0, ½)
//! ```
//!
//! Parameters are validated once by [`GeneratorParamsBuilder::build`].

pub mod kaon;
pub mod params;

pub use kaon::KaonGenerator;
pub use params::{DccRegime, GeneratorParams, GeneratorParamsBuilder, PartitionRounding};
