//! # nudyn_engine: Event Generation and Simulation Drivers
//!
//! ## Layer 2 Role
//!
//! nudyn_engine turns validated parameters into streams of [`KaonEvent`]s and
//! folds them into a [`MomentsAccumulator`]:
//! - Seeded random number generation behind the [`RandomStream`] trait (`rng`)
//! - Multi-stage binomial thinning with a randomised DCC neutral fraction (`generator`)
//! - Single-threaded simulation and rayon worker batches (`sim`)
//!
//! ## Reproducibility
//!
//! Every generator owns its random stream exclusively. For a fixed seed and
//! parameter set, generation consumes draws in a fixed order, so a run can be
//! replayed exactly. Parallel workers receive independent seeds derived from a
//! master seed.
//!
//! ## Usage Example
//!
//! ```rust
//! use nudyn_core::NullRecorder;
//! use nudyn_engine::generator::GeneratorParams;
//! use nudyn_engine::rng::DccRng;
//! use nudyn_engine::sim::KaonDccSimulator;
//!
//! let params = GeneratorParams::builder()
//!     .multiplicity(1.0, 200.0)
//!     .kaon_fraction(0.3)
//!     .dcc_fraction(0.5)
//!     .build()
//!     .unwrap();
//!
//! let mut simulator = KaonDccSimulator::new(params, DccRng::from_seed(42));
//! let summary = simulator.run(1_000, &mut NullRecorder).unwrap();
//! println!("nuDyn(ch,0) = {:?}", summary.nu_dyn_ch0());
//! ```
//!
//! [`KaonEvent`]: nudyn_core::KaonEvent
//! [`MomentsAccumulator`]: nudyn_core::MomentsAccumulator
//! [`RandomStream`]: rng::RandomStream

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod generator;
pub mod rng;
pub mod sim;

pub use generator::{GeneratorParams, KaonGenerator, PartitionRounding};
pub use rng::{DccRng, RandomStream};
pub use sim::{KaonDccSimulator, ParallelRunner, SimulationConfig, TracingRecorder};
