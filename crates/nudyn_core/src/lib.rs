//! # nudyn_core: Event Model and Moments Algebra
//!
//! ## Layer 1 (Foundation) Role
//!
//! nudyn_core is the bottom layer of the DCC toy model workspace, providing:
//! - Kaon count decompositions: [`SpeciesCounts`], [`KaonEvent`] (`types`)
//! - Validated probabilities: [`Probability`] (`types::probability`)
//! - Error taxonomy: [`ConfigError`], [`MomentsError`] (`types::error`)
//! - Running sums and the nuDyn observables: [`MomentsAccumulator`] (`moments`)
//! - The notification contract for distribution recorders (`recorder`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other nudyn_* crates and no random number
//! generation. Event generation lives in `nudyn_engine`.
//!
//! ## Usage Example
//!
//! ```rust
//! use nudyn_core::moments::MomentsAccumulator;
//! use nudyn_core::types::{KaonEvent, SpeciesCounts};
//!
//! let mut moments = MomentsAccumulator::new();
//! moments.add(&KaonEvent::new(10.0, SpeciesCounts::new(2, 1, 3), SpeciesCounts::default()));
//! moments.add(&KaonEvent::new(12.0, SpeciesCounts::new(3, 2, 2), SpeciesCounts::default()));
//!
//! let summary = moments.finalize().unwrap();
//! assert_eq!(summary.n_events(), 2);
//! assert!(summary.nu_dyn_ch0().is_ok());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod moments;
pub mod recorder;
pub mod types;

pub use moments::{AccumulatorState, MomentsAccumulator, MomentsSummary, RunningSums};
pub use recorder::{DistributionRecorder, NullRecorder};
pub use types::{ConfigError, KaonEvent, MomentsError, Probability, RatioField, SpeciesCounts};
