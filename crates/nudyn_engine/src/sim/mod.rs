//! Simulation drivers.
//!
//! # Architecture
//!
//! ```text
//! KaonDccSimulator                 ParallelRunner
//! ├── KaonGenerator<R>             ├── SimulationConfig (events, seed, workers)
//! ├── MomentsAccumulator           └── per worker: DccRng + KaonDccSimulator
//! └── DistributionRecorder              └── reduce: MomentsAccumulator::merge
//! ```
//!
//! The simulator is single-threaded and synchronous: generate, notify, fold,
//! repeat, finalise. The parallel runner partitions the event count across
//! workers that each own a private stream and accumulator, and merges the
//! accumulators before a single finalisation.

pub mod config;
pub mod parallel;
pub mod recorder;
pub mod simulator;

pub use config::{SimulationConfig, SimulationConfigBuilder};
pub use parallel::{ParallelOutcome, ParallelRunner};
pub use recorder::TracingRecorder;
pub use simulator::KaonDccSimulator;
