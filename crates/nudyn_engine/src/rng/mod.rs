//! # Random Number Generation Infrastructure
//!
//! This module provides the random deviates consumed by the kaon event
//! generator.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: All generators support seeding for deterministic sequences
//! - **Ownership**: A stream is an explicit value owned by one generator (or one
//!   parallel worker), never ambient global state
//! - **Static dispatch**: Generators are generic over [`RandomStream`]; no
//!   `Box<dyn Trait>` in the event loop
//!
//! ## Module Structure
//!
//! - `stream`: The [`RandomStream`] trait (uniform and binomial deviates)
//! - `prng`: [`DccRng`], the seeded `StdRng`-backed implementation
//!
//! ## Usage Example
//!
//! ```rust
//! use nudyn_core::Probability;
//! use nudyn_engine::rng::{DccRng, RandomStream};
//!
//! let mut rng = DccRng::from_seed(12345);
//!
//! let u = rng.uniform();
//! assert!((0.0..1.0).contains(&u));
//!
//! let k = rng.binomial(100, Probability::HALF);
//! assert!(k <= 100);
//! ```

mod prng;
mod stream;

// Public re-exports
pub use prng::DccRng;
pub use stream::RandomStream;
