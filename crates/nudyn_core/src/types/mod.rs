//! Event model and error types.
//!
//! This module provides:
//! - `counts`: [`SpeciesCounts`], the neutral/short-lived/charged split of one kaon category
//! - `event`: [`KaonEvent`], one generated observation built from two categories
//! - `probability`: [`Probability`], a bounded success probability for binomial thinning
//! - `error`: Structured error types for configuration and moments operations
//!
//! # Re-exports
//!
//! Commonly used types are re-exported at this module level.

pub mod counts;
pub mod error;
pub mod event;
pub mod probability;

pub use counts::SpeciesCounts;
pub use error::{ConfigError, MomentsError, RatioField};
pub use event::KaonEvent;
pub use probability::Probability;
