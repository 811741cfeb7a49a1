//! Running-statistics accumulation and the nuDyn observables.
//!
//! Events are folded into integer running sums ([`RunningSums`]); these are
//! sufficient statistics, so no event is ever retained. On demand the
//! [`MomentsAccumulator`] derives a [`MomentsSummary`] holding per-quantity
//! averages, factorial averages `E[X²] - E[X]`, the correlation ratios and the
//! two dynamical-fluctuation observables:
//!
//! ```text
//! R_xx  = F_x / <x>²        - 1        F_x = <x²> - <x>
//! R_xy  = <x·y> / (<x><y>)  - 1
//! nuDyn_ch0  = R_cc + R_00   - 2 R_c0
//! nuDyn_ch0s = R_cc + R_0s0s - 2 R_c0s
//! ```
//!
//! # Lifecycle
//!
//! ```text
//! Empty --add--> Accumulating --finalize (n >= 2)--> Finalized
//!                     ^                                  |
//!                     +---------------add / merge--------+
//! ```
//!
//! Re-entering accumulation discards the derived summary; only an explicit
//! [`MomentsAccumulator::reset`] zeroes the sums.
//!
//! # Merging
//!
//! Sums are additive, so independently filled accumulators can be merged
//! component-wise before a single `finalize()`. Integer sums make the merge
//! exact: the result does not depend on how events were split or ordered.

mod accumulator;
mod summary;
mod sums;

pub use accumulator::{AccumulatorState, MomentsAccumulator};
pub use summary::{CategoryMoments, MomentsSummary, QuantityMoments};
pub use sums::{CategorySums, RunningSums};
