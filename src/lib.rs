//! # u-statkit
//!
//! Small statistics toolkit: sample containers with cached descriptive
//! statistics, bivariate and N-dimensional analysis, and random variate
//! generators for named distributions.
//!
//! ## Modules
//!
//! - [`sample`] — [`Sample`], a mutable series with memoized statistics
//! - [`pair`] — [`CorrelatedPair`], covariance, correlation, least squares
//! - [`multi`] — [`MultiSample`], N aligned dimensions moved as rows
//! - [`distributions`] — Normal (Box–Muller) and geometric generators
//! - [`random`] — seeded RNG construction
//! - [`stats`] — one-shot free functions over slices
//! - [`combinatorics`] — factorials, permutations, combinations
//!
//! ## Design Philosophy
//!
//! - **Compute once**: derived statistics are cached until the next
//!   mutation, then dropped together.
//! - **Absent, not zero**: undefined results are `None`; distinct
//!   failures are [`StatsError`].
//! - **Rows stay whole**: multi-axis containers only mutate whole points.
//! - **Property-based testing**: invariants verified via proptest.
//!
//! Containers are single-owner scratch space and are not `Sync`.

pub mod combinatorics;
pub mod distributions;
pub mod error;
pub mod multi;
pub mod pair;
pub mod random;
pub mod sample;
pub mod stats;

pub use distributions::{DistributionGenerator, Geometric, Normal};
pub use error::{StatsError, StatsResult};
pub use multi::MultiSample;
pub use pair::{Axis, CorrelatedPair, LinearFit};
pub use sample::Sample;
