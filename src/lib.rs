//! Generic evolutionary-optimization engine.
//!
//! Evolves a population of typed chromosomes toward higher fitness:
//!
//! - **Chromosomes**: binary, bounded-integer (optionally permutation),
//!   bounded-real and categorical gene representations.
//! - **Operators**: pluggable selection, crossover and mutation strategies
//!   behind one trait per family, with optional alternate operators.
//! - **Engine**: generational loop with target-fitness termination, aliasing
//!   detection and per-generation history.
//! - **Parallel evaluation**: fitness computed on a fixed worker pool.
//!
//! # Architecture
//!
//! The crate contains no domain-specific concepts: problems are expressed
//! through a prototype chromosome and a fitness function. All randomness
//! flows through generators built by [`random`], so a seeded run is
//! reproducible.

pub mod error;
pub mod ga;
pub mod random;

pub use error::{GaError, Result};
