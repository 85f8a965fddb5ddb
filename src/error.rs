//! Error type shared by every module of the crate.
//!
//! Aliasing detected during a run is deliberately *not* an error: the engine
//! stops early and reports it through [`crate::ga::Termination::Aliased`].

use crate::ga::GeneKind;
use thiserror::Error;

/// Errors raised while building, configuring or running an evolution.
#[derive(Error, Debug)]
pub enum GaError {
    /// A component required at construction time was not supplied.
    #[error("{0} is missing")]
    MissingComponent(&'static str),

    /// A primary operator required at run start was not supplied.
    #[error("{0} operator is missing")]
    MissingOperator(&'static str),

    /// The configuration violates a structural requirement.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A gene position outside `0..len` was requested.
    #[error("gene index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A gene value does not belong to the chromosome's representation.
    #[error("invalid gene at index {index}: {reason}")]
    InvalidGene { index: usize, reason: String },

    /// Arithmetic crossover applied to genes of different kinds.
    #[error("gene type mismatch: {left} & {right}")]
    TypeMismatch { left: GeneKind, right: GeneKind },

    /// A gene of one parent has no counterpart in the other parent.
    ///
    /// Raised by permutation-preserving crossovers when the parents are not
    /// permutations of the same set of values.
    #[error("gene at index {index} of one parent not found in the other parent")]
    GeneNotFound { index: usize },

    /// Parents differ in length or representation.
    #[error("incompatible parents: {0}")]
    IncompatibleParents(String),

    /// An operation needed at least one chromosome.
    #[error("population is empty")]
    EmptyPopulation,

    /// Fitness-proportionate selection met a negative fitness value.
    #[error("negative fitness {fitness} at index {index}")]
    NegativeFitness { index: usize, fitness: f64 },

    /// The worker pool for parallel evaluation could not be created.
    #[error("failed to build evaluation thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GaError>;
