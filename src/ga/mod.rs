//! Genetic Algorithm framework.
//!
//! A generic, domain-agnostic GA built on typed chromosomes and trait-based
//! operators. Users describe their problem with a prototype [`Chromosome`]
//! and a [`FitnessFunction`]; the [`GaEngine`] evolves a [`Population`] with
//! pluggable selection, crossover and mutation operators. Fitness is always
//! **maximized**.
//!
//! # Core Traits
//!
//! - [`FitnessFunction`]: Scores a chromosome (any `Fn(&Chromosome) -> f64`)
//! - [`Selector`]: Picks parents from a population
//! - [`Crossover`]: Combines two parents into one offspring
//! - [`Mutator`]: Perturbs one chromosome
//!
//! # Key Types
//!
//! - [`Chromosome`], [`Gene`], [`Representation`]: Candidate solutions
//! - [`Population`]: One generation of chromosomes
//! - [`GaConfig`]: Algorithm parameters (population size, rates, target)
//! - [`GaEngine`]: Executes the evolutionary loop
//! - [`GaOutcome`]: Final result with statistics
//! - [`ParallelEvaluator`]: Worker pool for fitness evaluation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod chromosome;
mod config;
mod crossover;
mod evaluator;
mod mutation;
mod population;
mod runner;
mod selection;
mod types;

pub use chromosome::{Chromosome, ChromosomeId, Gene, GeneKind, Representation};
pub use config::GaConfig;
pub use crossover::{
    Crossover, CyclicCrossover, EccentricCrossover, NoiseReductionCrossover, OrderCrossover,
    ProbabilityCrossover, SinglePointCrossover, TwoPointCrossover,
};
pub use evaluator::ParallelEvaluator;
pub use mutation::{
    BiasedMutation, Mutator, NonUniformMutation, ScrambleMutation, SinglePointMutation,
    SwapMutation, TwoPointMutation,
};
pub use population::{Population, PopulationStats};
pub use runner::{
    GaEngine, GaEngineBuilder, GaOutcome, GenerationSnapshot, GenerationStats, Termination,
};
pub use selection::{
    EliteSelection, FitnessUniformSelection, RandomReplacementTournament,
    RouletteElitismSelection, RouletteWheelSelection, SelectionGuard, Selector,
    TournamentSelection,
};
pub use types::FitnessFunction;
