//! GA evolutionary loop execution.
//!
//! [`GaEngine`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation → repeat.
//!
//! One generation of [`GaEngine::run`]:
//!
//! 1. Evaluate every chromosome (on the worker pool when `multithread` is set)
//! 2. Record a snapshot; stop if the best fitness is within `delta` of the
//!    target
//! 3. Select `floor(population_size * selection_rate)` parents into an empty
//!    successor, routing every choice through the [`SelectionGuard`]
//! 4. Fill the successor with offspring of uniformly drawn successor members
//! 5. Pass each successor member to the mutation operator with probability
//!    `mutation_rate`
//! 6. Clear parent flags, replace the population and check it for aliased
//!    instances
//!
//! The final population is always evaluated before the run returns.

use super::chromosome::Chromosome;
use super::config::GaConfig;
use super::crossover::Crossover;
use super::evaluator::ParallelEvaluator;
use super::mutation::Mutator;
use super::population::Population;
use super::selection::{SelectionGuard, Selector};
use super::types::FitnessFunction;
use crate::error::{GaError, Result};
use crate::random::{create_rng, random_seed};
use log::{debug, error, info, trace};
use rand::rngs::StdRng;
use rand::Rng;

/// Alternate-operator probability used when alternates are configured but
/// no rate was set.
const DEFAULT_SECOND_OPERATOR_RATE: f64 = 0.25;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// All configured generations were bred.
    GenerationLimit,
    /// The best fitness came within `delta` of the target.
    TargetReached,
    /// The new population held the same chromosome instance twice.
    Aliased,
}

/// Fitness summary of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    pub best: f64,
    pub worst: f64,
    pub mean: f64,
    /// Number of distinct fitness values.
    pub unique_fitness: usize,
}

/// An evaluated generation as it was when recorded.
#[derive(Debug)]
pub struct GenerationSnapshot {
    pub stats: GenerationStats,
    pub chromosomes: Vec<Chromosome>,
}

/// Result of a GA run.
#[derive(Debug)]
pub struct GaOutcome {
    /// Best chromosome of the final population.
    pub best: Chromosome,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Generation index of the final population.
    pub generations: usize,

    /// Why the run stopped.
    pub termination: Termination,

    /// Best fitness of every recorded generation.
    pub fitness_history: Vec<f64>,
}

type Observer = Box<dyn FnMut(&GenerationStats)>;

/// Builder for [`GaEngine`].
///
/// The prototype chromosome and the fitness function are required; the
/// operators can be supplied here or later through the engine's setters.
pub struct GaEngineBuilder {
    config: GaConfig,
    prototype: Option<Chromosome>,
    fitness: Option<Box<dyn FitnessFunction>>,
    population: Option<Population>,
    selection: Option<Box<dyn Selector>>,
    crossover: Option<Box<dyn Crossover>>,
    mutation: Option<Box<dyn Mutator>>,
    alternate_crossover: Option<Box<dyn Crossover>>,
    alternate_mutation: Option<Box<dyn Mutator>>,
    on_generation: Option<Observer>,
}

impl GaEngineBuilder {
    /// Chromosome whose clones seed the initial population.
    pub fn prototype(mut self, prototype: Chromosome) -> Self {
        self.prototype = Some(prototype);
        self
    }

    pub fn fitness(mut self, fitness: impl FitnessFunction + 'static) -> Self {
        self.fitness = Some(Box::new(fitness));
        self
    }

    /// Starting population; topped up with prototype clones on
    /// initialization. Defaults to an empty generation 0.
    pub fn population(mut self, population: Population) -> Self {
        self.population = Some(population);
        self
    }

    pub fn selection(mut self, selection: impl Selector + 'static) -> Self {
        self.selection = Some(Box::new(selection));
        self
    }

    pub fn crossover(mut self, crossover: impl Crossover + 'static) -> Self {
        self.crossover = Some(Box::new(crossover));
        self
    }

    pub fn mutation(mut self, mutation: impl Mutator + 'static) -> Self {
        self.mutation = Some(Box::new(mutation));
        self
    }

    /// Crossover used instead of the primary one with probability
    /// `second_operator_rate`.
    pub fn alternate_crossover(mut self, crossover: impl Crossover + 'static) -> Self {
        self.alternate_crossover = Some(Box::new(crossover));
        self
    }

    /// Mutation used instead of the primary one with probability
    /// `second_operator_rate`.
    pub fn alternate_mutation(mut self, mutation: impl Mutator + 'static) -> Self {
        self.alternate_mutation = Some(Box::new(mutation));
        self
    }

    /// Callback invoked with the stats of every recorded generation.
    pub fn on_generation(mut self, observer: impl FnMut(&GenerationStats) + 'static) -> Self {
        self.on_generation = Some(Box::new(observer));
        self
    }

    /// Validates the configuration and assembles the engine.
    ///
    /// # Errors
    /// - [`GaError::InvalidConfig`] if the configuration is invalid
    /// - [`GaError::MissingComponent`] without prototype or fitness function
    /// - [`GaError::ThreadPool`] if the evaluation workers cannot start
    pub fn build(self) -> Result<GaEngine> {
        self.config.validate()?;
        let prototype = self
            .prototype
            .ok_or(GaError::MissingComponent("prototype chromosome"))?;
        let fitness = self
            .fitness
            .ok_or(GaError::MissingComponent("fitness function"))?;

        let evaluator = if self.config.multithread {
            Some(ParallelEvaluator::new(self.config.threads)?)
        } else {
            None
        };
        let seed = self.config.seed.unwrap_or_else(random_seed);
        debug!("GA engine seeded with {seed}");

        Ok(GaEngine {
            population: self.population.unwrap_or_else(|| Population::new(0)),
            config: self.config,
            prototype,
            fitness,
            selection: self.selection,
            crossover: self.crossover,
            mutation: self.mutation,
            alternate_crossover: self.alternate_crossover,
            alternate_mutation: self.alternate_mutation,
            guard: SelectionGuard::new(),
            rng: create_rng(seed),
            evaluator,
            history: Vec::new(),
            on_generation: self.on_generation,
            ready: false,
        })
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_evo::ga::{
///     Chromosome, GaConfig, GaEngine, Gene, SinglePointCrossover, SinglePointMutation,
///     TournamentSelection,
/// };
///
/// let config = GaConfig::default()
///     .with_population_size(30)
///     .with_generations(20)
///     .with_threads(0)
///     .with_seed(42);
///
/// let mut engine = GaEngine::builder(config)
///     .prototype(Chromosome::binary(8))
///     .fitness(|c: &Chromosome| c.genes().iter().filter(|g| **g == Gene::Bit(1)).count() as f64)
///     .selection(TournamentSelection::new(3))
///     .crossover(SinglePointCrossover)
///     .mutation(SinglePointMutation)
///     .build()?;
///
/// let outcome = engine.run()?;
/// assert!(outcome.best_fitness <= 8.0);
/// # Ok::<(), u_evo::GaError>(())
/// ```
pub struct GaEngine {
    config: GaConfig,
    population: Population,
    prototype: Chromosome,
    fitness: Box<dyn FitnessFunction>,
    selection: Option<Box<dyn Selector>>,
    crossover: Option<Box<dyn Crossover>>,
    mutation: Option<Box<dyn Mutator>>,
    alternate_crossover: Option<Box<dyn Crossover>>,
    alternate_mutation: Option<Box<dyn Mutator>>,
    guard: SelectionGuard,
    rng: StdRng,
    evaluator: Option<ParallelEvaluator>,
    history: Vec<GenerationSnapshot>,
    on_generation: Option<Observer>,
    ready: bool,
}

impl GaEngine {
    pub fn builder(config: GaConfig) -> GaEngineBuilder {
        GaEngineBuilder {
            config,
            prototype: None,
            fitness: None,
            population: None,
            selection: None,
            crossover: None,
            mutation: None,
            alternate_crossover: None,
            alternate_mutation: None,
            on_generation: None,
        }
    }

    pub fn set_selection(&mut self, selection: impl Selector + 'static) {
        self.selection = Some(Box::new(selection));
    }

    pub fn set_crossover(&mut self, crossover: impl Crossover + 'static) {
        self.crossover = Some(Box::new(crossover));
    }

    pub fn set_mutation(&mut self, mutation: impl Mutator + 'static) {
        self.mutation = Some(Box::new(mutation));
    }

    pub fn set_alternate_crossover(&mut self, crossover: impl Crossover + 'static) {
        self.alternate_crossover = Some(Box::new(crossover));
    }

    pub fn set_alternate_mutation(&mut self, mutation: impl Mutator + 'static) {
        self.alternate_mutation = Some(Box::new(mutation));
    }

    /// Tops the population up to `population_size` with initialized clones
    /// of the prototype.
    pub fn initialize_population(&mut self) {
        while self.population.len() < self.config.population_size {
            let mut chromosome = self.prototype.clone();
            chromosome.initialize(&mut self.rng);
            self.population.add(chromosome);
        }
        self.ready = true;
    }

    /// Runs the evolution.
    ///
    /// Initializes the population first if that has not happened yet.
    ///
    /// # Errors
    /// [`GaError::MissingOperator`] if the mutation, crossover or selection
    /// operator is not set; any error raised by an operator aborts the run.
    pub fn run(&mut self) -> Result<GaOutcome> {
        if !self.ready {
            self.initialize_population();
        }
        self.check_operators()?;

        info!(
            "GA run: {} chromosomes, {} generations, {} parents per generation",
            self.config.population_size,
            self.config.generations,
            self.config.parent_count()
        );

        let mut termination = Termination::GenerationLimit;
        for _ in 0..self.config.generations {
            self.evaluate();
            let stats = self.record_generation()?;
            if self.target_reached(stats.best) {
                info!(
                    "target fitness reached in generation {} (best {})",
                    stats.generation, stats.best
                );
                termination = Termination::TargetReached;
                break;
            }

            let mut successor = Population::with_capacity(
                self.population.generation() + 1,
                self.config.population_size,
            );
            let parents = self.select_parents(&mut successor)?;
            self.guard.reset();
            let offspring = self.breed(&mut successor)?;
            let (mut successor, mutated) = self.mutate_all(successor)?;
            self.advance_operators();
            trace!(
                "generation {}: {parents} parents, {offspring} offspring, {mutated} mutated",
                successor.generation()
            );

            successor.reset_parent_flags();
            self.population = successor;

            if self.population.has_aliased_instances() {
                error!(
                    "generation {} holds aliased chromosome instances at {:?}",
                    self.population.generation(),
                    self.population.aliased_positions()
                );
                termination = Termination::Aliased;
                break;
            }
        }

        self.evaluate();
        let recorded = self.history.last().map(|s| s.stats.generation);
        if recorded != Some(self.population.generation()) {
            self.record_generation()?;
        }

        let best = self
            .population
            .best()
            .ok_or(GaError::EmptyPopulation)?
            .share();
        info!(
            "GA finished: {:?} after {} generations, best fitness {}",
            termination,
            self.population.generation(),
            best.fitness()
        );

        Ok(GaOutcome {
            best_fitness: best.fitness(),
            best,
            generations: self.population.generation(),
            termination,
            fitness_history: self.history.iter().map(|s| s.stats.best).collect(),
        })
    }

    /// Current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Snapshots of every recorded generation, oldest first.
    pub fn history(&self) -> &[GenerationSnapshot] {
        &self.history
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    fn check_operators(&mut self) -> Result<()> {
        if self.mutation.is_none() {
            return Err(GaError::MissingOperator("mutation"));
        }
        if self.crossover.is_none() {
            return Err(GaError::MissingOperator("crossover"));
        }
        if self.selection.is_none() {
            return Err(GaError::MissingOperator("selection"));
        }
        let has_alternate = self.alternate_crossover.is_some() || self.alternate_mutation.is_some();
        if has_alternate && self.config.second_operator_rate <= 0.0 {
            debug!("alternate operators use rate {DEFAULT_SECOND_OPERATOR_RATE}");
            self.config.second_operator_rate = DEFAULT_SECOND_OPERATOR_RATE;
        }
        Ok(())
    }

    fn evaluate(&mut self) {
        match &self.evaluator {
            Some(evaluator) => evaluator.evaluate(&mut self.population, &*self.fitness),
            None => self.population.evaluate_sequential(&*self.fitness),
        }
    }

    fn record_generation(&mut self) -> Result<GenerationStats> {
        let summary = self.population.stats().ok_or(GaError::EmptyPopulation)?;
        let stats = GenerationStats {
            generation: self.population.generation(),
            best: summary.best,
            worst: summary.worst,
            mean: summary.mean,
            unique_fitness: summary.unique_fitness,
        };
        debug!(
            "generation {}: best {:.4}, mean {:.4}, worst {:.4}, {} distinct",
            stats.generation, stats.best, stats.mean, stats.worst, stats.unique_fitness
        );

        self.history.push(GenerationSnapshot {
            stats,
            chromosomes: self.population.iter().map(Chromosome::share).collect(),
        });
        if let Some(observer) = self.on_generation.as_mut() {
            observer(&stats);
        }
        Ok(stats)
    }

    fn target_reached(&self, best: f64) -> bool {
        self.config
            .target_fitness
            .is_some_and(|target| (best - target).abs() <= self.config.delta)
    }

    /// Moves `parent_count` selected chromosomes into `successor`, marked as
    /// parents.
    fn select_parents(&mut self, successor: &mut Population) -> Result<usize> {
        let selection = self
            .selection
            .as_mut()
            .ok_or(GaError::MissingOperator("selection"))?;
        let parent_count = self.config.parent_count();

        for _ in 0..parent_count {
            let index = selection.select(&mut self.population, &mut self.rng)?;
            let chosen = self
                .population
                .get(index)
                .ok_or(GaError::IndexOutOfBounds {
                    index,
                    len: self.population.len(),
                })?;
            let mut parent = self.guard.admit(chosen);
            parent.set_parent(true);
            successor.add(parent);
        }
        Ok(parent_count)
    }

    /// Fills `successor` up to `population_size` with offspring of its own
    /// members.
    fn breed(&mut self, successor: &mut Population) -> Result<usize> {
        let primary = self
            .crossover
            .as_deref()
            .ok_or(GaError::MissingOperator("crossover"))?;
        let alternate = self.alternate_crossover.as_deref();
        let second_rate = self.config.second_operator_rate;

        let mut bred = 0;
        while successor.len() < self.config.population_size {
            let n = successor.len();
            if n == 0 {
                return Err(GaError::EmptyPopulation);
            }
            let p1 = self.rng.random_range(0..n);
            let p2 = self.rng.random_range(0..n);
            let operator = match alternate {
                Some(alt) if self.rng.random::<f64>() < second_rate => alt,
                _ => primary,
            };
            let (Some(parent1), Some(parent2)) = (successor.get(p1), successor.get(p2)) else {
                return Err(GaError::IndexOutOfBounds { index: p1.max(p2), len: n });
            };
            let child = operator.crossover(parent1, parent2, &mut self.rng)?;
            successor.add(child);
            bred += 1;
        }
        Ok(bred)
    }

    /// Mutation pass over the whole successor.
    fn mutate_all(&mut self, successor: Population) -> Result<(Population, usize)> {
        let primary = self
            .mutation
            .as_deref()
            .ok_or(GaError::MissingOperator("mutation"))?;
        let alternate = self.alternate_mutation.as_deref();
        let generation = successor.generation();

        let mut mutated = 0;
        let mut chromosomes = Vec::with_capacity(successor.len());
        for chromosome in successor.into_chromosomes() {
            if self.rng.random::<f64>() < self.config.mutation_rate {
                let operator = match alternate {
                    Some(alt) if self.rng.random::<f64>() < self.config.second_operator_rate => alt,
                    _ => primary,
                };
                chromosomes.push(operator.mutate(chromosome, &mut self.rng)?);
                mutated += 1;
            } else {
                chromosomes.push(chromosome);
            }
        }
        Ok((Population::from_chromosomes(generation, chromosomes), mutated))
    }

    fn advance_operators(&mut self) {
        if let Some(mutation) = self.mutation.as_mut() {
            mutation.advance_generation();
        }
        if let Some(mutation) = self.alternate_mutation.as_mut() {
            mutation.advance_generation();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
