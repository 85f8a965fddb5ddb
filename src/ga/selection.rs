//! Selection strategies for the GA.
//!
//! Selection determines which chromosomes seed the next generation.
//! All strategies assume **maximization** (higher fitness = better) and
//! return the *index* of the chosen chromosome in the population as it is
//! after the call (some strategies sort the population first).
//!
//! The engine passes every chosen chromosome through a [`SelectionGuard`],
//! so a strategy never has to care about handing out the same individual
//! twice in one round.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"
//! - Hutter (2002), "Fitness Uniform Selection to Preserve Genetic Diversity"

use super::chromosome::{Chromosome, ChromosomeId};
use super::config::GaConfig;
use super::population::{by_fitness_desc, Population};
use crate::error::{GaError, Result};
use rand::{Rng, RngCore};
use std::collections::HashSet;

/// A parent selection strategy.
pub trait Selector {
    /// Chooses one chromosome and returns its index in `population`.
    ///
    /// # Errors
    /// [`GaError::EmptyPopulation`] when there is nothing to choose from;
    /// strategies may add their own preconditions.
    fn select(&mut self, population: &mut Population, rng: &mut dyn RngCore) -> Result<usize>;
}

/// Per-round de-duplication of selected chromosomes.
///
/// The first time an individual is admitted during a round it is handed out
/// as a shared copy (same identity). Any later admission of the same
/// individual yields an independent clone instead, so one instance never
/// lands twice in the population being built.
///
/// [`reset`](Self::reset) must be called once the round's parent quota is
/// complete.
#[derive(Debug, Default)]
pub struct SelectionGuard {
    returned: HashSet<ChromosomeId>,
}

impl SelectionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `chosen` itself the first time, a fresh clone afterwards.
    pub fn admit(&mut self, chosen: &Chromosome) -> Chromosome {
        if self.returned.insert(chosen.id()) {
            chosen.share()
        } else {
            chosen.clone()
        }
    }

    /// Forgets everything admitted so far.
    pub fn reset(&mut self) {
        self.returned.clear();
    }

    /// Number of distinct individuals admitted this round.
    pub fn len(&self) -> usize {
        self.returned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returned.is_empty()
    }
}

/// Tournament selection: draw `k` chromosomes uniformly with replacement and
/// keep the fittest.
///
/// Ties go to the earliest draw. Higher `k` = stronger selection pressure.
///
/// # Complexity
/// O(k) per selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelection {
    size: usize,
}

impl TournamentSelection {
    /// Tournament of `size` draws (at least one).
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }
}

impl Selector for TournamentSelection {
    fn select(&mut self, population: &mut Population, rng: &mut dyn RngCore) -> Result<usize> {
        let chromosomes = non_empty(population)?;
        let n = chromosomes.len();

        let mut best_idx = rng.random_range(0..n);
        for _ in 1..self.size {
            let idx = rng.random_range(0..n);
            if chromosomes[idx].fitness() > chromosomes[best_idx].fitness() {
                best_idx = idx;
            }
        }
        Ok(best_idx)
    }
}

/// Fitness-proportionate (roulette wheel) selection.
///
/// Draws a target in `[0, total fitness)` and walks the population in order,
/// returning the first chromosome whose cumulative fitness reaches it.
/// Fitness must be non-negative; when the total is zero the first chromosome
/// is always picked.
///
/// # Complexity
/// O(n) per selection (linear scan)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouletteWheelSelection;

impl RouletteWheelSelection {
    pub fn new() -> Self {
        Self
    }
}

impl Selector for RouletteWheelSelection {
    fn select(&mut self, population: &mut Population, rng: &mut dyn RngCore) -> Result<usize> {
        roulette(non_empty(population)?, rng)
    }
}

/// Cyclic elitism: hands out the top `elite_count` chromosomes round-robin.
///
/// `elite_count = floor(population_size * selection_rate)`, at least one.
/// The cycle index wraps on every call, so the strategy never runs dry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EliteSelection {
    elite_count: usize,
    cursor: usize,
}

impl EliteSelection {
    pub fn new(population_size: usize, selection_rate: f64) -> Self {
        Self {
            elite_count: elite_count(population_size, selection_rate),
            cursor: 0,
        }
    }

    /// Elite count derived from the configured population size and rate.
    pub fn from_config(config: &GaConfig) -> Self {
        Self::new(config.population_size, config.selection_rate)
    }

    pub fn elite_count(&self) -> usize {
        self.elite_count
    }
}

impl Selector for EliteSelection {
    fn select(&mut self, population: &mut Population, _rng: &mut dyn RngCore) -> Result<usize> {
        non_empty(population)?;
        population.ensure_sorted();
        Ok(next_elite(
            &mut self.cursor,
            self.elite_count.min(population.len()),
        ))
    }
}

/// Fitness uniform selection.
///
/// Draws a target fitness uniformly between the population's worst and best
/// fitness and returns the chromosome closest to it (first one on ties).
/// Keeps rare fitness levels alive, which preserves diversity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FitnessUniformSelection;

impl FitnessUniformSelection {
    pub fn new() -> Self {
        Self
    }
}

impl Selector for FitnessUniformSelection {
    fn select(&mut self, population: &mut Population, rng: &mut dyn RngCore) -> Result<usize> {
        non_empty(population)?;
        population.ensure_sorted();
        let chromosomes = population.all();
        let max = chromosomes[0].fitness();
        let min = chromosomes[chromosomes.len() - 1].fitness();
        let target = min + rng.random::<f64>() * (max - min);

        let mut selected = 0;
        let mut best_diff = f64::MAX;
        for (i, c) in chromosomes.iter().enumerate() {
            let diff = (c.fitness() - target).abs();
            if diff < best_diff {
                best_diff = diff;
                selected = i;
            }
        }
        Ok(selected)
    }
}

/// Roulette wheel with an elitist shortcut.
///
/// With probability `selection_rate` the next elite of a per-generation
/// cycle is returned; otherwise a roulette wheel spin over the whole
/// population decides. The elite cycle restarts whenever the population's
/// generation number changes.
#[derive(Debug, Clone, PartialEq)]
pub struct RouletteElitismSelection {
    elite_count: usize,
    elite_rate: f64,
    cursor: usize,
    generation: usize,
}

impl RouletteElitismSelection {
    pub fn new(population_size: usize, selection_rate: f64) -> Self {
        Self {
            elite_count: elite_count(population_size, selection_rate),
            elite_rate: selection_rate.clamp(0.0, 1.0),
            cursor: 0,
            generation: 0,
        }
    }

    pub fn from_config(config: &GaConfig) -> Self {
        Self::new(config.population_size, config.selection_rate)
    }
}

impl Selector for RouletteElitismSelection {
    fn select(&mut self, population: &mut Population, rng: &mut dyn RngCore) -> Result<usize> {
        non_empty(population)?;
        if population.generation() != self.generation {
            self.generation = population.generation();
            self.cursor = 0;
        }
        population.ensure_sorted();

        if rng.random::<f64>() <= self.elite_rate {
            return Ok(next_elite(
                &mut self.cursor,
                self.elite_count.min(population.len()),
            ));
        }
        roulette(population.all(), rng)
    }
}

/// Tournament that sometimes lets a weaker contestant win.
///
/// Runs a size-`k` tournament and ranks its members by fitness. With
/// probability `replacement_probability` a uniformly chosen non-best member
/// (rank 1..k-1) is returned instead of the winner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomReplacementTournament {
    size: usize,
    replacement_probability: f64,
}

impl RandomReplacementTournament {
    pub fn new(size: usize, replacement_probability: f64) -> Self {
        Self {
            size: size.max(1),
            replacement_probability: replacement_probability.clamp(0.0, 1.0),
        }
    }
}

impl Selector for RandomReplacementTournament {
    fn select(&mut self, population: &mut Population, rng: &mut dyn RngCore) -> Result<usize> {
        let chromosomes = non_empty(population)?;
        let n = chromosomes.len();

        let mut members: Vec<usize> = (0..self.size).map(|_| rng.random_range(0..n)).collect();
        members.sort_by(|&a, &b| by_fitness_desc(&chromosomes[a], &chromosomes[b]));

        if self.size > 1 && rng.random::<f64>() < self.replacement_probability {
            let rank = rng.random_range(1..self.size);
            return Ok(members[rank]);
        }
        Ok(members[0])
    }
}

fn non_empty(population: &Population) -> Result<&[Chromosome]> {
    if population.is_empty() {
        Err(GaError::EmptyPopulation)
    } else {
        Ok(population.all())
    }
}

fn elite_count(population_size: usize, selection_rate: f64) -> usize {
    ((population_size as f64 * selection_rate.max(0.0)) as usize).max(1)
}

/// Current cycle position, then advance it modulo `limit`.
fn next_elite(cursor: &mut usize, limit: usize) -> usize {
    let limit = limit.max(1);
    let index = *cursor % limit;
    *cursor = (index + 1) % limit;
    index
}

fn roulette(chromosomes: &[Chromosome], rng: &mut dyn RngCore) -> Result<usize> {
    let mut total = 0.0;
    for (index, c) in chromosomes.iter().enumerate() {
        let fitness = c.fitness();
        if fitness < 0.0 {
            return Err(GaError::NegativeFitness { index, fitness });
        }
        total += fitness;
    }

    let target = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    for (i, c) in chromosomes.iter().enumerate() {
        cumulative += c.fitness();
        if cumulative >= target {
            return Ok(i);
        }
    }

    Ok(chromosomes.len() - 1) // floating-point fallback
}
