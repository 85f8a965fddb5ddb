//! Mutation operators.
//!
//! A mutator takes a chromosome by value and returns the mutated one. Most
//! operators modify and return the same individual; [`NonUniformMutation`]
//! returns a mutated clone instead.
//!
//! # Operators
//!
//! - [`SinglePointMutation`]: perturb one random gene
//! - [`TwoPointMutation`]: perturb two distinct random genes
//! - [`SwapMutation`]: exchange two distinct positions
//! - [`ScrambleMutation`]: shuffle a random segment
//! - [`BiasedMutation`]: per-gene probability `1 / (fitness + 1)`
//! - [`NonUniformMutation`]: per-gene probability decaying with the
//!   generation count
//!
//! Swap and scramble only move genes around, so they keep permutations
//! valid.

use super::chromosome::Chromosome;
use crate::error::Result;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

/// Mutates one chromosome.
pub trait Mutator {
    fn mutate(&self, chromosome: Chromosome, rng: &mut dyn RngCore) -> Result<Chromosome>;

    /// Called by the engine once per completed generation.
    ///
    /// Operators whose behavior depends on the generation count advance
    /// their internal counter here; the default does nothing.
    fn advance_generation(&mut self) {}
}

/// Perturbs one uniformly chosen gene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinglePointMutation;

impl Mutator for SinglePointMutation {
    fn mutate(&self, mut chromosome: Chromosome, rng: &mut dyn RngCore) -> Result<Chromosome> {
        let n = chromosome.gen_length();
        if n > 0 {
            chromosome.mutate_gene(rng.random_range(0..n), rng)?;
        }
        Ok(chromosome)
    }
}

/// Perturbs two distinct genes.
///
/// A single-gene chromosome has its only gene perturbed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TwoPointMutation;

impl Mutator for TwoPointMutation {
    fn mutate(&self, mut chromosome: Chromosome, rng: &mut dyn RngCore) -> Result<Chromosome> {
        match chromosome.gen_length() {
            0 => {}
            1 => chromosome.mutate_gene(0, rng)?,
            n => {
                let (i, j) = distinct_pair(n, rng);
                chromosome.mutate_gene(i, rng)?;
                chromosome.mutate_gene(j, rng)?;
            }
        }
        Ok(chromosome)
    }
}

/// Exchanges the genes at two distinct positions.
///
/// # Complexity
/// O(1)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapMutation;

impl Mutator for SwapMutation {
    fn mutate(&self, mut chromosome: Chromosome, rng: &mut dyn RngCore) -> Result<Chromosome> {
        let n = chromosome.gen_length();
        if n < 2 {
            return Ok(chromosome);
        }
        let (i, j) = distinct_pair(n, rng);
        chromosome.swap_genes(i, j)?;
        Ok(chromosome)
    }
}

/// Shuffles the genes of a random segment `[start, end]` with
/// `start < end`.
///
/// A two-gene segment is always swapped.
///
/// # Complexity
/// O(n)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrambleMutation;

impl Mutator for ScrambleMutation {
    fn mutate(&self, mut chromosome: Chromosome, rng: &mut dyn RngCore) -> Result<Chromosome> {
        let n = chromosome.gen_length();
        if n < 2 {
            return Ok(chromosome);
        }
        let (start, end) = distinct_pair(n, rng);
        let (start, end) = (start.min(end), start.max(end));

        if end - start == 1 {
            chromosome.swap_genes(start, end)?;
        } else {
            let mut genes = chromosome.genes().to_vec();
            genes[start..=end].shuffle(rng);
            chromosome.set_genes(genes)?;
        }
        Ok(chromosome)
    }
}

/// Fitness-biased mutation: every gene is perturbed with probability
/// `1 / (fitness + 1)`, so weak chromosomes change more.
///
/// Meant for non-negative fitness values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BiasedMutation;

impl Mutator for BiasedMutation {
    fn mutate(&self, mut chromosome: Chromosome, rng: &mut dyn RngCore) -> Result<Chromosome> {
        let probability = 1.0 / (chromosome.fitness() + 1.0);
        for i in 0..chromosome.gen_length() {
            if rng.random::<f64>() < probability {
                chromosome.mutate_gene(i, rng)?;
            }
        }
        Ok(chromosome)
    }
}

/// Non-uniform mutation with a decaying rate.
///
/// Every gene of a *clone* of the input is perturbed with probability
/// `(1 - t / T)^b`, where `t` is the number of generations seen so far and
/// `T = max_generations`. The rate starts at 1 and reaches 0 at `T`; `t`
/// stops advancing there. With `T = 0` the rate is always 0.
#[derive(Debug, Clone, PartialEq)]
pub struct NonUniformMutation {
    b: f64,
    max_generations: usize,
    current_generation: usize,
}

impl NonUniformMutation {
    /// `b` shapes the decay: larger values shrink the rate sooner.
    pub fn new(b: f64, max_generations: usize) -> Self {
        Self {
            b,
            max_generations,
            current_generation: 0,
        }
    }

    pub fn current_generation(&self) -> usize {
        self.current_generation
    }

    /// Per-gene mutation probability at the current generation.
    pub fn probability(&self) -> f64 {
        if self.max_generations == 0 {
            return 0.0;
        }
        let progress = self.current_generation as f64 / self.max_generations as f64;
        (1.0 - progress).powf(self.b)
    }
}

impl Mutator for NonUniformMutation {
    fn mutate(&self, chromosome: Chromosome, rng: &mut dyn RngCore) -> Result<Chromosome> {
        let probability = self.probability();
        let mut mutated = chromosome.clone();
        for i in 0..mutated.gen_length() {
            if rng.random::<f64>() < probability {
                mutated.mutate_gene(i, rng)?;
            }
        }
        Ok(mutated)
    }

    fn advance_generation(&mut self) {
        if self.current_generation < self.max_generations {
            self.current_generation += 1;
        }
    }
}

/// Two distinct positions within `0..n`. Requires `n >= 2`.
fn distinct_pair(n: usize, rng: &mut dyn RngCore) -> (usize, usize) {
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    (i, j)
}
