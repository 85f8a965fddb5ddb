//! Population of one generation.
//!
//! A [`Population`] is an ordered collection of chromosomes tagged with its
//! generation index. Ranking is lazy: [`best`](Population::best) and
//! [`worst`](Population::worst) sort on demand and the result is cached until
//! the population changes.

use super::chromosome::{Chromosome, ChromosomeId};
use super::evaluator::ParallelEvaluator;
use super::types::FitnessFunction;
use crate::error::Result;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Aggregate fitness statistics of a population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationStats {
    pub best: f64,
    pub worst: f64,
    pub mean: f64,
    /// Number of distinct fitness values.
    pub unique_fitness: usize,
}

/// Ordered collection of chromosomes for one generation.
#[derive(Debug)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
    generation: usize,
    sorted: bool,
}

impl Population {
    /// Creates an empty population for `generation`.
    pub fn new(generation: usize) -> Self {
        Self::with_capacity(generation, 0)
    }

    pub fn with_capacity(generation: usize, capacity: usize) -> Self {
        Self {
            chromosomes: Vec::with_capacity(capacity),
            generation,
            sorted: false,
        }
    }

    /// Wraps existing chromosomes, keeping their order.
    pub fn from_chromosomes(generation: usize, chromosomes: Vec<Chromosome>) -> Self {
        Self {
            chromosomes,
            generation,
            sorted: false,
        }
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Appends a chromosome. Invalidates the cached ordering.
    pub fn add(&mut self, chromosome: Chromosome) {
        self.chromosomes.push(chromosome);
        self.sorted = false;
    }

    pub fn get(&self, index: usize) -> Option<&Chromosome> {
        self.chromosomes.get(index)
    }

    /// Mutable access to one chromosome. Invalidates the cached ordering.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Chromosome> {
        self.sorted = false;
        self.chromosomes.get_mut(index)
    }

    /// All chromosomes in their current order.
    pub fn all(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chromosome> {
        self.chromosomes.iter()
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Stable sort by descending fitness.
    ///
    /// Chromosomes with equal fitness keep their relative order.
    pub fn sort(&mut self) {
        self.chromosomes.sort_by(by_fitness_desc);
        self.sorted = true;
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Highest-fitness chromosome, sorting first if needed.
    pub fn best(&mut self) -> Option<&Chromosome> {
        self.ensure_sorted();
        self.chromosomes.first()
    }

    /// Lowest-fitness chromosome, sorting first if needed.
    pub fn worst(&mut self) -> Option<&Chromosome> {
        self.ensure_sorted();
        self.chromosomes.last()
    }

    pub(crate) fn ensure_sorted(&mut self) {
        if !self.sorted {
            self.sort();
        }
    }

    /// Assigns `fitness(chromosome)` to every chromosome, in index order.
    pub fn evaluate_sequential<F: FitnessFunction + ?Sized>(&mut self, fitness: &F) {
        for chromosome in &mut self.chromosomes {
            let value = fitness.evaluate(chromosome);
            chromosome.set_fitness(value);
        }
        self.sorted = false;
    }

    /// Evaluates every chromosome on a pool of `workers` threads.
    ///
    /// Blocks until all chromosomes have been evaluated. Builds a fresh pool
    /// for the call; keep a [`ParallelEvaluator`] around to reuse one.
    pub fn evaluate_parallel<F: FitnessFunction + ?Sized>(
        &mut self,
        fitness: &F,
        workers: usize,
    ) -> Result<()> {
        ParallelEvaluator::new(workers)?.evaluate(self, fitness);
        Ok(())
    }

    /// Clears the parent marker of every chromosome.
    pub fn reset_parent_flags(&mut self) {
        for chromosome in &mut self.chromosomes {
            chromosome.set_parent(false);
        }
    }

    /// Whether two positions hold the same chromosome instance.
    ///
    /// Compares identities, not genes: equal-but-distinct chromosomes are
    /// not aliases.
    pub fn has_aliased_instances(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.chromosomes.len());
        self.chromosomes.iter().any(|c| !seen.insert(c.id()))
    }

    /// Positions `(first, duplicate)` of every aliased chromosome.
    pub fn aliased_positions(&self) -> Vec<(usize, usize)> {
        let mut first_seen: HashMap<ChromosomeId, usize> = HashMap::new();
        let mut out = Vec::new();
        for (i, c) in self.chromosomes.iter().enumerate() {
            if let Some(&first) = first_seen.get(&c.id()) {
                out.push((first, i));
            } else {
                first_seen.insert(c.id(), i);
            }
        }
        out
    }

    /// Number of distinct fitness values present.
    pub fn unique_fitness_count(&self) -> usize {
        self.chromosomes
            .iter()
            .map(|c| rank_key(c.fitness()).to_bits())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Best, worst and mean fitness. `None` for an empty population.
    ///
    /// Does not reorder the population.
    pub fn stats(&self) -> Option<PopulationStats> {
        if self.chromosomes.is_empty() {
            return None;
        }
        let mut best = f64::NEG_INFINITY;
        let mut worst = f64::INFINITY;
        let mut sum = 0.0;
        for c in &self.chromosomes {
            let f = c.fitness();
            best = best.max(f);
            worst = worst.min(f);
            sum += f;
        }
        Some(PopulationStats {
            best,
            worst,
            mean: sum / self.chromosomes.len() as f64,
            unique_fitness: self.unique_fitness_count(),
        })
    }

    /// Consumes the population, returning its chromosomes in order.
    pub fn into_chromosomes(self) -> Vec<Chromosome> {
        self.chromosomes
    }
}

impl fmt::Display for Population {
    /// Prints the generation header and every chromosome, best first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generation: {}", self.generation)?;
        let mut ranked: Vec<&Chromosome> = self.chromosomes.iter().collect();
        ranked.sort_by(|a, b| by_fitness_desc(a, b));
        for c in ranked {
            writeln!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Descending fitness order in which `-0.0` and `0.0` are equal.
pub(crate) fn by_fitness_desc(a: &Chromosome, b: &Chromosome) -> Ordering {
    rank_key(b.fitness()).total_cmp(&rank_key(a.fitness()))
}

/// Folds `-0.0` onto `0.0`.
fn rank_key(fitness: f64) -> f64 {
    if fitness == 0.0 {
        0.0
    } else {
        fitness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::chromosome::Gene;
    use crate::random::create_rng;

    fn with_fitness(values: &[f64]) -> Population {
        let mut pop = Population::new(0);
        for &v in values {
            let mut c = Chromosome::binary(2);
            c.set_fitness(v);
            pop.add(c);
        }
        pop
    }

    #[test]
    fn test_sort_descending_and_stable() {
        let mut pop = with_fitness(&[1.0, 3.0, 2.0, 3.0]);
        let first_three = pop.get(1).unwrap().id();
        let second_three = pop.get(3).unwrap().id();
        pop.sort();
        assert!(pop.is_sorted());
        let fits: Vec<f64> = pop.iter().map(|c| c.fitness()).collect();
        assert_eq!(fits, vec![3.0, 3.0, 2.0, 1.0]);
        assert_eq!(pop.get(0).unwrap().id(), first_three);
        assert_eq!(pop.get(1).unwrap().id(), second_three);
    }

    #[test]
    fn test_signed_zeros_rank_as_equal() {
        let mut pop = with_fitness(&[-0.0, 0.0, -1.0]);
        let negative_zero = pop.get(0).unwrap().id();
        let positive_zero = pop.get(1).unwrap().id();
        assert_eq!(pop.unique_fitness_count(), 2);
        assert_eq!(pop.stats().unwrap().unique_fitness, 2);

        pop.sort();
        assert_eq!(pop.get(0).unwrap().id(), negative_zero);
        assert_eq!(pop.get(1).unwrap().id(), positive_zero);
        assert_eq!(pop.get(2).unwrap().fitness(), -1.0);
    }

    #[test]
    fn test_best_and_worst() {
        let mut pop = with_fitness(&[4.0, 9.0, 1.0]);
        assert_eq!(pop.best().unwrap().fitness(), 9.0);
        assert_eq!(pop.worst().unwrap().fitness(), 1.0);
    }

    #[test]
    fn test_add_invalidates_sort() {
        let mut pop = with_fitness(&[1.0, 2.0]);
        pop.sort();
        let mut c = Chromosome::binary(2);
        c.set_fitness(5.0);
        pop.add(c);
        assert!(!pop.is_sorted());
        assert_eq!(pop.best().unwrap().fitness(), 5.0);
    }

    #[test]
    fn test_empty_population() {
        let mut pop = Population::new(3);
        assert!(pop.best().is_none());
        assert!(pop.worst().is_none());
        assert!(pop.stats().is_none());
        assert_eq!(pop.generation(), 3);
    }

    #[test]
    fn test_evaluate_sequential() {
        let mut rng = create_rng(42);
        let mut pop = Population::new(0);
        for _ in 0..10 {
            let mut c = Chromosome::binary(8);
            c.initialize(&mut rng);
            pop.add(c);
        }
        let ones = |c: &Chromosome| c.genes().iter().filter(|g| **g == Gene::Bit(1)).count() as f64;
        pop.evaluate_sequential(&ones);
        for c in pop.iter() {
            assert!(c.is_evaluated());
            assert_eq!(c.fitness(), ones(c));
        }
    }

    #[test]
    fn test_aliasing_by_identity_not_value() {
        let original = Chromosome::binary(4);
        let mut distinct = Population::new(0);
        distinct.add(original.clone());
        distinct.add(original.clone());
        assert!(distinct.iter().all(|c| c.same_genes(&original)));
        assert!(!distinct.has_aliased_instances());

        let mut aliased = Population::new(0);
        aliased.add(original.share());
        aliased.add(Chromosome::binary(4));
        aliased.add(original.share());
        assert!(aliased.has_aliased_instances());
        assert_eq!(aliased.aliased_positions(), vec![(0, 2)]);
    }

    #[test]
    fn test_reset_parent_flags() {
        let mut pop = with_fitness(&[1.0, 2.0]);
        for i in 0..pop.len() {
            pop.get_mut(i).unwrap().set_parent(true);
        }
        pop.reset_parent_flags();
        assert!(pop.iter().all(|c| !c.is_parent()));
    }

    #[test]
    fn test_unique_fitness_and_stats() {
        let pop = with_fitness(&[1.0, 2.0, 2.0, 5.0]);
        assert_eq!(pop.unique_fitness_count(), 3);
        let stats = pop.stats().unwrap();
        assert_eq!(stats.best, 5.0);
        assert_eq!(stats.worst, 1.0);
        assert!((stats.mean - 2.5).abs() < 1e-12);
        assert_eq!(stats.unique_fitness, 3);
    }

    #[test]
    fn test_display_ranks_best_first() {
        let pop = with_fitness(&[1.0, 2.0]);
        let text = pop.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Generation: 0");
        assert!(lines[1].ends_with("FIT: 2"));
        assert!(lines[2].ends_with("FIT: 1"));
    }
}
