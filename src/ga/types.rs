//! Fitness evaluation contract.
//!
//! The engine never interprets genes itself: a [`FitnessFunction`] maps each
//! chromosome to a score, higher being better.

use super::chromosome::Chromosome;

/// Computes the fitness of a chromosome.
///
/// # Thread Safety
///
/// `FitnessFunction` must be `Send + Sync` because the engine may evaluate
/// a population from several worker threads at once. Stochastic
/// implementations must bring their own synchronization.
///
/// Any `Fn(&Chromosome) -> f64 + Send + Sync` closure is a fitness function:
///
/// ```
/// use u_evo::ga::{Chromosome, FitnessFunction, Gene};
///
/// let ones = |c: &Chromosome| c.genes().iter().filter(|g| **g == Gene::Bit(1)).count() as f64;
/// let mut c = Chromosome::binary(3);
/// c.set_gene(1, Gene::Bit(1)).unwrap();
/// assert_eq!(ones.evaluate(&c), 1.0);
/// ```
pub trait FitnessFunction: Send + Sync {
    /// Returns the score of `chromosome`. Higher is better.
    fn evaluate(&self, chromosome: &Chromosome) -> f64;
}

impl<F> FitnessFunction for F
where
    F: Fn(&Chromosome) -> f64 + Send + Sync,
{
    fn evaluate(&self, chromosome: &Chromosome) -> f64 {
        (self)(chromosome)
    }
}
