//! Parallel fitness evaluation.
//!
//! [`ParallelEvaluator`] owns a fixed pool of worker threads. One evaluation
//! pass runs a worker loop on every pool thread; workers claim chromosome
//! indices from a shared atomic cursor until none remain, evaluate them
//! against a read-only view of the population and hand back their results.
//! The pass returns only after every worker has finished, and only then are
//! fitness values written, on the calling thread.

use super::population::Population;
use super::types::FitnessFunction;
use crate::error::Result;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fixed-size worker pool computing fitness for whole populations.
#[derive(Debug)]
pub struct ParallelEvaluator {
    pool: ThreadPool,
}

impl ParallelEvaluator {
    /// Builds a pool of `workers` threads (at least one).
    ///
    /// # Errors
    /// [`GaError::ThreadPool`](crate::GaError::ThreadPool) if the threads
    /// cannot be spawned.
    pub fn new(workers: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("u-evo-eval-{i}"))
            .build()?;
        Ok(Self { pool })
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Evaluates every chromosome of `population` exactly once.
    ///
    /// Which worker evaluates which chromosome varies between calls.
    pub fn evaluate<F: FitnessFunction + ?Sized>(&self, population: &mut Population, fitness: &F) {
        let chromosomes = population.all();
        let cursor = AtomicUsize::new(0);

        let claimed: Vec<Vec<(usize, f64)>> = self.pool.broadcast(|_| {
            let mut local = Vec::new();
            loop {
                let index = cursor.fetch_add(1, Ordering::Relaxed);
                let Some(chromosome) = chromosomes.get(index) else {
                    break;
                };
                local.push((index, fitness.evaluate(chromosome)));
            }
            local
        });

        for (index, value) in claimed.into_iter().flatten() {
            if let Some(chromosome) = population.get_mut(index) {
                chromosome.set_fitness(value);
            }
        }
    }
}
