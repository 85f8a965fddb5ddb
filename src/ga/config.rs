//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{GaError, Result};
use log::warn;
use std::fmt;

/// Configuration for the Genetic Algorithm.
///
/// Controls population size, operator rates, termination and parallelism.
/// The engine uses the values as given; call [`normalized`](Self::normalized)
/// to replace unset (zero or negative) parameters with the defaults.
///
/// # Defaults
///
/// ```
/// use u_evo::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 10_000);
/// assert_eq!(config.generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evo::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_generations(50)
///     .with_selection_rate(0.3)
///     .with_target_fitness(16.0, 0.0)
///     .with_seed(7);
/// assert_eq!(config.parent_count(), 60);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of chromosomes in every generation.
    pub population_size: usize,

    /// Maximum number of generations to breed.
    pub generations: usize,

    /// Chromosome length the problem is meant to use.
    ///
    /// Informational: the engine takes the length from its prototype
    /// chromosome.
    pub gen_length: usize,

    /// Probability that an offspring is passed to the mutation operator
    /// (0.0–1.0).
    pub mutation_rate: f64,

    /// Fraction of the population selected as parents each generation
    /// (0.0–1.0).
    ///
    /// `floor(population_size * selection_rate)` parents survive unchanged;
    /// the rest of the next generation is bred from them.
    pub selection_rate: f64,

    /// Fitness at which the run may stop early.
    ///
    /// `None` disables target-based termination.
    pub target_fitness: Option<f64>,

    /// Tolerance around [`target_fitness`](Self::target_fitness).
    ///
    /// The run stops once `|best - target| <= delta`.
    pub delta: f64,

    /// Whether to evaluate fitness on a worker pool.
    pub multithread: bool,

    /// Number of evaluation workers when [`multithread`](Self::multithread)
    /// is set.
    pub threads: usize,

    /// Probability of using the alternate crossover / mutation operator
    /// instead of the primary one (0.0–1.0).
    ///
    /// When left at 0 while an alternate operator is configured, the engine
    /// uses 0.25. An explicit non-zero rate is kept as given, so a caller can
    /// tune how often the alternate operators run.
    pub second_operator_rate: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 10_000,
            generations: 100,
            gen_length: 16,
            mutation_rate: 0.01,
            selection_rate: 0.2,
            target_fitness: None,
            delta: 0.0,
            multithread: true,
            threads: 4,
            second_operator_rate: 0.0,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the chromosome length.
    pub fn with_gen_length(mut self, n: usize) -> Self {
        self.gen_length = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the selection rate.
    pub fn with_selection_rate(mut self, rate: f64) -> Self {
        self.selection_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the target fitness and its tolerance.
    pub fn with_target_fitness(mut self, target: f64, delta: f64) -> Self {
        self.target_fitness = Some(target);
        self.delta = delta.max(0.0);
        self
    }

    /// Enables parallel evaluation on `threads` workers, or disables it
    /// when `threads` is 0.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.multithread = threads > 0;
        self.threads = threads;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_multithread(mut self, multithread: bool) -> Self {
        self.multithread = multithread;
        self
    }

    /// Sets the probability of using the alternate operators.
    pub fn with_second_operator_rate(mut self, rate: f64) -> Self {
        self.second_operator_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of parents kept each generation:
    /// `floor(population_size * selection_rate)`.
    pub fn parent_count(&self) -> usize {
        (self.population_size as f64 * self.selection_rate.max(0.0)) as usize
    }

    /// Replaces unset parameters with their defaults.
    ///
    /// - `population_size`, `generations` and `gen_length` of 0 take the
    ///   default value
    /// - non-positive `mutation_rate` / `selection_rate` take the default
    /// - more than one thread turns `multithread` on; `multithread` with at
    ///   most one thread uses the default thread count
    /// - the target is kept only when both target and `delta` are positive
    ///
    /// Every adjustment is logged at `warn` level.
    pub fn normalized(mut self) -> Self {
        let def = Self::default();
        if self.population_size == 0 {
            warn!("population_size 0 replaced by {}", def.population_size);
            self.population_size = def.population_size;
        }
        if self.generations == 0 {
            warn!("generations 0 replaced by {}", def.generations);
            self.generations = def.generations;
        }
        if self.gen_length == 0 {
            warn!("gen_length 0 replaced by {}", def.gen_length);
            self.gen_length = def.gen_length;
        }
        if self.mutation_rate <= 0.0 {
            warn!(
                "mutation_rate {} replaced by {}",
                self.mutation_rate, def.mutation_rate
            );
            self.mutation_rate = def.mutation_rate;
        }
        if self.selection_rate <= 0.0 {
            warn!(
                "selection_rate {} replaced by {}",
                self.selection_rate, def.selection_rate
            );
            self.selection_rate = def.selection_rate;
        }
        if self.threads > 1 && !self.multithread {
            warn!("{} threads requested, enabling multithread", self.threads);
            self.multithread = true;
        }
        if self.threads <= 1 && self.multithread {
            warn!(
                "multithread with {} threads, using {}",
                self.threads, def.threads
            );
            self.threads = def.threads;
        }
        match self.target_fitness {
            Some(target) if target > 0.0 && self.delta > 0.0 => {}
            Some(target) => {
                warn!(
                    "target fitness {target} with delta {} disabled",
                    self.delta
                );
                self.target_fitness = None;
                self.delta = 0.0;
            }
            None => self.delta = 0.0,
        }
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`GaError::InvalidConfig`] describing the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(invalid("population_size must be at least 1"));
        }
        for (name, rate) in [
            ("mutation_rate", self.mutation_rate),
            ("selection_rate", self.selection_rate),
            ("second_operator_rate", self.second_operator_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(invalid(format!("{name} must be within [0, 1], got {rate}")));
            }
        }
        if self.parent_count() == 0 {
            return Err(invalid(format!(
                "selection_rate {} keeps no parents out of {}",
                self.selection_rate, self.population_size
            )));
        }
        if !(self.delta >= 0.0 && self.delta.is_finite()) {
            return Err(invalid("delta must be finite and non-negative"));
        }
        if matches!(self.target_fitness, Some(t) if !t.is_finite()) {
            return Err(invalid("target_fitness must be finite"));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> GaError {
    GaError::InvalidConfig(message.into())
}

impl fmt::Display for GaConfig {
    /// Parameter summary, one `name value` line per parameter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<20} {}", "Population size:", self.population_size)?;
        writeln!(f, "{:<20} {}", "Generations:", self.generations)?;
        writeln!(f, "{:<20} {}", "Gen length:", self.gen_length)?;
        writeln!(f, "{:<20} {:.2}", "Mutation rate:", self.mutation_rate)?;
        writeln!(f, "{:<20} {:.2}", "Selection rate:", self.selection_rate)?;
        writeln!(f, "{:<20} {}", "Multithread:", self.multithread)?;
        write!(f, "{:<20} {}", "Threads:", self.threads)?;
        if let Some(target) = self.target_fitness {
            writeln!(f)?;
            writeln!(f, "{:<20} {:.2}", "Approximate fit:", target)?;
            write!(f, "{:<20} {:.2}", "Delta:", self.delta)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 10_000);
        assert_eq!(config.generations, 100);
        assert_eq!(config.gen_length, 16);
        assert!((config.mutation_rate - 0.01).abs() < 1e-10);
        assert!((config.selection_rate - 0.2).abs() < 1e-10);
        assert!(config.target_fitness.is_none());
        assert_eq!(config.delta, 0.0);
        assert!(config.multithread);
        assert_eq!(config.threads, 4);
        assert_eq!(config.second_operator_rate, 0.0);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(200)
            .with_generations(1000)
            .with_gen_length(8)
            .with_mutation_rate(0.05)
            .with_selection_rate(0.5)
            .with_target_fitness(8.0, 0.5)
            .with_threads(0)
            .with_second_operator_rate(0.3)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.generations, 1000);
        assert_eq!(config.gen_length, 8);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert!((config.selection_rate - 0.5).abs() < 1e-10);
        assert_eq!(config.target_fitness, Some(8.0));
        assert_eq!(config.delta, 0.5);
        assert!(!config.multithread);
        assert!((config.second_operator_rate - 0.3).abs() < 1e-10);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_clamp_rates() {
        let config = GaConfig::default()
            .with_mutation_rate(2.0)
            .with_selection_rate(-0.5)
            .with_second_operator_rate(1.5)
            .with_target_fitness(1.0, -3.0);

        assert_eq!(config.mutation_rate, 1.0);
        assert_eq!(config.selection_rate, 0.0);
        assert_eq!(config.second_operator_rate, 1.0);
        assert_eq!(config.delta, 0.0);
    }

    #[test]
    fn test_parent_count() {
        let config = GaConfig::default()
            .with_population_size(6)
            .with_selection_rate(0.2);
        assert_eq!(config.parent_count(), 1);
        assert_eq!(GaConfig::default().parent_count(), 2000);
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_population() {
        let config = GaConfig::default().with_population_size(0);
        assert!(matches!(config.validate(), Err(GaError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_no_parents() {
        let config = GaConfig::default()
            .with_population_size(4)
            .with_selection_rate(0.2);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rates_out_of_range() {
        let mut config = GaConfig::default();
        config.mutation_rate = 1.5;
        assert!(config.validate().is_err());

        let mut config = GaConfig::default();
        config.delta = -1.0;
        assert!(config.validate().is_err());

        let mut config = GaConfig::default();
        config.target_fitness = Some(f64::NAN);
        assert!(config.validate().is_err());
    }

    // ---- normalized ----

    #[test]
    fn test_normalized_fills_unset_values() {
        let config = GaConfig {
            population_size: 0,
            generations: 0,
            gen_length: 0,
            mutation_rate: 0.0,
            selection_rate: -1.0,
            ..GaConfig::default()
        }
        .normalized();

        let def = GaConfig::default();
        assert_eq!(config.population_size, def.population_size);
        assert_eq!(config.generations, def.generations);
        assert_eq!(config.gen_length, def.gen_length);
        assert_eq!(config.mutation_rate, def.mutation_rate);
        assert_eq!(config.selection_rate, def.selection_rate);
    }

    #[test]
    fn test_normalized_threads() {
        let config = GaConfig {
            multithread: false,
            threads: 8,
            ..GaConfig::default()
        }
        .normalized();
        assert!(config.multithread);
        assert_eq!(config.threads, 8);

        let config = GaConfig {
            multithread: true,
            threads: 1,
            ..GaConfig::default()
        }
        .normalized();
        assert_eq!(config.threads, 4);

        let config = GaConfig {
            multithread: false,
            threads: 1,
            ..GaConfig::default()
        }
        .normalized();
        assert!(!config.multithread);
    }

    #[test]
    fn test_normalized_target_needs_positive_delta() {
        let kept = GaConfig::default()
            .with_target_fitness(10.0, 0.5)
            .normalized();
        assert_eq!(kept.target_fitness, Some(10.0));
        assert_eq!(kept.delta, 0.5);

        let dropped = GaConfig::default()
            .with_target_fitness(10.0, 0.0)
            .normalized();
        assert!(dropped.target_fitness.is_none());
        assert_eq!(dropped.delta, 0.0);

        let negative = GaConfig::default()
            .with_target_fitness(-2.0, 1.0)
            .normalized();
        assert!(negative.target_fitness.is_none());
    }

    #[test]
    fn test_normalized_keeps_valid_config() {
        let config = GaConfig::default().with_seed(3);
        assert_eq!(config.clone().normalized(), config);
    }

    #[test]
    fn test_display_summary() {
        let text = GaConfig::default().to_string();
        assert!(text.starts_with("Population size:     10000"));
        assert!(text.contains("Mutation rate:       0.01"));
        assert!(!text.contains("Delta:"));

        let text = GaConfig::default()
            .with_target_fitness(4.0, 0.5)
            .to_string();
        assert!(text.contains("Approximate fit:     4.00"));
        assert!(text.ends_with("Delta:               0.50"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let config = GaConfig::default().with_seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let back: GaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
