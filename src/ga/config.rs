//! EA run configuration.
//!
//! [`EaConfig`] holds every parameter of the generational loop. It is set
//! once, validated once, and never changed while a run is in progress.

use super::crossover::Crossover;
use super::mutation::{check_rate, Mutation};
use super::selection::Selection;
use crate::error::{EaError, Result};

/// Configuration for the evolutionary algorithm.
///
/// # Defaults
///
/// ```
/// use u_evolve::ga::EaConfig;
///
/// let config = EaConfig::default();
/// assert_eq!(config.population_size, 8);
/// assert_eq!(config.chromosome_length, 6);
/// assert_eq!(config.generations, 10);
/// assert_eq!(config.mating_pool_size, 4);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::ga::{Crossover, EaConfig, Mutation, Selection};
///
/// let config = EaConfig::default()
///     .with_population_size(50)
///     .with_chromosome_length(32)
///     .with_mating_pool_size(50)
///     .with_selection(Selection::Tournament(5))
///     .with_crossover(Crossover::Uniform)
///     .with_mutation(Mutation::BitFlip)
///     .with_mutation_rate(0.02);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EaConfig {
    /// Number of chromosomes in the initial population, and the upper bound
    /// for every later population.
    pub population_size: usize,

    /// Number of genes per chromosome.
    pub chromosome_length: usize,

    /// Number of generations to run. There is no early stop.
    pub generations: usize,

    /// Number of parents selected each generation.
    ///
    /// Parents are paired (0,1), (2,3), ...; an odd trailing parent is
    /// dropped. A pool yielding fewer children than `population_size`
    /// shrinks the population.
    pub mating_pool_size: usize,

    /// Per-gene probability for [`Mutation::BitFlip`] (0.0–1.0).
    pub mutation_rate: f64,

    /// Selection strategy for building the mating pool.
    pub selection: Selection,

    /// Crossover strategy applied to each parent pair.
    pub crossover: Crossover,

    /// Mutation strategy applied to each child.
    pub mutation: Mutation,

    /// Whether to evaluate fitness in parallel using rayon.
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EaConfig {
    fn default() -> Self {
        Self {
            population_size: 8,
            chromosome_length: 6,
            generations: 10,
            mating_pool_size: 4,
            mutation_rate: 0.1,
            selection: Selection::default(),
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl EaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the chromosome length.
    pub fn with_chromosome_length(mut self, n: usize) -> Self {
        self.chromosome_length = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mating pool size.
    pub fn with_mating_pool_size(mut self, n: usize) -> Self {
        self.mating_pool_size = n;
        self
    }

    /// Sets the mutation rate.
    ///
    /// Not clamped: an out-of-range rate is reported by
    /// [`validate`](Self::validate).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the crossover strategy.
    pub fn with_crossover(mut self, op: Crossover) -> Self {
        self.crossover = op;
        self
    }

    /// Sets the mutation strategy.
    pub fn with_mutation(mut self, op: Mutation) -> Self {
        self.mutation = op;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Convenience builder for setting tournament size.
    ///
    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Resolves the three strategies from their configuration names.
    ///
    /// ```
    /// use u_evolve::ga::{Crossover, EaConfig, Mutation, Selection};
    ///
    /// let config = EaConfig::default()
    ///     .with_strategy_names("steady", "single_point", "swap")
    ///     .unwrap();
    /// assert_eq!(config.selection, Selection::SteadyState);
    /// assert_eq!(config.crossover, Crossover::SinglePoint);
    /// assert_eq!(config.mutation, Mutation::Swap);
    /// ```
    ///
    /// # Errors
    /// [`EaError::InvalidArgument`] for an unknown name.
    pub fn with_strategy_names(
        mut self,
        selection: &str,
        crossover: &str,
        mutation: &str,
    ) -> Result<Self> {
        self.selection = selection.parse()?;
        self.crossover = crossover.parse()?;
        self.mutation = mutation.parse()?;
        Ok(self)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`EaError::InvalidArgument`] describing the first violated
    /// precondition.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(EaError::invalid("population_size must be at least 1"));
        }
        if self.generations == 0 {
            return Err(EaError::invalid("generations must be at least 1"));
        }
        if self.mating_pool_size < 2 {
            return Err(EaError::invalid(
                "mating_pool_size must be at least 2 to form a parent pair",
            ));
        }
        if self.selection == Selection::SteadyState && self.population_size < 2 {
            return Err(EaError::invalid(
                "steady-state selection needs population_size >= 2 to form a parent pair",
            ));
        }
        check_rate(self.mutation_rate)?;
        if let Selection::Tournament(0) = self.selection {
            return Err(EaError::invalid("tournament size must be at least 1"));
        }
        self.crossover.validate()?;
        let min_length = self.crossover.min_length();
        if self.chromosome_length < min_length {
            return Err(EaError::invalid(format!(
                "{} crossover needs chromosome_length >= {}, got {}",
                self.crossover, min_length, self.chromosome_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EaConfig::default();
        assert_eq!(config.population_size, 8);
        assert_eq!(config.chromosome_length, 6);
        assert_eq!(config.generations, 10);
        assert_eq!(config.mating_pool_size, 4);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
        assert_eq!(config.selection, Selection::Canonical);
        assert_eq!(config.crossover, Crossover::TwoPoint);
        assert_eq!(config.mutation, Mutation::BitFlip);
        assert!(!config.parallel);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EaConfig::default()
            .with_population_size(200)
            .with_chromosome_length(40)
            .with_generations(1000)
            .with_mating_pool_size(100)
            .with_selection(Selection::Rank)
            .with_crossover(Crossover::Uniform)
            .with_mutation(Mutation::Swap)
            .with_mutation_rate(0.05)
            .with_parallel(true)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.chromosome_length, 40);
        assert_eq!(config.generations, 1000);
        assert_eq!(config.mating_pool_size, 100);
        assert_eq!(config.selection, Selection::Rank);
        assert_eq!(config.crossover, Crossover::Uniform);
        assert_eq!(config.mutation, Mutation::Swap);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_zero_population() {
        let config = EaConfig::default().with_population_size(0);
        assert!(matches!(config.validate(), Err(EaError::InvalidArgument(_))));
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = EaConfig::default().with_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_mating_pool_too_small() {
        assert!(EaConfig::default()
            .with_mating_pool_size(1)
            .validate()
            .is_err());
        assert!(EaConfig::default()
            .with_mating_pool_size(2)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_steady_state_single_member() {
        let config = EaConfig::default()
            .with_population_size(1)
            .with_mating_pool_size(2)
            .with_selection(Selection::SteadyState)
            .with_crossover(Crossover::SinglePoint);
        assert!(matches!(config.validate(), Err(EaError::InvalidArgument(_))));

        // Sampling strategies draw a full pair from a single member
        assert!(config
            .clone()
            .with_selection(Selection::Tournament(2))
            .validate()
            .is_ok());
        assert!(config.with_population_size(2).validate().is_ok());
    }

    #[test]
    fn test_rate_not_clamped() {
        let config = EaConfig::default().with_mutation_rate(1.5);
        assert!((config.mutation_rate - 1.5).abs() < 1e-10);
        assert!(config.validate().is_err());
        assert!(EaConfig::default()
            .with_mutation_rate(-0.01)
            .validate()
            .is_err());
        assert!(EaConfig::default()
            .with_mutation_rate(1.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_chromosome_too_short_for_crossover() {
        let config = EaConfig::default()
            .with_crossover(Crossover::TwoPoint)
            .with_chromosome_length(2);
        assert!(config.validate().is_err());

        let config = config.with_crossover(Crossover::SinglePoint);
        assert!(config.validate().is_ok());

        let config = config.with_crossover(Crossover::MultiPoint(3));
        assert!(config.validate().is_err());

        let config = config
            .with_crossover(Crossover::Uniform)
            .with_chromosome_length(1);
        assert!(config.validate().is_ok());

        let config = config.with_chromosome_length(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_strategy_parameters() {
        assert!(EaConfig::default()
            .with_tournament_size(0)
            .validate()
            .is_err());
        assert!(EaConfig::default()
            .with_crossover(Crossover::MultiPoint(0))
            .validate()
            .is_err());
    }

    #[test]
    fn test_with_tournament_size() {
        let config = EaConfig::default().with_tournament_size(5);
        assert_eq!(config.selection, Selection::Tournament(5));
    }

    #[test]
    fn test_strategy_names() {
        let config = EaConfig::default()
            .with_strategy_names("tournament:4", "multi_point", "bit_flip")
            .unwrap();
        assert_eq!(config.selection, Selection::Tournament(4));
        assert_eq!(config.crossover, Crossover::MultiPoint(3));
        assert_eq!(config.mutation, Mutation::BitFlip);

        assert!(EaConfig::default()
            .with_strategy_names("lottery", "uniform", "swap")
            .is_err());
    }
}
