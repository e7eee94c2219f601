//! EA generational loop execution.
//!
//! [`Evolution`] drives one generation at a time through
//! evaluation → selection → crossover → mutation → replacement.
//! [`EaRunner`] runs it for the configured number of generations.
//!
//! Replacement is strictly generational with no elitism. Two behaviours are
//! observable through the configuration:
//!
//! - mating-pool members are paired (0,1), (2,3), ...; with an odd pool the
//!   last member produces no offspring;
//! - if fewer children than `population_size` are produced, the population
//!   shrinks for the following generations. It is never padded.

use super::config::EaConfig;
use super::crossover::Recombiner;
use super::fitness::{evaluate_population, FitnessFn};
use super::mutation::Mutator;
use super::selection::{Selection, Selector};
use super::types::{create_population, distinct_count, Chromosome, Population};
use crate::error::{EaError, Result};
use crate::random::rng_from_seed;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, instrument, trace, warn};

/// Stage of the generational state machine.
///
/// `Initialized → Evaluating → Selecting → Recombining → Mutating →
/// Replacing → (Evaluating | Done)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Initial population created, no generation run yet.
    Initialized,
    /// Scoring the current population.
    Evaluating,
    /// Building the mating pool.
    Selecting,
    /// Applying crossover to parent pairs.
    Recombining,
    /// Applying mutation to every child.
    Mutating,
    /// Installing the next population.
    Replacing,
    /// All configured generations have run.
    Done,
}

/// Per-generation report, computed from the population as evaluated at the
/// start of the generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Zero-based generation index.
    pub generation: usize,
    /// Highest fitness in the population.
    pub best: f64,
    /// Mean fitness.
    pub mean: f64,
    /// Lowest fitness in the population.
    pub worst: f64,
    /// Distinct chromosomes divided by the configured `population_size`.
    ///
    /// After the population shrinks this stays below 1.0 even when every
    /// member is distinct.
    pub diversity: f64,
    /// Number of members evaluated.
    pub population_size: usize,
}

impl GenerationStats {
    /// Summarises a non-empty evaluated population against its configured
    /// `capacity`.
    fn new(generation: usize, population: &[Chromosome], fitness: &[f64], capacity: usize) -> Self {
        let best = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst = fitness.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = fitness.iter().sum::<f64>() / fitness.len() as f64;
        Self {
            generation,
            best,
            mean,
            worst,
            diversity: distinct_count(population) as f64 / capacity.max(1) as f64,
            population_size: population.len(),
        }
    }
}

/// Result of an EA run.
#[derive(Debug, Clone)]
pub struct EaResult {
    /// The last population.
    pub population: Population,

    /// Fitness of each member of `population`, index-aligned.
    pub fitness: Vec<f64>,

    /// Fittest member of the last population (first one on ties).
    pub best: Chromosome,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Report of every generation, in order.
    pub history: Vec<GenerationStats>,
}

/// Step-wise driver of the generational loop.
///
/// Owns the run's random source, so a fixed seed replays the run exactly.
///
/// ```
/// use u_evolve::ga::{EaConfig, Evolution, OneMax, Phase};
///
/// let config = EaConfig::default().with_seed(42).with_generations(3);
/// let mut evo = Evolution::new(&OneMax, config).unwrap();
/// assert_eq!(evo.phase(), Phase::Initialized);
///
/// while !evo.is_done() {
///     let stats = evo.step().unwrap();
///     assert!(stats.best <= 6.0);
/// }
/// assert_eq!(evo.phase(), Phase::Done);
/// let result = evo.finish().unwrap();
/// assert_eq!(result.generations, 3);
/// ```
pub struct Evolution<'a, F: FitnessFn + ?Sized> {
    config: EaConfig,
    fitness: &'a F,
    rng: StdRng,
    population: Population,
    generation: usize,
    phase: Phase,
    history: Vec<GenerationStats>,
}

impl<'a, F: FitnessFn + ?Sized> Evolution<'a, F> {
    /// Validates `config` and creates a uniformly random initial population.
    ///
    /// # Errors
    /// [`EaError::InvalidArgument`] if the configuration is invalid.
    pub fn new(fitness: &'a F, config: EaConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = rng_from_seed(config.seed);
        let population =
            create_population(config.population_size, config.chromosome_length, &mut rng)?;
        Ok(Self::assemble(fitness, config, rng, population))
    }

    /// Starts from a caller-supplied initial population.
    ///
    /// # Errors
    /// [`EaError::InvalidArgument`] if the configuration is invalid, the
    /// population is empty or larger than `population_size`, a member's
    /// length differs from `chromosome_length`, or steady-state selection is
    /// given a single member.
    pub fn with_population(fitness: &'a F, config: EaConfig, population: Population) -> Result<Self> {
        config.validate()?;
        if population.is_empty() {
            return Err(EaError::invalid("initial population must not be empty"));
        }
        if population.len() > config.population_size {
            return Err(EaError::invalid(format!(
                "initial population has {} members, population_size is {}",
                population.len(),
                config.population_size
            )));
        }
        if config.selection == Selection::SteadyState && population.len() < 2 {
            return Err(EaError::invalid(
                "steady-state selection needs at least 2 initial members to form a parent pair",
            ));
        }
        if let Some(bad) = population
            .iter()
            .find(|c| c.len() != config.chromosome_length)
        {
            return Err(EaError::invalid(format!(
                "chromosome {bad} has length {}, expected {}",
                bad.len(),
                config.chromosome_length
            )));
        }
        let rng = rng_from_seed(config.seed);
        Ok(Self::assemble(fitness, config, rng, population))
    }

    fn assemble(fitness: &'a F, config: EaConfig, rng: StdRng, population: Population) -> Self {
        Self {
            history: Vec::with_capacity(config.generations),
            config,
            fitness,
            rng,
            population,
            generation: 0,
            phase: Phase::Initialized,
        }
    }

    /// Current stage. Between generations this reads [`Phase::Replacing`].
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The current population.
    pub fn population(&self) -> &[Chromosome] {
        &self.population
    }

    /// The run configuration.
    pub fn config(&self) -> &EaConfig {
        &self.config
    }

    /// Reports of all completed generations.
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// Whether every configured generation has run.
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    fn enter(&mut self, phase: Phase) {
        trace!(generation = self.generation, ?phase, "phase transition");
        self.phase = phase;
    }

    /// Runs one generation and returns its report.
    ///
    /// On error the population is left exactly as it was and the phase
    /// names the stage that failed.
    ///
    /// # Errors
    /// - [`EaError::InvalidArgument`] if the run is already done or the
    ///   population has died out.
    /// - Any error raised by the configured strategies.
    #[instrument(level = "debug", skip(self), fields(generation = self.generation))]
    pub fn step(&mut self) -> Result<GenerationStats> {
        if self.is_done() {
            return Err(EaError::invalid(format!(
                "evolution already finished after {} generations",
                self.generation
            )));
        }
        if self.population.is_empty() {
            return Err(EaError::invalid("population is empty"));
        }

        self.enter(Phase::Evaluating);
        let fitness = evaluate_population(self.fitness, &self.population, self.config.parallel);
        let stats = GenerationStats::new(
            self.generation,
            &self.population,
            &fitness,
            self.config.population_size,
        );

        self.enter(Phase::Selecting);
        let pool = self.config.selection.select(
            &self.population,
            &fitness,
            self.config.mating_pool_size,
            &mut self.rng,
        )?;

        self.enter(Phase::Recombining);
        let offspring = recombine(&pool, &self.config.crossover, &mut self.rng)?;

        self.enter(Phase::Mutating);
        let mut next = mutate_all(
            &offspring,
            &self.config.mutation,
            self.config.mutation_rate,
            &mut self.rng,
        )?;

        self.enter(Phase::Replacing);
        next.truncate(self.config.population_size);
        if next.len() < self.population.len() {
            warn!(
                generation = self.generation,
                from = self.population.len(),
                to = next.len(),
                "population shrank: mating pool produced too few children"
            );
        }
        self.population = next;

        info!(
            generation = stats.generation,
            best = stats.best,
            mean = stats.mean,
            worst = stats.worst,
            diversity = stats.diversity,
            "generation complete"
        );
        self.history.push(stats.clone());
        self.generation += 1;

        if self.generation >= self.config.generations {
            self.enter(Phase::Done);
        }
        Ok(stats)
    }

    /// Steps until done, handing every report to `observer`.
    ///
    /// # Errors
    /// Stops at, and returns, the first failing generation.
    pub fn run_to_end<O: FnMut(&GenerationStats)>(&mut self, mut observer: O) -> Result<()> {
        while !self.is_done() {
            let stats = self.step()?;
            observer(&stats);
        }
        Ok(())
    }

    /// Evaluates the current population and packages the result.
    ///
    /// # Errors
    /// [`EaError::InvalidArgument`] if the population is empty.
    pub fn finish(self) -> Result<EaResult> {
        let fitness = evaluate_population(self.fitness, &self.population, self.config.parallel);
        let (best_idx, best_fitness) = fitness
            .iter()
            .copied()
            .enumerate()
            .fold(None, |acc: Option<(usize, f64)>, (i, f)| match acc {
                Some((_, best)) if best >= f => acc,
                _ => Some((i, f)),
            })
            .ok_or_else(|| EaError::invalid("population is empty"))?;

        Ok(EaResult {
            best: self.population[best_idx].clone(),
            best_fitness,
            population: self.population,
            fitness,
            generations: self.generation,
            history: self.history,
        })
    }
}

/// Executes the full EA loop.
///
/// # Usage
///
/// ```
/// use u_evolve::ga::{EaConfig, EaRunner, OneMax, Selection};
///
/// let config = EaConfig::default()
///     .with_population_size(20)
///     .with_mating_pool_size(20)
///     .with_selection(Selection::Tournament(3))
///     .with_seed(42);
/// let result = EaRunner::run(&OneMax, &config).unwrap();
/// assert_eq!(result.history.len(), 10);
/// ```
pub struct EaRunner;

impl EaRunner {
    /// Runs the EA for `config.generations` generations.
    ///
    /// # Errors
    /// Fails fast on an invalid configuration or on the first generation
    /// whose strategies reject their inputs.
    pub fn run<F: FitnessFn + ?Sized>(fitness: &F, config: &EaConfig) -> Result<EaResult> {
        Self::run_with_observer(fitness, config, |_| {})
    }

    /// Runs the EA, calling `observer` with each generation's report.
    ///
    /// # Errors
    /// Same as [`run`](Self::run).
    #[instrument(level = "debug", skip_all, fields(
        selection = %config.selection,
        crossover = %config.crossover,
        mutation = %config.mutation
    ))]
    pub fn run_with_observer<F, O>(fitness: &F, config: &EaConfig, observer: O) -> Result<EaResult>
    where
        F: FitnessFn + ?Sized,
        O: FnMut(&GenerationStats),
    {
        let mut evolution = Evolution::new(fitness, config.clone())?;
        debug!(
            population_size = config.population_size,
            chromosome_length = config.chromosome_length,
            generations = config.generations,
            mating_pool_size = config.mating_pool_size,
            mutation_rate = config.mutation_rate,
            seed = ?config.seed,
            "starting evolutionary run"
        );
        evolution.run_to_end(observer)?;
        evolution.finish()
    }
}

/// Pairs consecutive pool members and recombines each pair.
///
/// An odd trailing member is dropped, so a pool of `k` yields
/// `2 * (k / 2)` children, in pair order.
pub fn recombine<C: Recombiner, R: Rng>(
    pool: &[Chromosome],
    crossover: &C,
    rng: &mut R,
) -> Result<Vec<Chromosome>> {
    let mut children = Vec::with_capacity(pool.len() / 2 * 2);
    for pair in pool.chunks_exact(2) {
        let (c1, c2) = crossover.crossover(&pair[0], &pair[1], rng)?;
        children.push(c1);
        children.push(c2);
    }
    Ok(children)
}

/// Mutates every child once, preserving order.
pub fn mutate_all<M: Mutator, R: Rng>(
    children: &[Chromosome],
    mutation: &M,
    rate: f64,
    rng: &mut R,
) -> Result<Vec<Chromosome>> {
    children
        .iter()
        .map(|c| mutation.mutate(c, rate, rng))
        .collect()
}

/// Produces the offspring of one mating pool: [`recombine`] then
/// [`mutate_all`].
pub fn breed<C: Recombiner, M: Mutator, R: Rng>(
    pool: &[Chromosome],
    crossover: &C,
    mutation: &M,
    rate: f64,
    rng: &mut R,
) -> Result<Vec<Chromosome>> {
    let offspring = recombine(pool, crossover, rng)?;
    mutate_all(&offspring, mutation, rate, rng)
}

// ============================================================================
// Tests
// ============================================================================
