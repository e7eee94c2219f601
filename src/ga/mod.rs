//! Binary-encoded genetic algorithm engine.
//!
//! A generational EA over fixed-length bit strings, with one capability
//! trait per stage and one enum variant per algorithm. Strategies are
//! resolved once, when the [`EaConfig`] is built, and never re-dispatched
//! by name during a run.
//!
//! # Core Traits
//!
//! - [`FitnessFn`]: pure scoring function, higher is better
//! - [`Selector`]: population + fitness → mating pool
//! - [`Recombiner`]: two parents → two children
//! - [`Mutator`]: one chromosome → one perturbed copy
//!
//! # Key Types
//!
//! - [`Chromosome`]: immutable fixed-length binary genome
//! - [`Selection`]: canonical, roulette, rank, tournament, steady-state
//! - [`Crossover`]: single-point, two-point, multi-point, uniform
//! - [`Mutation`]: bit-flip, swap
//! - [`EaConfig`]: run parameters and the chosen strategies
//! - [`Evolution`] / [`EaRunner`]: the generational loop
//! - [`EaResult`], [`GenerationStats`]: final output and per-generation reports
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
mod crossover;
mod fitness;
mod mutation;
mod runner;
mod selection;
mod types;

pub use config::EaConfig;
pub use crossover::{Crossover, Recombiner, DEFAULT_MULTI_POINT_CUTS};
pub use fitness::{evaluate_population, FitnessFn, OneMax};
pub use mutation::{Mutation, Mutator};
pub use runner::{breed, mutate_all, recombine, EaResult, EaRunner, Evolution, GenerationStats, Phase};
pub use selection::{Selection, Selector, DEFAULT_TOURNAMENT_SIZE};
pub use types::{create_population, distinct_count, diversity, Chromosome, Population};
