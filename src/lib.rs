//! Binary-encoded evolutionary algorithm engine.
//!
//! Provides a generational genetic algorithm over fixed-length bit strings
//! with interchangeable stages:
//!
//! - **Selection**: canonical, roulette wheel, rank-based, tournament, and
//!   steady-state (truncation).
//! - **Crossover**: single-point, two-point, multi-point, and uniform.
//! - **Mutation**: bit-flip and swap.
//!
//! Every stage receives its random source explicitly, so a seeded run is
//! fully reproducible.
//!
//! # Example
//!
//! ```
//! use u_evolve::ga::{Crossover, EaConfig, EaRunner, Mutation, OneMax, Selection};
//!
//! let config = EaConfig::default()
//!     .with_population_size(30)
//!     .with_chromosome_length(16)
//!     .with_mating_pool_size(30)
//!     .with_generations(50)
//!     .with_selection(Selection::Tournament(3))
//!     .with_crossover(Crossover::Uniform)
//!     .with_mutation(Mutation::BitFlip)
//!     .with_mutation_rate(0.02)
//!     .with_seed(42);
//!
//! let result = EaRunner::run(&OneMax, &config).unwrap();
//! assert!(result.best_fitness <= 16.0);
//! ```
//!
//! # Features
//!
//! - `parallel`: evaluate fitness on rayon's thread pool when
//!   [`EaConfig::parallel`](ga::EaConfig::parallel) is set.
//! - `serde`: `Serialize`/`Deserialize` for configuration, strategies,
//!   chromosomes, and reports.

pub mod error;
pub mod ga;
pub mod random;

pub use error::{EaError, Result};
