//! Fitness evaluation.
//!
//! The engine only assumes that higher scores are better and that ties are
//! possible. Any pure function of a chromosome can serve as the evaluator.

use super::types::Chromosome;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Scores a chromosome. Higher is better.
///
/// Implementations must be pure: no side effects and no shared mutable
/// state, so that evaluation may run on several threads.
///
/// Closures implement this trait directly:
///
/// ```
/// use u_evolve::ga::{Chromosome, FitnessFn};
///
/// let leading_ones = |c: &Chromosome| c.genes().iter().take_while(|&&g| g).count() as f64;
/// let c: Chromosome = "1101".parse().unwrap();
/// assert_eq!(leading_ones.evaluate(&c), 2.0);
/// ```
pub trait FitnessFn: Send + Sync {
    /// Returns the score of `chromosome`.
    fn evaluate(&self, chromosome: &Chromosome) -> f64;
}

impl<F> FitnessFn for F
where
    F: Fn(&Chromosome) -> f64 + Send + Sync,
{
    fn evaluate(&self, chromosome: &Chromosome) -> f64 {
        self(chromosome)
    }
}

/// Counts the genes equal to `1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneMax;

impl FitnessFn for OneMax {
    fn evaluate(&self, chromosome: &Chromosome) -> f64 {
        chromosome.count_ones() as f64
    }
}

/// Evaluates every member, preserving population order.
///
/// With the `parallel` feature enabled and `parallel` set, evaluation is
/// spread over rayon's thread pool. The returned vector is index-aligned
/// with `population` either way.
pub fn evaluate_population<F: FitnessFn + ?Sized>(
    fitness: &F,
    population: &[Chromosome],
    parallel: bool,
) -> Vec<f64> {
    if parallel {
        evaluate_parallel(fitness, population)
    } else {
        population.iter().map(|c| fitness.evaluate(c)).collect()
    }
}

#[cfg(feature = "parallel")]
fn evaluate_parallel<F: FitnessFn + ?Sized>(fitness: &F, population: &[Chromosome]) -> Vec<f64> {
    population.par_iter().map(|c| fitness.evaluate(c)).collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_parallel<F: FitnessFn + ?Sized>(fitness: &F, population: &[Chromosome]) -> Vec<f64> {
    population.iter().map(|c| fitness.evaluate(c)).collect()
}
