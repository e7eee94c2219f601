//! Selection strategies for the EA.
//!
//! Selection builds the mating pool: `k` members drawn from the current
//! population according to its fitness vector. All strategies assume
//! **maximization** (higher fitness = better).
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Chromosome;
use crate::error::{EaError, Result};
use rand::seq::index;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Default tournament size when none is given.
pub const DEFAULT_TOURNAMENT_SIZE: usize = 3;

/// Builds a mating pool from a population and its fitness vector.
///
/// Implementors only pick indices; [`select`](Selector::select) checks the
/// inputs and materialises the chromosomes.
pub trait Selector {
    /// Picks `k` indices into a population whose fitness vector is `fitness`.
    ///
    /// # Errors
    /// [`EaError::InvalidArgument`] if `fitness` is empty, plus any
    /// strategy-specific precondition failure.
    fn select_indices<R: Rng>(&self, fitness: &[f64], k: usize, rng: &mut R) -> Result<Vec<usize>>;

    /// Returns the mating pool drawn from `population`.
    ///
    /// # Errors
    /// [`EaError::InvalidArgument`] if the population is empty or the
    /// fitness vector is not index-aligned with it.
    fn select<R: Rng>(
        &self,
        population: &[Chromosome],
        fitness: &[f64],
        k: usize,
        rng: &mut R,
    ) -> Result<Vec<Chromosome>> {
        if population.is_empty() {
            return Err(EaError::invalid("cannot select from an empty population"));
        }
        if fitness.len() != population.len() {
            return Err(EaError::invalid(format!(
                "fitness vector has {} entries but population has {} members",
                fitness.len(),
                population.len()
            )));
        }
        let indices = self.select_indices(fitness, k, rng)?;
        Ok(indices.into_iter().map(|i| population[i].clone()).collect())
    }
}

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_evolve::ga::Selection;
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
///
/// // Strategies also parse from their configuration names
/// let sel: Selection = "roulette".parse().unwrap();
/// assert_eq!(sel, Selection::Roulette);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Canonical (fitness / mean fitness) proportionate selection.
    ///
    /// Each weight is the member's fitness divided by the mean fitness,
    /// normalised to a distribution. Fails with
    /// [`EaError::DegenerateDistribution`] when the mean is not positive.
    Canonical,

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Probability of selection is fitness / total fitness.
    ///
    /// **Warning**: Susceptible to super-individual dominance when
    /// fitness variance is high.
    Roulette,

    /// Rank-based selection.
    ///
    /// Members are sorted ascending by fitness (rank 1 = worst, ties keep
    /// index order) and drawn with probability `rank / Σ ranks`. Avoids the
    /// scaling problems of roulette wheel selection.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    Rank,

    /// Tournament selection: draw `size` distinct members, keep the fittest.
    ///
    /// Higher `size` = stronger selection pressure. The first drawn member
    /// wins ties. A size larger than the population is clamped to it.
    ///
    /// # Complexity
    /// O(size) per pick
    Tournament(usize),

    /// Steady-state (truncation) selection.
    ///
    /// Returns the `k` fittest members, ties broken by index order.
    /// Deterministic and maximally exploitative. When `k` exceeds the
    /// population, the whole population is returned in fitness order.
    SteadyState,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Canonical
    }
}

impl Selector for Selection {
    fn select_indices<R: Rng>(&self, fitness: &[f64], k: usize, rng: &mut R) -> Result<Vec<usize>> {
        if fitness.is_empty() {
            return Err(EaError::invalid("cannot select from an empty population"));
        }

        match self {
            Selection::Canonical => canonical(fitness, k, rng),
            Selection::Roulette => roulette(fitness, k, rng),
            Selection::Rank => Ok(rank(fitness, k, rng)),
            Selection::Tournament(size) => tournament(fitness, *size, k, rng),
            Selection::SteadyState => Ok(steady_state(fitness, k)),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Canonical => f.write_str("canonical"),
            Selection::Roulette => f.write_str("roulette"),
            Selection::Rank => f.write_str("rank"),
            Selection::Tournament(size) => write!(f, "tournament:{size}"),
            Selection::SteadyState => f.write_str("steady"),
        }
    }
}

impl FromStr for Selection {
    type Err = EaError;

    /// Accepts `canonical`, `roulette`, `rank`, `tournament[:size]` and
    /// `steady` / `steady_state`.
    fn from_str(s: &str) -> Result<Self> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };
        let sel = match (name.trim(), arg) {
            ("canonical", None) => Selection::Canonical,
            ("roulette", None) => Selection::Roulette,
            ("rank", None) => Selection::Rank,
            ("steady" | "steady_state", None) => Selection::SteadyState,
            ("tournament", None) => Selection::Tournament(DEFAULT_TOURNAMENT_SIZE),
            ("tournament", Some(size)) => {
                let size = size.trim().parse::<usize>().map_err(|_| {
                    EaError::invalid(format!("invalid tournament size {size:?}"))
                })?;
                Selection::Tournament(size)
            }
            _ => {
                return Err(EaError::invalid(format!(
                    "unknown selection strategy {s:?}"
                )))
            }
        };
        Ok(sel)
    }
}

/// Canonical selection: weight_i = f_i / mean(f).
fn canonical<R: Rng>(fitness: &[f64], k: usize, rng: &mut R) -> Result<Vec<usize>> {
    check_proportional(fitness)?;

    let mean = fitness.iter().sum::<f64>() / fitness.len() as f64;
    if !(mean > 0.0 && mean.is_finite()) {
        return Err(EaError::degenerate(format!(
            "canonical selection needs a positive finite mean fitness, got {mean}"
        )));
    }

    let relative: Vec<f64> = fitness.iter().map(|&f| f / mean).collect();
    let total: f64 = relative.iter().sum();
    let probs: Vec<f64> = relative.iter().map(|&w| w / total).collect();

    Ok((0..k).map(|_| sample_weighted(&probs, rng)).collect())
}

/// Roulette wheel selection: weight_i = f_i / Σ f.
fn roulette<R: Rng>(fitness: &[f64], k: usize, rng: &mut R) -> Result<Vec<usize>> {
    check_proportional(fitness)?;

    let total: f64 = fitness.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return Err(EaError::degenerate(format!(
            "roulette selection needs a positive finite total fitness, got {total}"
        )));
    }

    let probs: Vec<f64> = fitness.iter().map(|&f| f / total).collect();

    Ok((0..k).map(|_| sample_weighted(&probs, rng)).collect())
}

/// Rank-based selection with linear weights 1..=n over the ascending order.
fn rank<R: Rng>(fitness: &[f64], k: usize, rng: &mut R) -> Vec<usize> {
    let n = fitness.len();

    // Stable: equal fitness keeps original index order
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| fitness[a].total_cmp(&fitness[b]));

    let total = (n * (n + 1)) as f64 / 2.0;
    let probs: Vec<f64> = (1..=n).map(|r| r as f64 / total).collect();

    (0..k).map(|_| order[sample_weighted(&probs, rng)]).collect()
}

/// Tournament selection without replacement inside each tournament.
fn tournament<R: Rng>(fitness: &[f64], size: usize, k: usize, rng: &mut R) -> Result<Vec<usize>> {
    if size == 0 {
        return Err(EaError::invalid("tournament size must be at least 1"));
    }
    let n = fitness.len();
    let size = size.min(n);

    let mut picks = Vec::with_capacity(k);
    for _ in 0..k {
        let contenders = index::sample(rng, n, size);
        let mut best = contenders.index(0);
        for idx in contenders.iter().skip(1) {
            if fitness[idx] > fitness[best] {
                best = idx;
            }
        }
        picks.push(best);
    }
    Ok(picks)
}

/// Truncation: the `k` fittest, stable on ties.
fn steady_state(fitness: &[f64], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| fitness[b].total_cmp(&fitness[a]));
    order.truncate(k);
    order
}

/// Proportional weights only make sense for finite, non-negative scores.
fn check_proportional(fitness: &[f64]) -> Result<()> {
    if let Some((i, f)) = fitness
        .iter()
        .enumerate()
        .find(|(_, f)| !f.is_finite() || **f < 0.0)
    {
        return Err(EaError::invalid(format!(
            "proportional selection needs finite non-negative fitness, member {i} has {f}"
        )));
    }
    Ok(())
}

/// Draws one index from a probability vector by inverting its cumulative
/// distribution against a uniform [0, 1) draw.
///
/// Zero-probability entries are never returned.
fn sample_weighted<R: Rng>(probs: &[f64], rng: &mut R) -> usize {
    let u: f64 = rng.random();
    let mut cumulative = 0.0;
    for (i, &p) in probs.iter().enumerate() {
        cumulative += p;
        if cumulative > u {
            return i;
        }
    }

    // floating-point fallback: last entry with mass
    probs.iter().rposition(|&p| p > 0.0).unwrap_or(probs.len() - 1)
}
