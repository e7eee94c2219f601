//! Chromosome and population model.
//!
//! A [`Chromosome`] is a fixed-length binary string. It is a value type:
//! genes are read through accessors and every genetic operator builds a new
//! chromosome instead of editing one in place.

use crate::error::{EaError, Result};
use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A fixed-length sequence of binary genes.
///
/// `true` encodes the allele `1`, `false` encodes `0`.
///
/// ```
/// use u_evolve::ga::Chromosome;
///
/// let c: Chromosome = "101100".parse().unwrap();
/// assert_eq!(c.len(), 6);
/// assert_eq!(c.count_ones(), 3);
/// assert_eq!(c.to_string(), "101100");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    genes: Vec<bool>,
}

/// The current generation's chromosomes, in stable index order.
pub type Population = Vec<Chromosome>;

impl Chromosome {
    /// Wraps an existing gene vector.
    pub fn from_genes(genes: Vec<bool>) -> Self {
        Self { genes }
    }

    /// Creates a chromosome whose genes are drawn uniformly from {0, 1}.
    pub fn random<R: Rng>(length: usize, rng: &mut R) -> Self {
        let genes = (0..length).map(|_| rng.random_bool(0.5)).collect();
        Self { genes }
    }

    /// Read-only view of the genes.
    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    /// Gene at position `i`, or `None` when out of range.
    pub fn gene(&self, i: usize) -> Option<bool> {
        self.genes.get(i).copied()
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Number of genes equal to `1`.
    pub fn count_ones(&self) -> usize {
        self.genes.iter().filter(|&&g| g).count()
    }

    /// Consumes the chromosome and returns its genes.
    pub fn into_genes(self) -> Vec<bool> {
        self.genes
    }
}

impl From<Vec<bool>> for Chromosome {
    fn from(genes: Vec<bool>) -> Self {
        Self::from_genes(genes)
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &g in &self.genes {
            f.write_str(if g { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Chromosome {
    type Err = EaError;

    fn from_str(s: &str) -> Result<Self> {
        let genes = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(EaError::invalid(format!(
                    "chromosome strings may only contain '0' and '1', found {other:?}"
                ))),
            })
            .collect::<Result<Vec<bool>>>()?;
        Ok(Self { genes })
    }
}

/// Creates `size` random chromosomes of `length` genes each.
///
/// # Errors
/// [`EaError::InvalidArgument`] if `size` or `length` is zero.
pub fn create_population<R: Rng>(size: usize, length: usize, rng: &mut R) -> Result<Population> {
    if size == 0 {
        return Err(EaError::invalid("population size must be at least 1"));
    }
    if length == 0 {
        return Err(EaError::invalid("chromosome length must be at least 1"));
    }
    Ok((0..size).map(|_| Chromosome::random(length, rng)).collect())
}

/// Number of distinct chromosomes in the population.
pub fn distinct_count(population: &[Chromosome]) -> usize {
    population.iter().collect::<HashSet<&Chromosome>>().len()
}

/// Fraction of distinct chromosomes in the population.
///
/// Returns 0.0 for an empty population.
pub fn diversity(population: &[Chromosome]) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    distinct_count(population) as f64 / population.len() as f64
}
