//! Mutation operators for binary chromosomes.
//!
//! Mutation is applied once to every offspring and always returns a new
//! chromosome of the same length.

use super::types::Chromosome;
use crate::error::{EaError, Result};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Perturbs a single chromosome.
pub trait Mutator {
    /// Returns a mutated copy of `chromosome`.
    ///
    /// `rate` is the per-gene mutation probability for operators that use it.
    fn mutate<R: Rng>(&self, chromosome: &Chromosome, rate: f64, rng: &mut R) -> Result<Chromosome>;
}

/// Mutation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mutation {
    /// Flip every gene independently with probability `rate`.
    ///
    /// Rate 0 is the identity, rate 1 the bitwise complement.
    BitFlip,

    /// Exchange two positions drawn uniformly with replacement.
    ///
    /// Drawing the same position twice is a no-op. Ignores `rate` and never
    /// changes the number of ones.
    ///
    /// # Complexity
    /// O(1) draws, O(n) copy
    Swap,
}

impl Default for Mutation {
    fn default() -> Self {
        Mutation::BitFlip
    }
}

impl Mutator for Mutation {
    fn mutate<R: Rng>(&self, chromosome: &Chromosome, rate: f64, rng: &mut R) -> Result<Chromosome> {
        match self {
            Mutation::BitFlip => bit_flip(chromosome, rate, rng),
            Mutation::Swap => Ok(swap(chromosome, rng)),
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::BitFlip => f.write_str("bit_flip"),
            Mutation::Swap => f.write_str("swap"),
        }
    }
}

impl FromStr for Mutation {
    type Err = EaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "bit_flip" => Ok(Mutation::BitFlip),
            "swap" => Ok(Mutation::Swap),
            _ => Err(EaError::invalid(format!("unknown mutation strategy {s:?}"))),
        }
    }
}

/// Checks that `rate` is a probability.
pub(crate) fn check_rate(rate: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(EaError::invalid(format!(
            "mutation rate must lie in [0, 1], got {rate}"
        )));
    }
    Ok(())
}

fn bit_flip<R: Rng>(chromosome: &Chromosome, rate: f64, rng: &mut R) -> Result<Chromosome> {
    check_rate(rate)?;
    let genes = chromosome
        .genes()
        .iter()
        .map(|&g| if rng.random_bool(rate) { !g } else { g })
        .collect();
    Ok(Chromosome::from_genes(genes))
}

fn swap<R: Rng>(chromosome: &Chromosome, rng: &mut R) -> Chromosome {
    let mut genes = chromosome.genes().to_vec();
    let n = genes.len();
    if n < 2 {
        return Chromosome::from_genes(genes);
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    genes.swap(i, j);
    Chromosome::from_genes(genes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_bit_flip_rate_zero_is_identity() {
        let c: Chromosome = "1011001110".parse().unwrap();
        let mut rng = create_rng(42);
        for _ in 0..50 {
            assert_eq!(Mutation::BitFlip.mutate(&c, 0.0, &mut rng).unwrap(), c);
        }
    }

    #[test]
    fn test_bit_flip_rate_one_is_complement() {
        let c: Chromosome = "1011001110".parse().unwrap();
        let mut rng = create_rng(42);
        let m = Mutation::BitFlip.mutate(&c, 1.0, &mut rng).unwrap();
        assert_eq!(m.to_string(), "0100110001");
    }

    #[test]
    fn test_bit_flip_rate_out_of_range() {
        let c: Chromosome = "1010".parse().unwrap();
        let mut rng = create_rng(42);
        for rate in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                Mutation::BitFlip.mutate(&c, rate, &mut rng),
                Err(EaError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_bit_flip_rate_is_respected() {
        let c = Chromosome::from_genes(vec![false; 10_000]);
        let mut rng = create_rng(5);
        let m = Mutation::BitFlip.mutate(&c, 0.1, &mut rng).unwrap();
        let flipped = m.count_ones();
        assert!((800..1_200).contains(&flipped), "flipped {flipped}");
    }

    #[test]
    fn test_swap_preserves_ones() {
        let c: Chromosome = "1100101000".parse().unwrap();
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let m = Mutation::Swap.mutate(&c, 0.5, &mut rng).unwrap();
            assert_eq!(m.len(), c.len());
            assert_eq!(m.count_ones(), c.count_ones());
        }
    }

    #[test]
    fn test_swap_changes_at_most_two_positions() {
        let c: Chromosome = "1100101000".parse().unwrap();
        let mut rng = create_rng(7);
        let mut changed_once = false;
        for _ in 0..200 {
            let m = Mutation::Swap.mutate(&c, 0.0, &mut rng).unwrap();
            let diff = c
                .genes()
                .iter()
                .zip(m.genes())
                .filter(|(a, b)| a != b)
                .count();
            assert!(diff == 0 || diff == 2);
            changed_once |= diff == 2;
        }
        assert!(changed_once, "swap should eventually exchange differing genes");
    }

    #[test]
    fn test_swap_ignores_rate() {
        let c: Chromosome = "10".parse().unwrap();
        let mut rng = create_rng(42);
        // An out-of-range rate is not an error for swap
        assert!(Mutation::Swap.mutate(&c, 7.0, &mut rng).is_ok());
    }

    #[test]
    fn test_swap_single_gene() {
        let c: Chromosome = "1".parse().unwrap();
        let mut rng = create_rng(42);
        assert_eq!(Mutation::Swap.mutate(&c, 0.0, &mut rng).unwrap(), c);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("bit_flip".parse::<Mutation>().unwrap(), Mutation::BitFlip);
        assert_eq!("swap".parse::<Mutation>().unwrap(), Mutation::Swap);
        assert!("invert".parse::<Mutation>().is_err());
    }
}
