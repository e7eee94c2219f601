//! Crossover operators for binary chromosomes.
//!
//! Every operator takes two parents of equal length and returns two
//! children of that same length. Each child gene at position `i` is copied
//! from one of the parents' genes at position `i`.
//!
//! # Operators
//!
//! - [`Crossover::SinglePoint`]: one cut, tails exchanged
//! - [`Crossover::TwoPoint`]: two cuts, middle segment exchanged
//! - [`Crossover::MultiPoint`]: `n` cuts, segments alternate between parents
//! - [`Crossover::Uniform`]: a fair coin per gene
//!
//! # References
//!
//! - De Jong (1975), "An Analysis of the Behavior of a Class of Genetic
//!   Adaptive Systems"
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

use super::types::Chromosome;
use crate::error::{EaError, Result};
use rand::seq::index;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Cut count used when `multi_point` is configured without an argument.
pub const DEFAULT_MULTI_POINT_CUTS: usize = 3;

/// Recombines two parents into two children.
pub trait Recombiner {
    /// Produces `(child1, child2)` from `parent1` and `parent2`.
    ///
    /// # Errors
    /// [`EaError::InvalidArgument`] if the parents differ in length or are
    /// too short for the operator.
    fn crossover<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome)>;
}

/// Crossover strategy.
///
/// ```
/// use u_evolve::ga::{Chromosome, Crossover, Recombiner};
/// use u_evolve::random::create_rng;
///
/// let p1: Chromosome = "000000".parse().unwrap();
/// let p2: Chromosome = "111111".parse().unwrap();
/// let mut rng = create_rng(7);
///
/// let (c1, c2) = Crossover::SinglePoint.crossover(&p1, &p2, &mut rng).unwrap();
/// assert_eq!(c1.count_ones() + c2.count_ones(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// One cut point drawn uniformly in `[1, len - 1]`.
    ///
    /// child1 = parent1 prefix + parent2 suffix; child2 is the complement.
    /// Needs `len >= 2`.
    SinglePoint,

    /// Two distinct ordered cut points in `[1, len - 1]`.
    ///
    /// The middle segment is swapped; outer segments stay. Needs `len >= 3`.
    TwoPoint,

    /// `n` distinct ordered cut points in `[1, len - 1]`.
    ///
    /// Segments alternate parent1, parent2, parent1, ... for child1.
    /// Needs `n >= 1` and `len >= n + 1`.
    MultiPoint(usize),

    /// Independent fair coin per gene.
    ///
    /// Heads: child1 takes parent1's gene and child2 parent2's. Tails: the
    /// assignment is swapped.
    Uniform,
}

impl Default for Crossover {
    fn default() -> Self {
        Crossover::TwoPoint
    }
}

impl Crossover {
    /// Number of cut points, or `None` for uniform crossover.
    pub fn cut_count(&self) -> Option<usize> {
        match self {
            Crossover::SinglePoint => Some(1),
            Crossover::TwoPoint => Some(2),
            Crossover::MultiPoint(n) => Some(*n),
            Crossover::Uniform => None,
        }
    }

    /// Shortest chromosome this operator accepts.
    pub fn min_length(&self) -> usize {
        match self.cut_count() {
            Some(cuts) => cuts + 1,
            None => 1,
        }
    }

    /// Checks operator parameters independent of any chromosome.
    pub fn validate(&self) -> Result<()> {
        if *self == Crossover::MultiPoint(0) {
            return Err(EaError::invalid("multi-point crossover needs at least 1 cut"));
        }
        Ok(())
    }
}

impl Recombiner for Crossover {
    fn crossover<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome)> {
        self.validate()?;

        let n = parent1.len();
        if n != parent2.len() {
            return Err(EaError::invalid(format!(
                "parents must have equal length, got {} and {}",
                n,
                parent2.len()
            )));
        }
        if n < self.min_length() {
            return Err(EaError::invalid(format!(
                "{self} crossover needs chromosomes of length >= {}, got {n}",
                self.min_length()
            )));
        }

        match self.cut_count() {
            Some(cuts) => {
                let points = cut_points(n, cuts, rng);
                Ok(splice(parent1.genes(), parent2.genes(), &points))
            }
            None => Ok(uniform(parent1.genes(), parent2.genes(), rng)),
        }
    }
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crossover::SinglePoint => f.write_str("single_point"),
            Crossover::TwoPoint => f.write_str("two_point"),
            Crossover::MultiPoint(n) => write!(f, "multi_point:{n}"),
            Crossover::Uniform => f.write_str("uniform"),
        }
    }
}

impl FromStr for Crossover {
    type Err = EaError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };
        let op = match (name.trim(), arg) {
            ("single_point", None) => Crossover::SinglePoint,
            ("two_point", None) => Crossover::TwoPoint,
            ("uniform", None) => Crossover::Uniform,
            ("multi_point", None) => Crossover::MultiPoint(DEFAULT_MULTI_POINT_CUTS),
            ("multi_point", Some(cuts)) => {
                let cuts = cuts.trim().parse::<usize>().map_err(|_| {
                    EaError::invalid(format!("invalid multi-point cut count {cuts:?}"))
                })?;
                Crossover::MultiPoint(cuts)
            }
            _ => {
                return Err(EaError::invalid(format!(
                    "unknown crossover strategy {s:?}"
                )))
            }
        };
        Ok(op)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Draws `cuts` distinct interior cut points in `[1, n - 1]`, ascending.
///
/// Caller guarantees `1 <= cuts <= n - 1`.
fn cut_points<R: Rng>(n: usize, cuts: usize, rng: &mut R) -> Vec<usize> {
    let mut points: Vec<usize> = index::sample(rng, n - 1, cuts)
        .into_iter()
        .map(|p| p + 1)
        .collect();
    points.sort_unstable();
    points
}

/// Builds both children by alternating source parents at every cut point.
fn splice(p1: &[bool], p2: &[bool], points: &[usize]) -> (Chromosome, Chromosome) {
    let n = p1.len();
    let mut c1 = Vec::with_capacity(n);
    let mut c2 = Vec::with_capacity(n);

    let mut crossed = false;
    let mut next_cut = points.iter().peekable();
    for i in 0..n {
        while next_cut.peek() == Some(&&i) {
            crossed = !crossed;
            next_cut.next();
        }
        if crossed {
            c1.push(p2[i]);
            c2.push(p1[i]);
        } else {
            c1.push(p1[i]);
            c2.push(p2[i]);
        }
    }

    (Chromosome::from_genes(c1), Chromosome::from_genes(c2))
}

fn uniform<R: Rng>(p1: &[bool], p2: &[bool], rng: &mut R) -> (Chromosome, Chromosome) {
    let (c1, c2): (Vec<bool>, Vec<bool>) = p1
        .iter()
        .zip(p2)
        .map(|(&a, &b)| if rng.random_bool(0.5) { (a, b) } else { (b, a) })
        .unzip();
    (Chromosome::from_genes(c1), Chromosome::from_genes(c2))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn parents(len: usize) -> (Chromosome, Chromosome) {
        (
            Chromosome::from_genes(vec![false; len]),
            Chromosome::from_genes(vec![true; len]),
        )
    }

    /// Number of places where the source parent changes along the child.
    fn switches(child: &Chromosome) -> usize {
        child.genes().windows(2).filter(|w| w[0] != w[1]).count()
    }

    #[test]
    fn test_single_point_shape() {
        let (p1, p2) = parents(6);
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let (c1, c2) = Crossover::SinglePoint.crossover(&p1, &p2, &mut rng).unwrap();
            assert_eq!(c1.len(), 6);
            assert_eq!(c2.len(), 6);
            // Prefix from p1 (zeros), suffix from p2 (ones)
            assert_eq!(switches(&c1), 1);
            assert!(!c1.genes()[0], "cut must be interior");
            assert!(c1.genes()[5], "cut must be interior");
            // Complementary splice
            for i in 0..6 {
                assert_ne!(c1.genes()[i], c2.genes()[i]);
            }
        }
    }

    #[test]
    fn test_single_point_covers_all_cuts() {
        let (p1, p2) = parents(5);
        let mut rng = create_rng(1);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let (c1, _) = Crossover::SinglePoint.crossover(&p1, &p2, &mut rng).unwrap();
            let cut = c1.genes().iter().position(|&g| g).unwrap();
            seen[cut] = true;
        }
        assert_eq!(seen, [false, true, true, true, true]);
    }

    #[test]
    fn test_two_point_swaps_middle_only() {
        let (p1, p2) = parents(8);
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let (c1, c2) = Crossover::TwoPoint.crossover(&p1, &p2, &mut rng).unwrap();
            assert_eq!(switches(&c1), 2);
            assert!(!c1.genes()[0] && !c1.genes()[7], "outer segments retained");
            assert!(c2.genes()[0] && c2.genes()[7]);
            assert_eq!(c1.count_ones() + c2.count_ones(), 8);
        }
    }

    #[test]
    fn test_two_point_minimum_length() {
        let (p1, p2) = parents(3);
        let mut rng = create_rng(42);
        // Only cuts {1, 2} exist
        let (c1, c2) = Crossover::TwoPoint.crossover(&p1, &p2, &mut rng).unwrap();
        assert_eq!(c1.to_string(), "010");
        assert_eq!(c2.to_string(), "101");
    }

    #[test]
    fn test_multi_point_alternates_segments() {
        let (p1, p2) = parents(10);
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let (c1, c2) = Crossover::MultiPoint(3)
                .crossover(&p1, &p2, &mut rng)
                .unwrap();
            assert_eq!(switches(&c1), 3);
            assert_eq!(switches(&c2), 3);
            assert!(!c1.genes()[0]);
            assert!(c1.genes()[9], "odd number of cuts ends on parent2");
        }
    }

    #[test]
    fn test_length_too_short() {
        let mut rng = create_rng(42);
        let cases = [
            (Crossover::SinglePoint, 1),
            (Crossover::TwoPoint, 2),
            (Crossover::MultiPoint(3), 3),
        ];
        for (op, len) in cases {
            let (p1, p2) = parents(len);
            assert!(
                matches!(op.crossover(&p1, &p2, &mut rng), Err(EaError::InvalidArgument(_))),
                "{op} should reject length {len}"
            );
        }
    }

    #[test]
    fn test_mismatched_lengths() {
        let mut rng = create_rng(42);
        let p1 = Chromosome::from_genes(vec![true; 5]);
        let p2 = Chromosome::from_genes(vec![false; 6]);
        for op in [
            Crossover::SinglePoint,
            Crossover::TwoPoint,
            Crossover::Uniform,
        ] {
            assert!(matches!(
                op.crossover(&p1, &p2, &mut rng),
                Err(EaError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_zero_cut_multi_point_rejected() {
        let (p1, p2) = parents(4);
        let mut rng = create_rng(42);
        assert!(Crossover::MultiPoint(0).validate().is_err());
        assert!(Crossover::MultiPoint(0).crossover(&p1, &p2, &mut rng).is_err());
    }

    #[test]
    fn test_uniform_gene_pairs() {
        let p1: Chromosome = "0101100110".parse().unwrap();
        let p2: Chromosome = "1100011010".parse().unwrap();
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let (c1, c2) = Crossover::Uniform.crossover(&p1, &p2, &mut rng).unwrap();
            for i in 0..p1.len() {
                let pair = (c1.genes()[i], c2.genes()[i]);
                let straight = (p1.genes()[i], p2.genes()[i]);
                let swapped = (p2.genes()[i], p1.genes()[i]);
                assert!(pair == straight || pair == swapped);
            }
        }
    }

    #[test]
    fn test_uniform_single_gene() {
        let (p1, p2) = parents(1);
        let mut rng = create_rng(42);
        let (c1, c2) = Crossover::Uniform.crossover(&p1, &p2, &mut rng).unwrap();
        assert_ne!(c1, c2);
    }

    #[test]
    fn test_identical_parents() {
        let p: Chromosome = "101101".parse().unwrap();
        let mut rng = create_rng(42);
        for op in [
            Crossover::SinglePoint,
            Crossover::TwoPoint,
            Crossover::MultiPoint(4),
            Crossover::Uniform,
        ] {
            let (c1, c2) = op.crossover(&p, &p, &mut rng).unwrap();
            assert_eq!(c1, p);
            assert_eq!(c2, p);
        }
    }

    #[test]
    fn test_cut_points_bounds() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let pts = cut_points(10, 3, &mut rng);
            assert_eq!(pts.len(), 3);
            assert!(pts.windows(2).all(|w| w[0] < w[1]));
            assert!(pts.iter().all(|&p| (1..10).contains(&p)));
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("single_point".parse::<Crossover>().unwrap(), Crossover::SinglePoint);
        assert_eq!("two_point".parse::<Crossover>().unwrap(), Crossover::TwoPoint);
        assert_eq!("uniform".parse::<Crossover>().unwrap(), Crossover::Uniform);
        assert_eq!(
            "multi_point".parse::<Crossover>().unwrap(),
            Crossover::MultiPoint(DEFAULT_MULTI_POINT_CUTS)
        );
        assert_eq!(
            "multi_point:5".parse::<Crossover>().unwrap(),
            Crossover::MultiPoint(5)
        );
        assert!("three_point".parse::<Crossover>().is_err());
    }
}
