//! Crossover operators.
//!
//! Every operator combines two parents into **one** offspring. The offspring
//! starts as a clone of `parent1` (fresh identity, unevaluated) and has its
//! genes overwritten, so it always carries parent1's representation.
//!
//! | Operator | Gene source |
//! |---|---|
//! | [`SinglePointCrossover`] | `[0, c)` from parent1, rest from parent2 |
//! | [`TwoPointCrossover`] | `[lo, hi)` from parent2, rest from parent1 |
//! | [`OrderCrossover`] (OX) | segment from parent1, remainder in parent2's order |
//! | [`CyclicCrossover`] (CX) | alternating position cycles |
//! | [`ProbabilityCrossover`] | per-gene coin with bias `p` toward parent1 |
//! | [`NoiseReductionCrossover`] | per-gene mean |
//! | [`EccentricCrossover`] | per-gene value farther from the mean |
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Oliver, Smith & Holland (1987), "A Study of Permutation Crossover
//!   Operators on the Traveling Salesman Problem"

use super::chromosome::{Chromosome, Gene};
use crate::error::{GaError, Result};
use rand::{Rng, RngCore};

/// Produces one offspring from two parents.
pub trait Crossover {
    /// # Errors
    /// [`GaError::IncompatibleParents`] when the parents differ in length or
    /// representation; operator-specific structural errors otherwise.
    fn crossover(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut dyn RngCore,
    ) -> Result<Chromosome>;
}

/// Single cut point `c` drawn from `0..len`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinglePointCrossover;

impl Crossover for SinglePointCrossover {
    fn crossover(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut dyn RngCore,
    ) -> Result<Chromosome> {
        check_compatible(parent1, parent2)?;
        let n = parent1.gen_length();
        if n == 0 {
            return Ok(parent1.clone());
        }

        let cut = rng.random_range(0..n);
        let genes = (0..n)
            .map(|i| {
                if i < cut {
                    parent1.genes()[i]
                } else {
                    parent2.genes()[i]
                }
            })
            .collect();
        offspring(parent1, genes)
    }
}

/// Two distinct cut points; the segment between them comes from parent2.
///
/// Chromosomes shorter than two genes have no segment and yield a copy of
/// parent1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TwoPointCrossover;

impl Crossover for TwoPointCrossover {
    fn crossover(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut dyn RngCore,
    ) -> Result<Chromosome> {
        check_compatible(parent1, parent2)?;
        let n = parent1.gen_length();
        if n < 2 {
            return Ok(parent1.clone());
        }

        let (lo, hi) = distinct_points(n, rng);
        let genes = (0..n)
            .map(|i| {
                if (lo..hi).contains(&i) {
                    parent2.genes()[i]
                } else {
                    parent1.genes()[i]
                }
            })
            .collect();
        offspring(parent1, genes)
    }
}

/// Order Crossover (OX).
///
/// Preserves the **relative order** of parent2's genes.
///
/// # Algorithm (Davis, 1985)
///
/// 1. Select a random segment `[lo, hi]` (inclusive) from parent1
/// 2. Copy the segment to the child at the same positions
/// 3. Fill the remaining positions left to right with parent2's genes in
///    their original order, skipping genes already present in the child
///
/// For permutation parents the child is a permutation again. Parents with
/// repeated values can leave the donor without fresh genes, which is an
/// [`GaError::IncompatibleParents`] error.
///
/// # Complexity
/// O(n^2) time (membership by value), O(n) space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderCrossover;

impl Crossover for OrderCrossover {
    fn crossover(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut dyn RngCore,
    ) -> Result<Chromosome> {
        check_compatible(parent1, parent2)?;
        let n = parent1.gen_length();
        if n == 0 {
            return Ok(parent1.clone());
        }

        let (lo, hi) = random_segment(n, rng);
        let mut child: Vec<Option<Gene>> = vec![None; n];

        // Step 1: Copy segment from parent1
        for i in lo..=hi {
            child[i] = Some(parent1.genes()[i]);
        }

        // Step 2: Fill the gaps from parent2, in order
        let donor = parent2.genes();
        let mut next = 0;
        for i in 0..n {
            if child[i].is_some() {
                continue;
            }
            while next < n && child.contains(&Some(donor[next])) {
                next += 1;
            }
            let Some(&gene) = donor.get(next) else {
                return Err(GaError::IncompatibleParents(format!(
                    "order crossover ran out of donor genes at position {i}"
                )));
            };
            child[i] = Some(gene);
            next += 1;
        }

        offspring(parent1, child.into_iter().flatten().collect())
    }
}

/// Cycle Crossover (CX).
///
/// Splits positions into cycles: starting from an unvisited position, follow
/// `position of parent2's gene in parent1` until the cycle closes. Even
/// cycles take parent1's genes, odd cycles parent2's. Every gene keeps the
/// absolute position it had in one of the parents.
///
/// Parents must hold the same set of values; a parent2 gene missing from
/// parent1 is a [`GaError::GeneNotFound`] error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CyclicCrossover;

impl Crossover for CyclicCrossover {
    fn crossover(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        _rng: &mut dyn RngCore,
    ) -> Result<Chromosome> {
        check_compatible(parent1, parent2)?;
        let (g1, g2) = (parent1.genes(), parent2.genes());
        let n = g1.len();

        let mut genes = g1.to_vec();
        let mut visited = vec![false; n];
        let mut cycle = 0usize;

        for start in 0..n {
            if visited[start] {
                continue;
            }
            let from_first = cycle % 2 == 0;
            let mut index = start;
            loop {
                genes[index] = if from_first { g1[index] } else { g2[index] };
                visited[index] = true;
                index = g1
                    .iter()
                    .position(|g| *g == g2[index])
                    .ok_or(GaError::GeneNotFound { index })?;
                if index == start || visited[index] {
                    break;
                }
            }
            cycle += 1;
        }

        offspring(parent1, genes)
    }
}

/// Uniform crossover with a bias: each gene comes from parent1 with
/// probability `p`, otherwise from parent2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityCrossover {
    probability: f64,
}

impl ProbabilityCrossover {
    pub fn new(probability: f64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
        }
    }
}

impl Crossover for ProbabilityCrossover {
    fn crossover(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut dyn RngCore,
    ) -> Result<Chromosome> {
        check_compatible(parent1, parent2)?;
        let genes = parent1
            .genes()
            .iter()
            .zip(parent2.genes())
            .map(|(&a, &b)| {
                if rng.random::<f64>() < self.probability {
                    a
                } else {
                    b
                }
            })
            .collect();
        offspring(parent1, genes)
    }
}

/// Arithmetic crossover: every gene is the mean of the parents' genes.
///
/// Integer, bit and letter means truncate toward zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoiseReductionCrossover;

impl Crossover for NoiseReductionCrossover {
    fn crossover(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        _rng: &mut dyn RngCore,
    ) -> Result<Chromosome> {
        check_lengths(parent1, parent2)?;
        let genes = parent1
            .genes()
            .iter()
            .zip(parent2.genes())
            .map(|(&a, &b)| mean_gene(a, b))
            .collect::<Result<Vec<_>>>()?;
        offspring(parent1, genes)
    }
}

/// Keeps, per gene, the parent value lying farther from the parents' mean.
///
/// The mean is floored for integer and letter genes and exact for reals, so
/// for those kinds the larger value wins ties. Bits follow integer rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EccentricCrossover;

impl Crossover for EccentricCrossover {
    fn crossover(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        _rng: &mut dyn RngCore,
    ) -> Result<Chromosome> {
        check_lengths(parent1, parent2)?;
        let genes = parent1
            .genes()
            .iter()
            .zip(parent2.genes())
            .map(|(&a, &b)| eccentric_gene(a, b))
            .collect::<Result<Vec<_>>>()?;
        offspring(parent1, genes)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn check_lengths(parent1: &Chromosome, parent2: &Chromosome) -> Result<()> {
    if parent1.gen_length() != parent2.gen_length() {
        return Err(GaError::IncompatibleParents(format!(
            "lengths {} and {}",
            parent1.gen_length(),
            parent2.gen_length()
        )));
    }
    Ok(())
}

fn check_compatible(parent1: &Chromosome, parent2: &Chromosome) -> Result<()> {
    check_lengths(parent1, parent2)?;
    let (left, right) = (
        parent1.representation().gene_kind(),
        parent2.representation().gene_kind(),
    );
    if left != right {
        return Err(GaError::IncompatibleParents(format!(
            "{left} genes and {right} genes"
        )));
    }
    Ok(())
}

/// Fresh clone of `template` carrying `genes`.
fn offspring(template: &Chromosome, genes: Vec<Gene>) -> Result<Chromosome> {
    let mut child = template.clone();
    child.set_genes(genes)?;
    Ok(child)
}

/// Random segment `[lo, hi]` within `0..n` where `lo <= hi`.
fn random_segment(n: usize, rng: &mut dyn RngCore) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Two distinct points within `0..n`, ordered. Requires `n >= 2`.
fn distinct_points(n: usize, rng: &mut dyn RngCore) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    (a.min(b), a.max(b))
}

fn mean_gene(a: Gene, b: Gene) -> Result<Gene> {
    match (a, b) {
        (Gene::Bit(x), Gene::Bit(y)) => Ok(Gene::Bit((x + y) / 2)),
        (Gene::Int(x), Gene::Int(y)) => Ok(Gene::Int((x + y) / 2)),
        (Gene::Real(x), Gene::Real(y)) => Ok(Gene::Real((x + y) / 2.0)),
        (Gene::Char(x), Gene::Char(y)) => {
            let mid = (u32::from(x) + u32::from(y)) / 2;
            Ok(Gene::Char(char::from_u32(mid).unwrap_or(x)))
        }
        _ => Err(GaError::TypeMismatch {
            left: a.kind(),
            right: b.kind(),
        }),
    }
}

fn eccentric_gene(a: Gene, b: Gene) -> Result<Gene> {
    match (a, b) {
        (Gene::Bit(x), Gene::Bit(y)) => {
            Ok(Gene::Bit(farther_int(u64::from(x), u64::from(y)) as u8))
        }
        (Gene::Int(x), Gene::Int(y)) => Ok(Gene::Int(farther_int(x as u64, y as u64) as usize)),
        (Gene::Char(x), Gene::Char(y)) => {
            let kept = farther_int(u64::from(u32::from(x)), u64::from(u32::from(y)));
            Ok(if kept == u64::from(u32::from(x)) {
                Gene::Char(x)
            } else {
                Gene::Char(y)
            })
        }
        (Gene::Real(x), Gene::Real(y)) => {
            let mean = (x + y) / 2.0;
            let (dx, dy) = ((x - mean).abs(), (y - mean).abs());
            Ok(Gene::Real(if dx > dy {
                x
            } else if dx == dy {
                x.max(y)
            } else {
                y
            }))
        }
        _ => Err(GaError::TypeMismatch {
            left: a.kind(),
            right: b.kind(),
        }),
    }
}

/// Value farther from the floored mean, the larger one on ties.
fn farther_int(x: u64, y: u64) -> u64 {
    let mean = (x + y) / 2;
    let (dx, dy) = (x.abs_diff(mean), y.abs_diff(mean));
    if dx > dy {
        x
    } else if dx == dy {
        x.max(y)
    } else {
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::chromosome::Representation;
    use crate::random::create_rng;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn ints(values: &[usize]) -> Chromosome {
        let genes = values.iter().map(|&v| Gene::Int(v)).collect();
        Chromosome::with_genes(Representation::Decimal { unique: true }, genes).unwrap()
    }

    fn bits(values: &[u8]) -> Chromosome {
        let genes = values.iter().map(|&v| Gene::Bit(v)).collect();
        Chromosome::with_genes(Representation::Binary, genes).unwrap()
    }

    fn letters(text: &str) -> Chromosome {
        let genes = text.chars().map(Gene::Char).collect();
        Chromosome::with_genes(Representation::Categorical, genes).unwrap()
    }

    fn reals(values: &[f64]) -> Chromosome {
        let genes = values.iter().map(|&v| Gene::Real(v)).collect();
        Chromosome::with_genes(Representation::Real { min: 0.0, max: 10.0 }, genes).unwrap()
    }

    fn int_values(c: &Chromosome) -> Vec<usize> {
        c.genes()
            .iter()
            .map(|g| match g {
                Gene::Int(v) => *v,
                other => panic!("expected int gene, got {other:?}"),
            })
            .collect()
    }

    /// Check that a slice is a valid permutation of 0..n.
    fn is_valid_permutation(perm: &[usize], n: usize) -> bool {
        let set: HashSet<usize> = perm.iter().copied().collect();
        perm.len() == n && set.len() == n && perm.iter().all(|&v| v < n)
    }

    // ---- Single-point ----

    #[test]
    fn test_single_point_prefix_then_suffix() {
        let mut rng = create_rng(42);
        let p1 = bits(&[0; 8]);
        let p2 = bits(&[1; 8]);
        for _ in 0..100 {
            let child = SinglePointCrossover.crossover(&p1, &p2, &mut rng).unwrap();
            let values: Vec<Gene> = child.genes().to_vec();
            // once a gene comes from parent2, all later ones do too
            assert!(values.windows(2).all(|w| !(w[0] == Gene::Bit(1) && w[1] == Gene::Bit(0))));
            assert_eq!(values[7], Gene::Bit(1));
        }
    }

    #[test]
    fn test_offspring_is_fresh_individual() {
        let mut rng = create_rng(42);
        let mut p1 = bits(&[0, 1, 0, 1]);
        p1.set_fitness(3.0);
        p1.set_parent(true);
        let p2 = bits(&[1, 0, 1, 0]);
        let child = SinglePointCrossover.crossover(&p1, &p2, &mut rng).unwrap();
        assert_ne!(child.id(), p1.id());
        assert_ne!(child.id(), p2.id());
        assert!(!child.is_evaluated());
        assert!(!child.is_parent());
    }

    // ---- Two-point ----

    #[test]
    fn test_two_point_inner_block_from_second_parent() {
        let mut rng = create_rng(7);
        let p1 = bits(&[0; 10]);
        let p2 = bits(&[1; 10]);
        for _ in 0..100 {
            let child = TwoPointCrossover.crossover(&p1, &p2, &mut rng).unwrap();
            let ones: Vec<usize> = child
                .genes()
                .iter()
                .enumerate()
                .filter(|(_, g)| **g == Gene::Bit(1))
                .map(|(i, _)| i)
                .collect();
            assert!(!ones.is_empty());
            assert!(ones.windows(2).all(|w| w[1] == w[0] + 1), "block not contiguous: {ones:?}");
            assert_eq!(child.genes()[9], Gene::Bit(0));
        }
    }

    #[test]
    fn test_two_point_short_chromosome() {
        let mut rng = create_rng(7);
        let child = TwoPointCrossover
            .crossover(&bits(&[1]), &bits(&[0]), &mut rng)
            .unwrap();
        assert_eq!(child.genes(), &[Gene::Bit(1)]);
    }

    // ---- OX ----

    #[test]
    fn test_ox_preserves_segment_and_permutation() {
        let mut rng = create_rng(123);
        let p1 = ints(&[0, 1, 2, 3, 4, 5, 6, 7]);
        let p2 = ints(&[7, 6, 5, 4, 3, 2, 1, 0]);

        for _ in 0..100 {
            let mut replay = rng.clone();
            let (lo, hi) = random_segment(8, &mut replay);

            let child = OrderCrossover.crossover(&p1, &p2, &mut rng).unwrap();
            let values = int_values(&child);
            assert!(is_valid_permutation(&values, 8), "OX child not valid: {values:?}");
            assert_eq!(&child.genes()[lo..=hi], &p1.genes()[lo..=hi]);
        }
    }

    #[test]
    fn test_ox_fills_in_donor_order() {
        let mut rng = create_rng(5);
        let p1 = ints(&[0, 1, 2, 3, 4]);
        let p2 = ints(&[4, 3, 2, 1, 0]);
        for _ in 0..50 {
            let mut replay = rng.clone();
            let (lo, hi) = random_segment(5, &mut replay);
            let child = int_values(&OrderCrossover.crossover(&p1, &p2, &mut rng).unwrap());

            let filled: Vec<usize> = (0..5)
                .filter(|i| !(lo..=hi).contains(i))
                .map(|i| child[i])
                .collect();
            // parent2 is descending, so the filled genes must be too
            assert!(filled.windows(2).all(|w| w[0] > w[1]), "{child:?}");
        }
    }

    #[test]
    fn test_ox_exhausted_donor() {
        let mut rng = create_rng(11);
        let p = letters("aaa");
        let mut errors = 0;
        for _ in 0..50 {
            match OrderCrossover.crossover(&p, &p, &mut rng) {
                Ok(child) => assert!(child.same_genes(&p)),
                Err(GaError::IncompatibleParents(_)) => errors += 1,
                Err(other) => panic!("unexpected error {other}"),
            }
        }
        assert!(errors > 0);
    }

    // ---- CX ----

    #[test]
    fn test_cx_alternates_cycles() {
        let mut rng = create_rng(1);
        let p1 = ints(&[0, 1, 2, 3, 4]);
        let p2 = ints(&[1, 2, 0, 4, 3]);
        let child = CyclicCrossover.crossover(&p1, &p2, &mut rng).unwrap();
        // cycle {0,1,2} from parent1, cycle {3,4} from parent2
        assert_eq!(int_values(&child), vec![0, 1, 2, 4, 3]);
    }

    #[test]
    fn test_cx_produces_valid_permutations() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let mut p1 = Chromosome::decimal(9, true);
            let mut p2 = Chromosome::decimal(9, true);
            p1.initialize(&mut rng);
            p2.initialize(&mut rng);
            let child = CyclicCrossover.crossover(&p1, &p2, &mut rng).unwrap();
            let values = int_values(&child);
            assert!(is_valid_permutation(&values, 9), "CX child not valid: {values:?}");
            for (i, g) in child.genes().iter().enumerate() {
                assert!(*g == p1.genes()[i] || *g == p2.genes()[i]);
            }
        }
    }

    #[test]
    fn test_cx_gene_not_found() {
        let mut rng = create_rng(1);
        let err = CyclicCrossover
            .crossover(&letters("abcde"), &letters("abcdz"), &mut rng)
            .unwrap_err();
        assert!(matches!(err, GaError::GeneNotFound { index: 4 }));
    }

    // ---- Probability ----

    #[test]
    fn test_probability_extremes() {
        let mut rng = create_rng(3);
        let p1 = bits(&[0, 0, 0, 0]);
        let p2 = bits(&[1, 1, 1, 1]);
        let always_first = ProbabilityCrossover::new(1.0)
            .crossover(&p1, &p2, &mut rng)
            .unwrap();
        assert!(always_first.same_genes(&p1));
        let always_second = ProbabilityCrossover::new(0.0)
            .crossover(&p1, &p2, &mut rng)
            .unwrap();
        assert!(always_second.same_genes(&p2));
    }

    // ---- Noise reduction ----

    #[test]
    fn test_noise_reduction_means() {
        let mut rng = create_rng(3);
        let ints_child = NoiseReductionCrossover
            .crossover(&ints(&[2, 4, 0, 1, 3]), &ints(&[4, 3, 1, 0, 2]), &mut rng)
            .unwrap();
        assert_eq!(int_values(&ints_child), vec![3, 3, 0, 0, 2]);

        let real_child = NoiseReductionCrossover
            .crossover(&reals(&[1.0, 2.5]), &reals(&[2.0, 3.5]), &mut rng)
            .unwrap();
        assert_eq!(real_child.genes(), &[Gene::Real(1.5), Gene::Real(3.0)]);

        let char_child = NoiseReductionCrossover
            .crossover(&letters("ax"), &letters("cz"), &mut rng)
            .unwrap();
        assert_eq!(char_child.genes(), &[Gene::Char('b'), Gene::Char('y')]);
    }

    #[test]
    fn test_noise_reduction_type_mismatch() {
        let mut rng = create_rng(3);
        let err = NoiseReductionCrossover
            .crossover(&bits(&[0, 1]), &ints(&[0, 1]), &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            GaError::TypeMismatch {
                left: crate::ga::GeneKind::Bit,
                right: crate::ga::GeneKind::Int
            }
        ));
    }

    // ---- Eccentric ----

    #[test]
    fn test_eccentric_keeps_outlier() {
        let mut rng = create_rng(3);
        // 1 & 2: floored mean 1, so 2 is farther
        // 0 & 4: tie at mean 2, larger wins
        let child = EccentricCrossover
            .crossover(&ints(&[1, 0, 3, 2, 4]), &ints(&[2, 4, 3, 1, 0]), &mut rng)
            .unwrap();
        assert_eq!(int_values(&child), vec![2, 4, 3, 2, 4]);

        let real_child = EccentricCrossover
            .crossover(&reals(&[1.0, 5.0]), &reals(&[3.0, 5.0]), &mut rng)
            .unwrap();
        assert_eq!(real_child.genes(), &[Gene::Real(3.0), Gene::Real(5.0)]);

        let char_child = EccentricCrossover
            .crossover(&letters("ab"), &letters("ba"), &mut rng)
            .unwrap();
        assert_eq!(char_child.genes(), &[Gene::Char('b'), Gene::Char('b')]);
    }

    #[test]
    fn test_eccentric_type_mismatch() {
        let mut rng = create_rng(3);
        let err = EccentricCrossover
            .crossover(&letters("ab"), &reals(&[1.0, 2.0]), &mut rng)
            .unwrap_err();
        assert!(matches!(err, GaError::TypeMismatch { .. }));
    }

    // ---- Compatibility ----

    #[test]
    fn test_incompatible_parents() {
        let mut rng = create_rng(3);
        let operators: Vec<Box<dyn Crossover>> = vec![
            Box::new(SinglePointCrossover),
            Box::new(TwoPointCrossover),
            Box::new(OrderCrossover),
            Box::new(CyclicCrossover),
            Box::new(ProbabilityCrossover::new(0.5)),
            Box::new(NoiseReductionCrossover),
            Box::new(EccentricCrossover),
        ];
        for op in &operators {
            let err = op
                .crossover(&bits(&[0, 1, 1]), &bits(&[0, 1]), &mut rng)
                .unwrap_err();
            assert!(matches!(err, GaError::IncompatibleParents(_)));
        }

        let err = SinglePointCrossover
            .crossover(&bits(&[0, 1]), &letters("ab"), &mut rng)
            .unwrap_err();
        assert!(matches!(err, GaError::IncompatibleParents(_)));
    }

    #[test]
    fn test_distinct_points_bounds() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (lo, hi) = distinct_points(6, &mut rng);
            assert!(lo < hi);
            assert!(hi < 6);
        }
    }

    proptest! {
        #[test]
        fn prop_permutation_crossovers_keep_permutations(seed in any::<u64>(), len in 1usize..40) {
            let mut rng = create_rng(seed);
            let mut p1 = Chromosome::decimal(len, true);
            let mut p2 = Chromosome::decimal(len, true);
            p1.initialize(&mut rng);
            p2.initialize(&mut rng);

            let ox = OrderCrossover.crossover(&p1, &p2, &mut rng).unwrap();
            prop_assert!(is_valid_permutation(&int_values(&ox), len));
            let cx = CyclicCrossover.crossover(&p1, &p2, &mut rng).unwrap();
            prop_assert!(is_valid_permutation(&int_values(&cx), len));
        }
    }
}
