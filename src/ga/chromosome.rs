//! Chromosome data model.
//!
//! A [`Chromosome`] is a fixed-length sequence of [`Gene`]s drawn from one
//! [`Representation`], together with a fitness value and a parent marker.
//!
//! # Identity
//!
//! Every chromosome carries a [`ChromosomeId`] taken from a process-wide
//! counter when it is created. Two population slots holding the same id are
//! the *same individual* (aliasing), no matter whether their genes happen to
//! be equal. [`Clone`] therefore creates a new individual with a fresh id,
//! while [`Chromosome::share`] copies a chromosome while keeping its identity.
//!
//! # Representations
//!
//! | Representation | Gene domain | `initialize()` |
//! |---|---|---|
//! | [`Representation::Binary`] | `{0, 1}` | uniform coin flip per gene |
//! | [`Representation::Decimal`] | `[0, len)` | uniform with repeats, or a shuffled identity in unique mode |
//! | [`Representation::Real`] | `[min, max]` | uniform draw rounded to 2 decimals |
//! | [`Representation::Categorical`] | `'a'..='z'` | uniform letter |

use crate::error::{GaError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

const ALPHABET_LEN: u32 = 26;

/// Unique identity of a chromosome instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChromosomeId(u64);

impl ChromosomeId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value of the id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChromosomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One gene value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gene {
    /// Binary gene, `0` or `1`.
    Bit(u8),
    /// Bounded integer gene.
    Int(usize),
    /// Bounded real gene.
    Real(f64),
    /// Lowercase letter gene.
    Char(char),
}

impl Gene {
    /// Kind tag of this gene.
    pub fn kind(&self) -> GeneKind {
        match self {
            Gene::Bit(_) => GeneKind::Bit,
            Gene::Int(_) => GeneKind::Int,
            Gene::Real(_) => GeneKind::Real,
            Gene::Char(_) => GeneKind::Char,
        }
    }

    /// Numeric view of the gene (letters map to their code point).
    pub fn to_f64(self) -> f64 {
        match self {
            Gene::Bit(b) => f64::from(b),
            Gene::Int(v) => v as f64,
            Gene::Real(v) => v,
            Gene::Char(c) => f64::from(u32::from(c)),
        }
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gene::Bit(b) => write!(f, "{b}"),
            Gene::Int(v) => write!(f, "{v}"),
            Gene::Real(v) => write!(f, "{v}"),
            Gene::Char(c) => write!(f, "{c}"),
        }
    }
}

/// Kind tag of a [`Gene`], used in type-mismatch errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneKind {
    Bit,
    Int,
    Real,
    Char,
}

impl fmt::Display for GeneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeneKind::Bit => "bit",
            GeneKind::Int => "int",
            GeneKind::Real => "real",
            GeneKind::Char => "char",
        };
        f.write_str(name)
    }
}

/// Gene representation of a chromosome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Representation {
    /// Genes in `{0, 1}`.
    Binary,

    /// Integer genes in `[0, len)`.
    ///
    /// With `unique` set, `initialize()` produces a permutation of `0..len`.
    Decimal { unique: bool },

    /// Real genes in `[min, max]`, stored with two decimal places.
    Real { min: f64, max: f64 },

    /// Lowercase letters `'a'..='z'`.
    Categorical,
}

impl Representation {
    /// Kind of every gene of this representation.
    pub fn gene_kind(&self) -> GeneKind {
        match self {
            Representation::Binary => GeneKind::Bit,
            Representation::Decimal { .. } => GeneKind::Int,
            Representation::Real { .. } => GeneKind::Real,
            Representation::Categorical => GeneKind::Char,
        }
    }

    /// Lowest value of the domain, used for freshly created and cleaned genes.
    fn floor_gene(&self) -> Gene {
        match *self {
            Representation::Binary => Gene::Bit(0),
            Representation::Decimal { .. } => Gene::Int(0),
            Representation::Real { min, .. } => Gene::Real(min),
            Representation::Categorical => Gene::Char('a'),
        }
    }
}

/// A candidate solution.
#[derive(Debug)]
pub struct Chromosome {
    id: ChromosomeId,
    representation: Representation,
    genes: Vec<Gene>,
    fitness: Option<f64>,
    parent: bool,
}

impl Chromosome {
    /// Creates a chromosome of `length` genes.
    ///
    /// Genes start at the lowest value of the domain; call
    /// [`initialize`](Self::initialize) to randomize them.
    ///
    /// # Errors
    /// Returns [`GaError::InvalidConfig`] for a real range that is not finite
    /// or has `min > max`.
    pub fn new(representation: Representation, length: usize) -> Result<Self> {
        if let Representation::Real { min, max } = representation {
            if !min.is_finite() || !max.is_finite() || min > max {
                return Err(GaError::InvalidConfig(format!(
                    "real gene range [{min}, {max}] is invalid"
                )));
            }
        }
        Ok(Self {
            id: ChromosomeId::next(),
            representation,
            genes: vec![representation.floor_gene(); length],
            fitness: None,
            parent: false,
        })
    }

    /// Binary chromosome of `length` genes.
    pub fn binary(length: usize) -> Self {
        Self::unchecked(Representation::Binary, length)
    }

    /// Bounded-integer chromosome of `length` genes in `[0, length)`.
    ///
    /// In `unique` mode [`initialize`](Self::initialize) yields a permutation.
    pub fn decimal(length: usize, unique: bool) -> Self {
        Self::unchecked(Representation::Decimal { unique }, length)
    }

    /// Real chromosome of `length` genes in `[min, max]`.
    pub fn real(length: usize, min: f64, max: f64) -> Result<Self> {
        Self::new(Representation::Real { min, max }, length)
    }

    /// Categorical chromosome of `length` lowercase letters.
    pub fn categorical(length: usize) -> Self {
        Self::unchecked(Representation::Categorical, length)
    }

    /// Creates a chromosome holding the given genes.
    ///
    /// # Errors
    /// Fails if any gene is outside the representation's domain.
    pub fn with_genes(representation: Representation, genes: Vec<Gene>) -> Result<Self> {
        let mut chromosome = Self::new(representation, genes.len())?;
        chromosome.set_genes(genes)?;
        Ok(chromosome)
    }

    fn unchecked(representation: Representation, length: usize) -> Self {
        Self {
            id: ChromosomeId::next(),
            representation,
            genes: vec![representation.floor_gene(); length],
            fitness: None,
            parent: false,
        }
    }

    /// Identity of this chromosome instance.
    pub fn id(&self) -> ChromosomeId {
        self.id
    }

    pub fn representation(&self) -> Representation {
        self.representation
    }

    /// Fills every gene according to the representation rules.
    pub fn initialize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let n = self.genes.len();
        match self.representation {
            Representation::Binary => {
                for gene in &mut self.genes {
                    *gene = Gene::Bit(rng.random_range(0..2u8));
                }
            }
            Representation::Decimal { unique: true } => {
                for (i, gene) in self.genes.iter_mut().enumerate() {
                    *gene = Gene::Int(i);
                }
                // Fisher-Yates
                self.genes.shuffle(rng);
            }
            Representation::Decimal { unique: false } => {
                for gene in &mut self.genes {
                    *gene = Gene::Int(rng.random_range(0..n));
                }
            }
            Representation::Real { min, max } => {
                for gene in &mut self.genes {
                    *gene = Gene::Real(sample_real(min, max, rng));
                }
            }
            Representation::Categorical => {
                for gene in &mut self.genes {
                    *gene = Gene::Char(letter(rng.random_range(0..ALPHABET_LEN)));
                }
            }
        }
    }

    /// All genes in order.
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// Number of genes.
    pub fn gen_length(&self) -> usize {
        self.genes.len()
    }

    /// Gene at `index`.
    ///
    /// # Errors
    /// [`GaError::IndexOutOfBounds`] if `index >= gen_length()`.
    pub fn gene(&self, index: usize) -> Result<Gene> {
        self.genes
            .get(index)
            .copied()
            .ok_or(GaError::IndexOutOfBounds {
                index,
                len: self.genes.len(),
            })
    }

    /// Replaces the gene at `index`.
    ///
    /// # Errors
    /// [`GaError::IndexOutOfBounds`] for a bad index, [`GaError::InvalidGene`]
    /// if the value is of the wrong kind or outside the domain.
    pub fn set_gene(&mut self, index: usize, gene: Gene) -> Result<()> {
        self.check_index(index)?;
        self.check_gene(index, gene)?;
        self.genes[index] = gene;
        Ok(())
    }

    /// Replaces all genes at once. The length must not change.
    pub fn set_genes(&mut self, genes: Vec<Gene>) -> Result<()> {
        if genes.len() != self.genes.len() {
            return Err(GaError::InvalidGene {
                index: genes.len().min(self.genes.len()),
                reason: format!(
                    "expected {} genes, got {}",
                    self.genes.len(),
                    genes.len()
                ),
            });
        }
        for (i, &gene) in genes.iter().enumerate() {
            self.check_gene(i, gene)?;
        }
        self.genes = genes;
        Ok(())
    }

    /// Exchanges the genes at `i` and `j`.
    pub fn swap_genes(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_index(i)?;
        self.check_index(j)?;
        self.genes.swap(i, j);
        Ok(())
    }

    /// Perturbs the gene at `index`.
    ///
    /// The new value differs from the old one whenever the domain has at
    /// least two values: bits flip, integers and letters are resampled from
    /// the remaining values, reals are resampled from the other values of
    /// their two-decimal grid.
    pub fn mutate_gene<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) -> Result<()> {
        self.check_index(index)?;
        let n = self.genes.len();
        let mutated = match (self.representation, self.genes[index]) {
            (Representation::Binary, Gene::Bit(b)) => Gene::Bit(1 - b.min(1)),
            (Representation::Decimal { .. }, Gene::Int(current)) => {
                if n < 2 {
                    return Ok(());
                }
                Gene::Int(skip_value(current, n, rng))
            }
            (Representation::Real { min, max }, Gene::Real(current)) => {
                let grid = RealGrid::new(min, max);
                let count = grid.len();
                let index = match grid.position(current) {
                    Some(_) if count < 2 => return Ok(()),
                    Some(pos) => {
                        let v = rng.random_range(0..count - 1);
                        if v >= pos {
                            v + 1
                        } else {
                            v
                        }
                    }
                    None => rng.random_range(0..count),
                };
                Gene::Real(grid.value(index))
            }
            (Representation::Categorical, Gene::Char(current)) => {
                let offset = (current as u32).saturating_sub('a' as u32) as usize;
                let next = skip_value(offset, ALPHABET_LEN as usize, rng);
                Gene::Char(letter(next as u32))
            }
            (_, gene) => {
                return Err(GaError::InvalidGene {
                    index,
                    reason: format!("{} gene in {:?} chromosome", gene.kind(), self.representation),
                })
            }
        };
        self.genes[index] = mutated;
        Ok(())
    }

    /// Resets fitness and parent marker and wipes the genes back to the
    /// lowest domain value. The length is kept.
    pub fn cleanup(&mut self) {
        self.fitness = None;
        self.parent = false;
        let floor = self.representation.floor_gene();
        self.genes.iter_mut().for_each(|g| *g = floor);
    }

    /// Fitness value, `0.0` while unevaluated.
    pub fn fitness(&self) -> f64 {
        self.fitness.unwrap_or(0.0)
    }

    /// Whether a fitness value has been assigned since creation.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    pub fn is_parent(&self) -> bool {
        self.parent
    }

    pub fn set_parent(&mut self, parent: bool) {
        self.parent = parent;
    }

    /// Copy that keeps this chromosome's identity, fitness and parent marker.
    ///
    /// Placing a shared copy next to the original in one population is
    /// aliasing and is reported by
    /// [`Population::has_aliased_instances`](super::Population::has_aliased_instances).
    pub fn share(&self) -> Self {
        Self {
            id: self.id,
            representation: self.representation,
            genes: self.genes.clone(),
            fitness: self.fitness,
            parent: self.parent,
        }
    }

    /// Whether both chromosomes hold the same representation and genes.
    pub fn same_genes(&self, other: &Chromosome) -> bool {
        self.representation == other.representation && self.genes == other.genes
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.genes.len() {
            Ok(())
        } else {
            Err(GaError::IndexOutOfBounds {
                index,
                len: self.genes.len(),
            })
        }
    }

    fn check_gene(&self, index: usize, gene: Gene) -> Result<()> {
        let n = self.genes.len();
        let valid = match (self.representation, gene) {
            (Representation::Binary, Gene::Bit(b)) => b <= 1,
            (Representation::Decimal { .. }, Gene::Int(v)) => v < n,
            (Representation::Real { min, max }, Gene::Real(v)) => v >= min && v <= max,
            (Representation::Categorical, Gene::Char(c)) => c.is_ascii_lowercase(),
            _ => {
                return Err(GaError::InvalidGene {
                    index,
                    reason: format!(
                        "expected {} gene, got {}",
                        self.representation.gene_kind(),
                        gene.kind()
                    ),
                })
            }
        };
        if valid {
            Ok(())
        } else {
            Err(GaError::InvalidGene {
                index,
                reason: format!("{gene} is outside the {:?} domain", self.representation),
            })
        }
    }
}

/// A clone is a new, unevaluated individual: fresh id, same genes,
/// no fitness, not a parent.
impl Clone for Chromosome {
    fn clone(&self) -> Self {
        Self {
            id: ChromosomeId::next(),
            representation: self.representation,
            genes: self.genes.clone(),
            fitness: None,
            parent: false,
        }
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Genes: [")?;
        for (i, gene) in self.genes.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{gene}")?;
        }
        write!(f, "] ; FIT: {}", self.fitness())
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn sample_real<R: Rng + ?Sized>(min: f64, max: f64, rng: &mut R) -> f64 {
    let raw = min + (max - min) * rng.random::<f64>();
    round2(raw).clamp(min, max)
}

/// Values a real gene can hold: every hundredth inside `[min, max]`, plus
/// each bound that lies off that grid.
#[derive(Debug, Clone, Copy)]
struct RealGrid {
    min: f64,
    max: f64,
    lo: i128,
    hi: i128,
    min_off_grid: bool,
    max_off_grid: bool,
}

impl RealGrid {
    fn new(min: f64, max: f64) -> Self {
        let mut lo = (min * 100.0).ceil() as i128;
        if hundredths(lo) < min {
            lo += 1;
        } else if hundredths(lo - 1) >= min {
            lo -= 1;
        }
        let mut hi = (max * 100.0).floor() as i128;
        if hundredths(hi) > max {
            hi -= 1;
        } else if hundredths(hi + 1) <= max {
            hi += 1;
        }
        let empty = lo > hi;
        Self {
            min,
            max,
            lo,
            hi,
            min_off_grid: empty || hundredths(lo) != min,
            max_off_grid: max != min && (empty || hundredths(hi) != max),
        }
    }

    fn grid_len(&self) -> u128 {
        if self.lo > self.hi {
            0
        } else {
            self.hi.abs_diff(self.lo).saturating_add(1)
        }
    }

    fn len(&self) -> u128 {
        self.grid_len()
            .saturating_add(u128::from(self.min_off_grid))
            .saturating_add(u128::from(self.max_off_grid))
    }

    fn value(&self, mut index: u128) -> f64 {
        if self.min_off_grid {
            if index == 0 {
                return self.min;
            }
            index -= 1;
        }
        if index < self.grid_len() {
            hundredths(self.lo.saturating_add_unsigned(index))
        } else {
            self.max
        }
    }

    /// Index of `value`, `None` when it is not one of the grid's values.
    fn position(&self, value: f64) -> Option<u128> {
        let offset = u128::from(self.min_off_grid);
        if self.min_off_grid && value == self.min {
            return Some(0);
        }
        if self.max_off_grid && value == self.max {
            return Some(self.len() - 1);
        }
        let k = (value * 100.0).round() as i128;
        if (self.lo..=self.hi).contains(&k) && hundredths(k) == value {
            return Some(offset + k.abs_diff(self.lo));
        }
        None
    }
}

fn hundredths(k: i128) -> f64 {
    k as f64 / 100.0
}

fn letter(offset: u32) -> char {
    char::from_u32('a' as u32 + offset).unwrap_or('a')
}

/// Uniform value in `0..n` other than `current`. Requires `n >= 2`.
fn skip_value<R: Rng + ?Sized>(current: usize, n: usize, rng: &mut R) -> usize {
    let v = rng.random_range(0..n - 1);
    if v >= current {
        v + 1
    } else {
        v
    }
}
