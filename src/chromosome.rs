use std::fmt;

use log::trace;
use rand::prelude::*;
use rand_distr::{Distribution, Uniform};

use crate::error::{GenomeError, Result};
use crate::params::MutationParams;

const BITS_PER_GENE: usize = 32;

/// Ordered sequence of 32-bit genes, each bit independently mutable.
///
/// Length only ever grows, one gene at a time, through the addition step of
/// `mutate`.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    genes: Vec<u32>,
}

impl Chromosome {
    /// Creates a chromosome of `length` genes drawn uniformly over the full
    /// u32 range. Zero length is valid.
    pub fn new<R: Rng>(length: usize, rng: &mut R) -> Self {
        Chromosome {
            genes: (0..length).map(|_| rng.gen::<u32>()).collect(),
        }
    }

    /// Wraps an existing gene sequence. Useful for drivers seeding known
    /// material and for deterministic tests.
    pub fn from_genes(genes: Vec<u32>) -> Self {
        Chromosome { genes }
    }

    pub fn genes(&self) -> &[u32] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Breeds a child by per-gene binomial crossover.
    ///
    /// The longer parent dominates; on equal lengths the right-hand operand
    /// does. The child starts as a copy of the dominant parent, then every
    /// index both parents share is independently replaced by the other
    /// parent's gene with probability 0.5. Indices only the dominant parent
    /// has always pass through, so the child's length is the max of the two.
    pub fn spawn_with<R: Rng>(&self, other: &Chromosome, rng: &mut R) -> Chromosome {
        let (dominant, recessive) = if other.len() >= self.len() {
            (other, self)
        } else {
            (self, other)
        };
        let mut child = dominant.clone();
        for i in 0..recessive.len() {
            if rng.gen_bool(0.5) {
                child.genes[i] = recessive.genes[i];
            }
        }
        child
    }

    /// Normalized Hamming distance between the two gene sequences, in [0, 1].
    ///
    /// Positions past the shorter sequence compare against the bitwise
    /// complement of the longer's gene there, so extra genetic material
    /// counts as fully divergent. Two empty chromosomes have no bits to
    /// compare and are rejected.
    pub fn diversity_with(&self, other: &Chromosome) -> Result<f64> {
        let (longer, shorter) = if self.len() >= other.len() {
            (&self.genes, &other.genes)
        } else {
            (&other.genes, &self.genes)
        };
        if longer.is_empty() {
            return Err(GenomeError::EmptyChromosomes);
        }
        let mut differing = 0u64;
        for (i, &gene) in longer.iter().enumerate() {
            let paired = if i < shorter.len() { shorter[i] } else { !gene };
            differing += u64::from((gene ^ paired).count_ones());
        }
        Ok(differing as f64 / (longer.len() * BITS_PER_GENE) as f64)
    }

    /// Mutates the chromosome in place and returns it for chaining.
    ///
    /// The mutation probability's integer part is a count of guaranteed
    /// single-bit flips; the fraction gates one extra flip. An integer
    /// probability therefore means exactly that many flips. Flips may land on
    /// the same bit and cancel. Independently, with the addition probability,
    /// one fresh random gene is appended -- never more than one per call.
    pub fn mutate<R: Rng>(&mut self, params: &MutationParams, rng: &mut R) -> &mut Self {
        let p = params.mutation_probability;
        if p > 0.0 && !self.genes.is_empty() {
            // ceil(p) - 1 guaranteed flips leaves a residual in (0, 1]; a
            // whole-number p makes the residual exactly 1 so the final
            // attempt always fires.
            let guaranteed = (p.ceil() as usize).saturating_sub(1);
            let residual = p - guaranteed as f64;
            for _ in 0..guaranteed {
                self.flip_random_bit(rng);
            }
            if rng.gen::<f64>() < residual {
                self.flip_random_bit(rng);
            }
        }
        if rng.gen::<f64>() < params.addition_probability {
            let gene = rng.gen::<u32>();
            trace!(
                "gene addition: {:#010x}, new length {}",
                gene,
                self.genes.len() + 1
            );
            self.genes.push(gene);
        }
        self
    }

    fn flip_random_bit<R: Rng>(&mut self, rng: &mut R) {
        let idx = Uniform::new(0, self.genes.len()).sample(rng);
        let bit = Uniform::new(0u32, BITS_PER_GENE as u32).sample(rng);
        self.genes[idx] ^= 1u32 << bit;
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut sep = "";
        for gene in &self.genes {
            write!(f, "{}{:08x}", sep, gene)?;
            sep = " ";
        }
        Ok(())
    }
}

#[cfg(test)]
mod test_chromosome {
    use super::*;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn bits_differing(a: &Chromosome, b: &Chromosome) -> u32 {
        a.genes()
            .iter()
            .zip(b.genes())
            .map(|(x, y)| (x ^ y).count_ones())
            .sum()
    }

    #[test]
    fn construction_lengths() {
        let mut r = rng(1);
        for len in &[0usize, 1, 7, 100] {
            assert_eq!(Chromosome::new(*len, &mut r).len(), *len);
        }
        assert!(Chromosome::new(0, &mut r).is_empty());
    }

    #[test]
    fn clone_is_independent() {
        let mut r = rng(2);
        let original = Chromosome::new(8, &mut r);
        let mut copy = original.clone();
        copy.mutate(&MutationParams::new(5.0, 1.0), &mut r);
        assert_eq!(original.len(), 8);
        assert_ne!(original, copy);
    }

    #[test]
    fn spawn_length_is_max() {
        let mut r = rng(3);
        let a = Chromosome::new(3, &mut r);
        let b = Chromosome::new(9, &mut r);
        assert_eq!(a.spawn_with(&b, &mut r).len(), 9);
        assert_eq!(b.spawn_with(&a, &mut r).len(), 9);
        let empty = Chromosome::new(0, &mut r);
        assert_eq!(empty.spawn_with(&a, &mut r).len(), 3);
    }

    #[test]
    fn spawn_dominant_tail_passes_through() {
        let mut r = rng(4);
        let long = Chromosome::from_genes(vec![1, 2, 3, 4, 5]);
        let short = Chromosome::from_genes(vec![90, 91]);
        for _ in 0..20 {
            let child = short.spawn_with(&long, &mut r);
            // Positions the short parent lacks always come from the long one.
            assert_eq!(&child.genes()[2..], &[3, 4, 5]);
            for (i, &g) in child.genes()[..2].iter().enumerate() {
                assert!(g == long.genes()[i] || g == short.genes()[i]);
            }
        }
    }

    #[test]
    fn self_diversity_is_zero() {
        let mut r = rng(5);
        let a = Chromosome::new(6, &mut r);
        assert_eq!(a.diversity_with(&a).unwrap(), 0.0);
    }

    #[test]
    fn diversity_is_symmetric_for_equal_lengths() {
        let mut r = rng(6);
        let a = Chromosome::new(10, &mut r);
        let b = Chromosome::new(10, &mut r);
        assert_eq!(
            a.diversity_with(&b).unwrap(),
            b.diversity_with(&a).unwrap()
        );
    }

    #[test]
    fn diversity_stays_in_unit_interval() {
        let mut r = rng(7);
        for _ in 0..50 {
            let a = Chromosome::new(1 + (r.gen::<usize>() % 8), &mut r);
            let b = Chromosome::new(1 + (r.gen::<usize>() % 8), &mut r);
            let d = a.diversity_with(&b).unwrap();
            assert!(d >= 0.0 && d <= 1.0, "diversity {} out of range", d);
        }
    }

    #[test]
    fn diversity_extends_shorter_with_complement() {
        let a = Chromosome::from_genes(vec![0xdeadbeef]);
        let b = Chromosome::from_genes(vec![0xdeadbeef, 0x12345678]);
        // First gene matches, the padded tail differs in every bit.
        assert_eq!(a.diversity_with(&b).unwrap(), 0.5);
        assert_eq!(b.diversity_with(&a).unwrap(), 0.5);
    }

    #[test]
    fn diversity_against_empty_is_total() {
        let a = Chromosome::from_genes(vec![]);
        let b = Chromosome::from_genes(vec![7, 8, 9]);
        assert_eq!(a.diversity_with(&b).unwrap(), 1.0);
    }

    #[test]
    fn diversity_of_two_empties_errors() {
        let a = Chromosome::from_genes(vec![]);
        let b = Chromosome::from_genes(vec![]);
        assert_eq!(a.diversity_with(&b), Err(GenomeError::EmptyChromosomes));
    }

    #[test]
    fn mutate_zero_zero_is_noop() {
        let mut r = rng(8);
        let original = Chromosome::new(12, &mut r);
        let mut mutated = original.clone();
        mutated.mutate(&MutationParams::new(0.0, 0.0), &mut r);
        assert_eq!(original, mutated);
    }

    #[test]
    fn mutate_always_add_grows_by_one() {
        let mut r = rng(9);
        let original = Chromosome::new(5, &mut r);
        let mut mutated = original.clone();
        mutated.mutate(&MutationParams::new(0.0, 1.0), &mut r);
        assert_eq!(mutated.len(), 6);
        assert_eq!(&mutated.genes()[..5], original.genes());
    }

    #[test]
    fn integer_probability_flips_exactly_that_many_bits() {
        let mut r = rng(10);
        let original = Chromosome::new(16, &mut r);

        let mut single = original.clone();
        single.mutate(&MutationParams::new(1.0, 0.0), &mut r);
        assert_eq!(bits_differing(&original, &single), 1);
        assert_eq!(single.len(), 16);

        let mut triple = original.clone();
        triple.mutate(&MutationParams::new(3.0, 0.0), &mut r);
        // Three flips, but flips can land on the same bit and cancel in
        // pairs, so the observable difference is odd and at most three.
        let diff = bits_differing(&original, &triple);
        assert!(diff == 1 || diff == 3, "expected 1 or 3 flipped bits, got {}", diff);
        assert_eq!(triple.len(), 16);
    }

    #[test]
    fn mutate_on_empty_chromosome_only_adds() {
        let mut r = rng(11);
        let mut empty = Chromosome::new(0, &mut r);
        empty.mutate(&MutationParams::new(10.0, 0.0), &mut r);
        assert!(empty.is_empty());
        empty.mutate(&MutationParams::new(10.0, 1.0), &mut r);
        assert_eq!(empty.len(), 1);
    }

    #[test]
    fn display_is_deterministic() {
        let c = Chromosome::from_genes(vec![0, 0xffffffff, 0x0000beef]);
        assert_eq!(c.to_string(), "00000000 ffffffff 0000beef");
        assert_eq!(Chromosome::from_genes(vec![]).to_string(), "");
    }
}
