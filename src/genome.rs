use std::fmt;

use log::debug;
use rand::prelude::*;

use crate::chromosome::Chromosome;
use crate::error::{GenomeError, Result};
use crate::params::MutationParams;

/// One individual's full genetic material: an ordered collection of
/// chromosomes plus the cached length of each.
///
/// `shape[i]` always equals `chromosomes[i].len()` after any operation that
/// hands back a genome; mutation can grow a chromosome, so breeding records
/// the lengths it actually produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Genome {
    chromosomes: Vec<Chromosome>,
    shape: Vec<usize>,
}

impl Genome {
    /// Builds one independently seeded chromosome per requested length.
    pub fn new<R: Rng>(lengths: &[usize], rng: &mut R) -> Self {
        let chromosomes: Vec<_> = lengths
            .iter()
            .map(|&len| Chromosome::new(len, rng))
            .collect();
        Genome {
            shape: lengths.to_vec(),
            chromosomes,
        }
    }

    /// Assembles a genome around existing chromosomes, recording their
    /// lengths as the shape.
    pub fn from_chromosomes(chromosomes: Vec<Chromosome>) -> Self {
        let shape = chromosomes.iter().map(|c| c.len()).collect();
        Genome { chromosomes, shape }
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total gene count across all chromosomes.
    pub fn num_genes(&self) -> usize {
        self.chromosomes.iter().map(|c| c.len()).sum()
    }

    /// Mean per-chromosome diversity over the indices both genomes have.
    ///
    /// Chromosomes present in only one genome are ignored; if no index is
    /// shared there is nothing to average and the call is rejected rather
    /// than returning NaN.
    pub fn diversity_with(&self, other: &Genome) -> Result<f64> {
        let overlap = self.chromosomes.len().min(other.chromosomes.len());
        if overlap == 0 {
            return Err(GenomeError::NoChromosomeOverlap);
        }
        let mut total = 0.0;
        for i in 0..overlap {
            total += self.chromosomes[i].diversity_with(&other.chromosomes[i])?;
        }
        Ok(total / overlap as f64)
    }

    /// Breeds a child genome from the receiver and `other`.
    ///
    /// Each chromosome index the receiver shares with `other` is crossed
    /// (`Chromosome::spawn_with`) and the fresh child chromosome mutated in
    /// place. Indices the receiver holds beyond `other`'s count are skipped
    /// outright, so the child carries min(C1, C2) chromosomes; callers
    /// relying on "child matches the receiver" must breed equal-count
    /// genomes.
    pub fn spawn_with<R: Rng>(
        &self,
        other: &Genome,
        params: &MutationParams,
        rng: &mut R,
    ) -> Genome {
        let overlap = self.chromosomes.len().min(other.chromosomes.len());
        let mut chromosomes = Vec::with_capacity(overlap);
        for i in 0..overlap {
            let mut child = self.chromosomes[i].spawn_with(&other.chromosomes[i], rng);
            child.mutate(params, rng);
            chromosomes.push(child);
        }
        let child = Genome::from_chromosomes(chromosomes);
        debug!("bred child genome with shape {:?}", child.shape);
        child
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for chromosome in &self.chromosomes {
            writeln!(f, "{}", chromosome)?;
        }
        Ok(())
    }
}
