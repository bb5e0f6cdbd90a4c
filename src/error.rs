use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum GenomeError {
    /// Diversity over a pair of zero-length chromosomes divides by zero.
    #[error("cannot measure diversity of two empty chromosomes")]
    EmptyChromosomes,

    /// Diversity over genomes with no chromosome index in common.
    #[error("genomes share no chromosomes to compare")]
    NoChromosomeOverlap,

    #[error("configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, GenomeError>;
