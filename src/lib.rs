//! Bit-level genetic representation for evolutionary search.
//!
//! A [`Genome`] is an ordered collection of [`Chromosome`]s; a chromosome is
//! an ordered sequence of 32-bit genes. The crate supplies the genetic
//! operators an external evolutionary driver needs: random construction,
//! breeding (`spawn_with`), in-place mutation with occasional gene addition,
//! and a normalized Hamming diversity measure. Selection, fitness and the
//! population loop belong to the caller.
//!
//! All randomized operations take a caller-supplied [`rand::Rng`], so a
//! driver can seed reproducible runs and tests can pin exact sequences.

pub mod chromosome;
pub mod error;
pub mod genome;
pub mod params;

pub use chromosome::Chromosome;
pub use error::{GenomeError, Result};
pub use genome::Genome;
pub use params::MutationParams;
