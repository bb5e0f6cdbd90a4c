use serde::{Deserialize, Serialize};

use crate::error::{GenomeError, Result};

/// Probabilities threaded through `mutate` and `spawn_with`.
///
/// A mutation probability above 1.0 requests guaranteed flips: the integer
/// part is the number of guaranteed single-bit mutations, the fraction gates
/// one extra attempt. The addition probability always caps at one new gene
/// per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MutationParams {
    pub mutation_probability: f64,
    pub addition_probability: f64,
}

impl Default for MutationParams {
    fn default() -> Self {
        MutationParams {
            mutation_probability: 0.01,
            addition_probability: 0.001,
        }
    }
}

impl MutationParams {
    pub fn new(mutation_probability: f64, addition_probability: f64) -> Self {
        MutationParams {
            mutation_probability,
            addition_probability,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.mutation_probability < 0.0 || !self.mutation_probability.is_finite() {
            return Err(GenomeError::Configuration(format!(
                "mutation probability must be finite and non-negative, got {}",
                self.mutation_probability
            )));
        }
        if self.addition_probability < 0.0 || self.addition_probability > 1.0 {
            return Err(GenomeError::Configuration(format!(
                "addition probability must be within [0, 1], got {}",
                self.addition_probability
            )));
        }
        Ok(())
    }
}
