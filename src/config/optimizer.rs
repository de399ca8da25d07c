use super::traits::ConfigSection;
use crate::error::ParetuneError;
use serde::{Deserialize, Serialize};

/// Hyperparameters for a single optimizer run.
///
/// Treated as immutable once the run starts. `objectives` lists the names of
/// registered objective functions, in the order their metric values appear in
/// every fitness vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    pub number_of_iterations: usize,
    pub population_size: usize,
    /// Fraction of the population retained as breeding parents each generation.
    pub propagation_fraction: f64,
    pub elite_size: usize,
    pub chance_of_mutation: f64,
    pub chance_of_crossover: f64,
    pub random_seed: Option<u64>,
    /// Seed one population slot with the domain's baseline individual.
    pub seed_with_original: bool,
    pub objectives: Vec<String>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            number_of_iterations: 30,
            population_size: 200,
            propagation_fraction: 0.4,
            elite_size: 5,
            chance_of_mutation: 0.25,
            chance_of_crossover: 0.85,
            random_seed: None,
            seed_with_original: false,
            objectives: Vec::new(),
        }
    }
}

impl OptimizerConfig {
    /// Number of individuals retained as breeding parents.
    pub fn propagation_count(&self) -> usize {
        (self.population_size as f64 * self.propagation_fraction) as usize
    }
}

impl ConfigSection for OptimizerConfig {
    fn section_name() -> &'static str {
        "optimizer"
    }

    fn validate(&self) -> Result<(), ParetuneError> {
        if self.population_size < 10 {
            return Err(ParetuneError::Configuration(
                "Population size must be at least 10".to_string(),
            ));
        }
        if self.number_of_iterations == 0 {
            return Err(ParetuneError::Configuration(
                "Number of iterations must be at least 1".to_string(),
            ));
        }
        if self.chance_of_mutation < 0.0 || self.chance_of_mutation > 1.0 {
            return Err(ParetuneError::Configuration(
                "Mutation chance must be between 0 and 1".to_string(),
            ));
        }
        if self.chance_of_crossover < 0.0 || self.chance_of_crossover > 1.0 {
            return Err(ParetuneError::Configuration(
                "Crossover chance must be between 0 and 1".to_string(),
            ));
        }
        if self.propagation_fraction <= 0.0 || self.propagation_fraction > 1.0 {
            return Err(ParetuneError::Configuration(
                "Propagation fraction must be in (0, 1]".to_string(),
            ));
        }
        if self.elite_size >= self.population_size {
            return Err(ParetuneError::Configuration(
                "Elite size must be smaller than the population size".to_string(),
            ));
        }
        if self.propagation_count() < 2 {
            return Err(ParetuneError::Configuration(
                "Propagation fraction leaves fewer than 2 breeding parents".to_string(),
            ));
        }
        Ok(())
    }
}
