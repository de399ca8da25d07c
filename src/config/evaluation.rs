use super::traits::ConfigSection;
use crate::error::ParetuneError;
use serde::{Deserialize, Serialize};

/// Knobs for how fitness evaluation is partitioned and parallelized.
///
/// `num_splits`, `split_repeats` and `daily_splits` are forwarded to the
/// objective functions through the evaluation context; the external scoring
/// engine decides what a split means for its data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub num_workers: usize,
    pub num_splits: usize,
    pub split_repeats: usize,
    pub daily_splits: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            num_workers: 1,
            num_splits: 1,
            split_repeats: 1,
            daily_splits: false,
        }
    }
}

impl ConfigSection for EvaluationConfig {
    fn section_name() -> &'static str {
        "evaluation"
    }

    fn validate(&self) -> Result<(), ParetuneError> {
        if self.num_workers == 0 {
            return Err(ParetuneError::Configuration(
                "Worker count must be at least 1".to_string(),
            ));
        }
        if self.num_splits == 0 {
            return Err(ParetuneError::Configuration(
                "Split count must be at least 1".to_string(),
            ));
        }
        if self.split_repeats == 0 {
            return Err(ParetuneError::Configuration(
                "Split repeats must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
