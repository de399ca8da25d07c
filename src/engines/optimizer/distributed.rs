use super::fitness::{EvaluationReport, FitnessCalculator};
use super::stats::IndividualStats;
use crate::error::{ParetuneError, Result};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Fans fitness evaluation out across a bounded worker pool.
///
/// The pool is built once per run and joined once per generation, so the
/// Evaluating phase stays a synchronization barrier: ranking never sees a
/// partially scored population. Worker failures surface through the
/// calculator's penalty path and never halt the batch.
pub struct DistributedEvaluator {
    pool: rayon::ThreadPool,
}

impl DistributedEvaluator {
    pub fn new(num_workers: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_workers)
            .build()
            .map_err(|e| {
                ParetuneError::Configuration(format!("Failed to build worker pool: {}", e))
            })?;
        Ok(Self { pool })
    }

    pub fn num_workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Score the population in parallel. Once `cancel` is raised, work not
    /// yet picked up is skipped (penalized); in-flight scoring calls run to
    /// completion. The caller discards the generation on cancellation.
    pub fn evaluate<I: Send + Sync>(
        &self,
        calculator: &FitnessCalculator<I>,
        iteration: usize,
        population: &[I],
        cancel: &AtomicBool,
    ) -> EvaluationReport {
        let stats: Vec<IndividualStats> = self.pool.install(|| {
            population
                .par_iter()
                .enumerate()
                .map(|(index, individual)| {
                    if cancel.load(Ordering::Relaxed) {
                        return IndividualStats::penalized(
                            index,
                            calculator.number_of_objectives(),
                        );
                    }
                    calculator.evaluate_individual(iteration, index, individual)
                })
                .collect()
        });

        let penalized = stats.iter().filter(|s| s.is_penalized()).count();
        EvaluationReport { stats, penalized }
    }
}
