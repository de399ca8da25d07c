use super::objective::{EvaluationContext, ObjectiveFunction};
use super::splits::EvaluationPlan;
use super::stats::IndividualStats;
use crate::error::{ParetuneError, Result};
use std::sync::Arc;

/// Outcome of scoring one population: stats in population order plus how many
/// individuals had to be penalized.
pub struct EvaluationReport {
    pub stats: Vec<IndividualStats>,
    pub penalized: usize,
}

/// Turns a population into one `IndividualStats` per individual by invoking
/// the selected objective functions in registration order.
///
/// Raw scores are averaged over the evaluation plan's splits, transformed via
/// `get_metric`, then direction-adjusted onto the internal higher-is-better
/// scale. A failed evaluation is logged and penalized, never retried.
pub struct FitnessCalculator<I> {
    objectives: Vec<Arc<dyn ObjectiveFunction<I>>>,
    plan: EvaluationPlan,
}

impl<I> std::fmt::Debug for FitnessCalculator<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FitnessCalculator")
            .field("objectives", &self.objectives)
            .field("plan", &self.plan)
            .finish()
    }
}

impl<I: Send + Sync> FitnessCalculator<I> {
    pub fn new(
        objectives: Vec<Arc<dyn ObjectiveFunction<I>>>,
        plan: EvaluationPlan,
    ) -> Result<Self> {
        if objectives.is_empty() {
            return Err(ParetuneError::Configuration(
                "At least one objective is required".to_string(),
            ));
        }
        for objective in &objectives {
            if objective.weight() < 0.0 {
                return Err(ParetuneError::Configuration(format!(
                    "Objective '{}' has negative weight {}; use its direction instead",
                    objective.name(),
                    objective.weight()
                )));
            }
        }
        Ok(Self { objectives, plan })
    }

    pub fn number_of_objectives(&self) -> usize {
        self.objectives.len()
    }

    pub fn objective_weights(&self) -> Vec<f64> {
        self.objectives.iter().map(|o| o.weight()).collect()
    }

    pub fn objective_names(&self) -> Vec<&str> {
        self.objectives.iter().map(|o| o.name()).collect()
    }

    pub fn plan(&self) -> &EvaluationPlan {
        &self.plan
    }

    /// Score a whole population sequentially.
    pub fn evaluate(&self, iteration: usize, population: &[I]) -> EvaluationReport {
        let stats: Vec<IndividualStats> = population
            .iter()
            .enumerate()
            .map(|(index, individual)| self.evaluate_individual(iteration, index, individual))
            .collect();
        let penalized = stats.iter().filter(|s| s.is_penalized()).count();
        EvaluationReport { stats, penalized }
    }

    /// Score one individual; a failure is logged and mapped to the penalty
    /// fitness vector so the candidate dies out naturally.
    pub fn evaluate_individual(
        &self,
        iteration: usize,
        index: usize,
        individual: &I,
    ) -> IndividualStats {
        match self.fitness_vector(iteration, individual) {
            Ok(values) => IndividualStats::new(index, values),
            Err(e) => {
                log::warn!(
                    "Evaluation failed for individual {} in iteration {}: {}",
                    index,
                    iteration,
                    e
                );
                IndividualStats::penalized(index, self.objectives.len())
            }
        }
    }

    fn fitness_vector(&self, iteration: usize, individual: &I) -> Result<Vec<f64>> {
        let specs = self.plan.specs();
        let mut values = Vec::with_capacity(self.objectives.len());

        for objective in &self.objectives {
            let mut raw_sum = 0.0;
            let mut scored = 0usize;

            for spec in &specs {
                let ctx = EvaluationContext {
                    iteration,
                    split: *spec,
                    plan: &self.plan,
                };
                match objective.score(individual, &ctx) {
                    Ok(raw) => {
                        raw_sum += raw;
                        scored += 1;
                    }
                    Err(e) => {
                        log::warn!(
                            "Objective '{}' failed on split {} repeat {}: {}",
                            objective.name(),
                            spec.split,
                            spec.repeat,
                            e
                        );
                    }
                }
            }

            if scored == 0 {
                return Err(ParetuneError::Evaluation(format!(
                    "Objective '{}' failed on every split",
                    objective.name()
                )));
            }

            let metric = objective.get_metric(raw_sum / scored as f64);
            values.push(objective.direction().adjust(metric));
        }

        Ok(values)
    }

    /// Fill in `weighted_sum` for every member: dot product of the adjusted
    /// fitness vector and the objective weights.
    pub fn apply_weighted_sums(&self, stats: &mut [IndividualStats]) {
        let weights = self.objective_weights();
        for s in stats.iter_mut() {
            s.weighted_sum = s
                .fitness_values
                .iter()
                .zip(weights.iter())
                .map(|(value, weight)| value * weight)
                .sum();
        }
    }

    /// Map an internal fitness vector back to user-facing metric values
    /// (undoes the direction adjustment on minimized axes).
    pub fn user_facing_metrics(&self, stats: &IndividualStats) -> Vec<f64> {
        self.objectives
            .iter()
            .zip(stats.fitness_values.iter())
            .map(|(objective, value)| objective.direction().adjust(*value))
            .collect()
    }
}
