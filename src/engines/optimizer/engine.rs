use super::crowding::assign_crowding_distance;
use super::distributed::DistributedEvaluator;
use super::fitness::{EvaluationReport, FitnessCalculator};
use super::objective::ObjectiveRegistry;
use super::pareto::{crowded_order, fast_non_dominated_sort};
use super::problem::ProblemDomain;
use super::splits::EvaluationPlan;
use super::stats::IndividualStats;
use crate::config::AppConfig;
use crate::error::{ParetuneError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Where the generation loop currently is. Reported through the progress
/// callback; Evaluating is the only phase that runs work in parallel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Evaluating,
    Ranking,
    Selecting,
    Varying,
    Finalizing,
}

/// How the final best individual is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestCriterion {
    /// Highest weighted sum across the whole population.
    WeightedSum,
    /// Highest weighted sum among front 0 members only.
    ParetoFront,
}

pub trait ProgressCallback: Send {
    fn on_phase(&mut self, _iteration: usize, _phase: Phase) {}
    fn on_generation_start(&mut self, _iteration: usize) {}
    fn on_generation_complete(&mut self, _iteration: usize, _best_weighted_sum: f64, _front_size: usize) {}
    fn on_individual_evaluated(&mut self, _individual_num: usize, _total: usize) {}
}

/// Best individual seen so far, tracked across generations.
#[derive(Debug, Clone)]
pub struct BestIndividual<I> {
    pub individual: I,
    pub weighted_sum: f64,
    /// User-facing metric values, one per objective in registration order.
    pub metrics: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct OptimizerOutcome<I> {
    pub best: BestIndividual<I>,
    pub iterations_completed: usize,
    pub cancelled: bool,
}

/// NSGA-II style generation loop over an abstract problem domain.
///
/// Per generation: evaluate the population (optionally across a worker
/// pool), build Pareto fronts, annotate crowding distances, carry elites
/// over, breed offspring from the retained parent pool. The loop itself is
/// strictly sequential; evaluation is the only parallel phase and acts as a
/// barrier.
pub struct GeneticAlgorithm<P: ProblemDomain> {
    config: AppConfig,
    problem: P,
    fitness: FitnessCalculator<P::Individual>,
    evaluator: Option<DistributedEvaluator>,
    rng: StdRng,
    cancel: Arc<AtomicBool>,
    best_criterion: BestCriterion,
}

impl<P: ProblemDomain> std::fmt::Debug for GeneticAlgorithm<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneticAlgorithm")
            .field("config", &self.config)
            .field("best_criterion", &self.best_criterion)
            .finish_non_exhaustive()
    }
}

impl<P: ProblemDomain> GeneticAlgorithm<P> {
    /// Build a run from a validated config, resolving objective names against
    /// the registry. All configuration errors surface here, before the run.
    pub fn new(
        config: AppConfig,
        problem: P,
        registry: &ObjectiveRegistry<P::Individual>,
    ) -> Result<Self> {
        config.validate()?;

        let objectives = registry.select(&config.optimizer.objectives)?;
        let plan = EvaluationPlan::from_config(&config.evaluation);
        let fitness = FitnessCalculator::new(objectives, plan)?;

        let evaluator = if config.evaluation.num_workers > 1 {
            Some(DistributedEvaluator::new(config.evaluation.num_workers)?)
        } else {
            None
        };

        let rng = match config.optimizer.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            problem,
            fitness,
            evaluator,
            rng,
            cancel: Arc::new(AtomicBool::new(false)),
            best_criterion: BestCriterion::WeightedSum,
        })
    }

    pub fn with_best_criterion(mut self, criterion: BestCriterion) -> Self {
        self.best_criterion = criterion;
        self
    }

    /// Shared flag for external interrupts. Raising it stops new work; the
    /// generation in flight is discarded rather than half-committed.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Run the full generation loop and report results to the problem domain.
    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> Result<OptimizerOutcome<P::Individual>> {
        let population_size = self.config.optimizer.population_size;
        let iterations = self.config.optimizer.number_of_iterations;

        callback.on_phase(0, Phase::Initializing);
        let mut population = self.problem.create_initial_population(population_size)?;
        if population.len() != population_size {
            return Err(ParetuneError::Generation(format!(
                "Problem domain produced {} individuals, expected {}",
                population.len(),
                population_size
            )));
        }

        if self.config.optimizer.seed_with_original {
            match self.problem.baseline_individual() {
                Some(baseline) => population[0] = baseline,
                None => log::warn!("seed_with_original set but the domain has no baseline"),
            }
        }

        let mut best: Option<BestIndividual<P::Individual>> = None;
        let mut iterations_completed = 0;
        let mut cancelled = false;

        for iteration in 0..iterations {
            callback.on_generation_start(iteration);

            callback.on_phase(iteration, Phase::Evaluating);
            let report = self.evaluate_population(iteration, &population, &mut callback);

            if self.cancel.load(Ordering::Relaxed) {
                cancelled = true;
                break;
            }
            if report.penalized == population.len() {
                return Err(ParetuneError::Evaluation(format!(
                    "Every individual failed evaluation in iteration {}",
                    iteration
                )));
            }
            if report.penalized > 0 {
                log::debug!(
                    "Iteration {}: {} of {} individuals penalized",
                    iteration,
                    report.penalized,
                    population.len()
                );
            }
            let mut stats = report.stats;

            callback.on_phase(iteration, Phase::Ranking);
            let fronts = fast_non_dominated_sort(&mut stats);
            for front in &fronts {
                assign_crowding_distance(&mut stats, front);
            }
            self.fitness.apply_weighted_sums(&mut stats);

            // Best tracker only moves once the generation is fully ranked
            let generation_best = self.generation_best(&population, &stats, &fronts);
            let replace = match &best {
                Some(current) => generation_best.weighted_sum > current.weighted_sum,
                None => true,
            };
            if replace {
                best = Some(generation_best);
            }

            iterations_completed = iteration + 1;
            callback.on_generation_complete(
                iteration,
                stats
                    .iter()
                    .map(|s| s.weighted_sum)
                    .fold(f64::NEG_INFINITY, f64::max),
                fronts[0].len(),
            );

            if iteration + 1 == iterations {
                break;
            }

            callback.on_phase(iteration, Phase::Selecting);
            let order = crowded_order(&stats, &fronts);

            let mut next_generation = Vec::with_capacity(population_size);
            for &idx in order.iter().take(self.config.optimizer.elite_size) {
                let elite = &population[stats[idx].individual];
                next_generation.push(self.problem.elitist_offspring(elite));
            }

            // Breeding parents are the best survivors below the elite band
            let parent_pool: Vec<P::Individual> = order
                .iter()
                .skip(self.config.optimizer.elite_size)
                .take(self.config.optimizer.propagation_count())
                .map(|&idx| population[stats[idx].individual].clone())
                .collect();

            callback.on_phase(iteration, Phase::Varying);
            while next_generation.len() < population_size {
                let mom = &parent_pool[self.rng.gen_range(0..parent_pool.len())];
                let dad = &parent_pool[self.rng.gen_range(0..parent_pool.len())];

                let (child1, child2) =
                    self.problem
                        .cross_over(mom, dad, self.config.optimizer.chance_of_crossover);

                let child1 =
                    self.problem
                        .mutate(child1, self.config.optimizer.chance_of_mutation, iteration);
                next_generation.push(child1);

                if next_generation.len() < population_size {
                    let child2 = self.problem.mutate(
                        child2,
                        self.config.optimizer.chance_of_mutation,
                        iteration,
                    );
                    next_generation.push(child2);
                }
            }

            self.problem.post_iteration_cleanup(iteration);
            population = next_generation;

            if self.cancel.load(Ordering::Relaxed) {
                cancelled = true;
                break;
            }
        }

        callback.on_phase(iterations_completed.saturating_sub(1), Phase::Finalizing);
        let best = best.ok_or_else(|| {
            ParetuneError::Generation(
                "Run was cancelled before the first generation completed".to_string(),
            )
        })?;
        self.problem.optimizer_results(&best.individual, &best.metrics);

        Ok(OptimizerOutcome {
            best,
            iterations_completed,
            cancelled,
        })
    }

    fn evaluate_population<C: ProgressCallback>(
        &mut self,
        iteration: usize,
        population: &[P::Individual],
        callback: &mut C,
    ) -> EvaluationReport {
        match &self.evaluator {
            Some(evaluator) => {
                let report = evaluator.evaluate(&self.fitness, iteration, population, &self.cancel);
                callback.on_individual_evaluated(population.len(), population.len());
                report
            }
            None => {
                let mut stats = Vec::with_capacity(population.len());
                for (index, individual) in population.iter().enumerate() {
                    if self.cancel.load(Ordering::Relaxed) {
                        stats.push(IndividualStats::penalized(
                            index,
                            self.fitness.number_of_objectives(),
                        ));
                        continue;
                    }
                    stats.push(self.fitness.evaluate_individual(iteration, index, individual));
                    callback.on_individual_evaluated(index + 1, population.len());
                }
                let penalized = stats.iter().filter(|s| s.is_penalized()).count();
                EvaluationReport { stats, penalized }
            }
        }
    }

    /// Pick this generation's best candidate under the configured criterion.
    fn generation_best(
        &self,
        population: &[P::Individual],
        stats: &[IndividualStats],
        fronts: &[Vec<usize>],
    ) -> BestIndividual<P::Individual> {
        let candidates: Vec<usize> = match self.best_criterion {
            BestCriterion::WeightedSum => (0..stats.len()).collect(),
            BestCriterion::ParetoFront => fronts[0].clone(),
        };

        let best_idx = candidates
            .into_iter()
            .max_by(|&a, &b| {
                stats[a]
                    .weighted_sum
                    .partial_cmp(&stats[b].weighted_sum)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .expect("ranked population is never empty");

        BestIndividual {
            individual: population[stats[best_idx].individual].clone(),
            weighted_sum: stats[best_idx].weighted_sum,
            metrics: self.fitness.user_facing_metrics(&stats[best_idx]),
        }
    }
}
