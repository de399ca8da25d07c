//! End-to-end demo: tune a toy momentum-strategy configuration against three
//! competing objectives (profit, turnover, drawdown) with the NSGA-II loop.
//!
//! Run with: cargo run --example param_tuner

use anyhow::Result;
use paretune::config::{AppConfig, EvaluationConfig, OptimizerConfig};
use paretune::engines::optimizer::{
    operators, ConsoleProgressCallback, Direction, EvaluationContext, GeneticAlgorithm,
    ObjectiveFunction, ObjectiveRegistry, ProblemDomain,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Strategy parameters under tuning: [fast_period, slow_period, entry_threshold].
type StrategyParams = Vec<f64>;

struct MomentumTuner {
    rng: StdRng,
}

impl ProblemDomain for MomentumTuner {
    type Individual = StrategyParams;

    fn create_initial_population(&mut self, size: usize) -> paretune::Result<Vec<StrategyParams>> {
        Ok((0..size)
            .map(|_| {
                vec![
                    self.rng.gen_range(2.0..50.0),
                    self.rng.gen_range(20.0..200.0),
                    self.rng.gen_range(0.0..5.0),
                ]
            })
            .collect())
    }

    fn cross_over(
        &mut self,
        mom: &StrategyParams,
        dad: &StrategyParams,
        chance: f64,
    ) -> (StrategyParams, StrategyParams) {
        if self.rng.gen::<f64>() < chance {
            operators::sbx_crossover(mom, dad, 20.0, &mut self.rng)
        } else {
            operators::uniform_crossover(mom, dad, 0.5, &mut self.rng)
        }
    }

    fn mutate(
        &mut self,
        mut individual: StrategyParams,
        mutate_probability: f64,
        iteration: usize,
    ) -> StrategyParams {
        // Anneal mutation width as the run progresses
        let sigma = 2.0 / (1.0 + iteration as f64 * 0.1);
        operators::gaussian_mutation(&mut individual, mutate_probability, sigma, &mut self.rng);
        individual
    }

    fn elitist_offspring(&mut self, elite: &StrategyParams) -> StrategyParams {
        let mut copy = elite.clone();
        operators::gaussian_mutation(&mut copy, 0.1, 0.05, &mut self.rng);
        copy
    }

    fn optimizer_results(&mut self, best: &StrategyParams, metrics: &[f64]) {
        println!("\nBest configuration found:");
        println!(
            "  fast_period = {:.1}, slow_period = {:.1}, entry_threshold = {:.2}",
            best[0], best[1], best[2]
        );
        println!(
            "  net_profit = {:.2}, turnover = {:.2}, max_drawdown = {:.2}",
            metrics[0], metrics[1], metrics[2]
        );
    }
}

/// Synthetic profit surface with a ridge around fast=10, slow=80.
struct NetProfit;

impl ObjectiveFunction<StrategyParams> for NetProfit {
    fn name(&self) -> &str {
        "net_profit"
    }

    fn weight(&self) -> f64 {
        1.0
    }

    fn score(&self, params: &StrategyParams, _ctx: &EvaluationContext) -> paretune::Result<f64> {
        let fast = (params[0] - 10.0) / 10.0;
        let slow = (params[1] - 80.0) / 60.0;
        Ok(25.0 - 8.0 * fast * fast - 5.0 * slow * slow)
    }
}

/// Shorter fast periods trade more; keep turnover down.
struct Turnover;

impl ObjectiveFunction<StrategyParams> for Turnover {
    fn name(&self) -> &str {
        "turnover"
    }

    fn weight(&self) -> f64 {
        0.3
    }

    fn direction(&self) -> Direction {
        Direction::Minimize
    }

    fn score(&self, params: &StrategyParams, _ctx: &EvaluationContext) -> paretune::Result<f64> {
        Ok(100.0 / params[0].max(1.0))
    }
}

/// Drawdown proxy: aggressive entry thresholds draw down harder.
struct MaxDrawdown;

impl ObjectiveFunction<StrategyParams> for MaxDrawdown {
    fn name(&self) -> &str {
        "max_drawdown"
    }

    fn weight(&self) -> f64 {
        0.5
    }

    fn direction(&self) -> Direction {
        Direction::Minimize
    }

    fn score(&self, params: &StrategyParams, _ctx: &EvaluationContext) -> paretune::Result<f64> {
        Ok(5.0 + 3.0 * (5.0 - params[2]).abs())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut registry: ObjectiveRegistry<StrategyParams> = ObjectiveRegistry::new();
    registry.register(Arc::new(NetProfit));
    registry.register(Arc::new(Turnover));
    registry.register(Arc::new(MaxDrawdown));

    let config = AppConfig {
        optimizer: OptimizerConfig {
            number_of_iterations: 25,
            population_size: 120,
            elite_size: 4,
            random_seed: Some(7),
            objectives: vec![
                "net_profit".to_string(),
                "turnover".to_string(),
                "max_drawdown".to_string(),
            ],
            ..Default::default()
        },
        evaluation: EvaluationConfig {
            num_workers: 4,
            ..Default::default()
        },
    };

    let tuner = MomentumTuner {
        rng: StdRng::seed_from_u64(7),
    };

    let mut ga = GeneticAlgorithm::new(config, tuner, &registry)?;
    let outcome = ga.run(ConsoleProgressCallback)?;

    println!(
        "\nCompleted {} generations, best weighted sum {:.3}",
        outcome.iterations_completed, outcome.best.weighted_sum
    );
    Ok(())
}
