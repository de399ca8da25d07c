pub mod crowding;
pub mod distributed;
pub mod engine;
pub mod fitness;
pub mod objective;
pub mod operators;
pub mod pareto;
pub mod problem;
pub mod progress;
pub mod splits;
pub mod stats;

pub use crowding::assign_crowding_distance;
pub use distributed::DistributedEvaluator;
pub use engine::{
    BestCriterion, BestIndividual, GeneticAlgorithm, OptimizerOutcome, Phase, ProgressCallback,
};
pub use fitness::{EvaluationReport, FitnessCalculator};
pub use objective::{Direction, EvaluationContext, ObjectiveFunction, ObjectiveRegistry};
pub use pareto::{crowded_order, dominates, fast_non_dominated_sort};
pub use problem::ProblemDomain;
pub use progress::{ChannelProgressCallback, ConsoleProgressCallback, SilentProgressCallback};
pub use splits::{EvaluationPlan, SplitSpec};
pub use stats::{IndividualStats, PENALIZED_FITNESS};
