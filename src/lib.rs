pub mod config;
pub mod engines;
pub mod error;

pub use config::{AppConfig, ConfigManager, EvaluationConfig, OptimizerConfig};
pub use engines::optimizer::{
    BestCriterion, Direction, EvaluationContext, GeneticAlgorithm, ObjectiveFunction,
    ObjectiveRegistry, ProblemDomain, ProgressCallback,
};
pub use error::{ParetuneError, Result};
