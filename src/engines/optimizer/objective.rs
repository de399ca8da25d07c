use super::splits::{EvaluationPlan, SplitSpec};
use crate::error::{ParetuneError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Whether a metric should be maximized or minimized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Maximize,
    Minimize,
}

impl Direction {
    /// Map a metric value onto the internal higher-is-better scale.
    pub fn adjust(&self, value: f64) -> f64 {
        match self {
            Direction::Maximize => value,
            Direction::Minimize => -value,
        }
    }
}

/// Context handed to every scoring call.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    pub iteration: usize,
    pub split: SplitSpec,
    pub plan: &'a EvaluationPlan,
}

/// One objective of a multi-objective run.
///
/// `score` produces the raw number for a candidate, typically by running a
/// backtest against the split named in the context; this is the expensive part.
/// `get_metric` transforms a raw score onto the scale used for comparison;
/// the default is identity. Weights must be non-negative: optimization
/// direction is carried by `direction`, never by weight sign.
pub trait ObjectiveFunction<I>: Send + Sync {
    fn name(&self) -> &str;
    fn weight(&self) -> f64;

    fn direction(&self) -> Direction {
        Direction::Maximize
    }

    fn score(&self, individual: &I, ctx: &EvaluationContext) -> Result<f64>;

    fn get_metric(&self, raw: f64) -> f64 {
        raw
    }
}

impl<I> std::fmt::Debug for dyn ObjectiveFunction<I> + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectiveFunction")
            .field("name", &self.name())
            .field("weight", &self.weight())
            .field("direction", &self.direction())
            .finish()
    }
}

/// Name-keyed objective lookup.
///
/// A run's config selects objectives by name; selecting a name that was never
/// registered is a configuration error, raised before the run starts.
pub struct ObjectiveRegistry<I> {
    objectives: HashMap<String, Arc<dyn ObjectiveFunction<I>>>,
}

impl<I> ObjectiveRegistry<I> {
    pub fn new() -> Self {
        Self {
            objectives: HashMap::new(),
        }
    }

    pub fn register(&mut self, objective: Arc<dyn ObjectiveFunction<I>>) {
        self.objectives
            .insert(objective.name().to_string(), objective);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ObjectiveFunction<I>>> {
        self.objectives.get(name).cloned()
    }

    /// Resolve the named objectives in order, failing on the first unknown
    /// name or an empty selection.
    pub fn select(&self, names: &[String]) -> Result<Vec<Arc<dyn ObjectiveFunction<I>>>> {
        if names.is_empty() {
            return Err(ParetuneError::Configuration(
                "At least one objective must be selected".to_string(),
            ));
        }
        names
            .iter()
            .map(|name| {
                self.get(name).ok_or_else(|| {
                    ParetuneError::Configuration(format!("Unknown objective: {}", name))
                })
            })
            .collect()
    }
}

impl<I> Default for ObjectiveRegistry<I> {
    fn default() -> Self {
        Self::new()
    }
}
