/// Fitness assigned to an individual whose evaluation failed. Large and
/// negative on the internal higher-is-better scale, but finite so that
/// crowding-distance normalization stays well defined.
pub const PENALIZED_FITNESS: f64 = -1.0e12;

/// Per-candidate bookkeeping for one generation.
///
/// Stats live in a single arena (`Vec<IndividualStats>`) per generation, in
/// population order. All relations between candidates are stored as indices
/// into that arena, never as references, so the whole generation drops as one
/// unit. Front membership, domination counts and crowding distances are
/// generation-scoped: elites re-enter the next generation as fresh individuals
/// with fresh stats.
#[derive(Debug, Clone)]
pub struct IndividualStats {
    /// Index of the individual in the generation's population vector.
    pub individual: usize,
    /// Direction-adjusted metric values, one per objective, in registration
    /// order. Higher is always better.
    pub fitness_values: Vec<f64>,
    /// How many individuals dominate this one (pairwise count, stable after
    /// ranking).
    pub dominated_by_count: usize,
    /// Arena indices of the individuals this one dominates.
    pub dominates_over: Vec<usize>,
    pub crowding_distance: f64,
    /// Dot product of `fitness_values` and the objective weights. Defined
    /// only after ranking completes.
    pub weighted_sum: f64,
}

impl IndividualStats {
    pub fn new(individual: usize, fitness_values: Vec<f64>) -> Self {
        Self {
            individual,
            fitness_values,
            dominated_by_count: 0,
            dominates_over: Vec::new(),
            crowding_distance: 0.0,
            weighted_sum: 0.0,
        }
    }

    /// Stats for an individual whose evaluation failed.
    pub fn penalized(individual: usize, num_objectives: usize) -> Self {
        Self::new(individual, vec![PENALIZED_FITNESS; num_objectives])
    }

    pub fn is_penalized(&self) -> bool {
        self.fitness_values.iter().all(|&v| v == PENALIZED_FITNESS)
    }
}
