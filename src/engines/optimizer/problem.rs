use crate::error::Result;

/// The optimizer's single dependency on the outside world.
///
/// A problem domain owns the genome representation and everything that
/// touches its internals: population seeding, crossover, mutation and result
/// handling. The optimizer never inspects an `Individual`; it only moves them
/// between generations. The variation hooks may delegate to the generic
/// primitives in [`super::operators`] or implement custom logic.
pub trait ProblemDomain {
    type Individual: Clone + Send + Sync;

    /// Produce the initial population. A failure here aborts the run.
    fn create_initial_population(&mut self, size: usize) -> Result<Vec<Self::Individual>>;

    /// Cross two parents. `chance` is the configured crossover probability;
    /// the domain decides whether to apply it per-call or per-gene.
    fn cross_over(
        &mut self,
        mom: &Self::Individual,
        dad: &Self::Individual,
        chance: f64,
    ) -> (Self::Individual, Self::Individual);

    /// Mutate one individual. `iteration` lets the domain anneal its mutation
    /// strength over the course of the run.
    fn mutate(
        &mut self,
        individual: Self::Individual,
        mutate_probability: f64,
        iteration: usize,
    ) -> Self::Individual;

    /// Produce the next-generation copy of an elite individual. Domains may
    /// return an exact clone or apply a light unbiased perturbation.
    fn elitist_offspring(&mut self, elite: &Self::Individual) -> Self::Individual;

    /// Runs after each generation's offspring are produced, so domain-side
    /// caches (evaluation checkpoints, memoized indicators) can reset.
    fn post_iteration_cleanup(&mut self, _iteration: usize) {}

    /// Receives the final best individual and its user-facing metric vector.
    fn optimizer_results(&mut self, best: &Self::Individual, metrics: &[f64]);

    /// Caller-supplied baseline used to seed one population slot when
    /// `seed_with_original` is set.
    fn baseline_individual(&mut self) -> Option<Self::Individual> {
        None
    }
}
