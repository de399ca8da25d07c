//! Variation primitives, generic over genome representation. Problem domains
//! supply the actual crossover/mutation semantics and may delegate to these.

use rand::Rng;

/// Uniform crossover: swap the two parents' values at each position
/// independently with `independent_probability`. Parents are left untouched;
/// positions beyond the shorter genome are kept as-is on both children.
pub fn uniform_crossover<T: Clone, R: Rng>(
    mom: &[T],
    dad: &[T],
    independent_probability: f64,
    rng: &mut R,
) -> (Vec<T>, Vec<T>) {
    let mut child1 = mom.to_vec();
    let mut child2 = dad.to_vec();
    let len = mom.len().min(dad.len());

    for i in 0..len {
        if rng.gen::<f64>() < independent_probability {
            std::mem::swap(&mut child1[i], &mut child2[i]);
        }
    }

    (child1, child2)
}

/// Simulated binary crossover for real-valued genomes.
///
/// `eta` is the distribution index: larger values concentrate children near
/// their parents, small values let them spread. Genes beyond the shorter
/// genome are kept as-is on both children.
pub fn sbx_crossover<R: Rng>(
    mom: &[f64],
    dad: &[f64],
    eta: f64,
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>) {
    let eta = eta.max(1.0);
    let mut child1 = mom.to_vec();
    let mut child2 = dad.to_vec();
    let len = mom.len().min(dad.len());

    for i in 0..len {
        let u: f64 = rng.gen();

        let beta = if u <= 0.5 {
            (2.0 * u).powf(1.0 / (eta + 1.0))
        } else {
            (1.0 / (2.0 * (1.0 - u))).powf(1.0 / (eta + 1.0))
        };

        child1[i] = 0.5 * ((1.0 + beta) * mom[i] + (1.0 - beta) * dad[i]);
        child2[i] = 0.5 * ((1.0 - beta) * mom[i] + (1.0 + beta) * dad[i]);
    }

    (child1, child2)
}

/// Mutation: independently replace each gene with a freshly sampled value
/// with probability `mutation_rate`.
pub fn uniform_reset_mutation<T, R, F>(
    genome: &mut [T],
    mutation_rate: f64,
    rng: &mut R,
    mut sample: F,
) where
    R: Rng,
    F: FnMut(&mut R) -> T,
{
    for gene in genome.iter_mut() {
        if rng.gen::<f64>() < mutation_rate {
            *gene = sample(rng);
        }
    }
}

/// Gaussian mutation for real-valued genomes: perturb each gene with
/// probability `mutation_rate` by a zero-mean normal draw of width `sigma`.
pub fn gaussian_mutation<R: Rng>(genome: &mut [f64], mutation_rate: f64, sigma: f64, rng: &mut R) {
    for gene in genome.iter_mut() {
        if rng.gen::<f64>() < mutation_rate {
            // Box-Muller transform
            let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
            let u2: f64 = rng.gen();
            let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
            *gene += z * sigma;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn uniform_crossover_full_probability_swaps_everything() {
        let mut rng = StdRng::seed_from_u64(7);
        let mom = vec![1u32, 2, 3, 4];
        let dad = vec![9u32, 8, 7, 6];

        let (c1, c2) = uniform_crossover(&mom, &dad, 1.0, &mut rng);
        assert_eq!(c1, dad);
        assert_eq!(c2, mom);
    }

    #[test]
    fn uniform_crossover_zero_probability_swaps_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        let mom = vec![1u32, 2, 3, 4];
        let dad = vec![9u32, 8, 7, 6];

        let (c1, c2) = uniform_crossover(&mom, &dad, 0.0, &mut rng);
        assert_eq!(c1, mom);
        assert_eq!(c2, dad);
    }

    #[test]
    fn uniform_crossover_keeps_tail_of_longer_parent() {
        let mut rng = StdRng::seed_from_u64(3);
        let mom = vec![1u32, 2, 3, 4, 5];
        let dad = vec![9u32, 8];

        let (c1, c2) = uniform_crossover(&mom, &dad, 1.0, &mut rng);
        assert_eq!(c1, vec![9, 8, 3, 4, 5]);
        assert_eq!(c2, vec![1, 2]);
    }

    #[test]
    fn sbx_high_eta_stays_near_parents() {
        let mut rng = StdRng::seed_from_u64(42);
        let mom = vec![1.0, 2.0, 3.0];
        let dad = vec![1.5, 2.5, 3.5];

        let (c1, c2) = sbx_crossover(&mom, &dad, 1e6, &mut rng);
        for i in 0..3 {
            assert!((c1[i] - mom[i]).abs() < 0.05 || (c1[i] - dad[i]).abs() < 0.05);
            assert!((c2[i] - mom[i]).abs() < 0.05 || (c2[i] - dad[i]).abs() < 0.05);
        }
    }

    #[test]
    fn sbx_low_eta_can_diverge() {
        let mut rng = StdRng::seed_from_u64(42);
        let mom = vec![1.0; 32];
        let dad = vec![2.0; 32];

        let (c1, c2) = sbx_crossover(&mom, &dad, 1.0, &mut rng);
        let spread = c1
            .iter()
            .chain(c2.iter())
            .map(|v| (v - 1.5).abs())
            .fold(0.0f64, f64::max);
        // At eta = 1 some gene should land well outside the parent interval
        assert!(spread > 0.6, "spread was {}", spread);
    }

    #[test]
    fn sbx_children_blend_is_complementary() {
        let mut rng = StdRng::seed_from_u64(9);
        let mom = vec![1.0, -4.0];
        let dad = vec![3.0, 6.0];

        let (c1, c2) = sbx_crossover(&mom, &dad, 15.0, &mut rng);
        for i in 0..2 {
            // Children mirror around the parents' midpoint
            assert!((c1[i] + c2[i] - (mom[i] + dad[i])).abs() < 1e-9);
        }
    }

    #[test]
    fn reset_mutation_at_full_rate_resamples_all_genes() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut genome = vec![0u32; 16];
        uniform_reset_mutation(&mut genome, 1.0, &mut rng, |r| r.gen_range(1..100u32));
        assert!(genome.iter().all(|&g| g >= 1));
    }

    #[test]
    fn reset_mutation_at_zero_rate_is_identity() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut genome = vec![5u32; 16];
        uniform_reset_mutation(&mut genome, 0.0, &mut rng, |r| r.gen_range(100..200u32));
        assert_eq!(genome, vec![5u32; 16]);
    }

    #[test]
    fn gaussian_mutation_perturbs_in_place() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut genome = vec![1.0; 8];
        gaussian_mutation(&mut genome, 1.0, 0.1, &mut rng);
        assert!(genome.iter().any(|&g| g != 1.0));
        assert!(genome.iter().all(|&g| (g - 1.0).abs() < 1.0));
    }
}
