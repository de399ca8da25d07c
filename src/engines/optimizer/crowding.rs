//! Crowding distance: within-front density measure used as the secondary
//! ranking key. Higher distance means a more isolated, more valuable member.

use super::stats::IndividualStats;

/// Populate `crowding_distance` for every member of one front, in place.
///
/// Fronts of two or fewer members get infinite distance outright so sparse
/// fronts are not over-penalized. Distances are reset on entry, so calling
/// this twice on the same front yields identical results.
pub fn assign_crowding_distance(stats: &mut [IndividualStats], front: &[usize]) {
    let front_size = front.len();

    if front_size <= 2 {
        for &idx in front {
            stats[idx].crowding_distance = f64::INFINITY;
        }
        return;
    }

    let num_objectives = stats[front[0]].fitness_values.len();

    for &idx in front {
        stats[idx].crowding_distance = 0.0;
    }

    for obj in 0..num_objectives {
        let mut sorted: Vec<usize> = front.to_vec();
        sorted.sort_by(|&a, &b| {
            stats[a].fitness_values[obj]
                .partial_cmp(&stats[b].fitness_values[obj])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        stats[sorted[0]].crowding_distance = f64::INFINITY;
        stats[sorted[front_size - 1]].crowding_distance = f64::INFINITY;

        let min_val = stats[sorted[0]].fitness_values[obj];
        let max_val = stats[sorted[front_size - 1]].fitness_values[obj];
        let range = max_val - min_val;

        // Normalization is undefined when the whole front agrees on this axis
        if range.abs() < 1e-10 {
            continue;
        }

        for i in 1..(front_size - 1) {
            let idx = sorted[i];
            let prev_val = stats[sorted[i - 1]].fitness_values[obj];
            let next_val = stats[sorted[i + 1]].fitness_values[obj];

            stats[idx].crowding_distance += (next_val - prev_val) / range;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::optimizer::pareto::fast_non_dominated_sort;

    fn arena(vectors: &[&[f64]]) -> Vec<IndividualStats> {
        vectors
            .iter()
            .enumerate()
            .map(|(i, v)| IndividualStats::new(i, v.to_vec()))
            .collect()
    }

    #[test]
    fn boundary_members_are_infinite_interior_finite() {
        let mut stats = arena(&[&[1.0, 5.0], &[2.0, 4.0], &[3.0, 3.0], &[5.0, 1.0]]);
        let fronts = fast_non_dominated_sort(&mut stats);
        assert_eq!(fronts[0].len(), 4);

        assign_crowding_distance(&mut stats, &fronts[0]);

        assert!(stats[0].crowding_distance.is_infinite());
        assert!(stats[3].crowding_distance.is_infinite());
        for idx in [1, 2] {
            assert!(stats[idx].crowding_distance.is_finite());
            assert!(stats[idx].crowding_distance >= 0.0);
        }
    }

    #[test]
    fn interior_distance_sums_normalized_neighbor_gaps() {
        let mut stats = arena(&[&[1.0, 5.0], &[2.0, 4.0], &[3.0, 3.0], &[5.0, 1.0]]);
        let fronts = fast_non_dominated_sort(&mut stats);
        assign_crowding_distance(&mut stats, &fronts[0]);

        // Index 1 sits between 0 and 2 on both axes:
        // obj0: (3 - 1) / 4, obj1: (5 - 3) / 4
        assert!((stats[1].crowding_distance - 1.0).abs() < 1e-12);
    }

    #[test]
    fn small_front_is_all_infinite() {
        let mut stats = arena(&[&[1.0, 2.0], &[2.0, 1.0]]);
        let fronts = fast_non_dominated_sort(&mut stats);

        assign_crowding_distance(&mut stats, &fronts[0]);
        for s in &stats {
            assert!(s.crowding_distance.is_infinite());
        }
    }

    #[test]
    fn constant_axis_contributes_nothing() {
        let mut stats = arena(&[&[1.0, 2.0], &[2.0, 2.0], &[3.0, 2.0], &[4.0, 2.0]]);
        // All share the second axis; only the first axis spreads them.
        let front: Vec<usize> = (0..stats.len()).collect();
        assign_crowding_distance(&mut stats, &front);

        assert!(stats[0].crowding_distance.is_infinite());
        assert!(stats[3].crowding_distance.is_infinite());
        assert!((stats[1].crowding_distance - 2.0 / 3.0).abs() < 1e-12);
        assert!((stats[2].crowding_distance - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn assignment_is_idempotent() {
        let mut stats = arena(&[&[1.0, 5.0], &[2.0, 4.0], &[3.0, 3.0], &[5.0, 1.0]]);
        let fronts = fast_non_dominated_sort(&mut stats);

        assign_crowding_distance(&mut stats, &fronts[0]);
        let first: Vec<f64> = stats.iter().map(|s| s.crowding_distance).collect();

        assign_crowding_distance(&mut stats, &fronts[0]);
        let second: Vec<f64> = stats.iter().map(|s| s.crowding_distance).collect();

        assert_eq!(first, second);
    }
}
