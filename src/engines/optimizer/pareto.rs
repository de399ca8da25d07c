//! NSGA-II style fast non-dominated sorting over a generation's stats arena.

use super::stats::IndividualStats;

/// Check if fitness vector `a` dominates `b`.
///
/// All values are on the internal higher-is-better scale, so `a` dominates
/// `b` if it is at least as good on every objective and strictly better in at
/// least one. Vectors of mismatched length never dominate each other.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut at_least_one_better = false;

    for (a_val, b_val) in a.iter().zip(b.iter()) {
        if b_val > a_val {
            return false;
        }
        if a_val > b_val {
            at_least_one_better = true;
        }
    }

    at_least_one_better
}

/// Partition the arena into successive non-dominated fronts.
///
/// Fills in `dominated_by_count` and `dominates_over` on every member and
/// returns fronts as arena-index lists, best first. The stored counts are the
/// true pairwise counts; the iterative front peeling works on a scratch copy,
/// so front 0 is exactly the set of members with `dominated_by_count == 0`
/// after this returns.
pub fn fast_non_dominated_sort(stats: &mut [IndividualStats]) -> Vec<Vec<usize>> {
    let n = stats.len();
    let mut fronts: Vec<Vec<usize>> = Vec::new();
    let mut first_front = Vec::new();

    for i in 0..n {
        stats[i].dominated_by_count = 0;
        stats[i].dominates_over.clear();
    }

    // Compare all ordered pairs
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            if dominates(&stats[i].fitness_values, &stats[j].fitness_values) {
                stats[i].dominates_over.push(j);
            } else if dominates(&stats[j].fitness_values, &stats[i].fitness_values) {
                stats[i].dominated_by_count += 1;
            }
        }

        if stats[i].dominated_by_count == 0 {
            first_front.push(i);
        }
    }

    fronts.push(first_front);

    // Peel subsequent fronts on a scratch copy of the counts
    let mut remaining: Vec<usize> = stats.iter().map(|s| s.dominated_by_count).collect();
    let mut front_index = 0;
    while front_index < fronts.len() && !fronts[front_index].is_empty() {
        let mut next_front = Vec::new();

        for &i in &fronts[front_index] {
            for &j in &stats[i].dominates_over {
                remaining[j] -= 1;
                if remaining[j] == 0 {
                    next_front.push(j);
                }
            }
        }

        if !next_front.is_empty() {
            fronts.push(next_front);
        }
        front_index += 1;
    }

    fronts
}

/// Flatten ranked fronts into a single total order: front order first, ties
/// within a front broken by descending crowding distance.
pub fn crowded_order(stats: &[IndividualStats], fronts: &[Vec<usize>]) -> Vec<usize> {
    let mut order = Vec::with_capacity(stats.len());

    for front in fronts {
        let mut members = front.clone();
        members.sort_by(|&a, &b| {
            stats[b]
                .crowding_distance
                .partial_cmp(&stats[a].crowding_distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order.extend(members);
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena(vectors: &[&[f64]]) -> Vec<IndividualStats> {
        vectors
            .iter()
            .enumerate()
            .map(|(i, v)| IndividualStats::new(i, v.to_vec()))
            .collect()
    }

    #[test]
    fn dominance_on_adjusted_values() {
        // Better in both objectives
        assert!(dominates(&[10.0, 20.0], &[5.0, 10.0]));

        // Better in one, equal in the other
        assert!(dominates(&[10.0, 20.0], &[10.0, 10.0]));

        // Better in one, worse in the other - no dominance
        assert!(!dominates(&[10.0, 5.0], &[5.0, 10.0]));

        // Equal in both - no dominance
        assert!(!dominates(&[10.0, 20.0], &[10.0, 20.0]));

        // Mismatched lengths - no dominance
        assert!(!dominates(&[10.0, 20.0], &[5.0]));
    }

    #[test]
    fn domination_graph_matches_pairwise_rule() {
        let mut stats = arena(&[&[1.0, 2.0], &[2.0, 3.0], &[3.0, 1.0], &[1.0, 1.0]]);
        let fronts = fast_non_dominated_sort(&mut stats);

        // [2,3] dominates [1,2] and [1,1]; [3,1] dominates [1,1];
        // [1,2] dominates [1,1]; [2,3] and [3,1] are mutually non-dominating.
        assert_eq!(stats[0].dominated_by_count, 1);
        assert_eq!(stats[1].dominated_by_count, 0);
        assert_eq!(stats[2].dominated_by_count, 0);
        assert_eq!(stats[3].dominated_by_count, 3);

        assert_eq!(stats[0].dominates_over, vec![3]);
        assert_eq!(stats[1].dominates_over, vec![0, 3]);
        assert_eq!(stats[2].dominates_over, vec![3]);
        assert!(stats[3].dominates_over.is_empty());

        assert_eq!(fronts.len(), 3);
        assert_eq!(fronts[0], vec![1, 2]);
        assert_eq!(fronts[1], vec![0]);
        assert_eq!(fronts[2], vec![3]);
    }

    #[test]
    fn fronts_partition_the_population() {
        let mut stats = arena(&[
            &[1.0, 5.0],
            &[3.0, 3.0],
            &[5.0, 1.0],
            &[2.0, 2.0],
            &[1.0, 1.0],
        ]);
        let fronts = fast_non_dominated_sort(&mut stats);

        let total: usize = fronts.iter().map(|f| f.len()).sum();
        assert_eq!(total, stats.len());

        let mut seen = vec![false; stats.len()];
        for front in &fronts {
            for &i in front {
                assert!(!seen[i], "index {} appears in two fronts", i);
                seen[i] = true;
            }
        }

        assert_eq!(fronts[0], vec![0, 1, 2]);
        assert_eq!(fronts[1], vec![3]);
        assert_eq!(fronts[2], vec![4]);
    }

    #[test]
    fn members_of_a_front_never_dominate_each_other() {
        let mut stats = arena(&[
            &[1.0, 5.0],
            &[3.0, 3.0],
            &[5.0, 1.0],
            &[2.0, 2.0],
            &[4.0, 0.5],
        ]);
        let fronts = fast_non_dominated_sort(&mut stats);

        for front in &fronts {
            for &a in front {
                for &b in front {
                    if a != b {
                        assert!(!dominates(
                            &stats[a].fitness_values,
                            &stats[b].fitness_values
                        ));
                    }
                }
            }
        }
    }

    #[test]
    fn later_front_members_are_dominated_by_earlier_fronts() {
        let mut stats = arena(&[
            &[1.0, 5.0],
            &[3.0, 3.0],
            &[5.0, 1.0],
            &[2.0, 2.0],
            &[1.0, 1.0],
        ]);
        let fronts = fast_non_dominated_sort(&mut stats);

        for j in 1..fronts.len() {
            for &member in &fronts[j] {
                // No member of a later front dominates anything in an earlier one
                for &earlier in &fronts[j - 1] {
                    assert!(!dominates(
                        &stats[member].fitness_values,
                        &stats[earlier].fitness_values
                    ));
                }
                // Every member of front j is dominated by someone in front j-1
                assert!(fronts[j - 1].iter().any(|&earlier| dominates(
                    &stats[earlier].fitness_values,
                    &stats[member].fitness_values
                )));
            }
        }
    }

    #[test]
    fn tiny_population_is_a_single_front() {
        let mut stats = arena(&[&[1.0, 2.0], &[2.0, 1.0]]);
        let fronts = fast_non_dominated_sort(&mut stats);
        assert_eq!(fronts.len(), 1);
        assert_eq!(fronts[0].len(), 2);
    }

    #[test]
    fn crowded_order_prefers_front_then_distance() {
        let mut stats = arena(&[&[1.0, 5.0], &[3.0, 3.0], &[5.0, 1.0], &[2.0, 2.0]]);
        let fronts = fast_non_dominated_sort(&mut stats);

        stats[0].crowding_distance = f64::INFINITY;
        stats[1].crowding_distance = 0.5;
        stats[2].crowding_distance = f64::INFINITY;
        stats[3].crowding_distance = f64::INFINITY;

        let order = crowded_order(&stats, &fronts);
        // Front 0 precedes front 1 regardless of distance; within front 0 the
        // finite-distance member comes last.
        assert_eq!(order[2], 1);
        assert_eq!(order[3], 3);
    }
}
