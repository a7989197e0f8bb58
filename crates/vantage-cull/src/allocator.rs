//! Ranking and greedy budget allocation.

use vantage_config::{BudgetMetric, SortOrder};
use vantage_scene::ObjectId;

use crate::budget::Budgeter;

/// One visibility-filtered candidate, ready for ranking.
#[derive(Clone, Copy, Debug)]
pub struct CandidateEntry {
    pub id: ObjectId,
    /// Cost under the active metric.
    pub cost: u64,
    /// Distance from the camera to the nearest bounding-box corner.
    pub distance: f32,
}

/// Order candidates for admission.
///
/// Under the object-count metric objects are ranked purely by distance
/// (closest first). Under vertex/triangle metrics the key is
/// `(signed cost, distance)`: ascending order puts cheap objects first,
/// descending puts expensive ones first. The sort is stable, so equal keys
/// keep their candidate order and the admitted prefix is deterministic.
pub fn rank(entries: &mut [CandidateEntry], budgeter: &Budgeter) {
    if !budgeter.is_active() {
        return;
    }
    if budgeter.metric() == BudgetMetric::Objects {
        entries.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        return;
    }
    let sign: i128 = match budgeter.sort_order() {
        SortOrder::Ascending => 1,
        SortOrder::Descending => -1,
    };
    entries.sort_by(|a, b| {
        let ka = (sign * a.cost as i128, a.distance);
        let kb = (sign * b.cost as i128, b.distance);
        ka.0.cmp(&kb.0).then(ka.1.total_cmp(&kb.1))
    });
}

/// Greedy prefix scan: admit ranked candidates while the running total
/// stays within the limit; the first candidate that would exceed it, and
/// everything after, is rejected.
///
/// Returns the split index; entries before it are admitted. When no
/// budget is active every candidate is admitted.
pub fn allocate(entries: &[CandidateEntry], budgeter: &Budgeter) -> usize {
    if !budgeter.is_active() {
        return entries.len();
    }
    let limit = budgeter.limit();
    let mut total: u64 = 0;
    for (idx, entry) in entries.iter().enumerate() {
        if total + entry.cost > limit {
            return idx;
        }
        total += entry.cost;
    }
    entries.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_config::{BudgetMetric, CullConfig};

    fn budgeter(metric: BudgetMetric, limit: u64, order: SortOrder) -> Budgeter {
        let mut config = CullConfig::default();
        config.budget.enabled = true;
        config.budget.metric = metric;
        config.budget.sort_order = order;
        match metric {
            BudgetMetric::Objects => config.budget.max_objects = limit,
            BudgetMetric::Vertices => config.budget.max_vertices = limit,
            BudgetMetric::Triangles => config.budget.max_triangles = limit,
            BudgetMetric::None => {}
        }
        Budgeter::from_config(&config)
    }

    fn entries(costs: &[u64]) -> Vec<CandidateEntry> {
        costs
            .iter()
            .enumerate()
            .map(|(i, &cost)| CandidateEntry {
                id: ObjectId(i as u32),
                cost,
                distance: i as f32,
            })
            .collect()
    }

    #[test]
    fn test_greedy_prefix_is_deterministic() {
        // costs [5,3,8,2], limit 10: running total 5, 8; adding 8 would
        // reach 16 > 10, so the scan stops there. [2] is not revisited.
        let b = budgeter(BudgetMetric::Vertices, 10, SortOrder::Ascending);
        let list = entries(&[5, 3, 8, 2]);
        assert_eq!(allocate(&list, &b), 2);
    }

    #[test]
    fn test_budget_monotonicity() {
        let list = entries(&[5, 3, 8, 2]);
        let mut prev = 0;
        for limit in 0..=20 {
            let b = budgeter(BudgetMetric::Vertices, limit, SortOrder::Ascending);
            let split = allocate(&list, &b);
            assert!(
                split >= prev,
                "raising the limit to {limit} shrank the prefix"
            );
            prev = split;
        }
    }

    #[test]
    fn test_inactive_budget_admits_everything() {
        let b = Budgeter::from_config(&CullConfig::default());
        let list = entries(&[5, 3, 8, 2]);
        assert_eq!(allocate(&list, &b), list.len());
    }

    #[test]
    fn test_rank_ascending_puts_cheap_first() {
        let b = budgeter(BudgetMetric::Vertices, 100, SortOrder::Ascending);
        let mut list = entries(&[50, 10, 30]);
        rank(&mut list, &b);
        let costs: Vec<u64> = list.iter().map(|e| e.cost).collect();
        assert_eq!(costs, vec![10, 30, 50]);
    }

    #[test]
    fn test_rank_descending_puts_expensive_first() {
        let b = budgeter(BudgetMetric::Vertices, 100, SortOrder::Descending);
        let mut list = entries(&[50, 10, 30]);
        rank(&mut list, &b);
        let costs: Vec<u64> = list.iter().map(|e| e.cost).collect();
        assert_eq!(costs, vec![50, 30, 10]);
    }

    #[test]
    fn test_rank_ties_break_by_distance() {
        let b = budgeter(BudgetMetric::Vertices, 100, SortOrder::Ascending);
        let mut list = vec![
            CandidateEntry {
                id: ObjectId(0),
                cost: 10,
                distance: 9.0,
            },
            CandidateEntry {
                id: ObjectId(1),
                cost: 10,
                distance: 2.0,
            },
        ];
        rank(&mut list, &b);
        assert_eq!(list[0].id, ObjectId(1));
    }

    #[test]
    fn test_object_metric_ranks_by_distance_only() {
        let b = budgeter(BudgetMetric::Objects, 10, SortOrder::Ascending);
        let mut list = vec![
            CandidateEntry {
                id: ObjectId(0),
                cost: 1,
                distance: 40.0,
            },
            CandidateEntry {
                id: ObjectId(1),
                cost: 1,
                distance: 5.0,
            },
            CandidateEntry {
                id: ObjectId(2),
                cost: 1,
                distance: 20.0,
            },
        ];
        rank(&mut list, &b);
        let order: Vec<ObjectId> = list.iter().map(|e| e.id).collect();
        assert_eq!(order, vec![ObjectId(1), ObjectId(2), ObjectId(0)]);
    }

    #[test]
    fn test_first_oversized_entry_blocks_suffix() {
        // The scan is a strict prefix: an oversized entry rejects the rest
        // even if a later entry would still fit.
        let b = budgeter(BudgetMetric::Triangles, 4, SortOrder::Ascending);
        let list = entries(&[3, 5, 1]);
        assert_eq!(allocate(&list, &b), 1);
    }
}
