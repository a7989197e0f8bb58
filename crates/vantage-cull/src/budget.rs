//! Cost metrics for the rendering budget.
//!
//! A [`Budgeter`] assigns an integer cost to every object under the
//! configured metric and exposes the budget ceiling. Vertex and triangle
//! metrics sum instanced collections recursively, memoized per collection
//! for the session. Counts depend on geometry, never on placement, so the
//! cache needs no transform handling.

use rustc_hash::FxHashMap;

use vantage_config::{BudgetMetric, CullConfig, SortOrder};
use vantage_scene::{CollectionId, ObjectId, ObjectKind, Scene};

use crate::stats::format_num;

/// Session-owned budget capability: per-object cost, ceiling, and a
/// display summary for the active metric.
pub struct Budgeter {
    metric: BudgetMetric,
    limit: u64,
    sort_order: SortOrder,
    /// Summed member cost per instanced collection.
    collection_costs: FxHashMap<CollectionId, u64>,
}

impl Budgeter {
    /// Select the metric from configuration. Disabled budgeting selects the
    /// `None` metric: every cost is 0 and every filtered candidate passes.
    pub fn from_config(config: &CullConfig) -> Self {
        let (metric, limit) = if config.budget.enabled {
            (config.budget.metric, config.budget.limit())
        } else {
            (BudgetMetric::None, 0)
        };
        Self {
            metric,
            limit,
            sort_order: config.budget.sort_order,
            collection_costs: FxHashMap::default(),
        }
    }

    /// The active metric.
    pub fn metric(&self) -> BudgetMetric {
        self.metric
    }

    /// True when a real budget is being enforced.
    pub fn is_active(&self) -> bool {
        self.metric != BudgetMetric::None
    }

    /// The user-configured ceiling for the active metric.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Admission order for ranking.
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Cost of making `id` visible under the active metric.
    pub fn cost(&mut self, scene: &Scene, id: ObjectId) -> u64 {
        match self.metric {
            BudgetMetric::None => 0,
            BudgetMetric::Objects => 1,
            BudgetMetric::Vertices => self.geometry_cost(scene, id, &mut Vec::new()),
            BudgetMetric::Triangles => self.geometry_cost(scene, id, &mut Vec::new()),
        }
    }

    /// Human-readable description of the active budget, for status output.
    pub fn summary(&self) -> String {
        match self.metric {
            BudgetMetric::None => "show all visible objects".to_string(),
            BudgetMetric::Objects => {
                format!("only show up to {} objects", format_num(self.limit))
            }
            BudgetMetric::Vertices => {
                format!("only show up to {} vertices", format_num(self.limit))
            }
            BudgetMetric::Triangles => {
                format!("only show up to {} triangles", format_num(self.limit))
            }
        }
    }

    /// Vertex or triangle count for one object, recursing into instanced
    /// collections with per-collection memoization.
    fn geometry_cost(
        &mut self,
        scene: &Scene,
        id: ObjectId,
        visited: &mut Vec<CollectionId>,
    ) -> u64 {
        let Some(obj) = scene.object(id) else {
            return 0;
        };
        if obj.kind == ObjectKind::Mesh {
            return match self.metric {
                BudgetMetric::Vertices => {
                    obj.mesh.as_ref().map_or(0, |m| u64::from(m.vertex_count))
                }
                BudgetMetric::Triangles => match scene.evaluated_triangle_count(id) {
                    Ok(tris) => u64::from(tris),
                    Err(err) => {
                        // One bad mesh must not block the frame.
                        log::warn!("triangle evaluation failed, costing 0: {err}");
                        0
                    }
                },
                _ => 0,
            };
        }
        if let Some(coll_id) = obj.instances {
            return self.collection_cost(scene, coll_id, visited);
        }
        0
    }

    fn collection_cost(
        &mut self,
        scene: &Scene,
        coll_id: CollectionId,
        visited: &mut Vec<CollectionId>,
    ) -> u64 {
        if let Some(&cached) = self.collection_costs.get(&coll_id) {
            return cached;
        }
        let Some(coll) = scene.collection(coll_id) else {
            return 0;
        };
        if visited.contains(&coll_id) {
            log::warn!(
                "instancing cycle through collection '{}', costing 0",
                coll.name
            );
            return 0;
        }
        visited.push(coll_id);
        let total = coll
            .members
            .iter()
            .map(|&member| self.geometry_cost(scene, member, visited))
            .sum();
        visited.pop();
        self.collection_costs.insert(coll_id, total);
        total
    }
}
