//! The cull session: owns every cache, runs the per-frame pipeline.

use rustc_hash::{FxHashMap, FxHashSet};

use vantage_config::{BudgetMetric, CullConfig};
use vantage_scene::{ObjectId, ObjectKind, Scene, ViewContext};

use crate::allocator::{CandidateEntry, allocate, rank};
use crate::bounds::BoundsCache;
use crate::budget::Budgeter;
use crate::error::CullError;
use crate::reconcile::{Transition, reconcile};
use crate::resolver::instanced_members;
use crate::stats::FrameStats;
use crate::visibility::is_candidate_visible;

/// One frame's decisions: the transitions the host should apply, plus
/// summary counts.
#[derive(Clone, Debug, Default)]
pub struct FrameResult {
    pub transitions: Vec<Transition>,
    pub stats: FrameStats,
}

/// One continuous culling run.
///
/// All caches (bounding-box shapes, collection cost sums) are built at
/// session start and owned by the session; ending the session releases
/// them. Geometry edits during a session are only reflected through the
/// per-frame world-matrix reapplication; box shapes and cost totals stay
/// frozen until the next session.
pub struct CullSession {
    config: CullConfig,
    bounds: BoundsCache,
    budgeter: Budgeter,
    /// Id-ordered candidate list; the stable downstream sort makes the
    /// admitted prefix deterministic for equal sort keys.
    candidates: Vec<ObjectId>,
    costs: FxHashMap<ObjectId, u64>,
    ended: bool,
}

impl CullSession {
    /// Validate the configuration, resolve the candidate set, and pre-build
    /// the bounding-box and cost caches.
    ///
    /// Fails fast on an unusable configuration. Objects whose bounding box
    /// cannot be computed (instancing cycles) are dropped from the
    /// candidate set with a diagnostic instead of failing the session.
    pub fn begin(scene: &Scene, config: CullConfig) -> Result<Self, CullError> {
        config.validate()?;

        let excluded: FxHashSet<ObjectId> = if config.exclude_instanced_members {
            instanced_members(scene)
        } else {
            FxHashSet::default()
        };
        let enabled: FxHashSet<ObjectKind> = config.enabled_kinds.iter().copied().collect();

        let mut candidates: Vec<ObjectId> = scene
            .objects()
            .filter(|o| {
                enabled.contains(&o.kind) && !o.viewport_disabled && !excluded.contains(&o.id)
            })
            .map(|o| o.id)
            .collect();
        candidates.sort_unstable();

        let mut bounds = BoundsCache::new(config.min_box_size);
        candidates.retain(|&id| match bounds.local_box(scene, id) {
            Ok(_) => true,
            Err(err) => {
                log::warn!("dropping candidate {id}: {err}");
                false
            }
        });

        let mut budgeter = Budgeter::from_config(&config);
        let costs: FxHashMap<ObjectId, u64> = candidates
            .iter()
            .map(|&id| (id, budgeter.cost(scene, id)))
            .collect();

        log::info!(
            "cull session ready: {} candidates, {}",
            candidates.len(),
            budgeter.summary()
        );

        Ok(Self {
            config,
            bounds,
            budgeter,
            candidates,
            costs,
            ended: false,
        })
    }

    /// Run one frame: filter, rank, allocate, reconcile. Pure decision;
    /// the host applies the returned transitions.
    pub fn step(&mut self, scene: &Scene, view: &ViewContext) -> FrameResult {
        if self.ended {
            log::warn!("step called on an ended session");
            return FrameResult::default();
        }

        let objects_metric = self.budgeter.metric() == BudgetMetric::Objects;
        let mut entries: Vec<CandidateEntry> = Vec::with_capacity(self.candidates.len());
        let mut rejected: Vec<ObjectId> = Vec::new();

        for &id in &self.candidates {
            let world = match self.bounds.world_box(scene, id) {
                Ok(b) => b,
                Err(err) => {
                    log::warn!("skipping {id} this frame: {err}");
                    continue;
                }
            };
            if !is_candidate_visible(view, &world, self.config.max_distance) {
                rejected.push(id);
                continue;
            }
            let mut distance = world.min_distance(view.position);
            if objects_metric && let Some(obj) = scene.object(id) {
                // Non-mesh objects can have synthetic boxes; including the
                // origin keeps the distance ranking meaningful for them.
                distance = distance.min(obj.origin().distance(view.position));
            }
            entries.push(CandidateEntry {
                id,
                cost: self.costs.get(&id).copied().unwrap_or(0),
                distance,
            });
        }

        rank(&mut entries, &self.budgeter);
        let split = allocate(&entries, &self.budgeter);

        let admitted: Vec<ObjectId> = entries[..split].iter().map(|e| e.id).collect();
        let budget_used: u64 = entries[..split].iter().map(|e| e.cost).sum();
        rejected.extend(entries[split..].iter().map(|e| e.id));

        let transitions = reconcile(scene, &admitted, &rejected);

        let mut stats = FrameStats {
            candidates: self.candidates.len(),
            visible: entries.len(),
            admitted: split,
            budget_used,
            ..FrameStats::default()
        };
        for t in &transitions {
            match t.action {
                crate::reconcile::VisibilityAction::Show => stats.shown += 1,
                crate::reconcile::VisibilityAction::Hide => stats.hidden += 1,
            }
        }
        log::debug!("{}", stats.summary());

        FrameResult { transitions, stats }
    }

    /// Human-readable description of the active budget.
    pub fn budget_summary(&self) -> String {
        self.budgeter.summary()
    }

    /// Number of objects under evaluation.
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Mark the session ended. Further steps return empty results; the
    /// caches are released when the session is dropped.
    pub fn end(&mut self) {
        if !self.ended {
            self.ended = true;
            log::info!("cull session ended");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use vantage_config::SortOrder;
    use vantage_scene::{MeshStats, Object, Viewport};

    use crate::reconcile::{VisibilityAction, apply_transitions};

    fn mesh_at(id: u32, pos: Vec3, verts: u32) -> Object {
        Object::mesh(
            ObjectId(id),
            format!("mesh{id}"),
            MeshStats {
                vertex_count: verts,
                evaluated_triangles: Some(verts * 2),
            },
        )
        .at(pos)
    }

    fn forward_view() -> ViewContext {
        ViewContext::perspective(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            std::f32::consts::FRAC_PI_2,
            Viewport {
                width: 800.0,
                height: 600.0,
            },
            0.1,
            10_000.0,
        )
    }

    /// Three meshes ahead of the camera at increasing depth; max distance
    /// 10 always hides the far one, and an object budget of 1 keeps only
    /// the nearest of the rest.
    #[test]
    fn test_distance_and_object_budget_scenario() {
        let mut scene = Scene::new();
        let near = scene.add_object(mesh_at(1, Vec3::new(0.0, 0.0, -2.0), 10));
        let mid = scene.add_object(mesh_at(2, Vec3::new(0.0, 0.0, -5.0), 10));
        let far = scene.add_object(mesh_at(3, Vec3::new(0.0, 0.0, -50.0), 10));

        let mut config = CullConfig::default();
        config.max_distance = 10.0;
        config.budget.enabled = true;
        config.budget.metric = BudgetMetric::Objects;
        config.budget.max_objects = 1;

        let mut session = CullSession::begin(&scene, config).unwrap();
        let result = session.step(&scene, &forward_view());

        let hidden: Vec<ObjectId> = result
            .transitions
            .iter()
            .filter(|t| t.action == VisibilityAction::Hide)
            .map(|t| t.object)
            .collect();
        assert!(hidden.contains(&far), "far object must always be hidden");
        assert!(hidden.contains(&mid), "budget of 1 keeps only the nearest");
        assert!(!hidden.contains(&near));
        assert_eq!(result.stats.admitted, 1);
    }

    #[test]
    fn test_step_is_idempotent_after_apply() {
        let mut scene = Scene::new();
        scene.add_object(mesh_at(1, Vec3::new(0.0, 0.0, -2.0), 10));
        scene.add_object(mesh_at(2, Vec3::new(0.0, 0.0, -50.0), 10));

        let mut config = CullConfig::default();
        config.max_distance = 10.0;

        let mut session = CullSession::begin(&scene, config).unwrap();
        let view = forward_view();

        let first = session.step(&scene, &view);
        assert!(!first.transitions.is_empty());
        apply_transitions(&mut scene, &first.transitions);

        let second = session.step(&scene, &view);
        assert!(second.transitions.is_empty());
    }

    #[test]
    fn test_hidden_object_restored_when_relevant_again() {
        let mut scene = Scene::new();
        let id = scene.add_object(mesh_at(1, Vec3::new(0.0, 0.0, -2.0), 10));
        scene.set_hidden(id, true).unwrap();

        let mut session = CullSession::begin(&scene, CullConfig::default()).unwrap();
        let result = session.step(&scene, &forward_view());
        assert_eq!(
            result.transitions,
            vec![Transition {
                object: id,
                action: VisibilityAction::Show
            }]
        );
    }

    #[test]
    fn test_vertex_budget_prefers_cheap_meshes() {
        let mut scene = Scene::new();
        // Same distance band, different vertex counts.
        scene.add_object(mesh_at(1, Vec3::new(-2.0, 0.0, -5.0), 100));
        let pricey = scene.add_object(mesh_at(2, Vec3::new(2.0, 0.0, -5.0), 900));

        let mut config = CullConfig::default();
        config.budget.enabled = true;
        config.budget.metric = BudgetMetric::Vertices;
        config.budget.max_vertices = 500;
        config.budget.sort_order = SortOrder::Ascending;

        let mut session = CullSession::begin(&scene, config).unwrap();
        let result = session.step(&scene, &forward_view());

        let hidden: Vec<ObjectId> = result
            .transitions
            .iter()
            .filter(|t| t.action == VisibilityAction::Hide)
            .map(|t| t.object)
            .collect();
        assert_eq!(hidden, vec![pricey]);
        assert_eq!(result.stats.budget_used, 100);
    }

    #[test]
    fn test_disabled_kinds_are_not_candidates() {
        let mut scene = Scene::new();
        scene.add_object(mesh_at(1, Vec3::new(0.0, 0.0, -2.0), 10));
        scene.add_object(
            Object::point(ObjectId(2), "cam", ObjectKind::Camera).at(Vec3::new(0.0, 0.0, -90.0)),
        );

        let session = CullSession::begin(&scene, CullConfig::default()).unwrap();
        // Camera kind is not in the default enabled set.
        assert_eq!(session.candidate_count(), 1);
    }

    #[test]
    fn test_instanced_members_excluded_from_candidates() {
        let mut scene = Scene::new();
        let member = scene.add_object(mesh_at(1, Vec3::new(0.0, 0.0, -2.0), 10));
        let coll = scene.add_collection("props", Vec3::ZERO, vec![member]);
        scene.add_object(Object::instancer(ObjectId(2), "inst", coll));

        let session = CullSession::begin(&scene, CullConfig::default()).unwrap();
        // Only the instancer remains; the member is evaluated through it.
        assert_eq!(session.candidate_count(), 1);

        let mut config = CullConfig::default();
        config.exclude_instanced_members = false;
        let session = CullSession::begin(&scene, config).unwrap();
        assert_eq!(session.candidate_count(), 2);
    }

    #[test]
    fn test_invalid_config_fails_session_start() {
        let scene = Scene::new();
        let mut config = CullConfig::default();
        config.budget.enabled = true;
        config.budget.metric = BudgetMetric::None;

        assert!(matches!(
            CullSession::begin(&scene, config),
            Err(CullError::Config(_))
        ));
    }

    #[test]
    fn test_cyclic_instancer_dropped_not_fatal() {
        let mut scene = Scene::new();
        let a = scene.add_object(Object::point(ObjectId(1), "a", ObjectKind::Empty));
        let coll = scene.add_collection("selfref", Vec3::ZERO, vec![a]);
        scene.object_mut(a).unwrap().instances = Some(coll);
        scene.add_object(mesh_at(2, Vec3::new(0.0, 0.0, -2.0), 10));

        let mut config = CullConfig::default();
        config.exclude_instanced_members = false;
        let session = CullSession::begin(&scene, config).unwrap();
        // The cyclic instancer is dropped with a diagnostic; the mesh stays.
        assert_eq!(session.candidate_count(), 1);
    }

    #[test]
    fn test_ended_session_steps_empty() {
        let mut scene = Scene::new();
        scene.add_object(mesh_at(1, Vec3::new(0.0, 0.0, -2.0), 10));

        let mut session = CullSession::begin(&scene, CullConfig::default()).unwrap();
        session.end();
        let result = session.step(&scene, &forward_view());
        assert!(result.transitions.is_empty());
        assert_eq!(result.stats, FrameStats::default());
    }
}
