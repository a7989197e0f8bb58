//! Synthetic scene construction for the demo.

use glam::Vec3;

use vantage_scene::{MeshStats, Object, ObjectId, ObjectKind, Scene};

/// Build a test scene: a `grid` x `grid` field of meshes with varying
/// vertex counts, a handful of lights, and a prop collection instanced at
/// two corners of the field.
pub fn build(grid: u32) -> Scene {
    let mut scene = Scene::new();
    let mut next_id = 0u32;
    let mut id = || {
        next_id += 1;
        ObjectId(next_id)
    };

    let spacing = 4.0;
    let half = (grid as f32 - 1.0) * spacing * 0.5;

    for gx in 0..grid {
        for gz in 0..grid {
            let pos = Vec3::new(
                gx as f32 * spacing - half,
                0.0,
                gz as f32 * spacing - half,
            );
            // Vertex counts vary across the grid so vertex/triangle budgets
            // have something to rank.
            let verts = 100 + (gx * 37 + gz * 91) % 4000;
            scene.add_object(
                Object::mesh(
                    id(),
                    format!("grid_{gx}_{gz}"),
                    MeshStats {
                        vertex_count: verts,
                        evaluated_triangles: Some(verts * 2),
                    },
                )
                .at(pos),
            );
        }
    }

    for i in 0..4 {
        let angle = i as f32 * std::f32::consts::FRAC_PI_2;
        scene.add_object(
            Object::point(id(), format!("light_{i}"), ObjectKind::Light)
                .at(Vec3::new(half * angle.cos(), 8.0, half * angle.sin())),
        );
    }

    // A small prop collection instanced at two corners of the field.
    let prop_a = scene.add_object(
        Object::mesh(
            id(),
            "prop_a",
            MeshStats {
                vertex_count: 2500,
                evaluated_triangles: Some(5000),
            },
        )
        .at(Vec3::new(0.0, 1.0, 0.0)),
    );
    let prop_b = scene.add_object(
        Object::mesh(
            id(),
            "prop_b",
            MeshStats {
                vertex_count: 800,
                evaluated_triangles: Some(1600),
            },
        )
        .at(Vec3::new(2.0, 0.0, 0.0)),
    );
    let props = scene.add_collection("props", Vec3::ZERO, vec![prop_a, prop_b]);

    scene.add_object(
        Object::instancer(id(), "props_ne", props).at(Vec3::new(half + 6.0, 0.0, half + 6.0)),
    );
    scene.add_object(
        Object::instancer(id(), "props_sw", props).at(Vec3::new(-half - 6.0, 0.0, -half - 6.0)),
    );

    scene
}
