//! One-time static geometry scan

use super::{add_actor, add_wall, BridgeCall, RecordingBridge};
use crate::core::config::GridConfig;
use crate::foundation::math::Vec3;
use crate::physics::{BroadPhase, ColliderComponent, CollisionShape};
use crate::scene::{GameObject, SceneTree};
use crate::spatial::{CellCoord, CollisionGrid};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_leaves_no_static_collider_registered() {
        let mut scene = SceneTree::new();
        let statics = scene.create_node("statics");
        for i in 0..10 {
            add_wall(&mut scene, statics, Vec3::new(i as f32 * 3.0, 0.0, 0.0));
        }
        let coin = scene.create_child(statics, "coin").unwrap();
        let coin_collider = scene
            .attach_collider(coin, ColliderComponent::new(CollisionShape::sphere(Vec3::zeros(), 0.4)))
            .unwrap();

        let mut broad_phase = BroadPhase::new();
        broad_phase.register_scene(&scene);
        assert_eq!(broad_phase.registered_count(), 11);

        let mut grid = CollisionGrid::new(&mut broad_phase).with_root(statics);
        grid.step(&scene);

        assert!(grid.is_initialized());
        assert_eq!(grid.metrics().static_colliders, 10);
        assert_eq!(grid.metrics().registered_colliders, 0);
        // Spheres are not static geometry
        assert_eq!(broad_phase.registered().collect::<Vec<_>>(), vec![coin_collider]);
    }

    #[test]
    fn test_scan_buckets_by_world_position() {
        let mut scene = SceneTree::new();
        let map = GameObject::new("map")
            .with_position(Vec3::new(0.0, -1.5, 50.0))
            .with_child(
                GameObject::new("room")
                    .with_position(Vec3::new(-10.0, 0.0, 0.0))
                    .with_child(
                        GameObject::new("wall")
                            .with_position(Vec3::new(1.0, 2.0, 3.0))
                            .with_collider(ColliderComponent::new(CollisionShape::aabb(Vec3::new(2.0, 2.0, 2.0)))),
                    ),
            );
        let root = scene.instantiate(None, map).unwrap();

        let mut grid = CollisionGrid::new(RecordingBridge::default()).with_root(root);
        grid.step(&scene);

        // World position (-9, 0.5, 53)
        assert_eq!(grid.colliders_in(CellCoord::new(-2, 0, 6)).len(), 1);
        assert_eq!(grid.metrics().occupied_cells, 1);
    }

    #[test]
    fn test_negative_positions_floor_into_negative_cells() {
        let mut scene = SceneTree::new();
        let statics = scene.create_node("statics");
        let wall = add_wall(&mut scene, statics, Vec3::new(-0.5, 0.0, 0.0));

        let mut grid = CollisionGrid::new(RecordingBridge::default()).with_root(statics);
        grid.step(&scene);

        assert_eq!(grid.cell_of(Vec3::new(-0.5, 0.0, 0.0)), CellCoord::new(-1, 0, 0));
        assert_eq!(grid.colliders_in(CellCoord::new(-1, 0, 0)), &[wall]);
        assert!(grid.colliders_in(CellCoord::ORIGIN).is_empty());
    }

    #[test]
    fn test_scan_waits_for_root() {
        let mut scene = SceneTree::new();
        let statics = scene.create_node("statics");
        let wall = add_wall(&mut scene, statics, Vec3::new(2.0, 2.0, 2.0));
        let actor = add_actor(&mut scene, Vec3::new(1.0, 1.0, 1.0));

        let mut grid = CollisionGrid::new(RecordingBridge::default());
        grid.register_dynamic(actor);

        let report = grid.step(&scene);
        assert!(!grid.is_initialized());
        assert_eq!(report.cells_entered, 27);
        assert_eq!(report.colliders_enabled, 0);

        grid.set_root(statics);
        let report = grid.step(&scene);

        assert!(grid.is_initialized());
        assert_eq!(grid.root(), Some(statics));
        assert_eq!(grid.bridge().calls, vec![BridgeCall::Unregister(wall), BridgeCall::Register(wall)]);
        assert_eq!(report.colliders_enabled, 1);
        assert!(grid.is_registered(wall));
    }

    #[test]
    fn test_scan_on_step_without_actors_resets_activation() {
        let mut scene = SceneTree::new();
        let statics = scene.create_node("statics");
        let wall = add_wall(&mut scene, statics, Vec3::new(2.0, 2.0, 2.0));
        let actor = add_actor(&mut scene, Vec3::new(1.0, 1.0, 1.0));

        let mut grid = CollisionGrid::new(RecordingBridge::default());
        grid.register_dynamic(actor);
        grid.step(&scene);
        assert_eq!(grid.active_cells().len(), 27);

        // Scan happens on a step that short-circuits
        grid.unregister_dynamic(actor);
        grid.set_root(statics);
        assert!(grid.step(&scene).skipped);
        assert!(grid.is_initialized());
        assert!(grid.active_cells().is_empty());

        grid.register_dynamic(actor);
        let report = grid.step(&scene);

        let cell = grid.cell_of(Vec3::new(2.0, 2.0, 2.0));
        assert!(grid.active_cells().contains(&cell));
        assert!(grid.is_registered(wall));
        assert_eq!(report.cells_entered, 27);
        assert_eq!(report.colliders_enabled, 1);
        assert_eq!(grid.bridge().calls, vec![BridgeCall::Unregister(wall), BridgeCall::Register(wall)]);
    }

    #[test]
    fn test_unresolved_root_is_retried() {
        let mut scene = SceneTree::new();
        let stale = scene.create_node("stale");
        scene.despawn(stale);

        let mut grid = CollisionGrid::new(RecordingBridge::default()).with_root(stale);
        grid.step(&scene);
        assert!(!grid.is_initialized());

        let statics = scene.create_node("statics");
        let wall = add_wall(&mut scene, statics, Vec3::zeros());
        grid.set_root(statics);
        grid.step(&scene);

        assert!(grid.is_initialized());
        assert_eq!(grid.colliders_in(CellCoord::ORIGIN), &[wall]);
    }

    #[test]
    fn test_scan_runs_once() {
        let mut scene = SceneTree::new();
        let statics = scene.create_node("statics");
        add_wall(&mut scene, statics, Vec3::zeros());
        let actor = add_actor(&mut scene, Vec3::zeros());

        let config = GridConfig::default().with_active_radius(0);
        let mut grid = CollisionGrid::with_config(config, RecordingBridge::default())
            .unwrap()
            .with_root(statics);
        grid.register_dynamic(actor);
        grid.step(&scene);
        grid.bridge_mut().take();

        // Added after the scan: never bucketed, never activated
        let late = add_wall(&mut scene, statics, Vec3::new(1.0, 1.0, 1.0));
        let other_root = scene.create_node("other");
        grid.set_root(other_root);
        grid.step(&scene);

        assert_eq!(grid.colliders_in(CellCoord::ORIGIN).len(), 1);
        assert!(!grid.is_registered(late));
        assert!(grid.bridge().calls.is_empty());
        assert_eq!(grid.metrics().static_colliders, 1);
    }
}
