//! Editor workflow checks: place models, reparent them and drive them with
//! the transform gizmo.

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn random_transform(node: &SceneNode, rng: &mut StdRng) {
        node.set_position(Vector3::new(
            rng.random_range(-3.0..3.0),
            rng.random_range(-3.0..3.0),
            rng.random_range(-3.0..3.0),
        ));
        node.set_rotation(Euler::new(
            rng.random_range(-3.0..3.0),
            rng.random_range(-1.5..1.5),
            rng.random_range(-3.0..3.0),
            RotationOrder::ALL[rng.random_range(0..6)],
        ));
        let uniform = rng.random_range(0.5..2.0);
        node.set_scale(Vector3::new(uniform, uniform, uniform));
    }

    #[test]
    fn test_nested_translation_composes() {
        init_logging();
        let scene = Scene::new();
        let a = scene.create_node(NodeKind::Group);
        let b = scene.create_node(NodeKind::Group);
        a.set_position(Vector3::new(1.0, 0.0, 0.0));
        b.set_position(Vector3::new(0.0, 1.0, 0.0));
        scene.add(&a);
        a.add(&b);

        scene.update();
        assert!(Vec3::from_matrix_position(&b.world_matrix())
            .approx_eq(&Vector3::new(1.0, 1.0, 0.0), 1e-12));
    }

    #[test]
    fn test_gizmo_attach_keeps_world_position() {
        init_logging();
        let scene = Scene::new();
        let model = scene.add_model("models/wardrobe.glb", Vector3::new(2.0, 0.0, 0.0));
        let mut gizmo = TransformGizmo::new(&scene);
        scene.update();

        assert!(gizmo.select(&model));
        scene.update();

        assert!(model.position().approx_eq(&Vector3::new(0.0, 0.0, 0.0), 1e-12));
        assert!(model
            .world_position()
            .approx_eq(&Vector3::new(2.0, 0.0, 0.0), 1e-12));
    }

    #[test]
    fn test_select_drag_release_round_trip() {
        init_logging();
        let scene = Scene::new();
        let cabinets = scene.create_node(NodeKind::Group);
        cabinets.set_position(Vector3::new(0.0, 0.0, -2.0));
        cabinets.rotate_y(std::f64::consts::FRAC_PI_2);
        scene.add(&cabinets);

        let drawer = scene.add_model("models/drawer.glb", Vector3::new(0.0, 0.0, 0.0));
        cabinets.add(&drawer);
        drawer.set_position(Vector3::new(1.0, 0.5, 0.0));
        scene.update();
        let start = drawer.world_position();

        let mut gizmo = TransformGizmo::new(&scene);
        gizmo.select(&drawer);
        gizmo.drag(Vector3::new(0.0, 1.0, 0.0), 0.25);
        scene.update();
        assert!(drawer
            .world_position()
            .approx_eq(&(start + Vector3::new(0.0, 0.25, 0.0)), 1e-9));

        assert_eq!(gizmo.deselect(), Some(drawer.clone()));
        assert_eq!(drawer.parent(), Some(cabinets.clone()));
        scene.update();
        assert!(drawer
            .world_position()
            .approx_eq(&(start + Vector3::new(0.0, 0.25, 0.0)), 1e-9));
        // Back in cabinet space the lift is along the cabinet's own +Y.
        assert!(drawer
            .position()
            .approx_eq(&Vector3::new(1.0, 0.75, 0.0), 1e-9));
    }

    #[test]
    fn test_every_node_has_at_most_one_parent() {
        init_logging();
        let scene = Scene::new();
        let groups: Vec<SceneNode> = (0..3)
            .map(|_| {
                let group = scene.create_node(NodeKind::Group);
                scene.add(&group);
                group
            })
            .collect();
        let lamp = scene.add_model("models/lamp.glb", Vector3::new(0.0, 2.0, 0.0));

        for group in &groups {
            group.add(&lamp);
            group.attach(&lamp);
        }

        let mut owners = 0;
        scene.root().traverse(|node| {
            owners += node.children().iter().filter(|c| **c == lamp).count();
        });
        assert_eq!(owners, 1);
        assert_eq!(lamp.parent(), Some(groups[2].clone()));
    }

    #[test]
    fn test_removing_twice_changes_nothing() {
        init_logging();
        let scene = Scene::new();
        let bed = scene.add_model("models/bed.glb", Vector3::new(0.0, 0.0, 0.0));
        let before = scene.root().child_count();

        assert!(scene.remove(&bed));
        assert!(!scene.remove(&bed));
        assert_eq!(scene.root().child_count(), before - 1);
        assert_eq!(bed.parent(), None);
    }

    #[test]
    fn test_world_matrices_are_transitive() {
        init_logging();
        let mut rng = StdRng::seed_from_u64(2024);
        let scene = Scene::new();

        let mut chain = vec![scene.root().clone()];
        for _ in 0..5 {
            let node = scene.create_node(NodeKind::Group);
            if let Some(parent) = chain.last() {
                parent.add(&node);
            }
            chain.push(node);
        }

        for _ in 0..20 {
            for node in &chain[1..] {
                random_transform(node, &mut rng);
            }
            scene.update();

            let mut expected = chain[0].world_matrix();
            for node in &chain[1..] {
                expected = expected * node.local_matrix();
                assert!(node.world_matrix().approx_eq(&expected, 1e-9));
            }
        }
    }

    #[test]
    fn test_attach_preserves_pose_under_random_parents() {
        init_logging();
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..25 {
            let scene = Scene::new();
            let from = scene.create_node(NodeKind::Group);
            let to = scene.create_node(NodeKind::Group);
            let item = scene.create_node(NodeKind::Model {
                source: "models/crate.glb".to_string(),
            });
            scene.add(&from);
            scene.add(&to);
            from.add(&item);
            for node in [&from, &to, &item] {
                random_transform(node, &mut rng);
            }
            scene.update();
            let before = item.world_matrix();

            assert!(to.attach(&item));
            scene.update();
            assert!(item.world_matrix().approx_eq(&before, 1e-8));
        }
    }

    #[test]
    fn test_cycles_are_rejected_and_logged() {
        init_logging();
        let scene = Scene::new();
        let outer = scene.create_node(NodeKind::Group);
        let inner = scene.create_node(NodeKind::Group);
        scene.add(&outer);
        outer.add(&inner);

        assert!(!inner.add(&outer));
        assert!(matches!(
            inner.try_add(&outer),
            Err(SceneError::CyclicHierarchy { .. })
        ));
        assert!(!scene.root().add(scene.root()));
        assert_eq!(outer.parent().as_ref(), Some(scene.root()));
    }

    #[test]
    fn test_camera_follows_its_rig() {
        init_logging();
        let scene = Scene::new();
        let rig = scene.create_node(NodeKind::Group);
        let camera = scene.create_node(NodeKind::Camera(Camera::default()));
        scene.add(&rig);
        rig.add(&camera);
        camera.set_position(Vector3::new(0.0, 1.5, 4.0));
        camera.look_at(Vector3::new(0.0, 1.5, 0.0));

        rig.translate_x(3.0);
        scene.update();

        let view = camera.camera_settings().map(|c| c.view_matrix());
        let eye_in_view = view.map(|v| camera.world_position().apply_matrix4(&v));
        assert!(eye_in_view
            .is_some_and(|p| p.approx_eq(&Vector3::new(0.0, 0.0, 0.0), 1e-9)));
    }
}
