//! # Van Configurator Example
//!
//! Lays out a small van interior, then walks through the editor workflow:
//! select a piece of furniture with the transform gizmo, move and turn it, and
//! release it back into its cabinet group.
//!
//! Set `RUST_LOG=debug` to see hierarchy changes as they happen. Scene defaults
//! can be overridden with a config file named by `VANSCENE_CONFIG`.

use anyhow::Context;
use vanscene::prelude::*;

const MODELS: [(&str, [f64; 3]); 3] = [
    ("https://assets.vanscene.dev/models/bed.glb", [0.0, 0.4, -1.2]),
    ("https://assets.vanscene.dev/models/sink.glb", [0.9, 0.9, 0.6]),
    ("https://assets.vanscene.dev/models/fridge.glb", [-0.9, 0.0, 0.6]),
];

fn load_config() -> anyhow::Result<SceneConfig> {
    match std::env::var("VANSCENE_CONFIG") {
        Ok(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading scene config {path}"))?;
            text.parse::<SceneConfig>()
                .with_context(|| format!("parsing scene config {path}"))
        }
        Err(_) => Ok(SceneConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let scene = Scene::with_config(config);

    // Kitchen block: sink and fridge move together.
    let kitchen = scene.create_node(NodeKind::Group);
    kitchen.set_name("kitchen");
    scene.add(&kitchen);

    for (source, [x, y, z]) in MODELS {
        let model = scene.add_model(source, Vector3::new(x, y, z));
        if source.ends_with("sink.glb") || source.ends_with("fridge.glb") {
            kitchen.attach(&model);
        }
    }

    let camera = scene.create_node(NodeKind::Camera(Camera::new(60.0, 16.0 / 9.0, 0.05, 50.0)));
    camera.set_name("orbit");
    camera.set_position(Vector3::new(3.0, 2.0, 3.0));
    scene.add(&camera);
    camera.look_at(Vector3::new(0.0, 0.5, 0.0));

    let stats = scene.update();
    log::info!(
        "initial update: {} nodes visited, {} world matrices",
        stats.nodes_visited,
        stats.world_updates
    );

    let sink = scene
        .find_by_name("sink")
        .context("sink was placed above")?;
    log::info!("sink starts at {:?}", sink.world_position());

    let mut gizmo = TransformGizmo::new(&scene);
    gizmo.select(&sink);

    gizmo.drag(Vector3::new(0.0, 0.0, 1.0), 0.3);
    gizmo.set_mode(GizmoMode::Rotate);
    gizmo.drag(Vector3::new(0.0, 1.0, 0.0), std::f64::consts::FRAC_PI_2);
    scene.update();
    log::info!("sink dragged to {:?}", sink.world_position());

    gizmo.deselect();
    log::info!(
        "sink released under '{}' at local {:?}",
        sink.parent().map(|p| p.name()).unwrap_or_default(),
        sink.position()
    );

    // Slide the whole kitchen block toward the back doors.
    kitchen.translate_z(-0.5);
    scene.update();

    for uniform in scene.collect_visible() {
        let [x, y, z, _] = uniform.model[3];
        log::info!("draw at ({x:.2}, {y:.2}, {z:.2})");
    }

    let statistics = scene.get_statistics();
    log::info!(
        "{} nodes, {} models, deepest at level {}",
        statistics.node_count,
        statistics.model_count,
        statistics.max_depth
    );

    Ok(())
}
