use super::kind::NodeKind;
use super::node::SceneNode;
use super::propagation::UpdateStats;
use super::uniform::NodeUniform;
use crate::config::SceneConfig;
use crate::gfx::math::Vec3;

/// A scene: one root node plus the defaults applied to new nodes.
pub struct Scene {
    root: SceneNode,
    config: SceneConfig,
}

impl Scene {
    /// Creates an empty scene with default configuration
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    pub fn with_config(config: SceneConfig) -> Self {
        let root = SceneNode::with_config(NodeKind::Group, &config);
        root.set_name("scene");
        Self { root, config }
    }

    pub fn root(&self) -> &SceneNode {
        &self.root
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Creates a detached node with this scene's defaults
    pub fn create_node(&self, kind: NodeKind) -> SceneNode {
        SceneNode::with_config(kind, &self.config)
    }

    /// Adds a node directly under the root
    pub fn add(&self, node: &SceneNode) -> bool {
        self.root.add(node)
    }

    pub fn remove(&self, node: &SceneNode) -> bool {
        self.root.remove(node)
    }

    /// Places a model under the root
    ///
    /// The node is named after the file stem of `source`, made unique within
    /// the scene.
    ///
    /// # Arguments
    /// * `source` - Path or URL the model geometry comes from
    /// * `position` - Initial position in root space
    pub fn add_model(&self, source: &str, position: Vec3) -> SceneNode {
        let node = self.create_node(NodeKind::Model {
            source: source.to_string(),
        });
        node.set_name(self.ensure_unique_name(model_stem(source)));
        node.set_position(position);
        self.root.add(&node);
        log::info!("placed model '{}' from {source}", node.name());
        node
    }

    /// Per-frame update of every world matrix
    pub fn update(&self) -> UpdateStats {
        let stats = self.root.propagate_world_matrix(false);
        log::trace!(
            "scene update: visited {} nodes, recomputed {} world matrices",
            stats.nodes_visited,
            stats.world_updates
        );
        stats
    }

    /// Uniform data for every visible model, in traversal order
    pub fn collect_visible(&self) -> Vec<NodeUniform> {
        let mut uniforms = Vec::new();
        self.root.traverse_visible(|node| {
            if node.kind().is_renderable() {
                uniforms.push(node.uniform());
            }
        });
        uniforms
    }

    pub fn find_by_name(&self, name: &str) -> Option<SceneNode> {
        self.root.find_by_name(name)
    }

    pub fn find_by_id(&self, id: u64) -> Option<SceneNode> {
        self.root.find_by_id(id)
    }

    /// Names of all model nodes
    pub fn get_object_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.root.traverse(|node| {
            if node.kind().is_renderable() {
                names.push(node.name());
            }
        });
        names
    }

    /// Gets scene statistics
    pub fn get_statistics(&self) -> SceneStatistics {
        let mut stats = SceneStatistics::default();
        self.root.traverse(|node| {
            stats.node_count += 1;
            stats.max_depth = stats.max_depth.max(node.depth());
            match node.kind() {
                NodeKind::Model { .. } => stats.model_count += 1,
                NodeKind::Camera(_) => stats.camera_count += 1,
                NodeKind::Group | NodeKind::Helper => {}
            }
        });
        stats
    }

    /// Returns `desired_name`, or `desired_name (n)` if that is already taken
    pub fn ensure_unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.root.find_by_name(&test_name).is_some() {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }

        test_name
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

fn model_stem(source: &str) -> &str {
    let file = source.rsplit(['/', '\\']).next().unwrap_or(source);
    let stem = file.split('.').next().unwrap_or(file);
    if stem.is_empty() {
        "model"
    } else {
        stem
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub node_count: usize,
    pub model_count: usize,
    pub camera_count: usize,
    /// Depth of the deepest node; the root is at depth zero.
    pub max_depth: usize,
}
