//! Scene configuration
//!
//! Defaults applied to every node a [`Scene`](crate::gfx::scene::Scene) creates.
//! Built in code with `Default` plus `with_*` methods, or parsed from simple
//! `key = value` lines:
//!
//! ```text
//! # comments and blank lines are ignored
//! default_up = 0, 0, 1
//! matrix_auto_update = true
//! world_update = manual
//! rotation_order = YXZ
//! ```

use std::str::FromStr;

use cgmath::{InnerSpace, Vector3};

use crate::error::SceneError;
use crate::gfx::math::{RotationOrder, Vec3};
use crate::gfx::scene::WorldUpdate;

/// Per-node defaults for a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// Up vector new nodes use for `look_at`.
    pub default_up: Vec3,
    /// Whether new nodes recompute their local matrix from position/rotation/scale.
    pub matrix_auto_update: bool,
    /// Whether new nodes take part in the automatic per-frame world update.
    pub world_update: WorldUpdate,
    /// Order used for the Euler view of new nodes.
    pub rotation_order: RotationOrder,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            default_up: Vector3::new(0.0, 1.0, 0.0),
            matrix_auto_update: true,
            world_update: WorldUpdate::Auto,
            rotation_order: RotationOrder::Xyz,
        }
    }
}

impl SceneConfig {
    pub fn with_default_up(mut self, up: Vec3) -> Self {
        self.default_up = up;
        self
    }

    pub fn with_matrix_auto_update(mut self, enabled: bool) -> Self {
        self.matrix_auto_update = enabled;
        self
    }

    pub fn with_world_update(mut self, world_update: WorldUpdate) -> Self {
        self.world_update = world_update;
        self
    }

    pub fn with_rotation_order(mut self, order: RotationOrder) -> Self {
        self.rotation_order = order;
        self
    }
}

impl FromStr for SceneConfig {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config = SceneConfig::default();

        for (index, raw) in s.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parse_error = |message: String| SceneError::ConfigParse {
                line: line_no,
                message,
            };

            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| parse_error(format!("expected 'key = value', got '{line}'")))?;
            let (key, value) = (key.trim(), value.trim());

            match key {
                "default_up" => {
                    let parts = value
                        .split(',')
                        .map(|part| part.trim().parse::<f64>())
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(|e| parse_error(format!("default_up: {e}")))?;
                    let [x, y, z] = parts.as_slice() else {
                        return Err(parse_error(format!(
                            "default_up needs 3 components, got {}",
                            parts.len()
                        )));
                    };
                    let up = Vector3::new(*x, *y, *z);
                    if up.magnitude2() == 0.0 {
                        return Err(parse_error("default_up must not be the zero vector".into()));
                    }
                    config.default_up = up;
                }
                "matrix_auto_update" => {
                    config.matrix_auto_update = value
                        .parse::<bool>()
                        .map_err(|e| parse_error(format!("matrix_auto_update: {e}")))?;
                }
                "world_update" => {
                    config.world_update = match value.to_ascii_lowercase().as_str() {
                        "auto" => WorldUpdate::Auto,
                        "manual" => WorldUpdate::Manual,
                        other => {
                            return Err(parse_error(format!(
                                "world_update must be 'auto' or 'manual', got '{other}'"
                            )))
                        }
                    };
                }
                "rotation_order" => {
                    config.rotation_order = value
                        .parse::<RotationOrder>()
                        .map_err(|e| parse_error(e.to_string()))?;
                }
                other => {
                    log::warn!("config line {line_no}: ignoring unknown key '{other}'");
                }
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SceneConfig::default();
        assert_eq!(config.default_up, Vector3::new(0.0, 1.0, 0.0));
        assert!(config.matrix_auto_update);
        assert_eq!(config.world_update, WorldUpdate::Auto);
        assert_eq!(config.rotation_order, RotationOrder::Xyz);
    }

    #[test]
    fn test_parse_config() {
        let config: SceneConfig = "
            # van interior defaults
            default_up = 0, 0, 1
            matrix_auto_update = false
            world_update = Manual
            rotation_order = yxz
            shadow_quality = high
        "
        .parse()
        .unwrap();

        assert_eq!(config.default_up, Vector3::new(0.0, 0.0, 1.0));
        assert!(!config.matrix_auto_update);
        assert_eq!(config.world_update, WorldUpdate::Manual);
        assert_eq!(config.rotation_order, RotationOrder::Yxz);
    }

    #[test]
    fn test_parse_errors_report_line() {
        let err = "matrix_auto_update = true\nrotation_order = QRS"
            .parse::<SceneConfig>()
            .unwrap_err();
        assert!(matches!(err, SceneError::ConfigParse { line: 2, .. }));

        let err = "default_up = 1, 2".parse::<SceneConfig>().unwrap_err();
        assert!(matches!(err, SceneError::ConfigParse { line: 1, .. }));

        let err = "just words".parse::<SceneConfig>().unwrap_err();
        assert!(matches!(err, SceneError::ConfigParse { line: 1, .. }));
    }

    #[test]
    fn test_zero_default_up_is_rejected() {
        let err = "rotation_order = XYZ\ndefault_up = 0, 0, 0"
            .parse::<SceneConfig>()
            .unwrap_err();
        assert!(matches!(err, SceneError::ConfigParse { line: 2, .. }));
    }

    #[test]
    fn test_builder_methods() {
        let config = SceneConfig::default()
            .with_rotation_order(RotationOrder::Zxy)
            .with_world_update(WorldUpdate::Manual)
            .with_matrix_auto_update(false)
            .with_default_up(Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(config.rotation_order, RotationOrder::Zxy);
        assert_eq!(config.world_update, WorldUpdate::Manual);
        assert!(!config.matrix_auto_update);
        assert_eq!(config.default_up.z, 1.0);
    }
}
