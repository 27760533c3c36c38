use serde::Deserialize;

use crate::data::{BlendMode, BlendTree, ChildMotion, Motion, Vec2};
use crate::error::BlendError;

/// Parse a stored blend tree (editor export format, camelCase keys) into a
/// [`BlendTree`] whose payloads are clip names or nested trees.
///
/// Notes:
/// - `blendType` accepts `simple1d`, `freeformCartesian2d` and `freeformDirectional2d`.
/// - Each child names exactly one of `clip` or `tree`.
/// - Missing `threshold`/`position` default to zero; bounds default to [0,1].
/// - Every nested tree must have at least one child.
pub fn parse_blend_tree_json(s: &str) -> Result<BlendTree<Motion<String>>, BlendError> {
    let stored: StoredTree =
        serde_json::from_str(s).map_err(|e| BlendError::Parse(format!("parse error: {e}")))?;
    let tree = to_core_tree(stored)?;
    tree.validate()?;
    for child in &tree.children {
        child.motion.validate()?;
    }
    Ok(tree)
}

fn to_core_tree(stored: StoredTree) -> Result<BlendTree<Motion<String>>, BlendError> {
    let mode = match stored.blend_type {
        StoredBlendType::Simple1d => BlendMode::OneDimensional,
        StoredBlendType::FreeformCartesian2d => BlendMode::Cartesian2D,
        StoredBlendType::FreeformDirectional2d => BlendMode::Directional2D,
    };

    let mut children = Vec::with_capacity(stored.children.len());
    for (idx, child) in stored.children.into_iter().enumerate() {
        let motion = match (child.clip, child.tree) {
            (Some(clip), None) => Motion::Clip(clip),
            (None, Some(tree)) => Motion::Tree(Box::new(to_core_tree(*tree)?)),
            (Some(_), Some(_)) => {
                return Err(BlendError::Parse(format!(
                    "child {idx} of '{}' names both a clip and a tree",
                    stored.name
                )))
            }
            (None, None) => {
                return Err(BlendError::Parse(format!(
                    "child {idx} of '{}' has no motion",
                    stored.name
                )))
            }
        };
        let position = child
            .position
            .map(|p| Vec2::new(p.x as f32, p.y as f32))
            .unwrap_or_default();
        children.push(ChildMotion {
            motion,
            threshold: child.threshold as f32,
            position,
        });
    }

    Ok(BlendTree {
        mode,
        min_threshold: stored.min_threshold as f32,
        max_threshold: stored.max_threshold as f32,
        children,
    })
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTree {
    #[serde(default)]
    name: String,
    blend_type: StoredBlendType,
    #[serde(default)]
    min_threshold: f64,
    #[serde(default = "one")]
    max_threshold: f64,
    children: Vec<StoredChild>,
}

fn one() -> f64 {
    1.0
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
enum StoredBlendType {
    Simple1d,
    FreeformCartesian2d,
    FreeformDirectional2d,
}

#[derive(Debug, Deserialize)]
struct StoredChild {
    #[serde(default)]
    clip: Option<String>,
    #[serde(default)]
    tree: Option<Box<StoredTree>>,
    #[serde(default)]
    threshold: f64,
    #[serde(default)]
    position: Option<StoredVec2>,
}

#[derive(Debug, Copy, Clone, Deserialize)]
struct StoredVec2 {
    x: f64,
    y: f64,
}
