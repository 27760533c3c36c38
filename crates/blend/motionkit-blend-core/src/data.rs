//! Blend-tree data model.
//!
//! Trees are immutable value objects built by the caller per query. The motion
//! payload `M` is opaque to the resolver: a clip handle, an index, or a nested
//! [`Motion`].

use serde::{Deserialize, Serialize};

use crate::error::BlendError;

/// 2D vector used for child positions and 2-D query points.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BlendMode {
    #[serde(rename = "one_dimensional")]
    OneDimensional,
    #[serde(rename = "cartesian_2d")]
    Cartesian2D,
    #[serde(rename = "directional_2d")]
    Directional2D,
}

impl BlendMode {
    #[inline]
    pub fn is_two_dimensional(self) -> bool {
        matches!(self, BlendMode::Cartesian2D | BlendMode::Directional2D)
    }
}

/// One entry of a blend tree. Only `threshold` (1-D) or `position` (2-D) is
/// meaningful, depending on the owning tree's mode.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChildMotion<M> {
    pub motion: M,
    #[serde(default)]
    pub threshold: f32,
    #[serde(default)]
    pub position: Vec2,
}

impl<M> ChildMotion<M> {
    pub fn at_threshold(motion: M, threshold: f32) -> Self {
        Self {
            motion,
            threshold,
            position: Vec2::default(),
        }
    }

    pub fn at_position(motion: M, x: f32, y: f32) -> Self {
        Self {
            motion,
            threshold: 0.0,
            position: Vec2::new(x, y),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BlendTree<M> {
    pub mode: BlendMode,
    /// Lower clamp for the 1-D target value.
    #[serde(default)]
    pub min_threshold: f32,
    /// Authored upper bound; the resolver derives its own maximum from the children.
    #[serde(default = "default_max_threshold")]
    pub max_threshold: f32,
    pub children: Vec<ChildMotion<M>>,
}

fn default_max_threshold() -> f32 {
    1.0
}

impl<M> BlendTree<M> {
    pub fn one_dimensional(children: Vec<ChildMotion<M>>) -> Self {
        let max_threshold = children
            .iter()
            .map(|c| c.threshold)
            .fold(f32::NEG_INFINITY, f32::max);
        let min_threshold = children
            .iter()
            .map(|c| c.threshold)
            .fold(f32::INFINITY, f32::min);
        Self {
            mode: BlendMode::OneDimensional,
            min_threshold: if min_threshold.is_finite() { min_threshold } else { 0.0 },
            max_threshold: if max_threshold.is_finite() { max_threshold } else { 1.0 },
            children,
        }
    }

    pub fn two_dimensional(mode: BlendMode, children: Vec<ChildMotion<M>>) -> Self {
        Self {
            mode,
            min_threshold: 0.0,
            max_threshold: 1.0,
            children,
        }
    }

    pub fn with_min_threshold(mut self, min_threshold: f32) -> Self {
        self.min_threshold = min_threshold;
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn validate(&self) -> Result<(), BlendError> {
        if self.is_empty() {
            return Err(BlendError::EmptyTree);
        }
        Ok(())
    }
}

/// Motion payload that is either a leaf clip or a nested blend tree.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Motion<C> {
    Clip(C),
    Tree(Box<BlendTree<Motion<C>>>),
}

impl<C> Motion<C> {
    /// First clip reachable depth-first, following children in declaration order.
    pub fn first_clip(&self) -> Option<&C> {
        match self {
            Motion::Clip(clip) => Some(clip),
            Motion::Tree(tree) => tree.children.iter().find_map(|c| c.motion.first_clip()),
        }
    }

    pub fn as_tree(&self) -> Option<&BlendTree<Motion<C>>> {
        match self {
            Motion::Tree(tree) => Some(tree),
            Motion::Clip(_) => None,
        }
    }

    /// Validate this motion and every nested tree.
    pub fn validate(&self) -> Result<(), BlendError> {
        match self {
            Motion::Clip(_) => Ok(()),
            Motion::Tree(tree) => {
                tree.validate()?;
                tree.children.iter().try_for_each(|c| c.motion.validate())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_dimensional_derives_bounds_from_children() {
        let tree = BlendTree::one_dimensional(vec![
            ChildMotion::at_threshold("b", 2.0),
            ChildMotion::at_threshold("a", -1.0),
        ]);
        assert_eq!(tree.min_threshold, -1.0);
        assert_eq!(tree.max_threshold, 2.0);
        assert_eq!(tree.mode, BlendMode::OneDimensional);
    }

    #[test]
    fn two_dimensional_modes() {
        assert!(!BlendMode::OneDimensional.is_two_dimensional());
        assert!(BlendMode::Cartesian2D.is_two_dimensional());
        assert!(BlendMode::Directional2D.is_two_dimensional());
    }

    #[test]
    fn empty_tree_fails_validation() {
        let tree: BlendTree<u32> = BlendTree::one_dimensional(Vec::new());
        assert_eq!(tree.validate(), Err(BlendError::EmptyTree));
    }

    #[test]
    fn first_clip_walks_nested_trees() {
        let inner = BlendTree::two_dimensional(
            BlendMode::Directional2D,
            vec![
                ChildMotion::at_position(Motion::Clip("left"), -1.0, 0.0),
                ChildMotion::at_position(Motion::Clip("right"), 1.0, 0.0),
            ],
        );
        let outer = Motion::Tree(Box::new(BlendTree::one_dimensional(vec![
            ChildMotion::at_threshold(Motion::Tree(Box::new(inner)), 0.0),
            ChildMotion::at_threshold(Motion::Clip("land"), 1.0),
        ])));
        assert_eq!(outer.first_clip(), Some(&"left"));
        assert!(outer.validate().is_ok());
    }

    #[test]
    fn nested_empty_tree_fails_validation() {
        let empty: BlendTree<Motion<&str>> = BlendTree::one_dimensional(Vec::new());
        let outer = Motion::Tree(Box::new(BlendTree::one_dimensional(vec![
            ChildMotion::at_threshold(Motion::Tree(Box::new(empty)), 0.0),
        ])));
        assert_eq!(outer.first_clip(), None);
        assert_eq!(outer.validate(), Err(BlendError::EmptyTree));
    }

    #[test]
    fn blend_mode_json_names() {
        let json = serde_json::to_string(&BlendMode::Cartesian2D).unwrap();
        assert_eq!(json, "\"cartesian_2d\"");
        let mode: BlendMode = serde_json::from_str("\"one_dimensional\"").unwrap();
        assert_eq!(mode, BlendMode::OneDimensional);
    }
}
