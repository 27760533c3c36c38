//! Blend weight resolution.
//!
//! 1-D trees interpolate between the two thresholds bracketing the scaled
//! target; 2-D trees weight every child by inverse distance to the query
//! point. Raw weights are then normalized to sum to one. Every call is
//! independent and allocation is limited to the returned weight vector.

use serde::{Deserialize, Serialize};

use crate::config::ResolverConfig;
use crate::data::{BlendMode, BlendTree, ChildMotion, Vec2};
use crate::error::BlendError;
use crate::math::{approximately, clamp01, distance, inverse_lerp};
use crate::query::Query;

/// Normalized per-child weights, indexed like `BlendTree::children`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct WeightResult {
    pub weights: Vec<f32>,
}

impl WeightResult {
    #[inline]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.weights.get(index).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.weights.iter().copied().enumerate()
    }

    /// Accumulated in f64 so long weight lists do not drift.
    pub fn sum(&self) -> f32 {
        self.weights.iter().map(|w| *w as f64).sum::<f64>() as f32
    }

    pub fn is_normalized(&self, tolerance: f32) -> bool {
        (self.sum() - 1.0).abs() <= tolerance
    }

    /// Index of the heaviest child; the first one wins on ties.
    pub fn dominant(&self) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, w) in self.iter() {
            if best.map_or(true, |(_, bw)| w > bw) {
                best = Some((i, w));
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Resolve with [`ResolverConfig::default`].
pub fn resolve<M>(tree: &BlendTree<M>, query: &Query) -> Result<WeightResult, BlendError> {
    resolve_with(&ResolverConfig::default(), tree, query)
}

pub fn resolve_with<M>(
    cfg: &ResolverConfig,
    tree: &BlendTree<M>,
    query: &Query,
) -> Result<WeightResult, BlendError> {
    if let Err(err) = tree.validate() {
        log::debug!("resolve: rejected blend tree without children");
        return Err(err);
    }

    let raw = match (tree.mode, query) {
        (BlendMode::OneDimensional, Query::OneDimensional { normalized_time }) => {
            one_dimensional_weights(tree, *normalized_time)
        }
        (mode, Query::TwoDimensional { .. }) if mode.is_two_dimensional() => {
            // as_point is Some for every two-dimensional query
            let target = query.as_point().unwrap_or_default();
            two_dimensional_weights(&tree.children, target, cfg.distance_epsilon)
        }
        (mode, query) => {
            return Err(BlendError::ModeMismatch {
                mode,
                query: query.label(),
            })
        }
    };

    let result = normalize(raw)?;
    if !result.is_normalized(cfg.normalization_tolerance) {
        log::warn!(
            "resolve: {} weights sum to {} (tolerance {})",
            result.len(),
            result.sum(),
            cfg.normalization_tolerance
        );
    }
    Ok(result)
}

/// Engine clamp semantics: the lower bound is checked first, so an inverted
/// range never panics.
#[inline]
fn clamp_unordered(v: f32, min: f32, max: f32) -> f32 {
    if v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}

fn one_dimensional_weights<M>(tree: &BlendTree<M>, normalized_time: f32) -> Vec<f32> {
    let max_threshold = tree
        .children
        .iter()
        .map(|c| c.threshold)
        .fold(f32::NEG_INFINITY, f32::max);
    let target = clamp_unordered(
        normalized_time * max_threshold,
        tree.min_threshold,
        max_threshold,
    );

    // Strict comparisons keep the first child seen at an extreme threshold.
    let mut lower: Option<f32> = None;
    let mut upper: Option<f32> = None;
    for child in &tree.children {
        let t = child.threshold;
        if t <= target && lower.map_or(true, |lo| t > lo) {
            lower = Some(t);
        }
        if t >= target && upper.map_or(true, |hi| t < hi) {
            upper = Some(t);
        }
    }

    tree.children
        .iter()
        .map(|child| match (lower, upper) {
            (Some(lo), Some(hi)) => {
                if approximately(child.threshold, lo) {
                    1.0 - inverse_lerp(lo, hi, target)
                } else if approximately(child.threshold, hi) {
                    inverse_lerp(lo, hi, target)
                } else {
                    0.0
                }
            }
            _ => {
                if approximately(target, child.threshold) {
                    1.0
                } else {
                    0.0
                }
            }
        })
        .collect()
}

fn two_dimensional_weights<M>(children: &[ChildMotion<M>], target: Vec2, epsilon: f32) -> Vec<f32> {
    children
        .iter()
        .map(|child| clamp01(1.0 / (distance(target, child.position) + epsilon)))
        .collect()
}

/// Total and division run in f64; f32 accumulation drifts past the
/// normalization tolerance once a tree has many small weights.
fn normalize(mut weights: Vec<f32>) -> Result<WeightResult, BlendError> {
    let total: f64 = weights.iter().map(|w| *w as f64).sum();
    if !(total > 0.0) || !total.is_finite() {
        log::error!(
            "resolve: degenerate blend over {} children (raw total {total})",
            weights.len()
        );
        return Err(BlendError::DegenerateBlend {
            total: total as f32,
        });
    }
    for w in &mut weights {
        *w = (*w as f64 / total) as f32;
    }
    Ok(WeightResult { weights })
}
