//! Query values driving a resolve call.

use serde::{Deserialize, Serialize};

use crate::data::Vec2;

/// Current blend parameter values supplied by the host animation driver.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Query {
    /// Normalized state time; scaled by the largest child threshold.
    OneDimensional { normalized_time: f32 },
    /// Blend parameter pair (x, y) for Cartesian and Directional trees.
    TwoDimensional { x: f32, y: f32 },
}

impl Query {
    pub fn normalized(normalized_time: f32) -> Self {
        Query::OneDimensional { normalized_time }
    }

    pub fn point(x: f32, y: f32) -> Self {
        Query::TwoDimensional { x, y }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Query::OneDimensional { .. } => "one-dimensional",
            Query::TwoDimensional { .. } => "two-dimensional",
        }
    }

    pub(crate) fn as_point(&self) -> Option<Vec2> {
        match *self {
            Query::TwoDimensional { x, y } => Some(Vec2::new(x, y)),
            Query::OneDimensional { .. } => None,
        }
    }
}
