//! AABB collider wrapping a transformable object

use thiserror::Error;

use super::Aabb;
use crate::foundation::math::{Mat4, Point3};

/// Errors raised when building a collider
#[derive(Error, Debug)]
pub enum ColliderError {
    /// The wrapped geometry had no points to bound
    #[error("collider needs at least one point of geometry to bound")]
    EmptyGeometry,
}

/// Per-object collision volume
///
/// Holds the object's local-space geometry bounds and the world-space AABB
/// derived from them. `update_aabb` must be called whenever the object's world
/// transform changes; for static objects the local bounds are computed once,
/// for dynamic ones they are re-derived from the stored points on every
/// update.
#[derive(Debug, Clone)]
pub struct Collider {
    is_static: bool,
    local_points: Vec<Point3>,
    local_bounds: Aabb,
    aabb: Aabb,
}

impl Collider {
    /// Create a collider around the given local-space points
    ///
    /// `is_static` marks objects that never rotate, translate or scale after
    /// setup. The initial world AABB equals the local bounds (identity
    /// transform) until the first `update_aabb` call.
    pub fn new(is_static: bool, local_points: Vec<Point3>) -> Result<Self, ColliderError> {
        let local_bounds = Aabb::from_points(&local_points).ok_or(ColliderError::EmptyGeometry)?;

        Ok(Self {
            is_static,
            local_points,
            local_bounds,
            aabb: local_bounds,
        })
    }

    /// True when the object was declared immovable
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Recompute the world-space AABB from the object's world matrix
    pub fn update_aabb(&mut self, world: &Mat4) {
        if !self.is_static {
            // dynamic objects re-derive their local bounds each frame
            if let Some(bounds) = Aabb::from_points(&self.local_points) {
                self.local_bounds = bounds;
            }
        }

        self.aabb = self.local_bounds.transformed(world);
    }

    /// The current world-space box
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// AABB overlap test against another collider's box
    pub fn is_colliding_with(&self, other: &Aabb) -> bool {
        self.aabb.intersects(other)
    }
}
