//! # Frame transform
//!
//! Homogeneous 2D transform between the world frame and the vehicle body
//! frame. The body frame has its origin at the reference position with the
//! +X axis pointing along the reference heading.
//!
//! The same transform is used by steering control to project the local path
//! and by the perception interface to project tracked objects; the two call
//! sites are independent of each other.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::{Matrix3, Vector2, Vector3};

// Internal
use crate::loc::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A world frame to body frame transform for a given reference pose.
#[derive(Debug, Clone)]
pub struct FrameTransform {
    /// Homogeneous world to body matrix
    world_to_body: Matrix3<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl FrameTransform {
    /// Build the transform for the given reference pose.
    ///
    /// The body to world transform is a rotation by the heading followed by a
    /// translation to the reference position; its inverse is formed
    /// analytically (transposed rotation block, rotated negated translation)
    /// rather than through a runtime matrix inversion.
    pub fn new(reference: &Pose) -> Self {
        let (sin_h, cos_h) = reference.heading_rad.sin_cos();
        let trans_m = reference.position_m;

        let world_to_body = Matrix3::new(
            cos_h,
            sin_h,
            -(cos_h * trans_m[0] + sin_h * trans_m[1]),
            -sin_h,
            cos_h,
            sin_h * trans_m[0] - cos_h * trans_m[1],
            0.0,
            0.0,
            1.0,
        );

        Self { world_to_body }
    }

    /// Express a world frame point in the body frame.
    pub fn to_body(&self, point_m: &Vector2<f64>) -> Vector2<f64> {
        let body = self.world_to_body * Vector3::new(point_m[0], point_m[1], 1.0);
        Vector2::new(body[0], body[1])
    }
}
