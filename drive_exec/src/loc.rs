//! # Localisation interface
//!
//! Pose snapshots are produced by the external localisation system and
//! latched by the data store once per cycle. This module only defines the
//! pose itself.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The current pose (position and heading in the world frame) of the ego
/// vehicle.
///
/// The heading is the angle between the vehicle's forward axis and the world
/// +X axis, positive anticlockwise, in radians.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize)]
pub struct Pose {
    /// The position in the world frame
    pub position_m: Vector2<f64>,

    /// The heading of the vehicle in the world frame
    pub heading_rad: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {
    pub fn new(position_m: Vector2<f64>, heading_rad: f64) -> Self {
        Self {
            position_m,
            heading_rad,
        }
    }

    /// Get the unit vector pointing in the vehicle's forward direction.
    pub fn forward(&self) -> Vector2<f64> {
        Vector2::new(self.heading_rad.cos(), self.heading_rad.sin())
    }
}
