//! Velocity planning parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for velocity planning
#[derive(Deserialize, Debug, Clone)]
pub struct Params {
    /// Cruise speed limit of the profile.
    ///
    /// Units: meters/second
    pub max_speed_ms: f64,

    /// Friction coefficient of the road surface, bounding lateral grip.
    pub road_friction: f64,

    /// Half-width of the curvature fit window. A waypoint `i` is fitted
    /// against the points `[i - w, i + w)`.
    pub window_half_width: usize,

    /// Fixed speed of the deceleration zone just before the stop zone.
    ///
    /// Units: meters/second
    pub approach_speed_ms: f64,
}
