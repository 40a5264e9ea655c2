//! Adaptive cruise control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for adaptive cruise control
#[derive(Deserialize, Debug, Clone)]
pub struct Params {
    /// Gain on the relative velocity of the followed object.
    pub velocity_gain: f64,

    /// Gain on the gap error between the safety gap and the measured
    /// distance.
    pub distance_gain: f64,

    /// Time gap maintained to the followed object.
    ///
    /// Units: seconds
    pub time_gap_s: f64,

    /// Distance maintained to the followed object at standstill.
    ///
    /// Units: meters
    pub default_gap_m: f64,

    /// Lateral corridor half-width around the local path within which an
    /// object counts as on the path.
    ///
    /// Units: meters
    pub corridor_threshold_m: f64,
}
