//! Steering control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for steering control
#[derive(Deserialize, Debug, Clone)]
pub struct Params {
    /// Look-ahead distance per unit of ego speed.
    ///
    /// Units: seconds (look-ahead = speed * gain)
    pub lookahead_gain_s: f64,

    /// Minimum look-ahead distance.
    ///
    /// Units: meters
    pub min_lookahead_m: f64,

    /// Maximum look-ahead distance.
    ///
    /// Units: meters
    pub max_lookahead_m: f64,

    /// Distance between the front and rear axles.
    ///
    /// Units: meters
    pub vehicle_wheelbase_m: f64,
}
