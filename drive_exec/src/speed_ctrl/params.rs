//! Longitudinal speed control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for longitudinal speed control
#[derive(Deserialize, Debug, Clone)]
pub struct Params {
    /// Proportional gain
    pub k_p: f64,

    /// Integral gain
    pub k_i: f64,

    /// Derivative gain
    pub k_d: f64,

    /// Nominal control period used for the integral and derivative terms.
    ///
    /// Units: seconds
    pub control_period_s: f64,
}
