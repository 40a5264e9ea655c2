//! # Control command
//!
//! The command emitted at the end of each control cycle and forwarded to the
//! actuator interface.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The actuation demand for one control cycle.
///
/// Throttle and brake are mutually exclusive: the sign of the longitudinal
/// controller output selects which one is driven, the other is zero.
#[derive(Debug, Copy, Clone, Default, Serialize)]
pub struct CtrlCmd {
    /// Normalised steering demand, -1 (full right) to +1 (full left)
    pub steering: f64,

    /// Normalised throttle demand, 0 to 1
    pub throttle: f64,

    /// Normalised brake demand, 0 to 1
    pub brake: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CtrlCmd {
    /// Build a command from the steering demand and the signed longitudinal
    /// controller output.
    ///
    /// A positive output drives the throttle, a non-positive output the
    /// brake. All channels are saturated into their normalised ranges.
    pub fn from_demands(steering: f64, longitudinal_output: f64) -> Self {
        let (throttle, brake) = if longitudinal_output > 0.0 {
            (longitudinal_output.min(1.0), 0.0)
        } else {
            (0.0, (-longitudinal_output).min(1.0))
        };

        Self {
            steering: steering.clamp(-1.0, 1.0),
            throttle,
            brake,
        }
    }

    /// Determine if the command is within its normalised ranges and has at
    /// most one of throttle/brake driven.
    pub fn is_valid(&self) -> bool {
        (-1.0..=1.0).contains(&self.steering)
            && (0.0..=1.0).contains(&self.throttle)
            && (0.0..=1.0).contains(&self.brake)
            && (self.throttle == 0.0 || self.brake == 0.0)
    }
}
