//! # Steering control module
//!
//! Steering control keeps the vehicle on the local path using the pure
//! pursuit law: a look-ahead point is chosen on the path at a distance
//! proportional to the ego speed, and the steering demand is derived from
//! the angle to that point in the body frame.
//!
//! The look-ahead distance is clamped between configured minimum and maximum
//! bounds, so the tracked point neither collapses onto the vehicle at low
//! speed nor runs off the local window at high speed. The local path is
//! scanned in path order and the first point ahead of the vehicle at or
//! beyond the look-ahead distance wins.
//!
//! If no such point exists the module emits a zero steering demand and
//! flags the cycle as degraded so the caller can react.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::Params;
pub use state::*;
