//! # Velocity planning module
//!
//! Velocity planning turns the global path into a per-waypoint speed
//! profile, computed exactly once when the global path first becomes
//! available and treated as immutable afterwards.
//!
//! For each interior waypoint a circle is fitted by linear least squares to
//! the surrounding window of path points; the admissible speed is bounded by
//! the lateral grip available on that circle (`sqrt(r * g * mu)`) and by
//! the configured cruise speed. The head of the path runs at cruise (no
//! full window fits there), the tail decelerates to a fixed approach speed
//! and the final waypoints form a stop zone at zero speed.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod planner;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::Params;
pub use planner::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of waypoints at the end of the path held at zero speed.
pub const STOP_ZONE_LEN: usize = 10;

/// Gravitational acceleration used by the cornering speed bound.
///
/// Units: meters/second^2
pub const GRAVITY_MS2: f64 = 9.8;
