//! # Adaptive cruise control module
//!
//! The ACC law modulates the planned target speed against objects detected
//! on the driven path. It runs in two phases each cycle:
//!
//! 1. **Selection** — for each object class, find the object that both lies
//!    within a lateral corridor around the local path and is the nearest
//!    candidate seen so far across every class. The result is a per-class
//!    `{in_path, index}` selection, the only state this module carries
//!    between phases.
//! 2. **Target speed** — starting from the planned speed at the current
//!    waypoint, apply the car-following law to each selected class in the
//!    fixed order vehicle, pedestrian, static obstacle. Each selected class
//!    overwrites the result, so the last class in the order takes
//!    precedence.
//!
//! The law itself keeps a safety gap proportional to the ego speed:
//! `accel = rel_vel * velocity_gain - distance_gain * (safe_gap - rel_dist)`
//! so a slow or close object pulls the target below the ego speed, while a
//! faster, distant one lets the target recover towards the plan.

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
