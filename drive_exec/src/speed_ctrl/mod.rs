//! # Longitudinal speed control module
//!
//! A discrete PID controller tracking the target speed produced by the ACC
//! law. The controller runs on a fixed nominal control period rather than
//! measured elapsed time, matching the cyclic design of the exec.
//!
//! The integral accumulates unconditionally, with no windup clamp; the
//! configured integral gain is the only limit on its authority.

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
