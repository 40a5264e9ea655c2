//! # Driving control library.
//!
//! This library allows other crates in the workspace (and the integration
//! tests) to access the control modules defined inside the drive crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Adaptive cruise control module - modulates the target speed against objects on the path
pub mod acc;

/// Control command - the steering/throttle/brake demand sent to the actuator interface
pub mod cmd;

/// Control cycle - the per-tick orchestrator invoking the control modules in order
pub mod ctrl_cycle;

/// Data store - latches the most recent value of every asynchronous input feed
pub mod data_store;

/// Frame transform - world frame to vehicle body frame projection
pub mod frame;

/// Localisation interface - pose snapshots are produced externally
pub mod loc;

/// Path data - global and local paths driven by the vehicle
pub mod path;

/// Perception interface - tracked objects and their body frame projection
pub mod per;

/// Scenario definitions - scripted inputs for running without the simulator
pub mod scenario;

/// Longitudinal speed control module - PID tracker for the target speed
pub mod speed_ctrl;

/// Steering control module - pure pursuit lateral control
pub mod steer_ctrl;

/// Velocity planning module - curvature based speed profile over the global path
pub mod vel_plan;
