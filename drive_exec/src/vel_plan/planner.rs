//! Velocity planner implementation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use nalgebra::{Matrix3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

// Internal
use super::{Params, GRAVITY_MS2, STOP_ZONE_LEN};
use crate::path::Path;
use util::params;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Velocity planning module state
pub struct VelPlanner {
    params: Params,
}

/// A per-waypoint speed profile, index-aligned with the global path.
///
/// The profile is computed once and shared read-only with every subsequent
/// cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VelProfile {
    /// Planned speed at each waypoint.
    ///
    /// Units: meters/second
    pub speeds_ms: Vec<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl VelProfile {
    pub fn len(&self) -> usize {
        self.speeds_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speeds_ms.is_empty()
    }

    /// Get the planned speed at the given waypoint.
    ///
    /// Indices beyond the end of the profile read as stopped.
    pub fn speed_at(&self, index: usize) -> f64 {
        self.speeds_ms.get(index).copied().unwrap_or(0.0)
    }
}

impl VelPlanner {
    /// Initialise the velocity planning module.
    ///
    /// Expected init data is the path to the parameter file.
    pub fn init(params_path: &str) -> Result<Self, params::LoadError> {
        Ok(Self {
            params: params::load(params_path)?,
        })
    }

    /// Create the module directly from a parameter set.
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    /// Plan the speed profile for the given global path.
    ///
    /// The profile always has exactly one entry per path point. Zones, from
    /// the end of the path backwards:
    ///   - the last [`STOP_ZONE_LEN`] waypoints are held at zero;
    ///   - the waypoints within one fit window of the end run at the fixed
    ///     approach speed;
    ///   - the waypoints within one fit window of the start run at cruise
    ///     (no full window fits there);
    ///   - every other waypoint is bounded by the cornering speed of the
    ///     circle fitted to its window.
    pub fn plan(&self, global_path: &Path) -> VelProfile {
        let num_points = global_path.get_num_points();
        let half_width = self.params.window_half_width;

        let mut speeds_ms = Vec::with_capacity(num_points);

        for i in 0..num_points {
            let speed_ms = if i + STOP_ZONE_LEN >= num_points {
                0.0
            } else if i + half_width >= num_points {
                self.params.approach_speed_ms
            } else if i < half_width {
                self.params.max_speed_ms
            } else {
                self.window_speed(&global_path.points_m[i - half_width..i + half_width])
            };

            speeds_ms.push(speed_ms);
        }

        debug!(
            "Velocity profile planned over {} waypoints ({} in stop zone)",
            num_points,
            num_points.min(STOP_ZONE_LEN)
        );

        VelProfile { speeds_ms }
    }

    /// Get the admissible speed for one fit window.
    ///
    /// Near-colinear windows make the fit singular or ill-conditioned; those
    /// windows are treated as straight road and run at cruise speed rather
    /// than failing the plan.
    fn window_speed(&self, window_m: &[Vector2<f64>]) -> f64 {
        match fit_circle_radius(window_m) {
            Some(radius_m) => {
                let corner_speed_ms = (radius_m * GRAVITY_MS2 * self.params.road_friction).sqrt();
                corner_speed_ms.min(self.params.max_speed_ms)
            }
            None => self.params.max_speed_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Fit a circle to the given points by linear least squares, returning its
/// radius.
///
/// Solves the system `-2x*a - 2y*b + c = -(x^2 + y^2)` in the least squares
/// sense through its normal equations, using a QR decomposition rather than
/// an explicit inverse. Returns `None` when the system is singular or the
/// fitted radius is not a positive finite number.
fn fit_circle_radius(points_m: &[Vector2<f64>]) -> Option<f64> {
    let mut at_a = Matrix3::<f64>::zeros();
    let mut at_b = Vector3::<f64>::zeros();

    for point_m in points_m {
        let x = point_m[0];
        let y = point_m[1];

        let row = Vector3::new(-2.0 * x, -2.0 * y, 1.0);
        let rhs = -(x * x) - (y * y);

        at_a += row * row.transpose();
        at_b += row * rhs;
    }

    let solution = at_a.qr().solve(&at_b)?;

    // Circle centre is (a, b), radius^2 = a^2 + b^2 - c
    let radius_sq_m = solution[0] * solution[0] + solution[1] * solution[1] - solution[2];

    if radius_sq_m.is_finite() && radius_sq_m > 0.0 {
        Some(radius_sq_m.sqrt())
    } else {
        None
    }
}
