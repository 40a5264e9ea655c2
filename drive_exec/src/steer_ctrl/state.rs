//! Steering control module state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use super::Params;
use crate::{frame::FrameTransform, loc::Pose, path::Path};
use util::params;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Steering control module state
pub struct SteerCtrl {
    params: Params,
}

/// Input data for one cycle of steering control.
#[derive(Clone, Default)]
pub struct InputData {
    /// The latest ego pose
    pub pose: Pose,

    /// The latest ego speed.
    ///
    /// Units: meters/second
    pub speed_ms: f64,

    /// The latest local path window
    pub local_path: Path,
}

/// Output demand from steering control.
#[derive(Debug, Copy, Clone, Default, Serialize)]
pub struct OutputData {
    /// Normalised steering demand in [-1, 1], positive to the left
    pub steering: f64,

    /// True if no forward look-ahead point was found. The steering demand is
    /// zeroed in this case and should be treated as a hold value, not a
    /// tracking demand.
    pub degraded: bool,
}

/// The status report containing monitoring quantities for the cycle.
#[derive(Debug, Copy, Clone, Default, Serialize)]
pub struct StatusReport {
    /// The look-ahead distance used this cycle, after clamping.
    pub lookahead_m: f64,

    /// True if the speed-proportional look-ahead hit one of its bounds.
    pub lookahead_limited: bool,

    /// True if a forward look-ahead point was found.
    pub forward_point_found: bool,

    /// The angle to the selected look-ahead point in the body frame.
    pub steering_angle_rad: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SteerCtrl {
    /// Initialise the steering control module.
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

    /// Process one cycle of steering control.
    pub fn proc(&mut self, input: &InputData) -> (OutputData, StatusReport) {
        let mut report = StatusReport::default();

        // Speed-proportional look-ahead, clamped to the configured bounds
        let raw_lookahead_m = input.speed_ms * self.params.lookahead_gain_s;
        let lookahead_m =
            raw_lookahead_m.clamp(self.params.min_lookahead_m, self.params.max_lookahead_m);

        report.lookahead_m = lookahead_m;
        report.lookahead_limited = raw_lookahead_m != lookahead_m;

        // Scan the local path in order for the first point ahead of the
        // vehicle at or beyond the look-ahead distance
        let transform = FrameTransform::new(&input.pose);
        let mut forward_point_m_body = None;

        for point_m in input.local_path.points_m.iter() {
            let point_m_body = transform.to_body(point_m);

            if point_m_body[0] > 0.0 && point_m_body.norm() >= lookahead_m {
                forward_point_m_body = Some(point_m_body);
                break;
            }
        }

        let output = match forward_point_m_body {
            Some(point_m_body) => {
                // The steering demand is the body frame angle to the point,
                // normalised by pi
                let steering_angle_rad = point_m_body[1].atan2(point_m_body[0]);

                report.forward_point_found = true;
                report.steering_angle_rad = steering_angle_rad;

                OutputData {
                    steering: steering_angle_rad / std::f64::consts::PI,
                    degraded: false,
                }
            }
            None => OutputData {
                steering: 0.0,
                degraded: true,
            },
        };

        (output, report)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use nalgebra::Vector2;

    fn test_params() -> Params {
        Params {
            lookahead_gain_s: 0.78,
            min_lookahead_m: 5.0,
            max_lookahead_m: 30.0,
            vehicle_wheelbase_m: 2.6,
        }
    }

    fn straight_path_ahead() -> Path {
        Path::from_points((0..100).map(|i| Vector2::new(i as f64, 0.0)).collect())
    }

    #[test]
    fn test_straight_path_zero_steering() {
        let mut ctrl = SteerCtrl::new(test_params());

        let (output, report) = ctrl.proc(&InputData {
            pose: Pose::default(),
            speed_ms: 10.0,
            local_path: straight_path_ahead(),
        });

        assert!(report.forward_point_found);
        assert!(!output.degraded);
        assert_approx_eq!(output.steering, 0.0);
    }

    #[test]
    fn test_left_curve_steers_left() {
        let mut ctrl = SteerCtrl::new(test_params());

        // Path curving towards +Y (the vehicle's left at zero heading)
        let path = Path::from_points(
            (0..100)
                .map(|i| {
                    let x = i as f64;
                    Vector2::new(x, 0.02 * x * x)
                })
                .collect(),
        );

        let (output, _) = ctrl.proc(&InputData {
            pose: Pose::default(),
            speed_ms: 10.0,
            local_path: path,
        });

        assert!(output.steering > 0.0);

        // Mirror path curving right
        let path = Path::from_points(
            (0..100)
                .map(|i| {
                    let x = i as f64;
                    Vector2::new(x, -0.02 * x * x)
                })
                .collect(),
        );

        let (output, _) = ctrl.proc(&InputData {
            pose: Pose::default(),
            speed_ms: 10.0,
            local_path: path,
        });

        assert!(output.steering < 0.0);
    }

    #[test]
    fn test_lookahead_clamped() {
        let mut ctrl = SteerCtrl::new(test_params());

        // Very slow: raw look-ahead 0.78 m clamps up to 5 m
        let (_, report) = ctrl.proc(&InputData {
            pose: Pose::default(),
            speed_ms: 1.0,
            local_path: straight_path_ahead(),
        });
        assert_approx_eq!(report.lookahead_m, 5.0);
        assert!(report.lookahead_limited);

        // Very fast: raw look-ahead 78 m clamps down to 30 m
        let (_, report) = ctrl.proc(&InputData {
            pose: Pose::default(),
            speed_ms: 100.0,
            local_path: straight_path_ahead(),
        });
        assert_approx_eq!(report.lookahead_m, 30.0);
        assert!(report.lookahead_limited);

        // In range: unclamped
        let (_, report) = ctrl.proc(&InputData {
            pose: Pose::default(),
            speed_ms: 10.0,
            local_path: straight_path_ahead(),
        });
        assert_approx_eq!(report.lookahead_m, 7.8);
        assert!(!report.lookahead_limited);
    }

    #[test]
    fn test_first_qualifying_point_wins() {
        let mut ctrl = SteerCtrl::new(test_params());

        // Two candidate points beyond the look-ahead; the nearer one (in
        // path order) must be selected even though the later one is further
        let path = Path::from_points(vec![
            Vector2::new(1.0, 0.0),
            Vector2::new(8.0, 2.0),
            Vector2::new(20.0, -10.0),
        ]);

        let (output, report) = ctrl.proc(&InputData {
            pose: Pose::default(),
            speed_ms: 10.0,
            local_path: path,
        });

        assert!(report.forward_point_found);
        assert_approx_eq!(report.steering_angle_rad, (2.0f64).atan2(8.0));
        assert!(output.steering > 0.0);
    }

    #[test]
    fn test_no_forward_point_degrades() {
        let mut ctrl = SteerCtrl::new(test_params());

        // All path points behind the vehicle
        let path = Path::from_points(vec![
            Vector2::new(-10.0, 0.0),
            Vector2::new(-20.0, 0.0),
        ]);

        let (output, report) = ctrl.proc(&InputData {
            pose: Pose::default(),
            speed_ms: 10.0,
            local_path: path,
        });

        assert!(output.degraded);
        assert!(!report.forward_point_found);
        assert_eq!(output.steering, 0.0);

        // Empty path degrades the same way
        let (output, _) = ctrl.proc(&InputData {
            pose: Pose::default(),
            speed_ms: 10.0,
            local_path: Path::new_empty(),
        });
        assert!(output.degraded);
    }
}
