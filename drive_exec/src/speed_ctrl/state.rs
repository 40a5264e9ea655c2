//! Longitudinal speed control module state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::Params;
use util::params;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Longitudinal speed control module state
pub struct SpeedCtrl {
    params: Params,

    /// The integral accumulation
    integral: f64,

    /// Previous error, for the derivative term
    prev_error: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SpeedCtrl {
    /// Initialise the speed control module.
    ///
    /// Expected init data is the path to the parameter file.
    pub fn init(params_path: &str) -> Result<Self, params::LoadError> {
        Ok(Self::new(params::load(params_path)?))
    }

    /// Create the module directly from a parameter set.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            integral: 0.0,
            prev_error: 0.0,
        }
    }

    /// Get the controller output for one cycle.
    ///
    /// Target and current speed must be in the same unit; the output is a
    /// signed demand where positive drives the throttle and non-positive the
    /// brake. The nominal control period is used for the integral and
    /// derivative terms regardless of the real elapsed time.
    pub fn update(&mut self, target_speed: f64, current_speed: f64) -> f64 {
        let error = target_speed - current_speed;

        let p_term = self.params.k_p * error;

        self.integral += error * self.params.control_period_s;

        let d_term =
            self.params.k_d * (error - self.prev_error) / self.params.control_period_s;

        let output = p_term + self.params.k_i * self.integral + d_term;

        self.prev_error = error;

        output
    }
}
