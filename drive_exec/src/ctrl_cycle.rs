//! # Control cycle
//!
//! The per-tick orchestrator. Each cycle it reads the latched inputs from
//! the data store and invokes the control modules in a fixed order:
//!
//! 1. project the tracked objects into the body frame;
//! 2. pure pursuit steering against the local path;
//! 3. look up the planned speed at the current waypoint;
//! 4. ACC selection and target speed against the projected objects;
//! 5. longitudinal PID on the resulting target.
//!
//! The cycle holds no control logic of its own beyond the input gate and
//! the one-shot velocity profile computation.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info};

// Internal
use crate::{
    acc::AccCtrl,
    cmd::CtrlCmd,
    data_store::DataStore,
    per,
    speed_ctrl::SpeedCtrl,
    steer_ctrl::{self, SteerCtrl},
    vel_plan::VelPlanner,
};
use util::{maths::ms_to_kmh, params};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The control cycle, owning every control module.
pub struct CtrlCycle {
    steer_ctrl: SteerCtrl,
    vel_planner: VelPlanner,
    speed_ctrl: SpeedCtrl,
    acc_ctrl: AccCtrl,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CtrlCycle {
    /// Initialise the control cycle and all its modules from their parameter
    /// files.
    pub fn init() -> Result<Self, params::LoadError> {
        Ok(Self {
            steer_ctrl: SteerCtrl::init("steer_ctrl.toml")?,
            vel_planner: VelPlanner::init("vel_plan.toml")?,
            speed_ctrl: SpeedCtrl::init("speed_ctrl.toml")?,
            acc_ctrl: AccCtrl::init("acc.toml")?,
        })
    }

    /// Create the cycle directly from already-built modules.
    pub fn new(
        steer_ctrl: SteerCtrl,
        vel_planner: VelPlanner,
        speed_ctrl: SpeedCtrl,
        acc_ctrl: AccCtrl,
    ) -> Self {
        Self {
            steer_ctrl,
            vel_planner,
            speed_ctrl,
            acc_ctrl,
        }
    }

    /// Execute one control cycle against the latched inputs.
    ///
    /// Until every input feed has been observed at least once no command is
    /// produced: the cycle is a safe no-op, explicitly distinct from
    /// emitting a zero or braking command.
    pub fn step(&mut self, ds: &mut DataStore) -> Option<CtrlCmd> {
        if !ds.inputs_ready() {
            debug!("Input feeds not yet complete, skipping cycle");
            return None;
        }

        // The gate above ensures every latch is populated
        let pose = *ds.ego_pose.as_ref()?;
        let ego_speed_ms = ds.ego_speed_ms?;
        let local_path = ds.local_path.clone()?;

        // The velocity profile is computed exactly once, on first
        // availability of the global path, and only read afterwards
        if ds.vel_profile.is_none() {
            let global_path = ds.global_path.as_ref()?;
            let profile = self.vel_planner.plan(global_path);

            info!("Velocity profile computed over {} waypoints", profile.len());

            ds.vel_profile = Some(profile);
        }

        // Objects are rebuilt in the body frame from scratch every cycle
        let objects = ds.objects.as_deref()?;
        let forward_objects = per::project_forward(&pose, objects);

        // Lateral control
        let (steer_output, steer_report) = self.steer_ctrl.proc(&steer_ctrl::InputData {
            pose,
            speed_ms: ego_speed_ms,
            local_path: local_path.clone(),
        });

        if steer_output.degraded {
            info!("No forward look-ahead point found");
        }

        ds.steer_output = steer_output;
        ds.steer_report = steer_report;

        // Planned speed at the current waypoint is the default ACC target
        let default_target_ms = match ds
            .global_path
            .as_ref()?
            .nearest_point_index(&pose.position_m)
        {
            Some(waypoint) => ds.vel_profile.as_ref()?.speed_at(waypoint),
            None => 0.0,
        };

        // Longitudinal control: ACC target in km/h, tracked by the PID in
        // km/h against the ego speed
        self.acc_ctrl
            .check_objects(&pose, &local_path, &forward_objects);
        let target_speed_kmh =
            self.acc_ctrl
                .get_target_speed(&forward_objects, ego_speed_ms, default_target_ms);

        let longitudinal_output = self
            .speed_ctrl
            .update(target_speed_kmh, ms_to_kmh(ego_speed_ms));

        let cmd = CtrlCmd::from_demands(steer_output.steering, longitudinal_output);
        ds.ctrl_cmd = Some(cmd);

        Some(cmd)
    }
}
