//! # Data Store
//!
//! The data store latches the most recent value of every asynchronous input
//! feed and carries the per-cycle outputs of the control modules. Feeds are
//! latched with most-recent-value semantics: a new sample replaces the old
//! one, nothing is queued and nothing blocks.
//!
//! The control cycle refuses to run until every required feed has delivered
//! at least one sample.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use crate::{
    cmd::CtrlCmd,
    loc::Pose,
    path::Path,
    per::TrackedObject,
    steer_ctrl,
    vel_plan::VelProfile,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    // Input latches (most-recent-value)
    /// The latest ego pose from the localisation feed
    pub ego_pose: Option<Pose>,

    /// The latest ego scalar speed, in m/s
    pub ego_speed_ms: Option<f64>,

    /// The global path. Delivered exactly once and never mutated afterwards.
    pub global_path: Option<Path>,

    /// The latest local path window
    pub local_path: Option<Path>,

    /// The latest tracked object list
    pub objects: Option<Vec<TrackedObject>>,

    // Derived set-once data
    /// The velocity profile, computed once when the global path first
    /// becomes available and read-only afterwards.
    pub vel_profile: Option<VelProfile>,

    // Per-cycle module outputs
    pub steer_output: steer_ctrl::OutputData,
    pub steer_report: steer_ctrl::StatusReport,

    /// The command emitted this cycle, or `None` if the cycle was skipped.
    pub ctrl_cmd: Option<CtrlCmd>,

    // Monitoring counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Determine whether every required input feed has been observed at
    /// least once.
    pub fn inputs_ready(&self) -> bool {
        self.ego_pose.is_some()
            && self.ego_speed_ms.is_some()
            && self.global_path.is_some()
            && self.local_path.is_some()
            && self.objects.is_some()
    }

    /// Perform actions required at the start of a cycle.
    ///
    /// Clears the per-cycle outputs; the input latches keep their most
    /// recent values.
    pub fn cycle_start(&mut self) {
        self.steer_output = steer_ctrl::OutputData::default();
        self.steer_report = steer_ctrl::StatusReport::default();
        self.ctrl_cmd = None;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_inputs_ready_requires_all_feeds() {
        let mut ds = DataStore::default();
        assert!(!ds.inputs_ready());

        ds.ego_pose = Some(Pose::default());
        ds.ego_speed_ms = Some(0.0);
        ds.global_path = Some(Path::new_empty());
        ds.local_path = Some(Path::new_empty());
        assert!(!ds.inputs_ready());

        ds.objects = Some(Vec::new());
        assert!(ds.inputs_ready());
    }

    #[test]
    fn test_cycle_start_keeps_latches() {
        let mut ds = DataStore::default();
        ds.ego_pose = Some(Pose::default());
        ds.ctrl_cmd = Some(CtrlCmd::default());

        ds.cycle_start();

        // Outputs cleared, latches untouched
        assert!(ds.ctrl_cmd.is_none());
        assert!(ds.ego_pose.is_some());
    }
}
