//! # Scenario definitions
//!
//! A scenario is a JSON description of the inputs the middleware would
//! normally deliver: the global path, the tracked objects and the initial
//! ego state. Scenarios let the exec run the full control stack without the
//! external simulator attached.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

// Internal
use crate::{loc::Pose, path::Path, per::TrackedObject};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A scripted run of the control stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// The ego pose at the start of the run
    pub start_pose: Pose,

    /// The ego speed at the start of the run.
    ///
    /// Units: meters/second
    pub start_speed_ms: f64,

    /// The global path, delivered to the stack once at startup
    pub global_path: Path,

    /// The tracked objects reported on every cycle
    pub objects: Vec<TrackedObject>,

    /// How long to run for.
    ///
    /// Units: seconds
    pub duration_s: f64,

    /// Number of points in the local path window cut from the global path
    pub local_window_len: usize,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// An error that occurs while loading a scenario file.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Cannot load the scenario file: {0}")]
    FileLoadError(std::io::Error),

    #[error("Cannot read the scenario file: {0}")]
    DeserialiseError(serde_json::Error),

    #[error("The scenario's global path is empty")]
    EmptyGlobalPath,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Scenario {
    /// Load a scenario from the given JSON file.
    pub fn load<P: AsRef<std::path::Path>>(scenario_path: P) -> Result<Self, ScenarioError> {
        let scenario_str =
            fs::read_to_string(scenario_path).map_err(ScenarioError::FileLoadError)?;

        let scenario: Scenario =
            serde_json::from_str(&scenario_str).map_err(ScenarioError::DeserialiseError)?;

        if scenario.global_path.is_empty() {
            return Err(ScenarioError::EmptyGlobalPath);
        }

        Ok(scenario)
    }

    /// Cut the local path window around the given ego position, standing in
    /// for the external local path feed.
    pub fn local_path_at(&self, position_m: &nalgebra::Vector2<f64>) -> Path {
        let start = self
            .global_path
            .nearest_point_index(position_m)
            .unwrap_or(0);

        self.global_path.window(start, self.local_window_len)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nalgebra::Vector2;

    #[test]
    fn test_local_window_tracks_position() {
        let scenario = Scenario {
            start_pose: Pose::default(),
            start_speed_ms: 0.0,
            global_path: Path::from_points(
                (0..100).map(|i| Vector2::new(i as f64, 0.0)).collect(),
            ),
            objects: Vec::new(),
            duration_s: 1.0,
            local_window_len: 20,
        };

        let local = scenario.local_path_at(&Vector2::new(30.2, 0.0));
        assert_eq!(local.get_num_points(), 20);
        assert_eq!(local.points_m[0], Vector2::new(30.0, 0.0));

        // Window clipped near the end of the path
        let local = scenario.local_path_at(&Vector2::new(95.0, 0.0));
        assert_eq!(local.get_num_points(), 5);
    }
}
