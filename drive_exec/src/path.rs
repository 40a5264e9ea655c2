//! # Path
//!
//! This module defines the paths driven by the control stack. The global
//! path is received exactly once and is never mutated afterwards; the local
//! path is a window of the global path refreshed on every cycle by the
//! external path feed.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A path defining the desired trajectory of the vehicle.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct Path {
    pub points_m: Vec<Vector2<f64>>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Path {
    /// Create a new empty path
    pub fn new_empty() -> Self {
        Path {
            points_m: Vec::new(),
        }
    }

    /// Create a path from a sequence of points
    pub fn from_points(points_m: Vec<Vector2<f64>>) -> Self {
        Path { points_m }
    }

    /// Get the number of points in the path
    pub fn get_num_points(&self) -> usize {
        self.points_m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points_m.is_empty()
    }

    /// Get the index of the path point nearest to the given position.
    ///
    /// This is the "current waypoint" used to index the velocity profile.
    /// Returns `None` for an empty path.
    pub fn nearest_point_index(&self, position_m: &Vector2<f64>) -> Option<usize> {
        let mut min_dist_m = std::f64::INFINITY;
        let mut nearest = None;

        for (i, point_m) in self.points_m.iter().enumerate() {
            let dist_m = (point_m - position_m).norm();
            if dist_m < min_dist_m {
                min_dist_m = dist_m;
                nearest = Some(i);
            }
        }

        nearest
    }

    /// Extract a window of up to `len` points starting at `start`.
    ///
    /// Used by the standalone exec to produce the local path the external
    /// path feed would normally deliver. The window is clipped to the end of
    /// the path.
    pub fn window(&self, start: usize, len: usize) -> Path {
        let start = start.min(self.points_m.len());
        let end = (start + len).min(self.points_m.len());

        Path {
            points_m: self.points_m[start..end].to_vec(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn straight_path(num_points: usize, sep_m: f64) -> Path {
        Path::from_points(
            (0..num_points)
                .map(|i| Vector2::new(i as f64 * sep_m, 0.0))
                .collect(),
        )
    }

    #[test]
    fn test_nearest_point_index() {
        let path = straight_path(10, 1.0);

        assert_eq!(path.nearest_point_index(&Vector2::new(0.0, 0.0)), Some(0));
        assert_eq!(path.nearest_point_index(&Vector2::new(4.2, 3.0)), Some(4));
        assert_eq!(path.nearest_point_index(&Vector2::new(100.0, 0.0)), Some(9));

        assert_eq!(
            Path::new_empty().nearest_point_index(&Vector2::new(0.0, 0.0)),
            None
        );
    }

    #[test]
    fn test_window() {
        let path = straight_path(10, 1.0);

        assert_eq!(path.window(0, 5).get_num_points(), 5);
        assert_eq!(path.window(8, 5).get_num_points(), 2);
        assert_eq!(path.window(12, 5).get_num_points(), 0);
        assert_eq!(path.window(3, 2).points_m[0], Vector2::new(3.0, 0.0));
    }
}
