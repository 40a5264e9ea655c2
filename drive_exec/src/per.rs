//! # Perception interface
//!
//! The external perception system delivers a list of tracked objects in the
//! world frame once per cycle. This module defines those objects and their
//! projection into the ego body frame.
//!
//! Speed units are not uniform across object classes: vehicles report km/h
//! while pedestrians and static obstacles report m/s, the same unit as the
//! ego speed feed. The asymmetry is a property of the upstream feed and is
//! encoded in [`TrackedObject::speed_ms`] so that no call site can silently
//! normalise it away.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// Internal
use crate::frame::FrameTransform;
use crate::loc::Pose;
use util::maths::kmh_to_ms;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The classes of object the perception system can report.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectClass {
    Vehicle,
    Pedestrian,
    StaticObstacle,
}

/// A single tracked object as reported by the perception system.
///
/// Each variant carries the object's world frame position and its scalar
/// speed in the unit the feed uses for that class.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub enum TrackedObject {
    Vehicle {
        position_m: Vector2<f64>,
        speed_kmh: f64,
    },
    Pedestrian {
        position_m: Vector2<f64>,
        speed_ms: f64,
    },
    StaticObstacle {
        position_m: Vector2<f64>,
        speed_ms: f64,
    },
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A tracked object with its position resolved into the ego body frame.
#[derive(Debug, Copy, Clone)]
pub struct ProjectedObject {
    /// The object as reported, world frame position included
    pub object: TrackedObject,

    /// The object's position in the ego body frame
    pub position_m_body: Vector2<f64>,
}

/// The forward tracked objects for one cycle, partitioned by class.
///
/// Objects behind the ego (non-positive body frame forward coordinate) have
/// already been discarded. This structure is rebuilt from scratch on every
/// cycle and never retained.
#[derive(Debug, Clone, Default)]
pub struct ForwardObjects {
    pub vehicles: Vec<ProjectedObject>,
    pub pedestrians: Vec<ProjectedObject>,
    pub obstacles: Vec<ProjectedObject>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TrackedObject {
    /// Get the class of this object.
    pub fn class(&self) -> ObjectClass {
        match self {
            TrackedObject::Vehicle { .. } => ObjectClass::Vehicle,
            TrackedObject::Pedestrian { .. } => ObjectClass::Pedestrian,
            TrackedObject::StaticObstacle { .. } => ObjectClass::StaticObstacle,
        }
    }

    /// Get the object's position in the world frame.
    pub fn position_m(&self) -> Vector2<f64> {
        match self {
            TrackedObject::Vehicle { position_m, .. }
            | TrackedObject::Pedestrian { position_m, .. }
            | TrackedObject::StaticObstacle { position_m, .. } => *position_m,
        }
    }

    /// Get the object's scalar speed in m/s.
    ///
    /// Vehicle speeds are converted from the km/h reported by the feed;
    /// pedestrian and static obstacle speeds are taken as reported.
    pub fn speed_ms(&self) -> f64 {
        match self {
            TrackedObject::Vehicle { speed_kmh, .. } => kmh_to_ms(*speed_kmh),
            TrackedObject::Pedestrian { speed_ms, .. }
            | TrackedObject::StaticObstacle { speed_ms, .. } => *speed_ms,
        }
    }
}

impl ForwardObjects {
    /// Get the projected objects of the given class.
    pub fn of_class(&self, class: ObjectClass) -> &[ProjectedObject] {
        match class {
            ObjectClass::Vehicle => &self.vehicles,
            ObjectClass::Pedestrian => &self.pedestrians,
            ObjectClass::StaticObstacle => &self.obstacles,
        }
    }

    /// Total number of forward objects across all classes.
    pub fn len(&self) -> usize {
        self.vehicles.len() + self.pedestrians.len() + self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Project the raw tracked object list into the ego body frame, keeping only
/// objects ahead of the ego.
///
/// This is a free function rather than a stateful module: nothing from one
/// cycle's object list may survive into the next.
pub fn project_forward(ego: &Pose, objects: &[TrackedObject]) -> ForwardObjects {
    let transform = FrameTransform::new(ego);

    let mut forward = ForwardObjects::default();

    for object in objects {
        let position_m_body = transform.to_body(&object.position_m());

        // Objects behind the ego play no part in control
        if position_m_body[0] <= 0.0 {
            continue;
        }

        let projected = ProjectedObject {
            object: *object,
            position_m_body,
        };

        match object.class() {
            ObjectClass::Vehicle => forward.vehicles.push(projected),
            ObjectClass::Pedestrian => forward.pedestrians.push(projected),
            ObjectClass::StaticObstacle => forward.obstacles.push(projected),
        }
    }

    forward
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_speed_units_per_class() {
        let vehicle = TrackedObject::Vehicle {
            position_m: Vector2::zeros(),
            speed_kmh: 36.0,
        };
        let pedestrian = TrackedObject::Pedestrian {
            position_m: Vector2::zeros(),
            speed_ms: 1.5,
        };

        // Vehicle speeds come in km/h and are converted, pedestrian speeds
        // are already m/s
        assert_approx_eq!(vehicle.speed_ms(), 10.0);
        assert_approx_eq!(pedestrian.speed_ms(), 1.5);
    }

    #[test]
    fn test_objects_behind_are_dropped() {
        let ego = Pose::default();

        let objects = vec![
            TrackedObject::Pedestrian {
                position_m: Vector2::new(5.0, 1.0),
                speed_ms: 0.0,
            },
            TrackedObject::Pedestrian {
                position_m: Vector2::new(-5.0, 1.0),
                speed_ms: 0.0,
            },
            // Exactly on the lateral axis counts as behind
            TrackedObject::Pedestrian {
                position_m: Vector2::new(0.0, 2.0),
                speed_ms: 0.0,
            },
        ];

        let forward = project_forward(&ego, &objects);

        assert_eq!(forward.pedestrians.len(), 1);
        assert_approx_eq!(forward.pedestrians[0].position_m_body[0], 5.0);
    }

    #[test]
    fn test_partition_by_class() {
        let ego = Pose::default();

        let objects = vec![
            TrackedObject::Vehicle {
                position_m: Vector2::new(10.0, 0.0),
                speed_kmh: 20.0,
            },
            TrackedObject::StaticObstacle {
                position_m: Vector2::new(15.0, 0.0),
                speed_ms: 0.0,
            },
            TrackedObject::Pedestrian {
                position_m: Vector2::new(3.0, 0.5),
                speed_ms: 1.0,
            },
        ];

        let forward = project_forward(&ego, &objects);

        assert_eq!(forward.vehicles.len(), 1);
        assert_eq!(forward.pedestrians.len(), 1);
        assert_eq!(forward.obstacles.len(), 1);
        assert_eq!(forward.len(), 3);
    }

    #[test]
    fn test_projection_uses_ego_heading() {
        // Ego facing +Y: an object at world +Y is ahead
        let ego = Pose::new(Vector2::zeros(), std::f64::consts::FRAC_PI_2);

        let objects = vec![TrackedObject::Vehicle {
            position_m: Vector2::new(0.0, 4.0),
            speed_kmh: 0.0,
        }];

        let forward = project_forward(&ego, &objects);

        assert_eq!(forward.vehicles.len(), 1);
        assert_approx_eq!(forward.vehicles[0].position_m_body[0], 4.0);
        assert_approx_eq!(forward.vehicles[0].position_m_body[1], 0.0);
    }
}
