//! Adaptive cruise control module state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use nalgebra::Vector2;
use serde::Serialize;

// Internal
use super::Params;
use crate::{
    loc::Pose,
    path::Path,
    per::{ForwardObjects, ObjectClass},
};
use util::{maths::ms_to_kmh, params};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The order object classes are scanned for selection. A class scanned later
/// only takes a selection if its candidate is nearer than everything seen
/// before it.
const SELECT_ORDER: [ObjectClass; 3] = [
    ObjectClass::Pedestrian,
    ObjectClass::Vehicle,
    ObjectClass::StaticObstacle,
];

/// The order selected classes are applied to the target speed. Later classes
/// overwrite earlier ones.
const APPLY_ORDER: [ObjectClass; 3] = [
    ObjectClass::Vehicle,
    ObjectClass::Pedestrian,
    ObjectClass::StaticObstacle,
];

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The in-path selection for one object class.
#[derive(Debug, Copy, Clone, Default, Serialize)]
pub struct Selection {
    /// True if an object of this class is selected as on the path
    pub in_path: bool,

    /// Index of the selected object within its class list
    pub index: usize,
}

/// The per-class selections. Cleared and repopulated every cycle, so the
/// indices always refer to the object lists the selection was made from.
#[derive(Debug, Copy, Clone, Default, Serialize)]
pub struct SelectionSet {
    pub vehicle: Selection,
    pub pedestrian: Selection,
    pub obstacle: Selection,
}

/// Adaptive cruise control module state
pub struct AccCtrl {
    params: Params,

    /// The current per-class selection, the only state crossing cycle
    /// boundaries in the obstacle pipeline.
    selection: SelectionSet,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SelectionSet {
    fn of_class(&self, class: ObjectClass) -> &Selection {
        match class {
            ObjectClass::Vehicle => &self.vehicle,
            ObjectClass::Pedestrian => &self.pedestrian,
            ObjectClass::StaticObstacle => &self.obstacle,
        }
    }

    fn of_class_mut(&mut self, class: ObjectClass) -> &mut Selection {
        match class {
            ObjectClass::Vehicle => &mut self.vehicle,
            ObjectClass::Pedestrian => &mut self.pedestrian,
            ObjectClass::StaticObstacle => &mut self.obstacle,
        }
    }
}

impl AccCtrl {
    /// Initialise the adaptive cruise control module.
    ///
    /// Expected init data is the path to the parameter file.
    pub fn init(params_path: &str) -> Result<Self, params::LoadError> {
        Ok(Self::new(params::load(params_path)?))
    }

    /// Create the module directly from a parameter set.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            selection: SelectionSet::default(),
        }
    }

    /// Get the current per-class selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Selection phase: refresh the per-class selection against the local
    /// path.
    ///
    /// The selection is cleared first, so an object class stops contributing
    /// as soon as no candidate of that class is found on the path. A single
    /// nearest-so-far distance is shared across all classes: a class keeps a
    /// selection only while its candidate beat every candidate scanned
    /// before it.
    pub fn check_objects(&mut self, ego: &Pose, ref_path: &Path, objects: &ForwardObjects) {
        self.selection = SelectionSet::default();

        let mut min_rel_dist_m = std::f64::INFINITY;

        for &class in SELECT_ORDER.iter() {
            for (i, projected) in objects.of_class(class).iter().enumerate() {
                let position_m = projected.object.position_m();

                if !self.in_corridor(ref_path, &position_m) {
                    continue;
                }

                let rel_dist_m = (position_m - ego.position_m).norm();

                if rel_dist_m < min_rel_dist_m {
                    min_rel_dist_m = rel_dist_m;
                    *self.selection.of_class_mut(class) = Selection {
                        in_path: true,
                        index: i,
                    };
                }
            }
        }
    }

    /// Target speed phase: apply the car-following law to each selected
    /// class.
    ///
    /// `ego_speed_ms` and `default_target_ms` are in m/s; the returned
    /// target is in km/h, the unit the longitudinal controller tracks.
    pub fn get_target_speed(
        &self,
        objects: &ForwardObjects,
        ego_speed_ms: f64,
        default_target_ms: f64,
    ) -> f64 {
        let mut out_speed_ms = default_target_ms;

        for &class in APPLY_ORDER.iter() {
            let selection = self.selection.of_class(class);
            let class_objects = objects.of_class(class);

            if !selection.in_path || class_objects.is_empty() {
                continue;
            }

            let projected = match class_objects.get(selection.index) {
                Some(p) => p,
                None => continue,
            };

            let safe_gap_m = ego_speed_ms * self.params.time_gap_s + self.params.default_gap_m;
            let rel_dist_m = projected.position_m_body.norm();
            let rel_speed_ms = projected.object.speed_ms() - ego_speed_ms;

            let accel_ms =
                rel_speed_ms * self.params.velocity_gain
                    - self.params.distance_gain * (safe_gap_m - rel_dist_m);

            out_speed_ms = ego_speed_ms + accel_ms;

            debug!(
                "ACC following {:?}: gap {:.2} m of {:.2} m safe, target {:.2} m/s",
                class, rel_dist_m, safe_gap_m, out_speed_ms
            );
        }

        ms_to_kmh(out_speed_ms)
    }

    /// Determine whether any point of the reference path lies within the
    /// lateral corridor of the given world position.
    fn in_corridor(&self, ref_path: &Path, position_m: &Vector2<f64>) -> bool {
        ref_path
            .points_m
            .iter()
            .any(|point_m| (point_m - position_m).norm() < self.params.corridor_threshold_m)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::per::{project_forward, TrackedObject};
    use assert_approx_eq::assert_approx_eq;
    use nalgebra::Vector2;

    fn test_params() -> Params {
        Params {
            velocity_gain: 0.5,
            distance_gain: 1.0,
            time_gap_s: 0.8,
            default_gap_m: 8.0,
            corridor_threshold_m: 2.35,
        }
    }

    fn straight_path() -> Path {
        Path::from_points((0..60).map(|i| Vector2::new(i as f64, 0.0)).collect())
    }

    #[test]
    fn test_object_at_safe_gap_gives_zero_correction() {
        let mut acc = AccCtrl::new(test_params());
        let ego = Pose::default();
        let ego_speed_ms = 5.0;

        // Safe gap = 5 * 0.8 + 8 = 12 m; a pedestrian exactly there moving
        // at exactly the ego speed requires no correction
        let objects = project_forward(
            &ego,
            &[TrackedObject::Pedestrian {
                position_m: Vector2::new(12.0, 0.0),
                speed_ms: ego_speed_ms,
            }],
        );

        acc.check_objects(&ego, &straight_path(), &objects);
        assert!(acc.selection().pedestrian.in_path);

        let target_kmh = acc.get_target_speed(&objects, ego_speed_ms, 15.0);
        assert_approx_eq!(target_kmh, ms_to_kmh(ego_speed_ms));
    }

    #[test]
    fn test_close_object_slows_below_ego() {
        let mut acc = AccCtrl::new(test_params());
        let ego = Pose::default();
        let ego_speed_ms = 5.0;

        // 3 m ahead, well inside the 12 m safe gap
        let objects = project_forward(
            &ego,
            &[TrackedObject::Pedestrian {
                position_m: Vector2::new(3.0, 0.0),
                speed_ms: 0.0,
            }],
        );

        acc.check_objects(&ego, &straight_path(), &objects);
        let target_kmh = acc.get_target_speed(&objects, ego_speed_ms, 15.0);

        assert!(target_kmh < ms_to_kmh(ego_speed_ms));
    }

    #[test]
    fn test_off_corridor_object_ignored() {
        let mut acc = AccCtrl::new(test_params());
        let ego = Pose::default();

        // Forward, but 5 m off the path: outside the 2.35 m corridor
        let objects = project_forward(
            &ego,
            &[TrackedObject::Pedestrian {
                position_m: Vector2::new(10.0, 5.0),
                speed_ms: 0.0,
            }],
        );

        acc.check_objects(&ego, &straight_path(), &objects);
        assert!(!acc.selection().pedestrian.in_path);

        // Target falls through to the default
        let target_kmh = acc.get_target_speed(&objects, 5.0, 15.0);
        assert_approx_eq!(target_kmh, ms_to_kmh(15.0));
    }

    #[test]
    fn test_nearest_of_class_selected() {
        let mut acc = AccCtrl::new(test_params());
        let ego = Pose::default();

        let objects = project_forward(
            &ego,
            &[
                TrackedObject::Pedestrian {
                    position_m: Vector2::new(20.0, 0.0),
                    speed_ms: 0.0,
                },
                TrackedObject::Pedestrian {
                    position_m: Vector2::new(6.0, 0.0),
                    speed_ms: 0.0,
                },
            ],
        );

        acc.check_objects(&ego, &straight_path(), &objects);

        assert!(acc.selection().pedestrian.in_path);
        assert_eq!(acc.selection().pedestrian.index, 1);
    }

    #[test]
    fn test_last_class_in_order_takes_precedence() {
        let mut acc = AccCtrl::new(test_params());
        let ego = Pose::default();
        let ego_speed_ms = 5.0;

        // Each class nearer than the one scanned before it, so all three
        // hold selections simultaneously
        let objects = project_forward(
            &ego,
            &[
                TrackedObject::Pedestrian {
                    position_m: Vector2::new(10.0, 0.0),
                    speed_ms: 0.0,
                },
                TrackedObject::Vehicle {
                    position_m: Vector2::new(8.0, 0.0),
                    speed_kmh: 0.0,
                },
                TrackedObject::StaticObstacle {
                    position_m: Vector2::new(6.0, 0.0),
                    speed_ms: 0.0,
                },
            ],
        );

        acc.check_objects(&ego, &straight_path(), &objects);
        assert!(acc.selection().vehicle.in_path);
        assert!(acc.selection().pedestrian.in_path);
        assert!(acc.selection().obstacle.in_path);

        let target_kmh = acc.get_target_speed(&objects, ego_speed_ms, 15.0);

        // The static obstacle (last in the apply order) must own the result:
        // safe gap 12, distance 6, stopped object
        let expected_ms = ego_speed_ms + (0.0 - ego_speed_ms) * 0.5 - 1.0 * (12.0 - 6.0);
        assert_approx_eq!(target_kmh, ms_to_kmh(expected_ms));
    }

    #[test]
    fn test_selection_cleared_when_object_leaves() {
        let mut acc = AccCtrl::new(test_params());
        let ego = Pose::default();

        let on_path = project_forward(
            &ego,
            &[TrackedObject::Vehicle {
                position_m: Vector2::new(10.0, 0.0),
                speed_kmh: 10.0,
            }],
        );

        acc.check_objects(&ego, &straight_path(), &on_path);
        assert!(acc.selection().vehicle.in_path);

        // Next cycle the vehicle has moved off the corridor: the stale
        // selection must not survive
        let off_path = project_forward(
            &ego,
            &[TrackedObject::Vehicle {
                position_m: Vector2::new(10.0, 20.0),
                speed_kmh: 10.0,
            }],
        );

        acc.check_objects(&ego, &straight_path(), &off_path);
        assert!(!acc.selection().vehicle.in_path);
    }

    #[test]
    fn test_vehicle_speed_converted_from_kmh() {
        let mut acc = AccCtrl::new(test_params());
        let ego = Pose::default();
        let ego_speed_ms = 5.0;

        // A vehicle at the safe gap doing 18 km/h = 5 m/s, the ego speed:
        // zero correction only if the km/h feed is converted
        let objects = project_forward(
            &ego,
            &[TrackedObject::Vehicle {
                position_m: Vector2::new(12.0, 0.0),
                speed_kmh: 18.0,
            }],
        );

        acc.check_objects(&ego, &straight_path(), &objects);
        let target_kmh = acc.get_target_speed(&objects, ego_speed_ms, 15.0);

        assert_approx_eq!(target_kmh, ms_to_kmh(ego_speed_ms));
    }
}
