//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Convert a speed in meters/second into kilometers/hour.
///
/// The object feed reports vehicle speeds in km/h while the ego speed and the
/// planner work in m/s, so every unit crossing goes through these two
/// functions rather than ad-hoc factors at call sites.
pub fn ms_to_kmh<T>(speed_ms: T) -> T
where
    T: Float
{
    speed_ms * T::from(3.6).unwrap()
}

/// Convert a speed in kilometers/hour into meters/second.
pub fn kmh_to_ms<T>(speed_kmh: T) -> T
where
    T: Float
{
    speed_kmh / T::from(3.6).unwrap()
}

/// Map a value from one range into another.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where
    T: Float
{
    target_range.0
        + ((value - source_range.0)
        * (target_range.1 - target_range.0)
        / (source_range.1 - source_range.0))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_speed_conversions() {
        assert!((ms_to_kmh(10f64) - 36f64).abs() < 1e-12);
        assert!((kmh_to_ms(36f64) - 10f64).abs() < 1e-12);

        // Round trip
        let v = 13.572f64;
        assert!((kmh_to_ms(ms_to_kmh(v)) - v).abs() < 1e-12);
    }

    #[test]
    fn test_lin_map() {
        assert_eq!(lin_map((0f64, 1f64), (0f64, 10f64), 0.5), 5f64);
        assert_eq!(lin_map((-1f64, 1f64), (0f64, 1f64), 0f64), 0.5);
    }
}
