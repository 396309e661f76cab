use serde::{Deserialize, Serialize};

use crate::models::{SimulationParameters, SimulationState};

/// Number of model input features
pub const FEATURE_COUNT: usize = 6;

/// Defaults substituted for missing request fields.
pub mod feature_defaults {
    /// Altitude (km)
    pub const ALTITUDE: f64 = 500.0;
    /// Inclination (degrees)
    pub const INCLINATION: f64 = 45.0;
    /// Velocity (km/s)
    pub const VELOCITY: f64 = 7.8;
    /// Mass (kg)
    pub const MASS: f64 = 1000.0;
    /// Total tracked objects across all orbital bands
    pub const TOTAL_OBJECTS: f64 = 5500.0;
    /// Average congestion (0-1)
    pub const CONGESTION: f64 = 0.5;
}

/// Fixed-order model input vector:
/// {altitude, inclination, velocity, mass, total objects, congestion}.
///
/// The order is shared by every predictor variant and by the synthetic
/// training data. Construction never fails; out-of-physical-range values
/// pass through unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Build from optional simulation inputs, substituting defaults for
    /// whatever is absent.
    pub fn from_inputs(
        parameters: Option<&SimulationParameters>,
        state: Option<&SimulationState>,
    ) -> Self {
        let (altitude, inclination, velocity, mass) = match parameters {
            Some(p) => (p.altitude, p.inclination, p.velocity, p.mass),
            None => (
                feature_defaults::ALTITUDE,
                feature_defaults::INCLINATION,
                feature_defaults::VELOCITY,
                feature_defaults::MASS,
            ),
        };

        let (total_objects, congestion) = match state {
            Some(s) => (f64::from(s.total_objects()), s.average_congestion),
            None => (feature_defaults::TOTAL_OBJECTS, feature_defaults::CONGESTION),
        };

        Self {
            values: [altitude, inclination, velocity, mass, total_objects, congestion],
        }
    }

    /// Build from already-ordered raw values.
    pub fn from_raw(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_everything_missing() {
        let fv = FeatureVector::from_inputs(None, None);
        assert_eq!(fv.as_slice(), &[500.0, 45.0, 7.8, 1000.0, 5500.0, 0.5]);
    }

    #[test]
    fn test_state_overrides_population_features() {
        let state = SimulationState {
            objects_in_leo: 4000,
            objects_in_meo: 600,
            objects_in_geo: 2200,
            average_congestion: 0.8,
            collision_probability: 0.1,
        };
        let fv = FeatureVector::from_inputs(None, Some(&state));
        assert_eq!(fv.as_slice()[4], 6800.0);
        assert_eq!(fv.as_slice()[5], 0.8);
        // Parameter slots still carry defaults
        assert_eq!(fv.as_slice()[0], 500.0);
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let params = SimulationParameters::new(-50.0, 400.0, 99.0, -1.0);
        let fv = FeatureVector::from_inputs(Some(&params), None);
        assert_eq!(fv.as_slice()[0], -50.0);
        assert_eq!(fv.as_slice()[1], 400.0);
    }

    #[test]
    fn test_fixed_order() {
        let params = SimulationParameters::new(250.0, 95.0, 7.6, 3500.0);
        let state = SimulationState::baseline();
        let fv = FeatureVector::from_inputs(Some(&params), Some(&state));
        assert_eq!(fv.as_slice(), &[250.0, 95.0, 7.6, 3500.0, 5500.0, 0.5]);
    }
}
