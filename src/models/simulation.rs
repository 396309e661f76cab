use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Orbital parameters of a proposed or observed object.
///
/// Immutable input value; out-of-physical-range values are accepted and
/// passed through to the predictors unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParameters {
    /// Altitude (km)
    pub altitude: f64,

    /// Inclination (degrees)
    pub inclination: f64,

    /// Velocity (km/s)
    pub velocity: f64,

    /// Mass (kg)
    pub mass: f64,

    /// Launch timestamp
    pub launch_time: DateTime<Utc>,
}

impl SimulationParameters {
    pub fn new(altitude: f64, inclination: f64, velocity: f64, mass: f64) -> Self {
        Self {
            altitude,
            inclination,
            velocity,
            mass,
            launch_time: Utc::now(),
        }
    }

    /// Reference parameters used when a request carries only population state.
    pub fn baseline() -> Self {
        Self::new(500.0, 45.0, 7.8, 1000.0)
    }

    /// Polar orbits cross many orbital planes
    pub fn is_polar(&self) -> bool {
        self.inclination > 70.0 && self.inclination < 110.0
    }
}

/// Snapshot of the orbital population.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    /// Object count in low Earth orbit
    #[serde(rename = "objectsInLEO")]
    pub objects_in_leo: u32,

    /// Object count in medium Earth orbit
    #[serde(rename = "objectsInMEO")]
    pub objects_in_meo: u32,

    /// Object count in geostationary orbit
    #[serde(rename = "objectsInGEO")]
    pub objects_in_geo: u32,

    /// Average congestion (0-1)
    pub average_congestion: f64,

    /// Collision probability (0-1)
    pub collision_probability: f64,
}

impl SimulationState {
    /// Reference population used when a request carries no state.
    pub fn baseline() -> Self {
        Self {
            objects_in_leo: 3000,
            objects_in_meo: 500,
            objects_in_geo: 2000,
            average_congestion: 0.5,
            collision_probability: 0.0,
        }
    }

    /// Total tracked objects across all bands
    pub fn total_objects(&self) -> u32 {
        self.objects_in_leo + self.objects_in_meo + self.objects_in_geo
    }
}

/// Ordered triple of raw risk signals, each conceptually in [0, 1] before
/// scaling. Produced by every predictor variant and by the fusion engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskVector {
    /// Collision risk
    pub collision: f64,

    /// Congestion increase
    pub congestion: f64,

    /// Secondary debris probability
    pub debris: f64,
}

impl RiskVector {
    pub fn new(collision: f64, congestion: f64, debris: f64) -> Self {
        Self {
            collision,
            congestion,
            debris,
        }
    }

    /// Components in fixed {collision, congestion, debris} order
    pub fn as_array(&self) -> [f64; 3] {
        [self.collision, self.congestion, self.debris]
    }

    pub fn from_array(values: [f64; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }
}

/// Simulated event category for risk assessment requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Launch,
    Adjustment,
    Breakup,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::Launch => write!(f, "launch"),
            EventType::Adjustment => write!(f, "adjustment"),
            EventType::Breakup => write!(f, "breakup"),
        }
    }
}
