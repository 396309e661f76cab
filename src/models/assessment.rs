use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Caller risk tolerance, derived per request from simulation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Conservative,
    Moderate,
    Aggressive,
}

impl std::fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTolerance::Conservative => write!(f, "conservative"),
            RiskTolerance::Moderate => write!(f, "moderate"),
            RiskTolerance::Aggressive => write!(f, "aggressive"),
        }
    }
}

/// Operator experience tier for personalized recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Expert,
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkillLevel::Beginner => write!(f, "beginner"),
            SkillLevel::Intermediate => write!(f, "intermediate"),
            SkillLevel::Expert => write!(f, "expert"),
        }
    }
}

/// Severity tag on an identified risk factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorSeverity {
    Low,
    Medium,
    High,
}

/// A single identified risk factor with its severity and description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor: String,
    pub severity: FactorSeverity,
    pub description: String,
}

/// One entry of a caller-supplied simulation history. Only the fields the
/// personalization layer reads are modeled; everything else is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRecord {
    /// Event type of the past simulation ("launch", "adjustment", "breakup")
    #[serde(default)]
    pub event_type: Option<String>,

    /// Assessment attached to the past simulation
    #[serde(default)]
    pub ai_analysis: Option<RecordAnalysis>,
}

/// Assessment summary carried inside a history record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordAnalysis {
    #[serde(default)]
    pub collision_risk_percentage: Option<f64>,
}

/// Behavioral summary derived from a caller's simulation history.
#[derive(Debug, Clone, Default)]
pub struct BehaviorPatterns {
    /// Count of past simulations per event type
    pub preferred_event_types: HashMap<String, usize>,

    /// Fraction of past simulations that stayed under 40% collision risk
    pub success_rate: f64,
}

/// Per-request caller profile. Never persisted server-side.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub risk_tolerance: RiskTolerance,
    pub patterns: BehaviorPatterns,
}

/// Full impact analysis returned for a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAssessment {
    pub prediction_id: String,

    /// Collision risk percentage [0, 100]
    pub collision_risk_percentage: f64,

    /// Orbital congestion increase percentage [0, 100]
    pub orbital_congestion_increase: f64,

    /// Secondary debris probability percentage [0, 100]
    pub secondary_debris_probability: f64,

    /// Confidence level [70, 100], degraded by inter-model disagreement
    pub confidence_level: f64,

    pub explanation: String,

    /// Never empty
    pub recommendations: Vec<String>,
}

/// Scored risk assessment for a proposed event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_assessment_id: String,

    /// Collision risk score [1, 10]
    pub collision_risk_score: f64,

    /// Congestion risk score [1, 10]
    pub congestion_risk_score: f64,

    /// Long-term impact score [1, 10]
    pub long_term_impact_score: f64,

    pub risk_factors: Vec<RiskFactor>,
    pub mitigation_strategies: Vec<String>,
}

/// Impact assessment augmented with a timestamp and forecast horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealTimeAssessment {
    pub prediction_id: String,
    pub timestamp: DateTime<Utc>,
    pub collision_risk_percentage: f64,
    pub orbital_congestion_increase: f64,
    pub secondary_debris_probability: f64,
    pub confidence_level: f64,
    pub explanation: String,
    pub recommendations: Vec<String>,
    pub time_horizon_hours: u32,
}

/// Personalized guidance derived from history, skill level and tolerance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedAdvice {
    pub recommendation_id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub recommendations: Vec<String>,
    pub learning_path: Vec<String>,
    pub skill_level: SkillLevel,
    pub risk_tolerance: RiskTolerance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerance_serde() {
        let parsed: RiskTolerance = serde_json::from_str("\"aggressive\"").unwrap();
        assert_eq!(parsed, RiskTolerance::Aggressive);
        assert_eq!(
            serde_json::to_string(&RiskTolerance::Conservative).unwrap(),
            "\"conservative\""
        );
    }

    #[test]
    fn test_factor_severity_wire_format() {
        assert_eq!(
            serde_json::to_string(&FactorSeverity::High).unwrap(),
            "\"high\""
        );
    }

    #[test]
    fn test_simulation_record_tolerates_partial_input() {
        let record: SimulationRecord = serde_json::from_str("{}").unwrap();
        assert!(record.event_type.is_none());
        assert!(record.ai_analysis.is_none());

        let record: SimulationRecord = serde_json::from_str(
            r#"{"eventType": "launch", "aiAnalysis": {"collisionRiskPercentage": 61.5}}"#,
        )
        .unwrap();
        assert_eq!(record.event_type.as_deref(), Some("launch"));
        assert_eq!(
            record.ai_analysis.unwrap().collision_risk_percentage,
            Some(61.5)
        );
    }
}
