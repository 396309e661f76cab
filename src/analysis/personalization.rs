//! Caller personalization.
//!
//! Everything here is recomputed per request from the caller-supplied
//! simulation history; no profile is ever stored server-side. History
//! records with missing fields count toward neither the high-risk nor the
//! low-risk tally.

use std::collections::HashMap;

use crate::models::{
    BehaviorPatterns, RiskTolerance, SimulationRecord, SkillLevel, UserProfile,
};

/// Collision percentage above which a past run counts as high-risk
const HIGH_RISK_PCT: f64 = 50.0;

/// Collision percentage below which a past run counts as low-risk
const LOW_RISK_PCT: f64 = 30.0;

/// Collision percentage below which a past run counts as a success
const SUCCESS_PCT: f64 = 40.0;

/// Fraction of history that must agree before tolerance leaves "moderate"
const TOLERANCE_MAJORITY: f64 = 0.6;

fn record_collision_pct(record: &SimulationRecord) -> Option<f64> {
    record
        .ai_analysis
        .as_ref()
        .and_then(|a| a.collision_risk_percentage)
}

/// Classify the caller's risk tolerance from prior simulation outcomes.
/// An empty history classifies as moderate.
pub fn classify_risk_tolerance(history: &[SimulationRecord]) -> RiskTolerance {
    if history.is_empty() {
        return RiskTolerance::Moderate;
    }

    let high_risk = history
        .iter()
        .filter(|r| record_collision_pct(r).is_some_and(|pct| pct > HIGH_RISK_PCT))
        .count();
    let low_risk = history
        .iter()
        .filter(|r| record_collision_pct(r).is_some_and(|pct| pct < LOW_RISK_PCT))
        .count();

    let majority = history.len() as f64 * TOLERANCE_MAJORITY;
    if high_risk as f64 > majority {
        RiskTolerance::Aggressive
    } else if low_risk as f64 > majority {
        RiskTolerance::Conservative
    } else {
        RiskTolerance::Moderate
    }
}

/// Advisory strings appended for a classified tolerance. Moderate callers
/// get none, leaving their recommendations unchanged.
pub fn tolerance_advisories(tolerance: RiskTolerance) -> Vec<String> {
    match tolerance {
        RiskTolerance::Conservative => vec![
            "Conservative approach: Consider additional safety margins in your orbital parameters."
                .to_string(),
            "Conservative approach: Schedule extra monitoring passes for critical conjunctions."
                .to_string(),
        ],
        RiskTolerance::Aggressive => vec![
            "Aggressive approach: Optimize for fuel efficiency while maintaining acceptable risk levels."
                .to_string(),
            "Aggressive approach: Consider consolidating maneuvers to reduce operational overhead."
                .to_string(),
        ],
        RiskTolerance::Moderate => Vec::new(),
    }
}

/// Summarize behavioral patterns from the caller's history.
pub fn analyze_behavior(history: &[SimulationRecord]) -> BehaviorPatterns {
    let mut preferred_event_types: HashMap<String, usize> = HashMap::new();
    for record in history {
        let event_type = record
            .event_type
            .clone()
            .unwrap_or_else(|| "unknown".to_string());
        *preferred_event_types.entry(event_type).or_insert(0) += 1;
    }

    let success_rate = if history.is_empty() {
        0.0
    } else {
        let successes = history
            .iter()
            .filter(|r| record_collision_pct(r).is_some_and(|pct| pct < SUCCESS_PCT))
            .count();
        successes as f64 / history.len() as f64
    };

    BehaviorPatterns {
        preferred_event_types,
        success_rate,
    }
}

/// Derive the full per-request profile.
pub fn profile_from_history(history: &[SimulationRecord]) -> UserProfile {
    UserProfile {
        risk_tolerance: classify_risk_tolerance(history),
        patterns: analyze_behavior(history),
    }
}

/// Recommendations tailored to observed patterns, skill level and tolerance.
pub fn personalized_recommendations(
    patterns: &BehaviorPatterns,
    skill: SkillLevel,
    tolerance: RiskTolerance,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    // Ties resolve alphabetically so repeated requests stay stable
    let most_common = patterns
        .preferred_event_types
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)));
    if let Some((event_type, _)) = most_common {
        recommendations.push(format!(
            "You frequently simulate {event_type} events. Try exploring other event types for a broader understanding."
        ));
    }

    recommendations.extend(skill_recommendations(skill));

    match tolerance {
        RiskTolerance::Conservative => recommendations.push(
            "Conservative approach: Your simulations show preference for low-risk scenarios. Consider challenging yourself with moderate-risk scenarios to expand skills."
                .to_string(),
        ),
        RiskTolerance::Aggressive => recommendations.push(
            "Aggressive approach: Your simulations show willingness to accept higher risks. Ensure you're applying appropriate mitigation strategies."
                .to_string(),
        ),
        RiskTolerance::Moderate => {}
    }

    recommendations
}

fn skill_recommendations(skill: SkillLevel) -> Vec<String> {
    let lines: &[&str] = match skill {
        SkillLevel::Beginner => &[
            "Beginner tip: Focus on mastering LEO operations before moving to higher orbits.",
            "Beginner tip: Pay attention to the AI explanations to understand risk factors.",
            "Beginner tip: Start with low-mass satellites to minimize risk.",
            "Beginner tip: Use the recommendations panel to guide your parameter adjustments.",
        ],
        SkillLevel::Intermediate => &[
            "Intermediate tip: Experiment with complex multi-satellite scenarios.",
            "Intermediate tip: Try optimizing for both safety and efficiency.",
            "Intermediate tip: Analyze the before/after comparisons to understand traffic impacts.",
            "Intermediate tip: Challenge yourself with high-inclination orbits.",
        ],
        SkillLevel::Expert => &[
            "Expert tip: Model complex constellation deployments.",
            "Expert tip: Investigate long-term sustainability scenarios.",
            "Expert tip: Explore advanced orbital mechanics concepts.",
            "Expert tip: Contribute your scenarios to the community gallery.",
        ],
    };
    lines.iter().map(|s| s.to_string()).collect()
}

/// Learning path for an experienced caller.
pub fn learning_path(skill: SkillLevel) -> Vec<String> {
    let steps: &[&str] = match skill {
        SkillLevel::Beginner => &[
            "LEO Fundamentals",
            "Collision Avoidance",
            "Basic Orbital Maneuvers",
            "Introduction to Debris Mitigation",
        ],
        SkillLevel::Intermediate => &[
            "MEO and GEO Operations",
            "Constellation Design",
            "Advanced Risk Assessment",
            "Regulatory Compliance",
        ],
        SkillLevel::Expert => &[
            "Sustainability Engineering",
            "Traffic Optimization",
            "Advanced AI Applications",
            "Research and Development",
        ],
    };
    steps.iter().map(|s| s.to_string()).collect()
}

/// First recommendations for a caller with no history at all.
pub fn welcome_recommendations() -> Vec<String> {
    vec![
        "Welcome to Space Traffic Simulator! Start with simple LEO missions.".to_string(),
        "Focus on minimizing collision risks in your early simulations.".to_string(),
        "Try different altitudes to see how they affect orbital congestion.".to_string(),
        "Review the AI explanations to learn about space traffic dynamics.".to_string(),
    ]
}

/// Starter learning path for a caller with no history.
pub fn starter_learning_path() -> Vec<String> {
    vec![
        "LEO Basics".to_string(),
        "Collision Avoidance".to_string(),
        "Orbital Mechanics".to_string(),
    ]
}

/// Scenario-specific advice keyed on the event type being simulated.
pub fn scenario_advice(event_type: &str) -> Vec<String> {
    match event_type {
        "launch" => vec![
            "Launch scenario: Ensure proper timing to avoid conjunctions with existing traffic."
                .to_string(),
        ],
        "adjustment" => vec![
            "Adjustment scenario: Consider fuel-efficient maneuvers to achieve objectives."
                .to_string(),
        ],
        "breakup" => vec![
            "Breakup scenario: Model worst-case fragmentation to understand cascading risks."
                .to_string(),
        ],
        _ => Vec::new(),
    }
}

/// Short UI tips appropriate for the caller's skill level.
pub fn skill_tips(skill: SkillLevel) -> Vec<String> {
    let lines: &[&str] = match skill {
        SkillLevel::Beginner => &[
            "Tip: Use the slider controls to see how parameters affect risk in real-time.",
            "Tip: Review the leaderboard to see how your scores compare to others.",
            "Tip: Check the 3D visualization to understand spatial relationships.",
        ],
        SkillLevel::Intermediate => &[
            "Tip: Compare your scenarios with historical data to benchmark performance.",
            "Tip: Experiment with different optimization strategies.",
            "Tip: Share interesting scenarios with the community.",
        ],
        SkillLevel::Expert => &[
            "Tip: Develop and test novel traffic management strategies.",
            "Tip: Contribute to the evolution of space sustainability practices.",
            "Tip: Mentor newcomers by sharing your expertise.",
        ],
    };
    lines.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordAnalysis;

    fn record(event_type: &str, collision_pct: f64) -> SimulationRecord {
        SimulationRecord {
            event_type: Some(event_type.to_string()),
            ai_analysis: Some(RecordAnalysis {
                collision_risk_percentage: Some(collision_pct),
            }),
        }
    }

    #[test]
    fn test_empty_history_is_moderate() {
        assert_eq!(classify_risk_tolerance(&[]), RiskTolerance::Moderate);
    }

    #[test]
    fn test_aggressive_classification() {
        let history: Vec<_> = (0..10).map(|_| record("launch", 75.0)).collect();
        assert_eq!(classify_risk_tolerance(&history), RiskTolerance::Aggressive);
    }

    #[test]
    fn test_conservative_classification() {
        let history: Vec<_> = (0..10).map(|_| record("launch", 15.0)).collect();
        assert_eq!(
            classify_risk_tolerance(&history),
            RiskTolerance::Conservative
        );
    }

    #[test]
    fn test_majority_threshold_is_strict() {
        // Exactly 60% high-risk does not flip to aggressive
        let mut history: Vec<_> = (0..6).map(|_| record("launch", 75.0)).collect();
        history.extend((0..4).map(|_| record("launch", 40.0)));
        assert_eq!(classify_risk_tolerance(&history), RiskTolerance::Moderate);
    }

    #[test]
    fn test_records_without_analysis_count_as_neither() {
        let history = vec![SimulationRecord::default(); 5];
        assert_eq!(classify_risk_tolerance(&history), RiskTolerance::Moderate);
    }

    #[test]
    fn test_moderate_advisories_are_empty() {
        assert!(tolerance_advisories(RiskTolerance::Moderate).is_empty());
        assert_eq!(tolerance_advisories(RiskTolerance::Conservative).len(), 2);
        assert_eq!(tolerance_advisories(RiskTolerance::Aggressive).len(), 2);
    }

    #[test]
    fn test_behavior_patterns() {
        let history = vec![
            record("launch", 20.0),
            record("launch", 80.0),
            record("breakup", 30.0),
        ];
        let patterns = analyze_behavior(&history);
        assert_eq!(patterns.preferred_event_types["launch"], 2);
        assert_eq!(patterns.preferred_event_types["breakup"], 1);
        assert!((patterns.success_rate - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_personalized_recommendations_mention_frequent_event() {
        let history = vec![record("breakup", 50.0), record("breakup", 50.0)];
        let patterns = analyze_behavior(&history);
        let recs =
            personalized_recommendations(&patterns, SkillLevel::Expert, RiskTolerance::Moderate);
        assert!(recs[0].contains("breakup events"));
        // 1 frequency note + 4 expert tips, no tolerance note for moderate
        assert_eq!(recs.len(), 5);
    }

    #[test]
    fn test_learning_paths_per_skill() {
        assert_eq!(learning_path(SkillLevel::Beginner)[0], "LEO Fundamentals");
        assert_eq!(
            learning_path(SkillLevel::Intermediate)[0],
            "MEO and GEO Operations"
        );
        assert_eq!(
            learning_path(SkillLevel::Expert)[0],
            "Sustainability Engineering"
        );
    }

    #[test]
    fn test_scenario_advice() {
        assert_eq!(scenario_advice("launch").len(), 1);
        assert_eq!(scenario_advice("adjustment").len(), 1);
        assert_eq!(scenario_advice("breakup").len(), 1);
        assert!(scenario_advice("unknown").is_empty());
    }

    #[test]
    fn test_skill_tips_count() {
        for skill in [
            SkillLevel::Beginner,
            SkillLevel::Intermediate,
            SkillLevel::Expert,
        ] {
            assert_eq!(skill_tips(skill).len(), 3);
        }
    }
}
