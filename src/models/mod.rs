/// Domain value objects shared across the prediction pipeline.
pub mod assessment;
pub mod simulation;

pub use assessment::{
    BehaviorPatterns, FactorSeverity, ImpactAssessment, PersonalizedAdvice, RealTimeAssessment,
    RecordAnalysis, RiskAssessment, RiskFactor, RiskTolerance, SimulationRecord, SkillLevel,
    UserProfile,
};
pub use simulation::{EventType, RiskVector, SimulationParameters, SimulationState};
