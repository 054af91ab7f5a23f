//! Quadrant Core Library
//!
//! Domain model, deterministic scoring and in-memory repository for an AI
//! project portfolio. Projects are rated against weighted rubrics, classified
//! into a value/risk priority quadrant and tracked across evaluations.

pub mod assessment;
pub mod domain;
pub mod repository;
pub mod rubric;
pub mod score;
pub mod scoring;
pub mod telemetry;

pub use domain::{
    BusinessContext, Budget, CurrentScores, Evaluation, EvaluationId, EvaluationStatus, Evaluator,
    EvaluationsRecord, Milestone, MilestoneStatus, Permission, Person, Phase, PhaseStatus,
    Project, ProjectClassification, ProjectId, ProjectMeta, ProjectRecord, ProjectStatus,
    ProjectTimeline, ProtectionLevel, QuadrantError, RecordMetadata, ResourceRequirements, Result,
    SchemaIssue, Stakeholder, StakeholderImpact, SCHEMA_VERSION, SUPPORTED_SCHEMAS,
};

pub use assessment::{derive_ratings, ProjectFacts};

pub use repository::{ProjectQuery, ProjectRepository};

pub use rubric::{
    Criterion, CriterionCategory, PriorityRule, Rubric, RubricRegistry, ScoreRange,
    UNCLASSIFIED_LABEL,
};

pub use score::{
    round2, DimensionScore, OverallScore, Priority, ScoreSet, TrendDirection, Trending,
};

pub use scoring::{calculate_scores, confidence, CriteriaRatings, EvaluationService};

pub use telemetry::init_tracing;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
