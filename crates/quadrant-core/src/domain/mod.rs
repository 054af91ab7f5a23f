//! Domain models for the portfolio core.
//!
//! Canonical definitions for the core entities:
//! - `Project`: Aggregate root owning context, history and derived scores
//! - `Evaluation`: A scored assessment of a project at a point in time
//! - `ProjectRecord`: The `ai-project-v1.0` interchange schema
//! - Value objects: business context, classification, resources, timeline

pub mod business;
pub mod error;
pub mod evaluation;
pub mod project;
pub mod record;
pub mod resources;
pub mod timeline;

// Re-export main types and errors
pub use business::{BusinessContext, Person, ProjectClassification, Stakeholder, StakeholderImpact};
pub use error::{QuadrantError, Result, SchemaIssue};
pub use evaluation::{Evaluation, EvaluationId, EvaluationStatus, Evaluator};
pub use project::{
    CurrentScores, Permission, Project, ProjectId, ProjectStatus, ProtectionLevel,
};
pub use record::{
    EvaluationsRecord, ProjectMeta, ProjectRecord, RecordMetadata, SCHEMA_VERSION,
    SUPPORTED_SCHEMAS,
};
pub use resources::{Budget, ResourceRequirements};
pub use timeline::{Milestone, MilestoneStatus, Phase, PhaseStatus, ProjectTimeline};
