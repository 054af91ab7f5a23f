//! Domain-level error taxonomy.
//!
//! Every failure is synchronous and raised at the point of violation; nothing
//! here is transient or retried. `Forbidden` carries a human-readable reason
//! because callers display it directly.

use crate::domain::evaluation::EvaluationId;
use crate::domain::project::ProjectId;

/// A single problem found while validating an input record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaIssue {
    #[error("unsupported schema version: {0:?}")]
    UnsupportedSchema(String),

    #[error("missing or empty required field: {0}")]
    MissingField(&'static str),
}

fn issue_summary(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors produced by the portfolio scoring core.
#[derive(Debug, thiserror::Error)]
pub enum QuadrantError {
    #[error("invalid project record: {}", issue_summary(.issues))]
    Schema { issues: Vec<SchemaIssue> },

    #[error("unknown rubric: {0}")]
    UnknownRubric(String),

    #[error("rating {rating} is outside the score range of criterion {criterion}")]
    RatingOutOfRange { criterion: String, rating: f64 },

    #[error("project {0} is not a template")]
    NotATemplate(ProjectId),

    #[error("evaluation {0} is already completed")]
    AlreadyCompleted(EvaluationId),

    #[error("project not found: {0}")]
    NotFound(ProjectId),

    #[error("{reason}")]
    Forbidden { reason: String },
}

/// Result type for portfolio scoring operations.
pub type Result<T> = std::result::Result<T, QuadrantError>;
