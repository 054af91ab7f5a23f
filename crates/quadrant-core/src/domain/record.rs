//! The `ai-project-v1.0` interchange record.
//!
//! Explicit structs for the duck-typed records the surrounding system passes
//! around, plus the validation pass run once at the construction boundary.
//! Persistence and transport of these records (files, HTTP) belong to
//! external collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::business::{BusinessContext, ProjectClassification};
use super::error::SchemaIssue;
use super::evaluation::Evaluation;
use super::project::{CurrentScores, ProjectStatus, ProtectionLevel};
use super::resources::ResourceRequirements;
use super::timeline::ProjectTimeline;

/// Schema version written on serialization.
pub const SCHEMA_VERSION: &str = "ai-project-v1.0";

/// Schema versions accepted at the construction boundary.
pub const SUPPORTED_SCHEMAS: &[&str] = &[SCHEMA_VERSION];

/// Identity and lifecycle metadata of a project record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMeta {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub is_template: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protection_level: Option<ProtectionLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration_data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_path: Option<String>,
}

/// The current evaluation plus completed history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationsRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<Evaluation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<Evaluation>,
}

/// Everything under the record's `metadata` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub project: ProjectMeta,
    #[serde(default)]
    pub business: BusinessContext,
    #[serde(default)]
    pub classification: ProjectClassification,
    #[serde(default)]
    pub evaluations: EvaluationsRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_scores: Option<CurrentScores>,
    #[serde(default)]
    pub resources: ResourceRequirements,
    #[serde(default)]
    pub timeline: ProjectTimeline,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_trail: Option<serde_json::Value>,
}

/// A complete `ai-project-v1.0` record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub metadata: RecordMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown_content: Option<String>,
}

impl ProjectRecord {
    /// Check the boundary requirements, collecting every issue found rather
    /// than stopping at the first.
    pub fn validate(&self) -> Vec<SchemaIssue> {
        let mut issues = Vec::new();

        if !SUPPORTED_SCHEMAS.contains(&self.metadata.schema.as_str()) {
            issues.push(SchemaIssue::UnsupportedSchema(self.metadata.schema.clone()));
        }
        if self.metadata.project.id.trim().is_empty() {
            issues.push(SchemaIssue::MissingField("metadata.project.id"));
        }
        if self.metadata.project.name.trim().is_empty() {
            issues.push(SchemaIssue::MissingField("metadata.project.name"));
        }

        issues
    }
}
