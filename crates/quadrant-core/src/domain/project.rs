//! Project aggregate — identity, lifecycle, evaluation history and the
//! derived score snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::business::{BusinessContext, ProjectClassification};
use super::error::{QuadrantError, Result};
use super::evaluation::{Evaluation, EvaluationId, EvaluationStatus};
use super::record::{EvaluationsRecord, ProjectMeta, ProjectRecord, RecordMetadata, SCHEMA_VERSION};
use super::resources::ResourceRequirements;
use super::timeline::ProjectTimeline;
use crate::score::{OverallScore, Trending};

/// Unique, immutable project identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    /// Deterministic id for a given instant and name:
    /// `yyyymmdd_hhmm_<slug(name)>`.
    pub fn generate(name: &str, now: DateTime<Utc>) -> Self {
        ProjectId(format!("{}_{}", now.format("%Y%m%d_%H%M"), slug(name)))
    }
}

/// Lowercase the name, map every non-alphanumeric byte to `_`, keep the
/// first 30 characters.
fn slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(30)
        .collect()
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        ProjectId(id.to_string())
    }
}

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    InProgress,
    Approved,
    Completed,
    Archived,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::InProgress => "in_progress",
            Self::Approved => "approved",
            Self::Completed => "completed",
            Self::Archived => "archived",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "in_progress" => Ok(Self::InProgress),
            "approved" => Ok(Self::Approved),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            other => Err(format!("unknown project status: {other}")),
        }
    }
}

/// Mutation protection applied to templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectionLevel {
    ReadOnly,
    Open,
}

/// Outcome of a permission check. The denial reason is shown to users as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Permission {
    Allowed,
    Denied { reason: String },
}

impl Permission {
    fn denied(reason: impl Into<String>) -> Self {
        Self::Denied {
            reason: reason.into(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    pub fn denial_reason(&self) -> Option<&str> {
        match self {
            Self::Allowed => None,
            Self::Denied { reason } => Some(reason),
        }
    }
}

/// Cached snapshot of the latest completed evaluation's scores.
///
/// Recomputed by [`Project::add_evaluation`]; never hand-edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentScores {
    pub overall: OverallScore,
    pub trending: Trending,
    pub last_updated: DateTime<Utc>,
    pub based_on_evaluation: EvaluationId,
}

/// The aggregate root of the portfolio model.
///
/// Evaluation history and the derived score snapshot are private: history is
/// append-only through [`Project::add_evaluation`], which is also the only
/// place the snapshot is recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    /// Short portfolio key, assigned by the surrounding system.
    pub key: Option<String>,
    pub name: String,
    pub status: ProjectStatus,
    /// Semantic version of the project document.
    pub version: String,

    pub is_template: bool,
    pub template_type: Option<String>,
    pub protection_level: Option<ProtectionLevel>,
    pub calibration_data: Option<serde_json::Value>,

    pub business: BusinessContext,
    pub classification: ProjectClassification,
    pub resources: ResourceRequirements,
    pub timeline: ProjectTimeline,

    evaluations: Vec<Evaluation>,
    current_scores: Option<CurrentScores>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<String>,
    pub audit_trail: Option<serde_json::Value>,
    pub document_path: Option<String>,
    pub markdown_content: Option<String>,
}

impl Project {
    /// Fresh draft project with empty context.
    pub fn new(id: ProjectId, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            key: None,
            name: name.into(),
            status: ProjectStatus::Draft,
            version: "1.0.0".to_string(),
            is_template: false,
            template_type: None,
            protection_level: None,
            calibration_data: None,
            business: BusinessContext::default(),
            classification: ProjectClassification::default(),
            resources: ResourceRequirements::default(),
            timeline: ProjectTimeline::default(),
            evaluations: Vec::new(),
            current_scores: None,
            created_at: now,
            updated_at: now,
            tags: Vec::new(),
            audit_trail: None,
            document_path: None,
            markdown_content: None,
        }
    }

    /// Construct a project from a validated `ai-project-v1.0` record.
    ///
    /// `now` backfills timestamps the record omits.
    ///
    /// # Errors
    ///
    /// Returns `QuadrantError::Schema` listing every violated boundary
    /// requirement.
    pub fn from_record(record: ProjectRecord, now: DateTime<Utc>) -> Result<Self> {
        let issues = record.validate();
        if !issues.is_empty() {
            return Err(QuadrantError::Schema { issues });
        }

        let metadata = record.metadata;
        let meta = metadata.project;

        let mut evaluations = Vec::new();
        if let Some(current) = metadata.evaluations.current {
            evaluations.push(current);
        }
        evaluations.extend(metadata.evaluations.history);

        Ok(Self {
            id: ProjectId(meta.id),
            key: meta.key,
            name: meta.name,
            status: meta.status.unwrap_or_default(),
            version: meta.version.unwrap_or_else(|| "1.0.0".to_string()),
            is_template: meta.is_template,
            template_type: meta.template_type,
            protection_level: meta.protection_level,
            calibration_data: meta.calibration_data,
            business: metadata.business,
            classification: metadata.classification,
            resources: metadata.resources,
            timeline: metadata.timeline,
            evaluations,
            current_scores: metadata.current_scores,
            created_at: meta.created_at.unwrap_or(now),
            updated_at: meta.updated_at.unwrap_or(now),
            tags: metadata.tags,
            audit_trail: metadata.audit_trail,
            document_path: meta.document_path,
            markdown_content: record.markdown_content,
        })
    }

    /// Serialize back into the interchange record.
    ///
    /// Emits the single in-progress evaluation (if any) as `current` plus the
    /// completed history; drafts that are neither are omitted.
    pub fn to_record(&self) -> ProjectRecord {
        let current = self
            .evaluations
            .iter()
            .find(|e| e.status == EvaluationStatus::InProgress)
            .cloned();
        let history = self
            .evaluations
            .iter()
            .filter(|e| e.status == EvaluationStatus::Completed)
            .cloned()
            .collect();

        ProjectRecord {
            metadata: RecordMetadata {
                schema: SCHEMA_VERSION.to_string(),
                project: ProjectMeta {
                    id: self.id.0.clone(),
                    key: self.key.clone(),
                    name: self.name.clone(),
                    status: Some(self.status),
                    version: Some(self.version.clone()),
                    is_template: self.is_template,
                    template_type: self.template_type.clone(),
                    protection_level: self.protection_level,
                    calibration_data: self.calibration_data.clone(),
                    created_at: Some(self.created_at),
                    updated_at: Some(self.updated_at),
                    document_path: self.document_path.clone(),
                },
                business: self.business.clone(),
                classification: self.classification.clone(),
                evaluations: EvaluationsRecord { current, history },
                current_scores: self.current_scores.clone(),
                resources: self.resources.clone(),
                timeline: self.timeline.clone(),
                tags: self.tags.clone(),
                audit_trail: self.audit_trail.clone(),
            },
            markdown_content: self.markdown_content.clone(),
        }
    }

    /// Whether the project may be modified.
    pub fn can_edit(&self) -> Permission {
        if self.is_template && self.protection_level == Some(ProtectionLevel::ReadOnly) {
            return Permission::denied("Template is read-only");
        }
        Permission::Allowed
    }

    /// Whether the project may be deleted.
    pub fn can_delete(&self) -> Permission {
        if self.is_template {
            return Permission::denied("Templates cannot be deleted");
        }
        if matches!(self.status, ProjectStatus::InProgress | ProjectStatus::Approved) {
            return Permission::denied(format!(
                "Cannot delete project with status: {}",
                self.status
            ));
        }
        Permission::Allowed
    }

    pub fn evaluations(&self) -> &[Evaluation] {
        &self.evaluations
    }

    pub fn current_scores(&self) -> Option<&CurrentScores> {
        self.current_scores.as_ref()
    }

    /// Append an evaluation and, when it carries scores, refresh the derived
    /// score snapshot from it.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` when the project already has an evaluation in
    /// progress and the new one is in progress too.
    pub fn add_evaluation(&mut self, evaluation: Evaluation, now: DateTime<Utc>) -> Result<()> {
        if evaluation.status == EvaluationStatus::InProgress
            && self
                .evaluations
                .iter()
                .any(|e| e.status == EvaluationStatus::InProgress)
        {
            return Err(QuadrantError::Forbidden {
                reason: format!("Project {} already has an evaluation in progress", self.id),
            });
        }

        if let Some(scores) = &evaluation.scores {
            let trending = match self.previous_scored_overall() {
                Some(previous) => Trending::between(&scores.overall, previous),
                None => Trending::initial(),
            };
            self.current_scores = Some(CurrentScores {
                overall: scores.overall,
                trending,
                last_updated: now,
                based_on_evaluation: evaluation.id.clone(),
            });
        }

        self.evaluations.push(evaluation);
        self.updated_at = now;
        Ok(())
    }

    /// Overall score of the most recent completed evaluation that carries
    /// scores — the trend baseline for the next evaluation.
    fn previous_scored_overall(&self) -> Option<&OverallScore> {
        self.evaluations
            .iter()
            .filter(|e| e.status == EvaluationStatus::Completed && e.scores.is_some())
            .max_by_key(|e| e.completed_at)
            .and_then(|e| e.scores.as_ref())
            .map(|s| &s.overall)
    }

    /// The most recently completed evaluation, by completion time.
    pub fn current_evaluation(&self) -> Option<&Evaluation> {
        self.evaluations
            .iter()
            .filter(|e| e.status == EvaluationStatus::Completed)
            .max_by_key(|e| e.completed_at)
    }

    /// All evaluations, newest first by start time.
    pub fn evaluation_history(&self) -> Vec<&Evaluation> {
        let mut history: Vec<&Evaluation> = self.evaluations.iter().collect();
        history.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        history
    }

    /// Clone this template into a fresh draft project.
    ///
    /// The clone gets a generated id, no key, no evaluation record and none
    /// of the template-only fields.
    ///
    /// # Errors
    ///
    /// Returns `NotATemplate` when called on a regular project.
    pub fn create_from_template(&self, now: DateTime<Utc>) -> Result<Self> {
        if !self.is_template {
            return Err(QuadrantError::NotATemplate(self.id.clone()));
        }

        Ok(Self {
            id: ProjectId::generate(&self.name, now),
            key: None,
            name: self.name.clone(),
            status: ProjectStatus::Draft,
            version: "1.0.0".to_string(),
            is_template: false,
            template_type: None,
            protection_level: None,
            calibration_data: None,
            business: self.business.clone(),
            classification: self.classification.clone(),
            resources: self.resources.clone(),
            timeline: self.timeline.clone(),
            evaluations: Vec::new(),
            current_scores: None,
            created_at: now,
            updated_at: now,
            tags: self.tags.clone(),
            audit_trail: self.audit_trail.clone(),
            document_path: self.document_path.clone(),
            markdown_content: self.markdown_content.clone(),
        })
    }
}
