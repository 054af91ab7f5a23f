//! Evaluations — scored assessments of a project at a point in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::business::Person;
use super::error::{QuadrantError, Result};
use crate::score::ScoreSet;

/// Unique identifier for an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationId(pub String);

impl EvaluationId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        EvaluationId(format!("eval_{}", Uuid::new_v4().simple()))
    }
}

impl std::fmt::Display for EvaluationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EvaluationId {
    fn from(id: &str) -> Self {
        EvaluationId(id.to_string())
    }
}

/// Lifecycle state of an evaluation: Draft → InProgress → Completed, strictly
/// forward. Abandonment is simply a non-terminal status that never advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    Draft,
    /// Accepts the legacy `current` spelling found in older records.
    #[serde(alias = "current")]
    InProgress,
    Completed,
}

impl Default for EvaluationStatus {
    fn default() -> Self {
        Self::Draft
    }
}

/// Who produced an evaluation.
///
/// A tagged union rather than an open record: each kind carries exactly the
/// fields that make sense for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Evaluator {
    Human {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        role: Option<String>,
    },
    Algorithmic {
        name: String,
        version: String,
    },
    Committee {
        name: String,
        #[serde(default)]
        members: Vec<Person>,
    },
}

impl Evaluator {
    /// Convenience constructor for the common human case.
    pub fn human(name: impl Into<String>) -> Self {
        Self::Human {
            name: name.into(),
            email: None,
            role: None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Human { name, .. } | Self::Algorithmic { name, .. } | Self::Committee { name, .. } => name,
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, Self::Human { .. })
    }

    pub fn is_algorithmic(&self) -> bool {
        matches!(self, Self::Algorithmic { .. })
    }

    pub fn is_committee(&self) -> bool {
        matches!(self, Self::Committee { .. })
    }
}

/// A scored assessment of a project against one rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    #[serde(rename = "evaluationId")]
    pub id: EvaluationId,
    /// Rubric the ratings were collected against.
    #[serde(rename = "type")]
    pub rubric_id: String,
    #[serde(default)]
    pub status: EvaluationStatus,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub evaluator: Evaluator,
    /// Set exactly once, by [`Evaluation::complete`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<ScoreSet>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_assessment: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
}

impl Evaluation {
    /// Create a draft evaluation with no scores.
    pub fn new(rubric_id: impl Into<String>, evaluator: Evaluator, now: DateTime<Utc>) -> Self {
        Self {
            id: EvaluationId::generate(),
            rubric_id: rubric_id.into(),
            status: EvaluationStatus::Draft,
            started_at: now,
            completed_at: None,
            evaluator,
            scores: None,
            recommendations: Vec::new(),
            risk_assessment: None,
            additional_notes: None,
            attachments: Vec::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == EvaluationStatus::Completed
    }

    /// Move a draft evaluation into `in_progress`.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyCompleted` once the evaluation is terminal.
    pub fn start(&mut self) -> Result<()> {
        if self.is_completed() {
            return Err(QuadrantError::AlreadyCompleted(self.id.clone()));
        }
        self.status = EvaluationStatus::InProgress;
        Ok(())
    }

    /// Finalize the evaluation, atomically setting scores, recommendations
    /// and the completion timestamp. `completed_at` never precedes
    /// `started_at`.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyCompleted` on a second completion — history is
    /// append-only, so finalized scores are never overwritten.
    pub fn complete(
        &mut self,
        scores: ScoreSet,
        recommendations: Vec<String>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if self.is_completed() {
            return Err(QuadrantError::AlreadyCompleted(self.id.clone()));
        }
        self.status = EvaluationStatus::Completed;
        self.completed_at = Some(now.max(self.started_at));
        self.scores = Some(scores);
        self.recommendations = recommendations;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{OverallScore, Priority, ScoreSet};
    use std::collections::BTreeMap;

    fn sample_scores() -> ScoreSet {
        ScoreSet {
            overall: OverallScore {
                final_score: 3.01,
                priority: Priority(1),
                confidence: 0.85,
            },
            dimensions: BTreeMap::new(),
        }
    }

    #[test]
    fn test_new_evaluation_is_draft() {
        let eval = Evaluation::new("quick_assessment", Evaluator::human("alice"), Utc::now());
        assert_eq!(eval.status, EvaluationStatus::Draft);
        assert!(eval.scores.is_none());
        assert!(eval.completed_at.is_none());
        assert!(eval.id.0.starts_with("eval_"));
    }

    #[test]
    fn test_start_moves_to_in_progress() {
        let mut eval = Evaluation::new("quick_assessment", Evaluator::human("alice"), Utc::now());
        eval.start().unwrap();
        assert_eq!(eval.status, EvaluationStatus::InProgress);
    }

    #[test]
    fn test_complete_sets_scores_and_timestamp() {
        let started = Utc::now();
        let mut eval = Evaluation::new("quick_assessment", Evaluator::human("alice"), started);
        let completed = started + chrono::Duration::minutes(10);
        eval.complete(sample_scores(), vec!["ship it".to_string()], completed)
            .unwrap();
        assert_eq!(eval.status, EvaluationStatus::Completed);
        assert_eq!(eval.completed_at, Some(completed));
        assert_eq!(eval.scores, Some(sample_scores()));
        assert_eq!(eval.recommendations, vec!["ship it"]);
    }

    #[test]
    fn test_complete_twice_fails() {
        let mut eval = Evaluation::new("quick_assessment", Evaluator::human("alice"), Utc::now());
        eval.complete(sample_scores(), Vec::new(), Utc::now()).unwrap();
        let err = eval
            .complete(sample_scores(), Vec::new(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, QuadrantError::AlreadyCompleted(_)));
    }

    #[test]
    fn test_start_after_complete_fails() {
        let mut eval = Evaluation::new("quick_assessment", Evaluator::human("alice"), Utc::now());
        eval.complete(sample_scores(), Vec::new(), Utc::now()).unwrap();
        assert!(matches!(
            eval.start().unwrap_err(),
            QuadrantError::AlreadyCompleted(_)
        ));
    }

    #[test]
    fn test_completed_at_never_precedes_started_at() {
        let started = Utc::now();
        let mut eval = Evaluation::new("quick_assessment", Evaluator::human("alice"), started);
        eval.complete(
            sample_scores(),
            Vec::new(),
            started - chrono::Duration::seconds(30),
        )
        .unwrap();
        assert_eq!(eval.completed_at, Some(started));
    }

    #[test]
    fn test_evaluator_kinds() {
        assert!(Evaluator::human("alice").is_human());
        let algo = Evaluator::Algorithmic {
            name: "auto-scorer".to_string(),
            version: "2.1.0".to_string(),
        };
        assert!(algo.is_algorithmic());
        assert_eq!(algo.name(), "auto-scorer");
        let committee = Evaluator::Committee {
            name: "arch-board".to_string(),
            members: vec![Person::new("bob")],
        };
        assert!(committee.is_committee());
    }

    #[test]
    fn test_evaluator_serde_tagging() {
        let json = serde_json::to_string(&Evaluator::human("alice")).unwrap();
        assert!(json.contains("\"type\":\"human\""));
        let back: Evaluator = serde_json::from_str(&json).unwrap();
        assert!(back.is_human());
    }

    #[test]
    fn test_status_accepts_current_alias() {
        let status: EvaluationStatus = serde_json::from_str("\"current\"").unwrap();
        assert_eq!(status, EvaluationStatus::InProgress);
        let status: EvaluationStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(status, EvaluationStatus::InProgress);
    }

    #[test]
    fn test_evaluation_serde_roundtrip() {
        let mut eval = Evaluation::new("quick_assessment", Evaluator::human("alice"), Utc::now());
        eval.complete(sample_scores(), vec!["expand pilot".to_string()], Utc::now())
            .unwrap();
        let json = serde_json::to_string(&eval).unwrap();
        assert!(json.contains("evaluationId"));
        assert!(json.contains("\"type\":\"quick_assessment\""));
        let back: Evaluation = serde_json::from_str(&json).unwrap();
        assert_eq!(eval, back);
    }
}
