//! Project timeline — phases, milestones and progress.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Planned,
    InProgress,
    Completed,
}

impl Default for PhaseStatus {
    fn default() -> Self {
        Self::Planned
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: PhaseStatus,
    /// Completion fraction in `[0, 1]` within the phase.
    #[serde(default)]
    pub progress: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    Pending,
    Completed,
}

impl Default for MilestoneStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub status: MilestoneStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Planned execution of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTimeline {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phases: Vec<Phase>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub milestones: Vec<Milestone>,
    #[serde(default, rename = "expectedROI", skip_serializing_if = "Option::is_none")]
    pub expected_roi: Option<String>,
}

impl ProjectTimeline {
    /// The phase currently being executed, or the next planned one.
    pub fn current_phase(&self) -> Option<&Phase> {
        self.phases
            .iter()
            .find(|p| p.status == PhaseStatus::InProgress)
            .or_else(|| self.phases.iter().find(|p| p.status == PhaseStatus::Planned))
    }

    /// Fraction of phases completed. Zero for an empty timeline.
    pub fn progress(&self) -> f64 {
        if self.phases.is_empty() {
            return 0.0;
        }
        let completed = self
            .phases
            .iter()
            .filter(|p| p.status == PhaseStatus::Completed)
            .count();
        completed as f64 / self.phases.len() as f64
    }
}
