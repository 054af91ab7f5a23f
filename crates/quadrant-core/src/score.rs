//! Score types produced by a scoring run, and the trend arithmetic on them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Round to two decimal places, half away from zero.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Priority quadrant derived from value/risk thresholds.
///
/// Label and color are derived lookups, never stored alongside the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub u8);

impl Priority {
    pub const HIGHEST: Priority = Priority(1);
    pub const LOWEST: Priority = Priority(4);

    /// Human-readable quadrant label.
    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "High Value / Low Risk",
            2 => "High Value / High Risk",
            3 => "Medium Value / Low Risk",
            4 => "Low Value / High Risk",
            _ => "Unknown",
        }
    }

    /// Display color for dashboards.
    pub fn color(self) -> &'static str {
        match self.0 {
            1 => "#4ade80",
            2 => "#fbbf24",
            3 => "#60a5fa",
            4 => "#f87171",
            _ => "#94a3b8",
        }
    }

    /// Signed change relative to a previous priority (negative = improved).
    pub fn delta_from(self, previous: Priority) -> i16 {
        i16::from(self.0) - i16::from(previous.0)
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The overall outcome of one scoring run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallScore {
    /// `round2(value score − risk score)`.
    pub final_score: f64,
    pub priority: Priority,
    /// Rating completeness/extremeness measure in `[0, 1]`.
    pub confidence: f64,
}

/// Score of a single dimension (`value` or `risk`) with its raw inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScore {
    /// Weighted sum for the dimension, rounded to two decimals.
    pub score: f64,
    /// Raw ratings per criterion that contributed to `score`.
    #[serde(default)]
    pub breakdown: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

/// Immutable result of a scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSet {
    pub overall: OverallScore,
    /// Dimension name (`value`, `risk`, …) to its score and breakdown.
    #[serde(default)]
    pub dimensions: BTreeMap<String, DimensionScore>,
}

impl ScoreSet {
    pub fn priority_label(&self) -> &'static str {
        self.overall.priority.label()
    }

    pub fn priority_color(&self) -> &'static str {
        self.overall.priority.color()
    }
}

/// Direction of score movement between consecutive completed evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// First evaluation on record.
    New,
    Improving,
    Declining,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Improving => write!(f, "improving"),
            Self::Declining => write!(f, "declining"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

/// Score deltas against the previous completed evaluation.
///
/// The ±0.1 band around zero reads as `Stable` so small re-rating noise does
/// not flap the trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trending {
    pub trend: TrendDirection,
    /// `round2(new final − previous final)`.
    pub score_change: f64,
    /// Signed priority movement (negative = toward priority 1).
    pub priority_change: i16,
    /// Unrounded confidence delta.
    pub confidence_change: f64,
}

impl Trending {
    /// Trend for a project's first scored evaluation.
    pub fn initial() -> Self {
        Self {
            trend: TrendDirection::New,
            score_change: 0.0,
            priority_change: 0,
            confidence_change: 0.0,
        }
    }

    /// Compare a new overall score against the previous one.
    ///
    /// The trend band is applied to the unrounded delta; only the stored
    /// `score_change` is rounded.
    pub fn between(current: &OverallScore, previous: &OverallScore) -> Self {
        let delta = current.final_score - previous.final_score;
        let trend = if delta > 0.1 {
            TrendDirection::Improving
        } else if delta < -0.1 {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        };
        Self {
            trend,
            score_change: round2(delta),
            priority_change: current.priority.delta_from(previous.priority),
            confidence_change: current.confidence - previous.confidence,
        }
    }
}
