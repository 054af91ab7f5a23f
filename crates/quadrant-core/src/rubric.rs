//! Rubric definitions — named, versioned sets of weighted criteria plus
//! data-driven priority rules.
//!
//! Rubrics are pure data: every predicate is a serializable threshold
//! descriptor, so rubrics can be versioned, diffed and tested without code
//! changes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::error::{QuadrantError, Result};
use crate::score::Priority;

/// Label used when no priority rule matches. A defined outcome, not an error.
pub const UNCLASSIFIED_LABEL: &str = "Unclassified";

/// Inclusive rating bounds for a criterion. `max` must exceed `min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self { min: 1.0, max: 5.0 }
    }
}

impl ScoreRange {
    pub fn contains(&self, rating: f64) -> bool {
        rating >= self.min && rating <= self.max
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn half_span(&self) -> f64 {
        (self.max - self.min) / 2.0
    }

    /// Rating actually fed into the weighted sum.
    ///
    /// Reversed criteria flip the scale, so a rating at `max` contributes as
    /// if it were at `min`.
    pub fn effective(&self, rating: f64, reverse: bool) -> f64 {
        if reverse {
            self.min + self.max - rating
        } else {
            rating
        }
    }
}

/// Which dimension a criterion contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionCategory {
    BusinessValue,
    RiskFactor,
}

impl CriterionCategory {
    /// Dimension name used in [`crate::score::ScoreSet::dimensions`].
    pub fn dimension_key(self) -> &'static str {
        match self {
            Self::BusinessValue => "value",
            Self::RiskFactor => "risk",
        }
    }
}

/// A single rated dimension of a rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: String,
    pub category: CriterionCategory,
    /// Weight of this criterion within its category. Weights within a
    /// category conventionally sum to 1 but are not required to.
    pub weight: f64,
    #[serde(default)]
    pub score_range: ScoreRange,
    #[serde(default)]
    pub reverse_score: bool,
}

impl Criterion {
    pub fn new(id: impl Into<String>, category: CriterionCategory, weight: f64) -> Self {
        Self {
            id: id.into(),
            category,
            weight,
            score_range: ScoreRange::default(),
            reverse_score: false,
        }
    }

    /// Mark the criterion as reverse-scored.
    pub fn reversed(mut self) -> Self {
        self.reverse_score = true;
        self
    }
}

/// A serializable predicate mapping a (value, risk) pair to a priority.
///
/// All set thresholds must hold for the rule to match. Rules are evaluated
/// in rubric order, first match wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_at_least: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_below: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_at_most: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_above: Option<f64>,
    pub priority: Priority,
    pub label: String,
}

impl PriorityRule {
    /// Rule with no thresholds — matches everything.
    pub fn new(priority: Priority, label: impl Into<String>) -> Self {
        Self {
            value_at_least: None,
            value_below: None,
            risk_at_most: None,
            risk_above: None,
            priority,
            label: label.into(),
        }
    }

    pub fn with_value_at_least(mut self, threshold: f64) -> Self {
        self.value_at_least = Some(threshold);
        self
    }

    pub fn with_value_below(mut self, threshold: f64) -> Self {
        self.value_below = Some(threshold);
        self
    }

    pub fn with_risk_at_most(mut self, threshold: f64) -> Self {
        self.risk_at_most = Some(threshold);
        self
    }

    pub fn with_risk_above(mut self, threshold: f64) -> Self {
        self.risk_above = Some(threshold);
        self
    }

    pub fn matches(&self, value: f64, risk: f64) -> bool {
        self.value_at_least.is_none_or(|t| value >= t)
            && self.value_below.is_none_or(|t| value < t)
            && self.risk_at_most.is_none_or(|t| risk <= t)
            && self.risk_above.is_none_or(|t| risk > t)
    }
}

/// A named, versioned scoring rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rubric {
    pub id: String,
    pub name: String,
    pub version: String,
    pub criteria: Vec<Criterion>,
    pub priority_rules: Vec<PriorityRule>,
}

impl Rubric {
    pub fn criterion(&self, id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.id == id)
    }

    /// Classify an unrounded (value, risk) pair.
    ///
    /// Returns the first matching rule's priority and label, or priority 4
    /// labelled [`UNCLASSIFIED_LABEL`] when nothing matches.
    pub fn classify(&self, value: f64, risk: f64) -> (Priority, &str) {
        for rule in &self.priority_rules {
            if rule.matches(value, risk) {
                return (rule.priority, rule.label.as_str());
            }
        }
        (Priority::LOWEST, UNCLASSIFIED_LABEL)
    }

    /// The six-criterion quick assessment used by the portfolio dashboard.
    ///
    /// Risk criteria are rated directly on a risk scale (5 = very complex),
    /// so none of them reverse.
    pub fn quick_assessment() -> Self {
        use CriterionCategory::{BusinessValue, RiskFactor};
        Self {
            id: "quick_assessment".to_string(),
            name: "Quick Assessment".to_string(),
            version: "1.0".to_string(),
            criteria: vec![
                Criterion::new("revenue_impact", BusinessValue, 0.33),
                Criterion::new("time_to_value", BusinessValue, 0.33),
                Criterion::new("strategic_alignment", BusinessValue, 0.34),
                Criterion::new("technical_complexity", RiskFactor, 0.33),
                Criterion::new("data_availability", RiskFactor, 0.33),
                Criterion::new("resource_requirements", RiskFactor, 0.34),
            ],
            priority_rules: vec![
                PriorityRule::new(Priority(1), "High Value / Low Risk")
                    .with_value_at_least(3.5)
                    .with_risk_at_most(2.5),
                PriorityRule::new(Priority(2), "High Value / High Risk")
                    .with_value_at_least(3.5)
                    .with_risk_above(2.5),
                PriorityRule::new(Priority(3), "Medium Value / Low Risk")
                    .with_value_below(3.5)
                    .with_risk_at_most(2.5),
                PriorityRule::new(Priority(4), "Low Value / High Risk")
                    .with_value_below(3.5)
                    .with_risk_above(2.5),
            ],
        }
    }

    /// The six-dimension deep dive rubric scored from objective facts
    /// (see [`crate::assessment`]).
    pub fn deep_dive() -> Self {
        use CriterionCategory::{BusinessValue, RiskFactor};
        Self {
            id: "deep_dive".to_string(),
            name: "Deep Dive Assessment".to_string(),
            version: "1.0".to_string(),
            criteria: vec![
                Criterion::new("business_impact", BusinessValue, 0.417),
                Criterion::new("scalability_potential", BusinessValue, 0.333),
                Criterion::new("implementation_timeline", BusinessValue, 0.25),
                Criterion::new("technical_complexity", RiskFactor, 0.375),
                Criterion::new("resource_requirements", RiskFactor, 0.375),
                Criterion::new("implementation_risk", RiskFactor, 0.25),
            ],
            priority_rules: vec![
                PriorityRule::new(Priority(1), "Immediate implementation")
                    .with_value_at_least(4.0)
                    .with_risk_at_most(2.5),
                PriorityRule::new(Priority(2), "Detailed planning required")
                    .with_value_at_least(4.0)
                    .with_risk_at_most(3.5),
                PriorityRule::new(Priority(2), "Risk mitigation planning").with_value_at_least(4.0),
                PriorityRule::new(Priority(3), "Quick wins consideration")
                    .with_value_at_least(3.0)
                    .with_risk_at_most(2.5),
                PriorityRule::new(Priority(4), "Defer pending improvements")
                    .with_value_at_least(3.0),
                PriorityRule::new(Priority(4), "Reject or major redesign"),
            ],
        }
    }
}

/// Registry of rubrics known to the scoring engine, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct RubricRegistry {
    rubrics: HashMap<String, Rubric>,
}

impl RubricRegistry {
    /// Registry with no rubrics.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in rubrics.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Rubric::quick_assessment());
        registry.register(Rubric::deep_dive());
        registry
    }

    /// Register a rubric, replacing any previous one with the same id.
    pub fn register(&mut self, rubric: Rubric) {
        self.rubrics.insert(rubric.id.clone(), rubric);
    }

    /// Look up a rubric by id.
    ///
    /// # Errors
    ///
    /// Returns `QuadrantError::UnknownRubric` for unregistered ids.
    pub fn get(&self, rubric_id: &str) -> Result<&Rubric> {
        self.rubrics
            .get(rubric_id)
            .ok_or_else(|| QuadrantError::UnknownRubric(rubric_id.to_string()))
    }

    /// Registered rubric ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.rubrics.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
