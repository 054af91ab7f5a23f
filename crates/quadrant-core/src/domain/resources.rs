//! Resource requirements of a project.

use serde::{Deserialize, Serialize};

/// Budget split used by portfolio roll-ups. Amounts are in the portfolio's
/// reporting currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(default)]
    pub development: f64,
    #[serde(default)]
    pub infrastructure: f64,
    #[serde(default)]
    pub annual: f64,
}

impl Budget {
    pub fn total(&self) -> f64 {
        self.development + self.infrastructure + self.annual
    }
}

/// People, money and sign-offs a project needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequirements {
    #[serde(default)]
    pub team_size: u32,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_approvals: Vec<String>,
}

impl ResourceRequirements {
    pub fn total_budget(&self) -> f64 {
        self.budget.total()
    }
}
