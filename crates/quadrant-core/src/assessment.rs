//! Objective assessment — derives 1–5 criteria ratings from structured
//! project facts, with no subjective interpretation.
//!
//! Each dimension folds three objective components into one rating; the
//! resulting map feeds the `deep_dive` rubric. All level scales are plain
//! serde data so fact records can come straight from intake forms.

use serde::{Deserialize, Serialize};

use crate::scoring::CriteriaRatings;

/// Fold three component scores into a 1–5 dimension rating.
fn fold(a: u32, b: u32, c: u32) -> f64 {
    ((1 + a + b + c) / 3).clamp(1, 5) as f64
}

// ---------------------------------------------------------------------------
// Level scales
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnologyType {
    #[default]
    ExistingApis,
    MinorCustomization,
    CustomDevelopment,
    CuttingEdge,
    Experimental,
}

impl TechnologyType {
    fn component(self) -> u32 {
        match self {
            Self::ExistingApis => 1,
            Self::MinorCustomization => 2,
            Self::CustomDevelopment => 3,
            Self::CuttingEdge => 4,
            Self::Experimental => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfrastructureLevel {
    #[default]
    Existing,
    MinorAdditions,
    ModerateNew,
    SignificantChanges,
    MajorOverhaul,
}

impl InfrastructureLevel {
    fn component(self) -> u32 {
        match self {
            Self::Existing => 1,
            Self::MinorAdditions => 2,
            Self::ModerateNew => 3,
            Self::SignificantChanges => 4,
            Self::MajorOverhaul => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpertiseRequired {
    #[default]
    CurrentSkills,
    MinorTraining,
    SomeHiring,
    ExternalExpertise,
    MultipleSpecialists,
}

impl ExpertiseRequired {
    fn component(self) -> u32 {
        match self {
            Self::CurrentSkills => 1,
            Self::MinorTraining => 2,
            Self::SomeHiring => 3,
            Self::ExternalExpertise => 4,
            Self::MultipleSpecialists => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegulatoryLevel {
    #[default]
    None,
    Minor,
    Some,
    Significant,
    Heavy,
}

impl RegulatoryLevel {
    fn component(self) -> u32 {
        match self {
            Self::None => 1,
            Self::Minor => 2,
            Self::Some => 3,
            Self::Significant => 4,
            Self::Heavy => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserAdoption {
    #[default]
    HighAcceptance,
    GoodBuyin,
    ModerateChange,
    SubstantialResistance,
    HighResistance,
}

impl UserAdoption {
    fn component(self) -> u32 {
        match self {
            Self::HighAcceptance => 1,
            Self::GoodBuyin => 2,
            Self::ModerateChange => 3,
            Self::SubstantialResistance => 4,
            Self::HighResistance => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationalImprovement {
    #[default]
    Minimal,
    Modest,
    Noticeable,
    Significant,
    Revolutionary,
}

impl OperationalImprovement {
    fn component(self) -> u32 {
        match self {
            Self::Minimal => 1,
            Self::Modest => 2,
            Self::Noticeable => 3,
            Self::Significant => 4,
            Self::Revolutionary => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactScope {
    #[default]
    SingleTeam,
    Department,
    MultiDepartment,
    OrganizationWide,
    IndustryLevel,
}

impl ImpactScope {
    fn component(self) -> u32 {
        match self {
            Self::SingleTeam => 1,
            Self::Department => 2,
            Self::MultiDepartment => 3,
            Self::OrganizationWide => 4,
            Self::IndustryLevel => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitiveAdvantage {
    #[default]
    None,
    Minor,
    Meaningful,
    Major,
    MarketLeadership,
}

impl CompetitiveAdvantage {
    fn component(self) -> u32 {
        match self {
            Self::None => 1,
            Self::Minor => 2,
            Self::Meaningful => 3,
            Self::Major => 4,
            Self::MarketLeadership => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reusability {
    #[default]
    SingleUse,
    FewSimilar,
    MultipleRelated,
    CrossFunctional,
    PlatformPotential,
}

impl Reusability {
    fn component(self) -> u32 {
        match self {
            Self::SingleUse => 1,
            Self::FewSimilar => 2,
            Self::MultipleRelated => 3,
            Self::CrossFunctional => 4,
            Self::PlatformPotential => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionCapability {
    #[default]
    Difficult,
    MinorPossible,
    ModerateCapable,
    HighCapable,
    ExponentialScaling,
}

impl ExtensionCapability {
    fn component(self) -> u32 {
        match self {
            Self::Difficult => 1,
            Self::MinorPossible => 2,
            Self::ModerateCapable => 3,
            Self::HighCapable => 4,
            Self::ExponentialScaling => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonetizationPotential {
    #[default]
    NoExternal,
    LimitedInterest,
    SomeApplications,
    GoodMarket,
    HighMonetization,
}

impl MonetizationPotential {
    fn component(self) -> u32 {
        match self {
            Self::NoExternal => 1,
            Self::LimitedInterest => 2,
            Self::SomeApplications => 3,
            Self::GoodMarket => 4,
            Self::HighMonetization => 5,
        }
    }
}

// Timeline scales are inverted: faster and lighter is a better rating.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevelopmentCycle {
    Immediate,
    Rapid,
    #[default]
    Standard,
    Long,
    Extended,
}

impl DevelopmentCycle {
    fn component(self) -> u32 {
        match self {
            Self::Immediate => 5,
            Self::Rapid => 4,
            Self::Standard => 3,
            Self::Long => 2,
            Self::Extended => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentComplexity {
    Instant,
    Quick,
    #[default]
    Phased,
    Gradual,
    Complex,
}

impl DeploymentComplexity {
    fn component(self) -> u32 {
        match self {
            Self::Instant => 5,
            Self::Quick => 4,
            Self::Phased => 3,
            Self::Gradual => 2,
            Self::Complex => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRequirements {
    None,
    Minimal,
    #[default]
    Normal,
    Standard,
    Extensive,
}

impl ValidationRequirements {
    fn component(self) -> u32 {
        match self {
            Self::None => 5,
            Self::Minimal => 4,
            Self::Normal => 3,
            Self::Standard => 2,
            Self::Extensive => 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Fact groups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalFacts {
    pub technology_type: TechnologyType,
    pub integration_count: u32,
    pub team_experience_percent: u32,
}

impl Default for TechnicalFacts {
    fn default() -> Self {
        Self {
            technology_type: TechnologyType::default(),
            integration_count: 0,
            team_experience_percent: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceFacts {
    pub team_size: u32,
    pub infrastructure_level: InfrastructureLevel,
    pub expertise_required: ExpertiseRequired,
}

impl Default for ResourceFacts {
    fn default() -> Self {
        Self {
            team_size: 1,
            infrastructure_level: InfrastructureLevel::default(),
            expertise_required: ExpertiseRequired::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskFacts {
    pub regulatory_level: RegulatoryLevel,
    pub user_adoption: UserAdoption,
    pub external_dependencies_count: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessFacts {
    pub operational_improvement: OperationalImprovement,
    pub impact_scope: ImpactScope,
    pub competitive_advantage: CompetitiveAdvantage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalabilityFacts {
    pub reusability: Reusability,
    pub extension_capability: ExtensionCapability,
    pub monetization_potential: MonetizationPotential,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineFacts {
    pub development_cycle: DevelopmentCycle,
    pub deployment_complexity: DeploymentComplexity,
    pub validation_requirements: ValidationRequirements,
}

/// All objective facts collected for one project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectFacts {
    pub technical: TechnicalFacts,
    pub resources: ResourceFacts,
    pub risk: RiskFacts,
    pub business: BusinessFacts,
    pub scalability: ScalabilityFacts,
    pub timeline: TimelineFacts,
}

// ---------------------------------------------------------------------------
// Dimension scorers
// ---------------------------------------------------------------------------

fn integration_component(count: u32) -> u32 {
    match count {
        0..=1 => 1,
        2 => 2,
        3..=5 => 3,
        6..=10 => 4,
        _ => 5,
    }
}

fn experience_component(percent: u32) -> u32 {
    match percent {
        80.. => 1,
        60..=79 => 2,
        40..=59 => 3,
        20..=39 => 4,
        _ => 5,
    }
}

fn team_size_component(size: u32) -> u32 {
    match size {
        0..=2 => 1,
        3..=4 => 2,
        5..=6 => 3,
        7..=10 => 4,
        _ => 5,
    }
}

fn dependencies_component(count: u32) -> u32 {
    match count {
        0 => 1,
        1..=2 => 2,
        3..=5 => 3,
        6..=10 => 4,
        _ => 5,
    }
}

pub fn score_technical_complexity(facts: &TechnicalFacts) -> f64 {
    fold(
        facts.technology_type.component(),
        integration_component(facts.integration_count),
        experience_component(facts.team_experience_percent),
    )
}

pub fn score_resource_requirements(facts: &ResourceFacts) -> f64 {
    fold(
        team_size_component(facts.team_size),
        facts.infrastructure_level.component(),
        facts.expertise_required.component(),
    )
}

pub fn score_implementation_risk(facts: &RiskFacts) -> f64 {
    fold(
        facts.regulatory_level.component(),
        facts.user_adoption.component(),
        dependencies_component(facts.external_dependencies_count),
    )
}

pub fn score_business_impact(facts: &BusinessFacts) -> f64 {
    fold(
        facts.operational_improvement.component(),
        facts.impact_scope.component(),
        facts.competitive_advantage.component(),
    )
}

pub fn score_scalability_potential(facts: &ScalabilityFacts) -> f64 {
    fold(
        facts.reusability.component(),
        facts.extension_capability.component(),
        facts.monetization_potential.component(),
    )
}

pub fn score_implementation_timeline(facts: &TimelineFacts) -> f64 {
    fold(
        facts.development_cycle.component(),
        facts.deployment_complexity.component(),
        facts.validation_requirements.component(),
    )
}

/// Derive the full `deep_dive` rating map from a fact sheet.
pub fn derive_ratings(facts: &ProjectFacts) -> CriteriaRatings {
    let mut ratings = CriteriaRatings::new();
    ratings.insert(
        "technical_complexity".to_string(),
        score_technical_complexity(&facts.technical),
    );
    ratings.insert(
        "resource_requirements".to_string(),
        score_resource_requirements(&facts.resources),
    );
    ratings.insert(
        "implementation_risk".to_string(),
        score_implementation_risk(&facts.risk),
    );
    ratings.insert(
        "business_impact".to_string(),
        score_business_impact(&facts.business),
    );
    ratings.insert(
        "scalability_potential".to_string(),
        score_scalability_potential(&facts.scalability),
    );
    ratings.insert(
        "implementation_timeline".to_string(),
        score_implementation_timeline(&facts.timeline),
    );
    ratings
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The exotic-trades worked example from the intake sheet.
    fn exotic_trades() -> ProjectFacts {
        ProjectFacts {
            technical: TechnicalFacts {
                technology_type: TechnologyType::CuttingEdge,
                integration_count: 6,
                team_experience_percent: 30,
            },
            resources: ResourceFacts {
                team_size: 7,
                infrastructure_level: InfrastructureLevel::SignificantChanges,
                expertise_required: ExpertiseRequired::ExternalExpertise,
            },
            risk: RiskFacts {
                regulatory_level: RegulatoryLevel::Significant,
                user_adoption: UserAdoption::SubstantialResistance,
                external_dependencies_count: 4,
            },
            business: BusinessFacts {
                operational_improvement: OperationalImprovement::Significant,
                impact_scope: ImpactScope::OrganizationWide,
                competitive_advantage: CompetitiveAdvantage::Major,
            },
            scalability: ScalabilityFacts {
                reusability: Reusability::PlatformPotential,
                extension_capability: ExtensionCapability::HighCapable,
                monetization_potential: MonetizationPotential::HighMonetization,
            },
            timeline: TimelineFacts {
                development_cycle: DevelopmentCycle::Standard,
                deployment_complexity: DeploymentComplexity::Phased,
                validation_requirements: ValidationRequirements::Extensive,
            },
        }
    }

    #[test]
    fn test_exotic_trades_dimension_ratings() {
        let facts = exotic_trades();
        assert_eq!(score_technical_complexity(&facts.technical), 4.0);
        assert_eq!(score_resource_requirements(&facts.resources), 4.0);
        assert_eq!(score_implementation_risk(&facts.risk), 4.0);
        assert_eq!(score_business_impact(&facts.business), 4.0);
        assert_eq!(score_scalability_potential(&facts.scalability), 5.0);
        assert_eq!(score_implementation_timeline(&facts.timeline), 2.0);
    }

    #[test]
    fn test_derive_ratings_covers_every_deep_dive_criterion() {
        let ratings = derive_ratings(&exotic_trades());
        let rubric = crate::rubric::Rubric::deep_dive();
        for criterion in &rubric.criteria {
            assert!(ratings.contains_key(&criterion.id), "{} missing", criterion.id);
        }
        assert_eq!(ratings.len(), rubric.criteria.len());
    }

    #[test]
    fn test_default_facts_produce_minimal_complexity() {
        let facts = ProjectFacts::default();
        assert_eq!(score_technical_complexity(&facts.technical), 1.0);
        assert_eq!(score_resource_requirements(&facts.resources), 1.0);
        assert_eq!(score_implementation_risk(&facts.risk), 1.0);
    }

    #[test]
    fn test_fold_clamps_to_rating_scale() {
        assert_eq!(fold(5, 5, 5), 5.0);
        assert_eq!(fold(1, 1, 1), 1.0);
        // (1 + 4 + 4 + 4) / 3 = 4 with integer division.
        assert_eq!(fold(4, 4, 4), 4.0);
    }

    #[test]
    fn test_component_boundaries() {
        assert_eq!(integration_component(1), 1);
        assert_eq!(integration_component(2), 2);
        assert_eq!(integration_component(5), 3);
        assert_eq!(integration_component(11), 5);

        assert_eq!(experience_component(80), 1);
        assert_eq!(experience_component(79), 2);
        assert_eq!(experience_component(19), 5);

        assert_eq!(team_size_component(2), 1);
        assert_eq!(team_size_component(10), 4);

        assert_eq!(dependencies_component(0), 1);
        assert_eq!(dependencies_component(6), 4);
    }

    #[test]
    fn test_facts_parse_from_snake_case_json() {
        let json = r#"{
            "technical": {
                "technology_type": "cutting_edge",
                "integration_count": 6,
                "team_experience_percent": 30
            },
            "timeline": {
                "validation_requirements": "extensive"
            }
        }"#;
        let facts: ProjectFacts = serde_json::from_str(json).unwrap();
        assert_eq!(facts.technical.technology_type, TechnologyType::CuttingEdge);
        assert_eq!(
            facts.timeline.validation_requirements,
            ValidationRequirements::Extensive
        );
        // Unspecified groups fall back to their defaults.
        assert_eq!(facts.resources.team_size, 1);
        assert_eq!(facts.technical.team_experience_percent, 30);
    }

    #[test]
    fn test_facts_serde_roundtrip() {
        let facts = exotic_trades();
        let json = serde_json::to_string(&facts).unwrap();
        let back: ProjectFacts = serde_json::from_str(&json).unwrap();
        assert_eq!(facts, back);
    }
}
