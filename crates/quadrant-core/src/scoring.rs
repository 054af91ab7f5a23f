//! Deterministic score computation — criteria ratings × rubric → [`ScoreSet`].

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::debug;

use crate::domain::error::{QuadrantError, Result};
use crate::domain::evaluation::{Evaluation, Evaluator};
use crate::rubric::{CriterionCategory, Rubric, RubricRegistry};
use crate::score::{round2, DimensionScore, OverallScore, ScoreSet};

/// Ratings keyed by criterion id. Criteria without a rating are skipped
/// entirely — they contribute neither weight nor completeness.
pub type CriteriaRatings = BTreeMap<String, f64>;

/// Score a rating map against a rubric.
///
/// Dimension scores are rounded to two decimals; the final score is computed
/// from the unrounded sums and then rounded. Priority rules also see the
/// unrounded sums. Ratings for ids the rubric does not define are ignored.
///
/// # Errors
///
/// Returns `RatingOutOfRange` when a rating falls outside its criterion's
/// score range.
pub fn calculate_scores(rubric: &Rubric, ratings: &CriteriaRatings) -> Result<ScoreSet> {
    let mut value_sum = 0.0;
    let mut risk_sum = 0.0;
    let mut value_breakdown = BTreeMap::new();
    let mut risk_breakdown = BTreeMap::new();

    for criterion in &rubric.criteria {
        let Some(&rating) = ratings.get(&criterion.id) else {
            continue;
        };
        if !criterion.score_range.contains(rating) {
            return Err(QuadrantError::RatingOutOfRange {
                criterion: criterion.id.clone(),
                rating,
            });
        }

        let contribution =
            criterion.score_range.effective(rating, criterion.reverse_score) * criterion.weight;
        match criterion.category {
            CriterionCategory::BusinessValue => {
                value_sum += contribution;
                value_breakdown.insert(criterion.id.clone(), rating);
            }
            CriterionCategory::RiskFactor => {
                risk_sum += contribution;
                risk_breakdown.insert(criterion.id.clone(), rating);
            }
        }
    }

    let (priority, label) = rubric.classify(value_sum, risk_sum);
    debug!(
        rubric = %rubric.id,
        value = value_sum,
        risk = risk_sum,
        priority = %priority,
        label,
        "scored criteria ratings"
    );

    let mut dimensions = BTreeMap::new();
    dimensions.insert(
        CriterionCategory::BusinessValue.dimension_key().to_string(),
        DimensionScore {
            score: round2(value_sum),
            breakdown: value_breakdown,
            reasoning: None,
        },
    );
    dimensions.insert(
        CriterionCategory::RiskFactor.dimension_key().to_string(),
        DimensionScore {
            score: round2(risk_sum),
            breakdown: risk_breakdown,
            reasoning: None,
        },
    );

    Ok(ScoreSet {
        overall: OverallScore {
            final_score: round2(value_sum - risk_sum),
            priority,
            confidence: confidence(rubric, ratings),
        },
        dimensions,
    })
}

/// Confidence in a rating set: completeness damped by how extreme the ratings
/// are, bounded to `[0, 1]` and rounded to two decimals. Zero when nothing is
/// rated.
pub fn confidence(rubric: &Rubric, ratings: &CriteriaRatings) -> f64 {
    let rated: Vec<_> = rubric
        .criteria
        .iter()
        .filter(|c| ratings.contains_key(&c.id))
        .collect();
    if rated.is_empty() {
        return 0.0;
    }

    let completeness = rated.len() as f64 / rubric.criteria.len() as f64;
    let extremeness = rated
        .iter()
        .map(|c| {
            let rating = ratings[&c.id];
            (rating - c.score_range.midpoint()).abs() / c.score_range.half_span()
        })
        .sum::<f64>()
        / rated.len() as f64;

    round2((completeness * (1.0 - extremeness * 0.2)).min(1.0))
}

/// Stateless façade over a [`RubricRegistry`]: creates draft evaluations and
/// scores rating maps by rubric id.
#[derive(Debug, Clone, Default)]
pub struct EvaluationService {
    registry: RubricRegistry,
}

impl EvaluationService {
    pub fn new(registry: RubricRegistry) -> Self {
        Self { registry }
    }

    /// Service backed by the built-in rubrics.
    pub fn with_default_rubrics() -> Self {
        Self::new(RubricRegistry::with_defaults())
    }

    pub fn registry(&self) -> &RubricRegistry {
        &self.registry
    }

    /// Create a draft evaluation bound to a known rubric.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRubric` for unregistered rubric ids.
    pub fn create_evaluation(
        &self,
        rubric_id: &str,
        evaluator: Evaluator,
        now: DateTime<Utc>,
    ) -> Result<Evaluation> {
        let rubric = self.registry.get(rubric_id)?;
        Ok(Evaluation::new(rubric.id.clone(), evaluator, now))
    }

    /// Score ratings against a rubric resolved by id.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRubric` for unregistered rubric ids, plus the errors
    /// of [`calculate_scores`].
    pub fn calculate_scores(&self, rubric_id: &str, ratings: &CriteriaRatings) -> Result<ScoreSet> {
        calculate_scores(self.registry.get(rubric_id)?, ratings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rubric::{Criterion, PriorityRule};
    use crate::score::Priority;

    fn ratings(pairs: &[(&str, f64)]) -> CriteriaRatings {
        pairs
            .iter()
            .map(|(id, rating)| (id.to_string(), *rating))
            .collect()
    }

    fn quick_ratings() -> CriteriaRatings {
        ratings(&[
            ("revenue_impact", 5.0),
            ("time_to_value", 4.0),
            ("strategic_alignment", 5.0),
            ("technical_complexity", 2.0),
            ("data_availability", 2.0),
            ("resource_requirements", 1.0),
        ])
    }

    #[test]
    fn test_quick_assessment_worked_example() {
        let rubric = Rubric::quick_assessment();
        let scores = calculate_scores(&rubric, &quick_ratings()).unwrap();

        assert_eq!(scores.dimensions["value"].score, 4.67);
        assert_eq!(scores.dimensions["risk"].score, 1.66);
        assert_eq!(scores.overall.final_score, 3.01);
        assert_eq!(scores.overall.priority, Priority(1));
        assert_eq!(scores.priority_label(), "High Value / Low Risk");
        assert_eq!(scores.overall.confidence, 0.85);
    }

    #[test]
    fn test_breakdown_keeps_raw_ratings() {
        let rubric = Rubric::quick_assessment();
        let scores = calculate_scores(&rubric, &quick_ratings()).unwrap();

        let value = &scores.dimensions["value"];
        assert_eq!(value.breakdown["revenue_impact"], 5.0);
        assert_eq!(value.breakdown.len(), 3);
        let risk = &scores.dimensions["risk"];
        assert_eq!(risk.breakdown["resource_requirements"], 1.0);
        assert_eq!(risk.breakdown.len(), 3);
    }

    #[test]
    fn test_final_score_is_value_minus_risk() {
        let rubric = Rubric::quick_assessment();
        for rating in [1.0, 2.0, 3.0, 4.0, 5.0] {
            let all_same: CriteriaRatings = rubric
                .criteria
                .iter()
                .map(|c| (c.id.clone(), rating))
                .collect();
            let scores = calculate_scores(&rubric, &all_same).unwrap();
            let value = scores.dimensions["value"].score;
            let risk = scores.dimensions["risk"].score;
            assert_eq!(scores.overall.final_score, round2(value - risk));
        }
    }

    #[test]
    fn test_missing_ratings_are_skipped() {
        let rubric = Rubric::quick_assessment();
        let partial = ratings(&[("revenue_impact", 5.0), ("technical_complexity", 3.0)]);
        let scores = calculate_scores(&rubric, &partial).unwrap();

        assert_eq!(scores.dimensions["value"].score, 1.65);
        assert_eq!(scores.dimensions["risk"].score, 0.99);
        assert_eq!(scores.dimensions["value"].breakdown.len(), 1);
        // 2 of 6 rated, ratings at distance 2 and 0 from the midpoint.
        // completeness = 1/3, extremeness = 0.5 -> 0.3333 * 0.9 = 0.3
        assert_eq!(scores.overall.confidence, 0.3);
    }

    #[test]
    fn test_unknown_rating_ids_are_ignored() {
        let rubric = Rubric::quick_assessment();
        let mut with_extra = quick_ratings();
        with_extra.insert("vibes".to_string(), 5.0);
        let scores = calculate_scores(&rubric, &with_extra).unwrap();
        assert_eq!(scores.overall.final_score, 3.01);
    }

    #[test]
    fn test_empty_ratings_score_zero_with_zero_confidence() {
        let rubric = Rubric::quick_assessment();
        let scores = calculate_scores(&rubric, &CriteriaRatings::new()).unwrap();

        assert_eq!(scores.overall.final_score, 0.0);
        assert_eq!(scores.overall.confidence, 0.0);
        // (0, 0) falls in the low-value/low-risk quadrant.
        assert_eq!(scores.overall.priority, Priority(3));
        assert!(scores.dimensions["value"].breakdown.is_empty());
    }

    #[test]
    fn test_rating_out_of_range_fails() {
        let rubric = Rubric::quick_assessment();
        let bad = ratings(&[("revenue_impact", 6.0)]);
        let err = calculate_scores(&rubric, &bad).unwrap_err();
        match err {
            QuadrantError::RatingOutOfRange { criterion, rating } => {
                assert_eq!(criterion, "revenue_impact");
                assert_eq!(rating, 6.0);
            }
            other => panic!("expected RatingOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_reverse_scored_criterion_flips_contribution() {
        let rubric = Rubric {
            id: "reversed".to_string(),
            name: "Reversed".to_string(),
            version: "1.0".to_string(),
            criteria: vec![
                Criterion::new("benefit", CriterionCategory::BusinessValue, 1.0),
                Criterion::new("simplicity", CriterionCategory::RiskFactor, 1.0).reversed(),
            ],
            priority_rules: vec![PriorityRule::new(Priority(1), "any")],
        };
        // simplicity rated 5 (very simple) contributes 6 - 5 = 1 to risk.
        let scores =
            calculate_scores(&rubric, &ratings(&[("benefit", 4.0), ("simplicity", 5.0)])).unwrap();
        assert_eq!(scores.dimensions["risk"].score, 1.0);
        assert_eq!(scores.overall.final_score, 3.0);
    }

    #[test]
    fn test_confidence_bounds() {
        let rubric = Rubric::quick_assessment();
        // All midpoint ratings: completeness 1, extremeness 0.
        let neutral: CriteriaRatings = rubric
            .criteria
            .iter()
            .map(|c| (c.id.clone(), 3.0))
            .collect();
        assert_eq!(confidence(&rubric, &neutral), 1.0);

        // All extreme ratings: 1 * (1 - 0.2) = 0.8.
        let extreme: CriteriaRatings = rubric
            .criteria
            .iter()
            .map(|c| (c.id.clone(), 5.0))
            .collect();
        assert_eq!(confidence(&rubric, &extreme), 0.8);

        assert_eq!(confidence(&rubric, &CriteriaRatings::new()), 0.0);
    }

    #[test]
    fn test_deep_dive_example_from_calculator() {
        let rubric = Rubric::deep_dive();
        let scores = calculate_scores(
            &rubric,
            &ratings(&[
                ("technical_complexity", 4.0),
                ("resource_requirements", 4.0),
                ("implementation_risk", 4.0),
                ("business_impact", 4.0),
                ("scalability_potential", 5.0),
                ("implementation_timeline", 2.0),
            ]),
        )
        .unwrap();

        assert_eq!(scores.dimensions["value"].score, 3.83);
        assert_eq!(scores.dimensions["risk"].score, 4.0);
        assert_eq!(scores.overall.priority, Priority(4));
        let (_, label) = rubric.classify(3.83, 4.0);
        assert_eq!(label, "Defer pending improvements");
    }

    #[test]
    fn test_service_rejects_unknown_rubric() {
        let service = EvaluationService::with_default_rubrics();
        let err = service
            .calculate_scores("galaxy_brain", &CriteriaRatings::new())
            .unwrap_err();
        assert!(matches!(err, QuadrantError::UnknownRubric(_)));

        let err = service
            .create_evaluation("galaxy_brain", Evaluator::human("a"), Utc::now())
            .unwrap_err();
        assert!(matches!(err, QuadrantError::UnknownRubric(_)));
    }

    #[test]
    fn test_service_creates_draft_evaluation() {
        let service = EvaluationService::with_default_rubrics();
        let eval = service
            .create_evaluation("quick_assessment", Evaluator::human("alice"), Utc::now())
            .unwrap();
        assert_eq!(eval.rubric_id, "quick_assessment");
        assert!(eval.scores.is_none());
    }
}
