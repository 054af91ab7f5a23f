//! Repository behaviour over a small portfolio.

use chrono::{DateTime, TimeZone, Utc};
use quadrant_core::{
    CriteriaRatings, EvaluationService, Evaluator, Priority, Project, ProjectId, ProjectQuery,
    ProjectRepository, ProjectStatus, QuadrantError,
};

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 2, 11, minute, 0).unwrap()
}

fn ratings(value: f64, risk: f64) -> CriteriaRatings {
    [
        ("revenue_impact", value),
        ("time_to_value", value),
        ("strategic_alignment", value),
        ("technical_complexity", risk),
        ("data_availability", risk),
        ("resource_requirements", risk),
    ]
    .iter()
    .map(|(id, r)| (id.to_string(), *r))
    .collect()
}

fn scored_project(id: &str, department: &str, value: f64, risk: f64) -> Project {
    let service = EvaluationService::with_default_rubrics();
    let mut project = Project::new(ProjectId::from(id), id, at(0));
    project.business.department = Some(department.to_string());

    let mut evaluation = service
        .create_evaluation("quick_assessment", Evaluator::human("carol"), at(1))
        .unwrap();
    let scores = service
        .calculate_scores("quick_assessment", &ratings(value, risk))
        .unwrap();
    evaluation.complete(scores, Vec::new(), at(2)).unwrap();
    project.add_evaluation(evaluation, at(2)).unwrap();
    project
}

fn seeded_repository() -> ProjectRepository {
    let mut repo = ProjectRepository::new();
    // value 5 risk 1 -> final 4.0 P1; value 4 risk 4 -> final 0.0 P2;
    // value 2 risk 2 -> final 0.0 P3
    repo.save(scored_project("alpha", "finance", 5.0, 1.0), at(3));
    repo.save(scored_project("beta", "finance", 4.0, 4.0), at(3));
    repo.save(scored_project("gamma", "marketing", 2.0, 2.0), at(3));
    repo.save(Project::new(ProjectId::from("delta"), "delta", at(0)), at(3));

    let mut template = Project::new(ProjectId::from("tpl_base"), "Base Template", at(0));
    template.is_template = true;
    repo.save(template, at(3));
    repo
}

#[test]
fn partitions_are_stable() {
    let repo = seeded_repository();
    assert_eq!(repo.project_count(), 4);
    assert_eq!(repo.template_count(), 1);
    assert_eq!(repo.find_all().len(), 4);
    assert_eq!(repo.find_templates().len(), 1);
    assert!(repo.find_by_id(&ProjectId::from("tpl_base")).is_some());
}

#[test]
fn query_by_department_and_priority() {
    let repo = seeded_repository();

    let finance = repo.find_by_department("finance");
    assert_eq!(finance.len(), 2);

    let p1 = repo.find_by_priority(Priority(1));
    assert_eq!(p1.len(), 1);
    assert_eq!(p1[0].id.0, "alpha");

    let finance_p2 = repo.query(
        &ProjectQuery::new()
            .with_department("finance")
            .with_priority(Priority(2)),
    );
    assert_eq!(finance_p2.len(), 1);
    assert_eq!(finance_p2[0].id.0, "beta");
}

#[test]
fn score_range_excludes_unscored_projects() {
    let repo = seeded_repository();

    let all_scores = repo.query(&ProjectQuery::new().with_score_range(-10.0, 10.0));
    let ids: Vec<&str> = all_scores.iter().map(|p| p.id.0.as_str()).collect();
    assert_eq!(ids, vec!["alpha", "beta", "gamma"]);

    let exactly_zero = repo.query(&ProjectQuery::new().with_score_range(0.0, 0.0));
    let ids: Vec<&str> = exactly_zero.iter().map(|p| p.id.0.as_str()).collect();
    assert_eq!(ids, vec!["beta", "gamma"]);
}

#[test]
fn status_filter_composes_with_score_filter() {
    let mut repo = seeded_repository();
    repo.find_by_id_mut(&ProjectId::from("alpha")).unwrap().status = ProjectStatus::Approved;

    let approved_high = repo.query(
        &ProjectQuery::new()
            .with_status(ProjectStatus::Approved)
            .with_min_score(3.0),
    );
    assert_eq!(approved_high.len(), 1);
    assert_eq!(approved_high[0].id.0, "alpha");

    let draft_high = repo.query(
        &ProjectQuery::new()
            .with_status(ProjectStatus::Draft)
            .with_min_score(3.0),
    );
    assert!(draft_high.is_empty());
}

#[test]
fn delete_follows_lifecycle_guards() {
    let mut repo = seeded_repository();
    let alpha = ProjectId::from("alpha");

    repo.find_by_id_mut(&alpha).unwrap().status = ProjectStatus::Approved;
    let err = repo.delete(&alpha).unwrap_err();
    match err {
        QuadrantError::Forbidden { reason } => {
            assert_eq!(reason, "Cannot delete project with status: approved");
        }
        other => panic!("expected Forbidden, got {other:?}"),
    }

    repo.find_by_id_mut(&alpha).unwrap().status = ProjectStatus::Draft;
    repo.delete(&alpha).unwrap();
    assert!(repo.find_by_id(&alpha).is_none());
    assert_eq!(repo.project_count(), 3);
}

#[test]
fn find_by_key_prefers_assigned_keys() {
    let mut repo = seeded_repository();
    repo.find_by_id_mut(&ProjectId::from("beta")).unwrap().key = Some("AI-042".to_string());
    // Re-save to confirm upsert keeps the key.
    let beta = repo.find_by_id(&ProjectId::from("beta")).unwrap().clone();
    repo.save(beta, at(9));

    let found = repo.find_by_key("AI-042").unwrap();
    assert_eq!(found.id.0, "beta");
    assert_eq!(found.updated_at, at(9));
}

#[test]
fn clone_from_template_lands_in_live_partition() {
    let mut repo = seeded_repository();
    let clone_id = repo
        .clone_from_template(&ProjectId::from("tpl_base"), at(50))
        .unwrap();

    assert_eq!(repo.project_count(), 5);
    assert_eq!(repo.template_count(), 1);
    let clone = repo.find_by_id(&clone_id).unwrap();
    assert!(!clone.is_template);
    assert_eq!(clone.status, ProjectStatus::Draft);
    // The clone is deletable right away, unlike the template.
    repo.delete(&clone_id).unwrap();
}
