use super::common::*;
use crate::workflows::advisory::catalog::VisaCatalog;
use crate::workflows::advisory::domain::CapabilityFlag;
use crate::workflows::advisory::ranking::{evaluate_portfolio, recommend_pathway};

#[test]
fn portfolio_covers_every_catalog_category() {
    let engine = engine();
    let catalog = VisaCatalog::south_africa();
    let profile = qualified_worker_profile();

    let portfolio = evaluate_portfolio(&engine, &catalog, &profile, today(), evaluated_at());

    assert_eq!(portfolio.total_categories_evaluated, catalog.len());
    assert_eq!(
        portfolio.eligible.len() + portfolio.ineligible.len(),
        catalog.len()
    );
}

#[test]
fn partitions_are_sorted_by_score_then_open_risk_flags() {
    let engine = engine();
    let catalog = VisaCatalog::south_africa();
    let profile = qualified_worker_profile();

    let portfolio = evaluate_portfolio(&engine, &catalog, &profile, today(), evaluated_at());

    for partition in [&portfolio.eligible, &portfolio.ineligible] {
        for pair in partition.windows(2) {
            let (a, b) = (&pair[0].evaluation, &pair[1].evaluation);
            assert!(a.eligibility_score >= b.eligibility_score);
            if a.eligibility_score == b.eligibility_score {
                assert!(a.risk_flags.len() <= b.risk_flags.len());
            }
        }
    }
}

#[test]
fn recommended_pathway_is_the_head_of_the_eligible_partition() {
    let engine = engine();
    let catalog = VisaCatalog::south_africa();
    let profile = qualified_worker_profile();

    let portfolio = evaluate_portfolio(&engine, &catalog, &profile, today(), evaluated_at());

    let recommended = portfolio.recommended_pathway.expect("worker qualifies");
    assert_eq!(recommended.category_id, "general_work");
    assert_eq!(
        portfolio.eligible.first().map(|entry| entry.category_id.as_str()),
        Some("general_work")
    );
}

#[test]
fn worker_profile_unlocks_the_expected_pathways() {
    let engine = engine();
    let catalog = VisaCatalog::south_africa();
    let profile = qualified_worker_profile();

    let portfolio = evaluate_portfolio(&engine, &catalog, &profile, today(), evaluated_at());

    let eligible_ids: Vec<_> = portfolio
        .eligible
        .iter()
        .map(|entry| entry.category_id.as_str())
        .collect();

    assert_eq!(
        eligible_ids,
        vec!["general_work", "permanent_residence_worker", "critical_skills"]
    );
}

#[test]
fn no_recommendation_without_any_eligible_category() {
    let engine = engine();
    let catalog = VisaCatalog::south_africa();
    let profile = profile_with(&[]);

    let recommendation = recommend_pathway(&engine, &catalog, &profile, today(), evaluated_at());

    assert!(!recommendation.found);
    assert!(recommendation.recommended.is_none());
    assert!(recommendation.alternative_options.is_empty());
    assert!(recommendation.message.is_some());
    assert!(recommendation.evaluation.recommended_pathway.is_none());
    assert!(recommendation.evaluation.eligible.is_empty());
}

#[test]
fn alternatives_exclude_the_recommendation_and_stay_bounded() {
    let engine = engine();
    let catalog = VisaCatalog::south_africa();
    let profile = qualified_worker_profile();

    let recommendation = recommend_pathway(&engine, &catalog, &profile, today(), evaluated_at());

    assert!(recommendation.found);
    let recommended = recommendation.recommended.expect("worker qualifies");
    assert!(recommendation.alternative_options.len() <= policy().max_alternative_options);
    assert!(recommendation
        .alternative_options
        .iter()
        .all(|option| option.category_id != recommended.category_id));
}

#[test]
fn audit_trail_records_engine_identity_and_legal_basis() {
    let engine = engine();
    let catalog = VisaCatalog::south_africa();

    let portfolio = evaluate_portfolio(
        &engine,
        &catalog,
        &profile_with(&[CapabilityFlag::PoliceClearance]),
        today(),
        evaluated_at(),
    );

    assert!(portfolio.audit.engine.contains("eligibility engine"));
    assert!(!portfolio.audit.version.is_empty());
    assert_eq!(portfolio.audit.legal_basis.len(), catalog.len());
    assert_eq!(portfolio.audit.evaluated_at, evaluated_at());
    assert!(portfolio.audit.disclaimer.contains("Department of Home Affairs"));
}
