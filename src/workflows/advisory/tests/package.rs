use super::common::*;
use crate::workflows::advisory::catalog::CatalogError;
use crate::workflows::advisory::domain::{ApplicationRecord, DocumentRecord};
use crate::workflows::advisory::package::EligibilitySummary;

fn application() -> ApplicationRecord {
    ApplicationRecord {
        id: "app-000042".to_string(),
        visa_category_id: "general_work".to_string(),
    }
}

fn eligibility_summary() -> EligibilitySummary {
    let service = service();
    let evaluation = service
        .evaluate_category_at(&qualified_worker_profile(), "general_work", today())
        .expect("category exists");
    EligibilitySummary::from(&evaluation)
}

#[test]
fn complete_and_consistent_uploads_make_the_package_ready() {
    let service = service();

    let package = service
        .compile_application_package(&application(), &general_work_documents(), eligibility_summary())
        .expect("category exists");

    assert!(package.package_ready);
    assert!(package.completeness.complete);
    assert!(package.consistency.consistent);
}

#[test]
fn missing_documents_block_readiness() {
    let service = service();

    let package = service
        .compile_application_package(
            &application(),
            &documents(&["passport", "photo"]),
            eligibility_summary(),
        )
        .expect("category exists");

    assert!(!package.package_ready);
    assert!(!package.completeness.complete);
    assert!(package.consistency.consistent);
}

#[test]
fn identity_mismatches_block_readiness_even_when_complete() {
    let service = service();

    let mut uploads = general_work_documents();
    uploads[0] = DocumentRecord::new("passport").with_field("full_name", "John Doe");
    uploads[6] = DocumentRecord::new("police_clearance").with_field("full_name", "Jane Doe");

    let package = service
        .compile_application_package(&application(), &uploads, eligibility_summary())
        .expect("category exists");

    assert!(package.completeness.complete);
    assert!(!package.consistency.consistent);
    assert!(!package.package_ready);
}

#[test]
fn readiness_equals_completeness_and_consistency() {
    let service = service();

    for uploads in [
        general_work_documents(),
        documents(&["passport"]),
        vec![
            DocumentRecord::new("passport").with_field("full_name", "John Doe"),
            DocumentRecord::new("photo").with_field("full_name", "Jane Doe"),
        ],
    ] {
        let package = service
            .compile_application_package(&application(), &uploads, eligibility_summary())
            .expect("category exists");

        assert_eq!(
            package.package_ready,
            package.completeness.complete && package.consistency.consistent
        );
    }
}

#[test]
fn supplied_eligibility_summary_is_echoed_not_recomputed() {
    let service = service();
    let stale = EligibilitySummary {
        eligibility_score: 42,
        eligible: false,
        risk_flag_count: 7,
    };

    let package = service
        .compile_application_package(&application(), &general_work_documents(), stale)
        .expect("category exists");

    assert_eq!(package.eligibility_summary, stale);
    // Eligibility never gates readiness.
    assert!(package.package_ready);
}

#[test]
fn summary_condenses_a_category_evaluation() {
    let service = service();
    let evaluation = service
        .evaluate_category_at(&profile_with(&[]), "general_work", today())
        .expect("category exists");

    let summary = EligibilitySummary::from(&evaluation);

    assert_eq!(summary.eligibility_score, evaluation.eligibility_score);
    assert_eq!(summary.eligible, evaluation.eligible);
    assert_eq!(summary.risk_flag_count, evaluation.risk_flags.len());
}

#[test]
fn unknown_application_category_is_the_only_failure() {
    let service = service();
    let mut application = application();
    application.visa_category_id = "asylum".to_string();

    match service.compile_application_package(
        &application,
        &general_work_documents(),
        eligibility_summary(),
    ) {
        Err(CatalogError::UnknownCategory(id)) => assert_eq!(id, "asylum"),
        other => panic!("expected unknown category error, got {other:?}"),
    }
}
