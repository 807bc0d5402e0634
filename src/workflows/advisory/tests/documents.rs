use super::common::*;
use crate::workflows::advisory::catalog::CatalogError;
use crate::workflows::advisory::domain::DocumentRecord;

#[test]
fn two_of_twelve_uploads_score_seventeen_percent() {
    let service = service();
    let uploads = documents(&["passport", "photo"]);

    let report = service
        .check_completeness("general_work", &uploads)
        .expect("category exists");

    assert!(!report.complete);
    assert_eq!(report.provided.len(), 2);
    assert_eq!(report.missing.len(), 10);
    assert_eq!(report.completion_percentage, 17);
}

#[test]
fn provided_and_missing_partition_the_required_list() {
    let service = service();
    let checklist = service
        .document_checklist("general_work")
        .expect("category exists");

    for uploads in [
        documents(&[]),
        documents(&["passport"]),
        documents(&["passport", "cv", "medical_report", "photo"]),
        general_work_documents(),
    ] {
        let report = service
            .check_completeness("general_work", &uploads)
            .expect("category exists");

        assert_eq!(
            report.provided.len() + report.missing.len(),
            checklist.total_required
        );
    }
}

#[test]
fn full_upload_set_completes_the_package() {
    let service = service();

    let report = service
        .check_completeness("general_work", &general_work_documents())
        .expect("category exists");

    assert!(report.complete);
    assert_eq!(report.completion_percentage, 100);
    assert!(report.missing.is_empty());
}

#[test]
fn optional_documents_never_count_toward_completion() {
    let service = service();

    let only_optional = documents(&["motivation_letter", "proof_of_accommodation"]);
    let report = service
        .check_completeness("general_work", &only_optional)
        .expect("category exists");

    assert_eq!(report.completion_percentage, 0);
    assert!(report
        .optional
        .iter()
        .all(|status| status.uploaded));

    let mut uploads = general_work_documents();
    uploads.push(DocumentRecord::new("motivation_letter"));
    let report = service
        .check_completeness("general_work", &uploads)
        .expect("category exists");

    assert_eq!(report.completion_percentage, 100);
}

#[test]
fn duplicate_uploads_of_one_type_count_once() {
    let service = service();
    let uploads = documents(&["passport", "passport", "passport"]);

    let report = service
        .check_completeness("general_work", &uploads)
        .expect("category exists");

    assert_eq!(report.provided.len(), 1);
    assert_eq!(report.missing.len(), 11);
}

#[test]
fn unknown_category_fails_with_the_missing_id() {
    let service = service();

    match service.check_completeness("asylum", &documents(&["passport"])) {
        Err(CatalogError::UnknownCategory(id)) => assert_eq!(id, "asylum"),
        other => panic!("expected unknown category error, got {other:?}"),
    }

    match service.document_checklist("asylum") {
        Err(CatalogError::UnknownCategory(id)) => assert_eq!(id, "asylum"),
        other => panic!("expected unknown category error, got {other:?}"),
    }
}

#[test]
fn category_without_required_documents_is_complete_at_once() {
    let catalog = synthetic_catalog();
    let report = crate::workflows::advisory::documents::check_completeness(
        &catalog,
        "zero_requirements",
        &documents(&[]),
    )
    .expect("category exists");

    assert!(report.complete);
    assert_eq!(report.completion_percentage, 100);
}

#[test]
fn checklist_reports_required_and_optional_totals() {
    let service = service();

    let checklist = service
        .document_checklist("general_work")
        .expect("category exists");

    assert_eq!(checklist.category_id, "general_work");
    assert_eq!(checklist.total_required, 12);
    assert_eq!(checklist.total_optional, 2);
    assert_eq!(
        checklist.documents.len(),
        checklist.total_required + checklist.total_optional
    );
}
