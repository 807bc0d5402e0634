use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::advisory::router::{
    advisory_router, checklist_handler, completeness_handler, package_handler,
};

fn shared_service() -> Arc<crate::workflows::advisory::service::AdvisoryService> {
    Arc::new(service())
}

#[tokio::test]
async fn checklist_handler_returns_not_found_for_unknown_categories() {
    let response = checklist_handler(State(shared_service()), Path("asylum".to_string())).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("asylum"));
}

#[tokio::test]
async fn checklist_handler_returns_the_category_checklist() {
    let response =
        checklist_handler(State(shared_service()), Path("general_work".to_string())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["total_required"], 12);
    assert_eq!(body["total_optional"], 2);
}

#[tokio::test]
async fn completeness_handler_reports_partial_uploads_as_data() {
    let response = completeness_handler(
        State(shared_service()),
        Path("general_work".to_string()),
        axum::Json(documents(&["passport", "photo"])),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["complete"], false);
    assert_eq!(body["completion_percentage"], 17);
    assert_eq!(body["missing"].as_array().expect("missing list").len(), 10);
}

#[tokio::test]
async fn package_handler_maps_unknown_categories_to_not_found() {
    let request = crate::workflows::advisory::router::PackageRequest {
        application: crate::workflows::advisory::domain::ApplicationRecord {
            id: "app-000001".to_string(),
            visa_category_id: "asylum".to_string(),
        },
        documents: documents(&["passport"]),
        eligibility: crate::workflows::advisory::package::EligibilitySummary {
            eligibility_score: 80,
            eligible: true,
            risk_flag_count: 1,
        },
    };

    let response = package_handler(State(shared_service()), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn assessment_route_serves_a_full_portfolio() {
    let app = advisory_router(shared_service());
    let profile = json!({
        "passport_expiry": "2033-06-30",
        "capabilities": {
            "job_offer": true,
            "saqa_evaluation": true,
            "labour_recommendation": true,
            "police_clearance": true,
            "medical_report": true
        }
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/advisory/assessment")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(profile.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["total_categories_evaluated"], 9);
    assert!(body["recommended_pathway"].is_object());
}

#[tokio::test]
async fn consistency_route_flags_identity_mismatches_with_ok_status() {
    let app = advisory_router(shared_service());
    let payload = json!([
        { "type": "passport", "extracted_data": { "full_name": "John Doe" } },
        { "type": "police_clearance", "extracted_data": { "full_name": "Jane Doe" } }
    ]);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/advisory/consistency")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["consistent"], false);
    assert_eq!(
        body["inconsistencies"][0]["kind"],
        json!("name_mismatch")
    );
}
