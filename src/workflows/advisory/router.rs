use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::catalog::CatalogError;
use super::domain::{ApplicantProfile, ApplicationRecord, DocumentRecord};
use super::package::EligibilitySummary;
use super::service::AdvisoryService;

/// Router builder exposing the advisory surface.
///
/// Data-quality conditions (unmet requirements, missing documents,
/// identity mismatches) are 200 responses carrying advisory detail; only
/// an unknown category id is an error, mapped to 404.
pub fn advisory_router(service: Arc<AdvisoryService>) -> Router {
    Router::new()
        .route("/api/v1/advisory/assessment", post(assessment_handler))
        .route(
            "/api/v1/advisory/recommendation",
            post(recommendation_handler),
        )
        .route(
            "/api/v1/advisory/categories/:category_id/checklist",
            get(checklist_handler),
        )
        .route(
            "/api/v1/advisory/categories/:category_id/completeness",
            post(completeness_handler),
        )
        .route("/api/v1/advisory/consistency", post(consistency_handler))
        .route("/api/v1/advisory/package", post(package_handler))
        .with_state(service)
}

fn catalog_error_response(error: CatalogError) -> Response {
    let status = match error {
        CatalogError::UnknownCategory(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn assessment_handler(
    State(service): State<Arc<AdvisoryService>>,
    axum::Json(profile): axum::Json<ApplicantProfile>,
) -> Response {
    let evaluation = service.evaluate(&profile);
    (StatusCode::OK, axum::Json(evaluation)).into_response()
}

pub(crate) async fn recommendation_handler(
    State(service): State<Arc<AdvisoryService>>,
    axum::Json(profile): axum::Json<ApplicantProfile>,
) -> Response {
    let recommendation = service.recommend_pathway(&profile);
    (StatusCode::OK, axum::Json(recommendation)).into_response()
}

pub(crate) async fn checklist_handler(
    State(service): State<Arc<AdvisoryService>>,
    Path(category_id): Path<String>,
) -> Response {
    match service.document_checklist(&category_id) {
        Ok(checklist) => (StatusCode::OK, axum::Json(checklist)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

pub(crate) async fn completeness_handler(
    State(service): State<Arc<AdvisoryService>>,
    Path(category_id): Path<String>,
    axum::Json(documents): axum::Json<Vec<DocumentRecord>>,
) -> Response {
    match service.check_completeness(&category_id, &documents) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}

pub(crate) async fn consistency_handler(
    State(service): State<Arc<AdvisoryService>>,
    axum::Json(documents): axum::Json<Vec<DocumentRecord>>,
) -> Response {
    let report = service.cross_validate(&documents);
    (StatusCode::OK, axum::Json(report)).into_response()
}

/// Request body for package compilation. The eligibility summary comes
/// from an earlier assessment call; it is echoed, never recomputed.
#[derive(Debug, Deserialize)]
pub(crate) struct PackageRequest {
    pub(crate) application: ApplicationRecord,
    pub(crate) documents: Vec<DocumentRecord>,
    pub(crate) eligibility: EligibilitySummary,
}

pub(crate) async fn package_handler(
    State(service): State<Arc<AdvisoryService>>,
    axum::Json(request): axum::Json<PackageRequest>,
) -> Response {
    match service.compile_application_package(
        &request.application,
        &request.documents,
        request.eligibility,
    ) {
        Ok(package) => (StatusCode::OK, axum::Json(package)).into_response(),
        Err(error) => catalog_error_response(error),
    }
}
