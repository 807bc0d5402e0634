use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::advisory::catalog::{
    CategoryEligibility, CategoryGroup, RequiredDocument, VisaCatalog, VisaCategory,
};
use crate::workflows::advisory::domain::{ApplicantProfile, CapabilityFlag, DocumentRecord};
use crate::workflows::advisory::evaluation::{AdvisoryPolicy, EligibilityEngine};
use crate::workflows::advisory::service::AdvisoryService;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
}

pub(super) fn evaluated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).single().expect("valid instant")
}

pub(super) fn policy() -> AdvisoryPolicy {
    AdvisoryPolicy::default()
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(policy())
}

pub(super) fn service() -> AdvisoryService {
    AdvisoryService::new(Arc::new(VisaCatalog::south_africa()), policy())
}

pub(super) fn profile_with(flags: &[CapabilityFlag]) -> ApplicantProfile {
    let mut capabilities = BTreeMap::new();
    for flag in flags {
        capabilities.insert(*flag, true);
    }

    ApplicantProfile {
        capabilities,
        ..ApplicantProfile::default()
    }
}

/// Profile satisfying every General Work Visa requirement: the five
/// capability flags plus a passport expiring well past the validity floor.
pub(super) fn qualified_worker_profile() -> ApplicantProfile {
    let mut profile = profile_with(&[
        CapabilityFlag::JobOffer,
        CapabilityFlag::SaqaEvaluation,
        CapabilityFlag::LabourRecommendation,
        CapabilityFlag::PoliceClearance,
        CapabilityFlag::MedicalReport,
    ]);
    profile.nationality = Some("German".to_string());
    profile.purpose_of_stay = Some("work".to_string());
    profile.passport_number = Some("A1234567".to_string());
    profile.passport_expiry = today().checked_add_signed(chrono::Duration::days(400));
    profile
}

pub(super) fn documents(types: &[&str]) -> Vec<DocumentRecord> {
    types.iter().map(|doc_type| DocumentRecord::new(*doc_type)).collect()
}

/// Every required upload for the General Work Visa checklist.
pub(super) fn general_work_documents() -> Vec<DocumentRecord> {
    documents(&[
        "passport",
        "photo",
        "application_form",
        "employment_contract",
        "saqa_certificate",
        "dol_recommendation",
        "police_clearance",
        "medical_report",
        "radiological_report",
        "cv",
        "proof_of_qualifications",
        "yellow_fever_certificate",
    ])
}

fn synthetic_category(
    id: &str,
    requirements: &[&str],
    required_documents: Vec<RequiredDocument>,
) -> VisaCategory {
    VisaCategory {
        id: id.to_string(),
        name: format!("Synthetic {id}"),
        group: CategoryGroup::Work,
        legal_reference: "Synthetic schedule".to_string(),
        eligibility: CategoryEligibility {
            requirements: requirements.iter().map(|text| text.to_string()).collect(),
            disqualifiers: Vec::new(),
        },
        required_documents,
        fees: "R0".to_string(),
        max_duration: "1 year".to_string(),
        common_rejection_reasons: Vec::new(),
    }
}

/// Small hand-built catalog exercising edge cases the production data
/// avoids: a category with no requirements and one whose requirement text
/// overlaps two rules.
pub(super) fn synthetic_catalog() -> VisaCatalog {
    VisaCatalog::new(vec![
        synthetic_category("zero_requirements", &[], Vec::new()),
        synthetic_category(
            "independent_income",
            &["Minimum annual income of R1,000,000 together with proof of financial means"],
            Vec::new(),
        ),
    ])
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
