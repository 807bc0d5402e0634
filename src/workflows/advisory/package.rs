use serde::{Deserialize, Serialize};

use super::catalog::{CatalogError, VisaCatalog};
use super::consistency::{self, ConsistencyReport};
use super::documents::{self, CompletenessReport};
use super::domain::{ApplicationRecord, CategoryEvaluation, DocumentRecord};

/// Condensed view of a previously computed category evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilitySummary {
    pub eligibility_score: u8,
    pub eligible: bool,
    pub risk_flag_count: usize,
}

impl From<&CategoryEvaluation> for EligibilitySummary {
    fn from(evaluation: &CategoryEvaluation) -> Self {
        Self {
            eligibility_score: evaluation.eligibility_score,
            eligible: evaluation.eligible,
            risk_flag_count: evaluation.risk_flags.len(),
        }
    }
}

/// Submission-readiness verdict for one application.
///
/// `package_ready` holds exactly when the documents are complete and
/// mutually consistent; eligibility is reported alongside but does not
/// gate readiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledPackage {
    pub package_ready: bool,
    pub completeness: CompletenessReport,
    pub consistency: ConsistencyReport,
    pub eligibility_summary: EligibilitySummary,
}

/// Combine completeness and consistency for the application's category
/// with the caller-supplied eligibility result.
///
/// Eligibility is never recomputed here; the caller owns supplying a
/// result evaluated for the same category.
pub(crate) fn compile_application_package(
    catalog: &VisaCatalog,
    application: &ApplicationRecord,
    documents: &[DocumentRecord],
    eligibility: EligibilitySummary,
) -> Result<CompiledPackage, CatalogError> {
    let completeness = documents::check_completeness(catalog, &application.visa_category_id, documents)?;
    let consistency = consistency::cross_validate(documents);

    Ok(CompiledPackage {
        package_ready: completeness.complete && consistency.consistent,
        completeness,
        consistency,
        eligibility_summary: eligibility,
    })
}
