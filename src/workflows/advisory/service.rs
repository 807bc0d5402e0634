use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};

use super::catalog::{CatalogError, VisaCatalog};
use super::consistency::{self, ConsistencyReport};
use super::documents::{self, CompletenessReport, DocumentChecklist};
use super::domain::{ApplicantProfile, ApplicationRecord, CategoryEvaluation, DocumentRecord};
use super::evaluation::{AdvisoryPolicy, EligibilityEngine};
use super::package::{self, CompiledPackage, EligibilitySummary};
use super::ranking::{self, PathwayRecommendation, PortfolioEvaluation};

/// Facade composing the catalog and the eligibility engine.
///
/// The service resolves wall-clock instants at the boundary so everything
/// beneath it stays a pure function of explicit arguments. It holds no
/// other state; concurrent callers share the catalog read-only.
pub struct AdvisoryService {
    catalog: Arc<VisaCatalog>,
    engine: EligibilityEngine,
}

impl AdvisoryService {
    pub fn new(catalog: Arc<VisaCatalog>, policy: AdvisoryPolicy) -> Self {
        Self {
            catalog,
            engine: EligibilityEngine::new(policy),
        }
    }

    /// Service over the built-in South African catalog with default policy.
    pub fn south_africa() -> Self {
        Self::new(Arc::new(VisaCatalog::south_africa()), AdvisoryPolicy::default())
    }

    pub fn catalog(&self) -> &VisaCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> &EligibilityEngine {
        &self.engine
    }

    /// Evaluate the profile against every catalog category.
    pub fn evaluate(&self, profile: &ApplicantProfile) -> PortfolioEvaluation {
        self.evaluate_at(profile, Local::now().date_naive())
    }

    /// Deterministic entry point anchored to an explicit reference date.
    pub fn evaluate_at(&self, profile: &ApplicantProfile, today: NaiveDate) -> PortfolioEvaluation {
        ranking::evaluate_portfolio(&self.engine, &self.catalog, profile, today, Utc::now())
    }

    /// Evaluate the profile against a single category by id.
    pub fn evaluate_category(
        &self,
        profile: &ApplicantProfile,
        category_id: &str,
    ) -> Result<CategoryEvaluation, CatalogError> {
        self.evaluate_category_at(profile, category_id, Local::now().date_naive())
    }

    pub fn evaluate_category_at(
        &self,
        profile: &ApplicantProfile,
        category_id: &str,
        today: NaiveDate,
    ) -> Result<CategoryEvaluation, CatalogError> {
        let category = self.catalog.get(category_id)?;
        Ok(self.engine.evaluate_category(profile, category, today))
    }

    /// Recommendation plus a bounded list of alternatives.
    pub fn recommend_pathway(&self, profile: &ApplicantProfile) -> PathwayRecommendation {
        self.recommend_pathway_at(profile, Local::now().date_naive())
    }

    pub fn recommend_pathway_at(
        &self,
        profile: &ApplicantProfile,
        today: NaiveDate,
    ) -> PathwayRecommendation {
        ranking::recommend_pathway(&self.engine, &self.catalog, profile, today, Utc::now())
    }

    pub fn document_checklist(&self, category_id: &str) -> Result<DocumentChecklist, CatalogError> {
        documents::document_checklist(&self.catalog, category_id)
    }

    pub fn check_completeness(
        &self,
        category_id: &str,
        documents: &[DocumentRecord],
    ) -> Result<CompletenessReport, CatalogError> {
        documents::check_completeness(&self.catalog, category_id, documents)
    }

    pub fn cross_validate(&self, documents: &[DocumentRecord]) -> ConsistencyReport {
        consistency::cross_validate(documents)
    }

    pub fn compile_application_package(
        &self,
        application: &ApplicationRecord,
        documents: &[DocumentRecord],
        eligibility: EligibilitySummary,
    ) -> Result<CompiledPackage, CatalogError> {
        package::compile_application_package(&self.catalog, application, documents, eligibility)
    }
}
