use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{CategoryGroup, VisaCatalog};
use super::domain::{ApplicantProfile, CategoryEvaluation};
use super::evaluation::{guidance::ADVISORY_DISCLAIMER, EligibilityEngine};

const ENGINE_NAME: &str = "visa-ai eligibility engine";

/// One category's evaluation tagged with its catalog identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCategory {
    pub category_id: String,
    pub name: String,
    pub group: CategoryGroup,
    pub legal_reference: String,
    pub evaluation: CategoryEvaluation,
}

/// Descriptive metadata recorded with every portfolio evaluation. Carries
/// no control logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrail {
    pub engine: String,
    pub version: String,
    pub legal_basis: Vec<String>,
    pub evaluated_at: DateTime<Utc>,
    pub disclaimer: String,
}

/// Every catalog category evaluated, ranked, and partitioned for one
/// profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioEvaluation {
    pub eligible: Vec<RankedCategory>,
    pub ineligible: Vec<RankedCategory>,
    pub recommended_pathway: Option<RankedCategory>,
    pub total_categories_evaluated: usize,
    pub audit: AuditTrail,
}

/// Caller-facing wrapper around the portfolio result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayRecommendation {
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended: Option<RankedCategory>,
    pub alternative_options: Vec<RankedCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub evaluation: PortfolioEvaluation,
}

/// Evaluate the profile against every catalog entry.
///
/// Ranking is score descending; equal scores rank the category with fewer
/// open risk flags first. The recommended pathway is the head of the
/// eligible partition.
pub(crate) fn evaluate_portfolio(
    engine: &EligibilityEngine,
    catalog: &VisaCatalog,
    profile: &ApplicantProfile,
    today: NaiveDate,
    evaluated_at: DateTime<Utc>,
) -> PortfolioEvaluation {
    let mut ranked: Vec<RankedCategory> = catalog
        .categories()
        .iter()
        .map(|category| RankedCategory {
            category_id: category.id.clone(),
            name: category.name.clone(),
            group: category.group,
            legal_reference: category.legal_reference.clone(),
            evaluation: engine.evaluate_category(profile, category, today),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.evaluation
            .eligibility_score
            .cmp(&a.evaluation.eligibility_score)
            .then_with(|| {
                a.evaluation
                    .risk_flags
                    .len()
                    .cmp(&b.evaluation.risk_flags.len())
            })
    });

    let total_categories_evaluated = ranked.len();
    let legal_basis = ranked
        .iter()
        .map(|category| category.legal_reference.clone())
        .collect();

    let (eligible, ineligible): (Vec<_>, Vec<_>) = ranked
        .into_iter()
        .partition(|category| category.evaluation.eligible);

    let recommended_pathway = eligible.first().cloned();

    PortfolioEvaluation {
        eligible,
        ineligible,
        recommended_pathway,
        total_categories_evaluated,
        audit: AuditTrail {
            engine: ENGINE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            legal_basis,
            evaluated_at,
            disclaimer: ADVISORY_DISCLAIMER.to_string(),
        },
    }
}

/// Portfolio evaluation reduced to a recommendation plus a bounded list of
/// alternatives.
pub(crate) fn recommend_pathway(
    engine: &EligibilityEngine,
    catalog: &VisaCatalog,
    profile: &ApplicantProfile,
    today: NaiveDate,
    evaluated_at: DateTime<Utc>,
) -> PathwayRecommendation {
    let evaluation = evaluate_portfolio(engine, catalog, profile, today, evaluated_at);

    match evaluation.recommended_pathway.clone() {
        Some(recommended) => {
            let alternative_options = evaluation
                .eligible
                .iter()
                .skip(1)
                .take(engine.policy().max_alternative_options)
                .cloned()
                .collect();

            PathwayRecommendation {
                found: true,
                recommended: Some(recommended),
                alternative_options,
                message: None,
                evaluation,
            }
        }
        None => PathwayRecommendation {
            found: false,
            recommended: None,
            alternative_options: Vec::new(),
            message: Some(
                "No visa category currently matches the profile. Address the highest-scoring \
                 categories' unmet requirements or consult a registered immigration practitioner."
                    .to_string(),
            ),
            evaluation,
        },
    }
}
