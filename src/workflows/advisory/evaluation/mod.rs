mod config;
pub(crate) mod disqualifiers;
pub(crate) mod guidance;
pub(crate) mod rules;

pub use config::AdvisoryPolicy;

use chrono::NaiveDate;

use self::rules::RuleContext;
use crate::workflows::advisory::catalog::VisaCategory;
use crate::workflows::advisory::domain::{
    ApplicantProfile, CategoryEvaluation, Disqualification, RiskFlag, RiskFlagKind,
};

/// Stateless evaluator applying the requirement and disqualifier tables to
/// one (profile, category) pair.
pub struct EligibilityEngine {
    policy: AdvisoryPolicy,
}

impl EligibilityEngine {
    pub fn new(policy: AdvisoryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AdvisoryPolicy {
        &self.policy
    }

    /// Score a profile against one category.
    ///
    /// Pure function of its arguments: `today` anchors the passport-window
    /// arithmetic so repeated calls with the same inputs agree.
    pub fn evaluate_category(
        &self,
        profile: &ApplicantProfile,
        category: &VisaCategory,
        today: NaiveDate,
    ) -> CategoryEvaluation {
        let ctx = RuleContext {
            today,
            policy: &self.policy,
        };

        let mut met_requirements = Vec::new();
        let mut unmet_requirements = Vec::new();
        let mut risk_flags = Vec::new();

        for requirement in &category.eligibility.requirements {
            let outcome = rules::assess_requirement(profile, requirement, &ctx);
            if outcome.met {
                met_requirements.push(outcome);
            } else {
                risk_flags.push(RiskFlag {
                    kind: RiskFlagKind::RequirementNotMet,
                    details: outcome.details.clone(),
                    reference: requirement.clone(),
                });
                unmet_requirements.push(outcome);
            }
        }

        let total = category.eligibility.requirements.len();
        // A category with no published requirements is never automatically
        // eligible.
        let eligibility_score = if total == 0 {
            0
        } else {
            ((met_requirements.len() * 100) as f64 / total as f64).round() as u8
        };

        let mut disqualifications = Vec::new();
        for disqualifier in &category.eligibility.disqualifiers {
            if let Some(details) = disqualifiers::check_disqualifier(profile, disqualifier, &ctx) {
                risk_flags.push(RiskFlag {
                    kind: RiskFlagKind::Disqualification,
                    details: details.clone(),
                    reference: disqualifier.clone(),
                });
                disqualifications.push(Disqualification {
                    disqualifier: disqualifier.clone(),
                    details,
                });
            }
        }

        let eligible = eligibility_score >= self.policy.eligibility_threshold
            && disqualifications.is_empty();

        let guidance = guidance::generate(
            category,
            eligible,
            eligibility_score,
            &risk_flags,
            &disqualifications,
            &unmet_requirements,
        );

        CategoryEvaluation {
            eligible,
            eligibility_score,
            met_requirements,
            unmet_requirements,
            disqualifications,
            risk_flags,
            guidance,
        }
    }
}
