use chrono::NaiveDate;

use super::config::AdvisoryPolicy;
use crate::workflows::advisory::domain::{
    ApplicantProfile, CapabilityFlag, RequirementOutcome, Severity,
};

/// Shared inputs for rule evaluators that need more than the profile.
pub(crate) struct RuleContext<'a> {
    pub(crate) today: NaiveDate,
    pub(crate) policy: &'a AdvisoryPolicy,
}

/// Prescribed amounts from the fee and threshold schedules. The predicates
/// below also key on the formatted amounts so a rule only binds to
/// requirement text quoting the same figure.
const FINANCIAL_INDEPENDENCE_NET_WORTH: u64 = 12_000_000;
const BUSINESS_INVESTMENT_MINIMUM: u64 = 5_000_000;
const RETIREMENT_MONTHLY_INCOME: u64 = 37_000;
const INDEPENDENT_ANNUAL_INCOME: u64 = 1_000_000;

/// Identifies which table entry decided a requirement. Exposed to tests so
/// rule binding and ordering stay checkable properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RequirementRuleKind {
    NetWorthFloor,
    InvestmentFloor,
    MonthlyIncomeFloor,
    AnnualIncomeFloor,
    SponsorAssurance,
    FinancialMeans,
    SaqaAccreditation,
    CriticalSkillsListing,
    LabourRecommendation,
    ProfessionalRegistration,
    JobOffer,
    BusinessPlan,
    AdmissionLetter,
    MedicalCover,
    MedicalReport,
    RadiologicalReport,
    PoliceClearance,
    YellowFever,
    WorkVisaTenure,
    PassportValidity,
    KinshipProof,
    ReturnTravel,
    Accommodation,
}

pub(crate) struct Assessment {
    pub(crate) met: bool,
    pub(crate) details: String,
}

/// One entry of the ordered requirement rule table.
///
/// `matches` receives the lowercased requirement text. The first entry
/// whose predicate matches decides the outcome, so rules with numeric
/// thresholds sit above generic rules whose keywords they overlap.
pub(crate) struct RequirementRule {
    pub(crate) kind: RequirementRuleKind,
    pub(crate) unmet_severity: Severity,
    matches: fn(&str) -> bool,
    assess: fn(&ApplicantProfile, &RuleContext<'_>) -> Assessment,
}

fn capability(
    profile: &ApplicantProfile,
    flag: CapabilityFlag,
    met: &str,
    unmet: &str,
) -> Assessment {
    if profile.asserts(flag) {
        Assessment {
            met: true,
            details: met.to_string(),
        }
    } else {
        Assessment {
            met: false,
            details: unmet.to_string(),
        }
    }
}

fn amount_floor(declared: Option<u64>, floor: u64, what: &str) -> Assessment {
    match declared {
        Some(amount) if amount >= floor => Assessment {
            met: true,
            details: format!("declared {what} of R{amount} meets the R{floor} minimum"),
        },
        Some(amount) => Assessment {
            met: false,
            details: format!("declared {what} of R{amount} is below the R{floor} minimum"),
        },
        None => Assessment {
            met: false,
            details: format!("no {what} declared"),
        },
    }
}

static RULE_TABLE: &[RequirementRule] = &[
    RequirementRule {
        kind: RequirementRuleKind::NetWorthFloor,
        unmet_severity: Severity::High,
        matches: |text| text.contains("net worth") && text.contains("12,000,000"),
        assess: |profile, _| {
            amount_floor(
                profile.financial.net_worth,
                FINANCIAL_INDEPENDENCE_NET_WORTH,
                "net worth",
            )
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::InvestmentFloor,
        unmet_severity: Severity::High,
        matches: |text| text.contains("invest") && text.contains("5,000,000"),
        assess: |profile, _| {
            amount_floor(
                profile.financial.investment_capital,
                BUSINESS_INVESTMENT_MINIMUM,
                "investment capital",
            )
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::MonthlyIncomeFloor,
        unmet_severity: Severity::High,
        matches: |text| text.contains("monthly income") && text.contains("37,000"),
        assess: |profile, _| {
            amount_floor(
                profile.financial.monthly_income,
                RETIREMENT_MONTHLY_INCOME,
                "monthly income",
            )
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::AnnualIncomeFloor,
        unmet_severity: Severity::High,
        matches: |text| text.contains("annual income") && text.contains("1,000,000"),
        assess: |profile, _| {
            amount_floor(
                profile.financial.annual_income_or_derived(),
                INDEPENDENT_ANNUAL_INCOME,
                "annual income",
            )
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::SponsorAssurance,
        unmet_severity: Severity::Medium,
        matches: |text| text.contains("financial assurance"),
        assess: |profile, _| {
            capability(
                profile,
                CapabilityFlag::SponsorFinancialAssurance,
                "sponsoring relative's financial assurance on file",
                "no financial assurance from the sponsoring relative",
            )
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::FinancialMeans,
        unmet_severity: Severity::Medium,
        matches: |text| {
            text.contains("financial means")
                || text.contains("sufficient funds")
                || text.contains("proof of funds")
                || text.contains("bank statement")
        },
        assess: |profile, _| {
            if profile.financial.has_declared_means() {
                Assessment {
                    met: true,
                    details: "financial standing declared".to_string(),
                }
            } else {
                Assessment {
                    met: false,
                    details: "no financial standing declared".to_string(),
                }
            }
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::SaqaAccreditation,
        unmet_severity: Severity::High,
        matches: |text| text.contains("saqa"),
        assess: |profile, _| {
            capability(
                profile,
                CapabilityFlag::SaqaEvaluation,
                "SAQA evaluation certificate on file",
                "no SAQA evaluation of foreign qualifications",
            )
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::CriticalSkillsListing,
        unmet_severity: Severity::High,
        matches: |text| text.contains("critical skills"),
        assess: |profile, _| {
            capability(
                profile,
                CapabilityFlag::OnCriticalSkillsList,
                "occupation confirmed on the critical skills list",
                "occupation not confirmed on the critical skills list",
            )
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::LabourRecommendation,
        unmet_severity: Severity::High,
        matches: |text| text.contains("department of labour") || text.contains("labour recommendation"),
        assess: |profile, _| {
            capability(
                profile,
                CapabilityFlag::LabourRecommendation,
                "Department of Labour recommendation on file",
                "no Department of Labour recommendation",
            )
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::ProfessionalRegistration,
        unmet_severity: Severity::High,
        matches: |text| text.contains("professional body") || text.contains("professional council"),
        assess: |profile, _| {
            capability(
                profile,
                CapabilityFlag::ProfessionalBodyRegistration,
                "professional body registration on file",
                "no registration with the relevant professional body",
            )
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::JobOffer,
        unmet_severity: Severity::High,
        matches: |text| {
            text.contains("job offer")
                || text.contains("employment contract")
                || text.contains("employment offer")
                || text.contains("offer of employment")
        },
        assess: |profile, _| {
            capability(
                profile,
                CapabilityFlag::JobOffer,
                "job offer from a South African employer on file",
                "no job offer from a South African employer",
            )
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::BusinessPlan,
        unmet_severity: Severity::High,
        matches: |text| text.contains("business plan"),
        assess: |profile, _| {
            capability(
                profile,
                CapabilityFlag::BusinessPlan,
                "business plan on file",
                "no business plan submitted",
            )
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::AdmissionLetter,
        unmet_severity: Severity::High,
        matches: |text| text.contains("admission") || text.contains("learning institution"),
        assess: |profile, _| {
            capability(
                profile,
                CapabilityFlag::AdmissionLetter,
                "admission letter from a registered institution on file",
                "no admission letter from a registered institution",
            )
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::MedicalCover,
        unmet_severity: Severity::Medium,
        matches: |text| {
            text.contains("medical cover")
                || text.contains("medical aid")
                || text.contains("medical scheme")
        },
        assess: |profile, _| {
            capability(
                profile,
                CapabilityFlag::MedicalCover,
                "registered medical scheme membership on file",
                "no proof of medical cover",
            )
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::MedicalReport,
        unmet_severity: Severity::Medium,
        matches: |text| text.contains("medical report") || text.contains("medical certificate"),
        assess: |profile, _| {
            capability(
                profile,
                CapabilityFlag::MedicalReport,
                "medical report on file",
                "no recent medical report",
            )
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::RadiologicalReport,
        unmet_severity: Severity::Medium,
        matches: |text| text.contains("radiological"),
        assess: |profile, _| {
            capability(
                profile,
                CapabilityFlag::RadiologicalReport,
                "radiological report on file",
                "no recent radiological report",
            )
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::PoliceClearance,
        unmet_severity: Severity::High,
        matches: |text| text.contains("police clearance"),
        assess: |profile, _| {
            capability(
                profile,
                CapabilityFlag::PoliceClearance,
                "police clearance certificates on file",
                "no police clearance certificates",
            )
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::YellowFever,
        unmet_severity: Severity::Medium,
        matches: |text| text.contains("yellow fever"),
        assess: |profile, _| {
            capability(
                profile,
                CapabilityFlag::YellowFeverVaccination,
                "yellow fever vaccination certificate on file",
                "no yellow fever vaccination certificate",
            )
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::WorkVisaTenure,
        unmet_severity: Severity::High,
        matches: |text| text.contains("work visa") && text.contains("five years"),
        assess: |profile, ctx| {
            let needed = ctx.policy.permanent_residence_tenure_years;
            match profile.years_on_work_visa {
                Some(years) if years >= needed => Assessment {
                    met: true,
                    details: format!("{years} year(s) on a work visa meets the {needed}-year tenure"),
                },
                Some(years) => Assessment {
                    met: false,
                    details: format!("{years} year(s) on a work visa is short of the {needed}-year tenure"),
                },
                None => Assessment {
                    met: false,
                    details: "work visa tenure not declared".to_string(),
                },
            }
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::PassportValidity,
        unmet_severity: Severity::High,
        matches: |text| text.contains("passport") && text.contains("valid"),
        assess: |profile, ctx| {
            let floor = ctx.policy.passport_validity_floor_days;
            match profile.passport_expiry {
                Some(expiry) => {
                    let remaining = (expiry - ctx.today).num_days();
                    if remaining >= floor {
                        Assessment {
                            met: true,
                            details: format!("passport valid for another {remaining} day(s)"),
                        }
                    } else {
                        Assessment {
                            met: false,
                            details: format!(
                                "passport expires in {remaining} day(s); at least {floor} required"
                            ),
                        }
                    }
                }
                None => Assessment {
                    met: false,
                    details: "passport expiry date not provided".to_string(),
                },
            }
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::KinshipProof,
        unmet_severity: Severity::Medium,
        matches: |text| {
            text.contains("family") || text.contains("spousal") || text.contains("kinship")
        },
        assess: |profile, _| {
            capability(
                profile,
                CapabilityFlag::ProofOfKinship,
                "kinship with a citizen or permanent resident established",
                "kinship with a citizen or permanent resident not established",
            )
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::ReturnTravel,
        unmet_severity: Severity::Medium,
        matches: |text| {
            (text.contains("return") && text.contains("ticket"))
                || text.contains("onward")
                || text.contains("itinerary")
        },
        assess: |profile, _| {
            capability(
                profile,
                CapabilityFlag::ReturnTicket,
                "return or onward travel booking on file",
                "no return or onward travel booking",
            )
        },
    },
    RequirementRule {
        kind: RequirementRuleKind::Accommodation,
        unmet_severity: Severity::Medium,
        matches: |text| text.contains("accommodation"),
        assess: |profile, _| {
            capability(
                profile,
                CapabilityFlag::ProofOfAccommodation,
                "accommodation arrangements on file",
                "no proof of accommodation arrangements",
            )
        },
    },
];

/// Judge one requirement string against the profile. The first matching
/// table entry wins; text no entry claims falls back to an unverified,
/// low-severity unmet outcome.
pub(crate) fn assess_requirement(
    profile: &ApplicantProfile,
    requirement: &str,
    ctx: &RuleContext<'_>,
) -> RequirementOutcome {
    let normalized = requirement.to_lowercase();

    for rule in RULE_TABLE {
        if (rule.matches)(&normalized) {
            let Assessment { met, details } = (rule.assess)(profile, ctx);
            tracing::trace!(rule = ?rule.kind, met, "requirement decided");
            let severity = if met { Severity::Low } else { rule.unmet_severity };
            return RequirementOutcome {
                requirement: requirement.to_string(),
                met,
                details,
                severity,
            };
        }
    }

    tracing::trace!(requirement, "no rule claims requirement text");

    RequirementOutcome {
        requirement: requirement.to_string(),
        met: false,
        details: format!("Requires verification: {requirement}"),
        severity: Severity::Low,
    }
}

/// Which table entry would decide the given requirement text, if any.
#[cfg(test)]
pub(crate) fn matching_rule_kind(requirement: &str) -> Option<RequirementRuleKind> {
    let normalized = requirement.to_lowercase();
    RULE_TABLE
        .iter()
        .find(|rule| (rule.matches)(&normalized))
        .map(|rule| rule.kind)
}
