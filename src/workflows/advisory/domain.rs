use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Boolean capabilities an applicant can assert during intake.
///
/// The profile is an open attribute bag: a flag that was never supplied
/// reads as `false`, which the rule tables treat as "unknown", never as an
/// input error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityFlag {
    JobOffer,
    SaqaEvaluation,
    LabourRecommendation,
    PoliceClearance,
    MedicalReport,
    RadiologicalReport,
    MedicalCover,
    YellowFeverVaccination,
    AdmissionLetter,
    OnCriticalSkillsList,
    ProfessionalBodyRegistration,
    BusinessPlan,
    ProofOfKinship,
    SponsorFinancialAssurance,
    ReturnTicket,
    ProofOfAccommodation,
    CriminalRecord,
    PreviousOverstay,
    PreviousImmigrationViolation,
    DeclaredUndesirable,
}

/// Declared financial position. Every field is optional; rules only read
/// what is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialStanding {
    pub monthly_income: Option<u64>,
    pub annual_income: Option<u64>,
    pub net_worth: Option<u64>,
    pub investment_capital: Option<u64>,
}

impl FinancialStanding {
    /// Annual income as declared, or derived from monthly income.
    pub fn annual_income_or_derived(&self) -> Option<u64> {
        self.annual_income
            .or_else(|| self.monthly_income.map(|monthly| monthly * 12))
    }

    /// Whether the applicant declared any positive financial standing.
    pub fn has_declared_means(&self) -> bool {
        [
            self.monthly_income,
            self.annual_income,
            self.net_worth,
            self.investment_capital,
        ]
        .iter()
        .any(|value| value.map(|amount| amount > 0).unwrap_or(false))
    }
}

/// Applicant snapshot consumed by the eligibility engine.
///
/// Nothing here is required. Missing data surfaces as unmet requirements in
/// the evaluation output, not as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub purpose_of_stay: Option<String>,
    #[serde(default)]
    pub passport_number: Option<String>,
    #[serde(default)]
    pub passport_expiry: Option<NaiveDate>,
    #[serde(default)]
    pub marital_status: Option<String>,
    #[serde(default)]
    pub years_on_work_visa: Option<u8>,
    #[serde(default)]
    pub financial: FinancialStanding,
    #[serde(default)]
    pub capabilities: BTreeMap<CapabilityFlag, bool>,
}

impl ApplicantProfile {
    /// Whether the applicant asserted the given capability. Absent flags
    /// read as `false`.
    pub fn asserts(&self, flag: CapabilityFlag) -> bool {
        self.capabilities.get(&flag).copied().unwrap_or(false)
    }
}

/// Graded weight attached to findings across the advisory module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Judgment for a single legal requirement string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementOutcome {
    pub requirement: String,
    pub met: bool,
    pub details: String,
    pub severity: Severity,
}

/// Open issue surfaced to the applicant or an operator for remediation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFlag {
    pub kind: RiskFlagKind,
    pub details: String,
    /// The requirement or disqualifier text the flag refers to.
    pub reference: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlagKind {
    RequirementNotMet,
    Disqualification,
}

/// A triggered absolute exclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disqualification {
    pub disqualifier: String,
    pub details: String,
}

/// Result of scoring one profile against one visa category. Recomputed on
/// every call and never persisted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEvaluation {
    pub eligible: bool,
    pub eligibility_score: u8,
    pub met_requirements: Vec<RequirementOutcome>,
    pub unmet_requirements: Vec<RequirementOutcome>,
    pub disqualifications: Vec<Disqualification>,
    pub risk_flags: Vec<RiskFlag>,
    pub guidance: String,
}

/// Uploaded document as seen by the core: a type plus whatever structured
/// fields upstream extraction produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub extracted_data: BTreeMap<String, String>,
    #[serde(default)]
    pub validation_status: Option<String>,
}

impl DocumentRecord {
    pub fn new(doc_type: impl Into<String>) -> Self {
        Self {
            doc_type: doc_type.into(),
            extracted_data: BTreeMap::new(),
            validation_status: None,
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extracted_data.insert(key.into(), value.into());
        self
    }
}

/// Application reference handed in by the caller when compiling a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: String,
    pub visa_category_id: String,
}
