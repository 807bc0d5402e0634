use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Broad grouping used when presenting ranked pathways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGroup {
    Visitor,
    Study,
    Work,
    Business,
    Retirement,
    Family,
    PermanentResidence,
}

impl CategoryGroup {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Visitor => "Visitor",
            Self::Study => "Study",
            Self::Work => "Work",
            Self::Business => "Business",
            Self::Retirement => "Retirement",
            Self::Family => "Family",
            Self::PermanentResidence => "Permanent Residence",
        }
    }
}

/// One entry of a category's document checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredDocument {
    pub doc_type: String,
    pub required: bool,
    pub name: String,
    pub description: String,
}

/// Legal requirement and disqualifier text for a category, in the order the
/// legislation lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEligibility {
    pub requirements: Vec<String>,
    pub disqualifiers: Vec<String>,
}

/// Immutable description of one visa category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisaCategory {
    pub id: String,
    pub name: String,
    pub group: CategoryGroup,
    pub legal_reference: String,
    pub eligibility: CategoryEligibility,
    pub required_documents: Vec<RequiredDocument>,
    pub fees: String,
    pub max_duration: String,
    pub common_rejection_reasons: Vec<String>,
}

/// Errors raised by catalog lookup and loading.
///
/// An unknown category id is the only failure the advisory core itself ever
/// raises; the remaining variants belong to startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown visa category: {0}")]
    UnknownCategory(String),
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("catalog defines no visa categories")]
    Empty,
}

/// The visa-category reference data, loaded once at startup and shared
/// read-only for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisaCatalog {
    categories: Vec<VisaCategory>,
}

impl VisaCatalog {
    pub fn new(categories: Vec<VisaCategory>) -> Self {
        Self { categories }
    }

    /// Parse a catalog from its JSON representation (an array of
    /// categories).
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let categories: Vec<VisaCategory> = serde_json::from_str(raw)?;
        if categories.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { categories })
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn categories(&self) -> &[VisaCategory] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, category_id: &str) -> Result<&VisaCategory, CatalogError> {
        self.categories
            .iter()
            .find(|category| category.id == category_id)
            .ok_or_else(|| CatalogError::UnknownCategory(category_id.to_string()))
    }

    /// The built-in South African catalog covering the temporary residence
    /// visas of the Immigration Act 13 of 2002 and the two most common
    /// permanent residence routes.
    pub fn south_africa() -> Self {
        Self::new(vec![
            visitor_visa(),
            study_visa(),
            general_work_visa(),
            critical_skills_visa(),
            business_visa(),
            retired_person_visa(),
            relatives_visa(),
            permanent_residence_worker(),
            financially_independent_permanent_residence(),
        ])
    }
}

fn doc(doc_type: &str, required: bool, name: &str, description: &str) -> RequiredDocument {
    RequiredDocument {
        doc_type: doc_type.to_string(),
        required,
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

const STANDARD_DISQUALIFIERS: [&str; 4] = [
    "Criminal record with a sentence of imprisonment without the option of a fine",
    "Previous overstay or contravention of visa conditions in South Africa",
    "Listed as an undesirable or prohibited person by the Department of Home Affairs",
    "Passport due to expire within 30 days",
];

fn visitor_visa() -> VisaCategory {
    VisaCategory {
        id: "visitor".to_string(),
        name: "Visitor's Visa".to_string(),
        group: CategoryGroup::Visitor,
        legal_reference: "Immigration Act 13 of 2002, section 11".to_string(),
        eligibility: CategoryEligibility {
            requirements: strings(&[
                "Machine-readable passport valid for the full period of the intended visit",
                "Proof of sufficient financial means to cover the duration of the stay",
                "Return or onward ticket, or proof of a reserved travel itinerary",
                "Proof of accommodation arrangements for the duration of the visit",
                "Yellow fever vaccination certificate when travelling from or through an endemic area",
            ]),
            disqualifiers: strings(&STANDARD_DISQUALIFIERS),
        },
        required_documents: vec![
            doc("passport", true, "Passport", "Valid machine-readable passport"),
            doc("photo", true, "Passport photograph", "Two recent passport photographs"),
            doc("application_form", true, "Form DHA-1738", "Completed visa application form"),
            doc("return_ticket", true, "Return ticket", "Return or onward travel booking"),
            doc("bank_statement", true, "Bank statements", "Three months of bank statements"),
            doc(
                "proof_of_accommodation",
                true,
                "Proof of accommodation",
                "Hotel booking or host confirmation",
            ),
            doc(
                "invitation_letter",
                false,
                "Invitation letter",
                "Letter from a South African host, if visiting family or friends",
            ),
        ],
        fees: "R425".to_string(),
        max_duration: "90 days".to_string(),
        common_rejection_reasons: strings(&[
            "Insufficient proof of funds for the declared stay",
            "No evidence of intent to depart before the visa lapses",
        ]),
    }
}

fn study_visa() -> VisaCategory {
    VisaCategory {
        id: "study".to_string(),
        name: "Study Visa".to_string(),
        group: CategoryGroup::Study,
        legal_reference: "Immigration Act 13 of 2002, section 13".to_string(),
        eligibility: CategoryEligibility {
            requirements: strings(&[
                "Official admission letter from a registered learning institution",
                "Proof of medical cover renewed annually with a registered medical scheme",
                "Proof of sufficient financial means for tuition and living costs",
                "Police clearance certificate from every country resided in for 12 months or longer since the age of 18",
                "Medical report not older than six months",
            ]),
            disqualifiers: strings(&STANDARD_DISQUALIFIERS),
        },
        required_documents: vec![
            doc("passport", true, "Passport", "Valid machine-readable passport"),
            doc("photo", true, "Passport photograph", "Two recent passport photographs"),
            doc("application_form", true, "Form DHA-1738", "Completed visa application form"),
            doc(
                "admission_letter",
                true,
                "Admission letter",
                "Official letter from the learning institution",
            ),
            doc(
                "medical_cover_proof",
                true,
                "Medical cover",
                "Proof of membership of a registered medical scheme",
            ),
            doc("bank_statement", true, "Bank statements", "Proof of funds for tuition and living costs"),
            doc("police_clearance", true, "Police clearance", "Clearance from every qualifying country"),
            doc("medical_report", true, "Medical report", "Report not older than six months"),
            doc(
                "parental_consent",
                false,
                "Parental consent",
                "Consent from both parents for applicants under 18",
            ),
        ],
        fees: "R425".to_string(),
        max_duration: "Duration of the course of study".to_string(),
        common_rejection_reasons: strings(&[
            "Admission letter not issued by a registered institution",
            "Medical cover not valid for the full study period",
        ]),
    }
}

fn general_work_visa() -> VisaCategory {
    VisaCategory {
        id: "general_work".to_string(),
        name: "General Work Visa".to_string(),
        group: CategoryGroup::Work,
        legal_reference: "Immigration Act 13 of 2002, section 19(2)".to_string(),
        eligibility: CategoryEligibility {
            requirements: strings(&[
                "Employment contract or formal job offer from a South African employer",
                "SAQA evaluation certificate for all foreign qualifications",
                "Recommendation from the Department of Labour confirming that no suitable citizen or permanent resident could fill the position",
                "Police clearance certificate from every country resided in for 12 months or longer since the age of 18",
                "Medical report not older than six months",
                "Machine-readable passport valid for the full period of the intended visa",
            ]),
            disqualifiers: strings(&STANDARD_DISQUALIFIERS),
        },
        required_documents: vec![
            doc("passport", true, "Passport", "Valid machine-readable passport"),
            doc("photo", true, "Passport photograph", "Two recent passport photographs"),
            doc("application_form", true, "Form DHA-1738", "Completed visa application form"),
            doc(
                "employment_contract",
                true,
                "Employment contract",
                "Signed contract or formal job offer",
            ),
            doc(
                "saqa_certificate",
                true,
                "SAQA certificate",
                "SAQA evaluation of foreign qualifications",
            ),
            doc(
                "dol_recommendation",
                true,
                "Department of Labour recommendation",
                "Certification that no suitable local candidate was available",
            ),
            doc("police_clearance", true, "Police clearance", "Clearance from every qualifying country"),
            doc("medical_report", true, "Medical report", "Report not older than six months"),
            doc(
                "radiological_report",
                true,
                "Radiological report",
                "Chest radiological report, waived for pregnant applicants and children under 12",
            ),
            doc("cv", true, "Curriculum vitae", "Full curriculum vitae"),
            doc(
                "proof_of_qualifications",
                true,
                "Qualifications",
                "Certified copies of all qualifications",
            ),
            doc(
                "yellow_fever_certificate",
                true,
                "Yellow fever certificate",
                "Required when travelling from or through an endemic area",
            ),
            doc(
                "motivation_letter",
                false,
                "Motivation letter",
                "Employer motivation supporting the application",
            ),
            doc(
                "proof_of_accommodation",
                false,
                "Proof of accommodation",
                "Lease or employer-provided housing confirmation",
            ),
        ],
        fees: "R1,520".to_string(),
        max_duration: "5 years".to_string(),
        common_rejection_reasons: strings(&[
            "Department of Labour recommendation missing or negative",
            "SAQA evaluation not submitted for foreign qualifications",
            "Employment contract conditions below the prescribed standard",
        ]),
    }
}

fn critical_skills_visa() -> VisaCategory {
    VisaCategory {
        id: "critical_skills".to_string(),
        name: "Critical Skills Work Visa".to_string(),
        group: CategoryGroup::Work,
        legal_reference: "Immigration Act 13 of 2002, section 19(4)".to_string(),
        eligibility: CategoryEligibility {
            requirements: strings(&[
                "Occupation appears on the published critical skills list",
                "SAQA evaluation certificate for all foreign qualifications",
                "Registration with the relevant professional body, council or board",
                "Police clearance certificate from every country resided in for 12 months or longer since the age of 18",
                "Medical report not older than six months",
            ]),
            disqualifiers: strings(&STANDARD_DISQUALIFIERS),
        },
        required_documents: vec![
            doc("passport", true, "Passport", "Valid machine-readable passport"),
            doc("photo", true, "Passport photograph", "Two recent passport photographs"),
            doc("application_form", true, "Form DHA-1738", "Completed visa application form"),
            doc(
                "saqa_certificate",
                true,
                "SAQA certificate",
                "SAQA evaluation of foreign qualifications",
            ),
            doc(
                "professional_registration",
                true,
                "Professional registration",
                "Proof of registration with the relevant body",
            ),
            doc(
                "critical_skills_motivation",
                true,
                "Critical skills motivation",
                "Motivation tying qualifications and experience to the listed occupation",
            ),
            doc("police_clearance", true, "Police clearance", "Clearance from every qualifying country"),
            doc("medical_report", true, "Medical report", "Report not older than six months"),
            doc("cv", true, "Curriculum vitae", "Full curriculum vitae"),
            doc(
                "job_offer_letter",
                false,
                "Job offer letter",
                "A job offer strengthens the application but is not required at submission",
            ),
        ],
        fees: "R1,520".to_string(),
        max_duration: "5 years".to_string(),
        common_rejection_reasons: strings(&[
            "Occupation not matched to the published list",
            "Professional body registration outstanding",
        ]),
    }
}

fn business_visa() -> VisaCategory {
    VisaCategory {
        id: "business".to_string(),
        name: "Business Visa".to_string(),
        group: CategoryGroup::Business,
        legal_reference: "Immigration Act 13 of 2002, section 15".to_string(),
        eligibility: CategoryEligibility {
            requirements: strings(&[
                "Minimum investment of R5,000,000 in the book value of the business",
                "Comprehensive business plan for the intended venture",
                "Undertaking that at least 60% of staff will be citizens or permanent residents",
                "Police clearance certificate from every country resided in for 12 months or longer since the age of 18",
                "Medical report not older than six months",
            ]),
            disqualifiers: strings(&STANDARD_DISQUALIFIERS),
        },
        required_documents: vec![
            doc("passport", true, "Passport", "Valid machine-readable passport"),
            doc("photo", true, "Passport photograph", "Two recent passport photographs"),
            doc("application_form", true, "Form DHA-1738", "Completed visa application form"),
            doc("business_plan", true, "Business plan", "Comprehensive plan for the venture"),
            doc(
                "proof_of_investment",
                true,
                "Proof of investment",
                "Chartered accountant certification of the investment amount",
            ),
            doc("police_clearance", true, "Police clearance", "Clearance from every qualifying country"),
            doc("medical_report", true, "Medical report", "Report not older than six months"),
            doc(
                "company_registration",
                true,
                "Company registration",
                "CIPC registration documents, where already incorporated",
            ),
            doc(
                "partnership_agreement",
                false,
                "Partnership agreement",
                "Agreements with any South African partners",
            ),
        ],
        fees: "R1,520".to_string(),
        max_duration: "3 years".to_string(),
        common_rejection_reasons: strings(&[
            "Investment amount below the prescribed minimum",
            "Business plan lacking feasibility detail",
        ]),
    }
}

fn retired_person_visa() -> VisaCategory {
    VisaCategory {
        id: "retired_person".to_string(),
        name: "Retired Person's Visa".to_string(),
        group: CategoryGroup::Retirement,
        legal_reference: "Immigration Act 13 of 2002, section 20".to_string(),
        eligibility: CategoryEligibility {
            requirements: strings(&[
                "Minimum monthly income of R37,000 from a pension, annuity or retirement account",
                "Proof that the income stream is guaranteed for the duration of the visa",
                "Police clearance certificate from every country resided in for 12 months or longer since the age of 18",
                "Medical report not older than six months",
            ]),
            disqualifiers: strings(&STANDARD_DISQUALIFIERS),
        },
        required_documents: vec![
            doc("passport", true, "Passport", "Valid machine-readable passport"),
            doc("photo", true, "Passport photograph", "Two recent passport photographs"),
            doc("application_form", true, "Form DHA-1738", "Completed visa application form"),
            doc(
                "proof_of_retirement_income",
                true,
                "Proof of retirement income",
                "Pension, annuity or retirement account statements",
            ),
            doc("police_clearance", true, "Police clearance", "Clearance from every qualifying country"),
            doc("medical_report", true, "Medical report", "Report not older than six months"),
            doc(
                "marriage_certificate",
                false,
                "Marriage certificate",
                "Where a spouse accompanies the applicant",
            ),
        ],
        fees: "R425".to_string(),
        max_duration: "4 years".to_string(),
        common_rejection_reasons: strings(&[
            "Income stream not guaranteed for the visa period",
            "Declared income below the prescribed minimum",
        ]),
    }
}

fn relatives_visa() -> VisaCategory {
    VisaCategory {
        id: "relatives".to_string(),
        name: "Relative's Visa".to_string(),
        group: CategoryGroup::Family,
        legal_reference: "Immigration Act 13 of 2002, section 18".to_string(),
        eligibility: CategoryEligibility {
            requirements: strings(&[
                "Proof of an immediate family or spousal relationship with a South African citizen or permanent resident",
                "Financial assurance of R8,500 per month provided by the sponsoring relative",
                "Police clearance certificate from every country resided in for 12 months or longer since the age of 18",
            ]),
            disqualifiers: strings(&STANDARD_DISQUALIFIERS),
        },
        required_documents: vec![
            doc("passport", true, "Passport", "Valid machine-readable passport"),
            doc("photo", true, "Passport photograph", "Two recent passport photographs"),
            doc("application_form", true, "Form DHA-1738", "Completed visa application form"),
            doc(
                "proof_of_relationship",
                true,
                "Proof of relationship",
                "Unabridged birth or marriage certificates establishing kinship",
            ),
            doc(
                "sponsor_assurance",
                true,
                "Sponsor financial assurance",
                "Sponsoring relative's undertaking and proof of means",
            ),
            doc("police_clearance", true, "Police clearance", "Clearance from every qualifying country"),
            doc(
                "sponsor_id_copy",
                false,
                "Sponsor identity document",
                "Certified copy of the sponsor's ID or permanent residence permit",
            ),
        ],
        fees: "R425".to_string(),
        max_duration: "2 years".to_string(),
        common_rejection_reasons: strings(&[
            "Kinship not established with unabridged certificates",
            "Sponsor unable to demonstrate the prescribed financial assurance",
        ]),
    }
}

fn permanent_residence_worker() -> VisaCategory {
    VisaCategory {
        id: "permanent_residence_worker".to_string(),
        name: "Permanent Residence (Five-Year Work Residence)".to_string(),
        group: CategoryGroup::PermanentResidence,
        legal_reference: "Immigration Act 13 of 2002, section 26(a)".to_string(),
        eligibility: CategoryEligibility {
            requirements: strings(&[
                "Five years of continuous residence in South Africa on a general work visa",
                "Permanent employment offer from a South African employer",
                "Police clearance certificate from every country resided in for 12 months or longer since the age of 18",
            ]),
            disqualifiers: strings(&STANDARD_DISQUALIFIERS),
        },
        required_documents: vec![
            doc("passport", true, "Passport", "Valid machine-readable passport"),
            doc("photo", true, "Passport photograph", "Two recent passport photographs"),
            doc("application_form", true, "Form DHA-947", "Completed permanent residence application"),
            doc(
                "work_visa_history",
                true,
                "Work visa history",
                "Copies of all work visas held over the qualifying period",
            ),
            doc(
                "employment_offer",
                true,
                "Permanent employment offer",
                "Offer of permanent employment from a South African employer",
            ),
            doc("police_clearance", true, "Police clearance", "Clearance from every qualifying country"),
            doc("medical_report", true, "Medical report", "Report not older than six months"),
            doc(
                "radiological_report",
                true,
                "Radiological report",
                "Chest radiological report, waived for pregnant applicants and children under 12",
            ),
            doc(
                "spouse_documents",
                false,
                "Spouse documents",
                "Marriage certificate and spouse passport, where applicable",
            ),
        ],
        fees: "R1,520".to_string(),
        max_duration: "Permanent".to_string(),
        common_rejection_reasons: strings(&[
            "Breaks in the five-year qualifying residence period",
            "Employment offer not permanent in nature",
        ]),
    }
}

fn financially_independent_permanent_residence() -> VisaCategory {
    VisaCategory {
        id: "financially_independent".to_string(),
        name: "Permanent Residence (Financially Independent Person)".to_string(),
        group: CategoryGroup::PermanentResidence,
        legal_reference: "Immigration Act 13 of 2002, section 27(f)".to_string(),
        eligibility: CategoryEligibility {
            requirements: strings(&[
                "Minimum net worth of R12,000,000 certified by a chartered accountant",
                "Payment of the prescribed amount to the Director-General upon approval",
                "Police clearance certificate from every country resided in for 12 months or longer since the age of 18",
            ]),
            disqualifiers: strings(&STANDARD_DISQUALIFIERS),
        },
        required_documents: vec![
            doc("passport", true, "Passport", "Valid machine-readable passport"),
            doc("photo", true, "Passport photograph", "Two recent passport photographs"),
            doc("application_form", true, "Form DHA-947", "Completed permanent residence application"),
            doc(
                "net_worth_statement",
                true,
                "Net worth statement",
                "Chartered accountant certification of assets and liabilities",
            ),
            doc("police_clearance", true, "Police clearance", "Clearance from every qualifying country"),
            doc("medical_report", true, "Medical report", "Report not older than six months"),
            doc(
                "tax_clearance",
                false,
                "Tax clearance",
                "Tax clearance from the applicant's country of residence",
            ),
        ],
        fees: "R1,520 plus the prescribed section 27(f) amount".to_string(),
        max_duration: "Permanent".to_string(),
        common_rejection_reasons: strings(&[
            "Net worth certification not issued by a chartered accountant",
            "Prescribed amount not paid after approval",
        ]),
    }
}
