use serde::{Deserialize, Serialize};

use super::domain::{DocumentRecord, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InconsistencyKind {
    NameMismatch,
    PassportNumberMismatch,
}

/// One identity-field disagreement between two documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inconsistency {
    pub kind: InconsistencyKind,
    pub message: String,
    pub severity: Severity,
}

/// Whether the identity fields extracted from the uploads agree with each
/// other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub consistent: bool,
    pub inconsistencies: Vec<Inconsistency>,
}

/// Identity fields compared across documents. A passport-number
/// disagreement is graded more severely than a name disagreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdentityField {
    FullName,
    PassportNumber,
}

impl IdentityField {
    const ALL: [Self; 2] = [Self::FullName, Self::PassportNumber];

    const fn key(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::PassportNumber => "passport_number",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::FullName => "full name",
            Self::PassportNumber => "passport number",
        }
    }

    const fn kind(self) -> InconsistencyKind {
        match self {
            Self::FullName => InconsistencyKind::NameMismatch,
            Self::PassportNumber => InconsistencyKind::PassportNumberMismatch,
        }
    }

    const fn severity(self) -> Severity {
        match self {
            Self::FullName => Severity::High,
            Self::PassportNumber => Severity::Critical,
        }
    }
}

/// Compare identity fields across the uploaded documents.
///
/// The first document carrying a value for a field sets the baseline;
/// every later differing value is flagged against that baseline. Three
/// documents with values A, B, B therefore produce two entries; the
/// checker reports disagreements with the baseline rather than clustering
/// mutually-matching subsets.
pub(crate) fn cross_validate(documents: &[DocumentRecord]) -> ConsistencyReport {
    let mut inconsistencies = Vec::new();

    for field in IdentityField::ALL {
        let values: Vec<(&str, &str)> = documents
            .iter()
            .filter_map(|document| {
                document
                    .extracted_data
                    .get(field.key())
                    .map(|value| value.trim())
                    .filter(|value| !value.is_empty())
                    .map(|value| (document.doc_type.as_str(), value))
            })
            .collect();

        let Some(((baseline_doc, baseline), rest)) = values.split_first() else {
            continue;
        };

        for (doc_type, value) in rest {
            if value != baseline {
                inconsistencies.push(Inconsistency {
                    kind: field.kind(),
                    severity: field.severity(),
                    message: format!(
                        "{} '{}' in {} does not match '{}' in {}",
                        field.label(),
                        value,
                        doc_type,
                        baseline,
                        baseline_doc
                    ),
                });
            }
        }
    }

    ConsistencyReport {
        consistent: inconsistencies.is_empty(),
        inconsistencies,
    }
}
