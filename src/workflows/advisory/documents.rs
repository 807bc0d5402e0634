use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::catalog::{CatalogError, RequiredDocument, VisaCatalog};
use super::domain::DocumentRecord;

/// Per-category checklist view handed to callers before they upload
/// anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChecklist {
    pub category_id: String,
    pub category_name: String,
    pub documents: Vec<RequiredDocument>,
    pub total_required: usize,
    pub total_optional: usize,
}

/// A required document matched by an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvidedDocument {
    pub doc_type: String,
    pub name: String,
}

/// A required document with no matching upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingDocument {
    pub doc_type: String,
    pub name: String,
    pub description: String,
}

/// Optional documents are reported for completeness of the view but never
/// count toward the completion percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionalDocumentStatus {
    pub doc_type: String,
    pub name: String,
    pub uploaded: bool,
}

/// Whether the uploads cover a category's required document list.
///
/// `provided` and `missing` always partition the required list exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletenessReport {
    pub complete: bool,
    pub completion_percentage: u8,
    pub provided: Vec<ProvidedDocument>,
    pub missing: Vec<MissingDocument>,
    pub optional: Vec<OptionalDocumentStatus>,
}

pub(crate) fn document_checklist(
    catalog: &VisaCatalog,
    category_id: &str,
) -> Result<DocumentChecklist, CatalogError> {
    let category = catalog.get(category_id)?;

    let total_required = category
        .required_documents
        .iter()
        .filter(|document| document.required)
        .count();

    Ok(DocumentChecklist {
        category_id: category.id.clone(),
        category_name: category.name.clone(),
        documents: category.required_documents.clone(),
        total_required,
        total_optional: category.required_documents.len() - total_required,
    })
}

pub(crate) fn check_completeness(
    catalog: &VisaCatalog,
    category_id: &str,
    documents: &[DocumentRecord],
) -> Result<CompletenessReport, CatalogError> {
    let category = catalog.get(category_id)?;

    let uploaded: BTreeSet<&str> = documents
        .iter()
        .map(|document| document.doc_type.as_str())
        .collect();

    let mut provided = Vec::new();
    let mut missing = Vec::new();
    let mut optional = Vec::new();
    let mut required_total = 0usize;

    for document in &category.required_documents {
        if !document.required {
            optional.push(OptionalDocumentStatus {
                doc_type: document.doc_type.clone(),
                name: document.name.clone(),
                uploaded: uploaded.contains(document.doc_type.as_str()),
            });
            continue;
        }

        required_total += 1;
        if uploaded.contains(document.doc_type.as_str()) {
            provided.push(ProvidedDocument {
                doc_type: document.doc_type.clone(),
                name: document.name.clone(),
            });
        } else {
            missing.push(MissingDocument {
                doc_type: document.doc_type.clone(),
                name: document.name.clone(),
                description: document.description.clone(),
            });
        }
    }

    let completion_percentage = if required_total == 0 {
        100
    } else {
        ((provided.len() * 100) as f64 / required_total as f64).round() as u8
    };

    Ok(CompletenessReport {
        complete: missing.is_empty(),
        completion_percentage,
        provided,
        missing,
        optional,
    })
}
