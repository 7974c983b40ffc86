//! Applicability resolution
//!
//! Pure lookup of required/optional/omitted for a section and document type.
//! A section that leaves a document type unspecified is a catalog defect and
//! resolves to an error rather than a guessed default.

use crate::catalog::{Applicability, DocumentType, SchemaCatalogSection};
use crate::error::{Result, SchemaError};

/// Resolve a section's applicability for a document type
pub fn resolve(section: &SchemaCatalogSection, document_type: DocumentType) -> Result<Applicability> {
    section
        .applicability
        .get(document_type)
        .ok_or_else(|| SchemaError::UnspecifiedApplicability {
            id: section.id.clone(),
            document_type,
        })
}
