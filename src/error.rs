//! Error types for catalog loading and schema composition

use thiserror::Error;

use crate::catalog::DocumentType;

/// Result type for catalog and composition operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Configuration errors.
///
/// These abort construction of a family schema. Content problems are never
/// reported through this type; see [`crate::validate::Issue`].
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error(
        "No schema factory registered for section {id} ({name}). \
         This indicates a mismatch between the schema definition and JSON files."
    )]
    MissingFactory { id: String, name: String },

    #[error("Section {id} does not declare applicability for document type '{document_type}'")]
    UnspecifiedApplicability { id: String, document_type: DocumentType },

    #[error("Section {id} was not registered in byId by its own or its parent's factory")]
    UnregisteredSection { id: String },

    #[error("Duplicate shape key '{key}' in family {family} (section {id})")]
    DuplicateShapeKey { family: u32, key: String, id: String },

    #[error("Duplicate section id {id} in family {family}")]
    DuplicateSectionId { family: u32, id: String },

    #[error("Duplicate family id {0}")]
    DuplicateFamily(u32),

    #[error("Section {id} has no parent section {parent} in family {family}")]
    OrphanSection { family: u32, id: String, parent: String },

    #[error("Section id {id} does not belong to family {family}")]
    ForeignSection { family: u32, id: String },

    #[error("Family not found: {0}")]
    UnknownFamily(u32),

    #[error("Section not found: {id} in family {family}")]
    UnknownSection { family: u32, id: String },

    #[error("Invalid catalog file {path}: {reason}")]
    InvalidCatalogFile { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
