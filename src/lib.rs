//! Document Section Schemas
//!
//! Catalog-driven validators for the sections of plan and task documents.
//! Each family of sections (Business & Scope, Planning & Decomposition,
//! Quality & Risk, High-Level Design) is composed per document type into a
//! strict validator plus a byId index for validating any single section.
//!
//! ## Features
//!
//! - **Catalog Driven**: Section ids, names, nesting and applicability come from JSON family files
//! - **Per-Document Shapes**: Sections are required, optional or omitted per plan/task
//! - **Strict Validation**: Unknown keys are rejected and every issue is reported in one pass
//! - **Diagram Grammar**: Mermaid kinds are checked per section; flow graphs are structured
//! - **Fail Fast Composition**: Missing factories surface before any content is validated
//!
//! ## Architecture
//!
//! ```text
//! catalog/*.json ──► Catalog ──► SchemaComposer ──► FamilySchema
//!                                   │                  ├── validator (strict record)
//!                          FactoryRegistry             └── byId (every section id)
//!                          (sections::*)
//! ```

pub mod applicability;
pub mod catalog;
pub mod compose;
pub mod config;
pub mod error;
pub mod export;
pub mod naming;
pub mod sections;
pub mod validate;

pub use catalog::{Applicability, Catalog, DocumentType, SchemaCatalogFamily, SchemaCatalogSection};
pub use compose::{compose_family_schema, get_plan_schema, get_task_schema, FamilySchema, SchemaComposer};
pub use config::SchemaConfig;
pub use error::{Result, SchemaError};
pub use sections::{BuildContext, ById, FactoryRegistry, SectionFactory};
pub use validate::{Issue, IssueCode, PathSegment, Validation, Validator};
