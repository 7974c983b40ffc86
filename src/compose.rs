//! Family Schema Composer
//!
//! Turns one family of the catalog into a strict validator for a document
//! type, together with the byId index reaching every applicable section at
//! any depth. Each call builds fresh structures; nothing is cached or shared
//! between calls.

use serde_json::Value;
use std::sync::Arc;

use crate::catalog::{Catalog, DocumentType, SchemaCatalogFamily, SchemaCatalogSection};
use crate::error::Result;
use crate::sections::{BuildContext, ById, FactoryRegistry};
use crate::validate::primitives::record;
use crate::validate::{Validation, Validator};

/// Composed schema for one (family, document type) pair
#[derive(Debug, Clone)]
pub struct FamilySchema {
    family_id: u32,
    document_type: DocumentType,
    validator: Arc<Validator>,
    by_id: ById,
}

impl FamilySchema {
    pub fn family_id(&self) -> u32 {
        self.family_id
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// Strict composite validator over the whole family
    pub fn validator(&self) -> &Arc<Validator> {
        &self.validator
    }

    /// Top-level data keys, in catalog order
    pub fn shape_keys(&self) -> Vec<&str> {
        self.validator.keys()
    }

    /// Every reachable section id and its validator
    pub fn by_id(&self) -> &ById {
        &self.by_id
    }

    pub fn section(&self, id: &str) -> Option<&Arc<Validator>> {
        self.by_id.get(id)
    }

    /// Validate the parsed content of a whole family
    pub fn validate(&self, content: &Value) -> Validation {
        self.validator.validate(content)
    }

    /// Validate one section's content directly. `None` when the id is not
    /// addressable for this document type.
    pub fn validate_section(&self, id: &str, content: &Value) -> Option<Validation> {
        self.by_id.get(id).map(|v| v.validate(content))
    }
}

/// Compose a family for a document type.
///
/// Fails before any content is examined if a section lacks a factory, leaves
/// applicability unspecified, or two sections collide on a data key.
pub fn compose_family_schema(
    family: &SchemaCatalogFamily,
    document_type: DocumentType,
    registry: &FactoryRegistry,
) -> Result<FamilySchema> {
    let mut ctx = BuildContext::new(family, document_type, registry);

    let top_level: Vec<&SchemaCatalogSection> = family.top_level_sections().collect();
    let fields = ctx.compose_sections(&top_level)?;
    let validator = Arc::new(record(fields));
    let by_id = ctx.into_by_id();

    tracing::debug!(
        family = family.id,
        document_type = %document_type,
        keys = validator.keys().len(),
        sections = by_id.len(),
        "composed family schema"
    );

    Ok(FamilySchema {
        family_id: family.id,
        document_type,
        validator,
        by_id,
    })
}

pub fn get_plan_schema(family: &SchemaCatalogFamily, registry: &FactoryRegistry) -> Result<FamilySchema> {
    compose_family_schema(family, DocumentType::Plan, registry)
}

pub fn get_task_schema(family: &SchemaCatalogFamily, registry: &FactoryRegistry) -> Result<FamilySchema> {
    compose_family_schema(family, DocumentType::Task, registry)
}

/// Composer bound to a catalog and registry, addressed by family id
#[derive(Clone, Copy)]
pub struct SchemaComposer<'a> {
    catalog: &'a Catalog,
    registry: &'a FactoryRegistry,
}

impl<'a> SchemaComposer<'a> {
    pub fn new(catalog: &'a Catalog, registry: &'a FactoryRegistry) -> Self {
        Self { catalog, registry }
    }

    pub fn compose(&self, family_id: u32, document_type: DocumentType) -> Result<FamilySchema> {
        let family = self.catalog.family(family_id)?;
        compose_family_schema(family, document_type, self.registry)
    }

    pub fn plan_schema(&self, family_id: u32) -> Result<FamilySchema> {
        self.compose(family_id, DocumentType::Plan)
    }

    pub fn task_schema(&self, family_id: u32) -> Result<FamilySchema> {
        self.compose(family_id, DocumentType::Task)
    }

    /// Every family that applies to the document type, in id order
    pub fn compose_all(&self, document_type: DocumentType) -> Result<Vec<FamilySchema>> {
        self.catalog
            .families_for(document_type)
            .map(|family| compose_family_schema(family, document_type, self.registry))
            .collect()
    }
}
