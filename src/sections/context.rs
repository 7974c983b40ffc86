//! Build context threaded through section factories
//!
//! Owns the byId accumulator for one composition call. Factories register
//! their own validator here, and composite factories build their children
//! through [`BuildContext::compose_children`] so that every reachable id ends
//! up addressable.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use super::FactoryRegistry;
use crate::applicability;
use crate::catalog::{Applicability, DocumentType, SchemaCatalogFamily, SchemaCatalogSection};
use crate::error::{Result, SchemaError};
use crate::naming::to_camel_case;
use crate::validate::{Field, Validator};

/// Flat index from dotted section id to compiled validator
pub type ById = BTreeMap<String, Arc<Validator>>;

pub struct BuildContext<'a> {
    family: &'a SchemaCatalogFamily,
    document_type: DocumentType,
    registry: &'a FactoryRegistry,
    by_id: ById,
}

impl<'a> BuildContext<'a> {
    pub(crate) fn new(
        family: &'a SchemaCatalogFamily,
        document_type: DocumentType,
        registry: &'a FactoryRegistry,
    ) -> Self {
        Self {
            family,
            document_type,
            registry,
            by_id: ById::new(),
        }
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// Record a section's validator under its id and hand back the shared copy
    pub fn register(&mut self, id: &str, validator: Validator) -> Arc<Validator> {
        let validator = Arc::new(validator);
        self.by_id.insert(id.to_string(), Arc::clone(&validator));
        validator
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Build the applicable children of `parent_id` as record fields
    pub fn compose_children(&mut self, parent_id: &str) -> Result<Vec<Field>> {
        let family = self.family;
        let children: Vec<&SchemaCatalogSection> = family.children_of(parent_id).collect();
        self.compose_sections(&children)
    }

    /// Register the applicable children of `parent_id` without using them in
    /// a shape (free-form containers)
    pub fn register_children(&mut self, parent_id: &str) -> Result<()> {
        self.compose_children(parent_id).map(|_| ())
    }

    /// Build each section in order, rejecting colliding keys
    pub(crate) fn compose_sections(&mut self, sections: &[&SchemaCatalogSection]) -> Result<Vec<Field>> {
        let mut fields = Vec::with_capacity(sections.len());
        let mut keys = HashSet::with_capacity(sections.len());

        for section in sections {
            let Some(field) = self.build_section(section)? else { continue };
            if !keys.insert(field.key.clone()) {
                return Err(SchemaError::DuplicateShapeKey {
                    family: self.family.id,
                    key: field.key,
                    id: section.id.clone(),
                });
            }
            fields.push(field);
        }

        Ok(fields)
    }

    /// Resolve applicability, run the factory and derive the shape key.
    /// Returns `None` for placeholders and omitted sections.
    fn build_section(&mut self, section: &SchemaCatalogSection) -> Result<Option<Field>> {
        if section.is_placeholder() {
            tracing::trace!(id = %section.id, "skipping placeholder section");
            return Ok(None);
        }

        let applicability = applicability::resolve(section, self.document_type)?;
        if applicability == Applicability::Omitted {
            tracing::trace!(
                id = %section.id,
                document_type = %self.document_type,
                "section omitted"
            );
            return Ok(None);
        }

        let factory = self
            .registry
            .factory(self.family.id, &section.id)
            .ok_or_else(|| SchemaError::MissingFactory {
                id: section.id.clone(),
                name: section.name.clone(),
            })?;

        let validator = factory(self, &section.id)?;
        if !self.is_registered(&section.id) {
            return Err(SchemaError::UnregisteredSection {
                id: section.id.clone(),
            });
        }
        self.check_children_registered(section)?;

        let key = to_camel_case(&section.name);
        Ok(Some(match applicability {
            Applicability::Optional => Field::optional(key, validator),
            _ => Field::new(key, validator),
        }))
    }

    /// Every applicable child of a built section must have been registered
    /// by its factory, whatever shape that factory produced.
    fn check_children_registered(&self, section: &SchemaCatalogSection) -> Result<()> {
        let family = self.family;
        for child in family.children_of(&section.id).filter(|c| !c.is_placeholder()) {
            if applicability::resolve(child, self.document_type)? == Applicability::Omitted
                || self.is_registered(&child.id)
            {
                continue;
            }

            if self.registry.factory(family.id, &child.id).is_none() {
                return Err(SchemaError::MissingFactory {
                    id: child.id.clone(),
                    name: child.name.clone(),
                });
            }
            return Err(SchemaError::UnregisteredSection {
                id: child.id.clone(),
            });
        }

        Ok(())
    }

    pub(crate) fn into_by_id(self) -> ById {
        self.by_id
    }
}
