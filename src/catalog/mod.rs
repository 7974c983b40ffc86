//! Schema Catalog
//!
//! The catalog is built once (from the embedded files or a directory) and is
//! read-only afterwards. Composition borrows it; nothing mutates it.

pub mod loader;
pub mod model;

pub use loader::{load_embedded, load_from_directory, parse_family_file};
pub use model::{
    Applicability, ApplicabilityMap, ContentFormat, DocumentType, SchemaCatalogFamily,
    SchemaCatalogSection, SectionExample, SectionField,
};

use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};

use crate::error::{Result, SchemaError};

/// Immutable set of families, keyed by family id
#[derive(Debug, Clone)]
pub struct Catalog {
    families: BTreeMap<u32, SchemaCatalogFamily>,
    fingerprint: String,
}

impl Catalog {
    /// Build a catalog after checking the structure of every family
    pub fn from_families(families: Vec<SchemaCatalogFamily>) -> Result<Self> {
        let mut by_id = BTreeMap::new();
        for family in families {
            check_structure(&family)?;
            let id = family.id;
            if by_id.insert(id, family).is_some() {
                return Err(SchemaError::DuplicateFamily(id));
            }
        }

        let mut hasher = Sha256::new();
        for family in by_id.values() {
            hasher.update(serde_json::to_vec(family)?);
        }
        let fingerprint = format!("{:x}", hasher.finalize());

        Ok(Self {
            families: by_id,
            fingerprint,
        })
    }

    /// The catalog compiled into the crate
    pub fn embedded() -> Result<Self> {
        load_embedded()
    }

    pub fn family(&self, id: u32) -> Result<&SchemaCatalogFamily> {
        self.families.get(&id).ok_or(SchemaError::UnknownFamily(id))
    }

    /// All families in id order
    pub fn families(&self) -> impl Iterator<Item = &SchemaCatalogFamily> {
        self.families.values()
    }

    /// Families that are not omitted for the document type
    pub fn families_for(&self, document_type: DocumentType) -> impl Iterator<Item = &SchemaCatalogFamily> {
        self.families
            .values()
            .filter(move |f| f.applies_to(document_type))
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// SHA-256 over the canonical JSON of every family, in id order
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn check_structure(family: &SchemaCatalogFamily) -> Result<()> {
    let prefix = format!("{}.", family.id);
    let family_id = family.id.to_string();
    let mut seen = HashSet::with_capacity(family.sections.len());

    for section in &family.sections {
        if !section.id.starts_with(&prefix) {
            return Err(SchemaError::ForeignSection {
                family: family.id,
                id: section.id.clone(),
            });
        }
        if !seen.insert(section.id.as_str()) {
            return Err(SchemaError::DuplicateSectionId {
                family: family.id,
                id: section.id.clone(),
            });
        }
    }

    for section in &family.sections {
        let Some(parent) = section.parent_id() else { continue };
        if parent != family_id && !seen.contains(parent) {
            return Err(SchemaError::OrphanSection {
                family: family.id,
                id: section.id.clone(),
                parent: parent.to_string(),
            });
        }
    }

    Ok(())
}
