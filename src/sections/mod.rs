//! Section Schema Factory Registry
//!
//! Each family declares a static table from section id to factory. A factory
//! produces the compiled validator for its section and document type and
//! registers it (and, for composites, every descendant) in the build
//! context's byId index before returning.
//!
//! ```text
//! FactoryRegistry
//! ├── 1 business   (Business & Scope)
//! ├── 2 planning   (Planning & Decomposition)
//! ├── 3 quality    (Quality & Risk)
//! └── 4 design     (High-Level Design)
//! ```

pub mod business;
pub mod context;
pub mod design;
pub mod planning;
pub mod quality;

pub use context::{BuildContext, ById};

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::applicability;
use crate::catalog::{Applicability, Catalog, DocumentType};
use crate::error::{Result, SchemaError};
use crate::validate::primitives::{any_object, record};
use crate::validate::Validator;

/// Produces a section's validator and registers it under the section id
pub type SectionFactory = fn(&mut BuildContext<'_>, &str) -> Result<Arc<Validator>>;

/// Factories for one family
#[derive(Clone)]
pub struct FamilyFactories {
    family: u32,
    factories: BTreeMap<&'static str, SectionFactory>,
}

impl FamilyFactories {
    pub fn new(family: u32, table: &[(&'static str, SectionFactory)]) -> Self {
        Self {
            family,
            factories: table.iter().copied().collect(),
        }
    }

    pub fn family(&self) -> u32 {
        self.family
    }

    pub fn get(&self, id: &str) -> Option<SectionFactory> {
        self.factories.get(id).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }
}

/// All family factory tables
#[derive(Clone, Default)]
pub struct FactoryRegistry {
    families: BTreeMap<u32, FamilyFactories>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry covering the embedded catalog
    pub fn builtin() -> Self {
        Self::new()
            .with(business::factories())
            .with(planning::factories())
            .with(quality::factories())
            .with(design::factories())
    }

    pub fn with(mut self, factories: FamilyFactories) -> Self {
        self.families.insert(factories.family, factories);
        self
    }

    pub fn family(&self, id: u32) -> Option<&FamilyFactories> {
        self.families.get(&id)
    }

    pub fn factory(&self, family: u32, section_id: &str) -> Option<SectionFactory> {
        self.families.get(&family).and_then(|f| f.get(section_id))
    }

    /// Check every catalog section up front: applicability must be declared
    /// for both document types, and any section that applies to at least one
    /// of them must have a factory.
    pub fn verify(&self, catalog: &Catalog) -> Result<()> {
        for family in catalog.families() {
            for section in family.sections.iter().filter(|s| !s.is_placeholder()) {
                let mut applies = false;
                for document_type in DocumentType::ALL {
                    if applicability::resolve(section, document_type)? != Applicability::Omitted {
                        applies = true;
                    }
                }

                if applies && self.factory(family.id, &section.id).is_none() {
                    return Err(SchemaError::MissingFactory {
                        id: section.id.clone(),
                        name: section.name.clone(),
                    });
                }
            }

            if let Some(factories) = self.family(family.id) {
                for id in factories.ids().filter(|id| family.section(id).is_none()) {
                    tracing::warn!(family = family.id, id, "factory has no catalog section");
                }
            }
        }

        Ok(())
    }
}

// =============================================================================
// Shared factories
// =============================================================================

/// Strict record over the section's applicable children
pub(crate) fn composite(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    let fields = ctx.compose_children(id)?;
    Ok(ctx.register(id, record(fields)))
}

/// Free-form object; children are registered for direct validation only
pub(crate) fn container(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    ctx.register_children(id)?;
    Ok(ctx.register(id, any_object()))
}
