//! Catalog data model
//!
//! Mirrors the on-disk family JSON files. A family lists its sections flat, in
//! document order; nesting is carried by the dotted section id (`4.2.5.1` is a
//! child of `4.2.5`, which is a child of `4.2`, a top-level section of family 4).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Kind of document a schema is composed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Broad, strategic document
    Plan,
    /// Narrow, execution-level document
    Task,
}

impl DocumentType {
    pub const ALL: [DocumentType; 2] = [DocumentType::Plan, DocumentType::Task];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Plan => "plan",
            DocumentType::Task => "task",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plan" => Ok(DocumentType::Plan),
            "task" => Ok(DocumentType::Task),
            other => Err(format!("unknown document type '{}' (expected plan or task)", other)),
        }
    }
}

/// Whether a section appears in a document type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Applicability {
    Required,
    Optional,
    Omitted,
}

/// Applicability declared per document type.
///
/// Both entries are optional at the serde level so that an incomplete catalog
/// still loads; resolution reports the gap (see [`crate::applicability`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicabilityMap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Applicability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<Applicability>,
}

impl ApplicabilityMap {
    pub fn new(plan: Applicability, task: Applicability) -> Self {
        Self {
            plan: Some(plan),
            task: Some(task),
        }
    }

    pub fn get(&self, document_type: DocumentType) -> Option<Applicability> {
        match document_type {
            DocumentType::Plan => self.plan,
            DocumentType::Task => self.task,
        }
    }
}

/// Content format hint carried by the catalog (documentation only; the
/// registered factory decides the actual shape)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    Text,
    List,
    Table,
    Composite,
    Container,
    Diagram,
}

/// A named sub-field of a table-like or composite section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionField {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
}

/// A worked example of section content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionExample {
    /// Restricts the example to one document type; applies to both when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<DocumentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: Value,
}

/// One addressable section of a family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaCatalogSection {
    /// Dotted hierarchical id (e.g. "4.2.5.1")
    pub id: String,
    /// Display name; the camel-cased form becomes the data key
    pub name: String,
    /// Markdown heading depth
    pub level: u8,
    pub applicability: ApplicabilityMap,
    pub format: ContentFormat,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<SectionField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<SectionExample>,
}

impl SchemaCatalogSection {
    /// Id of the enclosing section, or of the family for top-level sections
    pub fn parent_id(&self) -> Option<&str> {
        self.id.rsplit_once('.').map(|(parent, _)| parent)
    }

    /// Template-name markers (`{{name}}`) that stand in for real sections
    pub fn is_placeholder(&self) -> bool {
        let name = self.name.trim();
        name.starts_with("{{") && name.ends_with("}}")
    }

    /// Examples that apply to the given document type
    pub fn examples_for(&self, document_type: DocumentType) -> impl Iterator<Item = &SectionExample> {
        self.examples
            .iter()
            .filter(move |e| e.document_type.map_or(true, |d| d == document_type))
    }
}

/// A numbered group of related sections (e.g. "Business & Scope")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaCatalogFamily {
    pub id: u32,
    pub name: String,
    pub anchor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub applicability: ApplicabilityMap,
    pub sections: Vec<SchemaCatalogSection>,
}

impl SchemaCatalogFamily {
    /// Look up a section by dotted id
    pub fn section(&self, id: &str) -> Option<&SchemaCatalogSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Direct children of `parent_id`, in catalog order
    pub fn children_of<'a>(&'a self, parent_id: &'a str) -> impl Iterator<Item = &'a SchemaCatalogSection> {
        self.sections
            .iter()
            .filter(move |s| s.parent_id() == Some(parent_id))
    }

    /// Sections directly under the family, in catalog order
    pub fn top_level_sections(&self) -> impl Iterator<Item = &SchemaCatalogSection> {
        let family_id = self.id.to_string();
        self.sections
            .iter()
            .filter(move |s| s.parent_id() == Some(family_id.as_str()))
    }

    /// Whether the family as a whole appears in a document type. An unset
    /// family-level value does not exclude the family.
    pub fn applies_to(&self, document_type: DocumentType) -> bool {
        self.applicability.get(document_type) != Some(Applicability::Omitted)
    }
}
