//! JSON Schema export
//!
//! Renders compiled validators as draft-07 JSON Schema so that editors and
//! non-Rust tooling can check section content. The diagram grammar is
//! approximated with a keyword pattern; the flow-graph transform has no
//! schema counterpart.

use serde_json::{json, Map, Value};

use crate::compose::FamilySchema;
use crate::validate::validator::{Field, Kind};
use crate::validate::{DiagramKind, Validator};

const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

impl Validator {
    /// Schema for this validator alone
    pub fn to_json_schema(&self) -> Value {
        match self.kind() {
            Kind::NonEmptyString => json!({ "type": "string", "minLength": 1 }),
            Kind::OneOf(candidates) => json!({ "type": "string", "enum": candidates }),
            Kind::List(item) => json!({
                "type": "array",
                "minItems": 1,
                "items": item.to_json_schema()
            }),
            Kind::Record(fields) => record_schema(fields),
            Kind::AnyObject => json!({ "type": "object" }),
            Kind::DiagramOrText(allowed) => diagram_or_text_schema(allowed),
            Kind::Optional(inner) => inner.to_json_schema(),
        }
    }
}

impl FamilySchema {
    /// Standalone schema document for the whole family
    pub fn to_json_schema(&self) -> Value {
        let mut schema = self.validator().to_json_schema();
        if let Value::Object(map) = &mut schema {
            map.insert("$schema".to_string(), json!(DRAFT_07));
            map.insert(
                "title".to_string(),
                json!(format!("family {} ({})", self.family_id(), self.document_type())),
            );
        }
        schema
    }
}

fn record_schema(fields: &[Field]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for field in fields {
        properties.insert(field.key.clone(), field.validator.to_json_schema());
        if !field.is_optional() {
            required.push(json!(field.key));
        }
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

fn diagram_or_text_schema(allowed: &[DiagramKind]) -> Value {
    let keywords = allowed
        .iter()
        .map(|k| k.keyword())
        .collect::<Vec<_>>()
        .join("|");

    json!({
        "type": "object",
        "properties": {
            "diagram": {
                "type": "string",
                "minLength": 1,
                "pattern": format!(r"^\s*({})(\s|$)", keywords)
            },
            "text": {
                "type": "array",
                "minItems": 1,
                "items": { "type": "string", "minLength": 1 }
            }
        },
        "minProperties": 1,
        "additionalProperties": false
    })
}
