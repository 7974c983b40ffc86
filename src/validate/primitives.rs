//! Content-shape primitives
//!
//! The building blocks section factories compose: non-empty strings,
//! non-empty lists, structured records, closed enumerations, free-form
//! objects and diagram-or-text content.
//!
//! Records and lists keep going after a failing child so that one pass
//! reports every issue for the object being checked.

use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::Arc;

use super::diagram::DiagramKind;
use super::enums::ClosedSet;
use super::issue::{type_name, Issue, IssueCode, PathSegment};
use super::validator::{Field, Kind, Validator};

// =============================================================================
// Constructors
// =============================================================================

/// Any string with at least one character. Whitespace-only strings pass.
pub fn non_empty_string() -> Validator {
    Validator::from_kind(Kind::NonEmptyString)
}

/// A string restricted to a fixed set of candidates
pub fn one_of(candidates: &'static [&'static str]) -> Validator {
    Validator::from_kind(Kind::OneOf(candidates))
}

/// A string restricted to the values of a closed enumeration
pub fn enum_field<E: ClosedSet>() -> Validator {
    one_of(E::VALUES)
}

/// An array with at least one element, each checked against `item`
pub fn non_empty_list(item: impl Into<Arc<Validator>>) -> Validator {
    Validator::from_kind(Kind::List(item.into()))
}

/// A non-empty list of non-empty strings (paragraphs, bullet items)
pub fn text_list() -> Validator {
    non_empty_list(non_empty_string())
}

/// An object with exactly the given fields; unknown keys are rejected
pub fn record(fields: Vec<Field>) -> Validator {
    Validator::from_kind(Kind::Record(fields))
}

/// A non-empty list of records (table-like content)
pub fn table(columns: Vec<Field>) -> Validator {
    non_empty_list(record(columns))
}

/// Any non-null, non-array object (free-form container content)
pub fn any_object() -> Validator {
    Validator::from_kind(Kind::AnyObject)
}

/// `{ diagram?, text? }` with at least one present; diagrams must use one of
/// the allowed kinds
pub fn diagram_or_text(allowed: &'static [DiagramKind]) -> Validator {
    Validator::from_kind(Kind::DiagramOrText(allowed))
}

// =============================================================================
// Checks
// =============================================================================

pub(crate) fn check_non_empty_string(
    value: &Value,
    path: &[PathSegment],
    issues: &mut Vec<Issue>,
) -> Option<Value> {
    let s = expect_string(value, path, issues)?;
    if s.is_empty() {
        issues.push(Issue::new(
            IssueCode::TooSmall,
            path,
            "String must contain at least 1 character(s)",
        ));
        return None;
    }
    Some(value.clone())
}

pub(crate) fn check_one_of(
    candidates: &[&str],
    value: &Value,
    path: &[PathSegment],
    issues: &mut Vec<Issue>,
) -> Option<Value> {
    let s = expect_string(value, path, issues)?;
    if candidates.contains(&s) {
        return Some(value.clone());
    }

    let expected = candidates
        .iter()
        .map(|c| format!("'{}'", c))
        .collect::<Vec<_>>()
        .join(" | ");
    issues.push(Issue::new(
        IssueCode::InvalidEnumValue,
        path,
        format!("Invalid enum value. Expected {}, received '{}'", expected, s),
    ));
    None
}

pub(crate) fn check_list(
    item: &Validator,
    value: &Value,
    path: &mut Vec<PathSegment>,
    issues: &mut Vec<Issue>,
) -> Option<Value> {
    let Some(elements) = value.as_array() else {
        issues.push(type_issue("array", value, path));
        return None;
    };
    if elements.is_empty() {
        issues.push(Issue::new(
            IssueCode::TooSmall,
            path,
            "Array must contain at least 1 element(s)",
        ));
        return None;
    }

    let mut out = Vec::with_capacity(elements.len());
    let mut failed = false;
    for (i, element) in elements.iter().enumerate() {
        path.push(PathSegment::Index(i));
        match item.check(element, path, issues) {
            Some(v) => out.push(v),
            None => failed = true,
        }
        path.pop();
    }

    (!failed).then_some(Value::Array(out))
}

pub(crate) fn check_record(
    fields: &[Field],
    value: &Value,
    path: &mut Vec<PathSegment>,
    issues: &mut Vec<Issue>,
) -> Option<Value> {
    let Some(object) = value.as_object() else {
        issues.push(type_issue("object", value, path));
        return None;
    };

    let mut out = Map::new();
    let mut failed = false;

    for field in fields {
        match object.get(&field.key) {
            None if field.is_optional() => {}
            None => {
                path.push(PathSegment::Key(field.key.clone()));
                issues.push(Issue::new(IssueCode::Required, path, "Required"));
                path.pop();
                failed = true;
            }
            Some(child) => {
                path.push(PathSegment::Key(field.key.clone()));
                match field.validator.check(child, path, issues) {
                    Some(v) => {
                        out.insert(field.key.clone(), v);
                    }
                    None => failed = true,
                }
                path.pop();
            }
        }
    }

    let declared: HashSet<&str> = fields.iter().map(|f| f.key.as_str()).collect();
    if reject_unknown_keys(object, &declared, path, issues) {
        failed = true;
    }

    (!failed).then_some(Value::Object(out))
}

pub(crate) fn check_any_object(
    value: &Value,
    path: &[PathSegment],
    issues: &mut Vec<Issue>,
) -> Option<Value> {
    if value.is_object() {
        Some(value.clone())
    } else {
        issues.push(type_issue("object", value, path));
        None
    }
}

/// Push one issue naming every undeclared key. Returns whether any were found.
pub(crate) fn reject_unknown_keys(
    object: &Map<String, Value>,
    declared: &HashSet<&str>,
    path: &[PathSegment],
    issues: &mut Vec<Issue>,
) -> bool {
    let unknown: Vec<String> = object
        .keys()
        .filter(|k| !declared.contains(k.as_str()))
        .map(|k| format!("'{}'", k))
        .collect();
    if unknown.is_empty() {
        return false;
    }

    issues.push(Issue::new(
        IssueCode::UnrecognizedKeys,
        path,
        format!("Unrecognized key(s) in object: {}", unknown.join(", ")),
    ));
    true
}

pub(crate) fn expect_string<'v>(
    value: &'v Value,
    path: &[PathSegment],
    issues: &mut Vec<Issue>,
) -> Option<&'v str> {
    let s = value.as_str();
    if s.is_none() {
        issues.push(type_issue("string", value, path));
    }
    s
}

pub(crate) fn type_issue(expected: &str, value: &Value, path: &[PathSegment]) -> Issue {
    Issue::new(
        IssueCode::InvalidType,
        path,
        format!("Expected {}, received {}", expected, type_name(value)),
    )
}
