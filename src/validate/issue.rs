//! Validation issues
//!
//! Every content violation is reported as data: a code, the path from the
//! validated root to the offending value, and a human-readable message.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One step in an issue path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// Category of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Value has the wrong JSON type
    InvalidType,
    /// Empty string or empty list
    TooSmall,
    /// String outside a closed set
    InvalidEnumValue,
    /// Object carries keys the shape does not declare
    UnrecognizedKeys,
    /// Required key is absent
    Required,
    /// Diagram text fails the grammar check
    InvalidDiagram,
    /// Neither diagram nor text supplied
    MissingContent,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidType => "invalid_type",
            Self::TooSmall => "too_small",
            Self::InvalidEnumValue => "invalid_enum_value",
            Self::UnrecognizedKeys => "unrecognized_keys",
            Self::Required => "required",
            Self::InvalidDiagram => "invalid_diagram",
            Self::MissingContent => "missing_content",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path-qualified validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub code: IssueCode,
    pub path: Vec<PathSegment>,
    pub message: String,
}

impl Issue {
    pub fn new(code: IssueCode, path: &[PathSegment], message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.to_vec(),
            message: message.into(),
        }
    }

    /// Dotted rendering of the path (`userStories[0].title`)
    pub fn path_string(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                PathSegment::Index(i) => out.push_str(&format!("[{}]", i)),
            }
        }
        out
    }

    /// Whether the path is exactly the given sequence of keys
    pub fn is_at(&self, keys: &[&str]) -> bool {
        self.path.len() == keys.len()
            && self
                .path
                .iter()
                .zip(keys)
                .all(|(segment, key)| matches!(segment, PathSegment::Key(k) if k == key))
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path_string(), self.message)
        }
    }
}

/// JSON type name used in type-mismatch messages
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
