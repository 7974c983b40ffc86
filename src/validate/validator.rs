//! Compiled validators
//!
//! A [`Validator`] is an immutable contract over untyped JSON content. It is
//! shared through `Arc` so the same compiled value can sit both inside its
//! parent's shape and in a family's byId index.

use serde_json::Value;
use std::sync::Arc;

use super::diagram::{self, DiagramKind};
use super::issue::{Issue, PathSegment};
use super::primitives;

/// Validated data or the full list of issues found
pub type Validation = std::result::Result<Value, Vec<Issue>>;

/// A named entry of a structured record
#[derive(Debug, Clone)]
pub struct Field {
    pub key: String,
    pub validator: Arc<Validator>,
}

impl Field {
    pub fn new(key: impl Into<String>, validator: impl Into<Arc<Validator>>) -> Self {
        Self {
            key: key.into(),
            validator: validator.into(),
        }
    }

    /// Field that may be absent
    pub fn optional(key: impl Into<String>, validator: impl Into<Arc<Validator>>) -> Self {
        Self::new(key, Validator::optional(validator.into()))
    }

    pub fn is_optional(&self) -> bool {
        self.validator.is_optional()
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Kind {
    NonEmptyString,
    OneOf(&'static [&'static str]),
    List(Arc<Validator>),
    Record(Vec<Field>),
    AnyObject,
    DiagramOrText(&'static [DiagramKind]),
    Optional(Arc<Validator>),
}

/// Opaque, reusable content contract
#[derive(Debug, Clone)]
pub struct Validator {
    kind: Kind,
}

impl Validator {
    pub(crate) fn from_kind(kind: Kind) -> Self {
        Self { kind }
    }

    pub(crate) fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Permit absence when used as a record field
    pub fn optional(inner: Arc<Validator>) -> Self {
        if inner.is_optional() {
            return (*inner).clone();
        }
        Self::from_kind(Kind::Optional(inner))
    }

    pub fn is_optional(&self) -> bool {
        matches!(self.kind, Kind::Optional(_))
    }

    /// Declared keys, in order, when this is a structured record
    pub fn keys(&self) -> Vec<&str> {
        match &self.kind {
            Kind::Record(fields) => fields.iter().map(|f| f.key.as_str()).collect(),
            Kind::Optional(inner) => inner.keys(),
            _ => Vec::new(),
        }
    }

    /// Validate content, collecting every issue in one pass
    pub fn validate(&self, value: &Value) -> Validation {
        let mut issues = Vec::new();
        let mut path = Vec::new();
        match self.check(value, &mut path, &mut issues) {
            Some(data) if issues.is_empty() => Ok(data),
            _ => Err(issues),
        }
    }

    pub fn is_valid(&self, value: &Value) -> bool {
        self.validate(value).is_ok()
    }

    /// Check `value` at `path`, pushing issues. Returns the (possibly
    /// transformed) data when this node passed.
    pub(crate) fn check(
        &self,
        value: &Value,
        path: &mut Vec<PathSegment>,
        issues: &mut Vec<Issue>,
    ) -> Option<Value> {
        match &self.kind {
            Kind::NonEmptyString => primitives::check_non_empty_string(value, path, issues),
            Kind::OneOf(candidates) => primitives::check_one_of(candidates, value, path, issues),
            Kind::List(item) => primitives::check_list(item, value, path, issues),
            Kind::Record(fields) => primitives::check_record(fields, value, path, issues),
            Kind::AnyObject => primitives::check_any_object(value, path, issues),
            Kind::DiagramOrText(allowed) => diagram::check_diagram_or_text(allowed, value, path, issues),
            Kind::Optional(inner) => inner.check(value, path, issues),
        }
    }
}
