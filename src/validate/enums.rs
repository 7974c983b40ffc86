//! Closed enumerations used by section content
//!
//! Each enum lists its wire values once in `VALUES`; the untyped validator
//! boundary checks strings against that list (see
//! [`crate::validate::primitives::enum_field`]).

use serde::{Deserialize, Serialize};

/// A fixed set of accepted string values
pub trait ClosedSet {
    const VALUES: &'static [&'static str];
}

/// Priority of a story, work item or risk dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl ClosedSet for Priority {
    const VALUES: &'static [&'static str] = &["High", "Medium", "Low"];
}

/// Whether a dependency is owned inside or outside the team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyType {
    Internal,
    External,
}

impl ClosedSet for DependencyType {
    const VALUES: &'static [&'static str] = &["Internal", "External"];
}

/// Progress of a dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Blocked,
    Complete,
}

impl ClosedSet for DependencyStatus {
    const VALUES: &'static [&'static str] = &["Pending", "In Progress", "Blocked", "Complete"];
}
