//! Content validation
//!
//! Compiled validators, the primitives they are built from, and the diagram
//! grammar. Validation never fails with an error type: callers always get the
//! validated data or the list of issues.

pub mod diagram;
pub mod enums;
pub mod issue;
pub mod primitives;
pub mod validator;

pub use diagram::{parse_diagram, DiagramContent, DiagramKind, Direction, MermaidDiagram};
pub use enums::{ClosedSet, DependencyStatus, DependencyType, Priority};
pub use issue::{Issue, IssueCode, PathSegment};
pub use validator::{Field, Validation, Validator};
