//! Diagram grammar
//!
//! Sections that accept diagrams declare a closed set of Mermaid diagram
//! kinds. The first non-blank line must start with one of those keywords.
//! Flow graphs (`graph`) are restructured into a [`MermaidDiagram`] record with
//! the direction token split out; every other kind passes through as raw text.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

use super::issue::{Issue, IssueCode, PathSegment};
use super::primitives::{check_non_empty_string, reject_unknown_keys, text_list, type_issue};

// =============================================================================
// Kinds and directions
// =============================================================================

/// Mermaid diagram kinds a section may allow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagramKind {
    #[serde(rename = "graph")]
    Graph,
    #[serde(rename = "erDiagram")]
    ErDiagram,
    #[serde(rename = "classDiagram")]
    ClassDiagram,
    #[serde(rename = "sequenceDiagram")]
    SequenceDiagram,
}

impl DiagramKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            DiagramKind::Graph => "graph",
            DiagramKind::ErDiagram => "erDiagram",
            DiagramKind::ClassDiagram => "classDiagram",
            DiagramKind::SequenceDiagram => "sequenceDiagram",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "graph" => Some(DiagramKind::Graph),
            "erDiagram" => Some(DiagramKind::ErDiagram),
            "classDiagram" => Some(DiagramKind::ClassDiagram),
            "sequenceDiagram" => Some(DiagramKind::SequenceDiagram),
            _ => None,
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Flow-graph layout direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    TD,
    TB,
    BT,
    RL,
    LR,
}

impl Direction {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "TD" => Some(Direction::TD),
            "TB" => Some(Direction::TB),
            "BT" => Some(Direction::BT),
            "RL" => Some(Direction::RL),
            "LR" => Some(Direction::LR),
            _ => None,
        }
    }
}

// =============================================================================
// Parsed output
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramFormat {
    Mermaid,
}

/// Structured form of a flow-graph diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MermaidDiagram {
    #[serde(rename = "type")]
    pub format: DiagramFormat,
    pub diagram_type: DiagramKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Lines after the header line
    pub content: String,
}

/// Diagram text after the grammar check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiagramContent {
    Structured(MermaidDiagram),
    Raw(String),
}

/// Check diagram text against the allowed kinds and apply the flow-graph
/// transform. The error is the user-facing message.
pub fn parse_diagram(text: &str, allowed: &[DiagramKind]) -> std::result::Result<DiagramContent, String> {
    let expected = allowed
        .iter()
        .map(|k| k.keyword())
        .collect::<Vec<_>>()
        .join(" or ");

    let mut lines = text.lines().skip_while(|l| l.trim().is_empty());
    let Some(header) = lines.next() else {
        return Err(format!("Diagram must be a valid Mermaid {} (diagram is empty)", expected));
    };

    let mut tokens = header.split_whitespace();
    let keyword = tokens.next().unwrap_or_default();
    let kind = DiagramKind::from_keyword(keyword).filter(|k| allowed.contains(k));
    let Some(kind) = kind else {
        return Err(format!(
            "Diagram must be a valid Mermaid {} (found '{}')",
            expected, keyword
        ));
    };

    if kind != DiagramKind::Graph {
        return Ok(DiagramContent::Raw(text.to_string()));
    }

    let direction = tokens.next().and_then(Direction::from_token);
    let content = lines.collect::<Vec<_>>().join("\n").trim_end().to_string();

    Ok(DiagramContent::Structured(MermaidDiagram {
        format: DiagramFormat::Mermaid,
        diagram_type: kind,
        direction,
        content,
    }))
}

// =============================================================================
// Diagram-or-text check
// =============================================================================

const DIAGRAM_KEY: &str = "diagram";
const TEXT_KEY: &str = "text";

pub(crate) fn check_diagram_or_text(
    allowed: &[DiagramKind],
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

    if let Some(diagram) = object.get(DIAGRAM_KEY) {
        path.push(PathSegment::from(DIAGRAM_KEY));
        match check_diagram(allowed, diagram, path, issues) {
            Some(v) => {
                out.insert(DIAGRAM_KEY.to_string(), v);
            }
            None => failed = true,
        }
        path.pop();
    }

    if let Some(text) = object.get(TEXT_KEY) {
        path.push(PathSegment::from(TEXT_KEY));
        match text_list().check(text, path, issues) {
            Some(v) => {
                out.insert(TEXT_KEY.to_string(), v);
            }
            None => failed = true,
        }
        path.pop();
    }

    if !object.contains_key(DIAGRAM_KEY) && !object.contains_key(TEXT_KEY) {
        issues.push(Issue::new(
            IssueCode::MissingContent,
            path,
            "Either a diagram or text must be provided",
        ));
        failed = true;
    }

    let declared: HashSet<&str> = [DIAGRAM_KEY, TEXT_KEY].into_iter().collect();
    if reject_unknown_keys(object, &declared, path, issues) {
        failed = true;
    }

    (!failed).then_some(Value::Object(out))
}

fn check_diagram(
    allowed: &[DiagramKind],
    value: &Value,
    path: &[PathSegment],
    issues: &mut Vec<Issue>,
) -> Option<Value> {
    check_non_empty_string(value, path, issues)?;
    let text = value.as_str().unwrap_or_default();

    match parse_diagram(text, allowed) {
        Ok(DiagramContent::Raw(raw)) => Some(Value::String(raw)),
        Ok(DiagramContent::Structured(diagram)) => serde_json::to_value(diagram).ok(),
        Err(message) => {
            issues.push(Issue::new(IssueCode::InvalidDiagram, path, message));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::primitives::diagram_or_text;
    use serde_json::json;

    const GRAPH: &[DiagramKind] = &[DiagramKind::Graph];
    const ER: &[DiagramKind] = &[DiagramKind::ErDiagram];

    #[test]
    fn test_graph_is_structured() {
        let parsed = parse_diagram("graph TD\nA --> B\nB --> C", GRAPH).unwrap();
        assert_eq!(
            serde_json::to_value(parsed).unwrap(),
            json!({
                "type": "mermaid",
                "diagramType": "graph",
                "direction": "TD",
                "content": "A --> B\nB --> C"
            })
        );

        let parsed = parse_diagram("graph LR\nA --> B\nB --> C", GRAPH).unwrap();
        match parsed {
            DiagramContent::Structured(d) => {
                assert_eq!(d.direction, Some(Direction::LR));
                assert_eq!(d.content, "A --> B\nB --> C");
            }
            other => panic!("Expected structured diagram, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_or_absent_direction_is_dropped() {
        for text in ["graph\nA --> B", "graph XY\nA --> B"] {
            let value = serde_json::to_value(parse_diagram(text, GRAPH).unwrap()).unwrap();
            assert!(value.get("direction").is_none());
            assert_eq!(value["content"], "A --> B");
        }
    }

    #[test]
    fn test_leading_blank_lines_skipped() {
        let parsed = parse_diagram("\n   \ngraph TB\nA-->B\n", GRAPH).unwrap();
        assert!(matches!(parsed, DiagramContent::Structured(ref d) if d.direction == Some(Direction::TB)));
    }

    #[test]
    fn test_other_kinds_pass_through() {
        let text = "erDiagram\nUSER ||--o{ ORDER : places";
        assert_eq!(parse_diagram(text, ER).unwrap(), DiagramContent::Raw(text.to_string()));
    }

    #[test]
    fn test_wrong_kind_fails() {
        let err = parse_diagram("erDiagram\nA ||--o{ B : has", GRAPH).unwrap_err();
        assert!(err.contains("Diagram must be a valid Mermaid graph"));

        let err = parse_diagram("graph TD\nA-->B", ER).unwrap_err();
        assert!(err.contains("Diagram must be a valid Mermaid erDiagram"));

        // keyword must match exactly
        assert!(parse_diagram("flowchart TD\nA-->B", GRAPH).is_err());
        assert!(parse_diagram("Graph TD\nA-->B", GRAPH).is_err());
    }

    #[test]
    fn test_diagram_or_text_requires_one() {
        let v = diagram_or_text(GRAPH);
        assert!(v.is_valid(&json!({ "text": ["prose"] })));
        assert!(v.is_valid(&json!({ "diagram": "graph TD\nA-->B" })));
        assert!(v.is_valid(&json!({ "diagram": "graph TD\nA-->B", "text": ["prose"] })));

        let issues = v.validate(&json!({})).unwrap_err();
        assert_eq!(issues[0].code, IssueCode::MissingContent);
    }

    #[test]
    fn test_diagram_or_text_is_strict() {
        let v = diagram_or_text(GRAPH);
        let issues = v.validate(&json!({ "text": ["prose"], "caption": "x" })).unwrap_err();
        assert_eq!(issues[0].code, IssueCode::UnrecognizedKeys);
    }

    #[test]
    fn test_diagram_issue_path_and_transform() {
        let v = diagram_or_text(ER);
        let issues = v.validate(&json!({ "diagram": "graph TD\nA-->B" })).unwrap_err();
        assert!(issues[0].is_at(&["diagram"]));
        assert_eq!(issues[0].code, IssueCode::InvalidDiagram);

        let out = diagram_or_text(GRAPH)
            .validate(&json!({ "diagram": "graph LR\nA-->B" }))
            .unwrap();
        assert_eq!(out["diagram"]["direction"], "LR");
        assert_eq!(out["diagram"]["content"], "A-->B");
    }

    #[test]
    fn test_empty_text_list_rejected() {
        let v = diagram_or_text(GRAPH);
        let issues = v.validate(&json!({ "text": [] })).unwrap_err();
        assert!(issues[0].is_at(&["text"]));
    }
}
