//! Family Schema Tests
//!
//! Composes the embedded catalog for both document types and checks the
//! composed validators against catalog examples and fixture documents.

use serde_json::{json, Value};

use doc_schemas::catalog::SchemaCatalogSection;
use doc_schemas::{
    get_plan_schema, get_task_schema, Applicability, Catalog, DocumentType, FactoryRegistry, FamilySchema,
    IssueCode, SchemaComposer, SchemaError,
};

fn fixture(content: &str) -> Value {
    serde_json::from_str(content).unwrap()
}

fn catalog() -> Catalog {
    Catalog::embedded().unwrap()
}

fn compose(family: u32, document_type: DocumentType) -> FamilySchema {
    let catalog = catalog();
    let registry = FactoryRegistry::builtin();
    SchemaComposer::new(&catalog, &registry)
        .compose(family, document_type)
        .unwrap()
}

// =============================================================================
// Catalog-wide properties
// =============================================================================

#[test]
fn test_every_applicable_section_is_addressable() {
    let catalog = catalog();
    let registry = FactoryRegistry::builtin();
    let composer = SchemaComposer::new(&catalog, &registry);

    for family in catalog.families() {
        for document_type in DocumentType::ALL {
            let schema = composer.compose(family.id, document_type).unwrap();

            for section in &family.sections {
                let applicability = section.applicability.get(document_type).unwrap();
                let registered = schema.section(&section.id).is_some();
                assert_eq!(
                    registered,
                    applicability != Applicability::Omitted,
                    "section {} for {}",
                    section.id,
                    document_type
                );
            }
        }
    }
}

#[test]
fn test_catalog_examples_validate() {
    let catalog = catalog();
    let registry = FactoryRegistry::builtin();
    let composer = SchemaComposer::new(&catalog, &registry);

    for family in catalog.families() {
        for document_type in DocumentType::ALL {
            let schema = composer.compose(family.id, document_type).unwrap();

            for section in &family.sections {
                if schema.section(&section.id).is_none() {
                    continue;
                }
                assert!(!section.examples.is_empty(), "section {} has no examples", section.id);

                for example in section.examples_for(document_type) {
                    let result = schema.validate_section(&section.id, &example.content).unwrap();
                    assert!(
                        result.is_ok(),
                        "example for {} ({}) failed: {:?}",
                        section.id,
                        document_type,
                        result.unwrap_err()
                    );
                }
            }
        }
    }
}

/// An omitted section's key is rejected by the record that would hold it
#[test]
fn test_omitted_sections_are_unknown_keys() {
    let catalog = catalog();
    let registry = FactoryRegistry::builtin();
    let composer = SchemaComposer::new(&catalog, &registry);
    let mut checked = 0;

    for family in catalog.families() {
        let family_key = family.id.to_string();
        for document_type in DocumentType::ALL {
            let schema = composer.compose(family.id, document_type).unwrap();

            for section in omitted(&family.sections, document_type) {
                let key = doc_schemas::naming::to_camel_case(&section.name);
                let parent = section.parent_id().unwrap();

                let holder = if parent == family_key {
                    schema.validator().clone()
                } else {
                    match schema.section(parent) {
                        // free-form containers accept any keys
                        Some(v) if !v.keys().is_empty() => v.clone(),
                        _ => continue,
                    }
                };
                assert!(!holder.keys().contains(&key.as_str()));

                let content = json!({ key.clone(): section.examples[0].content.clone() });
                let issues = holder.validate(&content).unwrap_err();
                assert!(
                    issues
                        .iter()
                        .any(|i| i.code == IssueCode::UnrecognizedKeys && i.message.contains(&key)),
                    "{} ({}) was not rejected: {:?}",
                    section.id,
                    document_type,
                    issues
                );
                checked += 1;
            }
        }
    }

    assert!(checked > 10);
}

fn omitted(
    sections: &[SchemaCatalogSection],
    document_type: DocumentType,
) -> impl Iterator<Item = &SchemaCatalogSection> {
    sections
        .iter()
        .filter(move |s| s.applicability.get(document_type) == Some(Applicability::Omitted))
}

#[test]
fn test_composition_is_deterministic() {
    let first = compose(4, DocumentType::Plan);
    let second = compose(4, DocumentType::Plan);

    assert_eq!(first.shape_keys(), second.shape_keys());
    assert_eq!(
        first.by_id().keys().collect::<Vec<_>>(),
        second.by_id().keys().collect::<Vec<_>>()
    );
}

#[test]
fn test_shape_keys_follow_catalog_order() {
    let plan = compose(1, DocumentType::Plan);
    assert_eq!(
        plan.shape_keys(),
        vec![
            "overview",
            "businessContext",
            "userJourneys",
            "userPersonas",
            "coreBusinessRules",
            "userStories",
            "successCriteria",
            "inScope",
            "outOfScope",
            "coreBusinessProcesses",
        ]
    );

    let task = compose(1, DocumentType::Task);
    assert_eq!(
        task.shape_keys(),
        vec!["overview", "coreBusinessRules", "definitionOfDone", "inScope", "outOfScope"]
    );
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_business_plan_validates() {
    let catalog = catalog();
    let schema = get_plan_schema(catalog.family(1).unwrap(), &FactoryRegistry::builtin()).unwrap();

    let data = schema
        .validate(&fixture(include_str!("fixtures/business_plan.json")))
        .unwrap();

    assert_eq!(
        data["coreBusinessProcesses"]["diagram"],
        json!({
            "type": "mermaid",
            "diagramType": "graph",
            "direction": "TD",
            "content": "Issue --> Close\nClose --> Archive"
        })
    );
    // container content passes through untouched
    assert_eq!(data["overview"]["goals"][0], "Reduce month-end archive preparation to under one hour");
}

#[test]
fn test_business_task_rejects_plan_only_section() {
    let catalog = catalog();
    let schema = get_task_schema(catalog.family(1).unwrap(), &FactoryRegistry::builtin()).unwrap();

    let mut content = fixture(include_str!("fixtures/business_task.json"));
    assert!(schema.validate(&content).is_ok());

    content["businessContext"] = json!(["Auditors request archives"]);
    let issues = schema.validate(&content).unwrap_err();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, IssueCode::UnrecognizedKeys);
    assert!(issues[0].path.is_empty());
    assert!(issues[0].message.contains("'businessContext'"));
}

#[test]
fn test_design_plan_rejects_wrong_diagram_kind() {
    let schema = compose(4, DocumentType::Plan);

    assert!(schema.validate(&fixture(include_str!("fixtures/design_plan.json"))).is_ok());

    let issues = schema
        .validate(&fixture(include_str!("fixtures/design_plan_wrong_diagram.json")))
        .unwrap_err();
    assert_eq!(issues.len(), 1);
    assert!(issues[0].is_at(&["targetArchitecture", "dataModels", "diagram"]));
    assert_eq!(issues[0].code, IssueCode::InvalidDiagram);
    assert!(issues[0].message.contains("Diagram must be a valid Mermaid erDiagram"));
}

#[test]
fn test_flow_graph_sections_reject_other_kinds() {
    let schema = compose(4, DocumentType::Plan);
    let overview = schema.section("4.2.1").unwrap();

    let issues = overview
        .validate(&json!({ "diagram": "sequenceDiagram\n  A->>B: hi" }))
        .unwrap_err();
    assert!(issues[0].message.contains("Diagram must be a valid Mermaid graph"));
    assert!(issues[0].message.contains("(found 'sequenceDiagram')"));
}

#[test]
fn test_empty_lists_are_rejected() {
    let schema = compose(1, DocumentType::Plan);
    let mut content = fixture(include_str!("fixtures/business_plan.json"));
    content["coreBusinessRules"] = json!([]);

    let issues = schema.validate(&content).unwrap_err();
    assert_eq!(issues.len(), 1);
    assert!(issues[0].is_at(&["coreBusinessRules"]));
    assert_eq!(issues[0].message, "Array must contain at least 1 element(s)");

    for id in ["1.2", "1.5", "1.7", "1.9", "1.10"] {
        assert!(!schema.section(id).unwrap().is_valid(&json!([])), "{}", id);
    }
}

#[test]
fn test_missing_factory_fails_composition() {
    let mut family = catalog().family(1).unwrap().clone();
    let extra: SchemaCatalogSection = serde_json::from_value(json!({
        "id": "1.12",
        "name": "Market Sizing",
        "level": 2,
        "applicability": { "plan": "optional", "task": "omitted" },
        "format": "text"
    }))
    .unwrap();
    family.sections.push(extra);
    let catalog = Catalog::from_families(vec![family]).unwrap();
    let registry = FactoryRegistry::builtin();
    let composer = SchemaComposer::new(&catalog, &registry);

    match composer.plan_schema(1) {
        Err(SchemaError::MissingFactory { id, name }) => {
            assert_eq!(id, "1.12");
            assert_eq!(name, "Market Sizing");
        }
        other => panic!("Expected MissingFactory, got {:?}", other.map(|s| s.shape_keys().len())),
    }

    // omitted for tasks, so the gap does not matter there
    assert!(composer.task_schema(1).is_ok());
    assert!(registry.verify(&catalog).is_err());
}

fn family_one_with(section: Value) -> Catalog {
    let mut family = catalog().family(1).unwrap().clone();
    family.sections.push(serde_json::from_value(section).unwrap());
    Catalog::from_families(vec![family]).unwrap()
}

#[test]
fn test_child_of_leaf_section_needs_factory() {
    let catalog = family_one_with(json!({
        "id": "1.5.1",
        "name": "Rule Owners",
        "level": 3,
        "applicability": { "plan": "required", "task": "required" },
        "format": "list"
    }));
    let registry = FactoryRegistry::builtin();
    let composer = SchemaComposer::new(&catalog, &registry);

    for document_type in DocumentType::ALL {
        match composer.compose(1, document_type) {
            Err(SchemaError::MissingFactory { id, name }) => {
                assert_eq!(id, "1.5.1");
                assert_eq!(name, "Rule Owners");
            }
            other => panic!("Expected MissingFactory, got {:?}", other.map(|s| s.by_id().len())),
        }
    }
}

#[test]
fn test_omitted_child_of_leaf_section_is_ignored() {
    let catalog = family_one_with(json!({
        "id": "1.5.1",
        "name": "Rule Owners",
        "level": 3,
        "applicability": { "plan": "omitted", "task": "omitted" },
        "format": "list"
    }));
    let registry = FactoryRegistry::builtin();

    let schema = SchemaComposer::new(&catalog, &registry).plan_schema(1).unwrap();
    assert!(schema.section("1.5.1").is_none());
}

#[test]
fn test_nested_section_without_factory_fails_composition() {
    let mut family = catalog().family(3).unwrap().clone();
    family.sections.push(
        serde_json::from_value(json!({
            "id": "3.4.4",
            "name": "Load Tests",
            "level": 3,
            "applicability": { "plan": "optional", "task": "omitted" },
            "format": "list"
        }))
        .unwrap(),
    );
    let catalog = Catalog::from_families(vec![family]).unwrap();
    let registry = FactoryRegistry::builtin();
    let composer = SchemaComposer::new(&catalog, &registry);

    assert!(matches!(
        composer.plan_schema(3),
        Err(SchemaError::MissingFactory { ref id, .. }) if id == "3.4.4"
    ));
    assert!(composer.task_schema(3).is_ok());
}

// =============================================================================
// Section-level behavior
// =============================================================================

#[test]
fn test_dependency_status_required_for_tasks() {
    let dependency = json!([
        { "id": "D1", "description": "Object storage bucket", "type": "External" }
    ]);

    let plan = compose(2, DocumentType::Plan);
    assert!(plan.validate_section("2.3", &dependency).unwrap().is_ok());

    let task = compose(2, DocumentType::Task);
    let issues = task.validate_section("2.3", &dependency).unwrap().unwrap_err();
    assert_eq!(issues[0].path_string(), "[0].status");
    assert_eq!(issues[0].code, IssueCode::Required);

    assert!(task.validate(&fixture(include_str!("fixtures/planning_task.json"))).is_ok());
}

#[test]
fn test_enum_values_are_closed() {
    let task = compose(2, DocumentType::Task);
    let issues = task
        .validate_section("2.4", &json!({ "level": "Urgent" }))
        .unwrap()
        .unwrap_err();
    assert_eq!(
        issues[0].message,
        "Invalid enum value. Expected 'High' | 'Medium' | 'Low', received 'Urgent'"
    );
}

#[test]
fn test_issues_collected_in_one_pass() {
    let schema = compose(3, DocumentType::Plan);
    let issues = schema
        .validate(&json!({
            "risks": [{ "risk": "", "impact": "Severe", "likelihood": "Low" }],
            "testingStrategy": { "unitTests": [], "smokeTests": ["x"] }
        }))
        .unwrap_err();

    let paths: Vec<String> = issues.iter().map(|i| i.path_string()).collect();
    assert!(paths.contains(&"risks[0].risk".to_string()));
    assert!(paths.contains(&"risks[0].impact".to_string()));
    assert!(paths.contains(&"risks[0].mitigation".to_string()));
    assert!(paths.contains(&"testingStrategy.unitTests".to_string()));
    assert!(paths.contains(&"testingStrategy".to_string()));
}

#[test]
fn test_omitted_nested_section_is_not_addressable() {
    let task = compose(3, DocumentType::Task);
    assert!(task.validate_section("3.4.3", &json!(["x"])).is_none());
    assert!(task.validate_section("3.4.1", &json!(["x"])).unwrap().is_ok());
}

#[test]
fn test_omitted_family_children_skipped_for_tasks() {
    let task = compose(4, DocumentType::Task);
    assert!(task.section("4.2.4").is_none());
    assert!(task.section("4.2.5.1").is_some());
    assert_eq!(task.shape_keys(), vec!["targetArchitecture", "implementationApproach"]);
}
