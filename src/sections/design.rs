//! Family 4: High-Level Design
//!
//! Diagram sections are restricted to the Mermaid kind that fits their
//! content: data models use `erDiagram`, components `classDiagram`, control
//! flow `sequenceDiagram`, and overview/data-flow sections `graph`.

use std::sync::Arc;

use super::{composite, BuildContext, FamilyFactories, SectionFactory};
use crate::error::Result;
use crate::validate::primitives::{diagram_or_text, non_empty_string, table, text_list};
use crate::validate::{DiagramKind, Field, Validator};

const FACTORIES: &[(&str, SectionFactory)] = &[
    ("4.1", guiding_principles),
    ("4.2", composite),
    ("4.2.1", flow_graph),
    ("4.2.2", data_models),
    ("4.2.3", components),
    ("4.2.4", flow_graph),
    ("4.2.5", composite),
    ("4.2.5.1", control_flow),
    ("4.2.5.2", integration_points),
    ("4.3", technology_choices),
    ("4.4", alternatives_considered),
    ("4.5", implementation_approach),
];

pub(crate) fn factories() -> FamilyFactories {
    FamilyFactories::new(4, FACTORIES)
}

fn guiding_principles(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(id, text_list()))
}

fn flow_graph(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(id, diagram_or_text(&[DiagramKind::Graph])))
}

fn data_models(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(id, diagram_or_text(&[DiagramKind::ErDiagram])))
}

fn components(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(id, diagram_or_text(&[DiagramKind::ClassDiagram])))
}

fn control_flow(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(id, diagram_or_text(&[DiagramKind::SequenceDiagram])))
}

fn integration_points(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(
        id,
        table(vec![
            Field::new("system", non_empty_string()),
            Field::optional("protocol", non_empty_string()),
            Field::new("description", non_empty_string()),
        ]),
    ))
}

fn technology_choices(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(
        id,
        table(vec![
            Field::new("technology", non_empty_string()),
            Field::new("purpose", non_empty_string()),
            Field::new("rationale", non_empty_string()),
        ]),
    ))
}

fn alternatives_considered(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(
        id,
        table(vec![
            Field::new("option", non_empty_string()),
            Field::new("rejectionReason", non_empty_string()),
        ]),
    ))
}

fn implementation_approach(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(id, text_list()))
}
