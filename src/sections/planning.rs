//! Family 2: Planning & Decomposition

use std::sync::Arc;

use super::{BuildContext, FamilyFactories, SectionFactory};
use crate::catalog::DocumentType;
use crate::error::Result;
use crate::validate::primitives::{diagram_or_text, enum_field, non_empty_string, record, table, text_list};
use crate::validate::{DependencyStatus, DependencyType, DiagramKind, Field, Priority, Validator};

const FACTORIES: &[(&str, SectionFactory)] = &[
    ("2.1", decomposition_graph),
    ("2.2", work_breakdown),
    ("2.3", dependencies),
    ("2.4", priority),
    ("2.5", implementation_steps),
    ("2.6", milestones),
];

pub(crate) fn factories() -> FamilyFactories {
    FamilyFactories::new(2, FACTORIES)
}

fn decomposition_graph(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(id, diagram_or_text(&[DiagramKind::Graph])))
}

fn work_breakdown(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(
        id,
        table(vec![
            Field::new("id", non_empty_string()),
            Field::new("title", non_empty_string()),
            Field::optional("description", non_empty_string()),
            Field::new("priority", enum_field::<Priority>()),
        ]),
    ))
}

/// Tasks track dependency status; plans may leave it out
fn dependencies(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    let status = match ctx.document_type() {
        DocumentType::Task => Field::new("status", enum_field::<DependencyStatus>()),
        DocumentType::Plan => Field::optional("status", enum_field::<DependencyStatus>()),
    };

    Ok(ctx.register(
        id,
        table(vec![
            Field::new("id", non_empty_string()),
            Field::new("description", non_empty_string()),
            Field::new("type", enum_field::<DependencyType>()),
            status,
        ]),
    ))
}

fn priority(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(
        id,
        record(vec![
            Field::new("level", enum_field::<Priority>()),
            Field::optional("rationale", non_empty_string()),
        ]),
    ))
}

fn implementation_steps(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(id, text_list()))
}

fn milestones(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(
        id,
        table(vec![
            Field::new("name", non_empty_string()),
            Field::optional("targetDate", non_empty_string()),
            Field::new("deliverables", text_list()),
        ]),
    ))
}
