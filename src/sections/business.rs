//! Family 1: Business & Scope

use std::sync::Arc;

use super::{container, BuildContext, FamilyFactories, SectionFactory};
use crate::error::Result;
use crate::validate::primitives::{diagram_or_text, enum_field, non_empty_string, table, text_list};
use crate::validate::{DiagramKind, Field, Priority, Validator};

const FACTORIES: &[(&str, SectionFactory)] = &[
    ("1.1", container),
    ("1.1.1", summary),
    ("1.1.2", problem_statement),
    ("1.1.3", goals),
    ("1.2", business_context),
    ("1.3", user_journeys),
    ("1.4", user_personas),
    ("1.5", core_business_rules),
    ("1.6", user_stories),
    ("1.7", success_criteria),
    ("1.8", definition_of_done),
    ("1.9", in_scope),
    ("1.10", out_of_scope),
    ("1.11", core_business_processes),
];

pub(crate) fn factories() -> FamilyFactories {
    FamilyFactories::new(1, FACTORIES)
}

fn summary(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(id, non_empty_string()))
}

fn problem_statement(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(id, non_empty_string()))
}

fn goals(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(id, text_list()))
}

fn business_context(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(id, text_list()))
}

fn user_journeys(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(
        id,
        table(vec![
            Field::new("name", non_empty_string()),
            Field::optional("persona", non_empty_string()),
            Field::new("steps", text_list()),
        ]),
    ))
}

fn user_personas(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(
        id,
        table(vec![
            Field::new("name", non_empty_string()),
            Field::new("description", non_empty_string()),
            Field::optional("goals", text_list()),
        ]),
    ))
}

fn core_business_rules(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(id, text_list()))
}

fn user_stories(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(
        id,
        table(vec![
            Field::new("id", non_empty_string()),
            Field::new("title", non_empty_string()),
            Field::new("userStory", non_empty_string()),
            Field::new("acceptanceCriteria", text_list()),
            Field::optional("priority", enum_field::<Priority>()),
        ]),
    ))
}

fn success_criteria(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(id, text_list()))
}

fn definition_of_done(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(
        id,
        table(vec![
            Field::new("id", non_empty_string()),
            Field::new("criterion", non_empty_string()),
        ]),
    ))
}

fn in_scope(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(id, text_list()))
}

fn out_of_scope(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(id, text_list()))
}

fn core_business_processes(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(id, diagram_or_text(&[DiagramKind::Graph])))
}
