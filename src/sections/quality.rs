//! Family 3: Quality & Risk

use std::sync::Arc;

use super::{composite, BuildContext, FamilyFactories, SectionFactory};
use crate::error::Result;
use crate::validate::primitives::{enum_field, non_empty_string, table, text_list};
use crate::validate::{Field, Priority, Validator};

const FACTORIES: &[(&str, SectionFactory)] = &[
    ("3.1", risks),
    ("3.2", bullet_list),
    ("3.3", bullet_list),
    ("3.4", composite),
    ("3.4.1", bullet_list),
    ("3.4.2", bullet_list),
    ("3.4.3", bullet_list),
    ("3.5", bullet_list),
];

pub(crate) fn factories() -> FamilyFactories {
    FamilyFactories::new(3, FACTORIES)
}

/// Impact and likelihood share the High/Medium/Low scale
fn risks(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(
        id,
        table(vec![
            Field::new("risk", non_empty_string()),
            Field::new("impact", enum_field::<Priority>()),
            Field::new("likelihood", enum_field::<Priority>()),
            Field::new("mitigation", non_empty_string()),
        ]),
    ))
}

fn bullet_list(ctx: &mut BuildContext<'_>, id: &str) -> Result<Arc<Validator>> {
    Ok(ctx.register(id, text_list()))
}
