//! Logical expressions

use super::source::render_source;
use crate::error::{Result, TranspileError};
use crate::traversal::Traversal;
use abapjs_syntax::{Condition, Predicate, Source};

pub fn render_condition(t: &mut Traversal<'_>, condition: &Condition) -> Result<String> {
    match condition {
        Condition::Compare { left, op, right } => Ok(format!(
            "abap.compare.{}({}, {})",
            op.runtime_name(),
            render_source(t, left)?,
            render_source(t, right)?
        )),
        Condition::Predicate {
            operand,
            predicate,
            negated,
        } => render_predicate(t, operand, *predicate, *negated),
        Condition::In {
            operand,
            range,
            negated,
        } => render_in(t, operand, range, *negated),
        Condition::Not { inner } => render_not(t, inner),
        Condition::And { items } => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                let rendered = render_condition(t, item)?;
                if matches!(item, Condition::Or { .. }) {
                    parts.push(format!("({})", rendered));
                } else {
                    parts.push(rendered);
                }
            }
            Ok(parts.join(" && "))
        }
        Condition::Or { items } => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                parts.push(render_condition(t, item)?);
            }
            Ok(parts.join(" || "))
        }
        Condition::Paren { inner } => Ok(format!("({})", render_condition(t, inner)?)),
        Condition::Unsupported { name, text, span } => Err(TranspileError::unsupported(name, text, *span)),
    }
}

fn render_predicate(t: &mut Traversal<'_>, operand: &Source, predicate: Predicate, negated: bool) -> Result<String> {
    let check = format!("abap.compare.{}({})", predicate.runtime_name(), render_source(t, operand)?);
    Ok(if negated { format!("{} === false", check) } else { check })
}

fn render_in(t: &mut Traversal<'_>, operand: &Source, range: &Source, negated: bool) -> Result<String> {
    let check = format!("abap.compare.in({}, {})", render_source(t, operand)?, render_source(t, range)?);
    Ok(if negated { format!("{} === false", check) } else { check })
}

fn render_not(t: &mut Traversal<'_>, inner: &Condition) -> Result<String> {
    match inner {
        Condition::Predicate {
            operand,
            predicate,
            negated,
        } => render_predicate(t, operand, *predicate, !negated),
        Condition::In {
            operand,
            range,
            negated,
        } => render_in(t, operand, range, !negated),
        Condition::Compare { .. } | Condition::Paren { .. } => Ok(format!("!{}", render_condition(t, inner)?)),
        other => Ok(format!("!({})", render_condition(t, other)?)),
    }
}

/// Row predicate for WHERE and WITH KEY, row bound to `i`.
pub fn row_closure(t: &mut Traversal<'_>, condition: &Condition) -> Result<String> {
    Ok(format!("(i) => {{return {};}}", render_condition(t, condition)?))
}
