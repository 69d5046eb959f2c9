//! CASE lowers to an if/else-if chain over a temporary holding the operand.

use super::opening_statement;
use crate::chunk::Chunk;
use crate::error::{Result, TranspileError};
use crate::expressions::render_source;
use crate::traversal::Traversal;
use abapjs_syntax::{Node, Statement, StructureNode};

pub fn transpile(t: &mut Traversal<'_>, node: &StructureNode) -> Result<Chunk> {
    let opening = opening_statement(node, "Case")?;
    let Statement::Case { source } = &opening.statement else {
        return Err(TranspileError::unsupported(opening.statement.name(), &opening.text, opening.span));
    };

    let operand = t.unique_name();
    let rendered = render_source(t, source)?;
    let mut chunk = Chunk::new();
    chunk.push_at(t.take_hoisted(), opening.span.start);
    chunk.push_at(format!("let {} = {};\n", operand, rendered), opening.span.start);

    let mut branches = 0;
    for child in &node.children {
        let Node::Structure(when) = child else {
            continue;
        };
        let when_statement = opening_statement(when, "When")?;
        let condition = match &when_statement.statement {
            Statement::When { values } => {
                let mut checks = Vec::with_capacity(values.len());
                for value in values {
                    checks.push(format!("abap.compare.eq({}, {})", operand, render_source(t, value)?));
                }
                Some(checks.join(" || "))
            }
            Statement::WhenOthers => None,
            other => return Err(TranspileError::unsupported(other.name(), &when_statement.text, when_statement.span)),
        };

        let line = match (branches, condition) {
            (0, Some(condition)) => format!("if ({}) {{\n", condition),
            (_, Some(condition)) => format!("}} else if ({}) {{\n", t.guarded_condition(condition)),
            (0, None) => "if (true) {\n".to_string(),
            (_, None) => "} else {\n".to_string(),
        };
        chunk.push_at(t.take_hoisted(), when_statement.span.start);
        chunk.push_at(line, when_statement.span.start);
        branches += 1;

        for body in when.children.iter().filter(|c| !matches!(c, Node::Statement(s) if s.span == when_statement.span)) {
            chunk.push_chunk(t.traverse(body)?);
        }
    }

    if branches > 0 {
        let end = node.statements().last().map_or(node.span.end, |s| s.span.start);
        chunk.push_at("}\n", end);
    }
    Ok(chunk)
}
