//! TRY/CATCH lowers to one JavaScript catch block dispatching on instanceof;
//! exceptions no CATCH handles are rethrown.

use super::opening_statement;
use crate::chunk::Chunk;
use crate::error::{Result, TranspileError};
use crate::expressions::render_target;
use crate::traversal::Traversal;
use abapjs_syntax::{Node, Statement, StructureKind, StructureNode};

pub fn transpile(t: &mut Traversal<'_>, node: &StructureNode) -> Result<Chunk> {
    let opening = opening_statement(node, "Try")?;
    let mut chunk = Chunk::at("try {\n", opening.span.start);

    let mut catches = Vec::new();
    for child in &node.children {
        match child {
            Node::Structure(s) if s.kind == StructureKind::Catch => catches.push(s),
            Node::Statement(s) if matches!(s.statement, Statement::Try | Statement::EndTry) => {}
            other => {
                chunk.push_chunk(t.traverse(other)?);
            }
        }
    }

    if !catches.is_empty() {
        chunk.push("} catch (e) {\n");
        for (index, catch) in catches.iter().enumerate() {
            let catch_statement = opening_statement(catch, "Catch")?;
            let Statement::Catch { classes, into } = &catch_statement.statement else {
                return Err(TranspileError::unsupported(
                    catch_statement.statement.name(),
                    &catch_statement.text,
                    catch_statement.span,
                ));
            };

            let checks: Vec<String> = classes
                .iter()
                .map(|class| format!("e instanceof {}", t.lookup_class(class.str(), class.start)))
                .collect();
            let keyword = if index == 0 { "if" } else { "} else if" };
            let mut line = format!("{} ({}) {{\n", keyword, checks.join(" || "));
            if let Some(into) = into {
                line.push_str(&format!("{}.set(e);\n", render_target(t, into)?));
            }
            chunk.push_at(t.take_hoisted(), catch_statement.span.start);
            chunk.push_at(line, catch_statement.span.start);

            for body in catch
                .children
                .iter()
                .filter(|c| !matches!(c, Node::Statement(s) if s.span == catch_statement.span))
            {
                chunk.push_chunk(t.traverse(body)?);
            }
        }
        chunk.push("} else {\nthrow e;\n}\n");
    }

    let end = node.statements().last().map_or(node.span.end, |s| s.span.start);
    chunk.push_at("}\n", end);
    Ok(chunk)
}
