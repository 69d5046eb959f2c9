//! INTERFACE: an empty class carrying the interface constants

use super::class_implementation::initial_value;
use super::opening_statement;
use crate::chunk::Chunk;
use crate::error::{Result, TranspileError, IDEF_NOT_FOUND};
use crate::naming;
use crate::traversal::Traversal;
use abapjs_syntax::{Statement, StructureNode};

pub fn transpile(t: &mut Traversal<'_>, node: &StructureNode) -> Result<Chunk> {
    let opening = opening_statement(node, "Interface")?;
    let name = match &opening.statement {
        Statement::Interface { name } => name.clone(),
        other => return Err(TranspileError::unsupported(other.name(), &opening.text, opening.span)),
    };

    // members are declarations only
    let mut chunk = t.traverse_statement(opening)?;
    if let Some(closing) = node.statements().last().filter(|s| s.span != opening.span) {
        chunk.push_chunk(t.traverse_statement(closing)?);
    }

    let scope = t.accessor().lookup(name.start);
    let interface = t
        .accessor()
        .interface_definition_at(name.start)
        .or_else(|| t.accessor().find_interface_definition(name.str(), scope))
        .ok_or_else(|| TranspileError::unresolved(IDEF_NOT_FOUND, name.str()))?;

    let interface_name = name.lower();
    let mut out = String::new();
    for attribute in interface.attributes.statics.iter().chain(&interface.attributes.constants) {
        let target = format!(
            "{}.{}",
            interface_name,
            naming::interface_member(&interface_name, &attribute.name)
        );
        out.push_str(&format!("{} = {};\n", target, t.render_type(&attribute.ty)?));
        if let Some(value) = &attribute.value {
            initial_value(&target, value, &mut out);
        }
    }
    chunk.push_at(out, name.start);

    let key = t.definition_key(&interface.name, interface.global, &interface.file);
    t.register(naming::registration(&key, name.str()));
    Ok(chunk)
}
