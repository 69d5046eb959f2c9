//! CLASS ... IMPLEMENTATION
//!
//! Emits the JavaScript class itself by walking the children, adds a
//! constructor when the class does not implement one, then initialises the
//! static attributes and constants after the class body. Statics declared by
//! implemented interfaces are collected breadth first over the implements
//! graph, each interface visited once.

use super::opening_statement;
use crate::chunk::Chunk;
use crate::error::{Result, TranspileError, CDEF_NOT_FOUND};
use crate::expressions::constant::escape_value;
use crate::naming;
use crate::traversal::Traversal;
use abapjs_scope::{Attribute, AttributeValue, ClassDefinition, ScopeId};
use abapjs_syntax::{Node, Statement, StructureNode, Token};
use std::collections::{BTreeSet, VecDeque};
use tracing::debug;

pub fn transpile(t: &mut Traversal<'_>, node: &StructureNode) -> Result<Chunk> {
    let opening = opening_statement(node, "ClassImplementation")?;
    let name = match &opening.statement {
        Statement::ClassImplementation { name } => name.clone(),
        other => return Err(TranspileError::unsupported(other.name(), &opening.text, opening.span)),
    };
    debug!("class implementation {}", name.str());

    let synthesize = !has_constructor(node);
    let mut chunk = Chunk::new();
    for child in &node.children {
        chunk.push_chunk(t.traverse(child)?);
        if synthesize && matches!(child, Node::Statement(s) if s.span == opening.span) {
            chunk.push_at(synthesized_constructor(t, &name)?, name.start);
        }
    }
    chunk.push_at(build_static(t, &name)?, name.start);

    let definition = t
        .accessor()
        .class_definition_at(name.start)
        .ok_or_else(|| TranspileError::unresolved(CDEF_NOT_FOUND, name.str()))?;
    let key = t.definition_key(&definition.name, definition.global, &definition.file);
    t.register(naming::registration(&key, name.str()));
    Ok(chunk)
}

fn has_constructor(node: &StructureNode) -> bool {
    node.all_statements().iter().any(|s| {
        matches!(&s.statement, Statement::Method { name } if name.str().eq_ignore_ascii_case("constructor"))
    })
}

fn synthesized_constructor(t: &mut Traversal<'_>, name: &Token) -> Result<String> {
    let definition = t
        .accessor()
        .class_definition_at(name.start)
        .ok_or_else(|| TranspileError::unresolved(CDEF_NOT_FOUND, name.str()))?;
    let scope = t.accessor().lookup(name.start);
    let contents = constructor_contents(t, definition, scope, true)?;
    Ok(format!("async constructor_(INPUT) {{\n{}return this;\n}}\n", contents))
}

/// Body shared by synthesized and explicit constructors, newline terminated.
///
/// With `forward_super` the superclass constructor is called first with the
/// same input; an explicit constructor calls it itself.
pub fn constructor_contents(
    t: &mut Traversal<'_>,
    class: &ClassDefinition,
    scope: Option<ScopeId>,
    forward_super: bool,
) -> Result<String> {
    let mut out = String::new();
    if forward_super && class.super_class.is_some() {
        out.push_str("await super.constructor_(INPUT);\n");
    }
    out.push_str("this.me = new abap.types.ABAPObject();\n");
    out.push_str("this.me.set(this);\n");

    for attribute in &class.attributes.instance {
        out.push_str(&format!(
            "this.{} = {};\n",
            naming::js_name(&attribute.name),
            t.render_type(&attribute.ty)?
        ));
    }

    let mut visited = BTreeSet::new();
    for interface in &class.implementing {
        interface_data(t, interface, scope, &mut visited, &mut out)?;
    }

    for alias in &class.aliases {
        out.push_str(&format!(
            "this.{} = this.{};\n",
            naming::js_name(&alias.name),
            naming::js_name(&alias.component)
        ));
    }

    let class_name = class.name.to_lowercase();
    for constant in &class.attributes.constants {
        let constant = naming::js_name(&constant.name);
        out.push_str(&format!("this.{} = {}.{};\n", constant, class_name, constant));
    }
    Ok(out)
}

/// Instance attributes of `name` and the interfaces it includes, each
/// qualified with its own interface name.
fn interface_data(
    t: &mut Traversal<'_>,
    name: &str,
    scope: Option<ScopeId>,
    visited: &mut BTreeSet<String>,
    out: &mut String,
) -> Result<()> {
    if !visited.insert(name.to_uppercase()) {
        return Ok(());
    }
    let Some(interface) = t.accessor().find_interface_definition(name, scope) else {
        t.warn(format!("interface {} not found, attributes skipped", name), None);
        return Ok(());
    };
    for attribute in &interface.attributes.instance {
        out.push_str(&format!(
            "this.{} = {};\n",
            naming::interface_member(&interface.name, &attribute.name),
            t.render_type(&attribute.ty)?
        ));
    }
    for included in &interface.implementing {
        interface_data(t, included, scope, visited, out)?;
    }
    Ok(())
}

struct StaticAttribute<'d> {
    /// `""` for the class itself, `intf$` for interface members.
    prefix: String,
    attribute: &'d Attribute,
}

fn static_attributes<'a>(t: &mut Traversal<'a>, class: &'a ClassDefinition, scope: ScopeId) -> Vec<StaticAttribute<'a>> {
    let mut out: Vec<StaticAttribute<'a>> = class
        .attributes
        .statics
        .iter()
        .chain(&class.attributes.constants)
        .map(|attribute| StaticAttribute {
            prefix: String::new(),
            attribute,
        })
        .collect();

    let mut queue: VecDeque<&str> = class.implementing.iter().map(String::as_str).collect();
    let mut visited = BTreeSet::new();
    while let Some(name) = queue.pop_front() {
        if !visited.insert(name.to_uppercase()) {
            continue;
        }
        let Some(interface) = t.accessor().find_interface_definition(name, Some(scope)) else {
            t.warn(format!("interface {} not found, statics skipped", name), None);
            continue;
        };
        queue.extend(interface.implementing.iter().map(String::as_str));
        let prefix = format!("{}$", interface.name.to_lowercase());
        for attribute in interface.attributes.statics.iter().chain(&interface.attributes.constants) {
            out.push(StaticAttribute {
                prefix: prefix.clone(),
                attribute,
            });
        }
    }
    out
}

/// Static attribute and constant initialisation after the class body.
fn build_static(t: &mut Traversal<'_>, name: &Token) -> Result<String> {
    let class = t
        .accessor()
        .class_definition_at(name.start)
        .ok_or_else(|| TranspileError::unresolved(CDEF_NOT_FOUND, name.str()))?;
    let scope = t.accessor().scope_at(name.start, "class statics")?;
    let class_name = name.lower();

    let statics = static_attributes(t, class, scope);
    let mut out = String::new();
    for entry in &statics {
        let target = format!("{}.{}{}", class_name, entry.prefix, naming::js_name(&entry.attribute.name));
        out.push_str(&format!("{} = {};\n", target, t.render_type(&entry.attribute.ty)?));
        if let Some(value) = &entry.attribute.value {
            initial_value(&target, value, &mut out);
        }
    }

    for alias in &class.aliases {
        let component = naming::js_name(&alias.component);
        let is_static = statics
            .iter()
            .any(|s| format!("{}{}", s.prefix, naming::js_name(&s.attribute.name)) == component);
        if is_static {
            out.push_str(&format!(
                "{}.{} = {}.{};\n",
                class_name,
                naming::js_name(&alias.name),
                class_name,
                component
            ));
        }
    }

    // runs at load time rather than at first access
    if class.has_method("class_constructor") {
        out.push_str(&format!("await {}.class_constructor();\n", class_name));
    }
    Ok(out)
}

pub(crate) fn initial_value(target: &str, value: &AttributeValue, out: &mut String) {
    match value {
        AttributeValue::Scalar(written) => out.push_str(&format!("{}.set({});\n", target, escape_value(written))),
        AttributeValue::Structured(components) => {
            for component in components {
                let nested = format!("{}.get().{}", target, naming::js_name(&component.name));
                initial_value(&nested, &component.value, out);
            }
        }
    }
}
