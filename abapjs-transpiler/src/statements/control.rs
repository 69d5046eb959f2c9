//! Control flow and modularization statements

use crate::error::{Result, TranspileError, CDEF_NOT_FOUND};
use crate::expressions::{render_condition, render_source, render_target, row_closure};
use crate::naming;
use crate::structures::class_implementation::constructor_contents;
use crate::traversal::Traversal;
use abapjs_scope::ParameterDirection;
use abapjs_syntax::{Condition, LoopOutput, Source, StatementNode, Token};

pub fn if_statement(t: &mut Traversal<'_>, condition: &Condition) -> Result<String> {
    Ok(format!("if ({}) {{", render_condition(t, condition)?))
}

pub fn else_if(t: &mut Traversal<'_>, condition: &Condition) -> Result<String> {
    let condition = render_condition(t, condition)?;
    Ok(format!("}} else if ({}) {{", t.guarded_condition(condition)))
}

pub fn while_loop(t: &mut Traversal<'_>, condition: &Condition) -> Result<String> {
    let condition = render_condition(t, condition)?;
    Ok(format!("while ({}) {{", t.guarded_condition(condition)))
}

/// DO with or without TIMES; both keep `sy-index` current.
pub fn do_loop(t: &mut Traversal<'_>, times: Option<&Source>) -> Result<String> {
    match times {
        Some(times) => {
            let count = t.unique_name();
            let index = t.unique_name();
            Ok(format!(
                "const {count} = {}.get();\nfor (let {index} = 0; {index} < {count}; {index}++) {{\nabap.builtin.sy.get().index.set({index} + 1);",
                render_source(t, times)?,
            ))
        }
        None => {
            let index = t.unique_name();
            Ok(format!(
                "let {index} = 1;\nwhile (true) {{\nabap.builtin.sy.get().index.set({index}++);"
            ))
        }
    }
}

pub fn loop_at(
    t: &mut Traversal<'_>,
    table: &Source,
    output: &LoopOutput,
    where_clause: Option<&Condition>,
) -> Result<String> {
    let row = t.unique_name();
    let table = render_source(t, table)?;
    let options = match where_clause {
        Some(condition) => format!(", {{where: {}}}", row_closure(t, condition)?),
        None => String::new(),
    };

    let mut out = format!("for (const {} of abap.statements.loop({}{})) {{", row, table, options);
    match output {
        LoopOutput::Into { target } => out.push_str(&format!("\n{}.set({});", render_target(t, target)?, row)),
        LoopOutput::Assigning { target } | LoopOutput::ReferenceInto { target } => {
            out.push_str(&format!("\n{}.assign({});", render_target(t, target)?, row))
        }
        LoopOutput::None => {}
    }
    Ok(out)
}

pub fn assert(t: &mut Traversal<'_>, condition: &Condition) -> Result<String> {
    Ok(format!("abap.statements.assert({});", render_condition(t, condition)?))
}

/// RETURN hands back the returning parameter, or the instance in a constructor.
pub fn return_statement(t: &mut Traversal<'_>, node: &StatementNode) -> String {
    match t.accessor().enclosing_method(node.span.start) {
        Some(method) if method.is_constructor() => "return this;".to_string(),
        Some(method) => match method.definition.and_then(|d| d.returning()) {
            Some(returning) => format!("return {};", naming::js_name(&returning.name)),
            None => "return;".to_string(),
        },
        None => "return;".to_string(),
    }
}

pub fn class_header(t: &mut Traversal<'_>, name: &Token) -> String {
    let scope = t.accessor().lookup(name.start);
    let super_class = t
        .accessor()
        .find_class_definition(name.str(), scope)
        .and_then(|c| c.super_class.clone());
    match super_class {
        Some(super_class) => format!("class {} extends {} {{", name.lower(), t.lookup_class(&super_class, name.start)),
        None => format!("class {} {{", name.lower()),
    }
}

/// Emitted method name; `constructor` is reserved in JavaScript classes.
pub fn method_name(name: &str) -> String {
    let name = naming::js_name(name);
    if name == "constructor" {
        "constructor_".to_string()
    } else {
        name
    }
}

pub fn method_header(t: &mut Traversal<'_>, node: &StatementNode, name: &Token) -> Result<String> {
    let enclosing = t.accessor().enclosing_method(node.span.start);
    let definition = enclosing.as_ref().and_then(|m| m.definition);
    if definition.is_none() {
        t.warn(format!("no definition found for method {}", name.str()), Some(name.start));
    }

    let is_static = definition.map_or(false, |d| d.is_static);
    let mut out = format!(
        "{}async {}(INPUT) {{",
        if is_static { "static " } else { "" },
        method_name(name.str())
    );

    for parameter in definition.map(|d| d.parameters.as_slice()).unwrap_or_default() {
        let parameter_name = naming::js_name(&parameter.name);
        let ty = t.render_type(&parameter.ty)?;
        out.push_str(&format!("\nlet {} = {};", parameter_name, ty));
        if parameter.direction != ParameterDirection::Returning {
            out.push_str(&format!(
                "\nif (INPUT && INPUT.{p}) {{{p} = INPUT.{p};}}",
                p = parameter_name
            ));
        }
    }

    if enclosing.as_ref().map_or(false, |m| m.is_constructor()) {
        let class = t
            .accessor()
            .class_definition_at(node.span.start)
            .ok_or_else(|| TranspileError::unresolved(CDEF_NOT_FOUND, name.str()))?;
        let scope = t.accessor().lookup(node.span.start);
        let contents = constructor_contents(t, class, scope, false)?;
        out.push('\n');
        out.push_str(contents.trim_end_matches('\n'));
    }
    Ok(out)
}

pub fn end_method(t: &mut Traversal<'_>, node: &StatementNode) -> String {
    match t.accessor().enclosing_method(node.span.start) {
        Some(method) if method.is_constructor() => "return this;\n}".to_string(),
        Some(method) => match method.definition.and_then(|d| d.returning()) {
            Some(returning) => format!("return {};\n}}", naming::js_name(&returning.name)),
            None => "}".to_string(),
        },
        None => "}".to_string(),
    }
}
