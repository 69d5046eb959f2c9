//! Read operands

use super::constant::{character_operand, quote_backtick, quote_text, string_operand, template_text};
use super::field_chain::{render_chain, Access};
use super::method_call;
use crate::error::{Result, TranspileError};
use crate::naming;
use crate::traversal::Traversal;
use abapjs_syntax::{BuiltinCall, Constant, DynamicName, Source, TemplatePart, Token};

pub fn render_source(t: &mut Traversal<'_>, source: &Source) -> Result<String> {
    match source {
        Source::Constant { constant } => Ok(render_constant(t, constant)),
        Source::Template { parts } => render_template(t, parts),
        Source::Field { chain } => render_chain(t, chain, Access::Read),
        Source::Call { call } => method_call::render_call(t, call),
        Source::Builtin { call } => render_builtin(t, call),
        Source::Arithmetic { left, op, right } => Ok(format!(
            "abap.operators.{}({},{})",
            op.runtime_name(),
            render_source(t, left)?,
            render_source(t, right)?
        )),
        Source::Component { path } => Ok(render_component(path)),
        Source::Unsupported { name, text, span } => Err(TranspileError::unsupported(name, text, *span)),
    }
}

/// Integers become hoisted `constant_N` operands, texts fresh typed values.
pub fn render_constant(t: &mut Traversal<'_>, constant: &Constant) -> String {
    match constant {
        Constant::Integer { value } => t.integer(*value),
        Constant::Text { value } => character_operand(value),
        Constant::Backtick { value } => string_operand(&quote_backtick(value)),
    }
}

fn render_template(t: &mut Traversal<'_>, parts: &[TemplatePart]) -> Result<String> {
    let mut body = String::new();
    for part in parts {
        match part {
            TemplatePart::Text { text } => body.push_str(&template_text(text)),
            TemplatePart::Embed { source } => {
                body.push_str("${");
                body.push_str(&render_source(t, source)?);
                body.push_str(".get()}");
            }
        }
    }
    Ok(string_operand(&format!("`{}`", body)))
}

fn render_builtin(t: &mut Traversal<'_>, call: &BuiltinCall) -> Result<String> {
    let name = naming::js_name(call.name.str());
    if let Some(single) = &call.single {
        return Ok(format!("abap.builtin.{}({{val: {}}})", name, render_source(t, single)?));
    }
    if call.parameters.is_empty() {
        return Ok(format!("abap.builtin.{}()", name));
    }
    let mut parameters = Vec::with_capacity(call.parameters.len());
    for binding in &call.parameters {
        parameters.push(format!("{}: {}", binding.name.lower(), render_source(t, &binding.value)?));
    }
    Ok(format!("abap.builtin.{}({{{}}})", name, parameters.join(", ")))
}

/// Row component inside a row predicate; the row is bound to `i`.
fn render_component(path: &[Token]) -> String {
    let mut out = String::from("i");
    for (index, name) in path.iter().enumerate() {
        let name = naming::js_name(name.str());
        if index == 0 {
            if name == "table_line" {
                continue;
            }
            out.push('.');
        } else {
            out.push_str(".get().");
        }
        out.push_str(&name);
    }
    out
}

/// Name given in parentheses, as a JavaScript string expression.
pub fn render_dynamic_name(t: &mut Traversal<'_>, name: &DynamicName) -> Result<String> {
    match name {
        DynamicName::Literal { value } => Ok(quote_text(value)),
        DynamicName::Field { chain } => Ok(format!("{}.get().trimEnd()", render_chain(t, chain, Access::Read)?)),
    }
}
