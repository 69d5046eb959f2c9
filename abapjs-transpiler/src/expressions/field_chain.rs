//! Field chains: `a-b`, `ref->attr`, `zcl_x=>c`, `<fs>`, `ref->*` and
//! offset/length access

use super::method_call;
use crate::error::Result;
use crate::naming;
use crate::traversal::Traversal;
use abapjs_syntax::{ChainHead, ChainSegment, FieldChain, LengthValue, OffsetValue, Token};

/// Whether a chain is read or written. Only matters with offset/length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

pub fn render_chain(t: &mut Traversal<'_>, chain: &FieldChain, access: Access) -> Result<String> {
    let base = render_path(t, chain)?;
    let options = offset_options(t, chain)?;
    if options.is_empty() {
        return Ok(base);
    }
    Ok(match access {
        Access::Read => format!("{}.getOffset({{{}}})", base, options.join(", ")),
        Access::Write => format!("new abap.OffsetLength({}, {{{}}})", base, options.join(", ")),
    })
}

pub fn render_target(t: &mut Traversal<'_>, target: &FieldChain) -> Result<String> {
    render_chain(t, target, Access::Write)
}

fn render_path(t: &mut Traversal<'_>, chain: &FieldChain) -> Result<String> {
    let mut interface_head = None;
    let mut out = match &chain.head {
        ChainHead::Field { name } => t.prefix_and_name(name)?,
        ChainHead::FieldSymbol { name } => naming::field_symbol(name.str()),
        ChainHead::Class { name } => {
            if names_interface(t, name) {
                interface_head = Some(name.lower());
            }
            t.lookup_class(name.str(), name.start)
        }
        ChainHead::Call { call } => format!("({})", method_call::render_call(t, call)?),
    };

    for segment in &chain.segments {
        match segment {
            ChainSegment::Component { name } => {
                out.push_str(".get().");
                out.push_str(&naming::js_name(name.str()));
            }
            ChainSegment::Attribute { name } => {
                out.push_str(".get().");
                let member = match t.accessor().interface_attribute(name) {
                    Some(interface) if !name.str().contains('~') => naming::interface_member(&interface, name.str()),
                    _ => naming::js_name(name.str()),
                };
                out.push_str(&member);
            }
            ChainSegment::Static { name } => {
                out.push('.');
                let member = match &interface_head {
                    Some(interface) => naming::interface_member(interface, name.str()),
                    None => naming::js_name(name.str()),
                };
                out.push_str(&member);
            }
            ChainSegment::Dereference => out.push_str(".getPointer()"),
        }
    }
    Ok(out)
}

fn names_interface(t: &mut Traversal<'_>, name: &Token) -> bool {
    let scope = t.accessor().lookup(name.start);
    let accessor = t.accessor();
    accessor.find_class_definition(name.str(), scope).is_none()
        && accessor.find_interface_definition(name.str(), scope).is_some()
}

fn offset_options(t: &mut Traversal<'_>, chain: &FieldChain) -> Result<Vec<String>> {
    let mut options = Vec::new();
    match &chain.offset {
        Some(OffsetValue::Integer { value }) => options.push(format!("offset: {}", value)),
        Some(OffsetValue::Field { chain }) => {
            options.push(format!("offset: {}.get()", render_chain(t, chain, Access::Read)?));
        }
        None => {}
    }
    match &chain.length {
        Some(LengthValue::Integer { value }) => options.push(format!("length: {}", value)),
        Some(LengthValue::Field { chain }) => {
            options.push(format!("length: {}.get()", render_chain(t, chain, Access::Read)?));
        }
        Some(LengthValue::Star) | None => {}
    }
    Ok(options)
}
