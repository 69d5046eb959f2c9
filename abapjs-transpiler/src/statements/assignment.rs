//! Moves, arithmetic and references

use crate::error::Result;
use crate::expressions::constant::quote_text;
use crate::expressions::{render_chain, render_source, render_target, Access};
use crate::traversal::Traversal;
use abapjs_syntax::{ArithmeticStatement, ChainHead, CreateDataSpec, DynamicName, FieldChain, Source, Target};

pub fn move_value(t: &mut Traversal<'_>, source: &Source, target: &Target) -> Result<String> {
    let source = render_source(t, source)?;
    Ok(format!("{}.set({});", render_target(t, target)?, source))
}

/// ADD/SUBTRACT/MULTIPLY/DIVIDE: the target is both operand and result.
pub fn arithmetic(t: &mut Traversal<'_>, op: ArithmeticStatement, source: &Source, target: &Target) -> Result<String> {
    let current = render_chain(t, target, Access::Read)?;
    let source = render_source(t, source)?;
    Ok(format!(
        "{}.set(abap.operators.{}({},{}));",
        render_target(t, target)?,
        op.runtime_name(),
        current,
        source
    ))
}

pub fn clear(t: &mut Traversal<'_>, target: &Target) -> Result<String> {
    Ok(format!("abap.statements.clear({});", render_target(t, target)?))
}

pub fn move_corresponding(t: &mut Traversal<'_>, source: &Source, target: &Target) -> Result<String> {
    let source = render_source(t, source)?;
    Ok(format!("abap.statements.moveCorresponding({}, {});", source, render_target(t, target)?))
}

pub fn assign(t: &mut Traversal<'_>, source: &Source, target: &Target, casting: bool) -> Result<String> {
    let target = render_target(t, target)?;
    let source = match source {
        Source::Field { chain } if chain.ends_with_dereference() => {
            let mut inner = chain.clone();
            inner.segments.pop();
            format!("({}).getPointer()", render_chain(t, &inner, Access::Read)?)
        }
        other => render_source(t, other)?,
    };
    let casting = if casting { ", casting: true" } else { "" };
    Ok(format!("abap.statements.assign({{target: {}, source: {}{}}});", target, source, casting))
}

/// GET REFERENCE OF: a field symbol hands over the data it points to.
pub fn get_reference(t: &mut Traversal<'_>, source: &Source, target: &Target) -> Result<String> {
    let mut rendered = render_source(t, source)?;
    if matches!(source, Source::Field { chain } if is_plain_field_symbol(chain)) {
        rendered.push_str(".getPointer()");
    }
    Ok(format!("{}.assign({});", render_target(t, target)?, rendered))
}

pub fn create_data(t: &mut Traversal<'_>, target: &Target, spec: &CreateDataSpec) -> Result<String> {
    let target = render_target(t, target)?;
    let code = match spec {
        CreateDataSpec::Type { ty } => format!("{}.assign({});", target, t.render_type(ty)?),
        CreateDataSpec::Dynamic { name, table } => {
            let name = match name {
                DynamicName::Literal { value } => quote_text(value),
                DynamicName::Field { chain } => format!("{}.get()", render_chain(t, chain, Access::Read)?),
            };
            let table = if *table { ",\"table\": true" } else { "" };
            format!("abap.statements.createData({},{{\"name\": {}{}}});", target, name, table)
        }
        CreateDataSpec::LikeLineOf { source } => format!(
            "abap.statements.createData({},{{\"likeLineOf\": {}}});",
            target,
            render_source(t, source)?
        ),
        CreateDataSpec::Like { source } => format!(
            "abap.statements.createData({},{{\"like\": {}}});",
            target,
            render_source(t, source)?
        ),
    };
    Ok(code)
}

fn is_plain_field_symbol(chain: &FieldChain) -> bool {
    matches!(chain.head, ChainHead::FieldSymbol { .. }) && chain.segments.is_empty()
}
