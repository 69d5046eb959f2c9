use crate::error::Result;
use crate::expressions::constant::escape_constant;
use crate::naming;
use crate::traversal::Traversal;
use abapjs_syntax::{AbapType, Constant, Token};

/// DATA and CONSTANTS: `let name = <type>;`, then the VALUE if any.
pub fn data(t: &mut Traversal<'_>, name: &Token, ty: &AbapType, value: Option<&Constant>) -> Result<String> {
    let name = naming::js_name(name.str());
    let mut out = format!("let {} = {};", name, t.render_type(ty)?);
    if let Some(value) = value {
        out.push_str(&format!("\n{}.set({});", name, escape_constant(value)));
    }
    Ok(out)
}

pub fn field_symbol(name: &Token) -> String {
    format!("let {} = new abap.types.FieldSymbol();", naming::field_symbol(name.str()))
}
