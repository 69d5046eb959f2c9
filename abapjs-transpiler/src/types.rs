//! Runtime constructors for resolved data types

use crate::error::{Result, TranspileError};
use abapjs_syntax::AbapType;

/// `new abap.types.<Kind>(...)` for `ty`.
///
/// With `runtime_errors` set, a type the analyzer could not resolve renders
/// as `undefined`; otherwise it aborts the unit.
pub fn render_type(ty: &AbapType, runtime_errors: bool) -> Result<String> {
    let rendered = match ty {
        AbapType::Integer { qualified_name } => {
            format!("new abap.types.Integer({})", options(None, qualified_name.as_deref()))
        }
        AbapType::Character { length, qualified_name } => {
            let length = (*length != 1).then_some(*length);
            format!("new abap.types.Character({})", options(length, qualified_name.as_deref()))
        }
        AbapType::String { qualified_name } => {
            format!("new abap.types.String({})", options(None, qualified_name.as_deref()))
        }
        AbapType::XString => "new abap.types.XString()".to_string(),
        AbapType::Hex { length } => format!("new abap.types.Hex({{length: {}}})", length),
        AbapType::Packed { length, decimals } => {
            format!("new abap.types.Packed({{length: {}, decimals: {}}})", length, decimals)
        }
        AbapType::Float => "new abap.types.Float()".to_string(),
        AbapType::Date => "new abap.types.Date()".to_string(),
        AbapType::Time => "new abap.types.Time()".to_string(),
        AbapType::Numc { length } => format!("new abap.types.Numc({{length: {}}})", length),
        AbapType::Structure { components, .. } => {
            let mut fields = Vec::with_capacity(components.len());
            for component in components {
                fields.push(format!(
                    "{}: {}",
                    component.name.to_lowercase(),
                    render_type(&component.ty, runtime_errors)?
                ));
            }
            format!("new abap.types.Structure({{{}}})", fields.join(", "))
        }
        AbapType::Table { row, options } => format!(
            "new abap.types.Table({}, {})",
            render_type(row, runtime_errors)?,
            serde_json::to_string(options)?
        ),
        AbapType::DataReference { target } => {
            format!("new abap.types.DataReference({})", render_type(target, runtime_errors)?)
        }
        AbapType::ObjectReference { .. } => "new abap.types.ABAPObject()".to_string(),
        // Generic parameters take whatever the caller passes.
        AbapType::Generic { .. } => "undefined".to_string(),
        AbapType::Unknown { name, reason } => {
            if runtime_errors {
                "undefined".to_string()
            } else {
                return Err(TranspileError::unknown_type(name, reason));
            }
        }
    };
    Ok(rendered)
}

fn options(length: Option<u32>, qualified_name: Option<&str>) -> String {
    let mut parts = Vec::new();
    if let Some(length) = length {
        parts.push(format!("length: {}", length));
    }
    if let Some(name) = qualified_name {
        parts.push(format!("qualifiedName: \"{}\"", name.to_uppercase()));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("{{{}}}", parts.join(", "))
    }
}
