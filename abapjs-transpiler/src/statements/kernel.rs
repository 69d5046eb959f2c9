//! Statements implemented by runtime kernel classes
//!
//! Each lowering checks that its kernel class is loaded before calling it.

use crate::error::Result;
use crate::expressions::{render_condition, render_source, render_target};
use crate::naming;
use crate::traversal::Traversal;
use abapjs_syntax::{Binding, Condition, Conversion, Source, TransformationOperand};

fn kernel_check(class: &str, statement: &str) -> String {
    format!(
        "if ({} === undefined) throw new Error(\"{}, kernel class missing\");",
        naming::class_lookup(class),
        statement
    )
}

pub fn call_transformation(
    t: &mut Traversal<'_>,
    name: &str,
    options: &[Binding],
    source: &TransformationOperand,
    result: &TransformationOperand,
) -> Result<String> {
    let mut parts = vec![format!("name: \"{}\"", name.to_lowercase())];

    // XML operands lead, bindings trail the options
    let source_xml = matches!(source, TransformationOperand::Xml { .. });
    let result_xml = matches!(result, TransformationOperand::Xml { .. });
    if source_xml {
        parts.push(format!("sourceXML: {}", operand(t, source)?));
    }
    if result_xml {
        parts.push(format!("resultXML: {}", operand(t, result)?));
    }
    if !options.is_empty() {
        parts.push(format!("options: {}", compact_bindings(t, options)?));
    }
    if !source_xml {
        parts.push(format!("source: {}", operand(t, source)?));
    }
    if !result_xml {
        parts.push(format!("result: {}", operand(t, result)?));
    }

    Ok(format!(
        "{}\nawait {}.call({{{}}});",
        kernel_check("KERNEL_CALL_TRANSFORMATION", "CallTransformation"),
        naming::class_lookup("KERNEL_CALL_TRANSFORMATION"),
        parts.join(",")
    ))
}

fn operand(t: &mut Traversal<'_>, operand: &TransformationOperand) -> Result<String> {
    match operand {
        TransformationOperand::Xml { value } => render_source(t, value),
        TransformationOperand::Bindings { bindings } => compact_bindings(t, bindings),
        TransformationOperand::Dynamic { value } => Ok(format!("({})", render_source(t, value)?)),
    }
}

/// `{a:x,b:y}`
fn compact_bindings(t: &mut Traversal<'_>, bindings: &[Binding]) -> Result<String> {
    let mut parts = Vec::with_capacity(bindings.len());
    for binding in bindings {
        parts.push(format!("{}:{}", binding.name.lower(), render_source(t, &binding.value)?));
    }
    Ok(format!("{{{}}}", parts.join(",")))
}

pub fn convert(t: &mut Traversal<'_>, conversion: &Conversion) -> Result<String> {
    let (inputs, outputs) = match conversion {
        Conversion::ToStamp { date, time, zone, stamp } => {
            let mut inputs = vec![format!("date: {}", render_source(t, date)?)];
            if let Some(time) = time {
                inputs.push(format!("time: {}", render_source(t, time)?));
            }
            if let Some(zone) = zone {
                inputs.push(format!("zone: {}", render_source(t, zone)?));
            }
            (inputs, vec![format!("stamp: {}", render_target(t, stamp)?)])
        }
        Conversion::FromStamp { stamp, zone, date, time } => {
            let mut inputs = vec![format!("stamp: {}", render_source(t, stamp)?)];
            if let Some(zone) = zone {
                inputs.push(format!("zone: {}", render_source(t, zone)?));
            }
            let mut outputs = Vec::new();
            if let Some(date) = date {
                outputs.push(format!("date: {}", render_target(t, date)?));
            }
            if let Some(time) = time {
                outputs.push(format!("time: {}", render_target(t, time)?));
            }
            (inputs, outputs)
        }
    };
    Ok(format!(
        "abap.statements.convert({{{}}}, {{{}}});",
        inputs.join(","),
        outputs.join(",")
    ))
}

pub fn wait(t: &mut Traversal<'_>, condition: &Condition, seconds: Option<&Source>) -> Result<String> {
    let mut options = vec![format!("cond: {}", render_condition(t, condition)?)];
    if let Some(seconds) = seconds {
        options.push(format!("seconds: {}", render_source(t, seconds)?));
    }
    Ok(format!(
        "{}\nawait {}.wait({{{}}});",
        kernel_check("KERNEL_PUSH_CHANNELS", "Wait"),
        naming::class_lookup("KERNEL_PUSH_CHANNELS"),
        options.join(",")
    ))
}

// TODO: pass the authorization object and its field values once the kernel class accepts them
pub fn authority_check() -> String {
    format!(
        "{}\nawait {}.call({{}});",
        kernel_check("KERNEL_AUTHORITY_CHECK", "AuthorityCheck"),
        naming::class_lookup("KERNEL_AUTHORITY_CHECK")
    )
}
