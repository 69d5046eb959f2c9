//! Calls, object creation, exceptions and messages

use crate::error::{Result, TranspileError, CDEF_NOT_FOUND};
use crate::expressions::method_call::{dynamic_class, guard};
use crate::expressions::{render_call_statement, render_chain, render_dynamic_name, render_source, render_target, Access, GuardKind};
use crate::traversal::Traversal;
use abapjs_syntax::{
    AbapType, Binding, ClassSpec, DynamicName, MessageSpec, MethodCallChain, Raise, Source, Target, TargetBinding,
};

pub fn call(t: &mut Traversal<'_>, call: &MethodCallChain) -> Result<String> {
    render_call_statement(t, call)
}

/// Parameter lists of CALL FUNCTION
pub struct FunctionParameters<'s> {
    pub exporting: &'s [Binding],
    pub importing: &'s [TargetBinding],
    pub changing: &'s [TargetBinding],
    pub tables: &'s [TargetBinding],
}

pub fn call_function(
    t: &mut Traversal<'_>,
    name: &DynamicName,
    destination: Option<&DynamicName>,
    parameters: &FunctionParameters<'_>,
) -> Result<String> {
    let mut groups = Vec::new();
    if !parameters.exporting.is_empty() {
        groups.push(format!("exporting: {}", bindings(t, parameters.exporting)?));
    }
    for (key, list) in [
        ("importing", parameters.importing),
        ("changing", parameters.changing),
        ("tables", parameters.tables),
    ] {
        if !list.is_empty() {
            groups.push(format!("{}: {}", key, target_bindings(t, list)?));
        }
    }

    if let Some(destination) = destination {
        let mut options = vec![
            format!("name:{}", render_dynamic_name(t, name)?),
            format!("destination:{}", render_dynamic_name(t, destination)?),
        ];
        options.extend(groups);
        return Ok(format!("await abap.statements.callFunction({{{}}});", options.join(",")));
    }

    let module = match name {
        DynamicName::Literal { value } => format!("abap.FunctionModules['{}']", value.trim().to_uppercase()),
        DynamicName::Field { chain } => format!(
            "abap.FunctionModules[{}.get().trimEnd()]",
            render_chain(t, chain, Access::Read)?
        ),
    };
    if groups.is_empty() {
        Ok(format!("await {}();", module))
    } else {
        Ok(format!("await {}({{{}}});", module, groups.join(", ")))
    }
}

pub fn raise(t: &mut Traversal<'_>, raise: &Raise) -> Result<String> {
    match raise {
        Raise::Type { class, exporting } => {
            let lookup = t.lookup_class(class.str(), class.start);
            let parameters = if exporting.is_empty() {
                String::new()
            } else {
                bindings(t, exporting)?
            };
            Ok(format!("throw await (new {}()).constructor_({});", lookup, parameters))
        }
        Raise::Instance { source } => Ok(format!("throw {}.get();", render_source(t, source)?)),
    }
}

pub fn message(t: &mut Traversal<'_>, message: &MessageSpec, with: &[Source], into: Option<&Target>) -> Result<String> {
    let mut options = Vec::new();
    if let Some(into) = into {
        options.push(format!("into: {}", render_target(t, into)?));
    }
    match message {
        MessageSpec::Short {
            message_type,
            number,
            id,
        } => {
            options.push(format!("id: \"{}\"", id.to_uppercase()));
            options.push(format!("number: \"{}\"", number));
            options.push(format!("type: \"{}\"", message_type.to_uppercase()));
        }
        MessageSpec::Id {
            id,
            message_type,
            number,
        } => {
            options.push(format!("id: {}", render_source(t, id)?));
            options.push(format!("type: {}", render_source(t, message_type)?));
            options.push(format!("number: {}", render_source(t, number)?));
        }
    }
    if !with.is_empty() {
        let mut values = Vec::with_capacity(with.len());
        for source in with {
            values.push(render_source(t, source)?);
        }
        options.push(format!("with: [{}]", values.join(",")));
    }
    Ok(format!("abap.statements.message({{{}}});", options.join(", ")))
}

/// CREATE OBJECT; without TYPE the class comes from the target's static type.
pub fn create_object(
    t: &mut Traversal<'_>,
    target: &Target,
    class: Option<&ClassSpec>,
    parameters: &[Binding],
) -> Result<String> {
    let class = match class {
        Some(ClassSpec::Static { name }) => t.lookup_class(name.str(), name.start),
        Some(ClassSpec::Dynamic { name }) => {
            let class = dynamic_class(t, name)?;
            guard(t, GuardKind::CreateObject, &class)?;
            class
        }
        None => {
            let token = target
                .first_token()
                .ok_or_else(|| TranspileError::unresolved(CDEF_NOT_FOUND, "CREATE OBJECT target"))?;
            let referenced = match t.accessor().variable(token).map(|v| &v.ty) {
                Some(AbapType::ObjectReference { class: Some(class) }) => class.clone(),
                _ => return Err(TranspileError::unresolved(CDEF_NOT_FOUND, token.str())),
            };
            t.lookup_class(&referenced, token.start)
        }
    };

    let parameters = if parameters.is_empty() {
        String::new()
    } else {
        bindings(t, parameters)?
    };
    Ok(format!(
        "{}.set(await (new {}()).constructor_({}));",
        render_target(t, target)?,
        class,
        parameters
    ))
}

fn bindings(t: &mut Traversal<'_>, list: &[Binding]) -> Result<String> {
    let mut parts = Vec::with_capacity(list.len());
    for binding in list {
        parts.push(format!("{}: {}", binding.name.lower(), render_source(t, &binding.value)?));
    }
    Ok(format!("{{{}}}", parts.join(", ")))
}

fn target_bindings(t: &mut Traversal<'_>, list: &[TargetBinding]) -> Result<String> {
    let mut parts = Vec::with_capacity(list.len());
    for binding in list {
        parts.push(format!("{}: {}", binding.name.lower(), render_target(t, &binding.target)?));
    }
    Ok(format!("{{{}}}", parts.join(", ")))
}
