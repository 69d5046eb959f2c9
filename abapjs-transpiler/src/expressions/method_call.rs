//! Method calls and dynamic existence guards
//!
//! A call renders as `await <receiver><member>(<parameters>)`. Dynamic class
//! or method names get existence guards, hoisted ahead of the statement
//! containing the call: the class check first, then the method check.
//! ELSEIF, WHILE and later WHEN conditions fold them into the condition
//! instead (see [`Traversal::guarded_condition`]).

use super::field_chain::{render_chain, render_target, Access};
use super::source::render_source;
use crate::error::{Result, TranspileError};
use crate::naming;
use crate::traversal::Traversal;
use abapjs_scope::MethodDefinition;
use abapjs_syntax::{CallParameters, DynamicName, MethodCallChain, MethodRef, Receiver, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    Class,
    Method,
    CreateObject,
}

impl GuardKind {
    /// Exception class raised at run time when the target is missing.
    pub fn exception(&self) -> &'static str {
        match self {
            GuardKind::Class => "CX_SY_DYN_CALL_ILLEGAL_CLASS",
            GuardKind::Method => "CX_SY_DYN_CALL_ILLEGAL_METHOD",
            GuardKind::CreateObject => "CX_SY_CREATE_OBJECT_ERROR",
        }
    }
}

/// Run-time check that a dynamically named class or method exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistenceGuard {
    pub kind: GuardKind,
    /// Expression that is `undefined` when the target is missing.
    pub target: String,
}

impl ExistenceGuard {
    pub fn new(kind: GuardKind, target: impl Into<String>) -> Self {
        ExistenceGuard {
            kind,
            target: target.into(),
        }
    }

    /// Fails with a plain string when neither target nor exception class exist.
    pub fn fallback_check(&self) -> String {
        let exception = self.kind.exception();
        format!(
            "if ({} === undefined && {} === undefined) {{ throw \"{} not found\"; }}",
            self.target,
            naming::class_lookup(exception),
            exception
        )
    }

    pub fn target_check(&self) -> String {
        format!(
            "if ({} === undefined) {{ throw new {}(); }}",
            self.target,
            naming::class_lookup(self.kind.exception())
        )
    }

    pub fn render(&self) -> String {
        format!("{}\n{}", self.fallback_check(), self.target_check())
    }
}

/// Hoist a guard ahead of the current statement.
pub fn guard(t: &mut Traversal<'_>, kind: GuardKind, target: &str) -> Result<()> {
    let exception = kind.exception();
    if t.config().check_fallback_exceptions && !t.accessor().registry().contains(exception) {
        return Err(TranspileError::MissingFallbackException {
            class: exception.to_string(),
        });
    }
    let guard = ExistenceGuard::new(kind, target);
    t.hoist(guard.fallback_check());
    t.hoist(guard.target_check());
    Ok(())
}

/// `abap.Classes[...]` for a class given in parentheses.
pub fn dynamic_class(t: &mut Traversal<'_>, name: &DynamicName) -> Result<String> {
    match name {
        DynamicName::Literal { value } => Ok(naming::class_lookup(&naming::global_key(value.trim()))),
        DynamicName::Field { chain } => Ok(format!("abap.Classes[{}.get()]", render_chain(t, chain, Access::Read)?)),
    }
}

/// Functional form: `await <receiver><member>(<parameters>)`.
pub fn render_call(t: &mut Traversal<'_>, call: &MethodCallChain) -> Result<String> {
    if let (Receiver::Super, MethodRef::Named { name }) = (&call.receiver, &call.method) {
        if name.str().eq_ignore_ascii_case("constructor") {
            let parameters = render_parameters(t, &call.parameters, None, name)?;
            let input = if parameters.is_empty() { "INPUT".to_string() } else { parameters };
            return Ok(format!("await super.constructor_({})", input));
        }
    }

    let receiver = match &call.receiver {
        Receiver::Implicit => "this.".to_string(),
        Receiver::Instance { chain } => format!("{}.get().", render_chain(t, chain, Access::Read)?),
        Receiver::Static { class } => format!("{}.", t.lookup_class(class.str(), class.start)),
        Receiver::Super => "super.".to_string(),
        Receiver::DynamicClass { name } => {
            let class = dynamic_class(t, name)?;
            guard(t, GuardKind::Class, &class)?;
            format!("{}.", class)
        }
    };

    let (member, definition, anchor) = match &call.method {
        MethodRef::Named { name } => {
            let reference = t.accessor().find_method_reference(name);
            let member = match &reference {
                Some(reference) => reference.name.clone(),
                None => naming::js_name(name.str()),
            };
            (format!("{}{}", receiver, member), reference.map(|r| r.definition), Some(name))
        }
        MethodRef::Dynamic { name } => {
            let member = match name {
                DynamicName::Literal { value } => format!("{}{}", receiver, naming::js_name(value.trim())),
                DynamicName::Field { chain } => format!(
                    "{}[{}.get().toLowerCase()]",
                    receiver.trim_end_matches('.'),
                    render_chain(t, chain, Access::Read)?
                ),
            };
            guard(t, GuardKind::Method, &member)?;
            (member, None, None)
        }
    };

    let parameters = match anchor {
        Some(anchor) => render_parameters(t, &call.parameters, definition, anchor)?,
        None => render_unresolved_parameters(t, &call.parameters)?,
    };
    Ok(format!("await {}({})", member, parameters))
}

/// Statement form: a RECEIVING parameter turns the call into an assignment.
pub fn render_call_statement(t: &mut Traversal<'_>, call: &MethodCallChain) -> Result<String> {
    let rendered = render_call(t, call)?;
    match &call.parameters.receiving {
        Some(receiving) => Ok(format!("{}.set({});", render_target(t, &receiving.target)?, rendered)),
        None => Ok(format!("{};", rendered)),
    }
}

fn render_parameters(
    t: &mut Traversal<'_>,
    parameters: &CallParameters,
    definition: Option<&MethodDefinition>,
    anchor: &Token,
) -> Result<String> {
    if let Some(single) = &parameters.single {
        let value = render_source(t, single)?;
        return match definition.and_then(MethodDefinition::default_importing) {
            Some(parameter) => Ok(format!("{{{}: {}}}", parameter.name.to_lowercase(), value)),
            None => {
                t.warn(
                    format!("no default importing parameter known for {}", anchor.str()),
                    Some(anchor.start),
                );
                Ok(value)
            }
        };
    }
    render_named_parameters(t, parameters)
}

fn render_unresolved_parameters(t: &mut Traversal<'_>, parameters: &CallParameters) -> Result<String> {
    match &parameters.single {
        Some(single) => render_source(t, single),
        None => render_named_parameters(t, parameters),
    }
}

fn render_named_parameters(t: &mut Traversal<'_>, parameters: &CallParameters) -> Result<String> {
    let mut parts = Vec::new();
    for binding in &parameters.exporting {
        parts.push(format!("{}: {}", binding.name.lower(), render_source(t, &binding.value)?));
    }
    for binding in parameters.importing.iter().chain(&parameters.changing) {
        parts.push(format!("{}: {}", binding.name.lower(), render_target(t, &binding.target)?));
    }
    if parts.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!("{{{}}}", parts.join(", ")))
    }
}
