//! Scope graph accessor
//!
//! Answers the questions generators ask about a token: which scope it sits
//! in, what its name is bound to, which method a call resolved to. Position
//! lookups go through a single-slot cache that only remembers leaf scopes,
//! since a non-leaf scope's coverage also contains its children.

use crate::error::{Result, TranspileError};
use abapjs_scope::{
    ClassDefinition, IdentifierMeta, InterfaceDefinition, MethodDefinition, ObjectRef, ObjectType, OwnerKind,
    ReferenceKind, Registry, Resolved, ScopeGraph, ScopeId, ScopeKind, Variable,
};
use abapjs_syntax::{Position, Span, Token};
use tracing::trace;

/// What a plain name is bound to, in precedence order of [`ScopeAccessor::resolve`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Local variable, parameter, or a name the analyzer left unbound.
    Local,
    /// Static attribute of the class implementation `owner`.
    StaticAttribute { owner: String },
    Super,
    /// Attribute of the current instance, including `me`.
    InstanceAttribute,
    Builtin,
    /// Attribute declared by the global interface `owner`.
    InterfaceAttribute { owner: String },
    /// Static attribute declared by another global class.
    ForeignAttribute { owner: String },
}

/// Resolved method and the name it is emitted under
#[derive(Debug, Clone, PartialEq)]
pub struct MethodReference<'a> {
    pub definition: &'a MethodDefinition,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct EnclosingMethod<'a> {
    pub scope: ScopeId,
    /// Name as implemented, e.g. `run` or `zif_foo~run`.
    pub name: String,
    pub definition: Option<&'a MethodDefinition>,
}

impl EnclosingMethod<'_> {
    pub fn is_constructor(&self) -> bool {
        self.name.eq_ignore_ascii_case("constructor")
    }
}

#[derive(Debug, Clone)]
struct CacheSlot {
    file: String,
    coverage: Span,
    node: ScopeId,
}

pub struct ScopeAccessor<'a> {
    graph: &'a ScopeGraph,
    registry: &'a Registry,
    file: &'a str,
    object: &'a ObjectRef,
    cache: Option<CacheSlot>,
}

const DATA_REFERENCES: &[ReferenceKind] = &[ReferenceKind::DataRead, ReferenceKind::DataWrite];
const METHOD_REFERENCES: &[ReferenceKind] = &[ReferenceKind::MethodCall, ReferenceKind::BuiltinMethodCall];

impl<'a> ScopeAccessor<'a> {
    pub fn new(graph: &'a ScopeGraph, registry: &'a Registry, file: &'a str, object: &'a ObjectRef) -> Self {
        ScopeAccessor {
            graph,
            registry,
            file,
            object,
            cache: None,
        }
    }

    pub fn graph(&self) -> &'a ScopeGraph {
        self.graph
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn file(&self) -> &'a str {
        self.file
    }

    pub fn object(&self) -> &'a ObjectRef {
        self.object
    }

    /// Currently cached scope, if any.
    pub fn cached(&self) -> Option<ScopeId> {
        self.cache.as_ref().map(|slot| slot.node)
    }

    /// Innermost scope of the unit's file containing `position`.
    pub fn lookup(&mut self, position: Position) -> Option<ScopeId> {
        if let Some(slot) = &self.cache {
            if slot.file == self.file && slot.coverage.contains(position) {
                trace!("scope cache hit at {}", position);
                return Some(slot.node);
            }
        }

        let found = self.graph.lookup_position(position, self.file);
        self.cache = match found {
            Some(id) if self.graph.node(id).is_leaf() => Some(CacheSlot {
                file: self.file.to_string(),
                coverage: self.graph.node(id).coverage,
                node: id,
            }),
            _ => None,
        };
        found
    }

    /// Like [`ScopeAccessor::lookup`], but a missing scope is an error.
    pub fn scope_at(&mut self, position: Position, context: &str) -> Result<ScopeId> {
        self.lookup(position)
            .ok_or_else(|| TranspileError::scope_not_found(context, self.file, position))
    }

    pub fn resolve(&mut self, token: &Token) -> Result<Resolution> {
        let scope = self.scope_at(token.start, "resolve")?;
        let name = token.str();

        let found = self.graph.find_scope_for_variable(scope, name);
        let variable = self.graph.find_variable(scope, name);

        if variable.map_or(true, |v| v.has_meta(IdentifierMeta::Static)) && !name.contains('~') {
            if let Some(foreign) = self.foreign_resolution(scope, token) {
                return Ok(foreign);
            }
        }

        if let (Some(found), Some(variable)) = (found, variable) {
            let node = self.graph.node(found);
            if variable.has_meta(IdentifierMeta::Static) && node.kind == ScopeKind::ClassImplementation {
                return Ok(Resolution::StaticAttribute {
                    owner: node.name.to_lowercase(),
                });
            }
        }

        if name.eq_ignore_ascii_case("super") {
            return Ok(Resolution::Super);
        }
        if name.eq_ignore_ascii_case("me") {
            return Ok(Resolution::InstanceAttribute);
        }

        if let Some(found) = found {
            match self.graph.node(found).kind {
                ScopeKind::MethodInstance | ScopeKind::ClassImplementation => return Ok(Resolution::InstanceAttribute),
                ScopeKind::BuiltIn => return Ok(Resolution::Builtin),
                _ => {}
            }
        }

        Ok(Resolution::Local)
    }

    /// Binding through a data reference into a file owned by another object.
    fn foreign_resolution(&self, scope: ScopeId, token: &Token) -> Option<Resolution> {
        let reference = self.graph.node(scope).reference_at(token.start, DATA_REFERENCES)?;
        let file = match reference.resolved.as_ref()? {
            Resolved::Variable { file, .. } => file,
            Resolved::Method { .. } => return None,
        };
        if file == self.file {
            return None;
        }
        let object = self.registry.object_for_file(file)?;
        if object == self.object {
            return None;
        }
        let owner = object.name.to_lowercase();
        Some(match object.object_type {
            ObjectType::Intf => Resolution::InterfaceAttribute { owner },
            _ => Resolution::ForeignAttribute { owner },
        })
    }

    /// Owning interface when the token reads or writes an interface attribute.
    pub fn interface_attribute(&mut self, token: &Token) -> Option<String> {
        let scope = self.lookup(token.start)?;
        let reference = self.graph.node(scope).reference_at(token.start, DATA_REFERENCES)?;
        let (file, position) = match reference.resolved.as_ref()? {
            Resolved::Variable { file, position, .. } => (file.clone(), *position),
            Resolved::Method { .. } => return None,
        };

        if file == self.file {
            if let Some(definition_scope) = self.lookup(position) {
                let node = self.graph.node(definition_scope);
                if node.kind == ScopeKind::Interface {
                    return Some(node.name.to_lowercase());
                }
            }
        }

        let object = self.registry.object_for_file(&file)?;
        (object.object_type == ObjectType::Intf).then(|| object.name.to_lowercase())
    }

    pub fn find_method_reference(&mut self, token: &Token) -> Option<MethodReference<'a>> {
        let scope = self.lookup(token.start)?;
        let graph = self.graph;
        let reference = graph.node(scope).reference_at(token.start, METHOD_REFERENCES)?;
        match reference.resolved.as_ref()? {
            Resolved::Method {
                definition,
                owner,
                owner_kind,
            } => {
                let name = match (reference.kind, owner, owner_kind) {
                    (ReferenceKind::MethodCall, Some(owner), Some(OwnerKind::Interface)) => {
                        crate::naming::interface_member(owner, &definition.name)
                    }
                    _ => crate::naming::js_name(&definition.name),
                };
                Some(MethodReference { definition, name })
            }
            Resolved::Variable { .. } => None,
        }
    }

    pub fn is_builtin_method(&mut self, token: &Token) -> bool {
        match self.lookup(token.start) {
            Some(scope) => self
                .graph
                .node(scope)
                .reference_at(token.start, &[ReferenceKind::BuiltinMethodCall])
                .is_some(),
            None => false,
        }
    }

    pub fn variable(&mut self, token: &Token) -> Option<&'a Variable> {
        let scope = self.lookup(token.start)?;
        self.graph.find_variable(scope, token.str())
    }

    /// Class whose implementation or definition encloses `position`.
    pub fn class_definition_at(&mut self, position: Position) -> Option<&'a ClassDefinition> {
        let scope = self.lookup(position)?;
        let graph = self.graph;
        let owner = graph.ancestors(scope).find(|id| {
            matches!(
                graph.node(*id).kind,
                ScopeKind::ClassImplementation | ScopeKind::ClassDefinition
            )
        })?;
        self.find_class_definition(&graph.node(owner).name, Some(owner))
    }

    pub fn interface_definition_at(&mut self, position: Position) -> Option<&'a InterfaceDefinition> {
        let scope = self.lookup(position)?;
        let graph = self.graph;
        let owner = graph
            .ancestors(scope)
            .find(|id| graph.node(*id).kind == ScopeKind::Interface)?;
        self.find_interface_definition(&graph.node(owner).name, Some(owner))
    }

    /// Local definitions along the scope chain first, then the registry.
    pub fn find_class_definition(&self, name: &str, scope: Option<ScopeId>) -> Option<&'a ClassDefinition> {
        let graph = self.graph;
        scope
            .and_then(|s| graph.find_class_definition(s, name))
            .or_else(|| self.registry.find_class(name))
    }

    pub fn find_interface_definition(&self, name: &str, scope: Option<ScopeId>) -> Option<&'a InterfaceDefinition> {
        let graph = self.graph;
        scope
            .and_then(|s| graph.find_interface_definition(s, name))
            .or_else(|| self.registry.find_interface(name))
    }

    pub fn enclosing_method(&mut self, position: Position) -> Option<EnclosingMethod<'a>> {
        let scope = self.lookup(position)?;
        let graph = self.graph;
        let method_scope = graph.ancestors(scope).find(|id| graph.node(*id).kind == ScopeKind::Method)?;
        let name = graph.node(method_scope).name.clone();

        let definition = match name.split_once('~') {
            Some((interface, method)) => self
                .find_interface_definition(interface, Some(method_scope))
                .and_then(|i| i.method(method)),
            None => self.class_definition_at(position).and_then(|c| c.method(&name)),
        };

        Some(EnclosingMethod {
            scope: method_scope,
            name,
            definition,
        })
    }

    /// Object owning the file a definition was read from.
    pub fn owner_of(&self, file: &str) -> Option<&'a ObjectRef> {
        self.registry.object_for_file(file)
    }
}
