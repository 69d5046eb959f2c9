//! Lexical scope graph
//!
//! Scopes are arena-allocated and addressed by [`ScopeId`]. The root is always
//! `ScopeId(0)`; parent links are plain ids, so the graph is freely shareable
//! and serializable.

use crate::definitions::{ClassDefinition, InterfaceDefinition, MethodDefinition};
use crate::error::{Result, ScopeError};
use abapjs_syntax::{AbapType, Position, Span};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    BuiltIn,
    Global,
    Program,
    FunctionGroup,
    FunctionModule,
    Form,
    ClassDefinition,
    ClassImplementation,
    Interface,
    /// Instance attribute layer between a class implementation and its methods.
    MethodInstance,
    MethodStatic,
    MethodDefinition,
    /// Method body: parameters and locals.
    Method,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierMeta {
    Static,
    ReadOnly,
    MethodImporting,
    MethodExporting,
    MethodChanging,
    MethodReturning,
    InlineDefinition,
}

/// Declared data object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: AbapType,
    #[serde(default)]
    pub meta: Vec<IdentifierMeta>,
    pub file: String,
    pub position: Position,
}

impl Variable {
    pub fn new(name: impl Into<String>, ty: AbapType, file: impl Into<String>, position: Position) -> Self {
        Variable {
            name: name.into(),
            ty,
            meta: Vec::new(),
            file: file.into(),
            position,
        }
    }

    pub fn with_meta(mut self, meta: IdentifierMeta) -> Self {
        self.meta.push(meta);
        self
    }

    pub fn has_meta(&self, meta: IdentifierMeta) -> bool {
        self.meta.contains(&meta)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    DataRead,
    DataWrite,
    MethodCall,
    BuiltinMethodCall,
}

/// Owner of a resolved method, as seen from the call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerKind {
    Class,
    Interface,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolved {
    /// Definition site of a data object.
    Variable {
        name: String,
        file: String,
        position: Position,
    },
    Method {
        definition: MethodDefinition,
        #[serde(default)]
        owner: Option<String>,
        #[serde(default)]
        owner_kind: Option<OwnerKind>,
    },
}

/// Binding of a token start position to what it refers to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub kind: ReferenceKind,
    pub position: Position,
    #[serde(default)]
    pub resolved: Option<Resolved>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeNode {
    pub kind: ScopeKind,
    pub name: String,
    pub file: String,
    pub coverage: Span,
    #[serde(default)]
    pub parent: Option<ScopeId>,
    #[serde(default)]
    pub children: Vec<ScopeId>,
    /// Keyed by lower case name.
    #[serde(default)]
    pub vars: BTreeMap<String, Variable>,
    /// Local class definitions, keyed by lower case name.
    #[serde(default)]
    pub classes: BTreeMap<String, ClassDefinition>,
    #[serde(default)]
    pub interfaces: BTreeMap<String, InterfaceDefinition>,
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl ScopeNode {
    fn new(kind: ScopeKind, name: &str, file: &str, coverage: Span, parent: Option<ScopeId>) -> Self {
        ScopeNode {
            kind,
            name: name.to_string(),
            file: file.to_string(),
            coverage,
            parent,
            children: Vec::new(),
            vars: BTreeMap::new(),
            classes: BTreeMap::new(),
            interfaces: BTreeMap::new(),
            references: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Reference starting exactly at `position`.
    pub fn reference_at(&self, position: Position, kinds: &[ReferenceKind]) -> Option<&Reference> {
        self.references
            .iter()
            .find(|r| r.position == position && kinds.contains(&r.kind))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeGraph {
    nodes: Vec<ScopeNode>,
}

impl ScopeGraph {
    /// Create a graph with a single root scope.
    pub fn new(kind: ScopeKind, name: &str, file: &str, coverage: Span) -> Self {
        ScopeGraph {
            nodes: vec![ScopeNode::new(kind, name, file, coverage, None)],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId::ROOT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check that every id in the graph points at an existing node and that
    /// parent and child links agree. Graphs built through [`ScopeGraph::add_scope`]
    /// are always valid; deserialized ones should be checked once.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(ScopeError::EmptyGraph);
        }
        for (index, node) in self.nodes.iter().enumerate() {
            let id = ScopeId(index as u32);
            for child in &node.children {
                let child_node = self
                    .nodes
                    .get(child.index())
                    .ok_or_else(|| ScopeError::invalid_scope_id(*child, format!("children of {}", id)))?;
                if child_node.parent != Some(id) {
                    return Err(ScopeError::InconsistentParent { child: *child, parent: id });
                }
            }
            if let Some(parent) = node.parent {
                let parent_node = self
                    .nodes
                    .get(parent.index())
                    .ok_or_else(|| ScopeError::invalid_scope_id(parent, format!("parent of {}", id)))?;
                if !parent_node.children.contains(&id) {
                    return Err(ScopeError::InconsistentParent { child: id, parent });
                }
            }
        }
        Ok(())
    }

    pub fn add_scope(&mut self, parent: ScopeId, kind: ScopeKind, name: &str, file: &str, coverage: Span) -> ScopeId {
        let id = ScopeId(self.nodes.len() as u32);
        self.nodes.push(ScopeNode::new(kind, name, file, coverage, Some(parent)));
        self.nodes[parent.index()].children.push(id);
        id
    }

    pub fn node(&self, id: ScopeId) -> &ScopeNode {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: ScopeId) -> &mut ScopeNode {
        &mut self.nodes[id.index()]
    }

    pub fn add_variable(&mut self, scope: ScopeId, variable: Variable) {
        let key = variable.name.to_lowercase();
        self.node_mut(scope).vars.insert(key, variable);
    }

    pub fn add_class(&mut self, scope: ScopeId, definition: ClassDefinition) {
        let key = definition.name.to_lowercase();
        self.node_mut(scope).classes.insert(key, definition);
    }

    pub fn add_interface(&mut self, scope: ScopeId, definition: InterfaceDefinition) {
        let key = definition.name.to_lowercase();
        self.node_mut(scope).interfaces.insert(key, definition);
    }

    pub fn add_reference(&mut self, scope: ScopeId, reference: Reference) {
        self.node_mut(scope).references.push(reference);
    }

    /// Deepest scope of `file` whose coverage contains `position`.
    ///
    /// A node of the same file that does not cover the position prunes its
    /// whole subtree. Nodes belonging to other files are transparent: their
    /// children are still searched.
    pub fn lookup_position(&self, position: Position, file: &str) -> Option<ScopeId> {
        let found = self.lookup_from(ScopeId::ROOT, position, file);
        trace!("lookup_position {} in {} -> {:?}", position, file, found);
        found
    }

    fn lookup_from(&self, id: ScopeId, position: Position, file: &str) -> Option<ScopeId> {
        let node = self.node(id);
        let same_file = node.file == file;
        if same_file && !node.coverage.contains(position) {
            return None;
        }
        for child in &node.children {
            if let Some(found) = self.lookup_from(*child, position, file) {
                return Some(found);
            }
        }
        if same_file {
            Some(id)
        } else {
            None
        }
    }

    /// `scope` followed by every ancestor up to the root.
    pub fn ancestors(&self, scope: ScopeId) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            next: Some(scope),
        }
    }

    /// Closest scope, walking outwards, declaring `name`.
    pub fn find_scope_for_variable(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        let key = name.to_lowercase();
        self.ancestors(scope).find(|id| self.node(*id).vars.contains_key(&key))
    }

    pub fn find_variable(&self, scope: ScopeId, name: &str) -> Option<&Variable> {
        let key = name.to_lowercase();
        self.ancestors(scope).find_map(|id| self.node(id).vars.get(&key))
    }

    pub fn find_class_definition(&self, scope: ScopeId, name: &str) -> Option<&ClassDefinition> {
        let key = name.to_lowercase();
        self.ancestors(scope).find_map(|id| self.node(id).classes.get(&key))
    }

    pub fn find_interface_definition(&self, scope: ScopeId, name: &str) -> Option<&InterfaceDefinition> {
        let key = name.to_lowercase();
        self.ancestors(scope).find_map(|id| self.node(id).interfaces.get(&key))
    }
}

pub struct Ancestors<'a> {
    graph: &'a ScopeGraph,
    next: Option<ScopeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = ScopeId;

    fn next(&mut self) -> Option<ScopeId> {
        let current = self.next?;
        self.next = self.graph.node(current).parent;
        Some(current)
    }
}
