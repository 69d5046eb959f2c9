//! Dispatch engine
//!
//! One [`Traversal`] walks one unit. Structures with a dedicated generator
//! go to it, other structures are walked child by child, and statements go
//! through the exhaustive statement dispatch. The engine, not the
//! generators, terminates every statement with a newline.

use crate::accessor::{Resolution, ScopeAccessor};
use crate::chunk::Chunk;
use crate::config::TranspilerConfig;
use crate::error::Result;
use crate::naming;
use crate::unique::UniqueNames;
use crate::{statements, structures, types, Severity, TranspileDiagnostic, UnitInput};
use abapjs_scope::Registry;
use abapjs_syntax::{AbapType, Node, Position, StatementNode, StructureKind, StructureNode, Token};
use std::collections::BTreeSet;
use tracing::{debug, trace, warn};

/// What a finished walk leaves behind besides the code itself
#[derive(Debug, Default)]
pub struct TraversalOutput {
    /// Integer literals used as operands, for the `constant_N` prelude.
    pub constants: BTreeSet<i64>,
    /// `abap.Classes[...] = ...;` lines in definition order.
    pub registrations: Vec<String>,
    pub diagnostics: Vec<TranspileDiagnostic>,
    pub statements: usize,
}

pub struct Traversal<'a> {
    accessor: ScopeAccessor<'a>,
    config: &'a TranspilerConfig,
    unique: &'a mut UniqueNames,
    hoisted: Vec<String>,
    output: TraversalOutput,
}

impl<'a> Traversal<'a> {
    pub fn new(
        unit: &'a UnitInput,
        registry: &'a Registry,
        config: &'a TranspilerConfig,
        unique: &'a mut UniqueNames,
    ) -> Self {
        Traversal {
            accessor: ScopeAccessor::new(&unit.scopes, registry, &unit.filename, &unit.object),
            config,
            unique,
            hoisted: Vec::new(),
            output: TraversalOutput::default(),
        }
    }

    pub fn accessor(&mut self) -> &mut ScopeAccessor<'a> {
        &mut self.accessor
    }

    pub fn config(&self) -> &'a TranspilerConfig {
        self.config
    }

    pub fn filename(&self) -> &'a str {
        self.accessor.file()
    }

    pub fn unique_name(&mut self) -> String {
        self.unique.next()
    }

    /// Operand name for an integer literal, remembered for the prelude.
    pub fn integer(&mut self, value: i64) -> String {
        self.output.constants.insert(value);
        naming::integer_constant(value)
    }

    /// Queue a line to be emitted ahead of the statement being generated.
    pub fn hoist(&mut self, line: String) {
        self.hoisted.push(line);
    }

    /// Hoisted lines so far, each newline terminated.
    pub fn take_hoisted(&mut self) -> String {
        let mut out = String::new();
        for line in self.hoisted.drain(..) {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// Fold hoisted lines into `condition` as a leading comma operand, so
    /// they run every time the condition is evaluated.
    pub fn guarded_condition(&mut self, condition: String) -> String {
        if self.hoisted.is_empty() {
            return condition;
        }
        let guards: Vec<String> = self.hoisted.drain(..).collect();
        format!("(() => {{ {} }})(), {}", guards.join(" "), condition)
    }

    pub fn register(&mut self, line: String) {
        if !self.output.registrations.contains(&line) {
            self.output.registrations.push(line);
        }
    }

    pub fn warn(&mut self, message: impl Into<String>, position: Option<Position>) {
        let message = message.into();
        warn!("{}: {}", self.filename(), message);
        self.output.diagnostics.push(TranspileDiagnostic {
            severity: Severity::Warning,
            message,
            position,
        });
    }

    pub fn render_type(&self, ty: &AbapType) -> Result<String> {
        types::render_type(ty, self.config.runtime_type_errors())
    }

    /// Emitted spelling of a plain name, qualified by what it resolves to.
    pub fn prefix_and_name(&mut self, token: &Token) -> Result<String> {
        let name = naming::js_name(token.str());
        let resolved = match self.accessor.resolve(token)? {
            Resolution::Local => name,
            Resolution::StaticAttribute { owner } => format!("{}.{}", owner, name),
            Resolution::Super => "super".to_string(),
            Resolution::InstanceAttribute => format!("this.{}", name),
            Resolution::Builtin => format!("abap.builtin.{}", name),
            Resolution::InterfaceAttribute { owner } => {
                let lookup = self.lookup_class(&owner, token.start);
                format!("{}.{}", lookup, naming::interface_member(&owner, token.str()))
            }
            Resolution::ForeignAttribute { owner } => {
                format!("{}.{}", self.lookup_class(&owner, token.start), name)
            }
        };
        Ok(resolved)
    }

    /// Runtime expression addressing class or interface `name` as seen from
    /// `position`. Names without a local definition are taken as global.
    pub fn lookup_class(&mut self, name: &str, position: Position) -> String {
        let scope = self.accessor.lookup(position);
        let graph = self.accessor.graph();
        let local = scope.and_then(|s| {
            graph
                .find_class_definition(s, name)
                .map(|c| (c.global, c.name.clone(), c.file.clone()))
                .or_else(|| {
                    graph
                        .find_interface_definition(s, name)
                        .map(|i| (i.global, i.name.clone(), i.file.clone()))
                })
        });

        let key = match local {
            Some((false, def_name, file)) => naming::local_key(self.accessor.owner_of(&file), &def_name),
            Some((true, def_name, _)) => naming::global_key(&def_name),
            None => naming::global_key(name),
        };
        naming::class_lookup(&key)
    }

    /// Registry key for a definition; local ones carry their owning object.
    pub fn definition_key(&self, name: &str, global: bool, file: &str) -> String {
        if global {
            naming::global_key(name)
        } else {
            naming::local_key(self.accessor.owner_of(file), name)
        }
    }

    pub fn traverse(&mut self, node: &Node) -> Result<Chunk> {
        match node {
            Node::Structure(structure) => self.traverse_structure(structure),
            Node::Statement(statement) => self.traverse_statement(statement),
        }
    }

    pub fn traverse_structure(&mut self, node: &StructureNode) -> Result<Chunk> {
        match node.kind {
            StructureKind::ClassDefinition => Ok(Chunk::new()),
            StructureKind::ClassImplementation => structures::class_implementation::transpile(self, node),
            StructureKind::Interface => structures::interface::transpile(self, node),
            StructureKind::Case => structures::case::transpile(self, node),
            StructureKind::Try => structures::try_catch::transpile(self, node),
            _ => self.traverse_children(node),
        }
    }

    pub fn traverse_children(&mut self, node: &StructureNode) -> Result<Chunk> {
        let mut chunk = Chunk::new();
        for child in &node.children {
            chunk.push_chunk(self.traverse(child)?);
        }
        Ok(chunk)
    }

    pub fn traverse_statement(&mut self, node: &StatementNode) -> Result<Chunk> {
        trace!("statement {} at {}", node.statement.name(), node.span.start);
        self.output.statements += 1;

        let code = statements::transpile(self, node)?;
        let mut chunk = Chunk::new();
        let hoisted = self.take_hoisted();
        chunk.push_at(hoisted, node.span.start);
        chunk.push_at(code, node.span.start);
        chunk.push("\n");
        Ok(chunk)
    }

    /// Walk the unit root.
    pub fn run(&mut self, root: &StructureNode) -> Result<Chunk> {
        debug!("walking {}", self.filename());
        self.traverse_children(root)
    }

    pub fn finish(self) -> TraversalOutput {
        self.output
    }
}
