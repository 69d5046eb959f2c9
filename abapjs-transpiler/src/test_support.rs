//! Fixtures shared by the generator tests

use crate::{Result, Transpiler, TranspilerConfig, UnitInput};
use abapjs_scope::{ObjectRef, ObjectType, Registry, ScopeGraph, ScopeId, ScopeKind, Variable};
use abapjs_syntax::{AbapType, Node, Position, Span, Statement, StructureNode, TreeBuilder};

pub const FILE: &str = "zfoo.prog.abap";
const BUILTIN_FILE: &str = "_builtin.abap";

pub fn program_object() -> ObjectRef {
    ObjectRef::new(ObjectType::Prog, "ZFOO")
}

/// Built-in root holding `sy` and `space`, with one program scope of
/// [`FILE`] below it covering rows 1 to 1000.
pub fn program_graph() -> (ScopeGraph, ScopeId) {
    let mut graph = ScopeGraph::new(ScopeKind::BuiltIn, "_builtin", BUILTIN_FILE, Span::rows(1, 1));
    let root = graph.root();

    let mut sy = vec![
        ("subrc", AbapType::integer()),
        ("index", AbapType::integer()),
        ("tabix", AbapType::integer()),
        ("msgid", AbapType::character(20)),
        ("msgno", AbapType::Numc { length: 3 }),
    ];
    for name in ["msgv1", "msgv2", "msgv3", "msgv4"] {
        sy.push((name, AbapType::character(50)));
    }
    let origin = Position::new(1, 1);
    graph.add_variable(root, Variable::new("sy", AbapType::structure(sy), BUILTIN_FILE, origin));
    graph.add_variable(root, Variable::new("space", AbapType::character(1), BUILTIN_FILE, origin));

    let program = graph.add_scope(root, ScopeKind::Program, "ZFOO", FILE, Span::rows(1, 1000));
    (graph, program)
}

pub fn program_registry() -> Registry {
    let mut registry = Registry::new();
    registry.add_file(FILE, program_object());
    registry
}

pub fn unit(root: StructureNode, scopes: ScopeGraph) -> UnitInput {
    UnitInput {
        filename: FILE.to_string(),
        object: program_object(),
        root,
        scopes,
    }
}

/// Prelude and registrations off, indentation on.
pub fn single_config() -> TranspilerConfig {
    TranspilerConfig {
        constants_prelude: false,
        skip_registration: true,
        ..TranspilerConfig::default()
    }
}

/// Output of a unit without the final newline.
pub fn run_unit(unit: &UnitInput, registry: &Registry, config: TranspilerConfig) -> Result<String> {
    let mut transpiler = Transpiler::new(config);
    let output = transpiler.transpile_unit(unit, registry)?;
    Ok(output.js.trim_end().to_string())
}

/// Lower a program whose nodes are laid out by `build`.
pub fn try_program(build: impl FnOnce(&mut TreeBuilder) -> Vec<Node>) -> Result<String> {
    let mut builder = TreeBuilder::new();
    let children = build(&mut builder);
    let root = builder.root(children);
    let (graph, _) = program_graph();
    run_unit(&unit(root, graph), &program_registry(), single_config())
}

pub fn program(build: impl FnOnce(&mut TreeBuilder) -> Vec<Node>) -> String {
    try_program(build).unwrap()
}

/// Lower a program holding one statement.
pub fn try_statement(build: impl FnOnce(&mut TreeBuilder) -> Statement) -> Result<String> {
    try_program(|b| {
        let statement = build(b);
        vec![b.statement(statement)]
    })
}

pub fn statement(build: impl FnOnce(&mut TreeBuilder) -> Statement) -> String {
    try_statement(build).unwrap()
}
