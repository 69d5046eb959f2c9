//! Statement kinds and their operands

use crate::expressions::{Binding, Condition, Constant, DynamicName, FieldChain, MethodCallChain, Source, Target, TargetBinding};
use crate::span::Token;
use crate::types::AbapType;
use serde::{Deserialize, Serialize};

/// Every statement the analyzer can deliver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    // declarations
    Data {
        name: Token,
        #[serde(rename = "type")]
        ty: AbapType,
        #[serde(default)]
        value: Option<Constant>,
    },
    Constants {
        name: Token,
        #[serde(rename = "type")]
        ty: AbapType,
        value: Constant,
    },
    FieldSymbol {
        name: Token,
    },
    /// TYPES, CLASS ... DEFINITION DEFERRED, FUNCTION-POOL, INCLUDE and other
    /// statements without runtime effect.
    Declarative {
        keyword: String,
    },
    Comment {
        text: String,
    },

    // assignment and arithmetic
    Move {
        source: Source,
        target: Target,
    },
    Arithmetic {
        op: ArithmeticStatement,
        source: Source,
        target: Target,
    },
    Clear {
        target: Target,
    },
    Free {
        target: Target,
    },
    MoveCorresponding {
        source: Source,
        target: Target,
    },

    // control flow
    If {
        condition: Condition,
    },
    ElseIf {
        condition: Condition,
    },
    Else,
    EndIf,
    Do {
        #[serde(default)]
        times: Option<Source>,
    },
    EndDo,
    While {
        condition: Condition,
    },
    EndWhile,
    Loop {
        table: Source,
        output: LoopOutput,
        #[serde(default, rename = "where")]
        where_clause: Option<Condition>,
    },
    EndLoop,
    Case {
        source: Source,
    },
    When {
        values: Vec<Source>,
    },
    WhenOthers,
    EndCase,
    Try,
    Catch {
        classes: Vec<Token>,
        #[serde(default)]
        into: Option<Target>,
    },
    EndTry,
    Continue,
    Exit,
    Return,
    Assert {
        condition: Condition,
    },

    // modularization
    ClassImplementation {
        name: Token,
    },
    EndClass,
    Interface {
        name: Token,
    },
    EndInterface,
    Method {
        name: Token,
    },
    EndMethod,
    Form {
        name: Token,
    },
    EndForm,
    Perform {
        name: Token,
    },
    Call {
        call: MethodCallChain,
    },
    CallFunction {
        name: DynamicName,
        #[serde(default)]
        destination: Option<DynamicName>,
        #[serde(default)]
        exporting: Vec<Binding>,
        #[serde(default)]
        importing: Vec<TargetBinding>,
        #[serde(default)]
        changing: Vec<TargetBinding>,
        #[serde(default)]
        tables: Vec<TargetBinding>,
        #[serde(default)]
        exceptions: Vec<String>,
    },
    CallTransformation {
        name: String,
        #[serde(default)]
        options: Vec<Binding>,
        source: TransformationOperand,
        result: TransformationOperand,
    },
    RaiseException {
        raise: Raise,
    },
    Message {
        message: MessageSpec,
        #[serde(default)]
        with: Vec<Source>,
        #[serde(default)]
        into: Option<Target>,
    },

    // objects and references
    CreateObject {
        target: Target,
        #[serde(default)]
        class: Option<ClassSpec>,
        #[serde(default)]
        parameters: Vec<Binding>,
    },
    CreateData {
        target: Target,
        spec: CreateDataSpec,
    },
    Assign {
        source: Source,
        target: Target,
        #[serde(default)]
        casting: bool,
    },
    GetReference {
        source: Source,
        target: Target,
    },

    // character processing
    Concatenate {
        sources: Vec<Source>,
        target: Target,
        #[serde(default)]
        separated_by: Option<Source>,
        #[serde(default)]
        lines: bool,
    },
    Split {
        source: Source,
        at: Source,
        into: SplitInto,
    },
    Replace {
        target: Target,
        #[serde(default)]
        all: bool,
        of: Source,
        with: Source,
    },
    Condense {
        target: Target,
        #[serde(default)]
        no_gaps: bool,
    },
    Find {
        pattern: FindPattern,
        within: Source,
        #[serde(default)]
        first: bool,
        #[serde(default)]
        count: Option<Target>,
        #[serde(default)]
        offset: Option<Target>,
        #[serde(default)]
        length: Option<Target>,
        #[serde(default)]
        submatches: Vec<Target>,
    },
    Shift {
        target: Target,
        #[serde(default)]
        direction: ShiftDirection,
        #[serde(default)]
        mode: ShiftMode,
        #[serde(default)]
        circular: bool,
        #[serde(default)]
        byte_mode: bool,
    },
    Translate {
        target: Target,
        translation: Translation,
    },
    Describe {
        field: Source,
        #[serde(default, rename = "type")]
        type_target: Option<Target>,
        #[serde(default)]
        length: Option<Target>,
        #[serde(default)]
        mode: Option<DescribeMode>,
    },
    SetBit {
        position: Source,
        target: Target,
        #[serde(default)]
        value: Option<Source>,
    },
    GetBit {
        position: Source,
        source: Source,
        target: Target,
    },
    Write {
        source: Source,
        #[serde(default)]
        new_line: bool,
    },

    // internal tables
    Sort {
        target: Target,
        #[serde(default)]
        descending: bool,
        #[serde(default)]
        by: Vec<SortKey>,
    },
    Append {
        source: AppendSource,
        target: Target,
        #[serde(default)]
        assigning: Option<Target>,
    },
    InsertInternal {
        data: InsertData,
        table: Target,
        #[serde(default)]
        index: Option<Source>,
        #[serde(default)]
        assigning: Option<Target>,
    },
    ModifyInternal {
        table: Target,
        #[serde(default)]
        index: Option<Source>,
        #[serde(default)]
        from: Option<Source>,
    },
    DeleteInternal {
        table: Target,
        #[serde(default, rename = "where")]
        where_clause: Option<Condition>,
        #[serde(default)]
        adjacent: bool,
        #[serde(default)]
        index: Option<Source>,
        #[serde(default)]
        from: Option<Source>,
    },
    ReadTable {
        table: Source,
        #[serde(default)]
        index: Option<Source>,
        #[serde(default)]
        into: Option<Target>,
        #[serde(default)]
        reference_into: Option<Target>,
        #[serde(default)]
        assigning: Option<Target>,
        #[serde(default)]
        with_key: Option<Condition>,
        #[serde(default)]
        binary_search: bool,
    },

    // database
    Select {
        target: Target,
        fields: String,
        from: DatabaseTable,
        #[serde(default, rename = "where")]
        where_sql: Option<String>,
        #[serde(default)]
        single: bool,
        #[serde(default)]
        up_to: Option<u32>,
    },
    InsertDatabase {
        table: DatabaseTable,
        values: Source,
    },
    ModifyDatabase {
        table: DatabaseTable,
        from: DatabaseSource,
    },
    UpdateDatabase {
        table: DatabaseTable,
        from: DatabaseSource,
    },
    DeleteDatabase {
        table: DatabaseTable,
        from: DatabaseSource,
    },
    Commit,
    Rollback,

    // kernel services
    Convert {
        conversion: Conversion,
    },
    WaitForPushChannels {
        condition: Condition,
        #[serde(default)]
        seconds: Option<Source>,
    },
    AuthorityCheck {
        object: String,
    },

    /// Recognised by the analyzer but without a lowering.
    Unsupported {
        name: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticStatement {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticStatement {
    pub fn runtime_name(&self) -> &'static str {
        match self {
            ArithmeticStatement::Add => "add",
            ArithmeticStatement::Subtract => "minus",
            ArithmeticStatement::Multiply => "multiply",
            ArithmeticStatement::Divide => "divide",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoopOutput {
    Into { target: Target },
    Assigning { target: Target },
    ReferenceInto { target: Target },
    /// LOOP AT ... TRANSPORTING NO FIELDS
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformationOperand {
    Xml { value: Source },
    Bindings { bindings: Vec<Binding> },
    Dynamic { value: Source },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Raise {
    Type {
        class: Token,
        #[serde(default)]
        exporting: Vec<Binding>,
    },
    Instance {
        source: Source,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageSpec {
    /// `MESSAGE e058(00)`
    Short {
        message_type: String,
        number: String,
        id: String,
    },
    /// `MESSAGE ID x TYPE y NUMBER z`
    Id {
        id: Source,
        message_type: Source,
        number: Source,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassSpec {
    Static { name: Token },
    Dynamic { name: DynamicName },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CreateDataSpec {
    Type {
        #[serde(rename = "type")]
        ty: AbapType,
    },
    Dynamic {
        name: DynamicName,
        #[serde(default)]
        table: bool,
    },
    LikeLineOf {
        source: Source,
    },
    Like {
        source: Source,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitInto {
    Table { target: Target },
    Targets { targets: Vec<Target> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FindPattern {
    Substring { source: Source },
    Regex { source: Source },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftDirection {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShiftMode {
    #[default]
    Single,
    Places { source: Source },
    To { source: Source },
    DeletingLeading { source: Source },
    DeletingTrailing { source: Source },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Translation {
    Upper,
    Lower,
    Using { mask: Source },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescribeMode {
    Character,
    Byte,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub component: String,
    #[serde(default)]
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppendSource {
    Value { source: Source },
    LinesOf { source: Source },
    InitialLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InsertData {
    Value { source: Source },
    InitialLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatabaseTable {
    Named { name: String },
    Dynamic { chain: FieldChain },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatabaseSource {
    Row { source: Source },
    Table { source: Source },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conversion {
    ToStamp {
        date: Source,
        #[serde(default)]
        time: Option<Source>,
        #[serde(default)]
        zone: Option<Source>,
        stamp: Target,
    },
    FromStamp {
        stamp: Source,
        #[serde(default)]
        zone: Option<Source>,
        #[serde(default)]
        date: Option<Target>,
        #[serde(default)]
        time: Option<Target>,
    },
}

impl Statement {
    /// Name used in logs and diagnostics.
    pub fn name(&self) -> &str {
        match self {
            Statement::Data { .. } => "Data",
            Statement::Constants { .. } => "Constants",
            Statement::FieldSymbol { .. } => "FieldSymbol",
            Statement::Declarative { keyword } => keyword.as_str(),
            Statement::Comment { .. } => "Comment",
            Statement::Move { .. } => "Move",
            Statement::Arithmetic { .. } => "Arithmetic",
            Statement::Clear { .. } => "Clear",
            Statement::Free { .. } => "Free",
            Statement::MoveCorresponding { .. } => "MoveCorresponding",
            Statement::If { .. } => "If",
            Statement::ElseIf { .. } => "ElseIf",
            Statement::Else => "Else",
            Statement::EndIf => "EndIf",
            Statement::Do { .. } => "Do",
            Statement::EndDo => "EndDo",
            Statement::While { .. } => "While",
            Statement::EndWhile => "EndWhile",
            Statement::Loop { .. } => "Loop",
            Statement::EndLoop => "EndLoop",
            Statement::Case { .. } => "Case",
            Statement::When { .. } => "When",
            Statement::WhenOthers => "WhenOthers",
            Statement::EndCase => "EndCase",
            Statement::Try => "Try",
            Statement::Catch { .. } => "Catch",
            Statement::EndTry => "EndTry",
            Statement::Continue => "Continue",
            Statement::Exit => "Exit",
            Statement::Return => "Return",
            Statement::Assert { .. } => "Assert",
            Statement::ClassImplementation { .. } => "ClassImplementation",
            Statement::EndClass => "EndClass",
            Statement::Interface { .. } => "Interface",
            Statement::EndInterface => "EndInterface",
            Statement::Method { .. } => "Method",
            Statement::EndMethod => "EndMethod",
            Statement::Form { .. } => "Form",
            Statement::EndForm => "EndForm",
            Statement::Perform { .. } => "Perform",
            Statement::Call { .. } => "Call",
            Statement::CallFunction { .. } => "CallFunction",
            Statement::CallTransformation { .. } => "CallTransformation",
            Statement::RaiseException { .. } => "RaiseException",
            Statement::Message { .. } => "Message",
            Statement::CreateObject { .. } => "CreateObject",
            Statement::CreateData { .. } => "CreateData",
            Statement::Assign { .. } => "Assign",
            Statement::GetReference { .. } => "GetReference",
            Statement::Concatenate { .. } => "Concatenate",
            Statement::Split { .. } => "Split",
            Statement::Replace { .. } => "Replace",
            Statement::Condense { .. } => "Condense",
            Statement::Find { .. } => "Find",
            Statement::Shift { .. } => "Shift",
            Statement::Translate { .. } => "Translate",
            Statement::Describe { .. } => "Describe",
            Statement::SetBit { .. } => "SetBit",
            Statement::GetBit { .. } => "GetBit",
            Statement::Write { .. } => "Write",
            Statement::Sort { .. } => "Sort",
            Statement::Append { .. } => "Append",
            Statement::InsertInternal { .. } => "InsertInternal",
            Statement::ModifyInternal { .. } => "ModifyInternal",
            Statement::DeleteInternal { .. } => "DeleteInternal",
            Statement::ReadTable { .. } => "ReadTable",
            Statement::Select { .. } => "Select",
            Statement::InsertDatabase { .. } => "InsertDatabase",
            Statement::ModifyDatabase { .. } => "ModifyDatabase",
            Statement::UpdateDatabase { .. } => "UpdateDatabase",
            Statement::DeleteDatabase { .. } => "DeleteDatabase",
            Statement::Commit => "Commit",
            Statement::Rollback => "Rollback",
            Statement::Convert { .. } => "Convert",
            Statement::WaitForPushChannels { .. } => "WaitForPushChannels",
            Statement::AuthorityCheck { .. } => "AuthorityCheck",
            Statement::Unsupported { name } => name.as_str(),
        }
    }
}
