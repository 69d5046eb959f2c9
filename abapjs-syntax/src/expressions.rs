//! Expression nodes hanging off statements

use crate::span::{Span, Token};
use serde::{Deserialize, Serialize};

/// Literal constant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constant {
    Integer { value: i64 },
    /// `'...'`, value is the raw text between the quotes (doubled quotes kept).
    Text { value: String },
    /// `` `...` ``, value is the raw text between the backticks.
    Backtick { value: String },
}

/// Read operand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Source {
    Constant {
        constant: Constant,
    },
    /// `|...{ x }...|`
    Template {
        parts: Vec<TemplatePart>,
    },
    Field {
        chain: FieldChain,
    },
    Call {
        call: Box<MethodCallChain>,
    },
    Builtin {
        call: BuiltinCall,
    },
    Arithmetic {
        left: Box<Source>,
        op: ArithOp,
        right: Box<Source>,
    },
    /// Row component inside a `WHERE` or `WITH KEY` condition.
    Component {
        path: Vec<Token>,
    },
    Unsupported {
        name: String,
        text: String,
        span: Span,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplatePart {
    Text { text: String },
    Embed { source: Source },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithOp {
    Add,
    Minus,
    Multiply,
    Divide,
    Power,
    Div,
    Mod,
    /// `&&`
    Concat,
}

impl ArithOp {
    /// Runtime operator function name.
    pub fn runtime_name(&self) -> &'static str {
        match self {
            ArithOp::Add => "add",
            ArithOp::Minus => "minus",
            ArithOp::Multiply => "multiply",
            ArithOp::Divide => "divide",
            ArithOp::Power => "power",
            ArithOp::Div => "div",
            ArithOp::Mod => "mod",
            ArithOp::Concat => "concat",
        }
    }
}

/// Field access chain such as `ls_foo-bar`, `lo_obj->attr`, `zcl_x=>c_val` or `<fs>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChain {
    pub head: ChainHead,
    #[serde(default)]
    pub segments: Vec<ChainSegment>,
    #[serde(default)]
    pub offset: Option<OffsetValue>,
    #[serde(default)]
    pub length: Option<LengthValue>,
}

/// Write operand. Targets share the chain shape of sources.
pub type Target = FieldChain;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainHead {
    Field { name: Token },
    FieldSymbol { name: Token },
    /// Class name followed by `=>`.
    Class { name: Token },
    /// Functional method call whose result is dereferenced further.
    Call { call: Box<MethodCallChain> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainSegment {
    /// `-name`
    Component { name: Token },
    /// `->name`
    Attribute { name: Token },
    /// `=>name`
    Static { name: Token },
    /// `->*`
    Dereference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OffsetValue {
    Integer { value: u32 },
    Field { chain: Box<FieldChain> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LengthValue {
    Integer { value: u32 },
    Field { chain: Box<FieldChain> },
    /// `(*)`
    Star,
}

/// Logical expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    Compare {
        left: Source,
        op: CompareOp,
        right: Source,
    },
    Predicate {
        operand: Source,
        predicate: Predicate,
        #[serde(default)]
        negated: bool,
    },
    In {
        operand: Source,
        range: Source,
        #[serde(default)]
        negated: bool,
    },
    Not {
        inner: Box<Condition>,
    },
    And {
        items: Vec<Condition>,
    },
    Or {
        items: Vec<Condition>,
    },
    Paren {
        inner: Box<Condition>,
    },
    Unsupported {
        name: String,
        text: String,
        span: Span,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Cp,
    Np,
    Cs,
    Ns,
    Ca,
    Na,
    Co,
    Cn,
}

impl CompareOp {
    pub fn runtime_name(&self) -> &'static str {
        match self {
            CompareOp::Eq => "eq",
            CompareOp::Ne => "ne",
            CompareOp::Lt => "lt",
            CompareOp::Le => "le",
            CompareOp::Gt => "gt",
            CompareOp::Ge => "ge",
            CompareOp::Cp => "cp",
            CompareOp::Np => "np",
            CompareOp::Cs => "cs",
            CompareOp::Ns => "ns",
            CompareOp::Ca => "ca",
            CompareOp::Na => "na",
            CompareOp::Co => "co",
            CompareOp::Cn => "cn",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    Initial,
    Assigned,
    Bound,
    Supplied,
}

impl Predicate {
    pub fn runtime_name(&self) -> &'static str {
        match self {
            Predicate::Initial => "initial",
            Predicate::Assigned => "assigned",
            Predicate::Bound => "bound",
            Predicate::Supplied => "supplied",
        }
    }
}

/// Method invocation, statement form or functional form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCallChain {
    pub receiver: Receiver,
    pub method: MethodRef,
    #[serde(default)]
    pub parameters: CallParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Receiver {
    /// `method( )` on the current instance
    Implicit,
    /// `chain->method( )`
    Instance { chain: FieldChain },
    /// `zcl_x=>method( )`
    Static { class: Token },
    /// `super->method( )`
    Super,
    /// `(name)=>method( )`
    DynamicClass { name: DynamicName },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MethodRef {
    Named { name: Token },
    Dynamic { name: DynamicName },
}

/// Dynamic name in parentheses: a literal or a field evaluated at run time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DynamicName {
    /// Value without the surrounding quotes.
    Literal { value: String },
    Field { chain: FieldChain },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallParameters {
    /// `method( value )` without parameter name
    #[serde(default)]
    pub single: Option<Source>,
    #[serde(default)]
    pub exporting: Vec<Binding>,
    #[serde(default)]
    pub importing: Vec<TargetBinding>,
    #[serde(default)]
    pub changing: Vec<TargetBinding>,
    #[serde(default)]
    pub receiving: Option<TargetBinding>,
    /// Classic exception mapping; has no runtime counterpart.
    #[serde(default)]
    pub exceptions: Vec<String>,
}

impl CallParameters {
    pub fn is_empty(&self) -> bool {
        self.single.is_none()
            && self.exporting.is_empty()
            && self.importing.is_empty()
            && self.changing.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub name: Token,
    pub value: Source,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetBinding {
    pub name: Token,
    pub target: Target,
}

/// Builtin function call such as `lines( tab )`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltinCall {
    pub name: Token,
    #[serde(default)]
    pub single: Option<Box<Source>>,
    #[serde(default)]
    pub parameters: Vec<Binding>,
}

impl FieldChain {
    pub fn field(name: Token) -> Self {
        FieldChain {
            head: ChainHead::Field { name },
            segments: Vec::new(),
            offset: None,
            length: None,
        }
    }

    pub fn field_symbol(name: Token) -> Self {
        FieldChain {
            head: ChainHead::FieldSymbol { name },
            segments: Vec::new(),
            offset: None,
            length: None,
        }
    }

    /// Token that anchors scope lookups for this chain.
    pub fn first_token(&self) -> Option<&Token> {
        match &self.head {
            ChainHead::Field { name } | ChainHead::FieldSymbol { name } | ChainHead::Class { name } => Some(name),
            ChainHead::Call { call } => call.first_token(),
        }
    }

    pub fn ends_with_dereference(&self) -> bool {
        matches!(self.segments.last(), Some(ChainSegment::Dereference))
    }
}

impl MethodCallChain {
    pub fn first_token(&self) -> Option<&Token> {
        match &self.receiver {
            Receiver::Instance { chain } => chain.first_token(),
            Receiver::Static { class } => Some(class),
            _ => match &self.method {
                MethodRef::Named { name } => Some(name),
                MethodRef::Dynamic { name: DynamicName::Field { chain } } => chain.first_token(),
                MethodRef::Dynamic { .. } => None,
            },
        }
    }
}

impl Source {
    pub fn constant(constant: Constant) -> Self {
        Source::Constant { constant }
    }

    pub fn int(value: i64) -> Self {
        Source::Constant {
            constant: Constant::Integer { value },
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Source::Constant {
            constant: Constant::Text { value: value.into() },
        }
    }

    pub fn chain(chain: FieldChain) -> Self {
        Source::Field { chain }
    }

    pub fn call(call: MethodCallChain) -> Self {
        Source::Call { call: Box::new(call) }
    }

    /// First token with a position, used to anchor scope lookups.
    pub fn first_token(&self) -> Option<&Token> {
        match self {
            Source::Field { chain } => chain.first_token(),
            Source::Call { call } => call.first_token(),
            Source::Builtin { call } => Some(&call.name),
            Source::Arithmetic { left, right, .. } => left.first_token().or_else(|| right.first_token()),
            Source::Component { path } => path.first(),
            Source::Template { parts } => parts.iter().find_map(|p| match p {
                TemplatePart::Embed { source } => source.first_token(),
                TemplatePart::Text { .. } => None,
            }),
            Source::Constant { .. } | Source::Unsupported { .. } => None,
        }
    }
}
