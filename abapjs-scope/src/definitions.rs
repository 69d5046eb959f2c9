//! Class and interface definitions produced by semantic analysis

use abapjs_syntax::AbapType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub name: String,
    #[serde(default)]
    pub global: bool,
    /// File the definition was read from.
    pub file: String,
    #[serde(default)]
    pub super_class: Option<String>,
    #[serde(default)]
    pub implementing: Vec<String>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub aliases: Vec<Alias>,
    #[serde(default)]
    pub methods: Vec<MethodDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDefinition {
    pub name: String,
    #[serde(default)]
    pub global: bool,
    pub file: String,
    #[serde(default)]
    pub implementing: Vec<String>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub aliases: Vec<Alias>,
    #[serde(default)]
    pub methods: Vec<MethodDefinition>,
}

/// Attributes partitioned the way the runtime initialises them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(default)]
    pub instance: Vec<Attribute>,
    #[serde(default)]
    pub statics: Vec<Attribute>,
    #[serde(default)]
    pub constants: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: AbapType,
    #[serde(default)]
    pub value: Option<AttributeValue>,
}

/// Initial value of a static attribute or constant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Literal text as written, e.g. `'X'` or `42`.
    Scalar(String),
    /// `BEGIN OF` constant, one value per component in declaration order.
    Structured(Vec<StructuredValue>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredValue {
    pub name: String,
    pub value: AttributeValue,
}

/// `ALIASES name FOR intf~member`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub name: String,
    pub component: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDefinition {
    pub name: String,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub parameters: Vec<MethodParameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodParameter {
    pub name: String,
    pub direction: ParameterDirection,
    #[serde(rename = "type")]
    pub ty: AbapType,
    #[serde(default)]
    pub optional: bool,
    /// `PREFERRED PARAMETER`
    #[serde(default)]
    pub preferred: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterDirection {
    Importing,
    Exporting,
    Changing,
    Returning,
}

impl Attribute {
    pub fn new(name: impl Into<String>, ty: AbapType) -> Self {
        Attribute {
            name: name.into(),
            ty,
            value: None,
        }
    }

    pub fn with_value(mut self, value: AttributeValue) -> Self {
        self.value = Some(value);
        self
    }
}

impl Attributes {
    pub fn all(&self) -> impl Iterator<Item = &Attribute> {
        self.instance.iter().chain(self.statics.iter()).chain(self.constants.iter())
    }

    pub fn is_static(&self, name: &str) -> bool {
        self.statics
            .iter()
            .chain(self.constants.iter())
            .any(|a| a.name.eq_ignore_ascii_case(name))
    }
}

impl MethodDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        MethodDefinition {
            name: name.into(),
            is_static: false,
            parameters: Vec::new(),
        }
    }

    pub fn returning(&self) -> Option<&MethodParameter> {
        self.parameters
            .iter()
            .find(|p| p.direction == ParameterDirection::Returning)
    }

    /// Parameter receiving an unnamed actual parameter, `method( value )`.
    pub fn default_importing(&self) -> Option<&MethodParameter> {
        let importing: Vec<&MethodParameter> = self
            .parameters
            .iter()
            .filter(|p| p.direction == ParameterDirection::Importing)
            .collect();

        if let Some(preferred) = importing.iter().find(|p| p.preferred) {
            return Some(*preferred);
        }
        if importing.len() == 1 {
            return importing.first().copied();
        }
        let mandatory: Vec<&&MethodParameter> = importing.iter().filter(|p| !p.optional).collect();
        if mandatory.len() == 1 {
            return mandatory.first().map(|p| **p);
        }
        None
    }
}

fn find_method<'a>(methods: &'a [MethodDefinition], name: &str) -> Option<&'a MethodDefinition> {
    methods.iter().find(|m| m.name.eq_ignore_ascii_case(name))
}

impl ClassDefinition {
    pub fn new(name: impl Into<String>, file: impl Into<String>) -> Self {
        ClassDefinition {
            name: name.into(),
            global: false,
            file: file.into(),
            super_class: None,
            implementing: Vec::new(),
            attributes: Attributes::default(),
            aliases: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn method(&self, name: &str) -> Option<&MethodDefinition> {
        find_method(&self.methods, name)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.method(name).is_some()
    }
}

impl InterfaceDefinition {
    pub fn new(name: impl Into<String>, file: impl Into<String>) -> Self {
        InterfaceDefinition {
            name: name.into(),
            global: false,
            file: file.into(),
            implementing: Vec::new(),
            attributes: Attributes::default(),
            aliases: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn method(&self, name: &str) -> Option<&MethodDefinition> {
        find_method(&self.methods, name)
    }
}
