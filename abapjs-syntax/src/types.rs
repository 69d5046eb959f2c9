//! Resolved ABAP data types as delivered by the analyzer

use serde::{Deserialize, Serialize};

/// A data type after semantic analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AbapType {
    Integer {
        #[serde(default)]
        qualified_name: Option<String>,
    },
    Character {
        length: u32,
        #[serde(default)]
        qualified_name: Option<String>,
    },
    String {
        #[serde(default)]
        qualified_name: Option<String>,
    },
    XString,
    Hex {
        length: u32,
    },
    Packed {
        length: u32,
        decimals: u32,
    },
    Float,
    Date,
    Time,
    Numc {
        length: u32,
    },
    Structure {
        components: Vec<Component>,
        #[serde(default)]
        qualified_name: Option<String>,
    },
    Table {
        row: Box<AbapType>,
        options: TableOptions,
    },
    DataReference {
        target: Box<AbapType>,
    },
    ObjectReference {
        #[serde(default)]
        class: Option<String>,
    },
    /// Generic type such as `ANY` or `DATA`, only valid for field symbols and parameters.
    Generic {
        name: String,
    },
    /// The analyzer could not resolve the type.
    Unknown {
        name: String,
        reason: String,
    },
}

/// Named component of a structured type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: AbapType,
}

/// Internal table options, serialized in the shape the runtime expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    pub with_header: bool,
    #[serde(rename = "type")]
    pub table_kind: TableKind,
    pub is_unique: bool,
    pub key_fields: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TableKind {
    Standard,
    Sorted,
    Hashed,
    Any,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            with_header: false,
            table_kind: TableKind::Standard,
            is_unique: false,
            key_fields: Vec::new(),
        }
    }
}

impl AbapType {
    pub fn integer() -> Self {
        AbapType::Integer { qualified_name: None }
    }

    pub fn character(length: u32) -> Self {
        AbapType::Character {
            length,
            qualified_name: None,
        }
    }

    pub fn string() -> Self {
        AbapType::String { qualified_name: None }
    }

    pub fn packed(length: u32, decimals: u32) -> Self {
        AbapType::Packed { length, decimals }
    }

    pub fn standard_table(row: AbapType) -> Self {
        AbapType::Table {
            row: Box::new(row),
            options: TableOptions::default(),
        }
    }

    pub fn data_reference(target: AbapType) -> Self {
        AbapType::DataReference {
            target: Box::new(target),
        }
    }

    pub fn object_reference(class: impl Into<String>) -> Self {
        AbapType::ObjectReference {
            class: Some(class.into()),
        }
    }

    pub fn structure(components: Vec<(&str, AbapType)>) -> Self {
        AbapType::Structure {
            components: components
                .into_iter()
                .map(|(name, ty)| Component {
                    name: name.to_string(),
                    ty,
                })
                .collect(),
            qualified_name: None,
        }
    }

    /// `abap_bool` style qualified one-character flag.
    pub fn qualified_character(length: u32, name: impl Into<String>) -> Self {
        AbapType::Character {
            length,
            qualified_name: Some(name.into()),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, AbapType::Unknown { .. })
    }
}
