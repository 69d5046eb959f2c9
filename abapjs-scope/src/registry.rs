//! Global object registry: repository classes, interfaces and file ownership

use crate::definitions::{ClassDefinition, InterfaceDefinition};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ObjectType {
    Clas,
    Intf,
    Prog,
    Fugr,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Clas => "CLAS",
            ObjectType::Intf => "INTF",
            ObjectType::Prog => "PROG",
            ObjectType::Fugr => "FUGR",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository object owning one or more files
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    #[serde(rename = "type")]
    pub object_type: ObjectType,
    pub name: String,
}

impl ObjectRef {
    pub fn new(object_type: ObjectType, name: impl Into<String>) -> Self {
        ObjectRef {
            object_type,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    /// Global classes keyed by upper case name.
    #[serde(default)]
    classes: BTreeMap<String, ClassDefinition>,
    #[serde(default)]
    interfaces: BTreeMap<String, InterfaceDefinition>,
    /// File name to owning object.
    #[serde(default)]
    files: BTreeMap<String, ObjectRef>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, definition: ClassDefinition) {
        self.classes.insert(definition.name.to_uppercase(), definition);
    }

    pub fn add_interface(&mut self, definition: InterfaceDefinition) {
        self.interfaces.insert(definition.name.to_uppercase(), definition);
    }

    pub fn add_file(&mut self, filename: impl Into<String>, object: ObjectRef) {
        self.files.insert(filename.into(), object);
    }

    pub fn find_class(&self, name: &str) -> Option<&ClassDefinition> {
        self.classes.get(&name.to_uppercase())
    }

    pub fn find_interface(&self, name: &str) -> Option<&InterfaceDefinition> {
        self.interfaces.get(&name.to_uppercase())
    }

    /// Whether a class or interface of that name is known globally.
    pub fn contains(&self, name: &str) -> bool {
        let key = name.to_uppercase();
        self.classes.contains_key(&key) || self.interfaces.contains_key(&key)
    }

    pub fn object_for_file(&self, filename: &str) -> Option<&ObjectRef> {
        self.files.get(filename)
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn interface_count(&self) -> usize {
        self.interfaces.len()
    }

    /// Take over every entry of `other`; its entries win on conflicts.
    pub fn merge(&mut self, other: Registry) {
        self.classes.extend(other.classes);
        self.interfaces.extend(other.interfaces);
        self.files.extend(other.files);
    }
}
