//! Naming and addressing policy for emitted identifiers
//!
//! Every generator goes through these helpers, so a qualified ABAP name is
//! always mapped to the same JavaScript spelling.

use abapjs_scope::ObjectRef;

/// Owner prefix used when the object owning a local class is unknown.
pub const UNKNOWN_OWNER: &str = "NOT_FOUND";

/// `zif_foo~bar` → `zif_foo$bar`, lower case.
pub fn js_name(name: &str) -> String {
    name.to_lowercase().replace('~', "$")
}

/// `<ls_row>` → `fs_ls_row_`
pub fn field_symbol(name: &str) -> String {
    let inner = name.trim_start_matches('<').trim_end_matches('>');
    format!("fs_{}_", js_name(inner))
}

/// Member provided by an interface: `<intf>$<member>`.
pub fn interface_member(interface: &str, member: &str) -> String {
    format!("{}${}", interface.to_lowercase(), js_name(member))
}

pub fn global_key(name: &str) -> String {
    name.to_uppercase()
}

/// `<OWNER-TYPE>-<OWNER-NAME>-<NAME>`, `NOT_FOUND-<NAME>` without an owner.
pub fn local_key(owner: Option<&ObjectRef>, name: &str) -> String {
    match owner {
        Some(object) => format!("{}-{}-{}", object.object_type, object.name.to_uppercase(), name.to_uppercase()),
        None => format!("{}-{}", UNKNOWN_OWNER, name.to_uppercase()),
    }
}

/// `abap.Classes['KEY']`
pub fn class_lookup(key: &str) -> String {
    format!("abap.Classes['{}']", key)
}

/// `abap.Classes['KEY'] = name;`
pub fn registration(key: &str, name: &str) -> String {
    format!("{} = {};", class_lookup(key), name.to_lowercase())
}

/// Hoisted integer operand: `constant_5`, `constant_minus_1`.
pub fn integer_constant(value: i64) -> String {
    if value < 0 {
        format!("constant_minus_{}", value.unsigned_abs())
    } else {
        format!("constant_{}", value)
    }
}

/// `zfoo.prog.abap` → `zfoo.prog.js`
pub fn output_filename(filename: &str) -> String {
    match filename.strip_suffix(".abap") {
        Some(stem) => format!("{}.js", stem),
        None => format!("{}.js", filename),
    }
}
