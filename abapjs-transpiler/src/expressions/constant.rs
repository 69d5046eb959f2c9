//! Literals and their escaping

use abapjs_syntax::Constant;

/// Text between the quotes of a `'...'` literal as a JavaScript single
/// quoted string, doubled quotes collapsed.
pub fn quote_text(raw: &str) -> String {
    let value = raw.replace("''", "'");
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Text between the backticks of a `` `...` `` literal as a JavaScript
/// template string.
pub fn quote_backtick(raw: &str) -> String {
    let value = raw.replace("``", "`");
    format!("`{}`", value.replace('\\', "\\\\").replace('`', "\\`").replace("${", "\\${"))
}

/// Literal part of a string template. ABAP template escapes for `|`, `{`
/// and `}` are dropped; `\n`, `\t`, `\r` and `\\` carry over unchanged.
pub fn template_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next @ ('|' | '{' | '}')) => out.push(next),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push_str("\\\\"),
            },
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out
}

/// Character count of a text literal once doubled quotes are collapsed.
pub fn text_length(raw: &str) -> usize {
    raw.replace("''", "'").chars().count()
}

/// Operand form of a text literal.
pub fn character_operand(raw: &str) -> String {
    format!(
        "new abap.types.Character({{length: {}}}).set({})",
        text_length(raw),
        quote_text(raw)
    )
}

pub fn string_operand(quoted: &str) -> String {
    format!("new abap.types.String().set({})", quoted)
}

/// Value as passed to `.set(...)` in declarations and static initialisers.
pub fn escape_constant(constant: &Constant) -> String {
    match constant {
        Constant::Integer { value } => value.to_string(),
        Constant::Text { value } => quote_text(value),
        Constant::Backtick { value } => quote_backtick(value),
    }
}

/// Same as [`escape_constant`] for literal text as written, e.g. `'X'`.
pub fn escape_value(written: &str) -> String {
    let trimmed = written.trim();
    if let Some(inner) = trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
        quote_text(inner)
    } else if let Some(inner) = trimmed.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
        quote_backtick(inner)
    } else {
        trimmed.to_string()
    }
}
