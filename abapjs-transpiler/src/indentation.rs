//! Brace-driven re-indentation of generated code

const INDENT: &str = "  ";

/// Re-indent `code` line by line.
///
/// Each line is trimmed; a line starting with `}` closes a level before it
/// is written, a line ending with `{` opens one after it. Levels never go
/// below zero.
pub fn indent(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut level: usize = 0;
    for line in code.split_inclusive('\n') {
        let (body, newline) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };
        let trimmed = body.trim();
        if trimmed.starts_with('}') {
            level = level.saturating_sub(1);
        }
        if !trimmed.is_empty() {
            for _ in 0..level {
                out.push_str(INDENT);
            }
            out.push_str(trimmed);
        }
        out.push_str(newline);
        if trimmed.ends_with('{') {
            level += 1;
        }
    }
    out
}

/// Leading whitespace width of a line.
pub fn leading_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}
