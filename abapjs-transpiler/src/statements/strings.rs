//! Character processing, bit access and WRITE

use crate::error::Result;
use crate::expressions::{render_source, render_target};
use crate::traversal::Traversal;
use abapjs_syntax::{Constant, DescribeMode, FindPattern, ShiftDirection, ShiftMode, Source, SplitInto, Target, Translation};

/// Inline JavaScript passed through WRITE: `WRITE '@KERNEL ...'.`
const KERNEL_PREFIX: &str = "@KERNEL ";

pub fn concatenate(
    t: &mut Traversal<'_>,
    sources: &[Source],
    target: &Target,
    separated_by: Option<&Source>,
    lines: bool,
) -> Result<String> {
    let mut rendered = Vec::with_capacity(sources.len());
    for source in sources {
        rendered.push(render_source(t, source)?);
    }
    let mut out = format!(
        "abap.statements.concatenate({{source: [{}], target: {}",
        rendered.join(", "),
        render_target(t, target)?
    );
    if let Some(separator) = separated_by {
        out.push_str(&format!(", separatedBy: {}", render_source(t, separator)?));
    }
    if lines {
        out.push_str(", lines: true");
    }
    out.push_str("});");
    Ok(out)
}

pub fn split(t: &mut Traversal<'_>, source: &Source, at: &Source, into: &SplitInto) -> Result<String> {
    let source = render_source(t, source)?;
    let at = render_source(t, at)?;
    let into = match into {
        SplitInto::Table { target } => format!("table: {}", render_target(t, target)?),
        SplitInto::Targets { targets } => {
            let mut rendered = Vec::with_capacity(targets.len());
            for target in targets {
                rendered.push(render_target(t, target)?);
            }
            format!("targets: [{}]", rendered.join(","))
        }
    };
    Ok(format!("abap.statements.split({{source: {}, at: {}, {}}});", source, at, into))
}

pub fn replace(t: &mut Traversal<'_>, target: &Target, all: bool, of: &Source, with: &Source) -> Result<String> {
    let target = render_target(t, target)?;
    let of = render_source(t, of)?;
    let with = render_source(t, with)?;
    Ok(format!("abap.statements.replace({}, {}, {}, {});", target, all, of, with))
}

pub fn condense(t: &mut Traversal<'_>, target: &Target, no_gaps: bool) -> Result<String> {
    Ok(format!(
        "abap.statements.condense({}, {{nogaps: {}}});",
        render_target(t, target)?,
        no_gaps
    ))
}

/// Optional outputs of FIND
pub struct FindOutputs<'s> {
    pub first: bool,
    pub count: Option<&'s Target>,
    pub offset: Option<&'s Target>,
    pub length: Option<&'s Target>,
    pub submatches: &'s [Target],
}

pub fn find(t: &mut Traversal<'_>, pattern: &FindPattern, within: &Source, outputs: &FindOutputs<'_>) -> Result<String> {
    let within = render_source(t, within)?;
    let mut options = vec![match pattern {
        FindPattern::Substring { source } => format!("find: {}", render_source(t, source)?),
        FindPattern::Regex { source } => format!("regex: {}", render_source(t, source)?),
    }];
    if outputs.first {
        options.push("first: true".to_string());
    }
    for (key, target) in [("count", outputs.count), ("offset", outputs.offset), ("length", outputs.length)] {
        if let Some(target) = target {
            options.push(format!("{}: {}", key, render_target(t, target)?));
        }
    }
    if !outputs.submatches.is_empty() {
        let mut rendered = Vec::with_capacity(outputs.submatches.len());
        for target in outputs.submatches {
            rendered.push(render_target(t, target)?);
        }
        options.push(format!("submatches: [{}]", rendered.join(",")));
    }
    Ok(format!("abap.statements.find({}, {{{}}});", within, options.join(", ")))
}

pub fn shift(
    t: &mut Traversal<'_>,
    target: &Target,
    direction: ShiftDirection,
    mode: &ShiftMode,
    circular: bool,
    byte_mode: bool,
) -> Result<String> {
    let direction = match direction {
        ShiftDirection::Left => "LEFT",
        ShiftDirection::Right => "RIGHT",
    };
    let mut options = vec![format!("direction: '{}'", direction)];
    match mode {
        ShiftMode::Single => {}
        ShiftMode::Places { source } => options.push(format!("places: {}", render_source(t, source)?)),
        ShiftMode::To { source } => options.push(format!("to: {}", render_source(t, source)?)),
        ShiftMode::DeletingLeading { source } => {
            options.push(format!("deletingLeading: {}", render_source(t, source)?))
        }
        ShiftMode::DeletingTrailing { source } => {
            options.push(format!("deletingTrailing: {}", render_source(t, source)?))
        }
    }
    if circular {
        options.push("circular: true".to_string());
    }
    if byte_mode {
        options.push("mode: 'BYTE'".to_string());
    }
    Ok(format!("abap.statements.shift({}, {{{}}});", render_target(t, target)?, options.join(",")))
}

pub fn translate(t: &mut Traversal<'_>, target: &Target, translation: &Translation) -> Result<String> {
    let target = render_target(t, target)?;
    let argument = match translation {
        Translation::Upper => "\"UPPER\"".to_string(),
        Translation::Lower => "\"LOWER\"".to_string(),
        Translation::Using { mask } => render_source(t, mask)?,
    };
    Ok(format!("abap.statements.translate({}, {});", target, argument))
}

pub fn describe(
    t: &mut Traversal<'_>,
    field: &Source,
    type_target: Option<&Target>,
    length: Option<&Target>,
    mode: Option<DescribeMode>,
) -> Result<String> {
    let mut options = vec![format!("field: {}", render_source(t, field)?)];
    if let Some(target) = type_target {
        options.push(format!("type: {}", render_target(t, target)?));
    }
    if let Some(target) = length {
        options.push(format!("length: {}", render_target(t, target)?));
    }
    match mode {
        Some(DescribeMode::Character) => options.push("mode: 'CHARACTER'".to_string()),
        Some(DescribeMode::Byte) => options.push("mode: 'BYTE'".to_string()),
        None => {}
    }
    Ok(format!("abap.statements.describe({{{}}});", options.join(", ")))
}

pub fn set_bit(t: &mut Traversal<'_>, position: &Source, target: &Target, value: Option<&Source>) -> Result<String> {
    let position = render_source(t, position)?;
    let target = render_target(t, target)?;
    match value {
        Some(value) => Ok(format!(
            "abap.statements.setBit({}, {}, {});",
            position,
            target,
            render_source(t, value)?
        )),
        None => Ok(format!("abap.statements.setBit({}, {});", position, target)),
    }
}

pub fn get_bit(t: &mut Traversal<'_>, position: &Source, source: &Source, target: &Target) -> Result<String> {
    let position = render_source(t, position)?;
    let source = render_source(t, source)?;
    Ok(format!(
        "abap.statements.getBit({}, {}, {});",
        position,
        source,
        render_target(t, target)?
    ))
}

pub fn write(t: &mut Traversal<'_>, source: &Source, new_line: bool) -> Result<String> {
    if let Source::Constant {
        constant: Constant::Text { value },
    } = source
    {
        if let Some(code) = value.strip_prefix(KERNEL_PREFIX) {
            return Ok(code.replace("''", "'"));
        }
    }
    let source = render_source(t, source)?;
    if new_line {
        Ok(format!("abap.statements.write({},{{newLine: true}});", source))
    } else {
        Ok(format!("abap.statements.write({});", source))
    }
}
