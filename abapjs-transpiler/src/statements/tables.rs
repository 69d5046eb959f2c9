//! Internal table statements

use crate::error::Result;
use crate::expressions::{render_source, render_target, row_closure};
use crate::traversal::Traversal;
use abapjs_syntax::{AppendSource, Condition, InsertData, SortKey, Source, Target};

pub fn sort(t: &mut Traversal<'_>, target: &Target, descending: bool, by: &[SortKey]) -> Result<String> {
    let mut options = Vec::new();
    if descending {
        options.push("descending: true".to_string());
    }
    if !by.is_empty() {
        let keys: Vec<String> = by
            .iter()
            .map(|key| {
                if key.descending {
                    format!("{{component: \"{}\", descending: true}}", key.component.to_lowercase())
                } else {
                    format!("{{component: \"{}\"}}", key.component.to_lowercase())
                }
            })
            .collect();
        options.push(format!("by: [{}]", keys.join(",")));
    }
    Ok(format!("abap.statements.sort({},{{{}}});", render_target(t, target)?, options.join(", ")))
}

pub fn append(t: &mut Traversal<'_>, source: &AppendSource, target: &Target, assigning: Option<&Target>) -> Result<String> {
    let table = render_target(t, target)?;
    let (source, lines) = match source {
        AppendSource::Value { source } => (render_source(t, source)?, false),
        AppendSource::LinesOf { source } => (render_source(t, source)?, true),
        AppendSource::InitialLine => {
            return match assigning {
                Some(fs) => Ok(format!("{}.assign({}.appendInitial());", render_target(t, fs)?, table)),
                None => Ok(format!("{}.appendInitial();", table)),
            };
        }
    };

    let mut out = format!("abap.statements.append({{source: {}, target: {}", source, table);
    if lines {
        out.push_str(", lines: true");
    }
    if let Some(fs) = assigning {
        out.push_str(&format!(", assigning: {}", render_target(t, fs)?));
    }
    out.push_str("});");
    Ok(out)
}

pub fn insert(
    t: &mut Traversal<'_>,
    data: &InsertData,
    table: &Target,
    index: Option<&Source>,
    assigning: Option<&Target>,
) -> Result<String> {
    let mut options = vec![match data {
        InsertData::Value { source } => format!("data: {}", render_source(t, source)?),
        InsertData::InitialLine => "initial: true".to_string(),
    }];
    if let Some(index) = index {
        options.push(format!("index: {}", render_source(t, index)?));
    }
    if let Some(fs) = assigning {
        options.push(format!("assigning: {}", render_target(t, fs)?));
    }
    options.push(format!("table: {}", render_target(t, table)?));
    Ok(format!("abap.statements.insertInternal({{{}}});", options.join(", ")))
}

pub fn modify(t: &mut Traversal<'_>, table: &Target, index: Option<&Source>, from: Option<&Source>) -> Result<String> {
    let table = render_target(t, table)?;
    let mut options = Vec::new();
    if let Some(index) = index {
        options.push(format!("index: {}", render_source(t, index)?));
    }
    if let Some(from) = from {
        options.push(format!("from: {}", render_source(t, from)?));
    }
    Ok(format!("abap.statements.modifyInternal({},{{{}}});", table, options.join(",")))
}

pub fn delete(
    t: &mut Traversal<'_>,
    table: &Target,
    where_clause: Option<&Condition>,
    adjacent: bool,
    index: Option<&Source>,
    from: Option<&Source>,
) -> Result<String> {
    let table = render_target(t, table)?;
    let mut options = Vec::new();
    if let Some(condition) = where_clause {
        options.push(format!("where: {}", row_closure(t, condition)?));
    }
    if adjacent {
        options.push("adjacent: true".to_string());
    }
    if let Some(index) = index {
        options.push(format!("index: {}", render_source(t, index)?));
    }
    if let Some(from) = from {
        options.push(format!("from: {}", render_source(t, from)?));
    }
    Ok(format!("abap.statements.deleteInternal({},{{{}}});", table, options.join(",")))
}

/// READ TABLE additions
pub struct ReadOptions<'s> {
    pub index: Option<&'s Source>,
    pub into: Option<&'s Target>,
    pub reference_into: Option<&'s Target>,
    pub assigning: Option<&'s Target>,
    pub with_key: Option<&'s Condition>,
    pub binary_search: bool,
}

pub fn read_table(t: &mut Traversal<'_>, table: &Source, read: &ReadOptions<'_>) -> Result<String> {
    let table = render_source(t, table)?;
    let mut options = Vec::new();
    if let Some(index) = read.index {
        options.push(format!("index: {}", render_source(t, index)?));
    }
    for (key, target) in [
        ("into", read.into),
        ("referenceInto", read.reference_into),
        ("assigning", read.assigning),
    ] {
        if let Some(target) = target {
            options.push(format!("{}: {}", key, render_target(t, target)?));
        }
    }
    if let Some(condition) = read.with_key {
        options.push(format!("withKey: {}", row_closure(t, condition)?));
    }
    if read.binary_search {
        options.push("binarySearch: true".to_string());
    }
    Ok(format!("abap.statements.readTable({},{{{}}});", table, options.join(",")))
}
