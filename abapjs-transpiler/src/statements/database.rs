//! Open SQL

use crate::error::Result;
use crate::expressions::{render_chain, render_source, render_target, Access};
use crate::traversal::Traversal;
use abapjs_syntax::{DatabaseSource, DatabaseTable, Source, Target};

/// SELECT lowers to one SQL string; a dynamic table name is spliced in.
pub fn select(
    t: &mut Traversal<'_>,
    target: &Target,
    fields: &str,
    from: &DatabaseTable,
    where_sql: Option<&str>,
    single: bool,
    up_to: Option<u32>,
) -> Result<String> {
    let target = render_target(t, target)?;
    let prefix = format!("SELECT {} FROM ", escape_sql(fields.trim()));

    let mut suffix = String::new();
    if let Some(condition) = where_sql {
        suffix.push_str(" WHERE ");
        suffix.push_str(&escape_sql(condition.trim()));
    }
    let limit = if single { Some(1) } else { up_to };
    if let Some(limit) = limit {
        suffix.push_str(&format!(" LIMIT {}", limit));
    }

    let sql = match from {
        DatabaseTable::Named { name } => format!("\"{}{}{}\"", prefix, name.to_lowercase(), suffix),
        DatabaseTable::Dynamic { chain } => format!(
            "\"{}\" + {}.get() + \"{}\"",
            prefix,
            render_chain(t, chain, Access::Read)?,
            suffix
        ),
    };
    Ok(format!("abap.statements.select({}, {});", target, sql))
}

pub fn insert(t: &mut Traversal<'_>, table: &DatabaseTable, values: &Source) -> Result<String> {
    let table = table_name(t, table)?;
    Ok(format!(
        "abap.statements.insertDatabase({}, {{\"values\": {}}});",
        table,
        render_source(t, values)?
    ))
}

/// MODIFY, UPDATE and DELETE on a database table share one shape.
pub fn write(function: &str, t: &mut Traversal<'_>, table: &DatabaseTable, from: &DatabaseSource) -> Result<String> {
    let table = table_name(t, table)?;
    let (key, source) = match from {
        DatabaseSource::Row { source } => ("values", render_source(t, source)?),
        DatabaseSource::Table { source } => ("table", render_source(t, source)?),
    };
    Ok(format!("abap.statements.{}({}, {{\"{}\": {}}});", function, table, key, source))
}

fn table_name(t: &mut Traversal<'_>, table: &DatabaseTable) -> Result<String> {
    match table {
        DatabaseTable::Named { name } => Ok(format!("\"{}\"", name.to_lowercase())),
        DatabaseTable::Dynamic { chain } => render_chain(t, chain, Access::Read),
    }
}

fn escape_sql(sql: &str) -> String {
    sql.replace('\\', "\\\\").replace('"', "\\\"")
}
