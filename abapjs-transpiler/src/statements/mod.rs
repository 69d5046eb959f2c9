//! Statement generators
//!
//! [`transpile`] is the exhaustive dispatch from statement kind to
//! generator. Generators return the statement's code without the trailing
//! newline; statements without runtime effect return an empty string.

mod assignment;
mod calls;
mod control;
mod database;
mod declarations;
mod kernel;
mod strings;
mod tables;

use crate::error::{Result, TranspileError};
use crate::traversal::Traversal;
use abapjs_syntax::{Statement, StatementNode};

pub use control::method_name;

pub fn transpile(t: &mut Traversal<'_>, node: &StatementNode) -> Result<String> {
    let unsupported = || TranspileError::unsupported(node.statement.name(), &node.text, node.span);

    match &node.statement {
        Statement::Data { name, ty, value } => declarations::data(t, name, ty, value.as_ref()),
        Statement::Constants { name, ty, value } => declarations::data(t, name, ty, Some(value)),
        Statement::FieldSymbol { name } => Ok(declarations::field_symbol(name)),
        Statement::Declarative { .. } | Statement::Comment { .. } => Ok(String::new()),

        Statement::Move { source, target } => assignment::move_value(t, source, target),
        Statement::Arithmetic { op, source, target } => assignment::arithmetic(t, *op, source, target),
        Statement::Clear { target } | Statement::Free { target } => assignment::clear(t, target),
        Statement::MoveCorresponding { source, target } => assignment::move_corresponding(t, source, target),
        Statement::Assign { source, target, casting } => assignment::assign(t, source, target, *casting),
        Statement::GetReference { source, target } => assignment::get_reference(t, source, target),
        Statement::CreateData { target, spec } => assignment::create_data(t, target, spec),
        Statement::CreateObject {
            target,
            class,
            parameters,
        } => calls::create_object(t, target, class.as_ref(), parameters),

        Statement::If { condition } => control::if_statement(t, condition),
        Statement::ElseIf { condition } => control::else_if(t, condition),
        Statement::Else => Ok("} else {".to_string()),
        Statement::EndIf
        | Statement::EndDo
        | Statement::EndWhile
        | Statement::EndLoop
        | Statement::EndForm
        | Statement::EndClass
        | Statement::EndInterface => Ok("}".to_string()),
        Statement::Do { times } => control::do_loop(t, times.as_ref()),
        Statement::While { condition } => control::while_loop(t, condition),
        Statement::Loop {
            table,
            output,
            where_clause,
        } => control::loop_at(t, table, output, where_clause.as_ref()),
        Statement::Continue => Ok("continue;".to_string()),
        Statement::Exit => Ok("break;".to_string()),
        Statement::Return => Ok(control::return_statement(t, node)),
        Statement::Assert { condition } => control::assert(t, condition),

        // only valid inside their structures
        Statement::Case { .. }
        | Statement::When { .. }
        | Statement::WhenOthers
        | Statement::EndCase
        | Statement::Try
        | Statement::Catch { .. }
        | Statement::EndTry => Err(unsupported()),

        Statement::ClassImplementation { name } => Ok(control::class_header(t, name)),
        Statement::Interface { name } => Ok(format!("class {} {{", name.lower())),
        Statement::Method { name } => control::method_header(t, node, name),
        Statement::EndMethod => Ok(control::end_method(t, node)),
        Statement::Form { name } => Ok(format!("async function {}() {{", name.lower())),
        Statement::Perform { name } => Ok(format!("await {}();", name.lower())),

        Statement::Call { call } => calls::call(t, call),
        Statement::CallFunction {
            name,
            destination,
            exporting,
            importing,
            changing,
            tables,
            ..
        } => calls::call_function(
            t,
            name,
            destination.as_ref(),
            &calls::FunctionParameters {
                exporting,
                importing,
                changing,
                tables,
            },
        ),
        Statement::CallTransformation {
            name,
            options,
            source,
            result,
        } => kernel::call_transformation(t, name, options, source, result),
        Statement::RaiseException { raise } => calls::raise(t, raise),
        Statement::Message { message, with, into } => calls::message(t, message, with, into.as_ref()),

        Statement::Concatenate {
            sources,
            target,
            separated_by,
            lines,
        } => strings::concatenate(t, sources, target, separated_by.as_ref(), *lines),
        Statement::Split { source, at, into } => strings::split(t, source, at, into),
        Statement::Replace { target, all, of, with } => strings::replace(t, target, *all, of, with),
        Statement::Condense { target, no_gaps } => strings::condense(t, target, *no_gaps),
        Statement::Find {
            pattern,
            within,
            first,
            count,
            offset,
            length,
            submatches,
        } => strings::find(
            t,
            pattern,
            within,
            &strings::FindOutputs {
                first: *first,
                count: count.as_ref(),
                offset: offset.as_ref(),
                length: length.as_ref(),
                submatches,
            },
        ),
        Statement::Shift {
            target,
            direction,
            mode,
            circular,
            byte_mode,
        } => strings::shift(t, target, *direction, mode, *circular, *byte_mode),
        Statement::Translate { target, translation } => strings::translate(t, target, translation),
        Statement::Describe {
            field,
            type_target,
            length,
            mode,
        } => strings::describe(t, field, type_target.as_ref(), length.as_ref(), *mode),
        Statement::SetBit {
            position,
            target,
            value,
        } => strings::set_bit(t, position, target, value.as_ref()),
        Statement::GetBit {
            position,
            source,
            target,
        } => strings::get_bit(t, position, source, target),
        Statement::Write { source, new_line } => strings::write(t, source, *new_line),

        Statement::Sort {
            target,
            descending,
            by,
        } => tables::sort(t, target, *descending, by),
        Statement::Append {
            source,
            target,
            assigning,
        } => tables::append(t, source, target, assigning.as_ref()),
        Statement::InsertInternal {
            data,
            table,
            index,
            assigning,
        } => tables::insert(t, data, table, index.as_ref(), assigning.as_ref()),
        Statement::ModifyInternal { table, index, from } => tables::modify(t, table, index.as_ref(), from.as_ref()),
        Statement::DeleteInternal {
            table,
            where_clause,
            adjacent,
            index,
            from,
        } => tables::delete(t, table, where_clause.as_ref(), *adjacent, index.as_ref(), from.as_ref()),
        Statement::ReadTable {
            table,
            index,
            into,
            reference_into,
            assigning,
            with_key,
            binary_search,
        } => tables::read_table(
            t,
            table,
            &tables::ReadOptions {
                index: index.as_ref(),
                into: into.as_ref(),
                reference_into: reference_into.as_ref(),
                assigning: assigning.as_ref(),
                with_key: with_key.as_ref(),
                binary_search: *binary_search,
            },
        ),

        Statement::Select {
            target,
            fields,
            from,
            where_sql,
            single,
            up_to,
        } => database::select(t, target, fields, from, where_sql.as_deref(), *single, *up_to),
        Statement::InsertDatabase { table, values } => database::insert(t, table, values),
        Statement::ModifyDatabase { table, from } => database::write("modifyDatabase", t, table, from),
        Statement::UpdateDatabase { table, from } => database::write("updateDatabase", t, table, from),
        Statement::DeleteDatabase { table, from } => database::write("deleteDatabase", t, table, from),
        Statement::Commit => Ok("abap.statements.commit();".to_string()),
        Statement::Rollback => Ok("abap.statements.rollback();".to_string()),

        Statement::Convert { conversion } => kernel::convert(t, conversion),
        Statement::WaitForPushChannels { condition, seconds } => kernel::wait(t, condition, seconds.as_ref()),
        Statement::AuthorityCheck { .. } => Ok(kernel::authority_check()),

        Statement::Unsupported { .. } => Err(unsupported()),
    }
}
