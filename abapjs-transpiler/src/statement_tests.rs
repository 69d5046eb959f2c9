//! Byte-exact lowering of single statements and small programs

use crate::test_support::*;
use crate::{Transpiler, TranspileError, TranspilerConfig};
use abapjs_scope::{
    Attribute, AttributeValue, ClassDefinition, InterfaceDefinition, MethodDefinition, MethodParameter,
    ParameterDirection, ScopeKind,
};
use abapjs_syntax::*;

fn int(b: &mut TreeBuilder, name: &str, value: i64) -> Node {
    let target = b.field(name);
    b.statement(Statement::Move {
        source: Source::int(value),
        target,
    })
}

fn binding(b: &mut TreeBuilder, name: &str, value: &str) -> Binding {
    Binding {
        name: b.token(name),
        value: b.source(value),
    }
}

fn target_binding(b: &mut TreeBuilder, name: &str, target: &str) -> TargetBinding {
    TargetBinding {
        name: b.token(name),
        target: b.field(target),
    }
}

#[test]
fn test_simple_assignment() {
    assert_eq!(statement(|b| Statement::Move { source: Source::int(2), target: b.field("foo") }), "foo.set(constant_2);");
}

#[test]
fn test_offset_write() {
    let code = statement(|b| {
        let mut target = b.field("foo");
        target.offset = Some(OffsetValue::Integer { value: 1 });
        target.length = Some(LengthValue::Integer { value: 1 });
        Statement::Move {
            source: Source::text("a"),
            target,
        }
    });
    assert_eq!(
        code,
        "new abap.OffsetLength(foo, {offset: 1, length: 1}).set(new abap.types.Character({length: 1}).set('a'));"
    );
}

#[test]
fn test_offset_read() {
    let code = statement(|b| {
        let mut chain = b.field("bar");
        chain.offset = Some(OffsetValue::Field {
            chain: Box::new(b.field("lv_off")),
        });
        chain.length = Some(LengthValue::Star);
        let target = b.field("foo");
        Statement::Move {
            source: Source::chain(chain),
            target,
        }
    });
    assert_eq!(code, "foo.set(bar.getOffset({offset: lv_off.get()}));");
}

#[test]
fn test_declarations() {
    assert_eq!(
        statement(|b| Statement::Data {
            name: b.token("foo"),
            ty: AbapType::integer(),
            value: None,
        }),
        "let foo = new abap.types.Integer();"
    );
    assert_eq!(
        statement(|b| Statement::Constants {
            name: b.token("lc_flag"),
            ty: AbapType::character(1),
            value: Constant::Text { value: "X".to_string() },
        }),
        "let lc_flag = new abap.types.Character();\nlc_flag.set('X');"
    );
    assert_eq!(
        statement(|b| Statement::FieldSymbol { name: b.token("<ls_row>") }),
        "let fs_ls_row_ = new abap.types.FieldSymbol();"
    );
    assert_eq!(
        statement(|_| Statement::Declarative {
            keyword: "Types".to_string()
        }),
        ""
    );
}

#[test]
fn test_arithmetic_and_clear() {
    assert_eq!(
        statement(|b| Statement::Arithmetic {
            op: ArithmeticStatement::Add,
            source: Source::int(2),
            target: b.field("foo"),
        }),
        "foo.set(abap.operators.add(foo,constant_2));"
    );
    assert_eq!(
        statement(|b| {
            let left = b.source("a");
            let target = b.field("foo");
            Statement::Move {
                source: Source::Arithmetic {
                    left: Box::new(left),
                    op: ArithOp::Minus,
                    right: Box::new(Source::int(-1)),
                },
                target,
            }
        }),
        "foo.set(abap.operators.minus(a,constant_minus_1));"
    );
    assert_eq!(statement(|b| Statement::Clear { target: b.field("foo") }), "abap.statements.clear(foo);");
}

#[test]
fn test_builtin_names() {
    assert_eq!(
        statement(|b| Statement::Move {
            source: Source::int(4),
            target: b.component_chain(&["sy", "subrc"]),
        }),
        "abap.builtin.sy.get().subrc.set(constant_4);"
    );
    assert_eq!(
        statement(|b| {
            let call = BuiltinCall {
                name: b.token("lines"),
                single: Some(Box::new(b.source("lt_tab"))),
                parameters: Vec::new(),
            };
            let target = b.field("lv_count");
            Statement::Move {
                source: Source::Builtin { call },
                target,
            }
        }),
        "lv_count.set(abap.builtin.lines({val: lt_tab}));"
    );
}

#[test]
fn test_string_template() {
    let code = statement(|b| {
        let name = b.source("name");
        let target = b.field("foo");
        Statement::Move {
            source: Source::Template {
                parts: vec![
                    TemplatePart::Text {
                        text: "Hello ".to_string(),
                    },
                    TemplatePart::Embed { source: name },
                    TemplatePart::Text { text: "!".to_string() },
                ],
            },
            target,
        }
    });
    assert_eq!(code, "foo.set(new abap.types.String().set(`Hello ${name.get()}!`));");
}

#[test]
fn test_conditions() {
    let code = statement(|b| {
        let first = b.eq("a", Source::int(1));
        let second = b.eq("b", Source::int(2));
        let third = b.eq("c", Source::int(3));
        Statement::If {
            condition: Condition::And {
                items: vec![
                    first,
                    Condition::Paren {
                        inner: Box::new(Condition::Or {
                            items: vec![second, third],
                        }),
                    },
                ],
            },
        }
    });
    assert_eq!(
        code,
        "if (abap.compare.eq(a, constant_1) && (abap.compare.eq(b, constant_2) || abap.compare.eq(c, constant_3))) {"
    );

    let code = statement(|b| Statement::If {
        condition: b.is_initial("foo", true),
    });
    assert_eq!(code, "if (abap.compare.initial(foo) === false) {");

    let code = statement(|b| {
        let inner = b.eq("a", Source::int(1));
        Statement::While {
            condition: Condition::Not { inner: Box::new(inner) },
        }
    });
    assert_eq!(code, "while (!abap.compare.eq(a, constant_1)) {");
}

#[test]
fn test_if_else_block() {
    let code = program(|b| {
        let condition = b.is_initial("foo", false);
        let open = b.statement(Statement::If { condition });
        let then = int(b, "bar", 1);
        let otherwise = b.statement(Statement::Else);
        let other = int(b, "bar", 2);
        let close = b.statement(Statement::EndIf);
        vec![b.structure(StructureKind::If, vec![open, then, otherwise, other, close])]
    });
    assert_eq!(
        code,
        "if (abap.compare.initial(foo)) {\n  bar.set(constant_1);\n} else {\n  bar.set(constant_2);\n}"
    );
}

#[test]
fn test_do_times() {
    let code = program(|b| {
        let open = b.statement(Statement::Do {
            times: Some(Source::int(5)),
        });
        let body = b.statement(Statement::Exit);
        let close = b.statement(Statement::EndDo);
        vec![b.structure(StructureKind::Do, vec![open, body, close])]
    });
    assert_eq!(
        code,
        "const unique1 = constant_5.get();\n\
         for (let unique2 = 0; unique2 < unique1; unique2++) {\n  \
         abap.builtin.sy.get().index.set(unique2 + 1);\n  \
         break;\n\
         }"
    );
}

#[test]
fn test_loop_with_where() {
    let code = program(|b| {
        let table = b.source("lt_tab");
        let path = vec![b.token("name")];
        let condition = Condition::Compare {
            left: Source::Component { path },
            op: CompareOp::Eq,
            right: Source::text("X"),
        };
        let target = b.field_symbol("<ls_row>");
        let open = b.statement(Statement::Loop {
            table,
            output: LoopOutput::Assigning { target },
            where_clause: Some(condition),
        });
        let body = b.statement(Statement::Continue);
        let close = b.statement(Statement::EndLoop);
        vec![b.structure(StructureKind::Loop, vec![open, body, close])]
    });
    assert_eq!(
        code,
        "for (const unique1 of abap.statements.loop(lt_tab, {where: (i) => {return abap.compare.eq(i.name, new abap.types.Character({length: 1}).set('X'));}})) {\n  \
         fs_ls_row_.assign(unique1);\n  \
         continue;\n\
         }"
    );
}

#[test]
fn test_case_block() {
    let code = program(|b| {
        let source = b.source("foo");
        let open = b.statement(Statement::Case { source });
        let when = b.statement(Statement::When {
            values: vec![Source::int(1), Source::int(2)],
        });
        let first = int(b, "bar", 1);
        let others = b.statement(Statement::WhenOthers);
        let second = int(b, "bar", 2);
        let close = b.statement(Statement::EndCase);
        let when = b.structure(StructureKind::When, vec![when, first]);
        let others = b.structure(StructureKind::When, vec![others, second]);
        vec![b.structure(StructureKind::Case, vec![open, when, others, close])]
    });
    assert_eq!(
        code,
        "let unique1 = foo;\n\
         if (abap.compare.eq(unique1, constant_1) || abap.compare.eq(unique1, constant_2)) {\n  \
         bar.set(constant_1);\n\
         } else {\n  \
         bar.set(constant_2);\n\
         }"
    );
}

#[test]
fn test_try_catch_block() {
    let code = program(|b| {
        let open = b.statement(Statement::Try);
        let body = int(b, "foo", 1);
        let classes = vec![b.token("cx_root")];
        let into = Some(b.field("lx_error"));
        let catch = b.statement(Statement::Catch { classes, into });
        let handler = int(b, "foo", 2);
        let close = b.statement(Statement::EndTry);
        let catch = b.structure(StructureKind::Catch, vec![catch, handler]);
        vec![b.structure(StructureKind::Try, vec![open, body, catch, close])]
    });
    assert_eq!(
        code,
        "try {\n  \
         foo.set(constant_1);\n\
         } catch (e) {\n  \
         if (e instanceof abap.Classes['CX_ROOT']) {\n    \
         lx_error.set(e);\n    \
         foo.set(constant_2);\n  \
         } else {\n    \
         throw e;\n  \
         }\n\
         }"
    );
}

#[test]
fn test_write() {
    assert_eq!(
        statement(|b| Statement::Write {
            source: b.source("foo"),
            new_line: false,
        }),
        "abap.statements.write(foo);"
    );
    assert_eq!(
        statement(|b| Statement::Write {
            source: b.source("foo"),
            new_line: true,
        }),
        "abap.statements.write(foo,{newLine: true});"
    );
    assert_eq!(
        statement(|_| Statement::Write {
            source: Source::text("@KERNEL console.log(''x'');"),
            new_line: false,
        }),
        "console.log('x');"
    );
}

#[test]
fn test_character_statements() {
    assert_eq!(
        statement(|b| {
            let sources = vec![b.source("a"), b.source("b")];
            let target = b.field("c");
            let separator = b.source("space");
            Statement::Concatenate {
                sources,
                target,
                separated_by: Some(separator),
                lines: false,
            }
        }),
        "abap.statements.concatenate({source: [a, b], target: c, separatedBy: abap.builtin.space});"
    );
    assert_eq!(
        statement(|b| {
            let source = b.source("a");
            let at = b.source("b");
            let targets = vec![b.field("c"), b.field("d")];
            Statement::Split {
                source,
                at,
                into: SplitInto::Targets { targets },
            }
        }),
        "abap.statements.split({source: a, at: b, targets: [c,d]});"
    );
    assert_eq!(
        statement(|b| Statement::Condense {
            target: b.field("foo"),
            no_gaps: true,
        }),
        "abap.statements.condense(foo, {nogaps: true});"
    );
    assert_eq!(
        statement(|b| Statement::Translate {
            target: b.field("foo"),
            translation: Translation::Upper,
        }),
        "abap.statements.translate(foo, \"UPPER\");"
    );
    assert_eq!(
        statement(|b| Statement::Shift {
            target: b.field("foo"),
            direction: ShiftDirection::Right,
            mode: ShiftMode::Places { source: Source::int(2) },
            circular: false,
            byte_mode: false,
        }),
        "abap.statements.shift(foo, {direction: 'RIGHT',places: constant_2});"
    );
    assert_eq!(
        statement(|b| {
            let target = b.field("foo");
            let of = b.source("a");
            let with = b.source("b");
            Statement::Replace {
                target,
                all: true,
                of,
                with,
            }
        }),
        "abap.statements.replace(foo, true, a, b);"
    );
}

#[test]
fn test_find_regex() {
    let code = statement(|b| {
        let pattern = FindPattern::Regex {
            source: Source::text("11(\\w+)22"),
        };
        let within = b.source("lv_text");
        let submatches = vec![b.field("lv_host")];
        Statement::Find {
            pattern,
            within,
            first: true,
            count: None,
            offset: None,
            length: None,
            submatches,
        }
    });
    assert_eq!(
        code,
        "abap.statements.find(lv_text, {regex: new abap.types.Character({length: 9}).set('11(\\\\w+)22'), first: true, submatches: [lv_host]});"
    );
}

#[test]
fn test_internal_tables() {
    assert_eq!(
        statement(|b| Statement::Sort {
            target: b.field("lt_tab"),
            descending: false,
            by: vec![
                SortKey {
                    component: "OFFSET".to_string(),
                    descending: true,
                },
                SortKey {
                    component: "LENGTH".to_string(),
                    descending: false,
                },
            ],
        }),
        "abap.statements.sort(lt_tab,{by: [{component: \"offset\", descending: true},{component: \"length\"}]});"
    );
    assert_eq!(
        statement(|b| {
            let source = b.source("ls_row");
            let target = b.field("lt_tab");
            Statement::Append {
                source: AppendSource::Value { source },
                target,
                assigning: None,
            }
        }),
        "abap.statements.append({source: ls_row, target: lt_tab});"
    );
    assert_eq!(
        statement(|b| {
            let target = b.field("lt_tab");
            let assigning = Some(b.field_symbol("<ls_row>"));
            Statement::Append {
                source: AppendSource::InitialLine,
                target,
                assigning,
            }
        }),
        "fs_ls_row_.assign(lt_tab.appendInitial());"
    );
    assert_eq!(
        statement(|b| {
            let table = b.source("lt_tab");
            let into = Some(b.field("ls_row"));
            Statement::ReadTable {
                table,
                index: Some(Source::int(1)),
                into,
                reference_into: None,
                assigning: None,
                with_key: None,
                binary_search: false,
            }
        }),
        "abap.statements.readTable(lt_tab,{index: constant_1,into: ls_row});"
    );
    assert_eq!(
        statement(|b| {
            let table = b.source("lt_tab");
            let assigning = Some(b.field_symbol("<ls_row>"));
            let path = vec![b.token("field")];
            Statement::ReadTable {
                table,
                index: None,
                into: None,
                reference_into: None,
                assigning,
                with_key: Some(Condition::Compare {
                    left: Source::Component { path },
                    op: CompareOp::Eq,
                    right: Source::int(2),
                }),
                binary_search: false,
            }
        }),
        "abap.statements.readTable(lt_tab,{assigning: fs_ls_row_,withKey: (i) => {return abap.compare.eq(i.field, constant_2);}});"
    );
    assert_eq!(
        statement(|b| {
            let table = b.field("lt_tab");
            let path = vec![b.token("table_line")];
            Statement::DeleteInternal {
                table,
                where_clause: Some(Condition::Compare {
                    left: Source::Component { path },
                    op: CompareOp::Eq,
                    right: Source::int(3),
                }),
                adjacent: false,
                index: None,
                from: None,
            }
        }),
        "abap.statements.deleteInternal(lt_tab,{where: (i) => {return abap.compare.eq(i, constant_3);}});"
    );
}

#[test]
fn test_references_and_assign() {
    assert_eq!(
        statement(|b| {
            let source = b.source("foo");
            let target = b.field_symbol("<fs>");
            Statement::Assign {
                source,
                target,
                casting: false,
            }
        }),
        "abap.statements.assign({target: fs_fs_, source: foo});"
    );
    assert_eq!(
        statement(|b| {
            let mut chain = b.field("lr_data");
            chain.segments.push(ChainSegment::Dereference);
            let target = b.field_symbol("<fs>");
            Statement::Assign {
                source: Source::chain(chain),
                target,
                casting: true,
            }
        }),
        "abap.statements.assign({target: fs_fs_, source: (lr_data).getPointer(), casting: true});"
    );
    assert_eq!(
        statement(|b| {
            let source = b.fs_source("<fs>");
            let target = b.field("lr_data");
            Statement::GetReference { source, target }
        }),
        "lr_data.assign(fs_fs_.getPointer());"
    );
    assert_eq!(
        statement(|b| Statement::CreateData {
            target: b.field("lr_data"),
            spec: CreateDataSpec::Type { ty: AbapType::integer() },
        }),
        "lr_data.assign(new abap.types.Integer());"
    );
    assert_eq!(
        statement(|b| Statement::CreateData {
            target: b.field("lr_data"),
            spec: CreateDataSpec::Dynamic {
                name: DynamicName::Literal {
                    value: "ZTAB".to_string(),
                },
                table: true,
            },
        }),
        "abap.statements.createData(lr_data,{\"name\": 'ZTAB',\"table\": true});"
    );
    assert_eq!(
        statement(|b| Statement::CreateData {
            target: b.field("lr_data"),
            spec: CreateDataSpec::Dynamic {
                name: DynamicName::Literal {
                    value: "Z''TAB".to_string(),
                },
                table: false,
            },
        }),
        "abap.statements.createData(lr_data,{\"name\": 'Z\\'TAB'});"
    );
}

#[test]
fn test_function_modules() {
    assert_eq!(
        statement(|b| {
            let exporting = vec![binding(b, "iv_name", "lv_name")];
            let importing = vec![target_binding(b, "ev_result", "lv_result")];
            Statement::CallFunction {
                name: DynamicName::Literal {
                    value: "z_foo".to_string(),
                },
                destination: None,
                exporting,
                importing,
                changing: Vec::new(),
                tables: Vec::new(),
                exceptions: vec!["OTHERS".to_string()],
            }
        }),
        "await abap.FunctionModules['Z_FOO']({exporting: {iv_name: lv_name}, importing: {ev_result: lv_result}});"
    );
    assert_eq!(
        statement(|b| Statement::CallFunction {
            name: DynamicName::Field { chain: b.field("lv_fm") },
            destination: Some(DynamicName::Literal {
                value: "NONE".to_string(),
            }),
            exporting: Vec::new(),
            importing: Vec::new(),
            changing: Vec::new(),
            tables: Vec::new(),
            exceptions: Vec::new(),
        }),
        "await abap.statements.callFunction({name:lv_fm.get().trimEnd(),destination:'NONE'});"
    );
}

#[test]
fn test_exceptions_and_messages() {
    assert_eq!(
        statement(|b| Statement::RaiseException {
            raise: Raise::Type {
                class: b.token("zcx_error"),
                exporting: Vec::new(),
            },
        }),
        "throw await (new abap.Classes['ZCX_ERROR']()).constructor_();"
    );
    assert_eq!(
        statement(|b| {
            let class = b.token("zcx_error");
            let exporting = vec![binding(b, "textid", "lv_id")];
            Statement::RaiseException {
                raise: Raise::Type { class, exporting },
            }
        }),
        "throw await (new abap.Classes['ZCX_ERROR']()).constructor_({textid: lv_id});"
    );
    assert_eq!(
        statement(|b| Statement::RaiseException {
            raise: Raise::Instance { source: b.source("lx_error") },
        }),
        "throw lx_error.get();"
    );
    assert_eq!(
        statement(|b| Statement::Message {
            message: MessageSpec::Short {
                message_type: "e".to_string(),
                number: "001".to_string(),
                id: "zz".to_string(),
            },
            with: vec![b.source("lv_a")],
            into: Some(b.field("lv_text")),
        }),
        "abap.statements.message({into: lv_text, id: \"ZZ\", number: \"001\", type: \"E\", with: [lv_a]});"
    );
}

#[test]
fn test_create_object() {
    assert_eq!(
        statement(|b| {
            let target = b.field("lo_bar");
            let class = Some(ClassSpec::Static { name: b.token("zcl_bar") });
            let parameters = vec![binding(b, "iv_name", "lv_name")];
            Statement::CreateObject {
                target,
                class,
                parameters,
            }
        }),
        "lo_bar.set(await (new abap.Classes['ZCL_BAR']()).constructor_({iv_name: lv_name}));"
    );

    let err = try_statement(|b| Statement::CreateObject {
        target: b.field("lo_untyped"),
        class: None,
        parameters: Vec::new(),
    })
    .unwrap_err();
    assert!(err.to_string().starts_with("ERROR_CDEF_NOT_FOUND"));
}

#[test]
fn test_database() {
    assert_eq!(
        statement(|b| Statement::Select {
            target: b.field("lt_rows"),
            fields: "*".to_string(),
            from: DatabaseTable::Named {
                name: "T100".to_string(),
            },
            where_sql: Some("sprsl = 'E'".to_string()),
            single: false,
            up_to: Some(5),
        }),
        "abap.statements.select(lt_rows, \"SELECT * FROM t100 WHERE sprsl = 'E' LIMIT 5\");"
    );
    assert_eq!(
        statement(|b| {
            let target = b.field("ls_row");
            let chain = b.field("lv_table");
            Statement::Select {
                target,
                fields: "*".to_string(),
                from: DatabaseTable::Dynamic { chain },
                where_sql: None,
                single: true,
                up_to: None,
            }
        }),
        "abap.statements.select(ls_row, \"SELECT * FROM \" + lv_table.get() + \" LIMIT 1\");"
    );
    assert_eq!(
        statement(|b| Statement::InsertDatabase {
            table: DatabaseTable::Named {
                name: "ZTAB".to_string(),
            },
            values: b.source("ls_row"),
        }),
        "abap.statements.insertDatabase(\"ztab\", {\"values\": ls_row});"
    );
    assert_eq!(
        statement(|b| Statement::DeleteDatabase {
            table: DatabaseTable::Named {
                name: "ZTAB".to_string(),
            },
            from: DatabaseSource::Table { source: b.source("lt_rows") },
        }),
        "abap.statements.deleteDatabase(\"ztab\", {\"table\": lt_rows});"
    );
    assert_eq!(statement(|_| Statement::Commit), "abap.statements.commit();");
}

#[test]
fn test_kernel_statements() {
    let code = statement(|b| {
        let options = vec![Binding {
            name: b.token("value_handling"),
            value: Source::text("accept_data_loss"),
        }];
        let source = TransformationOperand::Xml { value: b.source("iv_string") };
        let result = TransformationOperand::Bindings {
            bindings: vec![binding(b, "data", "rs_xml")],
        };
        Statement::CallTransformation {
            name: "ID".to_string(),
            options,
            source,
            result,
        }
    });
    assert_eq!(
        code,
        "if (abap.Classes['KERNEL_CALL_TRANSFORMATION'] === undefined) throw new Error(\"CallTransformation, kernel class missing\");\n\
         await abap.Classes['KERNEL_CALL_TRANSFORMATION'].call({name: \"id\",sourceXML: iv_string,options: {value_handling:new abap.types.Character({length: 16}).set('accept_data_loss')},result: {data:rs_xml}});"
    );

    let code = statement(|b| {
        let condition = Condition::Predicate {
            operand: Source::chain(b.attribute_chain("lo_handler", "message")),
            predicate: Predicate::Initial,
            negated: true,
        };
        Statement::WaitForPushChannels {
            condition,
            seconds: Some(Source::int(10)),
        }
    });
    assert_eq!(
        code,
        "if (abap.Classes['KERNEL_PUSH_CHANNELS'] === undefined) throw new Error(\"Wait, kernel class missing\");\n\
         await abap.Classes['KERNEL_PUSH_CHANNELS'].wait({cond: abap.compare.initial(lo_handler.get().message) === false,seconds: constant_10});"
    );

    assert_eq!(
        statement(|_| Statement::AuthorityCheck {
            object: "S_DEVELOP".to_string()
        }),
        "if (abap.Classes['KERNEL_AUTHORITY_CHECK'] === undefined) throw new Error(\"AuthorityCheck, kernel class missing\");\n\
         await abap.Classes['KERNEL_AUTHORITY_CHECK'].call({});"
    );
}

#[test]
fn test_method_calls() {
    assert_eq!(
        statement(|b| {
            let chain = b.field("lo_bar");
            let method = MethodRef::Named { name: b.token("run") };
            let exporting = vec![Binding {
                name: b.token("iv_count"),
                value: Source::int(1),
            }];
            Statement::Call {
                call: MethodCallChain {
                    receiver: Receiver::Instance { chain },
                    method,
                    parameters: CallParameters {
                        exporting,
                        ..CallParameters::default()
                    },
                },
            }
        }),
        "await lo_bar.get().run({iv_count: constant_1});"
    );
    assert_eq!(
        statement(|b| {
            let chain = b.field("lo_bar");
            let method = MethodRef::Named { name: b.token("get") };
            let receiving = Some(target_binding(b, "rv_value", "lv_value"));
            Statement::Call {
                call: MethodCallChain {
                    receiver: Receiver::Instance { chain },
                    method,
                    parameters: CallParameters {
                        receiving,
                        ..CallParameters::default()
                    },
                },
            }
        }),
        "lv_value.set(await lo_bar.get().get());"
    );
}

fn dynamic_class_call(b: &mut TreeBuilder) -> Statement {
    Statement::Call {
        call: MethodCallChain {
            receiver: Receiver::DynamicClass {
                name: DynamicName::Literal {
                    value: "ZCL_X".to_string(),
                },
            },
            method: MethodRef::Named { name: b.token("m") },
            parameters: CallParameters::default(),
        },
    }
}

#[test]
fn test_dynamic_class_call() {
    let code = statement(dynamic_class_call);
    assert_eq!(
        code,
        "if (abap.Classes['ZCL_X'] === undefined && abap.Classes['CX_SY_DYN_CALL_ILLEGAL_CLASS'] === undefined) { throw \"CX_SY_DYN_CALL_ILLEGAL_CLASS not found\"; }\n\
         if (abap.Classes['ZCL_X'] === undefined) { throw new abap.Classes['CX_SY_DYN_CALL_ILLEGAL_CLASS'](); }\n\
         await abap.Classes['ZCL_X'].m();"
    );
}

#[test]
fn test_dynamic_method_guard_order() {
    let code = statement(|b| {
        let chain = b.field("lo_bar");
        let name = b.field("lv_method");
        Statement::Call {
            call: MethodCallChain {
                receiver: Receiver::Instance { chain },
                method: MethodRef::Dynamic {
                    name: DynamicName::Field { chain: name },
                },
                parameters: CallParameters::default(),
            },
        }
    });
    let lines: Vec<&str> = code.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("abap.Classes['CX_SY_DYN_CALL_ILLEGAL_METHOD'] === undefined"));
    assert!(lines[1].starts_with("if (lo_bar.get()[lv_method.get().toLowerCase()] === undefined) { throw new"));
    assert_eq!(lines[2], "await lo_bar.get()[lv_method.get().toLowerCase()]();");
}

#[test]
fn test_dynamic_interface_method_name() {
    let code = statement(|b| {
        let chain = b.field("lo_bar");
        Statement::Call {
            call: MethodCallChain {
                receiver: Receiver::Instance { chain },
                method: MethodRef::Dynamic {
                    name: DynamicName::Literal {
                        value: "ZIF_X~RUN".to_string(),
                    },
                },
                parameters: CallParameters::default(),
            },
        }
    });
    assert_eq!(
        code,
        "if (lo_bar.get().zif_x$run === undefined && abap.Classes['CX_SY_DYN_CALL_ILLEGAL_METHOD'] === undefined) { throw \"CX_SY_DYN_CALL_ILLEGAL_METHOD not found\"; }\n\
         if (lo_bar.get().zif_x$run === undefined) { throw new abap.Classes['CX_SY_DYN_CALL_ILLEGAL_METHOD'](); }\n\
         await lo_bar.get().zif_x$run();"
    );
}

/// `lo_bar->('GET')( )` as an operand.
fn dynamic_get(b: &mut TreeBuilder) -> Source {
    let chain = b.field("lo_bar");
    Source::Call {
        call: Box::new(MethodCallChain {
            receiver: Receiver::Instance { chain },
            method: MethodRef::Dynamic {
                name: DynamicName::Literal {
                    value: "GET".to_string(),
                },
            },
            parameters: CallParameters::default(),
        }),
    }
}

const GET_GUARDS: &str = "(() => { \
    if (lo_bar.get().get === undefined && abap.Classes['CX_SY_DYN_CALL_ILLEGAL_METHOD'] === undefined) { throw \"CX_SY_DYN_CALL_ILLEGAL_METHOD not found\"; } \
    if (lo_bar.get().get === undefined) { throw new abap.Classes['CX_SY_DYN_CALL_ILLEGAL_METHOD'](); } \
    })(), ";

#[test]
fn test_guards_in_elseif_condition() {
    let code = program(|b| {
        let condition = b.is_initial("foo", false);
        let open = b.statement(Statement::If { condition });
        let then = int(b, "bar", 1);
        let right = dynamic_get(b);
        let condition = b.eq("lv_a", right);
        let other = b.statement(Statement::ElseIf { condition });
        let body = int(b, "bar", 2);
        let close = b.statement(Statement::EndIf);
        vec![b.structure(StructureKind::If, vec![open, then, other, body, close])]
    });
    assert_eq!(
        code,
        format!(
            "if (abap.compare.initial(foo)) {{\n  \
             bar.set(constant_1);\n\
             }} else if ({}abap.compare.eq(lv_a, await lo_bar.get().get())) {{\n  \
             bar.set(constant_2);\n\
             }}",
            GET_GUARDS
        )
    );
}

#[test]
fn test_guards_in_while_condition() {
    let code = statement(|b| {
        let right = dynamic_get(b);
        Statement::While {
            condition: b.eq("lv_a", right),
        }
    });
    assert_eq!(
        code,
        format!("while ({}abap.compare.eq(lv_a, await lo_bar.get().get())) {{", GET_GUARDS)
    );
}

#[test]
fn test_guards_in_later_when_branch() {
    let code = program(|b| {
        let source = b.source("foo");
        let open = b.statement(Statement::Case { source });
        let value = b.source("lv_a");
        let first = b.statement(Statement::When { values: vec![value] });
        let first_body = int(b, "bar", 1);
        let value = dynamic_get(b);
        let second = b.statement(Statement::When { values: vec![value] });
        let second_body = int(b, "bar", 2);
        let close = b.statement(Statement::EndCase);
        let first = b.structure(StructureKind::When, vec![first, first_body]);
        let second = b.structure(StructureKind::When, vec![second, second_body]);
        vec![b.structure(StructureKind::Case, vec![open, first, second, close])]
    });
    assert_eq!(
        code,
        format!(
            "let unique1 = foo;\n\
             if (abap.compare.eq(unique1, lv_a)) {{\n  \
             bar.set(constant_1);\n\
             }} else if ({}abap.compare.eq(unique1, await lo_bar.get().get())) {{\n  \
             bar.set(constant_2);\n\
             }}",
            GET_GUARDS
        )
    );
}

#[test]
fn test_missing_fallback_exception() {
    let mut b = TreeBuilder::new();
    let call = dynamic_class_call(&mut b);
    let node = b.statement(call);
    let root = b.root(vec![node]);
    let (graph, _) = program_graph();
    let config = TranspilerConfig {
        check_fallback_exceptions: true,
        ..single_config()
    };

    let err = run_unit(&unit(root.clone(), graph.clone()), &program_registry(), config.clone()).unwrap_err();
    assert!(matches!(
        err,
        TranspileError::MissingFallbackException { ref class } if class == "CX_SY_DYN_CALL_ILLEGAL_CLASS"
    ));

    let mut registry = program_registry();
    let mut exception = ClassDefinition::new("CX_SY_DYN_CALL_ILLEGAL_CLASS", "cx_sy_dyn_call_illegal_class.clas.abap");
    exception.global = true;
    registry.add_class(exception);
    assert!(run_unit(&unit(root, graph), &registry, config).is_ok());
}

#[test]
fn test_unsupported_statement_aborts() {
    let err = try_program(|b| {
        let first = int(b, "foo", 1);
        let second = b.statement_with_text(
            Statement::Unsupported {
                name: "SubmitReport".to_string(),
            },
            "SUBMIT zreport.",
        );
        vec![first, second]
    })
    .unwrap_err();
    match err {
        TranspileError::UnsupportedConstruct { kind, text, span } => {
            assert_eq!(kind, "SubmitReport");
            assert_eq!(text, "SUBMIT zreport.");
            assert_eq!(span.start.row, 2);
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_unknown_type_modes() {
    let build = |b: &mut TreeBuilder| Statement::Data {
        name: b.token("foo"),
        ty: AbapType::Unknown {
            name: "ZMISSING".to_string(),
            reason: "not found in dictionary".to_string(),
        },
        value: None,
    };
    assert!(matches!(try_statement(build), Err(TranspileError::UnknownType { .. })));

    let mut b = TreeBuilder::new();
    let statement = build(&mut b);
    let node = b.statement(statement);
    let root = b.root(vec![node]);
    let (graph, _) = program_graph();
    let config = TranspilerConfig {
        unknown_types: crate::UnknownTypes::RuntimeError,
        ..single_config()
    };
    assert_eq!(run_unit(&unit(root, graph), &program_registry(), config).unwrap(), "let foo = undefined;");
}

#[test]
fn test_global_interface_constant() {
    let mut b = TreeBuilder::new();
    let source = Source::chain(b.static_chain("zif_bar", "c_max"));
    let target = b.field("foo");
    let node = b.statement(Statement::Move { source, target });
    let root = b.root(vec![node]);
    let (graph, _) = program_graph();

    let mut registry = program_registry();
    let mut interface = InterfaceDefinition::new("ZIF_BAR", "zif_bar.intf.abap");
    interface.global = true;
    registry.add_interface(interface);

    assert_eq!(
        run_unit(&unit(root, graph), &registry, single_config()).unwrap(),
        "foo.set(abap.Classes['ZIF_BAR'].zif_bar$c_max);"
    );
}

#[test]
fn test_constants_prelude() {
    let mut b = TreeBuilder::new();
    let first = int(&mut b, "foo", 2);
    let second = int(&mut b, "bar", -1);
    let root = b.root(vec![first, second]);
    let (graph, _) = program_graph();
    let config = TranspilerConfig {
        skip_registration: true,
        ..TranspilerConfig::default()
    };
    assert_eq!(
        run_unit(&unit(root, graph), &program_registry(), config).unwrap(),
        "const constant_minus_1 = new abap.types.Integer().set(-1);\n\
         const constant_2 = new abap.types.Integer().set(2);\n\
         foo.set(constant_2);\n\
         bar.set(constant_minus_1);"
    );
}

/// Local `lcl_bar` implementing the given interfaces, implementation on rows 10+.
fn class_unit(
    class: ClassDefinition,
    interfaces: Vec<InterfaceDefinition>,
    method_rows: Option<(u32, u32)>,
    body: Vec<Node>,
) -> crate::UnitInput {
    let (mut graph, program) = program_graph();
    for interface in interfaces {
        graph.add_interface(program, interface);
    }
    graph.add_class(program, class);
    let end = body.last().map_or(10, |n| n.span().end.row);
    let implementation = graph.add_scope(program, ScopeKind::ClassImplementation, "LCL_BAR", FILE, Span::rows(10, end));
    if let Some((from, to)) = method_rows {
        graph.add_scope(implementation, ScopeKind::Method, "RUN", FILE, Span::rows(from, to));
    }
    let root = StructureNode::new(StructureKind::Program, body);
    unit(root, graph)
}

fn class_implementation(b: &mut TreeBuilder, members: impl FnOnce(&mut TreeBuilder) -> Vec<Node>) -> Node {
    let name = b.token("lcl_bar");
    let mut children = vec![b.statement(Statement::ClassImplementation { name })];
    children.extend(members(b));
    children.push(b.statement(Statement::EndClass));
    b.structure(StructureKind::ClassImplementation, children)
}

#[test]
fn test_class_with_interface_constant() {
    let mut class = ClassDefinition::new("LCL_BAR", FILE);
    class.implementing.push("zif_const".to_string());
    class.attributes.instance = vec![
        Attribute::new("MV_A", AbapType::integer()),
        Attribute::new("MV_B", AbapType::string()),
    ];

    let mut registry = program_registry();
    let mut interface = InterfaceDefinition::new("ZIF_CONST", "zif_const.intf.abap");
    interface.global = true;
    interface.attributes.constants =
        vec![Attribute::new("C_MAX", AbapType::integer()).with_value(AttributeValue::Scalar("10".to_string()))];
    registry.add_interface(interface);

    let mut b = TreeBuilder::at_row(10);
    let implementation = class_implementation(&mut b, |_| Vec::new());
    let unit = class_unit(class, Vec::new(), None, vec![implementation]);
    let config = TranspilerConfig {
        constants_prelude: false,
        ..TranspilerConfig::default()
    };

    assert_eq!(
        run_unit(&unit, &registry, config).unwrap(),
        "class lcl_bar {\n  \
         async constructor_(INPUT) {\n    \
         this.me = new abap.types.ABAPObject();\n    \
         this.me.set(this);\n    \
         this.mv_a = new abap.types.Integer();\n    \
         this.mv_b = new abap.types.String();\n    \
         return this;\n  \
         }\n\
         }\n\
         lcl_bar.zif_const$c_max = new abap.types.Integer();\n\
         lcl_bar.zif_const$c_max.set(10);\n\
         abap.Classes['PROG-ZFOO-LCL_BAR'] = lcl_bar;"
    );
}

#[test]
fn test_diamond_interfaces_initialise_once() {
    let mut base = InterfaceDefinition::new("ZIF_C", FILE);
    base.attributes.instance = vec![Attribute::new("MV_C", AbapType::integer())];
    base.attributes.constants =
        vec![Attribute::new("C_X", AbapType::character(1)).with_value(AttributeValue::Scalar("'X'".to_string()))];
    let mut left = InterfaceDefinition::new("ZIF_A", FILE);
    left.implementing.push("ZIF_C".to_string());
    let mut right = InterfaceDefinition::new("ZIF_B", FILE);
    right.implementing.push("ZIF_C".to_string());

    let mut class = ClassDefinition::new("LCL_BAR", FILE);
    class.implementing = vec!["ZIF_A".to_string(), "ZIF_B".to_string()];

    let mut b = TreeBuilder::at_row(10);
    let implementation = class_implementation(&mut b, |_| Vec::new());
    let unit = class_unit(class, vec![base, left, right], None, vec![implementation]);
    let code = run_unit(&unit, &program_registry(), single_config()).unwrap();

    assert_eq!(code.matches("this.zif_c$mv_c = ").count(), 1);
    assert_eq!(code.matches("lcl_bar.zif_c$c_x = ").count(), 1);
    assert!(code.contains("lcl_bar.zif_c$c_x.set('X');"));
}

#[test]
fn test_cyclic_interfaces_terminate() {
    let mut first = InterfaceDefinition::new("ZIF_A", FILE);
    first.implementing.push("ZIF_B".to_string());
    first.attributes.instance = vec![Attribute::new("MV_A", AbapType::integer())];
    let mut second = InterfaceDefinition::new("ZIF_B", FILE);
    second.implementing.push("ZIF_A".to_string());
    second.attributes.constants =
        vec![Attribute::new("C_B", AbapType::integer()).with_value(AttributeValue::Scalar("7".to_string()))];

    let mut class = ClassDefinition::new("LCL_BAR", FILE);
    class.implementing.push("ZIF_A".to_string());

    let mut b = TreeBuilder::at_row(10);
    let implementation = class_implementation(&mut b, |_| Vec::new());
    let unit = class_unit(class, vec![first, second], None, vec![implementation]);
    let code = run_unit(&unit, &program_registry(), single_config()).unwrap();

    assert_eq!(code.matches("this.zif_a$mv_a = ").count(), 1);
    assert_eq!(code.matches("lcl_bar.zif_b$c_b = ").count(), 1);
    assert!(code.contains("lcl_bar.zif_b$c_b.set(7);"));
}

#[test]
fn test_missing_interface_warns() {
    let mut class = ClassDefinition::new("LCL_BAR", FILE);
    class.implementing.push("ZIF_MISSING".to_string());

    let mut b = TreeBuilder::at_row(10);
    let implementation = class_implementation(&mut b, |_| Vec::new());
    let unit = class_unit(class, Vec::new(), None, vec![implementation]);
    let mut transpiler = Transpiler::new(single_config());
    let output = transpiler.transpile_unit(&unit, &program_registry()).unwrap();

    let messages: Vec<&str> = output.diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert!(messages.contains(&"interface ZIF_MISSING not found, attributes skipped"));
    assert!(messages.contains(&"interface ZIF_MISSING not found, statics skipped"));
}

#[test]
fn test_method_parameters() {
    let mut run = MethodDefinition::new("RUN");
    run.parameters = vec![
        MethodParameter {
            name: "IV".to_string(),
            direction: ParameterDirection::Importing,
            ty: AbapType::integer(),
            optional: false,
            preferred: false,
        },
        MethodParameter {
            name: "RV".to_string(),
            direction: ParameterDirection::Returning,
            ty: AbapType::integer(),
            optional: false,
            preferred: false,
        },
    ];
    let mut class = ClassDefinition::new("LCL_BAR", FILE);
    class.methods.push(run);

    let mut b = TreeBuilder::at_row(10);
    let implementation = class_implementation(&mut b, |b| {
        let name = b.token("run");
        let header = b.statement(Statement::Method { name });
        let source = b.source("iv");
        let target = b.field("rv");
        let body = b.statement(Statement::Move { source, target });
        let end = b.statement(Statement::EndMethod);
        vec![b.structure(StructureKind::Method, vec![header, body, end])]
    });
    let unit = class_unit(class, Vec::new(), Some((11, 13)), vec![implementation]);

    assert_eq!(
        run_unit(&unit, &program_registry(), single_config()).unwrap(),
        "class lcl_bar {\n  \
         async constructor_(INPUT) {\n    \
         this.me = new abap.types.ABAPObject();\n    \
         this.me.set(this);\n    \
         return this;\n  \
         }\n  \
         async run(INPUT) {\n    \
         let iv = new abap.types.Integer();\n    \
         if (INPUT && INPUT.iv) {iv = INPUT.iv;}\n    \
         let rv = new abap.types.Integer();\n    \
         rv.set(iv);\n    \
         return rv;\n  \
         }\n\
         }"
    );
}

#[test]
fn test_local_interface() {
    let mut interface = InterfaceDefinition::new("LIF_FOO", FILE);
    interface.attributes.constants =
        vec![Attribute::new("C_ONE", AbapType::integer()).with_value(AttributeValue::Scalar("1".to_string()))];

    let mut b = TreeBuilder::at_row(5);
    let name = b.token("lif_foo");
    let open = b.statement(Statement::Interface { name });
    let close = b.statement(Statement::EndInterface);
    let root = b.root(vec![b.structure(StructureKind::Interface, vec![open, close])]);

    let (mut graph, program) = program_graph();
    graph.add_interface(program, interface);
    graph.add_scope(program, ScopeKind::Interface, "LIF_FOO", FILE, Span::rows(5, 6));
    let config = TranspilerConfig {
        constants_prelude: false,
        ..TranspilerConfig::default()
    };

    assert_eq!(
        run_unit(&unit(root, graph), &program_registry(), config).unwrap(),
        "class lif_foo {\n\
         }\n\
         lif_foo.lif_foo$c_one = new abap.types.Integer();\n\
         lif_foo.lif_foo$c_one.set(1);\n\
         abap.Classes['PROG-ZFOO-LIF_FOO'] = lif_foo;"
    );
}

#[test]
fn test_run_is_deterministic() {
    let build = || {
        let mut b = TreeBuilder::new();
        let open = b.statement(Statement::Do { times: None });
        let body = b.statement(Statement::Exit);
        let close = b.statement(Statement::EndDo);
        let root = b.root(vec![b.structure(StructureKind::Do, vec![open, body, close])]);
        let (graph, _) = program_graph();
        unit(root, graph)
    };
    let project = crate::ProjectInput {
        registry: program_registry(),
        units: vec![build(), build()],
    };

    let mut transpiler = Transpiler::new(single_config());
    let first = transpiler.run(&project).unwrap();
    let second = transpiler.run(&project).unwrap();
    let js = |outputs: &[crate::UnitOutput]| outputs.iter().map(|o| o.js.clone()).collect::<Vec<_>>();

    assert_eq!(js(&first), js(&second));
    assert!(first[0].js.starts_with("let unique1 = 1;"));
    assert!(first[1].js.starts_with("let unique2 = 1;"));
    assert_eq!(first[0].filename, "zfoo.prog.js");
}

#[test]
fn test_run_stops_at_failing_unit() {
    let mut b = TreeBuilder::new();
    let node = b.statement(Statement::Unsupported {
        name: "SubmitReport".to_string(),
    });
    let root = b.root(vec![node]);
    let (graph, _) = program_graph();
    let project = crate::ProjectInput {
        registry: program_registry(),
        units: vec![unit(root, graph.clone()), unit(StructureNode::new(StructureKind::Program, Vec::new()), graph)],
    };

    let mut transpiler = Transpiler::new(single_config());
    assert!(matches!(
        transpiler.run(&project),
        Err(TranspileError::UnsupportedConstruct { .. })
    ));
}

#[test]
fn test_source_map_output() {
    let mut b = TreeBuilder::new();
    let condition = b.is_initial("foo", false);
    let open = b.statement(Statement::If { condition });
    let body = int(&mut b, "bar", 1);
    let close = b.statement(Statement::EndIf);
    let root = b.root(vec![b.structure(StructureKind::If, vec![open, body, close])]);
    let (graph, _) = program_graph();
    let config = TranspilerConfig {
        source_maps: true,
        skip_registration: true,
        ..TranspilerConfig::default()
    };

    let mut transpiler = Transpiler::new(config);
    let output = transpiler.transpile_unit(&unit(root, graph), &program_registry()).unwrap();
    let map: crate::SourceMap = serde_json::from_str(output.source_map.as_deref().unwrap()).unwrap();

    assert_eq!(map.file, "zfoo.prog.js");
    assert_eq!(map.source, FILE);
    // one prelude line for constant_1
    let body = map.mappings.iter().find(|m| m.source_row == 2).unwrap();
    assert_eq!((body.generated_line, body.generated_column), (3, 3));
}
