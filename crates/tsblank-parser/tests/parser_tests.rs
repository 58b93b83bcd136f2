use tsblank_parser::syntax_kind::*;
use tsblank_parser::{for_each_child, parse_source, NodeIndex};
use tsblank_scanner::SyntaxKind;

fn statements_of(result: &tsblank_parser::ParseResult) -> Vec<NodeIndex> {
    result.arena.list(result.root).items.nodes.clone()
}

#[test]
fn parses_variable_statement_with_annotation_extents() {
    let source = "let x: number = 1;";
    let result = parse_source(source);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let statements = statements_of(&result);
    assert_eq!(statements.len(), 1);
    let stmt = statements[0];
    assert_eq!(result.arena.kind(stmt), VARIABLE_STATEMENT);
    // Statement includes the terminating semicolon.
    assert_eq!(result.arena.end(stmt) as usize, source.len());

    let list = result.arena.variable_statement(stmt).declarations;
    let decl = result.arena.variable_declaration_list(list).declarations.nodes[0];
    let data = result.arena.variable_declaration(decl);
    // Annotation spans from the `:` through `number`.
    let ann = data.type_annotation;
    assert!(ann.is_some());
    assert_eq!(result.arena.pos(ann) as usize, source.find(':').unwrap());
    assert_eq!(result.arena.end(ann) as usize, source.find(" =").unwrap());
}

#[test]
fn parses_class_with_generics_heritage_and_members() {
    let source = "class C<T> extends B<T> implements I { m<U>(a?: string): void {} }";
    let result = parse_source(source);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let statements = statements_of(&result);
    let class = statements[0];
    assert_eq!(result.arena.kind(class), CLASS_DECLARATION);
    let data = result.arena.class(class);

    let type_parameters = data.type_parameters.as_ref().unwrap();
    // List pos sits just past `<`, so the `<` is at pos - 1.
    assert_eq!(type_parameters.pos as usize, source.find("<T>").unwrap() + 1);

    let heritage = data.heritage_clauses.as_ref().unwrap();
    assert_eq!(heritage.len(), 2);
    let extends_clause = result.arena.heritage(heritage.nodes[0]);
    assert_eq!(extends_clause.token, SyntaxKind::ExtendsKeyword as u16);
    let implements_clause = result.arena.heritage(heritage.nodes[1]);
    assert_eq!(implements_clause.token, SyntaxKind::ImplementsKeyword as u16);
    assert_eq!(
        result.arena.pos(heritage.nodes[1]) as usize,
        source.find("implements").unwrap()
    );

    let member = data.members.nodes[0];
    assert_eq!(result.arena.kind(member), METHOD_DECLARATION);
    let method = result.arena.function(member);
    assert!(method.type_parameters.is_some());
    assert!(method.return_type.is_some());
    let param = result.arena.parameter(method.parameters.nodes[0]);
    assert!(param.question_token.is_some());
    assert!(param.type_annotation.is_some());
}

#[test]
fn arrow_function_records_arrow_position() {
    let source = "const f = (a: number): number => a;";
    let result = parse_source(source);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let statements = statements_of(&result);
    let stmt = statements[0];
    let list = result.arena.variable_statement(stmt).declarations;
    let decl = result.arena.variable_declaration_list(list).declarations.nodes[0];
    let init = result.arena.variable_declaration(decl).initializer;
    assert_eq!(result.arena.kind(init), ARROW_FUNCTION);
    let arrow = result.arena.function(init);
    assert_eq!(arrow.arrow_pos as usize, source.find("=>").unwrap());
    assert!(arrow.return_type.is_some());
    assert_eq!(
        result.arena.pos(arrow.return_type) as usize,
        source.find("):").unwrap() + 1
    );
}

#[test]
fn simple_arrow_without_parens_parses() {
    let result = parse_source("const id = x => x;");
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
}

#[test]
fn as_and_satisfies_chain_nests_left() {
    let source = "[] as [] satisfies [];";
    let result = parse_source(source);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let statements = statements_of(&result);
    let stmt = statements[0];
    assert_eq!(result.arena.kind(stmt), EXPRESSION_STATEMENT);
    let satisfies = result.arena.wrapped(stmt).inner;
    assert_eq!(result.arena.kind(satisfies), SATISFIES_EXPRESSION);
    let inner = result.arena.type_assertion(satisfies).expression;
    assert_eq!(result.arena.kind(inner), AS_EXPRESSION);
    // The satisfies node ends before the `;`.
    assert_eq!(result.arena.end(satisfies) as usize, source.len() - 1);
}

#[test]
fn type_only_imports_are_flagged() {
    let source = r#"import type T from "x"; import { type A, B } from "y";"#;
    let result = parse_source(source);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let statements = statements_of(&result);

    let clause = result.arena.import_declaration(statements[0]).import_clause;
    assert!(result.arena.import_clause(clause).is_type_only);

    let clause = result.arena.import_declaration(statements[1]).import_clause;
    let data = result.arena.import_clause(clause);
    assert!(!data.is_type_only);
    let named = result.arena.list(data.named_bindings);
    let first = result.arena.specifier(named.items.nodes[0]);
    assert!(first.is_type_only);
    let second = result.arena.specifier(named.items.nodes[1]);
    assert!(!second.is_type_only);
}

#[test]
fn import_type_from_binds_a_default_named_type() {
    let source = r#"import type from "m";"#;
    let result = parse_source(source);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let statements = statements_of(&result);
    let clause = result.arena.import_declaration(statements[0]).import_clause;
    let data = result.arena.import_clause(clause);
    assert!(!data.is_type_only);
    assert_eq!(result.arena.identifier_text(data.name), Some("type"));
}

#[test]
fn import_equals_and_export_equals_parse() {
    let source = r#"import fs = require("fs"); export = fs;"#;
    let result = parse_source(source);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let statements = statements_of(&result);
    assert_eq!(result.arena.kind(statements[0]), IMPORT_EQUALS_DECLARATION);
    assert_eq!(result.arena.kind(statements[1]), EXPORT_ASSIGNMENT);
    assert!(result.arena.export_assignment(statements[1]).is_export_equals);
}

#[test]
fn legacy_angle_assertion_parses_with_type_first() {
    let source = "const n = <number>value;";
    let result = parse_source(source);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let statements = statements_of(&result);
    let list = result.arena.variable_statement(statements[0]).declarations;
    let decl = result.arena.variable_declaration_list(list).declarations.nodes[0];
    let init = result.arena.variable_declaration(decl).initializer;
    assert_eq!(result.arena.kind(init), TYPE_ASSERTION_EXPRESSION);
}

#[test]
fn call_with_type_arguments_survives_comparison_ambiguity() {
    let call = parse_source("f<number>(1);");
    assert!(call.diagnostics.is_empty(), "{:?}", call.diagnostics);
    let statements = statements_of(&call);
    let expr = call.arena.wrapped(statements[0]).inner;
    assert_eq!(call.arena.kind(expr), CALL_EXPRESSION);
    assert!(call.arena.call(expr).type_arguments.is_some());

    let comparison = parse_source("a < b > c;");
    assert!(comparison.diagnostics.is_empty(), "{:?}", comparison.diagnostics);
    let statements = statements_of(&comparison);
    let expr = comparison.arena.wrapped(statements[0]).inner;
    assert_eq!(comparison.arena.kind(expr), BINARY_EXPRESSION);
}

#[test]
fn overload_signatures_have_no_body() {
    let source = "function f(x: number): void;\nfunction f(x: string): void {}";
    let result = parse_source(source);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let statements = statements_of(&result);
    assert_eq!(statements.len(), 2);
    assert!(result.arena.function(statements[0]).body.is_none());
    assert!(result.arena.function(statements[1]).body.is_some());
}

#[test]
fn this_parameter_is_stored_as_identifier_text() {
    let source = "function f(this: T, x: number): void { return; }";
    let result = parse_source(source);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let statements = statements_of(&result);
    let function = result.arena.function(statements[0]);
    let first = result.arena.parameter(function.parameters.nodes[0]);
    assert_eq!(result.arena.identifier_text(first.name), Some("this"));
}

#[test]
fn enum_namespace_interface_and_alias_parse() {
    let source = "enum E { A, B = 2 }\nnamespace N { export const x = 1; }\ninterface I extends J { a: number; m(): void; }\ntype T<U> = { [K in keyof U]?: U[K] };";
    let result = parse_source(source);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let statements = statements_of(&result);
    assert_eq!(result.arena.kind(statements[0]), ENUM_DECLARATION);
    assert_eq!(result.arena.kind(statements[1]), MODULE_DECLARATION);
    assert_eq!(result.arena.kind(statements[2]), INTERFACE_DECLARATION);
    assert_eq!(result.arena.kind(statements[3]), TYPE_ALIAS_DECLARATION);
}

#[test]
fn template_expressions_round_trip_spans() {
    let source = "const s = `a${x}b${y}c`;";
    let result = parse_source(source);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
}

#[test]
fn complex_types_parse_to_correct_extents() {
    let source = "let a: A | B & C, b: (x: number) => void, c: { f(): T; g: string }, d: [number, ...string[]], e: A extends B ? C : D, f: keyof typeof window;";
    let result = parse_source(source);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
}

#[test]
fn child_iteration_visits_every_declared_node() {
    let source = "class C { constructor(private a: number) {} }";
    let result = parse_source(source);
    let statements = statements_of(&result);
    let mut stack = vec![statements[0]];
    let mut visited = 0usize;
    while let Some(node) = stack.pop() {
        visited += 1;
        for_each_child(&result.arena, node, &mut |child| stack.push(child));
    }
    assert!(visited > 5);
}

#[test]
fn destructuring_parameters_and_defaults_parse() {
    let source = "function f({ a, b: [c] = [] }: Opts, ...rest: number[]) {}";
    let result = parse_source(source);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
}

#[test]
fn optional_chaining_and_non_null_parse() {
    let source = "a?.b?.[c]!.d?.(); x!;";
    let result = parse_source(source);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
}

#[test]
fn decorators_attach_to_class_modifier_list() {
    let source = "@sealed export class C { @log m() {} }";
    let result = parse_source(source);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let statements = statements_of(&result);
    let class = result.arena.class(statements[0]);
    let modifiers = class.modifiers.as_ref().unwrap();
    assert_eq!(result.arena.kind(modifiers.nodes[0]), DECORATOR);
    assert_eq!(
        result.arena.kind(modifiers.nodes[1]),
        SyntaxKind::ExportKeyword as u16
    );
}

#[test]
fn nested_duplicate_labels_are_reported() {
    let nested = parse_source("outer: while (a) { outer: while (b) { break outer; } }");
    assert!(nested
        .diagnostics
        .iter()
        .any(|d| d.message.contains("duplicate label")));

    // Sequential reuse and reuse inside a nested function are both fine.
    let sequential = parse_source("a: x();\na: y();\nb: function f() { b: z(); }");
    assert!(
        !sequential
            .diagnostics
            .iter()
            .any(|d| d.message.contains("duplicate label")),
        "{:?}",
        sequential.diagnostics
    );
}

#[test]
fn malformed_input_still_produces_a_tree() {
    let result = parse_source("let = ;;; class {");
    assert!(!result.diagnostics.is_empty());
    assert!(result.arena.node_count() > 0);
}
