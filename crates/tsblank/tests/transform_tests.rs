//! Concrete erasure scenarios. Expected strings are assembled from the
//! surviving segments plus explicit space runs, so the byte math is
//! visible in the test itself.

use tsblank::{transform, transform_collecting, UnsupportedKind};

fn sp(n: usize) -> String {
    " ".repeat(n)
}

#[test]
fn variable_annotation_and_non_null_blank_to_spaces() {
    // `: number` (8 bytes) and the `!` each become spaces.
    let output = transform("let x: number = 1!;");
    assert_eq!(output, format!("let x{} = 1 ;", sp(8)));
}

#[test]
fn as_and_satisfies_tails_blank_after_the_expression() {
    let output = transform("[] as [] satisfies [];");
    assert_eq!(output, format!("[]{};", sp(19)));
}

#[test]
fn type_only_import_after_runtime_code_gets_semicolon_first_blank() {
    let output = transform("let z = 1;import type T from \"x\"; a();");
    assert_eq!(output, format!("let z = 1;;{} a();", sp(22)));
}

#[test]
fn type_only_import_before_any_runtime_code_blanks_plainly() {
    let output = transform("import type T from \"x\";\na();");
    assert_eq!(output, format!("{}\na();", sp(23)));
}

#[test]
fn class_generics_heritage_and_member_signatures_blank() {
    let source = "class C<T> extends B<T> implements I { m<U>(a?: string): void {} }";
    let output = transform(source);
    let expected = format!(
        "class C{} extends B{} {} {{ m{}(a{}{}){} {{}} }}",
        sp(3),
        sp(3),
        sp(12),
        sp(3),
        sp(1),
        sp(8),
        sp(6),
    );
    assert_eq!(output, expected);
}

#[test]
fn this_parameter_blanks_with_its_trailing_comma() {
    let source = "function f(this: T, x: number): void { return; }";
    let output = transform(source);
    let expected = format!("function f({} x{}){} {{ return; }}", sp(8), sp(8), sp(6));
    assert_eq!(output, expected);
}

#[test]
fn arrow_return_type_spanning_lines_moves_the_close_paren() {
    let source = "const f = (a: number)\n  : number\n  => a;";
    let output = transform(source);
    let expected = format!("const f = (a{} \n{}\n )=> a;", sp(8), sp(10));
    assert_eq!(output, expected);
    // The rewritten close paren sits immediately before `=>`.
    assert!(output.contains(")=>"));
}

#[test]
fn arrow_return_type_on_one_line_blanks_in_place() {
    let source = "const f = (a: number): number => a;";
    let output = transform(source);
    assert_eq!(output, format!("const f = (a{}){} => a;", sp(8), sp(8)));
}

#[test]
fn missing_semicolon_assertion_inserts_statement_terminator() {
    // Without the `;`-first form, blanking `as string` would let the
    // statement swallow the parenthesized call on the next line.
    let source = "foo\nbar as string\n(baz);";
    let output = transform(source);
    assert_eq!(output, format!("foo\nbar;{}\n(baz);", sp(9)));
}

#[test]
fn assertion_with_explicit_semicolon_keeps_plain_blank() {
    let source = "bar as string;\n(baz);";
    let output = transform(source);
    assert_eq!(output, format!("bar{};\n(baz);", sp(10)));
}

#[test]
fn interface_and_type_alias_blank_as_statements() {
    let source = "interface I { a: number }\ntype T = string;\nlet x = 1;";
    let output = transform(source);
    assert_eq!(output, format!("{}\n{}\nlet x = 1;", sp(25), sp(16)));
}

#[test]
fn type_alias_after_runtime_code_starts_with_semicolon() {
    let source = "let a = 1\ntype T = number\nlet b = 2";
    let output = transform(source);
    assert_eq!(output, format!("let a = 1\n;{}\nlet b = 2", sp(14)));
}

#[test]
fn declare_statements_blank_entirely() {
    let source = "declare const a: number;\ndeclare function f(): void;\nlet live = 1;";
    let output = transform(source);
    assert_eq!(output, format!("{}\n{}\nlet live = 1;", sp(24), sp(27)));
}

#[test]
fn declare_class_and_namespace_blank_entirely() {
    let source = "declare class C { m(): void }\ndeclare namespace N { const x: number; }";
    let output = transform(source);
    assert_eq!(output, format!("{}\n{}", sp(29), sp(40)));
}

#[test]
fn overload_signatures_blank_but_implementation_stays() {
    let source = "function f(x: number): void;\nfunction f(x: any) {}";
    let output = transform(source);
    assert_eq!(output, format!("{}\nfunction f(x{}) {{}}", sp(28), sp(5)));
}

#[test]
fn abstract_members_blank_with_their_modifier() {
    let source = "class C { abstract m(): void; n() {} }";
    let output = transform(source);
    assert_eq!(output, format!("class C {{ {} n() {{}} }}", sp(19)));
}

#[test]
fn property_modifiers_and_markers_blank() {
    let source = "class C { private readonly a?: number; b!: string; }";
    let output = transform(source);
    let expected = format!(
        "class C {{ {} {} a{}{}; b{}{}; }}",
        sp(7),
        sp(8),
        sp(1),
        sp(8),
        sp(1),
        sp(8),
    );
    assert_eq!(output, expected);
}

#[test]
fn call_and_new_type_arguments_blank() {
    let source = "f<number>(1); new Map<string, number>(); tag<T>`x`;";
    let output = transform(source);
    let expected = format!("f{}(1); new Map{}(); tag{}`x`;", sp(8), sp(16), sp(3));
    assert_eq!(output, expected);
}

#[test]
fn definite_assignment_on_variables_blanks() {
    let output = transform("let x!: number;");
    assert_eq!(output, format!("let x{}{};", sp(1), sp(8)));
}

#[test]
fn type_only_named_specifiers_blank_with_trailing_comma() {
    let source = "import { type A, B } from \"m\"; export { type C, D };";
    let output = transform(source);
    let expected = format!(
        "import {{ {} B }} from \"m\"; export {{ {} D }};",
        sp(7),
        sp(7),
    );
    assert_eq!(output, expected);
}

#[test]
fn export_type_statement_blanks_entirely() {
    let source = "export type { A } from \"m\";\nexport {};";
    let output = transform(source);
    assert_eq!(output, format!("{}\nexport {{}};", sp(27)));
}

#[test]
fn getters_setters_and_optional_methods_blank_annotations() {
    let source = "class C { get v(): number { return 1; } set v(x: number) {} m?(): void {} }";
    let output = transform(source);
    let expected = format!(
        "class C {{ get v(){} {{ return 1; }} set v(x{}) {{}} m{}(){} {{}} }}",
        sp(8),
        sp(8),
        sp(1),
        sp(6),
    );
    assert_eq!(output, expected);
}

#[test]
fn optional_chain_call_with_type_arguments_blanks() {
    let output = transform("a?.b<T>();");
    assert_eq!(output, format!("a?.b{}();", sp(3)));
}

#[test]
fn index_signatures_blank_inside_classes() {
    let source = "class C { [k: string]: number; x = 1; }";
    let output = transform(source);
    assert_eq!(output, format!("class C {{ {} x = 1; }}", sp(20)));
}

#[test]
fn decorators_survive_while_their_generics_blank() {
    let output = transform("@register<T>() class C {}");
    assert_eq!(output, format!("@register{}() class C {{}}", sp(3)));
}

// =============================================================================
// Unsupported constructs: reported, left verbatim
// =============================================================================

#[test]
fn runtime_enum_is_reported_and_left_verbatim() {
    let source = "enum E { A, B }";
    let result = transform_collecting(source);
    assert_eq!(result.output, source);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].kind, UnsupportedKind::RuntimeEnum);
}

#[test]
fn runtime_namespace_is_reported_and_left_verbatim() {
    let source = "namespace N { export const x = 1; }";
    let result = transform_collecting(source);
    assert_eq!(result.output, source);
    assert_eq!(result.diagnostics[0].kind, UnsupportedKind::RuntimeNamespace);
}

#[test]
fn import_equals_and_export_equals_are_reported() {
    let source = "import fs = require(\"fs\");\nexport = fs;";
    let result = transform_collecting(source);
    assert_eq!(result.output, source);
    let kinds: Vec<_> = result.diagnostics.iter().map(|d| d.kind).collect();
    assert!(kinds.contains(&UnsupportedKind::ImportEquals));
    assert!(kinds.contains(&UnsupportedKind::ExportEquals));
}

#[test]
fn legacy_angle_assertion_is_reported_and_left_verbatim() {
    let source = "const n = <number>value;";
    let result = transform_collecting(source);
    assert_eq!(result.output, source);
    assert_eq!(
        result.diagnostics[0].kind,
        UnsupportedKind::LegacyTypeAssertion
    );
}

#[test]
fn parameter_properties_report_each_offending_modifier() {
    let source = "class C { constructor(public a: number, private b: string) {} }";
    let result = transform_collecting(source);
    let properties = result
        .diagnostics
        .iter()
        .filter(|d| d.kind == UnsupportedKind::ParameterProperty)
        .count();
    assert_eq!(properties, 2);
    // Modifiers stay; the annotations still blank.
    assert!(result.output.contains("public a"));
    assert!(result.output.contains("private b"));
    assert!(!result.output.contains(": number"));
}

#[test]
fn diagnostics_carry_node_extents() {
    let source = "let ok = 1; enum E {}";
    let result = transform_collecting(source);
    let diagnostic = &result.diagnostics[0];
    assert_eq!(diagnostic.pos as usize, source.find("enum").unwrap());
    assert_eq!(diagnostic.end as usize, source.len());
    assert!(!diagnostic.message.is_empty());
}

// =============================================================================
// Function body scoping
// =============================================================================

#[test]
fn blanked_statement_inside_function_body_does_not_use_outer_seen_js() {
    let source = "let a = 1;\nfunction f() { type T = 1; return 2; }";
    let output = transform(source);
    // Inside the fresh body scope no runtime code precedes the alias, so
    // it blanks without a `;`.
    let expected = format!("let a = 1;\nfunction f() {{ {} return 2; }}", sp(11));
    assert_eq!(output, expected);
}

#[test]
fn blanked_statement_after_runtime_code_in_body_gets_semicolon() {
    let source = "function f() { let a = 1\ntype T = 1\nreturn a }";
    let output = transform(source);
    let expected = format!("function f() {{ let a = 1\n;{}\nreturn a }}", sp(9));
    assert_eq!(output, expected);
}
