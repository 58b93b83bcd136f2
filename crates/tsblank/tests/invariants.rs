//! Universal invariants, checked over a corpus of inputs: length
//! preservation, newline preservation, the blank-byte alphabet,
//! idempotence on plain JavaScript, and fixpoint stability on error-free
//! TypeScript.

use tsblank::{transform, transform_collecting};

const TYPESCRIPT_CORPUS: &[&str] = &[
    "let x: number = 1;",
    "const f = (a: number): number => a;",
    "const g = (a: number)\n  : number\n  => a;",
    "function f(this: T, x = 1, ...rest: string[]): void {}",
    "class C<T extends object = {}> extends B<T> implements I, J {\n  private readonly a?: number;\n  b!: string = \"b\";\n  static s = 1;\n  constructor() { super(); }\n  m<U>(a?: string): void {}\n  get v(): number { return 1; }\n  set v(x: number) {}\n  static { C.s = 2; }\n}",
    "interface I<T> extends J {\n  a: number;\n  m(x: string): T;\n  [k: string]: unknown;\n  new (): I<T>;\n}",
    "type Deep<T> = { [K in keyof T as `k${string & K}`]?: T[K] extends object ? Deep<T[K]> : T[K] };",
    "import type T from \"m\";\nimport { type A, B as C } from \"m\";\nimport * as ns from \"n\";\nimport \"side-effect\";\nexport type { X } from \"m\";\nexport { B, type Y };\nexport * as all from \"m\";\nexport default class {}",
    "declare const env: string;\ndeclare function get(): void;\ndeclare class D {}\ndeclare namespace N { const x: number; }\ndeclare module \"m\" { const y: string; }\ndeclare enum E { A }",
    "const a = b as const;\nconst c = d satisfies number;\nconst e = f! + g!;",
    "function over(x: number): void;\nfunction over(x: string): void;\nfunction over(x: any) {}",
    "for (let i: number = 0; i < 10; i++) { loop(i); }\nfor (const k in obj) {}\nfor await (const v of gen()) {}",
    "switch (x as Kind) {\n  case \"a\": handle(y!); break;\n  default: fallback();\n}",
    "try { risky(); } catch (e: unknown) { report(e); } finally { done(); }",
    "label: while (true) { break label; }",
    "const tpl = `a${x as string}b${y}c`;\nconst tagged = tag<T>`v${n}`;",
    "const o = { a, b: 1, [k]: 2, m(x: T): U { return u; }, get g(): T { return t; }, ...rest };",
    "async function af(): Promise<void> { await p; }\nasync (x: T) => x;\nfunction* gen(): Iterable<number> { yield 1; yield* more(); }",
    "let { a, b: { c = 1 }, ...rest }: Shape = obj;\nlet [x, , y = 2]: [number, void, number] = arr;",
    "el?.addEventListener(\"click\", (e: Event): void => handle(e));",
    "new Map<string, Set<number>>([[k, new Set<number>()]]);",
    "@sealed\nexport default class Widget extends Base<Props> {\n  @observable state?: State;\n  @action update(next: State): void { this.state = next; }\n}",
    "foo\nbar as string\n(baz);",
    "const assertion = <T,>(value: unknown): T => value as T;",
    "x satisfies Y\nnext();",
    "interface Win {\r\n  a: number;\r\n}\r\nlet crlf: string = \"v\";\r\n",
    "class D {\r\n  declare f: number;\r\n  g(x?: boolean): void {}\r\n}\r\n",
    "const h = (a: number)\r\n  : number\r\n  => a;\r\n",
];

const PLAIN_JS_CORPUS: &[&str] = &[
    "",
    "42;",
    "let x = 1;\nconst y = x + 2;",
    "function add(a, b) { return a + b; }",
    "class Point { constructor(x, y) { this.x = x; this.y = y; } }",
    "const f = (a) => a * 2;\nconst g = a => a;",
    "const re = /ab[/]c/g;\nconst q = a / b / c;",
    "const s = `x${1 + 2}y`;\nconst obj = { a: 1, 'b': 2, [c]: 3 };",
    "if (a) { b(); } else { c(); }\nwhile (d) e();\ndo { f(); } while (g);",
    "import x from \"m\";\nimport { a, b } from \"n\";\nexport { a };\nexport default x;",
    "async function main() { await Promise.all([]); }",
    "label: for (const k of list) { if (k) continue label; }",
    "a?.b?.().c ?? d;",
    "new.target; import.meta;",
    "const µ = 'µ€𝄞';",
    "#!/usr/bin/env node\nconsole.log('sh');",
    "let a = 1;\r\nfunction f() {\r\n  return a;\r\n}\r\n",
];

/// Positions of `\n` and `\r` bytes. Both must survive erasure untouched
/// so CRLF line structure is preserved byte-for-byte.
fn line_break_positions(text: &str) -> Vec<(usize, u8)> {
    text.bytes()
        .enumerate()
        .filter(|(_, b)| *b == b'\n' || *b == b'\r')
        .collect()
}

#[test]
fn length_is_preserved_for_all_inputs() {
    for source in TYPESCRIPT_CORPUS.iter().chain(PLAIN_JS_CORPUS) {
        let output = transform(source);
        assert_eq!(output.len(), source.len(), "length changed for {source:?}");
    }
}

#[test]
fn line_break_positions_are_preserved_for_all_inputs() {
    for source in TYPESCRIPT_CORPUS.iter().chain(PLAIN_JS_CORPUS) {
        let output = transform(source);
        assert_eq!(
            line_break_positions(&output),
            line_break_positions(source),
            "line breaks moved for {source:?}"
        );
    }
}

#[test]
fn changed_bytes_are_only_space_semicolon_or_close_paren() {
    for source in TYPESCRIPT_CORPUS.iter().chain(PLAIN_JS_CORPUS) {
        let output = transform(source);
        for (index, (a, b)) in source.bytes().zip(output.bytes()).enumerate() {
            if a != b {
                assert!(
                    b == b' ' || b == b';' || b == b')',
                    "byte {index} of {source:?} became {:?}",
                    b as char
                );
            }
        }
    }
}

#[test]
fn plain_javascript_passes_through_unchanged() {
    for source in PLAIN_JS_CORPUS {
        let result = transform_collecting(source);
        assert_eq!(&result.output, source, "plain JS was altered");
        assert!(result.diagnostics.is_empty(), "diagnostics on plain JS");
    }
}

#[test]
fn transform_is_a_fixpoint_on_error_free_inputs() {
    for source in TYPESCRIPT_CORPUS.iter().chain(PLAIN_JS_CORPUS) {
        let result = transform_collecting(source);
        if !result.diagnostics.is_empty() {
            continue;
        }
        let again = transform(&result.output);
        assert_eq!(again, result.output, "not a fixpoint for {source:?}");
    }
}

#[test]
fn unsupported_constructs_never_break_the_length_invariants() {
    let sources = [
        "enum Color { Red }",
        "namespace Pkg { export const v = 1; }",
        "import old = require(\"old\");",
        "export = thing;",
        "const v = <T>value;",
        "class P { constructor(readonly field: number) {} }",
    ];
    for source in sources {
        let result = transform_collecting(source);
        assert!(!result.diagnostics.is_empty(), "expected an error: {source}");
        assert_eq!(result.output.len(), source.len());
        assert_eq!(
            line_break_positions(&result.output),
            line_break_positions(source)
        );
    }
}
