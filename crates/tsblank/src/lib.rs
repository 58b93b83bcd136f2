//! Erase TypeScript type syntax in place.
//!
//! [`transform`] takes TypeScript source and returns plain JavaScript of
//! the same byte length, with every type-only region overwritten by
//! spaces. Newlines inside erased regions are preserved, so every
//! surviving character keeps its original offset, line, and column — no
//! source map needed.
//!
//! ```
//! let output = tsblank::transform("let x: number = 1;");
//! // The annotation `: number` becomes eight spaces.
//! assert_eq!(output, format!("let x{} = 1;", " ".repeat(8)));
//! ```
//!
//! Constructs that cannot be erased without rewriting runtime code
//! (`enum`, `namespace`, `import =`, `export =`, legacy `<T>expr`
//! assertions, parameter properties) are reported through the error
//! callback and left in the output verbatim; see [`ErasureDiagnostic`].
//!
//! Each call builds its own parser, scanner binding, and mutable state,
//! so concurrent calls on different threads are independent.

mod blank_string;
mod diagnostics;
mod token_scan;
mod visitor;

pub use blank_string::BlankString;
pub use diagnostics::{ErasureDiagnostic, UnsupportedKind};

use tsblank_parser::parse_source;
use visitor::Eraser;

/// Erase type syntax from `input`, ignoring unsupported-syntax reports.
///
/// Postconditions: the output has the same byte length as the input, and
/// a byte is `\n` in the output exactly where it is `\n` in the input.
pub fn transform(input: &str) -> String {
    transform_with(input, |_| {})
}

/// Erase type syntax from `input`, invoking `on_error` for each
/// unsupported construct. Errors never abort the transform.
pub fn transform_with(input: &str, mut on_error: impl FnMut(&ErasureDiagnostic)) -> String {
    let parsed = parse_source(input);
    let mut callback = |diagnostic: &ErasureDiagnostic| on_error(diagnostic);
    let eraser = Eraser::new(input, &parsed.arena, &mut callback);
    eraser.erase(parsed.root)
}

/// The output plus all collected diagnostics, for hosts that want to
/// decide afterwards whether to accept the file.
pub struct TransformResult {
    pub output: String,
    pub diagnostics: Vec<ErasureDiagnostic>,
}

pub fn transform_collecting(input: &str) -> TransformResult {
    let mut diagnostics = Vec::new();
    let output = transform_with(input, |d| diagnostics.push(d.clone()));
    TransformResult {
        output,
        diagnostics,
    }
}
