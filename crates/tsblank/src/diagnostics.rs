//! Diagnostics for constructs that cannot be erased.
//!
//! All diagnostics are non-fatal: the offending syntax is left in the
//! output verbatim and the transform runs to completion. Hosts decide
//! whether to reject the file.

use serde::Serialize;

/// The closed set of unsupported constructs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum UnsupportedKind {
    /// `import x = ...`
    ImportEquals,
    /// `export = ...`
    ExportEquals,
    /// `enum` without `declare`.
    RuntimeEnum,
    /// `namespace`/`module` without `declare`.
    RuntimeNamespace,
    /// Legacy `<T>expr` assertion.
    LegacyTypeAssertion,
    /// `public`/`private`/`protected`/`readonly` on a constructor
    /// parameter.
    ParameterProperty,
}

impl UnsupportedKind {
    pub fn message(self) -> &'static str {
        match self {
            UnsupportedKind::ImportEquals => "`import ... = ...` is not supported",
            UnsupportedKind::ExportEquals => "`export = ...` is not supported",
            UnsupportedKind::RuntimeEnum => "`enum` declarations are not supported",
            UnsupportedKind::RuntimeNamespace => {
                "`namespace`/`module` declarations with runtime code are not supported"
            }
            UnsupportedKind::LegacyTypeAssertion => {
                "`<T>expr` type assertions are not supported; use `expr as T`"
            }
            UnsupportedKind::ParameterProperty => "parameter properties are not supported",
        }
    }
}

/// One report about a node the eraser left untouched.
#[derive(Clone, Debug, Serialize)]
pub struct ErasureDiagnostic {
    pub kind: UnsupportedKind,
    /// Byte extent of the offending node.
    pub pos: u32,
    pub end: u32,
    pub message: &'static str,
}

impl ErasureDiagnostic {
    pub(crate) fn new(kind: UnsupportedKind, pos: u32, end: u32) -> ErasureDiagnostic {
        ErasureDiagnostic {
            kind,
            pos,
            end,
            message: kind.message(),
        }
    }
}
