//! Arena-based TypeScript syntax tree and recursive-descent parser.
//!
//! The parser is error-tolerant: it always produces a tree, collecting
//! [`ParseDiagnostic`]s along the way. Positions are byte offsets into the
//! original source, and every node records the exact extent the erasure
//! engine needs to blank it.

pub mod base;
pub mod children;
mod classes;
mod expressions;
mod modules;
pub mod node;
pub mod state;
pub mod syntax_kind;
mod statements;
mod types;

pub use base::{NodeIndex, NodeList};
pub use children::for_each_child;
pub use node::NodeArena;
pub use state::{ParseDiagnostic, ParserState};

/// The outcome of parsing one source file.
pub struct ParseResult {
    pub arena: NodeArena,
    pub root: NodeIndex,
    pub diagnostics: Vec<ParseDiagnostic>,
}

/// Parse a source file into an arena tree.
pub fn parse_source(source: &str) -> ParseResult {
    let mut parser = ParserState::new(source);
    let root = parser.parse_source_file();
    let diagnostics = parser.take_diagnostics();
    ParseResult {
        arena: parser.arena,
        root,
        diagnostics,
    }
}
