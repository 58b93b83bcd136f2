//! Parser state: token plumbing, error reporting, and speculation.

use crate::base::{NodeIndex, NodeList};
use crate::node::NodeArena;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tsblank_scanner::{token_is_identifier_or_keyword, ScannerState, SyntaxKind};

/// Context flag: `in` is not a binary operator (for-statement heads).
pub const CONTEXT_FLAG_DISALLOW_IN: u32 = 1;
/// Context flag: conditional types may not start (infer constraints).
pub const CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES: u32 = 2;

/// Maximum recursion depth before the parser bails out of a subtree.
pub(crate) const MAX_RECURSION_DEPTH: u32 = 2048;

/// A parse-time diagnostic.
#[derive(Clone, Debug, Serialize)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
}

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub arena: NodeArena,
    pub(crate) current_token: SyntaxKind,
    pub(crate) context_flags: u32,
    pub(crate) diagnostics: Vec<ParseDiagnostic>,
    pub(crate) recursion_depth: u32,
    pub(crate) last_error_pos: u32,
    /// Active labels per function scope, for duplicate-label detection.
    pub(crate) label_scopes: Vec<FxHashMap<String, u32>>,
}

impl ParserState {
    pub fn new(source_text: &str) -> ParserState {
        let estimated_nodes = source_text.len() / 16;
        ParserState {
            scanner: ScannerState::new(source_text, true),
            arena: NodeArena::with_capacity(estimated_nodes),
            current_token: SyntaxKind::Unknown,
            context_flags: 0,
            diagnostics: Vec::new(),
            recursion_depth: 0,
            last_error_pos: u32::MAX,
            label_scopes: vec![FxHashMap::default()],
        }
    }

    /// Enter a fresh label scope (function bodies reset label visibility).
    pub(crate) fn push_label_scope(&mut self) {
        self.label_scopes.push(FxHashMap::default());
    }

    pub(crate) fn pop_label_scope(&mut self) {
        self.label_scopes.pop();
    }

    /// Record a label for the duration of its statement. Reports a
    /// diagnostic when the label is already live in this function.
    pub(crate) fn declare_label(&mut self, text: &str, pos: u32) -> bool {
        let scope = self.label_scopes.last_mut().expect("label scope underflow");
        if scope.contains_key(text) {
            self.parse_error_at(pos, text.len() as u32, "duplicate label");
            false
        } else {
            scope.insert(text.to_string(), pos);
            true
        }
    }

    pub(crate) fn release_label(&mut self, text: &str) {
        if let Some(scope) = self.label_scopes.last_mut() {
            scope.remove(text);
        }
    }

    pub fn take_diagnostics(&mut self) -> Vec<ParseDiagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Move the interner into the arena once parsing is done, so name
    /// lookups outlive the scanner.
    pub(crate) fn adopt_interner(&mut self) {
        self.arena.interner = std::mem::take(&mut self.scanner.interner);
    }

    // =========================================================================
    // Token utilities
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.get_token_start() as u32
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.get_token_end() as u32
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.current_token = self.scanner.scan();
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    #[inline]
    pub(crate) fn is_identifier_or_keyword(&self) -> bool {
        token_is_identifier_or_keyword(self.current_token)
    }

    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    /// Consume the current token if it matches.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.current_token == kind {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume the current token if it matches, else report and continue.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.current_token == kind {
            self.next_token();
            true
        } else {
            self.parse_error_at_current_token(&format!("'{:?}' expected", kind));
            false
        }
    }

    /// Consume the current token and return a token node for it.
    pub(crate) fn consume_token_node(&mut self) -> NodeIndex {
        let kind = self.current_token;
        let pos = self.token_pos();
        let end = self.token_end();
        self.next_token();
        self.arena.add_token(kind, pos, end)
    }

    // =========================================================================
    // Automatic semicolon insertion
    // =========================================================================

    pub(crate) fn can_parse_semicolon(&self) -> bool {
        self.is_token(SyntaxKind::SemicolonToken)
            || self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
            || self.has_preceding_line_break()
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn parse_error_at(&mut self, start: u32, length: u32, message: &str) {
        // One error per position is enough; cascades are noise.
        if start == self.last_error_pos {
            return;
        }
        self.last_error_pos = start;
        self.diagnostics.push(ParseDiagnostic {
            start,
            length,
            message: message.to_string(),
        });
    }

    pub(crate) fn parse_error_at_current_token(&mut self, message: &str) {
        let start = self.token_pos();
        let length = self.token_end().saturating_sub(start);
        self.parse_error_at(start, length, message);
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    pub(crate) fn enter_recursion(&mut self) -> bool {
        self.recursion_depth += 1;
        if self.recursion_depth > MAX_RECURSION_DEPTH {
            self.parse_error_at_current_token("maximum nesting depth exceeded");
            false
        } else {
            true
        }
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Speculation
    // =========================================================================

    /// Run `f` and rewind the scanner afterwards regardless of outcome.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.scanner.save_state();
        let token = self.current_token;
        let result = f(self);
        self.scanner.restore_state(snapshot);
        self.current_token = token;
        result
    }

    /// Run `f`; on `None`, rewind the scanner and drop any diagnostics the
    /// attempt produced. Nodes allocated by a failed attempt stay orphaned
    /// in the arena, which is harmless.
    pub(crate) fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let snapshot = self.scanner.save_state();
        let token = self.current_token;
        let diagnostics_len = self.diagnostics.len();
        let result = f(self);
        if result.is_none() {
            self.scanner.restore_state(snapshot);
            self.current_token = token;
            self.diagnostics.truncate(diagnostics_len);
        }
        result
    }

    pub(crate) fn with_context<T>(&mut self, set: u32, clear: u32, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.context_flags;
        self.context_flags = (self.context_flags | set) & !clear;
        let result = f(self);
        self.context_flags = saved;
        result
    }

    #[inline]
    pub(crate) fn in_context(&self, flag: u32) -> bool {
        self.context_flags & flag != 0
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    /// Parse an identifier reference or binding name. Contextual keywords
    /// are accepted; reserved words produce a diagnostic but still yield a
    /// node so parsing can continue.
    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if self.is_identifier_or_keyword() && !self.is_reserved_word_token() {
            return self.finish_identifier();
        }
        self.parse_error_at_current_token("identifier expected");
        self.make_missing_identifier()
    }

    /// Parse any identifier or keyword as a name (property names, labels,
    /// import aliases).
    pub(crate) fn parse_identifier_name(&mut self) -> NodeIndex {
        if self.is_identifier_or_keyword() {
            return self.finish_identifier();
        }
        self.parse_error_at_current_token("identifier expected");
        self.make_missing_identifier()
    }

    fn finish_identifier(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let end = self.token_end();
        let atom = self.scanner.get_token_atom();
        let text = self.scanner.get_token_text().to_string();
        self.next_token();
        self.arena.add_identifier(pos, end, atom, &text)
    }

    pub(crate) fn make_missing_identifier(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let atom = self.scanner.interner.intern("");
        self.arena.add_identifier(pos, pos, atom, "")
    }

    fn is_reserved_word_token(&self) -> bool {
        tsblank_scanner::token_is_reserved_word(self.current_token)
    }

    // =========================================================================
    // List helpers
    // =========================================================================

    /// Parse a comma-separated list until `terminator`, recording trailing
    /// commas and the list extent. `pos` should be the offset just past the
    /// opening delimiter.
    pub(crate) fn parse_delimited_list(
        &mut self,
        pos: u32,
        terminator: SyntaxKind,
        mut parse_element: impl FnMut(&mut Self) -> NodeIndex,
    ) -> NodeList {
        let mut list = NodeList {
            pos,
            end: pos,
            ..NodeList::new()
        };
        while !self.is_token(terminator) && !self.is_token(SyntaxKind::EndOfFileToken) {
            let element = parse_element(self);
            list.end = self.arena.end(element);
            list.nodes.push(element);
            if self.parse_optional(SyntaxKind::CommaToken) {
                list.has_trailing_comma = self.is_token(terminator);
                continue;
            }
            break;
        }
        list
    }
}
