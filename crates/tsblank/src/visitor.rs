//! The syntax-directed erasure engine.
//!
//! A single pass over the tree blanks every type-only region. Two pieces
//! of cross-cutting state steer the ASI-sensitive decisions:
//!
//! - `seen_js`: has any runtime JavaScript survived before the current
//!   position? If so, a fully blanked statement gets the `;`-first blank
//!   form so the previous statement cannot fuse with whatever follows the
//!   blanked span.
//! - `missing_semi_pos`: the end offset of the most recent expression
//!   statement with no explicit `;`. An `as`/`satisfies` erasure whose end
//!   lands exactly there must also use the `;`-first form, otherwise the
//!   statement would continue into whatever follows once its tail is
//!   blanked.

use crate::blank_string::BlankString;
use crate::diagnostics::{ErasureDiagnostic, UnsupportedKind};
use crate::token_scan::{spans_lines, TokenScanner};
use tracing::debug;
use tsblank_parser::base::{NodeIndex, NodeList};
use tsblank_parser::for_each_child;
use tsblank_parser::node::{FunctionData, NodeArena};
use tsblank_parser::syntax_kind::*;
use tsblank_scanner::SyntaxKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum VisitResult {
    /// The node produced no runtime JavaScript.
    Blanked,
    /// Runtime JavaScript survives inside the node.
    EmittedJs,
}

pub(crate) struct Eraser<'src, 'cb> {
    source: &'src str,
    arena: &'src NodeArena,
    out: BlankString,
    scanner: TokenScanner,
    seen_js: bool,
    missing_semi_pos: u32,
    on_error: &'cb mut dyn FnMut(&ErasureDiagnostic),
    error_count: usize,
}

fn is_erased_modifier(kind: u16) -> bool {
    matches!(
        SyntaxKind::from_u16(kind),
        Some(
            SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::OverrideKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::ReadonlyKeyword
        )
    )
}

fn is_parameter_property_modifier(kind: u16) -> bool {
    matches!(
        SyntaxKind::from_u16(kind),
        Some(
            SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::ReadonlyKeyword
        )
    )
}

impl<'src, 'cb> Eraser<'src, 'cb> {
    pub fn new(
        source: &'src str,
        arena: &'src NodeArena,
        on_error: &'cb mut dyn FnMut(&ErasureDiagnostic),
    ) -> Eraser<'src, 'cb> {
        Eraser {
            source,
            arena,
            out: BlankString::new(source),
            scanner: TokenScanner::new(source),
            seen_js: false,
            missing_semi_pos: u32::MAX,
            on_error,
            error_count: 0,
        }
    }

    pub fn erase(mut self, root: NodeIndex) -> String {
        let arena = self.arena;
        self.visit_statements(&arena.list(root).items);
        debug!(
            bytes = self.source.len(),
            errors = self.error_count,
            "erase pass complete"
        );
        self.out.into_string()
    }

    fn report(&mut self, kind: UnsupportedKind, node: NodeIndex) {
        let diagnostic = ErasureDiagnostic::new(kind, self.arena.pos(node), self.arena.end(node));
        self.error_count += 1;
        (self.on_error)(&diagnostic);
    }

    // =========================================================================
    // Blanking helpers
    // =========================================================================

    fn blank_node(&mut self, node: NodeIndex) {
        let pos = self.arena.pos(node) as usize;
        let end = self.arena.end(node) as usize;
        self.out.blank(pos, end);
    }

    /// Blank a whole statement. Once runtime code has been emitted, the
    /// span starts with `;` so the preceding statement terminates even if
    /// the next runtime token would otherwise continue it.
    fn blank_statement(&mut self, node: NodeIndex) {
        let pos = self.arena.pos(node) as usize;
        let end = self.arena.end(node) as usize;
        if self.seen_js && pos < end {
            self.out.blank_but_start_with_semi(pos, end);
        } else {
            self.out.blank(pos, end);
        }
    }

    /// Blank a type-argument or type-parameter list including its angle
    /// brackets. The list's `pos` sits just past the `<`; the closing `>`
    /// is located by scanning from the last element toward `limit`.
    fn blank_generics(&mut self, list: &NodeList, limit: u32) {
        let open = list.pos as usize - 1;
        let scan_from = list.end as usize;
        let close_end =
            self.scanner
                .scan_for_token(scan_from, limit as usize, SyntaxKind::GreaterThanToken);
        if close_end == scan_from {
            // No closing `>` before the limit; the tree is ill-formed.
            // Leave the region intact rather than blank a bad range.
            return;
        }
        self.out.blank(open, close_end);
    }

    fn blank_if_present(&mut self, node: NodeIndex) {
        if node.is_some() {
            self.blank_node(node);
        }
    }

    // =========================================================================
    // Statement lists
    // =========================================================================

    fn visit_statements(&mut self, statements: &NodeList) {
        for &statement in &statements.nodes {
            if self.visit(statement) == VisitResult::EmittedJs {
                self.seen_js = true;
            }
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    pub(crate) fn visit(&mut self, node: NodeIndex) -> VisitResult {
        let arena = self.arena;
        let kind = arena.kind(node);

        if is_token_kind(kind) {
            return VisitResult::EmittedJs;
        }

        match kind {
            TYPE_ALIAS_DECLARATION | INTERFACE_DECLARATION => {
                self.blank_statement(node);
                VisitResult::Blanked
            }

            INDEX_SIGNATURE => {
                self.blank_node(node);
                VisitResult::Blanked
            }

            VARIABLE_STATEMENT => {
                let data = arena.variable_statement(node);
                if arena.modifiers_contain(data.modifiers.as_ref(), SyntaxKind::DeclareKeyword) {
                    self.blank_statement(node);
                    return VisitResult::Blanked;
                }
                self.visit(data.declarations);
                VisitResult::EmittedJs
            }

            VARIABLE_DECLARATION => self.visit_variable_declaration(node),

            CALL_EXPRESSION | NEW_EXPRESSION => {
                let data = arena.call(node);
                self.visit(data.expression);
                if let Some(type_arguments) = &data.type_arguments {
                    self.blank_generics(type_arguments, arena.end(node));
                }
                if let Some(arguments) = &data.arguments {
                    for &argument in &arguments.nodes {
                        self.visit(argument);
                    }
                }
                VisitResult::EmittedJs
            }

            TAGGED_TEMPLATE_EXPRESSION => {
                let data = arena.tagged_template(node);
                self.visit(data.tag);
                if let Some(type_arguments) = &data.type_arguments {
                    self.blank_generics(type_arguments, arena.pos(data.template));
                }
                self.visit(data.template);
                VisitResult::EmittedJs
            }

            EXPRESSION_WITH_TYPE_ARGUMENTS => {
                let data = arena.expr_with_type_args(node);
                self.visit(data.expression);
                if let Some(type_arguments) = &data.type_arguments {
                    self.blank_generics(type_arguments, arena.end(node));
                }
                VisitResult::EmittedJs
            }

            CLASS_DECLARATION | CLASS_EXPRESSION => self.visit_class_like(node),

            PROPERTY_DECLARATION => self.visit_property_declaration(node),

            NON_NULL_EXPRESSION => {
                self.visit(arena.wrapped(node).inner);
                let end = arena.end(node) as usize;
                self.out.blank(end - 1, end);
                VisitResult::EmittedJs
            }

            AS_EXPRESSION | SATISFIES_EXPRESSION => {
                let data = arena.type_assertion(node);
                self.visit(data.expression);
                let expr_end = arena.end(data.expression) as usize;
                let end = arena.end(node);
                if end == self.missing_semi_pos {
                    self.out.blank_but_start_with_semi(expr_end, end as usize);
                } else {
                    self.out.blank(expr_end, end as usize);
                }
                VisitResult::EmittedJs
            }

            TYPE_ASSERTION_EXPRESSION => {
                self.report(UnsupportedKind::LegacyTypeAssertion, node);
                self.visit(arena.type_assertion(node).expression);
                VisitResult::EmittedJs
            }

            ENUM_DECLARATION => {
                let modifiers = arena.enum_decl(node).modifiers.as_ref();
                self.visit_ambient_or_report(node, modifiers, UnsupportedKind::RuntimeEnum)
            }

            MODULE_DECLARATION => {
                let modifiers = arena.module_decl(node).modifiers.as_ref();
                self.visit_ambient_or_report(node, modifiers, UnsupportedKind::RuntimeNamespace)
            }

            EXPRESSION_STATEMENT => {
                let end = arena.end(node);
                if self.source.as_bytes()[end as usize - 1] != b';' {
                    self.missing_semi_pos = end;
                }
                self.visit(arena.wrapped(node).inner);
                VisitResult::EmittedJs
            }

            IMPORT_DECLARATION => self.visit_import_declaration(node),
            EXPORT_DECLARATION => self.visit_export_declaration(node),

            EXPORT_ASSIGNMENT => {
                let data = arena.export_assignment(node);
                if data.is_export_equals {
                    self.report(UnsupportedKind::ExportEquals, node);
                    return VisitResult::EmittedJs;
                }
                self.visit(data.expression);
                VisitResult::EmittedJs
            }

            IMPORT_EQUALS_DECLARATION => {
                self.report(UnsupportedKind::ImportEquals, node);
                VisitResult::EmittedJs
            }

            k if is_function_like(k) => self.visit_function_like(node),

            BLOCK | MODULE_BLOCK => {
                self.visit_statements(&arena.list(node).items);
                VisitResult::EmittedJs
            }

            CASE_CLAUSE | DEFAULT_CLAUSE => {
                let data = arena.case_clause(node);
                if data.expression.is_some() {
                    self.visit(data.expression);
                }
                self.visit_statements(&data.statements);
                VisitResult::EmittedJs
            }

            _ => {
                let mut children = Vec::new();
                for_each_child(arena, node, &mut |child| children.push(child));
                for child in children {
                    self.visit(child);
                }
                VisitResult::EmittedJs
            }
        }
    }

    // =========================================================================
    // Per-construct rules
    // =========================================================================

    fn visit_variable_declaration(&mut self, node: NodeIndex) -> VisitResult {
        let arena = self.arena;
        let data = arena.variable_declaration(node);
        self.visit(data.name);
        if data.exclamation_token.is_some() {
            let name_end = arena.end(data.name) as usize;
            let excl_end = arena.end(data.exclamation_token) as usize;
            self.out.blank(name_end, excl_end);
        }
        self.blank_if_present(data.type_annotation);
        if data.initializer.is_some() {
            self.visit(data.initializer);
        }
        VisitResult::EmittedJs
    }

    fn visit_ambient_or_report(
        &mut self,
        node: NodeIndex,
        modifiers: Option<&NodeList>,
        kind: UnsupportedKind,
    ) -> VisitResult {
        if self.arena.modifiers_contain(modifiers, SyntaxKind::DeclareKeyword) {
            self.blank_statement(node);
            VisitResult::Blanked
        } else {
            // Left verbatim; whether to reject the file is the host's call.
            self.report(kind, node);
            VisitResult::EmittedJs
        }
    }

    /// Modifier lists mix keywords and decorators. Type-only keywords are
    /// blanked, decorators are visited, runtime keywords stay.
    fn visit_modifiers(&mut self, modifiers: Option<&NodeList>) {
        let Some(modifiers) = modifiers else { return };
        for &modifier in &modifiers.nodes {
            let kind = self.arena.kind(modifier);
            if kind == DECORATOR {
                self.visit(modifier);
            } else if is_erased_modifier(kind) {
                self.blank_node(modifier);
            }
        }
    }

    fn visit_class_like(&mut self, node: NodeIndex) -> VisitResult {
        let arena = self.arena;
        let data = arena.class(node);

        if arena.modifiers_contain(data.modifiers.as_ref(), SyntaxKind::DeclareKeyword) {
            self.blank_statement(node);
            return VisitResult::Blanked;
        }

        self.visit_modifiers(data.modifiers.as_ref());

        if let Some(type_parameters) = &data.type_parameters {
            self.blank_generics(type_parameters, arena.end(node));
        }

        if let Some(heritage_clauses) = &data.heritage_clauses {
            for &clause in &heritage_clauses.nodes {
                let heritage = arena.heritage(clause);
                if heritage.token == SyntaxKind::ImplementsKeyword as u16 {
                    self.blank_node(clause);
                } else {
                    for &heritage_type in &heritage.types.nodes {
                        self.visit(heritage_type);
                    }
                }
            }
        }

        for &member in &data.members.nodes {
            self.visit(member);
        }
        VisitResult::EmittedJs
    }

    fn visit_property_declaration(&mut self, node: NodeIndex) -> VisitResult {
        let arena = self.arena;
        let data = arena.property(node);

        // Abstract and ambient members have no runtime presence at all;
        // their decorators go with them.
        let erased_entirely = arena
            .modifiers_contain(data.modifiers.as_ref(), SyntaxKind::AbstractKeyword)
            || arena.modifiers_contain(data.modifiers.as_ref(), SyntaxKind::DeclareKeyword);
        if erased_entirely {
            self.blank_node(node);
            return VisitResult::Blanked;
        }

        self.visit_modifiers(data.modifiers.as_ref());
        self.blank_if_present(data.question_token);
        self.blank_if_present(data.exclamation_token);
        self.blank_if_present(data.type_annotation);
        self.visit(data.name);
        if data.initializer.is_some() {
            self.visit(data.initializer);
        }
        VisitResult::EmittedJs
    }

    fn visit_import_declaration(&mut self, node: NodeIndex) -> VisitResult {
        let arena = self.arena;
        let data = arena.import_declaration(node);
        if data.import_clause.is_none() {
            // Side-effect import.
            return VisitResult::EmittedJs;
        }
        let clause = arena.import_clause(data.import_clause);
        if clause.is_type_only {
            self.blank_statement(node);
            return VisitResult::Blanked;
        }
        if clause.named_bindings.is_some() && arena.kind(clause.named_bindings) == NAMED_IMPORTS {
            self.blank_type_only_specifiers(clause.named_bindings);
        }
        VisitResult::EmittedJs
    }

    fn visit_export_declaration(&mut self, node: NodeIndex) -> VisitResult {
        let arena = self.arena;
        let data = arena.export_declaration(node);
        if data.is_type_only {
            self.blank_statement(node);
            return VisitResult::Blanked;
        }
        if data.export_clause.is_some() && arena.kind(data.export_clause) == NAMED_EXPORTS {
            self.blank_type_only_specifiers(data.export_clause);
        }
        VisitResult::EmittedJs
    }

    /// Blank each `type`-marked element of a named import/export list,
    /// consuming its trailing comma so the list stays well-formed.
    fn blank_type_only_specifiers(&mut self, named_list: NodeIndex) {
        let arena = self.arena;
        for &specifier in &arena.list(named_list).items.nodes {
            if arena.specifier(specifier).is_type_only {
                let pos = arena.pos(specifier) as usize;
                let end = arena.end(specifier) as usize;
                let end = self.scanner.end_with_trailing_comma(end);
                self.out.blank(pos, end);
            }
        }
    }

    fn visit_function_like(&mut self, node: NodeIndex) -> VisitResult {
        let arena = self.arena;
        let kind = arena.kind(node);
        let data = arena.function(node);

        if data.body.is_none() {
            // Overload signature or ambient function.
            if arena.modifiers_contain(data.modifiers.as_ref(), SyntaxKind::DeclareKeyword) {
                self.blank_statement(node);
            } else {
                self.blank_node(node);
            }
            return VisitResult::Blanked;
        }

        self.visit_modifiers(data.modifiers.as_ref());
        if data.name.is_some() {
            self.visit(data.name);
        }
        if let Some(type_parameters) = &data.type_parameters {
            self.blank_generics(type_parameters, arena.end(node));
        }
        self.blank_if_present(data.question_token);

        for (index, &parameter) in data.parameters.nodes.iter().enumerate() {
            let param = arena.parameter(parameter);

            if index == 0 && arena.identifier_text(param.name) == Some("this") {
                // Type-only `this` parameter: erased with its comma.
                let pos = arena.pos(parameter) as usize;
                let end = arena.end(parameter) as usize;
                let end = self.scanner.end_with_trailing_comma(end);
                self.out.blank(pos, end);
                continue;
            }

            if let Some(param_modifiers) = &param.modifiers {
                for &modifier in &param_modifiers.nodes {
                    if is_parameter_property_modifier(arena.kind(modifier)) {
                        // Erasing a parameter property would have to
                        // rewrite the constructor body.
                        self.report(UnsupportedKind::ParameterProperty, modifier);
                    } else {
                        self.visit(modifier);
                    }
                }
            }

            self.visit(param.name);
            self.blank_if_present(param.question_token);
            self.blank_if_present(param.type_annotation);
            if param.initializer.is_some() {
                self.visit(param.initializer);
            }
        }

        if data.return_type.is_some() {
            self.blank_return_type(kind, data);
        }

        if arena.kind(data.body) == BLOCK {
            let saved = self.seen_js;
            self.seen_js = false;
            self.visit_statements(&arena.list(data.body).items);
            self.seen_js = saved;
        } else {
            self.visit(data.body);
        }
        VisitResult::EmittedJs
    }

    /// Blank a return-type annotation. For arrows whose `)` would end up
    /// on a different line than `=>` after blanking, shift the `)` to sit
    /// immediately before the arrow instead, keeping the grammar's
    /// no-line-break rule satisfied.
    fn blank_return_type(&mut self, kind: u16, data: &FunctionData) {
        if kind == ARROW_FUNCTION && data.arrow_pos != FunctionData::NO_ARROW {
            let arrow_pos = data.arrow_pos as usize;
            let scan_from = data.parameters.end as usize;
            let close_paren_end =
                self.scanner
                    .scan_for_token(scan_from, arrow_pos, SyntaxKind::CloseParenToken);
            let found = close_paren_end != scan_from;
            if found
                && spans_lines(self.source, close_paren_end, arrow_pos)
                && arrow_pos > close_paren_end
                && !matches!(self.source.as_bytes()[arrow_pos - 1], b'\n' | b'\r')
            {
                self.out
                    .blank_but_end_with_close_paren(close_paren_end - 1, arrow_pos);
                return;
            }
        }
        self.blank_node(data.return_type);
    }
}
