//! Statement and declaration parsing.

use crate::base::{NodeIndex, NodeList};
use crate::node::*;
use crate::state::{ParserState, CONTEXT_FLAG_DISALLOW_IN};
use crate::syntax_kind::*;
use tracing::trace;
use tsblank_scanner::{token_is_identifier_or_keyword, token_is_reserved_word, SyntaxKind};

impl ParserState {
    /// Parse a whole source file; returns the `SOURCE_FILE` node.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        self.next_token();
        let end = self.scanner.source_text().len() as u32;
        let mut items = NodeList {
            pos: 0,
            end,
            ..NodeList::new()
        };
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            let statement = self.parse_statement();
            items.nodes.push(statement);
        }
        let root = self.arena.add_list(SOURCE_FILE, 0, end, ListData { items });
        self.adopt_interner();
        root
    }

    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        if !self.enter_recursion() {
            self.exit_recursion();
            let n = self.make_missing_identifier();
            // Skip to the end so the parse terminates.
            while !self.is_token(EndOfFileToken) {
                self.next_token();
            }
            return n;
        }
        trace!(token = ?self.token(), pos = self.token_pos(), "parse_statement");
        let result = self.parse_statement_inner();
        self.exit_recursion();
        result
    }

    fn parse_statement_inner(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        match self.token() {
            SemicolonToken => {
                let end = self.token_end();
                self.next_token();
                self.arena.add_marker(EMPTY_STATEMENT, pos, end)
            }
            OpenBraceToken => self.parse_block(),
            VarKeyword => self.parse_variable_statement(pos, Vec::new()),
            ConstKeyword => {
                if self.look_ahead(|p| {
                    p.next_token();
                    p.is_token(EnumKeyword)
                }) {
                    let modifier = self.consume_token_node();
                    self.parse_enum_declaration(pos, vec![modifier])
                } else {
                    self.parse_variable_statement(pos, Vec::new())
                }
            }
            LetKeyword if self.is_let_declaration() => {
                self.parse_variable_statement(pos, Vec::new())
            }
            FunctionKeyword => self.parse_function_declaration(pos, Vec::new()),
            ClassKeyword => self.parse_class_declaration(pos, Vec::new()),
            IfKeyword => self.parse_if_statement(),
            DoKeyword => self.parse_do_statement(),
            WhileKeyword => self.parse_while_statement(),
            ForKeyword => self.parse_for_statement(),
            ContinueKeyword => self.parse_jump_statement(CONTINUE_STATEMENT),
            BreakKeyword => self.parse_jump_statement(BREAK_STATEMENT),
            ReturnKeyword => self.parse_return_statement(),
            WithKeyword => self.parse_with_statement(),
            SwitchKeyword => self.parse_switch_statement(),
            ThrowKeyword => self.parse_throw_statement(),
            TryKeyword => self.parse_try_statement(),
            DebuggerKeyword => {
                self.next_token();
                let end = self.parse_signature_terminator();
                self.arena.add_marker(DEBUGGER_STATEMENT, pos, end)
            }
            AtToken => {
                let decorators = self.parse_decorators();
                self.parse_declaration_with_modifiers(pos, decorators)
            }
            AsyncKeyword
                if self.look_ahead(|p| {
                    p.next_token();
                    !p.has_preceding_line_break() && p.is_token(FunctionKeyword)
                }) =>
            {
                self.parse_declaration_with_modifiers(pos, Vec::new())
            }
            InterfaceKeyword
                if self.look_ahead(|p| {
                    p.next_token();
                    p.is_identifier_or_keyword()
                }) =>
            {
                self.parse_interface_declaration(pos, Vec::new())
            }
            TypeKeyword if self.is_type_alias_declaration() => {
                self.parse_type_alias_declaration(pos, Vec::new())
            }
            EnumKeyword
                if self.look_ahead(|p| {
                    p.next_token();
                    p.is_identifier_or_keyword()
                }) =>
            {
                self.parse_enum_declaration(pos, Vec::new())
            }
            NamespaceKeyword | ModuleKeyword
                if self.look_ahead(|p| {
                    p.next_token();
                    p.is_identifier_or_keyword() || p.is_token(StringLiteral)
                }) =>
            {
                self.parse_module_declaration(pos, Vec::new())
            }
            GlobalKeyword
                if self.look_ahead(|p| {
                    p.next_token();
                    p.is_token(OpenBraceToken)
                }) =>
            {
                self.parse_module_declaration(pos, Vec::new())
            }
            DeclareKeyword if self.is_declare_statement() => {
                self.parse_declaration_with_modifiers(pos, Vec::new())
            }
            AbstractKeyword
                if self.look_ahead(|p| {
                    p.next_token();
                    p.is_token(ClassKeyword)
                }) =>
            {
                self.parse_declaration_with_modifiers(pos, Vec::new())
            }
            ImportKeyword => self.parse_import_statement(),
            ExportKeyword => self.parse_export_statement(),
            token
                if token_is_identifier_or_keyword(token)
                    && !token_is_reserved_word(token)
                    && self.look_ahead(|p| {
                        p.next_token();
                        p.is_token(ColonToken)
                    }) =>
            {
                self.parse_labeled_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn is_let_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_token(SyntaxKind::OpenBracketToken)
                || p.is_token(SyntaxKind::OpenBraceToken)
                || (p.is_identifier_or_keyword() && !token_is_reserved_word(p.token()))
        })
    }

    fn is_type_alias_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if p.has_preceding_line_break() || !p.is_identifier_or_keyword() {
                return false;
            }
            p.next_token();
            p.is_token(SyntaxKind::EqualsToken) || p.is_token(SyntaxKind::LessThanToken)
        })
    }

    fn is_declare_statement(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if p.has_preceding_line_break() {
                return false;
            }
            matches!(
                p.token(),
                SyntaxKind::VarKeyword
                    | SyntaxKind::LetKeyword
                    | SyntaxKind::ConstKeyword
                    | SyntaxKind::FunctionKeyword
                    | SyntaxKind::ClassKeyword
                    | SyntaxKind::EnumKeyword
                    | SyntaxKind::NamespaceKeyword
                    | SyntaxKind::ModuleKeyword
                    | SyntaxKind::GlobalKeyword
                    | SyntaxKind::InterfaceKeyword
                    | SyntaxKind::TypeKeyword
                    | SyntaxKind::AbstractKeyword
                    | SyntaxKind::AsyncKeyword
            )
        })
    }

    /// Modifier-led declarations: any mix of `declare`/`abstract`/`async`
    /// (and decorators) ahead of the declaration keyword.
    pub(crate) fn parse_declaration_with_modifiers(
        &mut self,
        pos: u32,
        mut modifiers: Vec<NodeIndex>,
    ) -> NodeIndex {
        use SyntaxKind::*;
        loop {
            match self.token() {
                DeclareKeyword if self.is_declare_statement() => {
                    modifiers.push(self.consume_token_node());
                }
                AbstractKeyword
                    if self.look_ahead(|p| {
                        p.next_token();
                        p.is_token(ClassKeyword)
                    }) =>
                {
                    modifiers.push(self.consume_token_node());
                }
                AsyncKeyword
                    if self.look_ahead(|p| {
                        p.next_token();
                        !p.has_preceding_line_break() && p.is_token(FunctionKeyword)
                    }) =>
                {
                    modifiers.push(self.consume_token_node());
                }
                AtToken => {
                    let mut decorators = self.parse_decorators();
                    modifiers.append(&mut decorators);
                }
                // Decorator-first form: `@dec export default class ...`.
                ExportKeyword | DefaultKeyword => {
                    modifiers.push(self.consume_token_node());
                }
                _ => break,
            }
        }
        match self.token() {
            VarKeyword | LetKeyword => self.parse_variable_statement(pos, modifiers),
            ConstKeyword => {
                if self.look_ahead(|p| {
                    p.next_token();
                    p.is_token(EnumKeyword)
                }) {
                    modifiers.push(self.consume_token_node());
                    self.parse_enum_declaration(pos, modifiers)
                } else {
                    self.parse_variable_statement(pos, modifiers)
                }
            }
            FunctionKeyword => self.parse_function_declaration(pos, modifiers),
            ClassKeyword => self.parse_class_declaration(pos, modifiers),
            InterfaceKeyword => self.parse_interface_declaration(pos, modifiers),
            TypeKeyword => self.parse_type_alias_declaration(pos, modifiers),
            EnumKeyword => self.parse_enum_declaration(pos, modifiers),
            NamespaceKeyword | ModuleKeyword | GlobalKeyword => {
                self.parse_module_declaration(pos, modifiers)
            }
            _ => {
                self.parse_error_at_current_token("declaration expected");
                self.parse_expression_statement()
            }
        }
    }

    pub(crate) fn parse_decorators(&mut self) -> Vec<NodeIndex> {
        let mut decorators = Vec::new();
        while self.is_token(SyntaxKind::AtToken) {
            let pos = self.token_pos();
            self.next_token();
            let expression = self.parse_left_hand_side_expression();
            let end = self.arena.end(expression);
            decorators.push(self.arena.add_wrapped(
                DECORATOR,
                pos,
                end,
                WrappedData { inner: expression },
            ));
        }
        decorators
    }

    // =========================================================================
    // Blocks and simple statements
    // =========================================================================

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let list_pos = self.token_pos();
        let mut items = NodeList {
            pos: list_pos,
            end: list_pos,
            ..NodeList::new()
        };
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let statement = self.parse_statement();
            items.end = self.arena.end(statement);
            items.nodes.push(statement);
        }
        let end = self.token_end();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add_list(BLOCK, pos, end, ListData { items })
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let expression = self.parse_expression();
        let end = self.parse_signature_terminator();
        self.arena.add_wrapped(
            EXPRESSION_STATEMENT,
            pos,
            end.max(self.arena.end(expression)),
            WrappedData { inner: expression },
        )
    }

    fn parse_labeled_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let label = self.parse_identifier_name();
        let label_text = self
            .arena
            .identifier_text(label)
            .unwrap_or_default()
            .to_string();
        let declared = self.declare_label(&label_text, pos);
        self.parse_expected(SyntaxKind::ColonToken);
        let statement = self.parse_statement();
        if declared {
            self.release_label(&label_text);
        }
        let end = self.arena.end(statement);
        self.arena.add_pair(
            LABELED_STATEMENT,
            pos,
            end,
            PairData {
                left: label,
                right: statement,
            },
        )
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let then_statement = self.parse_statement();
        let (else_statement, end) = if self.parse_optional(SyntaxKind::ElseKeyword) {
            let e = self.parse_statement();
            let end = self.arena.end(e);
            (e, end)
        } else {
            (NodeIndex::NONE, self.arena.end(then_statement))
        };
        self.arena.add_conditional(
            IF_STATEMENT,
            pos,
            end,
            ConditionalData {
                condition,
                when_true: then_statement,
                when_false: else_statement,
            },
        )
    }

    fn parse_do_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let statement = self.parse_statement();
        self.parse_expected(SyntaxKind::WhileKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression();
        let close_end = self.token_end();
        self.parse_expected(SyntaxKind::CloseParenToken);
        // The trailing `;` after do/while is optional everywhere.
        let end = if self.is_token(SyntaxKind::SemicolonToken) {
            let e = self.token_end();
            self.next_token();
            e
        } else {
            close_end
        };
        self.arena.add_pair(
            DO_STATEMENT,
            pos,
            end,
            PairData {
                left: condition,
                right: statement,
            },
        )
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        let end = self.arena.end(statement);
        self.arena.add_pair(
            WHILE_STATEMENT,
            pos,
            end,
            PairData {
                left: condition,
                right: statement,
            },
        )
    }

    fn parse_for_statement(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        self.next_token();
        let await_modifier = self.parse_optional(AwaitKeyword);
        self.parse_expected(OpenParenToken);

        let initializer = if self.is_token(SemicolonToken) {
            NodeIndex::NONE
        } else if matches!(self.token(), VarKeyword | ConstKeyword)
            || (self.is_token(LetKeyword) && self.is_let_declaration())
        {
            self.with_context(CONTEXT_FLAG_DISALLOW_IN, 0, |p| {
                p.parse_variable_declaration_list()
            })
        } else {
            self.with_context(CONTEXT_FLAG_DISALLOW_IN, 0, |p| p.parse_expression())
        };

        if self.is_token(InKeyword) || self.is_token(OfKeyword) {
            let kind = if self.is_token(InKeyword) {
                FOR_IN_STATEMENT
            } else {
                FOR_OF_STATEMENT
            };
            self.next_token();
            let expression = self.parse_assignment_expression();
            self.parse_expected(CloseParenToken);
            let statement = self.parse_statement();
            let end = self.arena.end(statement);
            return self.arena.add_for_in_of(
                kind,
                pos,
                end,
                ForInOfData {
                    await_modifier,
                    initializer,
                    expression,
                    statement,
                },
            );
        }

        self.parse_expected(SemicolonToken);
        let condition = if self.is_token(SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SemicolonToken);
        let incrementor = if self.is_token(CloseParenToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(CloseParenToken);
        let statement = self.parse_statement();
        let end = self.arena.end(statement);
        self.arena.add_for_statement(
            FOR_STATEMENT,
            pos,
            end,
            ForStatementData {
                initializer,
                condition,
                incrementor,
                statement,
            },
        )
    }

    fn parse_jump_statement(&mut self, kind: u16) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let label = if !self.has_preceding_line_break() && self.is_identifier_or_keyword() {
            self.parse_identifier_name()
        } else {
            NodeIndex::NONE
        };
        let end = self.parse_signature_terminator();
        self.arena
            .add_wrapped(kind, pos, end, WrappedData { inner: label })
    }

    fn parse_return_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let expression = if self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        let end = self.parse_signature_terminator();
        self.arena
            .add_wrapped(RETURN_STATEMENT, pos, end, WrappedData { inner: expression })
    }

    fn parse_with_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        let end = self.arena.end(statement);
        self.arena.add_pair(
            WITH_STATEMENT,
            pos,
            end,
            PairData {
                left: expression,
                right: statement,
            },
        )
    }

    fn parse_switch_statement(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(OpenParenToken);
        let expression = self.parse_expression();
        self.parse_expected(CloseParenToken);

        let block_pos = self.token_pos();
        self.parse_expected(OpenBraceToken);
        let list_pos = self.token_pos();
        let mut clauses = NodeList {
            pos: list_pos,
            end: list_pos,
            ..NodeList::new()
        };
        while !self.is_token(CloseBraceToken) && !self.is_token(EndOfFileToken) {
            let clause = self.parse_case_or_default_clause();
            clauses.end = self.arena.end(clause);
            clauses.nodes.push(clause);
        }
        let end = self.token_end();
        self.parse_expected(CloseBraceToken);
        let case_block = self
            .arena
            .add_list(CASE_BLOCK, block_pos, end, ListData { items: clauses });
        self.arena.add_pair(
            SWITCH_STATEMENT,
            pos,
            end,
            PairData {
                left: expression,
                right: case_block,
            },
        )
    }

    fn parse_case_or_default_clause(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        let (kind, expression) = if self.parse_optional(CaseKeyword) {
            (CASE_CLAUSE, self.parse_expression())
        } else {
            self.parse_expected(DefaultKeyword);
            (DEFAULT_CLAUSE, NodeIndex::NONE)
        };
        self.parse_expected(ColonToken);
        let mut statements = NodeList {
            pos: self.token_pos(),
            end: self.token_pos(),
            ..NodeList::new()
        };
        while !matches!(
            self.token(),
            CaseKeyword | DefaultKeyword | CloseBraceToken | EndOfFileToken
        ) {
            let statement = self.parse_statement();
            statements.end = self.arena.end(statement);
            statements.nodes.push(statement);
        }
        let end = statements.end.max(pos);
        self.arena.add_case_clause(
            kind,
            pos,
            end,
            CaseClauseData {
                expression,
                statements,
            },
        )
    }

    fn parse_throw_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let expression = self.parse_expression();
        let end = self.parse_signature_terminator();
        self.arena
            .add_wrapped(THROW_STATEMENT, pos, end, WrappedData { inner: expression })
    }

    fn parse_try_statement(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        self.next_token();
        let try_block = self.parse_block();
        let mut end = self.arena.end(try_block);

        let catch_clause = if self.is_token(CatchKeyword) {
            let catch_pos = self.token_pos();
            self.next_token();
            let variable = if self.parse_optional(OpenParenToken) {
                let name = self.parse_binding_name();
                let name_pos = self.arena.pos(name);
                let type_annotation = if self.is_token(ColonToken) {
                    self.parse_type_annotation()
                } else {
                    NodeIndex::NONE
                };
                let decl_end = if type_annotation.is_some() {
                    self.arena.end(type_annotation)
                } else {
                    self.arena.end(name)
                };
                let decl = self.arena.add_variable_declaration(
                    VARIABLE_DECLARATION,
                    name_pos,
                    decl_end,
                    VariableDeclarationData {
                        name,
                        exclamation_token: NodeIndex::NONE,
                        type_annotation,
                        initializer: NodeIndex::NONE,
                    },
                );
                self.parse_expected(CloseParenToken);
                decl
            } else {
                NodeIndex::NONE
            };
            let block = self.parse_block();
            let clause_end = self.arena.end(block);
            end = clause_end;
            self.arena.add_pair(
                CATCH_CLAUSE,
                catch_pos,
                clause_end,
                PairData {
                    left: variable,
                    right: block,
                },
            )
        } else {
            NodeIndex::NONE
        };

        let finally_block = if self.parse_optional(FinallyKeyword) {
            let block = self.parse_block();
            end = self.arena.end(block);
            block
        } else {
            NodeIndex::NONE
        };

        self.arena.add_try(
            TRY_STATEMENT,
            pos,
            end,
            TryData {
                try_block,
                catch_clause,
                finally_block,
            },
        )
    }

    // =========================================================================
    // Variable declarations
    // =========================================================================

    pub(crate) fn parse_variable_statement(
        &mut self,
        pos: u32,
        modifiers: Vec<NodeIndex>,
    ) -> NodeIndex {
        let declarations = self.parse_variable_declaration_list();
        let end = self.parse_signature_terminator();
        let modifiers = self.make_modifier_list(modifiers);
        self.arena.add_variable_statement(
            VARIABLE_STATEMENT,
            pos,
            end.max(self.arena.end(declarations)),
            VariableStatementData {
                modifiers,
                declarations,
            },
        )
    }

    pub(crate) fn parse_variable_declaration_list(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let keyword = self.token() as u16;
        self.next_token();
        let list_pos = self.token_pos();
        let mut declarations = self.parse_delimited_list(list_pos, SyntaxKind::SemicolonToken, |p| {
            p.parse_variable_declaration()
        });
        declarations.pos = list_pos;
        let end = declarations.end.max(list_pos);
        self.arena.add_variable_declaration_list(
            VARIABLE_DECLARATION_LIST,
            pos,
            end,
            VariableDeclarationListData {
                keyword,
                declarations,
            },
        )
    }

    fn parse_variable_declaration(&mut self) -> NodeIndex {
        let name = self.parse_binding_name();
        let pos = self.arena.pos(name);
        let mut end = self.arena.end(name);

        let exclamation_token = if self.is_token(SyntaxKind::ExclamationToken)
            && !self.has_preceding_line_break()
        {
            let t = self.consume_token_node();
            end = self.arena.end(t);
            t
        } else {
            NodeIndex::NONE
        };

        let type_annotation = if self.is_token(SyntaxKind::ColonToken) {
            let t = self.parse_type_annotation();
            end = self.arena.end(t);
            t
        } else {
            NodeIndex::NONE
        };

        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            let init = self.parse_assignment_expression();
            end = self.arena.end(init);
            init
        } else {
            NodeIndex::NONE
        };

        self.arena.add_variable_declaration(
            VARIABLE_DECLARATION,
            pos,
            end,
            VariableDeclarationData {
                name,
                exclamation_token,
                type_annotation,
                initializer,
            },
        )
    }

    // =========================================================================
    // Binding names and parameters
    // =========================================================================

    pub(crate) fn parse_binding_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            _ => self.parse_identifier(),
        }
    }

    fn parse_object_binding_pattern(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let list_pos = self.token_pos();
        let mut items = self.parse_delimited_list(list_pos, SyntaxKind::CloseBraceToken, |p| {
            p.parse_object_binding_element()
        });
        items.pos = list_pos;
        let end = self.token_end();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena
            .add_list(OBJECT_BINDING_PATTERN, pos, end, ListData { items })
    }

    fn parse_object_binding_element(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let dot_dot_dot = self.parse_optional(SyntaxKind::DotDotDotToken);
        let name_or_property = self.parse_property_name();
        let (property_name, name) = if self.parse_optional(SyntaxKind::ColonToken) {
            (name_or_property, self.parse_binding_name())
        } else {
            (NodeIndex::NONE, name_or_property)
        };
        let mut end = self.arena.end(name);
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            let init = self.parse_assignment_expression();
            end = self.arena.end(init);
            init
        } else {
            NodeIndex::NONE
        };
        self.arena.add_binding_element(
            BINDING_ELEMENT,
            pos,
            end,
            BindingElementData {
                dot_dot_dot,
                property_name,
                name,
                initializer,
            },
        )
    }

    fn parse_array_binding_pattern(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let list_pos = self.token_pos();
        let mut items = NodeList {
            pos: list_pos,
            end: list_pos,
            ..NodeList::new()
        };
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.is_token(SyntaxKind::CommaToken) {
                let hole_pos = self.token_pos();
                items
                    .nodes
                    .push(self.arena.add_marker(OMITTED_EXPRESSION, hole_pos, hole_pos));
                self.next_token();
                continue;
            }
            let element_pos = self.token_pos();
            let dot_dot_dot = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name();
            let mut end = self.arena.end(name);
            let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                let init = self.parse_assignment_expression();
                end = self.arena.end(init);
                init
            } else {
                NodeIndex::NONE
            };
            let element = self.arena.add_binding_element(
                BINDING_ELEMENT,
                element_pos,
                end,
                BindingElementData {
                    dot_dot_dot,
                    property_name: NodeIndex::NONE,
                    name,
                    initializer,
                },
            );
            items.end = end;
            items.nodes.push(element);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        let end = self.token_end();
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.arena
            .add_list(ARRAY_BINDING_PATTERN, pos, end, ListData { items })
    }

    /// `( parameter, ... )` with the list extent conventions the eraser
    /// relies on.
    pub(crate) fn parse_parameter_list_parenthesized(&mut self) -> NodeList {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let list_pos = self.token_pos();
        let mut list = self.parse_delimited_list(list_pos, SyntaxKind::CloseParenToken, |p| {
            p.parse_parameter()
        });
        list.pos = list_pos;
        self.parse_expected(SyntaxKind::CloseParenToken);
        list
    }

    pub(crate) fn parse_parameter(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        let mut modifiers = Vec::new();
        loop {
            match self.token() {
                AtToken => {
                    let mut decorators = self.parse_decorators();
                    modifiers.append(&mut decorators);
                }
                PublicKeyword | PrivateKeyword | ProtectedKeyword | ReadonlyKeyword
                | OverrideKeyword
                    if self.look_ahead(|p| {
                        p.next_token();
                        p.is_identifier_or_keyword()
                            || p.is_token(OpenBraceToken)
                            || p.is_token(OpenBracketToken)
                            || p.is_token(DotDotDotToken)
                            || p.is_token(ThisKeyword)
                    }) =>
                {
                    modifiers.push(self.consume_token_node());
                }
                _ => break,
            }
        }
        let dot_dot_dot = self.parse_optional(DotDotDotToken);

        let name = if self.is_token(ThisKeyword) {
            // A type-only `this` parameter; stored as an identifier so the
            // eraser can test the name text.
            let name_pos = self.token_pos();
            let name_end = self.token_end();
            self.next_token();
            let atom = self.scanner.interner.intern("this");
            self.arena.add_identifier(name_pos, name_end, atom, "this")
        } else {
            self.parse_binding_name()
        };
        let mut end = self.arena.end(name);

        let question_token = if self.is_token(QuestionToken) {
            let t = self.consume_token_node();
            end = self.arena.end(t);
            t
        } else {
            NodeIndex::NONE
        };
        let type_annotation = if self.is_token(ColonToken) {
            let t = self.parse_type_annotation();
            end = self.arena.end(t);
            t
        } else {
            NodeIndex::NONE
        };
        let initializer = if self.parse_optional(EqualsToken) {
            let init = self.parse_assignment_expression();
            end = self.arena.end(init);
            init
        } else {
            NodeIndex::NONE
        };

        let modifiers = self.make_modifier_list(modifiers);
        self.arena.add_parameter(
            PARAMETER,
            pos,
            end,
            ParameterData {
                modifiers,
                dot_dot_dot,
                name,
                question_token,
                type_annotation,
                initializer,
            },
        )
    }

    // =========================================================================
    // Function declarations
    // =========================================================================

    pub(crate) fn parse_function_declaration(
        &mut self,
        pos: u32,
        modifiers: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let asterisk = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_token(SyntaxKind::OpenParenToken) {
            // Anonymous default export.
            NodeIndex::NONE
        } else {
            self.parse_identifier()
        };
        let modifiers = self.make_modifier_list(modifiers);
        self.parse_function_tail(pos, FUNCTION_DECLARATION, modifiers, asterisk, name)
    }

    // =========================================================================
    // Enum, module, interface, type alias
    // =========================================================================

    pub(crate) fn parse_enum_declaration(&mut self, pos: u32, modifiers: Vec<NodeIndex>) -> NodeIndex {
        self.parse_expected(SyntaxKind::EnumKeyword);
        let name = self.parse_identifier();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let list_pos = self.token_pos();
        let mut members = self.parse_delimited_list(list_pos, SyntaxKind::CloseBraceToken, |p| {
            p.parse_enum_member()
        });
        members.pos = list_pos;
        let end = self.token_end();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let modifiers = self.make_modifier_list(modifiers);
        self.arena.add_enum(
            ENUM_DECLARATION,
            pos,
            end,
            EnumData {
                modifiers,
                name,
                members,
            },
        )
    }

    fn parse_enum_member(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let name = self.parse_property_name();
        let (initializer, end) = if self.parse_optional(SyntaxKind::EqualsToken) {
            let init = self.parse_assignment_expression();
            let end = self.arena.end(init);
            (init, end)
        } else {
            (NodeIndex::NONE, self.arena.end(name))
        };
        self.arena.add_pair(
            ENUM_MEMBER,
            pos,
            end,
            PairData {
                left: name,
                right: initializer,
            },
        )
    }

    pub(crate) fn parse_module_declaration(
        &mut self,
        pos: u32,
        modifiers: Vec<NodeIndex>,
    ) -> NodeIndex {
        use SyntaxKind::*;
        let name = if self.is_token(GlobalKeyword) {
            self.parse_identifier_name()
        } else {
            self.next_token(); // namespace | module
            if self.is_token(StringLiteral) {
                self.consume_token_node()
            } else {
                self.parse_entity_name()
            }
        };

        let (body, end) = if self.is_token(OpenBraceToken) {
            let block_pos = self.token_pos();
            self.next_token();
            let list_pos = self.token_pos();
            let mut items = NodeList {
                pos: list_pos,
                end: list_pos,
                ..NodeList::new()
            };
            while !self.is_token(CloseBraceToken) && !self.is_token(EndOfFileToken) {
                let statement = self.parse_statement();
                items.end = self.arena.end(statement);
                items.nodes.push(statement);
            }
            let end = self.token_end();
            self.parse_expected(CloseBraceToken);
            let block = self
                .arena
                .add_list(MODULE_BLOCK, block_pos, end, ListData { items });
            (block, end)
        } else {
            (NodeIndex::NONE, self.parse_signature_terminator())
        };

        let modifiers = self.make_modifier_list(modifiers);
        self.arena.add_module(
            MODULE_DECLARATION,
            pos,
            end,
            ModuleData {
                modifiers,
                name,
                body,
            },
        )
    }

    pub(crate) fn parse_interface_declaration(
        &mut self,
        pos: u32,
        modifiers: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::InterfaceKeyword);
        let name = self.parse_identifier();
        let type_parameters = if self.is_token(SyntaxKind::LessThanToken) {
            Some(self.parse_type_parameters())
        } else {
            None
        };
        let heritage_clauses = self.parse_heritage_clauses();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let list_pos = self.token_pos();
        let mut members = NodeList {
            pos: list_pos,
            end: list_pos,
            ..NodeList::new()
        };
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let member = self.parse_type_member();
            members.end = self.arena.end(member);
            members.nodes.push(member);
        }
        let end = self.token_end();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let modifiers = self.make_modifier_list(modifiers);
        self.arena.add_class(
            INTERFACE_DECLARATION,
            pos,
            end,
            ClassData {
                modifiers,
                name,
                type_parameters,
                heritage_clauses,
                members,
            },
        )
    }

    pub(crate) fn parse_type_alias_declaration(
        &mut self,
        pos: u32,
        modifiers: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::TypeKeyword);
        let name = self.parse_identifier();
        let type_parameters = if self.is_token(SyntaxKind::LessThanToken) {
            Some(self.parse_type_parameters())
        } else {
            None
        };
        self.parse_expected(SyntaxKind::EqualsToken);
        let type_node = self.parse_type();
        let end = self.parse_signature_terminator().max(self.arena.end(type_node));
        let modifiers = self.make_modifier_list(modifiers);
        self.arena.add_type_alias(
            TYPE_ALIAS_DECLARATION,
            pos,
            end,
            TypeAliasData {
                modifiers,
                name,
                type_parameters,
                type_node,
            },
        )
    }
}
