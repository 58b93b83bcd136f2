//! Import and export declarations, including type-only forms.

use crate::base::NodeIndex;
use crate::node::*;
use crate::state::ParserState;
use crate::syntax_kind::*;
use tsblank_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Imports
    // =========================================================================

    pub(crate) fn parse_import_statement(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        // `import(...)` and `import.meta` are expressions.
        let is_expression = self.look_ahead(|p| {
            p.next_token();
            p.is_token(OpenParenToken) || p.is_token(DotToken)
        });
        if is_expression {
            return self.parse_expression_statement_from_here();
        }

        let pos = self.token_pos();
        self.next_token();

        // Side-effect import: `import "m";`
        if self.is_token(StringLiteral) {
            let module_specifier = self.consume_token_node();
            let attributes = self.parse_import_attributes();
            let end = self.parse_signature_terminator();
            return self.arena.add_import_declaration(
                IMPORT_DECLARATION,
                pos,
                end,
                ImportDeclarationData {
                    modifiers: None,
                    import_clause: NodeIndex::NONE,
                    module_specifier,
                    attributes,
                },
            );
        }

        let is_type_only = self.is_token(TypeKeyword) && self.is_type_only_import_clause();
        if is_type_only {
            self.next_token();
        }

        let clause_pos = self.token_pos();
        let mut name = NodeIndex::NONE;
        let mut named_bindings = NodeIndex::NONE;

        if self.is_identifier_or_keyword() {
            name = self.parse_identifier();
            // `import A = ...` (also `import type A = ...`).
            if self.is_token(EqualsToken) {
                return self.parse_import_equals_tail(pos, is_type_only, name);
            }
            if self.parse_optional(CommaToken) {
                named_bindings = self.parse_named_bindings();
            }
        } else {
            named_bindings = self.parse_named_bindings();
        }

        let clause_end = if named_bindings.is_some() {
            self.arena.end(named_bindings)
        } else {
            self.arena.end(name)
        };
        let import_clause = self.arena.add_import_clause(
            IMPORT_CLAUSE,
            clause_pos,
            clause_end,
            ImportClauseData {
                is_type_only,
                name,
                named_bindings,
            },
        );

        self.parse_expected(FromKeyword);
        let module_specifier = if self.is_token(StringLiteral) {
            self.consume_token_node()
        } else {
            self.parse_error_at_current_token("string literal expected");
            self.make_missing_identifier()
        };
        let attributes = self.parse_import_attributes();
        let end = self.parse_signature_terminator();
        self.arena.add_import_declaration(
            IMPORT_DECLARATION,
            pos,
            end,
            ImportDeclarationData {
                modifiers: None,
                import_clause,
                module_specifier,
                attributes,
            },
        )
    }

    fn parse_expression_statement_from_here(&mut self) -> NodeIndex {
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

    /// After `import`, does `type` start a type-only clause rather than
    /// name a default binding? `import type from "m"` binds `type`.
    fn is_type_only_import_clause(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if p.is_token(SyntaxKind::AsteriskToken) || p.is_token(SyntaxKind::OpenBraceToken) {
                return true;
            }
            if !p.is_identifier_or_keyword() {
                return false;
            }
            if p.is_token(SyntaxKind::FromKeyword) {
                p.next_token();
                // `type from "m"` is a plain default import named `type`;
                // `type from from "m"` is type-only.
                return !p.is_token(SyntaxKind::StringLiteral);
            }
            true
        })
    }

    fn parse_named_bindings(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        if self.is_token(AsteriskToken) {
            let pos = self.token_pos();
            self.next_token();
            self.parse_expected(AsKeyword);
            let name = self.parse_identifier();
            let end = self.arena.end(name);
            return self
                .arena
                .add_wrapped(NAMESPACE_IMPORT, pos, end, WrappedData { inner: name });
        }
        let pos = self.token_pos();
        self.parse_expected(OpenBraceToken);
        let list_pos = self.token_pos();
        let mut items = self.parse_delimited_list(list_pos, CloseBraceToken, |p| {
            p.parse_import_or_export_specifier(IMPORT_SPECIFIER)
        });
        items.pos = list_pos;
        let end = self.token_end();
        self.parse_expected(CloseBraceToken);
        self.arena.add_list(NAMED_IMPORTS, pos, end, ListData { items })
    }

    /// One element of a named import/export list: `[type] [prop as] name`.
    fn parse_import_or_export_specifier(&mut self, kind: u16) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        let is_type_only = self.is_token(TypeKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                if !p.is_identifier_or_keyword() && !p.is_token(StringLiteral) {
                    return false;
                }
                if p.is_token(AsKeyword) {
                    // `type as X` renames a binding named `type`;
                    // `type as as X` is a type-only rename.
                    p.next_token();
                    return p.is_token(AsKeyword);
                }
                true
            });
        if is_type_only {
            self.next_token();
        }

        let first = if self.is_token(StringLiteral) {
            self.consume_token_node()
        } else {
            self.parse_identifier_name()
        };
        let (property_name, name) = if self.is_token(AsKeyword) {
            self.next_token();
            (first, self.parse_identifier_name())
        } else {
            (NodeIndex::NONE, first)
        };
        let end = self.arena.end(name);
        self.arena.add_specifier(
            kind,
            pos,
            end,
            SpecifierData {
                is_type_only,
                property_name,
                name,
            },
        )
    }

    fn parse_import_equals_tail(
        &mut self,
        pos: u32,
        is_type_only: bool,
        name: NodeIndex,
    ) -> NodeIndex {
        use SyntaxKind::*;
        self.parse_expected(EqualsToken);
        let module_reference = if self.identifier_is_require() {
            let ref_pos = self.token_pos();
            self.next_token();
            self.parse_expected(OpenParenToken);
            let specifier = if self.is_token(StringLiteral) {
                self.consume_token_node()
            } else {
                self.parse_error_at_current_token("string literal expected");
                self.make_missing_identifier()
            };
            let end = self.token_end();
            self.parse_expected(CloseParenToken);
            self.arena.add_wrapped(
                EXTERNAL_MODULE_REFERENCE,
                ref_pos,
                end,
                WrappedData { inner: specifier },
            )
        } else {
            self.parse_entity_name()
        };
        let end = self.parse_signature_terminator();
        self.arena.add_import_equals(
            IMPORT_EQUALS_DECLARATION,
            pos,
            end.max(self.arena.end(module_reference)),
            ImportEqualsData {
                modifiers: None,
                is_type_only,
                name,
                module_reference,
            },
        )
    }

    fn identifier_is_require(&mut self) -> bool {
        self.is_token(SyntaxKind::Identifier)
            && self.scanner.get_token_text() == "require"
            && self.look_ahead(|p| {
                p.next_token();
                p.is_token(SyntaxKind::OpenParenToken)
            })
    }

    /// `with { type: "json" }` (or legacy `assert`) after a specifier.
    fn parse_import_attributes(&mut self) -> NodeIndex {
        let has_attributes = (self.is_token(SyntaxKind::WithKeyword)
            || (self.is_token(SyntaxKind::Identifier)
                && self.scanner.get_token_text() == "assert"))
            && !self.has_preceding_line_break()
            && self.look_ahead(|p| {
                p.next_token();
                p.is_token(SyntaxKind::OpenBraceToken)
            });
        if !has_attributes {
            return NodeIndex::NONE;
        }
        self.next_token();
        // The attribute map has object-literal shape; reuse that parser.
        self.parse_left_hand_side_expression()
    }

    // =========================================================================
    // Exports
    // =========================================================================

    pub(crate) fn parse_export_statement(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        let export_token = self.consume_token_node();

        match self.token() {
            EqualsToken => {
                self.next_token();
                let expression = self.parse_assignment_expression();
                let end = self.parse_signature_terminator();
                let modifiers = self.make_modifier_list(vec![export_token]);
                self.arena.add_export_assignment(
                    EXPORT_ASSIGNMENT,
                    pos,
                    end.max(self.arena.end(expression)),
                    ExportAssignmentData {
                        modifiers,
                        is_export_equals: true,
                        expression,
                    },
                )
            }
            DefaultKeyword => {
                let default_token = self.consume_token_node();
                let modifiers = vec![export_token, default_token];
                match self.token() {
                    ClassKeyword => self.parse_class_declaration(pos, modifiers),
                    AbstractKeyword => self.parse_declaration_with_modifiers(pos, modifiers),
                    FunctionKeyword => self.parse_function_declaration(pos, modifiers),
                    AsyncKeyword
                        if self.look_ahead(|p| {
                            p.next_token();
                            !p.has_preceding_line_break() && p.is_token(FunctionKeyword)
                        }) =>
                    {
                        self.parse_declaration_with_modifiers(pos, modifiers)
                    }
                    InterfaceKeyword => self.parse_interface_declaration(pos, modifiers),
                    _ => {
                        let expression = self.parse_assignment_expression();
                        let end = self.parse_signature_terminator();
                        let modifiers = self.make_modifier_list(modifiers);
                        self.arena.add_export_assignment(
                            EXPORT_ASSIGNMENT,
                            pos,
                            end.max(self.arena.end(expression)),
                            ExportAssignmentData {
                                modifiers,
                                is_export_equals: false,
                                expression,
                            },
                        )
                    }
                }
            }
            AsteriskToken => self.parse_export_star_tail(pos, export_token, false),
            OpenBraceToken => self.parse_named_exports_tail(pos, export_token, false),
            TypeKeyword
                if self.look_ahead(|p| {
                    p.next_token();
                    p.is_token(OpenBraceToken) || p.is_token(AsteriskToken)
                }) =>
            {
                self.next_token();
                if self.is_token(AsteriskToken) {
                    self.parse_export_star_tail(pos, export_token, true)
                } else {
                    self.parse_named_exports_tail(pos, export_token, true)
                }
            }
            _ => self.parse_declaration_with_modifiers(pos, vec![export_token]),
        }
    }

    fn parse_export_star_tail(
        &mut self,
        pos: u32,
        export_token: NodeIndex,
        is_type_only: bool,
    ) -> NodeIndex {
        use SyntaxKind::*;
        let star_pos = self.token_pos();
        self.next_token();
        let export_clause = if self.parse_optional(AsKeyword) {
            let name = self.parse_identifier_name();
            let end = self.arena.end(name);
            self.arena
                .add_wrapped(NAMESPACE_EXPORT, star_pos, end, WrappedData { inner: name })
        } else {
            NodeIndex::NONE
        };
        self.parse_expected(FromKeyword);
        let module_specifier = if self.is_token(StringLiteral) {
            self.consume_token_node()
        } else {
            self.parse_error_at_current_token("string literal expected");
            self.make_missing_identifier()
        };
        let attributes = self.parse_import_attributes();
        let end = self.parse_signature_terminator();
        let modifiers = self.make_modifier_list(vec![export_token]);
        self.arena.add_export_declaration(
            EXPORT_DECLARATION,
            pos,
            end.max(self.arena.end(module_specifier)),
            ExportDeclarationData {
                modifiers,
                is_type_only,
                export_clause,
                module_specifier,
                attributes,
            },
        )
    }

    fn parse_named_exports_tail(
        &mut self,
        pos: u32,
        export_token: NodeIndex,
        is_type_only: bool,
    ) -> NodeIndex {
        use SyntaxKind::*;
        let clause_pos = self.token_pos();
        self.parse_expected(OpenBraceToken);
        let list_pos = self.token_pos();
        let mut items = self.parse_delimited_list(list_pos, CloseBraceToken, |p| {
            p.parse_import_or_export_specifier(EXPORT_SPECIFIER)
        });
        items.pos = list_pos;
        let clause_end = self.token_end();
        self.parse_expected(CloseBraceToken);
        let export_clause =
            self.arena
                .add_list(NAMED_EXPORTS, clause_pos, clause_end, ListData { items });

        let module_specifier = if self.parse_optional(FromKeyword) {
            if self.is_token(StringLiteral) {
                self.consume_token_node()
            } else {
                self.parse_error_at_current_token("string literal expected");
                self.make_missing_identifier()
            }
        } else {
            NodeIndex::NONE
        };
        let attributes = self.parse_import_attributes();
        let end = self.parse_signature_terminator();
        let modifiers = self.make_modifier_list(vec![export_token]);
        self.arena.add_export_declaration(
            EXPORT_DECLARATION,
            pos,
            end.max(clause_end),
            ExportDeclarationData {
                modifiers,
                is_type_only,
                export_clause,
                module_specifier,
                attributes,
            },
        )
    }
}
