//! The type grammar.
//!
//! Types never survive erasure, but their extents decide what gets
//! blanked, so the grammar must consume exactly the right tokens.

use crate::base::{NodeIndex, NodeList};
use crate::node::*;
use crate::state::{ParserState, CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES};
use crate::syntax_kind::*;
use tsblank_scanner::{token_is_identifier_or_keyword, SyntaxKind};

impl ParserState {
    // =========================================================================
    // Entry points
    // =========================================================================

    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            self.exit_recursion();
            return self.make_missing_identifier();
        }
        let result = self.parse_type_inner();
        self.exit_recursion();
        result
    }

    fn parse_type_inner(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        if self.is_token(LessThanToken)
            || (self.is_token(OpenParenToken) && self.is_start_of_function_type())
        {
            return self.parse_function_type(FUNCTION_TYPE, false);
        }
        if self.is_token(NewKeyword) {
            return self.parse_function_type(CONSTRUCTOR_TYPE, false);
        }
        if self.is_token(AbstractKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                p.is_token(NewKeyword)
            })
        {
            return self.parse_function_type(CONSTRUCTOR_TYPE, true);
        }

        let check_type = self.parse_union_type_or_higher();
        if self.is_token(ExtendsKeyword)
            && !self.has_preceding_line_break()
            && !self.in_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES)
        {
            self.next_token();
            let extends_type = self.with_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES, 0, |p| {
                p.parse_type()
            });
            self.parse_expected(QuestionToken);
            let true_type = self.parse_type();
            self.parse_expected(ColonToken);
            let false_type = self.parse_type();
            let pos = self.arena.pos(check_type);
            let end = self.arena.end(false_type);
            return self.arena.add_conditional_type(
                CONDITIONAL_TYPE,
                pos,
                end,
                ConditionalTypeData {
                    check_type,
                    extends_type,
                    true_type,
                    false_type,
                },
            );
        }
        check_type
    }

    /// `: T` — the annotation node spans from the colon through the type.
    pub(crate) fn parse_type_annotation(&mut self) -> NodeIndex {
        let colon_pos = self.token_pos();
        self.parse_expected(SyntaxKind::ColonToken);
        let type_node = self.parse_type();
        self.arena.set_pos(type_node, colon_pos);
        type_node
    }

    /// Return-type position: `: T`, `: x is T`, or `: asserts x is T`.
    pub(crate) fn parse_type_annotation_or_predicate(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let colon_pos = self.token_pos();
        self.parse_expected(ColonToken);

        let type_node = if self.is_token(AssertsKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                (p.is_identifier_or_keyword() || p.is_token(ThisKeyword))
                    && !p.has_preceding_line_break()
            })
        {
            let pos = self.token_pos();
            self.next_token();
            let parameter_name = if self.is_token(ThisKeyword) {
                self.consume_token_node()
            } else {
                self.parse_identifier_name()
            };
            let (type_node, end) = if self.parse_optional(IsKeyword) {
                let t = self.parse_type();
                let end = self.arena.end(t);
                (t, end)
            } else {
                (NodeIndex::NONE, self.arena.end(parameter_name))
            };
            self.arena.add_type_predicate(
                TYPE_PREDICATE,
                pos,
                end,
                TypePredicateData {
                    asserts: true,
                    parameter_name,
                    type_node,
                },
            )
        } else if (self.is_identifier_or_keyword() || self.is_token(ThisKeyword))
            && self.look_ahead(|p| {
                p.next_token();
                p.is_token(IsKeyword) && !p.has_preceding_line_break()
            })
        {
            let pos = self.token_pos();
            let parameter_name = if self.is_token(ThisKeyword) {
                self.consume_token_node()
            } else {
                self.parse_identifier_name()
            };
            self.parse_expected(IsKeyword);
            let t = self.parse_type();
            let end = self.arena.end(t);
            self.arena.add_type_predicate(
                TYPE_PREDICATE,
                pos,
                end,
                TypePredicateData {
                    asserts: false,
                    parameter_name,
                    type_node: t,
                },
            )
        } else {
            self.parse_type()
        };
        self.arena.set_pos(type_node, colon_pos);
        type_node
    }

    fn is_start_of_function_type(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if p.is_token(SyntaxKind::CloseParenToken) || p.is_token(SyntaxKind::DotDotDotToken) {
                return true;
            }
            if p.is_identifier_or_keyword() || p.is_token(SyntaxKind::ThisKeyword) {
                p.next_token();
                if matches!(
                    p.token(),
                    SyntaxKind::ColonToken
                        | SyntaxKind::CommaToken
                        | SyntaxKind::QuestionToken
                        | SyntaxKind::EqualsToken
                ) {
                    return true;
                }
                if p.is_token(SyntaxKind::CloseParenToken) {
                    p.next_token();
                    return p.is_token(SyntaxKind::EqualsGreaterThanToken);
                }
            }
            false
        })
    }

    fn parse_function_type(&mut self, kind: u16, abstract_modifier: bool) -> NodeIndex {
        let pos = self.token_pos();
        if abstract_modifier {
            self.next_token();
        }
        if kind == CONSTRUCTOR_TYPE {
            self.parse_expected(SyntaxKind::NewKeyword);
        }
        let type_parameters = if self.is_token(SyntaxKind::LessThanToken) {
            Some(self.parse_type_parameters())
        } else {
            None
        };
        let parameters = self.parse_parameter_list_parenthesized();
        let arrow_pos = self.token_pos();
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let return_type = self.parse_type();
        let end = self.arena.end(return_type);
        self.arena.add_function(
            kind,
            pos,
            end,
            FunctionData {
                modifiers: None,
                asterisk: false,
                name: NodeIndex::NONE,
                question_token: NodeIndex::NONE,
                type_parameters,
                parameters,
                return_type,
                arrow_pos,
                body: NodeIndex::NONE,
            },
        )
    }

    // =========================================================================
    // Unions, intersections, operators
    // =========================================================================

    fn parse_union_type_or_higher(&mut self) -> NodeIndex {
        let leading = self.is_token(SyntaxKind::BarToken);
        let pos = self.token_pos();
        if leading {
            self.next_token();
        }
        let first = self.parse_intersection_type_or_higher();
        if !leading && !self.is_token(SyntaxKind::BarToken) {
            return first;
        }
        let mut list = NodeList {
            pos: self.arena.pos(first),
            end: self.arena.end(first),
            nodes: vec![first],
            has_trailing_comma: false,
        };
        while self.parse_optional(SyntaxKind::BarToken) {
            let part = self.parse_intersection_type_or_higher();
            list.end = self.arena.end(part);
            list.nodes.push(part);
        }
        let start = if leading { pos } else { list.pos };
        let end = list.end;
        self.arena.add_list(UNION_TYPE, start, end, ListData { items: list })
    }

    fn parse_intersection_type_or_higher(&mut self) -> NodeIndex {
        let leading = self.is_token(SyntaxKind::AmpersandToken);
        let pos = self.token_pos();
        if leading {
            self.next_token();
        }
        let first = self.parse_type_operator_or_higher();
        if !leading && !self.is_token(SyntaxKind::AmpersandToken) {
            return first;
        }
        let mut list = NodeList {
            pos: self.arena.pos(first),
            end: self.arena.end(first),
            nodes: vec![first],
            has_trailing_comma: false,
        };
        while self.parse_optional(SyntaxKind::AmpersandToken) {
            let part = self.parse_type_operator_or_higher();
            list.end = self.arena.end(part);
            list.nodes.push(part);
        }
        let start = if leading { pos } else { list.pos };
        let end = list.end;
        self.arena
            .add_list(INTERSECTION_TYPE, start, end, ListData { items: list })
    }

    fn parse_type_operator_or_higher(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        match self.token() {
            KeyOfKeyword | UniqueKeyword | ReadonlyKeyword => {
                let pos = self.token_pos();
                let op = self.token();
                self.next_token();
                let type_node = self.parse_type_operator_or_higher();
                let end = self.arena.end(type_node);
                self.arena.add_type_operator(
                    TYPE_OPERATOR,
                    pos,
                    end,
                    TypeOperatorData {
                        operator: op as u16,
                        type_node,
                    },
                )
            }
            InferKeyword => {
                let pos = self.token_pos();
                self.next_token();
                let name = self.parse_identifier();
                let name_pos = self.arena.pos(name);
                let mut end = self.arena.end(name);
                let constraint = if self.is_token(ExtendsKeyword)
                    && !self.in_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES)
                {
                    // Would be ambiguous with a conditional type's own
                    // `extends`; TypeScript binds it to the infer.
                    self.next_token();
                    let c = self.with_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES, 0, |p| {
                        p.parse_type()
                    });
                    end = self.arena.end(c);
                    c
                } else {
                    NodeIndex::NONE
                };
                let type_parameter = self.arena.add_type_parameter(
                    TYPE_PARAMETER,
                    name_pos,
                    end,
                    TypeParameterData {
                        modifiers: None,
                        name,
                        constraint,
                        default: NodeIndex::NONE,
                    },
                );
                self.arena.add_wrapped(
                    INFER_TYPE,
                    pos,
                    end,
                    WrappedData {
                        inner: type_parameter,
                    },
                )
            }
            _ => self.parse_postfix_type(),
        }
    }

    fn parse_postfix_type(&mut self) -> NodeIndex {
        let mut type_node = self.parse_primary_type();
        while self.is_token(SyntaxKind::OpenBracketToken) && !self.has_preceding_line_break() {
            let pos = self.arena.pos(type_node);
            self.next_token();
            if self.is_token(SyntaxKind::CloseBracketToken) {
                let end = self.token_end();
                self.next_token();
                type_node =
                    self.arena
                        .add_wrapped(ARRAY_TYPE, pos, end, WrappedData { inner: type_node });
            } else {
                let index = self.parse_type();
                let end = self.token_end();
                self.parse_expected(SyntaxKind::CloseBracketToken);
                type_node = self.arena.add_pair(
                    INDEXED_ACCESS_TYPE,
                    pos,
                    end,
                    PairData {
                        left: type_node,
                        right: index,
                    },
                );
            }
        }
        type_node
    }

    // =========================================================================
    // Primary types
    // =========================================================================

    fn parse_primary_type(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        match self.token() {
            StringLiteral | NumericLiteral | BigIntLiteral | TrueKeyword | FalseKeyword
            | NullKeyword | NoSubstitutionTemplateLiteral => {
                let pos = self.token_pos();
                let literal = self.consume_token_node();
                let end = self.arena.end(literal);
                self.arena
                    .add_wrapped(LITERAL_TYPE, pos, end, WrappedData { inner: literal })
            }
            MinusToken => {
                let pos = self.token_pos();
                self.next_token();
                let operand = self.consume_token_node();
                let end = self.arena.end(operand);
                let negated = self.arena.add_unary(
                    PREFIX_UNARY_EXPRESSION,
                    pos,
                    end,
                    UnaryData {
                        operator: MinusToken as u16,
                        operand,
                    },
                );
                self.arena
                    .add_wrapped(LITERAL_TYPE, pos, end, WrappedData { inner: negated })
            }
            TemplateHead => self.parse_template_literal_type(),
            VoidKeyword | ThisKeyword => self.consume_token_node(),
            TypeOfKeyword => {
                let pos = self.token_pos();
                self.next_token();
                let expr_name = self.parse_entity_name();
                let mut end = self.arena.end(expr_name);
                let type_arguments = if self.is_token(LessThanToken) {
                    let args = self.parse_type_arguments();
                    end = self.token_full_start();
                    Some(args)
                } else {
                    None
                };
                self.arena.add_type_ref(
                    TYPE_QUERY,
                    pos,
                    end,
                    TypeRefData {
                        type_name: expr_name,
                        type_arguments,
                    },
                )
            }
            OpenBraceToken => {
                if self.is_mapped_type_start() {
                    self.parse_mapped_type()
                } else {
                    self.parse_type_literal()
                }
            }
            OpenBracketToken => self.parse_tuple_type(),
            OpenParenToken => {
                let pos = self.token_pos();
                self.next_token();
                let inner = self.parse_type();
                let end = self.token_end();
                self.parse_expected(CloseParenToken);
                self.arena
                    .add_wrapped(PARENTHESIZED_TYPE, pos, end, WrappedData { inner })
            }
            ImportKeyword => self.parse_import_type(),
            token if token_is_identifier_or_keyword(token) => self.parse_type_reference(),
            _ => {
                self.parse_error_at_current_token("type expected");
                let pos = self.token_pos();
                let end = self.token_end();
                self.next_token();
                self.arena.add_token(Unknown, pos, end)
            }
        }
    }

    pub(crate) fn parse_type_reference(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let type_name = self.parse_entity_name();
        let mut end = self.arena.end(type_name);
        let type_arguments = if self.is_token(SyntaxKind::LessThanToken)
            && !self.has_preceding_line_break()
        {
            let args = self.parse_type_arguments();
            end = self.token_full_start();
            Some(args)
        } else {
            None
        };
        self.arena.add_type_ref(
            TYPE_REFERENCE,
            pos,
            end,
            TypeRefData {
                type_name,
                type_arguments,
            },
        )
    }

    /// `import("mod").A.B<T>` — modeled as a type reference whose leftmost
    /// name is the specifier literal.
    fn parse_import_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let mut name = self.consume_token_node();
        self.parse_expected(SyntaxKind::CloseParenToken);
        while self.parse_optional(SyntaxKind::DotToken) {
            let right = self.parse_identifier_name();
            let left_pos = self.arena.pos(name);
            let end = self.arena.end(right);
            name = self.arena.add_pair(
                QUALIFIED_NAME,
                left_pos,
                end,
                PairData { left: name, right },
            );
        }
        let mut end = self.arena.end(name);
        let type_arguments = if self.is_token(SyntaxKind::LessThanToken) {
            let args = self.parse_type_arguments();
            end = self.token_full_start();
            Some(args)
        } else {
            None
        };
        self.arena.add_type_ref(
            TYPE_REFERENCE,
            pos,
            end,
            TypeRefData {
                type_name: name,
                type_arguments,
            },
        )
    }

    pub(crate) fn parse_entity_name(&mut self) -> NodeIndex {
        let mut name = self.parse_identifier_name();
        while self.is_token(SyntaxKind::DotToken)
            && self.look_ahead(|p| {
                p.next_token();
                p.is_identifier_or_keyword()
            })
        {
            self.next_token();
            let right = self.parse_identifier_name();
            let pos = self.arena.pos(name);
            let end = self.arena.end(right);
            name = self
                .arena
                .add_pair(QUALIFIED_NAME, pos, end, PairData { left: name, right });
        }
        name
    }

    fn parse_template_literal_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let head = self.consume_token_node();
        let mut spans = NodeList {
            pos: self.token_pos(),
            ..NodeList::new()
        };
        let end;
        loop {
            let type_node = self.parse_type();
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                self.parse_error_at_current_token("'}' expected");
                end = self.arena.end(type_node);
                break;
            }
            self.current_token = self.scanner.re_scan_template_token();
            let is_tail = self.is_token(SyntaxKind::TemplateTail);
            let literal = self.consume_token_node();
            let span_pos = self.arena.pos(type_node);
            let span_end = self.arena.end(literal);
            let span = self.arena.add_pair(
                TEMPLATE_LITERAL_TYPE_SPAN,
                span_pos,
                span_end,
                PairData {
                    left: type_node,
                    right: literal,
                },
            );
            spans.nodes.push(span);
            spans.end = span_end;
            if is_tail {
                end = span_end;
                break;
            }
        }
        self.arena
            .add_template(TEMPLATE_LITERAL_TYPE, pos, end, TemplateData { head, spans })
    }

    // =========================================================================
    // Object-shaped types
    // =========================================================================

    fn is_mapped_type_start(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if p.is_token(SyntaxKind::PlusToken) || p.is_token(SyntaxKind::MinusToken) {
                p.next_token();
                return p.is_token(SyntaxKind::ReadonlyKeyword);
            }
            if p.is_token(SyntaxKind::ReadonlyKeyword) {
                p.next_token();
            }
            if !p.is_token(SyntaxKind::OpenBracketToken) {
                return false;
            }
            p.next_token();
            if !p.is_identifier_or_keyword() {
                return false;
            }
            p.next_token();
            p.is_token(SyntaxKind::InKeyword)
        })
    }

    fn parse_mapped_type(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        self.next_token();
        let readonly_token = if self.is_token(PlusToken) || self.is_token(MinusToken) {
            self.next_token();
            self.consume_token_node()
        } else if self.is_token(ReadonlyKeyword) {
            self.consume_token_node()
        } else {
            NodeIndex::NONE
        };
        self.parse_expected(OpenBracketToken);
        let name = self.parse_identifier_name();
        let name_pos = self.arena.pos(name);
        self.parse_expected(InKeyword);
        let constraint = self.parse_type();
        let tp_end = self.arena.end(constraint);
        let type_parameter = self.arena.add_type_parameter(
            TYPE_PARAMETER,
            name_pos,
            tp_end,
            TypeParameterData {
                modifiers: None,
                name,
                constraint,
                default: NodeIndex::NONE,
            },
        );
        let name_type = if self.parse_optional(AsKeyword) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        self.parse_expected(CloseBracketToken);
        let question_token = if self.is_token(PlusToken) || self.is_token(MinusToken) {
            self.next_token();
            self.consume_token_node()
        } else if self.is_token(QuestionToken) {
            self.consume_token_node()
        } else {
            NodeIndex::NONE
        };
        let type_node = if self.parse_optional(ColonToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        self.parse_optional(SemicolonToken);
        let end = self.token_end();
        self.parse_expected(CloseBraceToken);
        self.arena.add_mapped_type(
            MAPPED_TYPE,
            pos,
            end,
            MappedTypeData {
                readonly_token,
                type_parameter,
                name_type,
                question_token,
                type_node,
            },
        )
    }

    fn parse_type_literal(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let list_pos = self.token_pos();
        let mut items = NodeList {
            pos: list_pos,
            end: list_pos,
            ..NodeList::new()
        };
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let member = self.parse_type_member();
            items.end = self.arena.end(member);
            items.nodes.push(member);
        }
        let end = self.token_end();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add_list(TYPE_LITERAL, pos, end, ListData { items })
    }

    /// One member of a type literal or interface body, separator included.
    pub(crate) fn parse_type_member(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();

        if self.is_token(OpenParenToken) || self.is_token(LessThanToken) {
            return self.parse_signature_member(pos, CALL_SIGNATURE);
        }
        if self.is_token(NewKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                p.is_token(OpenParenToken) || p.is_token(LessThanToken)
            })
        {
            self.next_token();
            return self.parse_signature_member(pos, CONSTRUCT_SIGNATURE);
        }

        let mut modifiers: Vec<NodeIndex> = Vec::new();
        if self.is_token(ReadonlyKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                p.is_property_name_start()
            })
        {
            modifiers.push(self.consume_token_node());
        }

        if self.is_token(OpenBracketToken) && self.is_index_signature_start() {
            return self.parse_index_signature_member(pos, modifiers);
        }

        if (self.is_token(GetKeyword) || self.is_token(SetKeyword))
            && self.look_ahead(|p| {
                p.next_token();
                p.is_property_name_start()
            })
        {
            let kind = if self.is_token(GetKeyword) {
                GET_ACCESSOR
            } else {
                SET_ACCESSOR
            };
            self.next_token();
            let name = self.parse_property_name();
            let member = self.parse_signature_member_named(pos, kind, name, NodeIndex::NONE);
            return member;
        }

        let name = self.parse_property_name();
        let question_token = if self.is_token(QuestionToken) {
            self.consume_token_node()
        } else {
            NodeIndex::NONE
        };

        if self.is_token(OpenParenToken) || self.is_token(LessThanToken) {
            return self.parse_signature_member_named(pos, METHOD_SIGNATURE, name, question_token);
        }

        let type_annotation = if self.is_token(ColonToken) {
            self.parse_type_annotation()
        } else {
            NodeIndex::NONE
        };
        let end = self.parse_type_member_terminator(if type_annotation.is_some() {
            self.arena.end(type_annotation)
        } else if question_token.is_some() {
            self.arena.end(question_token)
        } else {
            self.arena.end(name)
        });
        let modifiers = self.make_modifier_list(modifiers);
        self.arena.add_property(
            PROPERTY_SIGNATURE,
            pos,
            end,
            PropertyData {
                modifiers,
                name,
                question_token,
                exclamation_token: NodeIndex::NONE,
                type_annotation,
                initializer: NodeIndex::NONE,
            },
        )
    }

    fn parse_signature_member(&mut self, pos: u32, kind: u16) -> NodeIndex {
        self.parse_signature_member_named(pos, kind, NodeIndex::NONE, NodeIndex::NONE)
    }

    fn parse_signature_member_named(
        &mut self,
        pos: u32,
        kind: u16,
        name: NodeIndex,
        question_token: NodeIndex,
    ) -> NodeIndex {
        let type_parameters = if self.is_token(SyntaxKind::LessThanToken) {
            Some(self.parse_type_parameters())
        } else {
            None
        };
        let parameters = self.parse_parameter_list_parenthesized();
        let return_type = if self.is_token(SyntaxKind::ColonToken) {
            self.parse_type_annotation_or_predicate()
        } else {
            NodeIndex::NONE
        };
        let end = self.parse_type_member_terminator(if return_type.is_some() {
            self.arena.end(return_type)
        } else {
            self.token_full_start()
        });
        self.arena.add_function(
            kind,
            pos,
            end,
            FunctionData {
                modifiers: None,
                asterisk: false,
                name,
                question_token,
                type_parameters,
                parameters,
                return_type,
                arrow_pos: FunctionData::NO_ARROW,
                body: NodeIndex::NONE,
            },
        )
    }

    pub(crate) fn is_index_signature_start(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if !p.is_identifier_or_keyword() {
                return false;
            }
            p.next_token();
            p.is_token(SyntaxKind::ColonToken)
        })
    }

    pub(crate) fn parse_index_signature_member(
        &mut self,
        pos: u32,
        modifiers: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let list_pos = self.token_pos();
        let parameter = self.parse_parameter();
        let parameters = NodeList {
            pos: list_pos,
            end: self.arena.end(parameter),
            nodes: vec![parameter],
            has_trailing_comma: false,
        };
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let type_annotation = if self.is_token(SyntaxKind::ColonToken) {
            self.parse_type_annotation()
        } else {
            NodeIndex::NONE
        };
        let end = self.parse_type_member_terminator(if type_annotation.is_some() {
            self.arena.end(type_annotation)
        } else {
            self.token_full_start()
        });
        let modifiers = self.make_modifier_list(modifiers);
        self.arena.add_index_signature(
            INDEX_SIGNATURE,
            pos,
            end,
            IndexSignatureData {
                modifiers,
                parameters,
                type_annotation,
            },
        )
    }

    /// Consume a `,`/`;` member separator; the member's end includes it.
    fn parse_type_member_terminator(&mut self, bare_end: u32) -> u32 {
        if self.is_token(SyntaxKind::SemicolonToken) || self.is_token(SyntaxKind::CommaToken) {
            let end = self.token_end();
            self.next_token();
            end
        } else {
            bare_end
        }
    }

    pub(crate) fn make_modifier_list(&self, modifiers: Vec<NodeIndex>) -> Option<NodeList> {
        if modifiers.is_empty() {
            return None;
        }
        let pos = self.arena.pos(modifiers[0]);
        let end = self.arena.end(*modifiers.last().unwrap());
        Some(NodeList {
            nodes: modifiers,
            pos,
            end,
            has_trailing_comma: false,
        })
    }

    // =========================================================================
    // Tuples
    // =========================================================================

    fn parse_tuple_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let list_pos = self.token_pos();
        let mut items = self.parse_delimited_list(list_pos, SyntaxKind::CloseBracketToken, |p| {
            p.parse_tuple_element()
        });
        items.pos = list_pos;
        let end = self.token_end();
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.arena.add_list(TUPLE_TYPE, pos, end, ListData { items })
    }

    fn parse_tuple_element(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        let dot_dot_dot = self.parse_optional(DotDotDotToken);

        // Named member: `name: T`, `name?: T`, `...name: T`.
        let named = self.is_identifier_or_keyword()
            && self.look_ahead(|p| {
                p.next_token();
                if p.is_token(QuestionToken) {
                    p.next_token();
                }
                p.is_token(ColonToken)
            });
        if named {
            let name = self.parse_identifier_name();
            let question_token = if self.is_token(QuestionToken) {
                self.consume_token_node()
            } else {
                NodeIndex::NONE
            };
            self.parse_expected(ColonToken);
            let type_node = self.parse_type();
            let end = self.arena.end(type_node);
            return self.arena.add_named_tuple_member(
                NAMED_TUPLE_MEMBER,
                pos,
                end,
                NamedTupleMemberData {
                    dot_dot_dot,
                    name,
                    question_token,
                    type_node,
                },
            );
        }

        let type_node = self.parse_type();
        let mut element = type_node;
        if dot_dot_dot {
            let end = self.arena.end(type_node);
            element = self
                .arena
                .add_wrapped(REST_TYPE, pos, end, WrappedData { inner: type_node });
        } else if self.is_token(QuestionToken) {
            let end = self.token_end();
            self.next_token();
            element = self
                .arena
                .add_wrapped(OPTIONAL_TYPE, pos, end, WrappedData { inner: type_node });
        }
        element
    }

    // =========================================================================
    // Type parameters and arguments
    // =========================================================================

    /// `<T extends U = V, const in out W>`; list `pos` sits just past `<`.
    pub(crate) fn parse_type_parameters(&mut self) -> NodeList {
        let lt_end = self.token_end();
        self.parse_expected(SyntaxKind::LessThanToken);
        let mut list = self.parse_delimited_list(lt_end, SyntaxKind::GreaterThanToken, |p| {
            p.parse_type_parameter_declaration()
        });
        list.pos = lt_end;
        self.parse_expected(SyntaxKind::GreaterThanToken);
        list
    }

    fn parse_type_parameter_declaration(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        let mut modifiers = Vec::new();
        while matches!(self.token(), ConstKeyword | InKeyword | OutKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                p.is_identifier_or_keyword()
                    || p.is_token(InKeyword)
                    || p.is_token(OutKeyword)
            })
        {
            modifiers.push(self.consume_token_node());
        }
        let name = self.parse_identifier();
        let mut end = self.arena.end(name);
        let constraint = if self.parse_optional(ExtendsKeyword) {
            let c = self.parse_type();
            end = self.arena.end(c);
            c
        } else {
            NodeIndex::NONE
        };
        let default = if self.parse_optional(EqualsToken) {
            let d = self.parse_type();
            end = self.arena.end(d);
            d
        } else {
            NodeIndex::NONE
        };
        let modifiers = self.make_modifier_list(modifiers);
        self.arena.add_type_parameter(
            TYPE_PARAMETER,
            pos,
            end,
            TypeParameterData {
                modifiers,
                name,
                constraint,
                default,
            },
        )
    }

    /// Type arguments inside the type grammar (not speculative).
    pub(crate) fn parse_type_arguments(&mut self) -> NodeList {
        let lt_end = self.token_end();
        self.parse_expected(SyntaxKind::LessThanToken);
        let mut list =
            self.parse_delimited_list(lt_end, SyntaxKind::GreaterThanToken, |p| p.parse_type());
        list.pos = lt_end;
        self.parse_expected(SyntaxKind::GreaterThanToken);
        list
    }

    /// Speculative form used in expression position: `None` unless a
    /// well-formed non-empty list closed by `>` is found.
    pub(crate) fn parse_type_arguments_checked(&mut self) -> Option<NodeList> {
        if self.is_token(SyntaxKind::LessThanLessThanToken) {
            self.current_token = self.scanner.re_scan_less_than_token();
        }
        if !self.is_token(SyntaxKind::LessThanToken) {
            return None;
        }
        let lt_end = self.token_end();
        self.next_token();
        let mut list =
            self.parse_delimited_list(lt_end, SyntaxKind::GreaterThanToken, |p| p.parse_type());
        list.pos = lt_end;
        if list.is_empty() || !self.is_token(SyntaxKind::GreaterThanToken) {
            return None;
        }
        self.next_token();
        Some(list)
    }

    #[inline]
    pub(crate) fn token_full_start(&self) -> u32 {
        self.scanner.get_token_full_start() as u32
    }
}
