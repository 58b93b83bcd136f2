//! Expression parsing: precedence climbing with the handful of lookaheads
//! TypeScript needs (arrows, type arguments in call position, legacy
//! assertions).

use crate::base::{NodeIndex, NodeList};
use crate::node::*;
use crate::state::{ParserState, CONTEXT_FLAG_DISALLOW_IN};
use crate::syntax_kind::*;
use tsblank_scanner::{token_is_identifier_or_keyword, token_is_reserved_word, SyntaxKind};

/// Binary operator precedence, TypeScript's table.
fn binary_precedence(token: SyntaxKind) -> Option<u8> {
    use SyntaxKind::*;
    let prec = match token {
        QuestionQuestionToken | BarBarToken => 4,
        AmpersandAmpersandToken => 5,
        BarToken => 6,
        CaretToken => 7,
        AmpersandToken => 8,
        EqualsEqualsToken | ExclamationEqualsToken | EqualsEqualsEqualsToken
        | ExclamationEqualsEqualsToken => 9,
        LessThanToken | GreaterThanToken | LessThanEqualsToken | GreaterThanEqualsToken
        | InstanceOfKeyword | InKeyword => 10,
        LessThanLessThanToken | GreaterThanGreaterThanToken
        | GreaterThanGreaterThanGreaterThanToken => 11,
        PlusToken | MinusToken => 12,
        AsteriskToken | SlashToken | PercentToken => 13,
        AsteriskAsteriskToken => 14,
        _ => return None,
    };
    Some(prec)
}

impl ParserState {
    // =========================================================================
    // Entry points
    // =========================================================================

    /// Full expression including the comma operator.
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        let mut expr = self.parse_assignment_expression();
        while self.is_token(SyntaxKind::CommaToken) {
            self.next_token();
            let right = self.parse_assignment_expression();
            expr = self.make_binary(expr, SyntaxKind::CommaToken, right);
        }
        expr
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            self.exit_recursion();
            return self.make_missing_identifier();
        }
        let result = self.parse_assignment_expression_inner();
        self.exit_recursion();
        result
    }

    fn parse_assignment_expression_inner(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::YieldKeyword) && self.is_yield_expression() {
            return self.parse_yield_expression();
        }

        // Arrow function lookahead. `x =>`, `async x =>`, and the
        // parenthesized/generic forms via speculation.
        if let Some(arrow) = self.try_parse_arrow_function() {
            return arrow;
        }

        let expr = self.parse_binary_expression(0);

        if tsblank_scanner::token_is_assignment_operator(self.token()) {
            let op = self.token();
            self.next_token();
            let right = self.parse_assignment_expression();
            return self.make_binary(expr, op, right);
        }

        if self.is_token(SyntaxKind::QuestionToken) {
            self.next_token();
            let when_true =
                self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_assignment_expression());
            self.parse_expected(SyntaxKind::ColonToken);
            let when_false = self.parse_assignment_expression();
            let pos = self.arena.pos(expr);
            let end = self.arena.end(when_false);
            return self.arena.add_conditional(
                CONDITIONAL_EXPRESSION,
                pos,
                end,
                ConditionalData {
                    condition: expr,
                    when_true,
                    when_false,
                },
            );
        }

        expr
    }

    fn make_binary(&mut self, left: NodeIndex, op: SyntaxKind, right: NodeIndex) -> NodeIndex {
        let pos = self.arena.pos(left);
        let end = self.arena.end(right);
        self.arena.add_binary(
            BINARY_EXPRESSION,
            pos,
            end,
            BinaryData {
                left,
                operator: op as u16,
                right,
            },
        )
    }

    fn is_yield_expression(&mut self) -> bool {
        // `yield` as a binding name is still common in sloppy code; treat
        // it as an expression only when something yieldable follows.
        self.look_ahead(|p| {
            p.next_token();
            p.is_token(SyntaxKind::AsteriskToken) && !p.has_preceding_line_break()
                || (!p.has_preceding_line_break() && p.is_start_of_expression())
        }) || self.look_ahead(|p| {
            p.next_token();
            matches!(
                p.token(),
                SyntaxKind::SemicolonToken
                    | SyntaxKind::CloseParenToken
                    | SyntaxKind::CloseBracketToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::CommaToken
                    | SyntaxKind::EndOfFileToken
            ) || p.has_preceding_line_break()
        })
    }

    fn parse_yield_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let asterisk = !self.has_preceding_line_break() && self.parse_optional(SyntaxKind::AsteriskToken);
        let expression = if asterisk
            || (!self.has_preceding_line_break() && self.is_start_of_expression())
        {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };
        let end = if expression.is_some() {
            self.arena.end(expression)
        } else {
            pos + 5
        };
        self.arena.add_yield(
            YIELD_EXPRESSION,
            pos,
            end,
            YieldData {
                asterisk,
                expression,
            },
        )
    }

    pub(crate) fn is_start_of_expression(&self) -> bool {
        use SyntaxKind::*;
        match self.token() {
            NumericLiteral | BigIntLiteral | StringLiteral | NoSubstitutionTemplateLiteral
            | TemplateHead | RegularExpressionLiteral | OpenParenToken | OpenBracketToken
            | OpenBraceToken | FunctionKeyword | ClassKeyword | NewKeyword | ThisKeyword
            | SuperKeyword | NullKeyword | TrueKeyword | FalseKeyword | ImportKeyword
            | TypeOfKeyword | VoidKeyword | DeleteKeyword | AwaitKeyword | YieldKeyword
            | PlusToken | MinusToken | TildeToken | ExclamationToken | PlusPlusToken
            | MinusMinusToken | LessThanToken | SlashToken | SlashEqualsToken
            | PrivateIdentifier | AtToken => true,
            token => token_is_identifier_or_keyword(token) && !token_is_reserved_word(token),
        }
    }

    // =========================================================================
    // Arrow functions
    // =========================================================================

    fn try_parse_arrow_function(&mut self) -> Option<NodeIndex> {
        use SyntaxKind::*;
        match self.token() {
            // `x => ...`
            token if token_is_identifier_or_keyword(token) && !token_is_reserved_word(token) => {
                if token == AsyncKeyword {
                    // `async x => ...` / `async (...) => ...` / `async <T>(...) => ...`
                    let shape = self.look_ahead(|p| {
                        p.next_token();
                        if p.has_preceding_line_break() {
                            return 0u8;
                        }
                        if token_is_identifier_or_keyword(p.token())
                            && !token_is_reserved_word(p.token())
                        {
                            p.next_token();
                            return if p.is_token(EqualsGreaterThanToken) { 1 } else { 0 };
                        }
                        if p.is_token(OpenParenToken) || p.is_token(LessThanToken) {
                            return 2;
                        }
                        0
                    });
                    match shape {
                        1 => {
                            let pos = self.token_pos();
                            let async_modifier = self.consume_token_node();
                            return Some(self.parse_simple_arrow(pos, Some(async_modifier)));
                        }
                        2 => return self.try_parse(|p| p.parse_parenthesized_arrow(true)),
                        _ => return None,
                    }
                }
                let is_arrow = self.look_ahead(|p| {
                    p.next_token();
                    p.is_token(EqualsGreaterThanToken)
                });
                if is_arrow {
                    let pos = self.token_pos();
                    return Some(self.parse_simple_arrow(pos, None));
                }
                None
            }
            OpenParenToken | LessThanToken => self.try_parse(|p| p.parse_parenthesized_arrow(false)),
            _ => None,
        }
    }

    fn parse_simple_arrow(&mut self, pos: u32, async_modifier: Option<NodeIndex>) -> NodeIndex {
        let name = self.parse_identifier();
        let name_pos = self.arena.pos(name);
        let name_end = self.arena.end(name);
        let parameter = self.arena.add_parameter(
            PARAMETER,
            name_pos,
            name_end,
            ParameterData {
                modifiers: None,
                dot_dot_dot: false,
                name,
                question_token: NodeIndex::NONE,
                type_annotation: NodeIndex::NONE,
                initializer: NodeIndex::NONE,
            },
        );
        let parameters = NodeList {
            nodes: vec![parameter],
            pos: name_pos,
            end: name_end,
            has_trailing_comma: false,
        };
        let arrow_pos = self.token_pos();
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let body = self.parse_arrow_body();
        let end = self.arena.end(body);
        let modifiers = async_modifier.map(|m| NodeList {
            nodes: vec![m],
            pos: self.arena.pos(m),
            end: self.arena.end(m),
            has_trailing_comma: false,
        });
        self.arena.add_function(
            ARROW_FUNCTION,
            pos,
            end,
            FunctionData {
                modifiers,
                asterisk: false,
                name: NodeIndex::NONE,
                question_token: NodeIndex::NONE,
                type_parameters: None,
                parameters,
                return_type: NodeIndex::NONE,
                arrow_pos,
                body,
            },
        )
    }

    /// Speculative parse of `<T>(a: X): R => body` / `(a, b) => body`.
    /// Returns `None` (caller rewinds) when the shape is not an arrow.
    fn parse_parenthesized_arrow(&mut self, is_async: bool) -> Option<NodeIndex> {
        let pos = self.token_pos();
        let modifiers = if is_async {
            let m = self.consume_token_node();
            Some(NodeList {
                pos: self.arena.pos(m),
                end: self.arena.end(m),
                nodes: vec![m],
                has_trailing_comma: false,
            })
        } else {
            None
        };

        let type_parameters = if self.is_token(SyntaxKind::LessThanToken) {
            Some(self.parse_type_parameters())
        } else {
            None
        };

        if !self.is_token(SyntaxKind::OpenParenToken) {
            return None;
        }
        self.next_token();
        let list_pos = self.token_pos();
        let mut parameters = self.parse_delimited_list(list_pos, SyntaxKind::CloseParenToken, |p| {
            p.parse_parameter()
        });
        parameters.pos = list_pos;
        if !self.is_token(SyntaxKind::CloseParenToken) {
            return None;
        }
        self.next_token();

        let return_type = if self.is_token(SyntaxKind::ColonToken) {
            self.parse_type_annotation_or_predicate()
        } else {
            NodeIndex::NONE
        };

        if !self.is_token(SyntaxKind::EqualsGreaterThanToken) {
            return None;
        }
        let arrow_pos = self.token_pos();
        self.next_token();
        let body = self.parse_arrow_body();
        let end = self.arena.end(body);
        Some(self.arena.add_function(
            ARROW_FUNCTION,
            pos,
            end,
            FunctionData {
                modifiers,
                asterisk: false,
                name: NodeIndex::NONE,
                question_token: NodeIndex::NONE,
                type_parameters,
                parameters,
                return_type,
                arrow_pos,
                body,
            },
        ))
    }

    fn parse_arrow_body(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_function_body_block()
        } else {
            self.parse_assignment_expression()
        }
    }

    /// A block that opens a new function scope for label tracking.
    pub(crate) fn parse_function_body_block(&mut self) -> NodeIndex {
        self.push_label_scope();
        let body = self.parse_block();
        self.pop_label_scope();
        body
    }

    // =========================================================================
    // Binary and unary expressions
    // =========================================================================

    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let mut left = self.parse_unary_expression_or_higher();
        loop {
            if self.is_token(SyntaxKind::GreaterThanToken) {
                // Operator position: merge the `>` run the scanner left split.
                self.current_token = self.scanner.re_scan_greater_token();
            }
            let token = self.token();

            if (token == SyntaxKind::AsKeyword || token == SyntaxKind::SatisfiesKeyword)
                && !self.has_preceding_line_break()
                && 10 > min_precedence
            {
                let kind = if token == SyntaxKind::AsKeyword {
                    AS_EXPRESSION
                } else {
                    SATISFIES_EXPRESSION
                };
                self.next_token();
                let type_node = if self.is_token(SyntaxKind::ConstKeyword) {
                    self.consume_token_node()
                } else {
                    self.parse_type()
                };
                let pos = self.arena.pos(left);
                let end = self.arena.end(type_node);
                left = self.arena.add_type_assertion(
                    kind,
                    pos,
                    end,
                    TypeAssertionData {
                        expression: left,
                        type_node,
                    },
                );
                continue;
            }

            let Some(precedence) = binary_precedence(token) else { break };
            if token == SyntaxKind::InKeyword && self.in_context(CONTEXT_FLAG_DISALLOW_IN) {
                break;
            }
            let proceed = if token == SyntaxKind::AsteriskAsteriskToken {
                precedence >= min_precedence
            } else {
                precedence > min_precedence
            };
            if !proceed {
                break;
            }
            self.next_token();
            let right = self.parse_binary_expression(precedence);
            left = self.make_binary(left, token, right);
        }
        left
    }

    fn parse_unary_expression_or_higher(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();
        match self.token() {
            PlusToken | MinusToken | TildeToken | ExclamationToken | PlusPlusToken
            | MinusMinusToken => {
                let op = self.token();
                self.next_token();
                let operand = self.parse_unary_expression_or_higher();
                let end = self.arena.end(operand);
                self.arena.add_unary(
                    PREFIX_UNARY_EXPRESSION,
                    pos,
                    end,
                    UnaryData {
                        operator: op as u16,
                        operand,
                    },
                )
            }
            TypeOfKeyword | VoidKeyword | DeleteKeyword | AwaitKeyword => {
                let kind = match self.token() {
                    TypeOfKeyword => TYPEOF_EXPRESSION,
                    VoidKeyword => VOID_EXPRESSION,
                    DeleteKeyword => DELETE_EXPRESSION,
                    _ => AWAIT_EXPRESSION,
                };
                self.next_token();
                let operand = self.parse_unary_expression_or_higher();
                let end = self.arena.end(operand);
                self.arena
                    .add_wrapped(kind, pos, end, WrappedData { inner: operand })
            }
            LessThanToken => self.parse_legacy_type_assertion(),
            _ => {
                let expr = self.parse_left_hand_side_expression();
                if (self.is_token(PlusPlusToken) || self.is_token(MinusMinusToken))
                    && !self.has_preceding_line_break()
                {
                    let op = self.token();
                    let end = self.token_end();
                    self.next_token();
                    let start = self.arena.pos(expr);
                    return self.arena.add_unary(
                        POSTFIX_UNARY_EXPRESSION,
                        start,
                        end,
                        UnaryData {
                            operator: op as u16,
                            operand: expr,
                        },
                    );
                }
                expr
            }
        }
    }

    /// `<T>expr` — unsupported downstream but parsed faithfully.
    fn parse_legacy_type_assertion(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::LessThanToken);
        let type_node = self.parse_type();
        self.parse_expected(SyntaxKind::GreaterThanToken);
        let expression = self.parse_unary_expression_or_higher();
        let end = self.arena.end(expression);
        self.arena.add_type_assertion(
            TYPE_ASSERTION_EXPRESSION,
            pos,
            end,
            TypeAssertionData {
                expression,
                type_node,
            },
        )
    }

    // =========================================================================
    // Left-hand side: member/call chains
    // =========================================================================

    pub(crate) fn parse_left_hand_side_expression(&mut self) -> NodeIndex {
        let expr = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        self.parse_member_and_call_chain(expr, true)
    }

    fn parse_new_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let new_token = self.consume_token_node();
        if self.is_token(SyntaxKind::DotToken) {
            // new.target
            self.next_token();
            let name = self.parse_identifier_name();
            let end = self.arena.end(name);
            return self.arena.add_pair(
                META_PROPERTY,
                pos,
                end,
                PairData {
                    left: new_token,
                    right: name,
                },
            );
        }
        let callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            let primary = self.parse_primary_expression();
            self.parse_member_and_call_chain(primary, false)
        };
        let type_arguments = if self.is_token(SyntaxKind::LessThanToken) {
            self.try_parse(|p| {
                let args = p.parse_type_arguments_checked()?;
                if p.is_token(SyntaxKind::OpenParenToken) || !p.is_start_of_expression() {
                    Some(args)
                } else {
                    None
                }
            })
        } else {
            None
        };
        let (arguments, end) = if self.is_token(SyntaxKind::OpenParenToken) {
            let (list, close_end) = self.parse_argument_list();
            (Some(list), close_end)
        } else {
            let end = type_arguments
                .as_ref()
                .map(|_| self.scanner.get_token_full_start() as u32)
                .unwrap_or_else(|| self.arena.end(callee));
            (None, end)
        };
        self.arena.add_call(
            NEW_EXPRESSION,
            pos,
            end,
            CallData {
                expression: callee,
                question_dot: false,
                type_arguments,
                arguments,
            },
        )
    }

    fn parse_member_and_call_chain(&mut self, mut expr: NodeIndex, allow_calls: bool) -> NodeIndex {
        use SyntaxKind::*;
        loop {
            let pos = self.arena.pos(expr);
            match self.token() {
                DotToken => {
                    self.next_token();
                    let name = self.parse_member_name();
                    let end = self.arena.end(name);
                    expr = self.arena.add_access(
                        PROPERTY_ACCESS_EXPRESSION,
                        pos,
                        end,
                        AccessData {
                            expression: expr,
                            question_dot: false,
                            name_or_index: name,
                        },
                    );
                }
                QuestionDotToken => {
                    self.next_token();
                    if self.is_token(OpenBracketToken) {
                        self.next_token();
                        let index = self.parse_expression();
                        let end = self.token_end();
                        self.parse_expected(CloseBracketToken);
                        expr = self.arena.add_access(
                            ELEMENT_ACCESS_EXPRESSION,
                            pos,
                            end,
                            AccessData {
                                expression: expr,
                                question_dot: true,
                                name_or_index: index,
                            },
                        );
                    } else if self.is_token(OpenParenToken) && allow_calls {
                        let (arguments, end) = self.parse_argument_list();
                        expr = self.arena.add_call(
                            CALL_EXPRESSION,
                            pos,
                            end,
                            CallData {
                                expression: expr,
                                question_dot: true,
                                type_arguments: None,
                                arguments: Some(arguments),
                            },
                        );
                    } else if self.is_token(LessThanToken) && allow_calls {
                        let type_arguments = self.parse_type_arguments_checked();
                        let (arguments, end) = self.parse_argument_list();
                        expr = self.arena.add_call(
                            CALL_EXPRESSION,
                            pos,
                            end,
                            CallData {
                                expression: expr,
                                question_dot: true,
                                type_arguments,
                                arguments: Some(arguments),
                            },
                        );
                    } else {
                        let name = self.parse_member_name();
                        let end = self.arena.end(name);
                        expr = self.arena.add_access(
                            PROPERTY_ACCESS_EXPRESSION,
                            pos,
                            end,
                            AccessData {
                                expression: expr,
                                question_dot: true,
                                name_or_index: name,
                            },
                        );
                    }
                }
                OpenBracketToken => {
                    self.next_token();
                    let index = self.parse_expression();
                    let end = self.token_end();
                    self.parse_expected(CloseBracketToken);
                    expr = self.arena.add_access(
                        ELEMENT_ACCESS_EXPRESSION,
                        pos,
                        end,
                        AccessData {
                            expression: expr,
                            question_dot: false,
                            name_or_index: index,
                        },
                    );
                }
                ExclamationToken if !self.has_preceding_line_break() => {
                    let end = self.token_end();
                    self.next_token();
                    expr = self
                        .arena
                        .add_wrapped(NON_NULL_EXPRESSION, pos, end, WrappedData { inner: expr });
                }
                OpenParenToken if allow_calls => {
                    let (arguments, end) = self.parse_argument_list();
                    expr = self.arena.add_call(
                        CALL_EXPRESSION,
                        pos,
                        end,
                        CallData {
                            expression: expr,
                            question_dot: false,
                            type_arguments: None,
                            arguments: Some(arguments),
                        },
                    );
                }
                NoSubstitutionTemplateLiteral | TemplateHead => {
                    let template = self.parse_template_literal();
                    let end = self.arena.end(template);
                    expr = self.arena.add_tagged_template(
                        TAGGED_TEMPLATE_EXPRESSION,
                        pos,
                        end,
                        TaggedTemplateData {
                            tag: expr,
                            type_arguments: None,
                            template,
                        },
                    );
                }
                LessThanToken | LessThanLessThanToken if allow_calls => {
                    let Some(next) = self.try_parse_type_arguments_in_expression(expr) else {
                        break;
                    };
                    expr = next;
                }
                _ => break,
            }
        }
        expr
    }

    /// Speculation at `expr <`: a type-argument list followed by `(`,
    /// a template (tagged), or a non-expression token (bare instantiation
    /// expression). Anything else is a comparison; rewind.
    fn try_parse_type_arguments_in_expression(&mut self, expr: NodeIndex) -> Option<NodeIndex> {
        self.try_parse(|p| {
            let pos = p.arena.pos(expr);
            let type_arguments = p.parse_type_arguments_checked()?;
            match p.token() {
                SyntaxKind::OpenParenToken => {
                    let (arguments, end) = p.parse_argument_list();
                    Some(p.arena.add_call(
                        CALL_EXPRESSION,
                        pos,
                        end,
                        CallData {
                            expression: expr,
                            question_dot: false,
                            type_arguments: Some(type_arguments),
                            arguments: Some(arguments),
                        },
                    ))
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    let template = p.parse_template_literal();
                    let end = p.arena.end(template);
                    Some(p.arena.add_tagged_template(
                        TAGGED_TEMPLATE_EXPRESSION,
                        pos,
                        end,
                        TaggedTemplateData {
                            tag: expr,
                            type_arguments: Some(type_arguments),
                            template,
                        },
                    ))
                }
                _ if !p.is_start_of_expression() => {
                    // Instantiation expression: `f<string>` used as a value.
                    let end = p.scanner.get_token_full_start() as u32;
                    Some(p.arena.add_expr_with_type_args(
                        EXPRESSION_WITH_TYPE_ARGUMENTS,
                        pos,
                        end,
                        ExprWithTypeArgsData {
                            expression: expr,
                            type_arguments: Some(type_arguments),
                        },
                    ))
                }
                _ => None,
            }
        })
    }

    fn parse_member_name(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::PrivateIdentifier) {
            self.consume_token_node()
        } else {
            self.parse_identifier_name()
        }
    }

    /// Parse `( arg, ... )`; returns the list and the end of the `)`.
    fn parse_argument_list(&mut self) -> (NodeList, u32) {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let list_pos = self.token_pos();
        let mut list = self.parse_delimited_list(list_pos, SyntaxKind::CloseParenToken, |p| {
            p.parse_argument()
        });
        list.pos = list_pos;
        let end = self.token_end();
        self.parse_expected(SyntaxKind::CloseParenToken);
        (list, end)
    }

    fn parse_argument(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::DotDotDotToken) {
            let pos = self.token_pos();
            self.next_token();
            let expression = self.parse_assignment_expression();
            let end = self.arena.end(expression);
            self.arena
                .add_wrapped(SPREAD_ELEMENT, pos, end, WrappedData { inner: expression })
        } else {
            self.parse_assignment_expression()
        }
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        match self.token() {
            NumericLiteral | BigIntLiteral | StringLiteral | RegularExpressionLiteral
            | NoSubstitutionTemplateLiteral | ThisKeyword | SuperKeyword | NullKeyword
            | TrueKeyword | FalseKeyword | PrivateIdentifier => self.consume_token_node(),
            SlashToken | SlashEqualsToken => {
                self.current_token = self.scanner.re_scan_slash_token();
                self.consume_token_node()
            }
            TemplateHead => self.parse_template_literal(),
            OpenParenToken => {
                let pos = self.token_pos();
                self.next_token();
                let expression =
                    self.with_context(0, CONTEXT_FLAG_DISALLOW_IN, |p| p.parse_expression());
                let end = self.token_end();
                self.parse_expected(CloseParenToken);
                self.arena.add_wrapped(
                    PARENTHESIZED_EXPRESSION,
                    pos,
                    end,
                    WrappedData { inner: expression },
                )
            }
            OpenBracketToken => self.parse_array_literal(),
            OpenBraceToken => self.parse_object_literal(),
            FunctionKeyword => self.parse_function_expression(None),
            AsyncKeyword => {
                // `async function` expression; a bare `async` identifier
                // otherwise (arrows were handled upstream).
                let is_fn = self.look_ahead(|p| {
                    p.next_token();
                    !p.has_preceding_line_break() && p.is_token(FunctionKeyword)
                });
                if is_fn {
                    let modifier = self.consume_token_node();
                    self.parse_function_expression(Some(modifier))
                } else {
                    self.parse_identifier_name()
                }
            }
            ClassKeyword => self.parse_class_expression(),
            ImportKeyword => {
                let pos = self.token_pos();
                let import_token = self.consume_token_node();
                if self.is_token(DotToken) {
                    // import.meta
                    self.next_token();
                    let name = self.parse_identifier_name();
                    let end = self.arena.end(name);
                    self.arena.add_pair(
                        META_PROPERTY,
                        pos,
                        end,
                        PairData {
                            left: import_token,
                            right: name,
                        },
                    )
                } else {
                    // `import(...)`: the chain loop turns this into a call.
                    import_token
                }
            }
            token if token_is_identifier_or_keyword(token) && !token_is_reserved_word(token) => {
                self.parse_identifier_name()
            }
            _ => {
                self.parse_error_at_current_token("expression expected");
                // Consume one token so enclosing loops make progress.
                let pos = self.token_pos();
                let end = self.token_end();
                self.next_token();
                self.arena.add_token(Unknown, pos, end)
            }
        }
    }

    /// A template literal: either the single-token form or head + spans.
    pub(crate) fn parse_template_literal(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::NoSubstitutionTemplateLiteral) {
            return self.consume_token_node();
        }
        let pos = self.token_pos();
        let head = self.consume_token_node();
        let mut spans = NodeList {
            pos: self.token_pos(),
            ..NodeList::new()
        };
        let end;
        loop {
            let expression = self.parse_expression();
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                self.parse_error_at_current_token("'}' expected");
                end = self.arena.end(expression);
                break;
            }
            self.current_token = self.scanner.re_scan_template_token();
            let is_tail = self.is_token(SyntaxKind::TemplateTail);
            let literal = self.consume_token_node();
            let span_pos = self.arena.pos(expression);
            let span_end = self.arena.end(literal);
            let span = self.arena.add_pair(
                TEMPLATE_SPAN,
                span_pos,
                span_end,
                PairData {
                    left: expression,
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
            .add_template(TEMPLATE_EXPRESSION, pos, end, TemplateData { head, spans })
    }

    fn parse_array_literal(&mut self) -> NodeIndex {
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
            let element = self.parse_argument();
            items.end = self.arena.end(element);
            items.nodes.push(element);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        let end = self.token_end();
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.arena
            .add_list(ARRAY_LITERAL_EXPRESSION, pos, end, ListData { items })
    }

    fn parse_object_literal(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let list_pos = self.token_pos();
        let mut items = self.parse_delimited_list(list_pos, SyntaxKind::CloseBraceToken, |p| {
            p.parse_object_literal_member()
        });
        items.pos = list_pos;
        let end = self.token_end();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena
            .add_list(OBJECT_LITERAL_EXPRESSION, pos, end, ListData { items })
    }

    fn parse_object_literal_member(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();

        if self.is_token(DotDotDotToken) {
            self.next_token();
            let expression = self.parse_assignment_expression();
            let end = self.arena.end(expression);
            return self
                .arena
                .add_wrapped(SPREAD_ASSIGNMENT, pos, end, WrappedData { inner: expression });
        }

        // get/set accessors and async/generator methods.
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
            return self.parse_method_tail(pos, kind, None, false, None);
        }
        let is_async_method = self.is_token(AsyncKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                !p.has_preceding_line_break()
                    && (p.is_property_name_start() || p.is_token(AsteriskToken))
            });
        let modifiers = if is_async_method {
            let m = self.consume_token_node();
            Some(NodeList {
                pos: self.arena.pos(m),
                end: self.arena.end(m),
                nodes: vec![m],
                has_trailing_comma: false,
            })
        } else {
            None
        };
        let asterisk = self.parse_optional(AsteriskToken);
        if modifiers.is_some() || asterisk {
            return self.parse_method_tail(pos, METHOD_DECLARATION, modifiers, asterisk, None);
        }

        let name = self.parse_property_name();
        match self.token() {
            ColonToken => {
                self.next_token();
                let initializer = self.parse_assignment_expression();
                let end = self.arena.end(initializer);
                self.arena.add_pair(
                    PROPERTY_ASSIGNMENT,
                    pos,
                    end,
                    PairData {
                        left: name,
                        right: initializer,
                    },
                )
            }
            OpenParenToken | LessThanToken => {
                self.parse_method_tail(pos, METHOD_DECLARATION, None, false, Some(name))
            }
            EqualsToken => {
                // Shorthand with an object-assignment initializer, valid in
                // destructuring targets.
                self.next_token();
                let initializer = self.parse_assignment_expression();
                let end = self.arena.end(initializer);
                self.arena.add_pair(
                    SHORTHAND_PROPERTY_ASSIGNMENT,
                    pos,
                    end,
                    PairData {
                        left: name,
                        right: initializer,
                    },
                )
            }
            _ => {
                let end = self.arena.end(name);
                self.arena.add_pair(
                    SHORTHAND_PROPERTY_ASSIGNMENT,
                    pos,
                    end,
                    PairData {
                        left: name,
                        right: NodeIndex::NONE,
                    },
                )
            }
        }
    }

    /// Shared tail for method-shaped members once modifiers/`*` are known.
    /// Parses the name (unless given), signature, and body.
    pub(crate) fn parse_method_tail(
        &mut self,
        pos: u32,
        kind: u16,
        modifiers: Option<NodeList>,
        asterisk: bool,
        name: Option<NodeIndex>,
    ) -> NodeIndex {
        let name = name.unwrap_or_else(|| self.parse_property_name());
        let question_token = if self.is_token(SyntaxKind::QuestionToken) {
            self.consume_token_node()
        } else {
            NodeIndex::NONE
        };
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
        let (body, end) = if self.is_token(SyntaxKind::OpenBraceToken) {
            let body = self.parse_function_body_block();
            let end = self.arena.end(body);
            (body, end)
        } else {
            (NodeIndex::NONE, self.parse_signature_terminator())
        };
        self.arena.add_function(
            kind,
            pos,
            end,
            FunctionData {
                modifiers,
                asterisk,
                name,
                question_token,
                type_parameters,
                parameters,
                return_type,
                arrow_pos: FunctionData::NO_ARROW,
                body,
            },
        )
    }

    /// End offset for a body-less signature: past the `;` when present,
    /// else the end of the last consumed token.
    pub(crate) fn parse_signature_terminator(&mut self) -> u32 {
        if self.is_token(SyntaxKind::SemicolonToken) {
            let end = self.token_end();
            self.next_token();
            end
        } else {
            let end = self.scanner.get_token_full_start() as u32;
            if !self.can_parse_semicolon() {
                self.parse_error_at_current_token("';' expected");
            }
            end
        }
    }

    pub(crate) fn is_property_name_start(&self) -> bool {
        self.is_identifier_or_keyword()
            || matches!(
                self.token(),
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::BigIntLiteral
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::PrivateIdentifier
            )
    }

    pub(crate) fn parse_property_name(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        match self.token() {
            StringLiteral | NumericLiteral | BigIntLiteral | PrivateIdentifier => {
                self.consume_token_node()
            }
            OpenBracketToken => {
                let pos = self.token_pos();
                self.next_token();
                let expression = self.parse_assignment_expression();
                let end = self.token_end();
                self.parse_expected(CloseBracketToken);
                self.arena.add_wrapped(
                    COMPUTED_PROPERTY_NAME,
                    pos,
                    end,
                    WrappedData { inner: expression },
                )
            }
            _ => self.parse_identifier_name(),
        }
    }

    fn parse_function_expression(&mut self, async_modifier: Option<NodeIndex>) -> NodeIndex {
        let pos = async_modifier
            .map(|m| self.arena.pos(m))
            .unwrap_or_else(|| self.token_pos());
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let asterisk = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_identifier_or_keyword() && !self.is_token(SyntaxKind::OpenParenToken)
        {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        let modifiers = async_modifier.map(|m| NodeList {
            pos: self.arena.pos(m),
            end: self.arena.end(m),
            nodes: vec![m],
            has_trailing_comma: false,
        });
        self.parse_function_tail(pos, FUNCTION_EXPRESSION, modifiers, asterisk, name)
    }

    /// Signature + body shared by function declarations and expressions.
    pub(crate) fn parse_function_tail(
        &mut self,
        pos: u32,
        kind: u16,
        modifiers: Option<NodeList>,
        asterisk: bool,
        name: NodeIndex,
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
        let (body, end) = if self.is_token(SyntaxKind::OpenBraceToken) {
            let body = self.parse_function_body_block();
            (body, self.arena.end(body))
        } else {
            // Overload signature or ambient declaration.
            (NodeIndex::NONE, self.parse_signature_terminator())
        };
        self.arena.add_function(
            kind,
            pos,
            end,
            FunctionData {
                modifiers,
                asterisk,
                name,
                question_token: NodeIndex::NONE,
                type_parameters,
                parameters,
                return_type,
                arrow_pos: FunctionData::NO_ARROW,
                body,
            },
        )
    }
}
