//! Class declarations, class expressions, and their members.

use crate::base::{NodeIndex, NodeList};
use crate::node::*;
use crate::state::ParserState;
use crate::syntax_kind::*;
use tsblank_scanner::SyntaxKind;

impl ParserState {
    pub(crate) fn parse_class_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_class_tail(pos, CLASS_EXPRESSION, Vec::new())
    }

    pub(crate) fn parse_class_declaration(
        &mut self,
        pos: u32,
        modifiers: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.parse_class_tail(pos, CLASS_DECLARATION, modifiers)
    }

    fn parse_class_tail(&mut self, pos: u32, kind: u16, modifiers: Vec<NodeIndex>) -> NodeIndex {
        use SyntaxKind::*;
        self.parse_expected(ClassKeyword);

        // Class names may be keywords, except the heritage starters.
        let name = if self.is_identifier_or_keyword()
            && !self.is_token(ExtendsKeyword)
            && !self.is_token(ImplementsKeyword)
        {
            self.parse_identifier_name()
        } else {
            NodeIndex::NONE
        };

        let type_parameters = if self.is_token(LessThanToken) {
            Some(self.parse_type_parameters())
        } else {
            None
        };

        let heritage_clauses = self.parse_heritage_clauses();

        self.parse_expected(OpenBraceToken);
        let members = self.parse_class_members();
        let end = self.token_end();
        self.parse_expected(CloseBraceToken);

        let modifiers = self.make_modifier_list(modifiers);
        self.arena.add_class(
            kind,
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

    pub(crate) fn parse_heritage_clauses(&mut self) -> Option<NodeList> {
        use SyntaxKind::*;
        if !self.is_token(ExtendsKeyword) && !self.is_token(ImplementsKeyword) {
            return None;
        }
        let mut clauses = NodeList {
            pos: self.token_pos(),
            ..NodeList::new()
        };
        while self.is_token(ExtendsKeyword) || self.is_token(ImplementsKeyword) {
            let clause_pos = self.token_pos();
            let token = self.token() as u16;
            self.next_token();
            let mut types = NodeList {
                pos: self.token_pos(),
                ..NodeList::new()
            };
            loop {
                let element = self.parse_expression_with_type_arguments();
                types.end = self.arena.end(element);
                types.nodes.push(element);
                if !self.parse_optional(CommaToken) {
                    break;
                }
            }
            let clause_end = types.end;
            let clause = self.arena.add_heritage(
                HERITAGE_CLAUSE,
                clause_pos,
                clause_end,
                HeritageData { token, types },
            );
            clauses.end = clause_end;
            clauses.nodes.push(clause);
        }
        Some(clauses)
    }

    fn parse_expression_with_type_arguments(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let expression = self.parse_left_hand_side_expression();
        let (type_arguments, end) = if self.is_token(SyntaxKind::LessThanToken) {
            let args = self.parse_type_arguments();
            (Some(args), self.token_full_start())
        } else {
            (None, self.arena.end(expression))
        };
        self.arena.add_expr_with_type_args(
            EXPRESSION_WITH_TYPE_ARGUMENTS,
            pos,
            end,
            ExprWithTypeArgsData {
                expression,
                type_arguments,
            },
        )
    }

    pub(crate) fn parse_class_members(&mut self) -> NodeList {
        let list_pos = self.token_pos();
        let mut members = NodeList {
            pos: list_pos,
            end: list_pos,
            ..NodeList::new()
        };
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let member = self.parse_class_member();
            members.end = self.arena.end(member);
            members.nodes.push(member);
        }
        members
    }

    fn parse_class_member(&mut self) -> NodeIndex {
        use SyntaxKind::*;
        let pos = self.token_pos();

        if self.is_token(SemicolonToken) {
            let end = self.token_end();
            self.next_token();
            return self.arena.add_marker(SEMICOLON_CLASS_ELEMENT, pos, end);
        }

        let mut modifiers: Vec<NodeIndex> = Vec::new();
        loop {
            match self.token() {
                AtToken => {
                    let mut decorators = self.parse_decorators();
                    modifiers.append(&mut decorators);
                }
                StaticKeyword
                    if self.look_ahead(|p| {
                        p.next_token();
                        p.is_token(OpenBraceToken)
                    }) =>
                {
                    // `static { ... }` initialization block.
                    self.next_token();
                    let body = self.parse_block();
                    let end = self.arena.end(body);
                    return self
                        .arena
                        .add_wrapped(CLASS_STATIC_BLOCK, pos, end, WrappedData { inner: body });
                }
                PublicKeyword | PrivateKeyword | ProtectedKeyword | StaticKeyword
                | ReadonlyKeyword | AbstractKeyword | OverrideKeyword | DeclareKeyword
                | AccessorKeyword | AsyncKeyword
                    if self.is_modifier_followed_by_member() =>
                {
                    modifiers.push(self.consume_token_node());
                }
                _ => break,
            }
        }

        if self.is_token(ConstructorKeyword) {
            let name = self.parse_identifier_name();
            let modifiers = self.make_modifier_list(modifiers);
            return self.parse_method_tail(pos, CONSTRUCTOR, modifiers, false, Some(name));
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
            let modifiers = self.make_modifier_list(modifiers);
            return self.parse_method_tail(pos, kind, modifiers, false, None);
        }

        if self.is_token(AsteriskToken) {
            self.next_token();
            let modifiers = self.make_modifier_list(modifiers);
            return self.parse_method_tail(pos, METHOD_DECLARATION, modifiers, true, None);
        }

        if self.is_token(OpenBracketToken) && self.is_index_signature_start() {
            return self.parse_index_signature_member(pos, modifiers);
        }

        let name = self.parse_property_name();

        // `m(...)`, `m<...>`, `m?(...)` are methods; anything else is a field.
        let is_method = self.is_token(OpenParenToken)
            || self.is_token(LessThanToken)
            || (self.is_token(QuestionToken)
                && self.look_ahead(|p| {
                    p.next_token();
                    p.is_token(OpenParenToken) || p.is_token(LessThanToken)
                }));
        if is_method {
            let modifiers = self.make_modifier_list(modifiers);
            return self.parse_method_tail(pos, METHOD_DECLARATION, modifiers, false, Some(name));
        }

        let question_token = if self.is_token(QuestionToken) {
            self.consume_token_node()
        } else {
            NodeIndex::NONE
        };
        let exclamation_token = if self.is_token(ExclamationToken) {
            self.consume_token_node()
        } else {
            NodeIndex::NONE
        };
        let type_annotation = if self.is_token(ColonToken) {
            self.parse_type_annotation()
        } else {
            NodeIndex::NONE
        };
        let initializer = if self.parse_optional(EqualsToken) {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };
        let end = self.parse_signature_terminator();
        let modifiers = self.make_modifier_list(modifiers);
        self.arena.add_property(
            PROPERTY_DECLARATION,
            pos,
            end,
            PropertyData {
                modifiers,
                name,
                question_token,
                exclamation_token,
                type_annotation,
                initializer,
            },
        )
    }

    /// A keyword starts a modifier only when a member continues after it;
    /// otherwise it is the member's own name (`public() {}`).
    fn is_modifier_followed_by_member(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if p.has_preceding_line_break() {
                return false;
            }
            p.is_property_name_start()
                || p.is_token(SyntaxKind::AsteriskToken)
                || p.is_token(SyntaxKind::OpenBraceToken)
        })
    }
}
