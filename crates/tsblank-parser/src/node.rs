//! Thin-node arena storage for the syntax tree.
//!
//! Every node is a 16-byte header (`kind`, `flags`, `pos`, `end`,
//! `data_index`); kind-specific payloads live in typed pools on the arena.
//! Token nodes (modifier keywords, literals, `?`/`!` markers) have no
//! payload at all. Several kinds with the same payload shape share a pool;
//! the header's `kind` disambiguates.

use crate::base::{NodeIndex, NodeList};
use serde::Serialize;
use tsblank_scanner::{Atom, Interner, SyntaxKind};

/// 16-byte node header.
#[repr(C)]
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Node {
    pub kind: u16,
    pub flags: u16,
    /// Start byte offset (first non-trivia byte).
    pub pos: u32,
    /// One past the last byte.
    pub end: u32,
    /// Index into the kind's data pool; `Node::NO_DATA` for token nodes.
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;
}

// =============================================================================
// Data pools
// =============================================================================

#[derive(Clone, Debug)]
pub struct IdentifierData {
    pub atom: Atom,
    pub text: String,
}

/// Two-child nodes: qualified names, indexed access types, template spans,
/// enum members, property assignments, labeled/while/do/with/switch
/// statements, catch clauses, meta properties.
#[derive(Clone, Copy, Debug)]
pub struct PairData {
    pub left: NodeIndex,
    pub right: NodeIndex,
}

/// Single-child nodes (parenthesized forms, spreads, wrapping statements,
/// keyword-operator expressions, namespace import/export, static blocks).
#[derive(Clone, Copy, Debug)]
pub struct WrappedData {
    pub inner: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct UnaryData {
    pub operator: u16,
    pub operand: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct YieldData {
    pub asterisk: bool,
    pub expression: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct BinaryData {
    pub left: NodeIndex,
    pub operator: u16,
    pub right: NodeIndex,
}

/// Conditional expressions and if statements.
#[derive(Clone, Copy, Debug)]
pub struct ConditionalData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

/// Call and new expressions. `arguments` is absent for `new C`.
#[derive(Clone, Debug)]
pub struct CallData {
    pub expression: NodeIndex,
    pub question_dot: bool,
    pub type_arguments: Option<NodeList>,
    pub arguments: Option<NodeList>,
}

#[derive(Clone, Copy, Debug)]
pub struct AccessData {
    pub expression: NodeIndex,
    pub question_dot: bool,
    pub name_or_index: NodeIndex,
}

/// Nodes that are just an ordered list: blocks, literals, unions, tuples,
/// type literals, named import/export lists, binding patterns, source files.
#[derive(Clone, Debug)]
pub struct ListData {
    pub items: NodeList,
}

#[derive(Clone, Debug)]
pub struct TemplateData {
    pub head: NodeIndex,
    pub spans: NodeList,
}

#[derive(Clone, Debug)]
pub struct TaggedTemplateData {
    pub tag: NodeIndex,
    pub type_arguments: Option<NodeList>,
    pub template: NodeIndex,
}

/// `expr as T`, `expr satisfies T`, and the legacy `<T>expr` form.
#[derive(Clone, Copy, Debug)]
pub struct TypeAssertionData {
    pub expression: NodeIndex,
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ExprWithTypeArgsData {
    pub expression: NodeIndex,
    pub type_arguments: Option<NodeList>,
}

/// Shared by every function-like form. `arrow_pos` is the byte offset of
/// `=>` for arrows and `u32::MAX` otherwise; the eraser needs it to keep
/// the close paren adjacent to the arrow when a return type spans lines.
#[derive(Clone, Debug)]
pub struct FunctionData {
    pub modifiers: Option<NodeList>,
    pub asterisk: bool,
    pub name: NodeIndex,
    pub question_token: NodeIndex,
    pub type_parameters: Option<NodeList>,
    pub parameters: NodeList,
    pub return_type: NodeIndex,
    pub arrow_pos: u32,
    pub body: NodeIndex,
}

impl FunctionData {
    pub const NO_ARROW: u32 = u32::MAX;
}

/// Classes, class expressions, and interfaces.
#[derive(Clone, Debug)]
pub struct ClassData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    pub heritage_clauses: Option<NodeList>,
    pub members: NodeList,
}

#[derive(Clone, Debug)]
pub struct TypeAliasData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub type_parameters: Option<NodeList>,
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct HeritageData {
    /// `extends` or `implements` keyword kind.
    pub token: u16,
    pub types: NodeList,
}

#[derive(Clone, Debug)]
pub struct ParameterData {
    pub modifiers: Option<NodeList>,
    pub dot_dot_dot: bool,
    pub name: NodeIndex,
    pub question_token: NodeIndex,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TypeParameterData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub constraint: NodeIndex,
    pub default: NodeIndex,
}

/// Property declarations and property signatures.
#[derive(Clone, Debug)]
pub struct PropertyData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub question_token: NodeIndex,
    pub exclamation_token: NodeIndex,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct IndexSignatureData {
    pub modifiers: Option<NodeList>,
    pub parameters: NodeList,
    pub type_annotation: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct VariableStatementData {
    pub modifiers: Option<NodeList>,
    pub declarations: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct VariableDeclarationListData {
    /// `var`, `let`, or `const` keyword kind.
    pub keyword: u16,
    pub declarations: NodeList,
}

#[derive(Clone, Copy, Debug)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub exclamation_token: NodeIndex,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct ForStatementData {
    pub initializer: NodeIndex,
    pub condition: NodeIndex,
    pub incrementor: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct ForInOfData {
    pub await_modifier: bool,
    pub initializer: NodeIndex,
    pub expression: NodeIndex,
    pub statement: NodeIndex,
}

/// Case and default clauses (`expression` is NONE for `default:`).
#[derive(Clone, Debug)]
pub struct CaseClauseData {
    pub expression: NodeIndex,
    pub statements: NodeList,
}

#[derive(Clone, Copy, Debug)]
pub struct TryData {
    pub try_block: NodeIndex,
    pub catch_clause: NodeIndex,
    pub finally_block: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct EnumData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub members: NodeList,
}

#[derive(Clone, Debug)]
pub struct ModuleData {
    pub modifiers: Option<NodeList>,
    pub name: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct BindingElementData {
    pub dot_dot_dot: bool,
    pub property_name: NodeIndex,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct MappedTypeData {
    pub readonly_token: NodeIndex,
    pub type_parameter: NodeIndex,
    pub name_type: NodeIndex,
    pub question_token: NodeIndex,
    pub type_node: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct TypePredicateData {
    pub asserts: bool,
    pub parameter_name: NodeIndex,
    pub type_node: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct NamedTupleMemberData {
    pub dot_dot_dot: bool,
    pub name: NodeIndex,
    pub question_token: NodeIndex,
    pub type_node: NodeIndex,
}

/// Type references and `typeof` queries.
#[derive(Clone, Debug)]
pub struct TypeRefData {
    pub type_name: NodeIndex,
    pub type_arguments: Option<NodeList>,
}

#[derive(Clone, Copy, Debug)]
pub struct TypeOperatorData {
    pub operator: u16,
    pub type_node: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct ConditionalTypeData {
    pub check_type: NodeIndex,
    pub extends_type: NodeIndex,
    pub true_type: NodeIndex,
    pub false_type: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ImportDeclarationData {
    pub modifiers: Option<NodeList>,
    pub import_clause: NodeIndex,
    pub module_specifier: NodeIndex,
    pub attributes: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct ImportClauseData {
    pub is_type_only: bool,
    pub name: NodeIndex,
    pub named_bindings: NodeIndex,
}

/// Import and export specifiers.
#[derive(Clone, Copy, Debug)]
pub struct SpecifierData {
    pub is_type_only: bool,
    pub property_name: NodeIndex,
    pub name: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ExportDeclarationData {
    pub modifiers: Option<NodeList>,
    pub is_type_only: bool,
    pub export_clause: NodeIndex,
    pub module_specifier: NodeIndex,
    pub attributes: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ExportAssignmentData {
    pub modifiers: Option<NodeList>,
    pub is_export_equals: bool,
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ImportEqualsData {
    pub modifiers: Option<NodeList>,
    pub is_type_only: bool,
    pub name: NodeIndex,
    pub module_reference: NodeIndex,
}

// =============================================================================
// Arena
// =============================================================================

macro_rules! pools {
    ($( $field:ident : $data:ty => $add:ident / $get:ident ),* $(,)?) => {
        #[derive(Default)]
        pub struct NodeArena {
            pub nodes: Vec<Node>,
            pub interner: Interner,
            $( pub $field: Vec<$data>, )*
        }

        impl NodeArena {
            $(
                pub fn $add(&mut self, kind: u16, pos: u32, end: u32, data: $data) -> NodeIndex {
                    let data_index = self.$field.len() as u32;
                    self.$field.push(data);
                    self.alloc(kind, pos, end, data_index)
                }

                pub fn $get(&self, index: NodeIndex) -> &$data {
                    &self.$field[self.nodes[index.0 as usize].data_index as usize]
                }
            )*
        }
    };
}

pools! {
    identifiers: IdentifierData => add_identifier_node / identifier,
    pairs: PairData => add_pair / pair,
    wrapped: WrappedData => add_wrapped / wrapped,
    unaries: UnaryData => add_unary / unary,
    yields: YieldData => add_yield / yield_expr,
    binaries: BinaryData => add_binary / binary,
    conditionals: ConditionalData => add_conditional / conditional,
    calls: CallData => add_call / call,
    accesses: AccessData => add_access / access,
    lists: ListData => add_list / list,
    templates: TemplateData => add_template / template,
    tagged_templates: TaggedTemplateData => add_tagged_template / tagged_template,
    type_assertions: TypeAssertionData => add_type_assertion / type_assertion,
    expr_type_args: ExprWithTypeArgsData => add_expr_with_type_args / expr_with_type_args,
    functions: FunctionData => add_function / function,
    classes: ClassData => add_class / class,
    type_aliases: TypeAliasData => add_type_alias / type_alias,
    heritage_clauses: HeritageData => add_heritage / heritage,
    parameters: ParameterData => add_parameter / parameter,
    type_parameters: TypeParameterData => add_type_parameter / type_parameter,
    properties: PropertyData => add_property / property,
    index_signatures: IndexSignatureData => add_index_signature / index_signature,
    variable_statements: VariableStatementData => add_variable_statement / variable_statement,
    variable_declaration_lists: VariableDeclarationListData => add_variable_declaration_list / variable_declaration_list,
    variable_declarations: VariableDeclarationData => add_variable_declaration / variable_declaration,
    for_statements: ForStatementData => add_for_statement / for_statement,
    for_in_of: ForInOfData => add_for_in_of / for_in_of_statement,
    case_clauses: CaseClauseData => add_case_clause / case_clause,
    tries: TryData => add_try / try_statement,
    enums: EnumData => add_enum / enum_decl,
    modules: ModuleData => add_module / module_decl,
    binding_elements: BindingElementData => add_binding_element / binding_element,
    mapped_types: MappedTypeData => add_mapped_type / mapped_type,
    type_predicates: TypePredicateData => add_type_predicate / type_predicate,
    named_tuple_members: NamedTupleMemberData => add_named_tuple_member / named_tuple_member,
    type_refs: TypeRefData => add_type_ref / type_ref,
    type_operators: TypeOperatorData => add_type_operator / type_operator,
    conditional_types: ConditionalTypeData => add_conditional_type / conditional_type,
    import_declarations: ImportDeclarationData => add_import_declaration / import_declaration,
    import_clauses: ImportClauseData => add_import_clause / import_clause,
    specifiers: SpecifierData => add_specifier / specifier,
    export_declarations: ExportDeclarationData => add_export_declaration / export_declaration,
    export_assignments: ExportAssignmentData => add_export_assignment / export_assignment,
    import_equals: ImportEqualsData => add_import_equals / import_equals_decl,
}

impl NodeArena {
    pub fn with_capacity(nodes: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(nodes),
            ..NodeArena::default()
        }
    }

    fn alloc(&mut self, kind: u16, pos: u32, end: u32, data_index: u32) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index,
        });
        NodeIndex(index)
    }

    /// Allocate a payload-free token node (keywords, punctuation, literals).
    pub fn add_token(&mut self, kind: SyntaxKind, pos: u32, end: u32) -> NodeIndex {
        self.alloc(kind as u16, pos, end, Node::NO_DATA)
    }

    /// Allocate a payload-free composite node (empty statements, omitted
    /// expressions, semicolon class elements, debugger statements).
    pub fn add_marker(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.alloc(kind, pos, end, Node::NO_DATA)
    }

    pub fn add_identifier(&mut self, pos: u32, end: u32, atom: Atom, text: &str) -> NodeIndex {
        self.add_identifier_node(
            SyntaxKind::Identifier as u16,
            pos,
            end,
            IdentifierData {
                atom,
                text: text.to_string(),
            },
        )
    }

    #[inline]
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.0 as usize]
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> u16 {
        self.nodes[index.0 as usize].kind
    }

    #[inline]
    pub fn pos(&self, index: NodeIndex) -> u32 {
        self.nodes[index.0 as usize].pos
    }

    #[inline]
    pub fn end(&self, index: NodeIndex) -> u32 {
        self.nodes[index.0 as usize].end
    }

    /// Re-stamp a node's start. Used for type annotations, whose span is
    /// widened to the leading `:` once the type has been parsed.
    pub fn set_pos(&mut self, index: NodeIndex, pos: u32) {
        self.nodes[index.0 as usize].pos = pos;
    }

    pub fn set_end(&mut self, index: NodeIndex, end: u32) {
        self.nodes[index.0 as usize].end = end;
    }

    /// Identifier text, if the node is an identifier.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.node(index);
        if node.kind == SyntaxKind::Identifier as u16 && node.data_index != Node::NO_DATA {
            Some(&self.identifiers[node.data_index as usize].text)
        } else {
            None
        }
    }

    /// Does a modifier list contain a token of `kind`?
    pub fn modifiers_contain(&self, modifiers: Option<&NodeList>, kind: SyntaxKind) -> bool {
        modifiers.is_some_and(|list| {
            list.nodes
                .iter()
                .any(|&m| self.kind(m) == kind as u16)
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax_kind;

    #[test]
    fn token_nodes_carry_no_payload() {
        let mut arena = NodeArena::default();
        let token = arena.add_token(SyntaxKind::DeclareKeyword, 0, 7);
        assert_eq!(arena.kind(token), SyntaxKind::DeclareKeyword as u16);
        assert_eq!(arena.node(token).data_index, Node::NO_DATA);
    }

    #[test]
    fn pool_round_trip_preserves_children() {
        let mut arena = NodeArena::default();
        let atom = arena.interner.intern("x");
        let name = arena.add_identifier(4, 5, atom, "x");
        let decl = arena.add_variable_declaration(
            syntax_kind::VARIABLE_DECLARATION,
            4,
            5,
            VariableDeclarationData {
                name,
                exclamation_token: NodeIndex::NONE,
                type_annotation: NodeIndex::NONE,
                initializer: NodeIndex::NONE,
            },
        );
        assert_eq!(arena.variable_declaration(decl).name, name);
        assert_eq!(arena.identifier_text(name), Some("x"));
    }

    #[test]
    fn modifier_lookup_matches_kind() {
        let mut arena = NodeArena::default();
        let declare = arena.add_token(SyntaxKind::DeclareKeyword, 0, 7);
        let export = arena.add_token(SyntaxKind::ExportKeyword, 8, 14);
        let list = NodeList {
            nodes: vec![declare, export],
            pos: 0,
            end: 14,
            has_trailing_comma: false,
        };
        assert!(arena.modifiers_contain(Some(&list), SyntaxKind::ExportKeyword));
        assert!(!arena.modifiers_contain(Some(&list), SyntaxKind::AbstractKeyword));
        assert!(!arena.modifiers_contain(None, SyntaxKind::ExportKeyword));
    }
}
