//! Ordered child iteration over arena nodes.

use crate::base::{NodeIndex, NodeList};
use crate::node::NodeArena;
use crate::syntax_kind::*;

#[inline]
fn visit(f: &mut impl FnMut(NodeIndex), child: NodeIndex) {
    if child.is_some() {
        f(child);
    }
}

#[inline]
fn visit_list(f: &mut impl FnMut(NodeIndex), list: &NodeList) {
    for &child in &list.nodes {
        visit(f, child);
    }
}

#[inline]
fn visit_opt_list(f: &mut impl FnMut(NodeIndex), list: Option<&NodeList>) {
    if let Some(list) = list {
        visit_list(f, list);
    }
}

/// Invoke `f` on each direct child of `node` in source order. Token nodes
/// and marker nodes have no children.
pub fn for_each_child(arena: &NodeArena, node: NodeIndex, f: &mut impl FnMut(NodeIndex)) {
    let kind = arena.kind(node);
    if is_token_kind(kind) {
        return;
    }
    match kind {
        QUALIFIED_NAME | INDEXED_ACCESS_TYPE | TEMPLATE_SPAN | TEMPLATE_LITERAL_TYPE_SPAN
        | ENUM_MEMBER | PROPERTY_ASSIGNMENT | SHORTHAND_PROPERTY_ASSIGNMENT | LABELED_STATEMENT
        | WHILE_STATEMENT | DO_STATEMENT | WITH_STATEMENT | SWITCH_STATEMENT | CATCH_CLAUSE
        | META_PROPERTY => {
            let data = arena.pair(node);
            visit(f, data.left);
            visit(f, data.right);
        }

        PARENTHESIZED_EXPRESSION | PARENTHESIZED_TYPE | COMPUTED_PROPERTY_NAME
        | NON_NULL_EXPRESSION | SPREAD_ASSIGNMENT | SPREAD_ELEMENT | DECORATOR | ARRAY_TYPE
        | OPTIONAL_TYPE | REST_TYPE | INFER_TYPE | EXTERNAL_MODULE_REFERENCE
        | CLASS_STATIC_BLOCK | EXPRESSION_STATEMENT | RETURN_STATEMENT | THROW_STATEMENT
        | BREAK_STATEMENT | CONTINUE_STATEMENT | LITERAL_TYPE | DELETE_EXPRESSION
        | TYPEOF_EXPRESSION | VOID_EXPRESSION | AWAIT_EXPRESSION | NAMESPACE_IMPORT
        | NAMESPACE_EXPORT => {
            visit(f, arena.wrapped(node).inner);
        }

        PREFIX_UNARY_EXPRESSION | POSTFIX_UNARY_EXPRESSION => {
            visit(f, arena.unary(node).operand);
        }

        YIELD_EXPRESSION => visit(f, arena.yield_expr(node).expression),

        BINARY_EXPRESSION => {
            let data = arena.binary(node);
            visit(f, data.left);
            visit(f, data.right);
        }

        CONDITIONAL_EXPRESSION | IF_STATEMENT => {
            let data = arena.conditional(node);
            visit(f, data.condition);
            visit(f, data.when_true);
            visit(f, data.when_false);
        }

        CALL_EXPRESSION | NEW_EXPRESSION => {
            let data = arena.call(node);
            visit(f, data.expression);
            visit_opt_list(f, data.type_arguments.as_ref());
            visit_opt_list(f, data.arguments.as_ref());
        }

        PROPERTY_ACCESS_EXPRESSION | ELEMENT_ACCESS_EXPRESSION => {
            let data = arena.access(node);
            visit(f, data.expression);
            visit(f, data.name_or_index);
        }

        ARRAY_LITERAL_EXPRESSION | OBJECT_LITERAL_EXPRESSION | BLOCK | MODULE_BLOCK
        | CASE_BLOCK | UNION_TYPE | INTERSECTION_TYPE | TUPLE_TYPE | TYPE_LITERAL
        | NAMED_IMPORTS | NAMED_EXPORTS | OBJECT_BINDING_PATTERN | ARRAY_BINDING_PATTERN
        | SOURCE_FILE => {
            visit_list(f, &arena.list(node).items);
        }

        TEMPLATE_EXPRESSION | TEMPLATE_LITERAL_TYPE => {
            let data = arena.template(node);
            visit(f, data.head);
            visit_list(f, &data.spans);
        }

        TAGGED_TEMPLATE_EXPRESSION => {
            let data = arena.tagged_template(node);
            visit(f, data.tag);
            visit_opt_list(f, data.type_arguments.as_ref());
            visit(f, data.template);
        }

        AS_EXPRESSION | SATISFIES_EXPRESSION => {
            let data = arena.type_assertion(node);
            visit(f, data.expression);
            visit(f, data.type_node);
        }

        TYPE_ASSERTION_EXPRESSION => {
            // Legacy form: the type precedes the expression.
            let data = arena.type_assertion(node);
            visit(f, data.type_node);
            visit(f, data.expression);
        }

        EXPRESSION_WITH_TYPE_ARGUMENTS => {
            let data = arena.expr_with_type_args(node);
            visit(f, data.expression);
            visit_opt_list(f, data.type_arguments.as_ref());
        }

        k if is_function_like(k) => {
            let data = arena.function(node);
            visit_opt_list(f, data.modifiers.as_ref());
            visit(f, data.name);
            visit(f, data.question_token);
            visit_opt_list(f, data.type_parameters.as_ref());
            visit_list(f, &data.parameters);
            visit(f, data.return_type);
            visit(f, data.body);
        }

        k if is_class_like(k) => {
            let data = arena.class(node);
            visit_opt_list(f, data.modifiers.as_ref());
            visit(f, data.name);
            visit_opt_list(f, data.type_parameters.as_ref());
            visit_opt_list(f, data.heritage_clauses.as_ref());
            visit_list(f, &data.members);
        }

        TYPE_ALIAS_DECLARATION => {
            let data = arena.type_alias(node);
            visit_opt_list(f, data.modifiers.as_ref());
            visit(f, data.name);
            visit_opt_list(f, data.type_parameters.as_ref());
            visit(f, data.type_node);
        }

        HERITAGE_CLAUSE => visit_list(f, &arena.heritage(node).types),

        PARAMETER => {
            let data = arena.parameter(node);
            visit_opt_list(f, data.modifiers.as_ref());
            visit(f, data.name);
            visit(f, data.question_token);
            visit(f, data.type_annotation);
            visit(f, data.initializer);
        }

        TYPE_PARAMETER => {
            let data = arena.type_parameter(node);
            visit_opt_list(f, data.modifiers.as_ref());
            visit(f, data.name);
            visit(f, data.constraint);
            visit(f, data.default);
        }

        PROPERTY_DECLARATION | PROPERTY_SIGNATURE => {
            let data = arena.property(node);
            visit_opt_list(f, data.modifiers.as_ref());
            visit(f, data.name);
            visit(f, data.question_token);
            visit(f, data.exclamation_token);
            visit(f, data.type_annotation);
            visit(f, data.initializer);
        }

        INDEX_SIGNATURE => {
            let data = arena.index_signature(node);
            visit_opt_list(f, data.modifiers.as_ref());
            visit_list(f, &data.parameters);
            visit(f, data.type_annotation);
        }

        VARIABLE_STATEMENT => {
            let data = arena.variable_statement(node);
            visit_opt_list(f, data.modifiers.as_ref());
            visit(f, data.declarations);
        }

        VARIABLE_DECLARATION_LIST => {
            visit_list(f, &arena.variable_declaration_list(node).declarations);
        }

        VARIABLE_DECLARATION => {
            let data = arena.variable_declaration(node);
            visit(f, data.name);
            visit(f, data.exclamation_token);
            visit(f, data.type_annotation);
            visit(f, data.initializer);
        }

        FOR_STATEMENT => {
            let data = arena.for_statement(node);
            visit(f, data.initializer);
            visit(f, data.condition);
            visit(f, data.incrementor);
            visit(f, data.statement);
        }

        FOR_IN_STATEMENT | FOR_OF_STATEMENT => {
            let data = arena.for_in_of_statement(node);
            visit(f, data.initializer);
            visit(f, data.expression);
            visit(f, data.statement);
        }

        CASE_CLAUSE | DEFAULT_CLAUSE => {
            let data = arena.case_clause(node);
            visit(f, data.expression);
            visit_list(f, &data.statements);
        }

        TRY_STATEMENT => {
            let data = arena.try_statement(node);
            visit(f, data.try_block);
            visit(f, data.catch_clause);
            visit(f, data.finally_block);
        }

        ENUM_DECLARATION => {
            let data = arena.enum_decl(node);
            visit_opt_list(f, data.modifiers.as_ref());
            visit(f, data.name);
            visit_list(f, &data.members);
        }

        MODULE_DECLARATION => {
            let data = arena.module_decl(node);
            visit_opt_list(f, data.modifiers.as_ref());
            visit(f, data.name);
            visit(f, data.body);
        }

        BINDING_ELEMENT => {
            let data = arena.binding_element(node);
            visit(f, data.property_name);
            visit(f, data.name);
            visit(f, data.initializer);
        }

        MAPPED_TYPE => {
            let data = arena.mapped_type(node);
            visit(f, data.readonly_token);
            visit(f, data.type_parameter);
            visit(f, data.name_type);
            visit(f, data.question_token);
            visit(f, data.type_node);
        }

        TYPE_PREDICATE => {
            let data = arena.type_predicate(node);
            visit(f, data.parameter_name);
            visit(f, data.type_node);
        }

        NAMED_TUPLE_MEMBER => {
            let data = arena.named_tuple_member(node);
            visit(f, data.name);
            visit(f, data.question_token);
            visit(f, data.type_node);
        }

        TYPE_REFERENCE | TYPE_QUERY => {
            let data = arena.type_ref(node);
            visit(f, data.type_name);
            visit_opt_list(f, data.type_arguments.as_ref());
        }

        TYPE_OPERATOR => visit(f, arena.type_operator(node).type_node),

        CONDITIONAL_TYPE => {
            let data = arena.conditional_type(node);
            visit(f, data.check_type);
            visit(f, data.extends_type);
            visit(f, data.true_type);
            visit(f, data.false_type);
        }

        IMPORT_DECLARATION => {
            let data = arena.import_declaration(node);
            visit_opt_list(f, data.modifiers.as_ref());
            visit(f, data.import_clause);
            visit(f, data.module_specifier);
            visit(f, data.attributes);
        }

        IMPORT_CLAUSE => {
            let data = arena.import_clause(node);
            visit(f, data.name);
            visit(f, data.named_bindings);
        }

        IMPORT_SPECIFIER | EXPORT_SPECIFIER => {
            let data = arena.specifier(node);
            visit(f, data.property_name);
            visit(f, data.name);
        }

        EXPORT_DECLARATION => {
            let data = arena.export_declaration(node);
            visit_opt_list(f, data.modifiers.as_ref());
            visit(f, data.export_clause);
            visit(f, data.module_specifier);
            visit(f, data.attributes);
        }

        EXPORT_ASSIGNMENT => {
            let data = arena.export_assignment(node);
            visit_opt_list(f, data.modifiers.as_ref());
            visit(f, data.expression);
        }

        IMPORT_EQUALS_DECLARATION => {
            let data = arena.import_equals_decl(node);
            visit_opt_list(f, data.modifiers.as_ref());
            visit(f, data.name);
            visit(f, data.module_reference);
        }

        // EMPTY_STATEMENT, DEBUGGER_STATEMENT, OMITTED_EXPRESSION,
        // SEMICOLON_CLASS_ELEMENT
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{BinaryData, NodeArena};
    use tsblank_scanner::SyntaxKind;

    #[test]
    fn binary_children_come_in_source_order() {
        let mut arena = NodeArena::default();
        let atom_a = arena.interner.intern("a");
        let left = arena.add_identifier(0, 1, atom_a, "a");
        let atom_b = arena.interner.intern("b");
        let right = arena.add_identifier(4, 5, atom_b, "b");
        let expr = arena.add_binary(
            BINARY_EXPRESSION,
            0,
            5,
            BinaryData {
                left,
                operator: SyntaxKind::PlusToken as u16,
                right,
            },
        );
        let mut seen = Vec::new();
        for_each_child(&arena, expr, &mut |c| seen.push(c));
        assert_eq!(seen, vec![left, right]);
    }

    #[test]
    fn token_nodes_have_no_children() {
        let mut arena = NodeArena::default();
        let token = arena.add_token(SyntaxKind::StaticKeyword, 0, 6);
        let mut count = 0;
        for_each_child(&arena, token, &mut |_| count += 1);
        assert_eq!(count, 0);
    }
}
