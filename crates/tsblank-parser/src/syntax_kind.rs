//! Syntax kinds for AST nodes.
//!
//! Token nodes reuse the scanner's `SyntaxKind` values directly (a keyword
//! modifier is stored as a node whose kind is the keyword token). The
//! constants here extend that numbering for composite nodes; they start
//! above `SyntaxKind::LAST_TOKEN` so the two ranges never collide.

use tsblank_scanner::SyntaxKind;

// Names
pub const QUALIFIED_NAME: u16 = 160;
pub const COMPUTED_PROPERTY_NAME: u16 = 161;

// Signature elements
pub const TYPE_PARAMETER: u16 = 162;
pub const PARAMETER: u16 = 163;
pub const DECORATOR: u16 = 164;

// Class/interface members
pub const PROPERTY_SIGNATURE: u16 = 165;
pub const PROPERTY_DECLARATION: u16 = 166;
pub const METHOD_SIGNATURE: u16 = 167;
pub const METHOD_DECLARATION: u16 = 168;
pub const CLASS_STATIC_BLOCK: u16 = 169;
pub const CONSTRUCTOR: u16 = 170;
pub const GET_ACCESSOR: u16 = 171;
pub const SET_ACCESSOR: u16 = 172;
pub const CALL_SIGNATURE: u16 = 173;
pub const CONSTRUCT_SIGNATURE: u16 = 174;
pub const INDEX_SIGNATURE: u16 = 175;
pub const SEMICOLON_CLASS_ELEMENT: u16 = 176;

// Types
pub const TYPE_PREDICATE: u16 = 177;
pub const TYPE_REFERENCE: u16 = 178;
pub const FUNCTION_TYPE: u16 = 179;
pub const CONSTRUCTOR_TYPE: u16 = 180;
pub const TYPE_QUERY: u16 = 181;
pub const TYPE_LITERAL: u16 = 182;
pub const ARRAY_TYPE: u16 = 183;
pub const TUPLE_TYPE: u16 = 184;
pub const OPTIONAL_TYPE: u16 = 185;
pub const REST_TYPE: u16 = 186;
pub const UNION_TYPE: u16 = 187;
pub const INTERSECTION_TYPE: u16 = 188;
pub const CONDITIONAL_TYPE: u16 = 189;
pub const INFER_TYPE: u16 = 190;
pub const PARENTHESIZED_TYPE: u16 = 191;
pub const TYPE_OPERATOR: u16 = 192;
pub const INDEXED_ACCESS_TYPE: u16 = 193;
pub const MAPPED_TYPE: u16 = 194;
pub const LITERAL_TYPE: u16 = 195;
pub const NAMED_TUPLE_MEMBER: u16 = 196;
pub const TEMPLATE_LITERAL_TYPE: u16 = 197;
pub const TEMPLATE_LITERAL_TYPE_SPAN: u16 = 198;

// Binding patterns
pub const OBJECT_BINDING_PATTERN: u16 = 199;
pub const ARRAY_BINDING_PATTERN: u16 = 200;
pub const BINDING_ELEMENT: u16 = 201;

// Expressions
pub const ARRAY_LITERAL_EXPRESSION: u16 = 202;
pub const OBJECT_LITERAL_EXPRESSION: u16 = 203;
pub const PROPERTY_ACCESS_EXPRESSION: u16 = 204;
pub const ELEMENT_ACCESS_EXPRESSION: u16 = 205;
pub const CALL_EXPRESSION: u16 = 206;
pub const NEW_EXPRESSION: u16 = 207;
pub const TAGGED_TEMPLATE_EXPRESSION: u16 = 208;
pub const TYPE_ASSERTION_EXPRESSION: u16 = 209;
pub const PARENTHESIZED_EXPRESSION: u16 = 210;
pub const FUNCTION_EXPRESSION: u16 = 211;
pub const ARROW_FUNCTION: u16 = 212;
pub const DELETE_EXPRESSION: u16 = 213;
pub const TYPEOF_EXPRESSION: u16 = 214;
pub const VOID_EXPRESSION: u16 = 215;
pub const AWAIT_EXPRESSION: u16 = 216;
pub const PREFIX_UNARY_EXPRESSION: u16 = 217;
pub const POSTFIX_UNARY_EXPRESSION: u16 = 218;
pub const BINARY_EXPRESSION: u16 = 219;
pub const CONDITIONAL_EXPRESSION: u16 = 220;
pub const TEMPLATE_EXPRESSION: u16 = 221;
pub const TEMPLATE_SPAN: u16 = 222;
pub const YIELD_EXPRESSION: u16 = 223;
pub const SPREAD_ELEMENT: u16 = 224;
pub const CLASS_EXPRESSION: u16 = 225;
pub const OMITTED_EXPRESSION: u16 = 226;
pub const EXPRESSION_WITH_TYPE_ARGUMENTS: u16 = 227;
pub const AS_EXPRESSION: u16 = 228;
pub const NON_NULL_EXPRESSION: u16 = 229;
pub const META_PROPERTY: u16 = 230;
pub const SATISFIES_EXPRESSION: u16 = 231;

// Object literal members
pub const PROPERTY_ASSIGNMENT: u16 = 232;
pub const SHORTHAND_PROPERTY_ASSIGNMENT: u16 = 233;
pub const SPREAD_ASSIGNMENT: u16 = 234;

// Statements
pub const BLOCK: u16 = 235;
pub const EMPTY_STATEMENT: u16 = 236;
pub const VARIABLE_STATEMENT: u16 = 237;
pub const EXPRESSION_STATEMENT: u16 = 238;
pub const IF_STATEMENT: u16 = 239;
pub const DO_STATEMENT: u16 = 240;
pub const WHILE_STATEMENT: u16 = 241;
pub const FOR_STATEMENT: u16 = 242;
pub const FOR_IN_STATEMENT: u16 = 243;
pub const FOR_OF_STATEMENT: u16 = 244;
pub const CONTINUE_STATEMENT: u16 = 245;
pub const BREAK_STATEMENT: u16 = 246;
pub const RETURN_STATEMENT: u16 = 247;
pub const WITH_STATEMENT: u16 = 248;
pub const SWITCH_STATEMENT: u16 = 249;
pub const LABELED_STATEMENT: u16 = 250;
pub const THROW_STATEMENT: u16 = 251;
pub const TRY_STATEMENT: u16 = 252;
pub const DEBUGGER_STATEMENT: u16 = 253;

// Declarations
pub const VARIABLE_DECLARATION: u16 = 254;
pub const VARIABLE_DECLARATION_LIST: u16 = 255;
pub const FUNCTION_DECLARATION: u16 = 256;
pub const CLASS_DECLARATION: u16 = 257;
pub const INTERFACE_DECLARATION: u16 = 258;
pub const TYPE_ALIAS_DECLARATION: u16 = 259;
pub const ENUM_DECLARATION: u16 = 260;
pub const ENUM_MEMBER: u16 = 261;
pub const MODULE_DECLARATION: u16 = 262;
pub const MODULE_BLOCK: u16 = 263;
pub const CASE_BLOCK: u16 = 264;
pub const CASE_CLAUSE: u16 = 265;
pub const DEFAULT_CLAUSE: u16 = 266;
pub const HERITAGE_CLAUSE: u16 = 267;
pub const CATCH_CLAUSE: u16 = 268;

// Modules
pub const IMPORT_EQUALS_DECLARATION: u16 = 269;
pub const IMPORT_DECLARATION: u16 = 270;
pub const IMPORT_CLAUSE: u16 = 271;
pub const NAMESPACE_IMPORT: u16 = 272;
pub const NAMED_IMPORTS: u16 = 273;
pub const IMPORT_SPECIFIER: u16 = 274;
pub const EXPORT_ASSIGNMENT: u16 = 275;
pub const EXPORT_DECLARATION: u16 = 276;
pub const NAMED_EXPORTS: u16 = 277;
pub const NAMESPACE_EXPORT: u16 = 278;
pub const EXPORT_SPECIFIER: u16 = 279;
pub const EXTERNAL_MODULE_REFERENCE: u16 = 280;

// Root
pub const SOURCE_FILE: u16 = 281;

/// First composite (non-token) kind.
pub const FIRST_NODE_KIND: u16 = QUALIFIED_NAME;

const _: () = assert!((SyntaxKind::LAST_TOKEN as u16) < FIRST_NODE_KIND);

/// True when `kind` is a scanner token rather than a composite node.
pub fn is_token_kind(kind: u16) -> bool {
    kind < FIRST_NODE_KIND
}

/// Function-like kinds share one data pool and one erasure rule.
pub fn is_function_like(kind: u16) -> bool {
    matches!(
        kind,
        FUNCTION_DECLARATION
            | FUNCTION_EXPRESSION
            | ARROW_FUNCTION
            | METHOD_DECLARATION
            | METHOD_SIGNATURE
            | CONSTRUCTOR
            | GET_ACCESSOR
            | SET_ACCESSOR
            | CALL_SIGNATURE
            | CONSTRUCT_SIGNATURE
            | FUNCTION_TYPE
            | CONSTRUCTOR_TYPE
    )
}

/// Kinds whose node carries a class-shaped data record.
pub fn is_class_like(kind: u16) -> bool {
    matches!(kind, CLASS_DECLARATION | CLASS_EXPRESSION | INTERFACE_DECLARATION)
}
