//! Shared tree-sitter helpers for Java source text.

use clsview_api::{Modifier, Modifiers, Parameter, TypeRef};
use clsview_core::{ClassViewError, Result};
use tree_sitter::{Node, Parser, Tree};

pub fn parse(source: &str) -> Result<Tree> {
    let language: tree_sitter::Language = tree_sitter_java::LANGUAGE.into();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| ClassViewError::Parsing(e.to_string()))?;
    parser
        .parse(source, None)
        .ok_or_else(|| ClassViewError::Parsing("Failed to parse Java source".to_string()))
}

pub fn text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or_default()
}

pub fn field_text<'a>(node: Node, field: &str, source: &'a str) -> Option<&'a str> {
    node.child_by_field_name(field).map(|n| text(n, source))
}

pub fn parse_type(node: Node, source: &str) -> TypeRef {
    match node.kind() {
        "generic_type" => {
            let base = node
                .child_by_field_name("type")
                .or_else(|| node.named_child(0))
                .map(|b| parse_type(b, source))
                .unwrap_or_default();

            let mut args = Vec::new();
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if child.kind() == "type_arguments" {
                    let mut args_cursor = child.walk();
                    for arg in child.named_children(&mut args_cursor) {
                        args.push(parse_type(arg, source));
                    }
                }
            }

            TypeRef::Generic {
                base: Box::new(base),
                args,
            }
        }
        "array_type" => {
            let element = node
                .child_by_field_name("element")
                .map(|e| parse_type(e, source))
                .unwrap_or_default();
            let dimensions = node
                .child_by_field_name("dimensions")
                .map(|d| text(d, source).matches('[').count())
                .unwrap_or(1);

            TypeRef::Array {
                element: Box::new(element),
                dimensions,
            }
        }
        "wildcard" => {
            let mut bound = None;
            let mut is_upper = true;

            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                match child.kind() {
                    "super" => is_upper = false,
                    "extends" => is_upper = true,
                    _ if child.is_named() => {
                        bound = Some(Box::new(parse_type(child, source)));
                    }
                    _ => {}
                }
            }

            TypeRef::Wildcard {
                bound,
                is_upper_bound: is_upper,
            }
        }
        "scoped_type_identifier" => match text(node, source) {
            "" => TypeRef::Unknown,
            qualified => TypeRef::id(qualified),
        },
        _ => match text(node, source) {
            "" => TypeRef::Unknown,
            name => TypeRef::raw(name),
        },
    }
}

/// Keyword modifiers of a declaration; annotations are skipped.
pub fn modifiers(declaration: Node, source: &str) -> Modifiers {
    let mut cursor = declaration.walk();
    let Some(list) = declaration
        .children(&mut cursor)
        .find(|c| c.kind() == "modifiers")
    else {
        return Modifiers::empty();
    };
    let mut list_cursor = list.walk();
    list.children(&mut list_cursor)
        .filter_map(|m| Modifier::parse(text(m, source)))
        .collect()
}

/// Parameters of a method or constructor declaration.
pub fn parameters(declaration: Node, source: &str) -> Vec<Parameter> {
    let Some(params_node) = declaration.child_by_field_name("parameters") else {
        return vec![];
    };

    let mut result = Vec::new();
    let mut cursor = params_node.walk();
    for child in params_node.named_children(&mut cursor) {
        match child.kind() {
            "formal_parameter" => {
                if let Some(type_node) = child.child_by_field_name("type") {
                    result.push(Parameter {
                        name: field_text(child, "name", source).unwrap_or("arg").to_string(),
                        type_ref: parse_type(type_node, source),
                        is_varargs: false,
                    });
                }
            }
            "spread_parameter" => {
                let mut type_ref = TypeRef::Unknown;
                let mut name = "arg".to_string();

                let mut inner_cursor = child.walk();
                for gc in child.named_children(&mut inner_cursor) {
                    match gc.kind() {
                        "variable_declarator" => {
                            if let Some(n) = field_text(gc, "name", source) {
                                name = n.to_string();
                            }
                        }
                        "modifiers" => {}
                        _ => type_ref = TypeRef::array_of(parse_type(gc, source)),
                    }
                }
                result.push(Parameter {
                    name,
                    type_ref,
                    is_varargs: true,
                });
            }
            _ => {}
        }
    }
    result
}

/// Types listed in a `throws` clause.
pub fn throws(declaration: Node, source: &str) -> Vec<TypeRef> {
    let mut cursor = declaration.walk();
    let Some(clause) = declaration
        .children(&mut cursor)
        .find(|c| c.kind() == "throws")
    else {
        return vec![];
    };
    let mut clause_cursor = clause.walk();
    clause
        .named_children(&mut clause_cursor)
        .map(|t| parse_type(t, source))
        .collect()
}

/// Names of declared type parameters (`<T extends Number, U>` -> `["T", "U"]`).
pub fn type_parameters(declaration: Node, source: &str) -> Vec<String> {
    let Some(list) = declaration.child_by_field_name("type_parameters") else {
        return vec![];
    };
    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter(|p| p.kind() == "type_parameter")
        .filter_map(|p| {
            let mut inner = p.walk();
            p.named_children(&mut inner)
                .find(|n| matches!(n.kind(), "type_identifier" | "identifier"))
                .map(|n| text(n, source).to_string())
        })
        .collect()
}
