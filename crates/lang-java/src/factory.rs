//! Method declarations from Java template text.

use crate::syntax;
use clsview_api::{ApiError, ApiResult, DeclarationFactory, MethodDeclaration};
use tree_sitter::Node;

const WRAPPER_PREFIX: &str = "class __Template {\n";
const WRAPPER_SUFFIX: &str = "\n}\n";

/// Parses a single Java method declaration, for example
/// `public static Color[] values() { }`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JavaDeclarationFactory;

impl JavaDeclarationFactory {
    pub fn new() -> Self {
        Self
    }
}

impl DeclarationFactory for JavaDeclarationFactory {
    fn create_method_from_text(&self, text: &str) -> ApiResult<MethodDeclaration> {
        let wrapped = format!("{WRAPPER_PREFIX}{text}{WRAPPER_SUFFIX}");
        let tree = syntax::parse(&wrapped)
            .map_err(|e| ApiError::InvalidTemplate(format!("{text}: {e}")))?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(ApiError::InvalidTemplate(format!(
                "{text}: not a method declaration"
            )));
        }

        let method = find_method(root).ok_or_else(|| {
            ApiError::InvalidTemplate(format!("{text}: expected exactly one method"))
        })?;
        let source = wrapped.as_str();
        let name = syntax::field_text(method, "name", source)
            .ok_or_else(|| ApiError::InvalidTemplate(format!("{text}: method has no name")))?
            .to_string();

        let return_type = match method.kind() {
            "constructor_declaration" => None,
            _ => method
                .child_by_field_name("type")
                .map(|t| syntax::parse_type(t, source)),
        };

        Ok(MethodDeclaration {
            name,
            modifiers: syntax::modifiers(method, source),
            return_type,
            parameters: syntax::parameters(method, source),
            throws: syntax::throws(method, source),
            type_parameters: syntax::type_parameters(method, source),
        })
    }
}

/// The only member of the wrapper class, when it is a method or constructor.
fn find_method(root: Node) -> Option<Node> {
    let class = root.named_child(0)?;
    let body = class.child_by_field_name("body")?;
    let mut cursor = body.walk();
    let members: Vec<Node> = body.named_children(&mut cursor).collect();
    match members.as_slice() {
        [member] if matches!(member.kind(), "method_declaration" | "constructor_declaration") => {
            Some(*member)
        }
        _ => None,
    }
}
