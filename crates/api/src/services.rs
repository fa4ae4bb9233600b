//! Stateless services the projection layer calls into.

use crate::error::ApiResult;
use crate::models::{Modifiers, Parameter, TypeRef};
use std::fmt::Debug;

/// A method declaration materialized from template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    pub name: String,
    pub modifiers: Modifiers,
    /// `None` for constructors.
    pub return_type: Option<TypeRef>,
    pub parameters: Vec<Parameter>,
    pub throws: Vec<TypeRef>,
    pub type_parameters: Vec<String>,
}

/// Builds declarations from source text.
pub trait DeclarationFactory: Send + Sync + Debug {
    fn create_method_from_text(&self, text: &str) -> ApiResult<MethodDeclaration>;
}

/// Reverses the compiler's name-mangling scheme.
pub trait Demangler: Send + Sync + Debug {
    /// The original name, or `None` when `name` is not mangled.
    fn demangle(&self, name: &str) -> Option<String>;
}
