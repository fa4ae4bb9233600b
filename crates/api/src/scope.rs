//! Scope-population protocol used by the host resolution engine.

use crate::compiled::{CompiledClass, CompiledField, CompiledMethod};
use crate::models::TypeRef;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Method,
    Field,
    Class,
}

/// A declaration handed to a [`ScopeProcessor`].
#[derive(Debug, Clone)]
pub enum ScopeDeclaration {
    Method(Arc<dyn CompiledMethod>),
    Field(Arc<dyn CompiledField>),
    Class(Arc<dyn CompiledClass>),
}

impl ScopeDeclaration {
    pub fn kind(&self) -> DeclarationKind {
        match self {
            ScopeDeclaration::Method(_) => DeclarationKind::Method,
            ScopeDeclaration::Field(_) => DeclarationKind::Field,
            ScopeDeclaration::Class(_) => DeclarationKind::Class,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ScopeDeclaration::Method(m) => Some(m.name()),
            ScopeDeclaration::Field(f) => Some(f.name()),
            ScopeDeclaration::Class(c) => c.name(),
        }
    }
}

/// Substitutions accumulated while walking scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveState {
    pub substitutions: HashMap<String, TypeRef>,
}

impl ResolveState {
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn with_substitution(mut self, type_parameter: impl Into<String>, ty: TypeRef) -> Self {
        self.substitutions.insert(type_parameter.into(), ty);
        self
    }
}

/// Receives declarations during scope population.
pub trait ScopeProcessor {
    /// Handle one declaration. Returning `false` stops the walk.
    fn execute(&mut self, declaration: ScopeDeclaration, state: &ResolveState) -> bool;

    /// Only declarations with this name are of interest.
    fn name_hint(&self, _state: &ResolveState) -> Option<&str> {
        None
    }

    /// Whether declarations of this kind are of interest.
    fn should_process(&self, _kind: DeclarationKind) -> bool {
        true
    }
}
