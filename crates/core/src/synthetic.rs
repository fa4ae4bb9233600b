//! Enum members that exist in neither tree: `values()` and `valueOf(String)`.

use crate::class::ClassProjection;
use clsview_api::{
    ApiResult, DeclarationFactory, MethodDeclaration, MethodSignature, Modifiers, Parameter,
    TypeRef,
};
use std::fmt;
use std::sync::{Arc, Weak};

pub const VALUES_METHOD: &str = "values";
pub const VALUE_OF_METHOD: &str = "valueOf";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticKind {
    Values,
    ValueOf,
}

impl SyntheticKind {
    pub fn method_name(self) -> &'static str {
        match self {
            SyntheticKind::Values => VALUES_METHOD,
            SyntheticKind::ValueOf => VALUE_OF_METHOD,
        }
    }

    /// Template text for an enum named `class_name`.
    pub fn template(self, class_name: &str) -> String {
        match self {
            SyntheticKind::Values => format!("public static {class_name}[] values() {{ }}"),
            SyntheticKind::ValueOf => format!(
                "public static {class_name} valueOf(java.lang.String name) throws java.lang.IllegalArgumentException {{ }}"
            ),
        }
    }
}

/// Renders the templates through the declaration factory.
pub struct SyntheticMemberFactory<'a> {
    factory: &'a dyn DeclarationFactory,
}

impl<'a> SyntheticMemberFactory<'a> {
    pub fn new(factory: &'a dyn DeclarationFactory) -> Self {
        Self { factory }
    }

    /// Callers guarantee `class_name` belongs to a named enum.
    pub fn make(
        &self,
        kind: SyntheticKind,
        class_name: &str,
        owner: Weak<ClassProjection>,
    ) -> ApiResult<SyntheticMethod> {
        let declaration = self
            .factory
            .create_method_from_text(&kind.template(class_name))?;
        Ok(SyntheticMethod {
            kind,
            declaration,
            owner,
        })
    }
}

/// A fabricated method owned by the class projection that created it.
pub struct SyntheticMethod {
    kind: SyntheticKind,
    declaration: MethodDeclaration,
    owner: Weak<ClassProjection>,
}

impl SyntheticMethod {
    pub fn kind(&self) -> SyntheticKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.declaration.name
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.declaration.modifiers
    }

    pub fn has_modifier_property(&self, name: &str) -> bool {
        self.declaration.modifiers.has_property(name)
    }

    pub fn return_type(&self) -> Option<&TypeRef> {
        self.declaration.return_type.as_ref()
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.declaration.parameters
    }

    pub fn throws(&self) -> &[TypeRef] {
        &self.declaration.throws
    }

    pub fn signature(&self) -> MethodSignature {
        MethodSignature::new(self.name(), self.parameters())
    }

    pub fn containing_class(&self) -> Option<Arc<ClassProjection>> {
        self.owner.upgrade()
    }

    /// There is no source position of its own; the owning class's is reported.
    pub fn text_offset(&self) -> u32 {
        self.owner.upgrade().map(|c| c.text_offset()).unwrap_or(0)
    }

    pub fn is_valid(&self) -> bool {
        self.owner.upgrade().is_some_and(|c| c.is_valid())
    }
}

impl fmt::Debug for SyntheticMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntheticMethod")
            .field("kind", &self.kind)
            .field("declaration", &self.declaration)
            .finish()
    }
}

impl fmt::Display for SyntheticMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner.upgrade() {
            Some(owner) => write!(f, "SyntheticMethod {} of {}", self.name(), owner.fq_name()),
            None => write!(f, "SyntheticMethod {}", self.name()),
        }
    }
}
