//! Read-only wrappers over compiled methods and fields.

use crate::class::ClassProjection;
use crate::context::ProjectionContext;
use crate::hierarchy;
use crate::identity::ProjectionKey;
use crate::origin::{MemberKind, OriginDescriptor, property_name_by_accessor};
use clsview_api::{
    ApiError, ApiResult, CompiledField, CompiledMethod, ConstantValue, ElementId, MethodSignature,
    Modifiers, OriginDeclaration, OriginKind, Parameter, TypeRef,
};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

/// Behaviour common to method and field projections.
pub trait LightMember: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    fn modifiers(&self) -> &Modifiers;

    fn has_modifier_property(&self, name: &str) -> bool {
        self.modifiers().has_property(name)
    }

    /// The owning class, while it is alive.
    fn containing_class(&self) -> Option<Arc<ClassProjection>>;

    fn member_origin(&self) -> &OriginDescriptor;

    fn origin(&self) -> Option<Arc<dyn OriginDeclaration>> {
        self.member_origin().original_element()
    }

    fn member_kind(&self) -> MemberKind {
        self.member_origin().kind()
    }

    fn compiled_id(&self) -> ElementId;

    fn is_deprecated(&self) -> bool;

    fn doc_comment(&self) -> Option<&str>;

    /// Valid while the owning class is valid.
    fn is_valid(&self) -> bool {
        self.containing_class().is_some_and(|c| c.is_valid())
    }

    fn set_name(&self, _name: &str) -> ApiResult<()> {
        Err(ApiError::unsupported("rename", self.name()))
    }
}

pub struct MethodProjection {
    delegate: Arc<dyn CompiledMethod>,
    owner: Weak<ClassProjection>,
    owner_key: ProjectionKey,
    member_origin: OriginDescriptor,
    context: Arc<ProjectionContext>,
}

impl MethodProjection {
    pub(crate) fn new(
        delegate: Arc<dyn CompiledMethod>,
        owner: Weak<ClassProjection>,
        owner_key: ProjectionKey,
        member_origin: OriginDescriptor,
        context: Arc<ProjectionContext>,
    ) -> Self {
        Self {
            delegate,
            owner,
            owner_key,
            member_origin,
            context,
        }
    }

    pub fn compiled(&self) -> &Arc<dyn CompiledMethod> {
        &self.delegate
    }

    pub fn return_type(&self) -> Option<&TypeRef> {
        self.delegate.return_type()
    }

    pub fn parameters(&self) -> &[Parameter] {
        self.delegate.parameters()
    }

    pub fn throws(&self) -> &[TypeRef] {
        self.delegate.throws()
    }

    pub fn type_parameters(&self) -> &[String] {
        self.delegate.type_parameters()
    }

    pub fn has_type_parameters(&self) -> bool {
        !self.delegate.type_parameters().is_empty()
    }

    pub fn is_varargs(&self) -> bool {
        self.delegate.is_varargs()
    }

    pub fn is_constructor(&self) -> bool {
        self.delegate.is_constructor()
    }

    pub fn default_value(&self) -> Option<&ConstantValue> {
        self.delegate.default_value()
    }

    /// Binaries carry no method bodies.
    pub fn body(&self) -> Option<&str> {
        None
    }

    pub fn signature(&self) -> MethodSignature {
        self.delegate.signature()
    }

    /// Whether the JVM name is a mangled form of a name other than the origin's.
    ///
    /// The name is demangled, accessor prefixes are stripped when the origin is a
    /// property, and the result is compared with the origin's name. Without a
    /// demangling result or without an origin the method is not mangled.
    pub fn is_mangled(&self) -> bool {
        let Some(demangled) = self.context.demangler().demangle(self.name()) else {
            return false;
        };
        let Some(origin) = self.origin() else {
            return false;
        };
        let original = if origin.kind() == OriginKind::Property {
            property_name_by_accessor(&demangled).unwrap_or(demangled)
        } else {
            demangled
        };
        origin.name() != Some(original.as_str())
    }

    /// Methods this one overrides, nearest supertypes first.
    pub fn find_super_methods(&self) -> Vec<Arc<MethodProjection>> {
        self.containing_class()
            .map(|owner| hierarchy::super_methods(&owner, self))
            .unwrap_or_default()
    }

    /// The most distant overridden method.
    pub fn find_deepest_super_method(&self) -> Option<Arc<MethodProjection>> {
        self.find_super_methods().pop()
    }

    /// Projections are shared read-only values; copying yields the same instance.
    pub fn copy(self: &Arc<Self>) -> Arc<Self> {
        Arc::clone(self)
    }
}

impl LightMember for MethodProjection {
    fn name(&self) -> &str {
        self.delegate.name()
    }

    fn modifiers(&self) -> &Modifiers {
        self.delegate.modifiers()
    }

    fn containing_class(&self) -> Option<Arc<ClassProjection>> {
        self.owner.upgrade()
    }

    fn member_origin(&self) -> &OriginDescriptor {
        &self.member_origin
    }

    fn compiled_id(&self) -> ElementId {
        self.delegate.id()
    }

    fn is_deprecated(&self) -> bool {
        self.delegate.is_deprecated()
    }

    fn doc_comment(&self) -> Option<&str> {
        self.delegate.doc_comment()
    }
}

impl PartialEq for MethodProjection {
    fn eq(&self, other: &Self) -> bool {
        self.owner_key == other.owner_key && self.delegate.id() == other.delegate.id()
    }
}

impl Eq for MethodProjection {}

impl Hash for MethodProjection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.delegate.id().hash(state);
    }
}

impl fmt::Debug for MethodProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodProjection")
            .field("name", &self.delegate.name())
            .field("owner", &self.owner_key)
            .field("origin", &self.member_origin)
            .finish()
    }
}

impl fmt::Display for MethodProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodProjection of {}", self.owner_key.fq_name)
    }
}

pub struct FieldProjection {
    delegate: Arc<dyn CompiledField>,
    owner: Weak<ClassProjection>,
    owner_key: ProjectionKey,
    member_origin: OriginDescriptor,
}

impl FieldProjection {
    pub(crate) fn new(
        delegate: Arc<dyn CompiledField>,
        owner: Weak<ClassProjection>,
        owner_key: ProjectionKey,
        member_origin: OriginDescriptor,
    ) -> Self {
        Self {
            delegate,
            owner,
            owner_key,
            member_origin,
        }
    }

    pub fn compiled(&self) -> &Arc<dyn CompiledField> {
        &self.delegate
    }

    pub fn field_type(&self) -> &TypeRef {
        self.delegate.field_type()
    }

    pub fn initializer(&self) -> Option<&ConstantValue> {
        self.delegate.constant_value()
    }

    pub fn has_initializer(&self) -> bool {
        self.delegate.has_initializer()
    }

    pub fn compute_constant_value(&self) -> Option<ConstantValue> {
        self.delegate.constant_value().cloned()
    }

    pub fn is_enum_constant(&self) -> bool {
        self.delegate.is_enum_constant()
    }

    pub fn set_initializer(&self, _initializer: Option<ConstantValue>) -> ApiResult<()> {
        Err(ApiError::unsupported("set initializer", self.name()))
    }

    pub fn copy(self: &Arc<Self>) -> Arc<Self> {
        Arc::clone(self)
    }
}

impl LightMember for FieldProjection {
    fn name(&self) -> &str {
        self.delegate.name()
    }

    fn modifiers(&self) -> &Modifiers {
        self.delegate.modifiers()
    }

    fn containing_class(&self) -> Option<Arc<ClassProjection>> {
        self.owner.upgrade()
    }

    fn member_origin(&self) -> &OriginDescriptor {
        &self.member_origin
    }

    fn compiled_id(&self) -> ElementId {
        self.delegate.id()
    }

    fn is_deprecated(&self) -> bool {
        self.delegate.is_deprecated()
    }

    fn doc_comment(&self) -> Option<&str> {
        self.delegate.doc_comment()
    }
}

impl PartialEq for FieldProjection {
    fn eq(&self, other: &Self) -> bool {
        self.owner_key == other.owner_key && self.delegate.id() == other.delegate.id()
    }
}

impl Eq for FieldProjection {}

impl Hash for FieldProjection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.delegate.id().hash(state);
    }
}

impl fmt::Debug for FieldProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldProjection")
            .field("name", &self.delegate.name())
            .field("owner", &self.owner_key)
            .field("origin", &self.member_origin)
            .finish()
    }
}

impl fmt::Display for FieldProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldProjection of {}", self.owner_key.fq_name)
    }
}
