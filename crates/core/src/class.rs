//! The class projection: a read-through facade over a compiled class and its
//! optional origin declaration.
//!
//! Structural queries go to the compiled class. Child arrays (methods, fields,
//! inner classes) are wrapped on first access and kept for the projection's
//! lifetime. Validity is never cached.

use crate::context::ProjectionContext;
use crate::hierarchy::{self, HierarchicalSignature};
use crate::identity::ProjectionKey;
use crate::member::{FieldProjection, MethodProjection};
use crate::memo::Memo;
use crate::origin::{OriginDescriptor, find_class_origin};
use crate::synthetic::{SyntheticKind, SyntheticMemberFactory, SyntheticMethod};
use clsview_api::{
    ApiError, ApiResult, ClassKind, ClassOriginKind, CompiledArtifact, CompiledClass, ElementId,
    FqName, MethodSignature, Modifiers, NavigationTarget, OriginDeclaration, ResolveState,
    ScopeProcessor, TypeRef,
};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

pub struct ClassProjection {
    compiled: Arc<dyn CompiledClass>,
    artifact: Arc<dyn CompiledArtifact>,
    parent: Option<Weak<ClassProjection>>,
    origin: Option<Arc<dyn OriginDeclaration>>,
    key: ProjectionKey,
    context: Arc<ProjectionContext>,
    self_ref: Weak<ClassProjection>,
    methods: Memo<Vec<Arc<MethodProjection>>>,
    fields: Memo<Vec<Arc<FieldProjection>>>,
    inner_classes: Memo<Vec<Arc<ClassProjection>>>,
    values_method: Memo<Option<Arc<SyntheticMethod>>>,
    value_of_method: Memo<Option<Arc<SyntheticMethod>>>,
}

impl ClassProjection {
    /// Projection of a top-level class; its enclosing context is the artifact.
    pub fn new_top_level(
        compiled: Arc<dyn CompiledClass>,
        artifact: Arc<dyn CompiledArtifact>,
        origin: Option<Arc<dyn OriginDeclaration>>,
        context: Arc<ProjectionContext>,
    ) -> Arc<Self> {
        Self::build(compiled, artifact, None, origin, context)
    }

    fn new_inner(
        compiled: Arc<dyn CompiledClass>,
        parent: &ClassProjection,
        origin: Option<Arc<dyn OriginDeclaration>>,
    ) -> Arc<Self> {
        Self::build(
            compiled,
            Arc::clone(&parent.artifact),
            Some(parent.self_ref.clone()),
            origin,
            Arc::clone(&parent.context),
        )
    }

    fn build(
        compiled: Arc<dyn CompiledClass>,
        artifact: Arc<dyn CompiledArtifact>,
        parent: Option<Weak<ClassProjection>>,
        origin: Option<Arc<dyn OriginDeclaration>>,
        context: Arc<ProjectionContext>,
    ) -> Arc<Self> {
        let key = ProjectionKey::derive(compiled.qualified_name(), origin.as_ref());
        Arc::new_cyclic(|self_ref| Self {
            compiled,
            artifact,
            parent,
            origin,
            key,
            context,
            self_ref: self_ref.clone(),
            methods: Memo::new(),
            fields: Memo::new(),
            inner_classes: Memo::new(),
            values_method: Memo::new(),
            value_of_method: Memo::new(),
        })
    }

    pub fn compiled(&self) -> &Arc<dyn CompiledClass> {
        &self.compiled
    }

    pub fn artifact(&self) -> &Arc<dyn CompiledArtifact> {
        &self.artifact
    }

    pub fn context(&self) -> &Arc<ProjectionContext> {
        &self.context
    }

    /// The origin declaration this class was matched with.
    pub fn origin(&self) -> Option<&Arc<dyn OriginDeclaration>> {
        self.origin.as_ref()
    }

    pub fn key(&self) -> &ProjectionKey {
        &self.key
    }

    /// Origin qualified name when present, else the compiled one.
    pub fn fq_name(&self) -> &FqName {
        &self.key.fq_name
    }

    pub fn qualified_name(&self) -> Option<FqName> {
        self.compiled.qualified_name()
    }

    pub fn name(&self) -> Option<&str> {
        self.compiled.name()
    }

    pub fn origin_kind(&self) -> ClassOriginKind {
        ClassOriginKind::Binary
    }

    pub fn kind(&self) -> ClassKind {
        self.compiled.kind()
    }

    pub fn is_enum(&self) -> bool {
        self.compiled.kind() == ClassKind::Enum
    }

    pub fn is_interface(&self) -> bool {
        matches!(
            self.compiled.kind(),
            ClassKind::Interface | ClassKind::Annotation
        )
    }

    pub fn is_annotation_type(&self) -> bool {
        self.compiled.kind() == ClassKind::Annotation
    }

    pub fn modifiers(&self) -> &Modifiers {
        self.compiled.modifiers()
    }

    pub fn has_modifier_property(&self, name: &str) -> bool {
        self.compiled.modifiers().has_property(name)
    }

    pub fn type_parameters(&self) -> &[String] {
        self.compiled.type_parameters()
    }

    pub fn has_type_parameters(&self) -> bool {
        !self.compiled.type_parameters().is_empty()
    }

    pub fn is_deprecated(&self) -> bool {
        self.compiled.is_deprecated()
    }

    pub fn doc_comment(&self) -> Option<&str> {
        self.compiled.doc_comment()
    }

    pub fn text_offset(&self) -> u32 {
        self.compiled.text_offset()
    }

    pub fn containing_class(&self) -> Option<Arc<ClassProjection>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    pub fn navigation_element(&self) -> NavigationTarget {
        match &self.origin {
            Some(origin) => origin.navigation_target(),
            None => NavigationTarget::file(self.artifact.path()),
        }
    }

    fn origin_declarations(&self) -> Vec<Arc<dyn OriginDeclaration>> {
        self.origin
            .as_ref()
            .map(|o| o.declarations())
            .unwrap_or_default()
    }

    pub fn methods(&self) -> &[Arc<MethodProjection>] {
        self.methods.get_or_compute(|| {
            let siblings = self.origin_declarations();
            let config = self.context.config();
            let methods: Vec<_> = self
                .compiled
                .own_methods()
                .into_iter()
                .filter(|m| !(config.skip_synthetic_compiled_members && m.is_synthetic()))
                .map(|method| {
                    let member_origin = OriginDescriptor::for_method(
                        &*method,
                        &siblings,
                        self.context.demangler(),
                        config.match_accessor_origins,
                    );
                    Arc::new(MethodProjection::new(
                        method,
                        self.self_ref.clone(),
                        self.key.clone(),
                        member_origin,
                        Arc::clone(&self.context),
                    ))
                })
                .collect();
            tracing::debug!(class = %self.key.fq_name, count = methods.len(), "materialized methods");
            methods
        })
    }

    pub fn fields(&self) -> &[Arc<FieldProjection>] {
        self.fields.get_or_compute(|| {
            let siblings = self.origin_declarations();
            let skip_synthetic = self.context.config().skip_synthetic_compiled_members;
            let fields: Vec<_> = self
                .compiled
                .own_fields()
                .into_iter()
                .filter(|f| !(skip_synthetic && f.is_synthetic()))
                .map(|field| {
                    let member_origin = OriginDescriptor::for_field(&*field, &siblings);
                    Arc::new(FieldProjection::new(
                        field,
                        self.self_ref.clone(),
                        self.key.clone(),
                        member_origin,
                    ))
                })
                .collect();
            tracing::debug!(class = %self.key.fq_name, count = fields.len(), "materialized fields");
            fields
        })
    }

    pub fn inner_classes(&self) -> &[Arc<ClassProjection>] {
        self.inner_classes.get_or_compute(|| {
            let siblings = self.origin_declarations();
            self.compiled
                .own_inner_classes()
                .into_iter()
                .map(|inner| {
                    let origin = inner.name().and_then(|name| find_class_origin(&siblings, name));
                    ClassProjection::new_inner(inner, self, origin)
                })
                .collect()
        })
    }

    pub fn constructors(&self) -> Vec<Arc<MethodProjection>> {
        hierarchy::constructors(self)
    }

    /// Synthetic `values()` of a named enum; `None` otherwise.
    pub fn values_method(&self) -> Option<Arc<SyntheticMethod>> {
        self.synthetic_method(SyntheticKind::Values, &self.values_method)
    }

    /// Synthetic `valueOf(String)` of a named enum; `None` otherwise.
    pub fn value_of_method(&self) -> Option<Arc<SyntheticMethod>> {
        self.synthetic_method(SyntheticKind::ValueOf, &self.value_of_method)
    }

    fn synthetic_method(
        &self,
        kind: SyntheticKind,
        slot: &Memo<Option<Arc<SyntheticMethod>>>,
    ) -> Option<Arc<SyntheticMethod>> {
        if !self.is_enum() || !self.context.config().synthesize_enum_members {
            return None;
        }
        let name = self.name()?;
        slot.get_or_compute(|| {
            let factory = SyntheticMemberFactory::new(self.context.declaration_factory());
            match factory.make(kind, name, self.self_ref.clone()) {
                Ok(method) => Some(Arc::new(method)),
                Err(err) => {
                    tracing::warn!(class = %self.key.fq_name, method = kind.method_name(), error = %err, "synthetic method unavailable");
                    None
                }
            }
        })
        .clone()
    }

    pub fn process_declarations(
        &self,
        processor: &mut dyn ScopeProcessor,
        state: &ResolveState,
        last_parent: Option<ElementId>,
        place: ElementId,
    ) -> bool {
        self.compiled
            .process_declarations(processor, state, last_parent, place)
    }

    pub fn find_methods_by_name(&self, name: &str, check_bases: bool) -> Vec<Arc<MethodProjection>> {
        hierarchy::find_methods_by_name(self, name, check_bases)
    }

    pub fn find_method_by_signature(
        &self,
        pattern: &MethodSignature,
        check_bases: bool,
    ) -> Option<Arc<MethodProjection>> {
        hierarchy::find_method_by_signature(self, pattern, check_bases)
    }

    pub fn find_methods_by_signature(
        &self,
        pattern: &MethodSignature,
        check_bases: bool,
    ) -> Vec<Arc<MethodProjection>> {
        hierarchy::find_methods_by_signature(self, pattern, check_bases)
    }

    pub fn find_field_by_name(&self, name: &str, check_bases: bool) -> Option<Arc<FieldProjection>> {
        hierarchy::find_field_by_name(self, name, check_bases)
    }

    pub fn find_inner_class_by_name(
        &self,
        name: &str,
        check_bases: bool,
    ) -> Option<Arc<ClassProjection>> {
        hierarchy::find_inner_class_by_name(self, name, check_bases)
    }

    pub fn all_methods(&self) -> Vec<Arc<MethodProjection>> {
        hierarchy::all_methods(self)
    }

    pub fn all_fields(&self) -> Vec<Arc<FieldProjection>> {
        hierarchy::all_fields(self)
    }

    pub fn all_inner_classes(&self) -> Vec<Arc<ClassProjection>> {
        hierarchy::all_inner_classes(self)
    }

    pub fn super_class(&self) -> Option<Arc<ClassProjection>> {
        hierarchy::super_class(self)
    }

    pub fn interfaces(&self) -> Vec<Arc<ClassProjection>> {
        hierarchy::interfaces(self)
    }

    pub fn supers(&self) -> Vec<Arc<ClassProjection>> {
        hierarchy::supers(self)
    }

    pub fn super_types(&self) -> Vec<TypeRef> {
        hierarchy::super_types(self)
    }

    pub fn extends_list_types(&self) -> Vec<TypeRef> {
        hierarchy::extends_list_types(self)
    }

    pub fn implements_list_types(&self) -> Vec<TypeRef> {
        hierarchy::implements_list_types(self)
    }

    pub fn visible_signatures(&self) -> Vec<HierarchicalSignature> {
        hierarchy::visible_signatures(self)
    }

    pub fn is_inheritor(&self, base: &ClassProjection, deep: bool) -> bool {
        hierarchy::is_inheritor(self, base, deep)
    }

    /// Compiled artifact, compiled class, origin (if any) and every live ancestor
    /// projection must all be valid. Evaluated on every call.
    pub fn is_valid(&self) -> bool {
        self.artifact.is_valid()
            && self.compiled.is_valid()
            && self.origin.as_ref().is_none_or(|o| o.is_valid())
            && self.containing_class().is_none_or(|p| p.is_valid())
    }

    pub fn set_name(&self, _name: &str) -> ApiResult<()> {
        Err(ApiError::unsupported("rename", self.key.fq_name.to_string()))
    }

    /// Projections are shared read-only values; `copy` and `Arc::clone` both yield
    /// the same instance.
    pub fn copy(self: &Arc<Self>) -> Arc<Self> {
        Arc::clone(self)
    }
}

impl PartialEq for ClassProjection {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ClassProjection {}

impl Hash for ClassProjection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for ClassProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassProjection")
            .field("key", &self.key)
            .field("compiled", &self.compiled.id())
            .field("methods", &self.methods.is_computed())
            .field("fields", &self.fields.is_computed())
            .field("inner_classes", &self.inner_classes.is_computed())
            .finish()
    }
}

impl fmt::Display for ClassProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.containing_class() {
            Some(parent) => write!(f, "ClassProjection of {parent}"),
            None => write!(f, "ClassProjection of {}", self.artifact.path().display()),
        }
    }
}
