//! In-memory compiled and origin trees for projection tests.
//!
//! Both trees are built with fluent builders. Every node of one artifact shares a
//! validity flag so a test can invalidate the whole artifact at once.

#![allow(dead_code)]

use clsview_api::{
    ApiError, ApiResult, ClassKind, CompiledArtifact, CompiledClass, CompiledField, CompiledMethod,
    ConstantValue, DeclarationFactory, Demangler, ElementId, FqName, MethodDeclaration, Modifier,
    Modifiers, NavigationTarget, OriginDeclaration, OriginKind, Parameter, TextRange, TypeRef,
};
use clsview_core::{ClassIndex, ProjectionConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

// ---------------------------------------------------------------------------
// Compiled tree
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct MockMethod {
    id: ElementId,
    name: String,
    modifiers: Modifiers,
    return_type: Option<TypeRef>,
    parameters: Vec<Parameter>,
    synthetic: bool,
    valid: Arc<AtomicBool>,
}

impl CompiledMethod for MockMethod {
    fn id(&self) -> ElementId {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }
    fn return_type(&self) -> Option<&TypeRef> {
        self.return_type.as_ref()
    }
    fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
    fn is_synthetic(&self) -> bool {
        self.synthetic
    }
    fn is_valid(&self) -> bool {
        self.valid.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct MockField {
    id: ElementId,
    name: String,
    modifiers: Modifiers,
    field_type: TypeRef,
    constant: Option<ConstantValue>,
    enum_constant: bool,
    valid: Arc<AtomicBool>,
}

impl CompiledField for MockField {
    fn id(&self) -> ElementId {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }
    fn field_type(&self) -> &TypeRef {
        &self.field_type
    }
    fn constant_value(&self) -> Option<&ConstantValue> {
        self.constant.as_ref()
    }
    fn is_enum_constant(&self) -> bool {
        self.enum_constant
    }
    fn is_valid(&self) -> bool {
        self.valid.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct MockClass {
    id: ElementId,
    name: Option<String>,
    fq_name: Option<FqName>,
    kind: ClassKind,
    modifiers: Modifiers,
    super_class: Option<FqName>,
    interfaces: Vec<FqName>,
    methods: Vec<Arc<MockMethod>>,
    fields: Vec<Arc<MockField>>,
    inner: Vec<Arc<MockClass>>,
    valid: Arc<AtomicBool>,
}

impl CompiledClass for MockClass {
    fn id(&self) -> ElementId {
        self.id
    }
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    fn qualified_name(&self) -> Option<FqName> {
        self.fq_name.clone()
    }
    fn kind(&self) -> ClassKind {
        self.kind
    }
    fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }
    fn super_class(&self) -> Option<FqName> {
        self.super_class.clone()
    }
    fn interfaces(&self) -> Vec<FqName> {
        self.interfaces.clone()
    }
    fn own_methods(&self) -> Vec<Arc<dyn CompiledMethod>> {
        self.methods
            .iter()
            .map(|m| Arc::clone(m) as Arc<dyn CompiledMethod>)
            .collect()
    }
    fn own_fields(&self) -> Vec<Arc<dyn CompiledField>> {
        self.fields
            .iter()
            .map(|f| Arc::clone(f) as Arc<dyn CompiledField>)
            .collect()
    }
    fn own_inner_classes(&self) -> Vec<Arc<dyn CompiledClass>> {
        self.inner
            .iter()
            .map(|c| Arc::clone(c) as Arc<dyn CompiledClass>)
            .collect()
    }
    fn text_offset(&self) -> u32 {
        self.id.index * 10
    }
    fn is_valid(&self) -> bool {
        self.valid.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct MockArtifact {
    id: u64,
    path: PathBuf,
    classes: Vec<Arc<MockClass>>,
    valid: Arc<AtomicBool>,
}

impl MockArtifact {
    pub fn build(id: u64, path: &str, classes: Vec<ClassBuilder>) -> Arc<Self> {
        let valid = Arc::new(AtomicBool::new(true));
        let mut next = 0;
        let classes = classes
            .into_iter()
            .map(|c| c.build(id, &mut next, &valid, None))
            .collect();
        Arc::new(Self {
            id,
            path: PathBuf::from(path),
            classes,
            valid,
        })
    }

    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::SeqCst);
    }

    pub fn class(&self, index: usize) -> Arc<MockClass> {
        Arc::clone(&self.classes[index])
    }
}

impl CompiledArtifact for MockArtifact {
    fn artifact_id(&self) -> u64 {
        self.id
    }
    fn path(&self) -> &Path {
        &self.path
    }
    fn is_valid(&self) -> bool {
        self.valid.load(Ordering::SeqCst)
    }
    fn top_level_classes(&self) -> Vec<Arc<dyn CompiledClass>> {
        self.classes
            .iter()
            .map(|c| Arc::clone(c) as Arc<dyn CompiledClass>)
            .collect()
    }
}

fn type_ref(name: &str) -> TypeRef {
    match name.strip_suffix("[]") {
        Some(element) => TypeRef::array_of(type_ref(element)),
        None if name.contains('.') => TypeRef::id(name),
        None => TypeRef::raw(name),
    }
}

fn next_id(artifact: u64, next: &mut u32) -> ElementId {
    *next += 1;
    ElementId::new(artifact, *next)
}

#[derive(Clone)]
pub struct MethodSpec {
    name: String,
    params: Vec<String>,
    return_type: Option<String>,
    modifiers: Vec<Modifier>,
    synthetic: bool,
}

impl MethodSpec {
    /// A public method returning `void`.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            params: vec![],
            return_type: Some("void".to_string()),
            modifiers: vec![Modifier::Public],
            synthetic: false,
        }
    }

    pub fn constructor() -> Self {
        Self {
            return_type: None,
            ..Self::new("<init>")
        }
    }

    pub fn param(mut self, ty: &str) -> Self {
        self.params.push(ty.to_string());
        self
    }

    pub fn returns(mut self, ty: &str) -> Self {
        self.return_type = Some(ty.to_string());
        self
    }

    pub fn modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers = modifiers.to_vec();
        self
    }

    pub fn synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }
}

pub struct ClassBuilder {
    simple_name: Option<String>,
    kind: ClassKind,
    modifiers: Vec<Modifier>,
    package: FqName,
    super_class: Option<String>,
    interfaces: Vec<String>,
    methods: Vec<MethodSpec>,
    fields: Vec<(String, String, Option<ConstantValue>, bool)>,
    inner: Vec<ClassBuilder>,
}

impl ClassBuilder {
    /// A public class; `fq_name` is dotted with the package prefix.
    pub fn class(fq_name: &str) -> Self {
        let fq = FqName::new(fq_name);
        Self {
            simple_name: Some(fq.short_name().to_string()),
            kind: ClassKind::Class,
            modifiers: vec![Modifier::Public],
            package: fq.parent(),
            super_class: Some("java.lang.Object".to_string()),
            interfaces: vec![],
            methods: vec![],
            fields: vec![],
            inner: vec![],
        }
    }

    pub fn interface(fq_name: &str) -> Self {
        Self {
            kind: ClassKind::Interface,
            super_class: None,
            modifiers: vec![Modifier::Public, Modifier::Abstract],
            ..Self::class(fq_name)
        }
    }

    pub fn enumeration(fq_name: &str) -> Self {
        Self {
            kind: ClassKind::Enum,
            super_class: Some("java.lang.Enum".to_string()),
            modifiers: vec![Modifier::Public, Modifier::Final],
            ..Self::class(fq_name)
        }
    }

    /// An unnamed class nested in whatever it is added to.
    pub fn anonymous() -> Self {
        Self {
            simple_name: None,
            ..Self::class("Anonymous")
        }
    }

    pub fn kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn extends(mut self, fq_name: &str) -> Self {
        self.super_class = Some(fq_name.to_string());
        self
    }

    pub fn implements(mut self, fq_name: &str) -> Self {
        self.interfaces.push(fq_name.to_string());
        self
    }

    pub fn method(mut self, spec: MethodSpec) -> Self {
        self.methods.push(spec);
        self
    }

    pub fn field(mut self, name: &str, ty: &str) -> Self {
        self.fields.push((name.to_string(), ty.to_string(), None, false));
        self
    }

    pub fn constant(mut self, name: &str, ty: &str, value: ConstantValue) -> Self {
        self.fields
            .push((name.to_string(), ty.to_string(), Some(value), false));
        self
    }

    pub fn enum_constant(mut self, name: &str) -> Self {
        let ty = self.package.child(self.simple_name.as_deref().unwrap_or("")).to_string();
        self.fields.push((name.to_string(), ty, None, true));
        self
    }

    pub fn inner(mut self, inner: ClassBuilder) -> Self {
        self.inner.push(inner);
        self
    }

    fn build(
        self,
        artifact: u64,
        next: &mut u32,
        valid: &Arc<AtomicBool>,
        outer: Option<&FqName>,
    ) -> Arc<MockClass> {
        let id = next_id(artifact, next);
        let fq_name = match (&self.simple_name, outer) {
            (None, _) => None,
            (Some(name), Some(outer)) => Some(outer.child(name)),
            (Some(name), None) => Some(self.package.child(name)),
        };
        let methods = self
            .methods
            .into_iter()
            .map(|spec| {
                Arc::new(MockMethod {
                    id: next_id(artifact, next),
                    parameters: spec
                        .params
                        .iter()
                        .enumerate()
                        .map(|(i, ty)| Parameter {
                            name: format!("arg{i}"),
                            type_ref: type_ref(ty),
                            is_varargs: false,
                        })
                        .collect(),
                    name: spec.name,
                    modifiers: Modifiers::new(spec.modifiers),
                    return_type: spec.return_type.as_deref().map(type_ref),
                    synthetic: spec.synthetic,
                    valid: Arc::clone(valid),
                })
            })
            .collect();
        let fields = self
            .fields
            .into_iter()
            .map(|(name, ty, constant, enum_constant)| {
                let modifiers = if enum_constant {
                    Modifiers::new([Modifier::Public, Modifier::Static, Modifier::Final])
                } else {
                    Modifiers::new([Modifier::Private])
                };
                Arc::new(MockField {
                    id: next_id(artifact, next),
                    name,
                    modifiers,
                    field_type: type_ref(&ty),
                    constant,
                    enum_constant,
                    valid: Arc::clone(valid),
                })
            })
            .collect();
        let inner = self
            .inner
            .into_iter()
            .map(|c| c.build(artifact, next, valid, fq_name.as_ref()))
            .collect();
        Arc::new(MockClass {
            id,
            name: self.simple_name,
            fq_name,
            kind: self.kind,
            modifiers: Modifiers::new(self.modifiers),
            super_class: self.super_class.map(|s| FqName::new(s)),
            interfaces: self.interfaces.iter().map(FqName::new).collect(),
            methods,
            fields,
            inner,
            valid: Arc::clone(valid),
        })
    }
}

// ---------------------------------------------------------------------------
// Origin tree
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct MockOrigin {
    id: ElementId,
    name: Option<String>,
    fq_name: Option<FqName>,
    kind: OriginKind,
    children: Vec<Arc<dyn OriginDeclaration>>,
    path: PathBuf,
    valid: Arc<AtomicBool>,
}

impl OriginDeclaration for MockOrigin {
    fn origin_id(&self) -> ElementId {
        self.id
    }
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    fn fq_name(&self) -> Option<FqName> {
        self.fq_name.clone()
    }
    fn kind(&self) -> OriginKind {
        self.kind
    }
    fn declarations(&self) -> Vec<Arc<dyn OriginDeclaration>> {
        self.children.clone()
    }
    fn is_valid(&self) -> bool {
        self.valid.load(Ordering::SeqCst)
    }
    fn navigation_target(&self) -> NavigationTarget {
        NavigationTarget::at(&self.path, TextRange::new(self.id.index, self.id.index + 1))
    }
}

pub struct OriginBuilder {
    kind: OriginKind,
    name: Option<String>,
    children: Vec<OriginBuilder>,
}

impl OriginBuilder {
    pub fn new(kind: OriginKind, name: &str) -> Self {
        Self {
            kind,
            name: Some(name.to_string()),
            children: vec![],
        }
    }

    pub fn child(mut self, child: OriginBuilder) -> Self {
        self.children.push(child);
        self
    }

    fn build(
        self,
        tree: u64,
        next: &mut u32,
        scope: &FqName,
        path: &Path,
        valid: &Arc<AtomicBool>,
    ) -> Arc<dyn OriginDeclaration> {
        let id = next_id(tree, next);
        let fq_name = if self.kind.is_class_like() {
            self.name.as_deref().map(|n| scope.child(n))
        } else {
            None
        };
        let child_scope = fq_name.clone().unwrap_or_else(|| scope.clone());
        let children = self
            .children
            .into_iter()
            .map(|c| c.build(tree, next, &child_scope, path, valid))
            .collect();
        Arc::new(MockOrigin {
            id,
            name: self.name,
            fq_name,
            kind: self.kind,
            children,
            path: path.to_path_buf(),
            valid: Arc::clone(valid),
        })
    }
}

/// An origin file; dropping it drops every declaration it owns.
pub struct OriginTree {
    pub root: Arc<dyn OriginDeclaration>,
    valid: Arc<AtomicBool>,
}

impl OriginTree {
    pub fn file(tree: u64, package: &str, path: &str, declarations: Vec<OriginBuilder>) -> Self {
        let valid = Arc::new(AtomicBool::new(true));
        let mut next = 0;
        let package = FqName::new(package);
        let path = PathBuf::from(path);
        let children = declarations
            .into_iter()
            .map(|d| d.build(tree, &mut next, &package, &path, &valid))
            .collect();
        let root: Arc<dyn OriginDeclaration> = Arc::new(MockOrigin {
            id: ElementId::new(tree, 0),
            name: None,
            fq_name: None,
            kind: OriginKind::File,
            children,
            path,
            valid: Arc::clone(&valid),
        });
        Self { root, valid }
    }

    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

/// Parses the flat `modifiers type name(params) throws list { }` shape.
#[derive(Debug, Default)]
pub struct TemplateFactory {
    pub calls: AtomicUsize,
}

impl DeclarationFactory for TemplateFactory {
    fn create_method_from_text(&self, text: &str) -> ApiResult<MethodDeclaration> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let invalid = || ApiError::InvalidTemplate(text.to_string());
        let (head, rest) = text.split_once('(').ok_or_else(invalid)?;
        let (params, tail) = rest.split_once(')').ok_or_else(invalid)?;
        let mut words: Vec<&str> = head.split_whitespace().collect();
        let name = words.pop().ok_or_else(invalid)?;
        let return_type = words.pop().ok_or_else(invalid)?;
        let parameters = params
            .split(',')
            .filter(|p| !p.trim().is_empty())
            .map(|p| {
                let mut parts = p.split_whitespace();
                let ty = parts.next().ok_or_else(invalid)?;
                let name = parts.next().ok_or_else(invalid)?;
                Ok(Parameter {
                    name: name.to_string(),
                    type_ref: type_ref(ty),
                    is_varargs: false,
                })
            })
            .collect::<ApiResult<Vec<_>>>()?;
        let throws = tail
            .split('{')
            .next()
            .and_then(|t| t.trim().strip_prefix("throws"))
            .map(|list| list.split(',').map(|t| TypeRef::id(t.trim())).collect())
            .unwrap_or_default();
        Ok(MethodDeclaration {
            name: name.to_string(),
            modifiers: words.iter().filter_map(|w| Modifier::parse(w)).collect(),
            return_type: Some(type_ref(return_type)),
            parameters,
            throws,
            type_parameters: vec![],
        })
    }
}

#[derive(Debug, Default)]
pub struct FailingFactory;

impl DeclarationFactory for FailingFactory {
    fn create_method_from_text(&self, text: &str) -> ApiResult<MethodDeclaration> {
        Err(ApiError::InvalidTemplate(text.to_string()))
    }
}

/// `name$suffix` demangles to `name`.
#[derive(Debug, Default)]
pub struct SuffixDemangler;

impl Demangler for SuffixDemangler {
    fn demangle(&self, name: &str) -> Option<String> {
        name.split_once('$').map(|(prefix, _)| prefix.to_string())
    }
}

pub fn index() -> Arc<ClassIndex> {
    index_with(Arc::new(TemplateFactory::default()), ProjectionConfig::default())
}

pub fn index_with(
    factory: Arc<dyn DeclarationFactory>,
    config: ProjectionConfig,
) -> Arc<ClassIndex> {
    ClassIndex::new(factory, Arc::new(SuffixDemangler), config)
}
