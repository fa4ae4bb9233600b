//! The compiled-class tree over parsed class files.
//!
//! One [`BinaryClassFile`] per top-level class; nested classes (`Outer$Inner`) hang off
//! their outer class. Every node of one archive shares an [`ArchiveGeneration`] so a
//! rebuild can invalidate all of them at once.

use crate::reader::{ClassDescription, FieldDescription, MethodDescription};
use clsview_api::{
    ClassKind, CompiledArtifact, CompiledClass, CompiledField, CompiledMethod, ConstantValue,
    ElementId, FqName, Modifiers, Parameter, TypeRef, models::util::is_anonymous_segment,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use xxhash_rust::xxh3::xxh3_64;

/// Validity shared by everything loaded from one archive.
#[derive(Debug, Clone)]
pub struct ArchiveGeneration {
    valid: Arc<AtomicBool>,
}

impl ArchiveGeneration {
    pub fn new() -> Self {
        Self {
            valid: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::Release);
    }
}

impl Default for ArchiveGeneration {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct BinaryMethod {
    id: ElementId,
    description: MethodDescription,
    generation: ArchiveGeneration,
}

impl CompiledMethod for BinaryMethod {
    fn id(&self) -> ElementId {
        self.id
    }

    fn name(&self) -> &str {
        &self.description.name
    }

    fn modifiers(&self) -> &Modifiers {
        &self.description.modifiers
    }

    fn return_type(&self) -> Option<&TypeRef> {
        self.description.return_type.as_ref()
    }

    fn parameters(&self) -> &[Parameter] {
        &self.description.parameters
    }

    fn is_synthetic(&self) -> bool {
        self.description.synthetic
    }

    fn is_deprecated(&self) -> bool {
        self.description.deprecated
    }

    fn descriptor(&self) -> Option<&str> {
        Some(&self.description.descriptor)
    }

    fn is_valid(&self) -> bool {
        self.generation.is_valid()
    }
}

#[derive(Debug)]
pub struct BinaryField {
    id: ElementId,
    description: FieldDescription,
    generation: ArchiveGeneration,
}

impl CompiledField for BinaryField {
    fn id(&self) -> ElementId {
        self.id
    }

    fn name(&self) -> &str {
        &self.description.name
    }

    fn modifiers(&self) -> &Modifiers {
        &self.description.modifiers
    }

    fn field_type(&self) -> &TypeRef {
        &self.description.field_type
    }

    fn constant_value(&self) -> Option<&ConstantValue> {
        self.description.constant.as_ref()
    }

    fn is_enum_constant(&self) -> bool {
        self.description.enum_constant
    }

    fn is_synthetic(&self) -> bool {
        self.description.synthetic
    }

    fn is_deprecated(&self) -> bool {
        self.description.deprecated
    }

    fn is_valid(&self) -> bool {
        self.generation.is_valid()
    }
}

#[derive(Debug)]
pub struct BinaryClass {
    id: ElementId,
    name: Option<String>,
    qualified_name: Option<FqName>,
    kind: ClassKind,
    modifiers: Modifiers,
    super_class: Option<FqName>,
    interfaces: Vec<FqName>,
    methods: Vec<Arc<BinaryMethod>>,
    fields: Vec<Arc<BinaryField>>,
    inner_classes: Vec<Arc<BinaryClass>>,
    deprecated: bool,
    generation: ArchiveGeneration,
}

impl CompiledClass for BinaryClass {
    fn id(&self) -> ElementId {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn qualified_name(&self) -> Option<FqName> {
        self.qualified_name.clone()
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
        self.inner_classes
            .iter()
            .map(|c| Arc::clone(c) as Arc<dyn CompiledClass>)
            .collect()
    }

    fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    fn is_valid(&self) -> bool {
        self.generation.is_valid()
    }
}

/// One top-level class file together with its nested classes.
#[derive(Debug)]
pub struct BinaryClassFile {
    artifact_id: u64,
    path: PathBuf,
    internal_name: String,
    class: Arc<BinaryClass>,
    generation: ArchiveGeneration,
}

impl BinaryClassFile {
    pub fn internal_name(&self) -> &str {
        &self.internal_name
    }

    pub fn class(&self) -> &Arc<BinaryClass> {
        &self.class
    }

    pub fn generation(&self) -> &ArchiveGeneration {
        &self.generation
    }
}

impl CompiledArtifact for BinaryClassFile {
    fn artifact_id(&self) -> u64 {
        self.artifact_id
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn is_valid(&self) -> bool {
        self.generation.is_valid()
    }

    fn top_level_classes(&self) -> Vec<Arc<dyn CompiledClass>> {
        vec![Arc::clone(&self.class) as Arc<dyn CompiledClass>]
    }
}

/// Artifact identity of the class file `internal_name` inside `archive`.
pub fn artifact_id(archive: &Path, internal_name: &str) -> u64 {
    xxh3_64(format!("{}!/{internal_name}.class", archive.display()).as_bytes())
}

/// Group class descriptions into class files, nesting `Outer$Inner` under `Outer`.
///
/// A nested description whose outer class is missing becomes a top-level file.
pub fn assemble(
    archive: &Path,
    descriptions: Vec<ClassDescription>,
    generation: &ArchiveGeneration,
) -> Vec<Arc<BinaryClassFile>> {
    let mut by_name: BTreeMap<String, ClassDescription> = descriptions
        .into_iter()
        .map(|d| (d.internal_name.clone(), d))
        .collect();

    let mut children: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut top_level = Vec::new();
    for name in by_name.keys() {
        match outer_name(name) {
            Some(outer) if by_name.contains_key(outer) => {
                children.entry(outer.to_string()).or_default().push(name.clone());
            }
            Some(outer) => {
                tracing::debug!(class = %name, outer, "nested class without its outer class");
                top_level.push(name.clone());
            }
            None => top_level.push(name.clone()),
        }
    }

    top_level
        .into_iter()
        .filter_map(|name| {
            let artifact_id = artifact_id(archive, &name);
            let mut next = 0;
            let class = build_class(
                &name,
                &mut by_name,
                &children,
                artifact_id,
                &mut next,
                generation,
                true,
            )?;
            Some(Arc::new(BinaryClassFile {
                artifact_id,
                path: archive.join(format!("{name}.class")),
                internal_name: name,
                class,
                generation: generation.clone(),
            }))
        })
        .collect()
}

fn outer_name(internal_name: &str) -> Option<&str> {
    let simple_start = internal_name.rfind('/').map_or(0, |idx| idx + 1);
    internal_name[simple_start..]
        .rfind('$')
        .map(|idx| &internal_name[..simple_start + idx])
}

/// Qualified name, unless some segment of the nesting chain is anonymous or local.
fn qualified_name(internal_name: &str) -> Option<FqName> {
    let simple_start = internal_name.rfind('/').map_or(0, |idx| idx + 1);
    let nested = &internal_name[simple_start..];
    if nested.split('$').skip(1).any(is_anonymous_segment) {
        return None;
    }
    Some(FqName::from_internal_name(internal_name))
}

fn simple_name(internal_name: &str, top_level: bool) -> Option<String> {
    let simple_start = internal_name.rfind('/').map_or(0, |idx| idx + 1);
    let simple = &internal_name[simple_start..];
    if top_level {
        return Some(simple.to_string());
    }
    let segment = simple.rsplit('$').next()?;
    (!is_anonymous_segment(segment)).then(|| segment.to_string())
}

fn build_class(
    name: &str,
    by_name: &mut BTreeMap<String, ClassDescription>,
    children: &BTreeMap<String, Vec<String>>,
    artifact: u64,
    next: &mut u32,
    generation: &ArchiveGeneration,
    top_level: bool,
) -> Option<Arc<BinaryClass>> {
    let description = by_name.remove(name)?;
    let mut next_id = || {
        *next += 1;
        ElementId::new(artifact, *next)
    };
    let id = next_id();

    let methods = description
        .methods
        .into_iter()
        .map(|m| {
            Arc::new(BinaryMethod {
                id: next_id(),
                description: m,
                generation: generation.clone(),
            })
        })
        .collect();
    let fields = description
        .fields
        .into_iter()
        .map(|f| {
            Arc::new(BinaryField {
                id: next_id(),
                description: f,
                generation: generation.clone(),
            })
        })
        .collect();

    let inner_classes = children
        .get(name)
        .map(|names| {
            names
                .iter()
                .filter_map(|child| {
                    build_class(child, by_name, children, artifact, next, generation, false)
                })
                .collect()
        })
        .unwrap_or_default();

    Some(Arc::new(BinaryClass {
        id,
        name: simple_name(name, top_level),
        qualified_name: qualified_name(name),
        kind: description.kind,
        modifiers: description.modifiers,
        super_class: description
            .super_class
            .as_deref()
            .map(FqName::from_internal_name),
        interfaces: description
            .interfaces
            .iter()
            .map(|i| FqName::from_internal_name(i))
            .collect(),
        methods,
        fields,
        inner_classes,
        deprecated: description.deprecated,
        generation: generation.clone(),
    }))
}
