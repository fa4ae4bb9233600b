//! Hierarchy queries over class projections.
//!
//! Supertypes are resolved by name through the context's [`ClassFinder`]. Names the
//! finder cannot resolve are skipped, so every query degrades to the classes that
//! are actually loaded.

use crate::class::ClassProjection;
use crate::member::{FieldProjection, LightMember, MethodProjection};
use clsview_api::{FqName, MethodSignature, Modifier, TypeRef};
use indexmap::IndexMap;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";

/// Resolves qualified names to class projections.
pub trait ClassFinder: Send + Sync {
    fn find_class(&self, fq_name: &FqName) -> Option<Arc<ClassProjection>>;
}

/// A method visible in a class together with the inherited methods it hides.
#[derive(Debug, Clone)]
pub struct HierarchicalSignature {
    pub signature: MethodSignature,
    pub method: Arc<MethodProjection>,
    /// Same-signature methods of supertypes, nearest first.
    pub super_methods: Vec<Arc<MethodProjection>>,
}

pub fn super_class(class: &ClassProjection) -> Option<Arc<ClassProjection>> {
    let name = class.compiled().super_class()?;
    class.context().class_finder()?.find_class(&name)
}

pub fn interfaces(class: &ClassProjection) -> Vec<Arc<ClassProjection>> {
    let Some(finder) = class.context().class_finder() else {
        return Vec::new();
    };
    class
        .compiled()
        .interfaces()
        .iter()
        .filter_map(|name| finder.find_class(name))
        .collect()
}

/// Direct supertypes: the superclass first, then interfaces.
pub fn supers(class: &ClassProjection) -> Vec<Arc<ClassProjection>> {
    let mut result: Vec<_> = super_class(class).into_iter().collect();
    result.extend(interfaces(class));
    result
}

pub fn extends_list_types(class: &ClassProjection) -> Vec<TypeRef> {
    let compiled = class.compiled();
    if class.is_interface() {
        return compiled
            .interfaces()
            .iter()
            .map(|name| TypeRef::id(name.as_str()))
            .collect();
    }
    compiled
        .super_class()
        .filter(|name| name.as_str() != JAVA_LANG_OBJECT)
        .map(|name| TypeRef::id(name.as_str()))
        .into_iter()
        .collect()
}

pub fn implements_list_types(class: &ClassProjection) -> Vec<TypeRef> {
    if class.is_interface() {
        return Vec::new();
    }
    class
        .compiled()
        .interfaces()
        .iter()
        .map(|name| TypeRef::id(name.as_str()))
        .collect()
}

/// Declared supertypes. A class without an extends clause reports `java.lang.Object`.
pub fn super_types(class: &ClassProjection) -> Vec<TypeRef> {
    let extends = extends_list_types(class);
    let mut result = if extends.is_empty()
        && !class.is_interface()
        && class.fq_name().as_str() != JAVA_LANG_OBJECT
    {
        vec![TypeRef::id(JAVA_LANG_OBJECT)]
    } else {
        extends
    };
    result.extend(implements_list_types(class));
    result
}

/// Every resolvable supertype, breadth-first, each reported once.
///
/// The walk stops at the configured depth and never revisits a class, so cyclic
/// hierarchies in broken classpaths terminate.
pub fn ancestors(class: &ClassProjection) -> Vec<Arc<ClassProjection>> {
    let max_depth = class.context().config().max_hierarchy_depth;
    let mut visited: HashSet<FqName> = HashSet::new();
    visited.insert(class.fq_name().clone());

    let mut queue: VecDeque<(Arc<ClassProjection>, usize)> =
        supers(class).into_iter().map(|s| (s, 1)).collect();
    let mut result = Vec::new();

    while let Some((current, depth)) = queue.pop_front() {
        if !visited.insert(current.fq_name().clone()) {
            continue;
        }
        if depth < max_depth {
            queue.extend(supers(&current).into_iter().map(|s| (s, depth + 1)));
        } else {
            tracing::trace!(class = %class.fq_name(), depth, "hierarchy depth limit reached");
        }
        result.push(current);
    }
    result
}

/// Own members of `class`, then of each ancestor when `check_bases` is set.
fn collect<T>(
    class: &ClassProjection,
    check_bases: bool,
    own: impl Fn(&ClassProjection) -> Vec<T>,
) -> Vec<T> {
    let mut result = own(class);
    if check_bases {
        for ancestor in ancestors(class) {
            result.extend(own(&ancestor));
        }
    }
    result
}

pub fn find_methods_by_name(
    class: &ClassProjection,
    name: &str,
    check_bases: bool,
) -> Vec<Arc<MethodProjection>> {
    collect(class, check_bases, |c| {
        c.methods()
            .iter()
            .filter(|m| m.name() == name)
            .cloned()
            .collect()
    })
}

pub fn find_methods_by_signature(
    class: &ClassProjection,
    pattern: &MethodSignature,
    check_bases: bool,
) -> Vec<Arc<MethodProjection>> {
    collect(class, check_bases, |c| {
        c.methods()
            .iter()
            .filter(|m| m.signature() == *pattern)
            .cloned()
            .collect()
    })
}

pub fn find_method_by_signature(
    class: &ClassProjection,
    pattern: &MethodSignature,
    check_bases: bool,
) -> Option<Arc<MethodProjection>> {
    if let Some(own) = class.methods().iter().find(|m| m.signature() == *pattern) {
        return Some(Arc::clone(own));
    }
    if !check_bases {
        return None;
    }
    ancestors(class).into_iter().find_map(|ancestor| {
        ancestor
            .methods()
            .iter()
            .find(|m| m.signature() == *pattern)
            .cloned()
    })
}

pub fn find_field_by_name(
    class: &ClassProjection,
    name: &str,
    check_bases: bool,
) -> Option<Arc<FieldProjection>> {
    if let Some(own) = class.fields().iter().find(|f| f.name() == name) {
        return Some(Arc::clone(own));
    }
    if !check_bases {
        return None;
    }
    ancestors(class)
        .into_iter()
        .find_map(|ancestor| ancestor.fields().iter().find(|f| f.name() == name).cloned())
}

pub fn find_inner_class_by_name(
    class: &ClassProjection,
    name: &str,
    check_bases: bool,
) -> Option<Arc<ClassProjection>> {
    if let Some(own) = class.inner_classes().iter().find(|c| c.name() == Some(name)) {
        return Some(Arc::clone(own));
    }
    if !check_bases {
        return None;
    }
    ancestors(class).into_iter().find_map(|ancestor| {
        ancestor
            .inner_classes()
            .iter()
            .find(|c| c.name() == Some(name))
            .cloned()
    })
}

pub fn all_methods(class: &ClassProjection) -> Vec<Arc<MethodProjection>> {
    collect(class, true, |c| c.methods().to_vec())
}

pub fn all_fields(class: &ClassProjection) -> Vec<Arc<FieldProjection>> {
    collect(class, true, |c| c.fields().to_vec())
}

pub fn all_inner_classes(class: &ClassProjection) -> Vec<Arc<ClassProjection>> {
    collect(class, true, |c| c.inner_classes().to_vec())
}

pub fn constructors(class: &ClassProjection) -> Vec<Arc<MethodProjection>> {
    class
        .methods()
        .iter()
        .filter(|m| m.is_constructor())
        .cloned()
        .collect()
}

fn is_inherited_by_subtypes(method: &MethodProjection, declared_in: &ClassProjection) -> bool {
    if method.is_constructor() || method.modifiers().contains(Modifier::Private) {
        return false;
    }
    // Static interface methods are not members of implementing classes.
    !(declared_in.is_interface() && method.modifiers().contains(Modifier::Static))
}

/// Methods callable on `class` keyed by erased signature, own declarations first.
pub fn visible_signatures(class: &ClassProjection) -> Vec<HierarchicalSignature> {
    let mut visible: IndexMap<MethodSignature, HierarchicalSignature> = IndexMap::new();

    for method in class.methods().iter().filter(|m| !m.is_constructor()) {
        let signature = method.signature();
        visible
            .entry(signature.clone())
            .or_insert_with(|| HierarchicalSignature {
                signature,
                method: Arc::clone(method),
                super_methods: Vec::new(),
            });
    }

    for ancestor in ancestors(class) {
        for method in ancestor
            .methods()
            .iter()
            .filter(|m| is_inherited_by_subtypes(m, &ancestor))
        {
            let signature = method.signature();
            match visible.get_mut(&signature) {
                Some(existing) => existing.super_methods.push(Arc::clone(method)),
                None => {
                    visible.insert(
                        signature.clone(),
                        HierarchicalSignature {
                            signature,
                            method: Arc::clone(method),
                            super_methods: Vec::new(),
                        },
                    );
                }
            }
        }
    }

    visible.into_values().collect()
}

/// Methods `method` overrides, nearest supertypes first.
pub fn super_methods(owner: &ClassProjection, method: &MethodProjection) -> Vec<Arc<MethodProjection>> {
    if method.is_constructor()
        || method.modifiers().contains(Modifier::Private)
        || method.modifiers().contains(Modifier::Static)
    {
        return Vec::new();
    }
    let signature = method.signature();
    ancestors(owner)
        .iter()
        .flat_map(|ancestor| {
            ancestor
                .methods()
                .iter()
                .filter(|m| m.signature() == signature && is_inherited_by_subtypes(m, ancestor))
                .cloned()
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Whether `class` extends or implements `base`; `deep` follows the whole hierarchy.
pub fn is_inheritor(class: &ClassProjection, base: &ClassProjection, deep: bool) -> bool {
    let target = base.fq_name();
    let directly = |c: &ClassProjection| {
        c.compiled().super_class().as_ref() == Some(target)
            || c.compiled().interfaces().contains(target)
    };
    if directly(class) {
        return true;
    }
    deep && ancestors(class).iter().any(|ancestor| directly(&**ancestor))
}
