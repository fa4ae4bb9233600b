//! Association between compiled members and their origin declarations.
//!
//! A descriptor only points at the origin node; the origin tree's owner keeps it
//! alive. Once that owner drops the tree, the descriptor reports no origin.

use clsview_api::{CompiledField, CompiledMethod, Demangler, OriginDeclaration, OriginKind};
use std::fmt;
use std::sync::{Arc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method,
    Field,
}

#[derive(Clone)]
pub struct OriginDescriptor {
    kind: MemberKind,
    original: Option<Weak<dyn OriginDeclaration>>,
}

impl OriginDescriptor {
    pub fn none(kind: MemberKind) -> Self {
        Self {
            kind,
            original: None,
        }
    }

    pub fn new(kind: MemberKind, original: Option<&Arc<dyn OriginDeclaration>>) -> Self {
        Self {
            kind,
            original: original.map(Arc::downgrade),
        }
    }

    /// Find the origin of a compiled method among `siblings`.
    ///
    /// Same-named functions win, then functions named after the demangled JVM name;
    /// constructors match constructor declarations. When `match_accessors` is set,
    /// accessor names fall back to the property they access.
    pub fn for_method(
        method: &dyn CompiledMethod,
        siblings: &[Arc<dyn OriginDeclaration>],
        demangler: &dyn Demangler,
        match_accessors: bool,
    ) -> Self {
        let found = if method.is_constructor() {
            first_of_kind(siblings, |k| k == OriginKind::Constructor, None)
        } else {
            let demangled = demangler.demangle(method.name());
            std::iter::once(method.name())
                .chain(demangled.as_deref())
                .find_map(|name| method_origin_by_name(siblings, name, match_accessors))
        };
        tracing::trace!(
            method = method.name(),
            matched = found.is_some(),
            "method origin lookup"
        );
        Self::new(MemberKind::Method, found.as_ref())
    }

    /// Find the origin of a compiled field among `siblings`.
    pub fn for_field(field: &dyn CompiledField, siblings: &[Arc<dyn OriginDeclaration>]) -> Self {
        let found = first_of_kind(
            siblings,
            |k| matches!(k, OriginKind::Property | OriginKind::EnumEntry | OriginKind::Object),
            Some(field.name()),
        );
        Self::new(MemberKind::Field, found.as_ref())
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// The origin declaration, if one was matched and is still alive.
    pub fn original_element(&self) -> Option<Arc<dyn OriginDeclaration>> {
        self.original.as_ref().and_then(Weak::upgrade)
    }
}

impl fmt::Debug for OriginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OriginDescriptor")
            .field("kind", &self.kind)
            .field(
                "original",
                &self.original_element().map(|o| o.origin_id()),
            )
            .finish()
    }
}

/// First class-like declaration named `name`.
pub fn find_class_origin(
    siblings: &[Arc<dyn OriginDeclaration>],
    name: &str,
) -> Option<Arc<dyn OriginDeclaration>> {
    first_of_kind(siblings, OriginKind::is_class_like, Some(name))
}

fn method_origin_by_name(
    siblings: &[Arc<dyn OriginDeclaration>],
    name: &str,
    match_accessors: bool,
) -> Option<Arc<dyn OriginDeclaration>> {
    first_of_kind(siblings, |k| k == OriginKind::Function, Some(name)).or_else(|| {
        if !match_accessors {
            return None;
        }
        let property = property_name_by_accessor(name)?;
        first_of_kind(siblings, |k| k == OriginKind::Property, Some(&property))
    })
}

fn first_of_kind(
    siblings: &[Arc<dyn OriginDeclaration>],
    kind_matches: impl Fn(OriginKind) -> bool,
    name: Option<&str>,
) -> Option<Arc<dyn OriginDeclaration>> {
    siblings
        .iter()
        .find(|decl| kind_matches(decl.kind()) && name.is_none_or(|n| decl.name() == Some(n)))
        .cloned()
}

/// Property name accessed by a conventional accessor name.
///
/// `getFoo` and `setFoo` access `foo`; `isFoo` accesses `isFoo` (boolean properties
/// keep their prefix). Returns `None` for names that are not accessors.
pub fn property_name_by_accessor(name: &str) -> Option<String> {
    if starts_with_prefix_word(name, "is") {
        return Some(name.to_string());
    }
    ["get", "set"]
        .iter()
        .find(|prefix| starts_with_prefix_word(name, prefix))
        .map(|prefix| decapitalize(&name[prefix.len()..]))
}

fn starts_with_prefix_word(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| !c.is_lowercase())
}

/// `URL` -> `url`, `URLText` -> `urlText`, `Foo` -> `foo`.
fn decapitalize(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let upper_run = chars.iter().take_while(|c| c.is_uppercase()).count();
    let lower_until = match upper_run {
        0 => 0,
        n if n == chars.len() => n,
        1 => 1,
        n => n - 1,
    };
    chars
        .iter()
        .enumerate()
        .map(|(i, c)| if i < lower_until { c.to_ascii_lowercase() } else { *c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessor_names() {
        assert_eq!(property_name_by_accessor("getFoo").as_deref(), Some("foo"));
        assert_eq!(property_name_by_accessor("setFooBar").as_deref(), Some("fooBar"));
        assert_eq!(property_name_by_accessor("isOpen").as_deref(), Some("isOpen"));
        assert_eq!(property_name_by_accessor("getURL").as_deref(), Some("url"));
        assert_eq!(property_name_by_accessor("getURLText").as_deref(), Some("urlText"));
        assert_eq!(property_name_by_accessor("get"), None);
        assert_eq!(property_name_by_accessor("getter"), None);
        assert_eq!(property_name_by_accessor("island"), None);
        assert_eq!(property_name_by_accessor("compute"), None);
    }

    #[test]
    fn empty_descriptor_has_no_origin() {
        let descriptor = OriginDescriptor::none(MemberKind::Field);
        assert!(descriptor.original_element().is_none());
        assert_eq!(descriptor.kind(), MemberKind::Field);
    }
}
