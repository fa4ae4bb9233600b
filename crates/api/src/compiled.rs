//! The compiled-class tree: the authoritative structural source.
//!
//! Nodes are immutable for the lifetime of their artifact. Implementations report
//! validity so consumers can notice when the artifact was rebuilt underneath them.

use crate::models::{
    ClassKind, ConstantValue, ElementId, FqName, MethodSignature, Modifiers, Parameter, TypeRef,
};
use crate::scope::{DeclarationKind, ResolveState, ScopeDeclaration, ScopeProcessor};
use std::fmt::Debug;
use std::path::Path;
use std::sync::Arc;

/// One binary artifact (a class file) holding top-level classes.
pub trait CompiledArtifact: Send + Sync + Debug {
    /// Identity shared by every node of the artifact.
    fn artifact_id(&self) -> u64;

    fn path(&self) -> &Path;

    fn is_valid(&self) -> bool;

    fn top_level_classes(&self) -> Vec<Arc<dyn CompiledClass>>;
}

pub trait CompiledClass: Send + Sync + Debug {
    fn id(&self) -> ElementId;

    /// Simple name; `None` for anonymous and local classes.
    fn name(&self) -> Option<&str>;

    fn qualified_name(&self) -> Option<FqName>;

    fn kind(&self) -> ClassKind;

    fn modifiers(&self) -> &Modifiers;

    fn type_parameters(&self) -> &[String] {
        &[]
    }

    /// Direct superclass; `None` for `java.lang.Object` and interfaces.
    fn super_class(&self) -> Option<FqName>;

    fn interfaces(&self) -> Vec<FqName>;

    /// Methods declared by this class only (not inherited).
    fn own_methods(&self) -> Vec<Arc<dyn CompiledMethod>>;

    fn own_fields(&self) -> Vec<Arc<dyn CompiledField>>;

    fn own_inner_classes(&self) -> Vec<Arc<dyn CompiledClass>>;

    fn is_deprecated(&self) -> bool {
        false
    }

    fn doc_comment(&self) -> Option<&str> {
        None
    }

    fn text_offset(&self) -> u32 {
        0
    }

    fn is_valid(&self) -> bool;

    /// Feed own declarations to `processor`, honouring its hints.
    ///
    /// Returns `false` as soon as the processor asks to stop.
    fn process_declarations(
        &self,
        processor: &mut dyn ScopeProcessor,
        state: &ResolveState,
        _last_parent: Option<ElementId>,
        _place: ElementId,
    ) -> bool {
        let name_hint = processor.name_hint(state).map(str::to_owned);
        let wanted = |name: Option<&str>| match (&name_hint, name) {
            (None, _) => true,
            (Some(hint), Some(name)) => hint == name,
            (Some(_), None) => false,
        };

        if processor.should_process(DeclarationKind::Field) {
            for field in self.own_fields() {
                if wanted(Some(field.name()))
                    && !processor.execute(ScopeDeclaration::Field(field), state)
                {
                    return false;
                }
            }
        }

        if processor.should_process(DeclarationKind::Method) {
            for method in self.own_methods() {
                if wanted(Some(method.name()))
                    && !processor.execute(ScopeDeclaration::Method(method), state)
                {
                    return false;
                }
            }
        }

        if processor.should_process(DeclarationKind::Class) {
            for inner in self.own_inner_classes() {
                if wanted(inner.name()) && !processor.execute(ScopeDeclaration::Class(inner), state)
                {
                    return false;
                }
            }
        }

        true
    }
}

pub trait CompiledMethod: Send + Sync + Debug {
    fn id(&self) -> ElementId;

    /// JVM name; constructors are `<init>`.
    fn name(&self) -> &str;

    fn modifiers(&self) -> &Modifiers;

    /// `None` for constructors.
    fn return_type(&self) -> Option<&TypeRef>;

    fn parameters(&self) -> &[Parameter];

    fn throws(&self) -> &[TypeRef] {
        &[]
    }

    fn type_parameters(&self) -> &[String] {
        &[]
    }

    fn is_constructor(&self) -> bool {
        self.name() == "<init>"
    }

    fn is_varargs(&self) -> bool {
        self.parameters().last().is_some_and(|p| p.is_varargs)
    }

    /// Compiler-generated (synthetic or bridge) method.
    fn is_synthetic(&self) -> bool {
        false
    }

    fn is_deprecated(&self) -> bool {
        false
    }

    fn doc_comment(&self) -> Option<&str> {
        None
    }

    /// Default value of an annotation method.
    fn default_value(&self) -> Option<&ConstantValue> {
        None
    }

    fn descriptor(&self) -> Option<&str> {
        None
    }

    fn signature(&self) -> MethodSignature {
        MethodSignature::new(self.name(), self.parameters())
    }

    fn text_offset(&self) -> u32 {
        0
    }

    fn is_valid(&self) -> bool;
}

pub trait CompiledField: Send + Sync + Debug {
    fn id(&self) -> ElementId;

    fn name(&self) -> &str;

    fn modifiers(&self) -> &Modifiers;

    fn field_type(&self) -> &TypeRef;

    fn constant_value(&self) -> Option<&ConstantValue> {
        None
    }

    fn has_initializer(&self) -> bool {
        self.constant_value().is_some()
    }

    fn is_enum_constant(&self) -> bool {
        false
    }

    fn is_synthetic(&self) -> bool {
        false
    }

    fn is_deprecated(&self) -> bool {
        false
    }

    fn doc_comment(&self) -> Option<&str> {
        None
    }

    fn text_offset(&self) -> u32 {
        0
    }

    fn is_valid(&self) -> bool;
}
