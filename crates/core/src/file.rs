use crate::class::ClassProjection;
use crate::context::ProjectionContext;
use crate::memo::Memo;
use crate::origin::find_class_origin;
use clsview_api::{CompiledArtifact, FqName, NavigationTarget, OriginDeclaration};
use std::fmt;
use std::sync::Arc;

/// A compiled artifact paired with its origin file, if one was found.
pub struct ProjectedFile {
    artifact: Arc<dyn CompiledArtifact>,
    origin: Option<Arc<dyn OriginDeclaration>>,
    context: Arc<ProjectionContext>,
    classes: Memo<Vec<Arc<ClassProjection>>>,
}

impl ProjectedFile {
    pub fn new(
        artifact: Arc<dyn CompiledArtifact>,
        origin: Option<Arc<dyn OriginDeclaration>>,
        context: Arc<ProjectionContext>,
    ) -> Self {
        Self {
            artifact,
            origin,
            context,
            classes: Memo::new(),
        }
    }

    pub fn artifact(&self) -> &Arc<dyn CompiledArtifact> {
        &self.artifact
    }

    pub fn origin(&self) -> Option<&Arc<dyn OriginDeclaration>> {
        self.origin.as_ref()
    }

    /// Top-level class projections, matched by simple name against the origin file.
    pub fn classes(&self) -> &[Arc<ClassProjection>] {
        self.classes.get_or_compute(|| {
            let siblings = self
                .origin
                .as_ref()
                .map(|o| o.declarations())
                .unwrap_or_default();
            self.artifact
                .top_level_classes()
                .into_iter()
                .map(|compiled| {
                    let origin = compiled
                        .name()
                        .and_then(|name| find_class_origin(&siblings, name));
                    ClassProjection::new_top_level(
                        compiled,
                        Arc::clone(&self.artifact),
                        origin,
                        Arc::clone(&self.context),
                    )
                })
                .collect()
        })
    }

    /// Every class in the file, outer classes before their inner classes.
    pub fn all_classes(&self) -> Vec<Arc<ClassProjection>> {
        let mut result = Vec::new();
        let mut stack: Vec<Arc<ClassProjection>> = self.classes().iter().rev().cloned().collect();
        while let Some(class) = stack.pop() {
            stack.extend(class.inner_classes().iter().rev().cloned());
            result.push(class);
        }
        result
    }

    /// Class named `fq_name`, by origin or compiled name.
    ///
    /// Inner classes are only materialized along enclosing names of `fq_name`.
    pub fn find_class(&self, fq_name: &FqName) -> Option<Arc<ClassProjection>> {
        let mut stack: Vec<Arc<ClassProjection>> = self.classes().iter().rev().cloned().collect();
        while let Some(class) = stack.pop() {
            let names = [Some(class.fq_name().clone()), class.qualified_name()];
            let mut names = names.iter().flatten();
            if names.clone().any(|name| name == fq_name) {
                return Some(class);
            }
            if names.any(|name| name.encloses(fq_name)) {
                stack.extend(class.inner_classes().iter().rev().cloned());
            }
        }
        None
    }

    pub fn navigation_element(&self) -> NavigationTarget {
        match &self.origin {
            Some(origin) => origin.navigation_target(),
            None => NavigationTarget::file(self.artifact.path()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.artifact.is_valid() && self.origin.as_ref().is_none_or(|o| o.is_valid())
    }
}

impl fmt::Debug for ProjectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectedFile")
            .field("path", &self.artifact.path())
            .field("has_origin", &self.origin.is_some())
            .field("classes", &self.classes.is_computed())
            .finish()
    }
}
