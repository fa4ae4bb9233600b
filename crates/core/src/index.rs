//! Name-keyed registry of projected files.

use crate::class::ClassProjection;
use crate::config::ProjectionConfig;
use crate::context::ProjectionContext;
use crate::file::ProjectedFile;
use crate::hierarchy::ClassFinder;
use clsview_api::{CompiledArtifact, DeclarationFactory, Demangler, FqName, OriginDeclaration};
use dashmap::DashMap;
use std::sync::{Arc, Weak};

/// Projected files keyed by artifact id, with a lookup cache by qualified name.
///
/// The index is the [`ClassFinder`] of its own projection context, so supertypes
/// of any projection it hands out resolve against the other files it holds.
pub struct ClassIndex {
    context: Arc<ProjectionContext>,
    files: DashMap<u64, Arc<ProjectedFile>>,
    classes: DashMap<FqName, Arc<ClassProjection>>,
}

impl ClassIndex {
    pub fn new(
        declaration_factory: Arc<dyn DeclarationFactory>,
        demangler: Arc<dyn Demangler>,
        config: ProjectionConfig,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this: &Weak<ClassIndex>| {
            let finder: Weak<dyn ClassFinder> = this.clone();
            let context = ProjectionContext::new(declaration_factory, demangler, config)
                .with_class_finder(finder);
            Self {
                context: Arc::new(context),
                files: DashMap::new(),
                classes: DashMap::new(),
            }
        })
    }

    pub fn context(&self) -> &Arc<ProjectionContext> {
        &self.context
    }

    /// Register an artifact, replacing any earlier file with the same artifact id.
    pub fn add_file(
        &self,
        artifact: Arc<dyn CompiledArtifact>,
        origin: Option<Arc<dyn OriginDeclaration>>,
    ) -> Arc<ProjectedFile> {
        let artifact_id = artifact.artifact_id();
        let file = Arc::new(ProjectedFile::new(artifact, origin, Arc::clone(&self.context)));
        if self.files.insert(artifact_id, Arc::clone(&file)).is_some() {
            self.evict(artifact_id);
            tracing::debug!(artifact_id, "replaced projected file");
        }
        file
    }

    pub fn remove_file(&self, artifact_id: u64) -> Option<Arc<ProjectedFile>> {
        let removed = self.files.remove(&artifact_id).map(|(_, file)| file);
        self.evict(artifact_id);
        removed
    }

    fn evict(&self, artifact_id: u64) {
        self.classes
            .retain(|_, class| class.artifact().artifact_id() != artifact_id);
    }

    pub fn files(&self) -> Vec<Arc<ProjectedFile>> {
        self.files.iter().map(|entry| Arc::clone(entry.value())).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ClassFinder for ClassIndex {
    fn find_class(&self, fq_name: &FqName) -> Option<Arc<ClassProjection>> {
        if let Some(hit) = self.classes.get(fq_name) {
            if hit.is_valid() {
                return Some(Arc::clone(hit.value()));
            }
        }

        let found = self
            .files
            .iter()
            .filter(|entry| entry.value().is_valid())
            .find_map(|entry| entry.value().find_class(fq_name))?;
        self.classes.insert(fq_name.clone(), Arc::clone(&found));
        Some(found)
    }
}

impl std::fmt::Debug for ClassIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassIndex")
            .field("files", &self.files.len())
            .field("cached_classes", &self.classes.len())
            .finish()
    }
}
