//! Java binding for the projection layer: class archives become compiled trees,
//! source attachments become origin trees.

pub mod archive;
pub mod binary;
pub mod converter;
pub mod demangle;
pub mod factory;
pub mod locator;
pub mod reader;
pub mod source;
mod syntax;

use crate::archive::ClassArchive;
use crate::binary::{ArchiveGeneration, BinaryClassFile};
use crate::demangle::InternalNameDemangler;
use crate::factory::JavaDeclarationFactory;
use crate::locator::{SourceLocator, SourceSet};
use crate::reader::ClassFileReader;
use crate::source::SourceOriginFile;
use clsview_api::{CompiledArtifact, FqName, OriginDeclaration};
use clsview_core::{ClassFinder, ClassIndex, ClassProjection, ProjectedFile, ProjectionConfig, Result};
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything loaded from one archive.
struct LoadedArchive {
    generation: ArchiveGeneration,
    artifact_ids: Vec<u64>,
    origins: Vec<Arc<SourceOriginFile>>,
}

/// Class projections over Java archives.
pub struct JavaProjections {
    index: Arc<ClassIndex>,
    archives: DashMap<PathBuf, LoadedArchive>,
}

impl JavaProjections {
    pub fn new(config: ProjectionConfig) -> Self {
        let index = ClassIndex::new(
            Arc::new(JavaDeclarationFactory::new()),
            Arc::new(InternalNameDemangler),
            config,
        );
        Self {
            index,
            archives: DashMap::new(),
        }
    }

    pub fn index(&self) -> &Arc<ClassIndex> {
        &self.index
    }

    /// Load every class of `archive`. Origins come from `sources`, or from a sibling
    /// `-sources.jar` when none is given. Reopening an archive replaces its classes.
    pub fn open_archive(
        &self,
        archive: &Path,
        sources: Option<&Path>,
    ) -> Result<Vec<Arc<ProjectedFile>>> {
        self.close_archive(archive);

        let container = ClassArchive::open(archive)?;
        let mut descriptions = Vec::new();
        for (name, bytes) in container.read_all()? {
            match ClassFileReader::read(&bytes) {
                Ok(description) => descriptions.push(description),
                Err(err) => tracing::warn!(class = %name, error = %err, "skipping unreadable class"),
            }
        }

        let generation = ArchiveGeneration::new();
        let class_files = binary::assemble(archive, descriptions, &generation);
        let source_set = self.source_set(archive, sources);

        let mut files = Vec::with_capacity(class_files.len());
        let mut artifact_ids = Vec::with_capacity(class_files.len());
        let mut origins = Vec::new();
        for class_file in class_files {
            let origin = source_set
                .as_ref()
                .and_then(|set| parse_origin(set, &class_file))
                .map(Arc::new);
            let origin_root: Option<Arc<dyn OriginDeclaration>> =
                origin.as_ref().map(|o| o.root());
            if let Some(origin) = origin {
                origins.push(origin);
            }
            artifact_ids.push(class_file.artifact_id());
            let artifact: Arc<dyn CompiledArtifact> = class_file;
            files.push(self.index.add_file(artifact, origin_root));
        }

        tracing::info!(
            archive = %archive.display(),
            classes = files.len(),
            origins = origins.len(),
            "opened archive"
        );
        self.archives.insert(
            archive.to_path_buf(),
            LoadedArchive {
                generation,
                artifact_ids,
                origins,
            },
        );
        Ok(files)
    }

    /// Drop an archive's classes; projections already handed out become invalid.
    pub fn close_archive(&self, archive: &Path) -> bool {
        let Some((_, loaded)) = self.archives.remove(archive) else {
            return false;
        };
        loaded.generation.invalidate();
        for origin in &loaded.origins {
            origin.invalidate();
        }
        for id in &loaded.artifact_ids {
            self.index.remove_file(*id);
        }
        tracing::info!(archive = %archive.display(), "closed archive");
        true
    }

    pub fn find_class(&self, fq_name: &FqName) -> Option<Arc<ClassProjection>> {
        self.index.find_class(fq_name)
    }

    fn source_set(&self, archive: &Path, sources: Option<&Path>) -> Option<SourceSet> {
        let jar = match sources {
            Some(path) => path.to_path_buf(),
            None => SourceLocator::sources_jar_for(archive)?,
        };
        match SourceLocator::read_sources(&jar) {
            Ok(set) => Some(set),
            Err(err) => {
                tracing::warn!(jar = %jar.display(), error = %err, "ignoring source attachment");
                None
            }
        }
    }
}

impl Default for JavaProjections {
    fn default() -> Self {
        Self::new(ProjectionConfig::default())
    }
}

fn parse_origin(set: &SourceSet, class_file: &BinaryClassFile) -> Option<SourceOriginFile> {
    let (path, text) = set.source_for(class_file.internal_name())?;
    match SourceOriginFile::parse(path, text) {
        Ok(origin) => Some(origin),
        Err(err) => {
            tracing::warn!(class = class_file.internal_name(), error = %err, "ignoring unparsable source");
            None
        }
    }
}
