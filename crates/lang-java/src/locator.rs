//! Source attachments for binary archives.

use clsview_core::{ClassViewError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

pub struct SourceLocator;

impl SourceLocator {
    /// `lib/foo-1.0.jar` -> `lib/foo-1.0-sources.jar`, when that file exists.
    pub fn sources_jar_for(binary: &Path) -> Option<PathBuf> {
        let file_name = binary.file_name()?.to_string_lossy();
        if !file_name.ends_with(".jar") || file_name.ends_with("-sources.jar") {
            return None;
        }
        let mut source_name = file_name.to_string();
        source_name.truncate(source_name.len() - 4);
        source_name.push_str("-sources.jar");
        let source_path = binary.with_file_name(source_name);
        source_path.exists().then_some(source_path)
    }

    /// Every `.java` entry of a sources jar, keyed by its path inside the jar.
    pub fn read_sources(sources_jar: &Path) -> Result<SourceSet> {
        let file = File::open(sources_jar)?;
        let mut archive =
            ZipArchive::new(file).map_err(|e| ClassViewError::Archive(e.to_string()))?;
        let mut files = HashMap::new();
        for i in 0..archive.len() {
            let mut entry = archive
                .by_index(i)
                .map_err(|e| ClassViewError::Archive(e.to_string()))?;
            if !entry.name().ends_with(".java") {
                continue;
            }
            let name = entry.name().to_string();
            let mut text = String::new();
            match entry.read_to_string(&mut text) {
                Ok(_) => {
                    files.insert(name, text);
                }
                Err(err) => tracing::warn!(entry = %name, error = %err, "skipping unreadable source"),
            }
        }
        tracing::debug!(jar = %sources_jar.display(), files = files.len(), "read source attachment");
        Ok(SourceSet {
            jar: sources_jar.to_path_buf(),
            files,
        })
    }
}

/// Source texts of one attachment.
#[derive(Debug, Default)]
pub struct SourceSet {
    jar: PathBuf,
    files: HashMap<String, String>,
}

impl SourceSet {
    /// The compilation unit that declares the top-level class `internal_name`.
    pub fn source_for(&self, internal_name: &str) -> Option<(PathBuf, &str)> {
        let top_level = internal_name.split('$').next().unwrap_or(internal_name);
        let entry = format!("{top_level}.java");
        let text = self.files.get(&entry)?;
        Some((self.jar.join(&entry), text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
