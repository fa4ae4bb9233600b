//! Class containers: jar/jmod zip archives and jimage `modules` files.

use clsview_core::{ClassViewError, Result};
use ristretto_jimage::Image;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    JImage,
}

/// An opened class container. Entries are addressed by JVM internal name
/// (`com/example/Outer$Inner`).
#[derive(Debug, Clone)]
pub struct ClassArchive {
    path: PathBuf,
    format: ArchiveFormat,
}

impl ClassArchive {
    /// Detect the container format from its magic bytes.
    pub fn open(path: &Path) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut magic = [0u8; 4];
        file.read_exact(&mut magic)?;

        let format = match &magic {
            // PK\x03\x04, PK\x05\x06 (empty), PK\x07\x08 (spanned)
            [0x50, 0x4B, _, _] => ArchiveFormat::Zip,
            // CAFEDADA in either byte order
            [0xCA, 0xFE, 0xDA, 0xDA] | [0xDA, 0xDA, 0xFE, 0xCA] => ArchiveFormat::JImage,
            _ => {
                return Err(ClassViewError::Archive(format!(
                    "{} is neither a zip archive nor a jimage",
                    path.display()
                )));
            }
        };
        tracing::debug!(path = %path.display(), ?format, "opened class archive");
        Ok(Self {
            path: path.to_path_buf(),
            format,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ArchiveFormat {
        self.format
    }

    fn zip(&self) -> Result<ZipArchive<File>> {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(0))?;
        ZipArchive::new(file).map_err(|e| ClassViewError::Archive(e.to_string()))
    }

    fn image(&self) -> Result<Image> {
        Image::from_file(&self.path).map_err(|e| ClassViewError::Archive(format!("{e:?}")))
    }

    /// Internal names of every class entry, sorted.
    pub fn class_names(&self) -> Result<Vec<String>> {
        let mut names = BTreeSet::new();
        match self.format {
            ArchiveFormat::Zip => {
                let mut archive = self.zip()?;
                for i in 0..archive.len() {
                    let entry = archive
                        .by_index(i)
                        .map_err(|e| ClassViewError::Archive(e.to_string()))?;
                    if let Some(name) = class_entry_name(entry.name()) {
                        names.insert(name.to_string());
                    }
                }
            }
            ArchiveFormat::JImage => {
                let image = self.image()?;
                for resource in image.iter().flatten() {
                    let resource_name = resource.name().to_string();
                    if let Some(name) = class_entry_name(strip_module(&resource_name)) {
                        names.insert(name.to_string());
                    }
                }
            }
        }
        Ok(names.into_iter().collect())
    }

    /// Bytes of the class file for `internal_name`.
    pub fn read_class(&self, internal_name: &str) -> Result<Vec<u8>> {
        let entry_name = format!("{internal_name}.class");
        match self.format {
            ArchiveFormat::Zip => {
                let mut archive = self.zip()?;
                let mut entry = archive
                    .by_name(&entry_name)
                    .map_err(|e| ClassViewError::Archive(format!("{entry_name}: {e}")))?;
                let mut bytes = Vec::new();
                entry.read_to_end(&mut bytes)?;
                Ok(bytes)
            }
            ArchiveFormat::JImage => {
                let image = self.image()?;
                let suffix = format!("/{entry_name}");
                for resource in image.iter().flatten() {
                    let name = resource.name().to_string();
                    if name == entry_name || name.ends_with(&suffix) {
                        return Ok(resource.data().to_vec());
                    }
                }
                Err(ClassViewError::Archive(format!(
                    "{entry_name} not found in {}",
                    self.path.display()
                )))
            }
        }
    }

    /// Read every class entry, skipping ones that cannot be read.
    pub fn read_all(&self) -> Result<Vec<(String, Vec<u8>)>> {
        match self.format {
            ArchiveFormat::Zip => {
                let mut archive = self.zip()?;
                let mut classes = Vec::new();
                for i in 0..archive.len() {
                    let mut entry = archive
                        .by_index(i)
                        .map_err(|e| ClassViewError::Archive(e.to_string()))?;
                    let Some(name) = class_entry_name(entry.name()).map(str::to_string) else {
                        continue;
                    };
                    let mut bytes = Vec::new();
                    match entry.read_to_end(&mut bytes) {
                        Ok(_) => classes.push((name, bytes)),
                        Err(err) => tracing::warn!(entry = %name, error = %err, "skipping unreadable entry"),
                    }
                }
                classes.sort_by(|a, b| a.0.cmp(&b.0));
                Ok(classes)
            }
            ArchiveFormat::JImage => {
                let image = self.image()?;
                let mut classes: Vec<(String, Vec<u8>)> = image
                    .iter()
                    .flatten()
                    .filter_map(|resource| {
                        let resource_name = resource.name().to_string();
                        let name = class_entry_name(strip_module(&resource_name))?.to_string();
                        Some((name, resource.data().to_vec()))
                    })
                    .collect();
                classes.sort_by(|a, b| a.0.cmp(&b.0));
                Ok(classes)
            }
        }
    }
}

/// `com/example/Foo.class` -> `com/example/Foo`; metadata entries are ignored.
fn class_entry_name(entry: &str) -> Option<&str> {
    let name = entry.strip_suffix(".class")?;
    if name.starts_with("META-INF/") || name.ends_with("module-info") || name.ends_with("package-info")
    {
        return None;
    }
    Some(name)
}

/// jimage resources are named `/<module>/<path>`.
fn strip_module(resource: &str) -> &str {
    match resource.strip_prefix('/') {
        Some(rest) => rest.find('/').map_or(rest, |idx| &rest[idx + 1..]),
        None => resource,
    }
}
