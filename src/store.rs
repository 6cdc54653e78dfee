//! Reading and writing the definition file.
//!
//! A `Snapshot` remembers a content hash taken at read time. `commit` re-reads the file and
//! refuses to write if that hash no longer matches, so a concurrent edit is reported rather
//! than overwritten.

use miette::Diagnostic;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::definition::scaffold;

/// A definition file on disk
#[derive(Debug, Clone)]
pub struct DefinitionFile {
    path: PathBuf,
    message_option: String,
}

/// File content as read, with the hash used to detect later changes
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// File content
    pub content: String,
    /// Hash of `content`
    pub hash: u64,
    /// Whether the content is the scaffold for a missing file
    pub scaffolded: bool,
}

impl DefinitionFile {
    pub fn new(path: impl Into<PathBuf>, message_option: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message_option: message_option.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and a scaffolded file if missing.
    ///
    /// Returns `true` when the file was created.
    pub fn ensure(&self) -> Result<bool, StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        if self.path.exists() {
            return Ok(false);
        }

        std::fs::write(&self.path, scaffold::render(&self.message_option)).map_err(|source| {
            StoreError::Write {
                path: self.path.clone(),
                source,
            }
        })?;
        Ok(true)
    }

    /// Scaffold if needed, then read
    pub fn load(&self) -> Result<Snapshot, StoreError> {
        let scaffolded = self.ensure()?;
        let content = self.read()?;
        Ok(Snapshot {
            hash: hash_content(&content),
            content,
            scaffolded,
        })
    }

    /// Like `load`, but a missing file is scaffolded in memory only
    pub fn preview(&self) -> Result<Snapshot, StoreError> {
        let scaffolded = !self.path.exists();
        let content = if scaffolded {
            scaffold::render(&self.message_option)
        } else {
            self.read()?
        };
        Ok(Snapshot {
            hash: hash_content(&content),
            content,
            scaffolded,
        })
    }

    /// Read the file without creating it
    pub fn read(&self) -> Result<String, StoreError> {
        std::fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the file with `content` if it still matches `snapshot`
    pub fn commit(&self, snapshot: &Snapshot, content: &str) -> Result<(), StoreError> {
        let current = self.read()?;
        if hash_content(&current) != snapshot.hash {
            return Err(StoreError::Modified {
                path: self.path.clone(),
            });
        }

        let tmp = self.temp_path();
        std::fs::write(&tmp, content).map_err(|source| StoreError::Write {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| {
            let _ = std::fs::remove_file(&tmp);
            StoreError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }

    /// Sibling file the new content is staged in before the rename
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "errcode".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }
}

/// Compute a content hash for a string using the default hasher.
pub fn hash_content(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

/// File access errors
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("failed to create directory {}: {source}", .path.display())]
    #[diagnostic(code(errcode::file::create_dir))]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    #[diagnostic(code(errcode::file::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    #[diagnostic(
        code(errcode::file::write),
        help("make sure the path is correct and writable")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} changed while the entry was being prepared", .path.display())]
    #[diagnostic(
        code(errcode::file::modified),
        help("nothing was written; run the command again")
    )]
    Modified { path: PathBuf },
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
