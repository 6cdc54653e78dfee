//! The add pipeline over a file on disk:
//! load → check key → allocate → build → locate → splice → persist.

use crate::definition::{self, Definitions, NewEntry, Patch, PatchError, Prefix};
use crate::error::Result;
use crate::store::{DefinitionFile, Snapshot};

/// One read of a definition file, reused for every step of a command
pub struct Session {
    file: DefinitionFile,
    snapshot: Snapshot,
    definitions: Definitions,
}

impl Session {
    /// Load (scaffolding if missing) and parse the file
    pub fn open(file: DefinitionFile) -> Result<Self> {
        let snapshot = file.load()?;
        let definitions = definition::parse(&snapshot.content);
        Ok(Self {
            file,
            snapshot,
            definitions,
        })
    }

    /// Parse the file without touching the disk; a missing file reads as its scaffold
    pub fn preview(file: DefinitionFile) -> Result<Self> {
        let snapshot = file.preview()?;
        let definitions = definition::parse(&snapshot.content);
        Ok(Self {
            file,
            snapshot,
            definitions,
        })
    }

    pub fn file(&self) -> &DefinitionFile {
        &self.file
    }

    pub fn definitions(&self) -> &Definitions {
        &self.definitions
    }

    /// Whether the session started from the scaffold of a missing file
    pub fn scaffolded(&self) -> bool {
        self.snapshot.scaffolded
    }

    /// Fail early if a key is taken, before asking for anything else
    pub fn ensure_unique(&self, key: &str) -> std::result::Result<(), PatchError> {
        match self.definitions.code_of(key) {
            Some(code) => Err(PatchError::DuplicateKey {
                key: key.to_string(),
                code,
            }),
            None => Ok(()),
        }
    }

    /// Code the next entry with this prefix would get
    pub fn next_code(&self, prefix: &Prefix) -> std::result::Result<u64, PatchError> {
        definition::next_code(&self.definitions, prefix)
    }

    /// Patch the content and, unless `dry_run`, write it back
    pub fn add(&self, request: &NewEntry, dry_run: bool) -> Result<Patch> {
        let patch = definition::patch(&self.snapshot.content, request)?;
        if !dry_run {
            self.file.commit(&self.snapshot, &patch.content)?;
        }
        Ok(patch)
    }
}
