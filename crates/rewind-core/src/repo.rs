//! Repository discovery and path resolution

use crate::codec::UnifiedCodec;
use crate::config::{StoreConfig, CONFIG_FILE};
use crate::file::VersionedFile;
use crate::store::DATA_DIR;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Handle to a repository root.
///
/// Only ever constructed through [`Repository::find`] or
/// [`Repository::create`], which guarantees the marker directory exists
/// for the lifetime of the value.
#[derive(Debug)]
pub struct Repository {
    root: PathBuf,
}

impl Repository {
    /// Search `start` and each of its ancestors for the marker directory.
    ///
    /// Returns `None` when no repository is found; that is a normal
    /// outcome, not an error. Never mutates the filesystem.
    pub fn find(start: &Path) -> Result<Option<Repository>> {
        let start = start.canonicalize()?;
        for dir in start.ancestors() {
            if dir.join(DATA_DIR).is_dir() {
                return Ok(Some(Repository {
                    root: dir.to_path_buf(),
                }));
            }
        }
        Ok(None)
    }

    /// Same as [`Repository::find`] but fails when no repository exists.
    pub fn find_or_fail(start: &Path) -> Result<Repository> {
        Self::find(start)?.ok_or_else(|| {
            Error::NotInRepository("Current directory is not in a repository".to_string())
        })
    }

    /// Initialize a new repository rooted at `dir`.
    ///
    /// Fails if `dir` or any of its ancestors already contains one; an
    /// ancestor's store is never silently reused.
    pub fn create(dir: &Path) -> Result<Repository> {
        if let Some(existing) = Self::find(dir)? {
            return Err(Error::RedundantOperation(format!(
                "The repository already exists in {}",
                existing.root.display()
            )));
        }

        let root = dir.canonicalize()?;
        let data_dir = root.join(DATA_DIR);
        fs::create_dir(&data_dir)?;
        fs::write(
            data_dir.join(CONFIG_FILE),
            StoreConfig::default().to_toml()?,
        )?;

        debug!(root = %root.display(), "initialized repository");
        Ok(Repository { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    pub fn config(&self) -> Result<StoreConfig> {
        StoreConfig::load(&self.data_dir().join(CONFIG_FILE))
    }

    /// Resolve `path` to a [`VersionedFile`] bound to its root-relative
    /// form.
    ///
    /// This is the sole construction path for [`VersionedFile`]; it
    /// guarantees every instance refers to a location inside the
    /// repository.
    pub fn resolve_file(&self, path: &Path) -> Result<VersionedFile> {
        let abs = path.canonicalize()?;
        let rel = abs.strip_prefix(&self.root).map_err(|_| {
            Error::NotInRepository(format!("{} is not within the repository", path.display()))
        })?;

        let config = self.config()?;
        Ok(VersionedFile::new(
            self.root.clone(),
            rel.to_path_buf(),
            UnifiedCodec::new(config.diff.context_lines),
        ))
    }
}
