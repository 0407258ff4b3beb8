//! Per-file version tracking
//!
//! A [`VersionedFile`] owns the snapshot + reverse-delta chain for one
//! tracked path. `latest` always holds the working-copy content as of the
//! most recent successful create/update; version `n` addresses the state
//! archived by update `n`, so version 1 is the `create()` snapshot.

use crate::codec::{DeltaCodec, UnifiedCodec};
use crate::store::{atomic_write, DATA_DIR};
use crate::{Error, Result};
use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct VersionedFile {
    /// Location relative to the repository root.
    path: PathBuf,
    /// Base name, used as the delta header label.
    name: String,
    root: PathBuf,
    codec: UnifiedCodec,
    versions_cache: RefCell<Option<Vec<u64>>>,
}

impl VersionedFile {
    /// Construct a versioned file bound to a root-relative path.
    ///
    /// Not public: [`Repository::resolve_file`](crate::Repository::resolve_file)
    /// is the sole construction path, which guarantees the path lies
    /// inside the repository.
    pub(crate) fn new(root: PathBuf, path: PathBuf, codec: UnifiedCodec) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            name,
            root,
            codec,
            versions_cache: RefCell::new(None),
        }
    }

    /// Root-relative path of the tracked file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn working_path(&self) -> PathBuf {
        self.root.join(&self.path)
    }

    fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR).join("tree").join(&self.path)
    }

    fn latest_path(&self) -> PathBuf {
        self.data_dir().join("latest")
    }

    fn versions_dir(&self) -> PathBuf {
        self.data_dir().join("versions")
    }

    fn delta_path(&self, version: u64) -> PathBuf {
        self.versions_dir().join(format!("{version}.diff"))
    }

    /// Whether the file is tracked. Pure query, no side effects.
    pub fn exists(&self) -> bool {
        self.data_dir().is_dir()
    }

    /// Start tracking the file, capturing the working copy as the first
    /// snapshot. No version number is recorded yet; history starts empty.
    pub fn create(&self) -> Result<()> {
        if self.exists() {
            return Err(Error::RedundantOperation(format!(
                "{self} is already in the repository"
            )));
        }

        fs::create_dir_all(self.versions_dir())?;
        fs::copy(self.working_path(), self.latest_path())?;
        debug!(path = %self.path.display(), "tracking file");
        Ok(())
    }

    /// Record a new version from the working copy.
    ///
    /// Archives the previous `latest` as a reverse delta under the next
    /// version number, then advances `latest`. Returns that number: the
    /// version now addressing the previous content.
    pub fn update(&self) -> Result<u64> {
        if !self.exists() {
            return Err(self.not_in_repository());
        }

        let working = fs::read_to_string(self.working_path())?;
        let latest = fs::read_to_string(self.latest_path())?;

        // Computed new -> old, so applying it to the content about to
        // become `latest` walks one step back through history.
        let delta = self
            .codec
            .compute_delta(&self.name, &working, &latest)
            .map_err(Error::DeltaToolFailure)?
            .ok_or_else(|| Error::NoChange(self.to_string()))?;

        let next = self.versions()?.last().copied().unwrap_or(0) + 1;
        atomic_write(&self.delta_path(next), delta.as_bytes())?;
        atomic_write(&self.latest_path(), working.as_bytes())?;
        self.versions_cache.borrow_mut().take();

        debug!(path = %self.path.display(), version = next, "recorded version");
        Ok(next)
    }

    /// Delta from the stored `latest` to the working copy: the forward
    /// change made since the last recorded version. `None` when the
    /// working copy is unmodified.
    pub fn diff(&self) -> Result<Option<String>> {
        if !self.exists() {
            return Err(self.not_in_repository());
        }

        let latest = fs::read_to_string(self.latest_path())?;
        let working = fs::read_to_string(self.working_path())?;
        self.codec
            .compute_delta(&self.name, &latest, &working)
            .map_err(Error::DeltaToolFailure)
    }

    /// Recorded version numbers, ascending.
    ///
    /// Memoized for the lifetime of this instance; [`Self::update`]
    /// invalidates the cache.
    pub fn versions(&self) -> Result<Vec<u64>> {
        if !self.exists() {
            return Err(self.not_in_repository());
        }

        if let Some(cached) = self.versions_cache.borrow().as_ref() {
            return Ok(cached.clone());
        }

        let mut versions = Vec::new();
        for entry in fs::read_dir(self.versions_dir())? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("diff") {
                continue;
            }
            if let Some(n) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse().ok())
            {
                versions.push(n);
            }
        }
        versions.sort_unstable();

        *self.versions_cache.borrow_mut() = Some(versions.clone());
        Ok(versions)
    }

    /// Reconstruct the content archived at `target` and overwrite the
    /// working copy with it.
    ///
    /// Without `force`, a working copy that diverges from `latest` makes
    /// the call fail with [`Error::FileChanged`] so uncommitted edits are
    /// never silently lost. A delta that fails to apply aborts the whole
    /// restore with [`Error::RestoreFailed`]; the working copy is only
    /// written after the full chain has been applied, and atomically.
    pub fn restore(&self, target: u64, force: bool) -> Result<()> {
        let versions = self.versions()?;
        if !versions.contains(&target) {
            return Err(Error::VersionNotFound {
                path: self.to_string(),
                version: target,
            });
        }

        if self.diff()?.is_some() && !force {
            return Err(Error::FileChanged(self.to_string()));
        }

        let mut content = fs::read_to_string(self.latest_path())?;
        for &v in versions.iter().rev().filter(|&&v| v >= target) {
            let delta = fs::read_to_string(self.delta_path(v)).map_err(|err| {
                Error::RestoreFailed {
                    path: self.to_string(),
                    version: v,
                    reason: format!("cannot read delta: {err}"),
                }
            })?;
            content = self
                .codec
                .apply_delta(&content, &delta)
                .map_err(|err| Error::RestoreFailed {
                    path: self.to_string(),
                    version: v,
                    reason: err.to_string(),
                })?;
        }

        atomic_write(&self.working_path(), content.as_bytes())?;
        debug!(path = %self.path.display(), version = target, "restored");
        Ok(())
    }

    fn not_in_repository(&self) -> Error {
        Error::NotInRepository(format!("{self} is not in the repository"))
    }
}

impl fmt::Display for VersionedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.path.display().fmt(f)
    }
}
