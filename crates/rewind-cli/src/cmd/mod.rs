//! CLI command implementations

pub mod add;
pub mod diff;
pub mod get;
pub mod init;
pub mod log;
pub mod update;

use anyhow::{Context, Result};
use rewind_core::{Repository, VersionedFile};
use std::path::Path;

/// Resolve the repository from the current directory and bind `path` to
/// its tracked-file handle. Shared preamble of every file-level command.
fn resolve(path: &Path) -> Result<VersionedFile> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let repo = Repository::find_or_fail(&cwd)?;
    let file = repo.resolve_file(path)?;
    Ok(file)
}
