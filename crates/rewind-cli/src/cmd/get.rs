//! Restore a tracked file to a recorded version

use anyhow::Result;
use std::path::Path;

pub fn run(path: &Path, version: u64, force: bool) -> Result<()> {
    let file = super::resolve(path)?;
    file.restore(version, force)?;
    println!("Restored {file} to version {version}");
    Ok(())
}
