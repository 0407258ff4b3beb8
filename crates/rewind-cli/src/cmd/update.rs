//! Record a new version of a tracked file

use anyhow::Result;
use std::path::Path;

pub fn run(path: &Path) -> Result<()> {
    let file = super::resolve(path)?;
    let version = file.update()?;
    println!("Updated {file} (previous version: {version})");
    Ok(())
}
