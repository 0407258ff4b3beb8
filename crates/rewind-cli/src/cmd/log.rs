//! List recorded versions of a tracked file

use anyhow::Result;
use std::path::Path;

pub fn run(path: &Path) -> Result<()> {
    let file = super::resolve(path)?;
    for version in file.versions()? {
        println!("{version}");
    }
    Ok(())
}
