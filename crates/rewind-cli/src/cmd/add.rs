//! Start tracking a file

use anyhow::Result;
use std::path::Path;

pub fn run(path: &Path) -> Result<()> {
    let file = super::resolve(path)?;
    file.create()?;
    println!("Added {file} to the repository");
    Ok(())
}
