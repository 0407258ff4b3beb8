//! Show changes between the working copy and the last recorded version

use anyhow::Result;
use std::path::Path;

pub fn run(path: &Path) -> Result<()> {
    let file = super::resolve(path)?;
    match file.diff()? {
        Some(delta) => print!("{delta}"),
        None => println!("{file} is not modified"),
    }
    Ok(())
}
