//! Initialize a repository in the current directory

use anyhow::{Context, Result};
use rewind_core::Repository;
use std::env;

pub fn run() -> Result<()> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let repo = Repository::create(&cwd)?;
    println!("The repository is initialized in {}", repo.root().display());
    Ok(())
}
