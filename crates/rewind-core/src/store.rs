//! On-disk layout constants and write helpers
//!
//! A repository keeps all of its state inside the marker directory:
//! ```text
//! .rw/
//!   config.toml
//!   tree/
//!     <relative-path>/
//!       latest            full content of the newest recorded state
//!       versions/
//!         <n>.diff        reverse delta archived by update n
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Name of the marker directory that scopes a repository to a subtree.
pub const DATA_DIR: &str = ".rw";

/// Write `data` to `target` atomically.
///
/// The data lands in a uniquely named temporary file in the target's own
/// directory, is fsynced, then renamed into place, so a crash mid-write
/// cannot leave a half-written target behind.
pub fn atomic_write(target: &Path, data: &[u8]) -> io::Result<()> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target).map_err(|err| err.error)?;
    Ok(())
}
