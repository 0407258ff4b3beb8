//! Rewind Core - per-file version tracking with reverse deltas
//!
//! This crate provides the storage and reconstruction engine:
//! - Unified-diff delta codec (compute + strict apply)
//! - Repository discovery and path resolution
//! - Per-file snapshot + reverse-delta chain with restore
//! - Store configuration
//!
//! One linear history per tracked file, one writer at a time. The
//! filesystem is never locked: concurrent processes operating on the same
//! tracked file are undefined behavior and out of scope.

pub mod codec;
pub mod config;
pub mod file;
pub mod repo;
pub mod store;

// Re-export main types for convenience
pub use codec::{CodecError, DeltaCodec, UnifiedCodec};
pub use config::StoreConfig;
pub use file::VersionedFile;
pub use repo::Repository;

/// Errors for repository and versioned-file operations.
///
/// Every variant is recoverable at the CLI boundary; each maps to a
/// distinct user-facing message and exit code.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The current directory, a path, or an operation target is outside
    /// any repository (or the file is not tracked).
    #[error("{0}")]
    NotInRepository(String),

    /// Create on an already-existing repository or tracked file.
    #[error("{0}")]
    RedundantOperation(String),

    /// Update with content identical to the latest recorded version.
    #[error("{0} is not modified")]
    NoChange(String),

    /// Restore without force while the working copy diverges from the
    /// latest recorded version.
    #[error("{0} is modified")]
    FileChanged(String),

    /// Restore target absent from the version history.
    #[error("{path} has no version {version}")]
    VersionNotFound { path: String, version: u64 },

    /// The delta chain could not be applied: on-disk corruption, a
    /// manually edited delta, or a listed version with no delta file.
    #[error("failed to restore {path} to version {version}: {reason}")]
    RestoreFailed {
        path: String,
        version: u64,
        reason: String,
    },

    /// The delta codec failed for a reason other than "no difference".
    #[error("delta codec failure: {0}")]
    DeltaToolFailure(#[source] CodecError),

    /// Store configuration could not be parsed or serialized.
    #[error("invalid store configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type used throughout rewind-core.
pub type Result<T> = std::result::Result<T, Error>;
