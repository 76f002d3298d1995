//! Errors surfaced by the image registry client.

use std::num::ParseIntError;

/// Failure modes of registry operations.
///
/// Nothing here is retried; each variant reaches the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The external command could not be spawned or exited unsuccessfully.
    #[error(transparent)]
    Command(#[from] anyhow::Error),

    /// An image of the requested family carries a version segment that is
    /// not a non-negative integer.
    #[error("invalid version {version:?} in image {image}")]
    InvalidVersion {
        /// Full image name as listed by the registry.
        image: String,
        /// The offending version segment.
        version: String,
        /// Underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },

    /// No image of the requested family is present in the registry.
    #[error("no version found for release {release}, channel {channel} and arch {arch}")]
    VersionNotFound {
        /// Requested release
        release: String,
        /// Requested channel
        channel: String,
        /// Requested architecture
        arch: String,
    },
}

/// Result alias for registry operations.
pub type Result<T> = std::result::Result<T, Error>;
