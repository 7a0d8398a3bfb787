use std::{fmt, io};

/// Fatal snapshot parse failures.
///
/// A truncated accounts member is not represented here; it ends that
/// member's scan and the parse continues with the next member.
#[derive(Debug)]
pub enum SnapshotError {
    /// The archive could not be opened or read.
    Io(io::Error),
    /// The zstd stream was malformed or ended unexpectedly.
    Decompress(io::Error),
    /// A tar header did not parse or a member violated a bound.
    InvalidArchive(&'static str),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "snapshot io error: {err}"),
            Self::Decompress(err) => write!(f, "zstd decompression failed: {err}"),
            Self::InvalidArchive(what) => write!(f, "invalid archive: {what}"),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) | Self::Decompress(err) => Some(err),
            Self::InvalidArchive(_) => None,
        }
    }
}
