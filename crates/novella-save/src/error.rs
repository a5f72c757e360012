//! Save data error types.

use std::path::PathBuf;
use thiserror::Error;

/// Why a byte buffer is not a valid save document.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Input has no bytes at all.
    #[error("save data is empty")]
    Empty,

    /// Input ends inside the header.
    #[error("save data truncated: {len} bytes is shorter than the header")]
    Truncated { len: usize },

    /// Header does not start with the save magic.
    #[error("not a save file (bad magic {0:02x?})")]
    BadMagic([u8; 4]),

    /// Container version this build cannot read.
    #[error("unsupported save format version {0}")]
    UnsupportedVersion(u8),

    /// Payload is cut short or corrupt.
    #[error("malformed save payload: {0}")]
    Malformed(#[from] bincode::Error),

    /// Bytes remain after a complete document.
    #[error("{0} trailing bytes after save document")]
    TrailingBytes(usize),
}

/// Save data errors.
#[derive(Error, Debug)]
pub enum SaveError {
    /// Reading or writing the save file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be encoded.
    #[error("failed to encode save data: {0}")]
    Encode(#[source] bincode::Error),

    /// The save file contents are not a valid document.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, SaveError>;
