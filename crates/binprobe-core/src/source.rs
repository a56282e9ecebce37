//! Loading input files into an immutable in-memory buffer.

use crate::error::{Error, Result};
use bytes::Bytes;
use std::ops::Deref;
use std::path::Path;
use tracing::debug;

/// Immutable, zero-indexed byte content of an analyzed file.
///
/// Cloning is cheap: clones share the same backing storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    bytes: Bytes,
}

impl Buffer {
    /// Wraps already-resident bytes
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Returns the buffer as a slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes in the buffer
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the buffer holds no bytes
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&'static [u8]> for Buffer {
    fn from(data: &'static [u8]) -> Self {
        Self::new(Bytes::from_static(data))
    }
}

/// Read a file fully into memory.
pub fn load_file(path: impl AsRef<Path>) -> Result<Buffer> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| Error::file_read(path, e))?;
    debug!("Loaded {} bytes from {}", data.len(), path.display());
    Ok(Buffer::from(data))
}
