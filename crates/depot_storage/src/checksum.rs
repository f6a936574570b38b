//! Chunked copying with an interleaved content checksum.

use std::io::{self, Read, Write};

/// Chunk size used when none is given: 1 MiB.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Copies a stream in fixed-size chunks while feeding every chunk into an MD5 digest.
///
/// Memory use is bounded by the chunk size no matter how large the content is.
/// The digest fingerprints content for bookkeeping; it is not a security control.
///
/// # Example
///
/// ```
/// use depot_storage::ChecksummingCopier;
///
/// let mut sink = Vec::new();
/// let digest = ChecksummingCopier::default()
///     .copy(&mut &b"hello"[..], &mut sink)
///     .unwrap();
/// assert_eq!(sink, b"hello");
/// assert_eq!(digest, "5d41402abc4b2a76b9719d911017c592");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksummingCopier {
    chunk_size: usize,
}

impl ChecksummingCopier {
    /// Create a copier reading `chunk_size` bytes at a time (at least one byte).
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// Bytes read per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Copy `source` into `sink` until end of stream.
    ///
    /// Returns the lowercase hex MD5 digest of everything copied. A zero-length
    /// read marks the end of the stream; interrupted reads are retried.
    ///
    /// # Errors
    ///
    /// Returns the first read or write error encountered.
    pub fn copy<R, W>(&self, source: &mut R, sink: &mut W) -> io::Result<String>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let mut context = md5::Context::new();
        let mut buffer = vec![0u8; self.chunk_size];

        loop {
            let read = match source.read(&mut buffer) {
                Ok(0) => break,
                Ok(read) => read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            let chunk = &buffer[..read];
            sink.write_all(chunk)?;
            context.consume(chunk);
        }

        sink.flush()?;
        Ok(format!("{:x}", context.compute()))
    }
}

impl Default for ChecksummingCopier {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

/// MD5 digest of an in-memory buffer, in the same format [`ChecksummingCopier`] returns.
pub fn checksum(data: &[u8]) -> String {
    format!("{:x}", md5::compute(data))
}
