//! Random-access byte cursors consumed by the tokenizer.
//!
//! A [`ByteSource`] hands out one byte at a time and can rewind by exactly
//! one byte, which is all the lookahead the scanner ever needs. Reading past
//! the end is not an error: `read_one` returns `Ok(None)`.

use crate::error::{PdfError, Result};
use bytes::Bytes;
use memmap2::Mmap;
use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom};

/// Position-tracking view over a seekable byte source.
pub trait ByteSource {
    /// Return the next byte and advance by one, or `None` at end of stream.
    fn read_one(&mut self) -> Result<Option<u8>>;

    /// Undo a one-byte lookahead.
    fn step_back(&mut self) -> Result<()>;

    /// Move the cursor and return the new absolute position.
    fn seek(&mut self, pos: SeekFrom) -> Result<u64>;

    /// Current absolute position.
    fn tell(&self) -> u64;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_one(&mut self) -> Result<Option<u8>> {
        (**self).read_one()
    }

    fn step_back(&mut self) -> Result<()> {
        (**self).step_back()
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        (**self).seek(pos)
    }

    fn tell(&self) -> u64 {
        (**self).tell()
    }
}

/// Resolve a `SeekFrom` against the current position and total length.
fn resolve_seek(pos: SeekFrom, current: u64, len: Option<u64>) -> Result<u64> {
    let target = match pos {
        SeekFrom::Start(offset) => return Ok(offset),
        SeekFrom::Current(delta) => current as i128 + delta as i128,
        SeekFrom::End(delta) => match len {
            Some(len) => len as i128 + delta as i128,
            None => return Err(PdfError::InvalidSeek { offset: delta as i128 }),
        },
    };
    u64::try_from(target).map_err(|_| PdfError::InvalidSeek { offset: target })
}

enum SourceData<'a> {
    Borrowed(&'a [u8]),
    Shared(Bytes),
}

impl SourceData<'_> {
    fn as_slice(&self) -> &[u8] {
        match self {
            SourceData::Borrowed(data) => data,
            SourceData::Shared(data) => data.as_ref(),
        }
    }
}

/// In-memory cursor over a borrowed slice or shared bytes.
pub struct SliceSource<'a> {
    data: SourceData<'a>,
    pos: u64,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data: SourceData::Borrowed(data),
            pos: 0,
        }
    }

    pub fn len(&self) -> u64 {
        self.data.as_slice().len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.as_slice().is_empty()
    }

    /// Bytes from the current position to the end.
    pub fn remaining(&self) -> &[u8] {
        let data = self.data.as_slice();
        let start = usize::try_from(self.pos).map_or(data.len(), |p| p.min(data.len()));
        &data[start..]
    }
}

impl SliceSource<'static> {
    /// Create a source over shared bytes (zero-copy).
    pub fn from_bytes(data: Bytes) -> Self {
        Self {
            data: SourceData::Shared(data),
            pos: 0,
        }
    }

    /// Create a source that takes ownership of a buffer.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self::from_bytes(Bytes::from(data))
    }

    /// Create a source over a memory-mapped file.
    pub fn from_mmap(mmap: Mmap) -> Self {
        Self::from_bytes(Bytes::from_owner(mmap))
    }
}

impl ByteSource for SliceSource<'_> {
    #[inline]
    fn read_one(&mut self) -> Result<Option<u8>> {
        let data = self.data.as_slice();
        let Ok(pos) = usize::try_from(self.pos) else {
            return Ok(None);
        };
        match data.get(pos) {
            Some(&b) => {
                self.pos += 1;
                Ok(Some(b))
            }
            None => Ok(None),
        }
    }

    #[inline]
    fn step_back(&mut self) -> Result<()> {
        if self.pos == 0 {
            return Err(PdfError::InvalidSeek { offset: -1 });
        }
        self.pos -= 1;
        Ok(())
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        self.pos = resolve_seek(pos, self.pos, Some(self.len()))?;
        Ok(self.pos)
    }

    #[inline]
    fn tell(&self) -> u64 {
        self.pos
    }
}

/// Buffered cursor over any seekable reader, such as an open file.
pub struct ReaderSource<R> {
    inner: BufReader<R>,
    pos: u64,
}

impl<R: Read + Seek> ReaderSource<R> {
    /// Wrap `reader`, starting at its current stream position.
    pub fn new(mut reader: R) -> Result<Self> {
        let pos = reader.stream_position()?;
        Ok(Self {
            inner: BufReader::new(reader),
            pos,
        })
    }

    pub fn with_capacity(capacity: usize, mut reader: R) -> Result<Self> {
        let pos = reader.stream_position()?;
        Ok(Self {
            inner: BufReader::with_capacity(capacity, reader),
            pos,
        })
    }

    pub fn get_ref(&self) -> &R {
        self.inner.get_ref()
    }

    /// Unwrap the reader. Buffered-but-unread bytes are discarded, so the
    /// reader's position may be ahead of [`ByteSource::tell`].
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }
}

impl<R: Read + Seek> ByteSource for ReaderSource<R> {
    fn read_one(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.pos += 1;
                    return Ok(Some(buf[0]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn step_back(&mut self) -> Result<()> {
        if self.pos == 0 {
            return Err(PdfError::InvalidSeek { offset: -1 });
        }
        self.inner.seek_relative(-1)?;
        self.pos -= 1;
        Ok(())
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let target = match pos {
            SeekFrom::End(_) => {
                let len = self.inner.seek(SeekFrom::End(0))?;
                match resolve_seek(pos, self.pos, Some(len)) {
                    Ok(target) => target,
                    Err(e) => {
                        // Restore the position the length probe moved.
                        self.inner.seek(SeekFrom::Start(self.pos))?;
                        return Err(e);
                    }
                }
            }
            other => resolve_seek(other, self.pos, None)?,
        };
        self.pos = self.inner.seek(SeekFrom::Start(target))?;
        Ok(self.pos)
    }

    #[inline]
    fn tell(&self) -> u64 {
        self.pos
    }
}
