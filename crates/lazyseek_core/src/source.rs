//! Acquisition strategies and the backing streams they produce.

use std::io::{self, Cursor, Read, Seek, SeekFrom};

use crate::error::{Result, SourceError};

/// A stream that supports both reading and seeking.
///
/// Blanket-implemented for every `Read + Seek` type, so `File`,
/// `Cursor<Vec<u8>>` and friends all qualify without ceremony.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

pub(crate) type SeekFactory = Box<dyn FnOnce() -> io::Result<Box<dyn ReadSeek>>>;
pub(crate) type ReadFactory = Box<dyn FnOnce() -> io::Result<Box<dyn Read>>>;

/// How the backing stream will be obtained on first use.
///
/// Exactly one strategy exists per handle, and acquiring it consumes it, so
/// a factory can never run twice.
pub(crate) enum Strategy {
    /// Open on demand: the factory yields a seekable stream that is adopted
    /// as-is, without buffering.
    OpenSeek(SeekFactory),
    /// Preload: the factory yields a plain reader that is drained into
    /// memory. The flag requests dropping the source right after the drain.
    DrainWith(ReadFactory, bool),
    /// Preload from an already-open reader.
    Drain(Box<dyn Read>, bool),
}

impl Strategy {
    pub(crate) fn acquire(self) -> Result<Backing> {
        match self {
            Strategy::OpenSeek(factory) => {
                let stream = factory().map_err(SourceError::open)?;
                log::debug!("acquired seekable source on demand");
                Ok(Backing::Direct(stream))
            }
            Strategy::DrainWith(factory, close_source) => {
                let reader = factory().map_err(SourceError::open)?;
                Ok(drain(reader, close_source))
            }
            Strategy::Drain(reader, close_source) => Ok(drain(reader, close_source)),
        }
    }
}

/// The acquired stream that `read`/`seek` calls delegate to.
pub(crate) enum Backing {
    /// A live stream adopted from an open-on-demand strategy.
    Direct(Box<dyn ReadSeek>),
    /// An in-memory copy produced by a preload strategy.
    Buffered {
        cursor: Cursor<Vec<u8>>,
        /// Drain error remembered alongside the partial buffer. Never
        /// cleared once set.
        sticky: Option<SourceError>,
        /// The drained source, kept open until the handle goes away when
        /// the caller declined the close-after-drain flag.
        _keep_open: Option<Box<dyn Read>>,
    },
}

impl Backing {
    pub(crate) fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Backing::Direct(stream) => stream.read(buf),
            Backing::Buffered { cursor, sticky, .. } => {
                let n = cursor.read(buf)?;
                // A truncated preload must not look like a clean end of
                // data: once the buffer runs out, the drain error takes the
                // place of the 0-byte result, on this call and every later
                // one. A clean end of data stays Ok(0).
                if n == 0 && !buf.is_empty() {
                    if let Some(err) = sticky {
                        return Err(err.clone().into());
                    }
                }
                Ok(n)
            }
        }
    }

    pub(crate) fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            Backing::Direct(stream) => stream.seek(pos),
            Backing::Buffered { cursor, .. } => cursor.seek(pos),
        }
    }
}

/// Drains `reader` to end of data or error.
///
/// A partial buffer survives a drain error; the error is kept as the sticky
/// error of the backing rather than discarding the bytes read so far.
fn drain(mut reader: Box<dyn Read>, close_source: bool) -> Backing {
    let mut data = Vec::new();
    let sticky = match reader.read_to_end(&mut data) {
        Ok(n) => {
            log::debug!("preloaded {n} bytes");
            None
        }
        Err(err) => {
            log::warn!("preload stopped after {} bytes: {err}", data.len());
            Some(SourceError::drain(err))
        }
    };
    let retained = if close_source { None } else { Some(reader) };
    Backing::Buffered {
        cursor: Cursor::new(data),
        sticky,
        _keep_open: retained,
    }
}
