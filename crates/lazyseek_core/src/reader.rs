//! The deferred-open reader handle.

use std::io::{self, Read, Seek, SeekFrom};
use std::mem;

use crate::error::SourceError;
use crate::source::{Backing, ReadSeek, Strategy};

/// A `Read + Seek` handle over a source that is not touched until first use.
///
/// Constructing a `LazyReader` never performs I/O. The first call to
/// `read`, `seek` or [`load`](Self::load) runs the acquisition step exactly
/// once: open-on-demand handles adopt the stream their factory returns,
/// preload handles drain their reader into an in-memory buffer and serve
/// every later operation from that buffer.
///
/// If acquisition fails, the error is remembered and returned from every
/// subsequent operation; the source is never retried.
///
/// All mutating operations take `&mut self`, so a handle is single-threaded
/// by construction. Wrap it in external synchronization if it must cross
/// threads.
///
/// # Example
///
/// ```ignore
/// use std::io::Read;
/// use lazyseek_core::LazyReader;
///
/// let mut reader = LazyReader::open_with(|| std::fs::File::open("data.bin"));
/// assert!(!reader.is_loaded());
///
/// let mut contents = Vec::new();
/// reader.read_to_end(&mut contents)?; // file opened here
/// ```
pub struct LazyReader {
    state: State,
}

enum State {
    Idle(Strategy),
    Ready(Backing),
    Failed(SourceError),
}

impl LazyReader {
    /// Defers `factory` until the first use, then adopts the seekable
    /// stream it returns. Seeks pass through to the live stream; nothing is
    /// buffered.
    pub fn open_with<S, F>(factory: F) -> Self
    where
        S: ReadSeek + 'static,
        F: FnOnce() -> io::Result<S> + 'static,
    {
        Self::from_strategy(Strategy::OpenSeek(Box::new(move || {
            factory().map(|stream| Box::new(stream) as Box<dyn ReadSeek>)
        })))
    }

    /// Defers `factory` until the first use, then drains the reader it
    /// returns into an in-memory buffer that serves all later reads and
    /// seeks.
    ///
    /// With `close_source` set, the drained reader is dropped as soon as
    /// the drain completes, releasing its descriptor before the first read
    /// returns. Otherwise it is kept (exhausted but open) for as long as
    /// the handle lives.
    pub fn preload_with<R, F>(factory: F, close_source: bool) -> Self
    where
        R: Read + 'static,
        F: FnOnce() -> io::Result<R> + 'static,
    {
        Self::from_strategy(Strategy::DrainWith(
            Box::new(move || factory().map(|reader| Box::new(reader) as Box<dyn Read>)),
            close_source,
        ))
    }

    /// Like [`preload_with`](Self::preload_with), but for an already-open
    /// reader. The reader itself is not touched until the first use of the
    /// handle.
    pub fn preload<R: Read + 'static>(reader: R, close_source: bool) -> Self {
        Self::from_strategy(Strategy::Drain(Box::new(reader), close_source))
    }

    fn from_strategy(strategy: Strategy) -> Self {
        Self {
            state: State::Idle(strategy),
        }
    }

    /// Whether acquisition has happened, successfully or not.
    pub fn is_loaded(&self) -> bool {
        !matches!(self.state, State::Idle(_))
    }

    /// Forces acquisition now instead of on the first read or seek.
    ///
    /// Idempotent: after the first call (or a first read/seek) this only
    /// reports the remembered outcome.
    pub fn load(&mut self) -> io::Result<()> {
        self.acquire();
        match &self.state {
            State::Failed(err) => Err(err.clone().into()),
            _ => Ok(()),
        }
    }

    /// Runs the one-time acquisition step, leaving the handle `Ready` or
    /// `Failed`. No-op once the handle left `Idle`.
    fn acquire(&mut self) {
        if !matches!(self.state, State::Idle(_)) {
            return;
        }
        // The placeholder is overwritten below; it is only observable if
        // the factory panics.
        let placeholder = State::Failed(SourceError::Unavailable);
        match mem::replace(&mut self.state, placeholder) {
            State::Idle(strategy) => {
                self.state = match strategy.acquire() {
                    Ok(backing) => State::Ready(backing),
                    Err(err) => {
                        log::warn!("deferred source failed to open: {err}");
                        State::Failed(err)
                    }
                };
            }
            state => self.state = state,
        }
    }

    fn backing(&mut self) -> io::Result<&mut Backing> {
        self.acquire();
        match &mut self.state {
            State::Ready(backing) => Ok(backing),
            State::Failed(err) => Err(err.clone().into()),
            // acquire() never leaves the handle idle
            State::Idle(_) => Err(SourceError::Unavailable.into()),
        }
    }
}

impl Read for LazyReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.backing()?.read(buf)
    }
}

impl Seek for LazyReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.backing()?.seek(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_open_with_reads_through_live_stream() {
        let mut reader = LazyReader::open_with(|| Ok(Cursor::new(b"live stream".to_vec())));

        let mut contents = Vec::new();
        reader.read_to_end(&mut contents).unwrap();
        assert_eq!(contents, b"live stream");
    }

    #[test]
    fn test_preload_serves_reads_from_memory() {
        let mut reader = LazyReader::preload(Cursor::new(b"buffered data".to_vec()), true);

        let mut buf = [0u8; 8];
        let n = reader.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"buffered");

        let mut rest = Vec::new();
        reader.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b" data");
    }

    #[test]
    fn test_seek_then_read() {
        let mut reader = LazyReader::open_with(|| Ok(Cursor::new(b"0123456789".to_vec())));

        let pos = reader.seek(SeekFrom::Start(4)).unwrap();
        assert_eq!(pos, 4);

        let mut buf = [0u8; 3];
        reader.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"456");

        let pos = reader.seek(SeekFrom::End(-2)).unwrap();
        assert_eq!(pos, 8);
        let mut rest = Vec::new();
        reader.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"89");
    }

    #[test]
    fn test_is_loaded_transitions_on_first_read() {
        let mut reader = LazyReader::preload(Cursor::new(vec![1u8, 2, 3]), true);
        assert!(!reader.is_loaded());

        let mut buf = [0u8; 1];
        reader.read(&mut buf).unwrap();
        assert!(reader.is_loaded());
    }

    #[test]
    fn test_is_loaded_transitions_even_when_acquisition_fails() {
        let mut reader = LazyReader::open_with(|| {
            Err::<Cursor<Vec<u8>>, _>(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        });
        assert!(!reader.is_loaded());

        let mut buf = [0u8; 4];
        assert!(reader.read(&mut buf).is_err());
        assert!(reader.is_loaded());
    }

    #[test]
    fn test_failed_open_is_replayed_with_original_kind() {
        let mut reader = LazyReader::open_with(|| {
            Err::<Cursor<Vec<u8>>, _>(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        });

        let mut buf = [0u8; 4];
        for _ in 0..3 {
            let err = reader.read(&mut buf).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        }
        let err = reader.seek(SeekFrom::Start(0)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_load_is_idempotent() {
        let mut reader = LazyReader::open_with(|| Ok(Cursor::new(b"xyz".to_vec())));

        reader.load().unwrap();
        assert!(reader.is_loaded());
        reader.load().unwrap();

        let mut contents = Vec::new();
        reader.read_to_end(&mut contents).unwrap();
        assert_eq!(contents, b"xyz");
    }

    #[test]
    fn test_clean_end_of_data_is_not_an_error() {
        let mut reader = LazyReader::preload(Cursor::new(b"tail".to_vec()), true);

        let mut contents = Vec::new();
        reader.read_to_end(&mut contents).unwrap();

        let mut buf = [0u8; 4];
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_empty_output_buffer_reads_zero() {
        let mut reader = LazyReader::preload(Cursor::new(b"data".to_vec()), true);
        let mut empty = [0u8; 0];
        assert_eq!(reader.read(&mut empty).unwrap(), 0);
    }
}
