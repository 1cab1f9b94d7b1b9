use std::io;
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("failed to open source: {0}")]
    Open(#[source] Arc<io::Error>),

    #[error("error while preloading source: {0}")]
    Drain(#[source] Arc<io::Error>),

    #[error("no source available")]
    Unavailable,
}

impl SourceError {
    pub(crate) fn open(err: io::Error) -> Self {
        Self::Open(Arc::new(err))
    }

    pub(crate) fn drain(err: io::Error) -> Self {
        Self::Drain(Arc::new(err))
    }

    /// The `io::ErrorKind` this error surfaces as through `Read`/`Seek`.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::Open(err) | Self::Drain(err) => err.kind(),
            Self::Unavailable => io::ErrorKind::NotFound,
        }
    }
}

impl From<SourceError> for io::Error {
    fn from(err: SourceError) -> Self {
        io::Error::new(err.kind(), err)
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;
