//! Path-based constructors built on `std::fs::File`.

use std::fs::File;
use std::path::{Path, PathBuf};

use lazyseek_core::LazyReader;

/// Returns a reader that opens `path` on first use.
///
/// Nothing touches the filesystem until the first read, seek or
/// `load` call; reads and seeks then go straight to the open file. An open
/// failure (missing file, permissions) is reported from that first call and
/// from every call after it.
pub fn open(path: impl AsRef<Path>) -> LazyReader {
    let path: PathBuf = path.as_ref().to_path_buf();
    LazyReader::open_with(move || {
        log::debug!("opening {}", path.display());
        File::open(&path)
    })
}

/// Returns a reader that, on first use, reads all of `path` into memory.
///
/// The file is opened and fully drained on the first read, seek or `load`
/// call, then closed right away; every later operation is served from the
/// in-memory copy.
pub fn preload(path: impl AsRef<Path>) -> LazyReader {
    let path: PathBuf = path.as_ref().to_path_buf();
    LazyReader::preload_with(
        move || {
            log::debug!("preloading {}", path.display());
            File::open(&path)
        },
        true,
    )
}
