//! # lazyseek I/O
//!
//! Filesystem-backed constructors for the lazyseek deferred-open reader.
//!
//! This crate wires `std::fs::File` into the strategies of
//! `lazyseek_core`, so a handle to a file can be created without touching
//! the filesystem until the first read or seek.
//!
//! ## Key Components
//!
//! - **open**: open-on-demand handle for a path; seeks go to the live file
//! - **preload**: reads the whole file into memory on first use and closes it
//!
//! ## Example
//!
//! ```ignore
//! use std::io::Read;
//!
//! let mut reader = lazyseek_io::open("data.bin");
//! let mut contents = Vec::new();
//! reader.read_to_end(&mut contents)?; // File::open happens here
//! ```

mod file;

pub use file::{open, preload};
