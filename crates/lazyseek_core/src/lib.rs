//! # lazyseek core
//!
//! Deferred acquisition of readable, seekable byte sources.
//!
//! This crate provides [`LazyReader`], a `Read + Seek` handle that puts off
//! opening its underlying source until the first read, seek or explicit
//! [`load`](LazyReader::load). Two families of strategies are supported:
//! open-on-demand, which adopts the live stream a factory returns, and
//! preload, which drains a plain reader into memory and serves every later
//! operation from the buffer.
//!
//! ## Key Components
//!
//! - **LazyReader**: the deferred-open handle
//! - **SourceError**: acquisition failures, remembered and replayed
//! - **ReadSeek**: umbrella trait for `Read + Seek` streams
//!
//! ## Example
//!
//! ```ignore
//! use std::io::Read;
//! use lazyseek_core::LazyReader;
//!
//! let mut reader = LazyReader::open_with(|| std::fs::File::open("data.bin"));
//! let mut contents = Vec::new();
//! reader.read_to_end(&mut contents)?; // the file is opened here
//! ```

mod error;
mod reader;
mod source;

pub use error::{Result, SourceError};
pub use reader::LazyReader;
pub use source::ReadSeek;
