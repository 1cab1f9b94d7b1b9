//! lazyseek - copy a file to stdout through a deferred-open reader.
//!
//! The file is not opened when the handle is constructed; it is opened (or,
//! with `--preload`, read whole into memory and closed) on the first read.
//! Run with `RUST_LOG=debug` to watch the acquisition happen.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "lazyseek")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to read
    file: PathBuf,

    /// Read the whole file into memory on first use instead of seeking the
    /// file directly
    #[arg(short, long, default_value_t = false)]
    preload: bool,

    /// Acquire the source and report the outcome without copying any data
    #[arg(short, long, default_value_t = false)]
    load_only: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut reader = if args.preload {
        lazyseek_io::preload(&args.file)
    } else {
        lazyseek_io::open(&args.file)
    };
    log::debug!("handle constructed, loaded = {}", reader.is_loaded());

    if args.load_only {
        reader
            .load()
            .with_context(|| format!("failed to load {}", args.file.display()))?;
        println!("loaded {}", args.file.display());
        return Ok(());
    }

    let copied = io::copy(&mut reader, &mut io::stdout().lock())
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    log::debug!("copied {copied} bytes from {}", args.file.display());

    Ok(())
}
