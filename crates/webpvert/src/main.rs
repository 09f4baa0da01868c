//! Command line entry point for `webpvert`.
//!
//! Walks a tree of WebP images and writes the JPG or PNG files missing from
//! a mirrored upload tree. All of the logic lives in the [`webpvert`]
//! library, this binary only parses arguments.

use anyhow::Result;
use clap::Parser;

const VERSION: &str = match option_env!("WEBPVERT_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

/// Recreate missing JPG and PNG images from their WebP copies.
#[derive(Parser)]
#[command(author, version, about, max_term_width = 80, version = VERSION)]
struct Opts {
    #[command(flatten)]
    inner: webpvert::cli::Webpvert,
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    webpvert::cli::entry(&opts.inner)
}
