//! Fill in missing JPG and PNG files for a tree of WebP images.
//!
//! Tools which serve WebP versions of uploaded images tend to keep them in a
//! separate tree which mirrors the original uploads. When the originals go
//! missing, `webpvert` walks the WebP tree and recreates every JPG or PNG
//! which has no counterpart in the upload tree.
//!
//! ```text
//! webpvert <SOURCE> <DEST> [--year <YYYY> --month <MM>] [--dry-run]
//! ```
//!
//! * `--year` and `--month` restrict processing to `<root>/<year>/<month>`
//!   in both trees.
//! * `--dry-run` reports the images which would be created without writing
//!   anything.
//! * `--naming` selects how target names are derived. By default
//!   `photo.jpg.webp` and `photo.webp` are both satisfied by either
//!   `photo.jpg` or `photo.png`, and `photo.jpg` is created when neither
//!   exists. With `--naming suffix` only `*.jpg.webp` and `*.png.webp` files
//!   are considered.
//!
//! JPEG files are encoded with a fixed quality of 90, PNG files with default
//! compression.

pub mod cli;
mod config;
mod convert;
mod out;
pub mod plan;

pub use self::config::{Config, Naming, Scope};
pub use self::convert::{Report, convert};
