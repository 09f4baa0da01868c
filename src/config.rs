use core::fmt;

use std::path::{Path, PathBuf};

use clap::ValueEnum;

/// A year and month restricting which part of a tree is processed.
///
/// Trees are expected to be laid out as `<root>/<year>/<month>/..`, with the
/// month zero-padded to two digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub year: u16,
    pub month: u8,
}

impl Scope {
    #[inline]
    pub fn new(year: u16, month: u8) -> Self {
        Self { year, month }
    }

    /// Apply the scope to the given root directory.
    pub fn apply(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        path.push(self.year.to_string());
        path.push(format!("{:02}", self.month));
        path
    }
}

impl fmt::Display for Scope {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}", self.year, self.month)
    }
}

/// How the name of a JPG or PNG target is derived from a WebP file name.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Naming {
    /// Every WebP file has both a JPG and a PNG candidate, and is present if
    /// either exists. `photo.jpg.webp` maps to `photo.jpg` or `photo.png`,
    /// `photo.webp` maps to `photo.jpg` or `photo.png`.
    #[default]
    Dual,
    /// Only `*.jpg.webp` and `*.png.webp` files are processed,
    /// and map to the single file with `.webp` stripped.
    Suffix,
}

/// Configuration for a single conversion run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the tree containing WebP files.
    pub source: PathBuf,
    /// Root of the tree where JPG and PNG files are stored.
    pub dest: PathBuf,
    /// Restrict processing to a year and month.
    pub scope: Option<Scope>,
    /// Only report what would be created.
    pub dry_run: bool,
    /// Target naming policy.
    pub naming: Naming,
    /// Report files that already exist or are skipped.
    pub verbose: bool,
}

impl Config {
    /// Construct a configuration processing the whole of `source` into `dest`.
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            scope: None,
            dry_run: false,
            naming: Naming::default(),
            verbose: false,
        }
    }

    /// The source and destination roots with the scope applied.
    pub fn roots(&self) -> (PathBuf, PathBuf) {
        match &self.scope {
            Some(scope) => (scope.apply(&self.source), scope.apply(&self.dest)),
            None => (self.source.clone(), self.dest.clone()),
        }
    }
}
