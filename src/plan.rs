//! Deriving JPG and PNG targets from WebP files.
//!
//! Everything except [`walk`] is pure and never touches the filesystem.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;

use crate::config::Naming;

const WEBP: &str = "webp";

/// The format of a target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Jpeg,
    Png,
}

impl Format {
    /// Detect a format from a file extension, ignoring case.
    pub fn from_extension(ext: &OsStr) -> Option<Self> {
        let ext = ext.to_str()?;

        if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
            return Some(Format::Jpeg);
        }

        if ext.eq_ignore_ascii_case("png") {
            return Some(Format::Png);
        }

        None
    }

    /// The canonical extension of the format.
    #[inline]
    pub fn extension(self) -> &'static str {
        match self {
            Format::Jpeg => "jpg",
            Format::Png => "png",
        }
    }

    #[inline]
    fn other(self) -> Self {
        match self {
            Format::Jpeg => Format::Png,
            Format::Png => Format::Jpeg,
        }
    }
}

/// A file which would satisfy a WebP file, relative to the destination root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub relative: PathBuf,
    pub format: Format,
}

/// The targets of a single WebP file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Targets {
    /// The target created if none of the targets exist.
    pub primary: Target,
    /// Another target which counts as the file being present.
    pub alternate: Option<Target>,
}

impl Targets {
    /// Iterate over all targets, primary first.
    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        [Some(&self.primary), self.alternate.as_ref()]
            .into_iter()
            .flatten()
    }
}

impl Naming {
    /// Derive targets for a path relative to the source root.
    ///
    /// Returns `None` if the path is not a WebP file, or if the naming policy
    /// has no target for it.
    pub fn targets(&self, relative: &Path) -> Option<Targets> {
        if relative.extension() != Some(OsStr::new(WEBP)) {
            return None;
        }

        let stem = relative.with_extension("");

        if let Some(ext) = stem.extension()
            && let Some(format) = Format::from_extension(ext)
        {
            let alternate = match self {
                Naming::Dual => {
                    let other = format.other();

                    Some(Target {
                        relative: stem.with_extension(other.extension()),
                        format: other,
                    })
                }
                Naming::Suffix if ext.eq_ignore_ascii_case(format.extension()) => None,
                // Only the `.jpg` and `.png` spellings are recognized.
                Naming::Suffix => return None,
            };

            return Some(Targets {
                primary: Target {
                    relative: stem,
                    format,
                },
                alternate,
            });
        }

        match self {
            Naming::Dual => Some(Targets {
                primary: Target {
                    relative: append_extension(&stem, Format::Jpeg),
                    format: Format::Jpeg,
                },
                alternate: Some(Target {
                    relative: append_extension(&stem, Format::Png),
                    format: Format::Png,
                }),
            }),
            Naming::Suffix => None,
        }
    }
}

/// Append an extension without replacing anything after an existing dot,
/// so that `my.holiday` becomes `my.holiday.jpg`.
fn append_extension(path: &Path, format: Format) -> PathBuf {
    let mut s = OsString::from(path.as_os_str());
    s.push(".");
    s.push(format.extension());
    PathBuf::from(s)
}

/// A discovered WebP file and its targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path to the WebP file.
    pub path: PathBuf,
    /// Path to the WebP file relative to the source root.
    pub relative: PathBuf,
    pub targets: Targets,
}

/// An entry produced by [`plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A WebP file with targets.
    Candidate(Candidate),
    /// A WebP file which the naming policy has no target for.
    Skipped(PathBuf),
}

/// Lazily map paths discovered under `root` into entries.
///
/// Files which are not WebP files are dropped, and errors are passed through
/// unchanged.
pub fn plan<I>(root: &Path, paths: I, naming: Naming) -> impl Iterator<Item = Result<Entry>>
where
    I: IntoIterator<Item = Result<PathBuf>>,
{
    paths.into_iter().filter_map(move |path| {
        let path = match path {
            Ok(path) => path,
            Err(error) => return Some(Err(error)),
        };

        if path.extension() != Some(OsStr::new(WEBP)) {
            return None;
        }

        let relative = match path.strip_prefix(root) {
            Ok(relative) => relative.to_path_buf(),
            Err(..) => {
                return Some(Err(anyhow::anyhow!(
                    "{} is not inside of {}",
                    path.display(),
                    root.display()
                )));
            }
        };

        let Some(targets) = naming.targets(&relative) else {
            return Some(Ok(Entry::Skipped(path)));
        };

        Some(Ok(Entry::Candidate(Candidate {
            path,
            relative,
            targets,
        })))
    })
}

/// Recursively walk all regular files under `root`.
///
/// Hidden files are included and ignore files are not consulted.
pub fn walk(root: &Path) -> impl Iterator<Item = Result<PathBuf>> {
    WalkBuilder::new(root)
        .standard_filters(false)
        .build()
        .filter_map(|entry| {
            let entry = match entry.context("Walking source directory") {
                Ok(entry) => entry,
                Err(error) => return Some(Err(error)),
            };

            let is_file = entry.file_type().is_some_and(|t| t.is_file());
            is_file.then(|| Ok(entry.into_path()))
        })
}
