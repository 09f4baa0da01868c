use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageFormat, ImageReader};
use termcolor::WriteColor;

use crate::config::Config;
use crate::out::{Out, blank, error, info};
use crate::plan::{self, Entry, Format};

/// Quality used when encoding JPEG files.
const JPEG_QUALITY: u8 = 90;

/// Counters collected over a single run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// WebP files with none of their targets present.
    pub missing: usize,
    /// Files successfully converted.
    pub converted: usize,
    /// WebP files which already have a target.
    pub present: usize,
    /// WebP files the naming policy has no target for.
    pub skipped: usize,
    /// Files or directory entries which failed to process.
    pub failed: usize,
}

/// Convert every WebP file under the configured source tree which has no
/// JPG or PNG counterpart under the destination tree.
///
/// Progress is written line by line to `o`. Failures for individual files
/// are reported and counted, but do not stop the run. A missing source
/// directory is reported and results in an empty [`Report`].
pub fn convert(config: &Config, o: &mut dyn WriteColor) -> Result<Report> {
    run(config, &mut Out::new(o))
}

pub(crate) fn run(config: &Config, o: &mut Out<'_>) -> Result<Report> {
    let (source, dest) = config.roots();
    let mut report = Report::default();

    if !source.is_dir() {
        info!(o, "Directory not found: {}", source.display());
        return Ok(report);
    }

    for entry in plan::plan(&source, plan::walk(&source), config.naming) {
        let candidate = match entry {
            Ok(Entry::Candidate(candidate)) => candidate,
            Ok(Entry::Skipped(path)) => {
                report.skipped += 1;

                if config.verbose {
                    blank!(o, "Skipped: {}", path.display());
                }

                continue;
            }
            Err(e) => {
                report.failed += 1;
                error!(o, "{e:#}");
                continue;
            }
        };

        let existing = candidate
            .targets
            .iter()
            .map(|target| dest.join(&target.relative))
            .find(|path| path.exists());

        if let Some(existing) = existing {
            report.present += 1;

            if config.verbose {
                blank!(o, "Exists: {}", existing.display());
            }

            continue;
        }

        report.missing += 1;
        let primary = &candidate.targets.primary;
        let target = dest.join(&primary.relative);

        if config.dry_run {
            let name = target.file_name().map(Path::new).unwrap_or(target.as_path());

            info!(
                o,
                "[Dry Run] No JPG/PNG found in '{}': {} will be created",
                dest.display(),
                name.display()
            );

            continue;
        }

        match convert_file(&candidate.path, &target, primary.format) {
            Ok(()) => {
                report.converted += 1;

                info!(
                    o,
                    "Converted: {} -> {}",
                    candidate.path.display(),
                    target.display()
                );
            }
            Err(e) => {
                report.failed += 1;
                error!(o, "Failed to convert: {} ({e:#})", candidate.path.display());
            }
        }
    }

    if config.dry_run {
        if report.missing > 0 {
            o.newline()?;
            info!(o, "[Dry Run] Total images to be converted: {}", report.missing);
        }
    } else if report.converted > 0 || report.failed > 0 {
        o.newline()?;
        info!(
            o,
            "Converted {} image(s), {} failed",
            report.converted,
            report.failed
        );
    }

    Ok(report)
}

/// Convert a single WebP file into `target`.
fn convert_file(source: &Path, target: &Path, format: Format) -> Result<()> {
    if let Some(parent) = target.parent() {
        create_dir_all(parent)
            .with_context(|| format!("Creating directory {}", parent.display()))?;
    }

    let image = decode(source)?;

    if let Err(e) = encode(&image, target, format) {
        // A partially written file would mark the source as present.
        _ = fs::remove_file(target);
        return Err(e);
    }

    Ok(())
}

fn create_dir_all(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder.create(path)
}

fn decode(path: &Path) -> Result<DynamicImage> {
    let mut reader =
        ImageReader::open(path).with_context(|| format!("Opening {}", path.display()))?;
    reader.set_format(ImageFormat::WebP);
    reader.decode().context("Decoding WebP")
}

fn encode(image: &DynamicImage, path: &Path, format: Format) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Creating {}", path.display()))?;
    let mut out = BufWriter::new(file);

    match format {
        Format::Jpeg => {
            // JPEG has no alpha channel.
            let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
            image
                .to_rgb8()
                .write_with_encoder(encoder)
                .context("Encoding JPEG")?;
        }
        Format::Png => {
            let encoder = PngEncoder::new(&mut out);
            image.write_with_encoder(encoder).context("Encoding PNG")?;
        }
    }

    out.flush()
        .with_context(|| format!("Writing {}", path.display()))?;
    Ok(())
}
