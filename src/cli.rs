use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use termcolor::{ColorChoice, StandardStream};

use crate::config::{Config, Naming, Scope};
use crate::out::{Out, warning};

#[derive(Default, Debug, Clone, Copy, ValueEnum)]
enum Color {
    /// Color output when writing to a terminal.
    #[default]
    Auto,
    /// Always color output.
    Always,
    /// Never color output.
    Never,
}

/// Fill in missing JPG and PNG files for a tree of WebP images.
#[derive(Debug, Args)]
pub struct Webpvert {
    /// Directory containing WebP images.
    source: PathBuf,
    /// Directory where converted JPG and PNG images are stored.
    dest: PathBuf,
    /// Only process the given year. Requires `--month`.
    #[arg(long, value_name = "YYYY")]
    year: Option<u16>,
    /// Only process the given month. Requires `--year`.
    #[arg(long, value_name = "MM", value_parser = clap::value_parser!(u8).range(1..=12))]
    month: Option<u8>,
    /// Only report which images would be created.
    #[arg(long)]
    dry_run: bool,
    /// How JPG and PNG file names are derived from WebP file names.
    #[arg(long, value_enum, default_value_t)]
    naming: Naming,
    /// Also report images which already exist or are skipped.
    #[arg(long, short)]
    verbose: bool,
    /// Control colored output.
    #[arg(long, value_enum, default_value_t)]
    color: Color,
}

/// Entry point for the `webpvert` command.
pub fn entry(opts: &Webpvert) -> Result<()> {
    let choice = match opts.color {
        Color::Auto if std::io::stdout().is_terminal() => ColorChoice::Auto,
        Color::Auto | Color::Never => ColorChoice::Never,
        Color::Always => ColorChoice::Always,
    };

    let stdout = StandardStream::stdout(choice);
    let mut stdout = stdout.lock();
    let mut o = Out::new(&mut stdout);

    let scope = match (opts.year, opts.month) {
        (Some(year), Some(month)) => Some(Scope::new(year, month)),
        (None, None) => None,
        _ => {
            warning!(
                o,
                "--year and --month must be used together, processing all directories"
            );
            None
        }
    };

    let config = Config {
        source: opts.source.clone(),
        dest: opts.dest.clone(),
        scope,
        dry_run: opts.dry_run,
        naming: opts.naming,
        verbose: opts.verbose,
    };

    crate::convert::run(&config, &mut o)?;
    Ok(())
}
