use core::fmt;

use std::io;

use termcolor::{Color, ColorSpec, WriteColor};

/// The kind of a line written through [`Out`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Level {
    Blank,
    Info,
    Warn,
    Error,
}

impl Level {
    fn prefix(self) -> Option<(&'static str, Color)> {
        match self {
            Level::Blank | Level::Info => None,
            Level::Warn => Some(("warning", Color::Yellow)),
            Level::Error => Some(("error", Color::Red)),
        }
    }

    fn color(self) -> Option<Color> {
        match self {
            Level::Info => Some(Color::Green),
            _ => None,
        }
    }
}

/// Line-oriented output.
pub(crate) struct Out<'a> {
    o: &'a mut dyn WriteColor,
}

impl<'a> Out<'a> {
    pub(crate) fn new(o: &'a mut dyn WriteColor) -> Self {
        Self { o }
    }

    /// Write an empty line.
    pub(crate) fn newline(&mut self) -> io::Result<()> {
        writeln!(self.o)
    }

    #[doc(hidden)]
    pub(crate) fn line(&mut self, level: Level, args: fmt::Arguments<'_>) -> io::Result<()> {
        if let Some((prefix, color)) = level.prefix() {
            self.o
                .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
            write!(self.o, "{prefix}")?;
            self.o.reset()?;
            write!(self.o, ": ")?;
        }

        if let Some(color) = level.color() {
            self.o.set_color(ColorSpec::new().set_fg(Some(color)))?;
            self.o.write_fmt(args)?;
            self.o.reset()?;
        } else {
            self.o.write_fmt(args)?;
        }

        writeln!(self.o)
    }
}

macro_rules! blank {
    ($o:expr, $($arg:tt)*) => {
        $o.line($crate::out::Level::Blank, format_args!($($arg)*))?
    };
}

macro_rules! info {
    ($o:expr, $($arg:tt)*) => {
        $o.line($crate::out::Level::Info, format_args!($($arg)*))?
    };
}

macro_rules! warning {
    ($o:expr, $($arg:tt)*) => {
        $o.line($crate::out::Level::Warn, format_args!($($arg)*))?
    };
}

macro_rules! error {
    ($o:expr, $($arg:tt)*) => {
        $o.line($crate::out::Level::Error, format_args!($($arg)*))?
    };
}

pub(crate) use {blank, error, info, warning};
