//! slog loggers for the terminal and an optional log file

use std::error;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io as std_io;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use std::str::FromStr;

use chrono::prelude::*;
pub use slog::FilterLevel as Level;
use slog::{Discard, Drain, Duplicate, Fuse, Level as LogLevel, LevelFilter, Logger, OwnedKV,
           SendSyncRefUnwindSafeKV};
use slog_async::Async;
use slog_term::{CompactFormat, Decorator, FullFormat, PlainDecorator, TermDecorator};

pub use self::app::AppLogger;

mod app;

use crate::utils;

#[derive(Debug)]
pub enum Stream {
    StdOut,
    StdErr,
    File(File),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Full,
    Compact,
}

type FilteredDrain = LevelFilter<Fuse<Async>>;

#[derive(Debug)]
pub struct LoggerBuilder {
    stream: Stream,
    level: Level,
    format: Format,
}

impl LoggerBuilder {
    pub fn new(stream: Stream) -> Self {
        LoggerBuilder {
            stream: stream,
            level: Level::Debug,
            format: Format::Full,
        }
    }

    pub fn level(mut self, l: Level) -> Self {
        self.level = l;
        self
    }

    pub fn format(mut self, f: Format) -> Self {
        self.format = f;
        self
    }

    pub fn build<T>(self, values: OwnedKV<T>) -> Logger
    where
        T: SendSyncRefUnwindSafeKV + 'static,
    {
        match self.into_drain() {
            Some(drain) => Logger::root(drain.fuse(), values),
            None => Logger::root(Discard, values),
        }
    }

    /// Sends every record to both builders' streams, each with its own level.
    pub fn build_with<T>(self, other: LoggerBuilder, values: OwnedKV<T>) -> Logger
    where
        T: SendSyncRefUnwindSafeKV + 'static,
    {
        match (self.into_drain(), other.into_drain()) {
            (Some(d1), Some(d2)) => Logger::root(Duplicate::new(d1, d2).fuse(), values),
            (Some(d), None) | (None, Some(d)) => Logger::root(d.fuse(), values),
            (None, None) => Logger::root(Discard, values),
        }
    }

    /// `None` for the null stream and for `Level::Off`.
    fn into_drain(self) -> Option<FilteredDrain> {
        let level = LogLevel::from_usize(self.level.as_usize())?;
        let format = self.format;
        let drain = match self.stream {
            Stream::StdOut => wrap(TermDecorator::new().stdout().build(), format),
            Stream::StdErr => wrap(TermDecorator::new().stderr().build(), format),
            Stream::File(f) => wrap(PlainDecorator::new(f), format),
            Stream::Null => return None,
        };
        Some(LevelFilter::new(drain, level))
    }
}

fn wrap<D: Decorator + Send + 'static>(decorator: D, format: Format) -> Fuse<Async> {
    let drain = match format {
        Format::Compact => {
            let drain = CompactFormat::new(decorator).use_local_timestamp().build();
            Async::new(drain.fuse()).build()
        }
        Format::Full => {
            let drain = FullFormat::new(decorator).use_local_timestamp().build();
            Async::new(drain.fuse()).build()
        }
    };
    drain.fuse()
}

#[derive(Debug)]
pub enum Error {
    InvalidFilename(String),
    InvalidFileMode(String),
    Io(std_io::Error),
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Io(ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidFilename(ref name) => write!(f, "invalid log filename: `{}`", name),
            Error::InvalidFileMode(ref mode) => write!(f, "invalid log file mode: `{}`", mode),
            Error::Io(ref e) => e.fmt(f),
        }
    }
}

impl From<std_io::Error> for Error {
    fn from(e: std_io::Error) -> Self {
        Error::Io(e)
    }
}

/// How an existing log file is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    Truncate,
    Append,
    /// Opens `<stem>-<n><ext>` with the first unused `n`.
    Numbered,
}

impl FromStr for FileMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" | "truncate" => Ok(FileMode::Truncate),
            "a" | "append" => Ok(FileMode::Append),
            "n" | "numbered" => Ok(FileMode::Numbered),
            _ => Err(Error::InvalidFileMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileConfig {
    pub level: Level,
    pub dir: PathBuf,
    /// chrono format string for the file stem, e.g. `%Y%m%d.log`.
    pub filename: String,
    pub mode: FileMode,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub mkdir: bool,
}

impl FileConfig {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        FileConfig {
            level: Level::Debug,
            dir: dir.into(),
            filename: "%Y%m%d.log".to_string(),
            mode: FileMode::Append,
            prefix: None,
            suffix: None,
            mkdir: false,
        }
    }

    /// Resolves the file path for `time`, creating the directory when `mkdir` is set.
    pub fn resolve<Tz: TimeZone>(&self, time: &DateTime<Tz>) -> Result<PathBuf, Error>
    where
        Tz::Offset: fmt::Display,
    {
        let dir = utils::path::expandtilde(&self.dir);
        if !dir.is_dir() {
            if self.mkdir {
                fs::create_dir_all(&dir)?;
            } else {
                return Err(Error::Io(std_io::Error::new(
                    std_io::ErrorKind::NotFound,
                    format!("`{}` is not a directory", dir.display()),
                )));
            }
        }

        if self.filename.contains(MAIN_SEPARATOR) {
            return Err(Error::InvalidFilename(self.filename.clone()));
        }
        let filename = Path::new(&self.filename);
        let stem = match filename.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem,
            None => return Err(Error::InvalidFilename(self.filename.clone())),
        };
        let stem = format!(
            "{}{}{}",
            self.prefix.as_ref().map_or("", |s| s.as_str()),
            time.format(stem),
            self.suffix.as_ref().map_or("", |s| s.as_str())
        );
        let ext = filename
            .extension()
            .map(|s| format!(".{}", s.to_string_lossy()))
            .unwrap_or_default();

        match self.mode {
            FileMode::Numbered => Ok((0..)
                .map(|n| dir.join(format!("{}-{}{}", stem, n, ext)))
                .find(|path| !path.exists())
                .unwrap_or_else(|| dir.join(format!("{}{}", stem, ext)))),
            _ => Ok(dir.join(format!("{}{}", stem, ext))),
        }
    }

    pub fn open<Tz: TimeZone>(&self, time: &DateTime<Tz>) -> Result<(File, PathBuf), Error>
    where
        Tz::Offset: fmt::Display,
    {
        let path = self.resolve(time)?;
        let mut options = OpenOptions::new();
        options.create(true);
        match self.mode {
            FileMode::Append => options.append(true),
            FileMode::Truncate | FileMode::Numbered => options.write(true).truncate(true),
        };
        let file = options.open(&path)?;
        Ok((file, path))
    }
}

/// Terminal output at `verbosity`, plus an optional log file with its own level.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub verbosity: Level,
    pub use_stderr: bool,
    pub format: Format,
    pub file: Option<FileConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            verbosity: Level::Info,
            use_stderr: true,
            format: Format::Full,
            file: None,
        }
    }
}

pub fn create_logger<C: Into<Config>>(config: C) -> Result<Logger, Error> {
    create_logger_with_kv_and_time(config, o!(), &Local::now()).map(|(logger, _)| logger)
}

/// Also returns the path of the log file, if one was opened.
pub fn create_logger_with_kv_and_time<C: Into<Config>, T, Tz: TimeZone>(
    config: C,
    values: OwnedKV<T>,
    time: &DateTime<Tz>,
) -> Result<(Logger, Option<PathBuf>), Error>
where
    T: SendSyncRefUnwindSafeKV + 'static,
    Tz::Offset: fmt::Display,
{
    let c = config.into();
    let (fbuilder, filepath) = match c.file {
        Some(ref fc) if fc.level != Level::Off => {
            let (file, path) = fc.open(time)?;
            let builder = LoggerBuilder::new(Stream::File(file)).level(fc.level);
            (builder, Some(path))
        }
        _ => (LoggerBuilder::new(Stream::Null), None),
    };
    let vstream = if c.use_stderr {
        Stream::StdErr
    } else {
        Stream::StdOut
    };
    let logger = LoggerBuilder::new(vstream)
        .level(c.verbosity)
        .format(c.format)
        .build_with(fbuilder.format(c.format), values);
    Ok((logger, filepath))
}
