use std::{error::Error as StdError, fmt, io};

pub type Result<T> = ::std::result::Result<T, Error>;

pub enum Error {
    Config(String, io::Error),
    Parse(String, serde_yaml::Error),
    Rules(ignore::Error),
    MissingDir(String),
    ToolNotFound(String),
    Io(io::Error),
}

impl StdError for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<ignore::Error> for Error {
    fn from(err: ignore::Error) -> Self {
        Error::Rules(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} error: {}",
            match self {
                Error::Config(_, _) | Error::Parse(_, _) => "Configuration",
                Error::Rules(_) => "Ignore-rule",
                Error::MissingDir(_) => "Path",
                Error::ToolNotFound(_) => "Environment",
                Error::Io(_) => "I/O",
            },
            match self {
                Error::Config(path, err) => {
                    format!("couldn't read '{}':\n{}", path, err)
                }
                Error::Parse(path, err) => {
                    format!("couldn't parse '{}':\n{}", path, err)
                }
                Error::MissingDir(path) => format!("directory '{}' does not exist", path),
                Error::ToolNotFound(tool) => format!("'{}' not found on PATH", tool),
                Error::Rules(err) => format!("{}", err),
                Error::Io(err) => format!("{}", err),
            }
        )
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
