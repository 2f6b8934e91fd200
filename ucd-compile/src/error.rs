use std::error::Error as StdError;
use std::fmt;
use std::io;

use ucd_parse;

/// The result type used throughout this crate.
pub type Result<T> = ::std::result::Result<T, Error>;

/// A fatal error encountered while compiling the Unicode character
/// database.
///
/// Fatal errors abort the build before any output file is touched. Less
/// severe problems (a decomposition or composition referencing a missing
/// codepoint, a composition key collision) are reported as diagnostics on
/// stderr instead of through this type; see the `database` module.
#[derive(Debug)]
pub enum Error {
    /// An I/O error, such as a missing input file or an unwritable output
    /// path.
    Io(io::Error),
    /// A malformed line in one of the Unicode character database files.
    Parse(ucd_parse::Error),
    /// Any other unrecoverable condition, described by the given message.
    Other(String),
}

impl Error {
    /// Build an `Other` error from a formatted message.
    pub fn other<S: Into<String>>(msg: S) -> Error {
        Error::Other(msg.into())
    }
}

impl StdError for Error {
    fn description(&self) -> &str {
        match *self {
            Error::Io(ref err) => err.description(),
            Error::Parse(ref err) => err.description(),
            Error::Other(ref msg) => msg,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref err) => err.fmt(f),
            Error::Parse(ref err) => err.fmt(f),
            Error::Other(ref msg) => write!(f, "{}", msg),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<ucd_parse::Error> for Error {
    fn from(err: ucd_parse::Error) -> Error {
        Error::Parse(err)
    }
}
