use std::error::Error as StdError;
use std::fmt;
use std::num;

/// An error that can occur while parsing the Unicode character database.
#[derive(Clone, Debug)]
pub struct Error {
    kind: ErrorKind,
}

/// The kind of error that can occur while parsing the Unicode character
/// database.
#[derive(Clone, Debug)]
pub enum ErrorKind {
    /// An error that occurs when a codepoint value is invalid.
    InvalidCodepoint(u64),
    /// An error that occurs when a line of data is not formatted correctly.
    InvalidLineFormat,
    /// An error that occurs when an integer fails to parse.
    ParseInt(num::ParseIntError),
    /// A catch-all for any other kind of parse error.
    Parse(String),
}

impl Error {
    /// Create a new error from the given kind.
    pub fn new(kind: ErrorKind) -> Error {
        Error { kind: kind }
    }

    /// Create a new "parse" error from the given message.
    pub fn parse<S: Into<String>>(msg: S) -> Error {
        Error::new(ErrorKind::Parse(msg.into()))
    }

    /// Return the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl StdError for Error {
    fn description(&self) -> &str {
        match self.kind {
            ErrorKind::InvalidCodepoint(_) => "invalid codepoint",
            ErrorKind::InvalidLineFormat => "invalid line format",
            ErrorKind::ParseInt(ref err) => err.description(),
            ErrorKind::Parse(ref msg) => msg,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ErrorKind::InvalidCodepoint(n) => {
                write!(f, "invalid codepoint: 0x{:X}", n)
            }
            ErrorKind::InvalidLineFormat => {
                write!(f, "invalid line format")
            }
            ErrorKind::ParseInt(ref err) => err.fmt(f),
            ErrorKind::Parse(ref msg) => write!(f, "{}", msg),
        }
    }
}

impl From<num::ParseIntError> for Error {
    fn from(err: num::ParseIntError) -> Error {
        Error::new(ErrorKind::ParseInt(err))
    }
}
