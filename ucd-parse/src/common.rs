use std::fmt;
use std::io::{self, BufRead, Read};
use std::path::Path;
use std::str::FromStr;

use error::{Error, ErrorKind};

/// A Unicode scalar value, in the range `[0, 0x10FFFF]`.
///
/// Note that unlike `char`, a `Codepoint` may be a surrogate. This is
/// necessary because a handful of Unicode character database files
/// assign properties to surrogate codepoints.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Codepoint(u32);

impl Codepoint {
    /// Create a new codepoint from a `u32`.
    ///
    /// If the given value is not a valid Unicode codepoint, then `None`
    /// is returned.
    pub fn from_u32(n: u32) -> Option<Codepoint> {
        if n > 0x10FFFF {
            None
        } else {
            Some(Codepoint(n))
        }
    }

    /// Return the underlying `u32` value.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Return this codepoint as a `char`, if it corresponds to one.
    ///
    /// Surrogate codepoints do not correspond to a `char` and yield `None`.
    pub fn scalar(&self) -> Option<char> {
        ::std::char::from_u32(self.0)
    }
}

impl FromStr for Codepoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Codepoint, Error> {
        let n = match u32::from_str_radix(s, 16) {
            Ok(n) => n,
            Err(err) => {
                return Err(Error::parse(format!(
                    "failed to parse codepoint '{}': {}", s, err)));
            }
        };
        Codepoint::from_u32(n).ok_or_else(|| {
            Error::new(ErrorKind::InvalidCodepoint(n as u64))
        })
    }
}

impl fmt::Display for Codepoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

/// A range of codepoints, as written in many Unicode character database
/// files in the form `HHHH..HHHH` (or a single `HHHH` for a range of one).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CodepointRange {
    /// The beginning of this range, inclusive.
    pub start: Codepoint,
    /// The end of this range, inclusive.
    pub end: Codepoint,
}

impl CodepointRange {
    /// Return an iterator over every codepoint in this range.
    pub fn iter(&self) -> CodepointIter {
        CodepointIter { next: self.start.value(), end: self.end.value() }
    }
}

impl FromStr for CodepointRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<CodepointRange, Error> {
        if let Some(pos) = s.find("..") {
            let start = s[..pos].parse()?;
            let end = s[pos + 2..].parse()?;
            Ok(CodepointRange { start: start, end: end })
        } else {
            let cp = s.parse()?;
            Ok(CodepointRange { start: cp, end: cp })
        }
    }
}

impl fmt::Display for CodepointRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// An iterator over every codepoint in a `CodepointRange`.
pub struct CodepointIter {
    next: u32,
    end: u32,
}

impl Iterator for CodepointIter {
    type Item = Codepoint;

    fn next(&mut self) -> Option<Codepoint> {
        if self.next > self.end {
            return None;
        }
        let cp = Codepoint::from_u32(self.next).unwrap();
        self.next += 1;
        Some(cp)
    }
}

/// A helper trait for describing a file that's part of the Unicode
/// character database.
pub trait UcdFile: Default {
    /// The relative path of this file, with respect to the root of the
    /// Unicode character database.
    fn relative_file_path() -> &'static Path;
}

/// A helper trait for describing a record that is keyed by a single
/// codepoint.
pub trait UcdFileByCodepoint: UcdFile {
    /// The codepoint corresponding to this record.
    fn codepoint(&self) -> Codepoint;
}

/// An iterator over the non-comment, non-blank lines of a data file in the
/// Unicode character database, yielding parsed records of type `D`.
///
/// Each line is trimmed of any trailing `#`-delimited comment before being
/// handed to `D::from_str`.
pub struct UcdLineParser<R, D> {
    rdr: io::BufReader<R>,
    line: String,
    _data: ::std::marker::PhantomData<D>,
}

impl<D> UcdLineParser<::std::fs::File, D> {
    /// Create a new parser from the given file path.
    pub fn open<P: AsRef<Path>>(
        path: P,
    ) -> io::Result<UcdLineParser<::std::fs::File, D>> {
        let file = ::std::fs::File::open(path)?;
        Ok(UcdLineParser::new(file))
    }
}

impl<R: Read, D> UcdLineParser<R, D> {
    /// Create a new parser that parses the reader given.
    ///
    /// The reader should point to uncompressed, UTF-8 encoded text of a
    /// single data file from the Unicode character database.
    pub fn new(rdr: R) -> UcdLineParser<R, D> {
        UcdLineParser {
            rdr: io::BufReader::new(rdr),
            line: String::new(),
            _data: ::std::marker::PhantomData,
        }
    }
}

impl<R: Read, D: FromStr<Err = Error>> Iterator for UcdLineParser<R, D> {
    type Item = Result<D, Error>;

    fn next(&mut self) -> Option<Result<D, Error>> {
        loop {
            self.line.clear();
            let n = match self.rdr.read_line(&mut self.line) {
                Err(err) => return Some(Err(Error::parse(err.to_string()))),
                Ok(n) => n,
            };
            if n == 0 {
                return None;
            }
            let line = self.line[..n].trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line = match line.find('#') {
                Some(i) => line[..i].trim_right(),
                None => line,
            };
            return Some(line.parse());
        }
    }
}

/// Parse every record in the given file into a vector.
pub fn parse<P, D>(ucd_dir: P) -> Result<Vec<D>, Error>
where
    P: AsRef<Path>,
    D: UcdFile + FromStr<Err = Error>,
{
    let path = ucd_dir.as_ref().join(D::relative_file_path());
    let rdr = UcdLineParser::open(path)
        .map_err(|err| Error::parse(err.to_string()))?;
    rdr.collect()
}

/// Parse every record in the given file, keyed by codepoint.
///
/// Note that this assumes every codepoint in the file is distinct. Callers
/// needing to support multiple records per codepoint should use
/// `parse_many_by_codepoint` instead.
pub fn parse_by_codepoint<P, D>(
    ucd_dir: P,
) -> Result<::std::collections::BTreeMap<Codepoint, D>, Error>
where
    P: AsRef<Path>,
    D: UcdFileByCodepoint + FromStr<Err = Error>,
{
    let mut map = ::std::collections::BTreeMap::new();
    for result in parse::<P, D>(ucd_dir)? {
        map.insert(result.codepoint(), result);
    }
    Ok(map)
}

/// Parse every record in the given file, grouped by codepoint.
///
/// This is useful for files such as `SpecialCasing.txt`, where a codepoint
/// may appear on more than one line.
pub fn parse_many_by_codepoint<P, D>(
    ucd_dir: P,
) -> Result<
    ::std::collections::BTreeMap<Codepoint, Vec<D>>,
    Error,
>
where
    P: AsRef<Path>,
    D: UcdFileByCodepoint + FromStr<Err = Error>,
{
    let mut map: ::std::collections::BTreeMap<Codepoint, Vec<D>> =
        ::std::collections::BTreeMap::new();
    for result in parse::<P, D>(ucd_dir)? {
        map.entry(result.codepoint()).or_insert_with(Vec::new).push(result);
    }
    Ok(map)
}
