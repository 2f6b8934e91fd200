use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use common::{Codepoint, CodepointRange, UcdFile};
use error::Error;

/// A single entry parsed from the Unicode character database's
/// `Blocks.txt` file.
///
/// A block is a contiguous, named range of codepoints. Blocks are disjoint
/// and, taken together in file order, cover the entire codepoint space.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Block<'a> {
    /// The codepoints that make up this block, inclusive on both ends.
    pub codepoints: CodepointRange,
    /// The human readable name of this block.
    pub name: Cow<'a, str>,
}

impl<'a> Block<'a> {
    /// The first codepoint in this block.
    pub fn start(&self) -> Codepoint {
        self.codepoints.start
    }

    /// The last codepoint in this block, inclusive.
    pub fn end(&self) -> Codepoint {
        self.codepoints.end
    }

    /// Convert this block into an owned value that no longer borrows from
    /// the line it was parsed from.
    pub fn into_owned(self) -> Block<'static> {
        Block {
            codepoints: self.codepoints,
            name: Cow::Owned(self.name.into_owned()),
        }
    }
}

impl UcdFile for Block<'static> {
    fn relative_file_path() -> &'static Path {
        Path::new("Blocks.txt")
    }
}

impl FromStr for Block<'static> {
    type Err = Error;

    fn from_str(line: &str) -> Result<Block<'static>, Error> {
        let mut fields = line.trim().splitn(2, ';');
        let range = match fields.next() {
            Some(field) => field.trim(),
            None => return err!("invalid Blocks line: '{}'", line),
        };
        let name = match fields.next() {
            Some(field) => field.trim(),
            None => return err!("invalid Blocks line: '{}'", line),
        };
        Ok(Block {
            codepoints: range.parse()?,
            name: Cow::Owned(name.to_string()),
        })
    }
}

impl<'a> fmt::Display for Block<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}; {}", self.codepoints, self.name)
    }
}
