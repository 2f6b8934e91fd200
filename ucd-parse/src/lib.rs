/*!
A library for parsing the data files used by the Unicode character
database that this project's table compiler consumes: `UnicodeData.txt`,
`Blocks.txt` and `SpecialCasing.txt`.
*/

#![deny(missing_docs)]

#[macro_use]
extern crate lazy_static;
extern crate regex;

pub use common::{
    parse, parse_by_codepoint, parse_many_by_codepoint,
    Codepoint, CodepointIter, CodepointRange, UcdFile, UcdFileByCodepoint,
    UcdLineParser,
};
pub use error::{Error, ErrorKind};

pub use blocks::Block;
pub use special_casing::SpecialCaseMapping;
pub use unicode_data::{
    UnicodeData, UnicodeDataDecomposition, UnicodeDataDecompositionTag,
    UnicodeDataNumeric,
};

macro_rules! err {
    ($($tt:tt)*) => {
        Err($crate::error::Error::parse(format!($($tt)*)))
    }
}

mod common;
mod error;

mod blocks;
mod special_casing;
mod unicode_data;
