use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use common::{Codepoint, UcdFile, UcdFileByCodepoint};
use error::Error;

/// A single entry parsed from the Unicode character database's
/// `SpecialCasing.txt` file.
///
/// Each entry describes a "full" case mapping for a codepoint, which may
/// replace a multi-codepoint sequence for the simple mapping found in
/// `UnicodeData.txt`. When `conditions` is non-empty, the mapping only
/// applies in a locale or context-sensitive situation that this type does
/// not otherwise interpret.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SpecialCaseMapping<'a> {
    /// The codepoint this entry applies to.
    pub codepoint: Codepoint,
    /// The full lowercase mapping, if any.
    pub lowercase: Vec<Codepoint>,
    /// The full titlecase mapping, if any.
    pub titlecase: Vec<Codepoint>,
    /// The full uppercase mapping, if any.
    pub uppercase: Vec<Codepoint>,
    /// Any language or context conditions attached to this entry, verbatim.
    ///
    /// When this is non-empty, the mapping is conditional and unconditional
    /// consumers of this data should ignore the entry.
    pub conditions: Cow<'a, str>,
}

impl<'a> SpecialCaseMapping<'a> {
    /// Returns true if and only if this mapping applies unconditionally.
    pub fn is_unconditional(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Convert this mapping into an owned value that no longer borrows from
    /// the line it was parsed from.
    pub fn into_owned(self) -> SpecialCaseMapping<'static> {
        SpecialCaseMapping {
            codepoint: self.codepoint,
            lowercase: self.lowercase,
            titlecase: self.titlecase,
            uppercase: self.uppercase,
            conditions: Cow::Owned(self.conditions.into_owned()),
        }
    }
}

impl UcdFile for SpecialCaseMapping<'static> {
    fn relative_file_path() -> &'static Path {
        Path::new("SpecialCasing.txt")
    }
}

impl UcdFileByCodepoint for SpecialCaseMapping<'static> {
    fn codepoint(&self) -> Codepoint {
        self.codepoint
    }
}

fn parse_codepoints(field: &str) -> Result<Vec<Codepoint>, Error> {
    field
        .split_whitespace()
        .map(|s| s.parse())
        .collect()
}

impl FromStr for SpecialCaseMapping<'static> {
    type Err = Error;

    fn from_str(line: &str) -> Result<SpecialCaseMapping<'static>, Error> {
        let fields: Vec<&str> = line.trim().split(';').map(|f| f.trim()).collect();
        if fields.len() < 4 {
            return err!("invalid SpecialCasing line: '{}'", line);
        }
        Ok(SpecialCaseMapping {
            codepoint: fields[0].parse()?,
            lowercase: parse_codepoints(fields[1])?,
            titlecase: parse_codepoints(fields[2])?,
            uppercase: parse_codepoints(fields[3])?,
            conditions: Cow::Owned(
                fields.get(4).map(|s| s.trim()).unwrap_or("").to_string(),
            ),
        })
    }
}

impl<'a> fmt::Display for SpecialCaseMapping<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}; ", self.codepoint)?;
        for cp in &self.lowercase {
            write!(f, "{} ", cp)?;
        }
        write!(f, "; ")?;
        for cp in &self.titlecase {
            write!(f, "{} ", cp)?;
        }
        write!(f, "; ")?;
        for cp in &self.uppercase {
            write!(f, "{} ", cp)?;
        }
        write!(f, "; {}", self.conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::SpecialCaseMapping;
    use common::Codepoint;

    fn codepoint(n: u32) -> Codepoint {
        Codepoint::from_u32(n).unwrap()
    }

    #[test]
    fn unconditional() {
        let line = "00DF; 00DF; 0053 0073; 0053 0053; # LATIN SMALL LETTER SHARP S\n";
        let line = line.split('#').next().unwrap();
        let m: SpecialCaseMapping = line.parse().unwrap();
        assert!(m.is_unconditional());
        assert_eq!(m.uppercase, vec![codepoint(0x0053), codepoint(0x0053)]);
    }

    #[test]
    fn conditional_is_detected() {
        let line = "0307; 0307; ; 0307; tr After_Soft_Dotted;\n";
        let line = line.split('#').next().unwrap();
        let m: SpecialCaseMapping = line.parse().unwrap();
        assert!(!m.is_unconditional());
    }
}
