//! The in-memory codepoint database and the passes that populate it.
//!
//! This is the heart of the compiler: ingest the three UCD source files
//! into a single codepoint-keyed model, resolve canonical/compatibility
//! decomposition and its inverse (composition), fold in the special-casing
//! overrides, and encode every variable-length string onto the blob
//! interner so the emitter can address it by a stable offset.

use std::collections::BTreeMap;
use std::path::Path;

use ucd_parse::{self, Codepoint, SpecialCaseMapping, UnicodeData, UnicodeDataNumeric};

use enums::{BidiClass, DecompositionType, GeneralCategory, NumericType};
use error::{Error, Result};
use interner::BlobInterner;
use util::encode_utf8;

/// The six large blocks of the codepoint space that `UnicodeData.txt`
/// represents only by their endpoints. Every interior codepoint is
/// synthesized with default properties during range expansion.
const RANGE_EXPANDED_BLOCKS: &'static [&'static str] = &[
    "CJK Unified Ideographs Extension A",
    "CJK Unified Ideographs",
    "Hangul Syllables",
    "CJK Unified Ideographs Extension B",
    "CJK Unified Ideographs Extension C",
    "CJK Unified Ideographs Extension D",
];

/// Knobs that affect only diagnostics or the shape of a partial,
/// debugging-oriented run. None of these change the meaning of a record
/// that does get built.
#[derive(Clone, Debug)]
pub struct BuildOptions {
    /// Enable interner tracing and extra diagnostics on stderr.
    pub verbose: bool,
    /// Stop reading `UnicodeData.txt` after this many physical lines.
    pub line_limit: Option<usize>,
    /// Keep at most this many successfully parsed entries.
    pub entry_limit: Option<usize>,
    /// Skip this many successfully parsed entries before collecting any.
    pub entry_skip: usize,
}

impl Default for BuildOptions {
    fn default() -> BuildOptions {
        BuildOptions {
            verbose: false,
            line_limit: None,
            entry_limit: None,
            entry_skip: 0,
        }
    }
}

/// A single codepoint's resolved properties.
///
/// This is the central entity the rest of the compiler operates on. Fields
/// that hold interned blob offsets are `0` until the corresponding pass
/// runs, and stay `0` afterward if the sequence was absent, ASCII-excluded,
/// or identical to the codepoint's own UTF-8 encoding.
#[derive(Clone, Debug)]
pub struct CodepointRecord {
    /// This record's codepoint.
    pub codepoint: Codepoint,
    /// The codepoint's name; empty for records synthesized by range
    /// expansion.
    pub name: String,
    /// The `General_Category` property.
    pub general_category: GeneralCategory,
    /// The canonical combining class, `0..=254`.
    pub canonical_combining_class: u8,
    /// The `Bidi_Class` property.
    pub bidi_class: BidiClass,
    /// The kind of decomposition this codepoint has, if any.
    pub decomposition_type: DecompositionType,
    /// The raw (single-level) decomposition mapping, never containing this
    /// record's own codepoint.
    pub decomposition_codepoints: Vec<Codepoint>,
    /// The kind of numeric value this codepoint has, if any.
    pub numeric_type: NumericType,
    /// The numeric value, meaningful only when `numeric_type` isn't `None`.
    pub numeric_value: f64,
    /// Whether this codepoint is mirrored in bidirectional text.
    pub bidi_mirrored: bool,
    /// Simple or full uppercase mapping.
    pub uppercase: Vec<Codepoint>,
    /// Simple or full lowercase mapping.
    pub lowercase: Vec<Codepoint>,
    /// Simple or full titlecase mapping.
    pub titlecase: Vec<Codepoint>,
    /// The fully resolved canonical decomposition.
    pub decomposed_nfd: Vec<Codepoint>,
    /// The fully resolved canonical + compatibility decomposition.
    pub decomposed_nfkd: Vec<Codepoint>,
    /// Canonical compositions for which this codepoint is the first
    /// element: maps the second element to the composed codepoint.
    pub composition_pairs: BTreeMap<Codepoint, Codepoint>,
    /// Blob offset of `decomposed_nfd`'s UTF-8 encoding, or `0`.
    pub offset_nfd: u32,
    /// Blob offset of `decomposed_nfkd`'s UTF-8 encoding, or `0`.
    pub offset_nfkd: u32,
    /// Blob offset of `uppercase`'s UTF-8 encoding, or `0`.
    pub offset_uppercase: u32,
    /// Blob offset of `lowercase`'s UTF-8 encoding, or `0`.
    pub offset_lowercase: u32,
    /// Blob offset of `titlecase`'s UTF-8 encoding, or `0`.
    pub offset_titlecase: u32,
    /// Index into `Database::blocks` of the block containing this
    /// codepoint, once block resolution has run.
    pub block: Option<usize>,
}

impl CodepointRecord {
    /// Create a default record for the given codepoint: unassigned,
    /// unnamed, with no decomposition, numeric value, or case mapping.
    ///
    /// This is used both as the starting point for a parsed
    /// `UnicodeData.txt` row and directly by range expansion.
    pub fn new(codepoint: Codepoint) -> CodepointRecord {
        CodepointRecord {
            codepoint: codepoint,
            name: String::new(),
            general_category: GeneralCategory::default(),
            canonical_combining_class: 0,
            bidi_class: BidiClass::default(),
            decomposition_type: DecompositionType::default(),
            decomposition_codepoints: Vec::new(),
            numeric_type: NumericType::default(),
            numeric_value: 0.0,
            bidi_mirrored: false,
            uppercase: Vec::new(),
            lowercase: Vec::new(),
            titlecase: Vec::new(),
            decomposed_nfd: Vec::new(),
            decomposed_nfkd: Vec::new(),
            composition_pairs: BTreeMap::new(),
            offset_nfd: 0,
            offset_nfkd: 0,
            offset_uppercase: 0,
            offset_lowercase: 0,
            offset_titlecase: 0,
            block: None,
        }
    }

    fn from_unicode_data(ud: &UnicodeData<'static>) -> Result<CodepointRecord> {
        let mut rec = CodepointRecord::new(ud.codepoint);
        rec.name = ud.name.to_string();
        rec.general_category = ud.general_category.parse()?;
        rec.canonical_combining_class = ud.canonical_combining_class;
        rec.bidi_class = ud.bidi_class.parse()?;
        rec.decomposition_type = DecompositionType::from(ud.decomposition.tag.as_ref());

        // `ucd_parse::UnicodeData` uses `mapping() == [codepoint]` as a
        // sentinel for "no decomposition was present" (see its
        // `parse_line`), which we translate back to an empty mapping here
        // so `decomposition_codepoints` never contains this record's own
        // codepoint.
        let mapping = ud.decomposition.mapping();
        if ud.decomposition.is_canonical() && mapping == &[ud.codepoint] {
            rec.decomposition_codepoints = Vec::new();
        } else {
            rec.decomposition_codepoints = mapping.to_vec();
        }

        let (ty, value) = numeric_fields(
            ud.numeric_type_decimal,
            ud.numeric_type_digit,
            ud.numeric_type_numeric,
        )?;
        rec.numeric_type = ty;
        rec.numeric_value = value;

        rec.bidi_mirrored = ud.bidi_mirrored;
        if let Some(cp) = ud.simple_uppercase_mapping {
            rec.uppercase.push(cp);
        }
        if let Some(cp) = ud.simple_lowercase_mapping {
            rec.lowercase.push(cp);
        }
        if let Some(cp) = ud.simple_titlecase_mapping {
            rec.titlecase.push(cp);
        }
        Ok(rec)
    }
}

fn numeric_fields(
    decimal: Option<u8>,
    digit: Option<u8>,
    numeric: Option<UnicodeDataNumeric>,
) -> Result<(NumericType, f64)> {
    Ok(match (decimal, digit, numeric) {
        (None, None, None) => (NumericType::None, 0.0),
        (Some(_), Some(_), Some(n)) => (NumericType::Decimal, n.as_f64()),
        (None, Some(_), Some(n)) => (NumericType::Digit, n.as_f64()),
        (None, None, Some(n)) => (NumericType::Numeric, n.as_f64()),
        _ => return err!(
            "unexpected combination of numeric fields: \
             decimal={:?} digit={:?} numeric={:?}", decimal, digit, numeric),
    })
}

/// The owning model for an entire compilation run: every record, every
/// block, and the blob interner they share.
pub struct Database {
    records: Vec<CodepointRecord>,
    index: BTreeMap<u32, usize>,
    blocks: Vec<ucd_parse::Block<'static>>,
    interner: BlobInterner,
    verbose: bool,
}

impl Database {
    /// Build a database from the three Unicode character database files
    /// under `ucd_dir`, running every resolution pass described in this
    /// module's documentation.
    pub fn build(ucd_dir: &Path, opts: &BuildOptions) -> Result<Database> {
        let mut db = Database {
            records: Vec::new(),
            index: BTreeMap::new(),
            blocks: Vec::new(),
            interner: BlobInterner::new(),
            verbose: opts.verbose,
        };
        db.ingest_unicode_data(ucd_dir, opts)?;
        db.ingest_blocks(ucd_dir)?;
        db.resolve_blocks()?;
        db.expand_ranges()?;
        db.resolve_decompositions();
        db.encode_decompositions();
        db.resolve_compositions();
        db.apply_special_casing(ucd_dir)?;
        db.encode_case_mappings();
        Ok(db)
    }

    /// All records, in ascending codepoint order.
    pub fn records(&self) -> &[CodepointRecord] {
        &self.records
    }

    /// All blocks, in the order they appeared in `Blocks.txt`.
    pub fn blocks(&self) -> &[ucd_parse::Block<'static>] {
        &self.blocks
    }

    /// The name of the block assigned to `record`, if block resolution has
    /// run.
    pub fn block_name<'a>(&'a self, record: &CodepointRecord) -> Option<&'a str> {
        record.block.map(|i| &*self.blocks[i].name)
    }

    /// The blob interner backing every offset in this database.
    pub fn interner(&self) -> &BlobInterner {
        &self.interner
    }

    /// Look up a record by codepoint.
    pub fn get(&self, codepoint: Codepoint) -> Option<&CodepointRecord> {
        self.index.get(&codepoint.value()).map(|&i| &self.records[i])
    }

    /// Build a database directly from already-constructed records, skipping
    /// every ingest/resolve pass. Used by other modules' tests to exercise
    /// the emitter against a small fixture without going through a real
    /// Unicode character database directory.
    #[cfg(test)]
    pub fn from_records(records: Vec<CodepointRecord>) -> Database {
        let mut db = Database {
            records: records,
            index: BTreeMap::new(),
            blocks: Vec::new(),
            interner: BlobInterner::new(),
            verbose: false,
        };
        db.sort_and_reindex();
        db
    }

    fn ingest_unicode_data(
        &mut self,
        ucd_dir: &Path,
        opts: &BuildOptions,
    ) -> Result<()> {
        let entries = load_unicode_data(ucd_dir, opts)?;
        for ud in &entries {
            match CodepointRecord::from_unicode_data(ud) {
                Ok(rec) => {
                    let cp = rec.codepoint.value();
                    let idx = self.records.len();
                    self.records.push(rec);
                    self.index.insert(cp, idx);
                }
                Err(err) => {
                    eprintln!(
                        "skipping codepoint {}: {}", ud.codepoint, err);
                }
            }
        }
        self.sort_and_reindex();
        Ok(())
    }

    fn ingest_blocks(&mut self, ucd_dir: &Path) -> Result<()> {
        self.blocks = ucd_parse::parse(ucd_dir)?;
        Ok(())
    }

    fn sort_and_reindex(&mut self) {
        self.records.sort_by_key(|r| r.codepoint.value());
        self.index.clear();
        for (i, r) in self.records.iter().enumerate() {
            self.index.insert(r.codepoint.value(), i);
        }
    }

    /// Assign each record the block that contains it.
    ///
    /// Advances a cursor into the (ascending, file-ordered) block list with
    /// a `while` loop rather than a single `if`, so a record that skips
    /// over more than one block boundary still lands in the right place.
    fn resolve_blocks(&mut self) -> Result<()> {
        if self.blocks.is_empty() {
            return err!("no blocks were loaded from Blocks.txt");
        }
        let mut cursor = 0usize;
        for i in 0..self.records.len() {
            let cp = self.records[i].codepoint.value();
            while cursor < self.blocks.len()
                && cp > self.blocks[cursor].end().value()
            {
                cursor += 1;
            }
            if cursor >= self.blocks.len() {
                return err!(
                    "codepoint {} falls outside every block",
                    self.records[i].codepoint);
            }
            self.records[i].block = Some(cursor);
        }
        Ok(())
    }

    /// Synthesize default records for every codepoint in the interior of
    /// the six range-expanded blocks that isn't already present.
    fn expand_ranges(&mut self) -> Result<()> {
        let mut synthesized = Vec::new();
        for &name in RANGE_EXPANDED_BLOCKS {
            let block_idx = match self.blocks.iter().position(|b| b.name == name) {
                Some(i) => i,
                None => return err!("block '{}' not found in Blocks.txt", name),
            };
            let (start, end) = {
                let b = &self.blocks[block_idx];
                (b.start().value(), b.end().value())
            };
            for c in (start + 1)..end {
                if self.index.contains_key(&c) {
                    continue;
                }
                let cp = Codepoint::from_u32(c).unwrap();
                let mut rec = CodepointRecord::new(cp);
                rec.block = Some(block_idx);
                synthesized.push(rec);
            }
        }
        for rec in synthesized {
            let cp = rec.codepoint.value();
            let idx = self.records.len();
            self.records.push(rec);
            self.index.insert(cp, idx);
        }
        self.sort_and_reindex();
        Ok(())
    }

    /// Transitively resolve the decomposition of `codepoint`.
    ///
    /// When `allow_compat` is false, only canonical decompositions are
    /// followed (yielding NFD); when true, any non-empty decomposition is
    /// followed regardless of its tag (yielding NFKD).
    fn resolve(&self, codepoint: Codepoint, allow_compat: bool) -> Vec<Codepoint> {
        let rec = match self.index.get(&codepoint.value()) {
            Some(&i) => &self.records[i],
            None => {
                eprintln!(
                    "missing codepoint {} referenced during decomposition",
                    codepoint);
                return vec![codepoint];
            }
        };
        if !rec.decomposition_codepoints.is_empty()
            && (allow_compat || rec.decomposition_type.is_canonical())
        {
            let mut out = Vec::with_capacity(rec.decomposition_codepoints.len());
            for &c in &rec.decomposition_codepoints {
                out.extend(self.resolve(c, allow_compat));
            }
            out
        } else {
            vec![rec.codepoint]
        }
    }

    fn resolve_decompositions(&mut self) {
        for i in 0..self.records.len() {
            let cp = self.records[i].codepoint;
            let nfd = self.resolve(cp, false);
            let nfkd = self.resolve(cp, true);
            self.records[i].decomposed_nfd = nfd;
            self.records[i].decomposed_nfkd = nfkd;
        }
    }

    fn encode_decompositions(&mut self) {
        for i in 0..self.records.len() {
            let cp = self.records[i].codepoint;
            let identity = encode_utf8(&[cp]);

            let nfd = encode_utf8(&self.records[i].decomposed_nfd);
            self.records[i].offset_nfd = if nfd == identity {
                0
            } else {
                self.intern_cstr(nfd)
            };

            let nfkd = encode_utf8(&self.records[i].decomposed_nfkd);
            self.records[i].offset_nfkd = if nfkd == identity {
                0
            } else {
                self.intern_cstr(nfkd)
            };
        }
    }

    /// Invert every canonical two-codepoint decomposition found so far,
    /// registering `(L, M) -> composed` on `L`'s record.
    fn resolve_compositions(&mut self) {
        for i in 0..self.records.len() {
            let pair = {
                let r = &self.records[i];
                if r.decomposition_type.is_canonical()
                    && r.decomposition_codepoints.len() == 2
                {
                    Some((
                        r.decomposition_codepoints[0],
                        r.decomposition_codepoints[1],
                        r.codepoint,
                    ))
                } else {
                    None
                }
            };
            let (left, right, composed) = match pair {
                Some(p) => p,
                None => continue,
            };
            match self.index.get(&left.value()).cloned() {
                Some(li) => {
                    self.records[li].composition_pairs.insert(right, composed);
                }
                None => eprintln!(
                    "compose: missing codepoint {} in database", left),
            }
        }
    }

    /// Overwrite simple case mappings with the unconditional entries from
    /// `SpecialCasing.txt`. Entries carrying language/context conditions are
    /// skipped entirely: this table has no notion of locale.
    fn apply_special_casing(&mut self, ucd_dir: &Path) -> Result<()> {
        let entries: Vec<SpecialCaseMapping<'static>> = ucd_parse::parse(ucd_dir)?;
        for entry in entries {
            if !entry.is_unconditional() {
                continue;
            }
            match self.index.get(&entry.codepoint.value()).cloned() {
                Some(i) => {
                    self.records[i].lowercase = entry.lowercase;
                    self.records[i].titlecase = entry.titlecase;
                    self.records[i].uppercase = entry.uppercase;
                }
                None => eprintln!(
                    "special casing: missing codepoint {} in database",
                    entry.codepoint),
            }
        }
        Ok(())
    }

    /// Encode the (possibly special-cased) case mapping lists for every
    /// non-ASCII record that has one.
    fn encode_case_mappings(&mut self) {
        for i in 0..self.records.len() {
            if self.records[i].codepoint.value() < 0x7F {
                continue;
            }
            if !self.records[i].uppercase.is_empty() {
                let bytes = encode_utf8(&self.records[i].uppercase);
                self.records[i].offset_uppercase = self.interner.intern(
                    &with_trailing_nul(bytes));
            }
            if !self.records[i].lowercase.is_empty() {
                let bytes = encode_utf8(&self.records[i].lowercase);
                self.records[i].offset_lowercase = self.interner.intern(
                    &with_trailing_nul(bytes));
            }
            if !self.records[i].titlecase.is_empty() {
                let bytes = encode_utf8(&self.records[i].titlecase);
                self.records[i].offset_titlecase = self.interner.intern(
                    &with_trailing_nul(bytes));
            }
        }
        if self.verbose {
            eprintln!(
                "interner: {} requests, {} bytes in blob",
                self.interner.requests(), self.interner.blob().len());
        }
    }

    fn intern_cstr(&mut self, mut bytes: Vec<u8>) -> u32 {
        bytes.push(0);
        self.interner.intern(&bytes)
    }

    /// Dump a codepoint's record and both decomposition forms to stdout, as
    /// requested by the `--query` flag. Returns `false` (rather than
    /// faulting) if the codepoint isn't in the database.
    pub fn query(&self, codepoint: Codepoint) -> bool {
        let rec = match self.get(codepoint) {
            Some(rec) => rec,
            None => {
                println!("codepoint {} not found in database", codepoint);
                return false;
            }
        };
        println!("{:#?}", rec);
        println!("Canonical:");
        print_codepoints(&rec.decomposed_nfd);
        println!("Compatibility:");
        print_codepoints(&rec.decomposed_nfkd);
        true
    }
}

fn with_trailing_nul(mut bytes: Vec<u8>) -> Vec<u8> {
    bytes.push(0);
    bytes
}

fn print_codepoints(codepoints: &[Codepoint]) {
    let rendered: Vec<String> =
        codepoints.iter().map(|cp| cp.to_string()).collect();
    println!("{}", rendered.join(" "));
}

fn load_unicode_data(
    ucd_dir: &Path,
    opts: &BuildOptions,
) -> Result<Vec<UnicodeData<'static>>> {
    let path = ucd_dir.join("UnicodeData.txt");
    let file = ::std::fs::File::open(&path)?;
    let mut parser: ucd_parse::UcdLineParser<_, UnicodeData<'static>> =
        ucd_parse::UcdLineParser::new(file);

    let mut entries = Vec::new();
    let mut lines_read = 0usize;
    loop {
        if let Some(limit) = opts.line_limit {
            if lines_read >= limit {
                break;
            }
        }
        match parser.next() {
            None => break,
            Some(Ok(ud)) => entries.push(ud),
            Some(Err(err)) => {
                eprintln!("error parsing UnicodeData.txt line: {}", err);
            }
        }
        lines_read += 1;
    }

    let mut entries: Vec<_> = entries.into_iter().skip(opts.entry_skip).collect();
    if let Some(limit) = opts.entry_limit {
        entries.truncate(limit);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucd_parse::Codepoint;

    fn cp(n: u32) -> Codepoint {
        Codepoint::from_u32(n).unwrap()
    }

    fn ud(line: &str) -> UnicodeData<'static> {
        line.parse().unwrap()
    }

    // Scenario A: LATIN SMALL LETTER A WITH ACUTE.
    #[test]
    fn a_with_acute_canonical_decomposition_and_uppercase() {
        let rec = CodepointRecord::from_unicode_data(&ud(
            "00E1;LATIN SMALL LETTER A WITH ACUTE;Ll;0;L;0061 0301;;;;N;;;00C1;;00C1",
        )).unwrap();
        assert_eq!(rec.general_category, GeneralCategory::LowercaseLetter);
        assert!(rec.decomposition_type.is_canonical());
        assert_eq!(rec.decomposition_codepoints, vec![cp(0x0061), cp(0x0301)]);
        assert_eq!(rec.uppercase, vec![cp(0x00C1)]);
    }

    // Scenario B: SUPERSCRIPT TWO.
    #[test]
    fn superscript_two_is_compat_only_with_decimal_value() {
        let rec = CodepointRecord::from_unicode_data(&ud(
            "00B2;SUPERSCRIPT TWO;No;0;EN;<super> 0032;2;2;2;N;SUPERSCRIPT DIGIT TWO;;;;",
        )).unwrap();
        assert_eq!(rec.decomposition_type, DecompositionType::Superscript);
        assert_eq!(rec.numeric_type, NumericType::Decimal);
        assert_eq!(rec.numeric_value, 2.0);
    }

    // Scenario C: VULGAR FRACTION ONE HALF.
    #[test]
    fn vulgar_fraction_one_half_is_rational() {
        let rec = CodepointRecord::from_unicode_data(&ud(
            "00BD;VULGAR FRACTION ONE HALF;No;0;ON;<fraction> 0031 2044 0032;;;1/2;N;;;;;",
        )).unwrap();
        assert_eq!(rec.numeric_type, NumericType::Numeric);
        assert_eq!(rec.numeric_value, 0.5);
        assert_eq!(
            rec.decomposition_codepoints,
            vec![cp(0x0031), cp(0x2044), cp(0x0032)]);
    }

    // Testable property 4: a compatibility decomposition chain bottoms out
    // in atoms that have no further decomposition of their own, exercised
    // through the actual resolver rather than just the raw parsed fields.
    #[test]
    fn compat_decomposition_chain_bottoms_out_in_atoms() {
        let mut db = Database {
            records: Vec::new(),
            index: BTreeMap::new(),
            blocks: Vec::new(),
            interner: BlobInterner::new(),
            verbose: false,
        };
        let superscript_two = CodepointRecord::from_unicode_data(&ud(
            "00B2;SUPERSCRIPT TWO;No;0;EN;<super> 0032;2;2;2;N;\
             SUPERSCRIPT DIGIT TWO;;;;",
        )).unwrap();
        let digit_two = CodepointRecord::from_unicode_data(&ud(
            "0032;DIGIT TWO;Nd;0;EN;;2;2;2;N;;;;;",
        )).unwrap();
        for rec in vec![digit_two, superscript_two] {
            let idx = db.records.len();
            db.index.insert(rec.codepoint.value(), idx);
            db.records.push(rec);
        }
        db.sort_and_reindex();
        db.resolve_decompositions();

        let superscript_two = db.get(cp(0x00B2)).unwrap();
        // Canonical-only resolution never follows a compat tag, so NFD is
        // the identity.
        assert_eq!(superscript_two.decomposed_nfd, vec![cp(0x00B2)]);
        // NFKD follows the compat tag down to DIGIT TWO, which has no
        // decomposition of its own and so terminates the chain.
        assert_eq!(superscript_two.decomposed_nfkd, vec![cp(0x0032)]);

        let digit_two = db.get(cp(0x0032)).unwrap();
        assert_eq!(digit_two.decomposed_nfd, vec![cp(0x0032)]);
        assert_eq!(digit_two.decomposed_nfkd, vec![cp(0x0032)]);
    }

    fn build_fixture() -> Database {
        let mut db = Database {
            records: Vec::new(),
            index: BTreeMap::new(),
            blocks: Vec::new(),
            interner: BlobInterner::new(),
            verbose: false,
        };
        let a_acute = CodepointRecord::from_unicode_data(&ud(
            "00E1;LATIN SMALL LETTER A WITH ACUTE;Ll;0;L;0061 0301;;;;N;;;00C1;;00C1",
        )).unwrap();
        let a = CodepointRecord::from_unicode_data(&ud(
            "0061;LATIN SMALL LETTER A;Ll;0;L;;;;;N;;;0041;;0041",
        )).unwrap();
        let combining_acute = CodepointRecord::from_unicode_data(&ud(
            "0301;COMBINING ACUTE ACCENT;Mn;230;NSM;;;;;N;NON-SPACING ACUTE;;;;",
        )).unwrap();
        for rec in vec![a, combining_acute, a_acute] {
            let idx = db.records.len();
            db.index.insert(rec.codepoint.value(), idx);
            db.records.push(rec);
        }
        db.sort_and_reindex();
        db
    }

    // Testable property 3 & scenario A/F: canonical equivalence and the
    // composition pass's inverse relationship.
    #[test]
    fn decomposition_and_composition_round_trip() {
        let mut db = build_fixture();
        db.resolve_decompositions();
        db.encode_decompositions();
        db.resolve_compositions();

        let a_acute = db.get(cp(0x00E1)).unwrap();
        assert_eq!(a_acute.decomposed_nfd, vec![cp(0x0061), cp(0x0301)]);
        assert_eq!(a_acute.decomposed_nfkd, vec![cp(0x0061), cp(0x0301)]);

        let a = db.get(cp(0x0061)).unwrap();
        assert_eq!(a.composition_pairs.get(&cp(0x0301)), Some(&cp(0x00E1)));
    }

    // Testable property 2: atoms with no decomposition resolve to
    // themselves under both NFD and NFKD.
    #[test]
    fn atoms_resolve_to_themselves() {
        let mut db = build_fixture();
        db.resolve_decompositions();
        let a = db.get(cp(0x0061)).unwrap();
        assert_eq!(a.decomposed_nfd, vec![cp(0x0061)]);
        assert_eq!(a.decomposed_nfkd, vec![cp(0x0061)]);
    }

    // Testable property 6: identity decompositions never get a blob offset.
    #[test]
    fn identity_decomposition_has_zero_offset() {
        let mut db = build_fixture();
        db.resolve_decompositions();
        db.encode_decompositions();
        let a = db.get(cp(0x0061)).unwrap();
        assert_eq!(a.offset_nfd, 0);
        assert_eq!(a.offset_nfkd, 0);

        let a_acute = db.get(cp(0x00E1)).unwrap();
        assert_ne!(a_acute.offset_nfd, 0);
    }

    // Testable property 9: ASCII never gets a case offset, even once
    // special-cased — exercised here directly through the encoder.
    #[test]
    fn ascii_excluded_from_case_encoding() {
        let mut db = build_fixture();
        db.encode_case_mappings();
        let a = db.get(cp(0x0061)).unwrap();
        assert_eq!(a.offset_uppercase, 0);
    }

    // Scenario E: special-case override on SHARP S.
    #[test]
    fn special_case_override_replaces_simple_uppercase() {
        let mut db = build_fixture();
        let mut sharp_s = CodepointRecord::new(cp(0x00DF));
        sharp_s.name = "LATIN SMALL LETTER SHARP S".to_string();
        let idx = db.records.len();
        db.records.push(sharp_s);
        db.index.insert(0x00DF, idx);
        db.sort_and_reindex();

        let entry: SpecialCaseMapping<'static> =
            "00DF; 00DF; 0053 0073; 0053 0053;".parse().unwrap();
        assert!(entry.is_unconditional());
        let i = *db.index.get(&0x00DF).unwrap();
        db.records[i].lowercase = entry.lowercase;
        db.records[i].titlecase = entry.titlecase;
        db.records[i].uppercase = entry.uppercase;
        db.encode_case_mappings();

        let rec = db.get(cp(0x00DF)).unwrap();
        assert_eq!(rec.uppercase, vec![cp(0x0053), cp(0x0053)]);
        assert_ne!(rec.offset_uppercase, 0);
    }

    // Scenario D / testable property 1: range expansion covers every
    // interior codepoint of the six named blocks.
    #[test]
    fn range_expansion_covers_block_interior() {
        let mut db = Database {
            records: Vec::new(),
            index: BTreeMap::new(),
            blocks: Vec::new(),
            interner: BlobInterner::new(),
            verbose: false,
        };
        let start = CodepointRecord::from_unicode_data(&ud(
            "4E00;<CJK Ideograph, First>;Lo;0;L;;;;;N;;;;;",
        )).unwrap();
        let end = CodepointRecord::from_unicode_data(&ud(
            "4E02;<CJK Ideograph, Last>;Lo;0;L;;;;;N;;;;;",
        )).unwrap();
        for rec in vec![start, end] {
            let idx = db.records.len();
            db.index.insert(rec.codepoint.value(), idx);
            db.records.push(rec);
        }
        db.sort_and_reindex();
        db.blocks = vec!["4E00..4E02; CJK Unified Ideographs".parse().unwrap()];

        db.resolve_blocks().unwrap();
        db.expand_ranges().unwrap();

        assert!(db.get(cp(0x4E00)).is_some());
        assert!(db.get(cp(0x4E01)).is_some());
        assert!(db.get(cp(0x4E02)).is_some());
        assert_eq!(db.records().len(), 3);
    }

    // Design note: the block cursor must use a `while` loop, not a single
    // `if`, or a record following a synthesized gap ends up in the wrong
    // block.
    #[test]
    fn block_resolution_skips_multiple_exhausted_blocks() {
        let mut db = Database {
            records: Vec::new(),
            index: BTreeMap::new(),
            blocks: Vec::new(),
            interner: BlobInterner::new(),
            verbose: false,
        };
        db.blocks = vec![
            "0000..0000; Tiny Block One".parse().unwrap(),
            "0001..0001; Tiny Block Two".parse().unwrap(),
            "0002..00FF; Target Block".parse().unwrap(),
        ];
        let rec = CodepointRecord::new(cp(0x0010));
        db.records.push(rec);
        db.index.insert(0x0010, 0);

        db.resolve_blocks().unwrap();
        assert_eq!(db.block_name(&db.records[0]), Some("Target Block"));
    }
}
