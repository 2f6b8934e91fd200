use std::env;
use std::io::{self, Write};

use database::Database;
use error::Result;

/// Builds a `Writer` configured to emit the C source tables a runtime
/// normalization and case-mapping library consumes.
#[derive(Clone, Debug)]
pub struct WriterBuilder {
    page_size: usize,
}

impl WriterBuilder {
    /// Create a new builder. `page_size` bounds how many bytes of the
    /// `DecompositionData` string literal are written per source line.
    pub fn new(page_size: usize) -> WriterBuilder {
        WriterBuilder { page_size: page_size }
    }

    /// Create a writer that writes to the given sink.
    pub fn from_writer<W: io::Write + 'static>(&self, wtr: W) -> Writer {
        Writer {
            wtr: LineWriter::new(Box::new(wtr)),
            wrote_header: false,
            page_size: self.page_size,
        }
    }
}

/// Emits the C source representation of a compiled `Database`.
pub struct Writer {
    wtr: LineWriter<Box<io::Write + 'static>>,
    wrote_header: bool,
    page_size: usize,
}

impl Writer {
    /// Write every table a runtime normalization and case-mapping library
    /// needs: the per-codepoint record table, the composition lookup
    /// table, and the blob backing every variable-length mapping.
    pub fn database(&mut self, db: &Database) -> Result<()> {
        self.header()?;
        self.decomposition_records(db)?;
        self.composition_records(db)?;
        self.decomposition_data(db)?;
        self.wtr.flush()?;
        Ok(())
    }

    fn header(&mut self) -> Result<()> {
        if self.wrote_header {
            return Ok(());
        }
        let mut argv = vec![];
        argv.push(
            env::current_exe()?
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned());
        for arg in env::args_os().skip(1) {
            argv.push(arg.to_string_lossy().into_owned());
        }
        writeln!(self.wtr, "// DO NOT EDIT THIS FILE. \
                               IT WAS AUTOMATICALLY GENERATED BY:")?;
        writeln!(self.wtr, "//")?;
        writeln!(self.wtr, "//  {}", argv.join(" "))?;
        writeln!(self.wtr, "//")?;
        writeln!(self.wtr, "// ucd-compile is available on crates.io.")?;
        writeln!(self.wtr, "")?;
        writeln!(self.wtr, "#include \"unicodedatabase.h\"")?;
        writeln!(self.wtr, "")?;
        self.wrote_header = true;
        Ok(())
    }

    /// Emit the five parallel `DecompositionRecord` tables (NFD, NFKD,
    /// Uppercase, Lowercase, Titlecase), each a sparse `{ codepoint, offset
    /// }` array holding only the records with a non-zero offset in that
    /// category, ordered by ascending codepoint.
    fn decomposition_records(&mut self, db: &Database) -> Result<()> {
        self.offset_table(
            "Nfd", db.records().iter().map(|r| (r.codepoint.value(), r.offset_nfd)))?;
        self.offset_table(
            "Nfkd", db.records().iter().map(|r| (r.codepoint.value(), r.offset_nfkd)))?;
        self.offset_table(
            "Uppercase",
            db.records().iter().map(|r| (r.codepoint.value(), r.offset_uppercase)))?;
        self.offset_table(
            "Lowercase",
            db.records().iter().map(|r| (r.codepoint.value(), r.offset_lowercase)))?;
        self.offset_table(
            "Titlecase",
            db.records().iter().map(|r| (r.codepoint.value(), r.offset_titlecase)))?;
        Ok(())
    }

    fn offset_table<I: Iterator<Item = (u32, u32)>>(
        &mut self,
        name: &str,
        pairs: I,
    ) -> Result<()> {
        let entries: Vec<(u32, u32)> =
            pairs.filter(|&(_, offset)| offset != 0).collect();

        writeln!(
            self.wtr,
            "const DecompositionRecord k{}Table[] = {{", name)?;
        for chunk in entries.chunks(4) {
            let mut line = String::from("  ");
            for &(cp, offset) in chunk {
                line.push_str(&format!("{{ 0x{:04X}, {} }}, ", cp, offset));
            }
            writeln!(self.wtr, "{}", line)?;
        }
        writeln!(self.wtr, "}};")?;
        writeln!(
            self.wtr, "const size_t k{}TableLength = {};", name, entries.len())?;
        writeln!(
            self.wtr,
            "const DecompositionRecord* const k{}TablePtr = k{}Table;",
            name, name)?;
        writeln!(self.wtr, "")?;
        Ok(())
    }

    fn composition_records(&mut self, db: &Database) -> Result<()> {
        let mut pairs: Vec<(u64, u32)> = Vec::new();
        for rec in db.records() {
            for (&second, &composed) in &rec.composition_pairs {
                let key =
                    ((rec.codepoint.value() as u64) << 32) | second.value() as u64;
                pairs.push((key, composed.value()));
            }
        }
        pairs.sort_by_key(|&(key, _)| key);
        for window in pairs.windows(2) {
            if window[0].0 == window[1].0 {
                eprintln!(
                    "warning: duplicate composition key {:016X}, \
                     keeping first occurrence", window[0].0);
            }
        }
        pairs.dedup_by_key(|pair| pair.0);

        writeln!(
            self.wtr,
            "const CompositionRecord kCompositionRecordTable[] = {{")?;
        for &(key, composed) in &pairs {
            self.wtr.write_str(&format!(
                "  {{ 0x{:016X}ULL, 0x{:04X} }},\n", key, composed))?;
        }
        writeln!(self.wtr, "}};")?;
        writeln!(
            self.wtr,
            "const size_t kCompositionRecordTableLength = {};",
            pairs.len())?;
        writeln!(self.wtr, "")?;
        Ok(())
    }

    fn decomposition_data(&mut self, db: &Database) -> Result<()> {
        let blob = db.interner().blob();
        writeln!(self.wtr, "const char kDecompositionData[] =")?;
        for page in blob.chunks(self.page_size) {
            let mut escaped = String::with_capacity(page.len() * 4);
            for &b in page {
                escaped.push_str(&escape_byte(b));
            }
            writeln!(self.wtr, "  \"{}\"", escaped)?;
        }
        writeln!(self.wtr, "  ;")?;
        writeln!(
            self.wtr,
            "const size_t kDecompositionDataLength = {};",
            db.interner().next_offset())?;
        Ok(())
    }
}

/// Write the plaintext case-mapping fixture a runtime implementation's
/// tests diff against: one line per codepoint that has a case mapping, in
/// the form `CCCCCCCC; UUUU...; LLLL...; TTTT...; # NAME`.
pub fn write_case_fixture<W: io::Write>(wtr: &mut W, db: &Database) -> Result<()> {
    for rec in db.records() {
        if rec.uppercase.is_empty()
            && rec.lowercase.is_empty()
            && rec.titlecase.is_empty()
        {
            continue;
        }
        writeln!(
            wtr,
            "{}; {}; {}; {}; # {}",
            hex8(rec.codepoint.value()),
            case_field(&rec.uppercase, rec.codepoint.value()),
            case_field(&rec.lowercase, rec.codepoint.value()),
            case_field(&rec.titlecase, rec.codepoint.value()),
            rec.name)?;
    }
    Ok(())
}

fn case_field(mapping: &[::ucd_parse::Codepoint], identity: u32) -> String {
    if mapping.is_empty() {
        hex8(identity)
    } else {
        mapping
            .iter()
            .map(|cp| hex8(cp.value()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn hex8(cp: u32) -> String {
    format!("{:08X}", cp)
}

fn escape_byte(b: u8) -> String {
    format!("\\x{:02x}", b)
}

#[derive(Debug)]
struct LineWriter<W> {
    wtr: W,
    line: String,
    columns: usize,
}

impl<W: io::Write> LineWriter<W> {
    fn new(wtr: W) -> LineWriter<W> {
        LineWriter { wtr: wtr, line: String::new(), columns: 79 }
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        if self.line.len() + s.len() > self.columns {
            self.flush_line()?;
        }
        self.line.push_str(s);
        Ok(())
    }

    fn flush_line(&mut self) -> io::Result<()> {
        if self.line.is_empty() {
            return Ok(());
        }
        self.wtr.write_all(self.line.as_bytes())?;
        self.line.clear();
        Ok(())
    }
}

impl<W: io::Write> io::Write for LineWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.flush_line()?;
        self.wtr.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_line()?;
        self.wtr.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::{self, Write};
    use std::rc::Rc;

    use super::{case_field, escape_byte, hex8, WriterBuilder};
    use database::{CodepointRecord, Database};
    use ucd_parse::Codepoint;

    fn cp(n: u32) -> Codepoint {
        Codepoint::from_u32(n).unwrap()
    }

    /// A `Write` sink that keeps a second handle to its buffer, so a test
    /// can inspect what was written after handing the sink's own handle to
    /// a `Writer` (which takes ownership of whatever it writes to).
    #[derive(Clone)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl SharedBuf {
        fn new() -> SharedBuf {
            SharedBuf(Rc::new(RefCell::new(Vec::new())))
        }

        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            self.0.borrow_mut().flush()
        }
    }

    // Testable property 8 / scenario F: composition keys are emitted sorted
    // ascending and deduplicated, with the fixture's lone genuine key
    // landing exactly where SPEC_FULL.md says it should. A second record
    // sharing the same codepoint contributes a colliding key, which must be
    // reported and collapsed rather than emitted twice.
    #[test]
    fn composition_records_are_sorted_and_deduplicated() {
        let mut a = CodepointRecord::new(cp(0x0061));
        a.composition_pairs.insert(cp(0x0301), cp(0x00E1));
        a.composition_pairs.insert(cp(0x0300), cp(0x00E0));

        let mut a_duplicate = CodepointRecord::new(cp(0x0061));
        a_duplicate.composition_pairs.insert(cp(0x0301), cp(0x00E1));

        let db = Database::from_records(vec![a, a_duplicate]);

        let buf = SharedBuf::new();
        let mut wtr = WriterBuilder::new(32767).from_writer(buf.clone());
        wtr.composition_records(&db).unwrap();
        wtr.wtr.flush().unwrap();

        let out = buf.contents();
        let first = out.find("0x0000006100000300ULL").unwrap();
        let second = out.find("0x0000006100000301ULL").unwrap();
        assert!(first < second, "keys must be emitted in ascending order");
        assert!(
            out.contains("0x0000006100000301ULL, 0x00E1"),
            "the fixture's named key must resolve to A WITH ACUTE's \
             codepoint");
        assert!(
            out.contains("kCompositionRecordTableLength = 2"),
            "the duplicate key must be deduplicated to a single entry");
    }

    #[test]
    fn hex8_is_zero_padded_and_uppercase() {
        assert_eq!(hex8(0x61), "00000061");
        assert_eq!(hex8(0x1F600), "0001F600");
    }

    #[test]
    fn case_field_falls_back_to_identity() {
        assert_eq!(case_field(&[], 0x61), "00000061");
    }

    #[test]
    fn case_field_joins_full_mapping() {
        let mapping = vec![cp(0x0053), cp(0x0053)];
        assert_eq!(case_field(&mapping, 0x00DF), "00000053 00000053");
    }

    #[test]
    fn escape_byte_is_hex_escape() {
        assert_eq!(escape_byte(0x41), "\\x41");
        assert_eq!(escape_byte(0x00), "\\x00");
    }
}
