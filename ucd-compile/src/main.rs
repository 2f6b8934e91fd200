#[macro_use]
extern crate clap;
extern crate ucd_parse;

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use error::Result;

macro_rules! err {
    ($($tt:tt)*) => {
        Err($crate::error::Error::other(format!($($tt)*)))
    }
}

mod app;
mod database;
mod enums;
mod error;
mod interner;
mod util;
mod writer;

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = app::app().get_matches();

    let ucd_dir = Path::new(matches.value_of_os("ucd-dir").unwrap());
    let opts = database::BuildOptions {
        verbose: matches.is_present("verbose"),
        line_limit: parse_limit(matches.value_of("line-limit"))?,
        entry_limit: parse_limit(matches.value_of("entry-limit"))?,
        entry_skip: match matches.value_of("entry-skip") {
            Some(s) => parse_usize(s)?,
            None => 0,
        },
    };
    let db = database::Database::build(ucd_dir, &opts)?;

    if let Some(query) = matches.value_of("query") {
        let cp: ucd_parse::Codepoint = match query.parse() {
            Ok(cp) => cp,
            Err(err) => return err!("invalid --query codepoint '{}': {}", query, err),
        };
        db.query(cp);
        return Ok(());
    }

    let page_size = match matches.value_of("page-size") {
        Some(s) => parse_usize(s)?,
        None => 32767,
    };
    let output = matches.value_of_os("output").unwrap();
    let mut wtr = writer::WriterBuilder::new(page_size)
        .from_writer(File::create(output)?);
    wtr.database(&db)?;

    if let Some(path) = matches.value_of_os("case-fixture") {
        let mut f = io::BufWriter::new(File::create(path)?);
        writer::write_case_fixture(&mut f, &db)?;
        f.flush()?;
    }

    Ok(())
}

fn parse_limit(s: Option<&str>) -> Result<Option<usize>> {
    match s {
        None => Ok(None),
        Some(s) => parse_usize(s).map(Some),
    }
}

fn parse_usize(s: &str) -> Result<usize> {
    match s.parse() {
        Ok(n) => Ok(n),
        Err(err) => err!("invalid integer '{}': {}", s, err),
    }
}
