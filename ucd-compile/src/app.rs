use clap::{App, AppSettings, Arg};

const TEMPLATE: &'static str = "\
{bin} {version}
{author}
{about}

USAGE:
    {usage}

ARGS:
{positionals}

OPTIONS:
{unified}";

const ABOUT: &'static str = "
ucd-compile reads a Unicode character database directory and emits a C
source file containing the decomposition, composition and case-mapping
tables consumed by a runtime UTF-8 normalization and case-mapping library.";

/// Build a clap application describing ucd-compile's command line
/// interface.
pub fn app() -> App<'static, 'static> {
    let ucd_dir = Arg::with_name("ucd-dir")
        .required(true)
        .help("Directory containing UnicodeData.txt, Blocks.txt and \
               SpecialCasing.txt.");
    let output = Arg::with_name("output")
        .required(true)
        .help("Path to write the generated C source file to.");
    let case_fixture = Arg::with_name("case-fixture")
        .long("case-fixture")
        .takes_value(true)
        .value_name("PATH")
        .help("Also write a text fixture of every codepoint's case \
               mappings to PATH, for testing a runtime implementation.");
    let verbose = Arg::with_name("verbose")
        .short("v")
        .long("verbose")
        .help("Print diagnostics about the build, such as interner \
               statistics, to stderr.");
    let line_limit = Arg::with_name("line-limit")
        .long("line-limit")
        .takes_value(true)
        .value_name("N")
        .help("Stop reading UnicodeData.txt after N physical lines. \
               Intended for quick debugging runs.");
    let entry_limit = Arg::with_name("entry-limit")
        .long("entry-limit")
        .takes_value(true)
        .value_name("N")
        .help("Keep at most N successfully parsed UnicodeData.txt entries.");
    let entry_skip = Arg::with_name("entry-skip")
        .long("entry-skip")
        .takes_value(true)
        .value_name("N")
        .default_value("0")
        .help("Skip the first N successfully parsed UnicodeData.txt \
               entries before collecting any.");
    let page_size = Arg::with_name("page-size")
        .long("page-size")
        .takes_value(true)
        .value_name("N")
        .default_value("32767")
        .help("Number of bytes of generated string literal to emit per \
               line of the decomposition data table.");
    let query = Arg::with_name("query")
        .long("query")
        .takes_value(true)
        .value_name("HEX")
        .help("Print the resolved record for a single codepoint (given as \
               hexadecimal, e.g. 00E1) and exit without writing any output.");

    App::new("ucd-compile")
        .author(crate_authors!())
        .version(crate_version!())
        .about(ABOUT)
        .template(TEMPLATE)
        .max_term_width(100)
        .setting(AppSettings::UnifiedHelpMessage)
        .arg(ucd_dir)
        .arg(output)
        .arg(case_fixture)
        .arg(verbose)
        .arg(line_limit)
        .arg(entry_limit)
        .arg(entry_skip)
        .arg(page_size)
        .arg(query)
}
