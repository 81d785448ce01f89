// Command-line front end for pkgdiff.
//
// Translates flags into exclusions and reporter choice, runs one comparison
// over two package manifests, and maps the outcome onto the exit status.

use std::collections::HashSet;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueHint};
use log::{debug, info};

use crate::catalog::Field;
use crate::diff::DiffOptions;
use crate::engine::{CompareError, CompareOptions, Outcome, compare_with_options};
use crate::provider::ManifestProvider;
use crate::report::{CollectReporter, UnifiedReporter};

// ---------------------------------------------------------------------------
// Exit status
// ---------------------------------------------------------------------------

const EXIT_EQUAL: i32 = 0;
const EXIT_DIFFER: i32 = 1;
const EXIT_ERROR: i32 = 2;

const BUF_SIZE: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Compare package files by metadata.
#[derive(Parser, Debug)]
#[command(
    name = "pkgdiff",
    version,
    about = "Compare package files by metadata",
    arg_required_else_help = true
)]
struct Cli {
    /// Quiet mode: print nothing, only set the exit status.
    #[arg(short = 'q', long, conflicts_with = "json_output")]
    quiet: bool,

    /// Leave a field out of the comparison (repeat for more fields).
    #[arg(short = 'x', long = "exclude", value_name = "FIELD", action = ArgAction::Append)]
    exclude: Vec<String>,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Print the differences as JSON.
    #[arg(long = "json")]
    json_output: bool,

    /// Fail on a field whose edit distance exceeds N lines.
    #[arg(long = "max-distance", value_name = "N", conflicts_with = "quiet")]
    max_distance: Option<usize>,

    /// List the comparable fields and exit.
    #[arg(long = "list-fields", exclusive = true)]
    list_fields: bool,

    /// First package: a manifest file or a directory holding one.
    #[arg(value_hint = ValueHint::AnyPath, required_unless_present = "list_fields")]
    first: Option<PathBuf>,

    /// Second package: a manifest file or a directory holding one.
    #[arg(value_hint = ValueHint::AnyPath, required_unless_present = "list_fields")]
    second: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Resolved command + options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Compare,
    ListFields,
}

#[derive(Debug)]
struct Options {
    command: Command,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    exclusions: HashSet<String>,
    max_distance: Option<usize>,
    first: Option<PathBuf>,
    second: Option<PathBuf>,
}

fn resolve_options(cli: Cli) -> Options {
    let command = if cli.list_fields {
        Command::ListFields
    } else {
        Command::Compare
    };
    Options {
        command,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        json_output: cli.json_output,
        exclusions: cli.exclude.into_iter().collect(),
        max_distance: cli.max_distance,
        first: cli.first,
        second: cli.second,
    }
}

fn build_compare_options(opts: &Options) -> CompareOptions {
    CompareOptions {
        diff: DiffOptions {
            max_distance: opts.max_distance,
        },
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("pkgdiff".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// List command
// ---------------------------------------------------------------------------

fn cmd_list_fields() -> i32 {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for field in Field::ALL {
        if let Err(e) = writeln!(out, "{field}") {
            eprintln!("pkgdiff: write error: {e}");
            return EXIT_ERROR;
        }
    }
    EXIT_EQUAL
}

// ---------------------------------------------------------------------------
// Compare command
// ---------------------------------------------------------------------------

fn cmd_compare(opts: &Options) -> i32 {
    let (Some(first), Some(second)) = (&opts.first, &opts.second) else {
        eprintln!("pkgdiff: two packages are required");
        return EXIT_ERROR;
    };

    for name in &opts.exclusions {
        if name.parse::<Field>().is_err() {
            debug!("exclusion '{name}' is not a known field");
        }
    }

    let compare_opts = build_compare_options(opts);
    let provider = ManifestProvider;

    let result = if opts.quiet {
        compare_with_options(
            &provider,
            first,
            second,
            &opts.exclusions,
            None,
            &compare_opts,
        )
    } else if opts.json_output {
        let mut collect = CollectReporter::new();
        let result = compare_with_options(
            &provider,
            first,
            second,
            &opts.exclusions,
            Some(&mut collect),
            &compare_opts,
        );
        if let Some(json) = json_report(&collect, &result) {
            match serde_json::to_string_pretty(&json) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("pkgdiff: json output: {e}");
                    return EXIT_ERROR;
                }
            }
        }
        result
    } else {
        let stdout = io::stdout();
        let writer = BufWriter::with_capacity(BUF_SIZE, stdout.lock());
        let mut reporter = UnifiedReporter::new(writer);
        let result = compare_with_options(
            &provider,
            first,
            second,
            &opts.exclusions,
            Some(&mut reporter),
            &compare_opts,
        );
        if let Err(e) = reporter.into_inner().flush() {
            eprintln!("pkgdiff: write flush error: {e}");
            return EXIT_ERROR;
        }
        result
    };

    exit_code(result)
}

// Fields reported before a failure stay valid and are printed too.
fn json_report(
    collect: &CollectReporter,
    result: &Result<Outcome, CompareError>,
) -> Option<serde_json::Value> {
    if result.is_ok() || !collect.diffs.is_empty() {
        Some(collect.to_json())
    } else {
        None
    }
}

fn exit_code(result: Result<Outcome, CompareError>) -> i32 {
    match result {
        Ok(Outcome::Equal) => {
            info!("packages are equal");
            EXIT_EQUAL
        }
        Ok(Outcome::Differ) => {
            info!("packages differ");
            EXIT_DIFFER
        }
        Err(e) => {
            eprintln!("pkgdiff: {e}");
            EXIT_ERROR
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();
    let opts = resolve_options(cli);
    init_logging(opts.verbose);

    let exit_code = match opts.command {
        Command::Compare => cmd_compare(&opts),
        Command::ListFields => cmd_list_fields(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
