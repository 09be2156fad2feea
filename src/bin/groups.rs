//! Prints every hometown shared by at least two people in a
//! `hometown<TAB>fullname` data file.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    process::ExitCode,
};

use chained_dict::{groups, ArrayList, Dict, Mapping};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Table sizing used when grouping with the hash table.
const TABLE_HINT: usize = 1024;

#[derive(Debug, Parser)]
#[command(name = "groups", about = "Groups people by hometown")]
struct Args {
    /// Use hash tables as the dictionary
    #[arg(short = 't', conflicts_with = "map", required_unless_present = "map")]
    table: bool,

    /// Use binary search tree as the dictionary
    #[arg(short = 'm')]
    map: bool,

    /// The data file to read, or `-` for stdin
    file: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // usage errors exit 1 like every other failure; help and version exit 0
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match run(&args, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("groups: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn make_dict(args: &Args) -> Dict<String, ArrayList<String>> {
    if args.table {
        Dict::create_table(TABLE_HINT)
    } else {
        Dict::create_map()
    }
}

fn open_input(path: &str) -> chained_dict::Result<Box<dyn BufRead>> {
    if path == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file = File::open(path)?;
    Ok(Box::new(BufReader::new(file)))
}

fn run<W: Write>(args: &Args, out: &mut W) -> chained_dict::Result<()> {
    let mut dict = make_dict(args);
    tracing::debug!(kind = ?dict.kind(), file = %args.file, "grouping");

    let input = open_input(&args.file)?;
    groups::index_records(input, &mut dict)?;

    groups::write_groups(&dict, out)?;
    out.flush()?;

    tracing::debug!(hometowns = dict.len(), "done");
    Ok(())
}
