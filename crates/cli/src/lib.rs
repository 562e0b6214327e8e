//! Command-line front end: read a SELECT statement, print its sections.
//!
//! Exit codes: 0 on success, 1 when the input cannot be read or is not
//! valid UTF-8, 2 when the statement does not parse.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use sqlsect_core::ParseError;

mod input;
mod logger;

#[derive(Debug, Parser)]
#[command(
    name = "sqlsect",
    about = "Split a MySQL SELECT statement into clauses and placeholder positions",
    version
)]
struct Cli {
    /// SQL file to parse. Use `-` to read from stdin.
    #[arg(default_value = "-")]
    input: PathBuf,
}

pub fn run_with_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    if let Err(error) = logger::init() {
        eprintln!("{error}");
        return 1;
    }

    let sql = match input::read_query(&cli.input) {
        Ok(sql) => sql,
        Err(error) => {
            eprintln!("{error}");
            return 1;
        }
    };

    match sqlsect_core::parse_bytes(&sql) {
        Ok(result) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            if let Err(error) = result.serialize(&mut out).and_then(|()| out.flush()) {
                eprintln!("{error}");
                return 1;
            }
            0
        }
        Err(error @ ParseError::InvalidArgument) => {
            log::debug!("input rejected: {error}");
            eprintln!("{error}");
            1
        }
        Err(error) => {
            log::debug!("parse failed: {error}");
            eprintln!("{error}");
            2
        }
    }
}
