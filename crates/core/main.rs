#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::mod_module_files)]

use std::{process, time::Duration};

mod app;

use clap::{Args, Parser};
use eyre::WrapErr;
use log::{error, trace};

fn main() {
    let cli = Cli::parse();
    let GlobalOpts {
        verbosity, quiet, ..
    } = cli.global_opts;

    if let Err(err) = setup_errlog(usize::from(verbosity), quiet) {
        // no logger to report through
        eprintln!("{err:#}");
        process::exit(1);
    }

    match try_main(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            error!("{err:#}");
            process::exit(1);
        }
    }
}

fn try_main(cli: Cli) -> eyre::Result<bool> {
    let Cli {
        isbn,
        global_opts:
            GlobalOpts {
                api_url, timeout, ..
            },
    } = cli;

    trace!("Looking up '{isbn}' using the API at '{api_url}'");
    app::lookup(&isbn, &api_url, Duration::from_secs(timeout))
}

fn setup_errlog(verbosity: usize, quiet: bool) -> eyre::Result<()> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 0 } else { verbosity + 1 };

    stderrlog::new()
        .verbosity(verbosity)
        .init()
        .wrap_err("Cannot set up logging")
}

#[derive(Parser)]
#[clap(name = "bookseek")]
#[clap(about = "Look up book details by ISBN using the Open Library API")]
#[clap(version)]
struct Cli {
    /// The ISBN of the book to look up (10 or 13 digits, hyphens are allowed)
    isbn: String,

    #[clap(flatten)]
    global_opts: GlobalOpts,
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// Base URL of the Open Library compatible API
    #[clap(long, env = "BOOKSEEK_API_URL", default_value = bookseek::DEFAULT_API_URL)]
    api_url: String,

    /// Seconds to wait for the API before giving up
    #[clap(
        long,
        env = "BOOKSEEK_TIMEOUT",
        value_name = "SECONDS",
        default_value_t = bookseek::DEFAULT_TIMEOUT.as_secs()
    )]
    timeout: u64,

    /// How chatty the program is on stderr
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences))]
    verbosity: u8,

    /// Only log errors to stderr, results are still printed to stdout.
    #[clap(short, long)]
    quiet: bool,
}

#[test]
fn logger_can_only_be_set_up_once() {
    assert!(setup_errlog(0, true).is_ok());

    let err = setup_errlog(2, false).unwrap_err();
    assert!(format!("{err:#}").starts_with("Cannot set up logging"));
}
