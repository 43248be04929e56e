// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pieces shared by the `parabrot` and `seqbrot` command lines:
//! common arguments, logger setup, and error reporting.

use std::str::FromStr;

use clap::Arg;
use failure::Fail;

use crate::error::Error;

/// Name of the output file argument.
pub const OUTPUT: &str = "output";
/// Name of the worker count argument.
pub const WORKERS: &str = "workers";
/// Name of the flag that silences timing lines.
pub const QUIET: &str = "quiet";
/// Name of the log level argument.
pub const VERBOSITY: &str = "verbosity";

/// Where `parabrot` writes when no output is given.
pub const DEFAULT_OUTPUT: &str = "mandelbrot.pgm";

const LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Checks that `s` parses as a number within `low..=high`.
pub fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

/// `-o/--output FILE`.
pub fn output_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name(OUTPUT)
        .long(OUTPUT)
        .short("o")
        .takes_value(true)
        .value_name("FILE")
        .help("Output file (binary PGM)")
}

/// `-q/--quiet`.
pub fn quiet_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name(QUIET)
        .long(QUIET)
        .short("q")
        .help("Do not print execution times")
}

/// `-v/--verbosity LEVEL`.
pub fn verbosity_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name(VERBOSITY)
        .long(VERBOSITY)
        .short("v")
        .takes_value(true)
        .value_name("LEVEL")
        .possible_values(LEVELS)
        .default_value("warn")
        .help("Log level; RUST_LOG overrides it")
}

/// Starts the logger.  `RUST_LOG` wins over `verbosity` when set.
pub fn init_logging(verbosity: Option<&str>) {
    let env = env_logger::Env::default().default_filter_or(verbosity.unwrap_or("warn"));
    // A logger may already be installed when running under a test harness.
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Prints an error and everything that caused it on stderr.
pub fn report_error(e: &Error) {
    eprintln!("error: {}", e);
    let fail: &dyn Fail = e;
    for cause in fail.iter_causes() {
        eprintln!("caused by: {}", cause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_range_accepts_the_bounds() {
        assert!(validate_range("1", 1, 800, "nan", "range").is_ok());
        assert!(validate_range("800", 1, 800, "nan", "range").is_ok());
    }

    #[test]
    fn validate_range_explains_failures() {
        assert_eq!(validate_range("0", 1, 800, "nan", "range"), Err("range".to_string()));
        assert_eq!(validate_range("many", 1, 800, "nan", "range"), Err("nan".to_string()));
    }
}
