// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate num_cpus;
extern crate parabrot;

use clap::{value_t, App, Arg, ArgMatches};
use log::info;
use std::process::exit;

use parabrot::cli::{
    init_logging, output_arg, quiet_arg, report_error, validate_range, verbosity_arg,
    DEFAULT_OUTPUT, OUTPUT, QUIET, VERBOSITY, WORKERS,
};
use parabrot::config::{Config, HEIGHT};
use parabrot::{ParallelOrchestrator, Result};

fn args<'a>(default_workers: &'a str) -> ArgMatches<'a> {
    App::new("parabrot")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Renders the Mandelbrot set with cooperating workers")
        .arg(output_arg().default_value(DEFAULT_OUTPUT))
        .arg(
            Arg::with_name(WORKERS)
                .required(false)
                .long(WORKERS)
                .short("w")
                .takes_value(true)
                .default_value(default_workers)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        HEIGHT,
                        "Could not parse worker count",
                        &format!("Worker count must be between 1 and {}", HEIGHT),
                    )
                })
                .help("Number of workers that share the rows"),
        )
        .arg(quiet_arg())
        .arg(verbosity_arg())
        .get_matches()
}

fn run(matches: &ArgMatches) -> Result<()> {
    let workers = value_t!(matches, WORKERS, usize).unwrap_or_else(|e| e.exit());
    let output = matches.value_of(OUTPUT).unwrap_or(DEFAULT_OUTPUT);

    let rendering = ParallelOrchestrator::new(Config::default(), workers)?
        .output(output)
        .console(!matches.is_present(QUIET))
        .run()?;

    info!(
        "{} workers rendered {}x{} into {}",
        rendering.timings.len(),
        rendering.raster.width(),
        rendering.raster.height(),
        output
    );
    Ok(())
}

fn main() {
    let default_workers = num_cpus::get().to_string();
    let matches = args(&default_workers);
    init_logging(matches.value_of(VERBOSITY));

    if let Err(e) = run(&matches) {
        report_error(&e);
        exit(1);
    }
}
