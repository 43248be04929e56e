// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate parabrot;

use clap::{App, ArgMatches};
use log::info;
use std::process::exit;

use parabrot::cli::{
    init_logging, output_arg, quiet_arg, report_error, verbosity_arg, OUTPUT, QUIET, VERBOSITY,
};
use parabrot::{Config, Result, SequentialOrchestrator};

fn args<'a>() -> ArgMatches<'a> {
    App::new("seqbrot")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Renders the Mandelbrot set on a single thread")
        .arg(output_arg())
        .arg(quiet_arg())
        .arg(verbosity_arg())
        .get_matches()
}

fn run(matches: &ArgMatches) -> Result<()> {
    let mut orchestrator =
        SequentialOrchestrator::new(Config::default())?.console(!matches.is_present(QUIET));
    if let Some(output) = matches.value_of(OUTPUT) {
        orchestrator = orchestrator.output(output);
    }

    let rendering = orchestrator.run()?;
    info!(
        "rendered {}x{}",
        rendering.raster.width(),
        rendering.raster.height()
    );
    Ok(())
}

fn main() {
    let matches = args();
    init_logging(matches.value_of(VERBOSITY));

    if let Err(e) = run(&matches) {
        report_error(&e);
        exit(1);
    }
}
