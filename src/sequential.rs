// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The single-threaded renderer: one pass over the whole image.  Its
//! output is the reference the parallel renderer is checked against.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::pgm::save_pgm;
use crate::render::{Renderer, Rendering};
use crate::timing::{report, timed};

/// Renders an image on the calling thread.
#[derive(Clone, Debug)]
pub struct SequentialOrchestrator {
    config: Config,
    output: Option<PathBuf>,
    console: bool,
}

impl SequentialOrchestrator {
    /// Checks the configuration.  Nothing is rendered until `run`.
    pub fn new(config: Config) -> Result<SequentialOrchestrator> {
        config.validate()?;
        Ok(SequentialOrchestrator {
            config,
            output: None,
            console: true,
        })
    }

    /// Writes the image to `path` once it is rendered.
    pub fn output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Turns the timing line on stdout on or off.
    pub fn console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Renders every row in one call, times it, and writes the image
    /// if an output path was given.
    pub fn run(&self) -> Result<Rendering> {
        let renderer = Renderer::new(&self.config)?;
        let (raster, timing) = timed(None, || renderer.render_all());
        let raster = raster?;
        report(&timing, self.console);

        if let Some(ref path) = self.output {
            save_pgm(path, &raster)?;
        }
        Ok(Rendering {
            raster,
            timings: vec![timing],
        })
    }
}
