// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The parallel renderer.  Each worker in a process group renders
//! its own band of rows, times itself, and contributes its band to a
//! gather on the root, which assembles the image and writes it out.

use std::path::PathBuf;

use log::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::group::{Communicator, ProcessGroup};
use crate::partition::{band, partition};
use crate::pgm::save_pgm;
use crate::render::{Raster, Renderer, Rendering};
use crate::timing::{report, timed, Timing};

/// The rank that receives the gathered image.
pub const ROOT: usize = 0;

/// What a single worker ends up with.  Only the root has a raster.
#[derive(Debug)]
pub struct WorkerOutcome {
    /// The assembled image, on the root only.
    pub raster: Option<Raster>,
    /// How long this worker spent rendering its band.
    pub timing: Timing,
}

/// Renders an image with a fixed number of cooperating workers.
#[derive(Clone, Debug)]
pub struct ParallelOrchestrator {
    config: Config,
    workers: usize,
    output: Option<PathBuf>,
    console: bool,
}

impl ParallelOrchestrator {
    /// Checks the configuration and that `workers` can split the
    /// image's rows.  Nothing is rendered until `run`.
    pub fn new(config: Config, workers: usize) -> Result<ParallelOrchestrator> {
        config.validate()?;
        partition(config.height, workers)?;
        Ok(ParallelOrchestrator {
            config,
            workers,
            output: None,
            console: true,
        })
    }

    /// Has the root write the image to `path`.
    pub fn output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Turns the per-worker timing lines on stdout on or off.  They
    /// are always logged.
    pub fn console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Starts the process group, runs every worker to completion, and
    /// returns the root's image with every worker's timing.
    pub fn run(&self) -> Result<Rendering> {
        let renderer = Renderer::new(&self.config)?;
        let group = ProcessGroup::new(self.workers)?;
        let outcomes = group.run(|comm| self.run_worker(&renderer, comm))?;

        let mut raster = None;
        let mut timings = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            let outcome = outcome?;
            timings.push(outcome.timing);
            if outcome.raster.is_some() {
                raster = outcome.raster;
            }
        }
        let raster = raster.ok_or_else(|| Error::Gather("the root gathered nothing".to_string()))?;
        Ok(Rendering { raster, timings })
    }

    /// One worker's whole life: find its band, render and time it,
    /// join the gather, and on the root, write the image.
    pub fn run_worker(&self, renderer: &Renderer, comm: Communicator) -> Result<WorkerOutcome> {
        let rank = comm.rank();
        let size = comm.size();

        let band = band(self.config.height, size, rank)?;
        debug!("worker {} renders rows {}..{}", rank, band.start, band.end);

        let (local, timing) = timed(Some(rank), || renderer.render_band(&band));
        let local = local?;
        report(&timing, self.console);

        let gathered = comm.gather(local, ROOT)?;

        let raster = match gathered {
            Some(pixels) => {
                let raster = Raster::from_pixels(self.config.width, self.config.height, pixels)?;
                if let Some(ref path) = self.output {
                    save_pgm(path, &raster)?;
                }
                Some(raster)
            }
            None => None,
        };

        comm.leave();
        Ok(WorkerOutcome { raster, timing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::{escape_time, gray};
    use crate::planes::Pixel;

    fn config() -> Config {
        Config::new(40, 30, 300).unwrap()
    }

    #[test]
    fn reports_one_timing_per_worker_in_rank_order() {
        let rendering = ParallelOrchestrator::new(config(), 3)
            .unwrap()
            .console(false)
            .run()
            .unwrap();
        let ranks: Vec<_> = rendering.timings.iter().map(|t| t.rank).collect();
        assert_eq!(ranks, vec![Some(0), Some(1), Some(2)]);
        assert_eq!(rendering.raster.width(), 40);
        assert_eq!(rendering.raster.height(), 30);
    }

    #[test]
    fn gathered_image_matches_the_evaluator() {
        let rendering = ParallelOrchestrator::new(config(), 5)
            .unwrap()
            .console(false)
            .run()
            .unwrap();
        // Row 15 is the real axis; column 20 is the origin.
        assert_eq!(rendering.raster.get(&Pixel(20, 15)), Some(gray(300)));
        assert_eq!(rendering.raster.get(&Pixel(0, 0)), Some(gray(escape_time(-2.0, -2.0, 300))));
    }

    #[test]
    fn uneven_worker_counts_render_every_row() {
        let whole = Renderer::new(&config()).unwrap().render_all().unwrap();
        let rendering = ParallelOrchestrator::new(config(), 7)
            .unwrap()
            .console(false)
            .run()
            .unwrap();
        assert_eq!(rendering.raster, whole);
    }

    #[test]
    fn refuses_impossible_worker_counts() {
        assert!(ParallelOrchestrator::new(config(), 0).is_err());
        assert!(ParallelOrchestrator::new(config(), 31).is_err());
        assert!(ParallelOrchestrator::new(config(), 30).is_ok());
    }
}
