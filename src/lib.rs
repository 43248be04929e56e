#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parallel Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points c on the complex plane for
//! which iterating z -> z² + c, starting from z = c, never runs off
//! to infinity.  Counting how many iterations a point survives before
//! it escapes gives every pixel a number, and folding that number into
//! a byte gives a grayscale picture.
//!
//! Every pixel is independent of every other, which makes the picture
//! a convenient yardstick for parallel decomposition.  This crate
//! renders it two ways.  The `SequentialOrchestrator` walks the whole
//! image on one thread.  The `ParallelOrchestrator` splits the rows
//! into one contiguous band per worker, lets each worker render and
//! time its band independently, and then gathers the bands, in rank
//! order, onto a single root worker that writes the image out as a
//! binary graymap.  Both produce the same bytes.

extern crate clap;
extern crate crossbeam;
extern crate env_logger;
extern crate failure;
extern crate itertools;
extern crate num;

pub mod cli;
pub mod config;
pub mod error;
pub mod escape;
pub mod group;
pub mod parallel;
pub mod partition;
pub mod pgm;
pub mod planes;
pub mod render;
pub mod sequential;
pub mod timing;

pub use config::Config;
pub use error::{Error, Result};
pub use parallel::ParallelOrchestrator;
pub use render::{Raster, Renderer, Rendering};
pub use sequential::SequentialOrchestrator;
