// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns rows of the integral plane into rows of gray pixels.

use std::ops::Range;

use itertools::iproduct;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::escape::{escape_point, gray};
use crate::partition::RowBand;
use crate::planes::{Pixel, PlaneMapper};
use crate::timing::Timing;

/// A finished image: one gray byte per pixel, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Raster {
    /// Wraps a fully populated buffer.  The buffer must hold exactly
    /// `width * height` samples.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u8>) -> Result<Raster> {
        let expected = width.checked_mul(height);
        if expected != Some(pixels.len()) {
            return Err(Error::BufferSize {
                expected: expected.unwrap_or(usize::MAX),
                actual: pixels.len(),
            });
        }
        Ok(Raster {
            width,
            height,
            pixels,
        })
    }

    /// Columns in the image.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows in the image.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The samples, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// The sample at column `x` of row `y`.
    pub fn get(&self, pixel: &Pixel) -> Option<u8> {
        if pixel.0 >= self.width || pixel.1 >= self.height {
            return None;
        }
        Some(self.pixels[pixel.1 * self.width + pixel.0])
    }

}

/// What a finished run hands back: the image, and how long each
/// worker spent rendering (in rank order; a single entry for a
/// sequential run).
#[derive(Clone, Debug)]
pub struct Rendering {
    /// The assembled image.
    pub raster: Raster,
    /// Per-worker render times.
    pub timings: Vec<Timing>,
}

/// Renders rows of the Mandelbrot set for a single configuration.
/// Holds nothing mutable, so one renderer can be shared by every
/// worker.
#[derive(Clone, Debug)]
pub struct Renderer {
    plane: PlaneMapper,
    limit: u32,
}

impl Renderer {
    /// Requires a configuration that passes validation.
    pub fn new(config: &Config) -> Result<Renderer> {
        config.validate()?;
        Ok(Renderer {
            plane: PlaneMapper::new(config),
            limit: config.iterations,
        })
    }

    /// The mapping from pixels to points this renderer uses.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// Evaluates every pixel of `rows` and stores its shade in
    /// `buffer`, which holds exactly those rows: the pixel at (x, y)
    /// lands at `(y - rows.start) * width + x`.
    pub fn render_rows(&self, buffer: &mut [u8], rows: Range<usize>) -> Result<()> {
        let width = self.plane.integral_plane.0;
        let height = self.plane.integral_plane.1;
        if rows.start > rows.end || rows.end > height {
            return Err(Error::Config(format!(
                "rows {}..{} fall outside an image of {} rows",
                rows.start, rows.end, height
            )));
        }
        let expected = width * (rows.end - rows.start);
        if buffer.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: buffer.len(),
            });
        }

        for ((y, x), sample) in iproduct!(rows, 0..width).zip(buffer.iter_mut()) {
            let point = self.plane.pixel_to_point(&Pixel(x, y));
            *sample = gray(escape_point(point, self.limit));
        }
        Ok(())
    }

    /// Allocates a buffer for one worker's band and renders into it.
    pub fn render_band(&self, band: &RowBand) -> Result<Vec<u8>> {
        let mut buffer = vec![0 as u8; self.plane.integral_plane.0 * band.len()];
        self.render_rows(&mut buffer, band.rows())?;
        Ok(buffer)
    }

    /// Renders the whole image in one pass.
    pub fn render_all(&self) -> Result<Raster> {
        let mut buffer = vec![0 as u8; self.plane.len()];
        self.render_rows(&mut buffer, 0..self.plane.integral_plane.1)?;
        Raster::from_pixels(self.plane.integral_plane.0, self.plane.integral_plane.1, buffer)
    }
}
